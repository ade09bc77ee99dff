use crate::domain::{PlantSpec, PowerPlant};
use crate::error::PlanError;

use super::PlantCatalog;

/// Factory for turning raw plant records into typed [`PowerPlant`]s
#[derive(Debug, Clone, Default)]
pub struct PlantFactory {
    catalog: PlantCatalog,
}

impl PlantFactory {
    pub fn new(catalog: PlantCatalog) -> Self {
        Self { catalog }
    }

    /// Create a single plant, resolving its type against the catalog
    pub fn create_plant(&self, spec: &PlantSpec) -> Result<PowerPlant, PlanError> {
        let entry = self.catalog.lookup(&spec.kind)?;
        Ok(PowerPlant::new(
            spec.name.clone(),
            entry.kind,
            spec.efficiency,
            spec.pmax,
            spec.pmin,
        ))
    }

    /// Create every plant in order. Fails on the first unknown type.
    pub fn create_plants(&self, specs: &[PlantSpec]) -> Result<Vec<PowerPlant>, PlanError> {
        specs.iter().map(|spec| self.create_plant(spec)).collect()
    }
}
