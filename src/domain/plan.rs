use serde::{Deserialize, Serialize};
use validator::Validate;

use super::{FuelPrices, PlantSpec};

/// Demand, prices and fleet for a single planning call
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
pub struct PlanRequest {
    /// Total load to cover (MW)
    #[validate(range(min = 0.0))]
    pub load: f64,
    #[validate(nested)]
    pub fuels: FuelPrices,
    #[validate(nested)]
    pub powerplants: Vec<PlantSpec>,
}

/// Output assigned to one plant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlantOutput {
    pub name: String,
    /// Assigned output (MW)
    pub p: f64,
}

/// One entry per plant, in request order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductionPlan {
    entries: Vec<PlantOutput>,
}

impl ProductionPlan {
    pub fn new(entries: Vec<PlantOutput>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[PlantOutput] {
        &self.entries
    }

    /// Output assigned to the named plant
    pub fn output_of(&self, name: &str) -> Option<f64> {
        self.entries.iter().find(|e| e.name == name).map(|e| e.p)
    }

    pub fn total(&self) -> f64 {
        self.entries.iter().map(|e| e.p).sum()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
