use std::str::FromStr;

use strum::IntoEnumIterator;

use crate::domain::{Fuel, PlantKind};
use crate::error::PlanError;

/// Behaviour the catalog attaches to a plant type
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CatalogEntry {
    pub kind: PlantKind,
    pub fuel: Fuel,
}

impl CatalogEntry {
    fn for_kind(kind: PlantKind) -> Self {
        Self {
            kind,
            fuel: kind.fuel(),
        }
    }

    pub fn identifier(&self) -> &'static str {
        self.kind.into()
    }
}

/// Registry of plant types accepted in requests.
///
/// Built once and handed to the [`PlantFactory`](super::PlantFactory);
/// never mutated afterwards.
#[derive(Debug, Clone)]
pub struct PlantCatalog {
    entries: Vec<CatalogEntry>,
}

impl Default for PlantCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

impl PlantCatalog {
    /// Every technology the planner knows how to cost
    pub fn standard() -> Self {
        Self::with_kinds(PlantKind::iter())
    }

    /// Catalog limited to the given technologies
    pub fn with_kinds(kinds: impl IntoIterator<Item = PlantKind>) -> Self {
        let mut entries: Vec<CatalogEntry> = Vec::new();
        for kind in kinds {
            if !entries.iter().any(|e| e.kind == kind) {
                entries.push(CatalogEntry::for_kind(kind));
            }
        }
        Self { entries }
    }

    /// Resolve a type identifier such as `"gasfired"`.
    pub fn lookup(&self, identifier: &str) -> Result<CatalogEntry, PlanError> {
        PlantKind::from_str(identifier)
            .ok()
            .and_then(|kind| self.entries.iter().find(|e| e.kind == kind).copied())
            .ok_or_else(|| PlanError::UnknownPlantType(identifier.to_string()))
    }

    pub fn entries(&self) -> &[CatalogEntry] {
        &self.entries
    }
}
