use serde::Serialize;

use crate::domain::{FuelPrices, PowerPlant};
use crate::error::PlanError;

/// Output per plant, indexed like the plant slice handed to the allocator
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Allocation {
    pub outputs: Vec<f64>,
    /// Dispatch passes needed to cover the load
    pub passes: usize,
}

impl Allocation {
    pub fn idle(plant_count: usize) -> Self {
        Self {
            outputs: vec![0.0; plant_count],
            passes: 0,
        }
    }

    pub fn total(&self) -> f64 {
        self.outputs.iter().sum()
    }
}

/// Strategy that spreads a load across a fleet.
///
/// Implementations are pure: the same plants, prices and load always give
/// the same allocation.
#[cfg_attr(test, mockall::automock)]
pub trait LoadAllocator: Send + Sync {
    fn allocate(
        &self,
        plants: &[PowerPlant],
        fuels: &FuelPrices,
        load_mw: f64,
    ) -> Result<Allocation, PlanError>;
}
