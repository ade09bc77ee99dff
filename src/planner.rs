use itertools::Itertools;
use tracing::{debug, info};

use crate::domain::{PlanRequest, PlantOutput, PowerPlant, ProductionPlan};
use crate::error::PlanError;
use crate::optimizer::{LoadAllocator, MeritOrderAllocator};
use crate::plants::PlantFactory;

/// Turns a validated [`PlanRequest`] into a [`ProductionPlan`].
///
/// Builds typed plants, rejects loads the fleet cannot physically carry,
/// then hands the rest to the configured [`LoadAllocator`].
pub struct ProductionPlanner {
    factory: PlantFactory,
    allocator: Box<dyn LoadAllocator>,
}

impl Default for ProductionPlanner {
    fn default() -> Self {
        Self::new(PlantFactory::default(), Box::new(MeritOrderAllocator::default()))
    }
}

impl ProductionPlanner {
    pub fn new(factory: PlantFactory, allocator: Box<dyn LoadAllocator>) -> Self {
        Self { factory, allocator }
    }

    pub fn plan(&self, request: &PlanRequest) -> Result<ProductionPlan, PlanError> {
        let plants = self.factory.create_plants(&request.powerplants)?;

        if let Some(name) = plants.iter().map(PowerPlant::name).duplicates().next() {
            return Err(PlanError::DuplicatePlantName(name.to_string()));
        }

        let capacity_mw: f64 = plants.iter().map(PowerPlant::pmax).sum();
        if request.load > capacity_mw {
            debug!(
                requested_mw = request.load,
                capacity_mw, "load exceeds installed capacity"
            );
            return Err(PlanError::InfeasibleLoad {
                requested_mw: request.load,
                capacity_mw,
            });
        }

        let allocation = self
            .allocator
            .allocate(&plants, &request.fuels, request.load)?;

        let entries: Vec<PlantOutput> = plants
            .iter()
            .zip(allocation.outputs.iter())
            .map(|(plant, &p)| PlantOutput {
                name: plant.name().to_string(),
                p,
            })
            .collect();

        info!(
            load_mw = request.load,
            total_mw = allocation.total(),
            plants = entries.len(),
            passes = allocation.passes,
            "production plan computed"
        );

        Ok(ProductionPlan::new(entries))
    }
}
