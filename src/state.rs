use std::sync::Arc;

use tracing::info;

use crate::config::Config;
use crate::optimizer::MeritOrderAllocator;
use crate::planner::ProductionPlanner;
use crate::plants::{PlantCatalog, PlantFactory};

#[derive(Clone)]
pub struct AppState {
    pub cfg: Config,
    pub planner: Arc<ProductionPlanner>,
}

impl AppState {
    pub fn new(cfg: Config) -> Self {
        let catalog = PlantCatalog::standard();
        let kinds: Vec<&str> = catalog.entries().iter().map(|e| e.identifier()).collect();
        info!(?kinds, "plant catalog loaded");

        let factory = PlantFactory::new(catalog);
        let allocator = MeritOrderAllocator::new(
            cfg.planner.balancer_step_mw,
            cfg.planner.tolerance_mw,
        );
        let planner = Arc::new(ProductionPlanner::new(factory, Box::new(allocator)));

        Self { cfg, planner }
    }
}
