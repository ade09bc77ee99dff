//! Production planner: splits a power demand across gas-fired, turbojet and
//! wind plants in merit order.

pub mod api;
pub mod config;
pub mod domain;
pub mod error;
pub mod optimizer;
pub mod planner;
pub mod plants;
pub mod state;
pub mod telemetry;

pub use error::PlanError;
pub use planner::ProductionPlanner;
