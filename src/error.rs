use thiserror::Error;

/// Errors raised by the planning core.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlanError {
    /// Requested load exceeds the installed capacity of the fleet
    #[error("Couldn't meet the required load")]
    InfeasibleLoad { requested_mw: f64, capacity_mw: f64 },

    #[error("Unknown power plant type: {0}")]
    UnknownPlantType(String),

    #[error("Duplicate power plant name: {0}")]
    DuplicatePlantName(String),

    /// Balancer reached its limit (or the pass cap) with load still uncovered
    #[error("load allocation stalled with {remaining_mw} MW unassigned after {passes} passes")]
    AllocationStalled { remaining_mw: f64, passes: usize },
}

impl PlanError {
    /// Whether the caller's input caused this error.
    pub fn is_client_error(&self) -> bool {
        match self {
            PlanError::InfeasibleLoad { .. }
            | PlanError::UnknownPlantType(_)
            | PlanError::DuplicatePlantName(_) => true,
            PlanError::AllocationStalled { .. } => false,
        }
    }
}
