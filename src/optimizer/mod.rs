pub mod merit_order;
pub mod types;

pub use merit_order::MeritOrderAllocator;
pub use types::*;
