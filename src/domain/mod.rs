pub mod fuels;
pub mod plan;
pub mod plant;

pub use fuels::*;
pub use plan::*;
pub use plant::*;
