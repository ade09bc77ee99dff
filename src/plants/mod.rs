pub mod catalog;
pub mod factory;

pub use catalog::{CatalogEntry, PlantCatalog};
pub use factory::PlantFactory;
