use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString, IntoStaticStr};
use validator::{Validate, ValidationError};

use super::{Fuel, FuelPrices};

/// Closed set of generation technologies the planner can dispatch.
///
/// The string form is the identifier used in request payloads.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    AsRefStr,
    EnumIter,
    EnumString,
    IntoStaticStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PlantKind {
    GasFired,
    TurboJet,
    WindTurbine,
}

impl PlantKind {
    /// Fuel whose entry in [`FuelPrices`] drives this technology
    pub fn fuel(self) -> Fuel {
        match self {
            PlantKind::GasFired => Fuel::Gas,
            PlantKind::TurboJet => Fuel::Kerosine,
            PlantKind::WindTurbine => Fuel::Wind,
        }
    }

    pub fn is_wind(self) -> bool {
        matches!(self, PlantKind::WindTurbine)
    }

    /// Marginal cost in €/MWh. Wind is free; thermal plants pay fuel
    /// price divided by conversion efficiency.
    pub fn marginal_cost(self, efficiency: f64, fuels: &FuelPrices) -> f64 {
        match self {
            PlantKind::GasFired | PlantKind::TurboJet => fuels.price(self.fuel()) / efficiency,
            PlantKind::WindTurbine => 0.0,
        }
    }
}

/// Raw plant record as received from the caller, before its type has been
/// resolved against the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Validate)]
#[validate(schema(function = "validate_output_bounds"))]
pub struct PlantSpec {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    #[validate(range(exclusive_min = 0.0, max = 1.0))]
    pub efficiency: f64,
    #[validate(range(min = 0.0))]
    pub pmax: f64,
    #[validate(range(min = 0.0))]
    pub pmin: f64,
}

fn validate_output_bounds(spec: &PlantSpec) -> Result<(), ValidationError> {
    if spec.pmin > spec.pmax {
        let mut err = ValidationError::new("pmin_exceeds_pmax");
        err.message = Some(format!("{}: pmin must not exceed pmax", spec.name).into());
        return Err(err);
    }
    Ok(())
}

/// A typed generation unit. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PowerPlant {
    name: String,
    kind: PlantKind,
    efficiency: f64,
    pmax: f64,
    pmin: f64,
}

impl PowerPlant {
    pub fn new(name: impl Into<String>, kind: PlantKind, efficiency: f64, pmax: f64, pmin: f64) -> Self {
        Self {
            name: name.into(),
            kind,
            efficiency,
            pmax,
            pmin,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> PlantKind {
        self.kind
    }

    pub fn efficiency(&self) -> f64 {
        self.efficiency
    }

    /// Maximum output (MW)
    pub fn pmax(&self) -> f64 {
        self.pmax
    }

    /// Minimum stable output when running (MW)
    pub fn pmin(&self) -> f64 {
        self.pmin
    }

    pub fn marginal_cost(&self, fuels: &FuelPrices) -> f64 {
        self.kind.marginal_cost(self.efficiency, fuels)
    }

    /// Output the unit can deliver under current conditions. Only wind is
    /// derated, by the available wind percentage.
    pub fn available_capacity(&self, fuels: &FuelPrices) -> f64 {
        if self.kind.is_wind() {
            self.pmax * fuels.wind_factor()
        } else {
            self.pmax
        }
    }
}
