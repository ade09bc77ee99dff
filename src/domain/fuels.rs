use serde::{Deserialize, Serialize};
use validator::Validate;

/// Energy source a plant draws on, used to select its price from [`FuelPrices`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Fuel {
    Gas,
    Kerosine,
    Wind,
}

/// Fuel price snapshot supplied with each request.
///
/// Field names on the wire carry their unit, e.g. `gas(euro/MWh)`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Validate)]
pub struct FuelPrices {
    /// Gas price (€/MWh)
    #[serde(rename = "gas(euro/MWh)")]
    #[validate(range(min = 0.0))]
    pub gas: f64,

    /// Kerosine price (€/MWh)
    #[serde(rename = "kerosine(euro/MWh)")]
    #[validate(range(min = 0.0))]
    pub kerosine: f64,

    /// Emission allowance price (€/ton)
    #[serde(rename = "co2(euro/ton)")]
    #[validate(range(min = 0.0))]
    pub co2: f64,

    /// Share of wind turbine capacity currently available (%)
    #[serde(rename = "wind(%)")]
    #[validate(range(min = 0.0, max = 100.0))]
    pub wind: f64,
}

impl FuelPrices {
    /// Value of the given fuel in this snapshot. For wind this is the
    /// availability percentage rather than a price.
    pub fn price(&self, fuel: Fuel) -> f64 {
        match fuel {
            Fuel::Gas => self.gas,
            Fuel::Kerosine => self.kerosine,
            Fuel::Wind => self.wind,
        }
    }

    /// Fraction of nameplate wind capacity available, in `[0, 1]`.
    pub fn wind_factor(&self) -> f64 {
        self.wind / 100.0
    }
}
