use itertools::Itertools;
use ordered_float::OrderedFloat;
use tracing::{debug, warn};

use super::{Allocation, LoadAllocator};
use crate::domain::{FuelPrices, PowerPlant};
use crate::error::PlanError;

/// Upper bound on dispatch passes per allocation
pub const MAX_PASSES: usize = 256;

/// Merit-order dispatcher:
/// - Plants are ranked by marginal cost, wind first, ties kept in input order
/// - Each plant takes as much of the remaining load as it can
/// - Thermal plants only start when the remaining load reaches their pmin
///
/// When a pass leaves load uncovered the whole load is dispatched again with
/// every thermal plant capped `balancer` MW below its pmax, leaving room for
/// pmin-gated plants further down the order. The balancer grows by
/// `balancer_step_mw` per pass. Load still uncovered at the end of a pass is
/// handed back to running thermal plants, up to their real pmax.
pub struct MeritOrderAllocator {
    pub balancer_step_mw: f64,
    /// Uncovered load below this is treated as covered
    pub tolerance_mw: f64,
}

impl Default for MeritOrderAllocator {
    fn default() -> Self {
        Self {
            balancer_step_mw: 10.0,
            tolerance_mw: 1e-6,
        }
    }
}

impl MeritOrderAllocator {
    pub fn new(balancer_step_mw: f64, tolerance_mw: f64) -> Self {
        Self {
            balancer_step_mw,
            tolerance_mw,
        }
    }

    /// Plant indices from cheapest to most expensive
    pub fn merit_order(plants: &[PowerPlant], fuels: &FuelPrices) -> Vec<usize> {
        plants
            .iter()
            .enumerate()
            .sorted_by_key(|(_, plant)| OrderedFloat(plant.marginal_cost(fuels)))
            .map(|(idx, _)| idx)
            .collect()
    }

    /// Largest balancer that still changes some thermal plant's cap
    fn balancer_limit(plants: &[PowerPlant]) -> f64 {
        plants
            .iter()
            .filter(|p| !p.kind().is_wind())
            .map(|p| p.pmax() - p.pmin())
            .fold(0.0, f64::max)
    }

    /// One dispatch pass. Returns the per-plant outputs and the load left
    /// uncovered.
    fn dispatch_pass(
        &self,
        plants: &[PowerPlant],
        fuels: &FuelPrices,
        order: &[usize],
        load_mw: f64,
        balancer: f64,
    ) -> (Vec<f64>, f64) {
        let mut outputs = vec![0.0; plants.len()];
        let mut remaining = load_mw;

        for &idx in order {
            if remaining <= self.tolerance_mw {
                continue;
            }

            let plant = &plants[idx];
            let generated = if plant.kind().is_wind() {
                plant.available_capacity(fuels).min(remaining)
            } else if remaining >= plant.pmin() {
                // never cap below the minimum stable output
                let ceiling = (plant.pmax() - balancer).max(plant.pmin());
                ceiling.min(remaining)
            } else {
                0.0
            };

            outputs[idx] = generated;
            remaining -= generated;
        }

        // headroom held back by the balancer goes to plants already running
        for &idx in order {
            if remaining <= self.tolerance_mw {
                break;
            }

            let plant = &plants[idx];
            if plant.kind().is_wind() || outputs[idx] <= 0.0 {
                continue;
            }

            let extra = (plant.pmax() - outputs[idx]).min(remaining);
            if extra > 0.0 {
                outputs[idx] += extra;
                remaining -= extra;
            }
        }

        (outputs, remaining)
    }
}

impl LoadAllocator for MeritOrderAllocator {
    fn allocate(
        &self,
        plants: &[PowerPlant],
        fuels: &FuelPrices,
        load_mw: f64,
    ) -> Result<Allocation, PlanError> {
        if load_mw <= self.tolerance_mw {
            return Ok(Allocation::idle(plants.len()));
        }

        let order = Self::merit_order(plants, fuels);
        let limit = Self::balancer_limit(plants);
        let mut balancer = 0.0;
        let mut passes = 0;

        loop {
            passes += 1;
            let (outputs, remaining) = self.dispatch_pass(plants, fuels, &order, load_mw, balancer);
            debug!(
                pass = passes,
                balancer_mw = balancer,
                remaining_mw = remaining,
                "dispatch pass complete"
            );

            if remaining <= self.tolerance_mw {
                return Ok(Allocation { outputs, passes });
            }

            let step_usable = self.balancer_step_mw.is_finite() && self.balancer_step_mw > 0.0;
            if !step_usable || balancer >= limit || passes >= MAX_PASSES {
                warn!(
                    passes,
                    remaining_mw = remaining,
                    "no dispatch pass covers the load"
                );
                return Err(PlanError::AllocationStalled {
                    remaining_mw: remaining,
                    passes,
                });
            }

            balancer += self.balancer_step_mw;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::PlantKind;

    fn fuels(wind: f64) -> FuelPrices {
        FuelPrices {
            gas: 13.4,
            kerosine: 50.8,
            co2: 20.0,
            wind,
        }
    }

    fn fleet() -> Vec<PowerPlant> {
        vec![
            PowerPlant::new("Gas_plant_1", PlantKind::GasFired, 0.6, 50.0, 10.0),
            PowerPlant::new("Turbo_plant_1", PlantKind::TurboJet, 0.7, 60.0, 20.0),
            PowerPlant::new("wind_turbine_1", PlantKind::WindTurbine, 1.0, 40.0, 0.0),
        ]
    }

    #[test]
    fn test_merit_order_puts_wind_first() {
        let order = MeritOrderAllocator::merit_order(&fleet(), &fuels(100.0));
        assert_eq!(order, vec![2, 0, 1]);
    }

    #[test]
    fn test_merit_order_ties_keep_input_order() {
        let plants = vec![
            PowerPlant::new("gas_b", PlantKind::GasFired, 0.5, 100.0, 0.0),
            PowerPlant::new("wind_a", PlantKind::WindTurbine, 1.0, 10.0, 0.0),
            PowerPlant::new("gas_a", PlantKind::GasFired, 0.5, 100.0, 0.0),
            PowerPlant::new("wind_b", PlantKind::WindTurbine, 1.0, 10.0, 0.0),
        ];
        let order = MeritOrderAllocator::merit_order(&plants, &fuels(100.0));
        assert_eq!(order, vec![1, 3, 0, 2]);
    }

    #[test]
    fn test_wind_then_cheapest_thermal() {
        let allocation = MeritOrderAllocator::default()
            .allocate(&fleet(), &fuels(100.0), 90.0)
            .unwrap();
        assert_eq!(allocation.outputs, vec![50.0, 0.0, 40.0]);
        assert_eq!(allocation.passes, 1);
    }

    #[test]
    fn test_wind_alone_covers_small_load() {
        let allocation = MeritOrderAllocator::default()
            .allocate(&fleet(), &fuels(100.0), 40.0)
            .unwrap();
        assert_eq!(allocation.outputs, vec![0.0, 0.0, 40.0]);
    }

    #[test]
    fn test_zero_load_idles_everything() {
        let allocation = MeritOrderAllocator::default()
            .allocate(&fleet(), &fuels(100.0), 0.0)
            .unwrap();
        assert_eq!(allocation.outputs, vec![0.0, 0.0, 0.0]);
        assert_eq!(allocation.passes, 0);
    }

    #[test]
    fn test_wind_derated_by_availability() {
        let allocation = MeritOrderAllocator::default()
            .allocate(&fleet(), &fuels(50.0), 60.0)
            .unwrap();
        assert_eq!(allocation.outputs[2], 20.0);
        assert_eq!(allocation.outputs[0], 40.0);
        assert_eq!(allocation.total(), 60.0);
    }

    #[test]
    fn test_balancer_frees_room_for_gated_plant() {
        let plants = vec![
            PowerPlant::new("gas", PlantKind::GasFired, 0.6, 45.0, 10.0),
            PowerPlant::new("turbo", PlantKind::TurboJet, 0.7, 60.0, 20.0),
            PowerPlant::new("wind", PlantKind::WindTurbine, 1.0, 40.0, 0.0),
        ];
        // pass 1 leaves 5 MW below the turbojet pmin, pass 3 backs gas off to 25
        let allocation = MeritOrderAllocator::default()
            .allocate(&plants, &fuels(100.0), 90.0)
            .unwrap();
        assert_eq!(allocation.passes, 3);
        assert_eq!(allocation.outputs, vec![25.0, 25.0, 40.0]);
    }

    #[test]
    fn test_thermal_never_capped_below_pmin() {
        let plants = vec![
            PowerPlant::new("gas", PlantKind::GasFired, 0.6, 15.0, 12.0),
            PowerPlant::new("turbo", PlantKind::TurboJet, 0.3, 30.0, 18.0),
        ];
        // gas is capped at max(15 - balancer, 12) until turbojet fits
        let allocation = MeritOrderAllocator::default()
            .allocate(&plants, &fuels(0.0), 30.0)
            .unwrap();
        assert_eq!(allocation.outputs, vec![12.0, 18.0]);
        assert!(allocation.outputs[0] >= plants[0].pmin());
    }

    fn gated_pair() -> Vec<PowerPlant> {
        vec![
            PowerPlant::new("gas", PlantKind::GasFired, 0.5, 100.0, 50.0),
            PowerPlant::new("turbo", PlantKind::TurboJet, 0.3, 50.0, 45.0),
        ]
    }

    #[test]
    fn test_two_gated_plants_share_load() {
        let allocation = MeritOrderAllocator::default()
            .allocate(&gated_pair(), &fuels(100.0), 140.0)
            .unwrap();
        assert_eq!(allocation.outputs, vec![95.0, 45.0]);
        assert_eq!(allocation.passes, 2);
    }

    #[test]
    fn test_leftover_returns_to_running_plant() {
        // balancer 10 caps gas at 90, turbojet runs at pmin, gas takes the last 9 MW
        let allocation = MeritOrderAllocator::default()
            .allocate(&gated_pair(), &fuels(100.0), 144.0)
            .unwrap();
        assert_eq!(allocation.outputs, vec![99.0, 45.0]);
        assert_eq!(allocation.passes, 2);
    }

    #[test]
    fn test_non_finite_step_stops_after_first_pass() {
        let plants = vec![PowerPlant::new("gas", PlantKind::GasFired, 0.5, 100.0, 50.0)];
        let err = MeritOrderAllocator::new(f64::NAN, 1e-6)
            .allocate(&plants, &fuels(100.0), 30.0)
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::AllocationStalled {
                remaining_mw: 30.0,
                passes: 1
            }
        );
    }

    #[test]
    fn test_tiny_step_hits_pass_cap() {
        let plants = vec![PowerPlant::new("gas", PlantKind::GasFired, 0.5, 100.0, 50.0)];
        let err = MeritOrderAllocator::new(1e-20, 1e-6)
            .allocate(&plants, &fuels(100.0), 30.0)
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::AllocationStalled { passes, .. } if passes == MAX_PASSES
        ));
    }

    #[test]
    fn test_unreachable_pmin_stalls() {
        let plants = vec![PowerPlant::new("gas", PlantKind::GasFired, 0.5, 100.0, 50.0)];
        let err = MeritOrderAllocator::default()
            .allocate(&plants, &fuels(100.0), 30.0)
            .unwrap_err();
        assert!(matches!(
            err,
            PlanError::AllocationStalled { remaining_mw, .. } if remaining_mw == 30.0
        ));
    }

    #[test]
    fn test_calm_wind_stalls() {
        let plants = vec![PowerPlant::new("wind", PlantKind::WindTurbine, 1.0, 100.0, 0.0)];
        let err = MeritOrderAllocator::default()
            .allocate(&plants, &fuels(0.0), 10.0)
            .unwrap_err();
        assert_eq!(
            err,
            PlanError::AllocationStalled {
                remaining_mw: 10.0,
                passes: 1
            }
        );
    }

    #[test]
    fn test_deterministic() {
        let allocator = MeritOrderAllocator::default();
        let first = allocator.allocate(&fleet(), &fuels(73.0), 101.5).unwrap();
        let second = allocator.allocate(&fleet(), &fuels(73.0), 101.5).unwrap();
        assert_eq!(first, second);
    }
}
