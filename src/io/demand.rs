// src/io/demand.rs

use rand::{thread_rng, Rng};
use rand_distr::{Distribution, Normal};

/// Generates a demand schedule where every period has the exact same order
/// amount. Useful for testing stability (e.g., step-response tests) and for
/// wiring a quick [`crate::strategy::ScriptedSales`] fixture.
pub fn generate_constant_demand(periods: usize, value: i64) -> Vec<i64> {
    vec![value; periods]
}

/// Generates a demand schedule based on a Normal (Bell Curve) distribution.
/// Test/demo fixture only; not used by the simulator itself.
///
/// # Arguments
/// * `periods` - Length of the simulation.
/// * `mean` - The average order size (e.g., 10.0).
/// * `std_dev` - The standard deviation (volatility) (e.g., 2.0).
pub fn generate_normal_demand(periods: usize, mean: f64, std_dev: f64) -> Vec<i64> {
    let mut rng = thread_rng();
    let normal = Normal::new(mean, std_dev).unwrap();

    let mut schedule = Vec::with_capacity(periods);

    for _ in 0..periods {
        // Sample the distribution
        let val: f64 = normal.sample(&mut rng);

        // Logic to handle conversion:
        // 1. Round to nearest integer.
        // 2. Clamp negative numbers to 0 (demand cannot be negative).
        let int_val = val.round();

        if int_val < 0.0 {
            schedule.push(0);
        } else {
            schedule.push(int_val as i64);
        }
    }

    schedule
}

/// Generates a "Step" pattern (e.g., a few periods of low demand, then a
/// sustained jump). The classic scenario used to trigger the bullwhip effect
/// in multi-echelon chains; kept here as a ready-made fixture for demos.
pub fn generate_classic_step_demand(periods: usize, warm_up: i64, steady: i64) -> Vec<i64> {
    let mut schedule = Vec::new();
    for p in 0..periods {
        if p < 4 {
            schedule.push(warm_up);
        } else {
            schedule.push(steady);
        }
    }
    schedule
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn constant_demand_repeats_the_value() {
        assert_eq!(generate_constant_demand(4, 3), vec![3, 3, 3, 3]);
    }

    #[test]
    fn classic_step_demand_jumps_after_the_warm_up() {
        let schedule = generate_classic_step_demand(6, 4, 8);
        assert_eq!(schedule, vec![4, 4, 4, 4, 8, 8]);
    }

    #[test]
    fn normal_demand_has_the_requested_length_and_is_never_negative() {
        let schedule = generate_normal_demand(50, 10.0, 2.0);
        assert_eq!(schedule.len(), 50);
        assert!(schedule.iter().all(|&v| v >= 0));
    }
}
