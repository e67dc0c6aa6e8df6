use std::fmt::Write as _;

use rand::prelude::*;

use crate::sim::ProcessSpec;

/// Bernoulli arrival process: at every tick a process arrives with
/// probability `p_arrival`, and is short with probability `p_short`.
#[derive(Debug, Clone)]
pub struct GeneratorParams {
    pub ticks: i64,
    pub p_arrival: f64,
    pub p_short: f64,
    pub short_burst: i64,
    pub long_burst: i64,
    pub max_priority: i64,
    pub seed: u64,
}

impl Default for GeneratorParams {
    fn default() -> Self {
        Self {
            ticks: 50,
            p_arrival: 0.3,
            p_short: 0.3,
            short_burst: 2,
            long_burst: 6,
            max_priority: 5,
            seed: 0,
        }
    }
}

pub fn generate_workload(params: &GeneratorParams) -> Vec<ProcessSpec> {
    let mut rng = StdRng::seed_from_u64(params.seed);
    let mut specs = Vec::new();

    for t in 0..params.ticks {
        if rng.random::<f64>() < params.p_arrival {
            let burst = if rng.random::<f64>() < params.p_short {
                params.short_burst
            } else {
                params.long_burst
            };

            specs.push(ProcessSpec {
                label: format!("P{}", specs.len() + 1),
                burst,
                arrival: t,
                queue: rng.random_range(1..=3),
                priority: rng.random_range(0..=params.max_priority),
            });
        }
    }

    specs
}

/// Serializes `specs` in the loader's record format.
pub fn render_workload(specs: &[ProcessSpec]) -> String {
    let mut out = String::from("# label;BT;AT;Q;Pr\n");
    for spec in specs {
        let _ = writeln!(
            out,
            "{};{};{};{};{}",
            spec.label, spec.burst, spec.arrival, spec.queue, spec.priority
        );
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::io::parse_workload;
    use crate::scheduler::MlqScheduler;
    use crate::sim::Sim;

    #[test]
    fn test_same_seed_same_workload() {
        let params = GeneratorParams::default();
        assert_eq!(generate_workload(&params), generate_workload(&params));

        let other = GeneratorParams {
            seed: 7,
            ..params.clone()
        };
        assert_ne!(generate_workload(&params), generate_workload(&other));
    }

    #[test]
    fn test_generated_workload_is_valid() {
        let params = GeneratorParams {
            ticks: 200,
            ..Default::default()
        };
        let specs = generate_workload(&params);
        assert!(!specs.is_empty());
        assert!(specs.iter().all(|s| (1..=3).contains(&s.queue)));
        assert!(specs.iter().all(|s| s.burst == 2 || s.burst == 6));

        let outcome = Sim::new(specs.clone(), MlqScheduler::default()).unwrap().run();
        assert_eq!(outcome.finished.len(), specs.len());
    }

    #[test]
    fn test_rendered_workload_loads_back() {
        let specs = generate_workload(&GeneratorParams::default());
        assert_eq!(parse_workload(&render_workload(&specs)), specs);
    }

    #[test]
    fn test_no_arrivals() {
        let params = GeneratorParams {
            p_arrival: 0.0,
            ..Default::default()
        };
        assert!(generate_workload(&params).is_empty());
    }
}
