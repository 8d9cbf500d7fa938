use crate::api::Result;
use crate::circuit::Circuit;
use crate::events::{Event, GateInfo, MeasurementInfo, SimulationStartInfo};
use crate::measurement::Counts;
use crate::parser::parse_program;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

/// Everything needed to run one program end to end.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    pub num_qubits: usize,
    /// Comma-separated `GATE:arg[:arg...]` tokens.
    pub program: String,
    pub shots: usize,
    /// Seeds a sequential sampler; `None` samples in parallel from thread-local RNGs.
    pub seed: Option<u64>,
}

#[derive(Debug, Clone)]
pub struct SimulationReport {
    pub events: Vec<Event>,
    pub counts: Counts,
    pub circuit: Circuit,
}

pub fn run_simulation(config: &SimulationConfig) -> Result<SimulationReport> {
    let operations = parse_program(&config.program)?;
    let mut circuit = Circuit::new(config.num_qubits)?;

    info!(
        num_qubits = config.num_qubits,
        operations = operations.len(),
        shots = config.shots,
        "starting simulation"
    );

    let mut events = Vec::with_capacity(operations.len() + 2);
    events.push(Event::SimulationStart(SimulationStartInfo {
        num_qubits: config.num_qubits,
        num_operations: operations.len(),
    }));

    for (i, op) in operations.iter().enumerate() {
        circuit.apply(op)?;
        debug!(step = i + 1, gate = %op, "step complete");
        events.push(Event::GateApplication(GateInfo {
            step: i + 1,
            gate: op.to_string(),
            state_vector: circuit.state().clone(),
        }));
    }

    let counts = match config.seed {
        Some(seed) => circuit.run_with_rng(config.shots, &mut StdRng::seed_from_u64(seed))?,
        None => circuit.run(config.shots)?,
    };
    info!(outcomes = counts.len(), "measurement complete");

    events.push(Event::MeasurementResult(MeasurementInfo::new(
        config.shots,
        counts.clone(),
    )));

    Ok(SimulationReport {
        events,
        counts,
        circuit,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::SimError;

    fn config(num_qubits: usize, program: &str, shots: usize) -> SimulationConfig {
        SimulationConfig {
            num_qubits,
            program: program.to_string(),
            shots,
            seed: Some(1),
        }
    }

    #[test]
    fn test_bell_program_events() {
        let report = run_simulation(&config(2, "H:0,CX:0:1", 200)).unwrap();
        assert_eq!(report.events.len(), 4);
        assert!(matches!(
            report.events[0],
            Event::SimulationStart(SimulationStartInfo { num_qubits: 2, num_operations: 2 })
        ));
        match &report.events[2] {
            Event::GateApplication(info) => {
                assert_eq!(info.step, 2);
                assert_eq!(info.gate, "CX:0:1");
            }
            other => panic!("unexpected event {:?}", other),
        }
        assert_eq!(report.counts.values().sum::<usize>(), 200);
        assert!(report.counts.keys().all(|k| k == "00" || k == "11"));
    }

    #[test]
    fn test_seed_makes_counts_reproducible() {
        let a = run_simulation(&config(2, "H:0,H:1", 500)).unwrap();
        let b = run_simulation(&config(2, "H:0,H:1", 500)).unwrap();
        assert_eq!(a.counts, b.counts);
    }

    #[test]
    fn test_errors_propagate() {
        assert_eq!(
            run_simulation(&config(0, "", 10)).unwrap_err(),
            SimError::InvalidQubitCount(0)
        );
        assert!(matches!(
            run_simulation(&config(1, "CX:0:1", 10)).unwrap_err(),
            SimError::IndexOutOfRange { index: 1, num_qubits: 1 }
        ));
        assert_eq!(
            run_simulation(&config(1, "H:0", 0)).unwrap_err(),
            SimError::InvalidShotCount(0)
        );
    }
}
