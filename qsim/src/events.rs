use crate::measurement::Counts;
use crate::state::StateVector;
use serde::Serialize;
use std::collections::BTreeMap;
use std::io::{self, Write};

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(tag = "eventType")]
pub enum Event {
    SimulationStart(SimulationStartInfo),
    GateApplication(GateInfo),
    MeasurementResult(MeasurementInfo),
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SimulationStartInfo {
    pub num_qubits: usize,
    pub num_operations: usize,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GateInfo {
    pub step: usize,
    pub gate: String,
    pub state_vector: StateVector,
}

#[derive(Serialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MeasurementInfo {
    pub shots: usize,
    // sorted so the JSON output is stable
    pub counts: BTreeMap<String, usize>,
}

impl MeasurementInfo {
    pub fn new(shots: usize, counts: Counts) -> Self {
        Self {
            shots,
            counts: counts.into_iter().collect(),
        }
    }
}

/// Serializes one event as a single JSON line.
pub fn emit_event(event: &Event, writer: &mut impl Write) -> io::Result<()> {
    let json_output = serde_json::to_string(event)?;
    writeln!(writer, "{}", json_output)
}
