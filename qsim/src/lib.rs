pub mod api;
pub mod circuit;
pub mod events;
pub mod gate;
pub mod linalg;
pub mod measurement;
pub mod operator;
pub mod parser;
pub mod simulator;
pub mod state;

// Re-export key components for easier access from the binary or other libraries.
pub use api::{EPSILON, MAX_QUBITS, SimError};
pub use circuit::Circuit;
pub use gate::{Gate, GateMatrix};
pub use measurement::Counts;
pub use parser::{Instruction, Operation, parse_program};
pub use simulator::{SimulationConfig, SimulationReport, run_simulation};
pub use state::StateVector;
