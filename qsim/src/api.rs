// src/api.rs

/// Largest register the dense engine accepts. Each gate builds a full
/// `2^n x 2^n` operator, which at this size is 2^24 amplitudes (256 MiB).
pub const MAX_QUBITS: usize = 12;

/// Tolerance used for matrix and state comparisons.
pub const EPSILON: f64 = 1e-9;

/// A lightweight error enum so callers don't rely on engine internals.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum SimError {
    #[error("Invalid qubit count: {0} (expected 1..={max})", max = MAX_QUBITS)]
    InvalidQubitCount(usize),
    /// Also raised when a control qubit is the same as its target.
    #[error("Qubit index {index} out of range for a {num_qubits}-qubit circuit")]
    IndexOutOfRange { index: usize, num_qubits: usize },
    #[error("Invalid shot count: {0} (must be positive)")]
    InvalidShotCount(usize),
    #[error("Dimension mismatch: expected {expected}, found {found}")]
    DimensionMismatch { expected: usize, found: usize },
    #[error("Parse error at token {position}: {message}")]
    Parse { position: usize, message: String },
}

pub type Result<T> = std::result::Result<T, SimError>;

pub(crate) fn check_qubit_count(num_qubits: usize) -> Result<()> {
    if num_qubits == 0 || num_qubits > MAX_QUBITS {
        return Err(SimError::InvalidQubitCount(num_qubits));
    }
    Ok(())
}

pub(crate) fn check_qubit(index: usize, num_qubits: usize) -> Result<()> {
    if index >= num_qubits {
        return Err(SimError::IndexOutOfRange { index, num_qubits });
    }
    Ok(())
}
