//! Embeds a single-qubit gate into the full register operator.

use crate::api::{Result, check_qubit, check_qubit_count};
use crate::gate::Gate;
use crate::linalg::{Matrix, identity, kronecker};
use tracing::trace;

/// `I ⊗ … ⊗ G ⊗ … ⊗ I` with `gate` at position `target`, qubit 0 leftmost.
pub fn expand(gate: &Gate, target: usize, num_qubits: usize) -> Result<Matrix> {
    check_qubit_count(num_qubits)?;
    check_qubit(target, num_qubits)?;

    let g = Matrix::from_gate(gate.matrix());
    let id = identity(2);
    Ok((0..num_qubits).fold(identity(1), |op, qubit| {
        if qubit == target {
            kronecker(&op, &g)
        } else {
            kronecker(&op, &id)
        }
    }))
}

/// Full operator for `gate` on `target`, optionally conditioned on `control`.
pub fn build_operator(
    gate: &Gate,
    target: usize,
    control: Option<usize>,
    num_qubits: usize,
) -> Result<Matrix> {
    let op = match control {
        Some(control) => gate.control(control, target, num_qubits)?,
        None => expand(gate, target, num_qubits)?,
    };
    trace!(qubit = target, ?control, dim = op.rows(), "built operator");
    Ok(op)
}
