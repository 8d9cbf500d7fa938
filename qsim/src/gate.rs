use crate::api::{Result, SimError, check_qubit, check_qubit_count};
use crate::linalg::{Matrix, identity};
use num_complex::Complex;
use std::f64::consts::FRAC_1_SQRT_2;

// custom type for gate matrices
pub type GateMatrix = [[Complex<f64>; 2]; 2];

pub const HADAMARD: GateMatrix = [
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(FRAC_1_SQRT_2, 0.0),
    ],
    [
        Complex::new(FRAC_1_SQRT_2, 0.0),
        Complex::new(-FRAC_1_SQRT_2, 0.0),
    ],
];

pub const PAULI_X: GateMatrix = [
    [Complex::new(0.0, 0.0), Complex::new(1.0, 0.0)],
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
];

pub const PAULI_Y: GateMatrix = [
    [Complex::new(0.0, 0.0), Complex::new(0.0, -1.0)],
    [Complex::new(0.0, 1.0), Complex::new(0.0, 0.0)],
];

pub const PAULI_Z: GateMatrix = [
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
    [Complex::new(0.0, 0.0), Complex::new(-1.0, 0.0)],
];

// diag(1, e^{iπ/4})
pub const T_GATE: GateMatrix = [
    [Complex::new(1.0, 0.0), Complex::new(0.0, 0.0)],
    [
        Complex::new(0.0, 0.0),
        Complex::new(FRAC_1_SQRT_2, FRAC_1_SQRT_2),
    ],
];

/// An immutable single-qubit gate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Gate {
    matrix: GateMatrix,
}

impl Gate {
    pub const fn new(matrix: GateMatrix) -> Self {
        Self { matrix }
    }

    pub const fn h() -> Self {
        Self::new(HADAMARD)
    }

    pub const fn x() -> Self {
        Self::new(PAULI_X)
    }

    pub const fn y() -> Self {
        Self::new(PAULI_Y)
    }

    pub const fn z() -> Self {
        Self::new(PAULI_Z)
    }

    pub const fn t() -> Self {
        Self::new(T_GATE)
    }

    /// Generic rotation U(θ, φ, λ).
    pub fn u(theta: f64, phi: f64, lambda: f64) -> Self {
        let (st, ct) = (theta / 2.0).sin_cos();
        Self::new([
            [
                Complex::new(ct, 0.0),
                -Complex::from_polar(st, lambda),
            ],
            [
                Complex::from_polar(st, phi),
                Complex::from_polar(ct, phi + lambda),
            ],
        ])
    }

    pub fn matrix(&self) -> &GateMatrix {
        &self.matrix
    }

    /// Conjugate transpose. Equals the inverse for unitary gates.
    pub fn inverse(&self) -> Self {
        let m = &self.matrix;
        Self::new([
            [m[0][0].conj(), m[1][0].conj()],
            [m[0][1].conj(), m[1][1].conj()],
        ])
    }

    /// Full `2^n x 2^n` operator applying this gate to `target` whenever
    /// `control` is |1⟩. Qubit 0 is the most significant bit of a basis index.
    ///
    /// Fails with `IndexOutOfRange` if either index is outside the register
    /// or if `control == target`.
    pub fn control(&self, control: usize, target: usize, num_qubits: usize) -> Result<Matrix> {
        check_qubit_count(num_qubits)?;
        check_qubit(target, num_qubits)?;
        check_qubit(control, num_qubits)?;
        if control == target {
            return Err(SimError::IndexOutOfRange {
                index: control,
                num_qubits,
            });
        }

        let size = 1usize << num_qubits;
        let mut op = identity(size);

        let control_mask = 1usize << (num_qubits - 1 - control);
        let target_mask = 1usize << (num_qubits - 1 - target);

        for basis in 0..size {
            if basis & control_mask == 0 {
                continue;
            }
            let partner = basis ^ target_mask;
            let b = usize::from(basis & target_mask != 0);
            let p = 1 - b;

            op.set(basis, basis, self.matrix[b][b]);
            op.set(basis, partner, self.matrix[b][p]);
            op.set(partner, basis, self.matrix[p][b]);
            op.set(partner, partner, self.matrix[p][p]);
        }
        Ok(op)
    }
}
