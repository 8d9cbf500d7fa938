use crate::api::{Result, check_qubit_count};
use crate::gate::Gate;
use crate::linalg::mat_vec;
use crate::measurement::{self, Counts};
use crate::operator::build_operator;
use crate::parser::{Instruction, Operation};
use crate::state::StateVector;
use num_complex::Complex;
use rand::Rng;
use std::io::{self, Write};
use tracing::debug;

/// A register of `num_qubits` qubits and its current state.
///
/// Every gate call replaces the state with `Op · state`. Measurement reads
/// the state without collapsing it.
#[derive(Debug, Clone)]
pub struct Circuit {
    num_qubits: usize,
    state: StateVector,
}

impl Circuit {
    /// A fresh register in |0…0⟩.
    pub fn new(num_qubits: usize) -> Result<Self> {
        check_qubit_count(num_qubits)?;
        Ok(Self {
            num_qubits,
            state: StateVector::new(num_qubits),
        })
    }

    pub fn num_qubits(&self) -> usize {
        self.num_qubits
    }

    pub fn state(&self) -> &StateVector {
        &self.state
    }

    pub fn amplitudes(&self) -> &[Complex<f64>] {
        &self.state.amplitudes
    }

    pub fn probabilities(&self) -> Vec<f64> {
        self.state.probabilities()
    }

    /// Applies `gate` to `target`, conditioned on `control` when given.
    ///
    /// Indices are validated before the operator is built, so a failed call
    /// leaves the state untouched.
    pub fn apply_gate(&mut self, gate: &Gate, target: usize, control: Option<usize>) -> Result<()> {
        let op = build_operator(gate, target, control, self.num_qubits)?;
        self.state.amplitudes = mat_vec(&op, &self.state.amplitudes)?;
        debug!(qubit = target, ?control, "applied gate");
        Ok(())
    }

    fn apply_single(&mut self, gate: Gate, target: usize, inverse: bool) -> Result<()> {
        let gate = if inverse { gate.inverse() } else { gate };
        self.apply_gate(&gate, target, None)
    }

    fn apply_controlled(&mut self, gate: Gate, control: usize, target: usize, inverse: bool) -> Result<()> {
        let gate = if inverse { gate.inverse() } else { gate };
        self.apply_gate(&gate, target, Some(control))
    }

    pub fn h(&mut self, target: usize, inverse: bool) -> Result<()> {
        self.apply_single(Gate::h(), target, inverse)
    }

    pub fn x(&mut self, target: usize, inverse: bool) -> Result<()> {
        self.apply_single(Gate::x(), target, inverse)
    }

    pub fn y(&mut self, target: usize, inverse: bool) -> Result<()> {
        self.apply_single(Gate::y(), target, inverse)
    }

    pub fn z(&mut self, target: usize, inverse: bool) -> Result<()> {
        self.apply_single(Gate::z(), target, inverse)
    }

    pub fn t(&mut self, target: usize, inverse: bool) -> Result<()> {
        self.apply_single(Gate::t(), target, inverse)
    }

    pub fn u(&mut self, target: usize, theta: f64, phi: f64, lambda: f64, inverse: bool) -> Result<()> {
        self.apply_single(Gate::u(theta, phi, lambda), target, inverse)
    }

    pub fn cx(&mut self, control: usize, target: usize, inverse: bool) -> Result<()> {
        self.apply_controlled(Gate::x(), control, target, inverse)
    }

    pub fn cu(
        &mut self,
        control: usize,
        target: usize,
        theta: f64,
        phi: f64,
        lambda: f64,
        inverse: bool,
    ) -> Result<()> {
        self.apply_controlled(Gate::u(theta, phi, lambda), control, target, inverse)
    }

    /// Dispatches one parsed operation to the matching gate method.
    pub fn apply(&mut self, op: &Operation) -> Result<()> {
        let inv = op.inverse;
        match op.instruction {
            Instruction::H { qubit } => self.h(qubit, inv),
            Instruction::X { qubit } => self.x(qubit, inv),
            Instruction::Y { qubit } => self.y(qubit, inv),
            Instruction::Z { qubit } => self.z(qubit, inv),
            Instruction::T { qubit } => self.t(qubit, inv),
            Instruction::U { qubit, theta, phi, lambda } => self.u(qubit, theta, phi, lambda, inv),
            Instruction::CX { control, target } => self.cx(control, target, inv),
            Instruction::CU { control, target, theta, phi, lambda } => {
                self.cu(control, target, theta, phi, lambda, inv)
            }
        }
    }

    /// Draws `shots` measurements in parallel.
    pub fn run(&self, shots: usize) -> Result<Counts> {
        let probabilities = self.probabilities();
        measurement::sample_counts(&probabilities, self.num_qubits, shots)
    }

    /// Draws `shots` measurements sequentially from `rng`.
    pub fn run_with_rng<R: Rng + ?Sized>(&self, shots: usize, rng: &mut R) -> Result<Counts> {
        let probabilities = self.probabilities();
        measurement::sample_counts_with_rng(&probabilities, self.num_qubits, shots, rng)
    }

    pub fn write_state(&self, writer: &mut impl Write) -> io::Result<()> {
        self.state.write_probabilities(writer)
    }

    /// Prints each basis label with its probability to stdout.
    pub fn print_state(&self) -> io::Result<()> {
        let stdout = io::stdout();
        self.write_state(&mut stdout.lock())
    }
}
