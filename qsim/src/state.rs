use num_complex::Complex;
use serde::Serialize;
use std::io::{self, Write};

#[derive(Serialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StateVector {
    pub num_qubits: usize,
    #[serde(rename = "amplitudes")]
    pub amplitudes: Vec<Complex<f64>>,
}

impl StateVector {
    pub fn new(num_qubits: usize) -> Self {
        let size = 1 << num_qubits; // 2^num_qubits
        let mut amplitudes = vec![Complex::new(0.0, 0.0); size];
        amplitudes[0] = Complex::new(1.0, 0.0);
        Self {
            num_qubits,
            amplitudes,
        }
    }

    pub fn len(&self) -> usize {
        self.amplitudes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.amplitudes.is_empty()
    }

    /// `|a_i|^2` for every basis state, in index order.
    pub fn probabilities(&self) -> Vec<f64> {
        self.amplitudes.iter().map(|a| a.norm_sqr()).collect()
    }

    /// Sum of squared magnitudes. Stays at 1 up to floating drift; never renormalized.
    pub fn norm_sqr(&self) -> f64 {
        self.amplitudes.iter().map(|a| a.norm_sqr()).sum()
    }

    /// Zero-padded bitstring for a basis index, qubit 0 first.
    pub fn label(&self, index: usize) -> String {
        format_bitstring(index, self.num_qubits)
    }

    /// Writes one `|bits⟩: probability` line per basis state.
    pub fn write_probabilities(&self, writer: &mut impl Write) -> io::Result<()> {
        for (i, p) in self.probabilities().iter().enumerate() {
            writeln!(writer, "|{}⟩: {:.6}", self.label(i), p)?;
        }
        Ok(())
    }
}

pub fn format_bitstring(index: usize, width: usize) -> String {
    format!("{:0width$b}", index, width = width)
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPSILON: f64 = 1e-9;

    fn approx_eq(a: Complex<f64>, b: Complex<f64>) -> bool {
        (a.re - b.re).abs() < EPSILON && (a.im - b.im).abs() < EPSILON
    }

    #[test]
    fn test_state_vector_initialization() {
        let num_qubits = 3;
        let state = StateVector::new(num_qubits);
        assert_eq!(state.num_qubits, num_qubits);
        assert_eq!(state.amplitudes.len(), 1 << num_qubits);
        assert!(approx_eq(state.amplitudes[0], Complex::new(1.0, 0.0)));
        for i in 1..state.amplitudes.len() {
            assert!(approx_eq(state.amplitudes[i], Complex::new(0.0, 0.0)));
        }
        assert!((state.norm_sqr() - 1.0).abs() < EPSILON);
    }

    #[test]
    fn test_labels_are_zero_padded() {
        let state = StateVector::new(3);
        assert_eq!(state.label(0), "000");
        assert_eq!(state.label(1), "001");
        assert_eq!(state.label(6), "110");
    }

    #[test]
    fn test_write_probabilities() {
        let state = StateVector::new(1);
        let mut out = Vec::new();
        state.write_probabilities(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "|0⟩: 1.000000\n|1⟩: 0.000000\n");
    }

    #[test]
    fn test_serializes_amplitudes() {
        let json = serde_json::to_value(StateVector::new(1)).unwrap();
        assert_eq!(json["numQubits"], 1);
        assert_eq!(json["amplitudes"][0], serde_json::json!([1.0, 0.0]));
    }
}
