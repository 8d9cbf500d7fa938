//! Property-based tests for the state-vector engine.

use proptest::prelude::*;
use qsim::{Circuit, EPSILON, Instruction, Operation};

fn instruction(n: usize) -> impl Strategy<Value = Instruction> {
    let angle = -std::f64::consts::PI..std::f64::consts::PI;
    let single = prop_oneof![
        (0..n).prop_map(|qubit| Instruction::H { qubit }),
        (0..n).prop_map(|qubit| Instruction::X { qubit }),
        (0..n).prop_map(|qubit| Instruction::Y { qubit }),
        (0..n).prop_map(|qubit| Instruction::Z { qubit }),
        (0..n).prop_map(|qubit| Instruction::T { qubit }),
        (0..n, angle.clone(), angle.clone(), angle.clone())
            .prop_map(|(qubit, theta, phi, lambda)| Instruction::U { qubit, theta, phi, lambda }),
    ];
    // distinct control/target pairs: target = control + offset (mod n)
    let controlled = (0..n, 1..n.max(2), angle.clone(), angle.clone(), angle).prop_flat_map(
        move |(control, offset, theta, phi, lambda)| {
            let target = (control + offset) % n;
            prop_oneof![
                Just(Instruction::CX { control, target }),
                Just(Instruction::CU { control, target, theta, phi, lambda }),
            ]
        },
    );
    if n > 1 {
        prop_oneof![3 => single, 1 => controlled].boxed()
    } else {
        single.boxed()
    }
}

fn program() -> impl Strategy<Value = (usize, Vec<Operation>)> {
    (1usize..=4).prop_flat_map(|n| {
        let op = (instruction(n), any::<bool>())
            .prop_map(|(instruction, inverse)| Operation { instruction, inverse });
        (Just(n), prop::collection::vec(op, 0..12))
    })
}

proptest! {
    /// Property: the state keeps unit norm after any gate sequence
    #[test]
    fn norm_is_preserved((n, ops) in program()) {
        let mut circuit = Circuit::new(n).unwrap();
        for op in &ops {
            circuit.apply(op).unwrap();
        }
        let norm = circuit.state().norm_sqr();
        prop_assert!((norm - 1.0).abs() < EPSILON, "norm drifted to {}", norm);
    }

    /// Property: applying a sequence then its inverses in reverse restores |0…0⟩
    #[test]
    fn inverse_sequence_restores_ground_state((n, ops) in program()) {
        let mut circuit = Circuit::new(n).unwrap();
        for op in &ops {
            circuit.apply(op).unwrap();
        }
        for op in ops.iter().rev() {
            circuit.apply(&Operation { instruction: op.instruction, inverse: !op.inverse }).unwrap();
        }
        let amps = circuit.amplitudes();
        prop_assert!((amps[0].re - 1.0).abs() < EPSILON && amps[0].im.abs() < EPSILON);
        prop_assert!(amps[1..].iter().all(|a| a.norm() < EPSILON));
    }

    /// Property: shot counts always sum to the number of shots
    #[test]
    fn counts_sum_to_shots((n, ops) in program(), shots in 1usize..2000) {
        let mut circuit = Circuit::new(n).unwrap();
        for op in &ops {
            circuit.apply(op).unwrap();
        }
        let counts = circuit.run(shots).unwrap();
        prop_assert_eq!(counts.values().sum::<usize>(), shots);
        prop_assert!(counts.keys().all(|k| k.len() == n));
    }

    /// Property: the textual form of an operation parses back to itself
    #[test]
    fn display_parses_back((_, ops) in program()) {
        let text: Vec<String> = ops.iter().map(|op| op.to_string()).collect();
        let parsed = qsim::parse_program(&text.join(",")).unwrap();
        prop_assert_eq!(parsed, ops);
    }
}
