use crate::api::{Result, SimError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One gate call with its qubits and angles.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "gate")]
pub enum Instruction {
    H { qubit: usize },
    X { qubit: usize },
    Y { qubit: usize },
    Z { qubit: usize },
    T { qubit: usize },
    U { qubit: usize, theta: f64, phi: f64, lambda: f64 },
    CX { control: usize, target: usize },
    CU { control: usize, target: usize, theta: f64, phi: f64, lambda: f64 },
}

impl Instruction {
    fn name(&self) -> &'static str {
        match self {
            Instruction::H { .. } => "H",
            Instruction::X { .. } => "X",
            Instruction::Y { .. } => "Y",
            Instruction::Z { .. } => "Z",
            Instruction::T { .. } => "T",
            Instruction::U { .. } => "U",
            Instruction::CX { .. } => "CX",
            Instruction::CU { .. } => "CU",
        }
    }
}

/// An instruction plus whether its inverse should be applied instead.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(flatten)]
    pub instruction: Instruction,
    #[serde(default)]
    pub inverse: bool,
}

impl Operation {
    pub fn new(instruction: Instruction) -> Self {
        Self {
            instruction,
            inverse: false,
        }
    }

    pub fn inverted(instruction: Instruction) -> Self {
        Self {
            instruction,
            inverse: true,
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.instruction.name())?;
        if self.inverse {
            write!(f, "dg")?;
        }
        match self.instruction {
            Instruction::H { qubit }
            | Instruction::X { qubit }
            | Instruction::Y { qubit }
            | Instruction::Z { qubit }
            | Instruction::T { qubit } => write!(f, ":{}", qubit),
            Instruction::U { qubit, theta, phi, lambda } => {
                write!(f, ":{}:{}:{}:{}", qubit, theta, phi, lambda)
            }
            Instruction::CX { control, target } => write!(f, ":{}:{}", control, target),
            Instruction::CU { control, target, theta, phi, lambda } => {
                write!(f, ":{}:{}:{}:{}:{}", control, target, theta, phi, lambda)
            }
        }
    }
}

fn parse_error(position: usize, message: impl Into<String>) -> SimError {
    SimError::Parse {
        position,
        message: message.into(),
    }
}

fn parse_qubit(position: usize, s: &str) -> Result<usize> {
    s.trim()
        .parse::<usize>()
        .map_err(|_| parse_error(position, format!("invalid qubit index '{}'", s)))
}

fn parse_angle(position: usize, s: &str) -> Result<f64> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| parse_error(position, format!("invalid angle '{}'", s)))
}

/// Parses a single `NAME:arg[:arg...]` token. `position` is 1-based and only
/// used for error messages.
pub fn parse_operation(position: usize, token: &str) -> Result<Operation> {
    let parts: Vec<&str> = token.trim().split(':').collect();
    let raw_name = parts[0].trim();
    if raw_name.is_empty() {
        return Err(parse_error(position, "empty operation"));
    }
    let upper = raw_name.to_ascii_uppercase();
    let (name, inverse) = match upper.strip_suffix("DG") {
        Some(base) if !base.is_empty() => (base.to_string(), true),
        _ => (upper, false),
    };
    let args = &parts[1..];

    let expect = |n: usize| -> Result<()> {
        if args.len() != n {
            return Err(parse_error(
                position,
                format!("{} expects {} argument(s), got {}", name, n, args.len()),
            ));
        }
        Ok(())
    };

    let instruction = match name.as_str() {
        "H" | "X" | "Y" | "Z" | "T" => {
            expect(1)?;
            let qubit = parse_qubit(position, args[0])?;
            match name.as_str() {
                "H" => Instruction::H { qubit },
                "X" => Instruction::X { qubit },
                "Y" => Instruction::Y { qubit },
                "Z" => Instruction::Z { qubit },
                _ => Instruction::T { qubit },
            }
        }
        "U" => {
            expect(4)?;
            Instruction::U {
                qubit: parse_qubit(position, args[0])?,
                theta: parse_angle(position, args[1])?,
                phi: parse_angle(position, args[2])?,
                lambda: parse_angle(position, args[3])?,
            }
        }
        "CX" => {
            expect(2)?;
            Instruction::CX {
                control: parse_qubit(position, args[0])?,
                target: parse_qubit(position, args[1])?,
            }
        }
        "CU" => {
            expect(5)?;
            Instruction::CU {
                control: parse_qubit(position, args[0])?,
                target: parse_qubit(position, args[1])?,
                theta: parse_angle(position, args[2])?,
                phi: parse_angle(position, args[3])?,
                lambda: parse_angle(position, args[4])?,
            }
        }
        _ => return Err(parse_error(position, format!("unsupported gate '{}'", raw_name))),
    };

    Ok(Operation { instruction, inverse })
}

/// Parses a comma-separated program such as `"H:0,CX:0:1,U:2:0.2:0.3:0.4"`.
/// A blank program yields no operations.
pub fn parse_program(input: &str) -> Result<Vec<Operation>> {
    if input.trim().is_empty() {
        return Ok(Vec::new());
    }
    input
        .split(',')
        .enumerate()
        .map(|(i, token)| parse_operation(i + 1, token))
        .collect()
}
