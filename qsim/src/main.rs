use anyhow::{Context, Result};
use clap::Parser;
use qsim::events::emit_event;
use qsim::{SimulationConfig, SimulationReport, run_simulation};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use tracing::info;

/// A dense state-vector quantum circuit simulator
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
#[command(after_help = "Example:\n  qsim --qubits 3 --shots 10 --ops \"H:0,CX:0:1,U:2:0.2:0.3:0.4\"")]
struct Cli {
    /// Number of qubits in the circuit
    #[arg(short, long)]
    qubits: usize,

    /// Operations to apply, e.g. "H:0,Tdg:1,CX:0:1,U:2:0.2:0.3:0.4"
    #[arg(short, long, default_value = "")]
    ops: String,

    /// Number of measurement shots
    #[arg(short, long, default_value_t = 100)]
    shots: usize,

    /// Seed for reproducible sampling
    #[arg(long)]
    seed: Option<u64>,

    /// Emit the full event log as JSON instead of plain counts
    #[arg(long)]
    json: bool,

    /// Emit the event log as one compact JSON object per line
    #[arg(long, conflicts_with = "json")]
    json_lines: bool,

    /// Print basis-state probabilities before the counts
    #[arg(long, conflicts_with_all = ["json", "json_lines"])]
    print_state: bool,

    /// The output file to write results to. If not provided, writes to stdout.
    #[arg(long)]
    output_file: Option<PathBuf>,
}

fn write_report(cli: &Cli, report: &SimulationReport, writer: &mut impl Write) -> Result<()> {
    if cli.json {
        let json_output = serde_json::to_string_pretty(&report.events)
            .context("failed to serialize simulation events")?;
        writeln!(writer, "{}", json_output)?;
        return Ok(());
    }
    if cli.json_lines {
        for event in &report.events {
            emit_event(event, writer).context("failed to write simulation event")?;
        }
        return Ok(());
    }

    if cli.print_state {
        report.circuit.write_state(writer)?;
    }
    let mut counts: Vec<_> = report.counts.iter().collect();
    counts.sort();
    for (state, count) in counts {
        writeln!(writer, "{}: {}", state, count)?;
    }
    Ok(())
}

fn config_from(cli: &Cli) -> SimulationConfig {
    SimulationConfig {
        num_qubits: cli.qubits,
        program: cli.ops.clone(),
        shots: cli.shots,
        seed: cli.seed,
    }
}

fn main() -> Result<()> {
    // logs go to stderr so stdout stays parseable
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let report = run_simulation(&config_from(&cli)).context("simulation failed")?;

    if let Some(output_path) = &cli.output_file {
        let file = File::create(output_path)
            .with_context(|| format!("failed to create {}", output_path.display()))?;
        let mut writer = BufWriter::new(file);
        write_report(&cli, &report, &mut writer)?;
        writer.flush()?;
        info!(path = %output_path.display(), "results written");
    } else {
        let stdout = io::stdout();
        write_report(&cli, &report, &mut stdout.lock())?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(args: &[&str]) -> String {
        let cli = Cli::try_parse_from(args.iter().copied()).unwrap();
        let report = run_simulation(&config_from(&cli)).unwrap();
        let mut out = Vec::new();
        write_report(&cli, &report, &mut out).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn test_print_state_conflicts_with_json_output() {
        assert!(Cli::try_parse_from(["qsim", "-q", "1", "--json", "--print-state"]).is_err());
        assert!(Cli::try_parse_from(["qsim", "-q", "1", "--json-lines", "--print-state"]).is_err());
        assert!(Cli::try_parse_from(["qsim", "-q", "1", "--json", "--json-lines"]).is_err());
        assert!(Cli::try_parse_from(["qsim", "-q", "1", "--print-state"]).is_ok());
    }

    #[test]
    fn test_plain_output_with_state() {
        let text = render(&["qsim", "-q", "1", "-o", "X:0", "-s", "5", "--seed", "7", "--print-state"]);
        assert_eq!(text, "|0⟩: 0.000000\n|1⟩: 1.000000\n1: 5\n");
    }

    #[test]
    fn test_json_lines_writes_one_event_per_line() {
        let text = render(&["qsim", "-q", "2", "-o", "H:0,CX:0:1", "-s", "10", "--seed", "3", "--json-lines"]);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        let kinds: Vec<String> = lines
            .iter()
            .map(|line| {
                let value: serde_json::Value = serde_json::from_str(line).unwrap();
                value["eventType"].as_str().unwrap().to_string()
            })
            .collect();
        assert_eq!(
            kinds,
            ["SimulationStart", "GateApplication", "GateApplication", "MeasurementResult"]
        );
    }
}
