use std::io::{self, BufRead};
use std::process::ExitCode;

use advisory_constraint::{ConstraintSet, VersionConstraint};
use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use serde::Serialize;

#[derive(Parser, Debug)]
#[command(name = "advisory-merge")]
#[command(about = "Fold affected-version constraints into a single conflict string")]
#[command(version)]
struct Args {
    /// Constraints to merge, e.g. ">=1.0,<2.0" (read one per line from stdin when omitted)
    #[arg(value_name = "CONSTRAINT")]
    constraints: Vec<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Plain)]
    format: OutputFormat,

    /// Enable debug logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    Plain,
    Json,
}

#[derive(Serialize)]
struct JsonOutput<'a> {
    conflict: String,
    constraints: Vec<&'a VersionConstraint>,
}

/// Read one constraint per non-empty line
fn read_constraints<R: BufRead>(reader: R) -> Result<Vec<String>> {
    let mut constraints = Vec::new();
    for line in reader.lines() {
        let line = line.context("Failed to read constraint from input")?;
        let line = line.trim();
        if !line.is_empty() {
            constraints.push(line.to_string());
        }
    }
    Ok(constraints)
}

fn render(constraints: &[String], format: OutputFormat) -> Result<String> {
    let set = ConstraintSet::from_constraints(
        constraints.iter().map(|s| VersionConstraint::from_string(s)),
    )?;
    log::debug!("Folded {} constraints into {}", constraints.len(), set.len());

    match format {
        OutputFormat::Plain => Ok(set.conflict_string()),
        OutputFormat::Json => {
            let output = JsonOutput {
                conflict: set.conflict_string(),
                constraints: set.sorted(),
            };
            serde_json::to_string_pretty(&output).context("Failed to serialize output")
        }
    }
}

fn run() -> Result<()> {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level)).init();

    let constraints = if args.constraints.is_empty() {
        log::debug!("Reading constraints from stdin");
        read_constraints(io::stdin().lock())?
    } else {
        args.constraints
    };

    println!("{}", render(&constraints, args.format)?);
    Ok(())
}

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {}", e);
            for cause in e.chain().skip(1) {
                eprintln!("  Caused by: {}", cause);
            }
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_read_constraints_skips_blank_lines() {
        let input = Cursor::new(">=1.0,<2.0\n\n  >=1.5,<3.0  \n\t\ndev-main\n");
        assert_eq!(
            read_constraints(input).unwrap(),
            strings(&[">=1.0,<2.0", ">=1.5,<3.0", "dev-main"])
        );
    }

    #[test]
    fn test_render_plain() {
        let output = render(&strings(&[">=1.5,<3.0", ">=1.0,<2.0", ">=5"]), OutputFormat::Plain).unwrap();
        assert_eq!(output, ">=1.0,<3.0|>=5");
    }

    #[test]
    fn test_render_json() {
        let output = render(&strings(&["dev-main", ">=1.0,<2.0", ">=1.2,<1.8"]), OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["conflict"], ">=1.0,<2.0|dev-main");
        assert_eq!(value["constraints"], serde_json::json!([">=1.0,<2.0", "dev-main"]));
    }

    #[test]
    fn test_render_empty() {
        assert_eq!(render(&[], OutputFormat::Plain).unwrap(), "");
    }

    #[test]
    fn test_args_parse() {
        let args = Args::try_parse_from(["advisory-merge", "--format", "json", "-v", ">=1", "<2"]).unwrap();
        assert_eq!(args.format, OutputFormat::Json);
        assert!(args.verbose);
        assert_eq!(args.constraints, strings(&[">=1", "<2"]));
    }
}
