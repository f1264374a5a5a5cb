mod cli;
mod render;

use std::fs;
use std::process::ExitCode;

use anyhow::{Context, Result};
use colored::Colorize;
use roster_core::{audit, solver, RosterCompiler, RosterConfig, SolveError, SolveParams};

use crate::cli::Preset;

fn main() -> Result<ExitCode> {
    let options = cli::parse_from_args();

    let config: RosterConfig = match &options.config_path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading configuration from {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing configuration from {}", path.display()))?
        }
        None => match options.preset {
            Preset::Auxiliary => RosterConfig::default(),
            Preset::Compact => RosterConfig::compact(),
        },
    };

    let params = SolveParams {
        time_limit: options.time_limit,
        workers: options.workers,
    };

    let mut compiler = RosterCompiler::new(config).context("rejected configuration")?;
    compiler.set_debug(options.debug);
    compiler.compile();

    match solver::solve(compiler, &params) {
        Ok(schedule) => {
            render::print_summary(&schedule);

            let violations = audit::check_schedule(&schedule);
            if violations.is_empty() {
                println!("{}", "Audit: all rules hold".green());
            } else {
                // A violation here means the encoder and the audit disagree.
                for violation in &violations {
                    eprintln!("{} {}", "Audit:".red().bold(), violation);
                }
            }

            if let Some(path) = &options.csv_path {
                render::export_csv(&schedule, path)
                    .with_context(|| format!("exporting CSV to {}", path.display()))?;
                println!("Schedule exported to {}", path.display());
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(SolveError::Infeasible) => {
            eprintln!(
                "{}",
                "No feasible roster exists under the current constraints.".red()
            );
            Ok(ExitCode::FAILURE)
        }
        Err(error) => Err(error).context("solver failed"),
    }
}
