//! Monthly nurse rostering as a mixed-integer linear program.
//!
//! A [`RosterConfig`] describes the month: horizon, nurse pool, staffing
//! bands, hour bounds and per-nurse overrides. [`RosterCompiler`] turns it
//! into boolean assignment variables, derived night-pattern indicators and
//! a weighted objective; [`solve_roster`] hands the model to the exact
//! solver and extracts an immutable [`Schedule`], which [`audit`] can
//! re-check rule by rule.

pub mod audit;
pub mod compiler;
pub mod error;
pub mod extractor;
pub mod solver;
pub mod types;

pub use compiler::constraints::workload::shift_hours;
pub use compiler::{BuildStats, RosterCompiler};
pub use error::{ConfigError, SolveError};
pub use extractor::{NurseTotals, Schedule};
pub use solver::{SolveParams, SolverStats, SolverStatus};
pub use types::calendar::Horizon;
pub use types::config::{Band, HourTargetRule, ObjectiveWeights, RosterConfig, ShortDayRule};
pub use types::nurse::{resolve_profiles, NurseCategory, NurseProfile};
pub use types::shift::ShiftKind;

/// Builds, solves and extracts in one call.
pub fn solve_roster(config: RosterConfig, params: &SolveParams) -> Result<Schedule, SolveError> {
    let mut compiler = RosterCompiler::new(config)?;
    compiler.compile();
    solver::solve(compiler, params)
}
