use std::fmt;
use std::time::{Duration, Instant};

use good_lp::{default_solver, ResolutionError, Solution, SolverModel};

use crate::compiler::RosterCompiler;
use crate::error::SolveError;
use crate::extractor::schedule_extractor::extract_schedule;
use crate::extractor::Schedule;

/// Pass-through search configuration. The bundled exact backend solves to
/// proven optimality and exposes neither knob; both values are recorded in
/// the returned diagnostics so a budget-aware backend can be swapped in
/// without changing callers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SolveParams {
    pub time_limit: Duration,
    pub workers: usize,
}

impl Default for SolveParams {
    fn default() -> Self {
        SolveParams {
            time_limit: Duration::from_secs(60),
            workers: 8,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SolverStatus {
    /// Proven best roster.
    Optimal,
    /// Usable roster, optimality not proven within the budget.
    Feasible,
    /// No roster satisfies the constraints.
    Infeasible,
    /// The budget expired before any conclusion.
    Unknown,
}

impl SolverStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            SolverStatus::Optimal => "OPTIMAL",
            SolverStatus::Feasible => "FEASIBLE",
            SolverStatus::Infeasible => "INFEASIBLE",
            SolverStatus::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for SolverStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// What the solve run reported, kept alongside the extracted roster.
#[derive(Debug, Clone)]
pub struct SolverStats {
    pub status: SolverStatus,
    pub objective: f64,
    pub wall_time: Duration,
    pub variables: usize,
    pub constraints: usize,
    pub time_limit: Duration,
    pub workers: usize,
    /// Search counters, when the backend reports them.
    pub conflicts: Option<u64>,
    pub branches: Option<u64>,
}

/// Hands the compiled model to the exact solver and extracts the roster.
///
/// Infeasibility and budget exhaustion are terminal: no schedule is
/// produced and nothing is relaxed or retried.
pub fn solve(compiler: RosterCompiler, params: &SolveParams) -> Result<Schedule, SolveError> {
    let objective = compiler.objective.build();
    let variables = compiler.stats.variables;
    let constraint_count = compiler.constraints.len();

    let RosterCompiler {
        config,
        horizon,
        profiles,
        vars,
        shift_vars,
        constraints,
        ..
    } = compiler;

    let started = Instant::now();
    let mut problem = vars.minimise(objective.clone()).using(default_solver);
    for constraint in constraints {
        problem = problem.with(constraint);
    }

    match problem.solve() {
        Ok(solution) => {
            let stats = SolverStats {
                // The exact backend only returns once optimality is proven.
                status: SolverStatus::Optimal,
                objective: solution.eval(objective),
                wall_time: started.elapsed(),
                variables,
                constraints: constraint_count,
                time_limit: params.time_limit,
                workers: params.workers,
                conflicts: None,
                branches: None,
            };
            Ok(extract_schedule(
                config, &horizon, &profiles, &shift_vars, &solution, stats,
            ))
        }
        Err(ResolutionError::Infeasible) => Err(SolveError::Infeasible),
        Err(other) => Err(SolveError::Unknown(other.to_string())),
    }
}
