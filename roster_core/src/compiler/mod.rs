pub mod constraints;
pub mod objective;

use std::collections::HashMap;
use std::env;

use colored::Colorize;
use good_lp::{variable, Constraint, Expression, ProblemVariables, Variable};

use crate::error::ConfigError;
use crate::types::calendar::Horizon;
use crate::types::config::RosterConfig;
use crate::types::nurse::{resolve_profiles, NurseProfile};
use crate::types::shift::ShiftKind;
use self::objective::ObjectiveBuilder;

/// Counts of what each compilation step produced.
#[derive(Debug, Default, Clone, Copy)]
pub struct BuildStats {
    pub variables: usize,
    pub exclusivity_constraints: usize,
    pub coverage_constraints: usize,
    pub workload_constraints: usize,
    pub rest_constraints: usize,
    pub fairness_constraints: usize,
    pub objective_constraints: usize,
}

impl BuildStats {
    pub fn total_constraints(&self) -> usize {
        self.exclusivity_constraints
            + self.coverage_constraints
            + self.workload_constraints
            + self.rest_constraints
            + self.fairness_constraints
            + self.objective_constraints
    }
}

/// Compiles a roster configuration into decision variables, linear
/// constraints and a weighted objective, ready to hand to the solver.
pub struct RosterCompiler {
    pub config: RosterConfig,
    pub horizon: Horizon,
    pub profiles: Vec<NurseProfile>,
    // The variable pool for the whole model
    pub vars: ProblemVariables,
    // One binary decision per (nurse, day, eligible kind). Ineligible
    // combinations have no entry.
    pub shift_vars: HashMap<(usize, usize, ShiftKind), Variable>,
    pub constraints: Vec<Constraint>,
    pub objective: ObjectiveBuilder,
    // Per-nurse total-hours expressions, filled by the workload step
    pub hours: Vec<Expression>,
    // Per-nurse night-count expressions, None without Night eligibility
    pub night_counts: Vec<Option<Expression>>,
    // Total of all day-like assignments, filled by the coverage step
    pub day_like_total: Expression,
    // Sum of the coverage lower bounds across the horizon
    pub min_day_like: u32,
    pub debug: bool,
    pub stats: BuildStats,
}

impl RosterCompiler {
    /// Validates the configuration and prepares an empty model.
    pub fn new(config: RosterConfig) -> Result<Self, ConfigError> {
        config.validate()?;

        let debug = env::var("RUST_DEBUG").is_ok();
        let horizon = config.horizon();
        let profiles = resolve_profiles(&config);

        Ok(RosterCompiler {
            config,
            horizon,
            profiles,
            vars: ProblemVariables::new(),
            shift_vars: HashMap::new(),
            constraints: Vec::new(),
            objective: ObjectiveBuilder::new(),
            hours: Vec::new(),
            night_counts: Vec::new(),
            day_like_total: Expression::from(0),
            min_day_like: 0,
            debug,
            stats: BuildStats::default(),
        })
    }

    pub fn set_debug(&mut self, debug: bool) {
        self.debug = debug;
    }

    /// Runs every compilation step. Infeasibility is only discovered by
    /// the solver; this never fails once the configuration validated.
    pub fn compile(&mut self) -> &BuildStats {
        self.trace("🚀", "Starting roster compilation");

        // 1. Create assignment variables for all eligible combinations
        self.trace("📝", "Step 1: allocating assignment variables");
        self.allocate_shift_vars();

        // 2. At most one shift per nurse per day
        self.trace("1️⃣", "Step 2: one shift per nurse per day");
        let before = self.constraints.len();
        constraints::coverage::apply_one_shift_per_day(self);
        self.stats.exclusivity_constraints = self.constraints.len() - before;

        // 3. Daily staffing demand
        self.trace("📅", "Step 3: daily coverage bands");
        let before = self.constraints.len();
        constraints::coverage::apply_coverage(self);
        self.stats.coverage_constraints = self.constraints.len() - before;

        // 4. Hour totals per nurse
        self.trace("⏱️", "Step 4: workload bounds");
        let before = self.constraints.len();
        constraints::workload::apply_workload(self);
        self.stats.workload_constraints = self.constraints.len() - before;

        // 5. Night patterns, rest windows and the day-run cap
        self.trace("🌙", "Step 5: night patterns and rest windows");
        let before = self.constraints.len();
        constraints::rest::apply_night_patterns(self);
        constraints::rest::apply_day_run_limit(self);
        self.stats.rest_constraints = self.constraints.len() - before;

        // 6. Weekend fairness
        self.trace("⚖️", "Step 6: weekend fairness");
        let before = self.constraints.len();
        constraints::fairness::apply_weekend_fairness(self);
        self.stats.fairness_constraints = self.constraints.len() - before;

        // 7. Objective terms and their deviation variables
        self.trace("🎯", "Step 7: objective assembly");
        let before = self.constraints.len();
        objective::apply_objective(self);
        self.stats.objective_constraints = self.constraints.len() - before;

        self.trace(
            "✅",
            &format!(
                "Compiled {} variables, {} constraints, {} objective terms",
                self.stats.variables,
                self.constraints.len(),
                self.objective.len()
            ),
        );
        &self.stats
    }

    fn allocate_shift_vars(&mut self) {
        // Collect ids and kinds first to avoid borrowing issues
        let eligibility: Vec<(usize, Vec<ShiftKind>)> = self
            .profiles
            .iter()
            .map(|p| (p.id, p.eligible.clone()))
            .collect();

        for (nurse, kinds) in eligibility {
            for day in self.horizon.days() {
                for &kind in &kinds {
                    let name = format!("x_n{}_d{}_{}", nurse, day, kind.label());
                    let var = self.add_binary(name);
                    self.shift_vars.insert((nurse, day, kind), var);
                }
            }
        }
    }

    pub fn shift_var(&self, nurse: usize, day: usize, kind: ShiftKind) -> Option<Variable> {
        self.shift_vars.get(&(nurse, day, kind)).copied()
    }

    pub(crate) fn add_binary(&mut self, name: String) -> Variable {
        self.stats.variables += 1;
        self.vars.add(variable().binary().name(name))
    }

    pub(crate) fn add_deviation(&mut self, name: String, max: u32) -> Variable {
        self.stats.variables += 1;
        self.vars
            .add(variable().integer().min(0.0).max(max as f64).name(name))
    }

    pub(crate) fn push(&mut self, constraint: Constraint) {
        self.constraints.push(constraint);
    }

    pub(crate) fn trace(&self, emoji: &str, message: &str) {
        if self.debug {
            println!("{} {}", emoji.green(), message.bright_blue());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::config::Band;

    fn tiny_config() -> RosterConfig {
        let mut config = RosterConfig::default();
        config.horizon_days = 7;
        config.standard_nurses = 5;
        config.auxiliary_nurses = 0;
        config.night_forbidden = None;
        config.short_day = None;
        config.workday_day_like = Band::new(1, 2);
        config.weekend_day = Band::new(1, 2);
        config.standard_hours = Band::new(34, 46);
        config.target_hours = 40;
        config.night_target = 1;
        config.weekend_shifts = Band::new(0, 2);
        config
    }

    #[test]
    fn allocates_variables_for_eligible_kinds_only() {
        let mut config = tiny_config();
        config.night_forbidden = Some(2);
        let mut compiler = RosterCompiler::new(config).unwrap();
        compiler.compile();

        // 4 nurses with Day+Night, 1 with Day only, over 7 days.
        assert_eq!(compiler.shift_vars.len(), 4 * 7 * 2 + 7);
        assert!(compiler.shift_var(2, 0, ShiftKind::Night).is_none());
        assert!(compiler.shift_var(2, 0, ShiftKind::Day).is_some());
        assert!(compiler.shift_var(0, 6, ShiftKind::Night).is_some());
        assert!(compiler.shift_var(0, 0, ShiftKind::Morning).is_none());
    }

    #[test]
    fn coverage_constraint_count_matches_horizon() {
        let mut compiler = RosterCompiler::new(tiny_config()).unwrap();
        compiler.compile();
        // Two band sides plus the exactly-one-night rule, each day.
        assert_eq!(compiler.stats.coverage_constraints, 7 * 3);
    }

    #[test]
    fn every_step_contributes_constraints() {
        let mut compiler = RosterCompiler::new(tiny_config()).unwrap();
        let stats = *compiler.compile();
        assert!(stats.exclusivity_constraints > 0);
        assert!(stats.workload_constraints > 0);
        assert!(stats.rest_constraints > 0);
        assert!(stats.fairness_constraints > 0);
        assert!(stats.objective_constraints > 0);
        assert_eq!(stats.total_constraints(), compiler.constraints.len());
    }

    #[test]
    fn two_day_horizon_compiles_without_out_of_range_terms() {
        let mut config = tiny_config();
        config.horizon_days = 2;
        config.standard_nurses = 2;
        config.standard_hours = Band::new(0, 50);
        config.target_hours = 24;
        let mut compiler = RosterCompiler::new(config).unwrap();
        compiler.compile();
        assert!(compiler.stats.rest_constraints > 0);
    }

    #[test]
    fn objective_has_three_terms() {
        let mut compiler = RosterCompiler::new(tiny_config()).unwrap();
        compiler.compile();
        assert_eq!(compiler.objective.len(), 3);
    }
}
