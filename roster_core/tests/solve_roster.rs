//! End-to-end solves on deliberately small instances. Each configuration
//! here is known to be satisfiable (or not) by hand construction, so a
//! wrong status is always an encoding bug.

use roster_core::{audit, solve_roster, Band, RosterConfig, ShiftKind, SolveError, SolveParams, SolverStatus};

/// One Monday-start week, five nurses, no auxiliaries. A feasible roster
/// exists: two night pairs, three singletons, day coverage of one or two.
fn week_config() -> RosterConfig {
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

/// Five weekdays, four nurses, one barred from nights.
fn short_week_config() -> RosterConfig {
    let mut config = week_config();
    config.horizon_days = 5;
    config.standard_nurses = 4;
    config.night_forbidden = Some(3);
    config.standard_hours = Band::new(22, 46);
    config.target_hours = 35;
    config
}

#[test]
fn week_roster_solves_and_passes_audit() {
    let schedule = solve_roster(week_config(), &SolveParams::default()).unwrap();

    assert_eq!(schedule.stats.status, SolverStatus::Optimal);
    let violations = audit::check_schedule(&schedule);
    assert!(violations.is_empty(), "violations: {violations:?}");

    let config = &schedule.config;
    for totals in &schedule.totals {
        assert!(config.standard_hours.contains(totals.hours));
        assert!(config.night_shifts.contains(totals.night_shifts));
    }
    // Exactly one night every day.
    assert!(schedule.nights_per_day.iter().all(|&n| n == 1));
}

#[test]
fn resolving_reaches_the_same_objective() {
    let first = solve_roster(week_config(), &SolveParams::default()).unwrap();
    let second = solve_roster(week_config(), &SolveParams::default()).unwrap();
    assert!((first.stats.objective - second.stats.objective).abs() < 1e-6);
}

#[test]
fn night_forbidden_nurse_never_works_nights() {
    let schedule = solve_roster(short_week_config(), &SolveParams::default()).unwrap();

    let violations = audit::check_schedule(&schedule);
    assert!(violations.is_empty(), "violations: {violations:?}");

    assert_eq!(schedule.totals[3].night_shifts, 0);
    for day in 0..schedule.config.horizon_days {
        assert_ne!(schedule.kind(3, day), Some(ShiftKind::Night));
    }
    // Everyone else still covers at least one night.
    for nurse in 0..3 {
        assert!(schedule.totals[nurse].night_shifts >= 1);
    }
}

#[test]
fn impossible_hour_band_reports_infeasible() {
    // Every nurse owes at least one 12h night, so a [10, 10] hour band
    // can never be met. The model must say so instead of bending a rule.
    let mut config = short_week_config();
    config.night_forbidden = None;
    config.standard_hours = Band::new(10, 10);
    config.target_hours = 10;

    match solve_roster(config, &SolveParams::default()) {
        Err(SolveError::Infeasible) => {}
        other => panic!("expected infeasibility, got {other:?}"),
    }
}

#[test]
fn invalid_configuration_fails_before_solving() {
    let mut config = week_config();
    config.workday_day_like = Band::new(4, 2);
    match solve_roster(config, &SolveParams::default()) {
        Err(SolveError::Config(_)) => {}
        other => panic!("expected a config rejection, got {other:?}"),
    }
}
