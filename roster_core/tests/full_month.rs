//! The production-sized configurations. Solving a month-long roster takes
//! the bundled backend well past unit-test budgets, so these run only on
//! request: `cargo test -- --ignored`.

use roster_core::{audit, solve_roster, RosterConfig, SolveParams, SolverStatus};

#[test]
#[ignore = "month-sized solve, run explicitly"]
fn compact_month_solves_within_all_bands() {
    let config = RosterConfig::compact();
    let schedule = solve_roster(config, &SolveParams::default()).unwrap();

    assert!(matches!(
        schedule.stats.status,
        SolverStatus::Optimal | SolverStatus::Feasible
    ));
    let violations = audit::check_schedule(&schedule);
    assert!(violations.is_empty(), "violations: {violations:?}");

    for totals in &schedule.totals {
        assert!(
            schedule.config.standard_hours.contains(totals.hours),
            "nurse {} at {} hours",
            totals.nurse + 1,
            totals.hours
        );
    }
}

#[test]
#[ignore = "month-sized solve, run explicitly"]
fn auxiliary_month_keeps_the_auxiliary_on_mornings() {
    let config = RosterConfig::default();
    let schedule = solve_roster(config, &SolveParams::default()).unwrap();

    let violations = audit::check_schedule(&schedule);
    assert!(violations.is_empty(), "violations: {violations:?}");

    let aux = &schedule.totals[19];
    assert_eq!(aux.night_shifts, 0);
    assert_eq!(aux.weekend_shifts, 0);
    assert_eq!(
        aux.hours,
        schedule.config.auxiliary_shifts * schedule.config.morning_hours
    );
}
