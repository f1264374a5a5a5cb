//! Independent re-check of a solved roster against every structural rule.
//!
//! The checks here deliberately do not share code with the constraint
//! emission: they walk the extracted assignment grid directly, so a bug in
//! the encoding shows up as a reported violation instead of passing
//! silently through both sides.

use std::fmt;

use crate::compiler::constraints::workload::shift_hours;
use crate::extractor::Schedule;
use crate::types::nurse::{resolve_profiles, NurseProfile};
use crate::types::shift::ShiftKind;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub rule: &'static str,
    pub nurse: Option<usize>,
    pub day: Option<usize>,
    pub detail: String,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}]", self.rule)?;
        if let Some(nurse) = self.nurse {
            write!(f, " nurse {}", nurse + 1)?;
        }
        if let Some(day) = self.day {
            write!(f, " day {}", day + 1)?;
        }
        write!(f, ": {}", self.detail)
    }
}

/// Checks every rule and returns all violations found. An empty result
/// means the roster is structurally sound.
pub fn check_schedule(schedule: &Schedule) -> Vec<Violation> {
    let config = &schedule.config;
    let horizon = schedule.horizon();
    let profiles = resolve_profiles(config);
    let mut violations = Vec::new();

    let assigned = |nurse: usize, day: usize| schedule.assignments[nurse][day];
    let works = |nurse: usize, day: usize| assigned(nurse, day).is_some();
    let night = |nurse: usize, day: usize| assigned(nurse, day) == Some(ShiftKind::Night);

    // Eligibility
    for profile in &profiles {
        for day in horizon.days() {
            if let Some(kind) = assigned(profile.id, day) {
                if !profile.is_eligible(kind) {
                    violations.push(Violation {
                        rule: "eligibility",
                        nurse: Some(profile.id),
                        day: Some(day),
                        detail: format!("assigned ineligible kind {:?}", kind),
                    });
                }
            }
        }
    }

    // Daily coverage
    for day in horizon.days() {
        let day_like = profiles
            .iter()
            .filter(|p| matches!(assigned(p.id, day), Some(k) if k.is_day_like()))
            .count() as u32;
        let nights = profiles.iter().filter(|p| night(p.id, day)).count() as u32;

        if horizon.is_weekend(day) {
            let day_count = profiles
                .iter()
                .filter(|p| assigned(p.id, day) == Some(ShiftKind::Day))
                .count() as u32;
            if !config.weekend_day.contains(day_count) {
                violations.push(Violation {
                    rule: "weekend-coverage",
                    nurse: None,
                    day: Some(day),
                    detail: format!(
                        "{} Day shifts, band [{}, {}]",
                        day_count, config.weekend_day.min, config.weekend_day.max
                    ),
                });
            }
        } else if !config.workday_day_like.contains(day_like) {
            violations.push(Violation {
                rule: "workday-coverage",
                nurse: None,
                day: Some(day),
                detail: format!(
                    "{} day-like shifts, band [{}, {}]",
                    day_like, config.workday_day_like.min, config.workday_day_like.max
                ),
            });
        }

        if nights != 1 {
            violations.push(Violation {
                rule: "night-coverage",
                nurse: None,
                day: Some(day),
                detail: format!("{} night shifts, expected exactly 1", nights),
            });
        }
    }

    // Night counts and night-pattern legality
    for profile in &profiles {
        let count = horizon.days().filter(|&d| night(profile.id, d)).count() as u32;
        if profile.works_nights() {
            if !config.night_shifts.contains(count) {
                violations.push(Violation {
                    rule: "night-count",
                    nurse: Some(profile.id),
                    day: None,
                    detail: format!(
                        "{} nights, band [{}, {}]",
                        count, config.night_shifts.min, config.night_shifts.max
                    ),
                });
            }
        } else if count != 0 {
            violations.push(Violation {
                rule: "night-count",
                nurse: Some(profile.id),
                day: None,
                detail: format!("{} nights for a nurse barred from night duty", count),
            });
        }

        check_night_runs(schedule, profile, &mut violations);
    }

    // No three Day shifts in a row
    for profile in &profiles {
        for day in 0..horizon.len().saturating_sub(2) {
            let run = (0..3)
                .filter(|k| assigned(profile.id, day + k) == Some(ShiftKind::Day))
                .count();
            if run == 3 {
                violations.push(Violation {
                    rule: "day-run",
                    nurse: Some(profile.id),
                    day: Some(day),
                    detail: "three consecutive Day shifts".to_string(),
                });
            }
        }
    }

    // Hours
    for profile in &profiles {
        let hours: u32 = horizon
            .days()
            .filter_map(|d| assigned(profile.id, d).map(|k| shift_hours(config, &horizon, profile, d, k)))
            .sum();
        if profile.is_standard() {
            if !config.standard_hours.contains(hours) {
                violations.push(Violation {
                    rule: "hours",
                    nurse: Some(profile.id),
                    day: None,
                    detail: format!(
                        "{} hours, band [{}, {}]",
                        hours, config.standard_hours.min, config.standard_hours.max
                    ),
                });
            }
        } else {
            let exact = config.auxiliary_shifts * config.morning_hours;
            if hours != exact {
                violations.push(Violation {
                    rule: "hours",
                    nurse: Some(profile.id),
                    day: None,
                    detail: format!("{} hours, expected exactly {}", hours, exact),
                });
            }
            for day in horizon.weekend_days() {
                if works(profile.id, day) {
                    violations.push(Violation {
                        rule: "auxiliary-weekend",
                        nurse: Some(profile.id),
                        day: Some(day),
                        detail: "auxiliary nurse assigned on a weekend".to_string(),
                    });
                }
            }
        }
    }

    // Weekend fairness
    let weekend_days = horizon.weekend_days();
    if !weekend_days.is_empty() {
        let counts: Vec<(usize, u32)> = profiles
            .iter()
            .filter(|p| p.is_standard())
            .map(|p| {
                let count = weekend_days.iter().filter(|&&d| works(p.id, d)).count() as u32;
                (p.id, count)
            })
            .collect();
        for &(nurse, count) in &counts {
            if !config.weekend_shifts.contains(count) {
                violations.push(Violation {
                    rule: "weekend-count",
                    nurse: Some(nurse),
                    day: None,
                    detail: format!(
                        "{} weekend shifts, band [{}, {}]",
                        count, config.weekend_shifts.min, config.weekend_shifts.max
                    ),
                });
            }
        }
        for i in 0..counts.len() {
            for j in i + 1..counts.len() {
                let (a, ca) = counts[i];
                let (b, cb) = counts[j];
                if ca.abs_diff(cb) > 1 {
                    violations.push(Violation {
                        rule: "weekend-balance",
                        nurse: Some(a),
                        day: None,
                        detail: format!(
                            "nurse {} has {} weekend shifts, nurse {} has {}",
                            a + 1,
                            ca,
                            b + 1,
                            cb
                        ),
                    });
                }
            }
        }
    }

    violations
}

/// Walks the maximal runs of consecutive nights for one nurse and checks
/// the run length and the surrounding rest windows.
fn check_night_runs(schedule: &Schedule, profile: &NurseProfile, violations: &mut Vec<Violation>) {
    let horizon = schedule.horizon();
    let len = horizon.len();
    let night = |day: usize| schedule.assignments[profile.id][day] == Some(ShiftKind::Night);
    let works = |day: usize| schedule.assignments[profile.id][day].is_some();

    let mut day = 0;
    while day < len {
        if !night(day) {
            day += 1;
            continue;
        }
        let start = day;
        while day < len && night(day) {
            day += 1;
        }
        let run = day - start;

        match run {
            1 => {
                // Two free days after an isolated night.
                for offset in [1usize, 2] {
                    let rest = start + offset;
                    if rest < len && works(rest) {
                        violations.push(Violation {
                            rule: "singleton-rest",
                            nurse: Some(profile.id),
                            day: Some(rest),
                            detail: format!("working day {} after a lone night on day {}", rest + 1, start + 1),
                        });
                    }
                }
            }
            2 => {
                // A free day before and two free days after a night pair.
                if start >= 1 && works(start - 1) {
                    violations.push(Violation {
                        rule: "pair-rest",
                        nurse: Some(profile.id),
                        day: Some(start - 1),
                        detail: format!("working the day before the night pair starting day {}", start + 1),
                    });
                }
                for offset in [2usize, 3] {
                    let rest = start + offset;
                    if rest < len && works(rest) {
                        violations.push(Violation {
                            rule: "pair-rest",
                            nurse: Some(profile.id),
                            day: Some(rest),
                            detail: format!("working day {} after the night pair starting day {}", rest + 1, start + 1),
                        });
                    }
                }
            }
            _ => {
                violations.push(Violation {
                    rule: "night-run",
                    nurse: Some(profile.id),
                    day: Some(start),
                    detail: format!("{} consecutive nights starting day {}", run, start + 1),
                });
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::solver::{SolverStats, SolverStatus};
    use crate::types::config::{Band, RosterConfig};
    use std::time::Duration;

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

    /// `.` = off, `D` = Day, `N` = Night, `M` = Morning.
    fn schedule_from_rows(config: RosterConfig, rows: &[&str]) -> Schedule {
        let assignments: Vec<Vec<Option<ShiftKind>>> = rows
            .iter()
            .map(|row| {
                row.chars()
                    .map(|c| match c {
                        '.' => None,
                        'D' => Some(ShiftKind::Day),
                        'N' => Some(ShiftKind::Night),
                        'M' => Some(ShiftKind::Morning),
                        other => panic!("unknown cell {other}"),
                    })
                    .collect()
            })
            .collect();
        let days = config.horizon_days;
        Schedule {
            config,
            assignments,
            totals: Vec::new(),
            day_like_per_day: vec![0; days],
            nights_per_day: vec![0; days],
            stats: SolverStats {
                status: SolverStatus::Optimal,
                objective: 0.0,
                wall_time: Duration::ZERO,
                variables: 0,
                constraints: 0,
                time_limit: Duration::ZERO,
                workers: 1,
                conflicts: None,
                branches: None,
            },
        }
    }

    #[test]
    fn legal_roster_passes() {
        let rows = vec![
            "NN..D.D",
            "DD.NN..",
            "D.N..D.",
            "..D.DN.",
            ".D.D..N",
        ];
        let schedule = schedule_from_rows(week_config(), &rows);
        let violations = check_schedule(&schedule);
        assert!(violations.is_empty(), "unexpected violations: {violations:?}");
    }

    #[test]
    fn working_through_singleton_rest_is_flagged() {
        // Nurse 3's lone night on Wednesday demands Thursday and Friday off;
        // give them a Thursday Day shift.
        let rows = vec![
            "NN..D.D",
            "DD.NN..",
            "D.ND.D.",
            "..D.DN.",
            ".D.D..N",
        ];
        let schedule = schedule_from_rows(week_config(), &rows);
        let violations = check_schedule(&schedule);
        assert!(violations.iter().any(|v| v.rule == "singleton-rest"));
    }

    #[test]
    fn three_consecutive_nights_are_flagged() {
        let rows = vec![
            "NNN.D.D",
            "DD.NN..",
            "D.N..D.",
            "..D.DN.",
            ".D.D..N",
        ];
        let schedule = schedule_from_rows(week_config(), &rows);
        let violations = check_schedule(&schedule);
        assert!(violations.iter().any(|v| v.rule == "night-run"));
        // The doubled night on Wednesday also breaks coverage.
        assert!(violations.iter().any(|v| v.rule == "night-coverage"));
    }

    #[test]
    fn night_forbidden_nurse_with_a_night_is_flagged() {
        let mut config = week_config();
        config.night_forbidden = Some(4);
        let rows = vec![
            "NN..D.D",
            "DD.NN..",
            "D.N..D.",
            "..D.DN.",
            ".D.D..N",
        ];
        let schedule = schedule_from_rows(config, &rows);
        let violations = check_schedule(&schedule);
        assert!(violations.iter().any(|v| v.rule == "night-count" && v.nurse == Some(4)));
    }

    #[test]
    fn day_runs_of_three_are_flagged() {
        let rows = vec![
            "NN..D.D",
            "DDDNN..", // Wednesday makes it three Day shifts running
            "D.N..D.",
            "....DN.",
            ".D.D..N",
        ];
        let schedule = schedule_from_rows(week_config(), &rows);
        let violations = check_schedule(&schedule);
        assert!(violations.iter().any(|v| v.rule == "day-run" && v.nurse == Some(1)));
    }
}
