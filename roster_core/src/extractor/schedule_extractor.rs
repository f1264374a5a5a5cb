use std::collections::HashMap;

use good_lp::{Solution, Variable};

use crate::compiler::constraints::workload::shift_hours;
use crate::solver::SolverStats;
use crate::types::calendar::Horizon;
use crate::types::config::RosterConfig;
use crate::types::nurse::NurseProfile;
use crate::types::shift::ShiftKind;

/// Per-nurse tallies of a solved roster.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NurseTotals {
    /// 0-based id; display as `nurse + 1`.
    pub nurse: usize,
    pub hours: u32,
    pub day_like_shifts: u32,
    pub night_shifts: u32,
    pub weekend_shifts: u32,
}

/// A concrete solved roster. Immutable once extracted; a failed solve
/// produces no value of this type.
#[derive(Debug, Clone)]
pub struct Schedule {
    pub config: RosterConfig,
    /// `assignments[nurse][day]`, `None` for a day off.
    pub assignments: Vec<Vec<Option<ShiftKind>>>,
    pub totals: Vec<NurseTotals>,
    pub day_like_per_day: Vec<u32>,
    pub nights_per_day: Vec<u32>,
    pub stats: SolverStats,
}

impl Schedule {
    pub fn kind(&self, nurse: usize, day: usize) -> Option<ShiftKind> {
        self.assignments[nurse][day]
    }

    pub fn horizon(&self) -> Horizon {
        self.config.horizon()
    }

    pub fn total_hours(&self) -> u32 {
        self.totals.iter().map(|t| t.hours).sum()
    }

    pub fn total_day_like(&self) -> u32 {
        self.day_like_per_day.iter().sum()
    }
}

/// Reads every assignment variable out of the solution and tallies the
/// per-nurse and per-day counts.
pub fn extract_schedule<S: Solution>(
    config: RosterConfig,
    horizon: &Horizon,
    profiles: &[NurseProfile],
    shift_vars: &HashMap<(usize, usize, ShiftKind), Variable>,
    solution: &S,
    stats: SolverStats,
) -> Schedule {
    let len = horizon.len();
    let mut assignments = vec![vec![None; len]; profiles.len()];
    for (&(nurse, day, kind), &var) in shift_vars {
        if solution.value(var) >= 0.5 {
            assignments[nurse][day] = Some(kind);
        }
    }

    let mut totals = Vec::with_capacity(profiles.len());
    let mut day_like_per_day = vec![0u32; len];
    let mut nights_per_day = vec![0u32; len];

    for profile in profiles {
        let mut hours = 0u32;
        let mut day_like = 0u32;
        let mut nights = 0u32;
        let mut weekend = 0u32;
        for day in 0..len {
            let kind = match assignments[profile.id][day] {
                Some(kind) => kind,
                None => continue,
            };
            hours += shift_hours(&config, horizon, profile, day, kind);
            if kind.is_day_like() {
                day_like += 1;
                day_like_per_day[day] += 1;
            } else {
                nights += 1;
                nights_per_day[day] += 1;
            }
            if horizon.is_weekend(day) {
                weekend += 1;
            }
        }
        totals.push(NurseTotals {
            nurse: profile.id,
            hours,
            day_like_shifts: day_like,
            night_shifts: nights,
            weekend_shifts: weekend,
        });
    }

    Schedule {
        config,
        assignments,
        totals,
        day_like_per_day,
        nights_per_day,
        stats,
    }
}
