use good_lp::{constraint, Expression};

use crate::compiler::RosterCompiler;
use crate::types::shift::ShiftKind;

/// A nurse works at most one shift per day.
pub fn apply_one_shift_per_day(compiler: &mut RosterCompiler) {
    let eligibility: Vec<(usize, Vec<ShiftKind>)> = compiler
        .profiles
        .iter()
        .map(|p| (p.id, p.eligible.clone()))
        .collect();

    for (nurse, kinds) in eligibility {
        // A single eligible kind is already capped by the binary domain.
        if kinds.len() < 2 {
            continue;
        }
        for day in compiler.horizon.days() {
            let mut worked = Expression::from(0);
            for &kind in &kinds {
                if let Some(var) = compiler.shift_var(nurse, day, kind) {
                    worked += var;
                }
            }
            compiler.push(constraint!(worked <= 1.0));
        }
    }
}

/// Daily staffing demand: a day-like band plus exactly one night on every
/// day, with the weekend variant counting standard Day shifts only and
/// keeping auxiliary nurses at home.
pub fn apply_coverage(compiler: &mut RosterCompiler) {
    let nurses = compiler.profiles.len();
    let workdays = compiler.horizon.workdays();
    let weekend_days = compiler.horizon.weekend_days();
    let workday_band = compiler.config.workday_day_like;
    let weekend_band = compiler.config.weekend_day;

    for &day in &workdays {
        let mut day_like = Expression::from(0);
        for nurse in 0..nurses {
            for kind in [ShiftKind::Day, ShiftKind::Morning] {
                if let Some(var) = compiler.shift_var(nurse, day, kind) {
                    day_like += var;
                }
            }
        }
        let min = workday_band.min as f64;
        let max = workday_band.max as f64;
        compiler.push(constraint!(day_like.clone() >= min));
        compiler.push(constraint!(day_like.clone() <= max));
        compiler.day_like_total += day_like;

        apply_single_night(compiler, day);
    }

    for &day in &weekend_days {
        let mut day_count = Expression::from(0);
        for nurse in 0..nurses {
            if let Some(var) = compiler.shift_var(nurse, day, ShiftKind::Day) {
                day_count += var;
            }
        }
        let min = weekend_band.min as f64;
        let max = weekend_band.max as f64;
        compiler.push(constraint!(day_count.clone() >= min));
        compiler.push(constraint!(day_count.clone() <= max));
        compiler.day_like_total += day_count;

        apply_single_night(compiler, day);
    }

    // Auxiliary nurses never work weekends: pin every eligible kind to zero.
    let auxiliaries: Vec<(usize, Vec<ShiftKind>)> = compiler
        .profiles
        .iter()
        .filter(|p| !p.is_standard())
        .map(|p| (p.id, p.eligible.clone()))
        .collect();
    for (nurse, kinds) in auxiliaries {
        for &day in &weekend_days {
            for &kind in &kinds {
                if let Some(var) = compiler.shift_var(nurse, day, kind) {
                    compiler.push(constraint!(var == 0.0));
                }
            }
        }
    }

    compiler.min_day_like = workday_band.min * workdays.len() as u32
        + weekend_band.min * weekend_days.len() as u32;
}

fn apply_single_night(compiler: &mut RosterCompiler, day: usize) {
    let nurses = compiler.profiles.len();
    let mut nights = Expression::from(0);
    for nurse in 0..nurses {
        if let Some(var) = compiler.shift_var(nurse, day, ShiftKind::Night) {
            nights += var;
        }
    }
    compiler.push(constraint!(nights == 1.0));
}
