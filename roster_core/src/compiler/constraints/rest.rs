//! Night-pattern legality.
//!
//! Only two night shapes are allowed per nurse: an isolated night followed
//! by two free days, or a double night with a free day before it and two
//! free days after it. The shapes are recognised with two derived boolean
//! families tied to the Night assignment variables by linear inequalities:
//!
//! * `pair[d]`: the nurse works Night on both `d` and `d+1`. Forced to be
//!   the exact AND of the two assignments.
//! * `single[d]`: the nurse works Night on `d` and neither neighbouring
//!   pair absorbs it. Forced from both directions, so every night is
//!   either inside exactly one pair or flagged as a singleton.
//!
//! Two adjacent pair starts would overlap on a shared middle night, which
//! is how runs of three or more nights are excluded. Terms that would
//! fall outside the horizon are simply omitted.

use good_lp::{constraint, Expression, Variable};

use crate::compiler::RosterCompiler;
use crate::types::nurse::NurseProfile;
use crate::types::shift::ShiftKind;

pub fn apply_night_patterns(compiler: &mut RosterCompiler) {
    let len = compiler.horizon.len();
    let profiles = compiler.profiles.clone();
    let band = compiler.config.night_shifts;

    for profile in &profiles {
        if !profile.works_nights() {
            compiler.night_counts.push(None);
            continue;
        }
        let nurse = profile.id;

        let night_on: Vec<Variable> = match (0..len)
            .map(|d| compiler.shift_var(nurse, d, ShiftKind::Night))
            .collect()
        {
            Some(vars) => vars,
            // Eligibility created a Night variable for every day; keep the
            // per-nurse vectors aligned even if that ever changes.
            None => {
                compiler.night_counts.push(None);
                continue;
            }
        };

        // pair[d] <=> Night on d and d+1
        let mut pair = Vec::with_capacity(len.saturating_sub(1));
        for d in 0..len.saturating_sub(1) {
            let p = compiler.add_binary(format!("pair_n{nurse}_d{d}"));
            let first = night_on[d];
            let second = night_on[d + 1];
            compiler.push(constraint!(p <= first));
            compiler.push(constraint!(p <= second));
            compiler.push(constraint!(first + second - 1.0 <= p));
            pair.push(p);
        }

        // Overlapping pair starts would put three nights in a row.
        for d in 0..pair.len().saturating_sub(1) {
            let left = pair[d];
            let right = pair[d + 1];
            compiler.push(constraint!(left + right <= 1.0));
        }

        // single[d] <=> Night on d absorbed by no pair
        let mut single = Vec::with_capacity(len);
        for d in 0..len {
            let s = compiler.add_binary(format!("single_n{nurse}_d{d}"));
            let night = night_on[d];
            compiler.push(constraint!(s <= night));

            let mut uncovered = Expression::from(night);
            if d >= 1 {
                let ending = pair[d - 1];
                compiler.push(constraint!(s + ending <= 1.0));
                uncovered = uncovered - ending;
            }
            if d < pair.len() {
                let starting = pair[d];
                compiler.push(constraint!(s + starting <= 1.0));
                uncovered = uncovered - starting;
            }
            // A night no pair accounts for must be a singleton.
            compiler.push(constraint!(uncovered <= s));
            single.push(s);
        }

        // A pair needs the day before off and the two days after off.
        for d in 0..pair.len() {
            let p = pair[d];
            let mut rest_days = Vec::new();
            if d >= 1 {
                rest_days.push(d - 1);
            }
            for offset in [2usize, 3] {
                if d + offset < len {
                    rest_days.push(d + offset);
                }
            }
            for rest_day in rest_days {
                forbid_work_when(compiler, profile, rest_day, p);
            }
        }

        // A singleton needs the two days after off.
        for d in 0..len {
            let s = single[d];
            for offset in [1usize, 2] {
                if d + offset < len {
                    forbid_work_when(compiler, profile, d + offset, s);
                }
            }
        }

        // Night count stays inside the configured band.
        let mut count = Expression::from(0);
        for &night in &night_on {
            count += night;
        }
        let min = band.min as f64;
        let max = band.max as f64;
        compiler.push(constraint!(count.clone() >= min));
        compiler.push(constraint!(count.clone() <= max));
        compiler.night_counts.push(Some(count));
    }
}

/// When `indicator` is set, the nurse must be fully off on `day`: no
/// assignment of any kind they are eligible for.
fn forbid_work_when(
    compiler: &mut RosterCompiler,
    profile: &NurseProfile,
    day: usize,
    indicator: Variable,
) {
    for &kind in &profile.eligible {
        if let Some(var) = compiler.shift_var(profile.id, day, kind) {
            compiler.push(constraint!(var + indicator <= 1.0));
        }
    }
}

/// No nurse works the standard Day kind three days running: every 3-day
/// window holds at most two Day assignments.
pub fn apply_day_run_limit(compiler: &mut RosterCompiler) {
    let len = compiler.horizon.len();
    let nurses = compiler.profiles.len();

    for nurse in 0..nurses {
        for d in 0..len.saturating_sub(2) {
            let window = (
                compiler.shift_var(nurse, d, ShiftKind::Day),
                compiler.shift_var(nurse, d + 1, ShiftKind::Day),
                compiler.shift_var(nurse, d + 2, ShiftKind::Day),
            );
            if let (Some(a), Some(b), Some(c)) = window {
                compiler.push(constraint!(a + b + c <= 2.0));
            }
        }
    }
}
