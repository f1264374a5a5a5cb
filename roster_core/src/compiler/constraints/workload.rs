use good_lp::{constraint, Expression};

use crate::compiler::RosterCompiler;
use crate::types::calendar::Horizon;
use crate::types::config::RosterConfig;
use crate::types::nurse::NurseProfile;
use crate::types::shift::ShiftKind;

/// Hour value of one assigned shift. The short-day override replaces the
/// Day coefficient on Monday-Thursday workdays for the nurse that carries
/// it; extraction uses the same function so the solved hours and the
/// reported hours can never disagree.
pub fn shift_hours(
    config: &RosterConfig,
    horizon: &Horizon,
    profile: &NurseProfile,
    day: usize,
    kind: ShiftKind,
) -> u32 {
    match kind {
        ShiftKind::Night => config.night_hours,
        ShiftKind::Morning => config.morning_hours,
        ShiftKind::Day => match profile.short_day_hours {
            Some(short) if horizon.is_monday_to_thursday(day) => short,
            _ => config.day_hours,
        },
    }
}

/// Total hours per nurse: a hard band for standard nurses, an exact total
/// for auxiliary nurses (a fixed count of Morning shifts).
pub fn apply_workload(compiler: &mut RosterCompiler) {
    let profiles = compiler.profiles.clone();
    let horizon = compiler.horizon;
    let config = compiler.config.clone();

    for profile in &profiles {
        let mut hours = Expression::from(0);
        for day in horizon.days() {
            for &kind in &profile.eligible {
                if let Some(var) = compiler.shift_var(profile.id, day, kind) {
                    let coefficient = shift_hours(&config, &horizon, profile, day, kind) as f64;
                    hours += coefficient * var;
                }
            }
        }

        if profile.is_standard() {
            let min = config.standard_hours.min as f64;
            let max = config.standard_hours.max as f64;
            compiler.push(constraint!(hours.clone() >= min));
            compiler.push(constraint!(hours.clone() <= max));
        } else {
            let exact = (config.auxiliary_shifts * config.morning_hours) as f64;
            compiler.push(constraint!(hours.clone() == exact));
        }
        compiler.hours.push(hours);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::nurse::resolve_profiles;

    #[test]
    fn short_day_override_applies_monday_to_thursday_only() {
        let config = RosterConfig::default();
        let horizon = config.horizon();
        let profiles = resolve_profiles(&config);

        let overridden = &profiles[0];
        assert_eq!(shift_hours(&config, &horizon, overridden, 0, ShiftKind::Day), 10);
        assert_eq!(shift_hours(&config, &horizon, overridden, 3, ShiftKind::Day), 10);
        // Friday and the weekend keep the full day value.
        assert_eq!(shift_hours(&config, &horizon, overridden, 4, ShiftKind::Day), 11);
        assert_eq!(shift_hours(&config, &horizon, overridden, 5, ShiftKind::Day), 11);
        // Nights are unaffected by the override.
        assert_eq!(shift_hours(&config, &horizon, overridden, 0, ShiftKind::Night), 12);

        let plain = &profiles[1];
        assert_eq!(shift_hours(&config, &horizon, plain, 0, ShiftKind::Day), 11);
    }
}
