use serde::{Deserialize, Serialize};

use crate::types::config::RosterConfig;
use crate::types::shift::ShiftKind;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum NurseCategory {
    Standard,
    Auxiliary,
}

/// One nurse's identity, category and resolved capabilities.
///
/// Profiles are resolved once from the configuration, before any
/// constraint is emitted; downstream code reads capabilities from here
/// instead of re-checking nurse identities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NurseProfile {
    /// Stable 0-based id; displayed 1-based.
    pub id: usize,
    pub category: NurseCategory,
    /// Shift kinds this nurse may be assigned. Never empty.
    pub eligible: Vec<ShiftKind>,
    /// Day-shift hours on Monday-Thursday workdays, when overridden.
    pub short_day_hours: Option<u32>,
    /// Replaces the roster-wide target hours for this nurse.
    pub target_hours: Option<u32>,
}

impl NurseProfile {
    pub fn display_number(&self) -> usize {
        self.id + 1
    }

    pub fn is_standard(&self) -> bool {
        self.category == NurseCategory::Standard
    }

    pub fn is_eligible(&self, kind: ShiftKind) -> bool {
        self.eligible.contains(&kind)
    }

    pub fn works_nights(&self) -> bool {
        self.is_eligible(ShiftKind::Night)
    }
}

/// Expand the configuration into one profile per nurse, standard nurses
/// first, auxiliary nurses after them.
pub fn resolve_profiles(config: &RosterConfig) -> Vec<NurseProfile> {
    let mut profiles = Vec::with_capacity(config.total_nurses());

    for id in 0..config.standard_nurses {
        let eligible = if config.night_forbidden == Some(id) {
            vec![ShiftKind::Day]
        } else {
            vec![ShiftKind::Day, ShiftKind::Night]
        };
        profiles.push(NurseProfile {
            id,
            category: NurseCategory::Standard,
            eligible,
            short_day_hours: config
                .short_day
                .filter(|rule| rule.nurse == id)
                .map(|rule| rule.hours),
            target_hours: config
                .target_overrides
                .iter()
                .find(|rule| rule.nurse == id)
                .map(|rule| rule.hours),
        });
    }

    for id in config.standard_nurses..config.total_nurses() {
        profiles.push(NurseProfile {
            id,
            category: NurseCategory::Auxiliary,
            eligible: vec![ShiftKind::Morning],
            short_day_hours: None,
            target_hours: None,
        });
    }

    profiles
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_roster_resolves_overrides() {
        let config = RosterConfig::default();
        let profiles = resolve_profiles(&config);
        assert_eq!(profiles.len(), 20);

        // Nurse 1 (id 0) works short Monday-Thursday day shifts.
        assert_eq!(profiles[0].short_day_hours, Some(10));
        // Nurse 3 (id 2) never works nights.
        assert!(!profiles[2].works_nights());
        assert_eq!(profiles[2].eligible, vec![ShiftKind::Day]);
        // The auxiliary nurse works the short Morning kind only.
        let aux = &profiles[19];
        assert_eq!(aux.category, NurseCategory::Auxiliary);
        assert_eq!(aux.eligible, vec![ShiftKind::Morning]);
        assert_eq!(aux.display_number(), 20);
    }

    #[test]
    fn hour_target_override_lands_on_the_named_nurse() {
        use crate::types::config::HourTargetRule;
        let mut config = RosterConfig::default();
        config.target_overrides = vec![HourTargetRule { nurse: 1, hours: 144 }];
        let profiles = resolve_profiles(&config);
        assert_eq!(profiles[1].target_hours, Some(144));
        assert_eq!(profiles[0].target_hours, None);
    }

    #[test]
    fn every_profile_has_an_eligible_kind() {
        let config = RosterConfig::compact();
        for profile in resolve_profiles(&config) {
            assert!(!profile.eligible.is_empty());
        }
    }
}
