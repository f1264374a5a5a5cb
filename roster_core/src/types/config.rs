use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::types::calendar::Horizon;

/// Inclusive [min, max] range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Band {
    pub min: u32,
    pub max: u32,
}

impl Band {
    pub fn new(min: u32, max: u32) -> Self {
        Band { min, max }
    }

    pub fn contains(&self, value: u32) -> bool {
        self.min <= value && value <= self.max
    }

    fn validate(&self, name: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvertedBand {
                name,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// One nurse works shorter Day shifts on Monday-Thursday workdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShortDayRule {
    pub nurse: usize,
    pub hours: u32,
}

/// Per-nurse replacement for the roster-wide target hours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HourTargetRule {
    pub nurse: usize,
    pub hours: u32,
}

/// Relative importance of the three objective terms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveWeights {
    pub hour_deviation: f64,
    pub night_deviation: f64,
    pub day_surplus: f64,
}

impl Default for ObjectiveWeights {
    fn default() -> Self {
        ObjectiveWeights {
            hour_deviation: 100.0,
            night_deviation: 10.0,
            day_surplus: 1.0,
        }
    }
}

/// Everything the model builder needs to know about one month's roster.
///
/// The two constructors are presets for the configuration variants that
/// have been run in production; every field can be adjusted after the
/// fact (or loaded from JSON) and is re-validated before compilation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RosterConfig {
    /// Days in the horizon; the default is 4 full weeks plus 3 workdays.
    pub horizon_days: usize,
    pub standard_nurses: usize,
    pub auxiliary_nurses: usize,

    pub day_hours: u32,
    pub night_hours: u32,
    pub morning_hours: u32,

    /// Day-like staffing band on workdays (Day + Morning).
    pub workday_day_like: Band,
    /// Day staffing band on weekend days.
    pub weekend_day: Band,

    /// Hard hour band for every standard nurse.
    pub standard_hours: Band,
    /// Hour total the objective pulls standard nurses toward.
    pub target_hours: u32,
    /// Auxiliary nurses work exactly this many Morning shifts.
    pub auxiliary_shifts: u32,

    /// Nights per night-eligible nurse.
    pub night_shifts: Band,
    /// Night count the objective pulls eligible nurses toward.
    pub night_target: u32,

    /// Weekend assignments (Day or Night) per standard nurse.
    pub weekend_shifts: Band,

    /// At most one nurse may be barred from Night duty.
    pub night_forbidden: Option<usize>,
    pub short_day: Option<ShortDayRule>,
    #[serde(default)]
    pub target_overrides: Vec<HourTargetRule>,

    #[serde(default)]
    pub weights: ObjectiveWeights,
}

impl Default for RosterConfig {
    /// The auxiliary variant: 19 standard nurses plus one Morning-only
    /// auxiliary nurse.
    fn default() -> Self {
        RosterConfig {
            horizon_days: 31,
            standard_nurses: 19,
            auxiliary_nurses: 1,
            day_hours: 11,
            night_hours: 12,
            morning_hours: 8,
            workday_day_like: Band::new(9, 10),
            weekend_day: Band::new(5, 6),
            standard_hours: Band::new(140, 146),
            target_hours: 145,
            auxiliary_shifts: 17,
            night_shifts: Band::new(1, 3),
            night_target: 2,
            weekend_shifts: Band::new(2, 3),
            night_forbidden: Some(2),
            short_day: Some(ShortDayRule { nurse: 0, hours: 10 }),
            target_overrides: Vec::new(),
            weights: ObjectiveWeights::default(),
        }
    }
}

impl RosterConfig {
    /// The auxiliary-free variant: a narrower hour band and a lower
    /// workday staffing band, standard nurses only.
    pub fn compact() -> Self {
        RosterConfig {
            auxiliary_nurses: 0,
            workday_day_like: Band::new(7, 9),
            standard_hours: Band::new(143, 146),
            ..RosterConfig::default()
        }
    }

    pub fn horizon(&self) -> Horizon {
        Horizon::new(self.horizon_days)
    }

    pub fn total_nurses(&self) -> usize {
        self.standard_nurses + self.auxiliary_nurses
    }

    /// Standard nurses allowed to work nights.
    pub fn night_eligible_nurses(&self) -> usize {
        match self.night_forbidden {
            Some(n) if n < self.standard_nurses => self.standard_nurses - 1,
            _ => self.standard_nurses,
        }
    }

    /// Fail fast on configurations no solver run could ever satisfy, so
    /// that genuine infeasibility keeps meaning "the rules conflict".
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.horizon_days == 0 {
            return Err(ConfigError::EmptyHorizon);
        }
        if self.standard_nurses == 0 {
            return Err(ConfigError::NoStandardNurses);
        }

        self.workday_day_like.validate("workday coverage")?;
        self.weekend_day.validate("weekend coverage")?;
        self.standard_hours.validate("standard hours")?;
        self.night_shifts.validate("night shifts")?;
        self.weekend_shifts.validate("weekend shifts")?;

        if let Some(nurse) = self.night_forbidden {
            if nurse >= self.standard_nurses {
                return Err(ConfigError::UnknownNurse {
                    rule: "night-forbidden override",
                    nurse,
                });
            }
        }
        if let Some(rule) = self.short_day {
            if rule.nurse >= self.standard_nurses {
                return Err(ConfigError::UnknownNurse {
                    rule: "short-day override",
                    nurse: rule.nurse,
                });
            }
        }
        for rule in &self.target_overrides {
            if rule.nurse >= self.standard_nurses {
                return Err(ConfigError::UnknownNurse {
                    rule: "hour-target override",
                    nurse: rule.nurse,
                });
            }
            if !self.standard_hours.contains(rule.hours) {
                return Err(ConfigError::TargetOutsideBand {
                    name: "standard hours",
                    target: rule.hours,
                    min: self.standard_hours.min,
                    max: self.standard_hours.max,
                });
            }
        }

        if !self.standard_hours.contains(self.target_hours) {
            return Err(ConfigError::TargetOutsideBand {
                name: "standard hours",
                target: self.target_hours,
                min: self.standard_hours.min,
                max: self.standard_hours.max,
            });
        }
        if !self.night_shifts.contains(self.night_target) {
            return Err(ConfigError::TargetOutsideBand {
                name: "night shifts",
                target: self.night_target,
                min: self.night_shifts.min,
                max: self.night_shifts.max,
            });
        }

        // Workday day-like coverage draws on standard + auxiliary nurses,
        // weekend coverage on standard nurses only.
        let pool = self.total_nurses();
        if self.workday_day_like.min as usize > pool {
            return Err(ConfigError::CoverageExceedsPool {
                required: self.workday_day_like.min,
                available: pool,
            });
        }
        if self.weekend_day.min as usize > self.standard_nurses {
            return Err(ConfigError::CoverageExceedsPool {
                required: self.weekend_day.min,
                available: self.standard_nurses,
            });
        }

        // One night per day must be coverable by the eligible pool.
        let eligible = self.night_eligible_nurses();
        let days = self.horizon_days;
        let capacity_ok = eligible > 0
            && (eligible as u64) * (self.night_shifts.max as u64) >= days as u64
            && (eligible as u64) * (self.night_shifts.min as u64) <= days as u64;
        if !capacity_ok {
            return Err(ConfigError::NightDemandUnsatisfiable {
                days,
                eligible,
                min: self.night_shifts.min,
                max: self.night_shifts.max,
            });
        }

        if self.auxiliary_nurses > 0 {
            let workdays = self.horizon().workdays().len();
            if self.auxiliary_shifts as usize > workdays {
                return Err(ConfigError::AuxiliaryShiftsExceedWorkdays {
                    required: self.auxiliary_shifts,
                    available: workdays,
                });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn presets_validate() {
        RosterConfig::default().validate().unwrap();
        RosterConfig::compact().validate().unwrap();
    }

    #[test]
    fn inverted_band_is_rejected() {
        let mut config = RosterConfig::default();
        config.standard_hours = Band::new(150, 140);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvertedBand { name: "standard hours", .. })
        ));
    }

    #[test]
    fn night_capacity_is_checked() {
        let mut config = RosterConfig::default();
        config.standard_nurses = 2;
        config.auxiliary_nurses = 0;
        config.night_forbidden = None;
        config.short_day = None;
        config.workday_day_like = Band::new(1, 2);
        config.weekend_day = Band::new(1, 2);
        // 31 nights over 2 nurses capped at 3 nights each.
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NightDemandUnsatisfiable { days: 31, eligible: 2, .. })
        ));
    }

    #[test]
    fn overrides_must_name_standard_nurses() {
        let mut config = RosterConfig::default();
        config.night_forbidden = Some(40);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::UnknownNurse { nurse: 40, .. })
        ));
    }

    #[test]
    fn target_must_sit_inside_band() {
        let mut config = RosterConfig::default();
        config.target_hours = 160;
        assert!(matches!(
            config.validate(),
            Err(ConfigError::TargetOutsideBand { target: 160, .. })
        ));
    }
}
