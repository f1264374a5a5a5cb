use thiserror::Error;

/// Rejections raised before any model construction happens.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("invalid {name} band: min {min} exceeds max {max}")]
    InvertedBand {
        name: &'static str,
        min: u32,
        max: u32,
    },
    #[error("horizon must contain at least one day")]
    EmptyHorizon,
    #[error("roster needs at least one standard nurse")]
    NoStandardNurses,
    #[error("{rule} refers to nurse {nurse}, outside the standard roster")]
    UnknownNurse { rule: &'static str, nurse: usize },
    #[error(
        "daily coverage needs at least {required} day-like nurses but only {available} are eligible"
    )]
    CoverageExceedsPool { required: u32, available: usize },
    #[error(
        "{days} nights cannot be split over {eligible} night-eligible nurses \
         working between {min} and {max} nights each"
    )]
    NightDemandUnsatisfiable {
        days: usize,
        eligible: usize,
        min: u32,
        max: u32,
    },
    #[error("target value {target} lies outside the {name} band [{min}, {max}]")]
    TargetOutsideBand {
        name: &'static str,
        target: u32,
        min: u32,
        max: u32,
    },
    #[error("auxiliary nurses need {required} workdays but the horizon only has {available}")]
    AuxiliaryShiftsExceedWorkdays { required: u32, available: usize },
}

/// Terminal outcomes of a solve attempt. Neither is retried.
#[derive(Debug, Error)]
pub enum SolveError {
    #[error("no roster satisfies the constraints")]
    Infeasible,
    #[error("solver stopped without a usable result: {0}")]
    Unknown(String),
    #[error(transparent)]
    Config(#[from] ConfigError),
}
