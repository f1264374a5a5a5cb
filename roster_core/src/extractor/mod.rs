pub mod schedule_extractor;

pub use self::schedule_extractor::{NurseTotals, Schedule};
