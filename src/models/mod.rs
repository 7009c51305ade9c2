pub mod usage;

pub use usage::{usage_window, UsageEvent, UsageRecord, GENERATE_ACTION, USAGE_QUOTA};
