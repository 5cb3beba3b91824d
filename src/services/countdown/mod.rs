mod interval;

pub use interval::{
    duration_seconds, format_remaining, next_ready, progress, progress_percent, remaining,
    SECONDS_PER_DAY, SECONDS_PER_HOUR, SECONDS_PER_MINUTE,
};
