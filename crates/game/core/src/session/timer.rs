//! Timer math.
//!
//! Sessions carry a start timestamp and a fixed duration; everything else
//! about time is a pure function of `now` and must be recomputed on every
//! read. Nothing here caches, polls, or owns a background task — resuming
//! after the app was backgrounded or killed yields a correct reading
//! because there is no stale state to correct.

/// Seconds elapsed since the run started (0 before the start timestamp).
pub fn elapsed_secs(started_at: i64, now: i64) -> u64 {
    now.saturating_sub(started_at).max(0) as u64
}

/// Seconds until the run's timer lapses (0 once elapsed).
pub fn remaining_secs(started_at: i64, duration_secs: u32, now: i64) -> u64 {
    u64::from(duration_secs).saturating_sub(elapsed_secs(started_at, now))
}

/// Completion fraction in [0, 1].
pub fn progress(started_at: i64, duration_secs: u32, now: i64) -> f64 {
    if duration_secs == 0 {
        return 1.0;
    }
    (elapsed_secs(started_at, now) as f64 / f64::from(duration_secs)).clamp(0.0, 1.0)
}

/// How many of `step_count` evenly spaced steps have lapsed by `now`.
pub fn revealable_steps(started_at: i64, duration_secs: u32, step_count: usize, now: i64) -> usize {
    if duration_secs == 0 || step_count == 0 {
        return step_count;
    }
    let fraction = progress(started_at, duration_secs, now);
    ((step_count as f64) * fraction).floor() as usize
}
