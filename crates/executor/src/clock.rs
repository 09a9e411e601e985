//! Source of "now"

use std::sync::Arc;

use chrono::{DateTime, Utc};

/// Returns the current time. Shared between threads.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

/// Wall clock.
pub fn system_clock() -> Clock {
    Arc::new(Utc::now)
}

/// Clock frozen at `now`.
pub fn fixed_clock(now: DateTime<Utc>) -> Clock {
    Arc::new(move || now)
}
