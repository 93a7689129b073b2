//! Per-domain expiration windows.
//!
//! The windows are deliberately uneven and hardcoded per domain: advisor
//! data goes stale daily, cost reports are considered stable for a hundred
//! days, and the tag inventory is effectively pinned until someone forces a
//! refresh. Unifying them would silently change observable behavior, so
//! any change here should go past stakeholders first.

use chrono::Duration;

/// Trusted Advisor datasets: refreshed daily.
pub fn advisor() -> Duration {
    Duration::days(1)
}

/// Cost-and-usage rows: a period's report barely moves once closed.
pub fn costs() -> Duration {
    Duration::days(100)
}

/// Tag-based resource inventory: effectively unbounded (~11 years).
pub fn tag_inventory() -> Duration {
    Duration::days(4000)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn windows_keep_their_observed_spread() {
        assert!(advisor() < costs());
        assert!(costs() < tag_inventory());
        assert_eq!(advisor(), Duration::days(1));
        assert_eq!(costs(), Duration::days(100));
        assert_eq!(tag_inventory(), Duration::days(4000));
    }
}
