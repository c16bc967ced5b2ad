use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::Mutex;

use chrono::{DateTime, Duration, FixedOffset};

/// `Ref` values accepted recently, keyed to the timestamp they arrived with.
///
/// Entries older than the retention window are pruned on each insert.
/// A request carrying such an old timestamp fails the freshness check
/// before it reaches the registry, so pruning never re-admits a replay.
#[derive(Debug, Default)]
pub struct ReferenceRegistry {
    seen: Mutex<HashMap<String, DateTime<FixedOffset>>>,
}

impl ReferenceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `reference` issued at `issued_at`; returns `false` if it is
    /// still held from an earlier request.
    pub fn record(
        &self,
        reference: &str,
        issued_at: DateTime<FixedOffset>,
        now: DateTime<FixedOffset>,
        retention: Duration,
    ) -> bool {
        let mut seen = self
            .seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        seen.retain(|_, issued| now.signed_duration_since(*issued) <= retention);

        match seen.entry(reference.to_string()) {
            Entry::Occupied(_) => false,
            Entry::Vacant(slot) => {
                slot.insert(issued_at);
                true
            }
        }
    }

    pub fn len(&self) -> usize {
        self.seen
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn t0() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(8 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 8, 5, 14, 32, 10)
            .unwrap()
    }

    fn window() -> Duration {
        Duration::seconds(10)
    }

    #[test]
    fn first_sighting_is_accepted() {
        let registry = ReferenceRegistry::new();
        assert!(registry.record("PT1123", t0(), t0(), window()));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn repeated_reference_is_rejected_within_window() {
        let registry = ReferenceRegistry::new();
        assert!(registry.record("PT1123", t0(), t0(), window()));
        assert!(!registry.record("PT1123", t0(), t0() + Duration::seconds(9), window()));
        assert!(registry.record("PT1124", t0(), t0(), window()));
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn entries_older_than_window_are_pruned() {
        let registry = ReferenceRegistry::new();
        for i in 0..100 {
            assert!(registry.record(&format!("PT1{i}"), t0(), t0(), window()));
        }
        let later = t0() + Duration::seconds(11);
        assert!(registry.record("PT1fresh", later, later, window()));
        assert_eq!(registry.len(), 1);
    }
}
