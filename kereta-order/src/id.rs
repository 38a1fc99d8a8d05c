use std::sync::atomic::{AtomicU64, Ordering};
use chrono::{DateTime, Utc};

/// Issues order identifiers of the form `TRX{unix_seconds}-{sequence}`.
///
/// The sequence is process-wide and strictly increasing, so identifiers stay
/// unique even when many bookings land in the same second.
#[derive(Debug)]
pub struct OrderIdGenerator {
    sequence: AtomicU64,
}

impl OrderIdGenerator {
    pub fn new() -> Self {
        Self {
            sequence: AtomicU64::new(0),
        }
    }

    pub fn next_id(&self) -> String {
        self.next_id_at(Utc::now())
    }

    pub fn next_id_at(&self, now: DateTime<Utc>) -> String {
        let seq = self.sequence.fetch_add(1, Ordering::Relaxed) + 1;
        format!("TRX{}-{}", now.timestamp(), seq)
    }
}

impl Default for OrderIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
