/// One numbered parking space and its asserted state. Occupancy is written
/// by facility owners, never inferred from reservations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Spot {
    pub number: i32,
    pub occupied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpotSummary {
    pub total: i64,
    pub occupied: i64,
    pub free: i64,
}

impl SpotSummary {
    /// Declared capacity is authoritative for `total` even when spot rows are
    /// missing or exceed it; `free` is not clamped, so inconsistent data
    /// surfaces as a negative count instead of being hidden.
    pub fn from_counts(capacity: i32, occupied: i64) -> Self {
        let total = i64::from(capacity);
        Self {
            total,
            occupied,
            free: total - occupied,
        }
    }
}

/// Result of a best-effort bulk write: one outcome per requested spot, the
/// batch never aborts on a failing item.
#[derive(Debug, Default)]
pub struct BulkSpotOutcome {
    pub applied: usize,
    pub failed: Vec<FailedSpotWrite>,
}

#[derive(Debug)]
pub struct FailedSpotWrite {
    pub number: i32,
    pub reason: String,
}
