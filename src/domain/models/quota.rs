use serde::Serialize;

/// Derived storage figures for one owner. Never persisted; recomputed from the
/// remote aggregation on demand, so staleness resolves itself on re-fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct QuotaSnapshot {
    pub usage: u64,
    #[serde(rename = "maxUserStorage")]
    pub max_user_storage: u64,
    pub percentage: u8,
    pub remaining: u64,
}

impl QuotaSnapshot {
    /// Percentage rounds to the nearest integer and is capped at 100 so an
    /// over-quota owner still renders sanely; remaining clamps at zero.
    pub fn derive(usage: u64, max_user_storage: u64) -> Self {
        let percentage = if max_user_storage == 0 {
            if usage == 0 {
                0
            } else {
                100
            }
        } else {
            let ratio = usage as f64 / max_user_storage as f64;
            (ratio * 100.0).round().min(100.0) as u8
        };

        Self {
            usage,
            max_user_storage,
            percentage,
            remaining: max_user_storage.saturating_sub(usage),
        }
    }
}
