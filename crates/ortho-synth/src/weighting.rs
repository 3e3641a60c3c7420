//! Evidence tier to aggregation weight.

use ortho_core::enums::EvidenceTier;

/// Weight used when a record carries no recognised tier.
pub const UNKNOWN_TIER_WEIGHT: f64 = 0.5;

/// Aggregation weight of a tier. Stronger designs weigh more.
#[must_use]
pub const fn tier_weight(tier: Option<EvidenceTier>) -> f64 {
    match tier {
        Some(EvidenceTier::Tier1a) => 5.0,
        Some(EvidenceTier::Tier1b) => 4.0,
        Some(EvidenceTier::Tier2a) => 3.0,
        Some(EvidenceTier::Tier2b) => 2.0,
        Some(EvidenceTier::Tier3) => 1.5,
        Some(EvidenceTier::Tier4) => 1.0,
        Some(EvidenceTier::Tier5) | None => UNKNOWN_TIER_WEIGHT,
    }
}

/// Weight of a raw tier code as stored; anything outside the fixed set maps
/// to [`UNKNOWN_TIER_WEIGHT`].
#[must_use]
pub fn raw_tier_weight(raw: Option<&str>) -> f64 {
    tier_weight(raw.and_then(EvidenceTier::parse))
}
