use serde::{Deserialize, Serialize};

use super::{BasisPoints, Kobo, naira};

/// Maximum number of active members in a group.
pub const MAX_MEMBERS: usize = 12;

/// Return of the group game on aggregate principal: 20%.
pub const GAME_RETURN_BPS: BasisPoints = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TierKey {
    Tier1,
    Tier2,
    Tier3,
}

/// A contribution tier. Amount is fixed; members cannot pick another.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Tier {
    pub key: TierKey,
    pub name: &'static str,
    pub amount: Kobo,
    pub weekly_rate_bps: BasisPoints,
}

pub const TIERS: [Tier; 3] = [
    Tier {
        key: TierKey::Tier1,
        name: "Tier 1",
        amount: naira(10_000),
        weekly_rate_bps: 500,
    },
    Tier {
        key: TierKey::Tier2,
        name: "Tier 2",
        amount: naira(20_000),
        weekly_rate_bps: 1_000,
    },
    Tier {
        key: TierKey::Tier3,
        name: "Tier 3",
        amount: naira(30_000),
        weekly_rate_bps: 2_000,
    },
];

impl TierKey {
    pub const ALL: [TierKey; 3] = [TierKey::Tier1, TierKey::Tier2, TierKey::Tier3];

    pub fn as_str(&self) -> &'static str {
        match self {
            TierKey::Tier1 => "tier1",
            TierKey::Tier2 => "tier2",
            TierKey::Tier3 => "tier3",
        }
    }

    /// Accepts "tier1".."tier3" in any case, or the bare digit.
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "tier1" | "1" => Some(TierKey::Tier1),
            "tier2" | "2" => Some(TierKey::Tier2),
            "tier3" | "3" => Some(TierKey::Tier3),
            _ => None,
        }
    }

    pub fn tier(&self) -> &'static Tier {
        match self {
            TierKey::Tier1 => &TIERS[0],
            TierKey::Tier2 => &TIERS[1],
            TierKey::Tier3 => &TIERS[2],
        }
    }
}

impl std::fmt::Display for TierKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl Tier {
    /// Weekly rate as a percentage, for display only.
    pub fn weekly_rate_percent(&self) -> f64 {
        self.weekly_rate_bps as f64 / 100.0
    }
}
