use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Kobo, Tier, TierKey, apply_rate};

pub type MemberId = Uuid;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Member {
    pub id: MemberId,
    pub name: String,
    pub tier: TierKey,
    pub principal: Kobo,
    pub accumulated_interest: Kobo,
    pub weeks: u32,
    pub joined_at: DateTime<Utc>,
}

impl Member {
    /// A fresh member always starts at the tier's fixed amount.
    pub fn new(name: impl Into<String>, tier: TierKey) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            tier,
            principal: tier.tier().amount,
            accumulated_interest: 0,
            weeks: 0,
            joined_at: Utc::now(),
        }
    }

    pub fn tier_info(&self) -> &'static Tier {
        self.tier.tier()
    }

    /// Interest the next weekly accrual would pay on the current principal.
    pub fn weekly_interest(&self) -> Kobo {
        apply_rate(self.principal, self.tier_info().weekly_rate_bps)
    }

    pub fn withdrawable(&self) -> Kobo {
        self.principal.saturating_add(self.accumulated_interest)
    }

    pub fn name_matches(&self, name: &str) -> bool {
        self.name.to_lowercase() == name.trim().to_lowercase()
    }

    /// Short form of the id used in listings.
    pub fn short_id(&self) -> String {
        self.id.simple().to_string()[..8].to_string()
    }
}
