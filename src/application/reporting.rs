use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Kobo, MemberId, TierKey};

/// Aggregate totals for the active group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupSummary {
    pub member_count: usize,
    pub capacity: usize,
    pub total_principal: Kobo,
    pub total_accumulated_interest: Kobo,
    pub total_withdrawable: Kobo,
}

/// One dashboard line per active member.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemberRow {
    pub position: usize,
    pub id: MemberId,
    pub name: String,
    pub tier: TierKey,
    pub tier_name: String,
    pub principal: Kobo,
    pub weekly_interest: Kobo,
    pub accumulated_interest: Kobo,
    pub withdrawable: Kobo,
    pub weeks: u32,
}

/// Result of one weekly accrual across the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccrualSummary {
    pub members_accrued: usize,
    pub total_interest: Kobo,
    pub compound: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GamePayout {
    pub member_id: MemberId,
    pub name: String,
    pub profit: Kobo,
}

/// Result of distributing a game return.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub total_principal: Kobo,
    pub game_return: Kobo,
    pub payouts: Vec<GamePayout>,
}

impl GameOutcome {
    pub fn total_paid(&self) -> Kobo {
        self.payouts.iter().map(|p| p.profit).sum()
    }
}

/// Receipt handed back when a member leaves the group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WithdrawalReceipt {
    pub member_id: MemberId,
    pub name: String,
    pub tier: TierKey,
    pub principal: Kobo,
    pub accumulated_interest: Kobo,
    pub amount: Kobo,
    pub weeks: u32,
    pub withdrawn_at: DateTime<Utc>,
}
