use chrono::Utc;
use tracing::{debug, info, warn};

use crate::domain::{
    self, Kobo, MAX_MEMBERS, Member, MemberId, TierKey, accrue_member, split_proportionally,
};

use super::{
    AccrualSummary, GameOutcome, GamePayout, GroupSummary, LedgerError, MemberRow,
    WithdrawalReceipt,
};

/// Shortest id prefix accepted by [`Ledger::find`].
const MIN_ID_PREFIX: usize = 4;

/// The savings-group ledger: a bounded, insertion-ordered set of active members.
/// This is the primary interface for any client (CLI, tests, etc.).
///
/// Every operation either applies fully or returns an error with the ledger
/// untouched.
#[derive(Debug, Default, Clone)]
pub struct Ledger {
    members: Vec<Member>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Mutations
    // ========================

    /// Register a new member on the given tier.
    pub fn register(&mut self, name: &str, tier: TierKey) -> Result<Member, LedgerError> {
        let name = name.trim();
        if name.is_empty() {
            warn!("refused registration with empty name");
            return Err(LedgerError::Validation("Please enter a name.".to_string()));
        }

        if self.members.len() >= MAX_MEMBERS {
            warn!(name, "refused registration, group is full");
            return Err(LedgerError::GroupFull { max: MAX_MEMBERS });
        }

        if self.members.iter().any(|m| m.name_matches(name)) {
            warn!(name, "refused registration, duplicate name");
            return Err(LedgerError::DuplicateName(name.to_string()));
        }

        let member = Member::new(name, tier);
        info!(
            id = %member.id,
            name = %member.name,
            tier = %tier,
            principal = member.principal,
            "registered member"
        );
        self.members.push(member.clone());
        Ok(member)
    }

    /// Accrue one week of interest on every active member.
    pub fn accrue_week(&mut self, compound: bool) -> AccrualSummary {
        let mut total_interest: Kobo = 0;
        for member in &mut self.members {
            let interest = accrue_member(member, compound);
            debug!(
                name = %member.name,
                interest,
                principal = member.principal,
                accumulated_interest = member.accumulated_interest,
                weeks = member.weeks,
                "accrued week"
            );
            total_interest = total_interest.saturating_add(interest);
        }

        info!(
            members = self.members.len(),
            total_interest, compound, "simulated one week"
        );

        AccrualSummary {
            members_accrued: self.members.len(),
            total_interest,
            compound,
        }
    }

    /// Pay the group game return into each member's accumulated interest,
    /// proportionally to principal.
    pub fn distribute_game_profit(&mut self) -> Result<GameOutcome, LedgerError> {
        if self.members.is_empty() {
            warn!("refused game, no members");
            return Err(LedgerError::EmptyGroup);
        }

        let total = self.total_principal();
        if total <= 0 {
            warn!("refused game, total principal is zero");
            return Err(LedgerError::ZeroPrincipal);
        }

        let game_return = domain::game_return(total);
        let weights: Vec<Kobo> = self.members.iter().map(|m| m.principal).collect();
        let shares = split_proportionally(game_return, &weights);

        let mut payouts = Vec::with_capacity(shares.len());
        for (member, profit) in self.members.iter_mut().zip(shares) {
            member.accumulated_interest = member.accumulated_interest.saturating_add(profit);
            debug!(name = %member.name, profit, "game payout");
            payouts.push(GamePayout {
                member_id: member.id,
                name: member.name.clone(),
                profit,
            });
        }

        info!(total_principal = total, game_return, "distributed game profit");

        Ok(GameOutcome {
            total_principal: total,
            game_return,
            payouts,
        })
    }

    /// Remove a member permanently and pay out principal plus interest.
    pub fn withdraw(&mut self, id: MemberId) -> Result<WithdrawalReceipt, LedgerError> {
        let Some(idx) = self.members.iter().position(|m| m.id == id) else {
            warn!(%id, "refused withdrawal, unknown member");
            return Err(LedgerError::MemberNotFound(id.to_string()));
        };

        let member = self.members.remove(idx);
        let receipt = WithdrawalReceipt {
            member_id: member.id,
            amount: member.withdrawable(),
            name: member.name,
            tier: member.tier,
            principal: member.principal,
            accumulated_interest: member.accumulated_interest,
            weeks: member.weeks,
            withdrawn_at: Utc::now(),
        };

        info!(
            id = %receipt.member_id,
            name = %receipt.name,
            amount = receipt.amount,
            "member withdrew"
        );
        Ok(receipt)
    }

    // ========================
    // Queries
    // ========================

    /// Active members in registration order.
    pub fn members(&self) -> &[Member] {
        &self.members
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn is_full(&self) -> bool {
        self.members.len() >= MAX_MEMBERS
    }

    pub fn remaining_capacity(&self) -> usize {
        MAX_MEMBERS.saturating_sub(self.members.len())
    }

    pub fn get(&self, id: MemberId) -> Option<&Member> {
        self.members.iter().find(|m| m.id == id)
    }

    /// Resolve a member by full id, unique id prefix or case-insensitive name.
    pub fn find(&self, query: &str) -> Result<&Member, LedgerError> {
        let query = query.trim();
        if query.is_empty() {
            return Err(LedgerError::Validation("member is required".to_string()));
        }

        if let Ok(id) = query.parse::<MemberId>() {
            return self
                .get(id)
                .ok_or_else(|| LedgerError::MemberNotFound(query.to_string()));
        }

        if let Some(member) = self.members.iter().find(|m| m.name_matches(query)) {
            return Ok(member);
        }

        if query.len() >= MIN_ID_PREFIX {
            let prefix = query.to_lowercase();
            let mut matches = self
                .members
                .iter()
                .filter(|m| m.id.simple().to_string().starts_with(&prefix));

            if let Some(first) = matches.next() {
                if matches.next().is_some() {
                    return Err(LedgerError::Validation(format!(
                        "id prefix '{}' matches more than one member",
                        query
                    )));
                }
                return Ok(first);
            }
        }

        Err(LedgerError::MemberNotFound(query.to_string()))
    }

    pub fn total_principal(&self) -> Kobo {
        domain::total_principal(&self.members)
    }

    pub fn total_accumulated_interest(&self) -> Kobo {
        domain::total_accumulated_interest(&self.members)
    }

    pub fn total_withdrawable(&self) -> Kobo {
        self.total_principal()
            .saturating_add(self.total_accumulated_interest())
    }

    pub fn summary(&self) -> GroupSummary {
        GroupSummary {
            member_count: self.members.len(),
            capacity: MAX_MEMBERS,
            total_principal: self.total_principal(),
            total_accumulated_interest: self.total_accumulated_interest(),
            total_withdrawable: self.total_withdrawable(),
        }
    }

    /// Dashboard rows, numbered from 1 in registration order.
    pub fn member_rows(&self) -> Vec<MemberRow> {
        self.members
            .iter()
            .enumerate()
            .map(|(i, m)| MemberRow {
                position: i + 1,
                id: m.id,
                name: m.name.clone(),
                tier: m.tier,
                tier_name: m.tier_info().name.to_string(),
                principal: m.principal,
                weekly_interest: m.weekly_interest(),
                accumulated_interest: m.accumulated_interest,
                withdrawable: m.withdrawable(),
                weeks: m.weeks,
            })
            .collect()
    }
}
