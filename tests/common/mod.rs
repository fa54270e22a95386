// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use anyhow::Result;
use ajo::application::Ledger;
use ajo::domain::{Member, TierKey};

/// Build a ledger with the given members registered in order.
pub fn ledger_with(members: &[(&str, TierKey)]) -> Result<Ledger> {
    let mut ledger = Ledger::new();
    for (name, tier) in members {
        ledger.register(name, *tier)?;
    }
    Ok(ledger)
}

/// Look up a member by name, panicking if absent.
pub fn member<'a>(ledger: &'a Ledger, name: &str) -> &'a Member {
    ledger
        .find(name)
        .unwrap_or_else(|_| panic!("member '{}' should exist", name))
}

/// Test fixture: standard group setup
pub struct StandardGroup;

impl StandardGroup {
    /// One member per tier: Ada (tier1), Bola (tier2), Chidi (tier3)
    pub fn one_per_tier() -> Result<Ledger> {
        ledger_with(&[
            ("Ada", TierKey::Tier1),
            ("Bola", TierKey::Tier2),
            ("Chidi", TierKey::Tier3),
        ])
    }

    /// A group filled to capacity, all on tier1
    pub fn full() -> Result<Ledger> {
        let mut ledger = Ledger::new();
        for i in 1..=ajo::domain::MAX_MEMBERS {
            ledger.register(&format!("Member {}", i), TierKey::Tier1)?;
        }
        Ok(ledger)
    }
}
