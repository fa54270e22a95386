mod common;

use ajo::application::{Ledger, LedgerError};
use ajo::domain::{Kobo, TierKey, naira};
use anyhow::Result;
use common::{StandardGroup, ledger_with, member};

#[test]
fn test_game_distributes_proportionally() -> Result<()> {
    let mut ledger = ledger_with(&[("Ada", TierKey::Tier1), ("Bola", TierKey::Tier2)])?;

    let outcome = ledger.distribute_game_profit()?;

    assert_eq!(outcome.total_principal, naira(30_000));
    assert_eq!(outcome.game_return, naira(6_000));
    assert_eq!(outcome.payouts[0].profit, naira(2_000));
    assert_eq!(outcome.payouts[1].profit, naira(4_000));
    assert_eq!(outcome.total_paid(), naira(6_000));

    assert_eq!(member(&ledger, "Ada").accumulated_interest, naira(2_000));
    assert_eq!(member(&ledger, "Bola").accumulated_interest, naira(4_000));

    Ok(())
}

#[test]
fn test_game_never_touches_principal() -> Result<()> {
    let mut ledger = StandardGroup::one_per_tier()?;

    ledger.distribute_game_profit()?;

    assert_eq!(member(&ledger, "Ada").principal, naira(10_000));
    assert_eq!(member(&ledger, "Bola").principal, naira(20_000));
    assert_eq!(member(&ledger, "Chidi").principal, naira(30_000));

    Ok(())
}

#[test]
fn test_game_on_empty_group_fails() {
    let mut ledger = Ledger::new();

    let result = ledger.distribute_game_profit();

    assert_eq!(result, Err(LedgerError::EmptyGroup));
}

#[test]
fn test_game_conserves_return_on_uneven_principals() -> Result<()> {
    let mut ledger = StandardGroup::one_per_tier()?;

    // Compounding leaves principals that do not split evenly
    for _ in 0..7 {
        ledger.accrue_week(true);
    }
    let before: Vec<Kobo> = ledger
        .members()
        .iter()
        .map(|m| m.accumulated_interest)
        .collect();

    let outcome = ledger.distribute_game_profit()?;

    assert_eq!(outcome.total_paid(), outcome.game_return);
    let gained: Kobo = ledger
        .members()
        .iter()
        .zip(before)
        .map(|(m, b)| m.accumulated_interest - b)
        .sum();
    assert_eq!(gained, outcome.game_return);

    Ok(())
}

#[test]
fn test_game_after_simple_accrual_adds_to_interest() -> Result<()> {
    let mut ledger = ledger_with(&[("Ada", TierKey::Tier1)])?;

    ledger.accrue_week(false);
    ledger.distribute_game_profit()?;

    let ada = member(&ledger, "Ada");
    assert_eq!(ada.accumulated_interest, naira(500) + naira(2_000));
    assert_eq!(ada.withdrawable(), naira(12_500));

    Ok(())
}

#[test]
fn test_game_can_run_repeatedly() -> Result<()> {
    let mut ledger = ledger_with(&[("Ada", TierKey::Tier3)])?;

    ledger.distribute_game_profit()?;
    ledger.distribute_game_profit()?;

    // Game return is always on principal, which games never change
    assert_eq!(member(&ledger, "Ada").accumulated_interest, naira(12_000));

    Ok(())
}
