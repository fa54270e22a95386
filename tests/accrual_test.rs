mod common;

use ajo::application::Ledger;
use ajo::domain::{Kobo, TierKey, naira};
use anyhow::Result;
use common::{StandardGroup, ledger_with, member};

#[test]
fn test_simple_accrual_two_weeks() -> Result<()> {
    let mut ledger = ledger_with(&[("Ada", TierKey::Tier1)])?;

    ledger.accrue_week(false);
    let ada = member(&ledger, "Ada");
    assert_eq!(ada.principal, naira(10_000));
    assert_eq!(ada.accumulated_interest, naira(500));
    assert_eq!(ada.weeks, 1);

    ledger.accrue_week(false);
    let ada = member(&ledger, "Ada");
    assert_eq!(ada.principal, naira(10_000));
    assert_eq!(ada.accumulated_interest, naira(1_000));
    assert_eq!(ada.weeks, 2);

    Ok(())
}

#[test]
fn test_compound_accrual_two_weeks() -> Result<()> {
    let mut ledger = ledger_with(&[("Ada", TierKey::Tier1)])?;

    ledger.accrue_week(true);
    ledger.accrue_week(true);

    let ada = member(&ledger, "Ada");
    assert_eq!(ada.principal, naira(11_025));
    assert_eq!(ada.accumulated_interest, 0);
    assert_eq!(ada.weeks, 2);

    Ok(())
}

#[test]
fn test_accrual_uses_each_members_tier_rate() -> Result<()> {
    let mut ledger = StandardGroup::one_per_tier()?;

    let summary = ledger.accrue_week(false);

    assert_eq!(member(&ledger, "Ada").accumulated_interest, naira(500));
    assert_eq!(member(&ledger, "Bola").accumulated_interest, naira(2_000));
    assert_eq!(member(&ledger, "Chidi").accumulated_interest, naira(6_000));

    assert_eq!(summary.members_accrued, 3);
    assert_eq!(summary.total_interest, naira(8_500));
    assert!(!summary.compound);

    Ok(())
}

#[test]
fn test_mixed_compounding_across_calls() -> Result<()> {
    let mut ledger = ledger_with(&[("Bola", TierKey::Tier2)])?;

    // Simple week then compound week: the compounded week pays on the
    // original principal, and earlier interest stays in accumulated interest.
    ledger.accrue_week(false);
    ledger.accrue_week(true);

    let bola = member(&ledger, "Bola");
    assert_eq!(bola.accumulated_interest, naira(2_000));
    assert_eq!(bola.principal, naira(22_000));
    assert_eq!(bola.weeks, 2);

    Ok(())
}

#[test]
fn test_accrual_on_empty_ledger_is_noop() {
    let mut ledger = Ledger::new();

    let summary = ledger.accrue_week(true);

    assert_eq!(summary.members_accrued, 0);
    assert_eq!(summary.total_interest, 0);
    assert!(ledger.is_empty());
}

#[test]
fn test_totals_follow_accrual() -> Result<()> {
    let mut ledger = StandardGroup::one_per_tier()?;

    ledger.accrue_week(false);

    assert_eq!(ledger.total_principal(), naira(60_000));
    assert_eq!(ledger.total_accumulated_interest(), naira(8_500));
    assert_eq!(ledger.total_withdrawable(), naira(68_500));

    let summary = ledger.summary();
    assert_eq!(summary.member_count, 3);
    assert_eq!(summary.capacity, 12);
    assert_eq!(summary.total_withdrawable, naira(68_500));

    Ok(())
}

#[test]
fn test_long_compounding_run_credits_what_it_reports() -> Result<()> {
    let mut ledger = ledger_with(&[("Chidi", TierKey::Tier3)])?;

    for week in 1..=200 {
        let before = member(&ledger, "Chidi").principal;
        let summary = ledger.accrue_week(true);
        let after = member(&ledger, "Chidi").principal;

        assert!(after > before, "principal stalled at week {week}");
        assert_eq!(summary.total_interest, after - before, "week {week}");
    }

    let chidi = member(&ledger, "Chidi");
    assert_eq!(chidi.weeks, 200);
    // Well past where a 64-bit amount would have run out
    assert!(chidi.principal > i64::MAX as Kobo);
    assert_eq!(ledger.total_withdrawable(), chidi.principal);

    Ok(())
}
