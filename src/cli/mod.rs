mod session;

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::io::{IsTerminal, Write, stdin, stdout};

use crate::application::{GameOutcome, Ledger, WithdrawalReceipt};
use crate::domain::{TIERS, TierKey, format_naira};
use crate::io::Exporter;

pub use session::*;

/// Ajo - savings group simulation
#[derive(Parser)]
#[command(name = "ajo")]
#[command(about = "Simulate a tiered savings group: weekly interest, group game, withdrawals")]
#[command(version)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Command to run (defaults to an interactive session)
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Show the contribution tiers
    Tiers,

    /// Run a scripted simulation and print the result
    Simulate {
        /// Member to register as NAME:TIER (e.g. "Ada:tier2"); repeatable
        #[arg(short, long = "member", required = true)]
        members: Vec<String>,

        /// Number of weeks to accrue
        #[arg(short, long, default_value = "0")]
        weeks: u32,

        /// Compound weekly interest into principal
        #[arg(long)]
        compound: bool,

        /// Play the group game once after the weeks have run
        #[arg(long)]
        game: bool,

        /// Member to withdraw at the end (name or id); repeatable
        #[arg(long)]
        withdraw: Vec<String>,

        /// Output format: table, json, csv (csv lists only the members still in the group)
        #[arg(short, long, default_value = "table")]
        format: String,
    },

    /// Start an interactive session reading commands from stdin
    Session,
}

impl Cli {
    pub fn run(self) -> Result<()> {
        match self.command {
            Some(Commands::Tiers) => {
                let mut out = stdout().lock();
                write_tiers(&mut out)?;
            }

            Some(Commands::Simulate {
                members,
                weeks,
                compound,
                game,
                withdraw,
                format,
            }) => {
                let mut out = stdout().lock();
                run_simulate_command(&mut out, &members, weeks, compound, game, &withdraw, &format)?;
            }

            Some(Commands::Session) | None => {
                let input = stdin();
                let interactive = input.is_terminal();
                let mut session = Session::new();
                session.run(input.lock(), stdout().lock(), interactive)?;
            }
        }

        Ok(())
    }
}

/// Parse a NAME:TIER member spec. The tier part is optional and defaults to tier1.
pub fn parse_member_spec(spec: &str) -> Result<(String, TierKey)> {
    match spec.rsplit_once(':') {
        Some((name, tier)) => {
            let tier = TierKey::from_str(tier).with_context(|| {
                format!("Invalid tier '{}'. Use tier1, tier2 or tier3", tier)
            })?;
            Ok((name.trim().to_string(), tier))
        }
        None => Ok((spec.trim().to_string(), TierKey::Tier1)),
    }
}

fn run_simulate_command<W: Write>(
    out: &mut W,
    members: &[String],
    weeks: u32,
    compound: bool,
    game: bool,
    withdraw: &[String],
    format: &str,
) -> Result<()> {
    if !matches!(format, "table" | "json" | "csv") {
        bail!("Invalid format '{}'. Use table, json or csv", format);
    }

    let mut ledger = Ledger::new();
    for spec in members {
        let (name, tier) = parse_member_spec(spec)?;
        ledger
            .register(&name, tier)
            .with_context(|| format!("Failed to register '{}'", name))?;
    }

    for _ in 0..weeks {
        ledger.accrue_week(compound);
    }

    let outcome = if game {
        Some(ledger.distribute_game_profit()?)
    } else {
        None
    };

    let mut receipts = Vec::with_capacity(withdraw.len());
    for query in withdraw {
        let id = ledger.find(query)?.id;
        receipts.push(ledger.withdraw(id)?);
    }

    match format {
        "json" => {
            Exporter::new(&ledger).export_simulation_json(
                &mut *out, weeks, compound, outcome, receipts,
            )?;
        }
        "csv" => {
            Exporter::new(&ledger).export_members_csv(&mut *out)?;
        }
        _ => {
            writeln!(
                out,
                "Simulated {} week(s) ({} interest)",
                weeks,
                if compound { "compound" } else { "simple" }
            )?;
            if let Some(outcome) = &outcome {
                write_game_outcome(out, outcome)?;
            }
            for receipt in &receipts {
                write_receipt(out, receipt)?;
            }
            writeln!(out)?;
            write_dashboard(out, &ledger)?;
        }
    }

    Ok(())
}

pub fn write_tiers<W: Write>(out: &mut W) -> Result<()> {
    writeln!(out, "{:<8} {:<8} {:>14} {:>10}", "KEY", "NAME", "AMOUNT", "RATE/WEEK")?;
    writeln!(out, "{}", "-".repeat(43))?;
    for tier in &TIERS {
        writeln!(
            out,
            "{:<8} {:<8} {:>14} {:>9}%",
            tier.key.as_str(),
            tier.name,
            format_naira(tier.amount),
            tier.weekly_rate_percent()
        )?;
    }
    Ok(())
}

pub fn write_totals<W: Write>(out: &mut W, ledger: &Ledger) -> Result<()> {
    let summary = ledger.summary();
    writeln!(out, "Members:                    {} / {}", summary.member_count, summary.capacity)?;
    writeln!(out, "Total Principal:            {}", format_naira(summary.total_principal))?;
    writeln!(
        out,
        "Total Accumulated Interest: {}",
        format_naira(summary.total_accumulated_interest)
    )?;
    writeln!(out, "Total Withdrawable:         {}", format_naira(summary.total_withdrawable))?;
    Ok(())
}

pub fn write_dashboard<W: Write>(out: &mut W, ledger: &Ledger) -> Result<()> {
    write_totals(out, ledger)?;
    writeln!(out)?;

    let rows = ledger.member_rows();
    if rows.is_empty() {
        writeln!(out, "No members yet.")?;
        return Ok(());
    }

    writeln!(
        out,
        "{:>2} {:<8} {:<16} {:<7} {:>14} {:>12} {:>14} {:>14} {:>5}",
        "#", "ID", "NAME", "TIER", "PRINCIPAL", "WEEKLY", "INTEREST", "WITHDRAWABLE", "WEEKS"
    )?;
    writeln!(out, "{}", "-".repeat(100))?;
    for row in rows {
        writeln!(
            out,
            "{:>2} {:<8} {:<16} {:<7} {:>14} {:>12} {:>14} {:>14} {:>5}",
            row.position,
            &row.id.simple().to_string()[..8],
            row.name,
            row.tier_name,
            format_naira(row.principal),
            format_naira(row.weekly_interest),
            format_naira(row.accumulated_interest),
            format_naira(row.withdrawable),
            row.weeks
        )?;
    }
    Ok(())
}

pub fn write_game_outcome<W: Write>(out: &mut W, outcome: &GameOutcome) -> Result<()> {
    writeln!(
        out,
        "Game returned {} on total principal {}",
        format_naira(outcome.game_return),
        format_naira(outcome.total_principal)
    )?;
    for payout in &outcome.payouts {
        writeln!(out, "  {:<16} +{}", payout.name, format_naira(payout.profit))?;
    }
    Ok(())
}

pub fn write_receipt<W: Write>(out: &mut W, receipt: &WithdrawalReceipt) -> Result<()> {
    writeln!(
        out,
        "{} withdrew {} and left the group.",
        receipt.name,
        format_naira(receipt.amount)
    )?;
    Ok(())
}
