use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::io::Write;

use crate::application::{GameOutcome, GroupSummary, Ledger, WithdrawalReceipt};
use crate::domain::Member;

pub const SNAPSHOT_VERSION: &str = "1";

/// Point-in-time view of a session, for JSON export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupSnapshot {
    pub version: String,
    pub exported_at: DateTime<Utc>,
    pub summary: GroupSummary,
    pub members: Vec<Member>,
}

/// A scripted run: what happened along the way plus the group it left behind.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SimulationReport {
    pub weeks: u32,
    pub compound: bool,
    pub game: Option<GameOutcome>,
    pub withdrawals: Vec<WithdrawalReceipt>,
    pub group: GroupSnapshot,
}

/// Exporter for writing the current session to various formats.
pub struct Exporter<'a> {
    ledger: &'a Ledger,
}

impl<'a> Exporter<'a> {
    pub fn new(ledger: &'a Ledger) -> Self {
        Self { ledger }
    }

    pub fn snapshot(&self) -> GroupSnapshot {
        GroupSnapshot {
            version: SNAPSHOT_VERSION.to_string(),
            exported_at: Utc::now(),
            summary: self.ledger.summary(),
            members: self.ledger.members().to_vec(),
        }
    }

    /// Export active members to CSV format. Amounts are in kobo.
    pub fn export_members_csv<W: Write>(&self, writer: W) -> Result<usize> {
        let mut csv_writer = csv::Writer::from_writer(writer);

        csv_writer.write_record([
            "id",
            "name",
            "tier",
            "principal_kobo",
            "accumulated_interest_kobo",
            "weeks",
            "withdrawable_kobo",
            "joined_at",
        ])?;

        let mut count = 0;
        for member in self.ledger.members() {
            csv_writer.write_record(&[
                member.id.to_string(),
                member.name.clone(),
                member.tier.as_str().to_string(),
                member.principal.to_string(),
                member.accumulated_interest.to_string(),
                member.weeks.to_string(),
                member.withdrawable().to_string(),
                member.joined_at.to_rfc3339(),
            ])?;
            count += 1;
        }

        csv_writer.flush()?;
        Ok(count)
    }

    /// Export the full snapshot as pretty-printed JSON.
    pub fn export_json<W: Write>(&self, mut writer: W) -> Result<usize> {
        let snapshot = self.snapshot();
        serde_json::to_writer_pretty(&mut writer, &snapshot)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(snapshot.members.len())
    }

    /// Export a simulation report as pretty-printed JSON.
    pub fn export_simulation_json<W: Write>(
        &self,
        mut writer: W,
        weeks: u32,
        compound: bool,
        game: Option<GameOutcome>,
        withdrawals: Vec<WithdrawalReceipt>,
    ) -> Result<usize> {
        let report = SimulationReport {
            weeks,
            compound,
            game,
            withdrawals,
            group: self.snapshot(),
        };
        serde_json::to_writer_pretty(&mut writer, &report)?;
        writeln!(writer)?;
        writer.flush()?;
        Ok(report.group.members.len())
    }
}
