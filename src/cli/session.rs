use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::fs::File;
use std::io::{BufRead, BufWriter, Write};
use tracing::debug;

use crate::application::Ledger;
use crate::domain::{Kobo, TierKey, format_naira};
use crate::io::Exporter;

use super::{write_dashboard, write_game_outcome, write_receipt, write_tiers, write_totals};

/// One line of input in an interactive session.
#[derive(Parser, Debug)]
#[command(name = "ajo", no_binary_name = true, disable_version_flag = true)]
pub struct SessionLine {
    #[command(subcommand)]
    pub command: SessionCommand,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum SessionCommand {
    /// Register a member
    #[command(alias = "register")]
    Add {
        /// Member name (quote names containing spaces)
        #[arg(required = true, num_args = 1..)]
        name: Vec<String>,

        /// Tier: tier1, tier2, tier3
        #[arg(short, long, default_value = "tier1")]
        tier: String,
    },

    /// Accrue weekly interest for every member
    Week {
        /// Number of weeks to run
        #[arg(default_value = "1")]
        count: u32,

        /// Compound this run even if the session toggle is off
        #[arg(long)]
        compound: bool,
    },

    /// Turn weekly compounding on or off for later `week` commands
    Compound {
        /// on or off
        state: String,
    },

    /// Run the group game (20% on total principal)
    #[command(alias = "play")]
    Game,

    /// Withdraw a member by name or id
    Withdraw {
        #[arg(required = true, num_args = 1..)]
        member: Vec<String>,
    },

    /// Show the dashboard
    #[command(alias = "ls")]
    List,

    /// Show group totals
    Totals,

    /// Show the contribution tiers
    Tiers,

    /// Export the session: csv or json
    Export {
        format: String,

        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
    },

    /// Leave the session
    #[command(alias = "exit")]
    Quit,
}

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Quit,
}

/// An interactive session. Owns the ledger for its whole lifetime.
#[derive(Debug, Default)]
pub struct Session {
    ledger: Ledger,
    compound: bool,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    pub fn compound(&self) -> bool {
        self.compound
    }

    /// Read commands until end of input or `quit`. Errors from individual
    /// commands are reported and the session carries on.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut out: W, interactive: bool) -> Result<()> {
        if interactive {
            writeln!(out, "Ajo savings group. Type 'help' for commands.")?;
        }

        let mut lines = input.lines();
        loop {
            if interactive {
                write!(out, "ajo> ")?;
                out.flush()?;
            }

            let Some(line) = lines.next() else {
                break;
            };
            let line = line.context("Failed to read input")?;

            match self.execute_line(&line, &mut out) {
                Ok(Flow::Quit) => break,
                Ok(Flow::Continue) => {}
                Err(err) => writeln!(out, "Error: {:#}", err)?,
            }
        }

        out.flush()?;
        Ok(())
    }

    /// Parse and run a single input line. Blank lines and `#` comments are ignored.
    pub fn execute_line<W: Write>(&mut self, line: &str, out: &mut W) -> Result<Flow> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(Flow::Continue);
        }

        let tokens = split_args(line)?;
        let parsed = match SessionLine::try_parse_from(tokens) {
            Ok(parsed) => parsed,
            Err(err) => {
                // Help and usage errors are both just printed
                write!(out, "{}", err.render())?;
                return Ok(Flow::Continue);
            }
        };

        debug!(command = ?parsed.command, "session command");
        self.execute(parsed.command, out)
    }

    pub fn execute<W: Write>(&mut self, command: SessionCommand, out: &mut W) -> Result<Flow> {
        match command {
            SessionCommand::Add { name, tier } => {
                let tier = TierKey::from_str(&tier).with_context(|| {
                    format!("Invalid tier '{}'. Use tier1, tier2 or tier3", tier)
                })?;
                let member = self.ledger.register(&name.join(" "), tier)?;
                writeln!(
                    out,
                    "Added {} ({}, {}) [{}]",
                    member.name,
                    member.tier_info().name,
                    format_naira(member.principal),
                    member.short_id()
                )?;
            }

            SessionCommand::Week { count, compound } => {
                let compound = compound || self.compound;
                let mut total: Kobo = 0;
                for _ in 0..count {
                    total = self.ledger.accrue_week(compound).total_interest.saturating_add(total);
                }
                writeln!(
                    out,
                    "Simulated {} week(s): {} interest {}",
                    count,
                    format_naira(total),
                    if compound { "compounded into principal" } else { "accrued" }
                )?;
            }

            SessionCommand::Compound { state } => {
                self.compound = match state.to_lowercase().as_str() {
                    "on" | "true" | "yes" => true,
                    "off" | "false" | "no" => false,
                    _ => bail!("Invalid compound state '{}'. Use on or off", state),
                };
                writeln!(
                    out,
                    "Compounding {}",
                    if self.compound { "on" } else { "off" }
                )?;
            }

            SessionCommand::Game => {
                let outcome = self.ledger.distribute_game_profit()?;
                write_game_outcome(out, &outcome)?;
            }

            SessionCommand::Withdraw { member } => {
                let id = self.ledger.find(&member.join(" "))?.id;
                let receipt = self.ledger.withdraw(id)?;
                write_receipt(out, &receipt)?;
            }

            SessionCommand::List => write_dashboard(out, &self.ledger)?,

            SessionCommand::Totals => write_totals(out, &self.ledger)?,

            SessionCommand::Tiers => write_tiers(out)?,

            SessionCommand::Export { format, output } => {
                self.export(&format, output.as_deref(), out)?;
            }

            SessionCommand::Quit => return Ok(Flow::Quit),
        }

        Ok(Flow::Continue)
    }

    fn export<W: Write>(&self, format: &str, output: Option<&str>, out: &mut W) -> Result<()> {
        let exporter = Exporter::new(&self.ledger);

        match output {
            Some(path) => {
                let file = File::create(path)
                    .with_context(|| format!("Failed to create file: {}", path))?;
                let writer = BufWriter::new(file);
                let count = match format {
                    "csv" => exporter.export_members_csv(writer)?,
                    "json" => exporter.export_json(writer)?,
                    _ => bail!("Invalid export format '{}'. Use csv or json", format),
                };
                writeln!(out, "Exported {} member(s) to {}", count, path)?;
            }
            None => {
                match format {
                    "csv" => exporter.export_members_csv(&mut *out)?,
                    "json" => exporter.export_json(&mut *out)?,
                    _ => bail!("Invalid export format '{}'. Use csv or json", format),
                };
            }
        }

        Ok(())
    }
}

/// Split a command line into words, honouring double quotes.
pub fn split_args(line: &str) -> Result<Vec<String>> {
    let mut args = Vec::new();
    let mut current = String::new();
    let mut in_quotes = false;
    let mut has_token = false;

    for ch in line.chars() {
        match ch {
            '"' => {
                in_quotes = !in_quotes;
                has_token = true;
            }
            c if c.is_whitespace() && !in_quotes => {
                if has_token {
                    args.push(std::mem::take(&mut current));
                    has_token = false;
                }
            }
            c => {
                current.push(c);
                has_token = true;
            }
        }
    }

    if in_quotes {
        bail!("Unterminated quote");
    }
    if has_token {
        args.push(current);
    }
    Ok(args)
}
