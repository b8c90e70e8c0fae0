use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_complete::Shell;

use crate::console::FilterCriteria;
use crate::types::{EventId, TeamId};

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Compact,
}

#[derive(Parser)]
#[command(name = "teamadm")]
#[command(about = "Admin console for TEXPERIA event registrations", version)]
#[command(after_help = "EXAMPLES:
    teamadm login                          Sign in as an admin
    teamadm console                        Interactive team console
    teamadm teams --event comic-strip      List Comic Strip teams
    teamadm payment verify 42              Approve a pending payment
    teamadm export all                     Download every event as a ZIP")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (table, json, compact)
    #[arg(long, short = 'o', global = true, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Output as JSON (alias for --format json)
    #[arg(long, global = true, hide = true)]
    pub json: bool,

    /// Suppress success messages
    #[arg(long, short, global = true)]
    pub quiet: bool,

    /// Show debug logs and detailed error information
    #[arg(long, short, global = true)]
    pub verbose: bool,
}

impl Cli {
    /// Get the effective output format, considering --json flag
    pub fn output_format(&self) -> OutputFormat {
        if self.json {
            OutputFormat::Json
        } else {
            self.format
        }
    }
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the session
    #[command(after_help = "EXAMPLES:
    teamadm login
    teamadm login --email admin@texperia.example")]
    Login {
        /// Account email (defaults to `email` in config)
        #[arg(long, short)]
        email: Option<String>,
    },
    /// Forget the stored session
    Logout,
    /// Show the stored session and API endpoint
    Whoami,
    /// Interactive console: filter, page, and act on teams
    #[command(
        alias = "c",
        after_help = "EXAMPLES:
    teamadm console
    teamadm console --event ai-blitz --unverified"
    )]
    Console(TeamFilterArgs),
    /// List one page of teams (alias for 'team list')
    #[command(
        alias = "ls",
        after_help = "EXAMPLES:
    teamadm teams
    teamadm teams --search pixel --department CSE
    teamadm teams --event comic-strip --unverified --page 2"
    )]
    Teams(TeamListArgs),
    /// Manage teams
    #[command(
        alias = "t",
        after_help = "EXAMPLES:
    teamadm team show 42
    teamadm team verify 42
    teamadm team delete 42"
    )]
    Team {
        #[command(subcommand)]
        action: TeamCommands,
    },
    /// Verify or reject submitted payments
    #[command(
        alias = "p",
        after_help = "EXAMPLES:
    teamadm payment verify 42
    teamadm payment reject 42 --yes"
    )]
    Payment {
        #[command(subcommand)]
        action: PaymentCommands,
    },
    /// Dashboard statistics
    #[command(after_help = "EXAMPLES:
    teamadm stats
    teamadm stats events
    teamadm stats years --event prompt-idol")]
    Stats {
        #[command(subcommand)]
        view: Option<StatsCommands>,
    },
    /// Departments with team counts
    Departments,
    /// Download registrations as CSV
    #[command(after_help = "EXAMPLES:
    teamadm export csv --event comic-strip
    teamadm export all --out ./exports")]
    Export {
        #[command(subcommand)]
        kind: ExportCommands,
    },
    /// Contact form submissions
    #[command(after_help = "EXAMPLES:
    teamadm contacts list --unread
    teamadm contacts read 12")]
    Contacts {
        #[command(subcommand)]
        action: ContactCommands,
    },
    /// Generate shell completions
    #[command(after_help = "EXAMPLES:
    teamadm completions bash > ~/.bash_completion.d/teamadm
    teamadm completions zsh > ~/.zfunc/_teamadm
    teamadm completions fish > ~/.config/fish/completions/teamadm.fish")]
    Completions {
        /// Shell to generate completions for
        shell: Shell,
    },
    /// Initialize configuration file interactively
    Init,
}

#[derive(Subcommand)]
pub enum TeamCommands {
    /// List one page of teams
    #[command(alias = "ls")]
    List(TeamListArgs),
    /// Show a team's members and payment
    Show(TeamTarget),
    /// Toggle the team's verification flag
    Verify(TeamTarget),
    /// Delete a team with its payment and user account
    #[command(alias = "rm")]
    Delete(ConfirmedTarget),
}

#[derive(Subcommand)]
pub enum PaymentCommands {
    /// Approve a pending payment
    Verify(TeamTarget),
    /// Reject a pending payment
    Reject(ConfirmedTarget),
}

#[derive(Subcommand)]
pub enum StatsCommands {
    /// Totals across all events (default)
    Overview,
    /// One row per event
    Events,
    /// Teams per academic year
    Years {
        #[arg(long, value_enum)]
        event: Option<EventId>,
    },
    /// Verified revenue per day
    Revenue {
        #[arg(long, value_enum)]
        event: Option<EventId>,
    },
}

#[derive(Subcommand)]
pub enum ExportCommands {
    /// CSV of one event (or every team when no event is given)
    Csv {
        #[arg(long, value_enum)]
        event: Option<EventId>,
        /// Directory to save into (defaults to `export_dir` in config, then .)
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// ZIP with one CSV per event
    All {
        #[arg(long)]
        out: Option<PathBuf>,
    },
}

#[derive(Subcommand)]
pub enum ContactCommands {
    /// List submissions, newest first
    #[command(alias = "ls")]
    List {
        /// Only unread messages
        #[arg(long)]
        unread: bool,
    },
    /// Mark a submission as read
    Read { id: u64 },
}

#[derive(Args, Clone, Default)]
pub struct TeamFilterArgs {
    /// Match team name, leader name, or leader email
    #[arg(long, short)]
    pub search: Option<String>,

    /// Exact department
    #[arg(long, short)]
    pub department: Option<String>,

    /// Only verified teams
    #[arg(long, conflicts_with = "unverified")]
    pub verified: bool,

    /// Only teams not yet verified
    #[arg(long)]
    pub unverified: bool,

    /// Event track
    #[arg(long, short, value_enum)]
    pub event: Option<EventId>,
}

impl TeamFilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        let verified = match (self.verified, self.unverified) {
            (true, _) => Some(true),
            (_, true) => Some(false),
            _ => None,
        };
        FilterCriteria {
            search: FilterCriteria::text(self.search.clone()),
            department: FilterCriteria::text(self.department.clone()),
            verified,
            event: self.event,
        }
    }
}

#[derive(Args, Clone)]
pub struct TeamListArgs {
    #[command(flatten)]
    pub filters: TeamFilterArgs,

    /// Page number (1-based)
    #[arg(long, default_value = "1", value_parser = clap::value_parser!(u32).range(1..))]
    pub page: u32,
}

#[derive(Args, Clone)]
pub struct TeamTarget {
    /// Team ID
    pub id: TeamId,

    /// Narrow the lookup to one event
    #[arg(long, value_enum)]
    pub event: Option<EventId>,
}

#[derive(Args, Clone)]
pub struct ConfirmedTarget {
    #[command(flatten)]
    pub target: TeamTarget,

    /// Skip the confirmation prompt
    #[arg(long, short)]
    pub yes: bool,
}
