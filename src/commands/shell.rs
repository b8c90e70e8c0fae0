//! Interactive console: one command per line, re-rendering after each.

use std::io::{self, BufRead, Write};

use crate::api::AdminApi;
use crate::client::AdminClient;
use crate::config::Config;
use crate::console::{FilterCriteria, Notifier, TeamConsole};
use crate::error::{AdminError, Result};
use crate::output::{self, TerminalNotifier};
use crate::types::{EventId, TeamId};

use super::{stats, teams};

const HELP: &str = "\
Filters (each resets to page 1):
  search [text]         match team, leader name or email; no text clears
  dept [name]           exact department; no name clears
  verified yes|no|any   verification filter
  event <id>|all        comic_strip, prompt_idol, ai_blitz
  clear                 drop every filter
Paging:
  next | prev | page <n>
Rows:
  show <id>             team details
  verify <id>           toggle verification
  pay-verify <id>       approve a pending payment
  pay-reject <id>       reject a pending payment
  delete <id>           delete team, payment and account
Other:
  refresh | stats | export | export-all | help | quit";

#[derive(Debug, Clone, PartialEq)]
pub enum ShellCommand {
    Help,
    Search(Option<String>),
    Department(Option<String>),
    Verified(Option<bool>),
    Event(Option<EventId>),
    Clear,
    Next,
    Prev,
    Page(u32),
    Refresh,
    Stats,
    Show(TeamId),
    ToggleVerification(TeamId),
    VerifyPayment(TeamId),
    RejectPayment(TeamId),
    Delete(TeamId),
    Export,
    ExportAll,
    Quit,
}

/// Parse one input line. `Ok(None)` for a blank line.
pub fn parse(line: &str) -> std::result::Result<Option<ShellCommand>, String> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };
    let text = || (!rest.is_empty()).then(|| rest.to_string());

    let command = match word.to_ascii_lowercase().as_str() {
        "help" | "?" => ShellCommand::Help,
        "search" | "s" => ShellCommand::Search(text()),
        "dept" | "department" => ShellCommand::Department(text()),
        "verified" => ShellCommand::Verified(parse_verified(rest)?),
        "event" => ShellCommand::Event(parse_event(rest)?),
        "clear" => ShellCommand::Clear,
        "next" | "n" => ShellCommand::Next,
        "prev" | "p" => ShellCommand::Prev,
        "page" => ShellCommand::Page(parse_number(rest, "page")?),
        "refresh" | "r" => ShellCommand::Refresh,
        "stats" => ShellCommand::Stats,
        "show" => ShellCommand::Show(parse_number(rest, "team id")?),
        "verify" => ShellCommand::ToggleVerification(parse_number(rest, "team id")?),
        "pay-verify" => ShellCommand::VerifyPayment(parse_number(rest, "team id")?),
        "pay-reject" => ShellCommand::RejectPayment(parse_number(rest, "team id")?),
        "delete" | "rm" => ShellCommand::Delete(parse_number(rest, "team id")?),
        "export" => ShellCommand::Export,
        "export-all" => ShellCommand::ExportAll,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        other => return Err(format!("Unknown command '{other}'. Type 'help' for commands.")),
    };

    Ok(Some(command))
}

fn parse_verified(arg: &str) -> std::result::Result<Option<bool>, String> {
    match arg.to_ascii_lowercase().as_str() {
        "" | "any" | "all" => Ok(None),
        "yes" | "true" | "verified" => Ok(Some(true)),
        "no" | "false" | "pending" | "unverified" => Ok(Some(false)),
        other => Err(format!("Expected yes, no or any, got '{other}'")),
    }
}

fn parse_event(arg: &str) -> std::result::Result<Option<EventId>, String> {
    if arg.is_empty() || arg.eq_ignore_ascii_case("all") {
        return Ok(None);
    }
    EventId::parse(arg)
        .map(Some)
        .ok_or_else(|| format!("Unknown event '{arg}'"))
}

fn parse_number<T: std::str::FromStr>(arg: &str, what: &str) -> std::result::Result<T, String> {
    arg.parse()
        .map_err(|_| format!("Expected a {what}, got '{arg}'"))
}

fn render<A: AdminApi>(console: &TeamConsole<A>, with_stats: bool) {
    if with_stats && !output::is_json_output() {
        if let Some(stats) = console.stats() {
            println!("{}", stats::cards(stats));
        }
        if !console.event_stats().is_empty() {
            stats::print_events(console.event_stats());
        }
    }
    teams::render_page(console);
}

pub async fn run(client: AdminClient, config: &Config, filters: FilterCriteria) -> Result<()> {
    let export_dir = config.resolve_export_dir(None);
    let mut console = super::console(client, false).with_query(filters, 1);

    console.load().await;
    render(&console, true);
    if !console.departments().is_empty() {
        let names: Vec<String> = console
            .departments()
            .iter()
            .map(|d| format!("{} ({})", d.department, d.count))
            .collect();
        println!("Departments: {}", names.join(", "));
    }
    println!("Type 'help' for commands.");

    let stdin = io::stdin();
    loop {
        if console.is_signed_out() {
            return Err(AdminError::Reported);
        }

        print!("teamadm> ");
        io::stdout().flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        let command = match parse(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(message) => {
                TerminalNotifier.error(&message);
                continue;
            }
        };

        match command {
            ShellCommand::Help => println!("{HELP}"),
            ShellCommand::Quit => break,
            ShellCommand::Search(text) => {
                console.set_search(text).await;
                render(&console, false);
            }
            ShellCommand::Department(name) => {
                console.set_department(name).await;
                render(&console, false);
            }
            ShellCommand::Verified(verified) => {
                console.set_verified(verified).await;
                render(&console, false);
            }
            ShellCommand::Event(event) => {
                console.set_event(event).await;
                render(&console, false);
            }
            ShellCommand::Clear => {
                console.clear_filters().await;
                render(&console, false);
            }
            ShellCommand::Next => match console.next_page().await {
                Some(_) => render(&console, false),
                None => TerminalNotifier.error("Already on the last page"),
            },
            ShellCommand::Prev => match console.prev_page().await {
                Some(_) => render(&console, false),
                None => TerminalNotifier.error("Already on the first page"),
            },
            ShellCommand::Page(page) => {
                console.go_to_page(page).await;
                render(&console, false);
            }
            ShellCommand::Refresh => {
                console.refresh().await;
                render(&console, true);
            }
            ShellCommand::Stats => {
                console.refresh_stats().await;
                if let Some(stats) = console.stats() {
                    stats::print_overview(stats);
                }
            }
            ShellCommand::Show(id) => match console.team(id) {
                Some(team) => teams::print_detail(team),
                None => TerminalNotifier.error(&AdminError::TeamNotVisible(id).to_string()),
            },
            ShellCommand::ToggleVerification(id) => {
                console.toggle_verification(id).await;
                render(&console, true);
            }
            ShellCommand::VerifyPayment(id) => {
                console.verify_payment(id).await;
                render(&console, true);
            }
            ShellCommand::RejectPayment(id) => {
                console.reject_payment(id).await;
                render(&console, true);
            }
            ShellCommand::Delete(id) => {
                console.delete_team(id).await;
                render(&console, true);
            }
            ShellCommand::Export => {
                console.export_filtered(&export_dir).await;
            }
            ShellCommand::ExportAll => {
                console.export_all(&export_dir).await;
            }
        }
    }

    Ok(())
}
