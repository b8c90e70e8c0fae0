pub mod auth;
pub mod contacts;
pub mod export;
pub mod init;
pub mod payments;
pub mod shell;
pub mod stats;
pub mod teams;

use crate::cli::TeamTarget;
use crate::client::AdminClient;
use crate::confirm::{AssumeYes, Confirm, TerminalConfirm};
use crate::console::{FilterCriteria, Outcome, TeamConsole};
use crate::error::{AdminError, Result};
use crate::output::{self, TerminalNotifier};

/// Console wired to the terminal, for one-shot and interactive commands.
pub fn console(client: AdminClient, assume_yes: bool) -> TeamConsole<AdminClient> {
    let confirm: Box<dyn Confirm> = if assume_yes {
        Box::new(AssumeYes)
    } else {
        Box::new(TerminalConfirm)
    };
    TeamConsole::new(client, Box::new(TerminalNotifier), confirm)
}

/// Make the page holding the target team visible so row actions apply.
pub async fn located(
    client: AdminClient,
    target: &TeamTarget,
    assume_yes: bool,
) -> Result<TeamConsole<AdminClient>> {
    let filters = FilterCriteria {
        event: target.event,
        ..Default::default()
    };
    let mut console = console(client, assume_yes).with_query(filters, 1);
    console.locate(target.id).await?;
    Ok(console)
}

/// Map a console outcome onto the process result. Failures were already
/// shown as notifications.
pub fn finish(outcome: Outcome) -> Result<()> {
    match outcome {
        Outcome::Applied => Ok(()),
        Outcome::Cancelled => {
            output::print_message("Cancelled.");
            Ok(())
        }
        Outcome::Refused | Outcome::Failed => Err(AdminError::Reported),
    }
}
