use serde_json::json;
use tabled::Tabled;

use crate::api::AdminApi;
use crate::cli::{ConfirmedTarget, TeamListArgs, TeamTarget};
use crate::client::AdminClient;
use crate::console::{FetchOutcome, FilterCriteria, Pagination, TeamConsole};
use crate::error::{AdminError, Result};
use crate::output::{self, format_date, rupees, truncate, verified_colored};
use crate::types::{Team, TeamAction};

#[derive(Tabled)]
struct TeamRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "Team")]
    name: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "Department")]
    department: String,
    #[tabled(rename = "Leader")]
    leader: String,
    #[tabled(rename = "Size")]
    size: usize,
    #[tabled(rename = "Payment")]
    payment: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Status")]
    verified: String,
}

impl From<&Team> for TeamRow {
    fn from(team: &Team) -> Self {
        Self {
            id: team.id,
            name: truncate(&team.team_name, 30),
            event: team.event_id.colored(),
            department: truncate(&team.department, 20),
            leader: truncate(&team.leader_name, 24),
            size: team.member_count(),
            payment: team.payment.status.colored(),
            amount: if team.payment.amount > 0 {
                rupees(team.payment.amount)
            } else {
                "-".to_string()
            },
            verified: verified_colored(team.verified),
        }
    }
}

fn compact(team: &Team) -> String {
    format!(
        "{}\t{}\t{}\t{}\t{}",
        team.id,
        team.team_name,
        team.event_id,
        team.payment.status,
        if team.verified { "verified" } else { "unverified" }
    )
}

pub fn describe_filters(filters: &FilterCriteria) -> String {
    if filters.is_empty() {
        return "none".to_string();
    }

    let mut parts = Vec::new();
    if let Some(search) = &filters.search {
        parts.push(format!("search \"{search}\""));
    }
    if let Some(department) = &filters.department {
        parts.push(format!("department {department}"));
    }
    match filters.verified {
        Some(true) => parts.push("verified".to_string()),
        Some(false) => parts.push("unverified".to_string()),
        None => {}
    }
    if let Some(event) = filters.event {
        parts.push(format!("event {}", event.short_label()));
    }
    parts.join(", ")
}

pub fn pager_line(pagination: &Pagination, rows: usize) -> String {
    let showing = match pagination.showing(rows) {
        Some((first, last)) => format!("Showing {first}-{last} of {}", pagination.total),
        None => "No teams found".to_string(),
    };
    let prev = if pagination.has_prev() { "prev" } else { "----" };
    let next = if pagination.has_next() { "next" } else { "----" };
    format!(
        "{showing}  |  page {} of {}  [{prev}] [{next}]",
        pagination.page,
        pagination.total_pages.max(1)
    )
}

/// Print the visible page with its filter and pager lines.
pub fn render_page<A: AdminApi>(console: &TeamConsole<A>) {
    let teams = console.teams();
    let pagination = console.pagination();

    if output::is_json_output() {
        let payload = json!({
            "filters": console.filters(),
            "pagination": pagination,
            "teams": teams,
        });
        println!("{}", serde_json::to_string_pretty(&payload).unwrap_or_default());
        return;
    }

    println!("Filters: {}", describe_filters(console.filters()));
    if !teams.is_empty() {
        output::print_table(teams, |t| TeamRow::from(t), compact);
    }
    println!("{}", pager_line(pagination, teams.len()));
}

pub fn print_detail(team: &Team) {
    output::print_item(team, |team| {
        println!("#{} {}", team.id, team.team_name);
        println!();
        println!("Event:      {}", team.event_id.display_name());
        println!("Department: {}", team.department);
        println!("Year:       {}", team.year);
        println!("Status:     {}", verified_colored(team.verified));
        if let Some(registered) = &team.registered_at {
            println!("Registered: {}", format_date(registered));
        }
        println!();
        println!(
            "Leader:     {} <{}> {}",
            team.leader_name, team.leader_email, team.leader_phone
        );
        for (idx, member) in team.members().iter().enumerate() {
            println!(
                "Member {}:   {}{}",
                idx + 2,
                member.name,
                member.email.map(|e| format!(" <{e}>")).unwrap_or_default()
            );
        }
        println!();
        println!("Payment:    {}", team.payment.status.colored());
        if team.payment.amount > 0 {
            println!("Amount:     {}", rupees(team.payment.amount));
        }
        if let Some(txn) = &team.payment.transaction_id {
            println!("Txn ID:     {txn}");
        }
        if let Some(order) = &team.payment.order_id {
            println!("Order ID:   {order}");
        }
        if let Some(at) = &team.payment.verified_at {
            println!("Verified:   {}", format_date(at));
        }
        let actions: Vec<&str> = team
            .available_actions()
            .into_iter()
            .map(TeamAction::label)
            .collect();
        println!();
        println!("Actions:    {}", actions.join(", "));
    });
}

pub async fn list(client: AdminClient, args: TeamListArgs) -> Result<()> {
    let mut console = super::console(client, false).with_query(args.filters.criteria(), args.page);

    if console.fetch_teams().await != FetchOutcome::Applied {
        return Err(AdminError::Reported);
    }
    render_page(&console);

    Ok(())
}

pub async fn show(client: AdminClient, target: TeamTarget) -> Result<()> {
    let console = super::located(client, &target, false).await?;
    let team = console
        .team(target.id)
        .ok_or(AdminError::TeamNotFound(target.id))?;
    print_detail(team);
    Ok(())
}

pub async fn toggle_verification(client: AdminClient, target: TeamTarget) -> Result<()> {
    let mut console = super::located(client, &target, false).await?;
    super::finish(console.toggle_verification(target.id).await)
}

pub async fn delete(client: AdminClient, args: ConfirmedTarget) -> Result<()> {
    let mut console = super::located(client, &args.target, args.yes).await?;
    super::finish(console.delete_team(args.target.id).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::EventId;

    #[test]
    fn test_describe_filters() {
        assert_eq!(describe_filters(&FilterCriteria::default()), "none");
        let filters = FilterCriteria {
            search: Some("ink".to_string()),
            department: None,
            verified: Some(false),
            event: Some(EventId::AiBlitz),
        };
        assert_eq!(
            describe_filters(&filters),
            "search \"ink\", unverified, event AI Blitz"
        );
    }

    #[test]
    fn test_pager_line_marks_disabled_controls() {
        let first = Pagination {
            page: 1,
            total: 25,
            total_pages: 3,
            ..Default::default()
        };
        assert_eq!(
            pager_line(&first, 10),
            "Showing 1-10 of 25  |  page 1 of 3  [----] [next]"
        );

        let last = Pagination { page: 3, ..first };
        assert_eq!(
            pager_line(&last, 5),
            "Showing 21-25 of 25  |  page 3 of 3  [prev] [----]"
        );

        assert_eq!(
            pager_line(&Pagination::default(), 0),
            "No teams found  |  page 1 of 1  [----] [----]"
        );
    }
}
