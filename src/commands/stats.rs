use colored::Colorize;
use serde::Serialize;
use tabled::Tabled;

use crate::api::AdminApi;
use crate::cli::StatsCommands;
use crate::client::AdminClient;
use crate::error::Result;
use crate::output::{self, rupees};
use crate::types::{DashboardStats, DepartmentCount, EventStats, RevenuePoint, YearCount};

#[derive(Tabled)]
struct EventRow {
    #[tabled(rename = "Event")]
    name: String,
    #[tabled(rename = "Teams")]
    teams: u64,
    #[tabled(rename = "Verified")]
    verified: u64,
    #[tabled(rename = "Revenue")]
    revenue: String,
    #[tabled(rename = "Pending")]
    pending: u64,
}

impl From<&EventStats> for EventRow {
    fn from(stats: &EventStats) -> Self {
        Self {
            name: stats.event_name.clone(),
            teams: stats.total_teams,
            verified: stats.verified_teams,
            revenue: rupees(stats.total_revenue),
            pending: stats.pending_payments,
        }
    }
}

#[derive(Tabled)]
struct CountRow {
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Teams")]
    count: u64,
}

#[derive(Tabled)]
struct RevenueRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Revenue")]
    amount: String,
    #[tabled(rename = "Payments")]
    count: u64,
}

/// One line of summary cards.
pub fn cards(stats: &DashboardStats) -> String {
    format!(
        "Teams {}  Verified {}  Revenue {}  Pending payments {}",
        stats.total_teams.to_string().cyan().bold(),
        stats.verified_teams.to_string().green().bold(),
        rupees(stats.total_revenue).yellow().bold(),
        stats.pending_payments.to_string().magenta().bold(),
    )
}

pub fn print_events(events: &[EventStats]) {
    output::print_table(events, |e| EventRow::from(e), |e| {
        format!(
            "{}\t{}\t{}\t{}\t{}",
            e.event_id, e.total_teams, e.verified_teams, e.total_revenue, e.pending_payments
        )
    });
}

pub fn print_overview(stats: &DashboardStats) {
    output::print_item(stats, |stats| {
        println!("{}", cards(stats));
        if !stats.departments.is_empty() {
            println!();
            let rows: Vec<DepartmentCount> = stats
                .departments
                .iter()
                .map(|(department, count)| DepartmentCount {
                    department: department.clone(),
                    count: *count,
                })
                .collect();
            print_counts(&rows, |d| (d.department.clone(), d.count));
        }
    });
}

fn print_counts<T: Serialize>(items: &[T], split: impl Fn(&T) -> (String, u64)) {
    output::print_table(
        items,
        |item| {
            let (name, count) = split(item);
            CountRow { name, count }
        },
        |item| {
            let (name, count) = split(item);
            format!("{name}\t{count}")
        },
    );
}

pub async fn run(client: AdminClient, view: Option<StatsCommands>) -> Result<()> {
    match view.unwrap_or(StatsCommands::Overview) {
        StatsCommands::Overview => {
            let stats = client.stats().await?;
            print_overview(&stats);
        }
        StatsCommands::Events => {
            let events = client.event_stats().await?;
            print_events(&events);
        }
        StatsCommands::Years { event } => {
            let years: Vec<YearCount> = client.year_stats(event).await?;
            print_counts(&years, |y| (y.year.clone(), y.count));
        }
        StatsCommands::Revenue { event } => {
            let points: Vec<RevenuePoint> = client.revenue_chart(event).await?;
            if points.is_empty() {
                output::print_message("No verified payments yet");
                return Ok(());
            }
            output::print_table(
                &points,
                |p| RevenueRow {
                    date: p.date.clone(),
                    amount: rupees(p.amount),
                    count: p.count,
                },
                |p| format!("{}\t{}\t{}", p.date, p.amount, p.count),
            );
        }
    }

    Ok(())
}

pub async fn departments(client: AdminClient) -> Result<()> {
    let departments = client.departments().await?;
    print_counts(&departments, |d| (d.department.clone(), d.count));
    Ok(())
}
