//! View-model behind the admin team screen.
//!
//! Holds the filter set and page cursor, keeps the visible page in sync with
//! the server, and runs row mutations. After every successful mutation the
//! list and both statistics reads are fetched again; nothing is patched
//! locally because the summary figures are aggregated server-side over the
//! whole record set.

mod query;
mod sequence;

use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::api::AdminApi;
use crate::confirm::Confirm;
use crate::error::{AdminError, Result};
use crate::export::{self, ExportKind};
use crate::types::{
    DashboardStats, DepartmentCount, EventId, EventStats, Team, TeamAction, TeamId, TeamPage,
};

pub use query::{FilterCriteria, Pagination, TeamQuery};
pub use sequence::{FetchSequence, FetchTicket};

/// Transient user-facing messages.
pub trait Notifier {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Applied,
    /// A newer request was issued after this one; the response was dropped.
    Stale,
    /// The previous page stays visible.
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Applied,
    Cancelled,
    /// Not sent: the row is not visible or the action is not offered for it.
    Refused,
    Failed,
}

pub struct TeamConsole<A> {
    api: A,
    notifier: Box<dyn Notifier>,
    confirm: Box<dyn Confirm>,
    filters: FilterCriteria,
    pagination: Pagination,
    teams: Vec<Team>,
    stats: Option<DashboardStats>,
    event_stats: Vec<EventStats>,
    departments: Vec<DepartmentCount>,
    sequence: FetchSequence,
    /// Query behind the visible rows; `None` until a page has loaded.
    applied: Option<TeamQuery>,
    signed_out: bool,
}

impl<A: AdminApi> TeamConsole<A> {
    pub fn new(api: A, notifier: Box<dyn Notifier>, confirm: Box<dyn Confirm>) -> Self {
        Self {
            api,
            notifier,
            confirm,
            filters: FilterCriteria::default(),
            pagination: Pagination::default(),
            teams: Vec::new(),
            stats: None,
            event_stats: Vec::new(),
            departments: Vec::new(),
            sequence: FetchSequence::default(),
            applied: None,
            signed_out: false,
        }
    }

    /// Start from the given filters and page without fetching anything.
    pub fn with_query(mut self, filters: FilterCriteria, page: u32) -> Self {
        self.filters = filters;
        self.pagination.page = page.max(1);
        self
    }

    #[cfg(test)]
    pub fn api(&self) -> &A {
        &self.api
    }

    pub fn filters(&self) -> &FilterCriteria {
        &self.filters
    }

    pub fn pagination(&self) -> &Pagination {
        &self.pagination
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn team(&self, id: TeamId) -> Option<&Team> {
        self.teams.iter().find(|t| t.id == id)
    }

    pub fn stats(&self) -> Option<&DashboardStats> {
        self.stats.as_ref()
    }

    pub fn event_stats(&self) -> &[EventStats] {
        &self.event_stats
    }

    pub fn departments(&self) -> &[DepartmentCount] {
        &self.departments
    }

    /// Set once any request came back 401; the stored session is gone.
    pub fn is_signed_out(&self) -> bool {
        self.signed_out
    }

    /// The request the current filters and cursor describe.
    pub fn query(&self) -> TeamQuery {
        TeamQuery::new(self.filters.clone(), self.pagination.page)
    }

    /// First load: list, both statistics reads, and the department options.
    pub async fn load(&mut self) {
        let ticket = self.begin_fetch();
        let (teams, stats, events, departments) = tokio::join!(
            self.api.teams(ticket.query()),
            self.api.stats(),
            self.api.event_stats(),
            self.api.departments(),
        );
        let outcome = self.finish_fetch(&ticket, teams);
        self.apply_stats(stats, events);
        match departments {
            Ok(departments) => self.departments = departments,
            Err(e) => self.swallow("departments", e),
        }
        self.settle(outcome).await;
    }

    /// Re-read the current page and both statistics endpoints.
    pub async fn refresh(&mut self) {
        let ticket = self.begin_fetch();
        let (teams, stats, events) = tokio::join!(
            self.api.teams(ticket.query()),
            self.api.stats(),
            self.api.event_stats(),
        );
        let outcome = self.finish_fetch(&ticket, teams);
        self.apply_stats(stats, events);
        self.settle(outcome).await;
    }

    pub async fn refresh_stats(&mut self) {
        let (stats, events) = tokio::join!(self.api.stats(), self.api.event_stats());
        self.apply_stats(stats, events);
    }

    pub async fn fetch_teams(&mut self) -> FetchOutcome {
        let outcome = self.fetch_page().await;
        self.settle(outcome).await
    }

    async fn fetch_page(&mut self) -> FetchOutcome {
        let ticket = self.begin_fetch();
        let result = self.api.teams(ticket.query()).await;
        self.finish_fetch(&ticket, result)
    }

    /// Pull the cursor back onto the last page when the list shrank under it,
    /// e.g. after deleting the only row of the last page.
    async fn settle(&mut self, outcome: FetchOutcome) -> FetchOutcome {
        if outcome != FetchOutcome::Applied || !self.pagination.past_end() {
            return outcome;
        }
        debug!(
            page = self.pagination.page,
            total_pages = self.pagination.total_pages,
            "cursor past the last page"
        );
        self.pagination.page = self.pagination.total_pages;
        self.fetch_page().await
    }

    /// Snapshot the current query under a fresh sequence number.
    pub fn begin_fetch(&mut self) -> FetchTicket {
        let query = self.query();
        let ticket = self.sequence.issue(query);
        debug!(seq = ticket.seq(), query = %ticket.query().encode(), "fetching teams");
        ticket
    }

    /// Apply a list response if it answers the latest request.
    pub fn finish_fetch(&mut self, ticket: &FetchTicket, result: Result<TeamPage>) -> FetchOutcome {
        if !self.sequence.is_latest(ticket) {
            debug!(seq = ticket.seq(), "discarding stale team list response");
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                self.pagination.absorb(&page);
                self.teams = page.teams;
                self.applied = Some(ticket.query().clone());
                FetchOutcome::Applied
            }
            Err(e) => {
                // Cursor and filters go back to what the visible rows show.
                if let Some(applied) = &self.applied {
                    self.filters = applied.filters.clone();
                    self.pagination.page = applied.page;
                }
                self.report("Failed to load teams", &e);
                FetchOutcome::Failed
            }
        }
    }

    fn apply_stats(&mut self, stats: Result<DashboardStats>, events: Result<Vec<EventStats>>) {
        match stats {
            Ok(stats) => self.stats = Some(stats),
            Err(e) => self.report("Failed to load statistics", &e),
        }
        match events {
            Ok(events) => self.event_stats = events,
            Err(e) => self.swallow("event statistics", e),
        }
    }

    pub async fn set_search(&mut self, search: Option<String>) -> FetchOutcome {
        self.filters.search = FilterCriteria::text(search);
        self.filters_changed().await
    }

    pub async fn set_department(&mut self, department: Option<String>) -> FetchOutcome {
        self.filters.department = FilterCriteria::text(department);
        self.filters_changed().await
    }

    pub async fn set_verified(&mut self, verified: Option<bool>) -> FetchOutcome {
        self.filters.verified = verified;
        self.filters_changed().await
    }

    pub async fn set_event(&mut self, event: Option<EventId>) -> FetchOutcome {
        self.filters.event = event;
        self.filters_changed().await
    }

    pub async fn clear_filters(&mut self) -> FetchOutcome {
        self.filters = FilterCriteria::default();
        self.filters_changed().await
    }

    async fn filters_changed(&mut self) -> FetchOutcome {
        self.pagination.page = 1;
        self.fetch_teams().await
    }

    /// `None` when there is no next page.
    pub async fn next_page(&mut self) -> Option<FetchOutcome> {
        if !self.pagination.has_next() {
            return None;
        }
        self.pagination.page += 1;
        Some(self.fetch_teams().await)
    }

    /// `None` when already on the first page.
    pub async fn prev_page(&mut self) -> Option<FetchOutcome> {
        if !self.pagination.has_prev() {
            return None;
        }
        self.pagination.page -= 1;
        Some(self.fetch_teams().await)
    }

    /// Jump to a page, clamped to the known range once data has loaded.
    pub async fn go_to_page(&mut self, page: u32) -> FetchOutcome {
        self.pagination.page = if self.applied.is_some() {
            page.clamp(1, self.pagination.total_pages.max(1))
        } else {
            page.max(1)
        };
        self.fetch_teams().await
    }

    /// Walk the filtered list until the page holding `id` is found and make
    /// it the visible page.
    pub async fn locate(&mut self, id: TeamId) -> Result<()> {
        let mut page = 1;
        loop {
            let ticket = self.sequence.issue(TeamQuery::new(self.filters.clone(), page));
            let result = self.api.teams(ticket.query()).await?;

            if result.teams.iter().any(|t| t.id == id) {
                self.pagination.page = page;
                self.pagination.absorb(&result);
                self.teams = result.teams;
                self.applied = Some(ticket.query().clone());
                return Ok(());
            }

            if page >= result.total_pages {
                return Err(AdminError::TeamNotFound(id));
            }
            page += 1;
        }
    }

    pub async fn toggle_verification(&mut self, id: TeamId) -> Outcome {
        let Some(team) = self.target(id, TeamAction::ToggleVerification) else {
            return Outcome::Refused;
        };

        let result = self.api.toggle_verification(id).await;
        self.after_mutation(
            result,
            format!("Verification updated for \"{}\"", team.team_name),
            "Failed to update verification",
        )
        .await
    }

    pub async fn verify_payment(&mut self, id: TeamId) -> Outcome {
        let Some(team) = self.target(id, TeamAction::VerifyPayment) else {
            return Outcome::Refused;
        };

        let result = self.api.verify_payment(id).await;
        self.after_mutation(
            result,
            format!("Payment verified for \"{}\"", team.team_name),
            "Failed to verify payment",
        )
        .await
    }

    pub async fn reject_payment(&mut self, id: TeamId) -> Outcome {
        let Some(team) = self.target(id, TeamAction::RejectPayment) else {
            return Outcome::Refused;
        };

        let prompt = format!("Reject the payment from team \"{}\"?", team.team_name);
        if let Some(stop) = self.ask(&prompt) {
            return stop;
        }

        let result = self.api.reject_payment(id).await;
        self.after_mutation(
            result,
            format!("Payment rejected for \"{}\"", team.team_name),
            "Failed to reject payment",
        )
        .await
    }

    pub async fn delete_team(&mut self, id: TeamId) -> Outcome {
        let Some(team) = self.target(id, TeamAction::Delete) else {
            return Outcome::Refused;
        };

        let prompt = format!(
            "Delete team \"{}\"? This permanently removes the team, its payment and the user account. This cannot be undone.",
            team.team_name
        );
        if let Some(stop) = self.ask(&prompt) {
            return stop;
        }

        let result = self.api.delete_team(id).await;
        self.after_mutation(
            result,
            format!("Team \"{}\" deleted", team.team_name),
            "Failed to delete team",
        )
        .await
    }

    /// CSV of the teams in the selected event. Other filters do not apply.
    pub async fn export_filtered(&mut self, dir: &Path) -> Option<PathBuf> {
        let event = self.filters.event;
        let result = match self.api.export_csv(event).await {
            Ok(bytes) => export::save(dir, ExportKind::Filtered(event), &bytes),
            Err(e) => Err(e),
        };
        self.finish_export(result, "CSV exported", "Failed to export CSV")
    }

    pub async fn export_all(&mut self, dir: &Path) -> Option<PathBuf> {
        let result = match self.api.export_all().await {
            Ok(bytes) => export::save(dir, ExportKind::AllEvents, &bytes),
            Err(e) => Err(e),
        };
        self.finish_export(
            result,
            "All event CSVs exported as ZIP",
            "Failed to export all CSVs",
        )
    }

    fn finish_export(&mut self, result: Result<PathBuf>, success: &str, failure: &str) -> Option<PathBuf> {
        match result {
            Ok(path) => {
                self.notifier
                    .success(&format!("{success}: {}", path.display()));
                Some(path)
            }
            Err(e) => {
                self.report(failure, &e);
                None
            }
        }
    }

    /// The visible row for `id`, if it offers `action`.
    fn target(&self, id: TeamId, action: TeamAction) -> Option<Team> {
        let refusal = match self.team(id) {
            Some(team) if team.allows(action) => return Some(team.clone()),
            Some(_) => AdminError::ActionUnavailable { id, action },
            None => AdminError::TeamNotVisible(id),
        };
        self.notifier.error(&refusal.to_string());
        None
    }

    /// Run the confirmation gate. `Some` means stop with that outcome.
    fn ask(&mut self, prompt: &str) -> Option<Outcome> {
        match self.confirm.confirm(prompt) {
            Ok(true) => None,
            Ok(false) => {
                debug!("confirmation declined");
                Some(Outcome::Cancelled)
            }
            Err(e) => {
                self.report("Confirmation failed", &e);
                Some(Outcome::Failed)
            }
        }
    }

    async fn after_mutation(&mut self, result: Result<()>, success: String, failure: &str) -> Outcome {
        match result {
            Ok(()) => {
                info!("{success}");
                self.notifier.success(&success);
                self.refresh().await;
                Outcome::Applied
            }
            Err(e) => {
                self.report(failure, &e);
                Outcome::Failed
            }
        }
    }

    fn report(&mut self, context: &str, error: &AdminError) {
        if error.is_auth_failure() {
            self.signed_out = true;
            self.notifier.error(&error.to_string());
        } else {
            self.notifier.error(&format!("{context}: {error}"));
        }
    }

    /// Secondary reads fail quietly unless the session is gone.
    fn swallow(&mut self, what: &str, error: AdminError) {
        if error.is_auth_failure() {
            self.report(what, &error);
        } else {
            warn!(error = %error, "failed to load {what}");
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fake::{Call, FakeApi, RecordingNotifier};
    use super::*;
    use crate::confirm::scripted::ScriptedConfirm;
    use crate::types::fixtures::team;
    use crate::types::payment::PaymentStatus;

    struct Harness {
        console: TeamConsole<FakeApi>,
        notifier: RecordingNotifier,
        confirm: ScriptedConfirm,
    }

    fn harness(teams: Vec<Team>, answers: &[bool]) -> Harness {
        let notifier = RecordingNotifier::default();
        let confirm = ScriptedConfirm::answering(answers);
        let console = TeamConsole::new(
            FakeApi::with_teams(teams),
            Box::new(notifier.clone()),
            Box::new(confirm.clone()),
        );
        Harness {
            console,
            notifier,
            confirm,
        }
    }

    fn many(count: u64) -> Vec<Team> {
        (1..=count).map(|id| team(id, PaymentStatus::Pending)).collect()
    }

    fn refetched_everything(calls: &[Call]) -> bool {
        calls.iter().any(|c| matches!(c, Call::Teams(_)))
            && calls.contains(&Call::Stats)
            && calls.contains(&Call::EventStats)
    }

    #[tokio::test]
    async fn test_load_fetches_list_stats_and_departments() {
        let mut h = harness(many(25), &[]);
        h.console.load().await;

        let calls = h.console.api().calls();
        assert!(calls.contains(&Call::Teams("page=1&limit=10".to_string())));
        assert!(calls.contains(&Call::Stats));
        assert!(calls.contains(&Call::EventStats));
        assert!(calls.contains(&Call::Departments));

        assert_eq!(h.console.teams().len(), 10);
        assert_eq!(h.console.pagination().total, 25);
        assert_eq!(h.console.pagination().total_pages, 3);
        assert_eq!(h.console.stats().map(|s| s.total_teams), Some(25));
        assert_eq!(h.console.departments().len(), 1);
    }

    #[tokio::test]
    async fn test_filter_change_resets_page() {
        let mut h = harness(many(25), &[]);
        h.console.load().await;
        h.console.next_page().await;
        h.console.next_page().await;
        assert_eq!(h.console.pagination().page, 3);

        h.console.set_search(Some("Team".to_string())).await;
        assert_eq!(h.console.pagination().page, 1);

        h.console.go_to_page(2).await;
        h.console.set_department(Some("CSE".to_string())).await;
        assert_eq!(h.console.pagination().page, 1);

        h.console.go_to_page(2).await;
        h.console.set_verified(Some(false)).await;
        assert_eq!(h.console.pagination().page, 1);

        h.console.go_to_page(2).await;
        h.console.set_event(Some(EventId::ComicStrip)).await;
        assert_eq!(h.console.pagination().page, 1);

        assert_eq!(
            h.console.api().calls().last(),
            Some(&Call::Teams(
                "search=Team&department=CSE&verified=false&event_id=comic_strip&page=1&limit=10"
                    .to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_page_change_keeps_filters() {
        let mut h = harness(many(25), &[]);
        h.console.set_verified(Some(false)).await;
        h.console.set_event(Some(EventId::ComicStrip)).await;
        h.console.next_page().await;

        assert_eq!(h.console.filters().verified, Some(false));
        assert_eq!(h.console.filters().event, Some(EventId::ComicStrip));
        assert_eq!(
            h.console.api().calls().last(),
            Some(&Call::Teams(
                "verified=false&event_id=comic_strip&page=2&limit=10".to_string()
            ))
        );
    }

    #[tokio::test]
    async fn test_navigation_stops_at_bounds() {
        let mut h = harness(many(25), &[]);
        h.console.load().await;

        assert_eq!(h.console.prev_page().await, None);
        assert!(h.console.next_page().await.is_some());
        assert!(h.console.next_page().await.is_some());
        assert_eq!(h.console.pagination().page, 3);
        assert_eq!(h.console.next_page().await, None);
        assert_eq!(h.console.teams().len(), 5);
    }

    #[tokio::test]
    async fn test_go_to_page_clamps_after_load() {
        let mut h = harness(many(25), &[]);
        h.console.load().await;
        h.console.go_to_page(99).await;
        assert_eq!(h.console.pagination().page, 3);
        h.console.go_to_page(0).await;
        assert_eq!(h.console.pagination().page, 1);
    }

    #[tokio::test]
    async fn test_stale_response_is_discarded() {
        let mut h = harness(many(25), &[]);
        h.console.load().await;

        let older = h.console.begin_fetch();
        h.console.go_to_page(2).await;
        let newer_ids: Vec<_> = h.console.teams().iter().map(|t| t.id).collect();

        let late = h.console.api().page(older.query());
        assert_eq!(h.console.finish_fetch(&older, Ok(late)), FetchOutcome::Stale);
        let ids: Vec<_> = h.console.teams().iter().map(|t| t.id).collect();
        assert_eq!(ids, newer_ids);
        assert_eq!(ids.first(), Some(&11));
    }

    #[tokio::test]
    async fn test_out_of_order_resolution_keeps_latest() {
        let mut h = harness(many(25), &[]);
        let first = h.console.begin_fetch();
        let second = h.console.begin_fetch();

        let mut second_page = h.console.api().page(second.query());
        second_page.total = 99;
        assert_eq!(
            h.console.finish_fetch(&second, Ok(second_page)),
            FetchOutcome::Applied
        );

        let first_page = h.console.api().page(first.query());
        assert_eq!(
            h.console.finish_fetch(&first, Ok(first_page)),
            FetchOutcome::Stale
        );
        assert_eq!(h.console.pagination().total, 99);

        assert_eq!(
            h.console.finish_fetch(&first, Err(AdminError::NotFound("x".into()))),
            FetchOutcome::Stale
        );
        assert!(h.notifier.errors().is_empty());
    }

    #[tokio::test]
    async fn test_failed_fetch_keeps_previous_page() {
        let mut h = harness(many(25), &[]);
        h.console.load().await;
        let before: Vec<_> = h.console.teams().to_vec();

        h.console.api().fail("teams");
        assert_eq!(h.console.next_page().await, Some(FetchOutcome::Failed));

        assert_eq!(h.console.teams(), before.as_slice());
        assert_eq!(h.console.pagination().total, 25);
        assert_eq!(h.notifier.errors().len(), 1);
        assert!(h.notifier.errors()[0].starts_with("Failed to load teams"));
    }

    #[tokio::test]
    async fn test_failed_fetch_restores_cursor_and_filters() {
        let mut h = harness(many(25), &[]);
        h.console.load().await;
        h.console.next_page().await;

        h.console.api().fail("teams");
        assert_eq!(h.console.next_page().await, Some(FetchOutcome::Failed));
        assert_eq!(h.console.pagination().page, 2);
        assert_eq!(h.console.teams().first().map(|t| t.id), Some(11));
        assert!(h.console.pagination().has_next());

        assert_eq!(
            h.console.set_event(Some(EventId::AiBlitz)).await,
            FetchOutcome::Failed
        );
        assert_eq!(h.console.filters().event, None);
        assert_eq!(h.console.pagination().page, 2);
    }

    #[tokio::test]
    async fn test_deleting_last_row_of_last_page_steps_back() {
        let mut h = harness(many(21), &[true]);
        h.console.load().await;
        h.console.go_to_page(3).await;
        assert_eq!(h.console.teams().len(), 1);

        assert_eq!(h.console.delete_team(21).await, Outcome::Applied);
        assert_eq!(h.console.pagination().total_pages, 2);
        assert_eq!(h.console.pagination().page, 2);
        assert_eq!(h.console.teams().len(), 10);
        assert_eq!(h.console.teams().first().map(|t| t.id), Some(11));
    }

    #[tokio::test]
    async fn test_toggle_verification_refetches_list_and_both_stats() {
        let mut h = harness(many(3), &[]);
        h.console.set_event(Some(EventId::ComicStrip)).await;
        h.console.api().clear_calls();

        assert_eq!(h.console.toggle_verification(2).await, Outcome::Applied);

        let calls = h.console.api().calls();
        assert_eq!(calls[0], Call::Toggle(2));
        assert!(calls.contains(&Call::Teams(
            "event_id=comic_strip&page=1&limit=10".to_string()
        )));
        assert!(refetched_everything(&calls));
        assert!(h.console.team(2).is_some_and(|t| t.verified));
        assert_eq!(h.notifier.successes(), 1);
    }

    #[tokio::test]
    async fn test_verify_payment_refetches_on_success() {
        let mut h = harness(many(3), &[]);
        h.console.load().await;
        h.console.api().clear_calls();

        assert_eq!(h.console.verify_payment(1).await, Outcome::Applied);
        let calls = h.console.api().calls();
        assert_eq!(calls[0], Call::VerifyPayment(1));
        assert!(refetched_everything(&calls));
    }

    #[tokio::test]
    async fn test_verify_payment_refused_for_rejected_team() {
        let mut h = harness(vec![team(5, PaymentStatus::Rejected)], &[]);
        h.console.load().await;
        h.console.api().clear_calls();

        assert_eq!(h.console.verify_payment(5).await, Outcome::Refused);
        assert_eq!(h.console.reject_payment(5).await, Outcome::Refused);
        assert!(h.console.api().calls().is_empty());
        assert_eq!(h.notifier.errors().len(), 2);
        assert_eq!(h.confirm.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_mutation_on_row_not_visible_is_refused() {
        let mut h = harness(many(25), &[true]);
        h.console.load().await;
        h.console.api().clear_calls();

        assert_eq!(h.console.delete_team(17).await, Outcome::Refused);
        assert!(h.console.api().calls().is_empty());
        assert_eq!(h.confirm.prompt_count(), 0);
    }

    #[tokio::test]
    async fn test_reject_payment_requires_confirmation() {
        let mut h = harness(many(2), &[false, true]);
        h.console.load().await;
        h.console.api().clear_calls();

        assert_eq!(h.console.reject_payment(1).await, Outcome::Cancelled);
        assert!(h.console.api().calls().is_empty());

        assert_eq!(h.console.reject_payment(1).await, Outcome::Applied);
        let calls = h.console.api().calls();
        assert_eq!(calls[0], Call::RejectPayment(1));
        assert!(refetched_everything(&calls));
    }

    #[tokio::test]
    async fn test_delete_never_sent_without_confirmation() {
        let mut h = harness(many(2), &[false]);
        h.console.load().await;
        h.console.api().clear_calls();

        assert_eq!(h.console.delete_team(1).await, Outcome::Cancelled);
        assert!(!h.console.api().calls().contains(&Call::Delete(1)));
        assert_eq!(h.confirm.prompt_count(), 1);
        assert!(h.confirm.prompts.lock().unwrap()[0].contains("Team 1"));
        assert!(h.console.team(1).is_some());
    }

    #[tokio::test]
    async fn test_delete_confirmed_refetches() {
        let mut h = harness(many(2), &[true]);
        h.console.load().await;
        h.console.api().clear_calls();

        assert_eq!(h.console.delete_team(1).await, Outcome::Applied);
        let calls = h.console.api().calls();
        assert_eq!(calls[0], Call::Delete(1));
        assert!(refetched_everything(&calls));
        assert!(h.console.team(1).is_none());
        assert_eq!(h.console.stats().map(|s| s.total_teams), Some(1));
    }

    #[tokio::test]
    async fn test_failed_delete_leaves_row() {
        let mut h = harness(many(2), &[true]);
        h.console.load().await;
        h.console.api().fail("delete");
        h.console.api().clear_calls();

        assert_eq!(h.console.delete_team(2).await, Outcome::Failed);
        assert_eq!(h.console.api().calls(), vec![Call::Delete(2)]);
        assert!(h.console.team(2).is_some());
        assert!(h.notifier.errors()[0].starts_with("Failed to delete team"));
    }

    #[tokio::test]
    async fn test_unauthorized_marks_signed_out() {
        let mut h = harness(many(2), &[]);
        *h.console.api().unauthorized.lock().unwrap() = true;
        h.console.load().await;

        assert!(h.console.is_signed_out());
        assert!(h
            .notifier
            .errors()
            .iter()
            .all(|e| e.contains("teamadm login")));
    }

    #[tokio::test]
    async fn test_secondary_stats_failure_is_quiet() {
        let mut h = harness(many(2), &[]);
        h.console.api().fail("event_stats");
        h.console.api().fail("departments");
        h.console.load().await;

        assert!(h.notifier.errors().is_empty());
        assert_eq!(h.console.teams().len(), 2);
    }

    #[tokio::test]
    async fn test_export_uses_event_filter_only() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness(many(2), &[]);
        h.console.set_search(Some("ink".to_string())).await;
        h.console.set_event(Some(EventId::AiBlitz)).await;
        h.console.api().clear_calls();

        let path = h.console.export_filtered(dir.path()).await.unwrap();
        assert_eq!(
            h.console.api().calls(),
            vec![Call::ExportCsv(Some(EventId::AiBlitz))]
        );
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("teams_export_ai_blitz_"), "{name}");
        assert!(name.ends_with(".csv"));
    }

    #[tokio::test]
    async fn test_export_all_saves_archive() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness(Vec::new(), &[]);

        let path = h.console.export_all(dir.path()).await.unwrap();
        let name = path.file_name().unwrap().to_string_lossy().into_owned();
        assert!(name.starts_with("TEXPERIA_all_events_"), "{name}");
        assert!(name.ends_with(".zip"));
        assert_eq!(std::fs::read(&path).unwrap(), b"PK\x03\x04");
    }

    #[tokio::test]
    async fn test_export_failure_notifies() {
        let dir = tempfile::tempdir().unwrap();
        let mut h = harness(Vec::new(), &[]);
        h.console.api().fail("export_all");

        assert!(h.console.export_all(dir.path()).await.is_none());
        assert!(h.notifier.errors()[0].starts_with("Failed to export all CSVs"));
    }

    #[tokio::test]
    async fn test_locate_walks_pages() {
        let mut h = harness(many(25), &[]);
        h.console.locate(23).await.unwrap();
        assert_eq!(h.console.pagination().page, 3);
        assert!(h.console.team(23).is_some());

        assert!(matches!(
            h.console.locate(99).await,
            Err(AdminError::TeamNotFound(99))
        ));
    }
}
