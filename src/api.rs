use async_trait::async_trait;

use crate::console::TeamQuery;
use crate::error::Result;
use crate::types::{DashboardStats, DepartmentCount, EventId, EventStats, TeamId, TeamPage};

/// Admin endpoints the team console drives.
///
/// `AdminClient` talks HTTP; tests substitute an in-memory backend.
#[async_trait]
pub trait AdminApi {
    async fn stats(&self) -> Result<DashboardStats>;

    async fn event_stats(&self) -> Result<Vec<EventStats>>;

    async fn departments(&self) -> Result<Vec<DepartmentCount>>;

    async fn teams(&self, query: &TeamQuery) -> Result<TeamPage>;

    async fn toggle_verification(&self, id: TeamId) -> Result<()>;

    async fn delete_team(&self, id: TeamId) -> Result<()>;

    async fn verify_payment(&self, id: TeamId) -> Result<()>;

    async fn reject_payment(&self, id: TeamId) -> Result<()>;

    /// CSV of one event's teams, or every team when `event` is `None`.
    async fn export_csv(&self, event: Option<EventId>) -> Result<Vec<u8>>;

    /// ZIP archive with one CSV per event.
    async fn export_all(&self) -> Result<Vec<u8>>;
}
