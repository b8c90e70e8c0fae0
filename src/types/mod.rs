mod contact;
mod event;
pub mod payment;
mod stats;
pub mod team;

pub use contact::Contact;
pub use event::EventId;
pub use payment::Payment;
pub use stats::{DashboardStats, DepartmentCount, EventStats, RevenuePoint, TeamPage, YearCount};
pub use team::{Team, TeamAction, TeamId};

#[cfg(test)]
pub(crate) use team::fixtures;
