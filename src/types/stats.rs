use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::payment::whole_units;
use super::{EventId, Team};

/// Global dashboard figures.
#[derive(Deserialize, Serialize, Debug, Clone, Default, PartialEq)]
pub struct DashboardStats {
    pub total_teams: u64,
    pub verified_teams: u64,
    #[serde(deserialize_with = "whole_units")]
    pub total_revenue: u64,
    pub pending_payments: u64,
    #[serde(default)]
    pub departments: BTreeMap<String, u64>,
}

/// The same four figures scoped to one event.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct EventStats {
    pub event_id: EventId,
    pub event_name: String,
    pub total_teams: u64,
    pub verified_teams: u64,
    #[serde(deserialize_with = "whole_units")]
    pub total_revenue: u64,
    pub pending_payments: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct DepartmentCount {
    pub department: String,
    pub count: u64,
}

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct YearCount {
    pub year: String,
    pub count: u64,
}

/// One day of verified revenue.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct RevenuePoint {
    pub date: String,
    #[serde(deserialize_with = "whole_units")]
    pub amount: u64,
    pub count: u64,
}

/// One page of the admin team list as reported by the server.
#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct TeamPage {
    pub teams: Vec<Team>,
    pub total: u64,
    pub total_pages: u32,
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub limit: Option<u32>,
}
