use std::fmt;

use serde::{Deserialize, Serialize};

use super::{EventId, Payment};

/// Academic year a team leader is enrolled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Year {
    #[serde(rename = "1st Year")]
    First,
    #[serde(rename = "2nd Year")]
    Second,
    #[serde(rename = "3rd Year")]
    Third,
    #[serde(rename = "4th Year")]
    Fourth,
}

impl Year {
    pub fn label(self) -> &'static str {
        match self {
            Year::First => "1st Year",
            Year::Second => "2nd Year",
            Year::Third => "3rd Year",
            Year::Fourth => "4th Year",
        }
    }
}

impl fmt::Display for Year {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

pub type TeamId = u64;

#[derive(Deserialize, Serialize, Debug, Clone, PartialEq)]
pub struct Team {
    pub id: TeamId,
    #[serde(default)]
    pub user_id: Option<u64>,
    pub team_name: String,
    pub event_id: EventId,
    pub department: String,
    pub year: Year,
    pub leader_name: String,
    pub leader_email: String,
    pub leader_phone: String,
    #[serde(default)]
    pub member2_name: Option<String>,
    #[serde(default)]
    pub member2_email: Option<String>,
    #[serde(default)]
    pub member3_name: Option<String>,
    #[serde(default)]
    pub member3_email: Option<String>,
    #[serde(default)]
    pub member4_name: Option<String>,
    #[serde(default)]
    pub member4_email: Option<String>,
    pub verified: bool,
    #[serde(default)]
    pub registered_at: Option<String>,
    #[serde(flatten)]
    pub payment: Payment,
}

/// A team member other than the leader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Member<'a> {
    pub name: &'a str,
    pub email: Option<&'a str>,
}

/// Row-level commands the console exposes for a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TeamAction {
    ToggleVerification,
    VerifyPayment,
    RejectPayment,
    Delete,
}

impl TeamAction {
    pub fn label(self) -> &'static str {
        match self {
            TeamAction::ToggleVerification => "toggle verification",
            TeamAction::VerifyPayment => "verify payment",
            TeamAction::RejectPayment => "reject payment",
            TeamAction::Delete => "delete",
        }
    }
}

impl Team {
    /// Additional members (up to three), skipping empty slots.
    pub fn members(&self) -> Vec<Member<'_>> {
        [
            (&self.member2_name, &self.member2_email),
            (&self.member3_name, &self.member3_email),
            (&self.member4_name, &self.member4_email),
        ]
        .into_iter()
        .filter_map(|(name, email)| {
            let name = name.as_deref().filter(|n| !n.trim().is_empty())?;
            Some(Member {
                name,
                email: email.as_deref().filter(|e| !e.trim().is_empty()),
            })
        })
        .collect()
    }

    /// Leader plus additional members.
    pub fn member_count(&self) -> usize {
        1 + self.members().len()
    }

    /// Payment transitions are only offered while a proof awaits review.
    pub fn available_actions(&self) -> Vec<TeamAction> {
        let mut actions = vec![TeamAction::ToggleVerification];
        if self.payment.is_pending() {
            actions.push(TeamAction::VerifyPayment);
            actions.push(TeamAction::RejectPayment);
        }
        actions.push(TeamAction::Delete);
        actions
    }

    pub fn allows(&self, action: TeamAction) -> bool {
        self.available_actions().contains(&action)
    }
}
