use std::fmt;

use colored::Colorize;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Lifecycle of a team's fee payment proof: none → pending → verified | rejected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentStatus {
    /// No payment has been submitted yet
    #[default]
    None,
    Pending,
    Verified,
    Rejected,
}

impl PaymentStatus {
    pub fn from_wire(value: Option<&str>) -> Self {
        match value {
            Some("pending") => PaymentStatus::Pending,
            Some("verified") => PaymentStatus::Verified,
            Some("rejected") => PaymentStatus::Rejected,
            _ => PaymentStatus::None,
        }
    }

    pub fn as_wire(self) -> Option<&'static str> {
        match self {
            PaymentStatus::None => None,
            PaymentStatus::Pending => Some("pending"),
            PaymentStatus::Verified => Some("verified"),
            PaymentStatus::Rejected => Some("rejected"),
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            PaymentStatus::None => "Not paid",
            PaymentStatus::Pending => "Pending",
            PaymentStatus::Verified => "Verified",
            PaymentStatus::Rejected => "Rejected",
        }
    }

    pub fn colored(self) -> String {
        let label = self.label();
        match self {
            PaymentStatus::None => label.bright_black().to_string(),
            PaymentStatus::Pending => label.yellow().bold().to_string(),
            PaymentStatus::Verified => label.green().to_string(),
            PaymentStatus::Rejected => label.red().to_string(),
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl Serialize for PaymentStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self.as_wire() {
            Some(value) => serializer.serialize_str(value),
            None => serializer.serialize_none(),
        }
    }
}

impl<'de> Deserialize<'de> for PaymentStatus {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Option::<String>::deserialize(deserializer)?;
        Ok(PaymentStatus::from_wire(value.as_deref()))
    }
}

/// Payment details embedded in a team record.
///
/// The admin team list sends these as flat `payment_*` fields on the team
/// object, so the field names here carry the wire spelling.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Payment {
    #[serde(rename = "payment_status", default)]
    pub status: PaymentStatus,
    /// Whole currency units (INR).
    #[serde(
        rename = "payment_amount",
        default,
        deserialize_with = "whole_units"
    )]
    pub amount: u64,
    #[serde(default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub order_id: Option<String>,
    #[serde(default)]
    pub verified_at: Option<String>,
}

impl Payment {
    pub fn is_pending(&self) -> bool {
        self.status == PaymentStatus::Pending
    }
}

/// Accept a nullable JSON number (the backend reports money as floats) and
/// round it to whole currency units.
pub fn whole_units<'de, D>(deserializer: D) -> Result<u64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<f64>::deserialize(deserializer)?;
    Ok(value.map(|v| v.max(0.0).round() as u64).unwrap_or(0))
}
