use serde::{Deserialize, Serialize};

/// A message submitted through the public contact form.
#[derive(Deserialize, Serialize, Debug, Clone)]
pub struct Contact {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub message: String,
    pub is_read: bool,
    pub created_at: String,
}
