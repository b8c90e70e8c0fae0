use colored::Colorize;
use tabled::Tabled;

use crate::client::AdminClient;
use crate::error::Result;
use crate::output::{self, format_date, truncate};
use crate::types::Contact;

#[derive(Tabled)]
struct ContactRow {
    #[tabled(rename = "ID")]
    id: u64,
    #[tabled(rename = "From")]
    from: String,
    #[tabled(rename = "Message")]
    message: String,
    #[tabled(rename = "Received")]
    received: String,
    #[tabled(rename = "")]
    unread: String,
}

impl From<&Contact> for ContactRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id,
            from: format!("{} <{}>", contact.name, contact.email),
            message: truncate(&contact.message.replace('\n', " "), 60),
            received: format_date(&contact.created_at),
            unread: if contact.is_read {
                String::new()
            } else {
                "new".cyan().bold().to_string()
            },
        }
    }
}

pub async fn list(client: AdminClient, unread_only: bool) -> Result<()> {
    let contacts = client.contacts(unread_only).await?;

    if contacts.is_empty() {
        output::print_message("No messages");
        return Ok(());
    }

    output::print_table(&contacts, |c| ContactRow::from(c), |c| {
        format!("{}\t{}\t{}", c.id, c.email, truncate(&c.message, 60))
    });

    Ok(())
}

pub async fn mark_read(client: AdminClient, id: u64) -> Result<()> {
    client.mark_contact_read(id).await?;
    output::print_message(&format!("Marked message {id} as read"));
    Ok(())
}
