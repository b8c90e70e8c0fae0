use std::io::{self, Write};

use serde_json::json;
use tracing::info;

use crate::client::AdminClient;
use crate::config::Config;
use crate::error::{AdminError, Result};
use crate::output;
use crate::session::SessionStore;

fn prompt(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

/// Resolve the login email: flag, then config, then a prompt.
fn login_email(config: &Config, email: Option<String>) -> Result<String> {
    let email = match email.or_else(|| config.email.clone()) {
        Some(email) => email.trim().to_string(),
        None => prompt("Email: ")?,
    };
    if email.is_empty() {
        return Err(AdminError::MissingEmail);
    }
    Ok(email)
}

pub async fn login(config: &Config, store: &SessionStore, email: Option<String>) -> Result<()> {
    let email = login_email(config, email)?;
    let password = rpassword::prompt_password("Password: ")?;

    let client = AdminClient::new(config, store.clone())?;
    let session = client.login(&email, &password).await?.require_admin()?;
    store.save(&session)?;
    info!(email = %email, "logged in");

    output::print_message(&format!("Logged in as {email}"));
    Ok(())
}

pub fn logout(store: &SessionStore) -> Result<()> {
    store.clear();
    output::print_message("Logged out");
    Ok(())
}

pub fn whoami(config: &Config, store: &SessionStore) -> Result<()> {
    let api_url = config.api_url()?;
    let session = store.resolve()?;

    // The token itself is never printed.
    let summary = json!({
        "api_url": api_url.as_str(),
        "email": session.email,
        "role": session.role,
        "session_file": store.path(),
    });

    output::print_item(&summary, |_| {
        println!("API:     {api_url}");
        println!(
            "Email:   {}",
            session.email.as_deref().unwrap_or("(from TEAMADM_TOKEN)")
        );
        println!("Role:    {}", session.role);
        println!("Session: {}", store.path().display());
    });
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_email_is_rejected_before_prompting() {
        let config = Config::default();
        assert!(matches!(
            login_email(&config, Some("   ".to_string())),
            Err(AdminError::MissingEmail)
        ));
    }

    #[test]
    fn test_email_flag_wins_over_config() {
        let config = Config {
            email: Some("config@example.org".to_string()),
            ..Default::default()
        };
        assert_eq!(
            login_email(&config, Some(" flag@example.org ".to_string())).unwrap(),
            "flag@example.org"
        );
        assert_eq!(login_email(&config, None).unwrap(), "config@example.org");
    }
}
