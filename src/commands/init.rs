use std::io::{self, Write};

use crate::config::{normalize_base_url, Config, DEFAULT_API_URL};
use crate::error::{AdminError, Result};

fn ask(label: &str) -> Result<String> {
    print!("{label}");
    io::stdout().flush()?;

    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}

pub async fn run() -> Result<()> {
    let config_path = Config::config_path()?;

    if config_path.exists() {
        let answer = ask(&format!(
            "Config file already exists at {}. Overwrite? [y/N] ",
            config_path.display()
        ))?;

        if !answer.eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    println!("teamadm configuration");
    println!("=====================\n");

    let api_url = ask(&format!("API base URL [{DEFAULT_API_URL}]: "))?;
    let api_url = if api_url.is_empty() {
        DEFAULT_API_URL.to_string()
    } else {
        api_url
    };
    // Validate before writing anything
    normalize_base_url(&api_url)?;

    let email = ask("Admin email [optional]: ")?;
    let export_dir = ask("Export directory [optional, defaults to current dir]: ")?;

    let config = Config {
        api_url: Some(api_url),
        email: (!email.is_empty()).then_some(email),
        request_timeout_secs: None,
        export_dir: (!export_dir.is_empty()).then(|| export_dir.into()),
    };

    if let Some(parent) = config_path.parent() {
        std::fs::create_dir_all(parent).map_err(|e| AdminError::ConfigRead {
            path: config_path.clone(),
            source: e,
        })?;
    }

    let contents = toml::to_string(&config)?;

    std::fs::write(&config_path, contents).map_err(|e| AdminError::ConfigRead {
        path: config_path.clone(),
        source: e,
    })?;

    println!("\nConfig saved to {}", config_path.display());
    println!("Run 'teamadm login' to sign in.");

    Ok(())
}
