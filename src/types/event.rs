use std::fmt;

use clap::ValueEnum;
use colored::Colorize;
use serde::{Deserialize, Serialize};

/// Competition tracks a team can register under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum EventId {
    /// AI Comic Strip Challenge
    ComicStrip,
    /// Prompt Engineering Idol
    PromptIdol,
    /// AI Blitz
    AiBlitz,
}

impl EventId {
    pub const ALL: [EventId; 3] = [EventId::ComicStrip, EventId::PromptIdol, EventId::AiBlitz];

    /// Identifier as sent over the wire and used in export file names.
    pub fn as_str(self) -> &'static str {
        match self {
            EventId::ComicStrip => "comic_strip",
            EventId::PromptIdol => "prompt_idol",
            EventId::AiBlitz => "ai_blitz",
        }
    }

    pub fn display_name(self) -> &'static str {
        match self {
            EventId::ComicStrip => "AI Comic Strip Challenge",
            EventId::PromptIdol => "Prompt Engineering Idol",
            EventId::AiBlitz => "AI Blitz",
        }
    }

    /// Short label for table cells.
    pub fn short_label(self) -> &'static str {
        match self {
            EventId::ComicStrip => "Comic Strip",
            EventId::PromptIdol => "Prompt Idol",
            EventId::AiBlitz => "AI Blitz",
        }
    }

    pub fn colored(self) -> String {
        let label = self.short_label();
        match self {
            EventId::ComicStrip => label.magenta().to_string(),
            EventId::PromptIdol => label.yellow().to_string(),
            EventId::AiBlitz => label.green().to_string(),
        }
    }

    /// Parse either the wire identifier (`comic_strip`) or the CLI spelling
    /// (`comic-strip`).
    pub fn parse(value: &str) -> Option<Self> {
        let normalized = value.trim().to_ascii_lowercase().replace('-', "_");
        EventId::ALL.into_iter().find(|e| e.as_str() == normalized)
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
