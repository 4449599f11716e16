use chrono::Local;
use colored::{ColoredString, Colorize};
use pastebin_common::models::parse_timestamp;
use pastebin_common::{Paste, PasteStatus};

use crate::config::ClientConfig;
use crate::retrieval::LoadPhase;

/// Format a server timestamp in local time; `None` means no expiry.
pub fn format_timestamp(raw: Option<&str>) -> String {
    match raw {
        None => "Never".to_string(),
        Some(raw) => match parse_timestamp(raw) {
            Some(dt) => dt
                .with_timezone(&Local)
                .format("%Y-%m-%d %H:%M:%S")
                .to_string(),
            None => raw.to_string(),
        },
    }
}

fn status_badge(status: &PasteStatus) -> ColoredString {
    let label = format!(" {} ", status);
    match status {
        PasteStatus::Active => label.black().on_green(),
        PasteStatus::Viewed => label.black().on_blue(),
        PasteStatus::Expired | PasteStatus::Deleted | PasteStatus::Other(_) => label.dimmed(),
    }
}

/// Terminal output for the `pb` commands.
pub struct Render;

impl Render {
    pub fn loading(&self, phase: LoadPhase) {
        let text = match phase {
            LoadPhase::Initial => "Loading paste…",
            LoadPhase::PasswordRetry => "Unlocking…",
        };
        eprintln!(" {}", text.dimmed());
    }

    pub fn password_required(&self, last_error: Option<&str>) {
        eprintln!("\n {} This paste is password protected", "🔒".yellow());
        if let Some(err) = last_error {
            eprintln!(" {} {}", "✖".red(), err.red());
        }
    }

    pub fn paste(&self, paste: &Paste) {
        println!(
            "\n {}  {} {}",
            "View paste".bold(),
            status_badge(&paste.status),
            paste.id.dimmed()
        );
        println!("\n{}", paste.content);
        println!();
        println!(
            " {} {} {} {}",
            "Views".dimmed(),
            paste.current_views.to_string().bold(),
            format!("/ {}", paste.max_views).dimmed(),
            format!("({} left)", paste.remaining_views()).dimmed()
        );
        println!(
            " {} {}",
            "Expires".dimmed(),
            format_timestamp(paste.expires_at.as_deref())
        );
        println!(
            " {} {}",
            "Created".dimmed(),
            format_timestamp(Some(&paste.created_at))
        );
        println!(
            " {} {}\n",
            "Updated".dimmed(),
            format_timestamp(Some(&paste.updated_at))
        );
    }

    pub fn created(&self, paste: &Paste, share_url: &str) {
        println!("\n {} {}", "✔".green(), "Paste created!".green().bold());
        println!(" {} {}", "Share URL:".dimmed(), share_url.underline());
        println!(" {} {}\n", "Status:".dimmed(), status_badge(&paste.status));
    }

    pub fn failure(&self, message: &str) {
        eprintln!("\n {} {}", "✖".red(), message.red());
    }

    pub fn abandoned(&self) {
        eprintln!(" {}", "No password given, giving up.".dimmed());
    }

    pub fn config(&self, config: &ClientConfig) {
        println!("API base URL:   {}", config.api_base_url);
        println!("Share base URL: {}", config.share_base());
    }
}
