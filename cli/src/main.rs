//! Rollcall CLI
//!
//! Command-line interface for the Rollcall attendance metrics service.
//!
//! # Usage
//!
//! ```bash
//! rollcall --help
//! rollcall render attendees.json
//! rollcall health
//! ```

#![deny(unsafe_code)]

use anyhow::Context;
use clap::{Parser, Subcommand};
use shared::metrics::AttendanceRegistry;
use shared::models::AttendanceRecord;
use std::path::PathBuf;

/// Rollcall CLI - attendance metrics command-line interface
#[derive(Parser)]
#[command(name = "rollcall")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// API server URL
    #[arg(
        short,
        long,
        env = "ROLLCALL_API_URL",
        default_value = "http://localhost:8080"
    )]
    api_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a JSON file of attendance records to a fresh registry and
    /// print the resulting exposition text
    Render {
        /// Path to a JSON array of attendance records
        file: PathBuf,
    },
    /// Check API server health
    Health,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Render { file }) => {
            let text = render_file(&file)?;
            print!("{text}");
        }
        Some(Commands::Health) => {
            println!("Checking health of Rollcall API at {}...", cli.api_url);
            println!("Health check not yet implemented");
        }
        None => {
            println!("Rollcall CLI v{}", env!("CARGO_PKG_VERSION"));
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// Loads attendance records from a JSON file and renders the exposition
/// text a scrape of those records would return.
fn render_file(path: &std::path::Path) -> anyhow::Result<String> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let records: Vec<AttendanceRecord> = serde_json::from_str(&contents)
        .with_context(|| format!("{} is not a JSON array of attendance records", path.display()))?;

    let registry = AttendanceRegistry::new();
    for record in &records {
        registry.record(
            &record.name,
            &record.workshop_id,
            record.present,
            record.photo_link.as_deref(),
        );
    }

    Ok(registry.render())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse() {
        // Verify CLI can parse without arguments
        let cli = Cli::try_parse_from(["rollcall"]);
        assert!(cli.is_ok());
    }

    #[test]
    fn test_cli_health_command() {
        let cli = Cli::try_parse_from(["rollcall", "health"]);
        assert!(cli.is_ok());
        let cli = cli.unwrap();
        assert!(matches!(cli.command, Some(Commands::Health)));
    }

    #[test]
    fn test_cli_render_command() {
        let cli = Cli::try_parse_from(["rollcall", "render", "attendees.json"]).unwrap();
        match cli.command {
            Some(Commands::Render { file }) => {
                assert_eq!(file, PathBuf::from("attendees.json"));
            }
            _ => panic!("expected render command"),
        }
    }

    #[test]
    fn test_render_file_produces_exposition_text() {
        let dir = std::env::temp_dir();
        let path = dir.join("rollcall-render-test.json");
        std::fs::write(
            &path,
            r#"[
                {"name": "Ada", "workshop_id": "W1"},
                {"name": "Grace", "workshop_id": "W1", "present": false}
            ]"#,
        )
        .unwrap();

        let text = render_file(&path).unwrap();
        std::fs::remove_file(&path).ok();

        assert!(text.contains("workshop_attendance_status{name=\"Ada\",workshop_id=\"W1\",photo=\"\"} 1"));
        assert!(text.contains("workshop_attendance_status{name=\"Grace\",workshop_id=\"W1\",photo=\"\"} 0"));
    }

    #[test]
    fn test_render_file_rejects_non_array() {
        let dir = std::env::temp_dir();
        let path = dir.join("rollcall-render-bad.json");
        std::fs::write(&path, r#"{"name": "Ada"}"#).unwrap();

        let result = render_file(&path);
        std::fs::remove_file(&path).ok();

        assert!(result.is_err());
    }
}
