//! Output format types for CLI commands.

use clap::ValueEnum;
use serde::Serialize;

use crate::domain::{Note, NoteStats};

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output (default)
    #[default]
    Human,
    /// JSON output for programmatic consumption
    Json,
}

/// Wrapper for serializable command output.
#[derive(Debug, Serialize)]
pub struct Output<T: Serialize> {
    pub data: T,
}

impl<T: Serialize> Output<T> {
    pub fn new(data: T) -> Self {
        Self { data }
    }
}

/// Prints `data` as pretty JSON inside the `Output` envelope.
pub fn print_json<T: Serialize>(data: T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(&Output::new(data))?);
    Ok(())
}

/// A note with its review statistics.
#[derive(Debug, Serialize)]
pub struct NoteDetail<'a> {
    #[serde(flatten)]
    pub note: &'a Note,
    pub stats: StatsListing,
}

/// Review statistics with the derived rate.
#[derive(Debug, Serialize)]
pub struct StatsListing {
    pub plays: u32,
    pub correct: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rate: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_played: Option<String>,
}

impl From<NoteStats> for StatsListing {
    fn from(stats: NoteStats) -> Self {
        Self {
            plays: stats.plays,
            correct: stats.correct,
            rate: stats.rate(),
            last_played: stats.last_played.map(|ts| ts.to_rfc3339()),
        }
    }
}
