//! CLI command definitions and handlers

pub mod config;
pub mod date_filter;
pub mod handlers;
pub mod output;

use clap::{ArgAction, Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use crate::domain::{TagDraft, parse_tag_name};
use output::OutputFormat;

/// tango - vocabulary flashcards with review history
#[derive(Parser, Debug)]
#[command(name = "tango", version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides config file)
    #[arg(long, global = true, env = "TANGO_DB")]
    pub db: Option<PathBuf>,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Add notes
    Add(AddArgs),

    /// List notes with filters, ordering and paging
    #[command(name = "ls")]
    List(ListArgs),

    /// Show a note with its tags and review stats
    Show(ShowArgs),

    /// Replace a note's fields and tags
    Update(UpdateArgs),

    /// Delete notes
    Rm(RmArgs),

    /// Record a review outcome for a note
    Review(ReviewArgs),

    /// List review records
    Records(RecordsArgs),

    /// List all tags with note counts
    Tags(TagsArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

/// Arguments for the `add` command
#[derive(Parser, Debug)]
pub struct AddArgs {
    /// English text
    #[arg(short, long, required_unless_present = "from")]
    pub english: Option<String>,

    /// Japanese text
    #[arg(short, long, required_unless_present = "from")]
    pub japanese: Option<String>,

    /// Free-form description
    #[arg(short = 'D', long)]
    pub desc: Option<String>,

    /// Example sentences
    #[arg(short = 'x', long)]
    pub examples: Option<String>,

    /// Similar words
    #[arg(short = 'S', long)]
    pub similar: Option<String>,

    /// Tag for the note (can be specified multiple times)
    #[arg(short, long = "tag", action = ArgAction::Append, value_parser = parse_tag_name)]
    pub tags: Vec<String>,

    /// Read a JSON array of notes from a file ("-" for stdin)
    #[arg(long, conflicts_with_all = ["english", "japanese", "desc", "examples", "similar", "tags"])]
    pub from: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `ls` (list) command
#[derive(Parser, Debug)]
pub struct ListArgs {
    /// Substring to look for in any text field
    #[arg(short, long)]
    pub search: Option<String>,

    /// Filter by tag (can be specified multiple times, any matches)
    #[arg(short, long = "tag", action = ArgAction::Append)]
    pub tags: Vec<String>,

    /// Reviewed on or after (YYYY-MM-DD, RFC 3339, or relative like "7d")
    #[arg(long)]
    pub played_from: Option<String>,

    /// Reviewed before (YYYY-MM-DD, RFC 3339, or relative like "7d")
    #[arg(long)]
    pub played_until: Option<String>,

    /// Correct-answer rate strictly above this value (0.0 - 1.0)
    #[arg(long, value_parser = parse_rate)]
    pub rate_above: Option<f64>,

    /// Correct-answer rate strictly below this value (0.0 - 1.0)
    #[arg(long, value_parser = parse_rate)]
    pub rate_below: Option<f64>,

    /// Sort field: created, modified, played, english
    #[arg(long)]
    pub sort: Option<String>,

    /// Sort descending
    #[arg(long)]
    pub desc: bool,

    /// Random order (overrides --sort)
    #[arg(long)]
    pub random: bool,

    /// Page number, starting at 1
    #[arg(short, long)]
    pub page: Option<String>,

    /// Notes per page (1-100)
    #[arg(short = 'n', long)]
    pub per_page: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `show` command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Note ID or ID prefix
    pub note: String,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `update` command
///
/// Updates replace the whole note: fields left out become empty and tags left
/// out are removed, unless `--keep-tags` is given.
#[derive(Parser, Debug)]
pub struct UpdateArgs {
    /// Note ID or ID prefix
    #[arg(required_unless_present = "from")]
    pub note: Option<String>,

    /// English text
    #[arg(short, long, default_value = "")]
    pub english: String,

    /// Japanese text
    #[arg(short, long, default_value = "")]
    pub japanese: String,

    /// Free-form description
    #[arg(short = 'D', long, default_value = "")]
    pub desc: String,

    /// Example sentences
    #[arg(short = 'x', long, default_value = "")]
    pub examples: String,

    /// Similar words
    #[arg(short = 'S', long, default_value = "")]
    pub similar: String,

    /// New tag for the note (repeatable)
    #[arg(short, long = "tag", action = ArgAction::Append, value_parser = parse_tag_name)]
    pub tags: Vec<String>,

    /// Existing tag to keep or rename, as ID:NAME (repeatable)
    #[arg(long = "tag-id", value_name = "ID:NAME", action = ArgAction::Append)]
    pub tag_ids: Vec<TagDraft>,

    /// Keep the note's current tags in addition to any given with --tag
    #[arg(long)]
    pub keep_tags: bool,

    /// Read a JSON array of note updates from a file ("-" for stdin)
    #[arg(long, conflicts_with = "note")]
    pub from: Option<PathBuf>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `rm` command
#[derive(Parser, Debug)]
pub struct RmArgs {
    /// Note IDs or ID prefixes
    #[arg(required = true)]
    pub notes: Vec<String>,
}

/// Arguments for the `review` command
#[derive(Parser, Debug)]
pub struct ReviewArgs {
    /// Note ID or ID prefix
    pub note: String,

    /// The answer was correct
    #[arg(long, conflicts_with = "fail", required_unless_present = "fail")]
    pub pass: bool,

    /// The answer was wrong
    #[arg(long)]
    pub fail: bool,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `records` command
#[derive(Parser, Debug)]
pub struct RecordsArgs {
    /// Only show records for this note (ID or ID prefix)
    pub note: Option<String>,

    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `tags` command
#[derive(Parser, Debug)]
pub struct TagsArgs {
    /// Output format
    #[arg(short = 'f', long, value_enum, default_value_t = OutputFormat::Human)]
    pub format: OutputFormat,
}

/// Arguments for the `completions` command
#[derive(Parser, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for (bash, zsh, fish)
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Parses a rate bound, rejecting NaN and infinities.
fn parse_rate(s: &str) -> Result<f64, String> {
    let rate: f64 = s.trim().parse().map_err(|_| format!("not a number: '{}'", s))?;
    if !rate.is_finite() {
        return Err(format!("rate must be a finite number, got '{}'", s));
    }
    Ok(rate)
}
