//! List command handler.

use anyhow::{Context, Result, anyhow};
use std::path::Path;

use super::{open_store, truncate_str};
use crate::cli::ListArgs;
use crate::cli::config::Config;
use crate::cli::date_filter::parse_date;
use crate::cli::output::{OutputFormat, print_json};
use crate::domain::{Bounds, Criteria, Ordering, PageRequest};
use crate::store::NoteRepository;

/// Translates list arguments into read criteria and a page request.
pub(crate) fn build_query(args: &ListArgs, config: &Config) -> Result<(Criteria, PageRequest)> {
    let mut criteria = Criteria::new();

    if let Some(search) = &args.search {
        criteria = criteria.search(search.clone());
    }
    for tag in &args.tags {
        criteria = criteria.tag(tag.trim());
    }

    let played_from = args
        .played_from
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(|e| anyhow!("invalid --played-from: {}", e))?;
    let played_until = args
        .played_until
        .as_deref()
        .map(parse_date)
        .transpose()
        .map_err(|e| anyhow!("invalid --played-until: {}", e))?;
    criteria = criteria
        .played(Bounds::new(played_from, played_until))
        .rate(Bounds::new(args.rate_above, args.rate_below));

    if let Some(field) = &args.sort
        && field.parse::<crate::domain::SortField>().is_err()
    {
        tracing::warn!(field = %field, "unknown sort field, listing unordered");
    }
    criteria = criteria.ordering(Ordering::resolve(
        args.sort.as_deref(),
        args.desc,
        args.random,
    ));

    let size = args
        .per_page
        .clone()
        .or_else(|| config.page_size.map(|n| n.to_string()));
    let page = PageRequest::parse(args.page.as_deref(), size.as_deref());

    Ok((criteria, page))
}

pub fn handle_list(args: &ListArgs, db_path: &Path, config: &Config) -> Result<()> {
    let (criteria, request) = build_query(args, config)?;
    let store = open_store(db_path)?;
    let page = store
        .read_notes(&criteria, request)
        .context("failed to list notes")?;

    match args.format {
        OutputFormat::Human => {
            if page.items.is_empty() {
                if page.total == 0 {
                    println!("No notes found.");
                } else {
                    println!(
                        "No notes on page {} ({} notes over {} pages).",
                        page.page, page.total, page.total_pages
                    );
                }
            } else {
                println!("{:<10}  {:<30}  {:<20}  {}", "ID", "English", "Japanese", "Tags");
                println!(
                    "{:<10}  {:<30}  {:<20}  {}",
                    "----------",
                    "------------------------------",
                    "--------------------",
                    "----"
                );

                for note in &page.items {
                    println!(
                        "{:<10}  {:<30}  {:<20}  {}",
                        note.id().short(),
                        truncate_str(note.english(), 30),
                        truncate_str(note.japanese(), 20),
                        note.tag_names().join(", ")
                    );
                }

                println!();
                println!(
                    "Page {}/{} ({} note(s))",
                    page.page, page.total_pages, page.total
                );
            }
        }
        OutputFormat::Json => print_json(&page)?,
    }

    Ok(())
}
