// FILE: crates/cli/src/commands.rs

use crate::prompt::Prompter;
use anyhow::{Context, Result};
use chrono::{SecondsFormat, Utc};
use console::style;
use rsskeep_config::{Config, ConfigManager};
use rsskeep_core::{parse_index, ChannelFields, FeedDocument, ItemFields};
use rsskeep_store::{FeedService, FeedStore};
use std::io::{BufRead, Write};

/// Create a new feed from prompted channel fields
pub fn create_feed<S, R, W>(service: &FeedService<S>, prompter: &mut Prompter<R, W>) -> Result<()>
where
    S: FeedStore,
    R: BufRead,
    W: Write,
{
    // Refuse before asking anything, like `add_item`
    service
        .ensure_can_initialize()
        .context("Failed to create feed")?;

    let fields = ChannelFields {
        title: prompter.ask("Channel title")?,
        link: prompter.ask("Channel link")?,
        description: prompter.ask("Channel description")?,
    };

    let doc = service
        .initialize(fields)
        .context("Failed to create feed")?;

    writeln!(
        prompter.output(),
        "{} Created feed '{}' at {}",
        style("✓").green().bold(),
        doc.channel().title(),
        service.store().location().display()
    )?;
    Ok(())
}

/// Add an item from prompted fields
pub fn add_item<S, R, W>(service: &FeedService<S>, prompter: &mut Prompter<R, W>) -> Result<()>
where
    S: FeedStore,
    R: BufRead,
    W: Write,
{
    // Fail before prompting when there is nothing to add to
    service.load().context("Failed to load feed")?;

    let title = prompter.ask("Item title")?;
    let link = prompter.ask("Item link")?;
    let mut pub_date = prompter.ask("Item publication date")?;
    let description = prompter.ask("Item description")?;

    if pub_date.trim().is_empty() {
        pub_date = default_pub_date();
    }

    let doc = service
        .add(ItemFields {
            title: title.clone(),
            link,
            pub_date: pub_date.clone(),
            description,
        })
        .context("Failed to add item")?;

    writeln!(
        prompter.output(),
        "{} Added '{}' ({}), feed now has {} items",
        style("✓").green().bold(),
        title,
        pub_date,
        doc.item_count()
    )?;
    Ok(())
}

/// Show the item menu and remove the chosen entry
pub fn remove_item<S, R, W>(service: &FeedService<S>, prompter: &mut Prompter<R, W>) -> Result<()>
where
    S: FeedStore,
    R: BufRead,
    W: Write,
{
    let items = service.items().context("Failed to load feed")?;

    if items.is_empty() {
        writeln!(prompter.output(), "Feed has no items.")?;
        return Ok(());
    }

    for summary in &items {
        writeln!(prompter.output(), "{:2}: {}", summary.index, summary.title)?;
    }

    let answer = prompter.ask("Item to remove")?;
    let index = parse_index(&answer, items.len())?;
    let removed = service.remove(index).context("Failed to remove item")?;

    writeln!(
        prompter.output(),
        "{} Removed '{}'",
        style("✓").green().bold(),
        removed.title
    )?;
    Ok(())
}

/// Print the feed contents
pub fn list_items<S, W>(service: &FeedService<S>, json: bool, out: &mut W) -> Result<()>
where
    S: FeedStore,
    W: Write,
{
    let doc = service.load().context("Failed to load feed")?;

    if json {
        let text = serde_json::to_string_pretty(doc.channel().items())
            .context("Failed to serialize to JSON")?;
        writeln!(out, "{}", text)?;
        return Ok(());
    }

    print_feed_summary(&doc, out)?;
    Ok(())
}

/// Show the effective configuration and any problems in the file,
/// optionally writing a default file first
pub fn show_config<W: Write>(
    manager: &ConfigManager,
    config: &Config,
    init: bool,
    out: &mut W,
) -> Result<()> {
    if init {
        let created = manager
            .initialize()
            .context("Failed to write default config")?;
        if created {
            writeln!(
                out,
                "{} Wrote default config to {}",
                style("✓").green().bold(),
                manager.config_path().display()
            )?;
        } else {
            writeln!(
                out,
                "Config already exists at {}",
                manager.config_path().display()
            )?;
        }
    }

    writeln!(out, "# {}", manager.config_path().display())?;
    let problems = manager
        .validate()
        .context("Failed to validate config")?;
    for problem in &problems {
        writeln!(out, "# {} {}", style("warning:").yellow().bold(), problem)?;
    }
    let text = toml::to_string_pretty(config).context("Failed to serialize config")?;
    write!(out, "{}", text)?;
    Ok(())
}

fn print_feed_summary<W: Write>(doc: &FeedDocument, out: &mut W) -> Result<()> {
    let channel = doc.channel();
    writeln!(out, "\n{}", style(channel.title()).bold())?;
    writeln!(out, "  {}", channel.link())?;
    if !channel.description().is_empty() {
        writeln!(out, "  {}", channel.description())?;
    }
    writeln!(out, "{}", "=".repeat(80))?;

    if doc.is_empty() {
        writeln!(out, "No items. Use 'add' to create one.")?;
        return Ok(());
    }

    for summary in doc.item_titles() {
        writeln!(
            out,
            "{:2}: {}  {}",
            summary.index,
            truncate(&summary.title, 60),
            style(&summary.pub_date).dim()
        )?;
    }
    Ok(())
}

/// Publication date used when the user leaves the prompt blank
fn default_pub_date() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn truncate(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars {
        s.to_string()
    } else {
        let cut: String = s.chars().take(max_chars).collect();
        format!("{}...", cut)
    }
}
