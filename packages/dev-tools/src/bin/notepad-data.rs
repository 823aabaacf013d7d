//! NotepadPro data file inspector
//!
//! Small command-line front end over `NoteManager` for poking at a data
//! file during development without starting the desktop app.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin notepad-data -- list
//! cargo run --bin notepad-data -- add-category Work "#336699"
//! cargo run --bin notepad-data -- add-note "Standup" "<p>Yesterday / today</p>"
//! cargo run --bin notepad-data -- search standup
//! cargo run --bin notepad-data -- --data /tmp/scratch.json stats
//! ```
//!
//! # Data File
//!
//! Uses `--data <path>` if given, then `NOTEPAD_DATA_PATH`, otherwise the platform data directory
//! (`<data dir>/NotepadPro/notepad_data.json`). Logging is controlled by
//! `RUST_LOG` and defaults to `info`.

use anyhow::{anyhow, bail, Context, Result};
use chrono::{DateTime, Local, Utc};
use clap::{Parser, Subcommand};
use notepad_core::{Color, Note, NoteManager, StoreConfig, StoreError};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "notepad-data")]
#[command(about = "Inspect and edit a NotepadPro data file")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Data file to use instead of NOTEPAD_DATA_PATH or the platform default
    #[arg(short, long, global = true)]
    data: Option<PathBuf>,
}

#[derive(Subcommand, Debug, PartialEq)]
enum Command {
    /// List notes, optionally of one category ("" = uncategorized)
    List { category: Option<String> },

    /// List categories as a tree
    Categories,

    /// Create a note
    AddNote {
        title: String,
        content: Option<String>,
    },

    /// Create a root category
    AddCategory {
        name: String,
        /// #rrggbb, #rgb, #aarrggbb or a colour name
        color: Option<Color>,
    },

    /// Move a note into a category ("" = uncategorized)
    File {
        note_id: String,
        category_id: String,
    },

    /// Toggle the pinned flag
    Pin { note_id: String },

    /// Case-insensitive search over title and content
    Search { keyword: String },

    /// Print a note with its statistics
    Show { note_id: String },

    /// Delete a note
    Delete { note_id: String },

    /// Totals for the whole store
    Stats,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut manager = open_store(cli.data)?;
    manager.subscribe(|event, _| {
        tracing::debug!(event_type = event.event_type(), "Store event");
    });

    run(&mut manager, cli.command)?;

    if manager.save_if_dirty(None)? {
        println!("Saved {}", manager.data_file_path()?.display());
    }
    Ok(())
}

fn run(manager: &mut NoteManager, command: Command) -> Result<()> {
    match command {
        Command::List { category: None } => print_notes(&sorted(manager.get_all_notes())),
        Command::List {
            category: Some(category),
        } => print_notes(&sorted(manager.get_notes_by_category(&category))),
        Command::Categories => print_categories(manager, "", 0),
        Command::AddNote { title, content } => {
            let id = manager.create_note(Some(title.as_str())).id().to_string();
            if let Some(content) = content {
                manager.set_note_content(&id, &content);
            }
            println!("Created note {}", id);
        }
        Command::AddCategory { name, color } => {
            let id = manager.create_category(Some(name.as_str())).id().to_string();
            if let Some(color) = color {
                manager.set_category_color(&id, color);
            }
            println!("Created category {}", id);
        }
        Command::File {
            note_id,
            category_id,
        } => {
            if manager.get_category(&category_id).is_none() && !category_id.is_empty() {
                bail!("No category with id {}", category_id);
            }
            if !manager.set_note_category(&note_id, &category_id).is_changed() {
                println!("Nothing to change");
            }
        }
        Command::Pin { note_id } => {
            let pinned = manager
                .get_note(&note_id)
                .map(Note::is_pinned)
                .ok_or_else(|| anyhow!("No note with id {}", note_id))?;
            manager.set_note_pinned(&note_id, !pinned);
        }
        Command::Search { keyword } => print_notes(&sorted(manager.search_notes(&keyword))),
        Command::Show { note_id } => {
            let note = manager
                .get_note(&note_id)
                .ok_or_else(|| anyhow!("No note with id {}", note_id))?;
            print_note_details(manager, note);
        }
        Command::Delete { note_id } => {
            if !manager.delete_note(&note_id) {
                bail!("No note with id {}", note_id);
            }
        }
        Command::Stats => print_stats(manager),
    }
    Ok(())
}

/// Load the configured data file, starting empty if it does not exist yet
fn open_store(data: Option<PathBuf>) -> Result<NoteManager> {
    let mut config = StoreConfig::from_env();
    if let Some(path) = data {
        config = config.with_data_path(path);
    }
    let mut manager = NoteManager::new(config);
    match manager.load_from_file(None) {
        Ok(summary) if summary.skipped_records > 0 => {
            eprintln!(
                "Warning: skipped {} unreadable records in {}",
                summary.skipped_records,
                summary.path.display()
            );
        }
        Ok(_) => {}
        Err(StoreError::FileNotFound { path }) => {
            tracing::info!("No data file at {}, starting empty", path.display());
        }
        Err(e) => return Err(e).context("Failed to open data file"),
    }
    Ok(manager)
}

/// Pinned first, then most recently updated
fn sorted(mut notes: Vec<&Note>) -> Vec<&Note> {
    notes.sort_by(|a, b| {
        b.is_pinned()
            .cmp(&a.is_pinned())
            .then(b.updated_at().cmp(&a.updated_at()))
    });
    notes
}

fn local(time: DateTime<Utc>) -> String {
    time.with_timezone(&Local).format("%Y-%m-%d %H:%M").to_string()
}

fn print_notes(notes: &[&Note]) {
    if notes.is_empty() {
        println!("(no notes)");
        return;
    }
    for note in notes {
        println!(
            "{} {} {:<30} {}",
            if note.is_pinned() { "*" } else { " " },
            note.id(),
            note.title(),
            local(note.updated_at())
        );
    }
}

fn print_categories(manager: &NoteManager, parent_id: &str, depth: usize) {
    let mut children = manager.get_child_categories(parent_id);
    children.sort_by(|a, b| a.name().cmp(b.name()));
    for category in children {
        println!(
            "{}{} {} ({} notes) {}",
            "  ".repeat(depth),
            category.color(),
            category.name(),
            manager.get_notes_by_category(category.id()).len(),
            category.id()
        );
        // Parent links are not cycle-checked
        if depth < 32 {
            print_categories(manager, category.id(), depth + 1);
        }
    }
}

fn print_note_details(manager: &NoteManager, note: &Note) {
    let category = if note.is_uncategorized() {
        "(uncategorized)".to_string()
    } else {
        manager
            .get_category(note.category_id())
            .map(|c| c.name().to_string())
            .unwrap_or_else(|| format!("(missing {})", note.category_id()))
    };
    let stats = note.stats();

    println!("Title:    {}", note.title());
    println!("Id:       {}", note.id());
    println!("Category: {}", category);
    println!("Pinned:   {}", note.is_pinned());
    println!("Created:  {}", local(note.created_at()));
    println!("Updated:  {}", local(note.updated_at()));
    println!("Words:    {}  Characters: {}", stats.words, stats.chars);
    println!();
    println!("{}", manager.note_preview(note.id()).unwrap_or_default());
}

fn print_stats(manager: &NoteManager) {
    let notes = manager.get_all_notes();
    let words: usize = notes.iter().map(|n| n.stats().words).sum();
    println!("Notes:         {}", manager.note_count());
    println!("  pinned:      {}", manager.get_pinned_notes().len());
    println!("  uncategorized: {}", manager.get_notes_by_category("").len());
    println!("Categories:    {}", manager.category_count());
    println!("  roots:       {}", manager.get_root_categories().len());
    println!("Words:         {}", words);
}
