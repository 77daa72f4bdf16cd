//! # CLI Layer
//!
//! The only place in the codebase that touches stdout, stdin or the tracing
//! subscriber.
//!
//! - `run()`: parse arguments, set up logging, build the context, dispatch
//! - `handle_*()`: per-command handlers that call the API and print the result
//!
//! Handlers never hold business rules. The one thing they add is the edit-form
//! merge in `update`: fields that were not given are filled in from the
//! stored disk, so the repository always receives a full replacement.

use super::render::{print_cards, print_disk_details, print_messages, render_text_list};
use super::setup::{Cli, Commands};
use clap::Parser;
use colored::Colorize;
use diskledger::api::{ConfigAction, DiskApi};
use diskledger::commands::config;
use diskledger::config::Backend;
use diskledger::error::{DiskError, Result};
use diskledger::filter::DiskFilter;
use diskledger::form::{parse_contents, parse_gb, DiskDraft};
use diskledger::init::{data_dir, initialize};
use diskledger::store::DiskRepository;
use std::io::{self, Write};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

struct AppContext {
    api: DiskApi<Box<dyn DiskRepository>>,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    // Config does not open a store, so it still works when the configured
    // backend can not be reached.
    let backend = cli.backend;
    match cli.command {
        Some(Commands::Add {
            name,
            capacity,
            contents,
        }) => handle_add(&mut init_context(backend)?, &name, &capacity, &contents),
        Some(Commands::List {
            name,
            content,
            min_free,
        }) => handle_list(&init_context(backend)?, name, content, min_free),
        Some(Commands::View { id }) => handle_view(&init_context(backend)?, &id),
        Some(Commands::Update {
            id,
            name,
            capacity,
            contents,
            clear_contents,
        }) => handle_update(
            &mut init_context(backend)?,
            &id,
            name,
            capacity,
            &contents,
            clear_contents,
        ),
        Some(Commands::Delete { id, yes }) => handle_delete(&mut init_context(backend)?, &id, yes),
        Some(Commands::Seed) => handle_seed(&mut init_context(backend)?),
        Some(Commands::Config { key, value }) => handle_config(key, value),
        None => handle_list(&init_context(backend)?, None, None, None),
    }
}

/// Logs go to stderr so stdout stays clean for cards.
fn init_tracing(verbose: bool) {
    let default_directive = if verbose {
        "diskledger=debug"
    } else {
        "diskledger=warn"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_directive));

    let use_json = std::env::var("LOG_FORMAT")
        .map(|v| v.eq_ignore_ascii_case("json"))
        .unwrap_or(false);

    let registry = tracing_subscriber::registry().with(filter);
    let result = if use_json {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .try_init()
    } else {
        registry
            .with(
                tracing_subscriber::fmt::layer()
                    .with_writer(std::io::stderr)
                    .with_ansi(false),
            )
            .try_init()
    };
    if let Err(e) = result {
        eprintln!("Warning: could not initialise logging: {}", e);
    }
}

fn init_context(backend: Option<Backend>) -> Result<AppContext> {
    let dir = data_dir()?;
    let api = initialize(&dir, backend)?;
    Ok(AppContext { api })
}

fn handle_add(
    ctx: &mut AppContext,
    name: &str,
    capacity: &str,
    contents: &[String],
) -> Result<()> {
    let draft = DiskDraft::parse(name, capacity, contents)?;
    let result = ctx.api.add_disk(draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_list(
    ctx: &AppContext,
    name: Option<String>,
    content: Option<String>,
    min_free: Option<i64>,
) -> Result<()> {
    let filter = DiskFilter::new(
        name.unwrap_or_default(),
        content.unwrap_or_default(),
        min_free,
    );
    let result = ctx.api.list_disks(&filter)?;
    print_cards(&result.listed_disks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_view(ctx: &AppContext, id: &str) -> Result<()> {
    let result = ctx.api.view_disk(id)?;
    print_disk_details(&result.listed_disks);
    print_messages(&result.messages);
    Ok(())
}

fn handle_update(
    ctx: &mut AppContext,
    id: &str,
    name: Option<String>,
    capacity: Option<String>,
    contents: &[String],
    clear_contents: bool,
) -> Result<()> {
    let mut current = ctx.api.view_disk(id)?;
    if current.listed_disks.is_empty() {
        print_messages(&current.messages);
        return Ok(());
    }
    let disk = current.listed_disks.remove(0);

    let name = match name {
        Some(n) => n.trim().to_string(),
        None => disk.name.clone(),
    };
    let total_capacity_gb = match capacity {
        Some(c) => parse_gb(&c, "capacity")?,
        None => disk.total_capacity_gb,
    };
    let contents = if clear_contents {
        Vec::new()
    } else if contents.is_empty() {
        disk.contents.clone()
    } else {
        parse_contents(contents)?
    };

    let draft = DiskDraft::new(name, total_capacity_gb, contents);
    let result = ctx.api.update_disk(&disk.id, draft)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_delete(ctx: &mut AppContext, id: &str, yes: bool) -> Result<()> {
    let found = ctx.api.view_disk(id)?;
    let Some(disk) = found.listed_disks.first() else {
        print_messages(&found.messages);
        return Ok(());
    };

    if !yes {
        println!(
            "This will permanently remove {} ({} GB, {} items).",
            disk.name.bold(),
            disk.total_capacity_gb,
            disk.contents.len()
        );
        print!("Delete? [y/N]: ");
        io::stdout().flush().map_err(DiskError::Io)?;

        let mut input = String::new();
        io::stdin().read_line(&mut input).map_err(DiskError::Io)?;

        if !matches!(input.trim(), "y" | "Y" | "yes") {
            println!("{}", "Operation cancelled.".dimmed());
            return Ok(());
        }
    }

    let result = ctx.api.delete_disk(&disk.id)?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_seed(ctx: &mut AppContext) -> Result<()> {
    let result = ctx.api.seed()?;
    print_messages(&result.messages);
    Ok(())
}

fn handle_config(key: Option<String>, value: Option<String>) -> Result<()> {
    let action = match (key.clone(), value) {
        (None, _) => ConfigAction::ShowAll,
        (Some(k), None) => ConfigAction::ShowKey(k),
        (Some(k), Some(v)) => ConfigAction::Set(k, v),
    };

    let result = config::run(&data_dir()?, action)?;
    if key.is_none() {
        if let Some(config) = &result.config {
            let lines: Vec<String> = config
                .list_all()
                .into_iter()
                .map(|(k, v)| format!("{} = {}", k, v))
                .collect();
            print!("{}", render_text_list(&lines, "No configuration values."));
        }
    }
    print_messages(&result.messages);
    Ok(())
}
