mod commands;
mod notifier;

use std::sync::Arc;

use anyhow::Result;
use campo_core::{JsonFileStorage, StatusFilter, TaskStore};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "campo")]
#[command(about = "Manage your farm task calendar")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task
    Add {
        title: String,

        /// Task date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Time of day (HH:MM)
        #[arg(short, long)]
        time: Option<String>,

        /// Category key
        #[arg(short, long, default_value = "geral")]
        category: String,
    },
    /// List a day's tasks
    List {
        /// Day to list (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Only these category keys (repeatable)
        #[arg(short, long)]
        category: Vec<String>,

        /// todas, concluidas or pendentes
        #[arg(short, long, default_value = "todas")]
        status: String,

        /// Case-insensitive title search
        #[arg(long)]
        search: Option<String>,
    },
    /// Toggle a task's completion
    Done {
        /// Task id (a unique prefix is enough)
        id: String,

        #[arg(short, long)]
        date: Option<String>,
    },
    /// Edit a task's title, time or category
    Edit {
        id: String,

        #[arg(short, long)]
        date: Option<String>,

        #[arg(long)]
        title: Option<String>,

        /// New time (HH:MM), or "none" to clear it
        #[arg(long)]
        time: Option<String>,

        #[arg(long)]
        category: Option<String>,
    },
    /// Delete a task
    Rm {
        id: String,

        #[arg(short, long)]
        date: Option<String>,
    },
    /// Move a task to another date
    Mv {
        id: String,

        /// Source date (defaults to today)
        #[arg(long)]
        from: Option<String>,

        /// Destination date
        #[arg(long)]
        to: String,
    },
    /// Show task statistics
    Stats,
    /// Render the calendar grid
    Cal {
        /// Focal date (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// "mes" or "semana"; remembered for next time
        #[arg(short, long)]
        mode: Option<String>,
    },
    /// Manage categories
    Category {
        #[command(subcommand)]
        command: CategoryCommands,
    },
    /// Schedule reminders for a day's timed tasks and wait for them
    Remind {
        /// Day to remind for (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Minutes of lead time before each task
        #[arg(short, long, default_value_t = 15)]
        lead: i64,
    },
}

#[derive(Subcommand)]
enum CategoryCommands {
    /// List known categories
    List,
    /// Add or replace a category
    Add {
        key: String,

        #[arg(long, default_value = "#6b7280")]
        color: String,

        #[arg(long)]
        label: Option<String>,

        #[arg(long, default_value = "note")]
        icon: String,
    },
    /// Remove a category (tasks keep the dangling key)
    Rm { key: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();
    let storage = Arc::new(JsonFileStorage::default_dir()?);
    let store = TaskStore::load(storage).await?;

    match cli.command {
        Commands::Add {
            title,
            date,
            time,
            category,
        } => {
            let date = parse_date(date.as_deref())?;
            commands::add::run(&store, date, title, time, category).await
        }
        Commands::List {
            date,
            category,
            status,
            search,
        } => {
            let date = parse_date(date.as_deref())?;
            let status = parse_status(&status)?;
            commands::list::run(&store, date, category, status, search).await
        }
        Commands::Done { id, date } => {
            let date = parse_date(date.as_deref())?;
            commands::done::run(&store, date, &id).await
        }
        Commands::Edit {
            id,
            date,
            title,
            time,
            category,
        } => {
            let date = parse_date(date.as_deref())?;
            commands::edit::run(&store, date, &id, title, time, category).await
        }
        Commands::Rm { id, date } => {
            let date = parse_date(date.as_deref())?;
            commands::rm::run(&store, date, &id).await
        }
        Commands::Mv { id, from, to } => {
            let from = parse_date(from.as_deref())?;
            let to = parse_date(Some(&to))?;
            commands::mv::run(&store, from, to, &id).await
        }
        Commands::Stats => commands::stats::run(&store).await,
        Commands::Cal { date, mode } => {
            let date = parse_date(date.as_deref())?;
            commands::cal::run(&store, date, mode.as_deref()).await
        }
        Commands::Category { command } => match command {
            CategoryCommands::List => commands::category::list(&store).await,
            CategoryCommands::Add {
                key,
                color,
                label,
                icon,
            } => commands::category::add(&store, key, color, label, icon).await,
            CategoryCommands::Rm { key } => commands::category::rm(&store, &key).await,
        },
        Commands::Remind { date, lead } => {
            let date = parse_date(date.as_deref())?;
            commands::remind::run(&store, date, lead).await
        }
    }
}

/// Parse a YYYY-MM-DD argument, defaulting to today's local date.
fn parse_date(arg: Option<&str>) -> Result<NaiveDate> {
    match arg {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map_err(|_| anyhow::anyhow!("Invalid date '{}'. Expected YYYY-MM-DD", s)),
        None => Ok(Local::now().date_naive()),
    }
}

fn parse_status(arg: &str) -> Result<StatusFilter> {
    StatusFilter::from_key(arg).ok_or_else(|| {
        anyhow::anyhow!(
            "Invalid status '{}'. Expected todas, concluidas or pendentes",
            arg
        )
    })
}
