//! CLI command definitions and dispatch.
//!
//! This module provides the command-line interface for Literalura.
//! Each group of subcommands is implemented in its own submodule:
//! - `search`: Catalog search and saving a chosen result
//! - `list`: Catalogue listings, title lookup and seeding
//! - `menu`: Interactive menu used when no subcommand is given
//! - `config`: Showing and initializing the config file
//! - `output`: Text and JSON rendering shared by all of the above

mod config;
mod list;
mod menu;
mod output;
mod search;

use std::io::Write;
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use sqlx::SqlitePool;
use tokio::runtime::Runtime;
use tracing::info;

use crate::catalog::{CatalogApi, GutendexClient};
use crate::config::Config;
use crate::db;
use crate::error::ResultExt;
use crate::ingest::Ingestor;
use crate::query::LibraryQuery;
use crate::seed::{self, SeedOutcome};

use list::YearFilter;

/// Literalura CLI
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Database file (overrides store.path from the config file)
    #[arg(long, global = true, env = "LITERALURA_DB")]
    pub db: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand)]
pub enum Commands {
    /// Search the catalog by title or author and save one result
    Search {
        /// Search term
        term: String,
        /// Save the N-th result without prompting (0 = save nothing)
        #[arg(short, long)]
        pick: Option<usize>,
    },
    /// List saved books
    Books,
    /// List saved authors
    Authors,
    /// List authors alive in a year
    Alive {
        year: i32,
    },
    /// List authors born in a year
    Born {
        year: i32,
    },
    /// List authors deceased in a year
    Died {
        year: i32,
    },
    /// List books in a language (without a code, list the available languages)
    Language {
        /// Language code, e.g. "pt"
        code: Option<String>,
    },
    /// List the most downloaded books
    Top {
        /// Number of books to show
        #[arg(short, long, default_value_t = 5)]
        limit: u32,
    },
    /// Show the saved book matching a title
    Find {
        title: String,
    },
    /// Load the sample catalogue into an empty store
    Seed,
    /// Show the effective configuration
    Config {
        /// Write a default config file if none exists
        #[arg(long)]
        init: bool,
    },
}

/// Everything a command needs to talk to the catalog and the store.
pub(crate) struct App {
    pub(crate) pool: SqlitePool,
    pub(crate) catalog: Box<dyn CatalogApi>,
    pub(crate) ingestor: Ingestor,
    pub(crate) query: LibraryQuery,
    pub(crate) json: bool,
}

impl App {
    fn new(catalog: Box<dyn CatalogApi>, pool: SqlitePool, config: &Config, json: bool) -> Self {
        let timeout = config.store.timeout();
        Self {
            ingestor: Ingestor::new(pool.clone(), timeout),
            query: LibraryQuery::new(pool.clone(), timeout),
            pool,
            catalog,
            json,
        }
    }

    /// Open the store (creating and migrating it if needed) and build the catalog client.
    async fn open(cli: &Cli, config: &Config) -> anyhow::Result<Self> {
        let path = cli.db.clone().or_else(|| config.store.path.clone());
        let url = db::db_url(path.as_deref());
        let pool = db::init_db(&url)
            .await
            .with_context(format!("opening database {url}"))?;

        let seeding_explicitly = matches!(cli.command, Some(Commands::Seed));
        if config.store.seed_on_startup && !seeding_explicitly {
            if let SeedOutcome::Seeded { books, authors } = seed::seed_if_empty(&pool).await? {
                info!(books, authors, "Loaded sample catalogue into empty store");
            }
        }

        let catalog = GutendexClient::new(&config.catalog)?;
        Ok(Self::new(Box::new(catalog), pool, config, cli.json))
    }

    #[cfg(test)]
    pub(crate) fn for_tests(catalog: impl CatalogApi + 'static, pool: SqlitePool) -> Self {
        Self::new(Box::new(catalog), pool, &Config::default(), false)
    }
}

/// Run the specified CLI command, or the interactive menu when none is given.
pub fn run_command(cli: &Cli) -> anyhow::Result<()> {
    let config = crate::config::load();
    let mut out = std::io::stdout().lock();

    if let Some(Commands::Config { init }) = &cli.command {
        return config::cmd_config(&config, *init, &mut out);
    }

    let rt = Runtime::new()?;
    rt.block_on(async {
        let app = App::open(cli, &config).await?;
        let mut input = std::io::stdin().lock();

        match &cli.command {
            Some(Commands::Search { term, pick }) => {
                search::cmd_search(&app, term, *pick, &mut input, &mut out).await?;
            }
            Some(Commands::Books) => list::cmd_books(&app, &mut out).await?,
            Some(Commands::Authors) => list::cmd_authors(&app, &mut out).await?,
            Some(Commands::Alive { year }) => {
                list::cmd_authors_in_year(&app, YearFilter::Alive, *year, &mut out).await?
            }
            Some(Commands::Born { year }) => {
                list::cmd_authors_in_year(&app, YearFilter::Born, *year, &mut out).await?
            }
            Some(Commands::Died { year }) => {
                list::cmd_authors_in_year(&app, YearFilter::Died, *year, &mut out).await?
            }
            Some(Commands::Language { code }) => {
                list::cmd_language(&app, code.as_deref(), &mut out).await?
            }
            Some(Commands::Top { limit }) => list::cmd_top(&app, *limit, &mut out).await?,
            Some(Commands::Find { title }) => list::cmd_find(&app, title, &mut out).await?,
            Some(Commands::Seed) => list::cmd_seed(&app, &mut out).await?,
            Some(Commands::Config { .. }) => {}
            None => menu::run_menu(&app, &mut input, &mut out).await?,
        }

        out.flush()?;
        app.pool.close().await;
        Ok::<_, anyhow::Error>(())
    })
}
