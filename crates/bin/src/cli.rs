//! CLI argument definitions for the Shoplist binary.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use shoplist::{ItemId, SortKey};

/// Storage backend type
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Backend {
    /// SQLite database (default)
    Sqlite,
    /// PostgreSQL database (for shared deployments)
    Postgres,
    /// In-memory with JSON persistence (for development and ephemeral deployments)
    Inmemory,
}

/// Shoplist shopping list server
#[derive(Parser, Debug)]
#[command(name = "shoplist")]
#[command(about = "Shoplist: named shopping lists over HTTP and the command line")]
#[command(version)]
pub struct Cli {
    /// Print machine-readable JSON instead of tables
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the Shoplist HTTP server
    Serve(ServeArgs),
    /// Check health of a running Shoplist server
    Health(HealthArgs),
    /// Read and edit lists in the local backend
    List(ListArgs),
}

/// Storage backend selection shared by every command that opens a store
#[derive(clap::Args, Debug, Clone)]
pub struct BackendConfig {
    /// Storage backend to use
    #[arg(short, long, default_value = "sqlite", env = "SHOPLIST_BACKEND")]
    pub backend: Backend,

    /// Data directory for storage files.
    /// For SQLite: stores shoplist.db
    /// For InMemory: stores shoplist.json
    #[arg(short = 'D', long, env = "SHOPLIST_DATA_DIR")]
    pub data_dir: Option<PathBuf>,

    /// PostgreSQL connection URL (required when backend=postgres)
    #[arg(long, env = "SHOPLIST_POSTGRES_URL")]
    pub postgres_url: Option<String>,
}

/// Arguments for the serve command
#[derive(clap::Args, Debug)]
pub struct ServeArgs {
    /// Port to listen on
    #[arg(short, long, default_value_t = 8080, env = "SHOPLIST_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(long, default_value = "0.0.0.0", env = "SHOPLIST_HOST")]
    pub host: String,

    #[command(flatten)]
    pub backend_config: BackendConfig,
}

/// Arguments for the health command
#[derive(clap::Args, Debug)]
pub struct HealthArgs {
    /// Base URL of the server to check
    #[arg(long, default_value = "http://127.0.0.1:8080", env = "SHOPLIST_URL")]
    pub url: String,

    /// Timeout in seconds
    #[arg(short, long, default_value_t = 5)]
    pub timeout: u64,
}

/// Arguments for the list command group
#[derive(clap::Args, Debug)]
pub struct ListArgs {
    #[command(flatten)]
    pub backend_config: BackendConfig,

    #[command(subcommand)]
    pub command: ListCommand,
}

#[derive(Subcommand, Debug)]
pub enum ListCommand {
    /// Show a list's items
    Show {
        list_id: String,
        /// Sort order: position, description, quantity or id
        #[arg(short, long, default_value_t = SortKey::Position)]
        sort_by: SortKey,
    },
    /// Add an item to a list, creating the list if needed
    Add {
        list_id: String,
        description: String,
        #[arg(short, long, default_value_t = 1, allow_negative_numbers = true)]
        quantity: i32,
    },
    /// Remove an item from a list
    Remove { list_id: String, item_id: ItemId },
    /// Remove every item from a list
    Clear { list_id: String },
    /// Change an item's quantity
    SetQuantity {
        list_id: String,
        item_id: ItemId,
        #[arg(allow_negative_numbers = true)]
        quantity: i32,
    },
    /// List the ids of every stored list
    Ids,
}
