//! CLI command definitions and parsing
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "steward",
    version,
    about = "Governance decision review console",
    long_about = "Steward tracks autonomous organization-management decisions, presents a \
                  filterable and sortable review queue, and records an audit trail of \
                  reviewer actions."
)]
pub struct Cli {
    /// Global config file path (defaults to ~/.config/steward/config.toml)
    #[arg(short, long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show dashboard metrics and feed status
    Status,

    /// List decisions with filtering, sorting, and pagination
    List {
        /// Filter by status (pending|approved|rejected|executed|all)
        #[arg(short, long)]
        status: Option<String>,

        /// Filter by priority (low|medium|high|critical|all)
        #[arg(short, long)]
        priority: Option<String>,

        /// Case-insensitive search over title and description
        #[arg(short = 'q', long)]
        search: Option<String>,

        /// Sort key (title|created|status|priority)
        #[arg(long)]
        sort: Option<String>,

        /// Sort direction (asc|desc)
        #[arg(long)]
        direction: Option<String>,

        /// 1-based page index
        #[arg(long, default_value = "1")]
        page: usize,

        /// Rows per page (defaults to the configured page size)
        #[arg(long)]
        page_size: Option<usize>,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Show one decision in full
    Show {
        /// Decision id
        id: String,
    },

    /// Approve a pending decision
    Approve {
        /// Decision id
        id: String,
    },

    /// Reject a pending decision
    Reject {
        /// Decision id
        id: String,
    },

    /// Render the organization tree
    Tree {
        /// Expand every node instead of just the root
        #[arg(long)]
        expand_all: bool,

        /// Additional node ids to expand
        #[arg(short, long)]
        expand: Vec<String>,
    },

    /// Show the audit trail and its summary stats
    Audit {
        /// Maximum number of events to show
        #[arg(short, long, default_value = "10")]
        limit: usize,

        /// Show results in JSON format
        #[arg(long)]
        json: bool,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Validate configuration file
    Validate {
        /// Path to config file (defaults to standard location)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Initialize default configuration
    Init {
        /// Force overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    /// Parse CLI arguments from command line
    pub fn parse_args() -> Self {
        Self::parse()
    }
}
