//! CLI argument parsing types.
//!
//! This module provides the command-line interface structure for the cfapi binary.

use clap::{Parser, Subcommand, ValueEnum};

/// Cloud Foundry V3 API command-line interface.
#[derive(Parser, Debug)]
#[command(name = "cfapi", about = "Cloud Foundry V3 API CLI", version)]
pub struct Cli {
    /// Output results as JSON instead of a table.
    #[arg(long, global = true, default_value = "false")]
    pub json: bool,

    /// Log requests and pagination to stderr.
    #[arg(short, long, global = true, default_value = "false")]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Get a single resource by guid.
    Get {
        /// The type of resource to get.
        entity: Entity,

        /// The resource guid.
        guid: String,
    },

    /// List resources with optional filtering and pagination.
    List {
        /// The type of resource to list.
        entity: Entity,

        /// Page number (1-indexed).
        #[arg(long)]
        page: Option<u32>,

        /// Number of items per page.
        #[arg(long)]
        per_page: Option<u32>,

        /// Fetch every page instead of a single one.
        #[arg(long, conflicts_with = "page")]
        all: bool,

        /// Filter by name (repeatable).
        #[arg(long)]
        name: Vec<String>,

        /// Filter by space guid (repeatable).
        #[arg(long)]
        space: Vec<String>,

        /// Filter by organization guid (repeatable).
        #[arg(long)]
        org: Vec<String>,

        /// Label selector, e.g. `env=prod`.
        #[arg(long)]
        label_selector: Option<String>,
    },

    /// Delete a resource.
    Delete {
        /// The type of resource to delete.
        entity: Entity,

        /// The resource guid.
        guid: String,

        /// Wait for the deletion job to finish.
        #[arg(long)]
        wait: bool,

        /// Seconds to wait for the job before giving up.
        #[arg(long, default_value = "300")]
        timeout: u64,
    },
}

/// Resource types that can be operated on.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Entity {
    /// An application.
    #[value(alias = "apps")]
    App,
    /// A space.
    #[value(alias = "spaces")]
    Space,
    /// An organization.
    #[value(aliases = ["organizations", "org", "orgs"])]
    Organization,
    /// A route.
    #[value(alias = "routes")]
    Route,
    /// A role assignment.
    #[value(alias = "roles")]
    Role,
    /// A service credential binding.
    #[value(name = "binding", alias = "bindings")]
    ServiceCredentialBinding,
    /// An asynchronous job.
    #[value(alias = "jobs")]
    Job,
}
