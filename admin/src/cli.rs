use clap::{Parser, Subcommand};
use errand_core::{Activity, ErrandStatus, Role};

use crate::config::Settings;

/// Operator console for the errand marketplace API.
#[derive(Debug, Parser)]
#[command(name = "errand-admin", version)]
pub struct Cli {
    #[command(flatten)]
    pub settings: Settings,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// Manage marketplace users.
    #[command(subcommand)]
    Users(UsersCommand),
    /// Manage errands.
    #[command(subcommand)]
    Errands(ErrandsCommand),
    /// Show aggregate stats and the most recent errands.
    Dashboard,
}

#[derive(Debug, Clone, Subcommand)]
pub enum UsersCommand {
    List {
        /// Case-insensitive match on name or email.
        #[arg(long, default_value = "")]
        search: String,
        /// `client`/`requester` or `worker`/`fulfiller`.
        #[arg(long)]
        role: Option<Role>,
        /// `active` or `inactive`.
        #[arg(long)]
        status: Option<Activity>,
    },
    Activate {
        id: String,
    },
    Deactivate {
        id: String,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Clone, Subcommand)]
pub enum ErrandsCommand {
    List {
        /// Case-insensitive match on title, client name or location.
        #[arg(long, default_value = "")]
        search: String,
        #[arg(long)]
        status: Option<ErrandStatus>,
    },
    SetStatus {
        id: String,
        /// waiting, in_progress, completed or cancelled.
        status: ErrandStatus,
    },
    Delete {
        id: String,
    },
}
