use clap::{Parser, Subcommand};
use std::path::PathBuf;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::storage::file::DEFAULT_DATA_PATH;

#[derive(Parser, Debug)]
#[command(name = "rusty-sos", version, about = "Personal emergency contacts")]
pub struct Cli {
    /// Contact backend (memory, json, remote)
    #[arg(long, env = "SOS_BACKEND", default_value_t = String::from("json"))]
    pub backend: String,

    /// Signed-in user the contacts belong to
    #[arg(long, env = "SOS_USER")]
    pub user: Option<String>,

    /// File used by the json backend
    #[arg(long, env = "SOS_DATA_PATH", default_value = DEFAULT_DATA_PATH)]
    pub data_path: PathBuf,

    /// Base url of the remote contact store
    #[arg(long, env = "SOS_REMOTE_URL")]
    pub remote_url: Option<String>,

    /// API key for the remote contact store
    #[arg(long, env = "SOS_API_KEY", hide_env_values = true)]
    pub api_key: Option<String>,

    /// Request timeout for the remote contact store, in seconds
    #[arg(long, env = "SOS_TIMEOUT_SECS", default_value_t = DEFAULT_TIMEOUT_SECS)]
    pub timeout_secs: u64,

    /// Log store activity to stderr
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Subcommand and their flags
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List personal emergency contacts
    List,

    /// Add a new personal contact
    Add {
        /// Contact name
        #[arg(long)]
        name: String,

        /// Contact phone number
        #[arg(long)]
        phone: String,
    },

    /// Replace the name and number of an existing contact
    Edit {
        /// Id of the contact to edit
        #[arg(long)]
        id: String,

        /// New name
        #[arg(long)]
        name: String,

        /// New phone number
        #[arg(long)]
        phone: String,
    },

    /// Delete a contact by id
    Delete {
        /// Id of the contact to delete
        #[arg(long)]
        id: String,
    },
}
