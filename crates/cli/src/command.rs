//! One console command per input line.

use clap::{Parser, Subcommand};
use werewolf_core::Activity;

#[derive(Debug, Parser)]
#[command(no_binary_name = true, disable_help_flag = true)]
pub struct Line {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Create a match and join it as its first player
    Create { name: String },

    /// Join a waiting match
    Join {
        code: String,
        name: String,
        /// Name already held in this match, if any
        #[arg(long = "as")]
        identity: Option<String>,
    },

    /// Assign roles and begin the first night
    Start { code: String },

    /// Cast a ballot for `target`
    Act {
        code: String,
        player: String,
        target: String,
        /// Activity the ballot is meant for
        #[arg(long)]
        activity: Option<Activity>,
    },

    /// Show a match overview
    Info {
        code: String,
        #[arg(long)]
        player: Option<String>,
    },

    /// Show the state of one activity for a player
    Activity {
        code: String,
        player: String,
        activity: Activity,
    },

    /// Follow a match in the background until it ends
    Watch {
        code: String,
        #[arg(long)]
        player: Option<String>,
    },

    /// Count stored and created matches
    Status,

    /// Delete a match
    Remove { code: String },
}

impl Line {
    pub fn parse_line(line: &str) -> Result<Self, clap::Error> {
        Self::try_parse_from(line.split_whitespace())
    }
}
