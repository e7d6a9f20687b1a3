//! CLI module - Command-line interface for dailymenu
//!
//! This module provides a structured CLI using clap for argument parsing.

pub mod commands;

use clap::{ArgAction, Parser, Subcommand};

/// dailymenu - daily menu ordering backend
#[derive(Parser)]
#[command(name = "dailymenu")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API (default)
    #[command(alias = "server")]
    Serve,

    /// Write a default config.toml if none exists
    Init,

    /// Create a user account
    #[command(alias = "adduser")]
    CreateUser {
        /// Login email
        #[arg(long)]
        email: String,

        /// Password
        #[arg(long)]
        password: String,

        /// Display name
        #[arg(long, default_value = "")]
        name: String,

        /// Allow the user to manage options and menus
        #[arg(long)]
        staff: bool,

        /// Superusers are always staff as well
        #[arg(long)]
        superuser: bool,
    },

    /// Enable or disable login for an existing user
    SetActive {
        /// Login email
        #[arg(long)]
        email: String,

        /// `false` locks the account, `true` unlocks it
        #[arg(long, action = ArgAction::Set)]
        active: bool,
    },

    /// Show the most recent menus
    #[command(alias = "ls")]
    Menus {
        /// Number of menus to show
        #[arg(long, short, default_value = "10")]
        limit: usize,
    },
}
