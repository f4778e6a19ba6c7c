//! CLI type definitions
//!
//! This module contains clap command structures that define the CLI interface.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

use super::commands::browse::BrowseArgs;
use super::commands::delete::DeleteArgs;
use super::commands::draft::DraftArgs;
use super::commands::init::InitArgs;
use super::commands::show::ShowArgs;
use super::context::GlobalOptions;

#[derive(Parser, Debug)]
#[command(name = "flowshelf")]
#[command(about = "Flowshelf - Automation workflow catalog", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,

    /// Run against an in-memory store as the demo user
    #[arg(long, global = true)]
    pub demo: bool,

    /// Configuration file (defaults to .flowshelf/config.yaml)
    #[arg(short, long, global = true, env = "FLOWSHELF_CONFIG")]
    pub config: Option<PathBuf>,

    /// Act as this signed-in user id
    #[arg(short, long, global = true)]
    pub user: Option<String>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

impl Cli {
    pub fn global_options(&self) -> GlobalOptions {
        GlobalOptions {
            json: self.json,
            demo: self.demo,
            config: self.config.clone(),
            user: self.user.clone(),
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Initialize Flowshelf configuration
    Init(InitArgs),

    /// Browse and filter the workflow catalog
    Browse(BrowseArgs),

    /// Show a single workflow
    Show(ShowArgs),

    /// Draft a workflow with the generative API
    Draft(DraftArgs),

    /// Delete one of your saved workflows
    Delete(DeleteArgs),
}
