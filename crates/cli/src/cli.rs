//! CLI definitions and command dispatch.

use std::path::PathBuf;

use anyhow::Result;
use clap::{Parser, Subcommand};

use crate::commands::{init, layout, render, validate};

#[derive(Parser)]
#[command(name = "cardsmith")]
#[command(about = "Render trading cards from a JSON deck description")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::Args)]
pub struct RenderArgs {
    /// Deck configuration (cartas.json)
    pub config: PathBuf,
    /// Remove the output directory before rendering
    #[arg(long)]
    pub clean: bool,
    /// Bundle the rendered cards into a ZIP archive
    #[arg(long)]
    pub archive: Option<PathBuf>,
    /// Skip cards still marked as drafts
    #[arg(long)]
    pub ready_only: bool,
    /// Font to use when the configured one cannot be loaded
    #[arg(long)]
    pub fallback_font: Option<PathBuf>,
    /// Render on the current thread only
    #[arg(long)]
    pub sequential: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render every card in a configuration
    Render {
        #[command(flatten)]
        args: RenderArgs,
    },
    /// Check every card for missing titles or descriptions
    Validate { config: PathBuf },
    /// Print the text placement of one card without drawing it
    Layout {
        config: PathBuf,
        #[arg(long)]
        title: String,
    },
    /// Write a starter configuration with the stock card geometry
    Init {
        #[arg(default_value = "cartas.json")]
        path: PathBuf,
        /// Overwrite an existing file
        #[arg(long)]
        force: bool,
    },
}

impl Commands {
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Render { args } => render(&args)?,
            Commands::Validate { config } => validate(&config)?,
            Commands::Layout { config, title } => layout(&config, &title)?,
            Commands::Init { path, force } => init(&path, force)?,
        }
        Ok(())
    }
}
