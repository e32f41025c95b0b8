//! Main CLI application structure

use clap::{Parser, Subcommand};
use anyhow::Result;

use super::output::{Output, OutputFormat};
use super::{filter_cmd, restaurant, roll_cmd, tui};
use crate::domain::Category;
use crate::storage::{Config, Project};

#[derive(Parser)]
#[command(name = "dinner")]
#[command(author, version, about = "Can't decide what to eat? Let the dice pick.")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format (defaults to the global config, then text)
    #[arg(long, short = 'f', global = true)]
    pub format: Option<OutputFormat>,

    /// Enable verbose output for debugging
    #[arg(long, short = 'v', global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new dinner project
    Init {
        /// Path to initialize (defaults to current directory)
        #[arg(default_value = ".")]
        path: String,

        /// Start with a few example restaurants
        #[arg(long)]
        seed: bool,
    },

    /// Add a restaurant
    ///
    /// Examples:
    ///   dinner add "Ramen Bar"
    ///   dinner add "Burger Joint" --category fast-food
    ///   dinner add "Noodle House" -c dine-in-or-takeout
    Add {
        /// Restaurant name
        name: String,

        /// Category: dine-in, takeout, fast-food, or dine-in-or-takeout
        #[arg(long, short, default_value = "dine-in")]
        category: Category,
    },

    /// Edit a restaurant's name and/or category
    Edit {
        /// Restaurant ID
        id: String,

        /// New name
        #[arg(long, short)]
        name: Option<String>,

        /// New category
        #[arg(long, short)]
        category: Option<Category>,
    },

    /// Remove a restaurant
    Remove {
        /// Restaurant ID
        id: String,
    },

    /// List all restaurants
    List,

    /// Show the restaurants the next roll can pick from
    Pool,

    /// Show or change the active category filters
    #[command(subcommand)]
    Filter(filter_cmd::FilterCommands),

    /// Roll the dice and pick a restaurant
    Roll {
        /// Only print the result, without the animated frames
        #[arg(long, short)]
        quiet: bool,

        /// Use the short animation (11 draws, 40ms apart)
        #[arg(long)]
        quick: bool,

        /// Seed the random draws for a reproducible roll
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Launch the interactive decider
    Tui,
}

/// Main entry point for the CLI
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let format = match cli.format {
        Some(format) => format,
        None => Config::load()
            .map(|config| config.global.default_format.into())
            .unwrap_or_default(),
    };
    let output = Output::new(format, cli.verbose);

    output.verbose("Dinner decider starting");

    match cli.command {
        Commands::Init { path, seed } => {
            output.verbose_ctx("init", &format!("Initializing project at: {}", path));
            let project = Project::init(&path)?;
            output.verbose_ctx(
                "init",
                &format!("Created .dinner directory at: {}", project.dinner_dir().display()),
            );

            let seeded = if seed { project.seed()? } else { 0 };
            if output.is_json() {
                output.data(&serde_json::json!({
                    "initialized": project.root().display().to_string(),
                    "seeded": seeded,
                }));
            } else {
                output.success(&format!(
                    "Initialized dinner project at {}",
                    project.root().display()
                ));
                if seeded > 0 {
                    output.success(&format!("Added {} starter restaurants", seeded));
                }
            }
        }

        Commands::Add { name, category } => restaurant::add(&output, &name, category)?,
        Commands::Edit { id, name, category } => {
            restaurant::edit(&output, &id, name.as_deref(), category)?
        }
        Commands::Remove { id } => restaurant::remove(&output, &id)?,
        Commands::List => restaurant::list(&output)?,
        Commands::Pool => restaurant::pool(&output)?,

        Commands::Filter(cmd) => filter_cmd::run(cmd, &output)?,

        Commands::Roll { quiet, quick, seed } => {
            output.verbose_ctx(
                "roll",
                &format!("quiet={}, quick={}, seed={:?}", quiet, quick, seed),
            );
            roll_cmd::run(&output, quiet, quick, seed)?
        }

        Commands::Tui => tui::run(&output)?,
    }

    output.verbose("Command completed successfully");
    Ok(())
}
