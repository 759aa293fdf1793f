#![warn(clippy::pedantic)]

use std::{
    path::PathBuf,
    sync::{Arc, Mutex},
};

use clap::{Parser, Subcommand};
use log::LevelFilter;
use setflow_storage::memory;

mod commands;
mod render;
mod terminal;

#[derive(Parser)]
#[command(name = "setflow", version, about = "Work through a workout plan set by set")]
struct Cli {
    /// Workout plan in JSON format
    #[arg(long, global = true, default_value = "data/workouts.json")]
    plan: PathBuf,
    /// Settings file, created on first change
    #[arg(long, global = true, default_value = "settings.json")]
    settings: PathBuf,
    /// Echo informational log messages on stderr
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the days of the plan
    Days,
    /// Show the exercises of a day
    Show {
        /// Day to show, defaults to the configured default day
        day: Option<String>,
    },
    /// Work through a day interactively
    Run {
        /// Day to start with, defaults to the configured default day
        day: Option<String>,
    },
    /// Work through a whole day without waiting and print every transition
    Simulate {
        /// Day to simulate, defaults to the configured default day
        day: Option<String>,
    },
    /// Settings management
    Settings {
        #[command(subcommand)]
        action: commands::settings::SettingsAction,
    },
}

fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        LevelFilter::Info
    } else {
        LevelFilter::Warn
    };
    if let Err(err) = setflow_app::log::init(Arc::new(Mutex::new(memory::Log::default())), level) {
        eprintln!("failed to initialize logger: {err}");
    }

    let result = match cli.command {
        Commands::Days => commands::day::list(&cli.plan),
        Commands::Show { day } => commands::day::show(&cli.plan, &cli.settings, day),
        Commands::Run { day } => commands::session::run(&cli.plan, &cli.settings, day),
        Commands::Simulate { day } => commands::session::simulate(&cli.plan, &cli.settings, day),
        Commands::Settings { action } => commands::settings::run(&cli.settings, action),
    };

    if let Err(e) = result {
        eprintln!("error: {e:#}");
        std::process::exit(1);
    }
}
