//! CLI workbench for the Runia battle engine.

mod commands;

use std::process;

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "runia",
    about = "Runia Chronicles — battle engine workbench",
    version,
    propagate_version = true
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll a dice expression through the exploding-dice engine
    Roll {
        /// Expression like "2d6", "d20", "3d10"
        expression: String,

        /// Extra dice rolled, keeping the highest
        #[arg(short, long, default_value = "0")]
        advantage: u32,

        /// Extra dice rolled, keeping the lowest
        #[arg(short, long, default_value = "0")]
        disadvantage: u32,

        /// Add the baked-in d20 check the battle formulas use
        #[arg(short, long)]
        check: bool,

        /// RNG seed for a reproducible roll
        #[arg(short, long)]
        seed: Option<u64>,
    },

    /// List the party and the enemy bestiary
    Roster,

    /// Run a whole battle headlessly and print the turn log
    Simulate {
        /// Which battle: ooze, rats, rat-pirate, shih-tzu, skeleton, final
        #[arg(default_value = "skeleton")]
        battle: String,

        /// RNG seed for a reproducible battle
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Give up after this many update ticks
        #[arg(long, default_value = "200000")]
        max_ticks: u64,

        /// Print the last battle snapshot as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Roll {
            expression,
            advantage,
            disadvantage,
            check,
            seed,
        } => commands::roll::run(&expression, advantage, disadvantage, check, seed),
        Commands::Roster => commands::roster::run(),
        Commands::Simulate {
            battle,
            seed,
            max_ticks,
            json,
        } => commands::simulate::run(&battle, seed, max_ticks, json),
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        process::exit(1);
    }
}
