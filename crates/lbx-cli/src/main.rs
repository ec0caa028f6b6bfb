use std::error::Error;

use clap::{Parser, Subcommand};
use commands::{
    eval::{self, EvalArgs},
    scan::{self, ScanArgs},
    template::{self, TemplateArgs},
};

mod commands;

#[derive(Parser, Debug)]
#[command(
    name = "lbx",
    version,
    about = "Quark-model form factors for spin-1/2 → spin-3/2 baryon transitions"
)]
struct Cli {
    /// Log evaluation details to stderr.
    #[arg(long, short, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the registered processes.
    Processes,
    /// Print a parameter table skeleton with every key a process reads.
    Template(TemplateArgs),
    /// Evaluate form factors at a single q2.
    Eval(EvalArgs),
    /// Evaluate form factors on a q2 grid and write report artefacts.
    Scan(ScanArgs),
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();
    let default_level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    match cli.command {
        Command::Processes => commands::list_processes(),
        Command::Template(args) => template::run(&args),
        Command::Eval(args) => eval::run(&args),
        Command::Scan(args) => scan::run(&args),
    }
}
