//! Pipeline hazard simulator CLI.
//!
//! This binary provides a single entry point for running programs through the
//! issue/retire engine. It performs:
//! 1. **Program load:** Parse a text program, one instruction per line.
//! 2. **Configuration:** Built-in defaults, a JSON file, or per-flag overrides.
//! 3. **Reporting:** A per-cycle table on stdout, or the full trace as JSON.

use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;
use std::{fs, process};

use pipesim_core::config::{Config, Discipline};
use pipesim_core::engine::Engine;
use pipesim_core::engine::trace::Trace;
use pipesim_core::sim::loader;
use pipesim_core::stats::RunStats;
use pipesim_core::SimError;

#[derive(Parser, Debug)]
#[command(
    name = "pipesim",
    author,
    version,
    about = "Pipeline hazard simulator",
    long_about = "Run a straight-line program through a cycle-stepped issue/retire engine.\n\nExamples:\n  pipesim run -f demos/chain.txt\n  pipesim run -f demos/chain.txt --discipline out-of-order --slots 2\n  pipesim run -f demos/chain.txt --config sim.json --json"
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Run a program to completion and print the per-cycle trace.
    Run {
        /// Program file, one instruction per line.
        #[arg(short, long)]
        file: PathBuf,

        /// JSON configuration file (flags below override it).
        #[arg(long)]
        config: Option<PathBuf>,

        /// Issue discipline.
        #[arg(long, value_enum)]
        discipline: Option<DisciplineArg>,

        /// Issue slots per cycle.
        #[arg(long)]
        slots: Option<usize>,

        /// Enable register renaming through the shadow bank.
        #[arg(long)]
        renaming: bool,

        /// Emit the trace as JSON instead of a table.
        #[arg(long)]
        json: bool,
    },
}

/// Clap-facing discipline names. Kept separate from the core enum so the
/// command line speaks kebab-case regardless of serde's aliases.
#[derive(Copy, Clone, Debug, ValueEnum)]
enum DisciplineArg {
    SingleIssue,
    InOrder,
    OutOfOrder,
}

impl From<DisciplineArg> for Discipline {
    fn from(arg: DisciplineArg) -> Self {
        match arg {
            DisciplineArg::SingleIssue => Self::SingleIssue,
            DisciplineArg::InOrder => Self::SuperscalarInOrder,
            DisciplineArg::OutOfOrder => Self::SuperscalarOutOfOrder,
        }
    }
}

fn main() {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Run {
            file,
            config,
            discipline,
            slots,
            renaming,
            json,
        }) => {
            if let Err(err) = cmd_run(&file, config.as_deref(), discipline, slots, renaming, json) {
                eprintln!("error: {err}");
                process::exit(1);
            }
        }
        None => {
            eprintln!("Pipeline hazard simulator");
            eprintln!();
            eprintln!("  pipesim run -f <program>                     Single-issue run");
            eprintln!("  pipesim run -f <program> --discipline in-order --slots 2");
            eprintln!("  pipesim run -f <program> --renaming --json");
            eprintln!();
            eprintln!("  pipesim --help  for full options");
            process::exit(1);
        }
    }
}

/// Loads the program and configuration, runs the engine to drain, and
/// prints the trace.
fn cmd_run(
    file: &std::path::Path,
    config_path: Option<&std::path::Path>,
    discipline: Option<DisciplineArg>,
    slots: Option<usize>,
    renaming: bool,
    json: bool,
) -> Result<(), SimError> {
    let mut config = match config_path {
        Some(path) => Config::from_json(&fs::read_to_string(path)?)?,
        None => Config::default(),
    };
    if let Some(arg) = discipline {
        config.discipline = arg.into();
    }
    if let Some(width) = slots {
        config.issue_slots = width;
    }
    if renaming {
        config.register_renaming = true;
    }

    let program = loader::load_program(file)?;
    let mut engine = Engine::new(program, &config)?;
    let full = engine.run()?;

    if json {
        println!("{}", full.to_json()?);
        return Ok(());
    }

    print_table(&full, &config);
    println!();
    println!("Execution completed.");
    println!("{}", RunStats::from_trace(&full));
    Ok(())
}

/// Column width grows with the issue width so multi-issue cycles stay on
/// one line.
fn issue_column_width(issue_slots: usize) -> usize {
    match issue_slots {
        w if w >= 3 => 55,
        2 => 40,
        _ => 30,
    }
}

fn print_table(full: &Trace, config: &Config) {
    let width = issue_column_width(config.issue_slots);

    println!("{:<7}| {:<width$}| Retired", "Cycle", "Issued");
    println!("{:-<7}|{:-<w$}|{:-<24}", "", "", "", w = width + 1);

    for record in &full.records {
        let issued = record
            .issued
            .iter()
            .map(|entry| format!("{}. {}  ", entry.index, entry.text))
            .collect::<String>();
        let retired = record
            .retired
            .iter()
            .map(|index| format!("Instruction {index} "))
            .collect::<String>();
        println!("{:<7}| {issued:<width$}| {retired}", record.cycle);
    }
}
