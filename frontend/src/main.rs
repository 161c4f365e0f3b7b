use std::error::Error;
use std::fs::{self, File};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::rc::Rc;

use clap::{Parser, Subcommand};

use synacor_adventure::find_ruins;
use synacor_core::machine::snapshot::Snapshot;
use synacor_core::machine::{Halt, Machine};
use synacor_core::trace::{LogTracer, NullTracer, Tracer};

#[derive(Parser)]
#[command(name = "synacor", about = "Synacor virtual machine and adventure searcher")]
struct Cli {
    /// Log every executed instruction.
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run a program interactively against stdin/stdout.
    Run {
        /// Program image (little-endian 16-bit words).
        program: PathBuf,
    },
    /// Search the hosted text adventure for a path to the Ruins.
    Search {
        /// Program image (little-endian 16-bit words).
        program: PathBuf,
    },
    /// Run a previously saved machine state interactively.
    Load {
        save_file: PathBuf,
        /// Save the final machine state back over the same file.
        #[arg(short, long)]
        overwrite: bool,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    env_logger::Builder::from_default_env()
        .filter_level(if cli.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .init();

    let tracer: Rc<dyn Tracer> = if cli.verbose {
        Rc::new(LogTracer)
    } else {
        Rc::new(NullTracer)
    };

    let result = match &cli.command {
        Command::Run { program } => run(program, tracer),
        Command::Search { program } => search(program, tracer),
        Command::Load {
            save_file,
            overwrite,
        } => load(save_file, *overwrite, tracer),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log::error!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run(program: &Path, tracer: Rc<dyn Tracer>) -> Result<(), Box<dyn Error>> {
    let file = File::open(program)?;
    let mut machine = Machine::new(file)?.with_tracer(tracer);
    match machine.run()? {
        Halt::Clean => Ok(()),
        Halt::NeedInput => Err("program wants input but stdin is exhausted".into()),
    }
}

fn search(program: &Path, tracer: Rc<dyn Tracer>) -> Result<(), Box<dyn Error>> {
    let image = fs::read(program)?;
    let path = find_ruins(&image, tracer)?;
    for node in path.iter().skip(1) {
        println!("{} ({})", node.exit_to_here, node.inventory.join(", "));
    }
    Ok(())
}

fn load(save_file: &Path, overwrite: bool, tracer: Rc<dyn Tracer>) -> Result<(), Box<dyn Error>> {
    let snapshot = Snapshot::read_from(File::open(save_file)?)?;
    let mut machine = Machine::from_snapshot(snapshot).with_tracer(tracer);

    // Both a clean halt and an input stall are fine here: the point of
    // `load` is to play from a save and optionally keep the result.
    machine.run()?;

    if overwrite {
        machine.snapshot().write_to(File::create(save_file)?)?;
        log::info!("saved machine state to {}", save_file.display());
    }
    Ok(())
}
