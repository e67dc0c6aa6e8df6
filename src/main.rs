mod logger;

use std::{fs, path::PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Args, Parser, Subcommand};
use mlq_sim::{
    MlqScheduler, Quanta, Sim,
    config::Config,
    io::{self, GeneratorParams, ReportFormat},
};
use tracing::info;

#[derive(Parser)]
#[command(name = "mlq-sim", version, about = "Fixed three-level queue CPU scheduling simulator")]
struct Cli {
    /// More logging on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Simulate a workload file and write the report
    Run(RunArgs),
    /// Write a random workload file
    Generate(GenerateArgs),
}

#[derive(Args)]
struct RunArgs {
    /// Workload records, one `label;BT;AT;Q;Pr` per line
    input: PathBuf,
    /// Report destination
    output: PathBuf,
    /// TOML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
    /// Level 1 quantum [default: 3]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    q1: Option<u64>,
    /// Level 2 quantum [default: 5]
    #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
    q2: Option<u64>,
    #[arg(long, value_enum)]
    format: Option<ReportFormat>,
    /// Print the execution timeline to stdout
    #[arg(long)]
    gantt: bool,
    /// Write every scheduling event as JSON lines
    #[arg(long)]
    events: Option<PathBuf>,
}

#[derive(Args)]
struct GenerateArgs {
    output: PathBuf,
    #[arg(long, default_value_t = 50, value_parser = clap::value_parser!(i64).range(0..))]
    ticks: i64,
    #[arg(long, default_value_t = 0.3)]
    p_arrival: f64,
    #[arg(long, default_value_t = 0.3)]
    p_short: f64,
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(i64).range(1..))]
    short_burst: i64,
    #[arg(long, default_value_t = 6, value_parser = clap::value_parser!(i64).range(1..))]
    long_burst: i64,
    #[arg(long, default_value_t = 5, value_parser = clap::value_parser!(i64).range(0..))]
    max_priority: i64,
    #[arg(long, default_value_t = 0)]
    seed: u64,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Command::Run(args) => run(args, cli.verbose),
        Command::Generate(args) => generate(args, cli.verbose),
    }
}

fn run(args: RunArgs, verbose: u8) -> Result<()> {
    let config = match &args.config {
        Some(path) => Config::load(path)?,
        None => Config::default(),
    };
    logger::install(logger::level_for(verbose, &config.log_level));

    let configured = config.quanta()?;
    let quanta = Quanta::new(
        args.q1.unwrap_or(configured.level1),
        args.q2.unwrap_or(configured.level2),
    )?;
    let format = args.format.unwrap_or(config.report_format);

    let specs = io::read_workload(&args.input)
        .with_context(|| format!("failed to read workload {}", args.input.display()))?;
    info!(processes = specs.len(), ?quanta, "loaded workload");

    let outcome = Sim::new(specs, MlqScheduler::new(quanta))?.run();

    io::write_report(&args.output, &outcome.finished, format)
        .with_context(|| format!("failed to write report {}", args.output.display()))?;

    if let Some(path) = &args.events {
        let lines = io::render_events(&outcome.events)?;
        fs::write(path, lines)
            .with_context(|| format!("failed to write events {}", path.display()))?;
    }

    if args.gantt {
        print!("{}", outcome.timeline().render());
    }

    println!("Simulation complete. Output written to {}", args.output.display());
    Ok(())
}

fn generate(args: GenerateArgs, verbose: u8) -> Result<()> {
    logger::install(logger::level_for(verbose, "warn"));

    let params = GeneratorParams {
        ticks: args.ticks,
        p_arrival: args.p_arrival,
        p_short: args.p_short,
        short_burst: args.short_burst,
        long_burst: args.long_burst,
        max_priority: args.max_priority,
        seed: args.seed,
    };
    let specs = io::generate_workload(&params);
    info!(processes = specs.len(), seed = params.seed, "generated workload");

    fs::write(&args.output, io::render_workload(&specs))
        .with_context(|| format!("failed to write workload {}", args.output.display()))?;
    println!("Wrote {} processes to {}", specs.len(), args.output.display());
    Ok(())
}
