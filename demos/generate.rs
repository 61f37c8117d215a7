//! Draw joint points from the prior and print one line per point.

use std::io::{BufWriter, Write};

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing::info;
use transit_info::{
    generate_replicas, MassModel, ParameterModel, SamplingUnit, SinewaveModel, TransitModel,
};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModelKind {
    Transit,
    Sinewave,
    Mass,
}

#[derive(Parser)]
#[command(name = "generate")]
#[command(about = "Simulate parameters and data from a generative model")]
struct Cli {
    /// Which model to draw from
    #[arg(long, value_enum, default_value = "transit")]
    model: ModelKind,

    /// Number of independent points
    #[arg(short, long, default_value = "1")]
    count: usize,

    /// Seed shared by all replica streams
    #[arg(long, default_value = "0")]
    seed: u64,

    /// Log verbosity level (trace, debug, info, warn, error)
    #[arg(long, default_value = "warn")]
    log_level: tracing::Level,
}

fn run<P: ParameterModel + Default + Sync>(cli: &Cli) -> Result<()> {
    let replicas = generate_replicas(&P::default(), cli.count, cli.seed);
    info!(count = replicas.len(), "generated points");

    let stdout = std::io::stdout();
    let mut out = BufWriter::new(stdout.lock());
    for replica in &replicas {
        replica.point.print(&mut out)?;
        writeln!(out)?;
    }
    out.flush()?;
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    tracing_subscriber::fmt()
        .with_max_level(cli.log_level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    match cli.model {
        ModelKind::Transit => run::<TransitModel>(&cli),
        ModelKind::Sinewave => run::<SinewaveModel>(&cli),
        ModelKind::Mass => run::<MassModel>(&cli),
    }
}
