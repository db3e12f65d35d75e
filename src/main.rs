use anyhow::Result;
use clap::Parser;
use gatelife_core::metrics::init_logging;
use gatelife_io::persistence::{save_json_gz, save_rkyv};
use gatelife_io::DataFile;
use gatelife_lib::{load_or_create, Overrides, Simulation};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Settings file; created with defaults when missing
    #[arg(short, long, default_value = "MySettings.toml")]
    config: PathBuf,

    #[command(flatten)]
    overrides: Overrides,

    /// Write a final population snapshot (`.rkyv`, otherwise gzip JSON)
    #[arg(long)]
    snapshot: Option<PathBuf>,

    /// Print the fittest organism's program after the run
    #[arg(long)]
    print_genome: bool,
}

fn main() -> Result<()> {
    init_logging();
    let args = Args::parse();

    let mut config = load_or_create(&args.config)?;
    args.overrides.apply(&mut config)?;
    tracing::info!(settings = %config.to_toml()?, "Config after loading");

    let mut sim = Simulation::new(config)?;
    let path = sim.config().data_file_path();
    let mut data = DataFile::create(&path, sim.grid().tasks().len())?;
    sim.run_with_data(&mut data)?;
    tracing::info!(path = %path.display(), rows = data.rows_written(), "Data file written");

    if let Some(snapshot_path) = &args.snapshot {
        let snapshot = sim.snapshot();
        if snapshot_path.extension().is_some_and(|e| e == "rkyv") {
            save_rkyv(&snapshot, snapshot_path)?;
        } else {
            save_json_gz(&snapshot, snapshot_path)?;
        }
        tracing::info!(path = %snapshot_path.display(), population = snapshot.population(), "Snapshot saved");
    }

    if args.print_genome {
        match sim.fittest() {
            Some((cell, org)) => {
                println!("fittest at {cell}: {} points", org.points());
                print!("{}", org.unit);
            }
            None => println!("population is extinct"),
        }
    }

    Ok(())
}
