use clap::Parser;
use gatelife_core::metrics::init_logging;
use gatelife_io::DataFile;
use gatelife_lib::{load_or_create, Simulation};
use std::path::PathBuf;

/// Runs one simulation per seed, each writing `{dir}Org_Vals{seed}SP{seed}.data`.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, default_value = "MySettings.toml")]
    config: PathBuf,

    /// First seed
    #[arg(long, default_value_t = 1)]
    from: u64,

    /// Last seed, inclusive
    #[arg(long, default_value_t = 50)]
    to: u64,

    /// Output directory
    #[arg(short, long, default_value = "datafolder/")]
    dir: String,

    /// Updates per replicate; the settings file value is used when omitted
    #[arg(long)]
    updates: Option<u64>,
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();
    anyhow::ensure!(args.from <= args.to, "seed range is empty");

    let base = load_or_create(&args.config)?;
    let dir = if args.dir.is_empty() || args.dir.ends_with('/') {
        args.dir.clone()
    } else {
        format!("{}/", args.dir)
    };

    for seed in args.from..=args.to {
        let mut config = base.clone();
        config.world.seed = seed;
        config.output.file_path = dir.clone();
        config.output.file_name = format!("SP{seed}.data");
        if let Some(updates) = args.updates {
            config.world.updates = updates;
        }

        let mut sim = Simulation::new(config)?;
        let path = sim.config().data_file_path();
        let mut data = DataFile::create(&path, sim.grid().tasks().len())?;
        sim.run_with_data(&mut data)?;
        tracing::info!(
            seed,
            path = %path.display(),
            population = sim.grid().num_organisms(),
            "Replicate finished"
        );
    }
    Ok(())
}
