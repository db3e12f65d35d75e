use anyhow::Context;
use clap::Parser;
use gatelife_core::config::AppConfig;
use gatelife_core::metrics::init_logging;
use gatelife_core::task::TaskSuite;
use gatelife_io::munge::{munge, task_column, MungePlan};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::PathBuf;

/// Merges replicate data files into one space separated table.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Folder holding the replicate files
    #[arg(short, long, default_value = "datafolder")]
    folder: PathBuf,

    /// Treatment labels, repeated per treatment
    #[arg(short, long, default_values_t = [1u32])]
    treatment: Vec<u32>,

    #[arg(long, default_value_t = 1)]
    from: u64,

    #[arg(long, default_value_t = 50)]
    to: u64,

    /// Task names to keep
    #[arg(long, value_delimiter = ',', default_value = "EQU,COMPLEX")]
    tasks: Vec<String>,

    /// Settings the replicates ran with; task columns are looked up in its
    /// suite. The default suite is used when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,

    #[arg(short, long, default_value = "munged_basic.dat")]
    output: PathBuf,
}

fn suite(config: Option<&PathBuf>) -> anyhow::Result<TaskSuite> {
    let Some(path) = config else {
        return Ok(TaskSuite::default());
    };
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading settings from {}", path.display()))?;
    Ok(AppConfig::from_toml(&text)?.tasks.build_suite())
}

fn main() -> anyhow::Result<()> {
    init_logging();
    let args = Args::parse();

    let suite = suite(args.config.as_ref())?;
    let tasks = args
        .tasks
        .iter()
        .map(|name| {
            task_column(&suite, name).with_context(|| format!("task {name} is not in the suite"))
        })
        .collect::<anyhow::Result<Vec<_>>>()?;

    let plan = MungePlan {
        folder: args.folder,
        treatments: args.treatment,
        reps: (args.from..=args.to).collect(),
        tasks,
    };

    let mut out = BufWriter::new(
        File::create(&args.output)
            .with_context(|| format!("creating {}", args.output.display()))?,
    );
    let rows = munge(&plan, &mut out)?;
    out.flush()?;
    println!("wrote {rows} rows to {}", args.output.display());
    Ok(())
}
