use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use propbag_reader::propbag::render;
use propbag_reader::{parse_file, ParseOptions};

#[derive(Debug, Parser)]
#[command(author, version, about = "Decode a property bag file header to JSON")]
struct Cli {
    #[arg(value_name = "FILE")]
    path: PathBuf,
    /// Write JSON here instead of stdout
    #[arg(short, long, value_name = "PATH")]
    output: Option<PathBuf>,
    /// Emit single-line JSON
    #[arg(long)]
    compact: bool,
    /// Maximum nesting depth of structs and arrays
    #[arg(long, value_name = "N")]
    max_depth: Option<usize>,
    /// Log properties whose declared size disagrees with the bytes decoded
    #[arg(long)]
    check_sizes: bool,
    /// Raise the default log level to debug
    #[arg(short, long)]
    verbose: bool,
}

fn main() {
    let cli = Cli::parse();

    let default_filter = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_filter))
        .init();

    if let Err(e) = run(&cli) {
        eprintln!("ERROR: Failed to decode {}", cli.path.display());
        eprintln!("  {:#}", e);
        process::exit(1);
    }
}

fn run(cli: &Cli) -> Result<()> {
    let mut options = ParseOptions::default();
    if let Some(max_depth) = cli.max_depth {
        options = options.with_max_depth(max_depth);
    }
    if cli.check_sizes {
        options = options.with_declared_size_check(true);
    }

    let parsed = parse_file(&cli.path, &options)
        .with_context(|| format!("reading {}", cli.path.display()))?;

    let json = if cli.compact {
        render::to_compact_json_string(&parsed.header)?
    } else {
        render::to_json_string(&parsed.header)?
    };

    match &cli.output {
        Some(out_path) => {
            let file = File::create(out_path)
                .with_context(|| format!("creating {}", out_path.display()))?;
            let mut writer = BufWriter::new(file);
            writeln!(writer, "{}", json)?;
            writer.flush()?;
            info!("Wrote JSON to {}", out_path.display());
        }
        None => {
            let stdout = io::stdout();
            let mut handle = stdout.lock();
            writeln!(handle, "{}", json)?;
        }
    }

    Ok(())
}
