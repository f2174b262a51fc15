//! Dungeon layout generator
//!
//! Prints a generated map as ASCII (or the full layout as JSON) to stdout.

use std::path::PathBuf;
use std::process::ExitCode;
use std::time::{SystemTime, UNIX_EPOCH};

use clap::{ArgAction, Parser, Subcommand};
use log::{LevelFilter, Log, Metadata, Record, info};

use dg_assets::{builtin_catalog, load_area_config, load_candidates, load_section_config};
use dg_core::{AreaConfig, DungeonGenerator, SectionConfig, TemplateCatalog};

/// Generate tile dungeon layouts
#[derive(Parser, Debug)]
#[command(name = "dungen")]
#[command(author, version, about = "Generate tile dungeon layouts", long_about = None)]
struct Args {
    #[command(subcommand)]
    mode: Mode,

    /// Random seed (a fixed seed always gives the same map)
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    /// Room template file (JSON); the built-in rooms are used otherwise
    #[arg(short, long, global = true)]
    rooms: Option<PathBuf>,

    /// Generator config file (JSON); flags override its values
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print the whole layout as JSON instead of the ASCII map
    #[arg(long, global = true)]
    json: bool,

    /// Log to stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,
}

#[derive(Subcommand, Debug)]
enum Mode {
    /// Recursively split the map into areas with one room each
    Areas {
        /// Map width in tiles
        #[arg(long)]
        width: Option<i32>,
        /// Map height in tiles
        #[arg(long)]
        height: Option<i32>,
        /// Number of splits to attempt
        #[arg(long)]
        splits: Option<u32>,
        /// Extra corridors for loops
        #[arg(long)]
        extra: Option<u32>,
    },
    /// Lay out a uniform grid of sections
    Sections {
        /// Section edge length in tiles
        #[arg(long)]
        size: Option<i32>,
        /// Sections along x
        #[arg(long)]
        columns: Option<i32>,
        /// Sections along y
        #[arg(long)]
        rows: Option<i32>,
        /// Fewest rooms
        #[arg(long)]
        min_rooms: Option<u32>,
        /// Most rooms
        #[arg(long)]
        max_rooms: Option<u32>,
        /// Extra corridors for loops
        #[arg(long)]
        extra: Option<u32>,
    },
}

/// Minimal stderr backend for the `log` facade
struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{:<5} {}] {}", record.level(), record.target(), record.args());
        }
    }

    fn flush(&self) {}
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    if log::set_logger(&LOGGER).is_ok() {
        log::set_max_level(level);
    }
}

fn seed_from_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

fn area_config(args: &Args) -> Result<AreaConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_area_config(path)?,
        None => AreaConfig::default(),
    };
    if let Mode::Areas {
        width,
        height,
        splits,
        extra,
    } = &args.mode
    {
        config.width = width.unwrap_or(config.width);
        config.height = height.unwrap_or(config.height);
        config.split_count = splits.unwrap_or(config.split_count);
        config.extra_corridors = extra.unwrap_or(config.extra_corridors);
    }
    Ok(config)
}

fn section_config(args: &Args) -> Result<SectionConfig, Box<dyn std::error::Error>> {
    let mut config = match &args.config {
        Some(path) => load_section_config(path)?,
        None => SectionConfig::default(),
    };
    if let Mode::Sections {
        size,
        columns,
        rows,
        min_rooms,
        max_rooms,
        extra,
    } = &args.mode
    {
        config.section_size = size.unwrap_or(config.section_size);
        config.sections_x = columns.unwrap_or(config.sections_x);
        config.sections_y = rows.unwrap_or(config.sections_y);
        config.min_rooms = min_rooms.unwrap_or(config.min_rooms);
        config.max_rooms = max_rooms.unwrap_or(config.max_rooms);
        config.extra_corridors = extra.unwrap_or(config.extra_corridors);
    }
    Ok(config)
}

fn catalog(args: &Args) -> Result<TemplateCatalog, Box<dyn std::error::Error>> {
    Ok(match &args.rooms {
        Some(path) => load_candidates(path)?,
        None => builtin_catalog()?,
    })
}

fn run(args: &Args) -> Result<String, Box<dyn std::error::Error>> {
    let seed = args.seed.unwrap_or_else(seed_from_clock);
    let mut generator = DungeonGenerator::new(catalog(args)?, seed);
    info!("seed {seed}, {} room templates", generator.catalog().len());

    let output = match args.mode {
        Mode::Areas { .. } => {
            let layout = generator.generate_areas(&area_config(args)?)?;
            if args.json {
                serde_json::to_string_pretty(&layout)?
            } else {
                layout.to_ascii()
            }
        }
        Mode::Sections { .. } => {
            let layout = generator.generate_sections(&section_config(args)?)?;
            if args.json {
                serde_json::to_string_pretty(&layout)?
            } else {
                layout.to_ascii()
            }
        }
    };
    Ok(output)
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(&args) {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("dungen: {e}");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(argv: &[&str]) -> Args {
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_flags_override_defaults() {
        let args = parse(&["dungen", "areas", "--width", "60", "--splits", "2"]);
        let config = area_config(&args).unwrap();
        assert_eq!(config.width, 60);
        assert_eq!(config.split_count, 2);
        assert_eq!(config.height, AreaConfig::default().height);
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let args = parse(&["dungen", "sections", "--rows", "3", "--seed", "9", "-vv", "--json"]);
        assert_eq!(args.seed, Some(9));
        assert_eq!(args.verbose, 2);
        assert!(args.json);
        assert_eq!(section_config(&args).unwrap().sections_y, 3);
    }

    #[test]
    fn test_run_is_reproducible() {
        let args = parse(&["dungen", "areas", "--width", "50", "--height", "40", "-s", "4"]);
        let a = run(&args).unwrap();
        let b = run(&args).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.lines().count(), 40);
        assert!(a.lines().all(|l| l.chars().count() == 50));
    }

    #[test]
    fn test_failure_names_stage() {
        let args = parse(&["dungen", "sections", "--size", "3", "-s", "1"]);
        let err = run(&args).unwrap_err();
        assert!(err.to_string().starts_with("setup failed for map"));
    }

    #[test]
    fn test_missing_subcommand_is_rejected() {
        assert!(Args::try_parse_from(["dungen"]).is_err());
    }
}
