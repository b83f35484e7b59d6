//! Command-line driver.
//!
//! ```text
//! lattice-route [GENERATORS] [EQUIPMENTS] [SIDE] [GENERATIONS] [SEED] [--count M]
//! ```
//!
//! Loads the pairs, builds an initial routing, improves it by ruin and
//! recreate, and writes `route_<count>.txt` after every improvement. The
//! final routing is exported, plotted to `route_plot.gp` and re-validated.
//! Set `RUST_LOG=info` (or `debug`/`trace`) for progress output.
//!
//! Built with the `cli` feature: `cargo run --release --features cli -- ...`.

use std::path::PathBuf;
use std::thread;

use anyhow::{bail, Context, Result};
use clap::Parser;
use log::{error, info, warn};

use u_lattice_route::io::{
    export_file, export_file_name, load_objects, plot_file, DEFAULT_EXPORT_PREFIX,
};
use u_lattice_route::metrics::validate_export_file;
use u_lattice_route::objects::ObjectSet;
use u_lattice_route::ruin::{Improvement, RuinConfig, RuinRecreateRunner};

const PLOT_FILE: &str = "route_plot.gp";

/// The omni-directional search recurses once per path cell.
const WORKER_STACK_SIZE: usize = 512 * 1024 * 1024;

#[derive(Parser, Debug)]
#[command(name = "lattice-route", version, long_about = None)]
#[command(about = "Disjoint pair routing on a cubic lattice")]
struct Args {
    /// Generator coordinates, one `x y z` line per pair
    #[arg(default_value = "generators.txt")]
    generators: PathBuf,

    /// Equipment coordinates, in generator order
    #[arg(default_value = "equipments.txt")]
    equipments: PathBuf,

    /// Lattice side length N
    #[arg(default_value_t = 20)]
    side: u32,

    /// Consecutive non-improving generations before stopping
    #[arg(default_value_t = 30_000)]
    generations: usize,

    /// Random seed; the clock is used when omitted
    seed: Option<u64>,

    /// Number of pairs each input file must hold
    #[arg(short = 'm', long, default_value_t = 4000)]
    count: usize,
}

fn run(args: Args) -> Result<()> {
    let objects = load_objects(
        &args.generators,
        &args.equipments,
        args.side,
        Some(args.count),
    )
    .context("failed to load pairs")?;
    info!(
        "loaded {} pairs on a {side}x{side}x{side} lattice",
        objects.len(),
        side = args.side
    );

    let mut config = RuinConfig::default().with_generation_limit(args.generations);
    config.seed = args.seed;
    config.validate().map_err(anyhow::Error::msg)?;

    let mut export_improvement = |improvement: &Improvement<'_>| {
        let name = export_file_name(DEFAULT_EXPORT_PREFIX, improvement.completed);
        if let Err(e) = export_file(&objects, improvement.lattice, &name) {
            warn!("could not export improvement: {e}");
        }
    };
    let result =
        RuinRecreateRunner::run_with_observer(&objects, &config, &mut export_improvement, None)?;
    info!(
        "total = {} (initial {}, {} improvements in {} generations, seed {})",
        result.completed,
        result.initial_completed,
        result.improvements,
        result.generations,
        result.seed
    );

    plot_file(&objects, &result.best, PLOT_FILE)?;
    info!("plot written to {PLOT_FILE}");

    let export = export_file_name(DEFAULT_EXPORT_PREFIX, result.completed);
    export_file(&objects, &result.best, &export)?;
    check_export(&objects, &export)
}

fn check_export(objects: &ObjectSet, export: &str) -> Result<()> {
    match validate_export_file(objects, export) {
        Ok(summary) => {
            info!(
                "route check {export} ok: {} paths, {} cells",
                summary.paths, summary.cells
            );
            Ok(())
        }
        Err(e) => {
            error!("route check {export} failed with code {}: {e}", e.code());
            bail!("export {export} failed validation (code {})", e.code())
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    let worker = thread::Builder::new()
        .name("lattice-route".into())
        .stack_size(WORKER_STACK_SIZE)
        .spawn(move || run(args))
        .context("failed to spawn the optimizer thread")?;

    match worker.join() {
        Ok(outcome) => outcome,
        Err(_) => bail!("optimizer thread panicked"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;
    use std::ffi::OsStr;

    #[test]
    fn test_cli_definition() {
        Args::command().debug_assert();
    }

    #[test]
    fn test_cli_defaults() {
        let args = Args::try_parse_from(["lattice-route"]).unwrap();
        assert_eq!(args.generators, PathBuf::from("generators.txt"));
        assert_eq!(args.equipments, PathBuf::from("equipments.txt"));
        assert_eq!(args.side, 20);
        assert_eq!(args.generations, 30_000);
        assert_eq!(args.seed, None);
        assert_eq!(args.count, 4000);
    }

    #[test]
    fn test_cli_positionals_and_count() {
        let args = Args::try_parse_from([
            "lattice-route",
            "g.txt",
            "e.txt",
            "8",
            "500",
            "42",
            "--count",
            "120",
        ])
        .unwrap();
        assert_eq!(args.generators, PathBuf::from("g.txt"));
        assert_eq!(args.equipments, PathBuf::from("e.txt"));
        assert_eq!(args.side, 8);
        assert_eq!(args.generations, 500);
        assert_eq!(args.seed, Some(42));
        assert_eq!(args.count, 120);
    }

    #[test]
    fn test_cli_rejects_bad_input() {
        assert!(Args::try_parse_from(["lattice-route", "g.txt", "e.txt", "twenty"]).is_err());
        assert!(
            Args::try_parse_from(["lattice-route", "g", "e", "8", "10", "1", "extra"]).is_err()
        );
    }

    #[test]
    fn test_short_inputs_are_fatal() {
        let dir = std::env::temp_dir().join(format!("lattice-route-cli-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let gen = dir.join("generators.txt");
        let equ = dir.join("equipments.txt");
        std::fs::write(&gen, "0 0 0\n").unwrap();
        std::fs::write(&equ, "1 1 1\n").unwrap();

        let args = Args::try_parse_from([
            OsStr::new("lattice-route"),
            gen.as_os_str(),
            equ.as_os_str(),
            OsStr::new("4"),
            OsStr::new("1"),
            OsStr::new("1"),
            OsStr::new("-m"),
            OsStr::new("2"),
        ])
        .unwrap();
        let err = run(args).unwrap_err();
        assert!(format!("{err:#}").contains("expected 2 coordinates"));

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
