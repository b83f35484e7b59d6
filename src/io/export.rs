//! Route export files.
//!
//! Format: the number of paths, then for each path its cell count followed
//! by one `x y z` line per cell from generator to equipment.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{RouteError, RouteResult};
use crate::lattice::Lattice;
use crate::metrics::completed_paths;
use crate::objects::ObjectSet;

/// File name prefix used by the binary.
pub const DEFAULT_EXPORT_PREFIX: &str = "route";

/// `"{prefix}_{count}.txt"`.
pub fn export_file_name(prefix: &str, count: usize) -> String {
    format!("{prefix}_{count}.txt")
}

/// Writes every completed path in object order. Returns the path count.
pub fn write_routes<W: Write>(
    objects: &ObjectSet,
    lattice: &Lattice,
    mut writer: W,
) -> io::Result<usize> {
    let paths = completed_paths(objects, lattice);
    writeln!(writer, "{}", paths.len())?;
    for path in &paths {
        writeln!(writer, "{}", path.cells.len())?;
        for coord in &path.cells {
            writeln!(writer, "{coord}")?;
        }
    }
    writer.flush()?;
    Ok(paths.len())
}

/// Writes the export to `path`, replacing any existing file.
pub fn export_file(
    objects: &ObjectSet,
    lattice: &Lattice,
    path: impl AsRef<Path>,
) -> RouteResult<usize> {
    let path = path.as_ref();
    let io_error = |source| RouteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    write_routes(objects, lattice, BufWriter::new(file)).map_err(io_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::construct::RouteConstructor;
    use crate::lattice::Coord;
    use crate::metrics::{count_completed, validate_export, validate_export_file};
    use crate::objects::PriorityList;
    use crate::random::create_rng;
    use crate::ruin::{RuinConfig, RuinRecreateRunner};
    use crate::search::SearchConfig;

    fn c(x: u32, y: u32, z: u32) -> Coord {
        Coord::new(x, y, z)
    }

    #[test]
    fn test_export_file_name() {
        assert_eq!(export_file_name("route", 181), "route_181.txt");
        assert_eq!(export_file_name(DEFAULT_EXPORT_PREFIX, 0), "route_0.txt");
    }

    #[test]
    fn test_write_routes_format() {
        let objects =
            ObjectSet::new(3, [(c(0, 0, 0), c(0, 0, 2)), (c(2, 2, 2), c(1, 1, 1))]).unwrap();
        let mut lattice = objects.new_lattice();
        let cell = |coord| lattice.cell_id(coord).unwrap();
        let (a, b, d) = (cell(c(0, 0, 0)), cell(c(0, 0, 1)), cell(c(0, 0, 2)));
        lattice.link(a, b);
        lattice.link(b, d);

        let mut out = Vec::new();
        let written = write_routes(&objects, &lattice, &mut out).unwrap();

        assert_eq!(written, 1);
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "1\n3\n0 0 0\n0 0 1\n0 0 2\n"
        );
    }

    #[test]
    fn test_empty_lattice_exports_zero() {
        let objects = ObjectSet::new(2, [(c(0, 0, 0), c(1, 1, 1))]).unwrap();
        let mut out = Vec::new();
        write_routes(&objects, &objects.new_lattice(), &mut out).unwrap();
        assert_eq!(out, b"0\n");
    }

    #[test]
    fn test_constructed_export_validates() {
        let mut rng = create_rng(17);
        let objects = ObjectSet::random(5, 20, &mut rng).unwrap();
        let search = SearchConfig::default()
            .with_directed_limit(Some(20_000))
            .with_omni_limit(Some(5_000));
        let constructor = RouteConstructor::new(&objects, search);
        let mut priority = PriorityList::from_objects(&objects);
        priority.reshuffle_and_rank(&mut rng);
        let mut lattice = objects.new_lattice();
        constructor.construct(&priority, &mut lattice);

        let mut out = Vec::new();
        let written = write_routes(&objects, &lattice, &mut out).unwrap();
        let summary = validate_export(&objects, out.as_slice()).unwrap();

        assert_eq!(written, count_completed(&objects, &lattice));
        assert_eq!(summary.paths, written);
        assert_eq!(summary.cells, lattice.occupied());
    }

    #[test]
    fn test_optimized_export_round_trip_on_disk() {
        let mut rng = create_rng(23);
        let objects = ObjectSet::random(4, 12, &mut rng).unwrap();
        let config = RuinConfig::default()
            .with_generation_limit(5)
            .with_width(1, 2)
            .with_seed(23)
            .with_search(
                SearchConfig::default()
                    .with_directed_limit(Some(20_000))
                    .with_omni_limit(Some(5_000)),
            );
        let result = RuinRecreateRunner::run(&objects, &config).unwrap();

        let dir = std::env::temp_dir().join(format!("lattice-route-export-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join(export_file_name("route", result.completed));

        let written = export_file(&objects, &result.best, &path).unwrap();
        let summary = validate_export_file(&objects, &path).unwrap();

        assert_eq!(written, result.completed);
        assert_eq!(summary.paths, result.completed);
        std::fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_export_to_missing_directory_fails() {
        let objects = ObjectSet::new(2, [(c(0, 0, 0), c(1, 1, 1))]).unwrap();
        let err = export_file(
            &objects,
            &objects.new_lattice(),
            "/nonexistent-dir/route_0.txt",
        )
        .unwrap_err();
        assert!(matches!(err, RouteError::Io { .. }));
        assert!(err.to_string().starts_with("I/O error on /nonexistent-dir/route_0.txt"));
    }
}
