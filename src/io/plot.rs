//! Gnuplot rendering of a route set.

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::error::{RouteError, RouteResult};
use crate::lattice::Lattice;
use crate::metrics::completed_paths;
use crate::objects::ObjectSet;

/// Writes a gnuplot script drawing every completed path as a 3D polyline.
///
/// Paths are separated by blank lines inside a single inline data block.
pub fn write_gnuplot<W: Write>(
    objects: &ObjectSet,
    lattice: &Lattice,
    mut writer: W,
) -> io::Result<()> {
    let side = lattice.side();
    for axis in ["x", "y", "z"] {
        writeln!(writer, "set {axis}range [-1:{side}]")?;
    }
    writeln!(writer, "set ticslevel 0")?;
    writeln!(writer, "splot '-' with lines linetype 1 title \"route\"")?;

    for path in completed_paths(objects, lattice) {
        for coord in &path.cells {
            writeln!(writer, "{}\t{}\t{}", coord.x, coord.y, coord.z)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "e")?;
    writer.flush()
}

/// Writes the gnuplot script to `path`.
pub fn plot_file(
    objects: &ObjectSet,
    lattice: &Lattice,
    path: impl AsRef<Path>,
) -> RouteResult<()> {
    let path = path.as_ref();
    let io_error = |source| RouteError::Io {
        path: path.to_path_buf(),
        source,
    };
    let file = File::create(path).map_err(io_error)?;
    write_gnuplot(objects, lattice, BufWriter::new(file)).map_err(io_error)
}
