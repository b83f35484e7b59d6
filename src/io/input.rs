//! Generator and equipment coordinate files.
//!
//! One `x y z` line per object. The two files pair up line by line.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use crate::error::{RouteError, RouteResult};
use crate::lattice::Coord;
use crate::objects::ObjectSet;

/// Reads `x y z` lines from `reader`. `path` is only used in errors.
///
/// Blank lines after the last coordinate are ignored; a blank line followed
/// by more coordinates is a parse error.
pub fn read_coords<R: BufRead>(reader: R, path: &Path) -> RouteResult<Vec<Coord>> {
    let mut coords = Vec::new();
    let mut blank_at = None;

    for (index, line) in reader.lines().enumerate() {
        let line_no = index + 1;
        let line = line.map_err(|source| RouteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            blank_at.get_or_insert(line_no);
            continue;
        }
        if let Some(blank) = blank_at {
            return Err(parse_error(path, blank, "blank line between coordinates"));
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(parse_error(
                path,
                line_no,
                format!("expected 3 fields, found {}", fields.len()),
            ));
        }
        let mut values = [0u32; 3];
        for (value, field) in values.iter_mut().zip(&fields) {
            *value = field.parse().map_err(|_| {
                parse_error(path, line_no, format!("invalid coordinate `{field}`"))
            })?;
        }
        coords.push(Coord::new(values[0], values[1], values[2]));
    }
    Ok(coords)
}

/// Loads the pair set from a generator file and an equipment file.
///
/// The generator file fixes the object count unless `expected` is given;
/// the equipment file must match it.
pub fn load_objects(
    generators: impl AsRef<Path>,
    equipments: impl AsRef<Path>,
    side: u32,
    expected: Option<usize>,
) -> RouteResult<ObjectSet> {
    let generator_path = generators.as_ref();
    let equipment_path = equipments.as_ref();

    let gens = read_coords_file(generator_path)?;
    let equs = read_coords_file(equipment_path)?;

    let count = expected.unwrap_or(gens.len());
    for (path, found) in [(generator_path, gens.len()), (equipment_path, equs.len())] {
        if found != count {
            return Err(RouteError::CountMismatch {
                path: path.to_path_buf(),
                expected: count,
                found,
            });
        }
    }

    ObjectSet::new(side, gens.into_iter().zip(equs))
}

fn read_coords_file(path: &Path) -> RouteResult<Vec<Coord>> {
    let file = File::open(path).map_err(|source| RouteError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_coords(BufReader::new(file), path)
}

fn parse_error(path: &Path, line: usize, message: impl Into<String>) -> RouteError {
    RouteError::Parse {
        path: PathBuf::from(path),
        line,
        message: message.into(),
    }
}
