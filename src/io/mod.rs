//! File formats: coordinate inputs, route exports and gnuplot scripts.

mod export;
mod input;
mod plot;

pub use export::{export_file, export_file_name, write_routes, DEFAULT_EXPORT_PREFIX};
pub use input::{load_objects, read_coords};
pub use plot::{plot_file, write_gnuplot};
