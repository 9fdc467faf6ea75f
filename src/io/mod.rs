//! Input tables and rendered output.

pub mod csv_source;
pub mod output;
pub mod view_formatters;

pub use csv_source::{read_crew, read_movies, RawCrewRow, RawMovieRow};
pub use output::{create_writer, OutputFormat, OutputWriter};
pub use view_formatters::{Renderable, Section, TableBlock};
