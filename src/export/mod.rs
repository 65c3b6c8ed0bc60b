//! Calendar export.

pub mod ics;

pub use ics::{export_ics, export_ics_to_file, generate_ics_filename, ExportError};
