//! Pure formatting of already-loaded project data into CSV and PDF
//! blobs. No persistence, no business logic.

pub mod csv;
pub mod date;
pub mod pdf;

pub use self::csv::{csv_filename, export_points_csv};
pub use self::date::format_date_fr;
pub use self::pdf::{export_project_pdf, pdf_filename};

/// Project names end up inside a quoted `Content-Disposition` filename.
/// Quotes, backslashes and control characters would break the header.
pub(crate) fn filename_component(name: &str) -> String {
    name.chars()
        .filter(|c| *c != '"' && *c != '\\' && !c.is_control())
        .collect()
}
