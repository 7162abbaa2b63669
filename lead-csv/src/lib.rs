//! Contact CSV handling
//!
//! Import and export of contact lists in the flat CSV layout the dashboard
//! uses for backups and bulk loading.
//!
//! - **Export**: fixed header, every field quoted, one row per contact
//! - **Import**: header-driven parsing into create requests, with a short
//!   preview before anything is sent to the backend
//!
//! # Example
//!
//! ```rust,ignore
//! use lead_csv::{export_contacts, CsvParser};
//!
//! let bytes = export_contacts(&contacts)?;
//! let batch = CsvParser::new().parse_contacts(&bytes)?;
//! ```

pub mod csv_parser;
pub mod error;
pub mod export;
pub mod preview;
pub mod template;

pub use csv_parser::{CsvParser, ImportBatch, SkippedRow, IMPORT_COLUMNS};
pub use error::CsvError;
pub use export::{export_contacts, export_file_name, write_contacts, EXPORT_HEADERS};
pub use preview::{ImportPreview, PREVIEW_LINES};
pub use template::{SAMPLE_TEMPLATE, SAMPLE_TEMPLATE_FILE_NAME};
