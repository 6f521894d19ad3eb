//! Spreadsheet translation templates and CSV to ARB conversion
//!
//! Two pipelines share a language catalog:
//!
//! - **Template generation** - pick target languages with a [`Selector`] and
//!   produce a CSV whose cells call `GOOGLETRANSLATE` on the base-language
//!   column once opened in a spreadsheet.
//! - **Conversion** - turn a completed sheet (`key` column plus one column
//!   per language) into one ARB resource per language, packed in a ZIP.
//!
//! # Workflow Example
//!
//! ```ignore
//! use arbsheet::{Catalog, ConverterConfig, Selector, convert_to_archive, generate};
//!
//! let mut selector = Selector::new(Catalog::builtin());
//! selector.toggle("es")?;
//! selector.toggle("fr")?;
//! let template = generate("en", selector.selected_codes(), &["greeting"])?;
//!
//! // ... fill in column B in a spreadsheet, export as CSV ...
//!
//! let archive = convert_to_archive(&exported_csv, &ConverterConfig::default())?;
//! std::fs::write("arb_files.zip", archive)?;
//! ```

pub mod archive;
pub mod catalog;
pub mod config;
pub mod converter;
pub mod document;
pub mod error;
pub mod flatten;
pub mod loader;
pub mod selector;
pub mod status;
pub mod template;

#[cfg(test)]
mod integration_tests;

pub use archive::{build_archive, convert_to_archive, package};
pub use catalog::{Catalog, Language};
pub use config::{ConverterConfig, FilePattern, TemplateConfig};
pub use converter::{Bundle, Sheet, build_bundle, convert, parse_sheet};
pub use document::ResourceDocument;
pub use error::{SheetError, SheetResult};
pub use flatten::flatten;
pub use loader::{load_catalog_from_file, load_documents_from_dir, parse_arb};
pub use selector::Selector;
pub use status::Status;
pub use template::{generate, translate_formula};
