//! excel2md - Convert Excel and ODS spreadsheets into Markdown tables
//!
//! This crate reads every sheet (or a selected subset) of a spreadsheet and
//! renders each one as a GitHub-flavoured Markdown pipe table. Sheets are
//! joined into one document with a `## <sheet name>` heading per table and a
//! horizontal rule between tables.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//! use excel2md::{default_output_path, write_markdown, ConverterBuilder};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     // Create a converter with default settings
//!     let converter = ConverterBuilder::new().build()?;
//!
//!     let input = Path::new("example.xlsx");
//!     let markdown = converter.convert_path(input)?;
//!
//!     // example.md next to the input
//!     write_markdown(&default_output_path(input), &markdown)?;
//!
//!     Ok(())
//! }
//! ```
//!
//! # Rendering a dataset directly
//!
//! ```rust
//! use excel2md::{CellValue, ConverterBuilder, TabularDataset};
//!
//! # fn main() -> Result<(), excel2md::Excel2MdError> {
//! let converter = ConverterBuilder::new().build()?;
//! let dataset = TabularDataset::new(
//!     vec!["产品".to_string(), "数量".to_string()],
//!     vec![vec![CellValue::from("苹果"), CellValue::from(100)]],
//! );
//!
//! let table = converter.render_table(&dataset, Some("产品销售"));
//! assert_eq!(table, "## 产品销售\n\n| 产品 | 数量 |\n| --- | --- |\n| 苹果 | 100 |");
//! # Ok(())
//! # }
//! ```
//!
//! # Custom Configuration
//!
//! ```rust,no_run
//! use std::fs::File;
//! use excel2md::{ConverterBuilder, DateFormat, SheetSelector};
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let converter = ConverterBuilder::new()
//!         .with_sheet_selector(SheetSelector::Name("产品销售".to_string()))
//!         .with_date_format(DateFormat::Custom("%Y年%m月%d日".to_string()))
//!         .with_aligned_columns(true)
//!         .build()?;
//!
//!     let input = File::open("example.xlsx")?;
//!     let output = File::create("output.md")?;
//!     converter.convert(input, output)?;
//!
//!     Ok(())
//! }
//! ```

mod api;
mod builder;
mod error;
mod formatter;
mod output;
mod parser;
mod security;
mod session;
mod types;

// 公開API
pub use api::{DateFormat, SheetSelector};
pub use builder::{Converter, ConverterBuilder};
pub use error::Excel2MdError;
pub use output::{default_output_path, write_markdown, DEFAULT_EMPTY_NOTICE};
pub use session::{ConversionSession, SessionStatus};
pub use types::{CellValue, SheetMap, TabularDataset};
