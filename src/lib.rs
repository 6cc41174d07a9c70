//! Guards a file input with an extension allow-list and a maximum size.
//!
//! ```no_run
//! use filtered_file_selector::{
//!     config::{FileTypes, HostDefaults, SelectorOptions},
//!     selector::FilteredFileSelector,
//!     size_reader::StandardSizeReader,
//!     ui::{MemoryDocument, MemoryInput},
//! };
//!
//! let document = MemoryDocument::with_regions(["#error", "#filename"]);
//! let options = SelectorOptions {
//!     filetypes: FileTypes::from(".png, .jpg"),
//!     max_size: Some(2.0),
//!     error_field: Some("#error".to_string()),
//!     filename_field: Some("#filename".to_string()),
//!     ..Default::default()
//! };
//!
//! let mut selector = FilteredFileSelector::attach(
//!     MemoryInput::new(),
//!     &options,
//!     &HostDefaults::default(),
//!     &document,
//!     Box::new(StandardSizeReader),
//! )?;
//!
//! selector.input_mut().select("photo.png", 1_500_000);
//! let accepted = selector.handle_change();
//! # Ok::<(), filtered_file_selector::error::ConfigError>(())
//! ```

pub mod config;
pub mod consts;
pub mod content_types;
pub mod error;
pub mod selector;
pub mod size_reader;
pub mod ui;
pub mod utils;
