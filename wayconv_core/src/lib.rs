//! `wayconv_core` converts the `custom/<name>` modules of a Waybar config
//! into artifacts for the Noctalia shell.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Waybar config (JSON with comments and trailing commas)
//!   -> Sanitizer (strips comments and dangling commas, keeps strings intact)
//!   -> Extractor (finds custom modules, resolves intervals, dedupes names)
//!   -> Transform engine (wraps exec commands that need formatting applied)
//!   -> Emitters (CustomButton widget JSON, or full plugin scaffolds)
//! ```
//!
//! ## Modules
//!
//! - [`sanitizer`]: JSONC to JSON, plus [`parse_jsonc`] with positioned errors.
//! - [`extract`]: custom module discovery across single and multi-bar configs.
//! - [`transform`]: the command decision table and the python filters.
//! - [`emit`]: widget and plugin generators.
//! - [`report`]: per-module conversion notes for display.
//! - [`config`]: `wayconv.toml` loading and Waybar config discovery.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use wayconv_core::ConvertOptions;
//! use wayconv_core::build_widgets;
//! use wayconv_core::extract_modules;
//! use wayconv_core::parse_jsonc;
//! use wayconv_core::write_files;
//!
//! let text = std::fs::read_to_string("config.jsonc").unwrap();
//! let options = ConvertOptions::default();
//! let modules = extract_modules(&parse_jsonc(&text).unwrap(), &options);
//! let widgets = build_widgets(&modules, &options);
//! write_files(Path::new("out"), &widgets.files().unwrap()).unwrap();
//! ```

pub use config::*;
pub use emit::*;
pub use error::*;
pub use extract::*;
pub use module::*;
pub use output::*;
pub use report::*;
pub use sanitizer::*;
pub use template::*;
pub use transform::*;

pub mod config;
pub mod emit;
#[allow(unused_assignments)]
mod error;
pub mod extract;
mod module;
mod output;
pub mod report;
pub mod sanitizer;
mod template;
pub mod transform;

#[cfg(test)]
mod __fixtures;
