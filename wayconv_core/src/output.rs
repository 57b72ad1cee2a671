use std::path::Path;
use std::path::PathBuf;

use serde::Serialize;

use crate::ConvertError;
use crate::ConvertResult;

/// A generated file, with a path relative to the output directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputFile {
	pub path: PathBuf,
	pub contents: String,
}

impl OutputFile {
	pub fn new(path: impl Into<PathBuf>, contents: impl Into<String>) -> Self {
		Self {
			path: path.into(),
			contents: contents.into(),
		}
	}

	/// A pretty printed JSON document (two space indent, trailing newline).
	pub fn json(path: impl Into<PathBuf>, value: &impl Serialize) -> ConvertResult<Self> {
		let path = path.into();
		let mut contents = serde_json::to_string_pretty(value).map_err(|e| {
			ConvertError::Serialize {
				what: path.display().to_string(),
				reason: e.to_string(),
			}
		})?;
		contents.push('\n');

		Ok(Self { path, contents })
	}
}

/// Stem used for a module named `.`.
pub const DOT_STEM: &str = "dot";
/// Stem used for a module named `..`.
pub const DOT_DOT_STEM: &str = "dot-dot";
/// Stem used for a module with no name.
pub const EMPTY_STEM: &str = "module";

/// Turn a module name into a single path segment. Path separators become
/// `-`. Names that would resolve to the directory itself or its parent are
/// replaced by [`DOT_STEM`], [`DOT_DOT_STEM`] or [`EMPTY_STEM`].
pub fn file_stem(name: &str) -> String {
	let stem = name.replace(['/', '\\'], "-");
	match stem.as_str() {
		"" => EMPTY_STEM.to_string(),
		"." => DOT_STEM.to_string(),
		".." => DOT_DOT_STEM.to_string(),
		_ => stem,
	}
}

/// A warning for module names that [`file_stem`] had to replace rather than
/// only separate.
pub fn file_stem_warning(name: &str) -> Option<String> {
	let stem = file_stem(name);
	(stem != name.replace(['/', '\\'], "-")).then(|| {
		format!("module name `{name}` cannot be used as a file name; written as `{stem}`.")
	})
}

/// Write every file below `root`, creating directories as needed. Returns
/// the absolute paths written, in order.
pub fn write_files(root: &Path, files: &[OutputFile]) -> ConvertResult<Vec<PathBuf>> {
	let mut written = Vec::with_capacity(files.len());

	for file in files {
		let path = root.join(&file.path);
		if let Some(parent) = path.parent() {
			std::fs::create_dir_all(parent)?;
		}
		std::fs::write(&path, &file.contents)?;
		written.push(path);
	}

	Ok(written)
}
