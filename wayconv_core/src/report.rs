use crate::config::ConvertOptions;
use crate::module::IntervalMode;
use crate::module::ModuleRecord;
use crate::output::file_stem;
use crate::output::file_stem_warning;

/// Characters of the `exec` command shown in a report before truncating.
pub const EXEC_PREVIEW_CHARS: usize = 50;

/// A human readable summary of how one module was converted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleReport {
	/// `custom/<name>`.
	pub title: String,
	/// The config section the module came from.
	pub source: String,
	/// Behaviour that did not carry over exactly. Empty when the conversion
	/// is complete.
	pub notes: Vec<String>,
	/// What each Waybar setting became.
	pub converted: Vec<String>,
}

impl ModuleReport {
	pub fn is_full_conversion(&self) -> bool {
		self.notes.is_empty()
	}
}

/// Describe the conversion of `module`.
pub fn module_report(module: &ModuleRecord, options: &ConvertOptions) -> ModuleReport {
	let mut notes = Vec::new();

	if let Some(signal) = module.signal.filter(|signal| *signal != 0) {
		notes.push(format!(
			"signal: {signal} (Noctalia uses polling/streaming instead)"
		));
	}
	if module.signal_override_applied {
		notes.push(format!(
			"signal: polling interval set to {}s",
			module.interval_secs
		));
	} else if module.interval_was_defaulted {
		notes.push(format!(
			"interval: defaulted to {}s (Waybar default)",
			options.default_interval_secs
		));
	}
	if module.interval_mode == IntervalMode::Once {
		notes.push("interval: once (treated as streaming in Noctalia)".to_string());
	}
	if module.has_custom_format() {
		notes.push(format!("format: '{}' (converted via formatter)", module.format));
	}
	if !module.format_icons.is_empty() {
		notes.push(format!(
			"format-icons: {} icons (applied when possible)",
			module.format_icons.len()
		));
	}
	if module.escape_markup {
		notes.push("escape: true (Pango markup escaping not directly supported)".to_string());
	}
	if let Some(length) = module.min_length {
		notes.push(format!(
			"min-length: {length} (not directly supported, use CSS/styling)"
		));
	}
	if let Some(secs) = module.restart_interval_secs.filter(|secs| *secs > 0) {
		notes.push(format!("restart-interval: {secs} (plugins only)"));
	}
	if file_stem_warning(&module.name).is_some() {
		notes.push(format!("name: written as `{}`", file_stem(&module.name)));
	}

	let mut converted = Vec::new();
	if !module.exec_command.is_empty() {
		converted.push(format!("exec: {}", exec_preview(&module.exec_command)));
	}
	match module.interval_mode {
		IntervalMode::Poll => {
			converted.push(format!(
				"interval: {}s -> {}ms",
				module.interval_secs,
				module.interval_secs.saturating_mul(1000)
			));
		}
		IntervalMode::Once => converted.push("mode: streaming/once".to_string()),
	}
	if module.on_click.is_some() {
		converted.push("on-click -> leftClickExec".to_string());
	}
	if module.on_click_right.is_some() {
		converted.push("on-click-right -> rightClickExec".to_string());
	}
	if module.on_click_middle.is_some() {
		converted.push("on-click-middle -> middleClickExec".to_string());
	}
	if module.has_scroll_handlers() {
		converted.push("scroll handlers -> wheelUpExec/wheelDownExec".to_string());
	}

	ModuleReport {
		title: format!("custom/{}", module.name),
		source: module.source.clone(),
		notes,
		converted,
	}
}

/// The first [`EXEC_PREVIEW_CHARS`] characters of `exec`, with `...` appended
/// when anything was cut.
pub fn exec_preview(exec: &str) -> String {
	match exec.char_indices().nth(EXEC_PREVIEW_CHARS) {
		Some((index, _)) => format!("{}...", &exec[..index]),
		None => exec.to_string(),
	}
}
