use std::fmt;

use serde::Serialize;
use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::config::ConvertOptions;

/// Format string that displays the command output unchanged.
pub const PASSTHROUGH_FORMAT: &str = "{}";
/// Alternate spelling of [`PASSTHROUGH_FORMAT`].
pub const PASSTHROUGH_TEXT_FORMAT: &str = "{text}";
/// Largest interval in seconds that still fits in `u64` milliseconds.
pub const MAX_INTERVAL_SECS: u64 = u64::MAX / 1000;

/// How the module's command is scheduled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum IntervalMode {
	/// Re-run the command every `interval_secs` seconds.
	Poll,
	/// Run the command once and treat its output as a stream.
	Once,
}

impl fmt::Display for IntervalMode {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Poll => write!(f, "poll"),
			Self::Once => write!(f, "once"),
		}
	}
}

/// How the module's command output should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReturnType {
	/// Output is displayed as text.
	#[default]
	Plain,
	/// Output is a JSON object with `text`, `tooltip`, `percentage`, ...
	Json,
}

/// The outcome of interval resolution for a single module.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalResolution {
	pub mode: IntervalMode,
	pub secs: u64,
	pub defaulted: bool,
}

impl IntervalResolution {
	fn poll(secs: u64, defaulted: bool) -> Self {
		Self {
			mode: IntervalMode::Poll,
			secs,
			defaulted,
		}
	}

	fn once() -> Self {
		Self {
			mode: IntervalMode::Once,
			secs: 0,
			defaulted: false,
		}
	}
}

/// Resolve a raw Waybar `interval` value.
///
/// Absent or unparsable values fall back to `default_secs` and are marked as
/// defaulted. `"once"` (any case) and numbers that truncate to zero or less
/// select [`IntervalMode::Once`]. Numeric strings such as `"2.5"` are accepted
/// and truncated.
pub fn resolve_interval(raw: Option<&Value>, default_secs: u64) -> IntervalResolution {
	let Some(raw) = raw else {
		return IntervalResolution::poll(default_secs.min(MAX_INTERVAL_SECS), true);
	};

	if raw
		.as_str()
		.is_some_and(|value| value.trim().eq_ignore_ascii_case("once"))
	{
		return IntervalResolution::once();
	}

	match interval_number(raw) {
		Some(secs) if secs <= 0.0 => IntervalResolution::once(),
		Some(secs) => IntervalResolution::poll(clamp_secs(secs), false),
		None => IntervalResolution::poll(default_secs.min(MAX_INTERVAL_SECS), true),
	}
}

fn interval_number(raw: &Value) -> Option<f64> {
	let number = match raw {
		Value::Number(number) => number.as_f64(),
		Value::String(text) => text.trim().parse::<f64>().ok(),
		_ => None,
	};

	number.filter(|value| value.is_finite()).map(f64::trunc)
}

/// Whole seconds from a non-negative finite value, capped at
/// [`MAX_INTERVAL_SECS`].
fn clamp_secs(secs: f64) -> u64 {
	(secs as u64).min(MAX_INTERVAL_SECS)
}

/// A Waybar `custom/<name>` module, normalized with all defaults applied.
#[derive(Debug, Clone, PartialEq)]
pub struct ModuleRecord {
	/// Unique module name (the part after `custom/`, possibly suffixed).
	pub name: String,
	/// The config section the module came from, e.g. `config[1]`.
	pub source: String,
	pub exec_command: String,
	pub exec_if_condition: String,
	pub interval_mode: IntervalMode,
	/// Always `0` in [`IntervalMode::Once`].
	pub interval_secs: u64,
	pub interval_was_defaulted: bool,
	pub signal: Option<i64>,
	pub signal_override_applied: bool,
	pub format: String,
	pub format_icons: Vec<String>,
	pub return_type: ReturnType,
	pub max_length: Option<u32>,
	pub min_length: Option<u32>,
	pub tooltip: bool,
	pub on_click: Option<String>,
	pub on_click_right: Option<String>,
	pub on_click_middle: Option<String>,
	pub on_scroll_up: Option<String>,
	pub on_scroll_down: Option<String>,
	pub escape_markup: bool,
	/// Whether running a click or scroll handler should refresh the text.
	pub exec_on_event: bool,
	pub restart_interval_secs: Option<u64>,
}

impl ModuleRecord {
	/// Build a record from the JSON mapping of a `custom/<name>` entry.
	///
	/// This is the only place field defaults are decided. Unknown keys are
	/// ignored and values of the wrong type are treated as absent.
	pub fn from_mapping(
		name: impl Into<String>,
		source: impl Into<String>,
		mapping: &Map<String, Value>,
		options: &ConvertOptions,
	) -> Self {
		let name = name.into();
		let signal = mapping.get("signal").and_then(Value::as_i64);

		let mut interval = resolve_interval(mapping.get("interval"), options.default_interval_secs);
		let mut signal_override_applied = false;
		if interval.defaulted && signal.is_some() && options.signal_poll_interval_secs > 0 {
			interval = IntervalResolution::poll(options.signal_poll_interval_secs.min(MAX_INTERVAL_SECS), false);
			signal_override_applied = true;
		}

		debug!(
			module = %name,
			mode = %interval.mode,
			secs = interval.secs,
			defaulted = interval.defaulted,
			signal_override = signal_override_applied,
			"resolved interval"
		);

		let format = string_field(mapping, "format")
			.filter(|format| !format.is_empty())
			.unwrap_or_else(|| PASSTHROUGH_FORMAT.to_string());
		let return_type = match mapping.get("return-type").and_then(Value::as_str) {
			Some("json") => ReturnType::Json,
			_ => ReturnType::Plain,
		};

		Self {
			name,
			source: source.into(),
			exec_command: string_field(mapping, "exec").unwrap_or_default(),
			exec_if_condition: string_field(mapping, "exec-if").unwrap_or_default(),
			interval_mode: interval.mode,
			interval_secs: interval.secs,
			interval_was_defaulted: interval.defaulted,
			signal,
			signal_override_applied,
			format,
			format_icons: icons_field(mapping.get("format-icons")),
			return_type,
			max_length: length_field(mapping, "max-length"),
			min_length: length_field(mapping, "min-length"),
			tooltip: bool_field(mapping, "tooltip", true),
			on_click: handler_field(mapping, "on-click"),
			on_click_right: handler_field(mapping, "on-click-right"),
			on_click_middle: handler_field(mapping, "on-click-middle"),
			on_scroll_up: handler_field(mapping, "on-scroll-up"),
			on_scroll_down: handler_field(mapping, "on-scroll-down"),
			escape_markup: bool_field(mapping, "escape", false),
			exec_on_event: bool_field(mapping, "exec-on-event", true),
			restart_interval_secs: mapping
				.get("restart-interval")
				.and_then(Value::as_f64)
				.filter(|secs| secs.is_finite() && *secs >= 0.0)
				.map(clamp_secs),
		}
	}

	/// True when `format` does more than pass the output through.
	pub fn has_custom_format(&self) -> bool {
		self.format != PASSTHROUGH_FORMAT && self.format != PASSTHROUGH_TEXT_FORMAT
	}

	pub fn is_json(&self) -> bool {
		self.return_type == ReturnType::Json
	}

	/// True when at least one scroll handler is configured.
	pub fn has_scroll_handlers(&self) -> bool {
		self.on_scroll_up.is_some() || self.on_scroll_down.is_some()
	}
}

fn string_field(mapping: &Map<String, Value>, key: &str) -> Option<String> {
	mapping.get(key).and_then(Value::as_str).map(str::to_string)
}

fn handler_field(mapping: &Map<String, Value>, key: &str) -> Option<String> {
	string_field(mapping, key).filter(|command| !command.is_empty())
}

fn bool_field(mapping: &Map<String, Value>, key: &str, default: bool) -> bool {
	mapping.get(key).and_then(Value::as_bool).unwrap_or(default)
}

fn length_field(mapping: &Map<String, Value>, key: &str) -> Option<u32> {
	mapping
		.get(key)
		.and_then(Value::as_u64)
		.filter(|length| *length > 0)
		.and_then(|length| u32::try_from(length).ok())
}

/// Icons are either a plain list or Waybar's per-state object, in which case
/// the `default` list is used.
fn icons_field(raw: Option<&Value>) -> Vec<String> {
	let list = match raw {
		Some(Value::Array(items)) => items,
		Some(Value::Object(states)) => {
			match states.get("default") {
				Some(Value::Array(items)) => items,
				_ => return Vec::new(),
			}
		}
		_ => return Vec::new(),
	};

	list.iter()
		.filter_map(|icon| {
			match icon {
				Value::String(text) => Some(text.clone()),
				Value::Number(number) => Some(number.to_string()),
				_ => None,
			}
		})
		.collect()
}
