use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::ConvertResult;
use crate::config::ConvertOptions;
use crate::module::IntervalMode;
use crate::module::ModuleRecord;
use crate::output::OutputFile;
use crate::output::file_stem;
use crate::output::file_stem_warning;
use crate::transform::TransformResult;
use crate::transform::transform;

/// Widget type understood by Noctalia.
pub const WIDGET_TYPE: &str = "CustomButton";

/// Longest text shown on a vertical bar.
pub const MAX_VERTICAL_TEXT_LENGTH: u32 = 10;

pub const WIDGETS_FILE: &str = "custom_widgets.json";
pub const WIDGETS_DIR: &str = "widgets";
pub const WARNINGS_FILE: &str = "widget_warnings.json";

pub const RESTART_UNSUPPORTED_WARNING: &str =
	"restart-interval is not supported for CustomButton widgets.";

/// Scroll handling where up and down run different commands.
pub const WHEEL_MODE_SEPARATE: &str = "separate";

#[allow(clippy::trivially_copy_pass_by_ref)]
fn is_false(value: &bool) -> bool {
	!*value
}

/// Text length limits for horizontal and vertical bars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct MaxTextLength {
	pub horizontal: u32,
	pub vertical: u32,
}

/// A Noctalia `CustomButton` widget. Unset values are omitted from the JSON
/// rather than written as `false` or empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
	#[serde(rename = "type")]
	pub widget_type: &'static str,
	pub text_command: String,
	#[serde(skip_serializing_if = "is_false")]
	pub text_stream: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub text_interval_ms: Option<u64>,
	#[serde(skip_serializing_if = "is_false")]
	pub parse_json: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub left_click_exec: Option<String>,
	#[serde(skip_serializing_if = "is_false")]
	pub left_click_update_text: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub right_click_exec: Option<String>,
	#[serde(skip_serializing_if = "is_false")]
	pub right_click_update_text: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub middle_click_exec: Option<String>,
	#[serde(skip_serializing_if = "is_false")]
	pub middle_click_update_text: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wheel_up_exec: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wheel_down_exec: Option<String>,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub wheel_mode: Option<&'static str>,
	#[serde(skip_serializing_if = "is_false")]
	pub wheel_up_update_text: bool,
	#[serde(skip_serializing_if = "is_false")]
	pub wheel_down_update_text: bool,
	#[serde(skip_serializing_if = "Option::is_none")]
	pub max_text_length: Option<MaxTextLength>,
}

impl WidgetConfig {
	fn new(text_command: String) -> Self {
		Self {
			widget_type: WIDGET_TYPE,
			text_command,
			text_stream: false,
			text_interval_ms: None,
			parse_json: false,
			left_click_exec: None,
			left_click_update_text: false,
			right_click_exec: None,
			right_click_update_text: false,
			middle_click_exec: None,
			middle_click_update_text: false,
			wheel_up_exec: None,
			wheel_down_exec: None,
			wheel_mode: None,
			wheel_up_update_text: false,
			wheel_down_update_text: false,
			max_text_length: None,
		}
	}
}

/// A converted widget and the warnings raised while converting it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WidgetConversion {
	pub widget: WidgetConfig,
	pub warnings: Vec<String>,
}

/// Project a module and its transformed command onto a `CustomButton`.
pub fn to_widget_config(
	module: &ModuleRecord,
	transform: &TransformResult,
	default_interval_secs: u64,
) -> WidgetConversion {
	let mut warnings = transform.warnings.clone();
	if module.signal_override_applied {
		warnings.push(format!(
			"signal provided; polling interval set to {}s.",
			module.interval_secs
		));
	} else if module.interval_was_defaulted {
		warnings.push(format!(
			"interval not set; defaulting to {default_interval_secs}s (Waybar default)."
		));
	}

	let mut widget = WidgetConfig::new(transform.command.clone());

	match module.interval_mode {
		IntervalMode::Once => widget.text_stream = true,
		IntervalMode::Poll => {
			widget.text_interval_ms =
				Some(module.interval_secs.saturating_mul(1000)).filter(|ms| *ms > 0);
		}
	}
	widget.parse_json = transform.parse_as_json;

	let update_text = module.exec_on_event;
	if let Some(command) = &module.on_click {
		widget.left_click_exec = Some(command.clone());
		widget.left_click_update_text = update_text;
	}
	if let Some(command) = &module.on_click_right {
		widget.right_click_exec = Some(command.clone());
		widget.right_click_update_text = update_text;
	}
	if let Some(command) = &module.on_click_middle {
		widget.middle_click_exec = Some(command.clone());
		widget.middle_click_update_text = update_text;
	}

	if module.has_scroll_handlers() {
		widget.wheel_up_exec.clone_from(&module.on_scroll_up);
		widget.wheel_down_exec.clone_from(&module.on_scroll_down);
		widget.wheel_mode = Some(WHEEL_MODE_SEPARATE);
		widget.wheel_up_update_text = update_text && module.on_scroll_up.is_some();
		widget.wheel_down_update_text = update_text && module.on_scroll_down.is_some();
	}

	widget.max_text_length = module.max_length.map(|length| {
		MaxTextLength {
			horizontal: length,
			vertical: length.min(MAX_VERTICAL_TEXT_LENGTH),
		}
	});

	if module.restart_interval_secs.is_some() {
		warnings.push(RESTART_UNSUPPORTED_WARNING.to_string());
	}
	warnings.extend(file_stem_warning(&module.name));

	WidgetConversion { widget, warnings }
}

/// The aggregate document listing every widget.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetDocument {
	#[serde(rename = "_comment")]
	pub comment: &'static str,
	#[serde(rename = "_instructions")]
	pub instructions: [&'static str; 2],
	pub widgets: Vec<WidgetConfig>,
}

/// Widgets for a whole module list, in module order.
#[derive(Debug, Clone)]
pub struct WidgetOutput {
	pub document: WidgetDocument,
	/// Module name for each entry of `document.widgets`.
	pub names: Vec<String>,
	/// Warnings per module name, only for modules that have any.
	pub warnings: Vec<(String, Vec<String>)>,
}

impl WidgetOutput {
	pub fn has_warnings(&self) -> bool {
		!self.warnings.is_empty()
	}

	/// The warnings as a JSON object keyed by module name.
	pub fn warnings_json(&self) -> Value {
		let map: Map<String, Value> = self
			.warnings
			.iter()
			.map(|(name, warnings)| {
				let list = warnings.iter().cloned().map(Value::String).collect();
				(name.clone(), Value::Array(list))
			})
			.collect();
		Value::Object(map)
	}

	/// The aggregate document, one file per widget and, when any module has
	/// warnings, the warnings document.
	pub fn files(&self) -> ConvertResult<Vec<OutputFile>> {
		let mut files = vec![OutputFile::json(WIDGETS_FILE, &self.document)?];

		for (name, widget) in self.names.iter().zip(&self.document.widgets) {
			let path = format!("{WIDGETS_DIR}/{}.json", file_stem(name));
			files.push(OutputFile::json(path, widget)?);
		}

		if self.has_warnings() {
			files.push(OutputFile::json(WARNINGS_FILE, &self.warnings_json())?);
		}

		Ok(files)
	}
}

/// Transform and convert every module.
pub fn build_widgets(modules: &[ModuleRecord], options: &ConvertOptions) -> WidgetOutput {
	let mut widgets = Vec::with_capacity(modules.len());
	let mut names = Vec::with_capacity(modules.len());
	let mut warnings = Vec::new();

	for module in modules {
		let transformed = transform(module);
		let conversion = to_widget_config(module, &transformed, options.default_interval_secs);
		if !conversion.warnings.is_empty() {
			warnings.push((module.name.clone(), conversion.warnings));
		}
		widgets.push(conversion.widget);
		names.push(module.name.clone());
	}

	WidgetOutput {
		document: WidgetDocument {
			comment: "Add these widgets to your Noctalia bar configuration",
			instructions: [
				"Copy the widgets array entries to your settings.json",
				"Add them to bar.widgets.left, bar.widgets.center, or bar.widgets.right",
			],
			widgets,
		},
		names,
		warnings,
	}
}
