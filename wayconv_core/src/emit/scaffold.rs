use serde::Serialize;
use serde_json::json;

use crate::ConvertError;
use crate::ConvertResult;
use crate::config::ConvertOptions;
use crate::module::IntervalMode;
use crate::module::ModuleRecord;
use crate::output::OutputFile;
use crate::output::file_stem;
use crate::template::TemplateSet;
use crate::template::escape_qml_string;

/// Directory below the output root holding one directory per plugin.
pub const PLUGINS_DIR: &str = "plugins";
pub const PLUGIN_ID_PREFIX: &str = "waybar-";
pub const PLUGIN_VERSION: &str = "1.0.0";
pub const PLUGIN_AUTHOR: &str = "waybar-converter";

pub const MANIFEST_FILE: &str = "manifest.json";
pub const MAIN_FILE: &str = "Main.qml";
pub const BAR_WIDGET_FILE: &str = "BarWidget.qml";
pub const SETTINGS_FILE: &str = "Settings.qml";
pub const I18N_FILE: &str = "i18n/en.json";
pub const README_FILE: &str = "README.md";

const TEMPLATES: [(&str, &str); 4] = [
	(MAIN_FILE, include_str!("../../templates/Main.qml.j2")),
	(BAR_WIDGET_FILE, include_str!("../../templates/BarWidget.qml.j2")),
	(SETTINGS_FILE, include_str!("../../templates/Settings.qml.j2")),
	(README_FILE, include_str!("../../templates/README.md.j2")),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryPoints {
	pub main: &'static str,
	pub bar_widget: &'static str,
	pub settings: &'static str,
}

/// Settings the plugin starts with. Values saved by the user in Noctalia
/// override these, and these override the values baked into the templates.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DefaultSettings {
	pub text_command: String,
	pub interval: u64,
	pub interval_mode: IntervalMode,
	pub restart_interval_ms: u64,
	pub parse_json: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ManifestMetadata {
	pub default_settings: DefaultSettings,
}

/// The `manifest.json` of a generated plugin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluginManifest {
	pub id: String,
	pub name: String,
	pub version: &'static str,
	pub author: &'static str,
	pub description: String,
	pub entry_points: EntryPoints,
	pub metadata: ManifestMetadata,
}

/// All files of one generated plugin. Paths are relative to the output
/// root, e.g. `plugins/waybar-clock/Main.qml`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PluginScaffold {
	pub id: String,
	pub manifest: PluginManifest,
	pub files: Vec<OutputFile>,
}

/// Values interpolated into the templates. Strings bound for QML string
/// literals are escaped before they get here.
#[derive(Debug, Serialize)]
struct ScaffoldContext {
	plugin_id: String,
	module_name: String,
	display_name: String,
	text_command: String,
	interval: u64,
	interval_mode: IntervalMode,
	restart_interval_ms: u64,
	parse_json: bool,
	exec_if: String,
	format: String,
	format_icons: String,
	escape_markup: bool,
	exec_on_event: bool,
	on_click: String,
	on_click_right: String,
	on_click_middle: String,
	on_scroll_up: String,
	on_scroll_down: String,
}

/// `waybar-<name>`, with path separators in the name replaced.
pub fn plugin_id(module: &ModuleRecord) -> String {
	format!("{PLUGIN_ID_PREFIX}{}", file_stem(&module.name))
}

/// `Waybar Cpu Temp` for a module named `cpu-temp`.
pub fn display_name(module: &ModuleRecord) -> String {
	format!("Waybar {}", title_case(&module.name.replace('-', " ")))
}

/// Upper-case the first letter of every word and lower-case the rest, where
/// any non-alphabetic character starts a new word.
fn title_case(text: &str) -> String {
	let mut result = String::with_capacity(text.len());
	let mut previous_is_alphabetic = false;

	for ch in text.chars() {
		if previous_is_alphabetic {
			result.extend(ch.to_lowercase());
		} else {
			result.extend(ch.to_uppercase());
		}
		previous_is_alphabetic = ch.is_alphabetic();
	}

	result
}

/// The manifest's default settings for a module. Streaming modules have no
/// meaningful poll interval and start from `default_interval_secs` in case
/// the user switches them to polling.
pub fn default_settings(module: &ModuleRecord, default_interval_secs: u64) -> DefaultSettings {
	let interval = match module.interval_mode {
		IntervalMode::Poll => module.interval_secs,
		IntervalMode::Once => default_interval_secs,
	};

	DefaultSettings {
		text_command: module.exec_command.clone(),
		interval,
		interval_mode: module.interval_mode,
		restart_interval_ms: module
			.restart_interval_secs
			.unwrap_or(0)
			.saturating_mul(1000),
		parse_json: module.is_json(),
	}
}

/// Generate the manifest, the three QML templates, the localization table
/// and the readme for a module.
pub fn to_scaffold(module: &ModuleRecord, default_interval_secs: u64) -> ConvertResult<PluginScaffold> {
	render_scaffold(&TemplateSet::new(&TEMPLATES)?, module, default_interval_secs)
}

/// Scaffold every module, in module order.
pub fn build_scaffolds(
	modules: &[ModuleRecord],
	options: &ConvertOptions,
) -> ConvertResult<Vec<PluginScaffold>> {
	let templates = TemplateSet::new(&TEMPLATES)?;
	modules
		.iter()
		.map(|module| render_scaffold(&templates, module, options.default_interval_secs))
		.collect()
}

fn render_scaffold(
	templates: &TemplateSet,
	module: &ModuleRecord,
	default_interval_secs: u64,
) -> ConvertResult<PluginScaffold> {
	let id = plugin_id(module);
	let name = display_name(module);
	let settings = default_settings(module, default_interval_secs);

	let manifest = PluginManifest {
		id: id.clone(),
		name: name.clone(),
		version: PLUGIN_VERSION,
		author: PLUGIN_AUTHOR,
		description: format!("Converted from Waybar custom/{} module", module.name),
		entry_points: EntryPoints {
			main: MAIN_FILE,
			bar_widget: BAR_WIDGET_FILE,
			settings: SETTINGS_FILE,
		},
		metadata: ManifestMetadata {
			default_settings: settings.clone(),
		},
	};

	let handler = |command: &Option<String>| escape_qml_string(command.as_deref().unwrap_or(""));
	let format_icons = serde_json::to_string(&module.format_icons).map_err(|e| {
		ConvertError::Serialize {
			what: "format-icons".to_string(),
			reason: e.to_string(),
		}
	})?;

	let context = ScaffoldContext {
		plugin_id: escape_qml_string(&id),
		module_name: module.name.clone(),
		display_name: name.clone(),
		text_command: escape_qml_string(&settings.text_command),
		interval: settings.interval,
		interval_mode: settings.interval_mode,
		restart_interval_ms: settings.restart_interval_ms,
		parse_json: settings.parse_json,
		exec_if: escape_qml_string(&module.exec_if_condition),
		format: escape_qml_string(&module.format),
		format_icons,
		escape_markup: module.escape_markup,
		exec_on_event: module.exec_on_event,
		on_click: handler(&module.on_click),
		on_click_right: handler(&module.on_click_right),
		on_click_middle: handler(&module.on_click_middle),
		on_scroll_up: handler(&module.on_scroll_up),
		on_scroll_down: handler(&module.on_scroll_down),
	};

	let i18n = json!({
		"title": name,
		"description": format!("Converted from Waybar custom/{}", module.name),
		"settings": {
			"title": "Waybar Module",
			"description": "Configure the command and update cadence for this converted module.",
			"command": "Text command",
			"interval-mode": "Interval mode",
			"interval": "Poll interval (seconds)",
			"restart": "Restart interval (ms)",
			"parse-json": "Parse JSON",
			"save": "Save",
		},
	});

	let dir = format!("{PLUGINS_DIR}/{id}");
	let mut files = vec![OutputFile::json(format!("{dir}/{MANIFEST_FILE}"), &manifest)?];
	for (template, _) in TEMPLATES {
		if template == README_FILE {
			continue;
		}
		files.push(OutputFile::new(
			format!("{dir}/{template}"),
			templates.render(template, &context)?,
		));
	}
	files.push(OutputFile::json(format!("{dir}/{I18N_FILE}"), &i18n)?);
	files.push(OutputFile::new(
		format!("{dir}/{README_FILE}"),
		templates.render(README_FILE, &context)?,
	));

	Ok(PluginScaffold {
		id,
		manifest,
		files,
	})
}
