use std::collections::HashMap;
use std::collections::HashSet;

use serde_json::Map;
use serde_json::Value;
use tracing::debug;

use crate::config::ConvertOptions;
use crate::module::ModuleRecord;
use crate::output::file_stem;

/// Key prefix identifying Waybar custom modules.
pub const CUSTOM_MODULE_PREFIX: &str = "custom/";

/// Top-level config sections with their provenance labels.
///
/// An array config yields each mapping element labelled `config[<index>]`;
/// other elements are skipped. A mapping config is a single section labelled
/// `config`. Anything else has no sections.
pub fn config_sections(value: &Value) -> Vec<(String, &Map<String, Value>)> {
	match value {
		Value::Array(items) => {
			items
				.iter()
				.enumerate()
				.filter_map(|(index, item)| {
					let Some(section) = item.as_object() else {
						debug!(index, "skipping config section that is not an object");
						return None;
					};
					Some((format!("config[{index}]"), section))
				})
				.collect()
		}
		Value::Object(section) => vec![("config".to_string(), section)],
		_ => {
			debug!("config root is neither an object nor an array");
			Vec::new()
		}
	}
}

/// Extract every `custom/<name>` module in document order, with unique
/// names.
pub fn extract_modules(value: &Value, options: &ConvertOptions) -> Vec<ModuleRecord> {
	let mut modules = Vec::new();

	for (source, section) in config_sections(value) {
		for (key, entry) in section {
			let Some(name) = key.strip_prefix(CUSTOM_MODULE_PREFIX) else {
				continue;
			};
			if name.is_empty() {
				debug!(section = %source, "skipping custom module with an empty name");
				continue;
			}
			let Some(mapping) = entry.as_object() else {
				debug!(key = %key, "skipping custom module that is not an object");
				continue;
			};
			modules.push(ModuleRecord::from_mapping(name, &source, mapping, options));
		}
	}

	dedupe_names(modules)
}

/// Rename repeated module names so they are unique. The first occurrence
/// keeps its name and the `n`th occurrence becomes `<name>-<n>`. A suffixed
/// name that is already taken moves on to the next free number.
///
/// Names are compared by their [`file_stem`], so `a/b` and `a-b` count as
/// the same name.
pub fn dedupe_names(modules: Vec<ModuleRecord>) -> Vec<ModuleRecord> {
	let mut occurrences: HashMap<String, usize> = HashMap::new();
	let mut taken: HashSet<String> = HashSet::new();

	modules
		.into_iter()
		.map(|mut module| {
			let count = occurrences.entry(file_stem(&module.name)).or_insert(0);
			*count += 1;

			let mut candidate = if *count == 1 {
				module.name.clone()
			} else {
				format!("{}-{count}", module.name)
			};
			while taken.contains(&file_stem(&candidate)) {
				*count += 1;
				candidate = format!("{}-{count}", module.name);
			}

			if candidate != module.name {
				debug!(from = %module.name, to = %candidate, "renamed repeated module");
			}
			taken.insert(file_stem(&candidate));
			module.name = candidate;
			module
		})
		.collect()
}
