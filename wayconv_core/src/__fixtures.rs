use serde_json::Value;
use serde_json::json;

use crate::config::ConvertOptions;
use crate::module::ModuleRecord;

/// Build a module from an inline mapping with the default options.
pub(crate) fn module(name: &str, mapping: Value) -> ModuleRecord {
	module_with(name, mapping, &ConvertOptions::default())
}

pub(crate) fn module_with(name: &str, mapping: Value, options: &ConvertOptions) -> ModuleRecord {
	let Value::Object(mapping) = mapping else {
		panic!("module fixtures must be JSON objects");
	};
	ModuleRecord::from_mapping(name, "config", &mapping, options)
}

pub(crate) fn battery_json_module() -> ModuleRecord {
	module(
		"battery",
		json!({
			"exec": "~/.local/bin/battery --json",
			"return-type": "json",
			"interval": 30,
			"format": "{icon} {text}",
			"format-icons": ["low", "mid", "high"],
			"on-click": "notify-send battery",
		}),
	)
}

/// A two bar config with a stray non-object entry, exercising comments,
/// trailing commas and duplicate module names.
pub(crate) const MULTI_BAR_CONFIG: &str = r#"// top level comment
[
  {
    "layer": "top",
    "modules-right": ["custom/weather", "clock"],
    /* the weather module */
    "custom/weather": {
      "exec": "curl -s 'https://wttr.in/?format=1'",
      "interval": 600,
    },
    "clock": { "format": "{:%H:%M}" },
  },
  "not a bar",
  {
    "custom/weather": {
      "exec": "weather --short", // second bar
      "signal": 8,
    },
    "custom/media": {
      "exec": "playerctl metadata --follow",
      "interval": "once",
    },
  },
]
"#;
