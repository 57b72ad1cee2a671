mod common;

use common::SAMPLE_CONFIG;
use common::wayconv_cmd;
use common::write_config;
use predicates::prelude::*;
use serde_json::Value;
use serde_json::json;
use similar_asserts::assert_eq;
use wayconv_core::AnyEmptyResult;

fn read_json(path: &std::path::Path) -> Result<Value, Box<dyn std::error::Error>> {
	Ok(serde_json::from_str(&std::fs::read_to_string(path)?)?)
}

#[test]
fn converts_widgets_by_default() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), SAMPLE_CONFIG)?;

	wayconv_cmd(tmp.path())
		.arg("config.jsonc")
		.args(["--output-dir", "out"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Reading Waybar config: config.jsonc"))
		.stdout(predicates::str::contains(
			"Found 2 custom module(s): weather, media",
		))
		.stdout(predicates::str::contains("Generating CustomButton widget configurations..."))
		.stdout(predicates::str::contains("CONVERSION COMPLETE"))
		.stdout(predicates::str::contains("To use CustomButton widgets:"))
		.stdout(predicates::str::contains("To use generated plugins:").not());

	let out = tmp.path().join("out");
	let document = read_json(&out.join("custom_widgets.json"))?;
	assert_eq!(document["widgets"].as_array().map(Vec::len), Some(2));
	assert_eq!(document["widgets"][0]["textIntervalMs"], json!(2000));
	assert_eq!(
		document["widgets"][0]["leftClickExec"],
		json!("xdg-open https://wttr.in")
	);
	assert_eq!(document["widgets"][1]["textStream"], json!(true));
	assert_eq!(document["widgets"][1]["parseJson"], json!(true));

	let weather = read_json(&out.join("widgets/weather.json"))?;
	assert_eq!(weather, document["widgets"][0]);

	let warnings = read_json(&out.join("widget_warnings.json"))?;
	assert_eq!(
		warnings,
		json!({
			"weather": ["signal provided; polling interval set to 2s."],
			"media": [
				"interval is once but output is post-processed; nothing is shown until the command exits."
			],
		})
	);
	assert!(!out.join("plugins").exists());

	Ok(())
}

#[test]
fn converts_plugins() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), SAMPLE_CONFIG)?;

	wayconv_cmd(tmp.path())
		.args(["config.jsonc", "-o", "out", "--mode", "plugins"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Generating plugin scaffolds..."))
		.stdout(predicates::str::contains("To use generated plugins:"));

	let plugin = tmp.path().join("out/plugins/waybar-media");
	for file in [
		"manifest.json",
		"Main.qml",
		"BarWidget.qml",
		"Settings.qml",
		"i18n/en.json",
		"README.md",
	] {
		assert!(plugin.join(file).is_file(), "missing {file}");
	}

	let manifest = read_json(&plugin.join("manifest.json"))?;
	assert_eq!(manifest["id"], json!("waybar-media"));
	assert_eq!(manifest["name"], json!("Waybar Media"));
	assert_eq!(
		manifest["metadata"]["defaultSettings"]["intervalMode"],
		json!("once")
	);
	assert!(tmp.path().join("out/plugins/waybar-weather/Main.qml").is_file());
	assert!(!tmp.path().join("out/custom_widgets.json").exists());

	Ok(())
}

#[test]
fn converts_both() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), SAMPLE_CONFIG)?;

	wayconv_cmd(tmp.path())
		.args(["config.jsonc", "-o", "out", "-m", "both"])
		.assert()
		.success();

	assert!(tmp.path().join("out/custom_widgets.json").is_file());
	assert!(
		tmp.path()
			.join("out/plugins/waybar-weather/manifest.json")
			.is_file()
	);

	Ok(())
}

#[test]
fn emits_every_module_despite_awkward_names() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(
		tmp.path(),
		r#"{
  "custom/..": {"exec": "up", "interval": 1},
  "custom/a/b": {"exec": "first", "interval": 1},
  "custom/a-b": {"exec": "second", "interval": 1},
  "custom/last": {"exec": "last", "interval": 1},
}"#,
	)?;

	wayconv_cmd(tmp.path())
		.args(["config.jsonc", "-o", "out", "-m", "both"])
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"Found 4 custom module(s): .., a/b, a-b-2, last",
		));

	let out = tmp.path().join("out");
	for stem in ["dot-dot", "a-b", "a-b-2", "last"] {
		assert!(out.join(format!("widgets/{stem}.json")).is_file(), "missing {stem}");
		assert!(
			out.join(format!("plugins/waybar-{stem}/manifest.json")).is_file(),
			"missing plugin {stem}"
		);
	}
	assert!(!out.join(".json").exists());

	let first = read_json(&out.join("widgets/a-b.json"))?;
	assert_eq!(first["textCommand"], json!("first"));
	let second = read_json(&out.join("widgets/a-b-2.json"))?;
	assert_eq!(second["textCommand"], json!("second"));

	let warnings = read_json(&out.join("widget_warnings.json"))?;
	assert_eq!(
		warnings,
		json!({"..": ["module name `..` cannot be used as a file name; written as `dot-dot`."]})
	);

	Ok(())
}

#[test]
fn reports_when_no_modules_exist() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), "{\"clock\": {\"format\": \"{:%H}\"}, // none\n}")?;

	wayconv_cmd(tmp.path())
		.args(["config.jsonc", "-o", "out"])
		.assert()
		.success()
		.stdout(predicates::str::contains(
			"No custom modules found in Waybar config.",
		))
		.stdout(predicates::str::contains("CONVERSION COMPLETE").not());

	assert!(!tmp.path().join("out").exists());

	Ok(())
}

#[test]
fn fails_on_malformed_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), "{\"custom/a\": {\"exec\": \"a\"} \"custom/b\": {}}")?;

	wayconv_cmd(tmp.path())
		.args(["config.jsonc", "-o", "out"])
		.assert()
		.code(1)
		.stderr(predicates::str::contains("failed to parse Waybar config"));

	assert!(!tmp.path().join("out").exists());

	Ok(())
}

#[test]
fn fails_on_missing_config() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	wayconv_cmd(tmp.path())
		.arg("missing.jsonc")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("config file not found"));

	Ok(())
}

#[test]
fn dry_run_writes_nothing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), SAMPLE_CONFIG)?;

	wayconv_cmd(tmp.path())
		.args(["config.jsonc", "-o", "out", "-m", "both", "--dry-run"])
		.assert()
		.success()
		.stdout(predicates::str::contains("Would write:"))
		.stdout(predicates::str::contains("custom_widgets.json"))
		.stdout(predicates::str::contains("waybar-media"))
		.stdout(predicates::str::contains("DRY RUN COMPLETE"));

	assert!(!tmp.path().join("out").exists());

	Ok(())
}

#[test]
fn verbose_prints_report() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), SAMPLE_CONFIG)?;

	wayconv_cmd(tmp.path())
		.args(["config.jsonc", "-o", "out", "--verbose"])
		.assert()
		.success()
		.stdout(predicates::str::contains("CONVERSION REPORT"))
		.stdout(predicates::str::contains("[custom/weather] (config)"))
		.stdout(predicates::str::contains(
			"  - signal: polling interval set to 2s",
		))
		.stdout(predicates::str::contains("    mode: streaming/once"));

	Ok(())
}

#[test]
fn interval_flags_override_defaults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), SAMPLE_CONFIG)?;

	wayconv_cmd(tmp.path())
		.args([
			"config.jsonc",
			"-o",
			"out",
			"--default-interval",
			"30",
			"--signal-poll-interval",
			"0",
		])
		.assert()
		.success();

	let weather = read_json(&tmp.path().join("out/widgets/weather.json"))?;
	assert_eq!(weather["textIntervalMs"], json!(30_000));

	Ok(())
}
