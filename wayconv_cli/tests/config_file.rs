mod common;

use common::SAMPLE_CONFIG;
use common::wayconv_cmd;
use common::write_config;
use serde_json::Value;
use serde_json::json;
use wayconv_core::AnyEmptyResult;

#[test]
fn reads_settings_from_wayconv_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), SAMPLE_CONFIG)?;
	std::fs::write(
		tmp.path().join("wayconv.toml"),
		"mode = \"plugins\"\noutput_dir = \"generated\"\nsignal_poll_interval = 0\ndefault_interval = 15\n",
	)?;

	wayconv_cmd(tmp.path())
		.arg("config.jsonc")
		.assert()
		.success();

	let manifest: Value = serde_json::from_str(&std::fs::read_to_string(
		tmp.path()
			.join("generated/plugins/waybar-weather/manifest.json"),
	)?)?;
	assert_eq!(
		manifest["metadata"]["defaultSettings"]["interval"],
		json!(15)
	);
	assert!(!tmp.path().join("generated/custom_widgets.json").exists());

	Ok(())
}

#[test]
fn flags_take_precedence_over_wayconv_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), SAMPLE_CONFIG)?;
	std::fs::write(
		tmp.path().join(".wayconv.toml"),
		"mode = \"plugins\"\noutput_dir = \"generated\"\n",
	)?;

	wayconv_cmd(tmp.path())
		.args(["config.jsonc", "--mode", "widgets", "--output-dir", "flagged"])
		.assert()
		.success();

	assert!(tmp.path().join("flagged/custom_widgets.json").is_file());
	assert!(!tmp.path().join("flagged/plugins").exists());
	assert!(!tmp.path().join("generated").exists());

	Ok(())
}

#[test]
fn rejects_invalid_wayconv_toml() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	write_config(tmp.path(), SAMPLE_CONFIG)?;
	std::fs::write(tmp.path().join("wayconv.toml"), "unknown_key = true\n")?;

	wayconv_cmd(tmp.path())
		.arg("config.jsonc")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("failed to parse config file"));

	Ok(())
}
