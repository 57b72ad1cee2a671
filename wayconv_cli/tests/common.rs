use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub const SAMPLE_CONFIG: &str = r#"{
  // main bar
  "modules-right": ["custom/weather", "custom/media"],
  "custom/weather": {
    "exec": "weather --short",
    "signal": 8,
    "on-click": "xdg-open https://wttr.in",
  },
  "custom/media": {
    "exec": "playerctl metadata --follow",
    "interval": "once",
    "return-type": "json",
    "format": "{icon} {text}",
    "format-icons": ["play", "pause"],
  },
}
"#;

/// A `wayconv` command running inside `dir` with colors disabled.
pub fn wayconv_cmd(dir: &Path) -> Command {
	let mut cmd = Command::new(get_cargo_bin("wayconv"));
	cmd.env("NO_COLOR", "1").env_remove("RUST_LOG").current_dir(dir);
	cmd
}

/// Write `contents` as `config.jsonc` inside `dir`.
pub fn write_config(dir: &Path, contents: &str) -> std::io::Result<()> {
	std::fs::write(dir.join("config.jsonc"), contents)
}
