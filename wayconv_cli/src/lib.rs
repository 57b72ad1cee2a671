use std::path::PathBuf;

use clap::Parser;
use clap::ValueEnum;
use wayconv_core::ArtifactMode;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Convert Waybar custom modules into Noctalia widgets or plugin scaffolds.",
	long_about = "wayconv reads a Waybar config (JSON with comments and trailing commas), \
	              finds every `custom/<name>` module and converts it for the Noctalia \
	              shell.\n\nWidget mode writes CustomButton widget configurations ready to \
	              paste into Noctalia's settings.json. Plugin mode writes a complete plugin \
	              per module, with a manifest, QML entry points, settings UI and \
	              translations.\n\nExamples:\n  wayconv                                  Use \
	              the default Waybar config\n  wayconv ~/.config/waybar/config          \
	              Convert a specific config\n  wayconv --mode plugins                   \
	              Generate plugin scaffolds\n  wayconv --mode both --output-dir ./out   \
	              Generate both"
)]
pub struct WayconvCli {
	/// Path to the Waybar config file. Defaults to the first of
	/// `~/.config/waybar/config`, `~/.config/waybar/config.jsonc` and
	/// `/etc/xdg/waybar/config` that exists.
	pub config_path: Option<PathBuf>,

	/// Directory generated files are written to. Falls back to `output_dir`
	/// in `wayconv.toml`, then `./waybar-converted`.
	#[arg(long, short)]
	pub output_dir: Option<PathBuf>,

	/// Artifacts to generate. Falls back to `mode` in `wayconv.toml`, then
	/// `widgets`.
	#[arg(long, short, value_enum)]
	pub mode: Option<OutputMode>,

	/// Print a per-module conversion report and enable debug logging.
	#[arg(long, short, default_value_t = false)]
	pub verbose: bool,

	/// Seconds between runs for modules without an `interval`.
	#[arg(long)]
	pub default_interval: Option<u64>,

	/// Seconds between runs for `signal` modules without an `interval`. Use
	/// `0` to fall back to the default interval instead.
	#[arg(long)]
	pub signal_poll_interval: Option<u64>,

	/// List the files that would be written without writing them.
	#[arg(long, default_value_t = false)]
	pub dry_run: bool,

	/// Disable colored output.
	#[arg(long, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputMode {
	/// CustomButton widget configurations.
	Widgets,
	/// Full plugin scaffolds.
	Plugins,
	/// Widgets and plugins.
	Both,
}

impl From<OutputMode> for ArtifactMode {
	fn from(mode: OutputMode) -> Self {
		match mode {
			OutputMode::Widgets => Self::Widgets,
			OutputMode::Plugins => Self::Plugins,
			OutputMode::Both => Self::Both,
		}
	}
}
