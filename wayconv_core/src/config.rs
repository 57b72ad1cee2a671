use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::ConvertError;
use crate::ConvertResult;

/// Waybar's own polling interval when a module sets none.
pub const DEFAULT_INTERVAL_SECS: u64 = 60;

/// Polling interval substituted for signal-driven modules without an
/// interval.
pub const DEFAULT_SIGNAL_POLL_INTERVAL_SECS: u64 = 2;

/// Default output directory used by the CLI.
pub const DEFAULT_OUTPUT_DIR: &str = "./waybar-converted";

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] =
	["wayconv.toml", ".wayconv.toml", ".config/wayconv.toml"];

/// Waybar config locations relative to the user config directory, searched
/// before [`SYSTEM_WAYBAR_CONFIG`].
pub const WAYBAR_CONFIG_CANDIDATES: [&str; 2] = ["waybar/config", "waybar/config.jsonc"];

/// System-wide Waybar config.
pub const SYSTEM_WAYBAR_CONFIG: &str = "/etc/xdg/waybar/config";

/// Numeric knobs the conversion pipeline needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConvertOptions {
	/// Interval used when a module has no usable `interval`.
	pub default_interval_secs: u64,
	/// Interval used instead of the default when a module sets `signal`.
	/// `0` disables the override.
	pub signal_poll_interval_secs: u64,
}

impl Default for ConvertOptions {
	fn default() -> Self {
		Self {
			default_interval_secs: DEFAULT_INTERVAL_SECS,
			signal_poll_interval_secs: DEFAULT_SIGNAL_POLL_INTERVAL_SECS,
		}
	}
}

/// Which artifacts to generate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum ArtifactMode {
	/// Flat `CustomButton` widget configurations.
	#[default]
	Widgets,
	/// Full plugin scaffolds.
	Plugins,
	/// Both of the above.
	Both,
}

impl ArtifactMode {
	pub fn includes_widgets(self) -> bool {
		matches!(self, Self::Widgets | Self::Both)
	}

	pub fn includes_plugins(self) -> bool {
		matches!(self, Self::Plugins | Self::Both)
	}
}

/// Configuration loaded from a `wayconv.toml` file.
///
/// ```toml
/// default_interval = 60
/// signal_poll_interval = 2
/// output_dir = "./waybar-converted"
/// mode = "both"
/// ```
///
/// Every key is optional. Command line flags take precedence over values
/// from this file.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct WayconvConfig {
	/// Seconds used when a module has no `interval`.
	#[serde(default)]
	pub default_interval: Option<u64>,
	/// Seconds used for `signal` modules without an `interval`.
	#[serde(default)]
	pub signal_poll_interval: Option<u64>,
	/// Directory generated files are written to.
	#[serde(default)]
	pub output_dir: Option<PathBuf>,
	/// Artifacts to generate.
	#[serde(default)]
	pub mode: Option<ArtifactMode>,
}

impl WayconvConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no file exists.
	pub fn load(root: &Path) -> ConvertResult<Option<WayconvConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		let content = std::fs::read_to_string(&config_path)?;
		Self::parse(&content).map(Some)
	}

	/// Parse config file content.
	pub fn parse(content: &str) -> ConvertResult<WayconvConfig> {
		toml::from_str(content).map_err(|e| ConvertError::ConfigParse(e.to_string()))
	}

	/// Merge explicit overrides on top of this file's values and the
	/// built-in defaults.
	pub fn options(
		&self,
		default_interval: Option<u64>,
		signal_poll_interval: Option<u64>,
	) -> ConvertOptions {
		let defaults = ConvertOptions::default();
		ConvertOptions {
			default_interval_secs: default_interval
				.or(self.default_interval)
				.unwrap_or(defaults.default_interval_secs),
			signal_poll_interval_secs: signal_poll_interval
				.or(self.signal_poll_interval)
				.unwrap_or(defaults.signal_poll_interval_secs),
		}
	}
}

/// Locate the user's Waybar config, searching the user config directory
/// first and the system-wide location last.
pub fn find_waybar_config() -> Option<PathBuf> {
	let user_candidates = dirs::config_dir()
		.map(|dir| {
			WAYBAR_CONFIG_CANDIDATES
				.iter()
				.map(|candidate| dir.join(candidate))
				.collect::<Vec<_>>()
		})
		.unwrap_or_default();

	user_candidates
		.into_iter()
		.chain(std::iter::once(PathBuf::from(SYSTEM_WAYBAR_CONFIG)))
		.find(|path| path.is_file())
}
