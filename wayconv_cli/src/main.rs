use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use tracing::debug;
use tracing_subscriber::EnvFilter;
use wayconv_cli::WayconvCli;
use wayconv_core::ArtifactMode;
use wayconv_core::ConvertError;
use wayconv_core::ConvertOptions;
use wayconv_core::DEFAULT_OUTPUT_DIR;
use wayconv_core::ModuleRecord;
use wayconv_core::OutputFile;
use wayconv_core::WayconvConfig;
use wayconv_core::build_widgets;
use wayconv_core::extract_modules;
use wayconv_core::find_waybar_config;
use wayconv_core::module_report;
use wayconv_core::parse_jsonc;
use wayconv_core::to_scaffold;
use wayconv_core::write_files;

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,yellow) => {
		if color_enabled() {
			format!("{}", $text.yellow())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

const BANNER_WIDTH: usize = 60;

/// Directives used when `RUST_LOG` is unset.
const DEFAULT_LOG_FILTER: &str = "warn";
const VERBOSE_LOG_FILTER: &str = "wayconv_core=debug,wayconv_cli=debug";

fn main() {
	let args = WayconvCli::parse();

	// Respect NO_COLOR env var, --no-color flag and non-terminal output.
	let use_color = !args.no_color
		&& std::env::var_os("NO_COLOR").is_none()
		&& supports_color::on(supports_color::Stream::Stdout).is_some();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	init_tracing(args.verbose);

	if let Err(e) = run(&args) {
		match e.downcast::<ConvertError>() {
			Ok(convert_err) => {
				let report: miette::Report = (*convert_err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(1);
	}
}

fn init_tracing(verbose: bool) {
	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		EnvFilter::new(if verbose {
			VERBOSE_LOG_FILTER
		} else {
			DEFAULT_LOG_FILTER
		})
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(color_enabled())
		.with_target(false)
		.try_init()
		.ok();
}

/// Settings after merging command line flags over `wayconv.toml`.
struct Settings {
	options: ConvertOptions,
	mode: ArtifactMode,
	output_dir: PathBuf,
}

fn resolve_settings(args: &WayconvCli) -> Result<Settings, Box<dyn std::error::Error>> {
	let cwd = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
	let file = WayconvConfig::load(&cwd)?.unwrap_or_default();
	if let Some(path) = WayconvConfig::resolve_path(&cwd) {
		debug!(path = %path.display(), "loaded wayconv config");
	}

	Ok(Settings {
		options: file.options(args.default_interval, args.signal_poll_interval),
		mode: args
			.mode
			.map(ArtifactMode::from)
			.or(file.mode)
			.unwrap_or_default(),
		output_dir: args
			.output_dir
			.clone()
			.or(file.output_dir)
			.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT_DIR)),
	})
}

fn locate_config(args: &WayconvCli) -> Result<PathBuf, ConvertError> {
	let path = match &args.config_path {
		Some(path) => path.clone(),
		None => find_waybar_config().ok_or(ConvertError::ConfigNotFound)?,
	};

	if path.is_file() {
		Ok(path)
	} else {
		Err(ConvertError::ConfigMissing(path))
	}
}

fn run(args: &WayconvCli) -> Result<(), Box<dyn std::error::Error>> {
	let settings = resolve_settings(args)?;
	let config_path = locate_config(args)?;

	println!("Reading Waybar config: {}", config_path.display());
	let text = std::fs::read_to_string(&config_path)?;
	let value = parse_jsonc(&text)?;
	let modules = extract_modules(&value, &settings.options);

	if modules.is_empty() {
		println!("No custom modules found in Waybar config.");
		return Ok(());
	}

	let names: Vec<&str> = modules.iter().map(|module| module.name.as_str()).collect();
	println!(
		"Found {} custom module(s): {}",
		modules.len(),
		names.join(", ")
	);

	if settings.mode.includes_widgets() {
		print_section("Generating CustomButton widget configurations...");
		let widgets = build_widgets(&modules, &settings.options);
		emit(args, &settings.output_dir, &widgets.files()?)?;
	}

	if settings.mode.includes_plugins() {
		print_section("Generating plugin scaffolds...");
		for module in &modules {
			let scaffold = to_scaffold(module, settings.options.default_interval_secs)?;
			emit(args, &settings.output_dir, &scaffold.files)?;
		}
	}

	if args.verbose {
		print_report(&modules, &settings.options);
	}

	print_summary(args, &settings);

	Ok(())
}

/// Write `files` below `root`, or only list them with `--dry-run`.
fn emit(args: &WayconvCli, root: &Path, files: &[OutputFile]) -> Result<(), ConvertError> {
	if args.dry_run {
		for file in files {
			println!(
				"  {} {}",
				colored!("Would write:", yellow),
				root.join(&file.path).display()
			);
		}
		return Ok(());
	}

	for path in write_files(root, files)? {
		println!("  {} {}", colored!("Generated:", green), path.display());
	}

	Ok(())
}

fn print_section(title: &str) {
	println!();
	println!("{}", colored!(title, bold));
}

fn print_banner(title: &str) {
	let rule = "=".repeat(BANNER_WIDTH);
	println!();
	println!("{rule}");
	println!("{}", colored!(title, bold));
	println!("{rule}");
}

fn print_report(modules: &[ModuleRecord], options: &ConvertOptions) {
	print_banner("CONVERSION REPORT");

	for module in modules {
		let report = module_report(module, options);
		println!();
		println!("[{}] ({})", report.title, report.source);

		if report.is_full_conversion() {
			println!("  Status: {}", colored!("Full conversion supported", green));
		} else {
			println!("  {}", colored!("Warnings:", yellow));
			for note in &report.notes {
				println!("  - {note}");
			}
		}

		println!("  Converted:");
		for line in &report.converted {
			println!("    {line}");
		}
	}
}

fn print_summary(args: &WayconvCli, settings: &Settings) {
	print_banner(if args.dry_run {
		"DRY RUN COMPLETE"
	} else {
		"CONVERSION COMPLETE"
	});

	let output_dir =
		std::path::absolute(&settings.output_dir).unwrap_or_else(|_| settings.output_dir.clone());
	println!();
	if args.dry_run {
		println!("Output would be written to: {}", output_dir.display());
	} else {
		println!("Output written to: {}", output_dir.display());
	}

	if settings.mode.includes_widgets() {
		println!();
		println!("To use CustomButton widgets:");
		println!("  1. Review the generated JSON in custom_widgets.json");
		println!("  2. Add widgets to your Noctalia settings.json bar configuration");
	}

	if settings.mode.includes_plugins() {
		println!();
		println!("To use generated plugins:");
		println!("  1. Copy plugin folders to ~/.config/noctalia/plugins/");
		println!("  2. Enable them in Noctalia settings");
		println!("  3. Add the bar widget to your bar configuration");
	}
}
