//! Decides how a module's `exec` command must be wrapped so that its output
//! renders the same way it did under Waybar.
//!
//! Waybar applies `format`, `format-icons` and `return-type` itself. A
//! Noctalia `CustomButton` only runs a command and shows its text (optionally
//! parsing `{text, tooltip, icon}` JSON), so any formatting has to happen in a
//! post-processing filter piped after the original command.

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use tracing::debug;

use crate::module::IntervalMode;
use crate::module::ModuleRecord;

/// Interpreter used to run the post-processing filters.
pub const FILTER_INTERPRETER: &str = "python3";

/// Warning attached when a plain-text module needs its `format` applied.
pub const PLAIN_FORMAT_WARNING: &str =
	"Applied format to plain-text output using python wrapper.";

/// Warning attached when icons are configured on a plain-text module.
pub const ICONS_WITHOUT_JSON_WARNING: &str =
	"format-icons provided but return-type is not json; icons cannot be applied.";

/// Warning attached when a filter wraps a streaming (`interval: once`)
/// command.
pub const STREAM_FILTER_WARNING: &str =
	"interval is once but output is post-processed; nothing is shown until the command exits.";

/// Reads `{text, tooltip, percentage, icon, class, alt}` JSON from stdin,
/// picks an icon, applies the format and writes `{text, tooltip, icon}`.
/// argv: base64 JSON icon list, base64 format string.
const JSON_FILTER_PROGRAM: &str = r#"import base64, json, math, sys
icons = json.loads(base64.b64decode(sys.argv[1]).decode('utf-8') or '[]')
fmt = base64.b64decode(sys.argv[2]).decode('utf-8') or '{}'
raw = sys.stdin.read().strip()
if not raw:
    sys.exit(0)
try:
    data = json.loads(raw)
except ValueError:
    data = None
if not isinstance(data, dict):
    data = {'text': raw, 'tooltip': raw}
def field(key):
    value = data.get(key)
    return '' if value is None else str(value)
icon = field('icon')
if icons:
    try:
        pct = float(data.get('percentage'))
    except (TypeError, ValueError):
        pct = None
    if pct is not None and math.isfinite(pct):
        idx = math.floor(pct * len(icons) / 100)
        icon = icons[min(max(idx, 0), len(icons) - 1)]
    elif not icon:
        icon = icons[0]
text = field('text')
if fmt in ('{}', '{text}'):
    display = text
else:
    display = fmt.replace('{}', text)
    for key, value in (('{text}', text), ('{icon}', icon), ('{percentage}', field('percentage')), ('{class}', field('class')), ('{alt}', field('alt'))):
        display = display.replace(key, value)
sys.stdout.write(json.dumps({'text': display, 'tooltip': field('tooltip'), 'icon': icon}))
"#;

/// Reads plain text from stdin and substitutes it into the format.
/// argv: base64 format string.
const PLAIN_FILTER_PROGRAM: &str = r#"import base64, sys
fmt = base64.b64decode(sys.argv[1]).decode('utf-8') or '{}'
raw = sys.stdin.read().rstrip('\n')
if not raw:
    sys.exit(0)
sys.stdout.write(fmt.replace('{}', raw).replace('{text}', raw))
"#;

/// Which rule of the decision table produced a [`TransformResult`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransformKind {
	/// The module has no command.
	Empty,
	/// JSON output post-processed for icons and formatting.
	JsonFilter,
	/// JSON output passed through untouched.
	JsonPassthrough,
	/// Plain output post-processed for formatting.
	PlainFilter,
	/// Plain output passed through untouched.
	Passthrough,
}

/// The command to run for a module and how to read its output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransformResult {
	pub command: String,
	pub parse_as_json: bool,
	pub kind: TransformKind,
	pub warnings: Vec<String>,
}

/// Decide how to wrap a module's command.
///
/// Rules, first match wins:
///
/// 1. no command: empty result.
/// 2. JSON output with icons or a custom format: JSON filter.
/// 3. JSON output otherwise: passthrough, parsed as JSON.
/// 4. plain output with a custom format: plain filter, with a warning.
/// 5. otherwise passthrough, warning if icons were configured.
///
/// Every non-empty command is gated by `exec-if` when one is configured. A
/// filter only sees output once the command exits, so filtered streaming
/// modules get a warning.
pub fn transform(module: &ModuleRecord) -> TransformResult {
	let exec = module.exec_command.as_str();
	let guard = module.exec_if_condition.as_str();
	let mut warnings = Vec::new();

	let (kind, command) = if exec.is_empty() {
		(TransformKind::Empty, String::new())
	} else if module.is_json() && (!module.format_icons.is_empty() || module.has_custom_format())
	{
		let filtered = json_filter_command(exec, &module.format, &module.format_icons);
		(TransformKind::JsonFilter, guard_command(&filtered, guard))
	} else if module.is_json() {
		(TransformKind::JsonPassthrough, guard_command(exec, guard))
	} else if module.has_custom_format() {
		warnings.push(PLAIN_FORMAT_WARNING.to_string());
		let filtered = plain_filter_command(exec, &module.format);
		(TransformKind::PlainFilter, guard_command(&filtered, guard))
	} else {
		if !module.format_icons.is_empty() {
			warnings.push(ICONS_WITHOUT_JSON_WARNING.to_string());
		}
		(TransformKind::Passthrough, guard_command(exec, guard))
	};

	if module.interval_mode == IntervalMode::Once
		&& matches!(kind, TransformKind::JsonFilter | TransformKind::PlainFilter)
	{
		warnings.push(STREAM_FILTER_WARNING.to_string());
	}

	debug!(module = %module.name, ?kind, "classified command");

	TransformResult {
		command,
		parse_as_json: matches!(
			kind,
			TransformKind::JsonFilter | TransformKind::JsonPassthrough
		),
		kind,
		warnings,
	}
}

/// Only run `command` when `condition` succeeds. The exit status of a guarded
/// run is the command's own.
pub fn guard_command(command: &str, condition: &str) -> String {
	if condition.is_empty() {
		command.to_string()
	} else {
		format!("if {condition}; then {command}; fi")
	}
}

/// Pipe `exec`'s output through the JSON icon and format filter.
pub fn json_filter_command(exec: &str, format: &str, icons: &[String]) -> String {
	// Serializing a list of strings cannot fail.
	let icons_json = serde_json::to_string(icons).unwrap_or_else(|_| "[]".to_string());

	format!(
		"{} {} {} {}",
		capture_prefix(exec),
		shell_quote(JSON_FILTER_PROGRAM),
		shell_quote(&STANDARD.encode(icons_json)),
		shell_quote(&STANDARD.encode(format)),
	)
}

/// Pipe `exec`'s output through the plain-text format filter.
pub fn plain_filter_command(exec: &str, format: &str) -> String {
	format!(
		"{} {} {}",
		capture_prefix(exec),
		shell_quote(PLAIN_FILTER_PROGRAM),
		shell_quote(&STANDARD.encode(format)),
	)
}

fn capture_prefix(exec: &str) -> String {
	format!("output=$({exec}); printf '%s' \"$output\" | {FILTER_INTERPRETER} -c")
}

/// Quote `value` as a single POSIX shell word.
///
/// Values made only of characters that are never special to the shell are
/// returned unchanged. Everything else is single-quoted, with embedded single
/// quotes written as `'\''`.
pub fn shell_quote(value: &str) -> String {
	let is_plain = !value.is_empty()
		&& value
			.bytes()
			.all(|byte| byte.is_ascii_alphanumeric() || b"@%+=:,./-_".contains(&byte));

	if is_plain {
		value.to_string()
	} else {
		format!("'{}'", value.replace('\'', r"'\''"))
	}
}
