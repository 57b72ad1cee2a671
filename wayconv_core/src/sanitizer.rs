//! Lexical repair of Waybar's JSONC dialect into strict JSON.
//!
//! Waybar configs allow `//` line comments, `/* */` block comments and
//! trailing commas before a closing `]` or `}`. The scanner removes these
//! without ever looking inside string literals, so values such as
//! `"http://example.com"` or `"echo 'a,]}'"` survive untouched.

use serde_json::Value;
use tracing::warn;

use crate::ConvertError;
use crate::ConvertResult;

/// Number of bytes shown on either side of a decode error.
pub const ERROR_CONTEXT_RADIUS: usize = 50;

/// States of the comment scanner. A pending escape is tracked separately
/// because it only has meaning while inside a string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ScanState {
	/// Structural JSON text.
	Normal,
	/// Inside a double quoted string literal.
	InString,
	/// Inside a `//` comment, up to the next newline.
	InLineComment,
	/// Inside a `/* */` comment.
	InBlockComment,
}

/// Repair JSONC text into strict JSON text.
///
/// Comments are removed first so that a comment sitting between a trailing
/// comma and its closing bracket cannot hide the comma. The result is best
/// effort: text that is still invalid is returned as-is and left for the JSON
/// parser to report.
pub fn sanitize(text: &str) -> String {
	strip_trailing_commas(&strip_comments(text))
}

/// Remove `//` and `/* */` comments outside of string literals.
///
/// The newline terminating a line comment is kept. An unterminated block
/// comment consumes the rest of the input.
pub fn strip_comments(text: &str) -> String {
	let mut output = String::with_capacity(text.len());
	let mut state = ScanState::Normal;
	let mut escape_pending = false;
	let mut chars = text.chars().peekable();

	while let Some(ch) = chars.next() {
		match state {
			ScanState::Normal => {
				match ch {
					'"' => {
						state = ScanState::InString;
						output.push(ch);
					}
					'/' if chars.peek() == Some(&'/') => {
						chars.next();
						state = ScanState::InLineComment;
					}
					'/' if chars.peek() == Some(&'*') => {
						chars.next();
						state = ScanState::InBlockComment;
					}
					_ => output.push(ch),
				}
			}
			ScanState::InString => {
				output.push(ch);
				if escape_pending {
					escape_pending = false;
				} else if ch == '\\' {
					escape_pending = true;
				} else if ch == '"' {
					state = ScanState::Normal;
				}
			}
			ScanState::InLineComment => {
				if ch == '\n' {
					output.push(ch);
					state = ScanState::Normal;
				}
			}
			ScanState::InBlockComment => {
				if ch == '*' && chars.peek() == Some(&'/') {
					chars.next();
					state = ScanState::Normal;
				}
			}
		}
	}

	output
}

/// Remove commas that directly precede a closing `]` or `}`, ignoring any
/// whitespace (including newlines) between the comma and the bracket.
///
/// Expects comment-free input.
pub fn strip_trailing_commas(text: &str) -> String {
	let mut output = String::with_capacity(text.len());
	let mut in_string = false;
	let mut escape_pending = false;

	for ch in text.chars() {
		if in_string {
			output.push(ch);
			if escape_pending {
				escape_pending = false;
			} else if ch == '\\' {
				escape_pending = true;
			} else if ch == '"' {
				in_string = false;
			}
			continue;
		}

		match ch {
			'"' => in_string = true,
			']' | '}' => remove_dangling_comma(&mut output),
			_ => {}
		}

		output.push(ch);
	}

	output
}

fn remove_dangling_comma(output: &mut String) {
	let content_len = output.trim_end().len();
	if output[..content_len].ends_with(',') {
		output.remove(content_len - 1);
	}
}

/// Sanitize `text` and parse it as strict JSON, preserving key order.
///
/// A parse failure carries the decode position and a window of up to
/// [`ERROR_CONTEXT_RADIUS`] bytes of sanitized text around it.
pub fn parse_jsonc(text: &str) -> ConvertResult<Value> {
	let clean = sanitize(text);

	serde_json::from_str(&clean).map_err(|error| {
		let offset = byte_offset(&clean, error.line(), error.column());
		let rendered = error.to_string();
		let message = rendered
			.split_once(" at line ")
			.map_or(rendered.as_str(), |(head, _)| head)
			.to_string();

		warn!(
			line = error.line(),
			column = error.column(),
			"sanitized config is not valid JSON"
		);

		ConvertError::InvalidJson {
			message,
			line: error.line(),
			column: error.column(),
			offset,
			context: context_window(&clean, offset, ERROR_CONTEXT_RADIUS),
		}
	})
}

/// Convert a 1-indexed line/column pair into a byte offset into `text`.
fn byte_offset(text: &str, line: usize, column: usize) -> usize {
	let line_start: usize = text
		.split_inclusive('\n')
		.take(line.saturating_sub(1))
		.map(str::len)
		.sum();

	floor_char_boundary(text, line_start + column.saturating_sub(1))
}

fn floor_char_boundary(text: &str, index: usize) -> usize {
	let mut index = index.min(text.len());
	while !text.is_char_boundary(index) {
		index -= 1;
	}
	index
}

/// The slice of `text` within `radius` bytes of `offset`.
pub fn context_window(text: &str, offset: usize, radius: usize) -> String {
	let start = floor_char_boundary(text, offset.saturating_sub(radius));
	let end = floor_char_boundary(text, offset.saturating_add(radius));
	text[start..end].to_string()
}
