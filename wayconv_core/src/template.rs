use minijinja::AutoEscape;
use minijinja::Environment;
use minijinja::UndefinedBehavior;
use serde::Serialize;

use crate::ConvertError;
use crate::ConvertResult;

/// Escape text for use inside a double quoted QML string literal.
pub fn escape_qml_string(value: &str) -> String {
	let mut escaped = String::with_capacity(value.len());

	for ch in value.chars() {
		match ch {
			'\\' => escaped.push_str(r"\\"),
			'"' => escaped.push_str("\\\""),
			'\n' => escaped.push_str(r"\n"),
			'\r' => escaped.push_str(r"\r"),
			_ => escaped.push(ch),
		}
	}

	escaped
}

/// A set of named templates rendered with `{{ name }}` interpolation.
///
/// Values are inserted verbatim: callers escape them for the target syntax
/// before rendering. Referencing a value missing from the context is an
/// error rather than an empty string.
pub struct TemplateSet {
	env: Environment<'static>,
}

impl TemplateSet {
	/// Build a set from `(name, source)` pairs.
	pub fn new(templates: &[(&'static str, &'static str)]) -> ConvertResult<Self> {
		let mut env = Environment::new();
		env.set_keep_trailing_newline(true);
		env.set_undefined_behavior(UndefinedBehavior::Strict);
		env.set_auto_escape_callback(|_| AutoEscape::None);

		for (name, source) in templates {
			env.add_template(name, source)
				.map_err(|e| {
					ConvertError::TemplateRender {
						template: (*name).to_string(),
						reason: e.to_string(),
					}
				})?;
		}

		Ok(Self { env })
	}

	/// Render the template called `name` against `context`.
	pub fn render(&self, name: &str, context: &impl Serialize) -> ConvertResult<String> {
		let to_error = |e: minijinja::Error| {
			ConvertError::TemplateRender {
				template: name.to_string(),
				reason: e.to_string(),
			}
		};

		let template = self.env.get_template(name).map_err(to_error)?;
		template
			.render(minijinja::Value::from_serialize(context))
			.map_err(to_error)
	}
}
