use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum ConvertError {
	#[error(transparent)]
	#[diagnostic(code(wayconv::io_error))]
	Io(#[from] std::io::Error),

	#[error("failed to parse Waybar config at line {line}, column {column}: {message}")]
	#[diagnostic(
		code(wayconv::invalid_json),
		help("problematic content near position {offset}:\n{context}")
	)]
	InvalidJson {
		message: String,
		line: usize,
		column: usize,
		offset: usize,
		context: String,
	},

	#[error("failed to parse config file: {0}")]
	#[diagnostic(
		code(wayconv::config_parse),
		help("check that wayconv.toml is valid TOML with only known top-level keys")
	)]
	ConfigParse(String),

	#[error("could not find a Waybar config file")]
	#[diagnostic(
		code(wayconv::config_not_found),
		help("pass the path explicitly: `wayconv /path/to/waybar/config`")
	)]
	ConfigNotFound,

	#[error("config file not found: `{}`", .0.display())]
	#[diagnostic(code(wayconv::config_missing))]
	ConfigMissing(PathBuf),

	#[error("template rendering failed for `{template}`: {reason}")]
	#[diagnostic(code(wayconv::template_render))]
	TemplateRender { template: String, reason: String },

	#[error("failed to serialize `{what}`: {reason}")]
	#[diagnostic(code(wayconv::serialize))]
	Serialize { what: String, reason: String },
}

pub type ConvertResult<T> = Result<T, ConvertError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
