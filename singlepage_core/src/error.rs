use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

use crate::AssetKind;

#[derive(Debug, Diagnostic, Error)]
#[non_exhaustive]
pub enum SinglepageError {
	#[error("failed to read base document `{}`", path.display())]
	#[diagnostic(
		code(singlepage::read_base),
		help("run singlepage from the directory containing the page or pass `--path`")
	)]
	ReadBase {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to read {kind} asset `{}`", path.display())]
	#[diagnostic(
		code(singlepage::read_asset),
		help("the base document references this asset, so it must exist and be readable")
	)]
	ReadAsset {
		kind: AssetKind,
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to write output `{}`", path.display())]
	#[diagnostic(code(singlepage::write_output))]
	WriteOutput {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to read existing output `{}`", path.display())]
	#[diagnostic(code(singlepage::read_output))]
	ReadOutput {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to read config file `{}`", path.display())]
	#[diagnostic(code(singlepage::read_config))]
	ReadConfig {
		path: PathBuf,
		#[source]
		source: std::io::Error,
	},

	#[error("failed to parse config file `{}`: {reason}", path.display())]
	#[diagnostic(
		code(singlepage::config_parse),
		help("check that singlepage.toml is valid TOML with optional [stylesheet] and [script] sections")
	)]
	ConfigParse { path: PathBuf, reason: String },

	#[error("invalid configuration: {0}")]
	#[diagnostic(code(singlepage::invalid_config))]
	InvalidConfig(String),
}

pub type SinglepageResult<T> = Result<T, SinglepageError>;
pub type AnyError = Box<dyn std::error::Error>;
pub type AnyEmptyResult = Result<(), AnyError>;
pub type AnyResult<T> = Result<T, AnyError>;
