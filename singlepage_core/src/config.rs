use std::path::Path;
use std::path::PathBuf;

use serde::Deserialize;

use crate::AssetKind;
use crate::SinglepageError;
use crate::SinglepageResult;

/// Supported config file locations in discovery order (highest precedence
/// first).
pub const CONFIG_FILE_CANDIDATES: [&str; 3] = [
	"singlepage.toml",
	".singlepage.toml",
	".config/singlepage.toml",
];

/// Base document scanned for markers.
pub const DEFAULT_BASE: &str = "index.html";
/// Stylesheet inlined in place of its link tag.
pub const DEFAULT_STYLESHEET: &str = "style.css";
/// Script inlined in place of its script tag.
pub const DEFAULT_SCRIPT: &str = "script.js";
/// Destination of the combined document.
pub const DEFAULT_OUTPUT: &str = "./singlepage.html";

/// Build the stylesheet link tag that references `href`.
pub fn stylesheet_marker(href: &str) -> String {
	format!("<link rel=\"stylesheet\" href=\"{href}\" />")
}

/// Build the script tag that references `src`.
pub fn script_marker(src: &str) -> String {
	format!("<script src=\"{src}\"></script>")
}

/// How a source line is compared against a marker.
#[derive(Debug, Clone, Copy, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MatchMode {
	/// The line contains the marker anywhere.
	#[default]
	Substring,
	/// The line, ignoring surrounding whitespace, is exactly the marker.
	Line,
}

impl MatchMode {
	/// Returns true when `line` is a marker line for `marker`. Lines are
	/// compared as raw bytes so documents need not be valid UTF-8.
	pub fn matches(self, line: &[u8], marker: &str) -> bool {
		let marker = marker.as_bytes();
		match self {
			Self::Substring => memstr(line, marker).is_some(),
			Self::Line => line.trim_ascii() == marker,
		}
	}
}

/// Byte offset of the first occurrence of `needle` in `haystack`.
fn memstr(haystack: &[u8], needle: &[u8]) -> Option<usize> {
	if needle.is_empty() {
		return Some(0);
	}

	haystack
		.windows(needle.len())
		.position(|window| window == needle)
}

/// An `[stylesheet]` or `[script]` section of the config file.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct AssetSection {
	/// Asset file, relative to the project root.
	#[serde(default)]
	pub path: Option<PathBuf>,
	/// Exact tag text identifying the line to replace. Defaults to the tag
	/// that references `path`.
	#[serde(default)]
	pub marker: Option<String>,
}

/// Configuration loaded from a `singlepage.toml` file.
///
/// ```toml
/// base = "index.html"
/// output = "./singlepage.html"
/// match = "substring"
///
/// [stylesheet]
/// path = "style.css"
/// marker = '<link rel="stylesheet" href="style.css" />'
///
/// [script]
/// path = "script.js"
/// marker = '<script src="script.js"></script>'
/// ```
///
/// Every key is optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
pub struct SinglepageConfig {
	/// The base html document.
	#[serde(default)]
	pub base: Option<PathBuf>,
	/// Where the combined document is written.
	#[serde(default)]
	pub output: Option<PathBuf>,
	/// Marker matching mode, `substring` (default) or `line`.
	#[serde(default, rename = "match")]
	pub match_mode: Option<MatchMode>,
	#[serde(default)]
	pub stylesheet: AssetSection,
	#[serde(default)]
	pub script: AssetSection,
}

impl SinglepageConfig {
	/// Resolve the config path from known discovery candidates.
	#[must_use]
	pub fn resolve_path(root: &Path) -> Option<PathBuf> {
		CONFIG_FILE_CANDIDATES
			.iter()
			.map(|candidate| root.join(candidate))
			.find(|path| path.is_file())
	}

	/// Load the config from the first discovered config file at `root`.
	/// Returns `None` if no config file exists.
	pub fn load(root: &Path) -> SinglepageResult<Option<SinglepageConfig>> {
		let Some(config_path) = Self::resolve_path(root) else {
			return Ok(None);
		};

		Self::load_from(&config_path).map(Some)
	}

	/// Load the config from an explicit file.
	pub fn load_from(path: &Path) -> SinglepageResult<SinglepageConfig> {
		let content =
			std::fs::read_to_string(path).map_err(|source| SinglepageError::ReadConfig {
				path: path.to_path_buf(),
				source,
			})?;

		let config = toml::from_str(&content).map_err(|e| {
			SinglepageError::ConfigParse {
				path: path.to_path_buf(),
				reason: e.to_string(),
			}
		})?;
		tracing::debug!(path = %path.display(), "loaded config file");

		Ok(config)
	}
}

/// Path overrides supplied on the command line. These take precedence over
/// the config file.
#[derive(Debug, Clone, Default)]
pub struct PathOverrides {
	pub base: Option<PathBuf>,
	pub stylesheet: Option<PathBuf>,
	pub script: Option<PathBuf>,
	pub output: Option<PathBuf>,
}

/// A resolved asset: which file to inline and which line it replaces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetSource {
	pub kind: AssetKind,
	pub path: PathBuf,
	pub marker: String,
}

impl AssetSource {
	fn resolve(
		kind: AssetKind,
		root: &Path,
		section: &AssetSection,
		path_override: Option<&Path>,
	) -> Self {
		let default_path = match kind {
			AssetKind::Stylesheet => DEFAULT_STYLESHEET,
			AssetKind::Script => DEFAULT_SCRIPT,
		};
		let relative = path_override
			.map(Path::to_path_buf)
			.or_else(|| section.path.clone())
			.unwrap_or_else(|| PathBuf::from(default_path));

		let marker = section.marker.clone().unwrap_or_else(|| {
			let reference = relative.to_string_lossy();
			match kind {
				AssetKind::Stylesheet => stylesheet_marker(&reference),
				AssetKind::Script => script_marker(&reference),
			}
		});

		Self {
			kind,
			path: root.join(relative),
			marker,
		}
	}
}

/// Fully resolved options for a single combine run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineOptions {
	pub base: PathBuf,
	pub output: PathBuf,
	pub stylesheet: AssetSource,
	pub script: AssetSource,
	pub match_mode: MatchMode,
}

impl Default for CombineOptions {
	fn default() -> Self {
		Self::resolve(Path::new(""), None, &PathOverrides::default())
	}
}

impl CombineOptions {
	/// Layer defaults, the optional config file and command line overrides
	/// (in increasing precedence). Relative paths are joined onto `root`.
	pub fn resolve(
		root: &Path,
		config: Option<&SinglepageConfig>,
		overrides: &PathOverrides,
	) -> Self {
		let fallback = SinglepageConfig::default();
		let config = config.unwrap_or(&fallback);

		let base = overrides
			.base
			.clone()
			.or_else(|| config.base.clone())
			.unwrap_or_else(|| PathBuf::from(DEFAULT_BASE));
		let output = overrides
			.output
			.clone()
			.or_else(|| config.output.clone())
			.unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

		Self {
			base: root.join(base),
			output: root.join(output),
			stylesheet: AssetSource::resolve(
				AssetKind::Stylesheet,
				root,
				&config.stylesheet,
				overrides.stylesheet.as_deref(),
			),
			script: AssetSource::resolve(
				AssetKind::Script,
				root,
				&config.script,
				overrides.script.as_deref(),
			),
			match_mode: config.match_mode.unwrap_or_default(),
		}
	}

	/// Reject configurations that cannot produce a meaningful page.
	pub fn validate(&self) -> SinglepageResult<()> {
		for asset in [&self.stylesheet, &self.script] {
			if asset.marker.trim().is_empty() {
				return Err(SinglepageError::InvalidConfig(format!(
					"the {} marker must not be empty",
					asset.kind
				)));
			}
		}

		Ok(())
	}

	/// The asset sources in the order they are checked against each line.
	pub fn assets(&self) -> [&AssetSource; 2] {
		[&self.stylesheet, &self.script]
	}
}

/// Discover the config file at `root`, apply `overrides` and validate the
/// result.
pub fn load_options(root: &Path, overrides: &PathOverrides) -> SinglepageResult<CombineOptions> {
	let config = SinglepageConfig::load(root)?;
	let options = CombineOptions::resolve(root, config.as_ref(), overrides);
	options.validate()?;

	Ok(options)
}
