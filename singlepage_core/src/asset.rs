use std::fmt;
use std::path::Path;

use crate::SinglepageError;
use crate::SinglepageResult;

/// Opening line written in place of the stylesheet marker.
pub const STYLE_OPEN: &str = "\t\t<style type=\"text/css\">";
/// Closing line written after the inlined stylesheet.
pub const STYLE_CLOSE: &str = "\t\t</style>";
/// Opening line written in place of the script marker.
pub const SCRIPT_OPEN: &str = "\t\t<script>";
/// Closing line written after the inlined script.
pub const SCRIPT_CLOSE: &str = "\t\t</script>";

/// The kinds of asset that can be inlined into the base document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssetKind {
	Stylesheet,
	Script,
}

impl AssetKind {
	/// Wrapper line emitted before the asset content.
	pub fn open_tag(self) -> &'static str {
		match self {
			Self::Stylesheet => STYLE_OPEN,
			Self::Script => SCRIPT_OPEN,
		}
	}

	/// Wrapper line emitted after the asset content.
	pub fn close_tag(self) -> &'static str {
		match self {
			Self::Stylesheet => STYLE_CLOSE,
			Self::Script => SCRIPT_CLOSE,
		}
	}
}

impl fmt::Display for AssetKind {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::Stylesheet => write!(f, "stylesheet"),
			Self::Script => write!(f, "script"),
		}
	}
}

/// Read an asset in full and split it into lines.
///
/// The bytes are kept as they are, so assets in any encoding are inlined
/// verbatim. The content is split on `\n` exactly: a trailing newline
/// produces a final empty line and an empty file produces a single empty
/// line. Carriage returns are kept as part of the line.
pub fn read_asset_lines(kind: AssetKind, path: &Path) -> SinglepageResult<Vec<Vec<u8>>> {
	let content = std::fs::read(path).map_err(|source| {
		SinglepageError::ReadAsset {
			kind,
			path: path.to_path_buf(),
			source,
		}
	})?;

	Ok(split_asset_lines(&content))
}

/// Split asset content into lines on `\n`.
pub fn split_asset_lines(content: &[u8]) -> Vec<Vec<u8>> {
	content.split(|byte| *byte == b'\n').map(<[u8]>::to_vec).collect()
}
