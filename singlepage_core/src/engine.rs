use std::fs::File;
use std::io::BufRead;
use std::io::BufReader;
use std::path::Path;
use std::path::PathBuf;

use crate::AssetKind;
use crate::AssetSource;
use crate::CombineOptions;
use crate::SinglepageError;
use crate::SinglepageResult;
use crate::read_asset_lines;
use crate::writer::write_lines_atomic;

/// An asset that replaced a marker line in the base document.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InlinedAsset {
	pub kind: AssetKind,
	/// Path of the asset file that was read.
	pub path: PathBuf,
	/// 1-indexed line number of the marker in the base document.
	pub source_line: usize,
	/// Number of asset lines placed between the wrapper tags.
	pub line_count: usize,
}

/// The combined document, held in memory until it is written. Lines are raw
/// bytes so content in any encoding is carried through unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CombinedPage {
	lines: Vec<Vec<u8>>,
	inlined: Vec<InlinedAsset>,
}

impl CombinedPage {
	/// The output lines in emission order, without terminators.
	pub fn lines(&self) -> &[Vec<u8>] {
		&self.lines
	}

	/// Number of lines the page occupies when written.
	pub fn line_count(&self) -> usize {
		self.lines.len()
	}

	/// Assets that were expanded, in document order.
	pub fn inlined(&self) -> &[InlinedAsset] {
		&self.inlined
	}

	/// Serialize the page with every line terminated by `\n`.
	pub fn render(&self) -> Vec<u8> {
		let capacity = self.lines.iter().map(|line| line.len() + 1).sum();
		let mut buf = Vec::with_capacity(capacity);
		for line in &self.lines {
			buf.extend_from_slice(line);
			buf.push(b'\n');
		}
		buf
	}

	fn push_line(&mut self, line: Vec<u8>) {
		self.lines.push(line);
	}

	fn push_asset(&mut self, asset: &AssetSource, source_line: usize) -> SinglepageResult<()> {
		let content = read_asset_lines(asset.kind, &asset.path)?;
		let line_count = content.len();

		self.lines.push(asset.kind.open_tag().as_bytes().to_vec());
		self.lines.extend(content);
		self.lines.push(asset.kind.close_tag().as_bytes().to_vec());
		self.inlined.push(InlinedAsset {
			kind: asset.kind,
			path: asset.path.clone(),
			source_line,
			line_count,
		});

		tracing::debug!(
			kind = %asset.kind,
			line = source_line,
			path = %asset.path.display(),
			lines = line_count,
			"inlined asset"
		);

		Ok(())
	}
}

/// Summary of a completed build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CombineReport {
	/// Where the page was written.
	pub output: PathBuf,
	/// Number of lines in the written file.
	pub lines_written: usize,
	/// Assets that were expanded.
	pub inlined: Vec<InlinedAsset>,
}

/// State of the existing output compared to a freshly combined page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputStatus {
	UpToDate,
	Missing,
	Stale,
}

/// Result of checking whether the output file is current.
#[derive(Debug, Clone)]
pub struct CheckResult {
	pub output: PathBuf,
	pub status: OutputStatus,
	/// Content of the existing output, if there is one.
	pub current_content: Option<Vec<u8>>,
	/// Content the output would have after a build.
	pub expected_content: Vec<u8>,
}

impl CheckResult {
	/// Returns true if the output exists and matches the combined page.
	pub fn is_ok(&self) -> bool {
		self.status == OutputStatus::UpToDate
	}
}

/// Read the base document and expand every marker line into its asset.
///
/// Assets are only read when their marker is found, so a document without
/// markers never touches the asset files.
pub fn combine(options: &CombineOptions) -> SinglepageResult<CombinedPage> {
	let file = File::open(&options.base).map_err(|source| {
		SinglepageError::ReadBase {
			path: options.base.clone(),
			source,
		}
	})?;
	tracing::debug!(base = %options.base.display(), "reading base document");

	combine_reader(BufReader::new(file), options)
}

/// Combine a base document supplied by `reader`. Read failures are reported
/// against `options.base`.
///
/// Lines end at `\n`; the terminator and a `\r` before it are stripped.
pub fn combine_reader<R: BufRead>(
	mut reader: R,
	options: &CombineOptions,
) -> SinglepageResult<CombinedPage> {
	let mut page = CombinedPage::default();
	let mut line_number = 0;

	loop {
		let mut line = Vec::new();
		let read = reader.read_until(b'\n', &mut line).map_err(|source| {
			SinglepageError::ReadBase {
				path: options.base.clone(),
				source,
			}
		})?;
		if read == 0 {
			break;
		}
		line_number += 1;
		strip_line_ending(&mut line);

		let matched = options
			.assets()
			.into_iter()
			.find(|asset| options.match_mode.matches(&line, &asset.marker));

		match matched {
			Some(asset) => page.push_asset(asset, line_number)?,
			None => page.push_line(line),
		}
	}

	Ok(page)
}

fn strip_line_ending(line: &mut Vec<u8>) {
	if line.last() == Some(&b'\n') {
		line.pop();
		if line.last() == Some(&b'\r') {
			line.pop();
		}
	}
}

/// Combine the page and atomically write it to `options.output`.
pub fn build(options: &CombineOptions) -> SinglepageResult<CombineReport> {
	let page = combine(options)?;
	let lines_written = write_page(&page, &options.output)?;

	tracing::info!(
		output = %options.output.display(),
		lines = lines_written,
		"wrote combined page"
	);

	Ok(CombineReport {
		output: options.output.clone(),
		lines_written,
		inlined: page.inlined,
	})
}

/// Write a combined page to `path`, returning the number of lines written.
pub fn write_page(page: &CombinedPage, path: &Path) -> SinglepageResult<usize> {
	write_lines_atomic(path, page.lines())
}

/// Combine the page and compare it with the existing output without writing
/// anything.
pub fn check_output(options: &CombineOptions) -> SinglepageResult<CheckResult> {
	let expected_content = combine(options)?.render();

	let current_content = match std::fs::read(&options.output) {
		Ok(content) => Some(content),
		Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
		Err(source) => {
			return Err(SinglepageError::ReadOutput {
				path: options.output.clone(),
				source,
			});
		}
	};

	let status = match &current_content {
		None => OutputStatus::Missing,
		Some(current) if *current == expected_content => OutputStatus::UpToDate,
		Some(_) => OutputStatus::Stale,
	};
	tracing::debug!(output = %options.output.display(), ?status, "checked output");

	Ok(CheckResult {
		output: options.output.clone(),
		status,
		current_content,
		expected_content,
	})
}
