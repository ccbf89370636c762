use std::fs::File;
use std::io::BufWriter;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use crate::SinglepageError;
use crate::SinglepageResult;

/// Write `lines` to `path`, each followed by `\n`, and return the number of
/// lines written.
///
/// The lines are written to a temporary sibling of `path` which is renamed
/// over the destination only once every byte has been flushed to disk. When
/// anything fails the temporary file is removed and an existing destination
/// is left untouched.
pub fn write_lines_atomic<S: AsRef<[u8]>>(path: &Path, lines: &[S]) -> SinglepageResult<usize> {
	let temp_path = temp_path_for(path);
	tracing::trace!(temp = %temp_path.display(), "writing temporary output");

	let result = write_lines(&temp_path, lines).and_then(|()| std::fs::rename(&temp_path, path));

	if let Err(source) = result {
		let _ = std::fs::remove_file(&temp_path);
		return Err(SinglepageError::WriteOutput {
			path: path.to_path_buf(),
			source,
		});
	}

	Ok(lines.len())
}

fn write_lines<S: AsRef<[u8]>>(path: &Path, lines: &[S]) -> std::io::Result<()> {
	let file = File::create(path)?;
	let mut writer = BufWriter::new(file);

	for line in lines {
		writer.write_all(line.as_ref())?;
		writer.write_all(b"\n")?;
	}

	writer.flush()?;
	let file = writer.into_inner().map_err(std::io::IntoInnerError::into_error)?;
	file.sync_all()
}

/// A unique hidden file next to `path`, so the final rename never crosses
/// filesystems.
fn temp_path_for(path: &Path) -> PathBuf {
	let file_name = path
		.file_name()
		.map_or_else(|| "singlepage".into(), |name| name.to_string_lossy());
	let temp_name = format!(
		".{file_name}.tmp-{}-{}",
		std::process::id(),
		SystemTime::now()
			.duration_since(UNIX_EPOCH)
			.map_or(0, |duration| duration.as_nanos())
	);

	path.with_file_name(temp_name)
}
