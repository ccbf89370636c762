use std::path::PathBuf;

use clap::Args;
use clap::Parser;
use clap::Subcommand;
use singlepage_core::PathOverrides;

#[derive(Parser)]
#[command(
	author,
	version,
	about = "Bundle index.html, style.css and script.js into a single html page.",
	long_about = "singlepage inlines a small static site's stylesheet and script into its html \
	              document, producing one self-contained file.\n\nThe line containing `<link \
	              rel=\"stylesheet\" href=\"style.css\" />` is replaced by an inline <style> \
	              element and the line containing `<script src=\"script.js\"></script>` by an \
	              inline <script> element. Every other line is copied unchanged.\n\nQuick \
	              start:\n  singlepage          Write ./singlepage.html\n  singlepage check    \
	              Verify ./singlepage.html is up to date\n  singlepage init     Create a \
	              singlepage.toml config file"
)]
pub struct SinglepageCli {
	#[command(subcommand)]
	pub command: Option<Commands>,

	/// Path to the project root directory.
	#[arg(long, short, global = true)]
	pub path: Option<PathBuf>,

	/// Enable verbose output.
	#[arg(long, short, global = true, default_value_t = false)]
	pub verbose: bool,

	/// Disable colored output.
	#[arg(long, global = true, default_value_t = false)]
	pub no_color: bool,
}

#[derive(Subcommand)]
pub enum Commands {
	/// Combine the page and write the output file. This is the default when
	/// no subcommand is given.
	///
	/// Reads the base document line by line, replaces the stylesheet and
	/// script marker lines with the inlined asset contents and writes the
	/// result. The output is only replaced once the whole page has been
	/// built and written successfully.
	Build {
		#[command(flatten)]
		files: FileArgs,

		/// Print the combined page to stdout instead of writing it.
		#[arg(long, default_value_t = false)]
		dry_run: bool,
	},
	/// Check that the output file is up to date.
	///
	/// Combines the page in memory and compares it with the existing output.
	/// Exits with a non-zero status code when the output is missing or
	/// stale, which makes it suitable for CI.
	Check {
		#[command(flatten)]
		files: FileArgs,

		/// Show a unified diff between the current and expected output.
		#[arg(long, default_value_t = false)]
		diff: bool,
	},
	/// Create a `singlepage.toml` config file with the default settings.
	///
	/// If a config file already exists this command is a no-op and exits
	/// successfully.
	Init,
}

/// File locations that override the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct FileArgs {
	/// The base html document.
	#[arg(long)]
	pub base: Option<PathBuf>,

	/// The stylesheet to inline.
	#[arg(long)]
	pub stylesheet: Option<PathBuf>,

	/// The script to inline.
	#[arg(long)]
	pub script: Option<PathBuf>,

	/// Where to write the combined page.
	#[arg(long, short)]
	pub output: Option<PathBuf>,
}

impl From<FileArgs> for PathOverrides {
	fn from(args: FileArgs) -> Self {
		Self {
			base: args.base,
			stylesheet: args.stylesheet,
			script: args.script,
			output: args.output,
		}
	}
}
