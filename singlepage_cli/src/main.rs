use std::io::Write;
use std::path::Path;
use std::path::PathBuf;
use std::process;

use clap::Parser;
use owo_colors::OwoColorize;
use similar::ChangeTag;
use similar::TextDiff;
use singlepage_cli::Commands;
use singlepage_cli::FileArgs;
use singlepage_cli::SinglepageCli;
use singlepage_core::CombineOptions;
use singlepage_core::OutputStatus;
use singlepage_core::PathOverrides;
use singlepage_core::SinglepageConfig;
use singlepage_core::build;
use singlepage_core::check_output;
use singlepage_core::combine;
use singlepage_core::load_options;
use tracing_subscriber::EnvFilter;

/// Environment variable holding a `tracing` filter directive.
const LOG_ENV: &str = "SINGLEPAGE_LOG";

static USE_COLOR: std::sync::atomic::AtomicBool = std::sync::atomic::AtomicBool::new(true);

fn color_enabled() -> bool {
	USE_COLOR.load(std::sync::atomic::Ordering::Relaxed)
}

/// Apply ANSI color codes only when color is enabled.
macro_rules! colored {
	($text:expr,red) => {
		if color_enabled() {
			format!("{}", $text.red())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,green) => {
		if color_enabled() {
			format!("{}", $text.green())
		} else {
			format!("{}", $text)
		}
	};
	($text:expr,bold) => {
		if color_enabled() {
			format!("{}", $text.bold())
		} else {
			format!("{}", $text)
		}
	};
}

fn main() {
	let args = SinglepageCli::parse();

	// Respect NO_COLOR env var and --no-color flag.
	let use_color = !args.no_color && std::env::var_os("NO_COLOR").is_none();
	if !use_color {
		USE_COLOR.store(false, std::sync::atomic::Ordering::Relaxed);
	}

	init_tracing(args.verbose, use_color);

	// Install miette's fancy handler for rich error diagnostics.
	miette::set_hook(Box::new(move |_| {
		Box::new(
			miette::MietteHandlerOpts::new()
				.color(use_color)
				.unicode(use_color)
				.build(),
		)
	}))
	.ok();

	let result = match &args.command {
		None => run_build(&args, FileArgs::default(), false),
		Some(Commands::Build { files, dry_run }) => run_build(&args, files.clone(), *dry_run),
		Some(Commands::Check { files, diff }) => run_check(&args, files.clone(), *diff),
		Some(Commands::Init) => run_init(&args),
	};

	if let Err(e) = result {
		// Try to render through miette for rich diagnostics with help text
		// and error codes.
		match e.downcast::<singlepage_core::SinglepageError>() {
			Ok(err) => {
				let report: miette::Report = (*err).into();
				eprintln!("{report:?}");
			}
			Err(e) => {
				eprintln!("{} {e}", colored!("error:", red));
			}
		}
		process::exit(2);
	}
}

/// Send logs to stderr so stdout only carries the report. `SINGLEPAGE_LOG`
/// takes precedence over `--verbose`.
fn init_tracing(verbose: bool, use_color: bool) {
	let default_level = if verbose { "debug" } else { "warn" };
	let filter =
		EnvFilter::try_from_env(LOG_ENV).unwrap_or_else(|_| EnvFilter::new(default_level));

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_ansi(use_color)
		.with_target(false)
		.init();
}

/// The project root. Empty means the working directory, which keeps
/// relative paths in messages short.
fn resolve_root(args: &SinglepageCli) -> PathBuf {
	args.path.clone().unwrap_or_default()
}

fn resolve_options(
	args: &SinglepageCli,
	files: FileArgs,
) -> Result<CombineOptions, Box<dyn std::error::Error>> {
	let root = resolve_root(args);
	let overrides: PathOverrides = files.into();
	let options = load_options(&root, &overrides)?;
	tracing::debug!(
		base = %options.base.display(),
		output = %options.output.display(),
		match_mode = ?options.match_mode,
		"resolved options"
	);

	// stderr, so `build --dry-run` keeps stdout for the page alone.
	if args.verbose {
		eprintln!("Base document: {}", options.base.display());
		for asset in options.assets() {
			eprintln!("  {} {} ({})", asset.kind, asset.path.display(), asset.marker);
		}
	}

	Ok(options)
}

fn run_build(
	args: &SinglepageCli,
	files: FileArgs,
	dry_run: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let options = resolve_options(args, files)?;

	if dry_run {
		let page = combine(&options)?;
		let mut stdout = std::io::stdout().lock();
		stdout.write_all(&page.render())?;
		stdout.flush()?;
		eprintln!(
			"Dry run: would write {} lines to {}",
			page.line_count(),
			options.output.display()
		);
		return Ok(());
	}

	let report = build(&options)?;
	println!(
		"{} {} lines to {}",
		colored!("Wrote", green),
		report.lines_written,
		report.output.display()
	);

	if args.verbose {
		if report.inlined.is_empty() {
			println!("  no markers found, the base document was copied unchanged");
		}
		for asset in &report.inlined {
			println!(
				"  inlined {} {} at line {} ({} lines)",
				asset.kind,
				asset.path.display(),
				asset.source_line,
				asset.line_count
			);
		}
	}

	Ok(())
}

fn run_check(
	args: &SinglepageCli,
	files: FileArgs,
	show_diff: bool,
) -> Result<(), Box<dyn std::error::Error>> {
	let options = resolve_options(args, files)?;
	let result = check_output(&options)?;
	let output = result.output.display();

	match result.status {
		OutputStatus::UpToDate => {
			println!("Check passed: {output} is up to date.");
			return Ok(());
		}
		OutputStatus::Missing => {
			eprintln!("Check failed: {output} does not exist.");
		}
		OutputStatus::Stale => {
			eprintln!("Check failed: {output} is out of date.");
			if show_diff {
				let current = result.current_content.as_deref().unwrap_or_default();
				print_diff(
					&String::from_utf8_lossy(current),
					&String::from_utf8_lossy(&result.expected_content),
				);
			}
		}
	}

	eprintln!();
	eprintln!("Run `singlepage` to rebuild it.");
	process::exit(1);
}

const SAMPLE_CONFIG: &str = "# singlepage configuration\n# Every key is optional; the values \
                             below are the defaults.\n\nbase = \"index.html\"\noutput = \
                             \"./singlepage.html\"\n\n# `substring` inlines any line containing \
                             the marker, `line` only\n# lines that consist of the marker \
                             alone.\nmatch = \"substring\"\n\n[stylesheet]\npath = \
                             \"style.css\"\nmarker = '<link rel=\"stylesheet\" href=\"style.css\" \
                             />'\n\n[script]\npath = \"script.js\"\nmarker = '<script \
                             src=\"script.js\"></script>'\n";

fn run_init(args: &SinglepageCli) -> Result<(), Box<dyn std::error::Error>> {
	let root = resolve_root(args);

	if let Some(existing) = SinglepageConfig::resolve_path(&root) {
		println!("Config file already exists: {}", existing.display());
		return Ok(());
	}

	let config_path = root.join("singlepage.toml");
	std::fs::write(&config_path, SAMPLE_CONFIG)?;
	println!("Created config file: {}", config_path.display());
	print_next_steps(&root);

	Ok(())
}

fn print_next_steps(root: &Path) {
	println!();
	println!("{}", colored!("Next steps:", bold));
	println!("  1. Edit {} if your files use other names", root.join("singlepage.toml").display());
	println!("  2. Run `singlepage` to write the combined page");
}

fn print_diff(current: &str, expected: &str) {
	let diff = TextDiff::from_lines(current, expected);
	for change in diff.iter_all_changes() {
		match change.tag() {
			ChangeTag::Delete => {
				eprint!("  {}", colored!(format!("-{change}"), red));
			}
			ChangeTag::Insert => {
				eprint!("  {}", colored!(format!("+{change}"), green));
			}
			ChangeTag::Equal => {
				eprint!("   {change}");
			}
		}
		if change.missing_newline() {
			eprintln!();
		}
	}
}
