//! `singlepage_core` is the core library for the
//! [singlepage](https://github.com/ifiokjr/singlepage) bundler. It turns a
//! small static site made of `index.html`, `style.css` and `script.js` into a
//! single self-contained html document.
//!
//! ## Processing Pipeline
//!
//! ```text
//! singlepage.toml + cli overrides
//!   → CombineOptions (resolved paths, markers, match mode)
//!   → Combiner (reads index.html line by line, expands marker lines)
//!   → CombinedPage (lines held in memory)
//!   → Writer (temporary file, flush, rename over singlepage.html)
//! ```
//!
//! A line containing `<link rel="stylesheet" href="style.css" />` is replaced
//! by an inline `<style type="text/css">` element wrapping every line of
//! `style.css`. A line containing `<script src="script.js"></script>` is
//! replaced by an inline `<script>` element wrapping every line of
//! `script.js`. All other lines are copied unchanged.
//!
//! ## Modules
//!
//! - [`config`] — Configuration loading from `singlepage.toml` and
//!   resolution of paths, markers and the match mode.
//!
//! ## Key Types
//!
//! - [`CombineOptions`] — The resolved inputs of a single run.
//! - [`CombinedPage`] — The combined document before it is written.
//! - [`CombineReport`] — Result of a build: output path and line count.
//! - [`CheckResult`] — Result of comparing the existing output with a fresh
//!   build.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use std::path::Path;
//!
//! use singlepage_core::PathOverrides;
//! use singlepage_core::build;
//! use singlepage_core::load_options;
//!
//! let options = load_options(Path::new("."), &PathOverrides::default()).unwrap();
//! let report = build(&options).unwrap();
//! println!("Wrote {} lines to {}", report.lines_written, report.output.display());
//! ```

pub use asset::*;
pub use config::*;
pub use engine::*;
pub use error::*;

mod asset;
pub mod config;
mod engine;
#[allow(unused_assignments)]
mod error;
mod writer;
