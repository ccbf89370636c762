#![allow(dead_code)]

use std::path::Path;

use assert_cmd::Command;
use insta_cmd::get_cargo_bin;
use singlepage_core::AnyEmptyResult;

pub const INDEX_HTML: &str = concat!(
	"<html><head>\n",
	"<link rel=\"stylesheet\" href=\"style.css\" />\n",
	"</head><body>\n",
	"<script src=\"script.js\"></script>\n",
	"</body></html>\n",
);

pub const SINGLEPAGE_HTML: &str = concat!(
	"<html><head>\n",
	"\t\t<style type=\"text/css\">\n",
	"body { color: red; }\n",
	"\t\t</style>\n",
	"</head><body>\n",
	"\t\t<script>\n",
	"alert('hi');\n",
	"\t\t</script>\n",
	"</body></html>\n",
);

pub fn singlepage_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("singlepage"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("SINGLEPAGE_LOG");
	cmd
}

/// Write the three-file example site into `root`.
pub fn write_site(root: &Path) -> AnyEmptyResult {
	std::fs::write(root.join("index.html"), INDEX_HTML)?;
	std::fs::write(root.join("style.css"), "body { color: red; }")?;
	std::fs::write(root.join("script.js"), "alert('hi');")?;
	Ok(())
}
