mod common;

use singlepage_core::AnyEmptyResult;
use singlepage_core::CombineOptions;
use singlepage_core::PathOverrides;
use singlepage_core::SinglepageConfig;

#[test]
fn init_creates_config_with_defaults() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;

	common::singlepage_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("Created config file"));

	let config = SinglepageConfig::load(tmp.path())?.ok_or("config was not created")?;
	let options = CombineOptions::resolve(tmp.path(), Some(&config), &PathOverrides::default());
	let defaults = CombineOptions::resolve(tmp.path(), None, &PathOverrides::default());
	assert_eq!(options, defaults);

	Ok(())
}

#[test]
fn init_is_noop_when_config_exists() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	std::fs::write(tmp.path().join(".singlepage.toml"), "output = \"out.html\"\n")?;

	common::singlepage_cmd()
		.arg("init")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success()
		.stdout(predicates::str::contains("already exists"));

	assert!(!tmp.path().join("singlepage.toml").exists());
	assert_eq!(
		std::fs::read_to_string(tmp.path().join(".singlepage.toml"))?,
		"output = \"out.html\"\n"
	);

	Ok(())
}

#[test]
fn build_after_init_produces_same_page() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_site(tmp.path())?;

	common::singlepage_cmd()
		.current_dir(tmp.path())
		.arg("init")
		.assert()
		.success();

	common::singlepage_cmd()
		.current_dir(tmp.path())
		.assert()
		.success()
		.stdout("Wrote 9 lines to ./singlepage.html\n");

	assert_eq!(
		std::fs::read_to_string(tmp.path().join("singlepage.html"))?,
		common::SINGLEPAGE_HTML
	);

	Ok(())
}
