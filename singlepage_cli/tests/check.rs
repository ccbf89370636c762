mod common;

use singlepage_core::AnyEmptyResult;

#[test]
fn check_passes_when_output_is_up_to_date() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_site(tmp.path())?;
	std::fs::write(tmp.path().join("singlepage.html"), common::SINGLEPAGE_HTML)?;

	common::singlepage_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.success()
		.stdout(predicates::str::contains("is up to date"));

	Ok(())
}

#[test]
fn check_fails_when_output_is_missing() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_site(tmp.path())?;

	common::singlepage_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("does not exist"));

	assert!(!tmp.path().join("singlepage.html").exists());

	Ok(())
}

#[test]
fn check_fails_when_output_is_stale() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_site(tmp.path())?;
	let stale = common::SINGLEPAGE_HTML.replace("alert('hi');", "alert('old');");
	std::fs::write(tmp.path().join("singlepage.html"), &stale)?;

	common::singlepage_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("--diff")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("is out of date"))
		.stderr(predicates::str::contains("-alert('old');"))
		.stderr(predicates::str::contains("+alert('hi');"))
		.stderr(predicates::str::contains("Run `singlepage` to rebuild it."));

	// Checking never writes.
	assert_eq!(
		std::fs::read_to_string(tmp.path().join("singlepage.html"))?,
		stale
	);

	Ok(())
}

#[test]
fn check_diff_ends_lines_missing_a_newline() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_site(tmp.path())?;
	std::fs::write(tmp.path().join("singlepage.html"), "stale")?;

	common::singlepage_cmd()
		.current_dir(tmp.path())
		.arg("check")
		.arg("--diff")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("  -stale\n  +<html><head>\n"));

	Ok(())
}

#[test]
fn check_passes_after_build() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	common::write_site(tmp.path())?;

	common::singlepage_cmd()
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	common::singlepage_cmd()
		.arg("check")
		.arg("--path")
		.arg(tmp.path())
		.assert()
		.success();

	Ok(())
}
