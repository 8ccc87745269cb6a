mod common;

use marksub_core::AnyEmptyResult;
use predicates::prelude::PredicateBooleanExt;
use serde_json::Value;

#[test]
fn check_passes_for_paired_delimiters() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("event.html");
	std::fs::write(&file, common::EVENT_TEMPLATE)?;

	common::marksub_cmd()
		.arg("check")
		.arg(&file)
		.assert()
		.success()
		.stdout(predicates::str::contains("Check passed"));

	Ok(())
}

#[test]
fn check_fails_for_unpaired_delimiter() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("page.html");
	std::fs::write(&file, "a\n<!-- ###LONELY### -->b")?;

	common::marksub_cmd()
		.arg("check")
		.arg(&file)
		.assert()
		.code(1)
		.stdout(
			predicates::str::contains("2:1 unpaired subpart delimiter `LONELY`")
				.and(predicates::str::contains("Check failed: 1 delimiter(s)")),
		);

	Ok(())
}

#[test]
fn check_reports_overlapping_subparts() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("page.html");
	std::fs::write(
		&file,
		"<!-- ###A### -->1<!-- ###B### -->2<!-- ###A### -->3<!-- ###B### -->",
	)?;

	common::marksub_cmd()
		.arg("check")
		.arg(&file)
		.assert()
		.code(1)
		.stdout(
			predicates::str::contains("1:18 subpart `B` overlaps `A` and is rendered as text")
				.and(predicates::str::contains("Check failed: 2 delimiter(s)")),
		);

	Ok(())
}

#[test]
fn check_counts_every_delimiter_left_as_text() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("page.html");
	std::fs::write(
		&file,
		"<!-- ###A### -->1<!-- ###B### -->2<!-- ###A### -->3<!-- ###B### -->\n<!-- ###C### -->",
	)?;

	common::marksub_cmd()
		.arg("check")
		.arg(&file)
		.assert()
		.code(1)
		.stdout(predicates::str::contains("Check failed: 3 delimiter(s)"));

	Ok(())
}

#[test]
fn check_json_output() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("page.html");
	std::fs::write(&file, "<!-- ###X### --><!-- ###X### --><!-- ###X### -->")?;

	let output = common::marksub_cmd()
		.arg("check")
		.arg(&file)
		.args(["--format", "json"])
		.output()?;
	assert_eq!(output.status.code(), Some(1));

	let json: Value = serde_json::from_slice(&output.stdout)?;
	assert_eq!(json["ok"], false);
	similar_asserts::assert_eq!(
		json["diagnostics"],
		serde_json::json!([{
			"kind": "unpairedDelimiter",
			"name": "X",
			"line": 1,
			"column": 33,
		}])
	);

	Ok(())
}

#[test]
fn verbose_logs_to_stderr() -> AnyEmptyResult {
	let tmp = tempfile::tempdir()?;
	let file = tmp.path().join("page.html");
	std::fs::write(&file, "<!-- ###X### -->")?;

	common::marksub_cmd()
		.arg("check")
		.arg(&file)
		.arg("--verbose")
		.assert()
		.code(1)
		.stderr(predicates::str::contains("unpaired delimiter"));

	Ok(())
}

#[test]
fn no_subcommand_prints_hint() {
	common::marksub_cmd()
		.assert()
		.code(1)
		.stderr(predicates::str::contains("marksub --help"));
}
