use assert_cmd::Command;
use insta_cmd::get_cargo_bin;

pub fn marksub_cmd() -> Command {
	let mut cmd = Command::new(get_cargo_bin("marksub"));
	cmd.env("NO_COLOR", "1");
	cmd.env_remove("MARKSUB_LOG");
	cmd
}

pub const EVENT_TEMPLATE: &str = "<!-- ###EVENT### -->
<h1>###EVENT_TITLE###</h1>
<!-- ###WRAPPER_PLACES### --><p>Places: ###PLACES###</p><!-- ###WRAPPER_PLACES### -->
<!-- ###DETAILS### --><p>###EVENT_DESCRIPTION###</p><!-- ###DETAILS### -->
<!-- ###EVENT### -->";
