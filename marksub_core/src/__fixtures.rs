use crate::Name;
use crate::Position;
use crate::Token;
use crate::TokenKind;

pub const SCENARIO_TEMPLATE: &str =
	"Some text. <!-- ###MY_SUBPART### -->More text. <!-- ###MY_SUBPART### -->Even more text.";

pub const REPEATED_TEMPLATE: &str =
	"A<!-- ###X### -->B<!-- ###X### -->C<!-- ###X### -->D<!-- ###X### -->E";

pub const NESTED_TEMPLATE: &str =
	"<!-- ###O### -->x<!-- ###I### -->y<!-- ###I### -->z<!-- ###O### -->";

pub const OVERLAPPING_TEMPLATE: &str =
	"<!-- ###A### -->1<!-- ###B### -->2<!-- ###A### -->3<!-- ###B### -->";

pub const EVENT_TEMPLATE: &str = "<!-- ###EVENT### -->
<h1>###EVENT_TITLE###</h1>
<!-- ###WRAPPER_PLACES### --><p>Places: ###PLACES###</p><!-- ###WRAPPER_PLACES### -->
<!-- ###DETAILS### --><p>###EVENT_DESCRIPTION###</p><!-- ###DETAILS### -->
<!-- ###EVENT### -->";

pub fn name(value: &str) -> Name {
	Name::new(value).unwrap_or_else(|e| panic!("invalid fixture name `{value}`: {e}"))
}

pub fn single_delimiter_token() -> Token {
	Token {
		kind: TokenKind::SubpartDelimiter,
		name: name("A"),
		position: Position::new(1, 1, 0, 1, 17, 16),
	}
}

pub fn second_line_delimiter_token() -> Token {
	Token {
		kind: TokenKind::SubpartDelimiter,
		name: name("A"),
		position: Position::new(2, 1, 2, 2, 17, 18),
	}
}

pub fn marker_token(value: &str, start: usize) -> Token {
	let end = start + value.len() + 6;

	Token {
		kind: TokenKind::Marker,
		name: name(value),
		position: Position::new(1, start + 1, start, 1, end + 1, end),
	}
}
