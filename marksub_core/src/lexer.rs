use std::ops::Range;

use logos::Logos;

use crate::Name;
use crate::Point;
use crate::Position;
use crate::tokens::Token;
use crate::tokens::TokenKind;

/// Raw pieces produced by logos. Only the punctuation that can form a
/// delimiter or marker is distinguished, everything else is `Other`.
#[derive(Logos, Debug, Clone, Copy, PartialEq, Eq)]
enum RawToken {
	#[token("<!--")]
	CommentOpen,
	#[token("-->")]
	CommentClose,
	#[token("#")]
	Hash,
	#[token(" ")]
	Space,
	#[regex(r"[A-Za-z0-9_]+")]
	Word,
	#[regex(r"[^ #A-Za-z0-9_]", priority = 0)]
	Other,
}

/// `<!-- ###NAME### -->`
const DELIMITER_PATTERN: [RawToken; 11] = [
	RawToken::CommentOpen,
	RawToken::Space,
	RawToken::Hash,
	RawToken::Hash,
	RawToken::Hash,
	RawToken::Word,
	RawToken::Hash,
	RawToken::Hash,
	RawToken::Hash,
	RawToken::Space,
	RawToken::CommentClose,
];
/// Index of the name within [`DELIMITER_PATTERN`].
const DELIMITER_NAME_INDEX: usize = 5;

/// `###NAME###`
const MARKER_PATTERN: [RawToken; 7] = [
	RawToken::Hash,
	RawToken::Hash,
	RawToken::Hash,
	RawToken::Word,
	RawToken::Hash,
	RawToken::Hash,
	RawToken::Hash,
];
const MARKER_NAME_INDEX: usize = 3;
/// Raw tokens making up the opening `###` of a marker.
const MARKER_OPENING_LEN: usize = 3;

/// Which token shape the walker collects.
#[derive(Clone, Copy)]
enum ScanMode<'f> {
	Delimiters,
	/// Every marker candidate, including ones that share their `###` with a
	/// neighbour.
	Markers,
	/// Only markers the resolver accepts. A consumed marker never overlaps
	/// another one.
	ResolvedMarkers(&'f dyn Fn(&Name) -> bool),
}

/// Walks the logos stream once, matching the fixed token patterns and
/// tracking positions as it goes.
struct TokenWalker<'a> {
	source: &'a str,
	/// Raw tokens with their byte spans. Unrecognized bytes are `None`.
	raw_tokens: Vec<(Option<RawToken>, Range<usize>)>,
	cursor: usize,
	point: Point,
	tokens: Vec<Token>,
}

impl<'a> TokenWalker<'a> {
	fn new(source: &'a str) -> Self {
		let raw_tokens = RawToken::lexer(source)
			.spanned()
			.map(|(result, span)| (result.ok(), span))
			.collect();

		Self {
			source,
			raw_tokens,
			cursor: 0,
			point: Point::default(),
			tokens: vec![],
		}
	}

	fn matches_pattern(&self, pattern: &[RawToken]) -> bool {
		self.raw_tokens
			.get(self.cursor..self.cursor + pattern.len())
			.is_some_and(|window| {
				window
					.iter()
					.zip(pattern)
					.all(|((raw, _), expected)| raw.as_ref() == Some(expected))
			})
	}

	fn slice_at(&self, index: usize) -> &'a str {
		&self.source[self.raw_tokens[index].1.clone()]
	}

	/// The position spanned by the next `count` raw tokens.
	fn peek_position(&self, count: usize) -> Position {
		let mut end = self.point;
		let end_index = (self.cursor + count).min(self.raw_tokens.len());

		for index in self.cursor..end_index {
			end.advance_str(self.slice_at(index));
		}

		Position {
			start: self.point,
			end,
		}
	}

	/// Advance past `count` raw tokens and return the position they span.
	fn advance(&mut self, count: usize) -> Position {
		let position = self.peek_position(count);
		self.cursor = (self.cursor + count).min(self.raw_tokens.len());
		self.point = position.end;

		position
	}

	/// Consume a matched pattern, recording a token when the embedded name is
	/// valid. Invalid names leave the text inert.
	fn consume(&mut self, kind: TokenKind, pattern_len: usize, name_index: usize) {
		let candidate = self.slice_at(self.cursor + name_index);
		let position = self.advance(pattern_len);

		if let Ok(name) = Name::new(candidate) {
			self.tokens.push(Token {
				kind,
				name,
				position,
			});
		}
	}

	fn process(&mut self, mode: ScanMode<'_>) {
		while self.cursor < self.raw_tokens.len() {
			if self.matches_pattern(&DELIMITER_PATTERN) {
				if let ScanMode::Delimiters = mode {
					self.consume(
						TokenKind::SubpartDelimiter,
						DELIMITER_PATTERN.len(),
						DELIMITER_NAME_INDEX,
					);
				} else {
					// The `###NAME###` inside a delimiter is never a marker.
					self.advance(DELIMITER_PATTERN.len());
				}
				continue;
			}

			if !matches!(mode, ScanMode::Delimiters) && self.matches_pattern(&MARKER_PATTERN) {
				let candidate = self.slice_at(self.cursor + MARKER_NAME_INDEX);

				if let Ok(name) = Name::new(candidate) {
					match mode {
						ScanMode::ResolvedMarkers(resolves) if resolves(&name) => {
							let position = self.advance(MARKER_PATTERN.len());
							self.push_marker(name, position);
						}
						ScanMode::Markers => {
							let position = self.peek_position(MARKER_PATTERN.len());
							self.push_marker(name, position);
							self.advance(MARKER_OPENING_LEN);
						}
						// The closing `###` may open the next marker.
						_ => {
							self.advance(MARKER_OPENING_LEN);
						}
					}
					continue;
				}
			}

			self.advance(1);
		}
	}

	fn push_marker(&mut self, name: Name, position: Position) {
		self.tokens.push(Token {
			kind: TokenKind::Marker,
			name,
			position,
		});
	}
}

/// Scan `source` for subpart delimiters with valid names, in document order.
pub fn tokenize(source: &str) -> Vec<Token> {
	let mut walker = TokenWalker::new(source);
	walker.process(ScanMode::Delimiters);
	walker.tokens
}

/// Scan `source` for marker tokens with valid names, in document order.
/// Markers embedded in a subpart delimiter are skipped.
///
/// Candidates may overlap: `###A###B###` yields both `A` and `B`, and a run
/// of more than three `#` starts a marker at its last three.
pub fn scan_markers(source: &str) -> Vec<Token> {
	let mut walker = TokenWalker::new(source);
	walker.process(ScanMode::Markers);
	walker.tokens
}

/// Scan `source` for the markers that `resolves` accepts, in document order.
///
/// Each accepted marker consumes its text, so the returned tokens never
/// overlap. A rejected candidate only consumes its opening `###`, which lets
/// its closing `###` open the next marker.
pub fn scan_resolved_markers(source: &str, resolves: impl Fn(&Name) -> bool) -> Vec<Token> {
	let mut walker = TokenWalker::new(source);
	walker.process(ScanMode::ResolvedMarkers(&resolves));
	walker.tokens
}
