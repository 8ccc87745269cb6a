use std::collections::HashMap;
use std::fmt::Display;

use serde::Serialize;

use crate::Name;
use crate::Position;
use crate::lexer::tokenize;
use crate::tokens::Token;

/// A node of the parsed template tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum Node {
	/// Passthrough text. Marker tokens inside it are resolved at render time.
	Literal(String),
	/// One occurrence of a subpart.
	Region(Region),
}

/// A parsed occurrence of a subpart: the text between a pair of
/// `<!-- ###NAME### -->` delimiters.
///
/// A name that appears four times in a template as two separate pairs
/// produces two `Region`s with [`occurrence`](Region::occurrence) `0` and `1`.
/// Children never include the delimiters themselves.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Region {
	/// The uppercase subpart name.
	pub name: Name,
	/// Which delimiter pair of this name produced the region, counting from 0
	/// in document order.
	pub occurrence: usize,
	/// Span from the start of the opening delimiter to the end of the closing
	/// delimiter.
	pub position: Position,
	/// Literal text and nested regions between the two delimiters.
	pub children: Vec<Node>,
}

impl Region {
	/// Iterate over this region's direct child regions.
	pub fn child_regions(&self) -> impl Iterator<Item = &Region> {
		self.children.iter().filter_map(|node| {
			match node {
				Node::Region(region) => Some(region),
				Node::Literal(_) => None,
			}
		})
	}
}

/// A diagnostic produced during parsing. Parsing itself never fails: the
/// offending delimiters are left in place as literal text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
#[non_exhaustive]
pub enum ParseDiagnostic {
	/// A delimiter whose name occurs an odd number of times was left without a
	/// partner.
	UnpairedDelimiter {
		name: String,
		line: usize,
		column: usize,
	},
	/// A region started inside another region but ended outside it.
	OverlappingSubpart {
		name: String,
		enclosing: String,
		line: usize,
		column: usize,
	},
	/// A region nested deeper than [`MAX_NESTING_DEPTH`].
	NestingTooDeep {
		name: String,
		line: usize,
		column: usize,
	},
}

impl ParseDiagnostic {
	pub fn line(&self) -> usize {
		match self {
			Self::UnpairedDelimiter { line, .. }
			| Self::OverlappingSubpart { line, .. }
			| Self::NestingTooDeep { line, .. } => *line,
		}
	}

	pub fn column(&self) -> usize {
		match self {
			Self::UnpairedDelimiter { column, .. }
			| Self::OverlappingSubpart { column, .. }
			| Self::NestingTooDeep { column, .. } => *column,
		}
	}

	/// How many delimiters this diagnostic leaves as literal text.
	pub fn delimiter_count(&self) -> usize {
		match self {
			Self::UnpairedDelimiter { .. } => 1,
			Self::OverlappingSubpart { .. } | Self::NestingTooDeep { .. } => 2,
		}
	}
}

impl Display for ParseDiagnostic {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::UnpairedDelimiter { name, line, column } => {
				write!(
					f,
					"{line}:{column} unpaired subpart delimiter `{name}` is rendered as text"
				)
			}
			Self::OverlappingSubpart {
				name,
				enclosing,
				line,
				column,
			} => {
				write!(
					f,
					"{line}:{column} subpart `{name}` overlaps `{enclosing}` and is rendered as \
					 text"
				)
			}
			Self::NestingTooDeep { name, line, column } => {
				write!(
					f,
					"{line}:{column} subpart `{name}` is nested more than {MAX_NESTING_DEPTH} levels \
					 deep and is rendered as text"
				)
			}
		}
	}
}

/// Regions nested deeper than this are left as literal text.
pub const MAX_NESTING_DEPTH: usize = 128;

/// A matched pair of delimiter tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Span {
	pub name: Name,
	pub occurrence: usize,
	/// Position of the opening delimiter.
	pub opening: Position,
	/// Position of the closing delimiter.
	pub closing: Position,
}

impl Span {
	fn outer(&self) -> Position {
		Position {
			start: self.opening.start,
			end: self.closing.end,
		}
	}
}

/// Parse `source` into a tree of literal text and regions.
pub fn parse(source: impl AsRef<str>) -> Vec<Node> {
	parse_with_diagnostics(source).0
}

/// Parse `source` and also report every delimiter that could not take part in
/// a region.
pub fn parse_with_diagnostics(source: impl AsRef<str>) -> (Vec<Node>, Vec<ParseDiagnostic>) {
	let source = source.as_ref();
	let tokens = tokenize(source);
	let (spans, mut diagnostics) = pair_delimiters(&tokens);
	let (spans, rejected) = nest_spans(spans);
	diagnostics.extend(rejected);
	diagnostics.sort_by_key(|diagnostic| (diagnostic.line(), diagnostic.column()));

	tracing::debug!(
		delimiters = tokens.len(),
		regions = spans.len(),
		diagnostics = diagnostics.len(),
		"parsed template"
	);

	(build_tree(source, &spans), diagnostics)
}

/// Pair delimiter tokens per name, sequentially: tokens 1 and 2 of a name
/// bound occurrence 0, tokens 3 and 4 occurrence 1, and so on. A trailing odd
/// token is reported and left out. Spans are returned sorted by start.
pub fn pair_delimiters(tokens: &[Token]) -> (Vec<Span>, Vec<ParseDiagnostic>) {
	let mut by_name: HashMap<&Name, Vec<&Token>> = HashMap::new();
	for token in tokens {
		by_name.entry(&token.name).or_default().push(token);
	}

	let mut spans = vec![];
	let mut diagnostics = vec![];

	for (name, tokens) in by_name {
		for (occurrence, pair) in tokens.chunks(2).enumerate() {
			match pair {
				[opening, closing] => {
					spans.push(Span {
						name: name.clone(),
						occurrence,
						opening: opening.position,
						closing: closing.position,
					});
				}
				[unpaired, ..] => {
					tracing::debug!(name = %name, offset = unpaired.start(), "unpaired delimiter");
					diagnostics.push(ParseDiagnostic::UnpairedDelimiter {
						name: name.to_string(),
						line: unpaired.position.start.line,
						column: unpaired.position.start.column,
					});
				}
				[] => {}
			}
		}
	}

	spans.sort_by_key(|span| span.opening.start.offset);
	(spans, diagnostics)
}

/// Keep only spans that nest properly. A span that starts inside an accepted
/// span but ends after it is rejected and its delimiters stay literal text, as
/// does a span that would sit more than [`MAX_NESTING_DEPTH`] levels deep.
/// Input and output are sorted by start.
pub fn nest_spans(spans: Vec<Span>) -> (Vec<Span>, Vec<ParseDiagnostic>) {
	let mut accepted: Vec<Span> = Vec::with_capacity(spans.len());
	let mut open: Vec<usize> = vec![];
	let mut diagnostics = vec![];

	for span in spans {
		while let Some(&top) = open.last() {
			if accepted[top].closing.end.offset <= span.opening.start.offset {
				open.pop();
			} else {
				break;
			}
		}

		if let Some(&top) = open.last() {
			let enclosing = &accepted[top];

			if span.closing.end.offset > enclosing.closing.start.offset {
				tracing::debug!(
					name = %span.name,
					enclosing = %enclosing.name,
					"overlapping subpart left as text"
				);
				diagnostics.push(ParseDiagnostic::OverlappingSubpart {
					name: span.name.to_string(),
					enclosing: enclosing.name.to_string(),
					line: span.opening.start.line,
					column: span.opening.start.column,
				});
				continue;
			}
		}

		if open.len() >= MAX_NESTING_DEPTH {
			tracing::debug!(name = %span.name, "deeply nested subpart left as text");
			diagnostics.push(ParseDiagnostic::NestingTooDeep {
				name: span.name.to_string(),
				line: span.opening.start.line,
				column: span.opening.start.column,
			});
			continue;
		}

		open.push(accepted.len());
		accepted.push(span);
	}

	(accepted, diagnostics)
}

/// Build the node tree for `source` from properly nested spans sorted by
/// start.
pub fn build_tree(source: &str, spans: &[Span]) -> Vec<Node> {
	build_nodes(source, 0..source.len(), spans)
}

fn build_nodes(source: &str, range: std::ops::Range<usize>, spans: &[Span]) -> Vec<Node> {
	let mut nodes = vec![];
	let mut cursor = range.start;
	let mut index = 0;

	while index < spans.len() {
		let span = &spans[index];
		let inner_start = span.opening.end.offset;
		let inner_end = span.closing.start.offset;

		// Everything starting before the closing delimiter is nested inside.
		let nested_end = spans[index + 1..]
			.iter()
			.position(|nested| nested.opening.start.offset >= inner_end)
			.map_or(spans.len(), |offset| index + 1 + offset);

		push_literal(&mut nodes, &source[cursor..span.opening.start.offset]);
		nodes.push(Node::Region(Region {
			name: span.name.clone(),
			occurrence: span.occurrence,
			position: span.outer(),
			children: build_nodes(source, inner_start..inner_end, &spans[index + 1..nested_end]),
		}));

		cursor = span.closing.end.offset;
		index = nested_end;
	}

	push_literal(&mut nodes, &source[cursor..range.end]);
	nodes
}

/// Append `text`, merging with a preceding literal so inert delimiters stay
/// contiguous with their surrounding text.
fn push_literal(nodes: &mut Vec<Node>, text: &str) {
	if text.is_empty() {
		return;
	}

	if let Some(Node::Literal(previous)) = nodes.last_mut() {
		previous.push_str(text);
	} else {
		nodes.push(Node::Literal(text.to_string()));
	}
}
