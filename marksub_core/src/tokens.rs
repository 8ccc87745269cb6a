use std::fmt::Display;

use serde::Serialize;

use crate::Name;
use crate::Position;

/// The two token shapes recognized in raw template text.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TokenKind {
	/// `<!-- ###NAME### -->`
	SubpartDelimiter,
	/// `###NAME###`
	Marker,
}

/// A recognized token with a valid name and its span in the scanned text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Token {
	pub kind: TokenKind,
	pub name: Name,
	pub position: Position,
}

impl Token {
	pub fn start(&self) -> usize {
		self.position.start.offset
	}

	pub fn end(&self) -> usize {
		self.position.end.offset
	}
}

impl Display for Token {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			TokenKind::SubpartDelimiter => write!(f, "<!-- ###{}### -->", self.name),
			TokenKind::Marker => write!(f, "###{}###", self.name),
		}
	}
}
