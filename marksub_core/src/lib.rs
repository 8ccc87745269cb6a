//! `marksub_core` is a marker/subpart template engine. It renders plain-text
//! or HTML fragments by resolving named, possibly nested regions
//! ("subparts") and inline placeholders ("markers") inside a flat string.
//! The engine is oblivious to HTML: a template is just text.
//!
//! ## Template syntax
//!
//! ```text
//! Dear ###NAME###,
//! <!-- ###DETAILS### -->
//! Your seat: ###SEAT###
//! <!-- ###DETAILS### -->
//! ```
//!
//! - `###NAME###` is a **marker**, replaced by the value set with
//!   [`Template::set_marker`].
//! - A pair of `<!-- ###DETAILS### -->` comments delimits the **subpart**
//!   `DETAILS`. It can be rendered on its own, replaced with
//!   [`Template::set_subpart`] or hidden with [`Template::hide_subparts`].
//!
//! Names are case-insensitive, contain only letters, digits and `_`, start
//! with a letter and do not end with `_`. Markup with an invalid name is left
//! untouched.
//!
//! ## Processing Pipeline
//!
//! ```text
//! Raw template
//!   → Lexer (finds `<!-- ###NAME### -->` delimiters with valid names)
//!   → Parser (pairs delimiters per name, nests the pairs into a tree)
//!   → Template (owns the tree plus markers, overrides and hidden subparts)
//!   → Renderer (walks the tree on every `get_subpart` call)
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use marksub_core::Template;
//!
//! let mut template = Template::new(
//! 	"Some text. <!-- ###MY_SUBPART### -->More text. <!-- ###MY_SUBPART### -->Even more text.",
//! );
//! template.hide_subparts("my_subpart", "")?;
//! assert_eq!(template.get_subpart("")?, "Some text. Even more text.");
//! # Ok::<(), marksub_core::MarksubError>(())
//! ```

pub use config::*;
pub use error::*;
pub use name::*;
pub use parser::*;
pub use position::*;
pub use render::substitute_markers;
pub use template::*;
pub use tokens::*;

pub mod config;
#[allow(unused_assignments)]
mod error;
mod helpers;
pub mod lexer;
mod name;
mod parser;
mod position;
mod render;
mod template;
mod tokens;

#[cfg(test)]
mod __fixtures;
