//! Minimal selector engine.
//!
//! Supported grammar:
//!
//! ```text
//! selector  := ['>'] compound (combinator compound)*
//! combinator:= whitespace | '>'
//! compound  := [tag | '*'] ('#' ident | '.' ident | '[' ident ['=' value] ']' | ':' pseudo)*
//! pseudo    := 'enabled' | 'submit' | 'input'
//! ```
//!
//! Matching is scoped: every step of a selector has to match inside the
//! query scope, and a leading `>` anchors the first step to the scope's
//! direct children.

use std::str::FromStr;

use crate::{Document, DomError, NodeId, Result};

/// Parsed selector.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selector {
	anchored: bool,
	steps: Vec<Step>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct Step {
	/// Relation to the previous step; ignored for the first one.
	combinator: Combinator,
	compound: Compound,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Combinator {
	Descendant,
	Child,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
struct Compound {
	tag: Option<String>,
	id: Option<String>,
	classes: Vec<String>,
	attrs: Vec<(String, Option<String>)>,
	pseudos: Vec<Pseudo>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Pseudo {
	/// Form control that is not disabled.
	Enabled,
	/// Submit button.
	Submit,
	/// Any form control.
	Input,
}

impl Selector {
	/// Parses a selector string.
	pub fn parse(input: &str) -> Result<Self> {
		Parser { input, pos: 0 }.selector()
	}

	/// Returns true when `node` matches this selector inside `scope`.
	pub fn matches(&self, doc: &Document, node: NodeId, scope: NodeId) -> bool {
		match self.steps.len() {
			0 => false,
			n => self.matches_step(doc, node, n - 1, scope),
		}
	}

	fn matches_step(&self, doc: &Document, node: NodeId, idx: usize, scope: NodeId) -> bool {
		if node == scope || !self.steps[idx].compound.matches(doc, node) {
			return false;
		}
		if idx == 0 {
			return !self.anchored || doc.parent(node) == Some(scope);
		}
		match self.steps[idx].combinator {
			Combinator::Child => doc
				.parent(node)
				.is_some_and(|parent| self.matches_step(doc, parent, idx - 1, scope)),
			Combinator::Descendant => doc
				.ancestors(node)
				.take_while(|&a| a != scope)
				.any(|a| self.matches_step(doc, a, idx - 1, scope)),
		}
	}
}

impl FromStr for Selector {
	type Err = DomError;

	fn from_str(s: &str) -> Result<Self> {
		Self::parse(s)
	}
}

impl Compound {
	fn is_empty(&self) -> bool {
		self.tag.is_none() && self.id.is_none() && self.classes.is_empty() && self.attrs.is_empty() && self.pseudos.is_empty()
	}

	fn matches(&self, doc: &Document, node: NodeId) -> bool {
		let Some(el) = doc.element(node) else {
			return false;
		};
		if self.tag.as_deref().is_some_and(|tag| tag != "*" && tag != el.tag) {
			return false;
		}
		if self.id.as_deref().is_some_and(|id| el.attrs.get("id").is_none_or(|v| v != id)) {
			return false;
		}
		if !self.classes.iter().all(|c| el.has_class(c)) {
			return false;
		}
		let attrs_match = self.attrs.iter().all(|(name, expected)| match (el.attrs.get(name), expected) {
			(Some(actual), Some(expected)) => actual == expected,
			(Some(_), None) => true,
			(None, _) => false,
		});
		attrs_match
			&& self.pseudos.iter().all(|pseudo| match pseudo {
				Pseudo::Enabled => el.is_form_control() && !el.disabled,
				Pseudo::Submit => el.is_submit(),
				Pseudo::Input => el.is_form_control(),
			})
	}
}

struct Parser<'a> {
	input: &'a str,
	pos: usize,
}

impl Parser<'_> {
	fn error(&self, reason: impl Into<String>) -> DomError {
		DomError::InvalidSelector {
			selector: self.input.to_owned(),
			reason: reason.into(),
		}
	}

	fn peek(&self) -> Option<char> {
		self.input[self.pos..].chars().next()
	}

	fn bump(&mut self) -> Option<char> {
		let c = self.peek()?;
		self.pos += c.len_utf8();
		Some(c)
	}

	fn eat(&mut self, expected: char) -> bool {
		if self.peek() == Some(expected) {
			self.pos += expected.len_utf8();
			true
		} else {
			false
		}
	}

	/// Skips whitespace, returning true if any was skipped.
	fn skip_ws(&mut self) -> bool {
		let start = self.pos;
		while self.peek().is_some_and(char::is_whitespace) {
			self.bump();
		}
		self.pos != start
	}

	fn ident(&mut self) -> Result<String> {
		let start = self.pos;
		while self.peek().is_some_and(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_') {
			self.bump();
		}
		if start == self.pos {
			return Err(self.error(format!("expected identifier at offset {start}")));
		}
		Ok(self.input[start..self.pos].to_owned())
	}

	fn attr_value(&mut self) -> Result<String> {
		match self.peek() {
			Some(quote @ ('"' | '\'')) => {
				self.bump();
				let start = self.pos;
				while self.peek().is_some_and(|c| c != quote) {
					self.bump();
				}
				let value = self.input[start..self.pos].to_owned();
				if !self.eat(quote) {
					return Err(self.error("unterminated attribute value"));
				}
				Ok(value)
			}
			_ => self.ident(),
		}
	}

	fn compound(&mut self) -> Result<Compound> {
		let mut compound = Compound::default();
		if self.eat('*') {
			compound.tag = Some("*".to_owned());
		} else if self.peek().is_some_and(|c| c.is_ascii_alphabetic()) {
			compound.tag = Some(self.ident()?.to_ascii_lowercase());
		}
		loop {
			match self.peek() {
				Some('#') => {
					self.bump();
					compound.id = Some(self.ident()?);
				}
				Some('.') => {
					self.bump();
					compound.classes.push(self.ident()?);
				}
				Some('[') => {
					self.bump();
					let name = self.ident()?;
					let value = if self.eat('=') { Some(self.attr_value()?) } else { None };
					if !self.eat(']') {
						return Err(self.error("expected ']'"));
					}
					compound.attrs.push((name, value));
				}
				Some(':') => {
					self.bump();
					let pseudo = match self.ident()?.as_str() {
						"enabled" => Pseudo::Enabled,
						"submit" => Pseudo::Submit,
						"input" => Pseudo::Input,
						other => return Err(self.error(format!("unsupported pseudo-class :{other}"))),
					};
					compound.pseudos.push(pseudo);
				}
				_ => break,
			}
		}
		if compound.is_empty() {
			return Err(self.error(format!("expected compound selector at offset {}", self.pos)));
		}
		Ok(compound)
	}

	fn selector(mut self) -> Result<Selector> {
		self.skip_ws();
		let anchored = self.eat('>');
		self.skip_ws();

		let mut steps = Vec::new();
		let mut combinator = Combinator::Descendant;
		loop {
			let compound = self.compound()?;
			steps.push(Step { combinator, compound });

			let had_ws = self.skip_ws();
			if self.peek().is_none() {
				break;
			}
			if self.eat('>') {
				combinator = Combinator::Child;
				self.skip_ws();
			} else if had_ws {
				combinator = Combinator::Descendant;
			} else {
				return Err(self.error(format!("unexpected character at offset {}", self.pos)));
			}
		}
		Ok(Selector { anchored, steps })
	}
}

#[cfg(test)]
mod tests;
