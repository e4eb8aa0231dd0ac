//! Server-rendered markup import.
//!
//! Fragments go through the html5ever tokenizer, so entities, bare `&` and
//! void elements written without a closing slash all come out as a browser
//! would read them. The tree is then assembled directly in the arena with a
//! small stack of open elements:
//! * void elements and self-closed tags never take children
//! * an end tag closes the nearest open element of that name, stray ones are ignored
//! * elements still open at the end of the input are closed implicitly

use html5ever::tendril::StrTendril;
use html5ever::tokenizer::states::RawKind;
use html5ever::tokenizer::{BufferQueue, Tag, TagKind, Token, TokenSink, TokenSinkResult, Tokenizer, TokenizerOpts};
use tracing::trace;

use crate::{Document, NodeId};

/// Elements without content or end tag.
const VOID_ELEMENTS: &[&str] = &[
	"area", "base", "br", "col", "embed", "hr", "img", "input", "link", "meta", "source", "track", "wbr",
];

/// Elements closed implicitly by a start tag of the same name.
const IMPLIED_END: &[&str] = &["li", "option", "p"];

#[derive(Debug, PartialEq, Eq)]
enum Piece {
	Open {
		name: String,
		attrs: Vec<(String, String)>,
		closed: bool,
	},
	Close(String),
	Text(String),
}

#[derive(Default)]
struct Collector {
	pieces: Vec<Piece>,
}

impl TokenSink for Collector {
	type Handle = ();

	fn process_token(&mut self, token: Token, _line: u64) -> TokenSinkResult<()> {
		match token {
			Token::TagToken(Tag {
				kind: TagKind::StartTag,
				name,
				self_closing,
				attrs,
			}) => {
				let raw = match &*name {
					"textarea" | "title" => Some(RawKind::Rcdata),
					"style" => Some(RawKind::Rawtext),
					"script" => Some(RawKind::ScriptData),
					_ => None,
				};
				let closed = self_closing || VOID_ELEMENTS.contains(&&*name);
				self.pieces.push(Piece::Open {
					name: name.to_string(),
					attrs: attrs
						.into_iter()
						.map(|attr| (attr.name.local.to_string(), attr.value.to_string()))
						.collect(),
					closed,
				});
				if let Some(raw) = raw
					&& !closed
				{
					return TokenSinkResult::RawData(raw);
				}
			}
			Token::TagToken(Tag {
				kind: TagKind::EndTag,
				name,
				..
			}) => self.pieces.push(Piece::Close(name.to_string())),
			Token::CharacterTokens(text) => match self.pieces.last_mut() {
				Some(Piece::Text(prev)) => prev.push_str(&text),
				_ => self.pieces.push(Piece::Text(text.to_string())),
			},
			Token::ParseError(err) => trace!(%err, "lenient markup"),
			_ => {}
		}
		TokenSinkResult::Continue
	}
}

fn tokenize(markup: &str) -> Vec<Piece> {
	let mut tokenizer = Tokenizer::new(Collector::default(), TokenizerOpts::default());
	let mut input = BufferQueue::default();
	input.push_back(StrTendril::from_slice(markup));
	// Feeding only pauses for scripts, which the sink never requests.
	let _ = tokenizer.feed(&mut input);
	tokenizer.end();
	tokenizer.sink.pieces
}

impl Document {
	/// Parses `markup` into detached top-level nodes.
	///
	/// Parsing never fails: malformed markup is repaired as the module docs
	/// describe, and text that only looks like markup (`a < b`) stays
	/// text. Whitespace-only text between elements is dropped.
	pub fn parse_fragment(&mut self, markup: &str) -> Vec<NodeId> {
		let mut top = Vec::new();
		let mut open: Vec<NodeId> = Vec::new();

		for piece in tokenize(markup) {
			match piece {
				Piece::Text(text) => {
					if text.trim().is_empty() {
						continue;
					}
					let node = self.create_text(text);
					self.place(&mut top, open.last().copied(), node);
				}
				Piece::Open { name, attrs, closed } => {
					if IMPLIED_END.contains(&name.as_str())
						&& let Some(&current) = open.last()
						&& self.tag(current) == Some(name.as_str())
					{
						open.pop();
					}
					let node = self.import_element(&name, &attrs);
					self.place(&mut top, open.last().copied(), node);
					if !closed {
						open.push(node);
					}
				}
				Piece::Close(name) => {
					if let Some(pos) = open.iter().rposition(|&node| self.tag(node) == Some(name.as_str())) {
						for node in open.drain(pos..).rev() {
							self.finish_element(node);
						}
					}
				}
			}
		}
		for node in open.into_iter().rev() {
			self.finish_element(node);
		}
		top
	}

	fn place(&mut self, top: &mut Vec<NodeId>, parent: Option<NodeId>, node: NodeId) {
		match parent {
			// Fresh nodes under a fresh parent cannot form a cycle.
			Some(parent) => {
				let _ = self.append_child(parent, node);
			}
			None => top.push(node),
		}
	}

	fn import_element(&mut self, tag: &str, attrs: &[(String, String)]) -> NodeId {
		let node = self.create_element(tag);
		for (name, value) in attrs {
			self.set_attr(node, name, value.as_str());
		}
		if self
			.attr(node, "style")
			.is_some_and(|style| style.replace(' ', "").contains("display:none"))
		{
			self.hide(node);
		}
		if self.tag(node) == Some("input") {
			let value = self.attr(node, "value").unwrap_or_default().to_owned();
			self.set_value(node, value);
		}
		node
	}

	/// Seeds the live value of a textarea from its content once it is complete.
	fn finish_element(&mut self, node: NodeId) {
		if self.tag(node) == Some("textarea") {
			let value = self.text(node);
			self.set_value(node, value);
		}
	}
}
