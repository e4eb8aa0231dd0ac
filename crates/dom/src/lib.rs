//! Document model for the Sone page engine.
//!
//! This crate provides the small set of DOM primitives the engine needs to
//! project server state into a rendered page:
//! * [`Document`]: an arena of element and text nodes addressed by [`NodeId`]
//! * [`Selector`]: compound selectors joined by descendant and child combinators
//! * [`TreeNode`]: an abstract tree-node interface for pure ancestor traversal
//! * [`Transition`]: visibility changes recorded for the host to animate
//!
//! The document is deliberately host-agnostic. A browser host mirrors it into
//! the real DOM, tests inspect it directly.

#![warn(missing_docs)]

mod document;
mod error;
mod fragment;
mod node;
mod selector;
mod transition;
mod tree;

pub use document::Document;
pub use error::{DomError, Result};
pub use node::NodeId;
pub use selector::Selector;
pub use transition::{Transition, TransitionRecord};
pub use tree::{NodeRef, TreeNode};

/// Class that hides an element through page styling.
pub const HIDDEN_CLASS: &str = "hidden";
