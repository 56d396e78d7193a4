// SPDX-License-Identifier: MIT OR Apache-2.0
//! Core of a visual node graph editor.
//!
//! This crate holds everything the editor does that is not drawing pixels or
//! polling a window system:
//! - Nodes and links, and the store that owns them
//! - Z-order with bring-to-front on press
//! - The click-drag-release gesture that creates links
//! - Graph, layout and screen coordinate transforms and slot geometry
//!
//! ## Architecture
//!
//! A host implements the [`surface`] traits on top of its UI toolkit and calls
//! [`NodeEditor::frame`] once per UI frame. The editor asks the host to lay out
//! one panel per node, reads back where each panel actually ended up, and
//! issues draw calls for the grid, slots and links.

pub mod config;
pub mod editor;
pub mod geometry;
pub mod graph;
pub mod link;
pub mod linking;
pub mod node;
pub mod surface;
pub mod zorder;

#[cfg(test)]
pub(crate) mod testing;

pub use config::{ConfigError, EditorConfig, NodeTemplate};
pub use editor::{ContextAction, FrameOutcome, NodeEditor};
pub use graph::Graph;
pub use link::Link;
pub use linking::Linking;
pub use node::{Node, NodeId};
pub use surface::{InputSurface, LayoutSurface, RenderSurface};
pub use zorder::ZOrder;
