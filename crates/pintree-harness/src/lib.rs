#![forbid(unsafe_code)]

//! Deterministic driver for exercising a [`pintree::StickyTree`] without a
//! real rendering host.
//!
//! - [`ScriptedViewport`] stands in for the virtualizer: it holds a scroll
//!   offset, a viewport size, and logs every height recompute request.
//! - [`Session`] owns a tree and a viewport, windows rows with overscan,
//!   measures freshly painted rows through a caller-supplied function, and
//!   keeps a history of [`FrameSummary`] records for assertions.
//!
//! # Quick Start
//!
//! ```
//! use pintree::prelude::*;
//! use pintree_harness::Session;
//!
//! let rows = flatten(&[Node::new(1, "group").child(Node::new(2, "item"))]);
//! let tree = StickyTree::builder(rows)
//!     .row_renderer(|props| props.index)
//!     .on_change(|_| {})
//!     .build()?;
//!
//! let mut session = Session::new(tree, 100.0, 300.0, |_: &usize| 20.0);
//! let frame = session.mount();
//! assert_eq!(frame.range, 0..2);
//! # Ok::<(), pintree::Error>(())
//! ```

pub mod session;
pub mod viewport;

pub use session::{Frame, FrameSummary, PaintedRow, Session};
pub use viewport::{ScriptedViewport, offset_for_index, render_range, row_offsets, visible_range};
