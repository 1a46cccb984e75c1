//! Presentation metadata for windowed rows and the pinned header.
//!
//! The row renderer supplied by the caller never sees raw indices alone: it
//! receives [`RowProps`] carrying the node, its header/sticky flags, a class
//! name and a [`RowStyle`]. Windowed rows inherit the positioning the
//! viewport assigned them; the pinned copy of a header takes a separate path
//! with full width, a raised stacking order and an opaque background, since
//! it paints over whatever rows are scrolled beneath it.

use crate::node::{Node, NodeId};
use crate::viewport::CellStyle;

/// Class applied to group-header rows.
pub const GROUP_HEADER_CLASS: &str = "tree-group-header";
/// Classes applied to the pinned header copy.
pub const STICKY_HEADER_CLASS: &str = "tree-group-header tree-sticky";
/// Stacking order of the pinned header within its container.
pub const STICKY_Z_INDEX: i32 = 10;
/// Stacking order of the container holding the pinned header.
pub const STICKY_CONTAINER_Z_INDEX: i32 = 100;
/// Background painted behind the pinned header.
pub const STICKY_BACKGROUND: &str = "#fff";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserSelect {
    #[default]
    Auto,
    None,
}

/// Style handed to the row renderer.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RowStyle {
    /// Viewport positioning; `None` for the pinned header.
    pub cell: Option<CellStyle>,
    pub margin_left: f32,
    pub cursor: Cursor,
    pub user_select: UserSelect,
    /// Stretch across the container instead of using the cell width.
    pub full_width: bool,
    pub background: Option<&'static str>,
    pub z_index: Option<i32>,
}

/// Arguments for one invocation of the row renderer.
pub struct RowProps<'a, T> {
    pub node: &'a Node<T>,
    pub index: usize,
    /// Stable render key.
    pub key: String,
    pub is_group_header: bool,
    pub is_sticky: bool,
    /// Space-separated class list; empty for plain rows.
    pub class_name: &'static str,
    pub style: RowStyle,
    /// Callback the row invokes to request a node change.
    pub on_change: &'a dyn Fn(&Node<T>),
    /// Whether the viewport wants this row measured after painting.
    pub needs_measure: bool,
}

/// Placement of the container that holds the pinned header.
///
/// Anchored to the top, left and right edges of the tree container.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct StickyContainerStyle {
    pub top: f32,
    pub left: f32,
    pub right: f32,
    pub z_index: i32,
    /// Cached height of the header's windowed row.
    pub height: f32,
}

impl StickyContainerStyle {
    #[must_use]
    pub fn with_height(height: f32) -> Self {
        Self {
            top: 0.0,
            left: 0.0,
            right: 0.0,
            z_index: STICKY_CONTAINER_Z_INDEX,
            height,
        }
    }
}

/// Rendered pinned header plus its container placement.
#[derive(Debug, Clone, PartialEq)]
pub struct StickyHeader<R> {
    pub id: NodeId,
    pub index: usize,
    pub key: String,
    pub container: StickyContainerStyle,
    pub content: R,
}

/// Turns nodes into row props.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowAdapter {
    indent_per_level: f32,
}

impl RowAdapter {
    #[must_use]
    pub fn new(indent_per_level: f32) -> Self {
        Self { indent_per_level }
    }

    #[must_use]
    pub fn indent_per_level(&self) -> f32 {
        self.indent_per_level
    }

    #[must_use]
    pub fn margin_left(&self, deepness: usize) -> f32 {
        deepness as f32 * self.indent_per_level
    }

    /// Style for a windowed row at the viewport-assigned `cell`.
    #[must_use]
    pub fn row_style<T>(&self, node: &Node<T>, cell: CellStyle) -> RowStyle {
        RowStyle {
            cell: Some(cell),
            margin_left: self.margin_left(node.deepness()),
            cursor: Cursor::Pointer,
            user_select: UserSelect::None,
            ..RowStyle::default()
        }
    }

    /// Style for the pinned header copy.
    #[must_use]
    pub fn sticky_style<T>(&self, node: &Node<T>) -> RowStyle {
        RowStyle {
            cell: None,
            margin_left: self.margin_left(node.deepness()),
            cursor: Cursor::Pointer,
            user_select: UserSelect::None,
            full_width: true,
            background: Some(STICKY_BACKGROUND),
            z_index: Some(STICKY_Z_INDEX),
        }
    }

    /// Props for a windowed row.
    #[must_use]
    pub fn row_props<'a, T>(
        &self,
        node: &'a Node<T>,
        index: usize,
        key: String,
        cell: CellStyle,
        on_change: &'a dyn Fn(&Node<T>),
    ) -> RowProps<'a, T> {
        let is_group_header = node.is_group_header();
        RowProps {
            node,
            index,
            key,
            is_group_header,
            is_sticky: false,
            class_name: if is_group_header { GROUP_HEADER_CLASS } else { "" },
            style: self.row_style(node, cell),
            on_change,
            needs_measure: cell.height.is_none(),
        }
    }

    /// Props for the pinned header copy of the row at `index`.
    #[must_use]
    pub fn sticky_props<'a, T>(
        &self,
        node: &'a Node<T>,
        index: usize,
        on_change: &'a dyn Fn(&Node<T>),
    ) -> RowProps<'a, T> {
        RowProps {
            node,
            index,
            key: sticky_key(node.id()),
            is_group_header: true,
            is_sticky: true,
            class_name: STICKY_HEADER_CLASS,
            style: self.sticky_style(node),
            on_change,
            needs_measure: false,
        }
    }
}

/// Render key of the pinned header for `id`.
#[must_use]
pub fn sticky_key(id: NodeId) -> String {
    format!("sticky-header-{id}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn noop(_: &Node<&'static str>) {}

    fn header() -> Node<&'static str> {
        Node::new(1, "group").child(Node::new(2, "item"))
    }

    #[test]
    fn indentation_scales_with_deepness() {
        let adapter = RowAdapter::new(30.0);
        assert_eq!(adapter.margin_left(0), 0.0);
        assert_eq!(adapter.margin_left(3), 90.0);
    }

    #[test]
    fn plain_row_props() {
        let adapter = RowAdapter::new(30.0);
        let node = Node::new(2, "item").with_deepness(2);
        let cell = CellStyle {
            top: 40.0,
            left: 0.0,
            height: Some(20.0),
            width: 300.0,
        };
        let props = adapter.row_props(&node, 1, "row-1".into(), cell, &noop);

        assert!(!props.is_group_header);
        assert!(!props.is_sticky);
        assert_eq!(props.class_name, "");
        assert_eq!(props.key, "row-1");
        assert_eq!(props.style.cell, Some(cell));
        assert_eq!(props.style.margin_left, 60.0);
        assert_eq!(props.style.cursor, Cursor::Pointer);
        assert_eq!(props.style.user_select, UserSelect::None);
        assert!(!props.style.full_width);
        assert_eq!(props.style.z_index, None);
        assert!(!props.needs_measure);
    }

    #[test]
    fn header_row_gets_class() {
        let adapter = RowAdapter::new(30.0);
        let node = header();
        let cell = CellStyle::default();
        let props = adapter.row_props(&node, 0, "row-0".into(), cell, &noop);
        assert!(props.is_group_header);
        assert_eq!(props.class_name, GROUP_HEADER_CLASS);
        assert!(props.needs_measure, "cell without height is unmeasured");
    }

    #[test]
    fn sticky_props_use_separate_style() {
        let adapter = RowAdapter::new(30.0);
        let node = header();
        let props = adapter.sticky_props(&node, 0, &noop);

        assert!(props.is_sticky);
        assert!(props.is_group_header);
        assert_eq!(props.key, "sticky-header-1");
        assert_eq!(props.class_name, "tree-group-header tree-sticky");
        assert_eq!(props.style.cell, None);
        assert!(props.style.full_width);
        assert_eq!(props.style.background, Some("#fff"));
        assert_eq!(props.style.z_index, Some(10));
        assert_eq!(props.style.cursor, Cursor::Pointer);
        assert_eq!(props.style.user_select, UserSelect::None);
    }

    #[test]
    fn container_is_anchored_above_rows() {
        let container = StickyContainerStyle::with_height(32.0);
        assert_eq!(container.z_index, 100);
        assert_eq!(container.height, 32.0);
        assert_eq!((container.top, container.left, container.right), (0.0, 0.0, 0.0));
    }
}
