// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The rendering surface the controller drives.

use alloc::string::String;
use alloc::vec::Vec;
use core::fmt::Debug;
use core::hash::Hash;

use kurbo::{Point, Rect};
use smallvec::SmallVec;
use understory_focus::TabEntry;
use understory_placement::{ArrowPlacement, LayerStyles};

use crate::SurfaceError;

/// Computed CSS `position` of a node.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
pub enum CssPosition {
    /// `static` (or `auto`).
    #[default]
    Static,
    /// `relative`.
    Relative,
    /// `absolute`.
    Absolute,
    /// `fixed`.
    Fixed,
    /// `sticky`.
    Sticky,
}

impl CssPosition {
    /// Whether the node establishes a containing block for positioned
    /// descendants.
    pub const fn is_positioned(self) -> bool {
        !matches!(self, Self::Static)
    }

    /// Whether a `z-index` on the node is honored for depth comparisons.
    pub const fn honors_z_index(self) -> bool {
        matches!(self, Self::Relative | Self::Absolute | Self::Fixed)
    }
}

/// Temporary display modes used while a layer is being shown.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Presentation {
    /// Laid out and measurable, but invisible (`visibility: hidden`,
    /// `display: block`, `position: absolute`).
    Measuring,
    /// Normal hidden display (`display: none`, visibility restored), ready to
    /// fade in.
    Concealed,
}

/// A two-phase transition the surface reports back on completion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Transition {
    /// A fade-in started by [`Surface::fade_in`].
    FadeIn,
    /// A fade-out started by [`Surface::fade_out`].
    FadeOut,
    /// An offset animation started by [`Surface::animate_offsets`].
    Move,
}

/// Everything the layer controller needs from the rendering layer.
///
/// Lookups report what they find and never fail; the controller decides what
/// a missing or ambiguous match means. Mutations on nodes that have been
/// removed from the document must be silently ignored.
///
/// Animated mutations ([`fade_in`](Self::fade_in),
/// [`fade_out`](Self::fade_out), [`animate_offsets`](Self::animate_offsets))
/// only start the animation. The host reports completion through
/// [`LayerHost::transition_finished`](crate::LayerHost::transition_finished).
///
/// Measurements are expected to be finite. A poll of the resize watch that
/// reads a NaN or infinite value is skipped and retried on the next poll.
pub trait Surface {
    /// Node handle.
    type Node: Copy + Eq + Hash + Debug;

    /// Every node matching `selector`, in document order.
    fn select(&self, selector: &str) -> SmallVec<[Self::Node; 1]>;
    /// Every descendant of `scope` matching `selector`, in document order.
    fn select_within(&self, scope: Self::Node, selector: &str) -> SmallVec<[Self::Node; 1]>;
    /// The node with DOM id `id`.
    fn element_by_id(&self, id: &str) -> Option<Self::Node>;
    /// DOM id of `node`.
    fn element_id(&self, node: Self::Node) -> Option<String>;
    /// Set the DOM id of `node`.
    fn set_element_id(&mut self, node: Self::Node, id: &str);

    /// The document element.
    fn root(&self) -> Self::Node;
    /// The document body.
    fn body(&self) -> Self::Node;
    /// Parent of `node`; `None` for the root and for detached subtrees.
    fn parent(&self, node: Self::Node) -> Option<Self::Node>;
    /// Next sibling of `node`.
    fn next_sibling(&self, node: Self::Node) -> Option<Self::Node>;
    /// Offset parent as natively reported. May be unreliable; the depth
    /// resolver only uses it for the background shortcut.
    fn offset_parent(&self, node: Self::Node) -> Option<Self::Node>;

    /// Whether `node` is `ancestor` or one of its descendants.
    fn contains(&self, ancestor: Self::Node, node: Self::Node) -> bool {
        let mut cur = Some(node);
        while let Some(n) = cur {
            if n == ancestor {
                return true;
            }
            cur = self.parent(n);
        }
        false
    }

    /// Computed `position`.
    fn position(&self, node: Self::Node) -> CssPosition;
    /// Computed `z-index`; `None` for `auto`.
    fn z_index(&self, node: Self::Node) -> Option<i32>;
    /// Whether `node` currently takes up space and is displayed.
    fn is_visible(&self, node: Self::Node) -> bool;

    /// Border box in page coordinates.
    fn border_box(&self, node: Self::Node) -> Rect;
    /// Outer height of the layer's projected content.
    fn content_height(&self, layer: Self::Node) -> f64;
    /// Scroll height of `node`.
    fn scroll_height(&self, node: Self::Node) -> f64;
    /// Visible viewport in page coordinates; its origin is the scroll offset.
    fn viewport(&self) -> Rect;

    /// Switch `node` into a temporary display mode.
    fn set_presentation(&mut self, node: Self::Node, presentation: Presentation);
    /// Apply positioning styles to the layer and the height cap to its
    /// content area.
    fn apply_styles(
        &mut self,
        layer: Self::Node,
        content_area: Option<Self::Node>,
        styles: &LayerStyles,
    );
    /// Set the layer's top-left corner immediately.
    fn set_offsets(&mut self, node: Self::Node, offsets: Point);
    /// Start animating the layer's top-left corner.
    fn animate_offsets(&mut self, node: Self::Node, offsets: Point);
    /// Start fading `node` in.
    fn fade_in(&mut self, node: Self::Node);
    /// Start fading `node` out.
    fn fade_out(&mut self, node: Self::Node);
    /// Jump running transitions on `node` to their end state.
    fn finish_transitions(&mut self, node: Self::Node);
    /// Position the arrow element.
    fn place_arrow(&mut self, node: Self::Node, arrow: &ArrowPlacement);
    /// Add or remove a CSS class.
    fn set_class(&mut self, node: Self::Node, class: &str, on: bool);
    /// Lock or unlock page scrolling.
    fn lock_page_scroll(&mut self, locked: bool);
    /// Attach or detach the document-level key and click listeners.
    fn listen_document(&mut self, listening: bool);

    /// The focused node.
    fn active_element(&self) -> Option<Self::Node>;
    /// Move focus to `node`.
    fn focus(&mut self, node: Self::Node) -> Result<(), SurfaceError>;
    /// Remove focus from `node`.
    fn blur(&mut self, node: Self::Node) -> Result<(), SurfaceError>;

    /// Describe the descendants of `scope` matching
    /// `input, a, button, textarea, select, [tabindex]`, in document order.
    fn tab_entries(&self, scope: Self::Node, out: &mut Vec<TabEntry<Self::Node>>);
}
