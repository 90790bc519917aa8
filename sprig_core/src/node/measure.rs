// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Lazy, memoized size and position derivation.
//!
//! Sizes are computed bottom-up on first read and cached until the node is
//! dirtied. For each axis the *measured* size is:
//!
//! 1. The declared size, if it resolves ([`Size::Fixed`], a resolved
//!    [`Size::Percent`], or a [`Size::Computed`] closure returning `Some`).
//!    A declared size of exactly `0` short-circuits to `0`: padding and fill
//!    are not added.
//! 2. Otherwise a size derived from context: the behavior's content size for a
//!    node without a flex mode, the sum of eligible children's outer sizes
//!    along a flex node's main axis, or their maximum along its cross axis.
//!    A growing child with no flex mode derives `0` along its parent's main
//!    axis, leaving its size entirely to grow distribution.
//! 3. Plus padding, plus `fill` times the parent's resolved size (or nothing
//!    while the parent's size is unresolved).
//!
//! The *resolved* size is the grow override written by the parent's
//! arrangement, if any, else the measured size.

use alloc::vec::Vec;

use super::id::INVALID;
use super::store::NodeStore;
use super::style::component;
use crate::behavior::NodeRef;
use crate::geometry::{Axis, Position, Size};

impl NodeStore {
    /// Resolved size of `idx` along `axis`.
    pub(crate) fn measure(&mut self, idx: u32, axis: Axis) -> f64 {
        match self.cache[idx as usize].grown(axis) {
            Some(grown) => grown,
            None => self.measure_base(idx, axis),
        }
    }

    /// Measured size of `idx` along `axis`, ignoring any grow override.
    pub(crate) fn measure_base(&mut self, idx: u32, axis: Axis) -> f64 {
        let i = idx as usize;
        if let Some(measured) = self.cache[i].measured(axis) {
            return measured;
        }

        let measured = match self.declared_size(idx, axis) {
            Some(declared) if declared == 0.0 => 0.0,
            Some(declared) => {
                declared + self.style[i].padding_sum(axis) + self.fill_extent(idx, axis)
            }
            None => {
                let derived = self.derive_size(idx, axis);
                derived + self.style[i].padding_sum(axis) + self.fill_extent(idx, axis)
            }
        };
        self.cache[i].set_measured(axis, Some(measured));
        measured
    }

    /// Resolved size plus margin.
    pub(crate) fn outer_size(&mut self, idx: u32, axis: Axis) -> f64 {
        self.measure(idx, axis) + self.style[idx as usize].margin_sum(axis)
    }

    /// Resolved size minus padding: the space available to children.
    pub(crate) fn inner_size(&mut self, idx: u32, axis: Axis) -> f64 {
        self.measure(idx, axis) - self.style[idx as usize].padding_sum(axis)
    }

    /// Inner size of `idx`, only if its size is already resolved.
    pub(crate) fn ready_inner_size(&self, idx: u32, axis: Axis) -> Option<f64> {
        let i = idx as usize;
        self.cache[i]
            .resolved(axis)
            .map(|size| size - self.style[i].padding_sum(axis))
    }

    /// Whether `idx` is enabled and takes part in its parent's flow.
    pub(crate) fn is_eligible(&self, idx: u32) -> bool {
        let i = idx as usize;
        self.flags[i].enabled && !self.style[i].ignore_layout
    }

    /// Children of `idx` that take part in its flow, in order.
    pub(crate) fn eligible_children(&self, idx: u32) -> Vec<u32> {
        self.child_indices(idx)
            .filter(|&c| self.is_eligible(c))
            .collect()
    }

    /// Whether `idx` is placed by its parent's arrangement.
    pub(crate) fn is_in_flow(&self, idx: u32) -> bool {
        self.parent_main_axis(idx).is_some()
    }

    /// Drops sizes and free positions read from `idx` while it was dirty.
    ///
    /// Such reads may have resolved percentages and fills against a parent
    /// whose size was still unknown. Positions and grow overrides written by
    /// the parent's arrangement are kept.
    pub(crate) fn discard_provisional(&mut self, idx: u32) {
        let in_flow = self.is_in_flow(idx);
        let i = idx as usize;
        for axis in [Axis::Horizontal, Axis::Vertical] {
            self.cache[i].set_measured(axis, None);
            if !in_flow {
                self.cache[i].set_position(axis, None);
            }
        }
        self.state[i].layout_ready = false;
    }

    /// Parent-relative offset of `idx` along `axis`.
    ///
    /// Eligible children of a flex container are placed by the container's
    /// arrangement. Everything else is placed from its own inputs.
    pub(crate) fn measure_position(&mut self, idx: u32, axis: Axis) -> f64 {
        let i = idx as usize;
        if let Some(pos) = self.cache[i].position(axis) {
            return pos;
        }

        let parent = self.parent[i];
        if self.is_in_flow(idx) {
            // The child was invalidated after the parent arranged, so the
            // arrangement has to run again.
            self.state[parent as usize].layout_ready = false;
            self.arrange(parent);
            if let Some(pos) = self.cache[i].position(axis) {
                return pos;
            }
        }

        let (padding_start, parent_inner) = if parent == INVALID {
            (0.0, 0.0)
        } else {
            (
                self.style[parent as usize].padding_start(axis),
                self.inner_size(parent, axis),
            )
        };
        let own = self.measure(idx, axis);
        let style = &self.style[i];
        let anchor = component(style.anchor, axis);
        let origin = component(style.origin, axis);
        let margin_start = style.margin_start(axis);
        let declared = self.declared_position(idx, axis);
        let pos = padding_start + margin_start + declared + anchor * parent_inner - origin * own;
        self.cache[i].set_position(axis, Some(pos));
        pos
    }

    /// Declared offset of `idx` along `axis`, evaluating closures.
    pub(crate) fn declared_position(&self, idx: u32, axis: Axis) -> f64 {
        match self.style[idx as usize].position(axis) {
            Position::Fixed(v) => *v,
            Position::Computed(f) => f(NodeRef::new(self, idx)),
        }
    }

    /// Declared size of `idx` along `axis`, or `None` when it must be derived.
    fn declared_size(&self, idx: u32, axis: Axis) -> Option<f64> {
        match self.style[idx as usize].size(axis) {
            Size::Auto => None,
            Size::Fixed(v) => Some(*v),
            Size::Percent(p) => {
                let parent = self.parent[idx as usize];
                if parent == INVALID {
                    return None;
                }
                self.ready_inner_size(parent, axis).map(|inner| p / 100.0 * inner)
            }
            Size::Computed(f) => f(NodeRef::new(self, idx)),
        }
    }

    /// Size of `idx` along `axis` derived from content or children.
    fn derive_size(&mut self, idx: u32, axis: Axis) -> f64 {
        let i = idx as usize;
        match self.style[i].flex_mode.main_axis() {
            None => {
                if self.style[i].flex_grow > 0.0 && self.parent_main_axis(idx) == Some(axis) {
                    0.0
                } else {
                    self.content_size(idx, axis)
                }
            }
            Some(main) if main == axis => {
                let mut sum = 0.0;
                for child in self.eligible_children(idx) {
                    sum += self.outer_size(child, axis);
                }
                sum
            }
            Some(_) => {
                // Arrangement may grow children along this axis.
                self.arrange(idx);
                let mut max = 0.0_f64;
                for child in self.eligible_children(idx) {
                    max = max.max(self.outer_size(child, axis));
                }
                max
            }
        }
    }

    /// Main axis of the flow `idx` takes part in, if any.
    fn parent_main_axis(&self, idx: u32) -> Option<Axis> {
        let parent = self.parent[idx as usize];
        if parent == INVALID || !self.is_eligible(idx) {
            return None;
        }
        self.style[parent as usize].flex_mode.main_axis()
    }

    fn content_size(&self, idx: u32, axis: Axis) -> f64 {
        let node = NodeRef::new(self, idx);
        self.behavior[idx as usize]
            .as_deref()
            .map_or(0.0, |behavior| match axis {
                Axis::Horizontal => behavior.content_width(node),
                Axis::Vertical => behavior.content_height(node),
            })
    }

    /// `fill` share of the parent's resolved size.
    fn fill_extent(&self, idx: u32, axis: Axis) -> f64 {
        let fill = component(self.style[idx as usize].fill, axis);
        let parent = self.parent[idx as usize];
        if fill == 0.0 || parent == INVALID {
            return 0.0;
        }
        self.cache[parent as usize]
            .resolved(axis)
            .map_or(0.0, |size| fill * size)
    }
}

#[cfg(test)]
mod tests {
    use alloc::boxed::Box;
    use alloc::rc::Rc;

    use kurbo::{Insets, Vec2};

    use super::*;
    use crate::behavior::Intrinsic;
    use crate::geometry::FlexMode;
    use crate::node::{InsertAt, NodeId, NodeOptions, Style};

    fn sized(store: &mut NodeStore, width: f64, height: f64) -> NodeId {
        store.create_container(NodeOptions::default().with_style(Style {
            width: Size::Fixed(width),
            height: Size::Fixed(height),
            ..Style::default()
        }))
    }

    #[test]
    fn fixed_size_adds_padding() {
        let mut store = NodeStore::new();
        let id = sized(&mut store, 100.0, 50.0);
        store.set_padding(id, Insets::new(5.0, 1.0, 5.0, 1.0));
        assert_eq!(store.width(id), 110.0);
        assert_eq!(store.height(id), 52.0);
        assert_eq!(store.inner_width(id), 100.0);
    }

    #[test]
    fn zero_size_bypasses_padding_and_fill() {
        let mut store = NodeStore::new();
        let parent = sized(&mut store, 200.0, 200.0);
        let child = sized(&mut store, 0.0, 10.0);
        store.set_padding(child, Insets::uniform(8.0));
        store.set_fill(child, Vec2::new(0.5, 0.0));
        store.insert(parent, child, InsertAt::End).unwrap();
        let _ = store.update(parent);
        assert_eq!(store.width(child), 0.0);
        assert_eq!(store.height(child), 26.0);
    }

    #[test]
    fn auto_size_uses_content() {
        let mut store = NodeStore::new();
        let id = store.create_node("image", Box::new(Intrinsic::new(32.0, 24.0)), NodeOptions::default());
        store.set_padding(id, Insets::uniform(2.0));
        assert_eq!(store.width(id), 36.0);
        assert_eq!(store.height(id), 28.0);
    }

    #[test]
    fn fill_adds_parent_fraction() {
        let mut store = NodeStore::new();
        let parent = sized(&mut store, 200.0, 100.0);
        let child = sized(&mut store, 10.0, 10.0);
        store.set_fill(child, Vec2::new(0.5, 1.0));
        store.insert(parent, child, InsertAt::End).unwrap();
        let _ = store.update(parent);
        assert_eq!(store.width(child), 110.0);
        assert_eq!(store.height(child), 110.0);
    }

    #[test]
    fn percent_reads_parent_inner_size() {
        let mut store = NodeStore::new();
        let parent = sized(&mut store, 200.0, 100.0);
        store.set_padding(parent, Insets::uniform(10.0));
        let child = store.create_container(NodeOptions::default());
        store.set_width(child, Size::parse("50%").unwrap());
        store.insert(parent, child, InsertAt::End).unwrap();
        let _ = store.update(parent);
        // Parent inner width is 200 (declared size excludes padding).
        assert_eq!(store.width(child), 100.0);
    }

    #[test]
    fn percent_read_before_update_resolves_on_update() {
        let mut store = NodeStore::new();
        let parent = sized(&mut store, 200.0, 100.0);
        let child = store.create_container(NodeOptions::default());
        store.set_width(child, Size::Percent(50.0));
        store.insert(parent, child, InsertAt::End).unwrap();

        // The parent is unresolved, so this falls back to content.
        assert_eq!(store.width(child), 0.0);
        let _ = store.update(parent);
        assert!(!store.is_dirty(child));
        assert_eq!(store.width(child), 100.0);
    }

    #[test]
    fn fill_read_before_update_resolves_on_update() {
        let mut store = NodeStore::new();
        let parent = sized(&mut store, 200.0, 100.0);
        let child = sized(&mut store, 10.0, 10.0);
        store.set_fill(child, Vec2::new(0.5, 0.0));
        store.insert(parent, child, InsertAt::End).unwrap();

        assert_eq!(store.width(child), 10.0);
        let _ = store.update(parent);
        assert_eq!(store.width(child), 110.0);
        let _ = store.update(parent);
        assert_eq!(store.width(child), 110.0);
    }

    #[test]
    fn early_reads_do_not_skew_flex_placement() {
        let mut store = NodeStore::new();
        let row = sized(&mut store, 200.0, 20.0);
        store.set_flex_mode(row, FlexMode::Horizontal);
        let half = store.create_container(NodeOptions::default());
        store.set_width(half, Size::Percent(50.0));
        let next = sized(&mut store, 30.0, 20.0);
        store.insert(row, half, InsertAt::End).unwrap();
        store.insert(row, next, InsertAt::End).unwrap();

        assert_eq!(store.width(half), 0.0);
        assert_eq!(store.left(next), 0.0);
        let _ = store.update(row);
        assert_eq!(store.width(half), 100.0);
        assert_eq!(store.left(next), 100.0);
    }

    #[test]
    fn percent_without_parent_falls_back_to_content() {
        let mut store = NodeStore::new();
        let id = store.create_node("icon", Box::new(Intrinsic::new(16.0, 16.0)), NodeOptions::default());
        store.set_width(id, Size::Percent(50.0));
        assert_eq!(store.width(id), 16.0);
    }

    #[test]
    fn computed_size_sees_node() {
        let mut store = NodeStore::new();
        let id = store.create_container(NodeOptions::named("wide"));
        let f: crate::geometry::SizeFn =
            Rc::new(|node: NodeRef<'_>| node.name().map(|name| name.len() as f64 * 10.0));
        store.set_width(id, Size::Computed(f));
        assert_eq!(store.width(id), 40.0);
    }

    #[test]
    fn horizontal_container_sums_children_widths() {
        let mut store = NodeStore::new();
        let row = store.create_container(NodeOptions::default());
        store.set_flex_mode(row, FlexMode::Horizontal);
        store.set_padding(row, Insets::new(3.0, 0.0, 3.0, 0.0));
        let a = sized(&mut store, 40.0, 10.0);
        let b = sized(&mut store, 60.0, 30.0);
        store.set_margin(b, Insets::new(2.0, 0.0, 2.0, 0.0));
        store.insert(row, a, InsertAt::End).unwrap();
        store.insert(row, b, InsertAt::End).unwrap();

        assert_eq!(store.width(row), 40.0 + 64.0 + 6.0);
        assert_eq!(store.height(row), 30.0);
    }

    #[test]
    fn ignored_and_disabled_children_do_not_count() {
        let mut store = NodeStore::new();
        let row = store.create_container(NodeOptions::default());
        store.set_flex_mode(row, FlexMode::Horizontal);
        let a = sized(&mut store, 40.0, 10.0);
        let b = sized(&mut store, 60.0, 10.0);
        let c = sized(&mut store, 80.0, 10.0);
        for id in [a, b, c] {
            store.insert(row, id, InsertAt::End).unwrap();
        }
        store.set_ignore_layout(b, true);
        store.set_enabled(c, false);
        assert_eq!(store.width(row), 40.0);
    }

    #[test]
    fn free_position_uses_anchor_and_origin() {
        let mut store = NodeStore::new();
        let parent = sized(&mut store, 200.0, 100.0);
        store.set_padding(parent, Insets::new(10.0, 0.0, 10.0, 0.0));
        let child = sized(&mut store, 20.0, 20.0);
        store.set_anchor(child, Vec2::new(0.5, 0.5));
        store.set_origin(child, Vec2::new(0.5, 0.5));
        store.set_left(child, 1.0);
        store.insert(parent, child, InsertAt::End).unwrap();
        let _ = store.update(parent);
        // 10 padding + 1 declared + 100 anchor - 10 origin.
        assert_eq!(store.left(child), 101.0);
        assert_eq!(store.top(child), 40.0);
    }
}
