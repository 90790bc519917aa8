// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Geometry accessors, global bounds, and hit testing.
//!
//! The accessors here measure on demand, so they take `&mut self`. Local
//! geometry is relative to the parent's top-left corner. Global geometry
//! composes ancestor offsets and scales: a node's scale applies to its own
//! size and to the offsets of its descendants.

use alloc::vec::Vec;

use kurbo::{Point, Rect, Vec2};

use super::id::NodeId;
use super::store::NodeStore;
use crate::geometry::Axis;

impl NodeStore {
    /// Resolved width, including padding.
    pub fn width(&mut self, id: NodeId) -> f64 {
        self.validate(id);
        self.measure(id.idx, Axis::Horizontal)
    }

    /// Resolved height, including padding.
    pub fn height(&mut self, id: NodeId) -> f64 {
        self.validate(id);
        self.measure(id.idx, Axis::Vertical)
    }

    /// Resolved width plus horizontal margin.
    pub fn outer_width(&mut self, id: NodeId) -> f64 {
        self.validate(id);
        self.outer_size(id.idx, Axis::Horizontal)
    }

    /// Resolved height plus vertical margin.
    pub fn outer_height(&mut self, id: NodeId) -> f64 {
        self.validate(id);
        self.outer_size(id.idx, Axis::Vertical)
    }

    /// Resolved width minus horizontal padding.
    pub fn inner_width(&mut self, id: NodeId) -> f64 {
        self.validate(id);
        self.inner_size(id.idx, Axis::Horizontal)
    }

    /// Resolved height minus vertical padding.
    pub fn inner_height(&mut self, id: NodeId) -> f64 {
        self.validate(id);
        self.inner_size(id.idx, Axis::Vertical)
    }

    /// Offset of the left edge from the parent's left edge.
    pub fn left(&mut self, id: NodeId) -> f64 {
        self.validate(id);
        self.measure_position(id.idx, Axis::Horizontal)
    }

    /// Offset of the top edge from the parent's top edge.
    pub fn top(&mut self, id: NodeId) -> f64 {
        self.validate(id);
        self.measure_position(id.idx, Axis::Vertical)
    }

    /// Parent-relative rectangle.
    pub fn local_rect(&mut self, id: NodeId) -> Rect {
        let origin = Point::new(self.left(id), self.top(id));
        Rect::from_origin_size(origin, (self.width(id), self.height(id)))
    }

    /// Product of the node's scale and all of its ancestors' scales.
    #[must_use]
    pub fn global_scale(&self, id: NodeId) -> Vec2 {
        self.validate(id);
        self.ancestry(id.idx).fold(Vec2::new(1.0, 1.0), |acc, idx| {
            let scale = self.style[idx as usize].scale;
            Vec2::new(acc.x * scale.x, acc.y * scale.y)
        })
    }

    /// Bounding box in root coordinates.
    pub fn global_rect(&mut self, id: NodeId) -> Rect {
        let local = self.local_rect(id);
        let scale = self.global_scale(id);
        let origin = match self.parent(id) {
            Some(parent) => {
                let parent_origin = self.global_rect(parent).origin();
                let parent_scale = self.global_scale(parent);
                Point::new(
                    parent_origin.x + local.x0 * parent_scale.x,
                    parent_origin.y + local.y0 * parent_scale.y,
                )
            }
            None => local.origin(),
        };
        Rect::from_origin_size(origin, (local.width() * scale.x, local.height() * scale.y))
    }

    /// Horizontal extent `(left, right)` in root coordinates.
    pub fn bounds_x(&mut self, id: NodeId) -> (f64, f64) {
        let rect = self.global_rect(id);
        (rect.x0, rect.x1)
    }

    /// Vertical extent `(top, bottom)` in root coordinates.
    pub fn bounds_y(&mut self, id: NodeId) -> (f64, f64) {
        let rect = self.global_rect(id);
        (rect.y0, rect.y1)
    }

    /// Finds the deepest enabled node under `root` whose global rectangle
    /// contains `point`.
    ///
    /// Later children are tested first, since they are drawn on top. Children
    /// may overflow their parent and are tested regardless of it.
    pub fn hit_test(&mut self, root: NodeId, point: Point) -> Option<NodeId> {
        if !self.is_enabled(root) {
            return None;
        }
        let children: Vec<NodeId> = self.children(root).collect();
        for &child in children.iter().rev() {
            if let Some(hit) = self.hit_test(child, point) {
                return Some(hit);
            }
        }
        self.global_rect(root).contains(point).then_some(root)
    }
}

#[cfg(test)]
mod tests {
    use kurbo::{Insets, Point, Rect, Vec2};

    use crate::geometry::{FlexMode, Size};
    use crate::node::{InsertAt, NodeId, NodeOptions, NodeStore, Style};

    fn boxed(store: &mut NodeStore, parent: Option<NodeId>, x: f64, y: f64, w: f64, h: f64) -> NodeId {
        let id = store.create_container(NodeOptions::default().with_style(Style {
            left: x.into(),
            top: y.into(),
            width: Size::Fixed(w),
            height: Size::Fixed(h),
            ..Style::default()
        }));
        if let Some(parent) = parent {
            store.insert(parent, id, InsertAt::End).unwrap();
        }
        id
    }

    #[test]
    fn outer_and_inner_sizes() {
        let mut store = NodeStore::new();
        let id = boxed(&mut store, None, 0.0, 0.0, 50.0, 20.0);
        store.set_padding(id, Insets::uniform(5.0));
        store.set_margin(id, Insets::new(1.0, 2.0, 3.0, 4.0));
        assert_eq!(store.width(id), 60.0);
        assert_eq!(store.outer_width(id), 64.0);
        assert_eq!(store.inner_width(id), 50.0);
        assert_eq!(store.outer_height(id), 36.0);
        assert_eq!(store.inner_height(id), 20.0);
    }

    #[test]
    fn global_rect_composes_offsets() {
        let mut store = NodeStore::new();
        let root = boxed(&mut store, None, 10.0, 10.0, 200.0, 200.0);
        let mid = boxed(&mut store, Some(root), 20.0, 30.0, 100.0, 100.0);
        let leaf = boxed(&mut store, Some(mid), 5.0, 5.0, 10.0, 10.0);
        let _ = store.update(root);

        assert_eq!(store.global_rect(leaf), Rect::new(35.0, 45.0, 45.0, 55.0));
        assert_eq!(store.bounds_x(mid), (30.0, 130.0));
        assert_eq!(store.bounds_y(mid), (40.0, 140.0));
    }

    #[test]
    fn scale_composes_down_the_tree() {
        let mut store = NodeStore::new();
        let root = boxed(&mut store, None, 0.0, 0.0, 100.0, 100.0);
        store.set_scale(root, Vec2::new(2.0, 2.0));
        let child = boxed(&mut store, Some(root), 10.0, 0.0, 10.0, 10.0);
        store.set_scale(child, Vec2::new(0.5, 1.0));

        assert_eq!(store.global_scale(child), Vec2::new(1.0, 2.0));
        assert_eq!(store.global_rect(root), Rect::new(0.0, 0.0, 200.0, 200.0));
        assert_eq!(store.global_rect(child), Rect::new(20.0, 0.0, 30.0, 20.0));
    }

    #[test]
    fn hit_test_prefers_deepest_and_topmost() {
        let mut store = NodeStore::new();
        let root = boxed(&mut store, None, 0.0, 0.0, 100.0, 100.0);
        let under = boxed(&mut store, Some(root), 0.0, 0.0, 50.0, 50.0);
        let over = boxed(&mut store, Some(root), 25.0, 25.0, 50.0, 50.0);
        let _ = store.update(root);

        assert_eq!(store.hit_test(root, Point::new(30.0, 30.0)), Some(over));
        assert_eq!(store.hit_test(root, Point::new(10.0, 10.0)), Some(under));
        assert_eq!(store.hit_test(root, Point::new(90.0, 10.0)), Some(root));
        assert_eq!(store.hit_test(root, Point::new(150.0, 10.0)), None);

        store.set_enabled(over, false);
        assert_eq!(store.hit_test(root, Point::new(30.0, 30.0)), Some(under));
    }

    #[test]
    fn local_rect_follows_flex_placement() {
        let mut store = NodeStore::new();
        let row = boxed(&mut store, None, 0.0, 0.0, 100.0, 20.0);
        store.set_flex_mode(row, FlexMode::Horizontal);
        let a = boxed(&mut store, Some(row), 0.0, 0.0, 30.0, 20.0);
        let b = boxed(&mut store, Some(row), 0.0, 0.0, 30.0, 20.0);
        let _ = store.update(row);
        assert_eq!(store.local_rect(b), Rect::new(30.0, 0.0, 60.0, 20.0));
        assert_eq!(store.computed_left(a), Some(0.0));
        assert_eq!(store.local_rect_at(b.index()), Some(store.local_rect(b)));
    }
}
