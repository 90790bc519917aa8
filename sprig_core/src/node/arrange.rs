// Copyright 2026 the Sprig Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Flex arrangement: grow distribution and alignment.
//!
//! Arrangement runs at most once per validation of a flex container, guarded
//! by the container's `layout_ready` flag. Along the main axis:
//!
//! 1. The *grow count* is the sum of eligible children's grow weights and the
//!    *grow pool* is the container's inner size minus the sum of eligible
//!    children's outer sizes before growth.
//! 2. Placement starts at the container's leading padding. With nothing to
//!    grow, the start is shifted by the container's alignment of the pool.
//! 3. Every growing child receives `floor(pool / count * weight)`, except the
//!    last one, which receives whatever is left of the pool. The sum of the
//!    grown sizes therefore matches the inner size exactly, also when the
//!    pool is negative and children shrink.
//!
//! `layout_ready` is set before the cross-axis alignment pass, so measuring
//! the container's own cross size from there does not arrange again.

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _;

use super::store::NodeStore;
use super::style::{Cache, Validation};
use super::traverse::subtree;
use crate::geometry::{Align, Axis};

impl NodeStore {
    /// Places the eligible children of a flex container.
    pub(crate) fn arrange(&mut self, idx: u32) {
        let i = idx as usize;
        let Some(main) = self.style[i].flex_mode.main_axis() else {
            return;
        };
        if self.state[i].layout_ready {
            return;
        }
        let cross = main.cross();
        let children = self.eligible_children(idx);

        let inner_main = self.inner_size(idx, main);
        let mut grow_count = 0.0;
        let mut used = 0.0;
        for &child in &children {
            let grow = self.style[child as usize].flex_grow;
            if grow > 0.0 {
                grow_count += grow;
            }
            used += self.measure_base(child, main) + self.style[child as usize].margin_sum(main);
        }
        let pool = inner_main - used;
        let factor = if grow_count > 0.0 { pool / grow_count } else { 0.0 };

        let mut offset = self.style[i].padding_start(main);
        if grow_count == 0.0 {
            offset += self.style[i].align(main).offset(pool);
        }
        let cross_start = self.style[i].padding_start(cross);
        let last_grower = children
            .iter()
            .rposition(|&c| self.style[c as usize].flex_grow > 0.0);

        let mut remaining = pool;
        for (n, &child) in children.iter().enumerate() {
            let c = child as usize;
            let grow = self.style[c].flex_grow;
            if grow > 0.0 {
                let amount = if Some(n) == last_grower {
                    remaining
                } else {
                    (factor * grow).floor()
                };
                remaining -= amount;
                let grown = self.measure_base(child, main) + amount;
                self.apply_growth(child, main, grown);
            } else {
                self.touch(child);
            }

            let main_pos =
                offset + self.style[c].margin_start(main) + self.declared_position(child, main);
            let cross_pos = cross_start
                + self.style[c].margin_start(cross)
                + self.declared_position(child, cross);
            self.cache[c].set_position(main, Some(main_pos));
            self.cache[c].set_position(cross, Some(cross_pos));
            offset += self.outer_size(child, main);
        }

        self.state[i].layout_ready = true;

        let align = self.style[i].align(cross);
        if align != Align::Start {
            let inner_cross = self.inner_size(idx, cross);
            for &child in &children {
                let slack = inner_cross - self.outer_size(child, cross);
                let cache = &mut self.cache[child as usize];
                if let Some(pos) = cache.position(cross) {
                    cache.set_position(cross, Some(pos + align.offset(slack)));
                }
            }
        }

        #[cfg(feature = "trace")]
        self.arrange_log.push(crate::trace::ArrangeEvent {
            node: idx,
            axis: main,
            children: children.len(),
            grow_count,
            pool,
            factor,
        });
    }

    /// Writes a grow override for `child` along `axis`.
    ///
    /// When the size actually changes, everything below `child` is
    /// invalidated, since fills, percentages, and anchors read it.
    fn apply_growth(&mut self, child: u32, axis: Axis, size: f64) {
        let c = child as usize;
        if self.cache[c].grown(axis) != Some(size) {
            for node in subtree(self, child).into_iter().skip(1) {
                self.cache[node as usize] = Cache::default();
                self.state[node as usize] = Validation::default();
            }
        }
        self.cache[c].set_grown(axis, Some(size));
        self.cache[c].set_measured(axis.cross(), None);
        self.touch(child);
    }

    /// Flags a child as needing validation without discarding the geometry
    /// its parent just assigned.
    fn touch(&mut self, child: u32) {
        let state = &mut self.state[child as usize];
        state.dirty = true;
        state.layout_ready = false;
    }
}

#[cfg(test)]
mod tests {
    use kurbo::Insets;

    use crate::geometry::{Align, FlexMode, Size};
    use crate::node::{InsertAt, NodeId, NodeOptions, NodeStore, Style};

    fn row(store: &mut NodeStore, width: f64) -> NodeId {
        store.create_container(NodeOptions::default().with_style(Style {
            width: Size::Fixed(width),
            height: Size::Fixed(50.0),
            flex_mode: FlexMode::Horizontal,
            ..Style::default()
        }))
    }

    fn child(store: &mut NodeStore, parent: NodeId, width: Size, grow: f64) -> NodeId {
        let id = store.create_container(NodeOptions::default().with_style(Style {
            width,
            height: Size::Fixed(10.0),
            flex_grow: grow,
            ..Style::default()
        }));
        store.insert(parent, id, InsertAt::End).unwrap();
        id
    }

    #[test]
    fn grower_takes_leftover_space() {
        let mut store = NodeStore::new();
        let parent = row(&mut store, 300.0);
        let a = child(&mut store, parent, Size::Fixed(100.0), 0.0);
        let b = child(&mut store, parent, Size::Auto, 1.0);
        let _ = store.update(parent);

        assert_eq!((store.left(a), store.width(a)), (0.0, 100.0));
        assert_eq!((store.left(b), store.width(b)), (100.0, 200.0));
    }

    #[test]
    fn remainder_goes_to_last_grower() {
        let mut store = NodeStore::new();
        let parent = row(&mut store, 301.0);
        let a = child(&mut store, parent, Size::Auto, 1.0);
        let b = child(&mut store, parent, Size::Auto, 1.0);
        let _ = store.update(parent);

        assert_eq!(store.width(a), 150.0);
        assert_eq!(store.width(b), 151.0);
        assert_eq!(store.left(b), 150.0);
    }

    #[test]
    fn weighted_growth_sums_exactly() {
        let mut store = NodeStore::new();
        let parent = row(&mut store, 100.0);
        store.set_padding(parent, Insets::new(3.0, 0.0, 4.0, 0.0));
        let kids = [
            child(&mut store, parent, Size::Fixed(7.0), 1.0),
            child(&mut store, parent, Size::Auto, 2.0),
            child(&mut store, parent, Size::Auto, 3.0),
        ];
        store.set_margin(kids[1], Insets::new(1.0, 0.0, 2.0, 0.0));
        let _ = store.update(parent);

        let total: f64 = kids.iter().map(|&k| store.outer_width(k)).sum();
        assert_eq!(total, 100.0, "grown children fill the inner width");
        assert_eq!(store.left(kids[0]), 3.0);
    }

    #[test]
    fn negative_pool_shrinks_growers() {
        let mut store = NodeStore::new();
        let parent = row(&mut store, 100.0);
        let a = child(&mut store, parent, Size::Fixed(80.0), 1.0);
        let b = child(&mut store, parent, Size::Fixed(41.0), 1.0);
        let _ = store.update(parent);

        // Pool is -21: the first grower shrinks by floor(-10.5) = -11.
        assert_eq!(store.width(a), 69.0);
        assert_eq!(store.width(b), 31.0);
    }

    #[test]
    fn alignment_consumes_pool_without_growers() {
        let mut store = NodeStore::new();
        let parent = row(&mut store, 200.0);
        store.set_align(parent, Align::Center, Align::End);
        let a = child(&mut store, parent, Size::Fixed(50.0), 0.0);
        let b = child(&mut store, parent, Size::Fixed(50.0), 0.0);
        let _ = store.update(parent);

        assert_eq!(store.left(a), 50.0);
        assert_eq!(store.left(b), 100.0);
        assert_eq!(store.top(a), 40.0, "end-aligned on the cross axis");
    }

    #[test]
    fn alignment_ignored_when_children_grow() {
        let mut store = NodeStore::new();
        let parent = row(&mut store, 200.0);
        store.set_align(parent, Align::End, Align::Start);
        let a = child(&mut store, parent, Size::Fixed(50.0), 0.0);
        let b = child(&mut store, parent, Size::Auto, 1.0);
        let _ = store.update(parent);

        assert_eq!(store.left(a), 0.0);
        assert_eq!(store.width(b), 150.0);
    }

    #[test]
    fn positions_include_margin_and_declared_offset() {
        let mut store = NodeStore::new();
        let parent = row(&mut store, 200.0);
        store.set_padding(parent, Insets::new(5.0, 2.0, 5.0, 2.0));
        let a = child(&mut store, parent, Size::Fixed(20.0), 0.0);
        let b = child(&mut store, parent, Size::Fixed(20.0), 0.0);
        store.set_margin(a, Insets::new(1.0, 3.0, 4.0, 0.0));
        store.set_left(b, 7.0);
        store.set_top(b, 1.0);
        let _ = store.update(parent);

        assert_eq!((store.left(a), store.top(a)), (6.0, 5.0));
        // 5 padding + 25 outer width of `a` + 7 declared.
        assert_eq!((store.left(b), store.top(b)), (37.0, 3.0));
    }

    #[test]
    fn ignored_child_is_placed_freely() {
        let mut store = NodeStore::new();
        let parent = row(&mut store, 200.0);
        let a = child(&mut store, parent, Size::Fixed(50.0), 0.0);
        let overlay = child(&mut store, parent, Size::Fixed(10.0), 0.0);
        store.set_ignore_layout(overlay, true);
        store.set_left(overlay, 190.0);
        let b = child(&mut store, parent, Size::Fixed(50.0), 0.0);
        let _ = store.update(parent);

        assert_eq!(store.left(a), 0.0);
        assert_eq!(store.left(overlay), 190.0);
        assert_eq!(store.left(b), 50.0);
    }

    #[test]
    fn vertical_container_width_follows_grown_children() {
        let mut store = NodeStore::new();
        let column = store.create_container(NodeOptions::default().with_style(Style {
            height: Size::Fixed(100.0),
            flex_mode: FlexMode::Vertical,
            padding: Insets::uniform(2.0),
            ..Style::default()
        }));
        let a = store.create_container(NodeOptions::default().with_style(Style {
            width: Size::Fixed(30.0),
            height: Size::Fixed(20.0),
            ..Style::default()
        }));
        let b = store.create_container(NodeOptions::default().with_style(Style {
            width: Size::Fixed(45.0),
            flex_grow: 1.0,
            ..Style::default()
        }));
        store.insert(column, a, InsertAt::End).unwrap();
        store.insert(column, b, InsertAt::End).unwrap();
        let _ = store.update(column);

        assert_eq!(store.height(b), 80.0);
        assert_eq!(store.top(b), 22.0);
        // Widest child plus padding.
        assert_eq!(store.width(column), 49.0);
    }
}
