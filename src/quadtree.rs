use macroquad::prelude::*;

use crate::config;

/// Region quadtree over the arena, storing tree slots keyed by bounding box.
///
/// A leaf splits into four quadrants once it holds more than
/// `config::NODE_CAPACITY` boxes (down to `config::MAX_DEPTH`). A box that
/// straddles a quadrant boundary stays at the parent node; it is never
/// duplicated into children, so every slot is stored exactly once.
pub struct Quadtree {
    bounds: Rect,
    depth: usize,
    items: Vec<(u32, Rect)>,
    children: Option<Box<[Quadtree; 4]>>,
}

impl Quadtree {
    pub fn new(bounds: Rect) -> Self {
        Self::node(bounds, 0)
    }

    fn node(bounds: Rect, depth: usize) -> Self {
        Self {
            bounds,
            depth,
            items: Vec::new(),
            children: None,
        }
    }

    pub fn bounds(&self) -> Rect {
        self.bounds
    }

    /// Number of boxes stored in this node and all descendants.
    pub fn len(&self) -> usize {
        let mut n = self.items.len();
        if let Some(children) = &self.children {
            for child in children.iter() {
                n += child.len();
            }
        }
        n
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Reset to an empty tree over the same bounds.
    pub fn clear(&mut self) {
        self.items.clear();
        self.children = None;
    }

    pub fn insert(&mut self, slot: u32, bbox: Rect) {
        if let Some(children) = &mut self.children {
            if let Some(quadrant) = quadrant_containing(children, bbox) {
                children[quadrant].insert(slot, bbox);
            } else {
                self.items.push((slot, bbox));
            }
            return;
        }

        self.items.push((slot, bbox));
        if self.items.len() > config::NODE_CAPACITY && self.depth < config::MAX_DEPTH {
            self.subdivide();
        }
    }

    fn subdivide(&mut self) {
        let Rect { x, y, w, h } = self.bounds;
        let (hw, hh) = (w * 0.5, h * 0.5);
        let depth = self.depth + 1;
        let mut children = Box::new([
            Quadtree::node(Rect::new(x, y, hw, hh), depth),
            Quadtree::node(Rect::new(x + hw, y, hw, hh), depth),
            Quadtree::node(Rect::new(x, y + hh, hw, hh), depth),
            Quadtree::node(Rect::new(x + hw, y + hh, hw, hh), depth),
        ]);

        // Push fully-contained boxes down; straddlers stay here.
        let items = std::mem::take(&mut self.items);
        for (slot, bbox) in items {
            if let Some(quadrant) = quadrant_containing(&children, bbox) {
                children[quadrant].insert(slot, bbox);
            } else {
                self.items.push((slot, bbox));
            }
        }
        self.children = Some(children);
    }

    /// Collect the slots of every node whose region intersects `bbox`:
    /// a superset of the exact overlaps, including the query tree itself.
    /// The caller applies the precise circle test.
    pub fn retrieve(&self, bbox: Rect) -> Vec<u32> {
        let mut out = Vec::new();
        self.collect_into(bbox, &mut out);
        out
    }

    fn collect_into(&self, bbox: Rect, out: &mut Vec<u32>) {
        out.extend(self.items.iter().map(|(slot, _)| *slot));
        if let Some(children) = &self.children {
            for child in children.iter() {
                if child.bounds.overlaps(&bbox) {
                    child.collect_into(bbox, out);
                }
            }
        }
    }
}

fn quadrant_containing(children: &[Quadtree; 4], bbox: Rect) -> Option<usize> {
    children.iter().position(|c| contains_rect(c.bounds, bbox))
}

fn contains_rect(outer: Rect, inner: Rect) -> bool {
    inner.x >= outer.x
        && inner.y >= outer.y
        && inner.x + inner.w <= outer.x + outer.w
        && inner.y + inner.h <= outer.y + outer.h
}

#[cfg(test)]
mod tests {
    use super::*;

    fn arena_bounds() -> Rect {
        Rect::new(0.0, 0.0, 800.0, 800.0)
    }

    fn unit_box(x: f32, y: f32) -> Rect {
        Rect::new(x - 1.0, y - 1.0, 2.0, 2.0)
    }

    #[test]
    fn retrieval_includes_the_query_box_itself() {
        let mut qt = Quadtree::new(arena_bounds());
        let bbox = unit_box(100.0, 100.0);
        qt.insert(0, bbox);
        assert_eq!(qt.retrieve(bbox), vec![0]);
    }

    #[test]
    fn every_slot_is_stored_exactly_once_after_subdivision() {
        let mut qt = Quadtree::new(arena_bounds());

        // Enough boxes to force a split, one of them straddling the center.
        let straddler = Rect::new(398.0, 398.0, 4.0, 4.0);
        qt.insert(0, straddler);
        for i in 1..32 {
            qt.insert(i, unit_box(20.0 + 10.0 * i as f32, 20.0));
        }
        assert_eq!(qt.len(), 32);

        // A query covering everything sees each slot once.
        let mut all = qt.retrieve(arena_bounds());
        all.sort_unstable();
        all.dedup();
        assert_eq!(all.len(), 32);
    }

    #[test]
    fn far_queries_are_pruned_after_subdivision() {
        let mut qt = Quadtree::new(arena_bounds());
        for i in 0..32 {
            qt.insert(i, unit_box(30.0 + 5.0 * i as f32, 30.0));
        }
        // All boxes cluster in the north-west; a south-east query should not
        // walk the whole population.
        let far = qt.retrieve(unit_box(700.0, 700.0));
        assert!(far.len() < 32);
    }

    #[test]
    fn straddlers_remain_retrievable_from_either_side() {
        let mut qt = Quadtree::new(arena_bounds());
        let straddler = Rect::new(396.0, 100.0, 8.0, 8.0);
        qt.insert(0, straddler);
        for i in 1..=config::NODE_CAPACITY as u32 + 4 {
            qt.insert(i, unit_box(50.0 + 6.0 * i as f32, 600.0));
        }

        // Queries on both sides of the vertical midline intersect the root,
        // where the straddler lives.
        assert!(qt.retrieve(unit_box(390.0, 104.0)).contains(&0));
        assert!(qt.retrieve(unit_box(410.0, 104.0)).contains(&0));
    }

    #[test]
    fn coincident_boxes_stay_correct_past_the_depth_limit() {
        let mut qt = Quadtree::new(arena_bounds());
        let bbox = unit_box(123.0, 456.0);
        for i in 0..100 {
            qt.insert(i, bbox);
        }
        assert_eq!(qt.len(), 100);
        assert_eq!(qt.retrieve(bbox).len(), 100);
    }

    #[test]
    fn clear_empties_but_keeps_bounds() {
        let mut qt = Quadtree::new(arena_bounds());
        for i in 0..20 {
            qt.insert(i, unit_box(40.0 * i as f32 + 10.0, 200.0));
        }
        qt.clear();
        assert!(qt.is_empty());
        assert_eq!(qt.bounds(), arena_bounds());
        assert!(qt.retrieve(arena_bounds()).is_empty());
    }
}
