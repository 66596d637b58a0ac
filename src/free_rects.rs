//! Free-rectangle store: a conservative decomposition of unused sheet area,
//! maintained by subtracting each placement's gap-inflated exclusion rect.

use crate::geometry::{area, fits, intersects, subtract, Rect};

/// Smallest free rectangle dimension worth keeping as a placement candidate.
pub const DEFAULT_MIN_USEFUL: f64 = 10.0;

/// Ordered collection of maximal free rectangles representing unused sheet area.
#[derive(Clone, Debug)]
pub struct FreeRectStore {
    rects: Vec<Rect>,
    min_useful: f64,
}

impl FreeRectStore {
    /// Builds the initial store for a sheet of `width`×`height` after applying
    /// `edge_margin` on every side. Non-positive usable dimensions yield an
    /// empty store, meaning no placements are possible.
    pub fn new(width: f64, height: f64, edge_margin: f64) -> Self {
        Self::with_min_useful(width, height, edge_margin, DEFAULT_MIN_USEFUL)
    }

    /// As [`FreeRectStore::new`], with an explicit `min_useful` threshold.
    pub fn with_min_useful(width: f64, height: f64, edge_margin: f64, min_useful: f64) -> Self {
        let usable_width = width - 2.0 * edge_margin;
        let usable_height = height - 2.0 * edge_margin;

        let rects = if usable_width > 0.0 && usable_height > 0.0 {
            vec![Rect::new(edge_margin, edge_margin, usable_width, usable_height)]
        } else {
            Vec::new()
        };

        Self { rects, min_useful }
    }

    /// Current free rectangles. Not required to be globally maximal, only
    /// conservative: their union is a subset of the sheet's actual free area.
    pub fn rects(&self) -> &[Rect] {
        &self.rects
    }

    /// Area of the largest remaining free rectangle, or 0.0 if empty.
    pub fn largest_area(&self) -> f64 {
        self.rects.iter().map(area).fold(0.0, f64::max)
    }

    /// Among rects that fit a `w`×`h` rectangle, returns the bottom-left anchor:
    /// minimise `y`, breaking ties by minimising `x` (`find_blf`).
    pub fn find_blf(&self, w: f64, h: f64) -> Option<(f64, f64)> {
        self.rects
            .iter()
            .filter(|r| fits(r, w, h))
            .min_by(|a, b| {
                a.y.partial_cmp(&b.y)
                    .unwrap()
                    .then(a.x.partial_cmp(&b.x).unwrap())
            })
            .map(|r| (r.x, r.y))
    }

    /// Among rects that fit a `w`×`h` rectangle, returns the anchor minimising
    /// the short-side leftover, then by `y` then `x` (`find_best_short_side`,
    /// used by the genetic placer's repair path).
    pub fn find_best_short_side(&self, w: f64, h: f64) -> Option<(f64, f64)> {
        self.rects
            .iter()
            .filter(|r| fits(r, w, h))
            .min_by(|a, b| {
                let short_a = (a.width - w).min(a.height - h);
                let short_b = (b.width - w).min(b.height - h);
                short_a
                    .partial_cmp(&short_b)
                    .unwrap()
                    .then(a.y.partial_cmp(&b.y).unwrap())
                    .then(a.x.partial_cmp(&b.x).unwrap())
            })
            .map(|r| (r.x, r.y))
    }

    /// Applies the insert-placement operation: subtracts the
    /// gap-inflated exclusion rect of the placement `{x, y, w, h}` from every
    /// intersecting free rectangle, then prunes contained and sub-`min_useful`
    /// rectangles.
    pub fn insert_placement(&mut self, x: f64, y: f64, w: f64, h: f64, gap: f64) {
        let exclusion = Rect::new(x, y, w, h).inflate(gap);

        let mut next = Vec::with_capacity(self.rects.len());
        for rect in &self.rects {
            if intersects(rect, &exclusion) {
                next.extend(subtract(rect, &exclusion));
            } else {
                next.push(*rect);
            }
        }
        self.rects = next;

        self.prune_contained();
        self.rects
            .retain(|r| r.width >= self.min_useful && r.height >= self.min_useful);
    }

    fn prune_contained(&mut self) {
        let mut keep = vec![true; self.rects.len()];
        for i in 0..self.rects.len() {
            if !keep[i] {
                continue;
            }
            for j in 0..self.rects.len() {
                if i == j || !keep[j] {
                    continue;
                }
                if self.rects[j].contains(&self.rects[i]) {
                    keep[i] = false;
                    break;
                }
            }
        }

        let mut kept = Vec::with_capacity(self.rects.len());
        for (rect, keep) in self.rects.drain(..).zip(keep) {
            if keep {
                kept.push(rect);
            }
        }
        self.rects = kept;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_store_is_single_margin_inset_rect() {
        let store = FreeRectStore::new(100.0, 200.0, 5.0);
        assert_eq!(store.rects(), &[Rect::new(5.0, 5.0, 90.0, 190.0)]);
    }

    #[test]
    fn negative_usable_area_is_empty() {
        let store = FreeRectStore::new(10.0, 10.0, 6.0);
        assert!(store.rects().is_empty());
        assert!(store.find_blf(1.0, 1.0).is_none());
    }

    #[test]
    fn find_blf_prefers_lowest_y_then_lowest_x() {
        let mut store = FreeRectStore::new(1000.0, 1000.0, 0.0);
        // Carve the store into two candidate rects by placing something in the middle.
        store.insert_placement(400.0, 0.0, 200.0, 1000.0, 0.0);
        let (x, y) = store.find_blf(100.0, 100.0).unwrap();
        assert_eq!((x, y), (0.0, 0.0));
    }

    #[test]
    fn insert_placement_shrinks_store_and_respects_gap() {
        let mut store = FreeRectStore::new(100.0, 100.0, 0.0);
        store.insert_placement(0.0, 0.0, 50.0, 50.0, 10.0);
        // A piece needing the gap-excluded space should no longer fit flush.
        assert!(store.find_blf(50.0, 50.0).is_none());
        let (x, _) = store.find_blf(40.0, 40.0).unwrap();
        assert!(x >= 60.0);
    }

    #[test]
    fn min_useful_prunes_slivers() {
        let mut store = FreeRectStore::with_min_useful(100.0, 100.0, 0.0, 10.0);
        // Leaves a 100x5 sliver above the placement, which is below min_useful.
        store.insert_placement(0.0, 0.0, 100.0, 95.0, 0.0);
        assert!(store.rects().is_empty());
    }

    #[test]
    fn prune_contained_removes_redundant_subset() {
        let mut store = FreeRectStore::new(100.0, 100.0, 0.0);
        store.rects = vec![Rect::new(0.0, 0.0, 100.0, 100.0), Rect::new(10.0, 10.0, 20.0, 20.0)];
        store.prune_contained();
        assert_eq!(store.rects().len(), 1);
        assert_eq!(store.rects()[0], Rect::new(0.0, 0.0, 100.0, 100.0));
    }
}
