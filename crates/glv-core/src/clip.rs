use crate::{Rect, Vec2};

/// Initial capacity; deeper trees grow the stack.
const DEFAULT_DEPTH: usize = 16;

/// Effective crop rectangle per traversal level, in surface coordinates.
///
/// Level 0 is the whole surface. Entry `n` is what descendants at level
/// `n + 1` are clipped to.
#[derive(Clone, Debug)]
pub struct ClipStack {
    rects: Vec<Rect>,
}

impl ClipStack {
    pub fn new(surface_w: f32, surface_h: f32) -> Self {
        let mut rects = Vec::with_capacity(DEFAULT_DEPTH);
        rects.push(Rect::sized(surface_w, surface_h));
        Self { rects }
    }

    /// Recomputes the entry at `level` for a view at `abs` of `size`.
    ///
    /// Cropping views intersect their own absolute rect with the parent
    /// level's entry; others inherit it unchanged. `level` 0 is the surface
    /// and is never recomputed.
    pub fn compute(&mut self, level: usize, abs: Vec2, w: f32, h: f32, crop_children: bool) {
        if level == 0 {
            return;
        }
        let parent = self.get(level - 1);
        let entry = if crop_children {
            Rect::new(abs.x, abs.y, w, h).intersection(&parent)
        } else {
            parent
        };
        if level < self.rects.len() {
            self.rects[level] = entry;
        } else {
            // Levels are entered one at a time; pad in case a caller skips.
            self.rects.resize(level, parent);
            self.rects.push(entry);
        }
    }

    /// Entry at `level`, or the deepest computed one beyond it.
    pub fn get(&self, level: usize) -> Rect {
        let last = self.rects.len() - 1;
        self.rects[level.min(last)]
    }

    pub fn surface(&self) -> Rect {
        self.rects[0]
    }

    /// Number of levels ever computed.
    pub fn depth(&self) -> usize {
        self.rects.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inherits_without_crop() {
        let mut c = ClipStack::new(200.0, 100.0);
        c.compute(1, Vec2::new(10.0, 10.0), 50.0, 50.0, false);
        assert_eq!(c.get(1), Rect::sized(200.0, 100.0));
    }

    #[test]
    fn crops_against_parent_entry() {
        let mut c = ClipStack::new(200.0, 100.0);
        c.compute(1, Vec2::new(150.0, 50.0), 100.0, 100.0, true);
        assert_eq!(c.get(1), Rect::new(150.0, 50.0, 50.0, 50.0));
        c.compute(2, Vec2::new(0.0, 0.0), 160.0, 60.0, true);
        assert_eq!(c.get(2), Rect::new(150.0, 50.0, 10.0, 10.0));
    }

    #[test]
    fn grows_past_initial_capacity() {
        let mut c = ClipStack::new(1000.0, 1000.0);
        for level in 1..=40 {
            let l = level as f32;
            c.compute(level, Vec2::new(l, l), 1000.0, 1000.0, true);
        }
        assert_eq!(c.depth(), 41);
        assert_eq!(c.get(40), Rect::new(40.0, 40.0, 960.0, 960.0));
    }
}
