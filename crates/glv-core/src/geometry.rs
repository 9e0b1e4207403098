/// Truncates a coordinate to a whole pixel (toward zero).
#[inline]
pub fn pix(v: f32) -> f32 {
    v.trunc()
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

impl std::ops::Add for Vec2 {
    type Output = Vec2;
    fn add(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl std::ops::Sub for Vec2 {
    type Output = Vec2;
    fn sub(self, rhs: Vec2) -> Vec2 {
        Vec2::new(self.x - rhs.x, self.y - rhs.y)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned rectangle, top-left origin, y pointing down.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    /// Rectangle anchored at the origin.
    pub fn sized(w: f32, h: f32) -> Self {
        Self { x: 0.0, y: 0.0, w, h }
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    pub fn size(&self) -> Size {
        Size {
            width: self.w,
            height: self.h,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0.0 || self.h <= 0.0
    }

    pub fn contains(&self, p: Vec2) -> bool {
        p.x >= self.x && p.x <= self.x + self.w && p.y >= self.y && p.y <= self.y + self.h
    }

    /// Overlapping region of two rectangles.
    ///
    /// Disjoint rectangles produce a degenerate rect (zero width and/or height)
    /// positioned at the clamped corner, never a negative extent.
    pub fn intersection(&self, other: &Rect) -> Rect {
        let x0 = self.x.max(other.x);
        let y0 = self.y.max(other.y);
        let x1 = self.right().min(other.right());
        let y1 = self.bottom().min(other.bottom());
        Rect {
            x: x0,
            y: y0,
            w: (x1 - x0).max(0.0),
            h: (y1 - y0).max(0.0),
        }
    }

    pub fn translated(mut self, by: Vec2) -> Rect {
        self.x += by.x;
        self.y += by.y;
        self
    }

    /// Converts a top-left clip rect into GL scissor arguments `(x, y, w, h)`
    /// with a bottom-left origin on a surface of height `surface_h`.
    ///
    /// The half-pixel offsets keep borders drawn on pixel centers inside the box.
    pub fn to_gl_scissor(&self, surface_h: f32) -> (i32, i32, i32, i32) {
        (
            pix(self.x) as i32,
            pix(surface_h - self.bottom() - 1.499) as i32,
            pix(self.w + 1.0) as i32,
            pix(self.h + 1.499) as i32,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn intersection_of_overlapping_rects() {
        let a = Rect::new(0.0, 0.0, 100.0, 50.0);
        let b = Rect::new(40.0, 20.0, 100.0, 100.0);
        assert_eq!(a.intersection(&b), Rect::new(40.0, 20.0, 60.0, 30.0));
        assert_eq!(b.intersection(&a), a.intersection(&b));
    }

    #[test]
    fn intersection_of_disjoint_rects_is_degenerate() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(20.0, 30.0, 5.0, 5.0);
        let r = a.intersection(&b);
        assert!(r.is_empty());
        assert_eq!(r.w, 0.0);
        assert_eq!(r.h, 0.0);
    }

    #[test]
    fn contains_is_edge_inclusive() {
        let r = Rect::new(10.0, 10.0, 100.0, 50.0);
        assert!(r.contains(Vec2::new(10.0, 10.0)));
        assert!(r.contains(Vec2::new(110.0, 60.0)));
        assert!(!r.contains(Vec2::new(5.0, 30.0)));
        assert!(!r.contains(Vec2::new(50.0, 70.0)));
    }

    #[test]
    fn gl_scissor_flips_y() {
        let r = Rect::new(10.0, 20.0, 30.0, 40.0);
        // bottom = 60, 100 - 60 - 1.499 = 38.501
        assert_eq!(r.to_gl_scissor(100.0), (10, 38, 31, 41));
    }
}
