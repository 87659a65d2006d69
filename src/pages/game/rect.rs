/// Axis-aligned float rectangle in playfield units, y growing downward.
/// Accessors mirror the usual top/bottom/center vocabulary of 2D sprite
/// rects so the simulation code reads like the motion it describes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FRect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl FRect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_center(cx: f32, cy: f32, w: f32, h: f32) -> Self {
        Self { x: cx - w / 2.0, y: cy - h / 2.0, w, h }
    }

    pub fn left(&self) -> f32 {
        self.x
    }

    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    pub fn top(&self) -> f32 {
        self.y
    }

    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }

    pub fn centerx(&self) -> f32 {
        self.x + self.w / 2.0
    }

    pub fn centery(&self) -> f32 {
        self.y + self.h / 2.0
    }

    pub fn set_center(&mut self, cx: f32, cy: f32) {
        self.x = cx - self.w / 2.0;
        self.y = cy - self.h / 2.0;
    }

    pub fn set_topleft(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_bottomleft(&mut self, x: f32, y: f32) {
        self.x = x;
        self.y = y - self.h;
    }

    pub fn translate(&mut self, dx: f32, dy: f32) {
        self.x += dx;
        self.y += dy;
    }

    /// Non-strict overlap test: rectangles that merely touch on an edge
    /// count as intersecting.
    pub fn intersects(&self, other: &FRect) -> bool {
        interval_overlaps(self.left(), self.right(), other.left(), other.right())
            && interval_overlaps(self.top(), self.bottom(), other.top(), other.bottom())
    }
}

fn interval_overlaps(l1: f32, r1: f32, l2: f32, r2: f32) -> bool {
    !(r1 < l2 || l1 > r2)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_accessors() {
        let rect = FRect::from_center(15.0, 65.0, 10.0, 7.0);
        assert_eq!(rect.left(), 10.0);
        assert_eq!(rect.right(), 20.0);
        assert_eq!(rect.top(), 61.5);
        assert_eq!(rect.bottom(), 68.5);
        assert_eq!(rect.centerx(), 15.0);
        assert_eq!(rect.centery(), 65.0);
    }

    #[test]
    fn test_anchor_setters() {
        let mut rect = FRect::new(0.0, 0.0, 10.0, 70.0);
        rect.set_bottomleft(100.0, 140.0);
        assert_eq!((rect.x, rect.y), (100.0, 70.0));
        rect.set_topleft(100.0, -40.0);
        assert_eq!((rect.x, rect.y), (100.0, -40.0));
    }

    #[test]
    fn test_overlap() {
        let a = FRect::new(0.0, 0.0, 10.0, 10.0);
        let b = FRect::new(5.0, 5.0, 10.0, 10.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_edge_touch_counts_as_overlap() {
        let a = FRect::new(0.0, 0.0, 10.0, 10.0);
        let right_edge = FRect::new(10.0, 0.0, 10.0, 10.0);
        let bottom_edge = FRect::new(0.0, 10.0, 10.0, 10.0);
        assert!(a.intersects(&right_edge));
        assert!(a.intersects(&bottom_edge));
    }

    #[test]
    fn test_disjoint() {
        let a = FRect::new(0.0, 0.0, 10.0, 10.0);
        let b = FRect::new(10.1, 0.0, 10.0, 10.0);
        let c = FRect::new(0.0, -10.1, 10.0, 10.0);
        assert!(!a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
