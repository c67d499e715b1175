//! Axis-aligned geometry shared by collision, vision and hit-scan resolution.

use glam::Vec2;

/// Minimum number of points a vision polygon needs to enclose any area.
pub const MIN_VISIBLE_POINTS: usize = 3;

/// Axis-aligned rectangle expressed in world units.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Rect {
    x: f32,
    y: f32,
    width: f32,
    height: f32,
}

impl Rect {
    /// Creates a rectangle anchored at its upper-left corner.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates a rectangle from an upper-left origin and a size vector.
    #[must_use]
    pub fn from_origin_and_size(origin: Vec2, size: Vec2) -> Self {
        Self::new(origin.x, origin.y, size.x, size.y)
    }

    /// Left edge of the rectangle.
    #[must_use]
    pub const fn x(&self) -> f32 {
        self.x
    }

    /// Top edge of the rectangle.
    #[must_use]
    pub const fn y(&self) -> f32 {
        self.y
    }

    /// Horizontal extent of the rectangle.
    #[must_use]
    pub const fn width(&self) -> f32 {
        self.width
    }

    /// Vertical extent of the rectangle.
    #[must_use]
    pub const fn height(&self) -> f32 {
        self.height
    }

    /// Upper-left corner of the rectangle.
    #[must_use]
    pub fn origin(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }

    /// Width and height packed into a vector.
    #[must_use]
    pub fn size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Right edge of the rectangle.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge of the rectangle.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Geometric centre of the rectangle.
    #[must_use]
    pub fn center(&self) -> Vec2 {
        Vec2::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    /// Returns a copy of the rectangle moved to the provided origin.
    #[must_use]
    pub fn with_origin(self, origin: Vec2) -> Self {
        Self {
            x: origin.x,
            y: origin.y,
            ..self
        }
    }

    /// Returns a copy of the rectangle whose centre sits at `center`.
    #[must_use]
    pub fn centered_on(self, center: Vec2) -> Self {
        self.with_origin(center - self.size() * 0.5)
    }

    /// Reports whether two rectangles overlap.
    ///
    /// Rectangles that merely share an edge do not overlap, so an entity resting
    /// flush against a wall is not considered colliding with it.
    #[must_use]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }

    /// Reports whether the point lies inside the rectangle.
    ///
    /// The left and top edges are inclusive, the right and bottom edges are not.
    #[must_use]
    pub fn contains_point(&self, point: Vec2) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }
}

/// Straight line segment between two world points.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Segment {
    start: Vec2,
    end: Vec2,
}

impl Segment {
    /// Creates a segment running from `start` to `end`.
    #[must_use]
    pub const fn new(start: Vec2, end: Vec2) -> Self {
        Self { start, end }
    }

    /// Point the segment starts from.
    #[must_use]
    pub const fn start(&self) -> Vec2 {
        self.start
    }

    /// Point the segment ends at.
    #[must_use]
    pub const fn end(&self) -> Vec2 {
        self.end
    }

    /// Euclidean length of the segment.
    #[must_use]
    pub fn length(&self) -> f32 {
        self.start.distance(self.end)
    }

    /// Distance along the segment at which it first enters `rect`.
    ///
    /// Segments starting inside the rectangle enter it at distance zero. Returns
    /// `None` when the segment never touches the rectangle.
    #[must_use]
    pub fn entry_distance(&self, rect: &Rect) -> Option<f32> {
        let delta = self.end - self.start;
        let mut enter = 0.0_f32;
        let mut exit = 1.0_f32;

        let slabs = [
            (-delta.x, self.start.x - rect.x()),
            (delta.x, rect.right() - self.start.x),
            (-delta.y, self.start.y - rect.y()),
            (delta.y, rect.bottom() - self.start.y),
        ];

        for (direction, offset) in slabs {
            if direction == 0.0 {
                if offset < 0.0 {
                    return None;
                }
                continue;
            }

            let t = offset / direction;
            if direction < 0.0 {
                if t > exit {
                    return None;
                }
                enter = enter.max(t);
            } else {
                if t < enter {
                    return None;
                }
                exit = exit.min(t);
            }
        }

        Some(enter * delta.length())
    }
}

/// Fan-shaped visible area produced by the raycaster.
///
/// The first point is the aperture apex, the remaining points are ray endpoints
/// in increasing angle order.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct VisionPolygon {
    points: Vec<Vec2>,
}

impl VisionPolygon {
    /// Wraps an ordered point list produced by a ray fan.
    #[must_use]
    pub fn from_points(points: Vec<Vec2>) -> Self {
        Self { points }
    }

    /// All polygon points, apex first.
    #[must_use]
    pub fn points(&self) -> &[Vec2] {
        &self.points
    }

    /// Aperture apex, if the polygon holds any point.
    #[must_use]
    pub fn apex(&self) -> Option<Vec2> {
        self.points.first().copied()
    }

    /// Ray endpoints following the apex.
    #[must_use]
    pub fn ray_ends(&self) -> &[Vec2] {
        self.points.get(1..).unwrap_or(&[])
    }

    /// Number of points stored in the polygon.
    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Reports whether the polygon holds no points at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Reports whether the polygon encloses any area worth drawing.
    #[must_use]
    pub fn is_visible(&self) -> bool {
        self.points.len() >= MIN_VISIBLE_POINTS
    }

    /// Even-odd containment test used by adapters to shade fogged areas.
    #[must_use]
    pub fn contains(&self, point: Vec2) -> bool {
        if !self.is_visible() {
            return false;
        }

        let mut inside = false;
        let mut previous = self.points[self.points.len() - 1];
        for &current in &self.points {
            let crosses = (current.y > point.y) != (previous.y > point.y);
            if crosses {
                let intersect_x = current.x
                    + (point.y - current.y) * (previous.x - current.x) / (previous.y - current.y);
                if point.x < intersect_x {
                    inside = !inside;
                }
            }
            previous = current;
        }
        inside
    }
}
