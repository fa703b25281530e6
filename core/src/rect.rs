//! Rectangles.

use cgmath::{Point2, Vector2, Zero};

/// A rectangle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Rectangle origin.
    pub origin: Point2<f64>,

    /// Rectangle size.
    pub size: Vector2<f64>,
}

impl Rect {
    /// Creates a new rectangle.
    pub fn new(origin: Point2<f64>, size: Vector2<f64>) -> Rect {
        Rect { origin, size }
    }

    /// Creates a rectangle of the given size at the origin.
    pub fn from_size(width: f64, height: f64) -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::new(width, height),
        }
    }

    /// Returns a zero-sized rectangle at the origin.
    pub fn zero() -> Rect {
        Rect {
            origin: Point2::new(0., 0.),
            size: Vector2::zero(),
        }
    }

    /// Returns true if the rectangle has no area.
    pub fn is_empty(&self) -> bool {
        self.size.x <= 0. || self.size.y <= 0.
    }

    /// Returns a new rectangle inset by the specified amount.
    ///
    /// The size never becomes negative; insetting past the center collapses the rectangle.
    pub fn inset(&self, horiz: f64, vert: f64) -> Rect {
        Rect {
            origin: (self.origin.x + horiz, self.origin.y + vert).into(),
            size: (
                (self.size.x - 2. * horiz).max(0.),
                (self.size.y - 2. * vert).max(0.),
            )
                .into(),
        }
    }

    /// Returns a new rectangle with the given origin.
    pub fn with_origin(&self, origin: Point2<f64>) -> Rect {
        Rect {
            origin,
            size: self.size,
        }
    }
}

#[test]
fn test_inset_collapses() {
    let rect = Rect::from_size(10., 40.);
    let inset = rect.inset(8., 8.);
    assert_eq!(inset.origin, Point2::new(8., 8.));
    assert_eq!(inset.size, Vector2::new(0., 24.), "width should clamp at zero");
    assert!(inset.is_empty());
}
