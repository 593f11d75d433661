//! Geometric primitives for rack and device placement.
//!
//! This module provides the small set of geometric types Rackdraw needs to
//! position racks on a page and devices inside a rack.
//!
//! # Overview
//!
//! - [`Point`] - A 2D coordinate in page space
//! - [`Size`] - Width and height dimensions
//! - [`Bounds`] - A rectangle anchored at its top-left corner
//!
//! # Coordinate System
//!
//! Rackdraw uses the draw.io coordinate system, which matches SVG:
//!
//! ```text
//!   (0,0) ────────► +X
//!     │
//!     │
//!     ▼
//!    +Y
//! ```
//!
//! Coordinates are `f64` because draw.io stores geometry as decimal strings
//! and the scaled rack constants (for example `15 × 1.3`) must survive the
//! round trip to text without `f32` noise.

/// A 2D point in page coordinate space.
///
/// # Examples
///
/// ```
/// # use rackdraw_core::geometry::Point;
/// let p1 = Point::new(10.0, 20.0);
/// let p2 = Point::new(5.0, 5.0);
///
/// let sum = p1.add_point(p2);
/// assert_eq!(sum.x(), 15.0);
/// assert_eq!(sum.y(), 25.0);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    x: f64,
    y: f64,
}

impl Point {
    /// Creates a new point with the specified coordinates
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Returns the x-coordinate of the point
    pub fn x(self) -> f64 {
        self.x
    }

    /// Returns the y-coordinate of the point
    pub fn y(self) -> f64 {
        self.y
    }

    /// Adds another point to this point, returning a new point.
    pub fn add_point(self, other: Point) -> Self {
        Self {
            x: self.x + other.x,
            y: self.y + other.y,
        }
    }

    /// Subtracts another point from this point, returning a new point
    pub fn sub_point(self, other: Point) -> Self {
        Self {
            x: self.x - other.x,
            y: self.y - other.y,
        }
    }
}

/// Represents the dimensions of an element with width and height
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Size {
    width: f64,
    height: f64,
}

impl Size {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Returns the width dimension of this size
    pub fn width(self) -> f64 {
        self.width
    }

    /// Returns the height dimension of this size
    pub fn height(self) -> f64 {
        self.height
    }

    /// Returns half of this size as a point offset.
    pub fn half(self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }
}

/// A rectangle defined by its top-left corner and its size.
///
/// draw.io geometry is always expressed as `x`, `y`, `width`, `height` with
/// `x`/`y` naming the top-left corner, so that is the representation kept
/// here.
///
/// # Examples
///
/// ```
/// # use rackdraw_core::geometry::{Bounds, Point, Size};
/// let page = Size::new(800.0, 1000.0);
/// let rack = Bounds::centered_in(page, Size::new(200.0, 400.0));
///
/// assert_eq!(rack.min_point(), Point::new(300.0, 300.0));
/// assert_eq!(rack.center(), Point::new(400.0, 500.0));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    origin: Point,
    size: Size,
}

impl Bounds {
    /// Creates bounds from the top-left corner and a size
    pub fn new_from_top_left(origin: Point, size: Size) -> Self {
        Self { origin, size }
    }

    /// Creates bounds of `size` whose center is `center`
    pub fn new_from_center(center: Point, size: Size) -> Self {
        Self {
            origin: center.sub_point(size.half()),
            size,
        }
    }

    /// Creates bounds of `size` centered inside a container of `container` size
    /// whose top-left corner is at the origin.
    pub fn centered_in(container: Size, size: Size) -> Self {
        Self::new_from_center(container.half(), size)
    }

    /// Returns the top-left corner
    pub fn min_point(&self) -> Point {
        self.origin
    }

    /// Returns the geometric center
    pub fn center(&self) -> Point {
        self.origin.add_point(self.size.half())
    }

    pub fn x(&self) -> f64 {
        self.origin.x
    }

    pub fn y(&self) -> f64 {
        self.origin.y
    }

    pub fn width(&self) -> f64 {
        self.size.width
    }

    pub fn height(&self) -> f64 {
        self.size.height
    }

    pub fn size(&self) -> Size {
        self.size
    }
}
