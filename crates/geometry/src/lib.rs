//! Axis-generic geometry primitives shared by the layout algorithms.
//!
//! Every container here is parametric over its scalar and exposes its fields
//! through [`AbstractAxis`] projection, so algorithm code written for one
//! axis runs unchanged on the other.

use std::ops::{Add, Sub};

/// A logical axis of the layout plane.
///
/// Grid columns are sized along [`AbstractAxis::Horizontal`], grid rows along
/// [`AbstractAxis::Vertical`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AbstractAxis {
    /// The x / inline / column-sizing axis.
    Horizontal,
    /// The y / block / row-sizing axis.
    Vertical,
}

impl AbstractAxis {
    /// The perpendicular axis.
    pub fn other(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}

/// Projection of a two-component value onto an [`AbstractAxis`].
pub trait AxisProjection {
    /// The per-axis component type.
    type Scalar;

    /// The component measured along `axis`.
    fn get(&self, axis: AbstractAxis) -> Self::Scalar;

    /// Replace the component measured along `axis`.
    fn set(&mut self, axis: AbstractAxis, value: Self::Scalar);
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size<Unit> {
    pub width: Unit,
    pub height: Unit,
}

impl<Unit> Size<Unit> {
    pub fn new(width: Unit, height: Unit) -> Self {
        Self { width, height }
    }

    /// Apply `mapper` to both components.
    pub fn map<Out>(self, mapper: impl Fn(Unit) -> Out) -> Size<Out> {
        Size {
            width: mapper(self.width),
            height: mapper(self.height),
        }
    }
}

impl<Unit: Clone> Size<Unit> {
    /// A size with both components set to `value`.
    pub fn splat(value: Unit) -> Self {
        Self {
            width: value.clone(),
            height: value,
        }
    }
}

impl Size<f32> {
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };
}

impl Size<Option<f32>> {
    pub const NONE: Self = Self {
        width: None,
        height: None,
    };
}

impl<Unit: Copy> AxisProjection for Size<Unit> {
    type Scalar = Unit;

    fn get(&self, axis: AbstractAxis) -> Unit {
        match axis {
            AbstractAxis::Horizontal => self.width,
            AbstractAxis::Vertical => self.height,
        }
    }

    fn set(&mut self, axis: AbstractAxis, value: Unit) {
        match axis {
            AbstractAxis::Horizontal => self.width = value,
            AbstractAxis::Vertical => self.height = value,
        }
    }
}

impl<Unit: Add<Output = Unit>> Add for Size<Unit> {
    type Output = Self;

    fn add(self, other: Self) -> Self {
        Self {
            width: self.width + other.width,
            height: self.height + other.height,
        }
    }
}

impl<Unit: Sub<Output = Unit>> Sub for Size<Unit> {
    type Output = Self;

    fn sub(self, other: Self) -> Self {
        Self {
            width: self.width - other.width,
            height: self.height - other.height,
        }
    }
}

/// An x/y pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point<Unit> {
    pub x: Unit,
    pub y: Unit,
}

impl<Unit> Point<Unit> {
    pub fn new(x_value: Unit, y_value: Unit) -> Self {
        Self {
            x: x_value,
            y: y_value,
        }
    }
}

impl Point<f32> {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };
}

impl<Unit: Copy> AxisProjection for Point<Unit> {
    type Scalar = Unit;

    fn get(&self, axis: AbstractAxis) -> Unit {
        match axis {
            AbstractAxis::Horizontal => self.x,
            AbstractAxis::Vertical => self.y,
        }
    }

    fn set(&mut self, axis: AbstractAxis, value: Unit) {
        match axis {
            AbstractAxis::Horizontal => self.x = value,
            AbstractAxis::Vertical => self.y = value,
        }
    }
}

/// An axis-aligned rectangle described by its top-left corner and size.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect<Unit> {
    pub location: Point<Unit>,
    pub size: Size<Unit>,
}

impl<Unit: Copy> Rect<Unit> {
    pub fn new(location: Point<Unit>, size: Size<Unit>) -> Self {
        Self { location, size }
    }

    /// Position of the leading edge along `axis`.
    pub fn start(&self, axis: AbstractAxis) -> Unit {
        self.location.get(axis)
    }

    /// Extent along `axis`.
    pub fn length(&self, axis: AbstractAxis) -> Unit {
        self.size.get(axis)
    }
}

/// A start/end pair, used for grid placements and line-bounded extents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Line<Unit> {
    pub start: Unit,
    pub end: Unit,
}

impl<Unit> Line<Unit> {
    pub fn new(start: Unit, end: Unit) -> Self {
        Self { start, end }
    }

    /// Apply `mapper` to both ends.
    pub fn map<Out>(self, mapper: impl Fn(Unit) -> Out) -> Line<Out> {
        Line {
            start: mapper(self.start),
            end: mapper(self.end),
        }
    }
}
