//! Placement of shapes on the slide canvas.
//!
//! A [`Position`] describes where an element goes in terms the caller finds
//! convenient (fractions of the slide, absolute lengths, distances from the far
//! edge, or "keep the aspect ratio") and is resolved lazily into an absolute
//! [`Placement`] once the canvas size and the element's natural size are known.
//!
//! Resolution never fails. Results outside the canvas are allowed; use
//! [`Placement::fits_within`] when that matters.
//!
//! # Examples
//!
//! ```rust
//! use pptx_tools::common::Length;
//! use pptx_tools::position::{Dimension, Extent, Position, Size};
//!
//! let canvas = Size::new(Length::from_inches(10.0), Length::from_inches(7.5));
//! let position = Position::new(0.1, 0.2).with_width(Extent::Fixed(Dimension::Relative(0.5)));
//! let placement = position.resolve(canvas, None);
//! assert_eq!(placement.left, Length::from_inches(1.0));
//! assert_eq!(placement.top, Length::from_inches(1.5));
//! assert_eq!(placement.width, Length::from_inches(5.0));
//! ```
use crate::common::Length;

/// Width and height of a canvas or element.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    pub width: Length,
    pub height: Length,
}

impl Size {
    pub const fn new(width: Length, height: Length) -> Self {
        Self { width, height }
    }

    /// Width divided by height, or `None` for a degenerate size.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height.emus() > 0 && self.width.emus() > 0)
            .then(|| self.width.emus() as f64 / self.height.emus() as f64)
    }

    pub fn scale(&self, factor: f64) -> Self {
        Self::new(self.width.scale(factor), self.height.scale(factor))
    }
}

/// Resolved absolute placement of an element, in EMUs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Placement {
    pub left: Length,
    pub top: Length,
    pub width: Length,
    pub height: Length,
}

impl Placement {
    pub const fn new(left: Length, top: Length, width: Length, height: Length) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn right(&self) -> Length {
        Length::from_emus(self.left.emus().saturating_add(self.width.emus()))
    }

    pub fn bottom(&self) -> Length {
        Length::from_emus(self.top.emus().saturating_add(self.height.emus()))
    }

    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Whether the element lies entirely on a canvas of the given size.
    pub fn fits_within(&self, canvas: Size) -> bool {
        self.left.emus() >= 0
            && self.top.emus() >= 0
            && self.width.emus() >= 0
            && self.height.emus() >= 0
            && self.right() <= canvas.width
            && self.bottom() <= canvas.height
    }
}

/// A single length along one canvas axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Dimension {
    /// Fraction of the canvas length along the same axis (0.5 = half the slide)
    Relative(f64),
    /// Absolute length
    Absolute(Length),
}

impl Dimension {
    /// Resolve against the canvas length along this axis.
    pub fn resolve(&self, axis: Length) -> Length {
        match *self {
            Self::Relative(fraction) => axis.scale(fraction),
            Self::Absolute(length) => length,
        }
    }
}

impl From<Length> for Dimension {
    fn from(length: Length) -> Self {
        Self::Absolute(length)
    }
}

/// Canvas edge an offset is measured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Edge {
    /// Left or top edge; the offset locates the element's near side
    #[default]
    Start,
    /// Right or bottom edge; the offset locates the element's far side
    End,
}

/// Offset of an element along one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Offset {
    pub value: Dimension,
    pub from: Edge,
}

impl Offset {
    /// Fraction of the canvas, measured from the left/top edge.
    pub const fn relative(fraction: f64) -> Self {
        Self {
            value: Dimension::Relative(fraction),
            from: Edge::Start,
        }
    }

    /// Absolute distance from the left/top edge.
    pub const fn absolute(length: Length) -> Self {
        Self {
            value: Dimension::Absolute(length),
            from: Edge::Start,
        }
    }

    /// Measure from the right/bottom edge instead.
    pub const fn from_end(self) -> Self {
        Self {
            value: self.value,
            from: Edge::End,
        }
    }

    /// Resolve to the near-side coordinate of an element of length `extent`.
    pub fn resolve(&self, axis: Length, extent: Length) -> Length {
        let distance = self.value.resolve(axis);
        match self.from {
            Edge::Start => distance,
            Edge::End => Length::from_emus(
                axis.emus()
                    .saturating_sub(distance.emus())
                    .saturating_sub(extent.emus()),
            ),
        }
    }
}

/// Width or height of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Extent {
    /// The element's natural size; zero (auto-fit) when it has none
    #[default]
    Auto,
    /// An explicit relative or absolute length
    Fixed(Dimension),
    /// Derived from the other extent through the element's natural aspect ratio
    KeepAspect,
}

/// Requested position of an element, resolved against a canvas at insert time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub left: Offset,
    pub top: Offset,
    pub width: Extent,
    pub height: Extent,
}

impl Default for Position {
    fn default() -> Self {
        Self::new(0.0, 0.0)
    }
}

impl Position {
    /// Relative offsets from the top-left corner with natural width and height.
    pub const fn new(left: f64, top: f64) -> Self {
        Self {
            left: Offset::relative(left),
            top: Offset::relative(top),
            width: Extent::Auto,
            height: Extent::Auto,
        }
    }

    /// Absolute offsets from the top-left corner with natural width and height.
    pub const fn absolute(left: Length, top: Length) -> Self {
        Self {
            left: Offset::absolute(left),
            top: Offset::absolute(top),
            width: Extent::Auto,
            height: Extent::Auto,
        }
    }

    pub const fn with_width(mut self, width: Extent) -> Self {
        self.width = width;
        self
    }

    pub const fn with_height(mut self, height: Extent) -> Self {
        self.height = height;
        self
    }

    /// Fixed width and height.
    pub fn with_size(self, width: impl Into<Dimension>, height: impl Into<Dimension>) -> Self {
        self.with_width(Extent::Fixed(width.into()))
            .with_height(Extent::Fixed(height.into()))
    }

    /// Measure the left offset from the right edge of the canvas.
    pub const fn from_right(mut self) -> Self {
        self.left = self.left.from_end();
        self
    }

    /// Measure the top offset from the bottom edge of the canvas.
    pub const fn from_bottom(mut self) -> Self {
        self.top = self.top.from_end();
        self
    }

    /// Resolve to absolute coordinates on `canvas`.
    ///
    /// `natural` is the element's intrinsic size (an image's size, a table's
    /// default grid); it feeds [`Extent::Auto`] and [`Extent::KeepAspect`].
    pub fn resolve(&self, canvas: Size, natural: Option<Size>) -> Placement {
        let size = self.resolve_size(canvas, natural);
        Placement {
            left: self.left.resolve(canvas.width, size.width),
            top: self.top.resolve(canvas.height, size.height),
            width: size.width,
            height: size.height,
        }
    }

    fn resolve_size(&self, canvas: Size, natural: Option<Size>) -> Size {
        let natural_or_zero = natural.unwrap_or_default();
        let direct = |extent: Extent, axis: Length, natural_len: Length| match extent {
            Extent::Auto => Some(natural_len),
            Extent::Fixed(dimension) => Some(dimension.resolve(axis)),
            Extent::KeepAspect => None,
        };
        let width = direct(self.width, canvas.width, natural_or_zero.width);
        let height = direct(self.height, canvas.height, natural_or_zero.height);
        let aspect = natural.and_then(|n| n.aspect_ratio());

        match (width, height, aspect) {
            (Some(width), Some(height), _) => Size::new(width, height),
            (None, Some(height), Some(aspect)) => Size::new(height.scale(aspect), height),
            (Some(width), None, Some(aspect)) => Size::new(width, width.scale(1.0 / aspect)),
            // No aspect ratio to derive from: fall back to the natural extent.
            (width, height, _) => Size::new(
                width.unwrap_or(natural_or_zero.width),
                height.unwrap_or(natural_or_zero.height),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn inches(value: f64) -> Length {
        Length::from_inches(value)
    }

    fn canvas(width: f64, height: f64) -> Size {
        Size::new(inches(width), inches(height))
    }

    #[test]
    fn test_relative_offsets_scale_with_canvas() {
        let position = Position::new(0.02, 0.24);
        for (width, height) in [(10.0, 7.5), (13.333, 7.5), (20.0, 15.0)] {
            let placement = position.resolve(canvas(width, height), None);
            assert_eq!(placement.left, inches(width).scale(0.02));
            assert_eq!(placement.top, inches(height).scale(0.24));
            assert_eq!(placement.size(), Size::default());
        }
    }

    #[test]
    fn test_auto_extent_uses_natural_size() {
        let natural = canvas(3.4, 1.8);
        let placement = Position::new(0.3, 0.4).resolve(canvas(10.0, 7.5), Some(natural));
        assert_eq!(placement.size(), natural);
        assert_eq!(placement.left, inches(3.0));
    }

    #[test]
    fn test_keep_aspect_derives_missing_extent() {
        let natural = canvas(4.0, 2.0);
        let position = Position::new(0.0, 0.0)
            .with_width(Extent::Fixed(Dimension::Absolute(inches(2.0))))
            .with_height(Extent::KeepAspect);
        let placement = position.resolve(canvas(10.0, 7.5), Some(natural));
        assert_eq!(placement.height, inches(1.0));

        let position = Position::new(0.0, 0.0)
            .with_width(Extent::KeepAspect)
            .with_height(Extent::Fixed(Dimension::Relative(0.4)));
        let placement = position.resolve(canvas(10.0, 7.5), Some(natural));
        assert_eq!(placement.height, inches(3.0));
        assert_eq!(placement.width, inches(6.0));
    }

    #[test]
    fn test_keep_aspect_without_natural_size_is_zero() {
        let position = Position::new(0.1, 0.1)
            .with_width(Extent::KeepAspect)
            .with_height(Extent::Fixed(Dimension::Relative(0.5)));
        let placement = position.resolve(canvas(10.0, 7.5), None);
        assert_eq!(placement.width, Length::ZERO);
        assert_eq!(placement.height, inches(3.75));
    }

    #[test]
    fn test_offsets_from_far_edges() {
        let position = Position::absolute(inches(0.5), inches(1.0))
            .with_size(inches(2.0), inches(1.0))
            .from_right()
            .from_bottom();
        let placement = position.resolve(canvas(10.0, 7.5), None);
        assert_eq!(placement.right(), inches(9.5));
        assert_eq!(placement.bottom(), inches(6.5));
        assert!(placement.fits_within(canvas(10.0, 7.5)));
    }

    #[test]
    fn test_extreme_offsets_saturate() {
        let area = canvas(10.0, 7.5);
        let placement = Position::new(1e300, 0.0)
            .with_size(inches(3.0), inches(1.0))
            .resolve(area, None);
        assert_eq!(placement.left.emus(), i64::MAX);
        assert_eq!(placement.right().emus(), i64::MAX);
        assert!(!placement.fits_within(area));

        let placement = Position::new(-1e300, 0.0)
            .with_size(inches(3.0), inches(1.0))
            .from_right()
            .resolve(area, None);
        assert_eq!(placement.left.emus(), i64::MAX - inches(3.0).emus());
        assert_eq!(placement.right().emus(), i64::MAX);
        assert!(!placement.fits_within(area));

        let placement = Position::new(0.0, 1e300).from_bottom().resolve(area, Some(area));
        assert_eq!(placement.top.emus(), -i64::MAX);
        assert!(placement.bottom().emus() < 0);
    }

    #[test]
    fn test_out_of_range_is_allowed() {
        let position = Position::new(0.9, 0.9).with_size(Dimension::Relative(0.5), Dimension::Relative(0.5));
        let placement = position.resolve(canvas(10.0, 7.5), None);
        assert!(!placement.fits_within(canvas(10.0, 7.5)));
        assert_eq!(placement.right(), inches(14.0));
    }
}
