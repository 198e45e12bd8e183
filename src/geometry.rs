//! Cover-fit placement of a background image inside a fixed container.
//!
//! Computes the `background-size: cover` baseline, the draw rectangle after
//! user pan/zoom, the visible sub-rectangle of the source image, and pan
//! clamping. Pure geometry — no pixel operations, no I/O, safe to call from
//! any thread.
//!
//! # Example
//!
//! ```
//! use covercrop::{Dims, Position, Viewport};
//!
//! let view = Viewport::new(Dims::new(1920.0, 1080.0), Dims::new(1050.0, 600.0));
//! let visible = view.visible_region(Position::IDENTITY).unwrap();
//!
//! // Height-bound cover: the full image height is visible, the width is cropped.
//! assert!((visible.height - 1080.0).abs() < 1e-6);
//! assert!(visible.width < 1920.0);
//! ```

/// Width × height extents in pixels.
///
/// Describes either a source image's natural size or a container's rendered
/// size. Which one is a contract of the consuming function.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Dims {
    /// Width in pixels.
    pub width: f64,
    /// Height in pixels.
    pub height: f64,
}

impl Dims {
    /// Create a new extent.
    pub const fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    /// Width / height ratio.
    pub fn aspect(&self) -> f64 {
        self.width / self.height
    }

    /// Whether either extent is non-finite or not strictly positive.
    pub fn is_degenerate(&self) -> bool {
        !(self.width.is_finite() && self.height.is_finite())
            || self.width <= 0.0
            || self.height <= 0.0
    }
}

/// User-controlled pan offset and zoom for one image within one container.
///
/// `x`/`y` are offsets in container pixels from the centered placement;
/// `scale` multiplies the cover-fit baseline (`1.0` = exactly covering,
/// centered). This is the only value the owning application persists per
/// image; everything else is recomputed from it.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    /// Horizontal offset from center, in container pixels.
    pub x: f64,
    /// Vertical offset from center, in container pixels.
    pub y: f64,
    /// Zoom multiplier over the cover baseline. Must be positive.
    pub scale: f64,
}

impl Position {
    /// Centered, unzoomed placement. Also the sentinel for invalid input.
    pub const IDENTITY: Self = Self {
        x: 0.0,
        y: 0.0,
        scale: 1.0,
    };

    /// Create a new position.
    pub const fn new(x: f64, y: f64, scale: f64) -> Self {
        Self { x, y, scale }
    }

    /// Whether any component is non-finite, or the scale is not positive.
    pub fn is_degenerate(&self) -> bool {
        !(self.x.is_finite() && self.y.is_finite() && self.scale.is_finite()) || self.scale <= 0.0
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Axis-aligned rectangle.
///
/// The coordinate space (image / container / thumbnail pixels) is a contract
/// of the producing function, not encoded in the type; rects from different
/// spaces must not be mixed without an explicit mapping step.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    /// Zero-area rect at the origin. The sentinel for "nothing visible".
    pub const ZERO: Self = Self {
        x: 0.0,
        y: 0.0,
        width: 0.0,
        height: 0.0,
    };

    /// Create a new rect.
    pub const fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Right edge (`x + width`).
    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    /// Bottom edge (`y + height`).
    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Center point.
    pub fn center(&self) -> (f64, f64) {
        (self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Whether the rect has no usable area.
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Whether the rect is finite, non-negative, and fully inside `bounds`
    /// (anchored at the origin).
    pub fn within(&self, bounds: Dims) -> bool {
        self.x.is_finite()
            && self.y.is_finite()
            && self.width.is_finite()
            && self.height.is_finite()
            && self.x >= 0.0
            && self.y >= 0.0
            && self.width >= 0.0
            && self.height >= 0.0
            && self.right() <= bounds.width
            && self.bottom() <= bounds.height
    }
}

/// Baseline `background-size: cover` fit of an image into a container.
///
/// Ephemeral — recomputed whenever the image or container changes.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CoverFit {
    /// Baseline scale factor applied to the image.
    pub scale: f64,
    /// Covered width (`image.width * scale`).
    pub width: f64,
    /// Covered height (`image.height * scale`).
    pub height: f64,
}

/// The raw draw rectangle an image occupies inside its container.
///
/// Produced by [`Viewport::resolve_draw`]; no clamping is applied, so the
/// rectangle may expose container edges until the position is passed through
/// [`Viewport::clamp`].
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct DrawTransform {
    /// Drawn width in container pixels.
    pub width: f64,
    /// Drawn height in container pixels.
    pub height: f64,
    /// Left edge of the drawn image in container coordinates.
    pub left: f64,
    /// Top edge of the drawn image in container coordinates.
    pub top: f64,
    /// Cover-fit baseline scale the draw was derived from.
    pub base_scale: f64,
}

/// Display-ready background sizing at an arbitrary display scale.
///
/// Mirrors the values a `background-size` / `background-position` pair needs.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct BackgroundStyle {
    /// Drawn size in display pixels.
    pub size: (f64, f64),
    /// User offset in display pixels.
    pub offset: (f64, f64),
}

/// Why a geometry computation rejected its input.
///
/// The geometry layer never panics; invalid input yields one of these, and
/// callers that want the legacy zero-rect sentinel can `unwrap_or_default()`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum GeometryError {
    /// Some coordinate or dimension is NaN or infinite.
    NonFinite,
    /// Image, container, or thumbnail has a zero or negative extent.
    EmptyDims,
    /// Position scale is zero or negative.
    NonPositiveScale,
}

/// An image placed inside a fixed-size container.
///
/// Every operation in the engine is a pure function of this pairing plus a
/// [`Position`]; nothing is cached, so derived rectangles can never go stale.
///
/// # Example
///
/// ```
/// use covercrop::{Dims, Position, Viewport};
///
/// let view = Viewport::new(Dims::new(800.0, 1200.0), Dims::new(1050.0, 600.0));
/// let fit = view.cover_fit();
///
/// // Portrait image into a landscape container: width binds.
/// assert!((fit.scale - 1.3125).abs() < 1e-9);
/// assert!(fit.width >= 1050.0 && fit.height >= 600.0);
/// ```
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Viewport {
    /// Natural size of the source image.
    pub image: Dims,
    /// Rendered size of the container.
    pub container: Dims,
}

impl Viewport {
    /// Create a viewport for an image/container pairing.
    pub const fn new(image: Dims, container: Dims) -> Self {
        Self { image, container }
    }

    /// Baseline cover fit: the smallest uniform scale at which the image
    /// fills the container on both axes.
    ///
    /// Degenerate input (any zero or negative extent) yields the documented
    /// sentinel `{scale: 1, width: 0, height: 0}` rather than dividing by
    /// zero.
    pub fn cover_fit(&self) -> CoverFit {
        if self.image.is_degenerate() || self.container.is_degenerate() {
            return CoverFit {
                scale: 1.0,
                width: 0.0,
                height: 0.0,
            };
        }
        let scale = (self.container.width / self.image.width)
            .max(self.container.height / self.image.height);
        CoverFit {
            scale,
            width: self.image.width * scale,
            height: self.image.height * scale,
        }
    }

    /// Resolve the raw draw rectangle for a position: cover dimensions times
    /// the user zoom, centered, then shifted by the user offset.
    ///
    /// No clamping is applied; use [`clamp`](Self::clamp) before rendering
    /// if exposed edges must be prevented.
    pub fn resolve_draw(&self, pos: Position) -> DrawTransform {
        let fit = self.cover_fit();
        let width = fit.width * pos.scale;
        let height = fit.height * pos.scale;
        DrawTransform {
            width,
            height,
            left: (self.container.width - width) / 2.0 + pos.x,
            top: (self.container.height - height) / 2.0 + pos.y,
            base_scale: fit.scale,
        }
    }

    /// The sub-rectangle of the source image currently visible in the
    /// container, in image pixel coordinates.
    ///
    /// Maps the container's corners back through the draw transform
    /// (`image_coord = (container_coord - top_left) / effective_scale`) and
    /// clamps the result into `[0, image.width] × [0, image.height]`, so
    /// rounding or overflow can never report a region outside the source.
    pub fn visible_region(&self, pos: Position) -> Result<Rect, GeometryError> {
        self.check(pos)?;

        let draw = self.resolve_draw(pos);
        let effective = draw.base_scale * pos.scale;
        if effective <= 0.0 {
            return Err(GeometryError::NonPositiveScale);
        }

        let left = ((0.0 - draw.left) / effective).clamp(0.0, self.image.width);
        let top = ((0.0 - draw.top) / effective).clamp(0.0, self.image.height);
        let right = ((self.container.width - draw.left) / effective).clamp(left, self.image.width);
        let bottom =
            ((self.container.height - draw.top) / effective).clamp(top, self.image.height);

        Ok(Rect {
            x: left,
            y: top,
            width: (right - left).max(0.0),
            height: (bottom - top).max(0.0),
        })
    }

    /// Clamp a position's pan offset so the draw rectangle never exposes
    /// container edges.
    ///
    /// For `scale >= 1` the clamped draw rectangle always fully covers the
    /// container. The scale component is left untouched; degenerate input is
    /// returned unchanged. Never mutates the argument.
    pub fn clamp(&self, pos: Position) -> Position {
        if self.image.is_degenerate() || self.container.is_degenerate() || pos.is_degenerate() {
            return pos;
        }
        let draw = self.resolve_draw(pos);
        let min_x = (self.container.width - draw.width).min(0.0);
        let max_x = (draw.width - self.container.width).max(0.0);
        let min_y = (self.container.height - draw.height).min(0.0);
        let max_y = (draw.height - self.container.height).max(0.0);

        // Offsets are measured from center, so each bound is halved.
        Position {
            x: pos.x.clamp(min_x / 2.0, max_x / 2.0),
            y: pos.y.clamp(min_y / 2.0, max_y / 2.0),
            scale: pos.scale,
        }
    }

    /// Display-ready background size and offset at `display_scale` (the
    /// ratio of on-screen pixels to container pixels).
    pub fn background_style(&self, pos: Position, display_scale: f64) -> BackgroundStyle {
        let draw = self.resolve_draw(pos);
        BackgroundStyle {
            size: (draw.width * display_scale, draw.height * display_scale),
            offset: (pos.x * display_scale, pos.y * display_scale),
        }
    }

    /// Whether the visible region spans the full container extent, within a
    /// one-pixel tolerance measured in container pixels.
    pub fn is_cover_aligned(&self, pos: Position) -> bool {
        let Ok(visible) = self.visible_region(pos) else {
            return false;
        };
        let effective = self.cover_fit().scale * pos.scale;
        (visible.width * effective - self.container.width).abs() < 1.0
            && (visible.height * effective - self.container.height).abs() < 1.0
    }

    /// Shared input guard: all coordinates finite, extents positive, scale
    /// positive.
    pub(crate) fn check(&self, pos: Position) -> Result<(), GeometryError> {
        let finite = self.image.width.is_finite()
            && self.image.height.is_finite()
            && self.container.width.is_finite()
            && self.container.height.is_finite()
            && pos.x.is_finite()
            && pos.y.is_finite()
            && pos.scale.is_finite();
        if !finite {
            return Err(GeometryError::NonFinite);
        }
        if self.image.width <= 0.0
            || self.image.height <= 0.0
            || self.container.width <= 0.0
            || self.container.height <= 0.0
        {
            return Err(GeometryError::EmptyDims);
        }
        if pos.scale <= 0.0 {
            return Err(GeometryError::NonPositiveScale);
        }
        Ok(())
    }
}
