//! Mapping between image space and the square preview thumbnail.
//!
//! The thumbnail shows the whole source image letterboxed (`contain` fit);
//! the crop frame drawn on top of it must delineate exactly the region the
//! container currently shows. Everything here composes with the cover-fit
//! math in [`geometry`](crate::geometry) but is otherwise independent of it.

use crate::geometry::{Dims, GeometryError, Position, Rect, Viewport};

/// Side length of the fixed square reference frame thumbnail-relative
/// positions are expressed against.
pub const REFERENCE_SIZE: f64 = 120.0;

/// Map a rectangle from image pixel coordinates into thumbnail pixel
/// coordinates using `contain` fitting.
///
/// The image is scaled by `t = min(thumb.width / image.width,
/// thumb.height / image.height)` and centered, leaving letterbox padding on
/// at most one axis; the rect is then scaled by `t` and shifted by the
/// padding. Rects that exceed the image bounds map into the padding; rects
/// produced by [`Viewport::visible_region`](crate::Viewport::visible_region)
/// never do.
pub fn map_to_thumbnail(rect: Rect, image: Dims, thumb: Dims) -> Result<Rect, GeometryError> {
    let finite = rect.x.is_finite()
        && rect.y.is_finite()
        && rect.width.is_finite()
        && rect.height.is_finite()
        && image.width.is_finite()
        && image.height.is_finite()
        && thumb.width.is_finite()
        && thumb.height.is_finite();
    if !finite {
        return Err(GeometryError::NonFinite);
    }
    if image.width <= 0.0 || image.height <= 0.0 || thumb.width <= 0.0 || thumb.height <= 0.0 {
        return Err(GeometryError::EmptyDims);
    }

    let t = (thumb.width / image.width).min(thumb.height / image.height);
    let pad_x = (thumb.width - image.width * t) / 2.0;
    let pad_y = (thumb.height - image.height * t) / 2.0;

    Ok(Rect {
        x: pad_x + rect.x * t,
        y: pad_y + rect.y * t,
        width: rect.width * t,
        height: rect.height * t,
    })
}

impl Viewport {
    /// The crop frame: the rectangle, in thumbnail coordinates, delineating
    /// exactly what the container currently shows.
    ///
    /// Composes [`visible_region`](Self::visible_region) with
    /// [`map_to_thumbnail`] against a `thumb_size`-square thumbnail, then
    /// normalizes so the result always stays inside `[0, thumb_size]` on
    /// both axes with width and height of at least one pixel, so the preview
    /// UI never renders a zero-area selection box. `thumb_size` must be at
    /// least one pixel; [`REFERENCE_SIZE`] is the conventional value.
    pub fn crop_frame(&self, pos: Position, thumb_size: f64) -> Result<Rect, GeometryError> {
        if !thumb_size.is_finite() {
            return Err(GeometryError::NonFinite);
        }
        if thumb_size < 1.0 {
            return Err(GeometryError::EmptyDims);
        }

        let visible = self.visible_region(pos)?;
        let frame = map_to_thumbnail(visible, self.image, Dims::new(thumb_size, thumb_size))?;

        let width = frame.width.clamp(1.0, thumb_size);
        let height = frame.height.clamp(1.0, thumb_size);
        Ok(Rect {
            x: frame.x.clamp(0.0, thumb_size - width),
            y: frame.y.clamp(0.0, thumb_size - height),
            width,
            height,
        })
    }

    /// Convert a position expressed against the fixed 120×120 reference
    /// frame into one expressed against the true container size.
    ///
    /// Offsets scale by `container / 120`; the zoom term is rescaled through
    /// the ratio of the container's cover scale to the cover-fit baseline.
    /// Exact inverse of [`position_to_thumbnail`](Self::position_to_thumbnail)
    /// for the linear terms. Degenerate input is returned unchanged.
    pub fn position_from_thumbnail(&self, pos: Position) -> Position {
        if self.image.is_degenerate() || self.container.is_degenerate() || pos.is_degenerate() {
            return pos;
        }
        let base = self.cover_fit().scale;
        let crop_scale = (self.container.width / self.image.width)
            .max(self.container.height / self.image.height);

        Position {
            x: pos.x * (self.container.width / REFERENCE_SIZE),
            y: pos.y * (self.container.height / REFERENCE_SIZE),
            scale: 1.0 + (pos.scale - 1.0) * (crop_scale / base),
        }
    }

    /// Convert a position expressed against the true container size into one
    /// expressed against the fixed 120×120 reference frame.
    ///
    /// Inverse of [`position_from_thumbnail`](Self::position_from_thumbnail).
    pub fn position_to_thumbnail(&self, pos: Position) -> Position {
        if self.image.is_degenerate() || self.container.is_degenerate() || pos.is_degenerate() {
            return pos;
        }
        let base = self.cover_fit().scale;
        let crop_scale = (self.container.width / self.image.width)
            .max(self.container.height / self.image.height);

        Position {
            x: pos.x * (REFERENCE_SIZE / self.container.width),
            y: pos.y * (REFERENCE_SIZE / self.container.height),
            scale: 1.0 + (pos.scale - 1.0) * (base / crop_scale),
        }
    }
}
