//! Reconstructing a [`Position`] from a thumbnail crop frame.
//!
//! The reverse path of the engine: when the user drags the frame on the
//! thumbnail instead of panning the editor preview, the dragged rectangle
//! must be turned back into the pan/zoom value that produces it. The solver
//! re-derives the forward geometry: undo the thumbnail's contain
//! letterboxing, lift the frame into image pixels, then solve for the cover
//! scale and offset that make that region exactly fill the container.
//!
//! The solver is an approximate inverse of
//! [`Viewport::crop_frame`](crate::Viewport::crop_frame): for frames the
//! forward path can actually produce (covering scale, offsets within clamp
//! bounds) the round trip is exact to float precision, but frames describing
//! impossible placements are pulled back into range by the scale clamp.

use crate::geometry::{Dims, Position, Rect, Viewport};

/// Smallest zoom the solver will produce.
pub const MIN_SCALE: f64 = 0.1;

/// Largest zoom the solver will produce.
pub const MAX_SCALE: f64 = 3.0;

/// Contain placement of the full image inside a square thumbnail.
#[derive(Copy, Clone, Debug)]
struct ThumbPlacement {
    display_width: f64,
    display_height: f64,
    offset_x: f64,
    offset_y: f64,
}

impl ThumbPlacement {
    /// Re-derive the placement `map_to_thumbnail` uses for a square
    /// thumbnail, branching on the image aspect against the square's 1:1.
    fn derive(image: Dims, thumb_size: f64) -> Self {
        let aspect = image.aspect();
        if aspect > 1.0 {
            // Wider than the square: width fits, vertical letterbox.
            let display_height = thumb_size / aspect;
            Self {
                display_width: thumb_size,
                display_height,
                offset_x: 0.0,
                offset_y: (thumb_size - display_height) / 2.0,
            }
        } else {
            // Taller or square: height fits, horizontal letterbox.
            let display_width = thumb_size * aspect;
            Self {
                display_width,
                display_height: thumb_size,
                offset_x: (thumb_size - display_width) / 2.0,
                offset_y: 0.0,
            }
        }
    }
}

impl Viewport {
    /// Solve for the position whose crop frame matches `frame`.
    ///
    /// `frame` is a rectangle in the coordinates of a `thumb_size`-square
    /// thumbnail (conventionally
    /// [`REFERENCE_SIZE`](crate::thumbnail::REFERENCE_SIZE)). The solved
    /// zoom is clamped into [`MIN_SCALE`]`..=`[`MAX_SCALE`]; the solved
    /// offset centers the frame's image-space center on the container
    /// center. Invalid input (non-finite values, empty frame, degenerate
    /// extents) yields [`Position::IDENTITY`].
    pub fn position_from_frame(&self, frame: Rect, thumb_size: f64) -> Position {
        let finite = frame.x.is_finite()
            && frame.y.is_finite()
            && frame.width.is_finite()
            && frame.height.is_finite()
            && thumb_size.is_finite();
        if !finite
            || frame.is_empty()
            || thumb_size <= 0.0
            || self.image.is_degenerate()
            || self.container.is_degenerate()
        {
            return Position::IDENTITY;
        }

        let base = self.cover_fit().scale;
        if base <= 0.0 {
            return Position::IDENTITY;
        }

        // Step 1: where does the image actually sit inside the thumbnail?
        let placement = ThumbPlacement::derive(self.image, thumb_size);

        // Step 2: lift the frame from thumbnail pixels into image pixels,
        // removing the letterbox offset first.
        let scale_x = self.image.width / placement.display_width;
        let scale_y = self.image.height / placement.display_height;
        let frame_in_image = Rect {
            x: (frame.x - placement.offset_x) * scale_x,
            y: (frame.y - placement.offset_y) * scale_y,
            width: frame.width * scale_x,
            height: frame.height * scale_y,
        };

        // Step 3: the zoom that makes this region exactly span the container.
        let scale_to_fit = (self.container.width / frame_in_image.width)
            .max(self.container.height / frame_in_image.height);
        let scale = (scale_to_fit / base).clamp(MIN_SCALE, MAX_SCALE);
        let final_scale = scale * base;

        // Step 4: the offset that puts the frame's center on the container
        // center, net of the natural centered placement.
        let (frame_cx, frame_cy) = frame_in_image.center();
        let to_center_x = self.container.width / 2.0 - frame_cx * final_scale;
        let to_center_y = self.container.height / 2.0 - frame_cy * final_scale;
        let natural_x = (self.container.width - self.image.width * final_scale) / 2.0;
        let natural_y = (self.container.height - self.image.height * final_scale) / 2.0;

        Position {
            x: to_center_x - natural_x,
            y: to_center_y - natural_y,
            scale,
        }
    }
}
