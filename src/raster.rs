//! Raster export of a positioned background image.
//!
//! The single I/O boundary of the crate: decode the source bytes, compute
//! the crop through the same [`Viewport`] geometry the preview and thumbnail
//! use, draw onto an opaque white canvas, and encode. Preview and export
//! share one transform chain, so what the user sees is what gets exported.
//!
//! Each call is one atomic unit of work (decode, crop, encode) and any
//! failure aborts the whole request. Nothing is retried here; retry policy
//! belongs to the caller.

use std::io::Cursor;

use image::codecs::jpeg::JpegEncoder;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageFormat, ImageReader, Rgba, RgbaImage};
use thiserror::Error;
use tracing::debug;

use crate::geometry::{Dims, GeometryError, Position, Viewport};

/// Longest output edge used by [`rasterize_preview`].
pub const PREVIEW_EDGE: f64 = 400.0;

// Overflow below half a pixel and pans below a tenth of a pixel stay on
// the no-crop path.
const COVER_SLACK: f64 = 0.5;
const OFFSET_SLACK: f64 = 0.1;

/// Result type for raster operations.
pub type RasterResult<T> = Result<T, RasterError>;

/// Raster output encoding.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    /// Lossy JPEG; honors the quality parameter.
    Jpeg,
    /// Lossless PNG; the quality parameter is ignored.
    Png,
}

/// Errors from the raster boundary, one variant per failure cause.
#[derive(Debug, Error)]
pub enum RasterError {
    /// The source bytes did not decode as an image.
    #[error("source image decode failed: {0}")]
    Decode(#[source] image::ImageError),
    /// The geometry layer rejected the position or dimensions.
    #[error("geometry rejected the request: {0:?}")]
    Geometry(GeometryError),
    /// The computed crop region has no area.
    #[error("computed crop region is empty")]
    EmptyCrop,
    /// The requested output size is unusable.
    #[error("output dimensions {width}x{height} are unusable")]
    InvalidOutput {
        /// Requested output width.
        width: f64,
        /// Requested output height.
        height: f64,
    },
    /// The composed canvas failed to encode.
    #[error("output encode failed: {0}")]
    Encode(#[source] image::ImageError),
    /// The source stream could not be read.
    #[error("source is not a readable image stream: {0}")]
    Io(#[from] std::io::Error),
}

/// Whether rendering `pos` requires the cropping path at all.
///
/// False only when the draw rectangle fills the container without meaningful
/// overflow and the image is not panned off-center; the source can then be
/// scaled straight to the output size.
pub fn needs_crop(image: Dims, container: Dims, pos: Position) -> bool {
    let draw = Viewport::new(image, container).resolve_draw(pos);
    draw.width > container.width + COVER_SLACK
        || draw.height > container.height + COVER_SLACK
        || pos.x.abs() > OFFSET_SLACK
        || pos.y.abs() > OFFSET_SLACK
}

/// Read the natural dimensions of an encoded image without decoding pixels.
pub fn source_dimensions(source: &[u8]) -> RasterResult<Dims> {
    let reader = ImageReader::new(Cursor::new(source)).with_guessed_format()?;
    let (width, height) = reader.into_dimensions().map_err(RasterError::Decode)?;
    Ok(Dims::new(f64::from(width), f64::from(height)))
}

/// Render the positioned background at full output resolution.
///
/// Decodes `source`, crops/scales it according to `pos` exactly as the
/// preview geometry resolves it, composites onto an opaque white canvas of
/// `output` size, and encodes. `quality` is `0..=1` and only meaningful for
/// [`OutputFormat::Jpeg`].
pub fn rasterize(
    source: &[u8],
    output: Dims,
    pos: Position,
    format: OutputFormat,
    quality: f32,
) -> RasterResult<Vec<u8>> {
    render_scaled(source, output, pos, format, quality, 1.0)
}

/// Render a reduced-size preview of the same crop.
///
/// The crop is still computed against the full `output` size; only the
/// destination canvas is scaled down, to at most [`PREVIEW_EDGE`] on the
/// longest edge, so the preview agrees (modulo resampling) with the
/// full-size export.
pub fn rasterize_preview(
    source: &[u8],
    output: Dims,
    pos: Position,
    format: OutputFormat,
    quality: f32,
) -> RasterResult<Vec<u8>> {
    if output.is_degenerate() {
        return Err(RasterError::InvalidOutput {
            width: output.width,
            height: output.height,
        });
    }
    let dest_scale = (PREVIEW_EDGE / output.width.max(output.height)).min(1.0);
    render_scaled(source, output, pos, format, quality, dest_scale)
}

fn render_scaled(
    source: &[u8],
    output: Dims,
    pos: Position,
    format: OutputFormat,
    quality: f32,
    dest_scale: f64,
) -> RasterResult<Vec<u8>> {
    if output.is_degenerate() {
        return Err(RasterError::InvalidOutput {
            width: output.width,
            height: output.height,
        });
    }
    let out_w = (output.width * dest_scale).round().max(1.0) as u32;
    let out_h = (output.height * dest_scale).round().max(1.0) as u32;

    let decoded = image::load_from_memory(source).map_err(RasterError::Decode)?;
    let (src_w, src_h) = (decoded.width(), decoded.height());
    let image_dims = Dims::new(f64::from(src_w), f64::from(src_h));
    let viewport = Viewport::new(image_dims, output);
    debug!(src_w, src_h, out_w, out_h, "decoded raster source");

    // Guards the position and both extents before any pixel work.
    let visible = viewport.visible_region(pos).map_err(RasterError::Geometry)?;

    // Previews resample with Triangle, exports with Lanczos.
    let filter = if dest_scale < 1.0 {
        FilterType::Triangle
    } else {
        FilterType::Lanczos3
    };

    let mut canvas = RgbaImage::from_pixel(out_w, out_h, Rgba([255, 255, 255, 255]));

    if needs_crop(image_dims, output, pos) {
        let draw = viewport.resolve_draw(pos);
        let dest_x = draw.left.max(0.0);
        let dest_y = draw.top.max(0.0);
        let dest_w = (output.width - dest_x).min(draw.width);
        let dest_h = (output.height - dest_y).min(draw.height);
        if visible.is_empty() || dest_w <= 0.0 || dest_h <= 0.0 {
            return Err(RasterError::EmptyCrop);
        }

        let sx = (visible.x.floor() as u32).min(src_w - 1);
        let sy = (visible.y.floor() as u32).min(src_h - 1);
        let sw = (visible.width.ceil() as u32).clamp(1, src_w - sx);
        let sh = (visible.height.ceil() as u32).clamp(1, src_h - sy);
        let dw = (dest_w * dest_scale).round().max(1.0) as u32;
        let dh = (dest_h * dest_scale).round().max(1.0) as u32;
        debug!(sx, sy, sw, sh, dw, dh, "cropping source region");

        let region = decoded.crop_imm(sx, sy, sw, sh).resize_exact(dw, dh, filter);
        imageops::overlay(
            &mut canvas,
            &region.to_rgba8(),
            (dest_x * dest_scale).round() as i64,
            (dest_y * dest_scale).round() as i64,
        );
    } else {
        // Exact fill: no overflow to trim, scale the whole source.
        debug!("no crop required, scaling source to output");
        let resized = decoded.resize_exact(out_w, out_h, filter);
        imageops::overlay(&mut canvas, &resized.to_rgba8(), 0, 0);
    }

    encode(canvas, format, quality)
}

fn encode(canvas: RgbaImage, format: OutputFormat, quality: f32) -> RasterResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    match format {
        OutputFormat::Jpeg => {
            // Map 0..=1 onto the encoder's 1..=100; NaN collapses to 1.
            let q = (quality.clamp(0.0, 1.0) * 100.0).round().max(1.0).min(100.0) as u8;
            DynamicImage::ImageRgba8(canvas)
                .to_rgb8()
                .write_with_encoder(JpegEncoder::new_with_quality(&mut out, q))
                .map_err(RasterError::Encode)?;
        }
        OutputFormat::Png => {
            DynamicImage::ImageRgba8(canvas)
                .write_to(&mut out, ImageFormat::Png)
                .map_err(RasterError::Encode)?;
        }
    }
    Ok(out.into_inner())
}
