//! Cover-fit background placement geometry.
//!
//! Positions and zooms a background image inside a fixed-size container and
//! keeps three surfaces in agreement about what is visible: the full-size
//! editor preview, the square thumbnail with its crop frame, and the raster
//! export. The geometry layer is pure and total — invalid input yields a
//! documented sentinel, never a panic — and the raster boundary is the only
//! place that performs I/O.
//!
//! # Modules
//!
//! - [`geometry`] — cover fit, draw transform, visible region, pan clamping
//! - [`thumbnail`] — contain mapping, crop frame, reference-frame converters
//! - [`solver`] — reconstructing a position from a dragged crop frame
//! - [`recorder`] — injectable per-session editor/thumbnail sync recording
//! - [`raster`] — decode → crop → encode export (feature `raster`, default)

#![forbid(unsafe_code)]

pub mod geometry;
pub mod recorder;
pub mod solver;
pub mod thumbnail;

#[cfg(feature = "raster")]
pub mod raster;

// Re-exports: core types and operations
pub use geometry::{
    BackgroundStyle, CoverFit, Dims, DrawTransform, GeometryError, Position, Rect, Viewport,
};
pub use recorder::{Surface, SyncMismatch, SyncRecorder, SyncSample};
pub use solver::{MAX_SCALE, MIN_SCALE};
pub use thumbnail::{REFERENCE_SIZE, map_to_thumbnail};

#[cfg(feature = "raster")]
pub use raster::{
    OutputFormat, RasterError, RasterResult, needs_crop, rasterize, rasterize_preview,
    source_dimensions,
};
