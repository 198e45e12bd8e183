//! Per-session recording of editor/thumbnail synchronization.
//!
//! The editor preview and the thumbnail frame render the same [`Position`]
//! through different transform chains; when they disagree, the bug is in the
//! geometry, not the UI. A [`SyncRecorder`] is an explicit, injectable value
//! the owning application creates per editing session, feeds one sample per
//! rendered frame, inspects, and drops. There is no global state and no
//! process-wide toggle.

use crate::geometry::{Position, Rect};

/// Default number of samples retained before the oldest are evicted.
pub const DEFAULT_CAPACITY: usize = 50;

/// Which rendering surface produced a sample.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Surface {
    /// The full-size editor preview.
    Editor,
    /// The square thumbnail with its crop frame.
    Thumbnail,
}

/// One recorded observation from one surface.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SyncSample {
    /// Surface the sample came from.
    pub surface: Surface,
    /// Application-supplied frame counter; samples from different surfaces
    /// with the same sequence describe the same interaction frame.
    pub sequence: u64,
    /// Position the surface rendered.
    pub position: Position,
    /// Crop frame the surface displayed, if it drew one.
    pub crop_frame: Option<Rect>,
}

/// A frame where the two surfaces rendered diverging positions.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct SyncMismatch {
    /// Frame the divergence occurred in.
    pub sequence: u64,
    /// Position the editor rendered.
    pub editor: Position,
    /// Position the thumbnail rendered.
    pub thumbnail: Position,
}

/// Rolling buffer of [`SyncSample`]s for one editing session.
///
/// Lifecycle: create, [`record`](Self::record) on each rendered frame,
/// inspect via [`samples`](Self::samples) or
/// [`mismatches`](Self::mismatches), then drop with the session.
#[derive(Clone, Debug)]
pub struct SyncRecorder {
    samples: Vec<SyncSample>,
    capacity: usize,
}

impl SyncRecorder {
    /// Recorder retaining the last [`DEFAULT_CAPACITY`] samples.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Recorder retaining the last `capacity` samples (at least one).
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            samples: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sample, evicting the oldest once the capacity is reached.
    pub fn record(&mut self, sample: SyncSample) {
        if self.samples.len() == self.capacity {
            self.samples.remove(0);
        }
        self.samples.push(sample);
    }

    /// Recorded samples, oldest first.
    pub fn samples(&self) -> &[SyncSample] {
        &self.samples
    }

    /// Discard all recorded samples, keeping the capacity.
    pub fn clear(&mut self) {
        self.samples.clear();
    }

    /// Frames where both surfaces recorded a sample but their positions
    /// differ by more than `tolerance` on any component.
    ///
    /// When a surface recorded a sequence more than once, the latest sample
    /// wins. Results are ordered by sequence.
    pub fn mismatches(&self, tolerance: f64) -> Vec<SyncMismatch> {
        let mut out = Vec::new();
        let mut seen = Vec::new();
        for sample in &self.samples {
            if sample.surface != Surface::Editor || seen.contains(&sample.sequence) {
                continue;
            }
            seen.push(sample.sequence);
            let Some(thumbnail) = self.latest(Surface::Thumbnail, sample.sequence) else {
                continue;
            };
            let editor = self.latest(Surface::Editor, sample.sequence).unwrap_or(sample);
            let diverged = (editor.position.x - thumbnail.position.x).abs() > tolerance
                || (editor.position.y - thumbnail.position.y).abs() > tolerance
                || (editor.position.scale - thumbnail.position.scale).abs() > tolerance;
            if diverged {
                out.push(SyncMismatch {
                    sequence: sample.sequence,
                    editor: editor.position,
                    thumbnail: thumbnail.position,
                });
            }
        }
        out.sort_by_key(|m| m.sequence);
        out
    }

    fn latest(&self, surface: Surface, sequence: u64) -> Option<&SyncSample> {
        self.samples
            .iter()
            .rev()
            .find(|s| s.surface == surface && s.sequence == sequence)
    }
}

impl Default for SyncRecorder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(surface: Surface, sequence: u64, x: f64) -> SyncSample {
        SyncSample {
            surface,
            sequence,
            position: Position::new(x, 0.0, 1.0),
            crop_frame: None,
        }
    }

    #[test]
    fn retains_only_the_newest_samples() {
        let mut rec = SyncRecorder::with_capacity(3);
        for seq in 0..5 {
            rec.record(sample(Surface::Editor, seq, 0.0));
        }
        let seqs: Vec<u64> = rec.samples().iter().map(|s| s.sequence).collect();
        assert_eq!(seqs, vec![2, 3, 4]);
    }

    #[test]
    fn pairs_surfaces_by_sequence() {
        let mut rec = SyncRecorder::new();
        rec.record(sample(Surface::Editor, 1, 10.0));
        rec.record(sample(Surface::Thumbnail, 1, 10.05));
        rec.record(sample(Surface::Editor, 2, 20.0));
        rec.record(sample(Surface::Thumbnail, 2, 27.0));
        // Sequence 3 has no thumbnail sample and must not pair.
        rec.record(sample(Surface::Editor, 3, 30.0));

        let mismatches = rec.mismatches(0.1);
        assert_eq!(mismatches.len(), 1);
        assert_eq!(mismatches[0].sequence, 2);
        assert_eq!(mismatches[0].editor.x, 20.0);
        assert_eq!(mismatches[0].thumbnail.x, 27.0);
    }

    #[test]
    fn latest_sample_wins_within_a_sequence() {
        let mut rec = SyncRecorder::new();
        rec.record(sample(Surface::Editor, 7, 0.0));
        rec.record(sample(Surface::Thumbnail, 7, 99.0));
        rec.record(sample(Surface::Thumbnail, 7, 0.0));
        assert!(rec.mismatches(0.5).is_empty());
    }

    #[test]
    fn clear_keeps_capacity() {
        let mut rec = SyncRecorder::with_capacity(2);
        rec.record(sample(Surface::Editor, 1, 0.0));
        rec.clear();
        assert!(rec.samples().is_empty());
        rec.record(sample(Surface::Editor, 2, 0.0));
        rec.record(sample(Surface::Editor, 3, 0.0));
        rec.record(sample(Surface::Editor, 4, 0.0));
        assert_eq!(rec.samples().len(), 2);
    }
}
