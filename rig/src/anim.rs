use glam::Mat4;
use serde::Deserialize;

use crate::document::LoadError;

/// The serialized affine transform for one bone at one frame: nine values for
/// the linear block followed by three for the translation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct DeformationRecord(pub [f32; 12]);

impl DeformationRecord {
    /// Expand into a homogeneous matrix. The slot assignment is a wire-format
    /// contract with the tool that wrote the records and has to be kept
    /// bit-for-bit: columns (d0,d3,d6,0) (d1,d4,d7,0) (d2,d5,d8,0)
    /// (d9,d10,d11,1).
    pub fn to_matrix(&self) -> Mat4 {
        let d = &self.0;
        Mat4::from_cols_array(&[
            d[0], d[3], d[6], 0.0, //
            d[1], d[4], d[7], 0.0, //
            d[2], d[5], d[8], 0.0, //
            d[9], d[10], d[11], 1.0,
        ])
    }
}

/// Every pose of the rig, one homogeneous matrix per (frame, bone) pair,
/// expanded once at load so playback is a slice lookup.
#[derive(Debug)]
pub struct AnimationClip {
    bone_count: usize,
    frame_count: usize,
    matrices: Vec<Mat4>,
}

impl AnimationClip {
    /// `records` must split exactly into frames of `bone_count` bones. The
    /// frame count is derived from that division rather than declared, so a
    /// dataset of unexpected size fails here instead of mis-indexing later.
    pub fn from_records(
        records: &[DeformationRecord],
        bone_count: usize,
    ) -> Result<Self, LoadError> {
        if bone_count == 0 {
            return Err(LoadError::MalformedDocument(
                "bone count must be nonzero".to_owned(),
            ));
        }
        if records.is_empty() || records.len() % bone_count != 0 {
            return Err(LoadError::MalformedDocument(format!(
                "{} deformation records do not divide into frames of {} bones",
                records.len(),
                bone_count
            )));
        }

        Ok(Self {
            bone_count,
            frame_count: records.len() / bone_count,
            matrices: records.iter().map(DeformationRecord::to_matrix).collect(),
        })
    }

    pub fn bone_count(&self) -> usize {
        self.bone_count
    }

    pub fn frame_count(&self) -> usize {
        self.frame_count
    }

    /// The matrix run for one frame, in bone order. `frame` must be in range.
    pub fn frame_matrices(&self, frame: usize) -> &[Mat4] {
        let start = frame * self.bone_count;
        &self.matrices[start..start + self.bone_count]
    }
}

/// Fixed-step playback clock: at most one frame step per poll, stepping only
/// once more than `step_ms` has passed since the last step. No interpolation
/// and no catch-up when polls arrive late.
#[derive(Debug, Clone)]
pub struct PlaybackCursor {
    frame: usize,
    frame_count: usize,
    step_ms: f64,
    last_ms: f64,
    armed: bool,
}

impl PlaybackCursor {
    pub fn new(frame_count: usize, step_ms: f64) -> Self {
        debug_assert!(frame_count > 0);
        Self {
            frame: 0,
            frame_count,
            step_ms,
            last_ms: 0.0,
            armed: false,
        }
    }

    pub fn frame(&self) -> usize {
        self.frame
    }

    /// Poll with the current clock reading (milliseconds, any monotonic
    /// origin). The first poll never steps: it records the baseline that
    /// later steps are measured from.
    pub fn advance(&mut self, now_ms: f64) -> bool {
        if !self.armed {
            self.armed = true;
            self.last_ms = now_ms;
            return false;
        }
        if now_ms - self.last_ms > self.step_ms {
            self.frame = (self.frame + 1) % self.frame_count;
            self.last_ms = now_ms;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ascending_record() -> DeformationRecord {
        DeformationRecord([
            0.0, 1.0, 2.0, 3.0, 4.0, 5.0, 6.0, 7.0, 8.0, 9.0, 10.0, 11.0,
        ])
    }

    fn translation_record(x: f32) -> DeformationRecord {
        DeformationRecord([1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, x, 0.0, 0.0])
    }

    #[test]
    fn record_expansion_is_bit_exact() {
        let m = ascending_record().to_matrix();
        assert_eq!(
            m.to_cols_array(),
            [
                0.0, 3.0, 6.0, 0.0, //
                1.0, 4.0, 7.0, 0.0, //
                2.0, 5.0, 8.0, 0.0, //
                9.0, 10.0, 11.0, 1.0,
            ]
        );
    }

    #[test]
    fn record_translation_lands_in_the_last_column() {
        let m = DeformationRecord([
            1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 5.0, 6.0, 7.0,
        ])
        .to_matrix();
        assert_eq!(m, Mat4::from_translation(glam::vec3(5.0, 6.0, 7.0)));
    }

    #[test]
    fn clip_derives_frame_count_from_record_count() {
        let records = vec![ascending_record(); 6];
        let clip = AnimationClip::from_records(&records, 3).unwrap();
        assert_eq!(clip.frame_count(), 2);
        assert_eq!(clip.bone_count(), 3);
        assert_eq!(clip.frame_matrices(1).len(), 3);
    }

    #[test]
    fn clip_rejects_ragged_record_counts() {
        let records = vec![ascending_record(); 7];
        let err = AnimationClip::from_records(&records, 3).unwrap_err();
        assert!(matches!(err, LoadError::MalformedDocument(_)), "{err:?}");
    }

    #[test]
    fn clip_rejects_empty_records() {
        let err = AnimationClip::from_records(&[], 3).unwrap_err();
        assert!(matches!(err, LoadError::MalformedDocument(_)), "{err:?}");
    }

    #[test]
    fn clip_rejects_a_zero_bone_count() {
        let records = vec![ascending_record(); 6];
        let err = AnimationClip::from_records(&records, 0).unwrap_err();
        assert!(matches!(err, LoadError::MalformedDocument(_)), "{err:?}");
    }

    #[test]
    fn clip_frames_stay_in_input_order() {
        let records: Vec<_> = (0..6).map(|i| translation_record(i as f32)).collect();
        let clip = AnimationClip::from_records(&records, 2).unwrap();
        assert_eq!(clip.frame_matrices(0)[0].w_axis.x, 0.0);
        assert_eq!(clip.frame_matrices(0)[1].w_axis.x, 1.0);
        assert_eq!(clip.frame_matrices(2)[1].w_axis.x, 5.0);
    }

    #[test]
    fn first_poll_only_arms() {
        let mut cursor = PlaybackCursor::new(25, 40.0);
        assert!(!cursor.advance(1_000_000.0));
        assert_eq!(cursor.frame(), 0);
    }

    #[test]
    fn steps_only_strictly_past_the_threshold() {
        let mut cursor = PlaybackCursor::new(25, 40.0);
        cursor.advance(0.0);
        assert!(!cursor.advance(40.0));
        assert_eq!(cursor.frame(), 0);
        assert!(cursor.advance(40.5));
        assert_eq!(cursor.frame(), 1);
    }

    #[test]
    fn a_single_poll_never_steps_twice() {
        let mut cursor = PlaybackCursor::new(25, 40.0);
        cursor.advance(0.0);
        assert!(cursor.advance(1_000_000.0));
        assert_eq!(cursor.frame(), 1);
    }

    #[test]
    fn short_polls_do_not_move_the_baseline() {
        let mut cursor = PlaybackCursor::new(25, 40.0);
        cursor.advance(0.0);
        assert!(!cursor.advance(30.0));
        // Still measured from the arm at 0, not from the failed poll.
        assert!(cursor.advance(41.0));
        assert_eq!(cursor.frame(), 1);
    }

    #[test]
    fn frame_wraps_modulo_frame_count() {
        let mut cursor = PlaybackCursor::new(25, 40.0);
        cursor.advance(0.0);
        for step in 1..=60usize {
            assert!(cursor.advance(step as f64 * 50.0));
            assert_eq!(cursor.frame(), step % 25);
        }
    }

    #[test]
    fn irregular_polls_step_only_on_strict_crossings() {
        let mut cursor = PlaybackCursor::new(3, 40.0);
        assert!(!cursor.advance(5.0));

        // The baseline only moves on a step, so short polls accumulate
        // toward the next crossing instead of resetting it.
        let polls = [
            (15.0, false),
            (46.0, true),
            (86.0, false),
            (86.5, true),
            (300.0, true),
            (301.0, false),
            (400.0, true),
        ];
        let mut steps = 0usize;
        for (now_ms, expect_step) in polls {
            assert_eq!(cursor.advance(now_ms), expect_step, "at {now_ms}");
            steps += usize::from(expect_step);
            assert_eq!(cursor.frame(), steps % 3);
        }
    }
}
