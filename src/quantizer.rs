//! # Pitch Quantizer
//!
//! Quantizers are used to force continuous inputs into discrete output steps. Musically they are used to generate
//! in-tune outputs from various inputs.
//!
//! This quantizer uses 1volt/octave scaling. This means that each octave spans 1 volt, and so each semitone spans 1/12
//! of a volt, or about 83.3mV.
//!
//! Inputs are normalized bipolar readings in `[-1.0, +1.0]` which represent a symmetric voltage span such as
//! `[-5V, +5V]`. Note numbers are plain integers, offset by a reference note which marks the note sitting at 0V. The
//! right reference depends on how the module is calibrated so it has no default.

use crate::utils::*;

/// A pitch quantizer which converts smooth CV readings into note numbers and back is represented here.
#[derive(Debug, Clone, Copy)]
pub struct PitchQuantizer {
    // the note number which sits at 0V
    reference_note: i32,

    // the voltage represented by a normalized reading of 1.0
    input_full_scale_volts: f32,

    // offset and ceiling of the unipolar output stage
    output_offset_volts: f32,
    max_output_volts: f32,

    // extra width on each side of the last note before a new note is chosen, in semitones
    hysteresis: f32,

    // the last note returned by `convert`, `None` until the first conversion
    cached_note: Option<i32>,
}

impl PitchQuantizer {
    /// `PitchQuantizer::new(r, fs)` is a new quantizer with reference note `r` at 0V and full scale input `fs` volts
    ///
    /// The output offset defaults to zero, the output ceiling to `DEFAULT_MAX_OUTPUT_VOLTS`, and hysteresis to
    /// `DEFAULT_HYSTERESIS`.
    pub fn new(reference_note: i32, input_full_scale_volts: f32) -> Self {
        Self {
            reference_note,
            input_full_scale_volts,
            output_offset_volts: 0.0_f32,
            max_output_volts: DEFAULT_MAX_OUTPUT_VOLTS,
            hysteresis: DEFAULT_HYSTERESIS,
            cached_note: None,
        }
    }

    /// `q.with_output(o, m)` is the quantizer with output offset `o` volts and output ceiling `m` volts
    pub fn with_output(mut self, offset_volts: f32, max_volts: f32) -> Self {
        self.output_offset_volts = offset_volts;
        self.max_output_volts = max_volts;
        self
    }

    /// `q.with_hysteresis(h)` is the quantizer with `h` semitones of hysteresis, clamped to `[0.0, 0.5]`
    pub fn with_hysteresis(mut self, semitones: f32) -> Self {
        self.hysteresis = clamp(semitones, 0.0_f32, 0.5_f32);
        self
    }

    /// `q.quantize(cv)` is the normalized reading `cv` converted to the nearest note number
    ///
    /// Rounds to the nearest note, halfway cases round away from the reference note. Readings far outside of
    /// `[-1.0, +1.0]` saturate instead of overflowing.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arp_core::quantizer::PitchQuantizer;
    /// // +/-5V input span, MIDI note 60 sits at 0V
    /// let q = PitchQuantizer::new(60, 5.0);
    ///
    /// assert_eq!(q.quantize(0.0), 60);
    /// // one volt up is one octave up
    /// assert_eq!(q.quantize(0.2), 72);
    /// // a bit more than half a semitone below 0V
    /// assert_eq!(q.quantize(-0.6 / 12. / 5.), 59);
    /// ```
    pub fn quantize(&self, normalized_cv: f32) -> i32 {
        round_to_int(self.semitones(normalized_cv))
    }

    /// `q.convert(cv)` is like `q.quantize(cv)` but sticks to the previous note while `cv` stays near it
    ///
    /// Noisy readings sitting right on the border between two semitones would otherwise flip back and forth between
    /// them.
    pub fn convert(&mut self, normalized_cv: f32) -> i32 {
        let semitones = self.semitones(normalized_cv);

        if let Some(note) = self.cached_note {
            if fabs(semitones - note as f32) < HALF_SEMITONE + self.hysteresis {
                return note;
            }
        }

        let note = round_to_int(semitones);
        self.cached_note = Some(note);
        note
    }

    /// `q.note_to_volts(n)` is the 1volt/octave voltage of note `n` relative to the reference note, not clamped
    pub fn note_to_volts(&self, note: i32) -> f32 {
        (note as f32 - self.reference_note as f32) / SEMITONES_PER_OCTAVE
    }

    /// `q.note_to_normalized(n)` is the normalized input reading which represents note `n`
    pub fn note_to_normalized(&self, note: i32) -> f32 {
        self.note_to_volts(note) / self.input_full_scale_volts
    }

    /// `q.output_volts(n)` is the voltage to write to the unipolar pitch output for note `n`
    ///
    /// The output offset is added and the result is clamped to `[0.0, max_output]`.
    pub fn output_volts(&self, note: i32) -> f32 {
        clamp(
            self.note_to_volts(note) + self.output_offset_volts,
            0.0_f32,
            self.max_output_volts,
        )
    }

    // the reading as a fractional note number
    fn semitones(&self, normalized_cv: f32) -> f32 {
        normalized_cv * self.input_full_scale_volts * SEMITONES_PER_OCTAVE
            + self.reference_note as f32
    }
}

pub const SEMITONES_PER_OCTAVE: f32 = 12.0_f32;

/// The width of one semitone in volts
pub const SEMITONE_WIDTH: f32 = 1.0_f32 / SEMITONES_PER_OCTAVE;

const HALF_SEMITONE: f32 = 0.5_f32;

/// Hysteresis provides some noise immunity and prevents oscillations near transition regions, in semitones
pub const DEFAULT_HYSTERESIS: f32 = 0.1_f32;

/// The top of the unipolar pitch output
pub const DEFAULT_MAX_OUTPUT_VOLTS: f32 = 5.0_f32;

#[cfg(test)]
mod tests {
    use super::*;

    fn q() -> PitchQuantizer {
        PitchQuantizer::new(60, 5.0)
    }

    #[test]
    fn zero_volts_is_reference_note() {
        assert_eq!(q().quantize(0.0), 60);
        assert_eq!(PitchQuantizer::new(11, 5.0).quantize(0.0), 11);
    }

    #[test]
    fn one_semitone_up_is_reference_plus_one() {
        assert_eq!(q().quantize(SEMITONE_WIDTH / 5.0), 61);
    }

    #[test]
    fn rounds_instead_of_truncating() {
        // 0.7 of a semitone up and down
        assert_eq!(q().quantize(0.7 * SEMITONE_WIDTH / 5.0), 61);
        assert_eq!(q().quantize(-0.7 * SEMITONE_WIDTH / 5.0), 59);
        // 0.3 of a semitone stays put
        assert_eq!(q().quantize(0.3 * SEMITONE_WIDTH / 5.0), 60);
        assert_eq!(q().quantize(-0.3 * SEMITONE_WIDTH / 5.0), 60);
    }

    #[test]
    fn full_scale_is_five_octaves_each_way() {
        assert_eq!(q().quantize(1.0), 120);
        assert_eq!(q().quantize(-1.0), 0);
    }

    #[test]
    fn round_trip_recovers_every_note_in_range() {
        let q = q();
        for n in 0..=120 {
            assert_eq!(q.quantize(q.note_to_normalized(n)), n);
        }
    }

    #[test]
    fn extreme_readings_saturate() {
        assert_eq!(q().quantize(1.0e9), i32::MAX);
        assert_eq!(q().quantize(-1.0e9), i32::MIN);
    }

    #[test]
    fn note_to_volts_is_inverse_linear() {
        let q = q();
        assert_eq!(q.note_to_volts(60), 0.0);
        assert_eq!(q.note_to_volts(72), 1.0);
        assert_eq!(q.note_to_volts(48), -1.0);
        assert!(is_almost(q.note_to_volts(64), 4.0 / 12.0, 1e-6));
    }

    #[test]
    fn output_is_offset_and_clamped() {
        let q = q().with_output(2.5, 5.0);
        assert_eq!(q.output_volts(60), 2.5);
        assert_eq!(q.output_volts(72), 3.5);
        // well above and below the output span
        assert_eq!(q.output_volts(200), 5.0);
        assert_eq!(q.output_volts(-200), 0.0);
        assert_eq!(q.output_volts(i32::MAX), 5.0);
    }

    #[test]
    fn hysteresis_widens_window() {
        let mut q = q();
        let semi = SEMITONE_WIDTH / 5.0;

        // register a conversion with note 61
        assert_eq!(q.convert(semi), 61);

        // a little past the halfway points it still sticks to 61
        assert_eq!(q.convert(0.45 * semi), 61);
        assert_eq!(q.convert(1.55 * semi), 61);

        // well past the hysteresis window it moves on
        assert_eq!(q.convert(1.7 * semi), 62);

        // from scratch the same reading lands on the neighbor
        let mut q = PitchQuantizer::new(60, 5.0);
        assert_eq!(q.convert(0.45 * semi), 60);
    }

    #[test]
    fn zero_hysteresis_matches_quantize() {
        let mut q = q().with_hysteresis(0.0);
        let semi = SEMITONE_WIDTH / 5.0;
        assert_eq!(q.convert(semi), 61);
        assert_eq!(q.convert(0.45 * semi), 60);
    }
}
