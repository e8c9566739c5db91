//! # Arpeggiator configuration
//!
//! Everything which differs between builds of the module is gathered here: calibration, chord and pattern tables,
//! where the tempo comes from, and timing constants. The configuration is fixed when the firmware is built, nothing is
//! loaded at runtime.

use crate::{
    clock::{bpm_to_quarter_ms, TempoSource, DEFAULT_BPM, DEFAULT_MAX_BPM, DEFAULT_MIN_BPM},
    error::ConfigError,
    indicator::ActivityIndicator,
    pattern::{PatternTable, SelectorRange},
    quantizer::{DEFAULT_HYSTERESIS, DEFAULT_MAX_OUTPUT_VOLTS},
};

/// An arpeggiator configuration is represented here
///
/// Build one with `ArpConfig::new` and adjust the public fields as needed.
///
/// # Examples
///
/// ```
/// # use arp_core::{clock::TempoSource, config::ArpConfig};
/// let mut config = ArpConfig::new(60);
/// config.tempo_source = TempoSource::Pot;
/// config.pulse_width_ms = 5;
///
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone)]
pub struct ArpConfig {
    /// The note number sitting at 0V on the pitch input
    pub reference_note: i32,

    /// The voltage a normalized pitch reading of 1.0 represents
    pub input_full_scale_volts: f32,

    /// Added to the 1volt/octave pitch before it is written, so notes below the reference stay positive
    pub output_offset_volts: f32,

    /// The top of the unipolar pitch output, the bottom is always 0V
    pub max_output_volts: f32,

    /// Quantizer hysteresis in semitones
    pub hysteresis: f32,

    /// The chord template and the patterns which walk over it
    pub patterns: PatternTable,

    /// How the pattern selector reading is interpreted
    pub selector_range: SelectorRange,

    /// Where the internal clock gets its tempo from
    pub tempo_source: TempoSource,

    /// Tempo range of the internal clock
    pub min_bpm: f32,
    pub max_bpm: f32,

    /// How long the gate stays high for each step, in milliseconds
    pub pulse_width_ms: u32,

    /// How often the arpeggiator is ticked, in hertz
    pub control_rate_hz: f32,

    /// Smoothing time of the tempo pot, in seconds
    pub tempo_smoothing_sec: f32,

    /// The activity LED output
    pub indicator: ActivityIndicator,
}

impl ArpConfig {
    /// `ArpConfig::new(r)` is the stock configuration with reference note `r` at 0V
    ///
    /// The reference note depends on how the module is calibrated, so there is no default for it.
    pub fn new(reference_note: i32) -> Self {
        Self {
            reference_note,
            input_full_scale_volts: 5.0_f32,
            output_offset_volts: 2.5_f32,
            max_output_volts: DEFAULT_MAX_OUTPUT_VOLTS,
            hysteresis: DEFAULT_HYSTERESIS,
            patterns: PatternTable::default(),
            selector_range: SelectorRange::Auto,
            tempo_source: TempoSource::Fixed(DEFAULT_BPM),
            min_bpm: DEFAULT_MIN_BPM,
            max_bpm: DEFAULT_MAX_BPM,
            pulse_width_ms: 10,
            control_rate_hz: 1_000.0_f32,
            tempo_smoothing_sec: 0.05_f32,
            indicator: ActivityIndicator::default(),
        }
    }

    /// `c.validate()` is `Ok` iff the configuration makes a working arpeggiator
    ///
    /// The gate pulse must be shorter than the shortest step the internal clock can make, which is a quarter note at
    /// the fastest tempo split across the longest pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(0.0 < self.min_bpm && self.min_bpm <= self.max_bpm) {
            return Err(ConfigError::InvalidTempoRange);
        }

        if !(0.0 < self.input_full_scale_volts && 0.0 < self.max_output_volts) {
            return Err(ConfigError::InvalidVoltageRange);
        }

        if !(is_positive_finite(self.control_rate_hz)
            && is_positive_finite(self.tempo_smoothing_sec))
        {
            return Err(ConfigError::InvalidControlRate);
        }

        let shortest_step_ms =
            bpm_to_quarter_ms(self.max_bpm) / self.patterns.longest_pattern() as f32;
        if shortest_step_ms <= self.pulse_width_ms as f32 {
            return Err(ConfigError::PulseTooWide);
        }

        Ok(())
    }
}

fn is_positive_finite(x: f32) -> bool {
    0.0 < x && x.is_finite()
}
