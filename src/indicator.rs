//! # Activity Indicator
//!
//! The front panel has an LED which shows that the module is alive, driven by a unipolar control voltage. It either
//! breathes at its own steady rate or pulses in time with the clock.
//!
//! Waveshapes are generated directly from a phase in `[0.0, 1.0)` which is worked out from the current time, so the
//! indicator doesn't care how often it is updated.

use crate::{lookup_tables, utils::*};

/// Indicator waveshapes are represented here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Waveshape {
    Sine,
    Triangle,
    Square,
}

impl Waveshape {
    /// `ws.at(p)` is the value of the waveshape at phase `p` in `[0.0, 1.0)`, the result is in `[-1.0, +1.0]`
    ///
    /// Phases outside of `[0.0, 1.0)` wrap around.
    pub fn at(self, phase: f32) -> f32 {
        let phase = fract(fabs(phase));
        match self {
            Waveshape::Sine => {
                let pos = phase * lookup_tables::SINE_LUT_SIZE as f32;
                let lut_idx = (pos as usize) % lookup_tables::SINE_LUT_SIZE;
                let next_lut_idx = (lut_idx + 1) % lookup_tables::SINE_LUT_SIZE;
                let y0 = lookup_tables::SINE_TABLE[lut_idx];
                let y1 = lookup_tables::SINE_TABLE[next_lut_idx];
                linear_interp(y0, y1, fract(pos))
            }
            Waveshape::Triangle => {
                // in-phase with the sine
                let raw_ramp = phase * 4.0_f32;
                if raw_ramp < 1.0_f32 {
                    raw_ramp
                } else if raw_ramp < 3.0_f32 {
                    2.0_f32 - raw_ramp
                } else {
                    raw_ramp - 4.0_f32
                }
            }
            Waveshape::Square => {
                if phase < 0.5_f32 {
                    1.0_f32
                } else {
                    -1.0_f32
                }
            }
        }
    }
}

/// What the indicator keeps time with is represented here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndicatorSync {
    /// Free running with a period in milliseconds
    Free { period_ms: u32 },
    /// One cycle per quarter note, restarting on every clock tick. Dark while the arpeggiator is idle.
    Tempo,
}

/// An activity indicator is represented here
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ActivityIndicator {
    waveshape: Waveshape,
    sync: IndicatorSync,
    max_volts: f32,
}

impl ActivityIndicator {
    /// `ActivityIndicator::new(ws, s, v)` is a new indicator with waveshape `ws`, timing `s`, and peak voltage `v`
    pub fn new(waveshape: Waveshape, sync: IndicatorSync, max_volts: f32) -> Self {
        Self {
            waveshape,
            sync,
            max_volts,
        }
    }

    /// `ind.value(now, beat, q)` is the indicator voltage at time `now`, in `[0.0, max_volts]`
    ///
    /// # Arguments:
    ///
    /// * `now_ms` - the current time in milliseconds
    ///
    /// * `beat_ms` - the time of the last clock tick, or `None` while idle
    ///
    /// * `quarter_ms` - the current length of a quarter note in milliseconds
    ///
    /// # Examples
    ///
    /// ```
    /// # use arp_core::indicator::{ActivityIndicator, IndicatorSync, Waveshape};
    /// let blink = ActivityIndicator::new(Waveshape::Square, IndicatorSync::Tempo, 5.0);
    ///
    /// // lit for the first half of each beat
    /// assert_eq!(blink.value(1_100, Some(1_000), 500.0), 5.0);
    /// assert_eq!(blink.value(1_300, Some(1_000), 500.0), 0.0);
    /// // dark while idle
    /// assert_eq!(blink.value(1_100, None, 500.0), 0.0);
    /// ```
    pub fn value(&self, now_ms: u32, beat_ms: Option<u32>, quarter_ms: f32) -> f32 {
        let phase = match self.sync {
            IndicatorSync::Free { period_ms } => {
                let period_ms = period_ms.max(1);
                (now_ms % period_ms) as f32 / period_ms as f32
            }
            IndicatorSync::Tempo => match beat_ms {
                Some(beat) if 0.0 < quarter_ms => now_ms.wrapping_sub(beat) as f32 / quarter_ms,
                _ => return 0.0_f32,
            },
        };

        let unipolar = (self.waveshape.at(phase) + 1.0_f32) * 0.5_f32;
        clamp(unipolar * self.max_volts, 0.0_f32, self.max_volts)
    }
}

impl Default for ActivityIndicator {
    /// `ActivityIndicator::default()` is a 5 volt sine breathing once per second
    fn default() -> Self {
        Self::new(Waveshape::Sine, IndicatorSync::Free { period_ms: 1_000 }, 5.0_f32)
    }
}
