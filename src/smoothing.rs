//! # Control Smoother
//!
//! Front panel pots are noisy, and a tempo pot which wobbles by a fraction of a BPM makes every step land a little
//! early or late. The smoother is a single pole lowpass filter which irons the readings out before they are used.

use crate::utils::*;
use biquad::*;

/// A control signal smoother is represented here.
pub struct ControlSmoother {
    // sample rate in hertz
    fs: Hertz<f32>,

    // max cutoff frequency, just below nyquist
    max_fc: f32,

    // internal lowpass filter
    lpf: DirectForm1<f32>,

    // cached val to avoid recalculating unnecessarily
    cached_t: f32,

    // false until the first sample, which loads the filter history so it starts settled at that reading
    primed: bool,
}

impl ControlSmoother {
    /// `ControlSmoother::new(sr, t)` is a new smoother with sample rate `sr` and smoothing time `t` seconds
    ///
    /// A sample rate which is not positive and finite is replaced with `FALLBACK_SAMPLE_RATE_HZ`.
    pub fn new(sample_rate_hz: f32, smoothing_time_sec: f32) -> Self {
        let sample_rate_hz = if 0.0 < sample_rate_hz && sample_rate_hz.is_finite() {
            sample_rate_hz
        } else {
            FALLBACK_SAMPLE_RATE_HZ
        };
        let max_fc = sample_rate_hz * 0.49_f32;

        let mut smoother = Self {
            fs: sample_rate_hz.hz(),
            max_fc,
            lpf: DirectForm1::<f32>::new(PASS_THROUGH),
            cached_t: -1.0_f32, // initialized such that it always updates the first go-round
            primed: false,
        };
        smoother.set_time(smoothing_time_sec);
        smoother
    }

    /// `s.set_time(t)` sets the smoothing time to `t` seconds
    ///
    /// Times that would put the cutoff above nyquist are clamped. Filter coefficients are only recalculated when the
    /// time actually changes.
    pub fn set_time(&mut self, t: f32) {
        if is_almost(t, self.cached_t, 0.001_f32) {
            return;
        }

        self.cached_t = t;

        let f0 = (1.0_f32 / t).max(MIN_FC).min(self.max_fc);
        // keep the old coefficients if these can't be made, the next call gets another try
        let coeffs = Hertz::<f32>::from_hz(f0).and_then(|f0| {
            Coefficients::<f32>::from_params(Type::SinglePoleLowPass, self.fs, f0, Q_BUTTERWORTH_F32)
        });
        if let Ok(c) = coeffs {
            self.lpf.update_coefficients(c);
        }
    }

    /// `s.process(v)` is the value `v` smoothed, must be called periodically at the sample rate
    pub fn process(&mut self, val: f32) -> f32 {
        if !self.primed {
            self.primed = true;
            // two samples through a pass through filter fill the whole history with the first reading, which is the
            // settled state of any unity gain lowpass no matter how slow
            let coeffs = self.lpf.replace_coefficients(PASS_THROUGH);
            self.lpf.run(val);
            self.lpf.run(val);
            self.lpf.update_coefficients(coeffs);
        }
        self.lpf.run(val)
    }

    /// `s.reset()` forgets the filter history, the next sample starts fresh
    pub fn reset(&mut self) {
        self.lpf.reset_state();
        self.primed = false;
    }
}

const MIN_FC: f32 = 0.1_f32;

/// The sample rate used when the one asked for is not usable
pub const FALLBACK_SAMPLE_RATE_HZ: f32 = 1_000.0_f32;

const PASS_THROUGH: Coefficients<f32> = Coefficients {
    a1: 0.0_f32,
    a2: 0.0_f32,
    b0: 1.0_f32,
    b1: 0.0_f32,
    b2: 0.0_f32,
};
