//! # Clock Source
//!
//! The arpeggiator steps along in time with a clock, which comes from one of two places:
//!
//! - `External`: trigger pulses arriving on the clock input. Each trigger is one quarter note, and the tempo is inferred
//!   from the time between the last two triggers.
//! - `Internal`: a free running generator, either at a fixed tempo or at a tempo set by a pot.
//!
//! Either way the clock produces `ClockTick` events. Every tick restarts the arpeggio pattern from the first step.
//!
//! Time is measured in milliseconds by a free running `u32` counter. All elapsed time math wraps, so the counter rolling
//! over is harmless.

use log::{debug, info};

use crate::smoothing::ControlSmoother;
use crate::utils::*;

/// Where the clock comes from is represented here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClockMode {
    External,
    Internal,
}

/// Where the internal clock gets its tempo from is represented here
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TempoSource {
    /// A fixed tempo in BPM
    Fixed(f32),
    /// A tempo control pot, mapped linearly from `[0.0, 1.0]` into the tempo range
    Pot,
}

/// A clock tick is represented here
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClockTick {
    /// When the tick happened, in milliseconds
    pub at_ms: u32,
    /// The tempo in beats per minute
    pub bpm: f32,
    /// The length of a quarter note in milliseconds
    pub quarter_ms: f32,
    /// True iff this tick produced a fresh tempo measurement
    pub tempo_updated: bool,
}

/// A clock source which produces clock ticks from external triggers or an internal generator is represented here
pub struct ClockSource {
    mode: ClockMode,
    tempo_source: TempoSource,

    min_bpm: f32,
    max_bpm: f32,

    bpm: f32,
    quarter_ms: f32,

    // the last external trigger, `None` means the next trigger starts a fresh measurement
    last_trigger_ms: Option<u32>,

    // the last internal tick, `None` means an internal tick is due right away
    last_internal_ms: Option<u32>,

    pot_smoother: ControlSmoother,
}

impl ClockSource {
    /// `ClockSource::new(ts, min, max, sr, t)` is a new clock in external mode
    ///
    /// # Arguments:
    ///
    /// * `tempo_source` - where the internal clock gets its tempo from
    ///
    /// * `min_bpm`, `max_bpm` - the tempo range of the internal clock
    ///
    /// * `control_rate_hz` - how often `poll` is called, used to smooth the tempo pot
    ///
    /// * `pot_smoothing_sec` - smoothing time of the tempo pot
    pub fn new(
        tempo_source: TempoSource,
        min_bpm: f32,
        max_bpm: f32,
        control_rate_hz: f32,
        pot_smoothing_sec: f32,
    ) -> Self {
        let mut clock = Self {
            mode: ClockMode::External,
            tempo_source,
            min_bpm,
            max_bpm,
            bpm: DEFAULT_BPM,
            quarter_ms: bpm_to_quarter_ms(DEFAULT_BPM),
            last_trigger_ms: None,
            last_internal_ms: None,
            pot_smoother: ControlSmoother::new(control_rate_hz, pot_smoothing_sec),
        };
        if let TempoSource::Fixed(bpm) = tempo_source {
            clock.set_bpm(bpm);
        }
        clock
    }

    /// `c.mode()` is the current clock mode
    pub fn mode(&self) -> ClockMode {
        self.mode
    }

    /// `c.bpm()` is the current tempo in beats per minute
    pub fn bpm(&self) -> f32 {
        self.bpm
    }

    /// `c.quarter_ms()` is the length of a quarter note at the current tempo, in milliseconds
    pub fn quarter_ms(&self) -> f32 {
        self.quarter_ms
    }

    /// `c.last_trigger_ms()` is the time of the last external trigger used for tempo measurement, if any
    pub fn last_trigger_ms(&self) -> Option<u32> {
        self.last_trigger_ms
    }

    /// `c.set_mode(m, pot)` switches the clock to mode `m`, does nothing if already in mode `m`
    ///
    /// Switching to internal makes an internal tick due right away and adopts the internal tempo, `tempo_control` is
    /// the tempo pot reading if there is one. Switching to external forgets the last trigger so the next trigger
    /// starts a fresh tempo measurement.
    pub fn set_mode(&mut self, mode: ClockMode, tempo_control: Option<f32>) {
        if mode == self.mode {
            return;
        }
        self.mode = mode;

        match mode {
            ClockMode::Internal => {
                self.last_internal_ms = None;
                self.pot_smoother.reset();
                self.update_internal_tempo(tempo_control);
            }
            ClockMode::External => {
                self.last_trigger_ms = None;
            }
        }

        info!("clock mode {:?}, {} bpm", mode, self.bpm);
    }

    /// `c.poll(now, trig, pot)` is a clock tick if one happens at time `now`, else `None`
    ///
    /// Must be called periodically, once per control tick.
    ///
    /// # Arguments:
    ///
    /// * `now_ms` - the current time in milliseconds
    ///
    /// * `trigger` - true iff a rising edge was seen on the clock input since the last poll, ignored in internal mode
    ///
    /// * `tempo_control` - the tempo pot reading in `[0.0, 1.0]` if there is one, only used in internal mode
    ///
    /// # Examples
    ///
    /// ```
    /// # use arp_core::clock::{ClockSource, TempoSource};
    /// let mut clock = ClockSource::new(TempoSource::Fixed(120.0), 20.0, 200.0, 1_000.0, 0.05);
    ///
    /// assert!(clock.poll(1_000, true, None).is_some());
    /// assert!(clock.poll(1_001, false, None).is_none());
    ///
    /// // half a second later, 120 beats per minute
    /// let tick = clock.poll(1_500, true, None).unwrap();
    /// assert_eq!(tick.bpm, 120.0);
    /// ```
    pub fn poll(&mut self, now_ms: u32, trigger: bool, tempo_control: Option<f32>) -> Option<ClockTick> {
        match self.mode {
            ClockMode::External => self.poll_external(now_ms, trigger),
            ClockMode::Internal => self.poll_internal(now_ms, tempo_control),
        }
    }

    fn poll_external(&mut self, now_ms: u32, trigger: bool) -> Option<ClockTick> {
        if !trigger {
            return None;
        }

        let mut tempo_updated = false;
        if let Some(last) = self.last_trigger_ms {
            let interval_ms = now_ms.wrapping_sub(last);
            // a zero interval says nothing about tempo, keep the old one
            if 0 < interval_ms {
                self.quarter_ms = interval_ms as f32;
                self.bpm = MS_PER_MINUTE / self.quarter_ms;
                tempo_updated = true;
                debug!("trigger interval {} ms, {} bpm", interval_ms, self.bpm);
            }
        }
        self.last_trigger_ms = Some(now_ms);

        Some(self.tick(now_ms, tempo_updated))
    }

    fn poll_internal(&mut self, now_ms: u32, tempo_control: Option<f32>) -> Option<ClockTick> {
        self.update_internal_tempo(tempo_control);

        let due = match self.last_internal_ms {
            None => true,
            Some(last) => self.quarter_ms <= now_ms.wrapping_sub(last) as f32,
        };
        if !due {
            return None;
        }

        self.last_internal_ms = Some(now_ms);
        Some(self.tick(now_ms, true))
    }

    // refresh the internal tempo from the fixed setting or the pot
    fn update_internal_tempo(&mut self, tempo_control: Option<f32>) {
        match self.tempo_source {
            TempoSource::Fixed(bpm) => self.set_bpm(bpm),
            TempoSource::Pot => {
                match tempo_control {
                    Some(pot) => {
                        let pot = self.pot_smoother.process(clamp(pot, 0.0_f32, 1.0_f32));
                        self.set_bpm(linear_interp(self.min_bpm, self.max_bpm, pot));
                    }
                    // without a reading the last tempo is kept, pulled back into range in case it was measured
                    // from external triggers
                    None => self.set_bpm(self.bpm),
                }
            }
        }
    }

    fn set_bpm(&mut self, bpm: f32) {
        self.bpm = clamp(bpm, self.min_bpm, self.max_bpm);
        self.quarter_ms = bpm_to_quarter_ms(self.bpm);
    }

    fn tick(&self, now_ms: u32, tempo_updated: bool) -> ClockTick {
        ClockTick {
            at_ms: now_ms,
            bpm: self.bpm,
            quarter_ms: self.quarter_ms,
            tempo_updated,
        }
    }
}

/// `bpm_to_quarter_ms(bpm)` is the length of one quarter note at tempo `bpm`, in milliseconds
pub fn bpm_to_quarter_ms(bpm: f32) -> f32 {
    MS_PER_MINUTE / bpm
}

const MS_PER_MINUTE: f32 = 60_000.0_f32;

/// The tempo before anything has been measured
pub const DEFAULT_BPM: f32 = 120.0_f32;

/// The slowest internal tempo by default
pub const DEFAULT_MIN_BPM: f32 = 20.0_f32;

/// The fastest internal tempo by default
pub const DEFAULT_MAX_BPM: f32 = 200.0_f32;

#[cfg(test)]
mod tests {
    use super::*;

    fn fixed(bpm: f32) -> ClockSource {
        ClockSource::new(TempoSource::Fixed(bpm), 20.0, 200.0, 1_000.0, 0.05)
    }

    #[test]
    fn external_ticks_only_on_trigger() {
        let mut c = fixed(120.0);
        assert!(c.poll(0, false, None).is_none());
        assert!(c.poll(1, true, None).is_some());
        assert!(c.poll(2, false, None).is_none());
    }

    #[test]
    fn first_trigger_keeps_default_tempo() {
        let mut c = fixed(90.0);
        let t = c.poll(100, true, None).unwrap();
        assert!(!t.tempo_updated);
        assert_eq!(t.at_ms, 100);
    }

    #[test]
    fn two_triggers_500ms_apart_is_120_bpm() {
        let mut c = fixed(90.0);
        c.poll(1_000, true, None);
        let t = c.poll(1_500, true, None).unwrap();
        assert!(t.tempo_updated);
        assert!(is_almost(t.bpm, 120.0, 1e-3));
        assert!(is_almost(t.quarter_ms, 500.0, 1e-3));
        assert!(is_almost(t.quarter_ms / 4.0, 125.0, 1e-3));
    }

    #[test]
    fn external_tempo_is_not_limited_to_internal_range() {
        let mut c = fixed(120.0);
        c.poll(0, true, None);
        let t = c.poll(100, true, None).unwrap();
        assert!(is_almost(t.bpm, 600.0, 1e-3));
    }

    #[test]
    fn zero_interval_keeps_tempo_but_still_ticks() {
        let mut c = fixed(120.0);
        c.poll(1_000, true, None);
        c.poll(1_400, true, None);
        let t = c.poll(1_400, true, None).unwrap();
        assert!(!t.tempo_updated);
        assert!(is_almost(t.bpm, 150.0, 1e-3));
    }

    #[test]
    fn interval_is_measured_across_timer_rollover() {
        let mut c = fixed(120.0);
        c.poll(u32::MAX - 249, true, None);
        let t = c.poll(250, true, None).unwrap();
        assert!(is_almost(t.quarter_ms, 500.0, 1e-3));
    }

    #[test]
    fn internal_ticks_right_away_then_every_quarter() {
        let mut c = fixed(120.0);
        c.set_mode(ClockMode::Internal, None);

        let t = c.poll(10, false, None).unwrap();
        assert_eq!(t.at_ms, 10);
        assert!(is_almost(t.quarter_ms, 500.0, 1e-3));

        assert!(c.poll(11, false, None).is_none());
        assert!(c.poll(509, false, None).is_none());
        assert!(c.poll(510, false, None).is_some());
        assert!(c.poll(1_009, false, None).is_none());
        assert!(c.poll(1_010, false, None).is_some());
    }

    #[test]
    fn internal_mode_ignores_triggers() {
        let mut c = fixed(120.0);
        c.set_mode(ClockMode::Internal, None);
        c.poll(0, false, None);
        assert!(c.poll(100, true, None).is_none());
    }

    #[test]
    fn fixed_tempo_is_clamped_to_range() {
        assert_eq!(fixed(500.0).bpm(), 200.0);
        assert_eq!(fixed(1.0).bpm(), 20.0);
    }

    #[test]
    fn pot_maps_linearly_into_tempo_range() {
        let mut c = ClockSource::new(TempoSource::Pot, 20.0, 200.0, 1_000.0, 0.05);
        c.set_mode(ClockMode::Internal, Some(0.5));
        assert!(is_almost(c.bpm(), 110.0, 0.01));

        let mut c = ClockSource::new(TempoSource::Pot, 20.0, 200.0, 1_000.0, 0.05);
        c.set_mode(ClockMode::Internal, Some(1.5));
        assert!(is_almost(c.bpm(), 200.0, 0.01));

        let mut c = ClockSource::new(TempoSource::Pot, 20.0, 200.0, 1_000.0, 0.05);
        c.set_mode(ClockMode::Internal, Some(-1.0));
        assert!(is_almost(c.bpm(), 20.0, 0.01));
    }

    #[test]
    fn pot_moves_are_smoothed() {
        let mut c = ClockSource::new(TempoSource::Pot, 20.0, 200.0, 1_000.0, 0.05);
        c.set_mode(ClockMode::Internal, Some(0.0));
        c.poll(0, false, Some(1.0));
        // one reading later the tempo has only moved part of the way
        assert!(20.0 < c.bpm() && c.bpm() < 110.0);

        for t in 1..1_000 {
            c.poll(t, false, Some(1.0));
        }
        assert!(is_almost(c.bpm(), 200.0, 0.5));
    }

    #[test]
    fn internal_tempo_stays_in_range_without_a_pot_reading() {
        let mut c = ClockSource::new(TempoSource::Pot, 20.0, 200.0, 1_000.0, 0.05);
        c.poll(0, true, None);
        c.poll(100, true, None);
        assert!(is_almost(c.bpm(), 600.0, 1e-3));

        c.set_mode(ClockMode::Internal, None);
        assert_eq!(c.bpm(), 200.0);

        let mut ticks = 0;
        for t in 101..1_000 {
            if let Some(tick) = c.poll(t, false, None) {
                assert_eq!(tick.bpm, 200.0);
                assert!(is_almost(tick.quarter_ms, 300.0, 1e-3));
                ticks += 1;
            }
        }
        // at 101, 401, and 701
        assert_eq!(ticks, 3);
    }

    #[test]
    fn switching_to_external_forgets_last_trigger() {
        let mut c = fixed(120.0);
        c.poll(0, true, None);
        assert_eq!(c.last_trigger_ms(), Some(0));

        c.set_mode(ClockMode::Internal, None);
        c.set_mode(ClockMode::External, None);
        assert_eq!(c.last_trigger_ms(), None);

        // the next trigger is a fresh start rather than a 10 second interval
        let t = c.poll(10_000, true, None).unwrap();
        assert!(!t.tempo_updated);
    }

    #[test]
    fn switching_back_to_internal_is_due_right_away() {
        let mut c = fixed(120.0);
        c.set_mode(ClockMode::Internal, None);
        c.poll(0, false, None);
        c.set_mode(ClockMode::External, None);
        c.set_mode(ClockMode::Internal, None);
        assert!(c.poll(1, false, None).is_some());
    }
}
