//! # Arpeggiator
//!
//! The arpeggiator ties the other pieces together. Once per control tick it:
//!
//! - Follows the clock mode toggle and the pattern selector
//! - Quantizes the root note CV and offers the note to the note change queue
//! - Polls the clock, a clock tick restarts the pattern and plays its first step right away
//! - Plays the next step of the pattern when the step interval has passed
//! - Ends the gate pulse of the last step when the pulse width has passed
//!
//! All waiting is done by comparing timestamps, nothing ever blocks. Within one tick the clock is always polled before
//! the step timing is looked at, so a clock tick and a due step landing together are always resolved the same way: the
//! clock tick wins and the pattern restarts.
//!
//! The arpeggiator has no idea about hardware. `tick` takes a snapshot of the inputs and returns the outputs, and `run`
//! does the same against anything implementing `ControlIo`.

use log::{debug, trace};
use tinyrand::{Seeded, Wyrand};

use crate::{
    clock::{ClockMode, ClockSource, ClockTick},
    config::ArpConfig,
    error::ConfigError,
    indicator::ActivityIndicator,
    note_queue::NoteChangeQueue,
    pattern::{PatternSelector, PatternTable, RandomSource},
    quantizer::PitchQuantizer,
};

/// The hardware side of the module is represented here, as seen by the arpeggiator
///
/// ADC scaling, DAC writes, and switch debouncing all live on the other side of this trait.
pub trait ControlIo {
    /// The root note CV, normalized bipolar in `[-1.0, +1.0]`
    fn read_root_pitch(&mut self) -> f32;

    /// The pattern selector, unipolar `[0.0, 1.0]` or bipolar `[-1.0, +1.0]`
    fn read_pattern_selector(&mut self) -> f32;

    /// True exactly once per rising edge on the clock input
    fn read_trigger(&mut self) -> bool;

    /// The debounced clock source switch, true means internal clock
    fn read_clock_mode_toggle(&mut self) -> bool;

    /// The tempo pot in `[0.0, 1.0]`, if the module has one
    fn read_tempo_control(&mut self) -> Option<f32> {
        None
    }

    /// Write the pitch output, already clamped to the output range
    fn write_pitch(&mut self, volts: f32);

    /// Write the gate output
    fn write_gate(&mut self, high: bool);

    /// Write the activity LED voltage
    fn write_activity_indicator(&mut self, volts: f32);
}

/// One snapshot of the arpeggiator inputs is represented here
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Inputs {
    /// The root note CV, normalized bipolar
    pub root_cv: f32,
    /// The pattern selector reading
    pub selector: f32,
    /// True iff a rising edge was seen on the clock input
    pub trigger: bool,
    /// True iff the clock source switch is set to internal
    pub internal_clock: bool,
    /// The tempo pot reading, if there is one
    pub tempo_control: Option<f32>,
}

/// The arpeggiator outputs are represented here
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Outputs {
    /// The pitch output voltage, in `[0.0, max_output]`
    pub pitch_volts: f32,
    /// The gate output
    pub gate: bool,
    /// The activity LED voltage
    pub activity_volts: f32,
}

/// Gate output levels are represented here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    High,
    Low,
}

/// Arpeggiator states are represented here
///
/// The arpeggiator is in exactly one of these states at any given time
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum State {
    /// No clock tick yet, or the clock source was just switched
    Idle,
    /// Stepping through the pattern, with the gate in the pulse window or between steps
    Playing(Gate),
}

/// The playback position and timing of the arpeggiator is represented here
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackState {
    /// The pattern being played
    pub pattern: usize,
    /// The next step to play
    pub step: usize,
    /// Time between steps, in milliseconds
    pub step_interval_ms: f32,
    /// When the last step was played, or the last clock tick arrived
    pub step_origin_ms: u32,
    /// When the gate last went high
    pub gate_fired_ms: u32,
    /// When the last clock tick arrived, `None` while idle
    pub beat_ms: Option<u32>,
    /// True iff a step is due right away, set by clock ticks
    pub step_due: bool,
    /// True iff a clock tick has started playback
    pub triggered: bool,
    /// The gate output
    pub gate: bool,
    /// The pitch output voltage
    pub pitch_volts: f32,
}

/// A chord arpeggiator is represented here
pub struct Arpeggiator<R: RandomSource = Wyrand> {
    quantizer: PitchQuantizer,
    clock: ClockSource,
    patterns: PatternTable,
    selector: PatternSelector,
    queue: NoteChangeQueue,
    indicator: ActivityIndicator,
    rng: R,

    pulse_width_ms: u32,

    playback: PlaybackState,
}

impl Arpeggiator<Wyrand> {
    /// `Arpeggiator::seeded(c, s)` is a new arpeggiator with config `c` whose random pattern is seeded with `s`
    pub fn seeded(config: ArpConfig, seed: u64) -> Result<Self, ConfigError> {
        Self::new(config, Wyrand::seed(seed))
    }
}

impl<R: RandomSource> Arpeggiator<R> {
    /// `Arpeggiator::new(c, rng)` is a new idle arpeggiator with config `c` and random source `rng`
    ///
    /// The clock starts out in external mode, the first tick picks up the clock mode switch.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arp_core::{arpeggiator::{Arpeggiator, Inputs, State}, config::ArpConfig};
    /// let mut arp = Arpeggiator::seeded(ArpConfig::new(60), 1).unwrap();
    ///
    /// let idle = Inputs::default();
    /// let trig = Inputs { trigger: true, ..Inputs::default() };
    ///
    /// arp.tick(0, &idle);
    /// assert_eq!(arp.state(), State::Idle);
    ///
    /// // a trigger plays the root note right away
    /// let out = arp.tick(1, &trig);
    /// assert!(out.gate);
    /// assert_eq!(out.pitch_volts, 2.5);
    /// ```
    pub fn new(config: ArpConfig, rng: R) -> Result<Self, ConfigError> {
        config.validate()?;

        let quantizer = PitchQuantizer::new(config.reference_note, config.input_full_scale_volts)
            .with_output(config.output_offset_volts, config.max_output_volts)
            .with_hysteresis(config.hysteresis);

        let clock = ClockSource::new(
            config.tempo_source,
            config.min_bpm,
            config.max_bpm,
            config.control_rate_hz,
            config.tempo_smoothing_sec,
        );

        let step_interval_ms = clock.quarter_ms() / config.patterns.pattern(0).len() as f32;

        Ok(Self {
            quantizer,
            clock,
            selector: PatternSelector::new(config.selector_range),
            queue: NoteChangeQueue::new(config.reference_note),
            indicator: config.indicator,
            rng,
            pulse_width_ms: config.pulse_width_ms,
            playback: PlaybackState {
                pattern: 0,
                step: 0,
                step_interval_ms,
                step_origin_ms: 0,
                gate_fired_ms: 0,
                beat_ms: None,
                step_due: false,
                triggered: false,
                gate: false,
                pitch_volts: quantizer.output_volts(config.reference_note),
            },
            patterns: config.patterns,
        })
    }

    /// `arp.tick(now, ins)` advances the arpeggiator to time `now` with inputs `ins`, and is the new outputs
    ///
    /// Must be called periodically, ideally at the configured control rate.
    pub fn tick(&mut self, now_ms: u32, inputs: &Inputs) -> Outputs {
        // no step may start in a tick which began with the gate high, so every step gets a low gate first
        let gate_was_high = self.playback.gate;

        self.update_clock_mode(inputs);
        self.update_pattern(inputs.selector);

        let note = self.quantizer.convert(inputs.root_cv);
        self.queue.propose(note, self.playback.step, self.playback.triggered);

        if let Some(tick) = self.clock.poll(now_ms, inputs.trigger, inputs.tempo_control) {
            self.restart(tick);
        }

        if self.playback.gate
            && self.pulse_width_ms <= now_ms.wrapping_sub(self.playback.gate_fired_ms)
        {
            self.playback.gate = false;
        }

        let step_is_due = self.playback.step_due
            || self.playback.step_interval_ms
                <= now_ms.wrapping_sub(self.playback.step_origin_ms) as f32;

        if self.playback.triggered && !gate_was_high && step_is_due {
            self.play_step(now_ms);
        }

        Outputs {
            pitch_volts: self.playback.pitch_volts,
            gate: self.playback.gate,
            activity_volts: self.indicator.value(
                now_ms,
                self.playback.beat_ms,
                self.clock.quarter_ms(),
            ),
        }
    }

    /// `arp.run(io, now)` reads every input from `io`, ticks the arpeggiator, and writes every output back to `io`
    pub fn run<IO: ControlIo>(&mut self, io: &mut IO, now_ms: u32) -> Outputs {
        let inputs = Inputs {
            root_cv: io.read_root_pitch(),
            selector: io.read_pattern_selector(),
            trigger: io.read_trigger(),
            internal_clock: io.read_clock_mode_toggle(),
            tempo_control: io.read_tempo_control(),
        };

        let outputs = self.tick(now_ms, &inputs);

        io.write_pitch(outputs.pitch_volts);
        io.write_gate(outputs.gate);
        io.write_activity_indicator(outputs.activity_volts);

        outputs
    }

    /// `arp.state()` is the current state of the arpeggiator
    pub fn state(&self) -> State {
        match (self.playback.triggered, self.playback.gate) {
            (false, _) => State::Idle,
            (true, true) => State::Playing(Gate::High),
            (true, false) => State::Playing(Gate::Low),
        }
    }

    /// `arp.playback()` is the current playback position and timing
    pub fn playback(&self) -> &PlaybackState {
        &self.playback
    }

    /// `arp.clock()` is the clock source
    pub fn clock(&self) -> &ClockSource {
        &self.clock
    }

    /// `arp.root_note()` is the root note in use
    pub fn root_note(&self) -> i32 {
        self.queue.active()
    }

    /// `arp.pending_root_note()` is the root note waiting for the next pattern pass, if any
    pub fn pending_root_note(&self) -> Option<i32> {
        self.queue.pending()
    }

    fn update_clock_mode(&mut self, inputs: &Inputs) {
        let mode = if inputs.internal_clock {
            ClockMode::Internal
        } else {
            ClockMode::External
        };
        if mode == self.clock.mode() {
            return;
        }

        self.clock.set_mode(mode, inputs.tempo_control);

        self.playback.step = 0;
        self.playback.step_due = false;
        self.playback.triggered = false;
        self.playback.gate = false;
        self.playback.beat_ms = None;
        self.playback.step_interval_ms = self.step_interval(self.clock.quarter_ms());
    }

    fn update_pattern(&mut self, selector: f32) {
        let pattern = self.selector.select(selector, self.patterns.len());
        if pattern == self.playback.pattern {
            return;
        }

        self.playback.pattern = pattern;
        self.playback.step = 0;
        // one quarter note still takes the same time, however many steps it is split into
        self.playback.step_interval_ms = self.step_interval(self.clock.quarter_ms());

        debug!(
            "pattern {} ({}), step interval {} ms",
            pattern,
            self.patterns.pattern(pattern).name(),
            self.playback.step_interval_ms
        );
    }

    fn restart(&mut self, tick: ClockTick) {
        self.playback.triggered = true;
        self.playback.step = 0;
        self.playback.step_due = true;
        self.playback.step_origin_ms = tick.at_ms;
        self.playback.beat_ms = Some(tick.at_ms);
        self.playback.step_interval_ms = self.step_interval(tick.quarter_ms);
    }

    fn play_step(&mut self, now_ms: u32) {
        let step = self.playback.step;

        if self.queue.drain_if_due(step) {
            trace!("root note now {}", self.queue.active());
        }

        let degree = self
            .patterns
            .chord_index(self.playback.pattern, step, &mut self.rng);
        let note = self
            .queue
            .active()
            .saturating_add(self.patterns.chord().offset(degree));

        self.playback.pitch_volts = self.quantizer.output_volts(note);
        self.playback.gate = true;
        self.playback.gate_fired_ms = now_ms;

        self.playback.step = (step + 1) % self.patterns.pattern(self.playback.pattern).len();
        self.playback.step_origin_ms = now_ms;
        self.playback.step_due = false;
    }

    // the time between steps for quarter notes `quarter_ms` long, never so short the gate pulse wouldn't fit
    fn step_interval(&self, quarter_ms: f32) -> f32 {
        let len = self.patterns.pattern(self.playback.pattern).len() as f32;
        (quarter_ms / len).max((self.pulse_width_ms + 1) as f32)
    }
}
