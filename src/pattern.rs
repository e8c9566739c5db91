//! # Pattern Sequencer
//!
//! An arpeggio is built from two pieces of data:
//!
//! - A chord template, the semitone offsets of each chord degree above the root note
//! - A pattern, the order in which the chord degrees are played
//!
//! Patterns are stored in a fixed size table, one of them is picked by a selector reading which may come from a
//! unipolar front panel pot or a bipolar CV input. Most patterns are a fixed list of chord degrees, one plays the chord
//! degrees in random order. The random pattern draws its numbers from an injected `RandomSource` so that it can be
//! replaced by something deterministic.

use heapless::Vec;
use tinyrand::{Rand, Wyrand};

use crate::error::ConfigError;

/// The most intervals a chord template may hold
pub const MAX_CHORD_LEN: usize = 8;

/// The most steps a single pattern may hold
pub const MAX_PATTERN_LEN: usize = 8;

/// The most patterns a pattern table may hold
pub const MAX_PATTERNS: usize = 16;

/// A chord template is represented here, an ordered list of semitone offsets above the root note
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChordTemplate {
    offsets: Vec<i32, MAX_CHORD_LEN>,
}

impl ChordTemplate {
    /// Root, major third, perfect fifth, minor seventh
    pub const DOMINANT_SEVENTH: [i32; 4] = [0, 4, 7, 10];

    /// `ChordTemplate::new(os)` is a new chord template with semitone offsets `os`
    pub fn new(offsets: &[i32]) -> Result<Self, ConfigError> {
        if offsets.is_empty() {
            return Err(ConfigError::EmptyChord);
        }
        Ok(Self {
            offsets: Vec::from_slice(offsets).map_err(|_| ConfigError::CapacityExceeded)?,
        })
    }

    /// `c.offset(i)` is the semitone offset of chord degree `i`, out of range degrees wrap around
    pub fn offset(&self, index: usize) -> i32 {
        self.offsets[index % self.offsets.len()]
    }

    /// `c.len()` is the number of chord degrees
    pub fn len(&self) -> usize {
        self.offsets.len()
    }

    /// `c.is_empty()` is always false for a chord built with `new`
    pub fn is_empty(&self) -> bool {
        self.offsets.is_empty()
    }
}

impl Default for ChordTemplate {
    /// `ChordTemplate::default()` is a dominant seventh chord
    fn default() -> Self {
        let mut offsets = Vec::new();
        for o in Self::DOMINANT_SEVENTH {
            offsets.push(o).ok();
        }
        Self { offsets }
    }
}

// the order in which a pattern walks the chord degrees
#[derive(Debug, Clone, PartialEq, Eq)]
enum Steps {
    /// A fixed list of chord degrees played in order
    Fixed(Vec<u8, MAX_PATTERN_LEN>),
    /// A number of steps, each step plays a uniformly random chord degree
    Random(usize),
}

/// An arpeggio pattern is represented here
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Pattern {
    name: &'static str,
    steps: Steps,
}

impl Pattern {
    /// `Pattern::fixed(n, ss)` is a new pattern named `n` which plays chord degrees `ss` in order
    ///
    /// Patterns must have between 1 and `MAX_PATTERN_LEN` steps. Whether the chord degrees exist is checked against
    /// the chord template when the pattern table is validated.
    pub fn fixed(name: &'static str, steps: &[u8]) -> Result<Self, ConfigError> {
        if steps.is_empty() {
            return Err(ConfigError::CapacityExceeded);
        }
        Ok(Self {
            name,
            steps: Steps::Fixed(Vec::from_slice(steps).map_err(|_| ConfigError::CapacityExceeded)?),
        })
    }

    /// `Pattern::random(n, l)` is a new pattern named `n` with `l` steps of random chord degrees
    pub fn random(name: &'static str, len: usize) -> Result<Self, ConfigError> {
        if len == 0 || MAX_PATTERN_LEN < len {
            return Err(ConfigError::CapacityExceeded);
        }
        Ok(Self {
            name,
            steps: Steps::Random(len),
        })
    }

    /// `p.len()` is the number of steps in one pass of the pattern
    pub fn len(&self) -> usize {
        match &self.steps {
            Steps::Fixed(s) => s.len(),
            Steps::Random(len) => *len,
        }
    }

    /// `p.is_empty()` is always false for a pattern built with `fixed` or `random`
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// `p.name()` is the display name of the pattern
    pub fn name(&self) -> &'static str {
        self.name
    }

    /// `p.chord_index(s, c, rng)` is the chord degree to play at step `s`, for a chord template with `c` degrees
    ///
    /// Steps past the end of the pattern wrap around. The random pattern asks `rng` for a new degree every time.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arp_core::pattern::Pattern;
    /// # use tinyrand::{Seeded, Wyrand};
    /// let mut rng = Wyrand::seed(1);
    /// let up_down = Pattern::fixed("up-down", &[0, 1, 2, 3, 2, 1]).unwrap();
    ///
    /// assert_eq!(up_down.chord_index(4, 4, &mut rng), 2);
    /// // wraps around after 6 steps
    /// assert_eq!(up_down.chord_index(7, 4, &mut rng), 1);
    /// ```
    pub fn chord_index<R: RandomSource>(&self, step: usize, chord_len: usize, rng: &mut R) -> usize {
        match &self.steps {
            Steps::Fixed(s) => s[step % s.len()] as usize,
            Steps::Random(_) => rng.next_index(chord_len),
        }
    }
}

/// A source of random chord degrees is represented here
pub trait RandomSource {
    /// `r.next_index(b)` is a uniformly distributed number in `[0, b)`, or zero if `b` is zero
    fn next_index(&mut self, bound: usize) -> usize;
}

impl RandomSource for Wyrand {
    fn next_index(&mut self, bound: usize) -> usize {
        if bound == 0 {
            return 0;
        }
        self.next_lim_u32(bound as u32) as usize
    }
}

/// How the pattern selector reading should be interpreted is represented here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectorRange {
    /// Readings in `[0.0, 1.0]`, typical of a front panel pot
    Unipolar,
    /// Readings in `[-1.0, 1.0]`, typical of a CV input
    Bipolar,
    /// Unipolar until the first negative reading is seen, bipolar from then on
    Auto,
}

/// A table of patterns and the chord template they walk over is represented here
#[derive(Debug, Clone)]
pub struct PatternTable {
    chord: ChordTemplate,
    patterns: Vec<Pattern, MAX_PATTERNS>,
}

impl PatternTable {
    /// `PatternTable::new(c, ps)` is a new pattern table over chord `c` holding patterns `ps`
    ///
    /// Every chord degree in every fixed pattern must exist in `c`.
    pub fn new(chord: ChordTemplate, patterns: &[Pattern]) -> Result<Self, ConfigError> {
        if patterns.is_empty() {
            return Err(ConfigError::EmptyPatternTable);
        }

        for (p_idx, p) in patterns.iter().enumerate() {
            if let Steps::Fixed(steps) = &p.steps {
                if let Some((step, &index)) = steps
                    .iter()
                    .enumerate()
                    .find(|&(_, &i)| chord.len() <= i as usize)
                {
                    return Err(ConfigError::PatternIndexOutOfRange {
                        pattern: p_idx,
                        step,
                        index,
                    });
                }
            }
        }

        Ok(Self {
            chord,
            patterns: Vec::from_slice(patterns).map_err(|_| ConfigError::CapacityExceeded)?,
        })
    }

    /// `t.len()` is the number of patterns in the table
    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    /// `t.is_empty()` is always false for a table built with `new`
    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// `t.pattern(id)` is pattern number `id`, out of range ids are clamped to the last pattern
    pub fn pattern(&self, id: usize) -> &Pattern {
        &self.patterns[id.min(self.patterns.len() - 1)]
    }

    /// `t.chord()` is the chord template of the table
    pub fn chord(&self) -> &ChordTemplate {
        &self.chord
    }

    /// `t.chord_index(id, s, rng)` is the chord degree pattern `id` plays at step `s`
    pub fn chord_index<R: RandomSource>(&self, id: usize, step: usize, rng: &mut R) -> usize {
        self.pattern(id).chord_index(step, self.chord.len(), rng)
    }

    /// `t.longest_pattern()` is the number of steps in the longest pattern of the table
    pub fn longest_pattern(&self) -> usize {
        self.patterns.iter().map(Pattern::len).max().unwrap_or(1)
    }
}

impl Default for PatternTable {
    /// `PatternTable::default()` is the stock set of patterns over a dominant seventh chord
    fn default() -> Self {
        let mut patterns = Vec::new();
        for (name, steps) in DEFAULT_PATTERNS {
            if let Ok(p) = Pattern::fixed(name, steps) {
                patterns.push(p).ok();
            }
        }
        if let Ok(p) = Pattern::random("random", 4) {
            patterns.push(p).ok();
        }
        Self {
            chord: ChordTemplate::default(),
            patterns,
        }
    }
}

const DEFAULT_PATTERNS: [(&str, &[u8]); 6] = [
    ("up", &[0, 1, 2, 3]),
    ("down", &[3, 2, 1, 0]),
    ("up-down", &[0, 1, 2, 3, 2, 1]),
    ("up-down inclusive", &[0, 1, 2, 3, 3, 2, 1, 0]),
    ("converge", &[0, 3, 1, 2]),
    ("pedal", &[0, 1, 0, 2, 0, 3]),
];

/// A pattern selector which maps a selector reading onto a pattern number is represented here
#[derive(Debug, Clone, Copy)]
pub struct PatternSelector {
    range: SelectorRange,
    seen_negative: bool,
}

impl PatternSelector {
    /// `PatternSelector::new(r)` is a new selector interpreting readings as range `r`
    pub fn new(range: SelectorRange) -> Self {
        Self {
            range,
            seen_negative: false,
        }
    }

    /// `s.select(v, n)` is the reading `v` mapped into one of `n` equal width buckets, in `[0, n)`
    ///
    /// Readings outside of the selector range land in the first or last bucket.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arp_core::pattern::{PatternSelector, SelectorRange};
    /// let mut pot = PatternSelector::new(SelectorRange::Unipolar);
    /// assert_eq!(pot.select(0.0, 4), 0);
    /// assert_eq!(pot.select(0.6, 4), 2);
    /// assert_eq!(pot.select(1.0, 4), 3);
    ///
    /// let mut cv = PatternSelector::new(SelectorRange::Bipolar);
    /// assert_eq!(cv.select(-1.0, 4), 0);
    /// assert_eq!(cv.select(0.0, 4), 2);
    /// ```
    pub fn select(&mut self, reading: f32, num_patterns: usize) -> usize {
        if num_patterns == 0 {
            return 0;
        }

        if reading < 0.0 {
            self.seen_negative = true;
        }

        let bipolar = match self.range {
            SelectorRange::Unipolar => false,
            SelectorRange::Bipolar => true,
            SelectorRange::Auto => self.seen_negative,
        };

        let unit = if bipolar {
            (reading + 1.0_f32) / 2.0_f32
        } else {
            reading
        };
        let unit = unit.max(0.0_f32).min(1.0_f32);

        ((unit * num_patterns as f32) as usize).min(num_patterns - 1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tinyrand::Seeded;

    // plays back a fixed list of numbers
    struct Scripted<'a> {
        vals: &'a [usize],
        pos: usize,
    }

    impl RandomSource for Scripted<'_> {
        fn next_index(&mut self, bound: usize) -> usize {
            let v = self.vals[self.pos % self.vals.len()];
            self.pos += 1;
            v % bound
        }
    }

    fn pass(table: &PatternTable, id: usize) -> Vec<usize, MAX_PATTERN_LEN> {
        let mut rng = Wyrand::seed(0);
        let mut res = Vec::new();
        for s in 0..table.pattern(id).len() {
            res.push(table.chord_index(id, s, &mut rng)).ok();
        }
        res
    }

    #[test]
    fn default_patterns_reproduce_their_tables() {
        let table = PatternTable::default();
        for (id, (_, steps)) in DEFAULT_PATTERNS.iter().enumerate() {
            let played = pass(&table, id);
            assert_eq!(played.len(), steps.len());
            for (a, b) in played.iter().zip(steps.iter()) {
                assert_eq!(*a, *b as usize);
            }
        }
    }

    #[test]
    fn up_down_six_steps() {
        let table = PatternTable::default();
        assert_eq!(table.pattern(2).name(), "up-down");
        assert_eq!(&pass(&table, 2)[..], &[0, 1, 2, 3, 2, 1]);
    }

    #[test]
    fn default_table_lengths_are_four_to_eight() {
        let table = PatternTable::default();
        assert_eq!(table.len(), 7);
        for id in 0..table.len() {
            let len = table.pattern(id).len();
            assert!(4 <= len && len <= 8);
        }
        assert_eq!(table.longest_pattern(), 8);
    }

    #[test]
    fn steps_wrap_around() {
        let table = PatternTable::default();
        let mut rng = Wyrand::seed(0);
        assert_eq!(table.chord_index(0, 4, &mut rng), 0);
        assert_eq!(table.chord_index(1, 5, &mut rng), 2);
    }

    #[test]
    fn random_pattern_uses_injected_source() {
        let table = PatternTable::default();
        let mut rng = Scripted {
            vals: &[3, 1, 6, 2],
            pos: 0,
        };
        let random_id = table.len() - 1;
        assert_eq!(table.chord_index(random_id, 0, &mut rng), 3);
        assert_eq!(table.chord_index(random_id, 1, &mut rng), 1);
        // 6 wraps into the 4 chord degrees
        assert_eq!(table.chord_index(random_id, 2, &mut rng), 2);
        assert_eq!(table.chord_index(random_id, 3, &mut rng), 2);
    }

    #[test]
    fn random_pattern_stays_in_range_and_repeats_with_same_seed() {
        let table = PatternTable::default();
        let random_id = table.len() - 1;
        let mut rng_a = Wyrand::seed(42);
        let mut rng_b = Wyrand::seed(42);
        for s in 0..1_000 {
            let a = table.chord_index(random_id, s, &mut rng_a);
            let b = table.chord_index(random_id, s, &mut rng_b);
            assert!(a < table.chord().len());
            assert_eq!(a, b);
        }
    }

    #[test]
    fn wyrand_zero_bound_is_zero() {
        let mut rng = Wyrand::seed(7);
        assert_eq!(rng.next_index(0), 0);
    }

    #[test]
    fn pattern_with_missing_chord_degree_is_rejected() {
        let chord = ChordTemplate::new(&[0, 4, 7]).unwrap();
        let ok = Pattern::fixed("ok", &[0, 1, 2]).unwrap();
        let bad = Pattern::fixed("bad", &[0, 1, 2, 3]).unwrap();
        assert_eq!(
            PatternTable::new(chord, &[ok, bad]).unwrap_err(),
            ConfigError::PatternIndexOutOfRange {
                pattern: 1,
                step: 3,
                index: 3
            }
        );
    }

    #[test]
    fn empty_and_oversized_things_are_rejected() {
        assert_eq!(ChordTemplate::new(&[]).unwrap_err(), ConfigError::EmptyChord);
        assert_eq!(
            ChordTemplate::new(&[0; MAX_CHORD_LEN + 1]).unwrap_err(),
            ConfigError::CapacityExceeded
        );
        assert!(Pattern::fixed("empty", &[]).is_err());
        assert!(Pattern::fixed("long", &[0; MAX_PATTERN_LEN + 1]).is_err());
        assert!(Pattern::random("none", 0).is_err());
        assert_eq!(
            PatternTable::new(ChordTemplate::default(), &[]).unwrap_err(),
            ConfigError::EmptyPatternTable
        );
    }

    #[test]
    fn chord_offsets() {
        let chord = ChordTemplate::default();
        assert_eq!(chord.len(), 4);
        assert_eq!(chord.offset(0), 0);
        assert_eq!(chord.offset(1), 4);
        assert_eq!(chord.offset(2), 7);
        assert_eq!(chord.offset(3), 10);
    }

    #[test]
    fn unipolar_selector_covers_all_buckets_and_clamps() {
        let mut sel = PatternSelector::new(SelectorRange::Unipolar);
        assert_eq!(sel.select(-0.5, 7), 0);
        assert_eq!(sel.select(0.0, 7), 0);
        assert_eq!(sel.select(0.15, 7), 1);
        assert_eq!(sel.select(0.99, 7), 6);
        assert_eq!(sel.select(1.0, 7), 6);
        assert_eq!(sel.select(3.0, 7), 6);
    }

    #[test]
    fn bipolar_selector_centers_on_zero() {
        let mut sel = PatternSelector::new(SelectorRange::Bipolar);
        assert_eq!(sel.select(-1.0, 4), 0);
        assert_eq!(sel.select(-0.4, 4), 1);
        assert_eq!(sel.select(0.1, 4), 2);
        assert_eq!(sel.select(0.6, 4), 3);
        assert_eq!(sel.select(-2.0, 4), 0);
        assert_eq!(sel.select(2.0, 4), 3);
    }

    #[test]
    fn auto_selector_switches_to_bipolar_after_negative_reading() {
        let mut sel = PatternSelector::new(SelectorRange::Auto);
        assert_eq!(sel.select(0.1, 4), 0);
        assert_eq!(sel.select(-0.1, 4), 1);
        // same reading as before, now read as bipolar
        assert_eq!(sel.select(0.1, 4), 2);
    }
}
