//! # Note Change Queue
//!
//! Changing the root note halfway through a pattern pass would play half of one chord and half of another. Instead,
//! root note changes which arrive while a pattern is playing are held back and applied when the pattern comes back
//! around to its first step.

/// A root note with an optional pending replacement is represented here
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoteChangeQueue {
    active: i32,
    pending: Option<i32>,
}

impl NoteChangeQueue {
    /// `NoteChangeQueue::new(n)` is a new queue with active root note `n` and nothing pending
    pub fn new(root: i32) -> Self {
        Self {
            active: root,
            pending: None,
        }
    }

    /// `q.propose(n, s, p)` offers a new root note `n` while the pattern is at step `s`, `p` is true iff playing
    ///
    /// While playing and away from the first step the note is held as pending, otherwise it becomes the active root
    /// at once and clears anything pending. Proposing the active or the pending note again does nothing, so a noisy
    /// reading can't make the queue churn.
    ///
    /// # Examples
    ///
    /// ```
    /// # use arp_core::note_queue::NoteChangeQueue;
    /// let mut q = NoteChangeQueue::new(60);
    ///
    /// // mid-pattern, so it has to wait
    /// q.propose(62, 2, true);
    /// assert_eq!(q.active(), 60);
    /// assert_eq!(q.pending(), Some(62));
    ///
    /// // back at the top of the pattern it is applied
    /// assert!(q.drain_if_due(0));
    /// assert_eq!(q.active(), 62);
    /// ```
    pub fn propose(&mut self, note: i32, current_step: usize, is_playing: bool) {
        if note == self.active || Some(note) == self.pending {
            return;
        }

        if is_playing && current_step != 0 {
            self.pending = Some(note);
        } else {
            self.active = note;
            self.pending = None;
        }
    }

    /// `q.drain_if_due(s)` promotes the pending note if step `s` is the first step, true iff a note was promoted
    pub fn drain_if_due(&mut self, current_step: usize) -> bool {
        if current_step != 0 {
            return false;
        }
        match self.pending.take() {
            Some(note) => {
                self.active = note;
                true
            }
            None => false,
        }
    }

    /// `q.active()` is the root note in use
    pub fn active(&self) -> i32 {
        self.active
    }

    /// `q.pending()` is the root note waiting for the next pattern pass, if any
    pub fn pending(&self) -> Option<i32> {
        self.pending
    }
}
