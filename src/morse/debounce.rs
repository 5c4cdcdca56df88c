//! Time-window debouncing for key edges and trigger inputs.
//!
//! Everything here runs in the capture context: no I/O, no allocation,
//! constant time.

/// Kind of key edge seen by the capture context.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Edge {
    PressStart,
    PressEnd,
}

/// Why an edge was discarded.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Rejection {
    /// Same edge kind accepted less than one window ago.
    Bounce,
    /// Press-start while a press is already in progress.
    AlreadyPressed,
    /// Press-end without a matching press-start.
    NotPressed,
}

/// Single-input debouncer: remembers the last accepted timestamp.
#[derive(Clone, Copy, Debug)]
pub struct Debouncer {
    window_us: u64,
    last_accepted: Option<u64>,
}

impl Debouncer {
    pub const fn new(window_us: u64) -> Self {
        Self {
            window_us,
            last_accepted: None,
        }
    }

    /// True when `now` is at least one window past the last accepted edge.
    pub fn is_settled(&self, now: u64) -> bool {
        match self.last_accepted {
            Some(last) => now.saturating_sub(last) >= self.window_us,
            None => true,
        }
    }

    /// Record `now` as the last accepted edge.
    pub fn mark(&mut self, now: u64) {
        self.last_accepted = Some(now);
    }

    /// Check and mark in one step.
    pub fn accept(&mut self, now: u64) -> bool {
        if !self.is_settled(now) {
            return false;
        }
        self.mark(now);
        true
    }
}

/// Debouncer pair for the two key edges, with the press-in-progress guards.
#[derive(Clone, Copy, Debug)]
pub struct EdgeFilter {
    start: Debouncer,
    end: Debouncer,
}

impl EdgeFilter {
    pub const fn new(window_us: u64) -> Self {
        Self {
            start: Debouncer::new(window_us),
            end: Debouncer::new(window_us),
        }
    }

    /// Decide whether to process `edge` at `now`.
    ///
    /// State is only updated when the edge is admitted.
    pub fn admit(&mut self, edge: Edge, now: u64, press_in_progress: bool) -> Result<(), Rejection> {
        let debouncer = match edge {
            Edge::PressStart => &mut self.start,
            Edge::PressEnd => &mut self.end,
        };

        if !debouncer.is_settled(now) {
            return Err(Rejection::Bounce);
        }

        match (edge, press_in_progress) {
            (Edge::PressStart, true) => return Err(Rejection::AlreadyPressed),
            (Edge::PressEnd, false) => return Err(Rejection::NotPressed),
            _ => {}
        }

        debouncer.mark(now);
        Ok(())
    }
}
