//! Press-timing classifier.
//!
//! Converts accepted press/release pairs into [`Symbol`]s:
//!
//! - hold time `>= press_length` → `Dash`, shorter → `Dot`
//! - a press starting more than `space_length` after the previous release
//!   closes the open letter with a `LetterEnd`

use super::debounce::{Edge, EdgeFilter, Rejection};
use super::Symbol;
use crate::config::TimingConfig;

/// Edge timing shared by the two key handlers.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TimingState {
    pub last_press_start: u64,
    pub last_release: Option<u64>,
    pub press_in_progress: bool,
}

/// Classifier state machine. Owned by the capture context.
pub struct PressClassifier {
    config: TimingConfig,
    filter: EdgeFilter,
    state: TimingState,
    /// At least one dot/dash emitted since the last terminator.
    letter_open: bool,
}

impl PressClassifier {
    pub const fn new(config: TimingConfig) -> Self {
        Self {
            config,
            filter: EdgeFilter::new(config.debounce_us),
            state: TimingState {
                last_press_start: 0,
                last_release: None,
                press_in_progress: false,
            },
            letter_open: false,
        }
    }

    pub fn state(&self) -> TimingState {
        self.state
    }

    pub fn press_in_progress(&self) -> bool {
        self.state.press_in_progress
    }

    /// Handle a press-start edge.
    ///
    /// Returns `Ok(Some(LetterEnd))` when the pause before this press closed
    /// the previous letter.
    pub fn press_start(&mut self, now: u64) -> Result<Option<Symbol>, Rejection> {
        self.filter
            .admit(Edge::PressStart, now, self.state.press_in_progress)?;

        let gap_closes_letter = match self.state.last_release {
            Some(release) => {
                self.letter_open && now.saturating_sub(release) > self.config.space_length_us
            }
            None => false,
        };

        self.state.press_in_progress = true;
        self.state.last_press_start = now;

        if gap_closes_letter {
            self.letter_open = false;
            Ok(Some(Symbol::LetterEnd))
        } else {
            Ok(None)
        }
    }

    /// Handle a press-end edge, returning the classified dot or dash.
    pub fn press_end(&mut self, now: u64) -> Result<Symbol, Rejection> {
        self.filter
            .admit(Edge::PressEnd, now, self.state.press_in_progress)?;

        let duration = now.saturating_sub(self.state.last_press_start);
        let symbol = classify(duration, self.config.press_length_us);

        self.state.press_in_progress = false;
        self.state.last_release = Some(now);
        self.letter_open = true;
        Ok(symbol)
    }

    /// Forget the open letter once a message has been handed off, so the
    /// first press of the next message does not emit a stray terminator.
    pub fn close_message(&mut self) {
        self.letter_open = false;
    }
}

/// Classify a hold time; the threshold itself counts as a dash.
pub const fn classify(duration_us: u64, press_length_us: u64) -> Symbol {
    if duration_us >= press_length_us {
        Symbol::Dash
    } else {
        Symbol::Dot
    }
}
