//! Unit tests for debouncing, classification and decoding.
//!
//! These tests run on the host (not embedded) and verify the pure
//! logic of the capture pipeline.

use super::classifier::classify;
use super::*;
use crate::config::{TimingConfig, DEBOUNCE_DELAY_US, PRESS_LENGTH_US, SPACE_LENGTH_US};
use crate::error::Error;

const MS: u64 = 1_000;

fn symbols_from(pattern: &str) -> heapless::Vec<Symbol, 16> {
    let mut out = heapless::Vec::new();
    for c in pattern.chars() {
        let s = match c {
            '.' => Symbol::Dot,
            '-' => Symbol::Dash,
            _ => Symbol::LetterEnd,
        };
        out.push(s).unwrap();
    }
    out
}

fn decode_str(symbols: &[Symbol]) -> MessageBuffer<32> {
    let mut out = MessageBuffer::new();
    decode(symbols, &mut out);
    out
}

// ═══════════════════════════════════════════════════════════════════════════
// Symbol Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn symbol_raw_values() {
    assert_eq!(u8::from(Symbol::Dot), 0);
    assert_eq!(u8::from(Symbol::Dash), 1);
    assert_eq!(u8::from(Symbol::LetterEnd), 2);
    assert_eq!(Symbol::try_from(1), Ok(Symbol::Dash));
    assert_eq!(Symbol::try_from(7), Err(7));
}

#[test]
fn symbol_bits() {
    assert_eq!(Symbol::Dot.bit(), Some(0));
    assert_eq!(Symbol::Dash.bit(), Some(1));
    assert_eq!(Symbol::LetterEnd.bit(), None);
    assert!(MESSAGE_END.iter().all(|s| s.is_terminator()));
}

// ═══════════════════════════════════════════════════════════════════════════
// Debounce Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn debouncer_first_edge_always_accepted() {
    let mut d = Debouncer::new(DEBOUNCE_DELAY_US);
    assert!(d.accept(0));
}

#[test]
fn debouncer_rejects_inside_window() {
    let mut d = Debouncer::new(50 * MS);
    assert!(d.accept(1_000 * MS));
    assert!(!d.accept(1_049 * MS));
    // The rejected edge did not move the window.
    assert!(d.accept(1_050 * MS));
}

#[test]
fn edge_filter_guards_press_state() {
    let mut f = EdgeFilter::new(50 * MS);
    assert_eq!(f.admit(Edge::PressEnd, 0, false), Err(Rejection::NotPressed));
    assert_eq!(f.admit(Edge::PressStart, 0, true), Err(Rejection::AlreadyPressed));
    assert_eq!(f.admit(Edge::PressStart, 0, false), Ok(()));
    assert_eq!(f.admit(Edge::PressEnd, 200 * MS, true), Ok(()));
}

#[test]
fn edge_filter_kinds_are_independent() {
    let mut f = EdgeFilter::new(50 * MS);
    assert_eq!(f.admit(Edge::PressStart, 0, false), Ok(()));
    // An end edge right after a start is not a bounce of the start.
    assert_eq!(f.admit(Edge::PressEnd, 10 * MS, true), Ok(()));
    assert_eq!(f.admit(Edge::PressStart, 20 * MS, false), Err(Rejection::Bounce));
}

// ═══════════════════════════════════════════════════════════════════════════
// Classifier Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn classify_threshold_is_inclusive_on_dash_side() {
    assert_eq!(classify(PRESS_LENGTH_US, PRESS_LENGTH_US), Symbol::Dash);
    assert_eq!(classify(PRESS_LENGTH_US + 1, PRESS_LENGTH_US), Symbol::Dash);
    assert_eq!(classify(PRESS_LENGTH_US - 1, PRESS_LENGTH_US), Symbol::Dot);
    assert_eq!(classify(0, PRESS_LENGTH_US), Symbol::Dot);
}

#[test]
fn classifier_short_and_long_presses() {
    let mut c = PressClassifier::new(TimingConfig::default());
    assert_eq!(c.press_start(0), Ok(None));
    assert_eq!(c.press_end(200 * MS), Ok(Symbol::Dot));
    assert_eq!(c.press_start(500 * MS), Ok(None));
    assert_eq!(c.press_end(500 * MS + PRESS_LENGTH_US), Ok(Symbol::Dash));
    assert!(!c.press_in_progress());
}

#[test]
fn classifier_bounce_leaves_state_untouched() {
    let mut c = PressClassifier::new(TimingConfig::default());
    c.press_start(0).unwrap();
    c.press_end(20 * MS).unwrap();
    let before = c.state();

    assert_eq!(c.press_start(30 * MS), Err(Rejection::Bounce));
    assert_eq!(c.state(), before);
}

#[test]
fn classifier_bounced_release_is_ignored() {
    let mut c = PressClassifier::new(TimingConfig::default());
    c.press_start(0).unwrap();
    assert_eq!(c.press_end(200 * MS), Ok(Symbol::Dot));
    assert_eq!(c.press_start(230 * MS), Ok(None));
    let before = c.state();

    // Second release inside the window of the first one.
    assert_eq!(c.press_end(200 * MS + DEBOUNCE_DELAY_US - 1), Err(Rejection::Bounce));
    assert_eq!(c.state(), before);
    assert!(c.press_in_progress());

    assert_eq!(c.press_end(200 * MS + DEBOUNCE_DELAY_US), Ok(Symbol::Dot));
}

#[test]
fn classifier_repeated_start_is_ignored() {
    let mut c = PressClassifier::new(TimingConfig::default());
    c.press_start(0).unwrap();
    assert_eq!(c.press_start(400 * MS), Err(Rejection::AlreadyPressed));
    assert_eq!(c.state().last_press_start, 0);
    assert!(c.press_in_progress());
}

#[test]
fn classifier_release_without_press_is_ignored() {
    let mut c = PressClassifier::new(TimingConfig::default());
    assert_eq!(c.press_end(100 * MS), Err(Rejection::NotPressed));
    assert_eq!(c.state(), TimingState::default());
}

#[test]
fn classifier_long_pause_closes_letter() {
    let mut c = PressClassifier::new(TimingConfig::default());
    c.press_start(0).unwrap();
    c.press_end(200 * MS).unwrap();

    let next = 200 * MS + SPACE_LENGTH_US + 1;
    assert_eq!(c.press_start(next), Ok(Some(Symbol::LetterEnd)));
}

#[test]
fn classifier_pause_of_exactly_space_length_keeps_letter_open() {
    let mut c = PressClassifier::new(TimingConfig::default());
    c.press_start(0).unwrap();
    c.press_end(200 * MS).unwrap();
    assert_eq!(c.press_start(200 * MS + SPACE_LENGTH_US), Ok(None));
    assert!(c.press_in_progress());
}

#[test]
fn classifier_short_pause_keeps_letter_open() {
    let mut c = PressClassifier::new(TimingConfig::default());
    c.press_start(0).unwrap();
    c.press_end(200 * MS).unwrap();
    assert_eq!(c.press_start(200 * MS + SPACE_LENGTH_US - 1), Ok(None));
}

#[test]
fn classifier_no_separator_without_open_letter() {
    let mut c = PressClassifier::new(TimingConfig::default());
    c.press_start(0).unwrap();
    c.press_end(200 * MS).unwrap();
    c.close_message();
    assert_eq!(c.press_start(10_000 * MS), Ok(None));
}

#[test]
fn classifier_single_separator_per_pause() {
    let mut c = PressClassifier::new(TimingConfig::default());
    c.press_start(0).unwrap();
    c.press_end(200 * MS).unwrap();
    assert_eq!(c.press_start(3_000 * MS), Ok(Some(Symbol::LetterEnd)));
    c.press_end(3_200 * MS).unwrap();
    // Short gap inside the new letter.
    assert_eq!(c.press_start(3_500 * MS), Ok(None));
}

// ═══════════════════════════════════════════════════════════════════════════
// Symbol Buffer Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn symbol_buffer_reserves_terminator_slots() {
    let mut buf: SymbolBuffer<8> = SymbolBuffer::new();
    for _ in 0..6 {
        buf.push(Symbol::Dash).unwrap();
    }
    assert_eq!(buf.push(Symbol::Dot), Err(Error::SymbolBufferFull));
    assert_eq!(buf.push(Symbol::LetterEnd), Err(Error::SymbolBufferFull));
    assert_eq!(buf.len(), 6);
    assert!(buf.as_slice().iter().all(|&s| s == Symbol::Dash));

    buf.terminate();
    assert_eq!(buf.len(), 8);
    assert_eq!(&buf.as_slice()[6..], &MESSAGE_END);
}

#[test]
fn symbol_buffer_has_symbols_ignores_terminators() {
    let mut buf: SymbolBuffer<8> = SymbolBuffer::new();
    assert!(!buf.has_symbols());
    buf.push(Symbol::LetterEnd).unwrap();
    assert!(!buf.has_symbols());
    buf.push(Symbol::Dot).unwrap();
    assert!(buf.has_symbols());
    buf.clear();
    assert!(buf.is_empty());
}

// ═══════════════════════════════════════════════════════════════════════════
// Decoder Tests
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn decode_single_letter_a() {
    let out = decode_str(&symbols_from(".-||"));
    assert_eq!(out.as_str(), "a");
}

#[test]
fn decode_dash_and_dot_dash_differ() {
    assert_eq!(decode_str(&symbols_from("-||")).as_str(), "t");
    assert_eq!(decode_str(&symbols_from(".-||")).as_str(), "a");
    assert_eq!(decode_str(&symbols_from("..-||")).as_str(), "u");
}

#[test]
fn decode_full_table() {
    const TABLE: [(&str, char); 36] = [
        (".-", 'a'), ("-...", 'b'), ("-.-.", 'c'), ("-..", 'd'), (".", 'e'),
        ("..-.", 'f'), ("--.", 'g'), ("....", 'h'), ("..", 'i'), (".---", 'j'),
        ("-.-", 'k'), (".-..", 'l'), ("--", 'm'), ("-.", 'n'), ("---", 'o'),
        (".--.", 'p'), ("--.-", 'q'), (".-.", 'r'), ("...", 's'), ("-", 't'),
        ("..-", 'u'), ("...-", 'v'), (".--", 'w'), ("-..-", 'x'), ("-.--", 'y'),
        ("--..", 'z'), ("-----", '0'), (".----", '1'), ("..---", '2'), ("...--", '3'),
        ("....-", '4'), (".....", '5'), ("-....", '6'), ("--...", '7'), ("---..", '8'),
        ("----.", '9'),
    ];

    for (pattern, expected) in TABLE {
        let mut symbols = symbols_from(pattern);
        symbols.extend_from_slice(&MESSAGE_END).unwrap();
        let out = decode_str(&symbols);
        assert_eq!(out.as_str().chars().next(), Some(expected), "pattern {}", pattern);
        assert_eq!(out.len(), 1);
    }
}

#[test]
fn decode_unknown_pattern() {
    // "----" has no table entry.
    assert_eq!(decode_str(&symbols_from("----||")).as_str(), "=");
    assert_eq!(letter_for_code(31), None);
    assert_eq!(letter_for_code(0), None);
}

#[test]
fn decode_overlong_run_is_unknown() {
    assert_eq!(decode_str(&symbols_from("........||")).as_str(), "=");
}

#[test]
fn decode_stops_at_message_end() {
    let out = decode_str(&symbols_from("...|---|...||.-|"));
    assert_eq!(out.as_str(), "sos");
}

#[test]
fn decode_without_terminator_emits_nothing_for_open_run() {
    let out = decode_str(&symbols_from(".-|..."));
    assert_eq!(out.as_str(), "a");
}

#[test]
fn decode_drops_characters_past_capacity() {
    let mut out: MessageBuffer<2> = MessageBuffer::new();
    let written = decode(&symbols_from(".|.|.||"), &mut out);
    assert_eq!(written, 2);
    assert_eq!(out.as_str(), "ee");
}
