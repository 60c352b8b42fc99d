//! Terminal input module (engine-facing).
//!
//! Maps `crossterm` key events into [`crate::types::GameAction`]. Holding a
//! key relies on the terminal's own auto-repeat; there is no DAS/ARR layer.

pub mod map;

pub use blockfall_types as types;

pub use map::{handle_key_event, should_quit};

use crossterm::event::KeyboardEnhancementFlags;

/// Keyboard enhancement flags needed for a bare Ctrl press to be reported.
///
/// Terminals without the kitty keyboard protocol ignore them; Ctrl then only
/// rotates in combination with `z`.
pub fn wants_modifier_reports() -> KeyboardEnhancementFlags {
    KeyboardEnhancementFlags::DISAMBIGUATE_ESCAPE_CODES
        | KeyboardEnhancementFlags::REPORT_ALL_KEYS_AS_ESCAPE_CODES
}
