//! Shared console output helpers

use console::Emoji;

/// Checkmark emoji for success
pub const CHECKMARK: Emoji = Emoji("✅", "[OK]");

/// Crossmark emoji for failure
pub const CROSSMARK: Emoji = Emoji("❌", "[FAIL]");

/// Info emoji for informational messages
pub const INFO: Emoji = Emoji("ℹ️", "i");

/// Whether emoji output was disabled with `--no-emoji` / `NO_EMOJI`
pub fn emoji_disabled() -> bool {
    std::env::var_os("NO_EMOJI").is_some()
}

/// Render an emoji, falling back to its plain text form when disabled
pub fn icon(emoji: Emoji<'_, '_>) -> String {
    if emoji_disabled() {
        emoji.1.to_string()
    } else {
        emoji.to_string()
    }
}
