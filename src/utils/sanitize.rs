//! Cleanup of text captured from the decoding utility.
//!
//! Decoder diagnostics end up inside a single error line, so control
//! characters are stripped and oversized output is truncated.

use crate::config::MAX_DECODER_MESSAGE_LENGTH;

/// Removes control characters other than newline, tab and carriage return.
pub fn sanitize_message(message: &str) -> String {
    message
        .chars()
        .filter(|c| !c.is_control() || matches!(c, '\n' | '\t' | '\r'))
        .collect()
}

/// Turns raw decoder stderr into printable text.
///
/// Invalid UTF-8 is replaced, surrounding whitespace trimmed, control characters
/// removed, and the result cut to `MAX_DECODER_MESSAGE_LENGTH` characters with
/// a truncation note. An all-whitespace capture yields an empty string.
pub fn sanitize_decoder_stderr(raw: &[u8]) -> String {
    let text = String::from_utf8_lossy(raw);
    let sanitized = sanitize_message(text.trim());

    let char_count = sanitized.chars().count();
    if char_count > MAX_DECODER_MESSAGE_LENGTH {
        let kept: String = sanitized.chars().take(MAX_DECODER_MESSAGE_LENGTH).collect();
        format!("{kept}... (truncated, original length: {char_count} chars)")
    } else {
        sanitized
    }
}
