//! Hex token extraction
//!
//! Command arguments are whitespace-delimited hexadecimal tokens.
//! Extraction never fails: a malformed token yields whatever value had
//! accumulated before the first bad character, and a missing token
//! yields 0.

/// Return the value of the `index`-th whitespace-delimited token of
/// `line`, interpreted as hexadecimal.
///
/// An `x` or `X` inside the token marks a conventional `0x` prefix and is
/// skipped rather than parsed, so `0x68`, `x68` and `68` all produce 0x68.
/// Parsing stops at the first character that is neither a hex digit nor
/// the marker; whatever value accumulated so far is returned. If `index`
/// is past the last token, returns 0. Accumulation wraps on overflow.
pub fn token(line: &str, index: usize) -> i32 {
    let Some(word) = line.split_whitespace().nth(index) else {
        return 0;
    };
    let mut value: i32 = 0;
    for c in word.chars() {
        if c == 'x' || c == 'X' {
            continue;
        }
        match c.to_digit(16) {
            Some(d) => value = value.wrapping_mul(16).wrapping_add(d as i32),
            None => break,
        }
    }
    value
}

/// Read `dst.len()` consecutive tokens starting at `start`, truncated to
/// bytes.
///
/// Each position rescans the line from the beginning, one [`token`] call
/// per slot. Quadratic over the line, which stays short: token counts are
/// bounded by the brief-buffer capacity.
pub fn tokens(line: &str, start: usize, dst: &mut [u8]) {
    for (i, slot) in dst.iter_mut().enumerate() {
        *slot = token(line, start + i) as u8;
    }
}
