//! Input formatters applied on every keystroke.
//!
//! None of these reject input: they sanitize to ASCII digits and re-insert the
//! separators the payment fields display. Each one is idempotent on its own output.

/// Longest formatted card number: 16 digits plus 3 separating spaces.
pub const CARD_NUMBER_DISPLAY_LEN: usize = 19;
/// Digits kept by the expiry formatter (`MMYY`).
pub const EXPIRY_DIGITS: usize = 4;
pub const CVV_DIGITS: usize = 3;

/// Strips every character that is not an ASCII digit.
pub fn digits_only(raw: &str) -> String {
    raw.chars().filter(char::is_ascii_digit).collect()
}

/// Groups digits in blocks of four, e.g. `"4539148803436467"` -> `"4539 1488 0343 6467"`.
pub fn format_card_number(raw: &str) -> String {
    let digits = digits_only(raw);
    let mut formatted = String::with_capacity(CARD_NUMBER_DISPLAY_LEN + 1);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && i % 4 == 0 {
            formatted.push(' ');
        }
        formatted.push(digit);
        if formatted.len() >= CARD_NUMBER_DISPLAY_LEN {
            break;
        }
    }
    formatted
}

/// Inserts `" / "` once the month is typed, e.g. `"1225"` -> `"12 / 25"`.
pub fn format_expiry(raw: &str) -> String {
    let digits: String = digits_only(raw).chars().take(EXPIRY_DIGITS).collect();
    if digits.len() > 2 {
        format!("{} / {}", &digits[..2], &digits[2..])
    } else {
        digits
    }
}

pub fn format_cvv(raw: &str) -> String {
    digits_only(raw).chars().take(CVV_DIGITS).collect()
}
