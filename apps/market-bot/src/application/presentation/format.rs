//! Number formatting for embed fields.
//!
//! Amounts are rounded to cents, half away from zero. Money that can reach
//! account-sized values gets thousands separators; per-share prices do not.

use rust_decimal::{Decimal, RoundingStrategy};

/// A numeric amount that can be shown with two decimals.
pub trait Amount: Copy {
    /// Absolute value rounded to two decimals, e.g. `1234.50`.
    fn abs_cents(self) -> String;

    /// Whether the value is below zero once rounded.
    fn is_negative(self) -> bool;
}

impl Amount for f64 {
    fn abs_cents(self) -> String {
        format!("{:.2}", self.abs())
    }

    fn is_negative(self) -> bool {
        self < 0.0 && self.abs_cents() != "0.00"
    }
}

impl Amount for Decimal {
    fn abs_cents(self) -> String {
        let mut rounded = self
            .abs()
            .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
        rounded.rescale(2);
        rounded.to_string()
    }

    fn is_negative(self) -> bool {
        self.is_sign_negative() && self.abs_cents() != "0.00"
    }
}

/// Insert `,` every three digits of an unsigned integer string.
fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

fn grouped_cents<A: Amount>(value: A) -> String {
    let cents = value.abs_cents();
    match cents.split_once('.') {
        Some((whole, fraction)) => format!("{}.{fraction}", group_thousands(whole)),
        None => cents,
    }
}

fn sign<A: Amount>(value: A, always: bool) -> &'static str {
    if value.is_negative() {
        "-"
    } else if always {
        "+"
    } else {
        ""
    }
}

/// `$1,234.56`
#[must_use]
pub fn money<A: Amount>(value: A) -> String {
    format!("${}{}", sign(value, false), grouped_cents(value))
}

/// `$+1,234.56`
#[must_use]
pub fn signed_money<A: Amount>(value: A) -> String {
    format!("${}{}", sign(value, true), grouped_cents(value))
}

/// `$123.45`
#[must_use]
pub fn price<A: Amount>(value: A) -> String {
    format!("${}{}", sign(value, false), value.abs_cents())
}

/// `$+1.23`
#[must_use]
pub fn signed_price<A: Amount>(value: A) -> String {
    format!("${}{}", sign(value, true), value.abs_cents())
}

/// `+1.23%`
#[must_use]
pub fn signed_percent<A: Amount>(value: A) -> String {
    format!("{}{}%", sign(value, true), value.abs_cents())
}

/// `1,234,567`
#[must_use]
pub fn volume(value: u64) -> String {
    group_thousands(&value.to_string())
}

/// 📈 for a gain or flat move, 📉 for a loss.
#[must_use]
pub const fn direction_emoji(is_gain: bool) -> &'static str {
    if is_gain { "📈" } else { "📉" }
}

/// `Yes` / `No`.
#[must_use]
pub const fn yes_no(flag: bool) -> &'static str {
    if flag { "Yes" } else { "No" }
}

/// Longest symbol echoed back in a reply.
pub const SYMBOL_ECHO_CHARS: usize = 32;

/// Longest free-text query echoed back in a reply.
pub const QUERY_ECHO_CHARS: usize = 100;

/// User input cut to `max_chars` characters, with `…` marking a cut.
#[must_use]
pub fn echo(input: &str, max_chars: usize) -> String {
    match input.char_indices().nth(max_chars) {
        Some((end, _)) => format!("{}…", &input[..end]),
        None => input.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use test_case::test_case;

    use super::*;

    #[test_case(0.0, "$0.00")]
    #[test_case(5.0, "$5.00")]
    #[test_case(1234.5, "$1,234.50")]
    #[test_case(1_234_567.891, "$1,234,567.89")]
    #[test_case(-98_765.4, "$-98,765.40")]
    fn money_groups_thousands(value: f64, expected: &str) {
        assert_eq!(money(value), expected);
    }

    #[test_case(1.234, "$+1.23")]
    #[test_case(-0.5, "$-0.50")]
    #[test_case(-0.001, "$+0.00")]
    #[test_case(1500.0, "$+1500.00")]
    fn signed_price_never_groups(value: f64, expected: &str) {
        assert_eq!(signed_price(value), expected);
    }

    #[test_case("AAPL", 32, "AAPL")]
    #[test_case("ABCDEF", 6, "ABCDEF")]
    #[test_case("ABCDEFG", 6, "ABCDEF…")]
    #[test_case("ÄÖÜÄÖÜ", 3, "ÄÖÜ…")]
    #[test_case("", 3, "")]
    fn echo_cuts_on_characters(input: &str, max_chars: usize, expected: &str) {
        assert_eq!(echo(input, max_chars), expected);
    }

    #[test]
    fn decimal_amounts() {
        assert_eq!(money(Decimal::new(10_000_005, 3)), "$10,000.01");
        assert_eq!(signed_money(Decimal::new(-250_075, 2)), "$-2,500.75");
        assert_eq!(signed_money(Decimal::ZERO), "$+0.00");
        assert_eq!(signed_percent(Decimal::new(5, 0)), "+5.00%");
    }

    #[test]
    fn percent_and_volume() {
        assert_eq!(signed_percent(2.346_f64), "+2.35%");
        assert_eq!(signed_percent(-10.0_f64), "-10.00%");
        assert_eq!(volume(0), "0");
        assert_eq!(volume(999), "999");
        assert_eq!(volume(1_000), "1,000");
        assert_eq!(volume(12_345_678), "12,345,678");
    }

    #[test]
    fn price_has_no_separator() {
        assert_eq!(price(12_345.678_f64), "$12345.68");
        assert_eq!(price(-1.0_f64), "$-1.00");
    }
}
