//! `data-limit` attribute handling.
//!
//! The attribute is read the way browsers read a loosely written integer:
//! leading whitespace and an optional sign, then as many digits as are
//! there. Text with no leading digits yields an empty list, and a negative
//! limit drops that many items from the end.

/// Truncation applied to a decoded item list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Limit {
    /// Render everything.
    All,
    /// Keep the first N items; negative N drops |N| items from the end.
    First(i64),
}

impl Limit {
    /// Truncate `items` in place, preserving order.
    pub fn apply<T>(self, items: &mut Vec<T>) {
        let keep = match self {
            Limit::All => return,
            Limit::First(n) if n >= 0 => usize::try_from(n).unwrap_or(usize::MAX),
            Limit::First(n) => {
                let drop = usize::try_from(n.unsigned_abs()).unwrap_or(usize::MAX);
                items.len().saturating_sub(drop)
            }
        };
        items.truncate(keep);
    }
}

/// Interpret a raw `data-limit` value.
///
/// Absent or empty means no truncation.
pub fn parse_limit(attr: Option<&str>) -> Limit {
    match attr {
        None | Some("") => Limit::All,
        Some(raw) => Limit::First(parse_leading_int(raw).unwrap_or(0)),
    }
}

/// Parse the integer prefix of `raw`, or `None` if it has no digits.
fn parse_leading_int(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut value: i64 = 0;
    let mut seen = false;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else { break };
        seen = true;
        value = value
            .saturating_mul(i64::from(radix))
            .saturating_add(i64::from(d));
    }

    seen.then_some(if negative { -value } else { value })
}
