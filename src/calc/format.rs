use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::{Decimal, RoundingStrategy};

/// `$1,234.56` style, two decimals, minus sign in front of the dollar sign.
pub fn fmt_money(d: &Decimal) -> String {
    fmt_currency(d, 2)
}

/// `$15,000` style, used by the goal statistics cards.
pub fn fmt_money_whole(d: &Decimal) -> String {
    fmt_currency(d, 0)
}

fn fmt_currency(d: &Decimal, dp: u32) -> String {
    let rounded = d.round_dp_with_strategy(dp, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    let text = format!("{:.*}", dp as usize, rounded.abs());
    let (int_part, frac_part) = match text.split_once('.') {
        Some((i, f)) => (i.to_string(), Some(f.to_string())),
        None => (text, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, c) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if negative { "-" } else { "" };
    match frac_part {
        Some(f) => format!("{sign}${grouped}.{f}"),
        None => format!("{sign}${grouped}"),
    }
}

/// Plain two-decimal rendering (`toFixed(2)`), no currency symbol.
pub fn fixed2(d: &Decimal) -> String {
    format!("{:.2}", d.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero))
}

/// Largest amount accepted from a form field, in either direction.
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(0xD4A5_1000, 0xE8, 0, false, 0);

/// Parses a typed amount. Anything beyond `MAX_AMOUNT` is rejected so the
/// arithmetic downstream stays well inside `Decimal` range.
pub fn parse_money(s: &str) -> Option<Decimal> {
    s.trim()
        .parse::<Decimal>()
        .ok()
        .filter(|d| d.abs() <= MAX_AMOUNT)
}

/// True when the text is a number that `parse_money` rejects for size.
pub fn is_oversized(s: &str) -> bool {
    match s.trim().parse::<Decimal>() {
        Ok(d) => d.abs() > MAX_AMOUNT,
        // too many digits for a Decimal at all
        Err(_) => {
            let t = s.trim().trim_start_matches('-');
            !t.is_empty() && t.chars().all(|c| c.is_ascii_digit() || c == '.')
        }
    }
}

pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let s = s.trim();
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .or_else(|_| NaiveDate::parse_from_str(s, "%Y/%m/%d"))
        .ok()
}

pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

pub fn iso(d: &NaiveDate) -> String {
    d.format("%Y-%m-%d").to_string()
}

/// "Nov 9, 2025"
pub fn short_date(d: &NaiveDate) -> String {
    d.format("%b %-d, %Y").to_string()
}

/// Alert-card style relative time: "Just now", "5m ago", "2h ago", "3d ago".
pub fn time_ago(then: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let minutes = (now - then).num_minutes();
    if minutes < 1 {
        "Just now".to_string()
    } else if minutes < 60 {
        format!("{minutes}m ago")
    } else if minutes < 1440 {
        format!("{}h ago", minutes / 60)
    } else {
        format!("{}d ago", minutes / 1440)
    }
}

/// Expense-list style relative day label.
pub fn story_context(date: NaiveDate, today: NaiveDate) -> String {
    let days = (today - date).num_days();
    match days {
        0 => "Today's chapter".to_string(),
        1 => "Yesterday's story".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d => format!("{} weeks ago", d.div_euclid(7)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn dec(s: &str) -> Decimal {
        s.parse().unwrap()
    }

    #[test]
    fn formats_currency() {
        assert_eq!(fmt_money(&dec("24.99")), "$24.99");
        assert_eq!(fmt_money(&dec("1234567.5")), "$1,234,567.50");
        assert_eq!(fmt_money(&dec("-10")), "-$10.00");
        assert_eq!(fmt_money(&dec("0")), "$0.00");
        assert_eq!(fmt_money(&dec("999.995")), "$1,000.00");
        assert_eq!(fmt_money_whole(&dec("15000")), "$15,000");
        assert_eq!(fmt_money_whole(&dec("100")), "$100");
    }

    #[test]
    fn money_parsing_is_bounded() {
        assert_eq!(MAX_AMOUNT, dec("1000000000000"));
        assert_eq!(parse_money(" 24.99 "), Some(dec("24.99")));
        assert_eq!(parse_money("1000000000000"), Some(MAX_AMOUNT));
        assert_eq!(parse_money("1000000000000.01"), None);
        assert_eq!(parse_money("79228162514264337593543950335"), None);
        assert_eq!(parse_money("abc"), None);
        assert!(is_oversized("79228162514264337593543950335"));
        assert!(is_oversized("792281625142643375935439503350"));
        assert!(!is_oversized("12.5"));
        assert!(!is_oversized("abc"));
    }

    #[test]
    fn parses_dates_in_both_formats() {
        let d = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
        assert_eq!(parse_date("2025-11-09"), Some(d));
        assert_eq!(parse_date(" 2025/11/09 "), Some(d));
        assert_eq!(parse_date("11/09/2025"), None);
        assert_eq!(short_date(&d), "Nov 9, 2025");
    }

    #[test]
    fn relative_labels() {
        let now = Utc::now();
        assert_eq!(time_ago(now - Duration::seconds(20), now), "Just now");
        assert_eq!(time_ago(now - Duration::minutes(5), now), "5m ago");
        assert_eq!(time_ago(now - Duration::minutes(130), now), "2h ago");
        assert_eq!(time_ago(now - Duration::days(3), now), "3d ago");

        let today = NaiveDate::from_ymd_opt(2025, 11, 9).unwrap();
        assert_eq!(story_context(today, today), "Today's chapter");
        assert_eq!(story_context(today - Duration::days(1), today), "Yesterday's story");
        assert_eq!(story_context(today - Duration::days(4), today), "4 days ago");
        assert_eq!(story_context(today - Duration::days(15), today), "2 weeks ago");
    }
}
