//! Display formatting for dashboard figures. Rounding here is half-up to
//! match how the figures have always been rendered; callers treat the
//! output as opaque strings.

use chrono::{Datelike, NaiveDate, Utc};

/// Whole-dollar USD with thousands separators, e.g. `$124,300`.
pub fn format_currency(amount: f64) -> String {
    let rounded = amount.round() as i64;
    format!("${}", group_thousands(rounded))
}

/// Compact USD, e.g. `$1.2M` / `$3.4K` / `$950`.
pub fn format_currency_short(amount: f64) -> String {
    if amount >= 1_000_000.0 {
        format!("${:.1}M", amount / 1_000_000.0)
    } else if amount >= 1_000.0 {
        format!("${:.1}K", amount / 1_000.0)
    } else {
        format!("${}", amount.round() as i64)
    }
}

/// Compact count, e.g. `12.4M` / `1.2K` / `847`.
pub fn format_number(value: f64) -> String {
    if value >= 1_000_000.0 {
        format!("{:.1}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("{:.1}K", value / 1_000.0)
    } else if value.fract() == 0.0 {
        format!("{}", value as i64)
    } else {
        format!("{value}")
    }
}

/// Fraction to percent with two decimals, e.g. `0.0342` → `3.42%`.
pub fn format_percentage(value: f64) -> String {
    format!("{:.2}%", value * 100.0)
}

/// Click-through rates render the same way as generic percentages.
pub fn format_ctr(ctr: f64) -> String {
    format_percentage(ctr)
}

/// `Aug 30` for the current year, `Aug 30, 2025` otherwise.
pub fn format_date(date: NaiveDate) -> String {
    let month = match date.month() {
        1 => "Jan",
        2 => "Feb",
        3 => "Mar",
        4 => "Apr",
        5 => "May",
        6 => "Jun",
        7 => "Jul",
        8 => "Aug",
        9 => "Sep",
        10 => "Oct",
        11 => "Nov",
        _ => "Dec",
    };
    if date.year() == Utc::now().date_naive().year() {
        format!("{month} {}", date.day())
    } else {
        format!("{month} {}, {}", date.day(), date.year())
    }
}

fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (index, ch) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    if value < 0 {
        format!("-{grouped}")
    } else {
        grouped
    }
}
