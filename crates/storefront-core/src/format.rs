//! Price Formatting
//!
//! en-US currency display with zero fractional digits. Amounts are shown in
//! whole units regardless of the currency's own minor-unit convention.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};

use crate::error::{Result, StorefrontError};
use crate::model::Price;

/// Format a whole-unit amount for display, e.g. `format_amount(999, Some("usd"))`
/// is `"$999"`.
///
/// A missing currency is [`StorefrontError::MissingCurrency`]; anything that
/// is not three ASCII letters is [`StorefrontError::InvalidCurrency`].
pub fn format_amount(amount: i64, currency: Option<&str>) -> Result<String> {
    let code = currency_code(currency)?;
    let sign = if amount < 0 { "-" } else { "" };
    let digits = group_thousands(amount.unsigned_abs());

    Ok(match currency_symbol(&code) {
        Some(symbol) => format!("{sign}{symbol}{digits}"),
        None => format!("{sign}{code}\u{a0}{digits}"),
    })
}

/// Format a price's `unit_amount` (minor units) rounded to whole units
pub fn format_price(price: &Price) -> Result<String> {
    let code = currency_code(price.currency.as_deref())?;
    let whole = minor_to_major(price.unit_amount, minor_unit_exponent(&code));
    format_amount(whole, Some(&code))
}

/// Validate and upper-case a currency code
fn currency_code(currency: Option<&str>) -> Result<String> {
    let raw = currency.map(str::trim).ok_or(StorefrontError::MissingCurrency)?;
    if raw.is_empty() {
        return Err(StorefrontError::MissingCurrency);
    }
    if raw.len() != 3 || !raw.chars().all(|c| c.is_ascii_alphabetic()) {
        return Err(StorefrontError::InvalidCurrency(raw.to_string()));
    }
    Ok(raw.to_ascii_uppercase())
}

/// Round minor units to whole major units, halves away from zero
fn minor_to_major(amount: i64, exponent: u32) -> i64 {
    let major = Decimal::new(amount, exponent)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    // |major| <= |amount|, so this always fits
    major.to_i64().unwrap_or(amount)
}

/// Number of minor-unit digits (ISO 4217)
fn minor_unit_exponent(code: &str) -> u32 {
    match code {
        "BIF" | "CLP" | "DJF" | "GNF" | "ISK" | "JPY" | "KMF" | "KRW" | "MGA" | "PYG"
        | "RWF" | "UGX" | "VND" | "VUV" | "XAF" | "XOF" | "XPF" => 0,
        "BHD" | "IQD" | "JOD" | "KWD" | "LYD" | "OMR" | "TND" => 3,
        _ => 2,
    }
}

/// Symbols the en-US locale uses; other codes print the code itself
fn currency_symbol(code: &str) -> Option<&'static str> {
    let symbol = match code {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        "JPY" => "¥",
        "INR" => "₹",
        "KRW" => "₩",
        "ILS" => "₪",
        "VND" => "₫",
        "PHP" => "₱",
        "CNY" => "CN¥",
        "CAD" => "CA$",
        "AUD" => "A$",
        "NZD" => "NZ$",
        "HKD" => "HK$",
        "MXN" => "MX$",
        "TWD" => "NT$",
        "BRL" => "R$",
        _ => return None,
    };
    Some(symbol)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
