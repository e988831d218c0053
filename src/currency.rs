//! Formatting of amounts for display.

use numfmt::{Formatter, Precision};

use crate::Error;

/// Formats `amount` with the currency `symbol` as a prefix and two decimal places.
///
/// Negative amounts are shown with the minus sign before the symbol, e.g. "-Rp12.30".
///
/// # Errors
///
/// Returns an [Error::InvalidCurrencySymbol] if `symbol` is too long to be
/// used as a prefix.
pub fn format_currency(amount: f64, symbol: &str) -> Result<String, Error> {
    if amount == 0.0 {
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        return Ok(format!("{symbol}0.00"));
    }

    let prefix = if amount < 0.0 {
        format!("-{symbol}")
    } else {
        symbol.to_owned()
    };

    let formatter = Formatter::currency(&prefix)
        .map_err(|_| Error::InvalidCurrencySymbol(symbol.to_owned()))?
        .precision(Precision::Decimals(2));

    let formatted_string = formatter.fmt_string(amount.abs());

    Ok(pad_decimals(formatted_string))
}

/// numfmt omits trailing zeros, e.g. "12.30" is rendered as "12.3", so pad the
/// fraction back out to two digits.
fn pad_decimals(mut formatted_string: String) -> String {
    match formatted_string.rfind('.') {
        None => formatted_string.push_str(".00"),
        Some(point) => {
            for _ in formatted_string.len() - point - 1..2 {
                formatted_string.push('0');
            }
        }
    }

    formatted_string
}
