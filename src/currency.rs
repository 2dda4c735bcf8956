//! Formats amounts of money for display.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};

/// Format `number` as Indonesian Rupiah, e.g. `Rp 1.234.567,50`.
///
/// Thousands are separated with `.` and the two decimals follow a `,`.
/// Negative amounts are prefixed with `-`, e.g. `-Rp 1.500,00`.
pub fn format_rupiah(number: f64) -> String {
    static POSITIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::currency("Rp ")
            .ok()
            .map(|fmt| fmt.precision(Precision::Decimals(2)))
    });

    static NEGATIVE_FMT: OnceLock<Option<Formatter>> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::currency("-Rp ")
            .ok()
            .map(|fmt| fmt.precision(Precision::Decimals(2)))
    });

    let rounded = (number * 100.0).round() / 100.0;

    let formatted_string = match (positive_fmt, negative_fmt) {
        (_, Some(fmt)) if rounded < 0.0 => fmt.fmt_string(rounded.abs()),
        (Some(fmt), _) if rounded > 0.0 => fmt.fmt_string(rounded),
        // Zero is hardcoded as "0", so we must specify the formatted string for zero
        (Some(_), Some(_)) => "Rp 0.00".to_owned(),
        // Only reachable if numfmt rejects the prefix.
        _ => fixed_point(rounded),
    };

    // numfmt switches to scientific notation once the number outgrows its
    // buffer, e.g. 1e13 comes out as "Rp 1.0e13".
    let formatted_string = if formatted_string.contains(['e', 'E']) {
        fixed_point(rounded)
    } else {
        formatted_string
    };

    swap_separators(&pad_decimals(formatted_string))
}

/// Format `number` with `,` between thousands and two decimals after a `.`,
/// the same layout numfmt produces for small numbers.
fn fixed_point(number: f64) -> String {
    let prefix = if number < 0.0 { "-Rp " } else { "Rp " };
    let digits = format!("{:.2}", number.abs());
    let (integer, fraction) = digits.split_once('.').unwrap_or((&digits, "00"));

    let mut grouped = String::with_capacity(integer.len() + integer.len() / 3);
    for (i, digit) in integer.chars().enumerate() {
        if i > 0 && (integer.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{prefix}{grouped}.{fraction}")
}

/// Swap the `,` thousands separator and `.` decimal point around.
fn swap_separators(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            ',' => '.',
            '.' => ',',
            c => c,
        })
        .collect()
}

/// numfmt drops trailing zeros, e.g. "12.30" is rendered as "12.3" and
/// "12.00" as "12", so pad the decimals back to two places.
fn pad_decimals(mut digits: String) -> String {
    match digits.rfind('.') {
        Some(position) => {
            for _ in digits.len() - position - 1..2 {
                digits.push('0');
            }
        }
        None => digits.push_str(".00"),
    }

    digits
}
