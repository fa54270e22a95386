/// Money is represented as integer kobo to avoid floating-point drift.
/// 1 naira = 100 kobo, so ₦10,000.00 = 1_000_000 kobo.
///
/// 128 bits leaves room for years of weekly compounding on the top tier.
pub type Kobo = i128;

/// Rates are integer basis points: 1% = 100 bps, 100% = 10_000 bps.
pub type BasisPoints = u32;

pub const BPS_SCALE: Kobo = 10_000;

/// Convert whole naira into kobo.
pub const fn naira(units: i64) -> Kobo {
    units as Kobo * 100
}

/// Apply a basis-point rate to an amount, rounding half away from zero.
/// Saturates at the `Kobo` bounds instead of wrapping.
pub fn apply_rate(amount: Kobo, rate: BasisPoints) -> Kobo {
    let (quotient, remainder) = mul_div_rem(amount.unsigned_abs(), rate as u128, BPS_SCALE as u128);
    let rounded = if remainder * 2 >= BPS_SCALE as u128 {
        quotient.saturating_add(1)
    } else {
        quotient
    };
    let magnitude = Kobo::try_from(rounded).unwrap_or(Kobo::MAX);
    if amount < 0 { -magnitude } else { magnitude }
}

/// Floor of `a * b / c` and its remainder, without forming the full product.
///
/// Shift-and-add over the bits of `b`, keeping the running product as
/// `quotient * c + remainder` with `remainder < c`. The quotient saturates
/// at `u128::MAX`. `c` must be non-zero and below `2^127`.
pub fn mul_div_rem(a: u128, b: u128, c: u128) -> (u128, u128) {
    debug_assert!(c > 0 && c < 1 << 127);

    let (a_quot, a_rem) = (a / c, a % c);
    let mut quotient: u128 = 0;
    let mut remainder: u128 = 0;

    for bit in (0..u128::BITS - b.leading_zeros()).rev() {
        quotient = quotient.saturating_mul(2);
        remainder *= 2;
        if remainder >= c {
            remainder -= c;
            quotient = quotient.saturating_add(1);
        }

        if (b >> bit) & 1 == 1 {
            quotient = quotient.saturating_add(a_quot);
            remainder += a_rem;
            if remainder >= c {
                remainder -= c;
                quotient = quotient.saturating_add(1);
            }
        }
    }

    (quotient, remainder)
}

/// Format kobo for display with a naira sign and thousands separators.
/// Example: 1_102_500 -> "₦11,025.00"
pub fn format_naira(kobo: Kobo) -> String {
    let sign = if kobo < 0 { "-" } else { "" };
    let abs = kobo.unsigned_abs();
    let digits = (abs / 100).to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{}₦{}.{:02}", sign, grouped, abs % 100)
}
