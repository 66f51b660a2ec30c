/// Render an integer amount of base units with `decimals` fractional digits.
///
/// Exact for the whole `u128` range, unlike a float conversion.
pub fn format_token_amount(amount: u128, decimals: u32) -> String {
    if decimals == 0 {
        return amount.to_string();
    }
    let scale = 10u128.pow(decimals);
    format!(
        "{}.{:0width$}",
        amount / scale,
        amount % scale,
        width = decimals as usize
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_fraction() {
        assert_eq!(format_token_amount(150_000_000, 8), "1.50000000");
        assert_eq!(format_token_amount(1, 8), "0.00000001");
        assert_eq!(format_token_amount(42, 0), "42");
    }

    #[test]
    fn keeps_wei_precision() {
        assert_eq!(
            format_token_amount(1_000_000_000_000_000_001, 18),
            "1.000000000000000001"
        );
    }
}
