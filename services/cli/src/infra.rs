use rust_decimal::Decimal;
use sollist::config::OutputFormat;
use std::str::FromStr;

pub(crate) fn parse_decimal(raw: &str) -> Result<Decimal, String> {
    let normalized = raw.trim().replace(',', ".");
    Decimal::from_str(&normalized).map_err(|err| format!("failed to parse '{raw}' as amount ({err})"))
}

pub(crate) fn parse_format(raw: &str) -> Result<OutputFormat, String> {
    OutputFormat::parse(raw).map_err(|err| err.to_string())
}

/// Two decimal places, for terminal output only.
pub(crate) fn money(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn parse_decimal_accepts_comma_separator() {
        assert_eq!(parse_decimal("120,50"), Ok(dec!(120.50)));
        assert_eq!(parse_decimal(" 450 "), Ok(dec!(450)));
        assert!(parse_decimal("zwölf").is_err());
    }

    #[test]
    fn parse_format_rejects_unknown_values() {
        assert_eq!(parse_format("json"), Ok(OutputFormat::Json));
        assert!(parse_format("pdf").is_err());
    }

    #[test]
    fn money_rounds_to_cents() {
        assert_eq!(money(dec!(102.272727)), "102.27");
        assert_eq!(money(dec!(5)), "5.00");
    }
}
