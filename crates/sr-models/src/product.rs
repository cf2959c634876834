//! Product line items
//!
//! Numeric inputs arrive as free text. A comma decimal separator is
//! accepted and the longest numeric prefix is used. Anything non-numeric
//! counts as zero.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Magnitude from which totals switch to exponent notation
const EXPONENT_THRESHOLD: f64 = 1e21;

/// Raw product line as typed into the form
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProductLineInput {
    #[serde(alias = "descricao", alias = "descricaoProduto")]
    pub description: String,
    /// Unit of measure
    #[serde(alias = "unidade", alias = "unidadeMedida")]
    pub unit: String,
    #[serde(alias = "qtde", alias = "qtdeEstoque")]
    pub quantity: String,
    #[serde(alias = "valorUnitario")]
    pub unit_value: String,
}

impl ProductLineInput {
    pub fn new(
        description: impl Into<String>,
        unit: impl Into<String>,
        quantity: impl Into<String>,
        unit_value: impl Into<String>,
    ) -> Self {
        Self {
            description: description.into(),
            unit: unit.into(),
            quantity: quantity.into(),
            unit_value: unit_value.into(),
        }
    }

    /// Total shown next to the line while editing
    pub fn display_total(&self) -> String {
        computed_total(&self.quantity, &self.unit_value)
    }
}

/// A product line as it appears in the assembled document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductLine {
    /// 1-based, dense position in the list
    #[serde(rename = "indice")]
    pub index: usize,
    #[serde(rename = "descricaoProduto")]
    pub description: String,
    #[serde(rename = "unidadeMedida")]
    pub unit: String,
    #[serde(rename = "qtdeEstoque")]
    pub quantity_in_stock: String,
    /// Exactly two decimals
    #[serde(rename = "valorUnitario")]
    pub unit_value: String,
    /// Exactly two decimals, `"0.00"` when nothing was computed
    #[serde(rename = "valorTotal")]
    pub total_value: String,
}

impl ProductLine {
    pub fn from_input(index: usize, input: &ProductLineInput) -> Self {
        let quantity = parse_decimal(&input.quantity);
        let unit_value = parse_decimal(&input.unit_value);

        Self {
            index,
            description: input.description.trim().to_string(),
            unit: input.unit.trim().to_string(),
            quantity_in_stock: input.quantity.trim().to_string(),
            unit_value: format_two_decimals(unit_value),
            total_value: format_two_decimals(quantity * unit_value),
        }
    }
}

/// Parse a user-typed decimal, `0.0` when nothing numeric is found
pub fn parse_decimal(raw: &str) -> f64 {
    let normalized = raw.trim().replacen(',', ".", 1);
    let bytes = normalized.as_bytes();
    let is_digit = |i: usize| i < bytes.len() && bytes[i].is_ascii_digit();

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_start = end;
    while is_digit(end) {
        end += 1;
    }
    let mut mantissa_digits = end - int_start;

    if end < bytes.len() && bytes[end] == b'.' {
        let frac_start = end + 1;
        let mut frac_end = frac_start;
        while is_digit(frac_end) {
            frac_end += 1;
        }
        mantissa_digits += frac_end - frac_start;
        end = frac_end;
    }

    if mantissa_digits == 0 {
        return 0.0;
    }

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while is_digit(exp_end) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            end = exp_end;
        }
    }

    normalized[..end]
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
}

/// Format with exactly two decimal places
///
/// Rounds the exact binary value half away from zero, so `0.125` gives
/// `"0.13"` while `1.005` (stored just below) gives `"1.00"`. Magnitudes of
/// 1e21 and above are written in exponent form (`"1e+21"`).
pub fn format_two_decimals(value: f64) -> String {
    if value == 0.0 || !value.is_finite() {
        return "0.00".to_string();
    }
    if value.abs() >= EXPONENT_THRESHOLD {
        return format!("{:e}", value).replacen('e', "e+", 1);
    }

    match Decimal::from_f64_retain(value) {
        Some(exact) => {
            let mut rounded =
                exact.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
            rounded.rescale(2);
            rounded.to_string()
        }
        None => "0.00".to_string(),
    }
}

/// Line total for the editing view: blank when both inputs are zero or empty
pub fn computed_total(quantity: &str, unit_value: &str) -> String {
    let q = parse_decimal(quantity);
    let u = parse_decimal(unit_value);
    if q == 0.0 && u == 0.0 {
        String::new()
    } else {
        format_two_decimals(q * u)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_decimal() {
        let cases = [
            ("3", 3.0),
            ("2,50", 2.5),
            (" 10.25 ", 10.25),
            ("", 0.0),
            ("abc", 0.0),
            ("12abc", 12.0),
            (".5", 0.5),
            ("-4", -4.0),
            ("1e3", 1000.0),
            ("1e", 1.0),
            ("-", 0.0),
        ];

        for (raw, expected) in cases {
            assert_eq!(parse_decimal(raw), expected, "input: {:?}", raw);
        }
    }

    #[test]
    fn test_computed_total_with_comma_decimal() {
        assert_eq!(computed_total("3", "2,50"), "7.50");
    }

    #[test]
    fn test_computed_total_rounds_half_cents_up() {
        assert_eq!(computed_total("1", "0,125"), "0.13");
        assert_eq!(computed_total("5", "0,125"), "0.63");
        assert_eq!(computed_total("1", "-0,125"), "-0.13");
        // 1.005 and 2.675 are stored slightly below the half cent
        assert_eq!(computed_total("1", "1,005"), "1.00");
        assert_eq!(computed_total("1", "2,675"), "2.67");

        let line = ProductLine::from_input(1, &ProductLineInput::new("Prego", "UN", "2", "0,375"));
        assert_eq!(line.unit_value, "0.38");
        assert_eq!(line.total_value, "0.75");
    }

    #[test]
    fn test_format_two_decimals_large_values() {
        assert_eq!(format_two_decimals(123456789.5), "123456789.50");
        assert_eq!(format_two_decimals(1e20), "100000000000000000000.00");
        assert_eq!(format_two_decimals(1e21), "1e+21");
        assert_eq!(format_two_decimals(-1.5e22), "-1.5e+22");
    }

    #[test]
    fn test_computed_total_blank_when_both_zero() {
        assert_eq!(computed_total("0", "0"), "");
        assert_eq!(computed_total("", ""), "");
        assert_eq!(computed_total("2", ""), "0.00");
    }

    #[test]
    fn test_document_line_formats_zero() {
        let line = ProductLine::from_input(1, &ProductLineInput::new("Parafuso", "UN", "0", "0"));

        assert_eq!(line.unit_value, "0.00");
        assert_eq!(line.total_value, "0.00");
        assert_eq!(line.quantity_in_stock, "0");
    }

    #[test]
    fn test_document_line_coerces_inputs() {
        let line = ProductLine::from_input(
            2,
            &ProductLineInput::new(" Cimento ", "KG", " 3 ", "2,50"),
        );

        assert_eq!(line.index, 2);
        assert_eq!(line.description, "Cimento");
        assert_eq!(line.quantity_in_stock, "3");
        assert_eq!(line.unit_value, "2.50");
        assert_eq!(line.total_value, "7.50");
    }

    #[test]
    fn test_product_line_wire_names() {
        let line = ProductLine::from_input(1, &ProductLineInput::new("Areia", "M3", "1", "9.9"));
        let json = serde_json::to_value(&line).unwrap();

        assert_eq!(json["indice"], 1);
        assert_eq!(json["descricaoProduto"], "Areia");
        assert_eq!(json["unidadeMedida"], "M3");
        assert_eq!(json["qtdeEstoque"], "1");
        assert_eq!(json["valorUnitario"], "9.90");
        assert_eq!(json["valorTotal"], "9.90");
    }
}
