//! Prediction form values from the command line.

use std::collections::HashMap;

/// Split one `Key=Value` argument.
pub(crate) fn parse_field(raw: &str) -> Result<(String, String), String> {
    let (key, value) = raw
        .split_once('=')
        .ok_or_else(|| format!("expected Key=Value, got {raw}"))?;
    let key = key.trim();
    if key.is_empty() {
        return Err(format!("empty field name in {raw}"));
    }
    Ok((key.to_string(), value.trim().to_string()))
}

/// Collect parsed fields into a form dictionary; later values win.
pub(crate) fn to_form(fields: Vec<(String, String)>) -> HashMap<String, String> {
    fields.into_iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("Type=Apartment", "Type", "Apartment")]
    #[case("City = New Cairo", "City", "New Cairo")]
    #[case("Compound=Not in Compound", "Compound", "Not in Compound")]
    #[case("Delivery_Term=Core & Shell", "Delivery_Term", "Core & Shell")]
    fn test_parse_field(#[case] raw: &str, #[case] key: &str, #[case] value: &str) {
        assert_eq!(
            parse_field(raw).unwrap(),
            (key.to_string(), value.to_string())
        );
    }

    #[rstest]
    #[case("Apartment")]
    #[case("=Apartment")]
    fn test_parse_field_rejects(#[case] raw: &str) {
        assert!(parse_field(raw).is_err());
    }

    #[test]
    fn test_later_values_win() {
        let form = to_form(vec![
            ("Area".to_string(), "100".to_string()),
            ("Area".to_string(), "120".to_string()),
        ]);
        assert_eq!(form["Area"], "120");
    }
}
