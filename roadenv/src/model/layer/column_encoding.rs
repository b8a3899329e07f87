use crate::model::feature::{feature_ops, Attributes};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// how a raw feature attribute becomes a numeric column value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnEncoding {
    /// TRUE / true / yes / 1 become 1, anything else (including missing) becomes 0
    #[default]
    Flag,
    /// parsed as a number, missing or unparseable values contribute nothing
    Numeric,
}

impl ColumnEncoding {
    /// string spellings of a set flag, compared case-insensitively
    pub const TRUE_VALUES: [&'static str; 3] = ["true", "yes", "1"];

    pub fn encode(&self, attributes: &Attributes, key: &str) -> Option<f64> {
        match self {
            ColumnEncoding::Flag => {
                let is_true = attributes.get(key).map(is_set_flag).unwrap_or(false);
                Some(if is_true { 1.0 } else { 0.0 })
            }
            ColumnEncoding::Numeric => feature_ops::attribute_as_f64(attributes, key),
        }
    }
}

fn is_set_flag(value: &Value) -> bool {
    match value {
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64() == Some(1.0),
        Value::String(s) => {
            let lower = s.trim().to_lowercase();
            ColumnEncoding::TRUE_VALUES.contains(&lower.as_str())
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::ColumnEncoding;
    use serde_json::json;

    #[test]
    fn test_flag_encoding() {
        let attrs = json!({
            "TRF_HUMP": "TRUE",
            "TRF_RAISED": "FALSE",
            "CLT_CARR": true,
            "N": 1,
            "F": 1.0,
            "TWO": 2,
            "Y": "y",
            "YES": " Yes ",
            "NULL": null
        })
            .as_object()
            .cloned()
            .unwrap_or_default();
        let e = ColumnEncoding::Flag;
        assert_eq!(e.encode(&attrs, "TRF_HUMP"), Some(1.0));
        assert_eq!(e.encode(&attrs, "TRF_RAISED"), Some(0.0));
        assert_eq!(e.encode(&attrs, "CLT_CARR"), Some(1.0));
        assert_eq!(e.encode(&attrs, "N"), Some(1.0));
        assert_eq!(e.encode(&attrs, "F"), Some(1.0));
        assert_eq!(e.encode(&attrs, "TWO"), Some(0.0));
        assert_eq!(e.encode(&attrs, "Y"), Some(0.0));
        assert_eq!(e.encode(&attrs, "YES"), Some(1.0));
        assert_eq!(e.encode(&attrs, "NULL"), Some(0.0));
        assert_eq!(e.encode(&attrs, "TRF_CUSHI"), Some(0.0));
    }

    #[test]
    fn test_numeric_encoding() {
        let attrs = json!({"lanes": "2", "width": "wide"})
            .as_object()
            .cloned()
            .unwrap_or_default();
        let e = ColumnEncoding::Numeric;
        assert_eq!(e.encode(&attrs, "lanes"), Some(2.0));
        assert_eq!(e.encode(&attrs, "width"), None);
        assert_eq!(e.encode(&attrs, "missing"), None);
    }
}
