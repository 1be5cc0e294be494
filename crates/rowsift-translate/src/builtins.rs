#![deny(unsafe_code)]

//! Built-in translator library.
//!
//! Every builtin is resolvable by name through the
//! [`TranslatorRegistry`](crate::TranslatorRegistry). Textual builtins are
//! lenient: non-text scalars pass through unchanged rather than failing, so a
//! numeric column fed through `trim` is not destroyed. Parsing builtins are
//! strict and report a [`TranslateError`] on unparseable input; `Missing`
//! always passes through untouched since there is nothing to convert.

use chrono::NaiveDate;
use rowsift_model::Value;

use crate::{TranslateContext, TranslateError, Translator};

/// Date formats accepted by [`DateIso8601`], tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%Y/%m/%d", "%m/%d/%Y", "%d-%b-%Y", "%d %b %Y"];

/// Strip leading and trailing whitespace from text values.
pub struct Trim;

impl Translator for Trim {
    fn name(&self) -> &str {
        "trim"
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        Ok(match ctx.value() {
            Value::Text(s) => Value::Text(s.trim().to_string()),
            other => other.clone(),
        })
    }
}

/// Uppercase text values.
pub struct Uppercase;

impl Translator for Uppercase {
    fn name(&self) -> &str {
        "uppercase"
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        Ok(match ctx.value() {
            Value::Text(s) => Value::Text(s.to_uppercase()),
            other => other.clone(),
        })
    }
}

/// Lowercase text values.
pub struct Lowercase;

impl Translator for Lowercase {
    fn name(&self) -> &str {
        "lowercase"
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        Ok(match ctx.value() {
            Value::Text(s) => Value::Text(s.to_lowercase()),
            other => other.clone(),
        })
    }
}

/// Convert the current value to an integer.
pub struct ToInt;

impl Translator for ToInt {
    fn name(&self) -> &str {
        "to_int"
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        match ctx.value() {
            Value::Int(n) => Ok(Value::Int(*n)),
            Value::Float(f) => Ok(Value::Int(*f as i64)),
            Value::Bool(b) => Ok(Value::Int(i64::from(*b))),
            Value::Missing => Ok(Value::Missing),
            Value::Text(s) => s
                .trim()
                .parse::<i64>()
                .map(Value::Int)
                .map_err(|_| TranslateError::ParseInt { value: s.clone() }),
        }
    }
}

/// Convert the current value to a float.
pub struct ToFloat;

impl Translator for ToFloat {
    fn name(&self) -> &str {
        "to_float"
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        match ctx.value() {
            Value::Float(f) => Ok(Value::Float(*f)),
            Value::Int(n) => Ok(Value::Float(*n as f64)),
            Value::Bool(b) => Ok(Value::Float(f64::from(u8::from(*b)))),
            Value::Missing => Ok(Value::Missing),
            Value::Text(s) => s
                .trim()
                .parse::<f64>()
                .map(Value::Float)
                .map_err(|_| TranslateError::ParseFloat { value: s.clone() }),
        }
    }
}

/// Substitute a fixed value when the current slot is `Missing`.
pub struct DefaultValue {
    default: Value,
}

impl DefaultValue {
    pub fn new(default: Value) -> Self {
        Self { default }
    }
}

impl Translator for DefaultValue {
    fn name(&self) -> &str {
        "default_value"
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        Ok(match ctx.value() {
            Value::Missing => self.default.clone(),
            other => other.clone(),
        })
    }
}

/// Prefix the current value's text rendering with a fixed string.
pub struct Prefix {
    prefix: String,
}

impl Prefix {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl Translator for Prefix {
    fn name(&self) -> &str {
        "prefix"
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        Ok(match ctx.value() {
            Value::Missing => Value::Missing,
            other => Value::Text(format!("{}{}", self.prefix, other)),
        })
    }
}

/// Normalize a date in one of several common source formats to ISO 8601.
pub struct DateIso8601;

impl Translator for DateIso8601 {
    fn name(&self) -> &str {
        "date_iso8601"
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        match ctx.value() {
            Value::Missing => Ok(Value::Missing),
            Value::Text(s) => {
                let trimmed = s.trim();
                for format in DATE_FORMATS {
                    if let Ok(date) = NaiveDate::parse_from_str(trimmed, format) {
                        return Ok(Value::Text(date.format("%Y-%m-%d").to_string()));
                    }
                }
                Err(TranslateError::ParseDate { value: s.clone() })
            }
            other => Err(TranslateError::ParseDate {
                value: other.to_string(),
            }),
        }
    }
}

/// Return the target attribute's current value unchanged.
///
/// Also the fallback the registry hands out for unknown translator names.
pub struct Identity;

impl Translator for Identity {
    fn name(&self) -> &str {
        "identity"
    }

    fn apply(&self, ctx: &TranslateContext<'_>) -> Result<Value, TranslateError> {
        Ok(ctx.value().clone())
    }
}

#[cfg(test)]
mod tests {
    use rowsift_model::{AttrName, AttributeView};

    use super::*;

    fn apply(translator: &dyn Translator, value: Value) -> Result<Value, TranslateError> {
        let target = AttrName::new("field").unwrap();
        let view: AttributeView = [(target.clone(), value)].into_iter().collect();
        translator.apply(&TranslateContext::new(&target, &view))
    }

    #[test]
    fn trim_leaves_non_text_alone() {
        assert_eq!(apply(&Trim, Value::from("  x ")).unwrap(), Value::from("x"));
        assert_eq!(apply(&Trim, Value::Int(3)).unwrap(), Value::Int(3));
        assert_eq!(apply(&Trim, Value::Missing).unwrap(), Value::Missing);
    }

    #[test]
    fn to_int_parses_and_converts() {
        assert_eq!(apply(&ToInt, Value::from(" 42 ")).unwrap(), Value::Int(42));
        assert_eq!(apply(&ToInt, Value::Float(3.9)).unwrap(), Value::Int(3));
        assert_eq!(apply(&ToInt, Value::Bool(true)).unwrap(), Value::Int(1));
        assert_eq!(apply(&ToInt, Value::Missing).unwrap(), Value::Missing);
        assert!(apply(&ToInt, Value::from("forty-two")).is_err());
    }

    #[test]
    fn default_value_only_fills_missing() {
        let translator = DefaultValue::new(Value::from("unknown"));
        assert_eq!(
            apply(&translator, Value::Missing).unwrap(),
            Value::from("unknown")
        );
        assert_eq!(
            apply(&translator, Value::from("x")).unwrap(),
            Value::from("x")
        );
    }

    #[test]
    fn date_accepts_common_formats() {
        for input in ["2024-03-05", "2024/03/05", "03/05/2024", "5-Mar-2024"] {
            assert_eq!(
                apply(&DateIso8601, Value::from(input)).unwrap(),
                Value::from("2024-03-05"),
                "input {input:?}"
            );
        }
        assert!(apply(&DateIso8601, Value::from("yesterday")).is_err());
        assert_eq!(apply(&DateIso8601, Value::Missing).unwrap(), Value::Missing);
    }

    #[test]
    fn prefix_renders_through_display() {
        let translator = Prefix::new("ID-");
        assert_eq!(
            apply(&translator, Value::Int(7)).unwrap(),
            Value::from("ID-7")
        );
        assert_eq!(apply(&translator, Value::Missing).unwrap(), Value::Missing);
    }
}
