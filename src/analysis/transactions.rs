//! Decoding and formatting of the transactions API response.
//!
//! Records are consumed for display only. The list itself is kept as raw JSON
//! so one odd record cannot hide the count; only the first record is decoded.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::config::CURRENCY_PREFIX;
use crate::error_handling::ProbeError;

/// One transaction record as returned by `/api/transactions`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Transaction {
    /// Record identifier (usually a string)
    #[serde(default, deserialize_with = "present")]
    pub id: Option<Value>,
    /// Free-text description
    #[serde(default, deserialize_with = "present")]
    pub description: Option<Value>,
    /// Amount in rupiah
    #[serde(default, deserialize_with = "present")]
    pub amount: Option<Value>,
    /// Compliance analysis attached by the backend, if any
    #[serde(default, deserialize_with = "present")]
    pub analysis: Option<Value>,
}

/// Status fields of a transaction's analysis.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// Compliance status
    #[serde(default, deserialize_with = "present")]
    pub status: Option<Value>,
    /// Kind of violation, if any
    #[serde(default, deserialize_with = "present")]
    pub violation_type: Option<Value>,
}

impl Transaction {
    /// Decodes a record from the API's array.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::Json` if the record is not a JSON object.
    pub fn from_record(record: &Value) -> Result<Self, ProbeError> {
        Ok(Transaction::deserialize(record)?)
    }

    /// The record id, as printed.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::MissingField` if the record has no `id`.
    pub fn id_text(&self) -> Result<String, ProbeError> {
        self.id
            .as_ref()
            .map(value_text)
            .ok_or(ProbeError::MissingField("id"))
    }

    /// The description, as printed.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::MissingField` if the record has no `description`.
    pub fn description_text(&self) -> Result<String, ProbeError> {
        self.description
            .as_ref()
            .map(value_text)
            .ok_or(ProbeError::MissingField("description"))
    }

    /// The amount with currency prefix and thousands separators.
    ///
    /// # Errors
    ///
    /// Returns `ProbeError::MissingField` if there is no `amount` and
    /// `ProbeError::InvalidAmount` if it is not a number.
    pub fn amount_text(&self) -> Result<String, ProbeError> {
        let amount = self.amount.as_ref().ok_or(ProbeError::MissingField("amount"))?;
        Ok(format!("{CURRENCY_PREFIX} {}", format_amount(amount)?))
    }

    /// True when the record carries a non-empty analysis.
    pub fn has_analysis(&self) -> bool {
        self.analysis.as_ref().is_some_and(is_truthy)
    }

    /// Status fields of the analysis, when it is an object.
    pub fn analysis_details(&self) -> Option<Analysis> {
        self.analysis
            .as_ref()
            .filter(|v| is_truthy(v))
            .map(|v| Analysis::deserialize(v).unwrap_or_default())
    }
}

impl Analysis {
    /// The status, or `N/A`.
    pub fn status_text(&self) -> String {
        self.status.as_ref().map_or_else(|| "N/A".to_string(), value_text)
    }

    /// The violation type, or `N/A`.
    pub fn violation_text(&self) -> String {
        self.violation_type
            .as_ref()
            .map_or_else(|| "N/A".to_string(), value_text)
    }
}

/// Keeps an explicit JSON `null` as `Some(Value::Null)`; only a missing field is `None`.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Parses the API body as a JSON array of records.
///
/// # Errors
///
/// Returns `ProbeError::Json` for malformed JSON and `ProbeError::NotAnArray`
/// for any other JSON value.
pub fn parse_transactions(body: &str) -> Result<Vec<Value>, ProbeError> {
    match serde_json::from_str::<Value>(body)? {
        Value::Array(records) => Ok(records),
        other => Err(ProbeError::NotAnArray(json_kind(&other))),
    }
}

/// Formats a JSON number with comma thousands separators.
///
/// Integers print without a fractional part; floats always keep one
/// (`1500.0` prints as `1,500.0`). Floats at or above `1e16`, or below
/// `1e-4`, print ungrouped in exponent form (`1e+16`).
///
/// # Errors
///
/// Returns `ProbeError::InvalidAmount` if `amount` is not a number.
pub fn format_amount(amount: &Value) -> Result<String, ProbeError> {
    let number = match amount {
        Value::Number(n) => n,
        other => return Err(ProbeError::InvalidAmount(other.to_string())),
    };

    let plain = if let Some(i) = number.as_i64() {
        i.to_string()
    } else if let Some(u) = number.as_u64() {
        u.to_string()
    } else {
        let f = number.as_f64().unwrap_or_default();
        if f != 0.0 && (f.abs() >= 1e16 || f.abs() < 1e-4) {
            return Ok(exponent_text(f));
        }
        if f.is_finite() && f.fract() == 0.0 {
            format!("{f:.1}")
        } else {
            f.to_string()
        }
    };

    let (sign, unsigned) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match unsigned.split_once('.') {
        Some((int_part, frac)) => (int_part, Some(frac)),
        None => (unsigned, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, digit) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    Ok(match frac_part {
        Some(frac) => format!("{sign}{grouped}.{frac}"),
        None => format!("{sign}{grouped}"),
    })
}

fn exponent_text(f: f64) -> String {
    let text = format!("{f:e}");
    match text.split_once('e') {
        Some((mantissa, exp)) => {
            let (sign, digits) = match exp.strip_prefix('-') {
                Some(digits) => ('-', digits),
                None => ('+', exp),
            };
            format!("{mantissa}e{sign}{digits:0>2}")
        }
        None => text,
    }
}

/// Text of a JSON value as shown to the user: strings unquoted, `null` as
/// `None`, everything else as JSON.
pub fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Null => "None".to_string(),
        other => other.to_string(),
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
