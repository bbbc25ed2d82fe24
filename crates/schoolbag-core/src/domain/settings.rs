//! Settings model domain entity.
//!
//! The settings file describes the physical attributes the school bag is
//! configured for. On disk it is a JSON object:
//!
//! ```json
//! { "height": 170, "weight": 60, "birthday": "2000-01-01" }
//! ```
//!
//! Decoding happens in two steps:
//!
//! 1. [`SettingsDocument::from_json_slice`] (or `from_json_str`) parses the
//!    file content into a fixed-shape
//!    record with one slot per recognised field. Unknown keys are dropped and
//!    `null` counts as absent.
//! 2. `SettingsModel::try_from(document)` checks that every field is present
//!    (in declared order: height, weight, birthday) and then validates each
//!    value in the same order.
//!
//! A [`SettingsModel`] therefore only exists in a fully valid state.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::{Map, Value};
use thiserror::Error;

/// Fixed on-disk format of the `birthday` field.
pub const BIRTHDAY_FORMAT: &str = "%Y-%m-%d";

/// The three recognised settings fields, in declared order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingsField {
    Height,
    Weight,
    Birthday,
}

impl SettingsField {
    /// All fields in the order they are checked.
    pub const ALL: [SettingsField; 3] = [Self::Height, Self::Weight, Self::Birthday];

    /// Returns the JSON key for this field.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Height => "height",
            Self::Weight => "weight",
            Self::Birthday => "birthday",
        }
    }
}

impl fmt::Display for SettingsField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Errors produced while turning a [`SettingsDocument`] into a [`SettingsModel`].
#[derive(Debug, Clone, Error, PartialEq)]
pub enum FieldError {
    /// A required field is absent (or `null`).
    #[error("missing required field `{0}`")]
    Missing(SettingsField),

    /// A field is present but its value has the wrong type or violates its
    /// constraint.
    #[error("invalid value for field `{field}`: {reason}")]
    Invalid { field: SettingsField, reason: String },
}

impl FieldError {
    /// Returns the field this error refers to.
    pub fn field(&self) -> SettingsField {
        match self {
            Self::Missing(field) => *field,
            Self::Invalid { field, .. } => *field,
        }
    }
}

// ── Decode schema ─────────────────────────────────────────────────────────────

/// Fixed-shape view of a parsed settings object.
///
/// Each slot holds the raw JSON value for one recognised key, or `None` when
/// the key is absent or `null`. Values are not type-checked yet; that is the
/// job of `SettingsModel::try_from`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SettingsDocument {
    pub height: Option<Value>,
    pub weight: Option<Value>,
    pub birthday: Option<Value>,
}

impl SettingsDocument {
    /// Parses settings text into a document.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error when the text is not well-formed JSON or
    /// the top-level value is not an object.
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let map: Map<String, Value> = serde_json::from_str(content)?;
        Ok(Self::from_map(map))
    }

    /// Parses raw settings bytes into a document.
    ///
    /// # Errors
    ///
    /// As [`from_json_str`](Self::from_json_str); bytes that are not valid
    /// UTF-8 are reported as a `serde_json` error too.
    pub fn from_json_slice(content: &[u8]) -> Result<Self, serde_json::Error> {
        let map: Map<String, Value> = serde_json::from_slice(content)?;
        Ok(Self::from_map(map))
    }

    /// Picks the recognised keys out of a JSON object, ignoring all others.
    pub fn from_map(mut map: Map<String, Value>) -> Self {
        let mut take = |field: SettingsField| {
            map.remove(field.as_str()).filter(|v| !v.is_null())
        };
        Self {
            height: take(SettingsField::Height),
            weight: take(SettingsField::Weight),
            birthday: take(SettingsField::Birthday),
        }
    }

    /// Returns the first absent field in declared order, if any.
    pub fn first_missing(&self) -> Option<SettingsField> {
        SettingsField::ALL.into_iter().find(|field| self.slot(*field).is_none())
    }

    fn require(&self, field: SettingsField) -> Result<&Value, FieldError> {
        self.slot(field).ok_or(FieldError::Missing(field))
    }

    fn slot(&self, field: SettingsField) -> Option<&Value> {
        match field {
            SettingsField::Height => self.height.as_ref(),
            SettingsField::Weight => self.weight.as_ref(),
            SettingsField::Birthday => self.birthday.as_ref(),
        }
    }
}

// ── Settings model ────────────────────────────────────────────────────────────

/// Validated, immutable settings record.
///
/// Serialises to the same JSON shape it is loaded from, so a serialised model
/// decodes back to an equal model.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SettingsModel {
    height: f64,
    weight: f64,
    birthday: NaiveDate,
}

impl SettingsModel {
    /// Builds a model from already-typed values.
    ///
    /// # Errors
    ///
    /// Returns [`FieldError::Invalid`] if `height` or `weight` is negative or
    /// not finite.
    pub fn new(height: f64, weight: f64, birthday: NaiveDate) -> Result<Self, FieldError> {
        Ok(Self {
            height: check_measure(SettingsField::Height, height)?,
            weight: check_measure(SettingsField::Weight, weight)?,
            birthday,
        })
    }

    /// Height of the wearer (centimetres).
    pub fn height(&self) -> f64 {
        self.height
    }

    /// Weight of the wearer (kilograms).
    pub fn weight(&self) -> f64 {
        self.weight
    }

    pub fn birthday(&self) -> NaiveDate {
        self.birthday
    }
}

impl TryFrom<SettingsDocument> for SettingsModel {
    type Error = FieldError;

    fn try_from(document: SettingsDocument) -> Result<Self, Self::Error> {
        use SettingsField::{Birthday, Height, Weight};

        // Presence of all three is checked before any value is inspected.
        if let Some(field) = document.first_missing() {
            return Err(FieldError::Missing(field));
        }

        let height = decode_measure(Height, document.require(Height)?)?;
        let weight = decode_measure(Weight, document.require(Weight)?)?;
        let birthday = decode_birthday(document.require(Birthday)?)?;

        tracing::trace!(height, weight, %birthday, "settings document decoded");
        Self::new(height, weight, birthday)
    }
}

fn decode_measure(field: SettingsField, value: &Value) -> Result<f64, FieldError> {
    let number = value.as_f64().ok_or_else(|| FieldError::Invalid {
        field,
        reason: format!("expected a number, found {}", describe(value)),
    })?;
    check_measure(field, number)
}

fn check_measure(field: SettingsField, value: f64) -> Result<f64, FieldError> {
    if !value.is_finite() {
        return Err(FieldError::Invalid {
            field,
            reason: format!("expected a finite number, got {value}"),
        });
    }
    if value < 0.0 {
        return Err(FieldError::Invalid {
            field,
            reason: format!("must not be negative, got {value}"),
        });
    }
    Ok(value)
}

fn decode_birthday(value: &Value) -> Result<NaiveDate, FieldError> {
    let field = SettingsField::Birthday;
    let text = value.as_str().ok_or_else(|| FieldError::Invalid {
        field,
        reason: format!("expected a date string, found {}", describe(value)),
    })?;
    NaiveDate::parse_from_str(text, BIRTHDAY_FORMAT).map_err(|e| FieldError::Invalid {
        field,
        reason: format!("expected a date in YYYY-MM-DD format, got \"{text}\": {e}"),
    })
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid test date")
    }

    fn decode(value: Value) -> Result<SettingsModel, FieldError> {
        let map = match value {
            Value::Object(map) => map,
            other => panic!("test input must be an object, got {other}"),
        };
        SettingsModel::try_from(SettingsDocument::from_map(map))
    }

    // ── SettingsDocument ──────────────────────────────────────────────────────

    #[test]
    fn test_document_from_json_str_picks_recognised_fields() {
        // Arrange
        let text = r#"{"height": 170, "weight": 60, "birthday": "2000-01-01"}"#;

        // Act
        let doc = SettingsDocument::from_json_str(text).expect("parse");

        // Assert
        assert_eq!(doc.height, Some(json!(170)));
        assert_eq!(doc.weight, Some(json!(60)));
        assert_eq!(doc.birthday, Some(json!("2000-01-01")));
    }

    #[test]
    fn test_document_ignores_unknown_fields() {
        let text = r#"{"height": 1, "weight": 2, "birthday": "2000-01-01",
                       "gender": "female", "lightingMode": "off"}"#;

        let doc = SettingsDocument::from_json_str(text).expect("parse");

        assert_eq!(doc.first_missing(), None);
    }

    #[test]
    fn test_document_treats_null_as_absent() {
        let doc = SettingsDocument::from_json_str(r#"{"height": null}"#).expect("parse");

        assert_eq!(doc.height, None);
        assert_eq!(doc.first_missing(), Some(SettingsField::Height));
    }

    #[test]
    fn test_document_rejects_non_object_top_level() {
        assert!(SettingsDocument::from_json_str("[170, 60, \"2000-01-01\"]").is_err());
        assert!(SettingsDocument::from_json_str("42").is_err());
    }

    #[test]
    fn test_document_rejects_malformed_and_empty_text() {
        assert!(SettingsDocument::from_json_str("{\"height\": ").is_err());
        assert!(SettingsDocument::from_json_str("").is_err());
    }

    #[test]
    fn test_document_from_json_slice_rejects_invalid_utf8() {
        // Invalid bytes both outside and inside a string literal.
        assert!(SettingsDocument::from_json_slice(&[0xFF, 0xFE, b'{', b'}']).is_err());
        assert!(SettingsDocument::from_json_slice(b"{\"birthday\": \"\xFF\"}").is_err());

        let doc = SettingsDocument::from_json_slice(br#"{"height": 1}"#).expect("parse");
        assert_eq!(doc.height, Some(json!(1)));
    }

    // ── SettingsModel decode ──────────────────────────────────────────────────

    #[test]
    fn test_decode_valid_document_produces_exact_values() {
        // Arrange / Act
        let model = decode(json!({"height": 170, "weight": 60, "birthday": "2000-01-01"}))
            .expect("valid settings");

        // Assert
        assert_eq!(model.height(), 170.0);
        assert_eq!(model.weight(), 60.0);
        assert_eq!(model.birthday(), date(2000, 1, 1));
    }

    #[test]
    fn test_decode_accepts_fractional_and_zero_measures() {
        let model = decode(json!({"height": 0, "weight": 12.5, "birthday": "2011-02-28"}))
            .expect("valid settings");

        assert_eq!(model.height(), 0.0);
        assert_eq!(model.weight(), 12.5);
    }

    #[test]
    fn test_decode_missing_height_names_height() {
        let err = decode(json!({"weight": 60, "birthday": "2000-01-01"})).unwrap_err();

        assert_eq!(err, FieldError::Missing(SettingsField::Height));
    }

    #[test]
    fn test_decode_reports_first_missing_field_in_declared_order() {
        let err = decode(json!({"height": 170})).unwrap_err();
        assert_eq!(err, FieldError::Missing(SettingsField::Weight));

        let err = decode(json!({})).unwrap_err();
        assert_eq!(err, FieldError::Missing(SettingsField::Height));
    }

    #[test]
    fn test_decode_checks_presence_before_values() {
        // height is invalid, but birthday is missing: absence wins.
        let err = decode(json!({"height": -1, "weight": 60})).unwrap_err();

        assert_eq!(err, FieldError::Missing(SettingsField::Birthday));
    }

    #[test]
    fn test_decode_negative_height_is_invalid() {
        let err = decode(json!({"height": -5, "weight": 60, "birthday": "2000-01-01"}))
            .unwrap_err();

        assert_eq!(err.field(), SettingsField::Height);
        assert!(matches!(err, FieldError::Invalid { .. }));
    }

    #[test]
    fn test_decode_negative_weight_is_invalid() {
        let err = decode(json!({"height": 5, "weight": -0.5, "birthday": "2000-01-01"}))
            .unwrap_err();

        assert_eq!(err.field(), SettingsField::Weight);
    }

    #[test]
    fn test_decode_non_numeric_height_is_invalid() {
        let err = decode(json!({"height": "tall", "weight": 60, "birthday": "2000-01-01"}))
            .unwrap_err();

        assert_eq!(err.field(), SettingsField::Height);
        assert!(err.to_string().contains("expected a number, found a string"));
    }

    #[test]
    fn test_decode_unparsable_birthday_is_invalid() {
        let err = decode(json!({"height": 170, "weight": 60, "birthday": "01.01.2000"}))
            .unwrap_err();

        assert_eq!(err.field(), SettingsField::Birthday);
    }

    #[test]
    fn test_decode_impossible_calendar_date_is_invalid() {
        let err = decode(json!({"height": 170, "weight": 60, "birthday": "2001-02-29"}))
            .unwrap_err();

        assert_eq!(err.field(), SettingsField::Birthday);
    }

    #[test]
    fn test_decode_numeric_birthday_is_invalid() {
        let err = decode(json!({"height": 170, "weight": 60, "birthday": 20000101}))
            .unwrap_err();

        assert!(err.to_string().contains("expected a date string"));
    }

    // ── SettingsModel::new ────────────────────────────────────────────────────

    #[test]
    fn test_new_rejects_non_finite_measures() {
        let err = SettingsModel::new(f64::NAN, 1.0, date(2000, 1, 1)).unwrap_err();
        assert_eq!(err.field(), SettingsField::Height);

        let err = SettingsModel::new(1.0, f64::INFINITY, date(2000, 1, 1)).unwrap_err();
        assert_eq!(err.field(), SettingsField::Weight);
    }

    #[test]
    fn test_serialized_model_decodes_to_equal_model() {
        // Arrange
        let model = SettingsModel::new(152.5, 41.0, date(2012, 9, 30)).expect("valid");

        // Act
        let text = serde_json::to_string(&model).expect("serialize");
        let doc = SettingsDocument::from_json_str(&text).expect("parse");
        let restored = SettingsModel::try_from(doc).expect("decode");

        // Assert
        assert!(text.contains("\"birthday\":\"2012-09-30\""), "got {text}");
        assert_eq!(model, restored);
    }

    #[test]
    fn test_settings_field_display_matches_json_key() {
        let names: Vec<String> = SettingsField::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["height", "weight", "birthday"]);
    }
}
