//! Conversions between pipeline values and the shapes the client expects.

use backtrace::Backtrace;
use chrono::SecondsFormat;

use crate::pipeline::Value;

/// Renders a data value into its extras form.
///
/// Timestamps use RFC 3339 with an explicit offset so extras stay
/// unambiguous across reporting timezones; everything else uses its natural
/// display form or a compact JSON dump. Total: every value renders to
/// something.
pub fn value_to_string(value: &Value) -> String {
    match value {
        Value::Bool(v) => v.to_string(),
        Value::Int(v) => v.to_string(),
        Value::Float(v) => v.to_string(),
        Value::String(v) => v.clone(),
        Value::Timestamp(v) => v.to_rfc3339_opts(SecondsFormat::Secs, true),
        Value::Json(v) => v.to_string(),
        Value::Error(v) => v.to_string(),
    }
}

/// Converts a captured stack into the program-counter form the client
/// expects: one counter per frame, frame order preserved.
pub fn instruction_addrs(backtrace: &Backtrace) -> Vec<usize> {
    backtrace
        .frames()
        .iter()
        .map(|frame| frame.ip() as usize)
        .collect()
}

#[cfg(test)]
mod tests {
    use chrono::{TimeZone, Utc};

    use super::*;
    use crate::errorlike::MessageError;

    #[test]
    fn timestamps_render_as_rfc3339() {
        let ts = Utc.with_ymd_and_hms(2020, 4, 1, 12, 30, 5).unwrap();
        assert_eq!(
            value_to_string(&Value::Timestamp(ts)),
            "2020-04-01T12:30:05Z"
        );
    }

    #[test]
    fn scalars_render_naturally() {
        assert_eq!(value_to_string(&Value::Bool(true)), "true");
        assert_eq!(value_to_string(&Value::Int(-7)), "-7");
        assert_eq!(value_to_string(&Value::String("dyno".into())), "dyno");
    }

    #[test]
    fn structured_payloads_render_as_json() {
        let v = Value::Json(serde_json::json!({"attempt": 3}));
        assert_eq!(value_to_string(&v), r#"{"attempt":3}"#);
    }

    #[test]
    fn errors_render_their_message() {
        let v = Value::error(MessageError::new("boom"));
        assert_eq!(value_to_string(&v), "boom");
    }

    #[test]
    fn one_counter_per_frame() {
        let bt = Backtrace::new();
        assert_eq!(instruction_addrs(&bt).len(), bt.frames().len());
    }
}
