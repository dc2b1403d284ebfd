use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serializer;
use serde_json::json;

/// Standard ingestion envelope: the body mirrors the HTTP status so
/// schedulers reading only the payload can tell success from failure.
pub fn json_response(message: impl Into<String>, status_txt: &str, status: StatusCode) -> Response {
    (
        status,
        Json(json!({
            "message": message.into(),
            "status_txt": status_txt,
            "status": status.as_u16(),
        })),
    )
        .into_response()
}

/// Serialize optional floats with non-finite values flattened to an
/// explicit null; NaN is not representable in JSON and must never leak
/// into the payload.
pub fn nan_to_null<S>(value: &Option<f64>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(v) if v.is_finite() => serializer.serialize_f64(*v),
        _ => serializer.serialize_none(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Row {
        #[serde(serialize_with = "nan_to_null")]
        value: Option<f64>,
    }

    #[test]
    fn nan_serializes_as_null() {
        let json = serde_json::to_string(&Row {
            value: Some(f64::NAN),
        })
        .unwrap();
        assert_eq!(json, r#"{"value":null}"#);
    }

    #[test]
    fn finite_values_serialize_untouched() {
        let json = serde_json::to_string(&Row { value: Some(1.5) }).unwrap();
        assert_eq!(json, r#"{"value":1.5}"#);
        let json = serde_json::to_string(&Row { value: None }).unwrap();
        assert_eq!(json, r#"{"value":null}"#);
    }
}
