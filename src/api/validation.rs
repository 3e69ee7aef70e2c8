use actix_web::{error::InternalError, http::StatusCode, web};
use validator::ValidationErrors;

use super::response::send_error;

pub const EMPTY_BODY_MESSAGE: &str = "request body is empty or malformed";

/// Field order used when several validation failures are reported together
const FIELD_ORDER: [&str; 6] = ["role", "company", "location", "remote", "link", "salary"];

/// Flatten validation failures into one message, struct-level failures first
pub fn validation_message(errors: &ValidationErrors) -> String {
    let fields = errors.field_errors();

    if let Some(schema_errors) = fields.get("__all__") {
        if let Some(message) = schema_errors.iter().find_map(|e| e.message.as_ref()) {
            return message.to_string();
        }
    }

    let messages: Vec<String> = FIELD_ORDER
        .iter()
        .filter_map(|field| fields.get(*field).map(|errors| (*field, errors)))
        .flat_map(|(field, errors)| {
            errors.iter().map(move |e| {
                e.message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| format!("param: {field} is invalid"))
            })
        })
        .collect();

    if messages.is_empty() {
        "validation failed".to_string()
    } else {
        messages.join("; ")
    }
}

/// Wrappers the two JSON extractors put around the serde message
const DECODE_PREFIXES: [&str; 2] = ["Payload error: ", "Json deserialize error: "];

/// Map a body decoding failure to a client-facing message
///
/// Both extractors report the same failure the same way: wrapper prefixes and
/// the serde position suffix are dropped.
fn decode_message(err: &str) -> String {
    let mut detail = err.trim();
    for prefix in DECODE_PREFIXES {
        detail = detail.strip_prefix(prefix).unwrap_or(detail);
    }
    if let Some((head, _position)) = detail.rsplit_once(" at line ") {
        detail = head;
    }

    if detail.contains("EOF while parsing") {
        EMPTY_BODY_MESSAGE.to_string()
    } else if detail.to_ascii_lowercase().contains("content type") {
        "request body must be sent as application/json".to_string()
    } else {
        format!("request body is invalid: {detail}")
    }
}

/// JSON extractor config for bodies validated on extraction
pub fn validated_json_config(limit: usize) -> actix_web_validator::JsonConfig {
    actix_web_validator::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = match &err {
                actix_web_validator::Error::Validate(validation_errors) => {
                    validation_message(validation_errors)
                }
                other => decode_message(&other.to_string()),
            };
            InternalError::from_response(err, send_error(StatusCode::BAD_REQUEST, message)).into()
        })
}

/// JSON extractor config for bodies validated later in the request pipeline
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let message = decode_message(&err.to_string());
            InternalError::from_response(err, send_error(StatusCode::BAD_REQUEST, message)).into()
        })
}

pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| {
        let message = format!("query string is invalid: {err}");
        InternalError::from_response(err, send_error(StatusCode::BAD_REQUEST, message)).into()
    })
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;

    use validator::ValidationError;

    use super::*;

    fn error(message: &'static str) -> ValidationError {
        let mut err = ValidationError::new("test");
        err.message = Some(Cow::Borrowed(message));
        err
    }

    #[test]
    fn messages_follow_field_declaration_order() {
        let mut errors = ValidationErrors::new();
        errors.add("salary", error("salary bad"));
        errors.add("role", error("role bad"));
        errors.add("remote", error("remote bad"));

        assert_eq!(
            validation_message(&errors),
            "role bad; remote bad; salary bad"
        );
    }

    #[test]
    fn schema_failure_replaces_field_failures() {
        let mut errors = ValidationErrors::new();
        errors.add("role", error("role bad"));
        errors.add("__all__", error(EMPTY_BODY_MESSAGE));

        assert_eq!(validation_message(&errors), EMPTY_BODY_MESSAGE);
    }

    #[test]
    fn decode_failures_are_classified() {
        assert_eq!(
            decode_message("Json deserialize error: EOF while parsing a value at line 1 column 0"),
            EMPTY_BODY_MESSAGE
        );
        assert_eq!(
            decode_message("Content type error"),
            "request body must be sent as application/json"
        );
        assert!(decode_message("invalid type: string \"yes\", expected a boolean")
            .starts_with("request body is invalid: "));
    }

    #[test]
    fn extractor_wrappers_do_not_change_the_message() {
        let detail = "invalid type: string \"yes\", expected a boolean at line 1 column 70";
        let validated = decode_message(&format!("Payload error: Json deserialize error: {detail}"));
        let plain = decode_message(&format!("Json deserialize error: {detail}"));

        assert_eq!(validated, plain);
        assert_eq!(
            plain,
            "request body is invalid: invalid type: string \"yes\", expected a boolean"
        );
    }
}
