use std::borrow::Cow;

use serde::{Deserialize, Deserializer};
use validator::{Validate, ValidationError};

use crate::api::validation::EMPTY_BODY_MESSAGE;
use crate::db::models::NewOpening;

pub const REMOTE_REQUIRED: &str = "param: remote (type: bool) is required";

/// Body accepted by create and update
///
/// Has no id or timestamp fields: whatever a client sends for them is
/// dropped during decoding. Text fields arrive trimmed, so whitespace-only
/// values count as empty.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
#[validate(schema(function = "not_blank", skip_on_field_errors = false))]
pub struct OpeningRequest {
    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "param: role (type: string) is required"))]
    pub role: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "param: company (type: string) is required"))]
    pub company: String,

    #[serde(default, deserialize_with = "trimmed")]
    #[validate(length(min = 1, message = "param: location (type: string) is required"))]
    pub location: String,

    /// `None` when the client left it out, which is not the same as `false`
    #[serde(default)]
    #[validate(required(message = "param: remote (type: bool) is required"))]
    pub remote: Option<bool>,

    #[serde(default, deserialize_with = "empty_as_none")]
    #[validate(url(message = "param: link (type: url) is invalid"))]
    pub link: Option<String>,

    #[serde(default)]
    #[validate(range(min = 0, message = "param: salary (type: int) must be non-negative"))]
    pub salary: Option<i64>,
}

impl OpeningRequest {
    fn is_blank(&self) -> bool {
        self.role.is_empty()
            && self.company.is_empty()
            && self.location.is_empty()
            && self.remote.is_none()
            && self.link.is_none()
            && self.salary.is_none()
    }
}

fn not_blank(request: &OpeningRequest) -> Result<(), ValidationError> {
    if request.is_blank() {
        let mut err = ValidationError::new("empty_body");
        err.message = Some(Cow::Borrowed(EMPTY_BODY_MESSAGE));
        return Err(err);
    }
    Ok(())
}

fn trimmed<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = String::deserialize(deserializer)?;
    Ok(value.trim().to_string())
}

fn empty_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty()))
}

/// Copy the client-controlled fields into the shape the store writes
impl TryFrom<OpeningRequest> for NewOpening {
    type Error = &'static str;

    fn try_from(request: OpeningRequest) -> Result<Self, Self::Error> {
        let OpeningRequest {
            role,
            company,
            location,
            remote,
            link,
            salary,
        } = request;

        Ok(NewOpening {
            role,
            company,
            location,
            remote: remote.ok_or(REMOTE_REQUIRED)?,
            link,
            salary,
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::api::validation::validation_message;

    fn decode(value: serde_json::Value) -> OpeningRequest {
        serde_json::from_value(value).expect("decodes")
    }

    fn check(value: serde_json::Value) -> Result<(), String> {
        decode(value)
            .validate()
            .map_err(|errors| validation_message(&errors))
    }

    #[test]
    fn complete_request_is_valid() {
        assert_eq!(
            check(json!({
                "role": "Engineer",
                "company": "Acme",
                "location": "Remote",
                "remote": true,
                "link": "https://acme.example/jobs/1",
                "salary": 90000
            })),
            Ok(())
        );
    }

    #[test]
    fn optional_fields_may_be_left_out() {
        assert_eq!(
            check(json!({
                "role": "Engineer",
                "company": "Acme",
                "location": "Remote",
                "remote": false
            })),
            Ok(())
        );
    }

    #[test]
    fn missing_remote_is_rejected_even_when_false_would_be_valid() {
        assert_eq!(
            check(json!({"role": "Engineer", "company": "Acme", "location": "Remote"})),
            Err(REMOTE_REQUIRED.to_string())
        );
    }

    #[test]
    fn empty_role_names_the_field() {
        assert_eq!(
            check(json!({"role": "", "company": "Acme", "location": "Remote", "remote": true})),
            Err("param: role (type: string) is required".to_string())
        );
    }

    #[test]
    fn whitespace_only_text_counts_as_empty() {
        assert_eq!(
            check(json!({"role": "   ", "company": "\t", "location": "Remote", "remote": true})),
            Err("param: role (type: string) is required; \
                 param: company (type: string) is required"
                .to_string())
        );
    }

    #[test]
    fn text_fields_are_stored_trimmed() {
        let request = decode(json!({
            "role": "  Engineer ",
            "company": "Acme",
            "location": " Remote",
            "remote": true,
            "link": " https://acme.example/jobs/1 "
        }));
        assert_eq!(request.role, "Engineer");
        assert_eq!(request.location, "Remote");
        assert_eq!(request.link.as_deref(), Some("https://acme.example/jobs/1"));
        assert!(request.validate().is_ok());
    }

    #[test]
    fn several_failures_are_reported_together() {
        assert_eq!(
            check(json!({"role": "Engineer", "remote": true, "salary": -5})),
            Err("param: company (type: string) is required; \
                 param: location (type: string) is required; \
                 param: salary (type: int) must be non-negative"
                .to_string())
        );
    }

    #[test]
    fn link_must_look_like_a_url() {
        assert_eq!(
            check(json!({
                "role": "Engineer",
                "company": "Acme",
                "location": "Remote",
                "remote": true,
                "link": "not a url"
            })),
            Err("param: link (type: url) is invalid".to_string())
        );
    }

    #[test]
    fn empty_link_counts_as_absent() {
        let request = decode(json!({
            "role": "Engineer",
            "company": "Acme",
            "location": "Remote",
            "remote": true,
            "link": ""
        }));
        assert_eq!(request.link, None);
        assert!(request.validate().is_ok());
    }

    #[test]
    fn blank_body_is_reported_as_a_whole() {
        assert_eq!(check(json!({})), Err(EMPTY_BODY_MESSAGE.to_string()));
    }

    #[test]
    fn mapping_drops_server_owned_fields() {
        let request = decode(json!({
            "id": 42,
            "created_at": "2001-01-01T00:00:00Z",
            "role": "Engineer",
            "company": "Acme",
            "location": "Lisbon",
            "remote": false,
            "salary": 1000
        }));

        let opening = NewOpening::try_from(request).unwrap();
        assert_eq!(
            opening,
            NewOpening {
                role: "Engineer".to_string(),
                company: "Acme".to_string(),
                location: "Lisbon".to_string(),
                remote: false,
                link: None,
                salary: Some(1000),
            }
        );
    }

    #[test]
    fn mapping_refuses_an_unset_remote() {
        let request = OpeningRequest {
            role: "Engineer".to_string(),
            ..OpeningRequest::default()
        };
        assert_eq!(NewOpening::try_from(request), Err(REMOTE_REQUIRED));
    }
}
