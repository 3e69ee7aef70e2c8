use serde::Deserialize;

use super::service::ServiceError;

/// `?id=` query shared by show, update and delete
#[derive(Debug, Deserialize)]
pub struct IdQuery {
    pub id: Option<String>,
}

impl IdQuery {
    /// The id as sent, or a missing-parameter error when absent or empty
    pub fn require_id(&self) -> Result<&str, ServiceError> {
        match self.id.as_deref().map(str::trim) {
            Some(id) if !id.is_empty() => Ok(id),
            _ => Err(ServiceError::MissingParam {
                name: "id",
                kind: "queryParameter",
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_and_empty_ids_are_missing() {
        for id in [None, Some(""), Some("  ")] {
            let query = IdQuery {
                id: id.map(str::to_string),
            };
            let err = query.require_id().unwrap_err();
            assert_eq!(err.to_string(), "param: id (type: queryParameter) is required");
        }
    }

    #[test]
    fn present_id_is_returned_trimmed() {
        let query = IdQuery {
            id: Some(" 12 ".to_string()),
        };
        assert_eq!(query.require_id().unwrap(), "12");
    }
}
