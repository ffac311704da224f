use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Caller-supplied rollout request.
///
/// `name` selects the target service (exact match), `image` is the container
/// image reference to roll out, and `commit` is the commit hash recorded in
/// the deploy labels. `commit` may be empty; it is stamped verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub commit: String,
}

impl UpdateRequest {
    /// Check that the required fields are present.
    ///
    /// `name` and `image` must be non-empty. `commit` is optional by design:
    /// not every caller deploys from a tracked revision.
    pub fn validate(&self) -> ModelResult<()> {
        if self.name.is_empty() {
            return Err(ModelError::MissingField("name"));
        }
        if self.image.is_empty() {
            return Err(ModelError::MissingField("image"));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::UpdateRequest;
    use crate::error::ModelError;

    fn request(name: &str, image: &str, commit: &str) -> UpdateRequest {
        UpdateRequest {
            name: name.to_string(),
            image: image.to_string(),
            commit: commit.to_string(),
        }
    }

    #[test]
    fn complete_request_is_valid() {
        assert!(request("web", "registry/web:v2", "abcd123").validate().is_ok());
    }

    #[test]
    fn empty_commit_is_allowed() {
        assert!(request("web", "registry/web:v2", "").validate().is_ok());
    }

    #[test]
    fn missing_name_is_rejected() {
        let err = request("", "registry/web:v2", "abcd123")
            .validate()
            .unwrap_err();
        assert!(matches!(err, ModelError::MissingField("name")));
    }

    #[test]
    fn missing_image_is_rejected() {
        let err = request("web", "", "abcd123").validate().unwrap_err();
        assert!(matches!(err, ModelError::MissingField("image")));
    }

    #[test]
    fn absent_fields_default_to_empty() {
        let req: UpdateRequest = serde_json::from_str(r#"{"name":"web"}"#).unwrap();
        assert_eq!(req.name, "web");
        assert!(req.image.is_empty());
        assert!(req.commit.is_empty());
    }
}
