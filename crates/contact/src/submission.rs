use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationErrors};

/// One contact form post: who wrote, how to call them back, and what they want.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct ContactSubmission {
    #[serde(default)]
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub phone: String,
    #[serde(default)]
    #[validate(length(min = 1))]
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum SubmissionError {
    #[error("malformed submission: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("invalid fields: {}", fields.join(", "))]
    Invalid { fields: Vec<String> },
}

impl ContactSubmission {
    pub fn new(
        name: impl Into<String>,
        phone: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            message: message.into(),
        }
    }

    /// Decode a JSON request body and run field validation on it.
    ///
    /// Absent fields decode as empty text so they are reported by name
    /// instead of as a parser failure.
    pub fn parse(body: &[u8]) -> Result<Self, SubmissionError> {
        let submission: Self = serde_json::from_slice(body)?;

        submission.validate().map_err(|errors| SubmissionError::Invalid {
            fields: invalid_fields(&errors),
        })?;

        Ok(submission)
    }

    pub fn clear(&mut self) {
        self.name.clear();
        self.phone.clear();
        self.message.clear();
    }
}

/// Sorted names of the fields that failed validation.
pub fn invalid_fields(errors: &ValidationErrors) -> Vec<String> {
    let mut fields = errors
        .field_errors()
        .keys()
        .map(|key| key.to_string())
        .collect::<Vec<_>>();
    fields.sort();
    fields
}
