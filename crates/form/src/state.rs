#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Name,
    Phone,
    Message,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Loading,
    Success,
    Error(String),
}

impl SubmissionStatus {
    pub fn is_loading(&self) -> bool {
        matches!(self, SubmissionStatus::Loading)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, SubmissionStatus::Success)
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            SubmissionStatus::Error(message) => Some(message),
            _ => None,
        }
    }
}
