use crate::har::Group;
use crate::payload::{LogId, PayloadError};
use chrono::{DateTime, Utc};

/// Identity of the caller a request is attributed to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GroupIdentity {
    pub api_key: String,
    pub label: Option<String>,
    pub email: Option<String>,
}

impl GroupIdentity {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Self::default()
        }
    }

    /// Converts into the wire group. Blank API keys are rejected.
    pub(crate) fn to_group(&self) -> Result<Group, PayloadError> {
        if self.api_key.trim().is_empty() {
            return Err(PayloadError::MissingApiKey);
        }
        Ok(Group {
            id: self.api_key.clone(),
            label: self.label.clone(),
            email: self.email.clone(),
        })
    }
}

/// Per-cycle metadata handed to the assembler alongside the request and response.
#[derive(Debug, Clone, PartialEq)]
pub struct LogContext {
    pub group: GroupIdentity,
    /// Pre-assigned identifier; a v4 UUID is generated when absent.
    pub id: Option<LogId>,
    /// Logical route path, recorded instead of the concrete URL when set.
    pub log_path: Option<String>,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
}

impl LogContext {
    pub fn new(
        api_key: impl Into<String>,
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
    ) -> Self {
        Self {
            group: GroupIdentity::new(api_key),
            id: None,
            log_path: None,
            started_at,
            finished_at,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.group.label = Some(label.into());
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.group.email = Some(email.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<LogId>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_log_path(mut self, path: impl Into<String>) -> Self {
        self.log_path = Some(path.into());
        self
    }
}
