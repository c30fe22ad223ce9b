//! Drafts backing the console's modal dialogs.
//!
//! A modal's submit button is enabled only while `can_submit` holds; the
//! controller re-checks with `validate` before sending anything.

use shared::protocol::{CreatePartnerRequest, ReplyRequest};

use crate::error::ConsoleError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReplyDraft {
    pub subject: String,
    pub message: String,
}

impl ReplyDraft {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.subject.trim().is_empty() {
            return Err(ConsoleError::validation("reply subject is required"));
        }
        if self.message.trim().is_empty() {
            return Err(ConsoleError::validation("reply message is required"));
        }
        Ok(())
    }

    pub(crate) fn to_request(&self) -> ReplyRequest {
        ReplyRequest {
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RejectionDraft {
    pub reason: String,
}

impl RejectionDraft {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.reason.trim().is_empty() {
            return Err(ConsoleError::validation(
                "a rejection reason is required to reject an application",
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PartnerDraft {
    pub name: String,
    pub email: String,
    pub platforms: Vec<String>,
    pub follower_count: Option<u64>,
}

impl PartnerDraft {
    pub fn can_submit(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn validate(&self) -> Result<(), ConsoleError> {
        if self.name.trim().is_empty() {
            return Err(ConsoleError::validation("partner name is required"));
        }
        let email = self.email.trim();
        let valid_email = email
            .split_once('@')
            .map(|(local, domain)| !local.is_empty() && domain.contains('.'))
            .unwrap_or(false);
        if !valid_email {
            return Err(ConsoleError::validation(format!(
                "invalid partner email '{email}'"
            )));
        }
        if self.platforms.iter().all(|platform| platform.trim().is_empty()) {
            return Err(ConsoleError::validation(
                "at least one platform is required",
            ));
        }
        Ok(())
    }

    pub(crate) fn to_request(&self) -> CreatePartnerRequest {
        CreatePartnerRequest {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            platforms: self
                .platforms
                .iter()
                .map(|platform| platform.trim().to_string())
                .filter(|platform| !platform.is_empty())
                .collect(),
            follower_count: self.follower_count,
        }
    }
}

#[cfg(test)]
#[path = "tests/forms_tests.rs"]
mod tests;
