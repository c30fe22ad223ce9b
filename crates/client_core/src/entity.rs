//! Per-entity configuration consumed by [`crate::controller::ListController`].

use std::{collections::BTreeMap, fmt, hash::Hash};

use serde::{de::DeserializeOwned, Serialize};
use shared::{domain::RecordId, protocol::StatusUpdateRequest};

use crate::{error::ConsoleError, export::ExportRow, transport::ApiRequest};

pub trait RecordStatus: Copy + Eq + Hash + fmt::Debug + Send + Sync + 'static {
    /// Every allowed value, in display order.
    const ALL: &'static [Self];

    fn as_str(self) -> &'static str;

    fn can_transition_to(self, next: Self) -> bool;

    fn requires_reason(self) -> bool {
        false
    }

    fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|status| status.as_str().eq_ignore_ascii_case(value))
    }

    fn parse_or_reject(value: &str) -> Result<Self, ConsoleError> {
        Self::parse(value).ok_or_else(|| {
            let allowed = Self::ALL
                .iter()
                .map(|status| status.as_str())
                .collect::<Vec<_>>()
                .join(", ");
            ConsoleError::validation(format!(
                "invalid status '{}': expected one of {allowed}",
                value.trim()
            ))
        })
    }
}

pub trait ListRecord: DeserializeOwned + Serialize + Clone + Send + Sync + 'static {
    type Status: RecordStatus;

    const EXPORT_HEADERS: &'static [&'static str];

    fn id(&self) -> &RecordId;

    fn status(&self) -> Self::Status;

    fn export_row(&self) -> ExportRow;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterDimension {
    Status,
    Platform,
    FollowerRange,
}

impl FilterDimension {
    pub fn query_key(self) -> &'static str {
        match self {
            FilterDimension::Status => "status",
            FilterDimension::Platform => "platform",
            FilterDimension::FollowerRange => "followerRange",
        }
    }
}

impl fmt::Display for FilterDimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.query_key())
    }
}

pub type ListFilters = BTreeMap<FilterDimension, String>;

/// A requested status change, optionally carrying the reason captured in the modal.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusChange<S> {
    pub status: S,
    pub reason: Option<String>,
}

pub trait EntityKind: Send + Sync + 'static {
    type Status: RecordStatus;
    type Record: ListRecord<Status = Self::Status>;

    /// Collection path segment under the API base, e.g. `messages`.
    const RESOURCE: &'static str;
    /// Singular noun used in notifications.
    const LABEL: &'static str;
    const FILTERS: &'static [FilterDimension];

    fn collection_path() -> String {
        Self::RESOURCE.to_string()
    }

    fn item_path(id: &RecordId) -> String {
        format!("{}/{}", Self::RESOURCE, id.as_str())
    }

    fn status_request(
        id: &RecordId,
        change: &StatusChange<Self::Status>,
    ) -> Result<ApiRequest, ConsoleError> {
        ApiRequest::put(Self::item_path(id)).with_json(&StatusUpdateRequest {
            status: change.status.as_str().to_string(),
        })
    }
}
