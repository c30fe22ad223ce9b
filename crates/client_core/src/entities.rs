//! The console's three managed collections.

use chrono::{DateTime, Utc};
use shared::{
    domain::{ApplicationStatus, MessageStatus, PartnerStatus, RecordId},
    protocol::{ContactMessage, InfluencerApplication, InfluencerPartner, ReviewRequest},
};

use crate::{
    entity::{EntityKind, FilterDimension, ListRecord, RecordStatus, StatusChange},
    error::ConsoleError,
    export::ExportRow,
    transport::ApiRequest,
};

fn format_timestamp(value: Option<DateTime<Utc>>) -> String {
    value
        .map(|at| at.format("%Y-%m-%d %H:%M").to_string())
        .unwrap_or_default()
}

fn format_optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

fn message_rank(status: MessageStatus) -> u8 {
    match status {
        MessageStatus::New => 0,
        MessageStatus::InProgress => 1,
        MessageStatus::Resolved => 2,
    }
}

impl RecordStatus for MessageStatus {
    const ALL: &'static [Self] = &[
        MessageStatus::New,
        MessageStatus::InProgress,
        MessageStatus::Resolved,
    ];

    fn as_str(self) -> &'static str {
        match self {
            MessageStatus::New => "new",
            MessageStatus::InProgress => "in-progress",
            MessageStatus::Resolved => "resolved",
        }
    }

    fn can_transition_to(self, next: Self) -> bool {
        message_rank(next) > message_rank(self)
    }
}

impl RecordStatus for ApplicationStatus {
    const ALL: &'static [Self] = &[
        ApplicationStatus::Pending,
        ApplicationStatus::Approved,
        ApplicationStatus::Rejected,
    ];

    fn as_str(self) -> &'static str {
        match self {
            ApplicationStatus::Pending => "pending",
            ApplicationStatus::Approved => "approved",
            ApplicationStatus::Rejected => "rejected",
        }
    }

    fn can_transition_to(self, next: Self) -> bool {
        self == ApplicationStatus::Pending && next != ApplicationStatus::Pending
    }

    fn requires_reason(self) -> bool {
        self == ApplicationStatus::Rejected
    }
}

impl RecordStatus for PartnerStatus {
    const ALL: &'static [Self] = &[PartnerStatus::Active, PartnerStatus::Inactive];

    fn as_str(self) -> &'static str {
        match self {
            PartnerStatus::Active => "active",
            PartnerStatus::Inactive => "inactive",
        }
    }

    fn can_transition_to(self, next: Self) -> bool {
        self != next
    }
}

impl ListRecord for ContactMessage {
    type Status = MessageStatus;

    const EXPORT_HEADERS: &'static [&'static str] = &[
        "ID", "Name", "Email", "Subject", "Message", "Status", "Received",
    ];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> MessageStatus {
        self.status
    }

    fn export_row(&self) -> ExportRow {
        ExportRow::new(vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.subject.clone().unwrap_or_default(),
            self.message.clone(),
            self.status.as_str().to_string(),
            format_timestamp(self.created_at),
        ])
    }
}

impl ListRecord for InfluencerApplication {
    type Status = ApplicationStatus;

    const EXPORT_HEADERS: &'static [&'static str] = &[
        "ID",
        "Full Name",
        "Email",
        "Phone",
        "Platforms",
        "Followers",
        "Niche",
        "Status",
        "Rejection Reason",
        "Applied",
    ];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> ApplicationStatus {
        self.status
    }

    fn export_row(&self) -> ExportRow {
        ExportRow::new(vec![
            self.id.to_string(),
            self.full_name.clone(),
            self.email.clone(),
            self.phone.clone().unwrap_or_default(),
            self.platforms.join("; "),
            format_optional(self.follower_count),
            self.niche.clone().unwrap_or_default(),
            self.status.as_str().to_string(),
            self.rejection_reason.clone().unwrap_or_default(),
            format_timestamp(self.created_at),
        ])
    }
}

impl ListRecord for InfluencerPartner {
    type Status = PartnerStatus;

    const EXPORT_HEADERS: &'static [&'static str] = &[
        "ID",
        "Name",
        "Email",
        "Platforms",
        "Followers",
        "Status",
        "Referral Code",
        "Total Earnings",
        "Joined",
    ];

    fn id(&self) -> &RecordId {
        &self.id
    }

    fn status(&self) -> PartnerStatus {
        self.status
    }

    fn export_row(&self) -> ExportRow {
        ExportRow::new(vec![
            self.id.to_string(),
            self.name.clone(),
            self.email.clone(),
            self.platforms.join("; "),
            format_optional(self.follower_count),
            self.status.as_str().to_string(),
            self.referral_code.clone().unwrap_or_default(),
            self.total_earnings
                .map(|earnings| format!("{earnings:.2}"))
                .unwrap_or_default(),
            format_timestamp(self.created_at),
        ])
    }
}

pub struct ContactMessages;

impl EntityKind for ContactMessages {
    type Status = MessageStatus;
    type Record = ContactMessage;

    const RESOURCE: &'static str = "messages";
    const LABEL: &'static str = "message";
    const FILTERS: &'static [FilterDimension] = &[FilterDimension::Status];
}

pub struct InfluencerApplications;

impl EntityKind for InfluencerApplications {
    type Status = ApplicationStatus;
    type Record = InfluencerApplication;

    const RESOURCE: &'static str = "applications";
    const LABEL: &'static str = "application";
    const FILTERS: &'static [FilterDimension] = &[
        FilterDimension::Status,
        FilterDimension::Platform,
        FilterDimension::FollowerRange,
    ];

    fn status_request(
        id: &RecordId,
        change: &StatusChange<ApplicationStatus>,
    ) -> Result<ApiRequest, ConsoleError> {
        ApiRequest::put(format!("{}/review", Self::item_path(id))).with_json(&ReviewRequest {
            status: change.status,
            rejection_reason: change
                .reason
                .as_deref()
                .map(str::trim)
                .filter(|reason| !reason.is_empty())
                .map(str::to_string),
        })
    }
}

pub struct InfluencerPartners;

impl EntityKind for InfluencerPartners {
    type Status = PartnerStatus;
    type Record = InfluencerPartner;

    const RESOURCE: &'static str = "partners";
    const LABEL: &'static str = "partner";
    const FILTERS: &'static [FilterDimension] = &[
        FilterDimension::Status,
        FilterDimension::Platform,
        FilterDimension::FollowerRange,
    ];
}

#[cfg(test)]
#[path = "tests/entities_tests.rs"]
mod tests;
