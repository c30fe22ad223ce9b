use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{ApplicationStatus, MessageStatus, PartnerStatus, RecordId};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactMessage {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    pub message: String,
    pub status: MessageStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub replied_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerApplication {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub full_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub niche: Option<String>,
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reviewed_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InfluencerPartner {
    #[serde(alias = "_id")]
    pub id: RecordId,
    pub name: String,
    pub email: String,
    #[serde(default)]
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
    pub status: PartnerStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub referral_code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_earnings: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    #[serde(default)]
    pub current_page: Option<u32>,
    pub total_pages: u32,
    #[serde(default)]
    pub total_items: Option<u64>,
}

/// Collection response. Some endpoints nest paging under `pagination`,
/// others report `currentPage`/`totalPages` next to `data`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListEnvelope<T> {
    #[serde(default)]
    pub success: Option<bool>,
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
    #[serde(default)]
    pub pagination: Option<Pagination>,
    #[serde(default)]
    pub current_page: Option<u32>,
    #[serde(default)]
    pub total_pages: Option<u32>,
}

impl<T> ListEnvelope<T> {
    pub fn current_page(&self) -> Option<u32> {
        self.pagination
            .and_then(|pagination| pagination.current_page)
            .or(self.current_page)
    }

    pub fn total_pages(&self) -> Option<u32> {
        self.pagination
            .map(|pagination| pagination.total_pages)
            .or(self.total_pages)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct StatusUpdateRequest {
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ReviewRequest {
    pub status: ApplicationStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rejection_reason: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ReplyRequest {
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CreatePartnerRequest {
    pub name: String,
    pub email: String,
    pub platforms: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub follower_count: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_reads_nested_pagination() {
        let envelope: ListEnvelope<ContactMessage> = serde_json::from_str(
            r#"{
                "success": true,
                "data": [{"_id": "m1", "name": "Ana", "email": "ana@example.com",
                          "message": "hi", "status": "in-progress"}],
                "pagination": {"currentPage": 2, "totalPages": 5}
            }"#,
        )
        .expect("decode");

        assert_eq!(envelope.current_page(), Some(2));
        assert_eq!(envelope.total_pages(), Some(5));
        assert_eq!(envelope.data[0].id, RecordId::new("m1"));
        assert_eq!(envelope.data[0].status, MessageStatus::InProgress);
    }

    #[test]
    fn envelope_reads_top_level_total_pages() {
        let envelope: ListEnvelope<InfluencerApplication> = serde_json::from_str(
            r#"{
                "success": true,
                "data": [{"id": "a1", "fullName": "Bo", "email": "bo@example.com",
                          "platforms": ["instagram"], "followerCount": 1200,
                          "status": "pending"}],
                "totalPages": 3
            }"#,
        )
        .expect("decode");

        assert_eq!(envelope.current_page(), None);
        assert_eq!(envelope.total_pages(), Some(3));
        assert_eq!(envelope.data[0].follower_count, Some(1200));
    }

    #[test]
    fn review_request_omits_missing_reason() {
        let body = serde_json::to_value(ReviewRequest {
            status: ApplicationStatus::Approved,
            rejection_reason: None,
        })
        .expect("encode");
        assert_eq!(body, serde_json::json!({ "status": "approved" }));
    }
}
