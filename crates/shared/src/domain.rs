use std::fmt;

use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn new(value: impl Into<String>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                Self(value.to_string())
            }
        }
    };
}

id_newtype!(RecordId);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum MessageStatus {
    New,
    InProgress,
    Resolved,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApplicationStatus {
    Pending,
    Approved,
    Rejected,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerStatus {
    Active,
    Inactive,
}

/// Follower-count buckets offered by the application and partner filters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FollowerRange {
    #[serde(rename = "0-10k")]
    UpTo10k,
    #[serde(rename = "10k-50k")]
    From10kTo50k,
    #[serde(rename = "50k-100k")]
    From50kTo100k,
    #[serde(rename = "100k+")]
    Over100k,
}

impl FollowerRange {
    pub const ALL: [FollowerRange; 4] = [
        FollowerRange::UpTo10k,
        FollowerRange::From10kTo50k,
        FollowerRange::From50kTo100k,
        FollowerRange::Over100k,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            FollowerRange::UpTo10k => "0-10k",
            FollowerRange::From10kTo50k => "10k-50k",
            FollowerRange::From50kTo100k => "50k-100k",
            FollowerRange::Over100k => "100k+",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        Self::ALL
            .into_iter()
            .find(|range| range.as_str().eq_ignore_ascii_case(value))
    }

    pub fn contains(self, followers: u64) -> bool {
        match self {
            FollowerRange::UpTo10k => followers < 10_000,
            FollowerRange::From10kTo50k => (10_000..50_000).contains(&followers),
            FollowerRange::From50kTo100k => (50_000..100_000).contains(&followers),
            FollowerRange::Over100k => followers >= 100_000,
        }
    }
}

impl fmt::Display for FollowerRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
