use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use super::normalize::normalize_role;

/// One recorded interaction with a prospect, as entered by the sales team.
///
/// A person may appear in several rows over time (re-contacted, re-booked),
/// so nothing in this struct is a unique key. Free-text fields arrive exactly
/// as typed; canonicalization happens downstream.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawLead {
    pub person_name: String,
    #[serde(default)]
    pub setter_name: Option<String>,
    #[serde(default)]
    pub closer_name: Option<String>,
    #[serde(default)]
    pub channel: Option<String>,
    #[serde(default)]
    pub direction: Option<Direction>,
    #[serde(default)]
    pub scheduled_date: Option<NaiveDate>,
    #[serde(default)]
    pub call_date: Option<NaiveDate>,
    #[serde(default)]
    pub status_text: Option<String>,
    #[serde(default)]
    pub presented_flag: bool,
    #[serde(default)]
    pub closed_flag: bool,
    #[serde(default)]
    pub payment_text: Option<String>,
    #[serde(default)]
    pub project_tag: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub instagram: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Inbound,
    Outbound,
}

/// Month + year reporting bucket. A lead belongs to a window based on its
/// scheduled date; rows without one never match any window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PeriodWindow {
    pub month: u32,
    pub year: i32,
}

impl PeriodWindow {
    pub fn new(month: u32, year: i32) -> Result<Self, ReportError> {
        if (1..=12).contains(&month) {
            Ok(Self { month, year })
        } else {
            Err(ReportError::InvalidMonth(month))
        }
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date.month() == self.month && date.year() == self.year
    }

    /// The immediately preceding calendar month, used as the trend baseline.
    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self {
                month: 12,
                year: self.year - 1,
            }
        } else {
            Self {
                month: self.month - 1,
                year: self.year,
            }
        }
    }
}

/// Known acquisition channels, with a documented fallback for anything the
/// team types that we do not recognize.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelCategory {
    Instagram,
    Facebook,
    Referral,
    Web,
    YouTube,
    TikTok,
    Other,
}

impl ChannelCategory {
    pub const fn ordered() -> [Self; 7] {
        [
            Self::Instagram,
            Self::Facebook,
            Self::Referral,
            Self::Web,
            Self::YouTube,
            Self::TikTok,
            Self::Other,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Instagram => "Instagram",
            Self::Facebook => "Facebook",
            Self::Referral => "Referido",
            Self::Web => "Web",
            Self::YouTube => "YouTube",
            Self::TikTok => "TikTok",
            Self::Other => "Otros",
        }
    }

    /// Maps a free-text channel label onto a known category. Matching is
    /// exact after role normalization; `None` and unrecognized labels fall
    /// back to [`ChannelCategory::Other`].
    pub fn from_label(label: Option<&str>) -> Self {
        let Some(label) = label else {
            return Self::Other;
        };

        match normalize_role(label).as_str() {
            "instagram" | "ig" => Self::Instagram,
            "facebook" | "fb" => Self::Facebook,
            "referido" | "referidos" => Self::Referral,
            "web" => Self::Web,
            "youtube" => Self::YouTube,
            "tiktok" => Self::TikTok,
            _ => Self::Other,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("month must be between 1 and 12, got {0}")]
    InvalidMonth(u32),
}
