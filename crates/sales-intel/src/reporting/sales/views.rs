use serde::Serialize;

use super::domain::{ChannelCategory, PeriodWindow};

/// Leaderboard row for a setter. A setter is measured by appointments set,
/// so every count here is a row count, not a unique-person count.
#[derive(Debug, Clone, Serialize)]
pub struct SetterStats {
    pub name: String,
    pub agendas: usize,
    pub presented: usize,
    pub closed: usize,
    pub show_rate: f64,
    pub quality_rate: f64,
    /// Show-rate change against the previous window, in percentage points.
    pub trend: f64,
}

/// Leaderboard row for a closer. A closer is measured by people converted,
/// so `calls` and `closed` are deduplicated person counts.
#[derive(Debug, Clone, Serialize)]
pub struct CloserStats {
    pub name: String,
    pub calls: usize,
    pub closed: usize,
    pub closing_rate: f64,
    /// Closed payment values minus refunded payment values, counted once
    /// per person (a client's duplicate rows repeat the same sale).
    pub revenue: f64,
    /// Closing-rate change against the previous window, in percentage
    /// points.
    pub trend: f64,
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct GlobalStats {
    pub total: usize,
    pub presented: usize,
    pub gross_closed: usize,
    pub net_closed: usize,
    pub refunded: usize,
    pub show_rate: f64,
    pub closing_rate: f64,
    pub net_closing_rate: f64,
    pub overall_rate: f64,
    pub revenue: f64,
    /// Lead-volume change against the previous window, in percent.
    pub leads_trend: f64,
    /// Revenue change against the previous window, in percent.
    pub revenue_trend: f64,
}

/// The four conversion stages, in funnel order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FunnelStageKind {
    Captured,
    Presented,
    GrossClosed,
    NetClosed,
}

impl FunnelStageKind {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::Captured,
            Self::Presented,
            Self::GrossClosed,
            Self::NetClosed,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Captured => "Leads Captados",
            Self::Presented => "Llamadas Hechas",
            Self::GrossClosed => "Ventas Brutas",
            Self::NetClosed => "Ventas Netas",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct FunnelStage {
    pub stage: FunnelStageKind,
    pub label: &'static str,
    pub value: usize,
    /// This stage as a percentage of the one before it; 100 for the first
    /// stage, 0 when the previous stage is empty.
    pub percent_of_previous: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct ChannelStat {
    pub category: ChannelCategory,
    pub label: &'static str,
    pub leads: usize,
    /// Unique people closed on this channel.
    pub closed: usize,
    pub close_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeeklyTrendPoint {
    /// 1-based week-of-month bucket (`ceil(day / 7)`).
    pub week: u32,
    pub leads: usize,
    pub closed: usize,
}

/// Everything the rendering layer needs for one reporting window. Plain
/// data; recomputed from scratch on every filter change.
#[derive(Debug, Clone, Serialize)]
pub struct SalesReportView {
    pub window: PeriodWindow,
    pub global: GlobalStats,
    pub setters: Vec<SetterStats>,
    pub closers: Vec<CloserStats>,
    pub funnel: Vec<FunnelStage>,
    pub channels: Vec<ChannelStat>,
    pub weekly_trend: Vec<WeeklyTrendPoint>,
}
