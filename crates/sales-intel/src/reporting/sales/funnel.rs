use super::trend::rate;
use super::views::{FunnelStage, FunnelStageKind, GlobalStats};

/// Assembles the ordered conversion funnel from the global counts.
///
/// Stage invariants: values are monotonically non-increasing down the
/// funnel and `net_closed == max(0, gross_closed - refunded)` is already
/// guaranteed by the aggregator.
pub(crate) fn build_funnel(global: &GlobalStats) -> Vec<FunnelStage> {
    let mut stages = Vec::with_capacity(4);
    let mut previous: Option<usize> = None;

    for kind in FunnelStageKind::ordered() {
        let value = match kind {
            FunnelStageKind::Captured => global.total,
            FunnelStageKind::Presented => global.presented,
            FunnelStageKind::GrossClosed => global.gross_closed,
            FunnelStageKind::NetClosed => global.net_closed,
        };

        let percent_of_previous = match previous {
            None => 100.0,
            Some(prev) => rate(value as f64, prev as f64),
        };

        stages.push(FunnelStage {
            stage: kind,
            label: kind.label(),
            value,
            percent_of_previous,
        });
        previous = Some(value);
    }

    stages
}
