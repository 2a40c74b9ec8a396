use metrics_exporter_prometheus::PrometheusHandle;
use std::sync::atomic::AtomicBool;
use std::sync::Arc;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

pub(crate) fn parse_month(raw: &str) -> Result<u32, String> {
    let month: u32 = raw
        .trim()
        .parse()
        .map_err(|err| format!("failed to parse '{raw}' as a month number ({err})"))?;
    if (1..=12).contains(&month) {
        Ok(month)
    } else {
        Err(format!("month must be between 1 and 12, got {month}"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_parser_enforces_the_calendar_range() {
        assert_eq!(parse_month("3"), Ok(3));
        assert_eq!(parse_month(" 12 "), Ok(12));
        assert!(parse_month("0").is_err());
        assert!(parse_month("13").is_err());
        assert!(parse_month("march").is_err());
    }
}
