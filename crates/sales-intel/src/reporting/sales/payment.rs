use regex::Regex;
use std::sync::OnceLock;

use super::classify::StatusVocabulary;

fn installment_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(\d+(?:\.\d+)?)\s*[x×]\s*(\d+)").expect("installment regex must compile")
    })
}

fn digit_run_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"\d+").expect("digit run regex must compile"))
}

/// Digit runs below this are day-of-month or installment counters, not
/// amounts.
const MIN_AMOUNT: f64 = 100.0;

/// Extracts the single amount a free-text payment field describes.
///
/// The field accumulates history: "1000x4, 4000" lists the same sale as
/// price-times-installments and as a total, so candidates are reduced with
/// max, never sum. Refund keywords are stripped first so "1500€ pide
/// devolución" still yields its amount; whether that amount is added or
/// subtracted is the aggregator's call. Always returns a value >= 0;
/// unparseable text yields 0.
pub fn parse_value(vocabulary: &StatusVocabulary, payment_text: Option<&str>) -> f64 {
    let Some(raw) = payment_text else {
        return 0.0;
    };

    let mut text = raw.to_lowercase();
    for keyword in &vocabulary.refund_keywords {
        text = text.replace(&keyword.to_lowercase(), "");
    }
    let text = text.trim();
    if text.is_empty() {
        return 0.0;
    }

    let mut candidates: Vec<f64> = Vec::new();
    for part in text.split(',') {
        let part = part.trim();
        if let Some(value) = installment_value(part) {
            candidates.push(value);
        } else if let Some(value) = largest_digit_run(part) {
            candidates.push(value);
        }
    }

    candidates.into_iter().fold(0.0, f64::max)
}

fn installment_value(part: &str) -> Option<f64> {
    let captures = installment_re().captures(part)?;
    let price: f64 = captures[1].parse().ok()?;
    let installments: f64 = captures[2].parse().ok()?;
    Some(price * installments)
}

fn largest_digit_run(part: &str) -> Option<f64> {
    digit_run_re()
        .find_iter(part)
        .filter_map(|m| m.as_str().parse::<f64>().ok())
        .filter(|value| *value >= MIN_AMOUNT)
        .fold(None, |acc, value| Some(acc.map_or(value, |a: f64| a.max(value))))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocabulary() -> StatusVocabulary {
        StatusVocabulary::standard()
    }

    #[test]
    fn picks_max_across_alternative_representations() {
        assert_eq!(parse_value(&vocabulary(), Some("1000x4, 4000")), 4000.0);
    }

    #[test]
    fn installment_notation_multiplies() {
        assert_eq!(parse_value(&vocabulary(), Some("250x12")), 3000.0);
        assert_eq!(parse_value(&vocabulary(), Some("499.5 x 2")), 999.0);
        assert_eq!(parse_value(&vocabulary(), Some("250×4")), 1000.0);
    }

    #[test]
    fn refund_keywords_do_not_swallow_the_amount() {
        assert_eq!(
            parse_value(&vocabulary(), Some("pide devolución 1500€")),
            1500.0
        );
    }

    #[test]
    fn small_digit_runs_are_noise() {
        assert_eq!(parse_value(&vocabulary(), Some("día 15, cuota 3")), 0.0);
        assert_eq!(parse_value(&vocabulary(), Some("99")), 0.0);
        assert_eq!(parse_value(&vocabulary(), Some("100")), 100.0);
    }

    #[test]
    fn missing_or_wordy_fields_yield_zero() {
        assert_eq!(parse_value(&vocabulary(), None), 0.0);
        assert_eq!(parse_value(&vocabulary(), Some("")), 0.0);
        assert_eq!(parse_value(&vocabulary(), Some("pendiente de pago")), 0.0);
        assert_eq!(parse_value(&vocabulary(), Some("reembolso")), 0.0);
    }

    #[test]
    fn per_part_maximum_ignores_stray_numbers() {
        // 15 (a day) is dropped, 1200 survives, 800 loses to 1200 within
        // its part, the cross-part max is still 1200.
        assert_eq!(
            parse_value(&vocabulary(), Some("día 15 pagó 1200, resto 800")),
            1200.0
        );
    }
}
