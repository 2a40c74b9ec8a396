use std::collections::{HashMap, HashSet};

use chrono::Datelike;
use serde::{Deserialize, Serialize};

use super::classify::{Classification, StatusVocabulary};
use super::domain::{ChannelCategory, PeriodWindow, RawLead};
use super::funnel::build_funnel;
use super::normalize::{normalize_identity, normalize_role};
use super::payment::parse_value;
use super::roster::SalesRoster;
use super::trend::{percent_change, point_delta, rate};
use super::views::{
    ChannelStat, CloserStats, GlobalStats, SalesReportView, SetterStats, WeeklyTrendPoint,
};

/// Optional narrowing of a report. The setter scope backs the "a setter
/// sees only their own leads" view; it is a visibility rule, not a security
/// boundary. Both filters apply identically to the current window and to
/// the previous-window trend baseline.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportScope {
    pub project: Option<String>,
    pub setter: Option<String>,
}

impl ReportScope {
    fn admits(&self, lead: &RawLead) -> bool {
        if let Some(project) = self.project.as_deref() {
            if lead.project_tag.as_deref() != Some(project) {
                return false;
            }
        }

        if let Some(setter) = self.setter.as_deref() {
            let lead_setter = lead
                .setter_name
                .as_deref()
                .map(normalize_role)
                .unwrap_or_default();
            if lead_setter != normalize_role(setter) {
                return false;
            }
        }

        true
    }
}

/// A lead row with its derived stage triple, payment value and
/// deduplication key, the unit everything downstream aggregates over.
struct ClassifiedLead<'a> {
    lead: &'a RawLead,
    identity: String,
    class: Classification,
    value: f64,
}

fn classify_window<'a>(
    leads: &'a [RawLead],
    window: PeriodWindow,
    scope: &ReportScope,
    vocabulary: &StatusVocabulary,
) -> Vec<ClassifiedLead<'a>> {
    leads
        .iter()
        .filter(|lead| {
            lead.scheduled_date
                .map(|date| window.contains(date))
                .unwrap_or(false)
        })
        .filter(|lead| scope.admits(lead))
        .map(|lead| ClassifiedLead {
            identity: normalize_identity(Some(&lead.person_name)),
            class: vocabulary.classify(lead),
            value: parse_value(vocabulary, lead.payment_text.as_deref()),
            lead,
        })
        .collect()
}

/// Computes the full report for one window: per-setter and per-closer
/// leaderboards, global KPIs, the conversion funnel, channel breakdown and
/// the week-of-month trend. Pure; every invocation recomputes from the raw
/// rows.
pub fn build_report(
    leads: &[RawLead],
    window: PeriodWindow,
    scope: &ReportScope,
    roster: &SalesRoster,
    vocabulary: &StatusVocabulary,
) -> SalesReportView {
    let current = classify_window(leads, window, scope, vocabulary);
    let previous = classify_window(leads, window.previous(), scope, vocabulary);

    let global = global_stats(&current, &previous, roster);
    let funnel = build_funnel(&global);

    SalesReportView {
        window,
        setters: setter_stats(&current, &previous, roster),
        closers: closer_stats(&current, &previous, roster),
        channels: channel_stats(&current, roster),
        weekly_trend: weekly_trend(&current, roster),
        global,
        funnel,
    }
}

#[derive(Default)]
struct SetterTally {
    agendas: usize,
    presented: usize,
    closed: usize,
}

fn setter_tallies<'a>(
    rows: &[ClassifiedLead<'a>],
    roster: &SalesRoster,
) -> HashMap<String, SetterTally> {
    let mut tallies: HashMap<String, SetterTally> = HashMap::new();
    for row in rows {
        let setter = row.lead.setter_name.as_deref();
        if !roster.is_valid_setter(setter) {
            continue;
        }
        let tally = tallies
            .entry(normalize_role(setter.unwrap_or_default()))
            .or_default();
        tally.agendas += 1;
        if row.class.presented {
            tally.presented += 1;
        }
        if row.class.closed {
            tally.closed += 1;
        }
    }
    tallies
}

/// Setter leaderboards count rows, not unique people: a setter's job is
/// measured by appointments set, and re-booking the same person is real
/// work.
fn setter_stats(
    current: &[ClassifiedLead<'_>],
    previous: &[ClassifiedLead<'_>],
    roster: &SalesRoster,
) -> Vec<SetterStats> {
    let previous_tallies = setter_tallies(previous, roster);

    let mut stats: Vec<SetterStats> = setter_tallies(current, roster)
        .into_iter()
        .map(|(key, tally)| {
            let show_rate = rate(tally.presented as f64, tally.agendas as f64);
            let previous_show_rate = previous_tallies
                .get(&key)
                .map(|prev| rate(prev.presented as f64, prev.agendas as f64))
                .unwrap_or(0.0);

            SetterStats {
                show_rate,
                quality_rate: rate(tally.closed as f64, tally.presented as f64),
                trend: point_delta(show_rate, previous_show_rate),
                agendas: tally.agendas,
                presented: tally.presented,
                closed: tally.closed,
                name: display_name(&key),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.agendas.cmp(&a.agendas).then_with(|| a.name.cmp(&b.name)));
    stats
}

#[derive(Default)]
struct CloserTally {
    calls: HashSet<String>,
    closed_values: HashMap<String, f64>,
    refunded_values: HashMap<String, f64>,
}

impl CloserTally {
    /// Net revenue over unique people: duplicate rows of the same client
    /// repeat the same sale, so each person contributes the maximum value
    /// seen across their rows, mirroring the payment parser's max-not-sum
    /// rule.
    fn revenue(&self) -> f64 {
        let closed: f64 = self.closed_values.values().sum();
        let refunded: f64 = self.refunded_values.values().sum();
        closed - refunded
    }
}

fn record_max(values: &mut HashMap<String, f64>, identity: &str, value: f64) {
    let entry = values.entry(identity.to_string()).or_insert(0.0);
    if value > *entry {
        *entry = value;
    }
}

fn closer_tallies<'a>(
    rows: &[ClassifiedLead<'a>],
    roster: &SalesRoster,
) -> HashMap<String, CloserTally> {
    let mut tallies: HashMap<String, CloserTally> = HashMap::new();
    for row in rows {
        // A row with no client name carries nothing a closer can be
        // measured by; skip it before it can create an empty leaderboard
        // entry.
        if row.identity.is_empty() {
            continue;
        }
        let closer = row.lead.closer_name.as_deref();
        if !roster.is_valid_closer(closer) {
            continue;
        }
        let tally = tallies
            .entry(normalize_role(closer.unwrap_or_default()))
            .or_default();

        // Calls, closes and revenue all deduplicate people: the same
        // client re-recorded across calls converts, and bills, at most
        // once.
        if row.class.presented {
            tally.calls.insert(row.identity.clone());
            if row.class.closed {
                record_max(&mut tally.closed_values, &row.identity, row.value);
            }
        }
        if row.class.refunded {
            record_max(&mut tally.refunded_values, &row.identity, row.value);
        }
    }
    tallies
}

fn closer_stats(
    current: &[ClassifiedLead<'_>],
    previous: &[ClassifiedLead<'_>],
    roster: &SalesRoster,
) -> Vec<CloserStats> {
    let previous_tallies = closer_tallies(previous, roster);

    let mut stats: Vec<CloserStats> = closer_tallies(current, roster)
        .into_iter()
        .map(|(key, tally)| {
            let calls = tally.calls.len();
            let closed = tally.closed_values.len();
            let closing_rate = rate(closed as f64, calls as f64);
            let previous_closing_rate = previous_tallies
                .get(&key)
                .map(|prev| {
                    rate(prev.closed_values.len() as f64, prev.calls.len() as f64)
                })
                .unwrap_or(0.0);

            CloserStats {
                calls,
                closed,
                closing_rate,
                revenue: tally.revenue(),
                trend: point_delta(closing_rate, previous_closing_rate),
                name: display_name(&key),
            }
        })
        .collect();

    stats.sort_by(|a, b| b.closed.cmp(&a.closed).then_with(|| a.name.cmp(&b.name)));
    stats
}

/// Per-person value maps behind the global closing stages. Closes and
/// refunds both require a roster-valid closer; unattributed rows stay in
/// the captured/presented stages only.
#[derive(Default)]
struct GlobalLedger {
    closed_values: HashMap<String, f64>,
    refunded_values: HashMap<String, f64>,
}

impl GlobalLedger {
    fn build(rows: &[ClassifiedLead<'_>], roster: &SalesRoster) -> Self {
        let mut ledger = Self::default();
        for row in rows {
            if row.identity.is_empty() {
                continue;
            }
            if !roster.is_valid_closer(row.lead.closer_name.as_deref()) {
                continue;
            }
            if row.class.closed {
                record_max(&mut ledger.closed_values, &row.identity, row.value);
            }
            if row.class.refunded {
                record_max(&mut ledger.refunded_values, &row.identity, row.value);
            }
        }
        ledger
    }

    fn revenue(&self) -> f64 {
        let closed: f64 = self.closed_values.values().sum();
        let refunded: f64 = self.refunded_values.values().sum();
        closed - refunded
    }
}

fn global_stats(
    current: &[ClassifiedLead<'_>],
    previous: &[ClassifiedLead<'_>],
    roster: &SalesRoster,
) -> GlobalStats {
    let total = current.len();
    let presented = current.iter().filter(|row| row.class.presented).count();

    let ledger = GlobalLedger::build(current, roster);
    let gross_closed = ledger.closed_values.len();
    let refunded = ledger.refunded_values.len();
    let net_closed = gross_closed.saturating_sub(refunded);

    let revenue = ledger.revenue();
    let previous_revenue = GlobalLedger::build(previous, roster).revenue();

    GlobalStats {
        total,
        presented,
        gross_closed,
        net_closed,
        refunded,
        show_rate: rate(presented as f64, total as f64),
        closing_rate: rate(gross_closed as f64, presented as f64),
        net_closing_rate: rate(net_closed as f64, presented as f64),
        overall_rate: rate(net_closed as f64, total as f64),
        revenue,
        leads_trend: percent_change(total as f64, previous.len() as f64),
        revenue_trend: percent_change(revenue, previous_revenue),
    }
}

#[derive(Default)]
struct UniqueCloseTally {
    leads: usize,
    closed: HashSet<String>,
}

fn channel_stats(rows: &[ClassifiedLead<'_>], roster: &SalesRoster) -> Vec<ChannelStat> {
    let mut tallies: HashMap<ChannelCategory, UniqueCloseTally> = HashMap::new();
    for row in rows {
        let category = ChannelCategory::from_label(row.lead.channel.as_deref());
        let tally = tallies.entry(category).or_default();
        tally.leads += 1;
        if row.class.closed
            && roster.is_valid_closer(row.lead.closer_name.as_deref())
            && !row.identity.is_empty()
        {
            tally.closed.insert(row.identity.clone());
        }
    }

    let mut stats: Vec<ChannelStat> = tallies
        .into_iter()
        .map(|(category, tally)| ChannelStat {
            category,
            label: category.label(),
            leads: tally.leads,
            closed: tally.closed.len(),
            close_rate: rate(tally.closed.len() as f64, tally.leads as f64),
        })
        .collect();

    stats.sort_by(|a, b| b.leads.cmp(&a.leads).then_with(|| a.label.cmp(b.label)));
    stats
}

fn weekly_trend(rows: &[ClassifiedLead<'_>], roster: &SalesRoster) -> Vec<WeeklyTrendPoint> {
    let mut tallies: HashMap<u32, UniqueCloseTally> = HashMap::new();
    for row in rows {
        // Window membership already required a scheduled date.
        let Some(date) = row.lead.scheduled_date else {
            continue;
        };
        let week = (date.day() + 6) / 7;
        let tally = tallies.entry(week).or_default();
        tally.leads += 1;
        if row.class.closed
            && roster.is_valid_closer(row.lead.closer_name.as_deref())
            && !row.identity.is_empty()
        {
            tally.closed.insert(row.identity.clone());
        }
    }

    let mut points: Vec<WeeklyTrendPoint> = tallies
        .into_iter()
        .map(|(week, tally)| WeeklyTrendPoint {
            week,
            leads: tally.leads,
            closed: tally.closed.len(),
        })
        .collect();

    points.sort_by_key(|point| point.week);
    points
}

/// Leaderboard names come from the normalized key, re-capitalized for
/// display.
fn display_name(key: &str) -> String {
    let mut chars = key.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}
