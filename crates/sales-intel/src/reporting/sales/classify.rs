use serde::{Deserialize, Serialize};

use super::domain::RawLead;

/// Controlled vocabulary driving status classification.
///
/// Status values are a short, controlled set and match exactly (after
/// trim/case-fold); refund keywords live in free-text fields and match by
/// containment. That asymmetry is deliberate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusVocabulary {
    /// Statuses that mean an initial sale happened.
    pub closure_statuses: Vec<String>,
    /// Statuses beyond the closure set that still prove the lead reached
    /// the call. The presented set is the union of both lists.
    pub presented_statuses: Vec<String>,
    /// Keywords whose presence in the status or payment field marks a
    /// refund.
    pub refund_keywords: Vec<String>,
}

impl StatusVocabulary {
    /// The vocabulary the team currently uses in the lead tracker.
    pub fn standard() -> Self {
        Self {
            closure_statuses: vec![
                "cerrado".into(),
                "reserva de plaza".into(),
                "cierre".into(),
                "mes de prueba".into(),
            ],
            presented_statuses: vec![
                "no entra".into(),
                "no cierre".into(),
                "no cualifica".into(),
            ],
            refund_keywords: vec![
                "pide devolución".into(),
                "pide devolucion".into(),
                "devolución".into(),
                "devolucion".into(),
                "reembolso".into(),
            ],
        }
    }

    pub fn is_closure_status(&self, status: &str) -> bool {
        Self::matches_exact(&self.closure_statuses, status)
    }

    pub fn is_presented_status(&self, status: &str) -> bool {
        self.is_closure_status(status) || Self::matches_exact(&self.presented_statuses, status)
    }

    pub fn has_refund_keyword(&self, text: &str) -> bool {
        let lowered = text.to_lowercase();
        self.refund_keywords
            .iter()
            .any(|keyword| lowered.contains(&keyword.to_lowercase()))
    }

    fn matches_exact(list: &[String], status: &str) -> bool {
        let normalized = status.trim().to_lowercase();
        list.iter().any(|entry| entry.to_lowercase() == normalized)
    }

    /// Folds every stage signal a row carries into one canonical triple.
    pub fn classify(&self, lead: &RawLead) -> Classification {
        let mut classification = Classification::default();

        for signal in lead.stage_signals() {
            match signal {
                StageSignal::PresentedFlag(true) => classification.presented = true,
                StageSignal::ClosedFlag(true) => classification.closed = true,
                StageSignal::PresentedFlag(false) | StageSignal::ClosedFlag(false) => {}
                StageSignal::StatusText(text) => {
                    if self.is_closure_status(text) {
                        classification.closed = true;
                    }
                    if self.is_presented_status(text) {
                        classification.presented = true;
                    }
                    if self.has_refund_keyword(text) {
                        classification.refunded = true;
                    }
                }
                StageSignal::PaymentText(text) => {
                    if self.has_refund_keyword(text) {
                        classification.refunded = true;
                    }
                }
            }
        }

        // A refund or a close proves the call took place, whatever the
        // quick-toggle flags say.
        if classification.refunded || classification.closed {
            classification.presented = true;
        }

        classification
    }
}

/// A single raw signal about how far a lead got. The tracker records the
/// same fact through three channels (quick-toggle flags, a status column
/// and a free-text payment field); the classifier is the only place they
/// are reconciled.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum StageSignal<'a> {
    PresentedFlag(bool),
    ClosedFlag(bool),
    StatusText(&'a str),
    PaymentText(&'a str),
}

impl RawLead {
    pub fn stage_signals(&self) -> Vec<StageSignal<'_>> {
        let mut signals = vec![
            StageSignal::PresentedFlag(self.presented_flag),
            StageSignal::ClosedFlag(self.closed_flag),
        ];
        if let Some(status) = self.status_text.as_deref() {
            signals.push(StageSignal::StatusText(status));
        }
        if let Some(payment) = self.payment_text.as_deref() {
            signals.push(StageSignal::PaymentText(payment));
        }
        signals
    }
}

/// Canonical per-row stage triple.
///
/// `closed` holds when the closed flag is set or the status is in the
/// closure set; `refunded` when a refund keyword appears in the status or
/// payment text; `presented` when the presented flag is set, the status is
/// in the presented superset, or either of the other two holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Classification {
    pub presented: bool,
    pub closed: bool,
    pub refunded: bool,
}
