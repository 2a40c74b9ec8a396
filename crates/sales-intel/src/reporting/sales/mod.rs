//! The sales metrics engine: pure functions turning noisy, human-entered
//! lead rows into deduplicated, role-attributed funnel and revenue metrics
//! for one reporting window.

pub mod domain;
pub mod views;

mod aggregate;
mod classify;
mod funnel;
mod normalize;
mod payment;
mod roster;
mod trend;

pub use aggregate::{build_report, ReportScope};
pub use classify::{Classification, StageSignal, StatusVocabulary};
pub use normalize::{normalize_identity, normalize_role};
pub use payment::parse_value;
pub use roster::SalesRoster;
pub use trend::{percent_change, point_delta, rate};
