//! Loan intake, ratio calculation, rule evaluation, and decision history.
//!
//! The ratio calculator and decision engine are pure; the service wires them to a
//! [`RecordStore`] through the background [`RecordWriter`] so persistence never sits on the
//! response path.

pub mod decision;
pub mod domain;
pub mod ratios;
pub mod repository;
pub mod router;
pub mod service;
pub mod writer;

#[cfg(test)]
mod tests;

pub use decision::{Decision, DecisionEngine, LoanOutcome, UnderwritingFacts, UnderwritingRule};
pub use domain::{LoanApplication, Occupancy, ValidationError};
pub use ratios::{compute_dti, compute_ltv, RatioError, RatioResult};
pub use repository::{LoanRecord, NewLoanRecord, RecordStore, RepositoryError};
pub use router::underwriting_router;
pub use service::{decide_application, UnderwritingError, UnderwritingResponse, UnderwritingService};
pub use writer::{RecordWriter, WriterError};
