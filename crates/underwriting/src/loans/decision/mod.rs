mod rules;

pub use rules::UnderwritingRule;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::domain::Occupancy;
use rules::first_matching_rule;

/// Final underwriting verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum LoanOutcome {
    Approve,
    Refer,
    Decline,
}

impl LoanOutcome {
    pub const fn label(self) -> &'static str {
        match self {
            LoanOutcome::Approve => "Approve",
            LoanOutcome::Refer => "Refer",
            LoanOutcome::Decline => "Decline",
        }
    }
}

impl fmt::Display for LoanOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown loan outcome '{0}'")]
pub struct UnknownOutcome(pub String);

impl FromStr for LoanOutcome {
    type Err = UnknownOutcome;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "Approve" => Ok(LoanOutcome::Approve),
            "Refer" => Ok(LoanOutcome::Refer),
            "Decline" => Ok(LoanOutcome::Decline),
            other => Err(UnknownOutcome(other.to_string())),
        }
    }
}

/// Inputs the rule table reads; ratios are already computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct UnderwritingFacts<'a> {
    pub credit_score: i32,
    pub dti: f64,
    pub ltv: f64,
    pub occupancy: &'a Occupancy,
    pub loan_amount: f64,
    pub property_value: f64,
}

/// Outcome of a single evaluation, tied to the rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Decision {
    pub rule: UnderwritingRule,
}

impl Decision {
    pub const fn outcome(&self) -> LoanOutcome {
        self.rule.outcome()
    }

    pub const fn reason(&self) -> &'static str {
        self.rule.reason()
    }
}

/// Stateless evaluator applying the fixed underwriting rule table.
#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine;

impl DecisionEngine {
    pub fn new() -> Self {
        Self
    }

    pub fn decide(&self, facts: &UnderwritingFacts<'_>) -> Decision {
        Decision {
            rule: first_matching_rule(facts),
        }
    }
}
