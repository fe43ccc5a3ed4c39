use serde::{Deserialize, Serialize};

use super::super::domain::Occupancy;
use super::{LoanOutcome, UnderwritingFacts};

const MIN_PROPERTY_VALUE: f64 = 75_000.0;
const MIN_LOAN_AMOUNT: f64 = 50_000.0;

const EXCELLENT_CREDIT_SCORE: i32 = 740;
const EXCELLENT_CREDIT_MAX_DTI: f64 = 0.45;
const EXCELLENT_CREDIT_MAX_LTV: f64 = 0.95;

const PRIMARY_MIN_CREDIT_SCORE: i32 = 620;
const NON_OWNER_MIN_CREDIT_SCORE: i32 = 680;
const PRIMARY_MAX_LTV: f64 = 0.90;
const NON_OWNER_MAX_LTV: f64 = 0.80;

const PRIME_CREDIT_SCORE: i32 = 700;
const SUBPRIME_MAX_DTI: f64 = 0.36;
const ABSOLUTE_MAX_DTI: f64 = 0.50;
const STANDARD_MAX_DTI: f64 = 0.43;

/// Every rule that can settle an application, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnderwritingRule {
    PropertyValueBelowMinimum,
    LoanAmountBelowMinimum,
    ExcellentCreditHigherLtv,
    PrimaryCreditScoreTooLow,
    NonOwnerCreditScoreTooLow,
    PrimaryLtvExceeded,
    NonOwnerLtvExceeded,
    SubprimeDtiExceeded,
    MaximumDtiExceeded,
    StandardApproval,
    FurtherReview,
}

impl UnderwritingRule {
    pub const fn outcome(self) -> LoanOutcome {
        match self {
            UnderwritingRule::ExcellentCreditHigherLtv | UnderwritingRule::StandardApproval => {
                LoanOutcome::Approve
            }
            UnderwritingRule::FurtherReview => LoanOutcome::Refer,
            _ => LoanOutcome::Decline,
        }
    }

    pub const fn reason(self) -> &'static str {
        match self {
            UnderwritingRule::PropertyValueBelowMinimum => {
                "Property value below minimum ($75,000)"
            }
            UnderwritingRule::LoanAmountBelowMinimum => "Loan amount below minimum ($50,000)",
            UnderwritingRule::ExcellentCreditHigherLtv => "Excellent credit allows higher LTV",
            UnderwritingRule::PrimaryCreditScoreTooLow => {
                "Credit score too low for primary residence"
            }
            UnderwritingRule::NonOwnerCreditScoreTooLow => {
                "Credit score too low for secondary/investment property"
            }
            UnderwritingRule::PrimaryLtvExceeded => "LTV exceeds 90% for primary residence",
            UnderwritingRule::NonOwnerLtvExceeded => {
                "LTV exceeds 80% for secondary/investment property"
            }
            UnderwritingRule::SubprimeDtiExceeded => "DTI exceeds 36% for credit score below 700",
            UnderwritingRule::MaximumDtiExceeded => "DTI exceeds 50%",
            UnderwritingRule::StandardApproval => "Meets standard approval criteria",
            UnderwritingRule::FurtherReview => "Requires further review",
        }
    }

    /// Stable identifier for logs and audits, independent of the reason wording.
    pub const fn id(self) -> &'static str {
        match self {
            UnderwritingRule::PropertyValueBelowMinimum => "property_value_below_minimum",
            UnderwritingRule::LoanAmountBelowMinimum => "loan_amount_below_minimum",
            UnderwritingRule::ExcellentCreditHigherLtv => "excellent_credit_higher_ltv",
            UnderwritingRule::PrimaryCreditScoreTooLow => "primary_credit_score_too_low",
            UnderwritingRule::NonOwnerCreditScoreTooLow => "non_owner_credit_score_too_low",
            UnderwritingRule::PrimaryLtvExceeded => "primary_ltv_exceeded",
            UnderwritingRule::NonOwnerLtvExceeded => "non_owner_ltv_exceeded",
            UnderwritingRule::SubprimeDtiExceeded => "subprime_dti_exceeded",
            UnderwritingRule::MaximumDtiExceeded => "maximum_dti_exceeded",
            UnderwritingRule::StandardApproval => "standard_approval",
            UnderwritingRule::FurtherReview => "further_review",
        }
    }
}

pub(crate) fn first_matching_rule(facts: &UnderwritingFacts<'_>) -> UnderwritingRule {
    let UnderwritingFacts {
        credit_score,
        dti,
        ltv,
        occupancy,
        loan_amount,
        property_value,
    } = *facts;

    if property_value < MIN_PROPERTY_VALUE {
        return UnderwritingRule::PropertyValueBelowMinimum;
    }
    if loan_amount < MIN_LOAN_AMOUNT {
        return UnderwritingRule::LoanAmountBelowMinimum;
    }

    // Excellent credit is settled before any occupancy limit applies.
    if credit_score >= EXCELLENT_CREDIT_SCORE
        && dti <= EXCELLENT_CREDIT_MAX_DTI
        && ltv <= EXCELLENT_CREDIT_MAX_LTV
    {
        return UnderwritingRule::ExcellentCreditHigherLtv;
    }

    match occupancy {
        Occupancy::Primary if credit_score < PRIMARY_MIN_CREDIT_SCORE => {
            return UnderwritingRule::PrimaryCreditScoreTooLow;
        }
        other if other.is_non_owner_occupied() && credit_score < NON_OWNER_MIN_CREDIT_SCORE => {
            return UnderwritingRule::NonOwnerCreditScoreTooLow;
        }
        _ => {}
    }

    match occupancy {
        Occupancy::Primary if ltv > PRIMARY_MAX_LTV => {
            return UnderwritingRule::PrimaryLtvExceeded;
        }
        other if other.is_non_owner_occupied() && ltv > NON_OWNER_MAX_LTV => {
            return UnderwritingRule::NonOwnerLtvExceeded;
        }
        _ => {}
    }

    if credit_score < PRIME_CREDIT_SCORE && dti > SUBPRIME_MAX_DTI {
        return UnderwritingRule::SubprimeDtiExceeded;
    }
    if dti > ABSOLUTE_MAX_DTI {
        return UnderwritingRule::MaximumDtiExceeded;
    }

    let ltv_within_standard = (*occupancy == Occupancy::Primary && ltv <= PRIMARY_MAX_LTV)
        || ltv <= NON_OWNER_MAX_LTV;
    if credit_score >= PRIME_CREDIT_SCORE && dti <= STANDARD_MAX_DTI && ltv_within_standard {
        return UnderwritingRule::StandardApproval;
    }

    UnderwritingRule::FurtherReview
}
