use std::collections::HashSet;

use super::common::*;
use crate::loans::decision::{DecisionEngine, LoanOutcome, UnderwritingRule};
use crate::loans::domain::Occupancy;

struct Case {
    name: &'static str,
    score: i32,
    dti: f64,
    ltv: f64,
    occupancy: Occupancy,
    loan_amount: f64,
    property_value: f64,
    want_outcome: LoanOutcome,
    want_reason: &'static str,
}

fn case(
    name: &'static str,
    (score, dti, ltv): (i32, f64, f64),
    occupancy: &str,
    (loan_amount, property_value): (f64, f64),
    want_outcome: LoanOutcome,
    want_reason: &'static str,
) -> Case {
    Case {
        name,
        score,
        dti,
        ltv,
        occupancy: Occupancy::from(occupancy),
        loan_amount,
        property_value,
        want_outcome,
        want_reason,
    }
}

#[test]
fn rule_table_matches_underwriting_guidelines() {
    use LoanOutcome::{Approve, Decline, Refer};

    let cases = vec![
        case(
            "low property value",
            (700, 0.3, 0.8),
            "primary",
            (100_000.0, 70_000.0),
            Decline,
            "Property value below minimum ($75,000)",
        ),
        case(
            "low loan amount",
            (700, 0.3, 0.8),
            "primary",
            (40_000.0, 100_000.0),
            Decline,
            "Loan amount below minimum ($50,000)",
        ),
        case(
            "low credit score for primary",
            (600, 0.3, 0.8),
            "primary",
            (100_000.0, 100_000.0),
            Decline,
            "Credit score too low for primary residence",
        ),
        case(
            "low credit score for investment",
            (670, 0.3, 0.8),
            "investment",
            (100_000.0, 100_000.0),
            Decline,
            "Credit score too low for secondary/investment property",
        ),
        case(
            "low credit score for secondary",
            (679, 0.3, 0.7),
            "secondary",
            (70_000.0, 100_000.0),
            Decline,
            "Credit score too low for secondary/investment property",
        ),
        case(
            "high LTV for primary",
            (700, 0.3, 0.91),
            "primary",
            (91_000.0, 100_000.0),
            Decline,
            "LTV exceeds 90% for primary residence",
        ),
        case(
            "high LTV for investment",
            (700, 0.3, 0.81),
            "investment",
            (81_000.0, 100_000.0),
            Decline,
            "LTV exceeds 80% for secondary/investment property",
        ),
        case(
            "high DTI for credit below 700",
            (650, 0.41, 0.8),
            "primary",
            (80_000.0, 100_000.0),
            Decline,
            "DTI exceeds 36% for credit score below 700",
        ),
        case(
            "very high DTI",
            (750, 0.51, 0.8),
            "primary",
            (80_000.0, 100_000.0),
            Decline,
            "DTI exceeds 50%",
        ),
        case(
            "excellent credit allows higher LTV",
            (750, 0.44, 0.95),
            "primary",
            (95_000.0, 100_000.0),
            Approve,
            "Excellent credit allows higher LTV",
        ),
        case(
            "standard approval",
            (720, 0.42, 0.85),
            "primary",
            (85_000.0, 100_000.0),
            Approve,
            "Meets standard approval criteria",
        ),
        case(
            "secondary home at the LTV cap",
            (700, 0.40, 0.80),
            "secondary",
            (80_000.0, 100_000.0),
            Approve,
            "Meets standard approval criteria",
        ),
        case(
            "no approval or decline rule matched",
            (700, 0.44, 0.85),
            "primary",
            (85_000.0, 100_000.0),
            Refer,
            "Requires further review",
        ),
    ];

    let engine = DecisionEngine::new();
    for case in cases {
        let decision = engine.decide(&facts(
            case.score,
            case.dti,
            case.ltv,
            &case.occupancy,
            case.loan_amount,
            case.property_value,
        ));
        assert_eq!(decision.outcome(), case.want_outcome, "{}", case.name);
        assert_eq!(decision.reason(), case.want_reason, "{}", case.name);
    }
}

#[test]
fn thresholds_sit_on_the_documented_side() {
    use UnderwritingRule::*;

    // (name, (score, dti, ltv), occupancy, want)
    let cases = [
        ("primary LTV at 90%", (720, 0.40, 0.90), "primary", StandardApproval),
        ("primary score at 620", (620, 0.30, 0.80), "primary", FurtherReview),
        ("primary score just under 620", (619, 0.30, 0.80), "primary", PrimaryCreditScoreTooLow),
        ("secondary score at 680", (680, 0.30, 0.80), "secondary", FurtherReview),
        ("investment LTV at 80%", (690, 0.30, 0.80), "investment", FurtherReview),
        ("subprime DTI at 36%", (699, 0.36, 0.80), "primary", FurtherReview),
        ("prime score at 700", (700, 0.40, 0.80), "primary", StandardApproval),
        ("standard DTI at 43%", (720, 0.43, 0.80), "primary", StandardApproval),
        ("DTI at 50%", (720, 0.50, 0.80), "primary", FurtherReview),
        ("excellent credit at every limit", (740, 0.45, 0.95), "primary", ExcellentCreditHigherLtv),
        ("score just under excellent", (739, 0.45, 0.95), "primary", PrimaryLtvExceeded),
    ];

    let engine = DecisionEngine::new();
    for (name, (score, dti, ltv), occupancy, want) in cases {
        let occupancy = Occupancy::from(occupancy);
        let decision = engine.decide(&facts(score, dti, ltv, &occupancy, 80_000.0, 100_000.0));
        assert_eq!(decision.rule, want, "{name}");
    }
}

#[test]
fn excellent_credit_overrides_occupancy_limits() {
    let engine = DecisionEngine::new();
    let investment = Occupancy::Investment;

    let decision = engine.decide(&facts(745, 0.45, 0.95, &investment, 95_000.0, 100_000.0));

    assert_eq!(decision.rule, UnderwritingRule::ExcellentCreditHigherLtv);
    assert_eq!(decision.outcome(), LoanOutcome::Approve);
}

#[test]
fn minimum_amounts_are_inclusive() {
    let engine = DecisionEngine::new();
    let primary = Occupancy::Primary;

    let decision = engine.decide(&facts(
        720,
        0.30,
        50_000.0 / 75_000.0,
        &primary,
        50_000.0,
        75_000.0,
    ));

    assert_eq!(decision.rule, UnderwritingRule::StandardApproval);
}

#[test]
fn declines_take_precedence_over_strong_profiles() {
    let engine = DecisionEngine::new();
    let primary = Occupancy::Primary;

    let decision = engine.decide(&facts(820, 0.10, 0.50, &primary, 35_000.0, 70_000.0));

    assert_eq!(decision.rule, UnderwritingRule::PropertyValueBelowMinimum);
    assert_eq!(decision.outcome(), LoanOutcome::Decline);
}

#[test]
fn unrecognized_occupancy_skips_occupancy_limits() {
    let engine = DecisionEngine::new();
    let vacation = Occupancy::from("vacation");

    let weak = engine.decide(&facts(500, 0.30, 0.99, &vacation, 99_000.0, 100_000.0));
    assert_eq!(weak.rule, UnderwritingRule::FurtherReview);

    let strong_high_ltv = engine.decide(&facts(720, 0.40, 0.85, &vacation, 85_000.0, 100_000.0));
    assert_eq!(strong_high_ltv.rule, UnderwritingRule::FurtherReview);

    let strong = engine.decide(&facts(720, 0.40, 0.75, &vacation, 75_000.0, 100_000.0));
    assert_eq!(strong.rule, UnderwritingRule::StandardApproval);
}

#[test]
fn evaluation_is_deterministic() {
    let engine = DecisionEngine::new();
    let primary = Occupancy::Primary;
    let inputs = facts(700, 0.44, 0.85, &primary, 85_000.0, 100_000.0);

    let first = engine.decide(&inputs);
    for _ in 0..10 {
        assert_eq!(engine.decide(&inputs), first);
    }
}

#[test]
fn every_rule_has_a_distinct_identity_and_reason() {
    let rules = [
        UnderwritingRule::PropertyValueBelowMinimum,
        UnderwritingRule::LoanAmountBelowMinimum,
        UnderwritingRule::ExcellentCreditHigherLtv,
        UnderwritingRule::PrimaryCreditScoreTooLow,
        UnderwritingRule::NonOwnerCreditScoreTooLow,
        UnderwritingRule::PrimaryLtvExceeded,
        UnderwritingRule::NonOwnerLtvExceeded,
        UnderwritingRule::SubprimeDtiExceeded,
        UnderwritingRule::MaximumDtiExceeded,
        UnderwritingRule::StandardApproval,
        UnderwritingRule::FurtherReview,
    ];

    let ids: HashSet<_> = rules.iter().map(|rule| rule.id()).collect();
    let reasons: HashSet<_> = rules.iter().map(|rule| rule.reason()).collect();
    assert_eq!(ids.len(), rules.len());
    assert_eq!(reasons.len(), rules.len());
    assert!(rules.iter().all(|rule| !rule.reason().is_empty()));

    let refers: Vec<_> = rules
        .iter()
        .filter(|rule| rule.outcome() == LoanOutcome::Refer)
        .collect();
    assert_eq!(refers, vec![&UnderwritingRule::FurtherReview]);
}
