//! Association rule module

use crate::{DomainError, Item};
use std::collections::BTreeSet;
use std::fmt;
use std::hash::{Hash, Hasher};

/// Reading of a rule's lift value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LiftInterpretation {
    /// Lift above 1: the items reinforce each other
    Positive,
    /// Lift below 1: the items inhibit each other
    Negative,
    /// Lift exactly 1: independent
    Neutral,
}

impl LiftInterpretation {
    /// Classify a lift value
    pub fn from_lift(lift: f64) -> Self {
        if lift > 1.0 {
            LiftInterpretation::Positive
        } else if lift < 1.0 {
            LiftInterpretation::Negative
        } else {
            LiftInterpretation::Neutral
        }
    }

    /// Human-readable description
    pub fn as_str(&self) -> &'static str {
        match self {
            LiftInterpretation::Positive => "Positive (mutually reinforcing)",
            LiftInterpretation::Negative => "Negative (mutually inhibiting)",
            LiftInterpretation::Neutral => "Neutral (independent)",
        }
    }
}

impl fmt::Display for LiftInterpretation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Strength band of a rule's confidence
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ConfidenceLevel {
    /// Below 0.2
    VeryWeak,
    /// 0.2 to below 0.4
    Weak,
    /// 0.4 to below 0.6
    Moderate,
    /// 0.6 to below 0.8
    Strong,
    /// 0.8 and above
    VeryStrong,
}

impl ConfidenceLevel {
    /// Band a confidence value
    pub fn from_confidence(confidence: f64) -> Self {
        if confidence >= 0.8 {
            ConfidenceLevel::VeryStrong
        } else if confidence >= 0.6 {
            ConfidenceLevel::Strong
        } else if confidence >= 0.4 {
            ConfidenceLevel::Moderate
        } else if confidence >= 0.2 {
            ConfidenceLevel::Weak
        } else {
            ConfidenceLevel::VeryWeak
        }
    }

    /// Human-readable label
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfidenceLevel::VeryWeak => "very weak",
            ConfidenceLevel::Weak => "weak",
            ConfidenceLevel::Moderate => "moderate",
            ConfidenceLevel::Strong => "strong",
            ConfidenceLevel::VeryStrong => "very strong",
        }
    }
}

/// Metric used to order a rule list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RuleSortKey {
    /// Confidence, highest first
    #[default]
    Confidence,
    /// Support, highest first
    Support,
    /// Lift, highest first
    Lift,
}

impl RuleSortKey {
    /// Parse a sort key name (case-insensitive)
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "confidence" => Some(RuleSortKey::Confidence),
            "support" => Some(RuleSortKey::Support),
            "lift" => Some(RuleSortKey::Lift),
            _ => None,
        }
    }
}

/// Sort rules by `key`, descending
///
/// The sort is stable: rules with equal keys keep their incoming order.
pub fn sort_rules(rules: &mut [Rule], key: RuleSortKey) {
    match key {
        RuleSortKey::Confidence => rules.sort_by(|a, b| b.confidence.total_cmp(&a.confidence)),
        RuleSortKey::Support => rules.sort_by(|a, b| b.support.total_cmp(&a.support)),
        RuleSortKey::Lift => rules.sort_by(|a, b| b.lift.total_cmp(&a.lift)),
    }
}

/// A directional association `antecedent -> consequent`
///
/// Invariants, enforced by [`Rule::new`]: both sides non-empty, the sides
/// disjoint, confidence and support in [0, 1]. Identity is the
/// (antecedent, consequent) pair.
#[derive(Debug, Clone)]
pub struct Rule {
    antecedent: BTreeSet<Item>,
    consequent: BTreeSet<Item>,
    confidence: f64,
    support: f64,
    lift: f64,
}

impl Rule {
    /// Create a validated rule with lift 0
    ///
    /// # Errors
    /// Returns [`DomainError::InvalidRule`] when an invariant is violated.
    pub fn new(
        antecedent: BTreeSet<Item>,
        consequent: BTreeSet<Item>,
        confidence: f64,
        support: f64,
    ) -> Result<Self, DomainError> {
        if antecedent.is_empty() {
            return Err(DomainError::InvalidRule("antecedent is empty".into()));
        }
        if consequent.is_empty() {
            return Err(DomainError::InvalidRule("consequent is empty".into()));
        }
        if !antecedent.is_disjoint(&consequent) {
            return Err(DomainError::InvalidRule(
                "antecedent and consequent overlap".into(),
            ));
        }
        if !(0.0..=1.0).contains(&confidence) {
            return Err(DomainError::InvalidRule(format!(
                "confidence {} outside [0, 1]",
                confidence
            )));
        }
        if !(0.0..=1.0).contains(&support) {
            return Err(DomainError::InvalidRule(format!(
                "support {} outside [0, 1]",
                support
            )));
        }

        Ok(Self {
            antecedent,
            consequent,
            confidence,
            support,
            lift: 0.0,
        })
    }

    /// Attach a lift value
    ///
    /// # Errors
    /// Lift must be finite and non-negative.
    pub fn with_lift(mut self, lift: f64) -> Result<Self, DomainError> {
        if !lift.is_finite() || lift < 0.0 {
            return Err(DomainError::InvalidRule(format!("lift {} is negative or not finite", lift)));
        }
        self.lift = lift;
        Ok(self)
    }

    /// The IF side
    pub fn antecedent(&self) -> &BTreeSet<Item> {
        &self.antecedent
    }

    /// The THEN side
    pub fn consequent(&self) -> &BTreeSet<Item> {
        &self.consequent
    }

    /// Conditional likelihood of the consequent given the antecedent
    pub fn confidence(&self) -> f64 {
        self.confidence
    }

    /// Support ratio of the itemset the rule was derived from
    pub fn support(&self) -> f64 {
        self.support
    }

    /// Lift (0 until attached)
    pub fn lift(&self) -> f64 {
        self.lift
    }

    /// Check the rule invariants
    pub fn is_valid(&self) -> bool {
        !self.antecedent.is_empty()
            && !self.consequent.is_empty()
            && self.antecedent.is_disjoint(&self.consequent)
            && (0.0..=1.0).contains(&self.confidence)
            && (0.0..=1.0).contains(&self.support)
    }

    /// Items on both sides together
    pub fn total_size(&self) -> usize {
        self.antecedent.len() + self.consequent.len()
    }

    /// Items on the IF side
    pub fn antecedent_size(&self) -> usize {
        self.antecedent.len()
    }

    /// Items on the THEN side
    pub fn consequent_size(&self) -> usize {
        self.consequent.len()
    }

    /// True if `item` appears on either side
    pub fn contains_item(&self, item: &Item) -> bool {
        self.antecedent.contains(item) || self.consequent.contains(item)
    }

    /// True if `item` appears on the IF side
    pub fn has_in_antecedent(&self, item: &Item) -> bool {
        self.antecedent.contains(item)
    }

    /// True if `item` appears on the THEN side
    pub fn has_in_consequent(&self, item: &Item) -> bool {
        self.consequent.contains(item)
    }

    /// Antecedent item names, sorted
    pub fn antecedent_names(&self) -> Vec<String> {
        sorted_names(&self.antecedent)
    }

    /// Consequent item names, sorted
    pub fn consequent_names(&self) -> Vec<String> {
        sorted_names(&self.consequent)
    }

    /// Short form: `IF {a, b} THEN {c}`
    pub fn describe(&self) -> String {
        format!(
            "IF {{{}}} THEN {{{}}}",
            self.antecedent_names().join(", "),
            self.consequent_names().join(", ")
        )
    }

    /// Reading of the lift value
    pub fn lift_interpretation(&self) -> LiftInterpretation {
        LiftInterpretation::from_lift(self.lift)
    }

    /// Strength band of the confidence value
    pub fn confidence_level(&self) -> ConfidenceLevel {
        ConfidenceLevel::from_confidence(self.confidence)
    }
}

fn sorted_names(items: &BTreeSet<Item>) -> Vec<String> {
    let mut names: Vec<String> = items.iter().map(|i| i.name().to_string()).collect();
    names.sort();
    names
}

impl PartialEq for Rule {
    fn eq(&self, other: &Self) -> bool {
        self.antecedent == other.antecedent && self.consequent == other.consequent
    }
}

impl Eq for Rule {}

impl Hash for Rule {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.antecedent.hash(state);
        self.consequent.hash(state);
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (Confidence: {:.2}%, Support: {:.2}%, Lift: {:.2})",
            self.describe(),
            self.confidence * 100.0,
            self.support * 100.0,
            self.lift
        )
    }
}
