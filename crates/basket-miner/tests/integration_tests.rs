//! Integration tests for basket-miner
//!
//! These tests run complete analyses and check the results against
//! brute-force enumeration.

use basket_domain::{Item, Itemset, Transaction};
use basket_miner::{min_support_count, support_count, Apriori, AprioriConfig, AprioriError};
use proptest::prelude::*;
use std::collections::{BTreeSet, HashSet};

fn grocery() -> Vec<Item> {
    vec![
        Item::new(1, "Bread", "Staples", 15000.0).unwrap(),
        Item::new(2, "Milk", "Drinks", 8000.0).unwrap(),
        Item::new(3, "Eggs", "Protein", 25000.0).unwrap(),
        Item::new(4, "Cooking Oil", "Pantry", 18000.0).unwrap(),
        Item::new(5, "Rice", "Staples", 45000.0).unwrap(),
    ]
}

fn baskets(items: &[Item], raw: &[&[usize]]) -> Vec<Transaction> {
    raw.iter()
        .map(|ids| Transaction::new(ids.iter().map(|&i| items[i].clone()).collect()).unwrap())
        .collect()
}

/// Every non-empty subset of the purchased items meeting the threshold
fn brute_force(transactions: &[Transaction], catalog: &[Item], min_count: usize) -> HashSet<Itemset> {
    let universe: Vec<&Item> = catalog
        .iter()
        .filter(|item| transactions.iter().any(|t| t.contains(item)))
        .collect();
    let mut frequent = HashSet::new();
    for mask in 1u32..(1 << universe.len()) {
        let items: BTreeSet<Item> = universe
            .iter()
            .enumerate()
            .filter(|(i, _)| mask & (1 << i) != 0)
            .map(|(_, &item)| item.clone())
            .collect();
        if support_count(transactions, &items) >= min_count {
            frequent.insert(Itemset::new(items));
        }
    }
    frequent
}

#[test]
fn test_grocery_analysis() {
    let items = grocery();
    let transactions = baskets(
        &items,
        &[
            &[0, 1, 2],
            &[0, 1],
            &[0, 1, 3],
            &[1, 2],
            &[0, 1, 2, 4],
            &[3, 4],
            &[0, 2],
            &[0, 1, 2],
        ],
    );

    let mut apriori = Apriori::with_params(transactions, 0.375, 0.7).unwrap();
    let rules = apriori.run().unwrap();

    // threshold: 3 of 8 baskets
    let pairs = apriori.itemsets_of_size(2);
    let names: Vec<String> = pairs.iter().map(|p| p.to_string()).collect();
    assert_eq!(names, vec!["Bread, Milk", "Bread, Eggs", "Eggs, Milk"]);

    let triples = apriori.itemsets_of_size(3);
    assert_eq!(triples.len(), 1);
    assert_eq!(triples[0].support_count(), 3);

    assert!(!rules.is_empty());
    for rule in &rules {
        assert!(rule.confidence() >= 0.7);
        assert!(rule.is_valid());
    }

    let bread = &items[0];
    let with_bread = apriori.rules_containing(bread);
    assert!(with_bread.iter().all(|r| r.contains_item(bread)));
    assert!(!apriori.rules_of_size(3).is_empty());
}

#[test]
fn test_lift_uses_consequent_support() {
    let items = grocery();
    // Bread in 4/5, Milk in 2/5, both in 2/5
    let transactions = baskets(&items, &[&[0, 1], &[0, 1], &[0], &[0], &[2]]);

    let mut apriori = Apriori::with_params(transactions, 0.4, 0.0).unwrap();
    let rules = apriori.run().unwrap();

    let milk_to_bread = rules
        .iter()
        .find(|r| r.antecedent_names() == vec!["Milk"])
        .unwrap();
    assert_eq!(milk_to_bread.confidence(), 1.0);
    // 0.4 / 0.8
    assert!((milk_to_bread.lift() - 0.5).abs() < 1e-12);

    let bread_to_milk = rules
        .iter()
        .find(|r| r.antecedent_names() == vec!["Bread"])
        .unwrap();
    assert_eq!(bread_to_milk.confidence(), 0.5);
    // 0.4 / 0.4
    assert!((bread_to_milk.lift() - 1.0).abs() < 1e-12);
}

#[test]
fn test_support_threshold_boundary() {
    let items = grocery();
    // Bread+Milk in exactly 7 of 10 baskets
    let mut raw: Vec<&[usize]> = std::iter::repeat(&[0usize, 1][..]).take(7).collect();
    raw.extend([&[2][..], &[3][..], &[4][..]]);
    let transactions = baskets(&items, &raw);

    let mut apriori = Apriori::with_params(transactions.clone(), 0.7, 0.5).unwrap();
    apriori.run().unwrap();
    assert_eq!(apriori.itemsets_of_size(2).len(), 1);

    let mut apriori = Apriori::with_params(transactions, 0.71, 0.5).unwrap();
    apriori.run().unwrap();
    assert!(apriori.levels().is_empty());
}

#[test]
fn test_config_presets_drive_engine() {
    let items = grocery();
    let transactions = baskets(&items, &[&[0, 1], &[0, 1], &[0, 2], &[1, 2]]);

    let mut strict = Apriori::from_config(transactions.clone(), &AprioriConfig::strict()).unwrap();
    let mut exploratory =
        Apriori::from_config(transactions, &AprioriConfig::exploratory()).unwrap();

    let strict_rules = strict.run().unwrap();
    let exploratory_rules = exploratory.run().unwrap();
    assert!(exploratory_rules.len() >= strict_rules.len());
    assert_eq!(strict.statistics().min_confidence, 0.8);
}

#[test]
fn test_invalid_config_rejected() {
    let items = grocery();
    let transactions = baskets(&items, &[&[0]]);
    let config = AprioriConfig {
        min_support: 0.5,
        min_confidence: 1.2,
    };
    let result = Apriori::from_config(transactions, &config);
    assert!(matches!(result, Err(AprioriError::Config(_))));
}

proptest! {
    /// Property: the mined itemsets are exactly the brute-force frequent sets
    #[test]
    fn test_matches_brute_force(
        raw in prop::collection::vec(prop::collection::btree_set(0usize..5, 1..5), 1..10),
        support in 0.0f64..=1.0,
    ) {
        let items = grocery();
        let transactions: Vec<Transaction> = raw
            .iter()
            .map(|ids| Transaction::new(ids.iter().map(|&i| items[i].clone()).collect()).unwrap())
            .collect();

        let mut apriori = Apriori::with_params(transactions.clone(), support, 0.5).unwrap();
        apriori.run().unwrap();

        let mined: HashSet<Itemset> = apriori.levels().into_iter().flatten().collect();
        let expected = brute_force(&transactions, &items, min_support_count(support, transactions.len()));
        prop_assert_eq!(mined, expected);
    }

    /// Property: running twice on the same input yields identical output
    #[test]
    fn test_deterministic(
        raw in prop::collection::vec(prop::collection::btree_set(0usize..5, 1..5), 1..10),
        support in 0.1f64..0.9,
        confidence in 0.0f64..1.0,
    ) {
        let items = grocery();
        let transactions: Vec<Transaction> = raw
            .iter()
            .map(|ids| Transaction::new(ids.iter().map(|&i| items[i].clone()).collect()).unwrap())
            .collect();

        let mut first = Apriori::with_params(transactions.clone(), support, confidence).unwrap();
        let mut second = Apriori::with_params(transactions, support, confidence).unwrap();

        let a = first.run().unwrap();
        let b = second.run().unwrap();
        prop_assert_eq!(&a, &b);
        prop_assert_eq!(first.levels(), second.levels());
        for (x, y) in a.iter().zip(&b) {
            prop_assert_eq!(x.confidence().to_bits(), y.confidence().to_bits());
            prop_assert_eq!(x.lift().to_bits(), y.lift().to_bits());
        }
    }
}
