use roguewick::newick::{parse_str, parse_trees};
use roguewick::rogue::{Clade, CladeCredibility, CladeProbabilities};

fn oracle_for(newick: &str) -> (CladeProbabilities, Vec<roguewick::model::CompactTree>) {
    let (trees, _) = parse_trees(newick).unwrap();
    let mut oracle = CladeProbabilities::default();
    for tree in &trees {
        oracle.add_tree(tree);
    }
    oracle.compute_probabilities();
    (oracle, trees)
}

#[test]
fn test_clade_set_operations() {
    let mut clade = Clade::singleton(3);
    assert_eq!(clade.len(), 1);
    assert!(clade.contains(3));
    assert!(!clade.contains(2));

    clade.union_with(&Clade::singleton(130));
    assert_eq!(clade.len(), 2);
    assert!(clade.contains(130));
    assert!(!clade.contains(1000));
    assert!(!clade.is_empty());
    assert!(Clade::default().is_empty());
}

#[test]
fn test_clade_identity_independent_of_order() {
    let mut ab = Clade::singleton(0);
    ab.union_with(&Clade::singleton(70));
    let mut ba = Clade::singleton(70);
    ba.union_with(&Clade::singleton(0));
    assert_eq!(ab, ba);
}

#[test]
fn test_clades_of_tree_ignore_child_order() {
    let (trees, _) = parse_trees("((A,B),(C,D));\n((D,C),(B,A));").unwrap();
    let mut first = Clade::all_of(&trees[0]);
    let mut second = Clade::all_of(&trees[1]);
    assert_eq!(first.len(), 3);
    first.sort_by_key(|clade| format!("{clade:?}"));
    second.sort_by_key(|clade| format!("{clade:?}"));
    assert_eq!(first, second);
}

#[test]
fn test_identical_trees_score_zero() {
    let (oracle, trees) = oracle_for("((A,B),(C,D));\n((A,B),(C,D));\n((B,A),(D,C));");
    assert_eq!(oracle.num_trees(), 3);
    assert_eq!(oracle.num_clades(), 3);
    for tree in &trees {
        assert_eq!(oracle.tree_probability(tree), 0.0);
    }
}

#[test]
fn test_log_clade_credibility() {
    let (oracle, trees) = oracle_for("((A,B),(C,D));\n((A,B),(C,D));\n((A,C),(B,D));\n((A,B),C,D);");
    // {A,B} in 3 of 4 trees, {C,D} in 2 of 4, {A,C} and {B,D} in 1 of 4
    let first = oracle.tree_probability(&trees[0]);
    assert!((first - ((0.75f64).ln() + (0.5f64).ln())).abs() < 1e-12);

    let third = oracle.tree_probability(&trees[2]);
    assert!((third - 2.0 * (0.25f64).ln()).abs() < 1e-12);

    let fourth = oracle.tree_probability(&trees[3]);
    assert!((fourth - (0.75f64).ln()).abs() < 1e-12);
    assert!(fourth > first && first > third);
}

#[test]
fn test_clade_probability() {
    let (oracle, trees) = oracle_for("((A,B),(C,D));\n((A,C),(B,D));");
    let clades = Clade::all_of(&trees[0]);
    assert_eq!(oracle.clade_probability(&clades[0]), 0.5);
    // The root clade holds all taxa and is in every tree
    assert_eq!(oracle.clade_probability(&clades[2]), 1.0);
    assert_eq!(oracle.clade_probability(&Clade::singleton(0)), 0.0);
}

#[test]
fn test_unseen_clade_scores_negative_infinity() {
    let (oracle, _) = oracle_for("((A,B),(C,D));\n((A,B),(C,D));");
    // Same label order, so indices match the sample
    let (stranger, _) = parse_str("((A,C),(B,D));").unwrap();
    assert_eq!(oracle.tree_probability(&stranger), f64::NEG_INFINITY);
}
