use roguewick::model::{BranchLength, CompactTree, LeafLabelMap, PruneError, Vertex};
use roguewick::newick::parse_str;
use rstest::rstest;

/// Parses `newick`, prunes the leaf `taxon`, and writes the result back.
fn prune_to_newick(newick: &str, taxon: &str) -> String {
    let (tree, labels) = parse_str(newick).unwrap();
    let pruned = tree.without_leaf(&labels.get_index(taxon).unwrap()).unwrap();
    assert!(pruned.is_valid());
    pruned.to_newick(&labels)
}

fn leaf(tree: &CompactTree, labels: &LeafLabelMap, taxon: &str) -> usize {
    tree.leaf_with_label(&labels.get_index(taxon).unwrap()).unwrap()
}

// --- CONSTRUCTION ---
#[test]
fn test_build_tree_bottom_up() {
    let mut tree = CompactTree::new(3);
    let a = tree.add_leaf(Some(BranchLength::new(1.0)), 0);
    let b = tree.add_leaf(Some(BranchLength::new(2.0)), 1);
    let ab = tree.add_internal_vertex(vec![a, b], Some(BranchLength::new(0.5)));
    let c = tree.add_leaf(None, 2);
    assert!(!tree.is_root_set());
    let root = tree.add_root(vec![ab, c], None);

    assert!(tree.is_root_set());
    assert!(tree.is_valid());
    assert_eq!(tree.root_index(), root);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.num_vertices(), 5);
    assert!(!tree.vertices_have_branch_lengths());
    assert_eq!(tree.vertex(a).parent(), Some(ab));
    assert_eq!(tree.vertex(ab).parent(), Some(root));
    assert_eq!(tree.root().parent(), None);
}

#[test]
fn test_invalid_without_root() {
    let mut tree = CompactTree::new(2);
    tree.add_leaf(None, 0);
    tree.add_leaf(None, 1);
    assert!(!tree.is_valid());
}

#[test]
fn test_invalid_single_child() {
    let mut tree = CompactTree::new(1);
    let a = tree.add_leaf(None, 0);
    tree.add_root(vec![a], None);
    assert!(!tree.is_valid());
}

#[test]
fn test_vertex_kinds() {
    let leaf: Vertex<usize> = Vertex::new_leaf(0, Some(BranchLength::new(1.0)), 7);
    assert!(leaf.is_leaf());
    assert_eq!(leaf.label(), Some(&7));
    assert_eq!(leaf.children(), None);
    assert_eq!(leaf.parent(), None);

    let internal: Vertex<usize> = Vertex::new_internal(1, vec![0, 2], None);
    assert!(matches!(internal, Vertex::Internal { .. }));
    assert_eq!(internal.children(), Some(&[0, 2][..]));
    assert!(!internal.has_branch_length());

    let root: Vertex<usize> = Vertex::new_root(3, vec![1, 4, 5], Some(BranchLength::new(0.1)));
    assert!(root.is_root());
    assert_eq!(root.label(), None);
    assert_eq!(root.parent(), None);
}

#[rstest]
#[case(Some(1.0), Some(0.5), Some(1.5))]
#[case(Some(1.0), None, Some(1.0))]
#[case(None, Some(0.5), Some(0.5))]
#[case(None, None, None)]
fn test_branch_length_merge(
    #[case] upper: Option<f64>,
    #[case] lower: Option<f64>,
    #[case] expected: Option<f64>,
) {
    let merged = BranchLength::merge(upper.map(BranchLength::new), lower.map(BranchLength::new));
    assert_eq!(merged.map(|bl| *bl), expected);
}

#[test]
fn test_branch_length_try_new() {
    assert!(BranchLength::try_new(0.0).is_some());
    assert!(BranchLength::try_new(-0.1).is_none());
    assert!(BranchLength::try_new(f64::INFINITY).is_none());
    assert!(BranchLength::try_new(f64::NAN).is_none());
}

#[test]
#[should_panic]
fn test_branch_length_negative_panics() {
    BranchLength::new(-1.0);
}

// --- TRAVERSAL ---
#[test]
fn test_post_order() {
    let (tree, labels) = parse_str("((A,B),C,D);").unwrap();
    let names = |vertices: Vec<&Vertex<usize>>| -> Vec<String> {
        vertices
            .into_iter()
            .map(|v| v.label().map_or("*".to_string(), |&l| labels[l].to_string()))
            .collect()
    };

    let post: Vec<_> = tree.post_order_iter().collect();
    assert_eq!(names(post), ["A", "B", "*", "C", "D", "*"]);
}

// --- PRUNING ---
#[rstest]
#[case::splice_sums_lengths("((A:1,B:2):0.5,C:3);", "B", "(A:1.5,C:3);")]
#[case::root_child_promoted("((A:1,B:2):0.5,C:3);", "C", "(A:1,B:2);")]
#[case::root_length_kept("((A:1,B:2):0.5,C:3):0.7;", "C", "(A:1,B:2):0.7;")]
#[case::multifurcation_no_splice("(A:1,B:1,C:1);", "A", "(B:1,C:1);")]
#[case::inner_multifurcation("((A,B,C),D);", "B", "((A,C),D);")]
#[case::missing_lower_length("((A,B:2):0.5,C);", "A", "(B:2.5,C);")]
#[case::missing_both_lengths("((A,B),C:1);", "A", "(B,C:1);")]
#[case::deep_splice("(((A:1,B:1):1,C:2):1,D:3);", "C", "((A:1,B:1):2,D:3);")]
fn test_without_leaf(#[case] newick: &str, #[case] taxon: &str, #[case] expected: &str) {
    assert_eq!(prune_to_newick(newick, taxon), expected);
}

#[test]
fn test_without_leaf_keeps_original() {
    let (tree, labels) = parse_str("((A:1,B:2):0.5,C:3);").unwrap();
    let pruned = tree.without_leaf(&labels.get_index("A").unwrap()).unwrap();
    assert_eq!(pruned.num_leaves(), 2);
    assert_eq!(tree.num_leaves(), 3);
    assert_eq!(tree.to_newick(&labels), "((A:1,B:2):0.5,C:3);");
}

#[test]
fn test_without_leaf_too_few_leaves() {
    let (tree, labels) = parse_str("(A,B);").unwrap();
    assert_eq!(
        tree.without_leaf(&labels.get_index("A").unwrap()).unwrap_err(),
        PruneError::TooFewLeaves { remaining: 1 }
    );
}

#[test]
fn test_without_leaf_not_found() {
    let (tree, _) = parse_str("(A,B,C);").unwrap();
    assert_eq!(tree.without_leaf(&42).unwrap_err(), PruneError::LeafNotFound);
}

#[test]
fn test_pruning_preserves_patristic_distances() {
    let (tree, labels) = parse_str("((A:1,(B:2,C:3):0.5):1,((D:1,E:4):2,F:0.3):0.2):0.1;").unwrap();

    for removed in ["A", "B", "C", "D", "E", "F"] {
        let pruned = tree.without_leaf(&labels.get_index(removed).unwrap()).unwrap();
        assert!(pruned.is_valid());

        let survivors: Vec<&str> = ["A", "B", "C", "D", "E", "F"]
            .into_iter()
            .filter(|&taxon| taxon != removed)
            .collect();
        for (i, &x) in survivors.iter().enumerate() {
            for &y in &survivors[i + 1..] {
                let before = tree
                    .distance_between(leaf(&tree, &labels, x), leaf(&tree, &labels, y))
                    .unwrap();
                let after = pruned
                    .distance_between(leaf(&pruned, &labels, x), leaf(&pruned, &labels, y))
                    .unwrap();
                assert!(
                    (before - after).abs() < 1e-12,
                    "distance {x}-{y} changed from {before} to {after} after removing {removed}"
                );
            }
        }
    }
}

#[test]
fn test_distance_between_without_lengths() {
    let (tree, labels) = parse_str("((A,B),C);").unwrap();
    let a = leaf(&tree, &labels, "A");
    assert_eq!(tree.distance_between(a, a), Some(0.0));
    assert_eq!(tree.distance_between(a, leaf(&tree, &labels, "C")), None);
}
