use roguewick::newick::NewickParser;
use roguewick::rogue::RogueError;
use roguewick::treestream::{
    StreamError, TreeSource, read_forest, read_trees, write_forest, write_forest_to,
};
use rstest::rstest;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

const SAMPLE: &str = "((A:1,B:2):0.5,C:3);\n(A:1,(B:0.25,C:0.75):1);\n";

fn write_file(dir: &TempDir, name: &str, content: &str) -> PathBuf {
    let path = dir.path().join(name);
    fs::write(&path, content).unwrap();
    path
}

// --- READING ---
#[test]
fn test_read_forest_from_files() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "first.nwk", SAMPLE);
    let second = write_file(&dir, "second.nwk", "((C,A),B);\n");

    let forest =
        read_forest(&[TreeSource::File(first), TreeSource::File(second)]).unwrap();
    assert_eq!(forest.len(), 3);
    assert_eq!(forest.num_taxa(), 3);
    assert_eq!(forest.labels().num_labels(), 3);
}

#[test]
fn test_support_values_are_dropped() {
    let dir = TempDir::new().unwrap();
    let path = write_file(
        &dir,
        "support.nwk",
        "((A:1,B:1)0.95:1,C:2);\n(A:1,(B:1,C:1)'0.80':1)100;\n",
    );
    let forest = read_forest(&[TreeSource::File(path)]).unwrap();
    assert_eq!(forest.len(), 2);
    assert_eq!(forest.num_taxa(), 3);

    let mut written = Vec::new();
    write_forest(&mut written, &forest).unwrap();
    assert_eq!(
        String::from_utf8(written).unwrap(),
        "((A:1,B:1):1,C:2);\n(A:1,(B:1,C:1):1);\n"
    );
}

#[test]
fn test_blank_lines_are_skipped() {
    let input = "\n((A,B),C);\n   \n\n(A,(B,C));\n\n";
    let mut parser = NewickParser::new_compact_defaults();
    let mut trees = Vec::new();
    read_trees(input.as_bytes(), "input", &mut parser, &mut trees).unwrap();
    assert_eq!(trees.len(), 2);
}

#[rstest]
#[case("((A,B),C);\n\n((A,B),C\n", 3)]
#[case("((A,B),C); ((A,B),C);\n", 1)]
#[case("((A,B),C);\n(A,B),C);\n", 2)]
#[case("((A,B),C);\n((A,B),C);\n((A,B),C:x);\n", 3)]
fn test_malformed_line_is_located(#[case] input: &str, #[case] expected_line: usize) {
    let mut parser = NewickParser::new_compact_defaults();
    let mut trees = Vec::new();
    let result = read_trees(input.as_bytes(), "sample.nwk", &mut parser, &mut trees);

    match result {
        Err(StreamError::Malformed {
            source_name, line, ..
        }) => {
            assert_eq!(source_name, "sample.nwk");
            assert_eq!(line, expected_line);
        }
        other => panic!("expected malformed line, got {:?}", other),
    }
}

#[test]
fn test_malformed_message_names_source() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "broken.nwk", "((A,B),C);\n((A,B),C\n");

    let err = read_forest(&[TreeSource::File(path.clone())]).unwrap_err();
    let message = err.to_string();
    assert!(message.contains(&path.display().to_string()));
    assert!(message.contains("line 2"));
}

#[test]
fn test_missing_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("absent.nwk");
    assert!(matches!(
        read_forest(&[TreeSource::File(path)]),
        Err(StreamError::Io { .. })
    ));
}

#[test]
fn test_empty_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "empty.nwk", "\n\n");
    assert!(matches!(
        read_forest(&[TreeSource::File(path)]),
        Err(StreamError::Forest(RogueError::EmptyInput))
    ));
}

#[test]
fn test_inconsistent_files() {
    let dir = TempDir::new().unwrap();
    let first = write_file(&dir, "first.nwk", "((A,B),C);\n");
    let second = write_file(&dir, "second.nwk", "((A,B),D);\n");
    assert!(matches!(
        read_forest(&[TreeSource::File(first), TreeSource::File(second)]),
        Err(StreamError::Forest(RogueError::InconsistentLeafSets { tree: 2 }))
    ));
}

#[rstest]
#[case("-", TreeSource::Stdin)]
#[case("trees.nwk", TreeSource::File(PathBuf::from("trees.nwk")))]
#[case("./-", TreeSource::File(PathBuf::from("./-")))]
fn test_source_from_arg(#[case] arg: &str, #[case] expected: TreeSource) {
    assert_eq!(TreeSource::from_arg(arg), expected);
}

// --- WRITING ---
#[test]
fn test_write_forest_round_trip() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sample.nwk", SAMPLE);
    let forest = read_forest(&[TreeSource::File(path)]).unwrap();

    let mut written = Vec::new();
    write_forest(&mut written, &forest).unwrap();
    let written = String::from_utf8(written).unwrap();
    assert_eq!(written, SAMPLE);

    let reread_path = write_file(&dir, "reread.nwk", &written);
    let reread = read_forest(&[TreeSource::File(reread_path)]).unwrap();
    let mut rewritten = Vec::new();
    write_forest(&mut rewritten, &reread).unwrap();
    assert_eq!(String::from_utf8(rewritten).unwrap(), written);
}

#[test]
fn test_write_pruned_forest_to_file() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sample.nwk", SAMPLE);
    let forest = read_forest(&[TreeSource::File(path)]).unwrap();
    let pruned = forest.pruned(forest.taxon_index("C").unwrap()).unwrap();

    let out = dir.path().join("pruned.nwk");
    write_forest_to(Some(&out), &pruned).unwrap();
    assert_eq!(
        fs::read_to_string(&out).unwrap(),
        "(A:1,B:2);\n(A:1,B:1.25);\n"
    );
}

#[test]
fn test_write_to_missing_directory() {
    let dir = TempDir::new().unwrap();
    let path = write_file(&dir, "sample.nwk", SAMPLE);
    let forest = read_forest(&[TreeSource::File(path)]).unwrap();

    let out = dir.path().join("no").join("such").join("dir.nwk");
    assert!(matches!(
        write_forest_to(Some(&out), &forest),
        Err(StreamError::Io { .. })
    ));
}
