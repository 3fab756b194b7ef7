use clap::{CommandFactory, Parser};
use roguewick::cli::{Cli, run};
use roguewick::rogue::DEFAULT_ITERATIONS;
use roguewick::treestream::TreeSource;
use std::fs;
use std::path::PathBuf;
use tempfile::TempDir;

#[test]
fn test_cli_definition() {
    Cli::command().debug_assert();
}

#[test]
fn test_defaults() {
    let cli = Cli::try_parse_from(["roguewick"]).unwrap();
    assert_eq!(cli.iterations, DEFAULT_ITERATIONS);
    assert_eq!(cli.verbose, 0);
    assert!(cli.output.is_none());
    assert!(cli.sources().is_empty());

    let config = cli.rogue_config();
    assert_eq!(config.iterations(), 1);
    assert!(config.guarded().is_empty());
    assert_eq!(config.threads(), None);
}

#[test]
fn test_full_arguments() {
    let cli = Cli::try_parse_from([
        "roguewick",
        "-n",
        "3",
        "--guard",
        "Apteryx haastii, Apteryx owenii",
        "--threads",
        "2",
        "-o",
        "pruned.nwk",
        "-vv",
        "a.nwk",
        "-",
    ])
    .unwrap();

    assert_eq!(cli.verbose, 2);
    assert_eq!(cli.output, Some(PathBuf::from("pruned.nwk")));
    assert_eq!(
        cli.sources(),
        [TreeSource::File(PathBuf::from("a.nwk")), TreeSource::Stdin]
    );

    let config = cli.rogue_config();
    assert_eq!(config.iterations(), 3);
    assert_eq!(config.threads(), Some(2));
    assert!(config.is_guarded("Apteryx haastii"));
    assert!(config.is_guarded("Apteryx owenii"));
    assert_eq!(config.guarded().len(), 2);
}

#[test]
fn test_rejects_bad_iterations() {
    assert!(Cli::try_parse_from(["roguewick", "-n", "-1"]).is_err());
    assert!(Cli::try_parse_from(["roguewick", "-n", "many"]).is_err());
}

#[test]
fn test_run_end_to_end() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().join("trees.nwk");
    let output = dir.path().join("pruned.nwk");
    fs::write(
        &input,
        "(((A,X),B),(C,D));\n((A,B),((C,X),D));\n((A,B),(C,(D,X)));\n(((A,B),X),(C,D));\n",
    )
    .unwrap();

    let cli = Cli::try_parse_from([
        "roguewick",
        "--threads",
        "1",
        "-o",
        output.to_str().unwrap(),
        input.to_str().unwrap(),
    ])
    .unwrap();

    let outcome = run(&cli).unwrap();
    assert_eq!(outcome.removed, ["X"]);
    assert!(!outcome.stopped_early);
    assert_eq!(
        fs::read_to_string(&output).unwrap(),
        "((A,B),(C,D));\n((A,B),(C,D));\n((A,B),(C,D));\n((A,B),(C,D));\n"
    );
}

#[test]
fn test_run_reports_missing_input() {
    let dir = TempDir::new().unwrap();
    let missing = dir.path().join("missing.nwk");
    let cli = Cli::try_parse_from(["roguewick", missing.to_str().unwrap()]).unwrap();

    let err = run(&cli).unwrap_err();
    assert!(err.to_string().contains("missing.nwk"));
}
