use clap::Parser;
use std::path::PathBuf;
use turnwatch::cli::{Cli, Commands};

#[test]
fn test_parse_replay_with_overrides() {
    let cli = Cli::try_parse_from(vec![
        "turnwatch",
        "replay",
        "session.yaml",
        "--timeout-ms",
        "5000",
        "--poll-interval-ms",
        "100",
        "--stability-window-ms",
        "800",
        "--max-continuation-attempts",
        "2",
        "--no-auto-continue",
        "--min-len",
        "20",
    ])
    .unwrap();

    match cli.command {
        Commands::Replay(args) => {
            assert_eq!(args.script, PathBuf::from("session.yaml"));
            assert_eq!(args.timeout_ms, Some(5000));
            assert_eq!(args.poll_interval_ms, Some(100));
            assert_eq!(args.stability_window_ms, Some(800));
            assert_eq!(args.max_continuation_attempts, Some(2));
            assert!(args.no_auto_continue);
            assert_eq!(args.min_len, 20);
        }
        Commands::Config(_) => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_replay_defaults() {
    let cli = Cli::try_parse_from(vec!["turnwatch", "replay", "session.yaml"]).unwrap();

    match cli.command {
        Commands::Replay(args) => {
            assert!(args.timeout_ms.is_none());
            assert!(!args.no_auto_continue);
            assert_eq!(args.min_len, 1);
        }
        Commands::Config(_) => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli =
        Cli::try_parse_from(vec!["turnwatch", "config", "--json", "-c", "custom.yaml"]).unwrap();

    assert!(cli.json);
    assert_eq!(cli.config, Some(PathBuf::from("custom.yaml")));
    assert!(matches!(cli.command, Commands::Config(_)));
}

#[test]
fn test_replay_requires_script() {
    assert!(Cli::try_parse_from(vec!["turnwatch", "replay"]).is_err());
}

#[test]
fn test_rejects_non_numeric_timeout() {
    assert!(
        Cli::try_parse_from(vec!["turnwatch", "replay", "s.yaml", "--timeout-ms", "soon"]).is_err()
    );
}
