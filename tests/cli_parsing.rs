use clap::Parser;
use unified_ai::cli::commands::config::ConfigArgs;
use unified_ai::cli::{Cli, Commands};

#[test]
fn test_parse_ask_with_flags() {
    let cli = Cli::try_parse_from(vec![
        "unified-ai",
        "ask",
        "pipeline",
        "#123456",
        "failing",
        "--show-prompt",
        "--sources",
    ])
    .unwrap();

    match cli.command {
        Commands::Ask(args) => {
            assert_eq!(args.query_text(), "pipeline #123456 failing");
            assert!(args.show_prompt);
            assert!(args.sources);
        }
        _ => panic!("Wrong top-level command"),
    }
    assert!(!cli.json);
}

#[test]
fn test_parse_prompt_json() {
    let cli = Cli::try_parse_from(vec!["unified-ai", "--json", "prompt", "disk", "full"]).unwrap();
    assert!(cli.json);
    match cli.command {
        Commands::Prompt(args) => assert_eq!(args.query, vec!["disk", "full"]),
        _ => panic!("Wrong top-level command"),
    }
}

#[test]
fn test_parse_config_subcommands() {
    let cli = Cli::try_parse_from(vec!["unified-ai", "config", "check"]).unwrap();
    assert!(matches!(cli.command, Commands::Config(ConfigArgs::Check)));

    let cli = Cli::try_parse_from(vec!["unified-ai", "config", "show"]).unwrap();
    assert!(matches!(cli.command, Commands::Config(ConfigArgs::Show)));
}

#[test]
fn test_parse_interactive() {
    let cli = Cli::try_parse_from(vec!["unified-ai", "interactive"]).unwrap();
    assert!(matches!(cli.command, Commands::Interactive(_)));
}

#[test]
fn test_unknown_command_is_usage_error() {
    assert!(Cli::try_parse_from(vec!["unified-ai", "deploy"]).is_err());
}
