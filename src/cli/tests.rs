use super::*;
use crate::core::config::data::DEFAULT_ENDPOINT;

mod test_helpers {
    use super::*;

    pub(super) fn parse_args(argv: &[&str]) -> Args {
        Args::try_parse_from(argv)
            .unwrap_or_else(|err| panic!("argv={argv:?} should parse successfully: {err}"))
    }
}

use test_helpers::parse_args;

#[test]
fn no_subcommand_defaults_to_chat() {
    let args = parse_args(&["relaychat"]);
    assert!(args.command.is_none());
    assert!(args.endpoint.is_none());
    assert!(args.log_file.is_none());
}

#[test]
fn endpoint_and_log_file_are_global_flags() {
    let argv = [
        "relaychat",
        "chat",
        "--endpoint",
        "http://localhost:9000/chat",
        "--log-file",
        "/tmp/relaychat.log",
    ];
    let args = parse_args(&argv);
    assert!(matches!(args.command, Some(Commands::Chat)));
    assert_eq!(args.endpoint.as_deref(), Some("http://localhost:9000/chat"));
    assert_eq!(
        args.log_file.as_deref(),
        Some(std::path::Path::new("/tmp/relaychat.log"))
    );

    let args = parse_args(&["relaychat", "-e", "http://x/chat", "say", "hi"]);
    assert_eq!(args.endpoint.as_deref(), Some("http://x/chat"));
}

#[test]
fn say_collects_every_word_including_hyphenated_ones() {
    let argv = ["relaychat", "say", "what", "is", "-1", "squared?"];
    match parse_args(&argv).command {
        Some(Commands::Say { prompt }) => {
            assert_eq!(prompt, vec!["what", "is", "-1", "squared?"]);
        }
        _ => panic!("expected say subcommand for argv={argv:?}"),
    }
}

#[test]
fn serve_accepts_host_and_port_overrides() {
    let argv = ["relaychat", "serve", "--host", "0.0.0.0", "--port", "8080"];
    match parse_args(&argv).command {
        Some(Commands::Serve { host, port }) => {
            assert_eq!(host.as_deref(), Some("0.0.0.0"));
            assert_eq!(port, Some(8080));
        }
        _ => panic!("expected serve subcommand for argv={argv:?}"),
    }

    match parse_args(&["relaychat", "serve"]).command {
        Some(Commands::Serve { host, port }) => {
            assert!(host.is_none());
            assert!(port.is_none());
        }
        _ => panic!("expected serve subcommand"),
    }
}

#[test]
fn serve_rejects_out_of_range_port() {
    assert!(Args::try_parse_from(["relaychat", "serve", "--port", "70000"]).is_err());
}

#[test]
fn set_joins_multi_word_values() {
    let argv = [
        "relaychat",
        "set",
        "server.system-prompt",
        "You",
        "are",
        "terse",
    ];
    match parse_args(&argv).command {
        Some(Commands::Set { key, value }) => {
            assert_eq!(key, "server.system-prompt");
            assert_eq!(value.join(" "), "You are terse");
        }
        _ => panic!("expected set subcommand for argv={argv:?}"),
    }
}

#[test]
fn unset_and_config_parse() {
    match parse_args(&["relaychat", "unset", "endpoint"]).command {
        Some(Commands::Unset { key }) => assert_eq!(key, "endpoint"),
        _ => panic!("expected unset subcommand"),
    }
    assert!(matches!(
        parse_args(&["relaychat", "config"]).command,
        Some(Commands::Config)
    ));
}

#[test]
fn resolve_endpoint_prefers_flag_then_config_then_default() {
    let mut config = Config::default();
    assert_eq!(resolve_endpoint(None, &config), DEFAULT_ENDPOINT);

    config.endpoint = Some("http://configured/chat".to_string());
    assert_eq!(resolve_endpoint(None, &config), "http://configured/chat");
    assert_eq!(
        resolve_endpoint(Some("http://flag/chat"), &config),
        "http://flag/chat"
    );
    assert_eq!(
        resolve_endpoint(Some("   "), &config),
        "http://configured/chat"
    );
}
