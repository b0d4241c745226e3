//! Command-line interface parsing and handling
//!
//! This module handles parsing command-line arguments and executing the appropriate commands.

pub mod say;

use std::error::Error;
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use crate::cli::say::run_say;
use crate::core::config::{Config, ConfigKey};
use crate::relay::{api_key_from_env, load_dotenv, serve, BindOverrides, RelaySettings};
use crate::ui::chat_loop::run_chat;
use crate::utils::logging::{init_tracing, LogTarget};

#[derive(Parser)]
#[command(name = "relaychat")]
#[command(version)]
#[command(about = "A terminal chat widget that posts each message to a chat endpoint")]
#[command(
    long_about = "relaychat is a full-screen terminal chat widget. Every message you send is \
POSTed as {\"message\": ...} to the configured endpoint, and the reply is appended to the \
transcript as soon as it arrives. Replies to concurrent messages appear in arrival order.\n\n\
`relaychat serve` runs the matching relay, which forwards messages to an OpenAI-compatible \
chat-completions API (DeepSeek by default). It reads a `.env` file from the working \
directory or its parents when one exists.\n\n\
Environment Variables:\n\
  DEEPSEEK_API_KEY  API key used by `relaychat serve`\n\
  HOST, PORT        Relay bind address (between the config file and --host/--port)\n\
  RUST_LOG          Log filter (defaults to info)\n\n\
Controls:\n\
  Type              Enter your message in the input field\n\
  Enter             Send the message\n\
  PgUp/PgDn         Scroll through the transcript\n\
  Esc or Ctrl+C     Quit the application"
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Chat endpoint URL (overrides the configured endpoint)
    #[arg(short = 'e', long, global = true, value_name = "URL")]
    pub endpoint: Option<String>,

    /// Write diagnostic logs for the chat interface to this file
    #[arg(short = 'l', long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the chat interface (default)
    Chat,
    /// Send one message without the TUI and print the reply
    Say {
        /// The message to send
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        prompt: Vec<String>,
    },
    /// Run the relay server that forwards chat messages upstream
    Serve {
        /// Interface to bind (overrides server.host)
        #[arg(long)]
        host: Option<String>,
        /// Port to bind (overrides server.port)
        #[arg(long)]
        port: Option<u16>,
    },
    /// Set configuration values
    Set {
        /// Configuration key to set
        key: String,
        /// Value to set for the key (can be multiple words)
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        value: Vec<String>,
    },
    /// Unset configuration values
    Unset {
        /// Configuration key to unset
        key: String,
    },
    /// Print the current configuration
    Config,
}

pub fn main() -> Result<(), Box<dyn Error>> {
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_main())
}

/// The `--endpoint` flag wins over the configured endpoint, which wins over
/// the built-in default.
pub fn resolve_endpoint(flag: Option<&str>, config: &Config) -> String {
    flag.map(str::trim)
        .filter(|endpoint| !endpoint.is_empty())
        .unwrap_or_else(|| config.endpoint())
        .to_string()
}

async fn async_main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    match args.command.unwrap_or(Commands::Chat) {
        Commands::Chat => {
            let config = Config::load()?;
            let endpoint = resolve_endpoint(args.endpoint.as_deref(), &config);
            run_chat(reqwest::Client::new(), endpoint, args.log_file).await
        }
        Commands::Say { prompt } => {
            let config = Config::load()?;
            let endpoint = resolve_endpoint(args.endpoint.as_deref(), &config);
            init_tracing(&LogTarget::Stderr)?;
            run_say(prompt, endpoint).await
        }
        Commands::Serve { host, port } => {
            init_tracing(&LogTarget::Stderr)?;
            load_dotenv();

            let config = Config::load()?;
            let api_key = match api_key_from_env() {
                Ok(key) => key,
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            };
            let env_overrides = match BindOverrides::from_env() {
                Ok(overrides) => overrides,
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            };

            // Config file, then HOST/PORT from the environment, then flags.
            let settings = RelaySettings::from_config(&config.server, api_key)
                .with_overrides(env_overrides)
                .with_overrides(BindOverrides { host, port });

            if let Err(err) = serve(settings).await {
                eprintln!("❌ {err}");
                std::process::exit(1);
            }
            Ok(())
        }
        Commands::Set { key, value } => {
            let key = match ConfigKey::parse(&key) {
                Ok(key) => key,
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            };
            let value = value.join(" ");
            let mut config = Config::load()?;
            if let Err(err) = config.set_value(key, &value) {
                eprintln!("❌ {err}");
                std::process::exit(1);
            }
            config.save()?;
            println!("✅ Set {key} to: {}", value.trim());
            Ok(())
        }
        Commands::Unset { key } => {
            let key = match ConfigKey::parse(&key) {
                Ok(key) => key,
                Err(err) => {
                    eprintln!("❌ {err}");
                    std::process::exit(1);
                }
            };
            let mut config = Config::load()?;
            config.unset_value(key);
            config.save()?;
            println!("✅ Unset {key}");
            Ok(())
        }
        Commands::Config => {
            let config = Config::load()?;
            config.print_all();
            if let Ok(path) = Config::config_path() {
                println!();
                println!(
                    "Config file: {}",
                    crate::core::config::data::path_display(&path)
                );
            }
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests;
