//! CLI for the genq generation client.

mod commands;

use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use genq_core::api::ApiClient;
use genq_core::config::{self, GenqConfig};
use genq_core::flow::SubmissionFlow;
use genq_core::media::{MediaInput, MediaKind};
use genq_core::poller::PollOptions;

use commands::{run_completions, run_job, run_man, run_models, run_submit};

/// Top-level CLI for the genq generation client.
#[derive(Debug, Parser)]
#[command(name = "genq")]
#[command(about = "genq: submit chat, image, video and music jobs and wait for the result", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Overrides for values normally read from config.toml.
#[derive(Debug, Default, Args)]
pub struct GlobalArgs {
    /// Backend base URL, e.g. https://app.example.com.
    #[arg(long, global = true, value_name = "URL")]
    pub base_url: Option<String>,

    /// Messenger user id to act as (0 = anonymous).
    #[arg(long, global = true, value_name = "ID")]
    pub tg_id: Option<i64>,

    /// Model id to use instead of the catalog default.
    #[arg(long, global = true, value_name = "ID")]
    pub model: Option<String>,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// List available models per media kind.
    Models,

    /// Send a chat message and print the answer.
    Chat {
        /// Message text.
        message: String,
    },

    /// Generate an image from a prompt.
    Image {
        /// Image description.
        prompt: String,
    },

    /// Generate a video from a prompt.
    Video {
        /// Video description.
        prompt: String,
    },

    /// Generate a song from lyrics.
    Music {
        /// Song lyrics.
        lyrics: String,

        /// Optional style hint, e.g. "synthwave".
        #[arg(long)]
        style: Option<String>,
    },

    /// Fetch the status of an existing job once.
    Job {
        /// Media kind of the job (chat, image, video, music).
        kind: MediaKind,
        /// Job identifier.
        id: String,
    },

    /// Print shell completions to stdout.
    Completions {
        /// Target shell.
        shell: Shell,
    },

    /// Print the man page to stdout.
    Man,
}

impl CliCommand {
    /// Input for the generation subcommands, `None` for everything else.
    fn media_input(&self) -> Option<MediaInput> {
        match self {
            CliCommand::Chat { message } => Some(MediaInput::Chat {
                message: message.clone(),
            }),
            CliCommand::Image { prompt } => Some(MediaInput::Image {
                prompt: prompt.clone(),
            }),
            CliCommand::Video { prompt } => Some(MediaInput::Video {
                prompt: prompt.clone(),
            }),
            CliCommand::Music { lyrics, style } => Some(MediaInput::Music {
                lyrics: lyrics.clone(),
                style: style.clone(),
            }),
            _ => None,
        }
    }

    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Neither needs config or the network.
        match &cli.command {
            CliCommand::Completions { shell } => return run_completions(*shell, Cli::command()),
            CliCommand::Man => return run_man(Cli::command()),
            _ => {}
        }

        let mut cfg = config::load_or_init()?;
        apply_overrides(&mut cfg, &cli.global);
        tracing::debug!("loaded config: {:?}", cfg);
        let api = ApiClient::from_config(&cfg)?;
        let identity = cfg.identity();

        match &cli.command {
            CliCommand::Models => run_models(&api, identity).await?,
            CliCommand::Job { kind, id } => run_job(&api, *kind, id).await?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
            cmd => {
                if let Some(input) = cmd.media_input() {
                    let flow = SubmissionFlow::new(api, PollOptions::from_config(&cfg));
                    run_submit(&flow, identity, cli.global.model.as_deref(), input).await?;
                }
            }
        }

        Ok(())
    }
}

fn apply_overrides(cfg: &mut GenqConfig, global: &GlobalArgs) {
    if let Some(url) = &global.base_url {
        cfg.base_url = url.clone();
    }
    if let Some(id) = global.tg_id {
        cfg.tg_id = Some(id);
    }
}
