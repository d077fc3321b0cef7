use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::{info, warn};

use space_werewolf::{
    CannedSource, EventSink, GameConfig, GameEvent, GameSummary, NarrationConfig, Narrator,
    NullSink, Orchestrator, Tee, TextSource, TracingSink,
};

/// Play one game of Space Werewolf and print the result.
#[derive(Debug, Parser)]
#[command(name = "space-werewolf", version, about)]
struct Args {
    /// Seed for role assignment, scoring and votes. Random when omitted.
    #[arg(long)]
    seed: Option<u64>,

    /// Narrate with the chat-completions backend (needs feature `live`
    /// and an API key).
    #[arg(long)]
    live: bool,

    /// Game rules as TOML.
    #[arg(long, value_name = "TOML")]
    config: Option<PathBuf>,

    /// Print the post-game summary as JSON instead of the transcript.
    #[arg(long)]
    json: bool,

    /// More log output (-v info, -vv debug).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

/// Prints the game as it happens.
struct ConsoleSink;

impl EventSink for ConsoleSink {
    fn emit(&mut self, event: &GameEvent) {
        match event {
            GameEvent::GameStarted { seed, .. } => {
                println!("=== Space Werewolf (seed {seed}) ===");
                println!("Five crew aboard. Two of them are not who they claim to be.");
            }
            GameEvent::RoundStarted { round } => println!("\n--- Voting round {round} ---"),
            GameEvent::PlayerReported { sub_round, player, text, .. } => {
                println!("[report {sub_round}] {player}: {text}");
            }
            GameEvent::PlayerDefended { player, accuser, text, .. } => {
                println!("[defense] {player} (accused by {accuser}): {text}");
            }
            GameEvent::SuspicionScored { .. } => {}
            GameEvent::PlayerVoted { ballot, .. } => {
                println!("[vote] {} -> {} ({})", ballot.voter, ballot.target, ballot.reason);
            }
            GameEvent::PlayerEliminated { player, role, votes, tie_broken, .. } => {
                let tie = if *tie_broken { ", after a tie" } else { "" };
                println!("{player} is ejected with {votes} votes{tie}. They were the {role}.");
            }
            GameEvent::RoundEnded { impostors_left, crewmates_left, .. } => {
                println!("Remaining: {impostors_left} impostor(s), {crewmates_left} crewmate(s)");
            }
            GameEvent::GameEnded { victory, .. } => println!("\n{}", victory.message()),
        }
    }
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

fn play<S: TextSource>(
    source: S,
    config: GameConfig,
    seed: u64,
    sink: impl EventSink,
) -> Result<GameSummary> {
    let narrator = Narrator::new(source, &config);
    let mut game = Orchestrator::new(config, seed, narrator, sink);
    game.run().context("game aborted")
}

fn play_with<S: TextSource>(
    source: S,
    config: GameConfig,
    seed: u64,
    json: bool,
) -> Result<GameSummary> {
    if json {
        play(source, config, seed, NullSink)
    } else {
        play(source, config, seed, Tee(ConsoleSink, TracingSink))
    }
}

#[cfg(feature = "live")]
fn play_live(config: GameConfig, seed: u64, json: bool) -> Result<GameSummary> {
    let narration = NarrationConfig::from_env();
    match space_werewolf::ChatCompletionSource::new(narration) {
        Ok(source) => {
            info!("narrating with chat completions");
            play_with(source, config, seed, json)
        }
        Err(e) => {
            warn!("live narration unavailable ({e}), using canned lines");
            play_with(CannedSource, config, seed, json)
        }
    }
}

#[cfg(not(feature = "live"))]
fn play_live(config: GameConfig, seed: u64, json: bool) -> Result<GameSummary> {
    if NarrationConfig::from_env().has_credentials() {
        warn!("built without the `live` feature, using canned lines");
    } else {
        warn!("no API key and no `live` feature, using canned lines");
    }
    play_with(CannedSource, config, seed, json)
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(args.verbose);

    let config = match &args.config {
        Some(path) => GameConfig::from_file(path)
            .with_context(|| format!("loading rules from {}", path.display()))?,
        None => GameConfig::default(),
    };
    let seed = args.seed.unwrap_or_else(rand::random);
    info!(seed, live = args.live, "starting game");

    let summary = if args.live {
        play_live(config, seed, args.json)?
    } else {
        play_with(CannedSource, config, seed, args.json)?
    };

    if args.json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("\n{summary}");
    }
    Ok(())
}
