//! Scorekeeper CLI - drive the scoring engine from the terminal.
//!
//! `live` replays a point script through a live session and stores each
//! archived game; `check` validates a whole match entered after the fact.

mod script;

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use scoring_engine::domain::transitions::{derive_session_transitions, SessionTransition};
use scoring_engine::telemetry::init_tracing;
use scoring_engine::{
    BestOf, GameScore, GameValidation, InMemoryMatchRepo, MatchConfig, MatchRecord, MatchService,
    MatchSummary, RetrospectiveScoreEntry, SaveCheck, ScoringDefaults, Side,
};
use serde::Serialize;
use tracing::{debug, info};

#[derive(Parser)]
#[command(name = "scorekeeper")]
#[command(about = "Table-tennis match scoring from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Command,

    #[command(flatten)]
    format: FormatArgs,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit logs as JSON lines
    #[arg(long, global = true)]
    json_logs: bool,
}

#[derive(ClapArgs)]
struct FormatArgs {
    /// Match length (1, 3, 5 or 7); defaults to SCORING_BEST_OF
    #[arg(long, global = true)]
    best_of: Option<u8>,

    /// Points needed to win a game; defaults to SCORING_POINTS_TO_WIN
    #[arg(long, global = true)]
    points_to_win: Option<u32>,

    /// Required winning margin; defaults to SCORING_WIN_BY
    #[arg(long, global = true)]
    win_by: Option<u32>,
}

#[derive(Subcommand)]
enum Command {
    /// Replay a point-by-point script (p = player point, o = opponent point, u = undo)
    Live {
        #[arg(long)]
        script: String,

        /// Who serves first in every game
        #[arg(long, default_value = "player")]
        first_server: ServerArg,
    },
    /// Validate final game scores entered after the match
    Check {
        /// Game score such as 11-7; repeat once per game
        #[arg(long = "game")]
        games: Vec<String>,

        /// Allow saving a match that has no winner yet
        #[arg(long)]
        allow_incomplete: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ServerArg {
    Player,
    Opponent,
}

impl From<ServerArg> for Side {
    fn from(value: ServerArg) -> Self {
        match value {
            ServerArg::Player => Side::Player,
            ServerArg::Opponent => Side::Opponent,
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct LiveReport {
    record: MatchRecord,
    summary: MatchSummary,
    in_game_score: [u32; 2],
    server: Side,
    undo_depth: usize,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CheckReport {
    games: Vec<GameScore>,
    validations: Vec<GameValidation>,
    summary: MatchSummary,
    save: SaveCheck,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "warn" };
    init_tracing(filter, cli.json_logs);

    let defaults = ScoringDefaults::from_env()?;
    let config = build_config(&defaults, &cli.format)?;
    debug!(?config, "Scoring format resolved");

    match cli.command {
        Command::Live {
            script,
            first_server,
        } => run_live(config, &script, first_server.into()).await,
        Command::Check {
            games,
            allow_incomplete,
        } => run_check(
            config,
            &games,
            allow_incomplete || defaults.allow_incomplete_save,
        ),
    }
}

fn build_config(
    defaults: &ScoringDefaults,
    format: &FormatArgs,
) -> Result<MatchConfig, Box<dyn std::error::Error>> {
    let best_of = format.best_of.map(BestOf::try_from).transpose()?;
    let config = MatchConfig::new(
        best_of.unwrap_or(defaults.best_of),
        format.points_to_win.unwrap_or(defaults.points_to_win),
        format.win_by.unwrap_or(defaults.win_by),
    )?;
    Ok(config)
}

async fn run_live(
    config: MatchConfig,
    raw_script: &str,
    first_server: Side,
) -> Result<(), Box<dyn std::error::Error>> {
    let steps = script::parse_script(raw_script)?;

    let service = MatchService::new(InMemoryMatchRepo::new());
    let record = service
        .create_match("player", "opponent", config.best_of())
        .await?;
    let mut session = service
        .open_live_session(&record.id, config, first_server)
        .await?;

    for step in steps {
        let before = session.view();
        session = script::apply(session, step);
        let transitions = derive_session_transitions(&before, &session.view());
        for transition in &transitions {
            debug!(?transition, "Session transition");
        }
        if transitions.iter().any(SessionTransition::touches_record) {
            service.sync_live_session(&record.id, &session).await?;
        }
    }

    let record = service.get_match(&record.id).await?;
    info!(match_id = %record.id, status = record.status.as_str(), "Live replay finished");

    let score = session.score();
    print_json(&LiveReport {
        summary: session.summary(),
        record,
        in_game_score: [score.player, score.opponent],
        server: session.server(),
        undo_depth: session.history_len(),
    })
}

fn run_check(
    config: MatchConfig,
    raw_games: &[String],
    allow_incomplete: bool,
) -> Result<(), Box<dyn std::error::Error>> {
    let slots = usize::from(config.best_of().games());
    if raw_games.len() > slots {
        return Err(format!("{} games given for a {}", raw_games.len(), config.best_of()).into());
    }

    let mut entry = RetrospectiveScoreEntry::new(config);
    for (index, raw) in raw_games.iter().enumerate() {
        let (player1, player2) = script::parse_game(raw)?;
        entry = entry.set_score(index, Some(player1), Some(player2));
    }

    let save = entry.can_save(allow_incomplete);
    let can_save = save.can_save;
    print_json(&CheckReport {
        games: entry.games().to_vec(),
        validations: entry.validations(),
        summary: entry.summary(),
        save,
    })?;

    if !can_save {
        std::process::exit(1);
    }
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
