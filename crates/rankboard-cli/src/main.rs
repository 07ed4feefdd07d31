mod display;

use std::fmt;
use std::path::PathBuf;

use anyhow::{Context, bail};
use chrono::{DateTime, Utc};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rankboard_core::{Direction, Leaderboard, Query, plot, score};
use rankboard_ingest::{Freshness, export, load_plots, load_scores};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "rankboard")]
#[command(about = "Filter and sort housing plot and model score leaderboards")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Show a housing plot snapshot.
    Plots {
        /// JSON array of plot states.
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,

        /// Reference time for lottery freshness (RFC 3339). Defaults to now.
        #[arg(long, env = "RANKBOARD_NOW")]
        now: Option<DateTime<Utc>>,
    },
    /// Show a model score leaderboard file.
    Scores {
        /// JSON array of leaderboard rows.
        file: PathBuf,

        #[command(flatten)]
        view: ViewArgs,
    },
    /// List the filters and sorts a leaderboard offers.
    Options {
        #[arg(value_enum)]
        board: Board,
    },
    /// Split submission results into per-setting web leaderboard files.
    Webfmt {
        results_dir: PathBuf,
        out_dir: PathBuf,
    },
}

#[derive(Args)]
struct ViewArgs {
    /// Filter selection as `id=value[,value...]`. Repeatable.
    #[arg(short, long = "filter", value_name = "ID=VALUES", value_parser = parse_filter_arg)]
    filters: Vec<(String, Vec<String>)>,

    /// Sort identifier.
    #[arg(short, long)]
    sort: Option<String>,

    /// Sort descending instead of ascending.
    #[arg(long, requires = "sort")]
    desc: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum Board {
    Plots,
    Scores,
}

fn parse_filter_arg(arg: &str) -> Result<(String, Vec<String>), String> {
    let (id, values) = arg
        .split_once('=')
        .ok_or_else(|| format!("expected ID=VALUES, got `{arg}`"))?;
    let id = id.trim();
    if id.is_empty() {
        return Err(format!("missing filter id in `{arg}`"));
    }
    let values = values
        .split(',')
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect();
    Ok((id.to_string(), values))
}

/// Resolve command-line selections against a leaderboard's registries.
fn build_query<R, V: Clone + fmt::Display>(
    board: &Leaderboard<R, V>,
    view: &ViewArgs,
) -> anyhow::Result<Query<V>> {
    let mut query = Query::new();
    for (id, tokens) in &view.filters {
        let values = board
            .filters()
            .parse_selection(id, tokens.as_slice())
            .with_context(|| format!("invalid {} filter `{id}`", board.name()))?;
        query = query.filter(id.as_str(), values);
    }
    if let Some(id) = &view.sort {
        let direction = if view.desc {
            Direction::Descending
        } else {
            Direction::Ascending
        };
        query = query.sort(id.as_str(), direction);
    }
    Ok(query)
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    info!(version = env!("CARGO_PKG_VERSION"), "rankboard");

    match cli.command {
        Command::Plots { file, view, now } => {
            let freshness = now.map_or_else(Freshness::now, Freshness::at);
            let records = load_plots(&file, &freshness)
                .with_context(|| format!("loading plots from {}", file.display()))?;
            let query = build_query(&*plot::PLOTS, &view)?;
            let rows = plot::PLOTS.apply(&records, &query)?;
            print!("{}", display::render_plots(&rows));
        }
        Command::Scores { file, view } => {
            let records = load_scores(&file)
                .with_context(|| format!("loading scores from {}", file.display()))?;
            let query = build_query(&*score::SCORES, &view)?;
            let rows = score::SCORES.apply(&records, &query)?;
            print!("{}", display::render_scores(&rows));
        }
        Command::Options { board } => match board {
            Board::Plots => print!("{}", display::render_options(&*plot::PLOTS)),
            Board::Scores => print!("{}", display::render_options(&*score::SCORES)),
        },
        Command::Webfmt {
            results_dir,
            out_dir,
        } => {
            if !results_dir.is_dir() {
                bail!("{} is not a directory", results_dir.display());
            }
            let boards = export(&results_dir, &out_dir)
                .with_context(|| format!("exporting {}", results_dir.display()))?;
            for setting in rankboard_ingest::Setting::ALL {
                println!(
                    "{:<18} {:>4} rows -> {}",
                    setting,
                    boards.board(setting).len(),
                    out_dir.join(setting.web_file()).display()
                );
            }
        }
    }
    Ok(())
}
