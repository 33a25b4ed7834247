use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read, Write};
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;
use x_score::config::ScoringConfig;
use x_score::extract::{read_posts, RawCount, RawPost};
use x_score::scoring::{Action, ScoreTier, Scorer};
use x_score::{
    analyze_text, format_compact, format_float, format_number, format_percent, parse_count,
    ScoreResult,
};

#[derive(Parser)]
#[command(name = "x-score", about = "Heuristic engagement score for social posts")]
struct Cli {
    /// Scoring config (TOML). Defaults to $XSCORE_CONFIG_PATH or config/scoring.toml.
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Score a single post.
    Score(ScoreArgs),
    /// Score JSON lines of posts.
    Batch(BatchArgs),
    /// Normalize a display count such as "1.2K" or "3万".
    Parse { text: String },
    /// Print text features as JSON.
    Analyze { text: Option<String> },
    /// Print the effective configuration.
    Config(ConfigArgs),
}

#[derive(Args, Debug, Clone)]
struct ScoreArgs {
    #[arg(long)]
    text: Option<String>,
    #[arg(long, default_value = "0")]
    likes: String,
    #[arg(long, default_value = "0")]
    replies: String,
    #[arg(long, default_value = "0")]
    reposts: String,
    #[arg(long, default_value = "0")]
    views: String,
    #[arg(long, default_value = "0")]
    bookmarks: String,
    #[arg(long)]
    media: bool,
    #[arg(long)]
    video: bool,
    #[arg(long)]
    link: bool,
    #[arg(long)]
    verified: bool,
    #[arg(long)]
    json: bool,
}

#[derive(Args, Debug, Clone)]
struct BatchArgs {
    /// JSON lines input; stdin when omitted.
    input: Option<PathBuf>,
    /// Emit posts ordered by total, highest first.
    #[arg(long)]
    rank: bool,
}

#[derive(Args, Debug, Clone)]
struct ConfigArgs {
    #[arg(long)]
    write: Option<PathBuf>,
}

#[derive(Serialize)]
struct BatchLine<'a> {
    key: String,
    tier: ScoreTier,
    result: &'a ScoreResult,
}

fn main() {
    load_dotenv();
    init_tracing();
    if let Err(err) = run() {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<(), String> {
    let cli = Cli::parse();
    let (config, config_path) = ScoringConfig::load(cli.config).map_err(|err| err.to_string())?;
    if let Some(path) = config_path.as_ref() {
        tracing::debug!(path = %path.display(), "resolved config path");
    }

    match cli.command {
        Command::Score(args) => run_score(args, &config),
        Command::Batch(args) => run_batch(args, &config),
        Command::Parse { text } => {
            println!("{}", parse_count(Some(&text)));
            Ok(())
        }
        Command::Analyze { text } => {
            let text = read_text(text)?;
            print_json(&analyze_text(&text))
        }
        Command::Config(args) => run_config(args, &config),
    }
}

fn run_score(args: ScoreArgs, config: &ScoringConfig) -> Result<(), String> {
    let text = read_text(args.text)?;
    let raw = RawPost {
        id: None,
        text: Some(text),
        likes: Some(RawCount::Text(args.likes)),
        replies: Some(RawCount::Text(args.replies)),
        reposts: Some(RawCount::Text(args.reposts)),
        views: Some(RawCount::Text(args.views)),
        bookmarks: Some(RawCount::Text(args.bookmarks)),
        has_media: Some(args.media || args.video),
        has_video: Some(args.video),
        has_link: Some(args.link),
        is_verified: Some(args.verified),
    };

    let scorer = Scorer::new(config);
    let result = scorer.score(&raw.into_record());

    if args.json {
        return print_json(&result);
    }

    let tier = scorer.classify(&result);
    println!("Score: {} ({})", format_float(result.total, 2), tier.label());
    println!(
        "Raw score: {} | verified boost x{}",
        format_float(result.raw_score, 2),
        format_float(result.verified_boost_factor, 2)
    );

    let engagement = &result.engagement;
    let rate = if engagement.engagement_rate > 0.0 {
        format_percent(engagement.engagement_rate)
    } else {
        "N/A".to_string()
    };
    println!(
        "Engagement: likes {} | replies {} | reposts {} | views {} | rate {}",
        format_compact(engagement.likes),
        format_compact(engagement.replies),
        format_compact(engagement.reposts),
        format_compact(engagement.views),
        rate
    );

    let features = &result.text_features;
    println!(
        "Content: {} chars | {} words | {} hashtags | {} mentions | {} urls | {} emoji",
        format_number(features.length as u64),
        features.word_count,
        features.hashtag_count,
        features.mention_count,
        features.url_count,
        features.emoji_count
    );

    println!("\nBreakdown:");
    for action in Action::ESTIMATED {
        if let Some(entry) = result.breakdown.get(&action) {
            println!(
                "  {}: {} x {} = +{}",
                config.labels.label(action),
                format_percent(entry.probability),
                entry.weight,
                format_float(entry.contribution, 4)
            );
        }
    }

    Ok(())
}

fn run_batch(args: BatchArgs, config: &ScoringConfig) -> Result<(), String> {
    let reader: Box<dyn BufRead> = match args.input.as_ref() {
        Some(path) => Box::new(BufReader::new(open(path)?)),
        None => Box::new(BufReader::new(io::stdin())),
    };

    let posts = read_posts(reader).map_err(|err| format!("failed reading input: {}", err))?;

    let keys: Vec<String> = posts.iter().map(RawPost::post_key).collect();
    let records: Vec<_> = posts.into_iter().map(RawPost::into_record).collect();
    let scorer = Scorer::new(config);

    let scored: Vec<(usize, ScoreResult)> = if args.rank {
        scorer.rank(&records)
    } else {
        records
            .iter()
            .enumerate()
            .map(|(index, record)| (index, scorer.score(record)))
            .collect()
    };
    tracing::info!(posts = scored.len(), "scored batch");

    let stdout = io::stdout();
    let mut out = stdout.lock();
    for (index, result) in &scored {
        let line = BatchLine {
            key: keys[*index].clone(),
            tier: scorer.classify(result),
            result,
        };
        let payload = serde_json::to_string(&line)
            .map_err(|err| format!("failed to serialize result: {}", err))?;
        writeln!(out, "{}", payload).map_err(|err| format!("failed writing output: {}", err))?;
    }

    Ok(())
}

fn run_config(args: ConfigArgs, config: &ScoringConfig) -> Result<(), String> {
    if let Some(path) = args.write {
        config.write(&path).map_err(|err| err.to_string())?;
        tracing::info!(path = %path.display(), "wrote config");
        return Ok(());
    }
    let payload = toml::to_string_pretty(config)
        .map_err(|err| format!("failed to serialize config: {}", err))?;
    print!("{}", payload);
    Ok(())
}

fn print_json<T: Serialize>(value: &T) -> Result<(), String> {
    let payload = serde_json::to_string_pretty(value)
        .map_err(|err| format!("failed to serialize output: {}", err))?;
    println!("{}", payload);
    Ok(())
}

fn read_text(arg: Option<String>) -> Result<String, String> {
    resolve_text(arg, io::stdin())
}

fn resolve_text(arg: Option<String>, mut stdin: impl Read) -> Result<String, String> {
    if let Some(text) = arg {
        if !text.trim().is_empty() {
            return Ok(text);
        }
    }

    let mut buffer = String::new();
    stdin
        .read_to_string(&mut buffer)
        .map_err(|err| format!("failed reading stdin: {}", err))?;
    let trimmed = buffer.trim_end_matches('\n');
    if trimmed.trim().is_empty() {
        return Err("missing post text: pass --text or pipe stdin".to_string());
    }
    Ok(trimmed.to_string())
}

fn open(path: &Path) -> Result<File, String> {
    File::open(path).map_err(|err| format!("failed to open {}: {}", path.display(), err))
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();
}

fn load_dotenv() {
    let _ = dotenvy::dotenv();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_text_is_rejected() {
        let err = resolve_text(None, "\n".as_bytes()).expect_err("empty stdin");
        assert!(err.contains("pass --text or pipe stdin"));

        let err = resolve_text(Some("   ".to_string()), "".as_bytes()).expect_err("blank flag");
        assert!(err.contains("missing post text"));
    }

    #[test]
    fn flag_text_wins_over_stdin() {
        let text = resolve_text(Some("from flag".to_string()), "from stdin".as_bytes());
        assert_eq!(text, Ok("from flag".to_string()));
    }

    #[test]
    fn stdin_text_drops_trailing_newline() {
        let text = resolve_text(None, "line one\nline two\n".as_bytes());
        assert_eq!(text, Ok("line one\nline two".to_string()));
    }
}
