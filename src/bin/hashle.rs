//! Minimal CLI for playing the daily hash puzzle.
//!
//! This binary exposes the engine's core actions: printing the day's
//! deterministic header, submitting a manual nonce guess, running the
//! cancellable auto-guess loop, and inspecting persisted progress.
//! Progress lives in a directory of per-puzzle JSON records selected by
//! `--dir` or the `HASHLE_DIR` environment variable.

use hashle::{
    current_puzzle_number, load_progress, save_progress, Attempt, AutoGuesser, Difficulty,
    FileStore, GameSession, PuzzleHeader, Sha256Digest, StopToken, DEFAULT_TARGET_DIGITS,
};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const DEFAULT_DIR: &str = "hashle_progress";

fn fatal(message: &str) -> ! {
    eprintln!("{message}");
    std::process::exit(1);
}

fn print_help() {
    println!("Usage: hashle <header|status|guess|auto|help> ...");
    println!("  header [--puzzle N]");
    println!("  status [--puzzle N]");
    println!("  guess <nonce> [--puzzle N]");
    println!("  auto [--puzzle N] [--limit N] [--delay-ms N]");
    println!("Common flags:");
    println!("  --dir <path>   progress directory (default {DEFAULT_DIR}, or HASHLE_DIR)");
    println!("  --digits <N>   leading zero digits required to win (default {DEFAULT_TARGET_DIGITS})");
}

/// Flags shared by every subcommand, plus any positional arguments.
struct CommonOpts {
    puzzle: Option<u64>,
    dir: PathBuf,
    digits: usize,
    limit: Option<u64>,
    delay_ms: u64,
    positional: Vec<String>,
}

fn parse_opts(args: &[String]) -> CommonOpts {
    let mut opts = CommonOpts {
        puzzle: None,
        dir: env::var("HASHLE_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_DIR)),
        digits: DEFAULT_TARGET_DIGITS,
        limit: None,
        delay_ms: 1,
        positional: Vec::new(),
    };
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--puzzle" => {
                let value = parse_number(next_value(&mut iter, "--puzzle"));
                opts.puzzle = Some(checked_puzzle(value).unwrap_or_else(|msg| fatal(&msg)));
            }
            "--dir" => opts.dir = PathBuf::from(next_value(&mut iter, "--dir")),
            "--digits" => {
                let value = parse_number(next_value(&mut iter, "--digits"));
                opts.digits = checked_digits(value).unwrap_or_else(|msg| fatal(&msg));
            }
            "--limit" => opts.limit = Some(parse_number(next_value(&mut iter, "--limit"))),
            "--delay-ms" => opts.delay_ms = parse_number(next_value(&mut iter, "--delay-ms")),
            flag if flag.starts_with("--") => fatal(&format!("unknown flag: {flag}")),
            value => opts.positional.push(value.to_string()),
        }
    }
    opts
}

fn next_value<'a>(iter: &mut std::slice::Iter<'a, String>, flag: &str) -> &'a str {
    match iter.next() {
        Some(value) => value.as_str(),
        None => fatal(&format!("{flag} requires a value")),
    }
}

fn parse_number(text: &str) -> u64 {
    match text.parse::<u64>() {
        Ok(value) => value,
        Err(_) => fatal(&format!("expected a non-negative integer, got {text:?}")),
    }
}

fn checked_puzzle(value: u64) -> Result<u64, String> {
    if value >= 1 {
        Ok(value)
    } else {
        Err("--puzzle must be at least 1".to_string())
    }
}

fn checked_digits(value: u64) -> Result<usize, String> {
    if (1..=64).contains(&value) {
        Ok(value as usize)
    } else {
        Err("--digits must be between 1 and 64".to_string())
    }
}

fn puzzle_number(opts: &CommonOpts) -> u64 {
    opts.puzzle.unwrap_or_else(current_puzzle_number)
}

fn open_session(opts: &CommonOpts, store: &FileStore) -> GameSession {
    let puzzle = puzzle_number(opts);
    let header = PuzzleHeader::for_day(puzzle);
    let difficulty = Difficulty::new(opts.digits);
    match load_progress(store, puzzle) {
        Some(snapshot) => GameSession::from_snapshot(header, difficulty, snapshot),
        None => GameSession::new(header, difficulty),
    }
}

fn render_attempt(attempt: &Attempt) -> String {
    attempt
        .flags()
        .iter()
        .map(|&flag| if flag { '0' } else { 'x' })
        .collect()
}

fn run_header(opts: &CommonOpts) {
    let header = PuzzleHeader::for_day(puzzle_number(opts));
    println!("puzzle {}", header.puzzle_number());
    println!("{}", header.header());
}

fn run_status(opts: &CommonOpts) {
    let store = FileStore::new(&opts.dir);
    let session = open_session(opts, &store);
    println!("puzzle {}", session.puzzle_number());
    println!("guesses {}", session.ledger().total_guesses());
    println!("won {}", session.won());
    if let Some(hash) = session.latest_hash() {
        println!("latest_hash {hash}");
    }
    if let Some(nonce) = session.latest_nonce() {
        println!("latest_nonce {nonce}");
    }
    let retained = session.ledger().len();
    for attempt in session.ledger().attempts().skip(retained.saturating_sub(8)) {
        println!("  {}", render_attempt(attempt));
    }
}

fn run_guess(opts: &CommonOpts) {
    let text = match opts.positional.first() {
        Some(text) => text,
        None => fatal("guess requires a nonce argument"),
    };
    let store = FileStore::new(&opts.dir);
    let mut session = open_session(opts, &store);
    match session.submit_guess_text(text, &Sha256Digest) {
        Ok(outcome) => {
            save_progress(&store, session.puzzle_number(), &session.snapshot());
            println!("{}", outcome.digest_hex);
            println!("{}", render_attempt(&outcome.attempt));
            if outcome.won {
                println!("solved after {} guesses", session.ledger().total_guesses());
            }
        }
        Err(err) => fatal(&err.to_string()),
    }
}

async fn run_auto(opts: &CommonOpts) {
    let store = FileStore::new(&opts.dir);
    let mut session = open_session(opts, &store);
    if session.won() {
        println!("puzzle {} already solved", session.puzzle_number());
        return;
    }
    let token = StopToken::new();
    let ctrl_c_token = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            ctrl_c_token.stop();
        }
    });
    let mut guesser = AutoGuesser::new().with_delay(Duration::from_millis(opts.delay_ms));
    if let Some(limit) = opts.limit {
        guesser = guesser.with_max_guesses(limit);
    }
    let result = guesser.run(&mut session, &Sha256Digest, &token).await;
    save_progress(&store, session.puzzle_number(), &session.snapshot());
    match result {
        Ok(report) => {
            println!("guesses_made {}", report.guesses_made);
            println!("total_guesses {}", session.ledger().total_guesses());
            if report.won {
                let nonce = session.latest_nonce().unwrap_or_default();
                println!("solved with nonce {nonce}");
            } else if report.stopped {
                println!("stopped");
            } else {
                println!("limit reached");
            }
        }
        Err(err) => fatal(&err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::{checked_digits, checked_puzzle};

    #[test]
    fn test_checked_puzzle_rejects_zero() {
        assert!(checked_puzzle(0).is_err());
        assert_eq!(checked_puzzle(1), Ok(1));
        assert_eq!(checked_puzzle(365), Ok(365));
    }

    #[test]
    fn test_checked_digits_enforces_digest_width() {
        assert!(checked_digits(0).is_err());
        assert!(checked_digits(65).is_err());
        assert_eq!(checked_digits(1), Ok(1));
        assert_eq!(checked_digits(64), Ok(64));
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() < 2 {
        print_help();
        return;
    }
    let opts = parse_opts(&args[2..]);
    match args[1].as_str() {
        "header" => run_header(&opts),
        "status" => run_status(&opts),
        "guess" => run_guess(&opts),
        "auto" => run_auto(&opts).await,
        "help" | "--help" | "-h" => print_help(),
        other => {
            eprintln!("unknown command: {other}");
            print_help();
            std::process::exit(1);
        }
    }
}
