mod cache;

use std::io::{self, BufRead};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use kal_parser_lib::output::sentence_to_lines;
use kal_parser_lib::{parse_sentence_with, DecodeOptions, Dictionary, SentenceParse};
use tracing::debug;
use tracing_subscriber::EnvFilter;

use cache::SentenceCache;

#[derive(Parser)]
#[command(name = "kal-parser", about = "Kalaallisut morphological analyser")]
struct Cli {
    /// Kalaallisut text to parse. If omitted, reads lines from stdin.
    input: Option<String>,

    /// Load stems and words from this lexicon file instead of the built-in one.
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Print annotated segmentations ({iglu}N{t}) instead of plain ones.
    #[arg(long)]
    annotated: bool,

    /// Output JSON.
    #[arg(long)]
    json: bool,

    /// Pretty-print JSON output.
    #[arg(long)]
    pretty: bool,

    /// Keep search counters in the JSON output.
    #[arg(long)]
    stats: bool,

    /// Stop expanding stems below this depth.
    #[arg(long)]
    max_depth: Option<usize>,

    /// Log search details to stderr.
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .init();

    let dict = match &cli.lexicon {
        Some(path) => Dictionary::from_path(path)
            .with_context(|| format!("loading lexicon {}", path.display()))?,
        None => Dictionary::new(),
    };
    let options = DecodeOptions {
        max_depth: cli.max_depth,
    };
    let mut cache = SentenceCache::default();

    match cli.input {
        Some(ref text) => process_line(text, &dict, options, &mut cache, &cli)?,
        None => {
            let stdin = io::stdin();
            for line in stdin.lock().lines() {
                let line = line.context("reading stdin")?;
                if !line.trim().is_empty() {
                    process_line(&line, &dict, options, &mut cache, &cli)?;
                }
            }
        }
    }
    Ok(())
}

fn process_line(
    line: &str,
    dict: &Dictionary,
    options: DecodeOptions,
    cache: &mut SentenceCache,
    cli: &Cli,
) -> Result<()> {
    let sentence = line.trim().to_lowercase();
    let parse = match cache.get(&sentence) {
        Some(parse) => parse.clone(),
        None => {
            let parse = parse_sentence_with(&sentence, dict, options);
            cache.insert(sentence, parse.clone());
            debug!(cached = cache.len(), history = ?cache.history().collect::<Vec<_>>(), "parsed");
            parse
        }
    };

    if cli.json {
        let parse = if cli.stats { parse } else { without_stats(parse) };
        let json = if cli.pretty {
            serde_json::to_string_pretty(&parse)
        } else {
            serde_json::to_string(&parse)
        };
        println!("{}", json.context("serializing parse")?);
    } else {
        println!("{}", sentence_to_lines(&parse, cli.annotated));
    }
    Ok(())
}

fn without_stats(mut parse: SentenceParse) -> SentenceParse {
    for word in &mut parse.words {
        word.stats = None;
    }
    parse
}
