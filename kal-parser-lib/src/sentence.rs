// Sentence-level parsing: split into tokens and parse each independently.

use std::sync::Arc;

use lazy_static::lazy_static;
use rayon::prelude::*;
use regex::Regex;
use tracing::warn;

use crate::dictionary::Dictionary;
use crate::morpheme::{Form, Word};
use crate::morphology;
use crate::phonology::{char_len, JOINER};
use crate::sequence::SeqJoin;
use crate::types::*;

lazy_static! {
    /// Bare numbers like `12`, `3a` or `1.` are taken literally.
    static ref LITERAL_NUMBER: Regex =
        Regex::new(r"^[0-9]+[a-z.]?$").expect("static literal-number pattern must compile");
}

/// Tokens that carry no word of their own.
const SKIPPED: &[&str] = &[":", "-", "--", "»", "«"];

/// Parse a sentence with default search options.
pub fn parse_sentence(input: &str, dict: &Dictionary) -> SentenceParse {
    parse_sentence_with(input, dict, DecodeOptions::default())
}

/// Parse a sentence. Tokens are decoded in parallel; the output keeps the
/// input order. A token that fails outright is recorded with its error and
/// does not stop the rest of the sentence.
pub fn parse_sentence_with(input: &str, dict: &Dictionary, options: DecodeOptions) -> SentenceParse {
    let tokens = split_sentence(input);
    let words = tokens
        .par_iter()
        .map(|token| parse_token(token, dict, options))
        .collect();

    SentenceParse {
        input: input.to_string(),
        words,
    }
}

fn parse_token(token: &str, dict: &Dictionary, options: DecodeOptions) -> WordParse {
    if LITERAL_NUMBER.is_match(token) {
        return literal(token);
    }
    match morphology::parse_word_with(token, dict, options) {
        Ok(parse) => parse,
        Err(err) => {
            warn!(token, error = %err, "token failed");
            WordParse {
                word: token.to_string(),
                hypotheses: Vec::new(),
                error: Some(err.to_string()),
                stats: None,
            }
        }
    }
}

/// A bare number stands for itself.
fn literal(token: &str) -> WordParse {
    let form = Form::new(token).protected(char_len(token));
    let seq = SeqJoin::from_word(Arc::new(Word::new(form)));
    WordParse {
        word: token.to_string(),
        hypotheses: vec![morphology::hypothesis(&seq)],
        error: None,
        stats: None,
    }
}

/// Split a sentence into tokens, stripping surrounding punctuation.
/// A hyphen inside a token becomes the joiner so that `2-mi` decodes as a
/// numeral with an ending.
pub fn split_sentence(input: &str) -> Vec<String> {
    input
        .split_whitespace()
        .filter(|w| !SKIPPED.contains(w))
        .map(|w| {
            let w = w.trim_end_matches(|c: char| {
                matches!(c, '.' | ',' | '!' | '?' | '»' | '«' | ':' | ')' | ';')
            });
            let w = w.trim_start_matches(|c: char| matches!(c, '.' | ',' | '!' | '?' | '»' | '«' | '('));
            w.replace('-', &JOINER.to_string())
        })
        .filter(|w| !w.is_empty())
        .collect()
}
