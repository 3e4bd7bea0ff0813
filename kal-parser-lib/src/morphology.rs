// Decomposition search for Kalaallisut wordforms.
//
// For each word we look for every morpheme sequence whose re-synthesis spells
// the word exactly:
//   A. Dictionary words sharing all but the last three letters, plus clitics
//   B. Numerals and abbreviations joined with a hyphen
//   C. Lexicon stems, extended depth-first with endings and affixes
//
// The search never commits to a single path: every branch that survives the
// length and prefix checks is explored, and every exact match is kept.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::dictionary::{Dictionary, ABBREVIATIONS};
use crate::error::{Error, Result};
use crate::morpheme::{Joined, Morpheme, Stem};
use crate::output::component;
use crate::phonology::{char_len, prefix, window, JOINER};
use crate::sandhi::{PartOfSpeech, RightKind, RightRule};
use crate::sequence::SeqJoin;
use crate::types::*;

/// Every matching sequence for one word, with the search counters.
#[derive(Debug, Clone)]
pub struct Decoded {
    pub sequences: Vec<SeqJoin>,
    pub stats: SearchStats,
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Find every decomposition of `word`.
pub fn decode(word: &str, dict: &Dictionary) -> Result<Decoded> {
    decode_with(word, dict, DecodeOptions::default())
}

pub fn decode_with(word: &str, dict: &Dictionary, options: DecodeOptions) -> Result<Decoded> {
    let mut search = Search {
        word,
        word_len: char_len(word),
        dict,
        options,
        stats: SearchStats::default(),
    };
    let sequences = search.run()?;
    Ok(Decoded {
        sequences,
        stats: search.stats,
    })
}

/// Parse a word into all possible hypotheses.
pub fn parse_word(word: &str, dict: &Dictionary) -> Result<WordParse> {
    parse_word_with(word, dict, DecodeOptions::default())
}

pub fn parse_word_with(word: &str, dict: &Dictionary, options: DecodeOptions) -> Result<WordParse> {
    let decoded = decode_with(word, dict, options)?;
    debug!(word, stats = ?decoded.stats, "decoded");

    let mut hypotheses: Vec<Hypothesis> = decoded.sequences.iter().map(hypothesis).collect();
    dedup_hypotheses(&mut hypotheses);
    if hypotheses.is_empty() {
        warn!(word, "no parse");
    }

    Ok(WordParse {
        word: word.to_string(),
        hypotheses,
        error: None,
        stats: Some(decoded.stats),
    })
}

/// The hypothesis a matched sequence stands for.
pub fn hypothesis(seq: &SeqJoin) -> Hypothesis {
    Hypothesis {
        components: seq.seq.morphemes.iter().map(component).collect(),
        plain: seq.seq.plain(),
        annotated: seq.seq.annotated(),
    }
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

struct Search<'a> {
    word: &'a str,
    word_len: usize,
    dict: &'a Dictionary,
    options: DecodeOptions,
    stats: SearchStats,
}

impl Search<'_> {
    fn run(&mut self) -> Result<Vec<SeqJoin>> {
        let (word, dict) = (self.word, self.dict);
        let mut found = Vec::new();

        // A. Dictionary words.
        for dict_word in dict.words_for(word) {
            let check_len = char_len(dict_word.surface()).saturating_sub(3);
            if prefix(word, check_len) != prefix(dict_word.surface(), check_len) {
                continue;
            }
            let start = SeqJoin::from_word(Arc::clone(dict_word));
            if dict_word.surface() == word {
                found.push(start.clone());
            }
            found.extend(self.cliticdecode(&start, 0)?);
        }

        // B. Numerals replace everything else; abbreviations add to it.
        if word.starts_with(|c: char| c.is_ascii_digit()) {
            let start = numeral_stem(word)?;
            return self.subdecode(&start, 0);
        }
        if is_abbreviated(word) {
            for abbr in ABBREVIATIONS.iter().filter(|a| word.starts_with(*a)) {
                let protected_len = char_len(abbr) + 1;
                let stem = Stem::new(*abbr, hyphen_rule()).protected(protected_len);
                found.extend(self.subdecode(&SeqJoin::from_stem(Arc::new(stem), protected_len), 0)?);
            }
            return Ok(found);
        }

        // C. Lexicon stems.
        for stem in dict.stem_candidates(word) {
            let protected_len = stem.protected_len();
            found.extend(self.subdecode(&SeqJoin::from_stem(stem, protected_len), 0)?);
        }
        Ok(found)
    }

    /// Try every ending and every plausible affix on an open stem.
    fn subdecode(&mut self, seq: &SeqJoin, depth: usize) -> Result<Vec<SeqJoin>> {
        if self.options.max_depth.map_or(false, |max| depth > max) {
            return Ok(Vec::new());
        }
        self.count(depth);

        let Joined::Stem(stem) = &seq.repr else {
            return Ok(Vec::new());
        };
        let (word, dict) = (self.word, self.dict);
        let surface = stem.surface();
        // The last letters of the surface may still change under sandhi.
        let unstable = if stem.right().kind.is_metathesis() { 4 } else { 3 };
        let fixed = char_len(surface).saturating_sub(unstable);
        if self.word_len <= fixed + 1 || prefix(word, fixed) != prefix(surface, fixed) {
            return Ok(Vec::new());
        }

        let pos = seq.last().and_then(Morpheme::right_pos);
        let stem_len = char_len(stem.form());
        let mut found = Vec::new();

        for ending in dict.endings().for_pos(pos) {
            let ending_len = char_len(ending.form());
            if ending_len + stem_len > self.word_len + 5 {
                continue;
            }
            let add_len = if ending.has_epenthesis() {
                ending_len.saturating_sub(3).max(2)
            } else {
                ending_len.saturating_sub(1).max(2)
            };
            let checked = fixed + add_len;
            for joined in seq.extend(Morpheme::NonStem(Arc::clone(ending)))? {
                if joined.surface() == word {
                    // No enclitic leaves a word unchanged.
                    found.push(joined);
                } else if ending_len <= 2 || prefix(joined.surface(), checked) == prefix(word, checked) {
                    found.extend(self.cliticdecode(&joined, depth + 1)?);
                }
            }
        }

        let lookahead = window(word, fixed + 2, fixed + 6);
        let initials = dict.guess_table().initials(lookahead);
        for i in dict.affix_index().candidates(pos, &initials) {
            let affix = &dict.affixes()[i];
            if char_len(affix.form()) + stem_len > self.word_len + 5 {
                continue;
            }
            for next in seq.extend(Morpheme::NonStem(Arc::clone(affix)))? {
                found.extend(self.subdecode(&next, depth + 1)?);
            }
        }
        Ok(found)
    }

    /// Attach enclitics to a closed word.
    fn cliticdecode(&mut self, seq: &SeqJoin, depth: usize) -> Result<Vec<SeqJoin>> {
        let (word, dict) = (self.word, self.dict);
        let last_char = word.chars().last();
        let after_verb_ending = seq.last().map_or(false, Morpheme::is_verb_ending);
        let mut found = Vec::new();

        for enc in dict.enclitics() {
            let morpheme = Morpheme::Enclitic(Arc::clone(enc));
            if !enc.is_derivational() {
                if enc.form().chars().last() != last_char {
                    continue;
                }
                found.extend(
                    seq.extend(morpheme)?
                        .into_iter()
                        .filter(|joined| joined.surface() == word),
                );
            } else if !after_verb_ending {
                for next in seq.extend(morpheme)? {
                    found.extend(self.subdecode(&next, depth)?);
                }
            }
        }
        Ok(found)
    }

    fn count(&mut self, depth: usize) {
        self.stats.subdecode_calls += 1;
        match depth {
            0 => self.stats.top_level_calls += 1,
            1 => self.stats.depth_one_calls += 1,
            _ => {}
        }
        self.stats.max_depth = self.stats.max_depth.max(depth);
    }
}

fn hyphen_rule() -> RightRule {
    RightRule::new(RightKind::Hyphen, Some(PartOfSpeech::Noun))
}

/// `kg`, or an abbreviation followed by the joiner.
fn is_abbreviated(word: &str) -> bool {
    ABBREVIATIONS.iter().any(|abbr| {
        word == *abbr
            || word
                .strip_prefix(abbr)
                .map_or(false, |rest| rest.starts_with(JOINER))
    })
}

/// The protected numeral stem of a `<digits>~<letters>` token.
fn numeral_stem(word: &str) -> Result<SeqJoin> {
    let (number, suffix) = word.rsplit_once(JOINER).ok_or_else(|| Error::MalformedNumeral {
        token: word.to_string(),
        reason: "no joiner after the number",
    })?;
    if suffix.is_empty() || !suffix.chars().all(char::is_alphabetic) {
        return Err(Error::MalformedNumeral {
            token: word.to_string(),
            reason: "suffix after the joiner is not alphabetic",
        });
    }
    let protected_len = char_len(number) + 1;
    let stem = Stem::new(number, hyphen_rule()).protected(protected_len);
    Ok(SeqJoin::from_stem(Arc::new(stem), protected_len))
}

/// Remove hypotheses that render identically.
fn dedup_hypotheses(hypotheses: &mut Vec<Hypothesis>) {
    let mut seen = HashSet::new();
    hypotheses.retain(|h| seen.insert(format!("{}|{}", h.plain, h.annotated)));
}
