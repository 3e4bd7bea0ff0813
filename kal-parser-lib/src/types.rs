use serde::{Deserialize, Serialize};

use crate::sandhi::PartOfSpeech;

/// Role of a morpheme within a word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MorphemeRole {
    Stem,
    /// A whole dictionary word.
    Word,
    Affix,
    Ending,
    Enclitic,
}

/// A single morpheme in a decomposition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Component {
    /// Underlying form (e.g., {iglu}, {ðaq}, {q^vut}).
    pub form: String,
    pub role: MorphemeRole,
    /// Part of speech the morpheme attaches to (stems: the one it offers).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pos: Option<PartOfSpeech>,
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub truncative: bool,
}

/// One way a word decomposes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Hypothesis {
    pub components: Vec<Component>,
    /// Plain segmentation, e.g. `iglu-t`.
    pub plain: String,
    /// Annotated segmentation, e.g. `{iglu}N{t}`.
    pub annotated: String,
}

/// Counters describing one decode search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Stem expansions tried in total.
    pub subdecode_calls: usize,
    /// Expansions started directly from a lexicon stem.
    pub top_level_calls: usize,
    /// Expansions one morpheme below a lexicon stem.
    pub depth_one_calls: usize,
    /// Deepest recursion reached.
    pub max_depth: usize,
}

/// Tuning knobs for the decode search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecodeOptions {
    /// Stop expanding below this depth. `None` searches until the length
    /// checks give out.
    pub max_depth: Option<usize>,
}

/// All hypotheses for a single word.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WordParse {
    pub word: String,
    pub hypotheses: Vec<Hypothesis>,
    /// Set when the token could not be analysed at all (e.g. a malformed
    /// numeral); an empty `hypotheses` alone just means no parse.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<SearchStats>,
}

/// All word parses for a sentence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SentenceParse {
    pub input: String,
    pub words: Vec<WordParse>,
}
