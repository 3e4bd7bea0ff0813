pub mod error;
pub mod phonology;
pub mod sandhi;
pub mod morpheme;
pub mod join;
pub mod sequence;
pub mod tables;
pub mod types;
pub mod dictionary;
pub mod morphology;
pub mod sentence;
pub mod output;

pub use dictionary::Dictionary;
pub use error::{Error, Result};
pub use morphology::{decode, decode_with, parse_word, parse_word_with};
pub use sentence::{parse_sentence, parse_sentence_with};
pub use types::{DecodeOptions, Hypothesis, SearchStats, SentenceParse, WordParse};
