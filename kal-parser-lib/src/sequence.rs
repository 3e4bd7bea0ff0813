// Morpheme sequences and their incremental realizations.

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::morpheme::{Joined, Morpheme, Stem, Word};
use crate::output::{render_annotated, render_plain};

/// An ordered chain of morphemes from one root.
#[derive(Debug, Clone)]
pub struct MorphemeSeq {
    pub morphemes: Vec<Morpheme>,
    pub protected_len: usize,
}

impl MorphemeSeq {
    pub fn new(morphemes: Vec<Morpheme>, protected_len: usize) -> Self {
        Self {
            morphemes,
            protected_len,
        }
    }

    pub fn extend(&self, morpheme: Morpheme) -> MorphemeSeq {
        let mut morphemes = self.morphemes.clone();
        morphemes.push(morpheme);
        MorphemeSeq::new(morphemes, self.protected_len)
    }

    /// Re-synthesize every realization of the sequence from scratch.
    pub fn join(&self) -> Result<Vec<Joined>> {
        let (first, rest) = self.morphemes.split_first().ok_or(Error::InvalidJoin {
            left: "nothing",
            right: "sequence",
        })?;
        let mut joined = vec![start(first)?];
        for morpheme in rest {
            let mut next = Vec::new();
            for prior in &joined {
                next.extend(join_one(prior, morpheme)?);
            }
            joined = next;
        }
        Ok(joined)
    }

    /// Plain rendering, e.g. `iglu-t`.
    pub fn plain(&self) -> String {
        render_plain(&self.morphemes)
    }

    /// Annotated rendering, e.g. `{iglu}N{t}`.
    pub fn annotated(&self) -> String {
        render_annotated(&self.morphemes)
    }
}

fn start(morpheme: &Morpheme) -> Result<Joined> {
    match morpheme {
        Morpheme::Stem(stem) => Ok(Joined::Stem(Stem::clone(stem))),
        Morpheme::Word(word) => Ok(Joined::Word(Word::clone(word))),
        other => Err(Error::InvalidJoin {
            left: "nothing",
            right: other.kind_name(),
        }),
    }
}

fn join_one(prior: &Joined, morpheme: &Morpheme) -> Result<Vec<Joined>> {
    match (prior, morpheme) {
        (Joined::Stem(stem), Morpheme::NonStem(next)) => stem.join(next),
        (Joined::Word(word), Morpheme::Enclitic(enc)) => Ok(word.join(enc)),
        (prior, morpheme) => Err(Error::InvalidJoin {
            left: prior.kind_name(),
            right: morpheme.kind_name(),
        }),
    }
}

/// A sequence paired with one concrete realization of it.
#[derive(Debug, Clone)]
pub struct SeqJoin {
    pub seq: MorphemeSeq,
    pub repr: Joined,
}

impl SeqJoin {
    pub fn from_stem(stem: Arc<Stem>, protected_len: usize) -> Self {
        let repr = Joined::Stem(Stem::clone(&stem));
        Self {
            seq: MorphemeSeq::new(vec![Morpheme::Stem(stem)], protected_len),
            repr,
        }
    }

    pub fn from_word(word: Arc<Word>) -> Self {
        let repr = Joined::Word(Word::clone(&word));
        Self {
            seq: MorphemeSeq::new(vec![Morpheme::Word(word)], 0),
            repr,
        }
    }

    /// One step further: every realization of the sequence with `morpheme`
    /// appended, computed from this realization only.
    pub fn extend(&self, morpheme: Morpheme) -> Result<Vec<SeqJoin>> {
        let seq = self.seq.extend(morpheme.clone());
        let joined = join_one(&self.repr, &morpheme)?;
        Ok(joined
            .into_iter()
            .map(|repr| SeqJoin {
                seq: seq.clone(),
                repr,
            })
            .collect())
    }

    pub fn surface(&self) -> &str {
        self.repr.surface()
    }

    pub fn last(&self) -> Option<&Morpheme> {
        self.seq.morphemes.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morpheme::{Enclitic, Form, NonStem};
    use crate::sandhi::{EncliticKind, LeftKind, LeftRule, PartOfSpeech, RightKind, RightRule};

    fn iglu() -> Arc<Stem> {
        Arc::new(Stem::new(
            "iglu",
            RightRule::new(RightKind::Default, Some(PartOfSpeech::Noun)),
        ))
    }

    fn plural() -> Morpheme {
        Morpheme::NonStem(Arc::new(NonStem::noun_ending("t", LeftRule::new(LeftKind::Plural))))
    }

    #[test]
    fn test_extend_then_join_agree() {
        let start = SeqJoin::from_stem(iglu(), 0);
        let extended = start.extend(plural()).unwrap();
        assert_eq!(extended.len(), 1);
        assert_eq!(extended[0].surface(), "illut");
        let rejoined = extended[0].seq.join().unwrap();
        assert_eq!(rejoined[0].surface(), "illut");
    }

    #[test]
    fn test_invalid_join() {
        let start = SeqJoin::from_stem(iglu(), 0);
        let enc = Morpheme::Enclitic(Arc::new(Enclitic::plain("lu", EncliticKind::Plain)));
        assert!(matches!(start.extend(enc), Err(Error::InvalidJoin { left: "stem", .. })));
    }

    #[test]
    fn test_word_takes_enclitic() {
        let word = Arc::new(Word::new(Form::new("aap")));
        let start = SeqJoin::from_word(word);
        let enc = Morpheme::Enclitic(Arc::new(Enclitic::plain("lu", EncliticKind::Plain)));
        let joined = start.extend(enc).unwrap();
        assert_eq!(joined[0].surface(), "aallu");
        assert_eq!(joined[0].seq.plain(), "aap=lu");
    }

    #[test]
    fn test_empty_sequence_does_not_join() {
        let seq = MorphemeSeq::new(Vec::new(), 0);
        assert!(seq.join().is_err());
    }
}
