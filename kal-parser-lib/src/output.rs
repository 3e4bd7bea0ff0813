// Output formatting for morpheme sequences and parse results.

use crate::morpheme::{Morpheme, NonStemKind};
use crate::phonology::{drop_last, JOINER};
use crate::sandhi::pos_tag;
use crate::types::*;

/// Plain segmentation.
///
/// Format:
///   Stem and affix boundaries: `-`   (`iglu-t`)
///   Enclitic boundaries:       `=`   (`aap=lu`)
///   Empty endings render nothing     (`qaammat`)
pub fn render_plain(morphemes: &[Morpheme]) -> String {
    let Some((last, prior)) = morphemes.split_last() else {
        return String::new();
    };
    if last.is_enclitic() {
        return format!("{}={}", render_plain(prior), last.form());
    }
    if last.form().is_empty() {
        return render_plain(prior);
    }
    if !prior.is_empty() {
        return format!("{}-{}", render_plain(prior), last.form());
    }
    match last.form().strip_suffix(JOINER) {
        Some(stripped) => stripped.to_string(),
        None => last.form().to_string(),
    }
}

/// Annotated segmentation with part-of-speech tags on every boundary.
///
/// A morpheme's left tag replaces the right tag of its predecessor, so
/// `{iglu}N` followed by `N{t}` renders as `{iglu}N{t}`.
pub fn render_annotated(morphemes: &[Morpheme]) -> String {
    let Some((last, prior)) = morphemes.split_last() else {
        return String::new();
    };
    if prior.is_empty() {
        return match last.form().strip_suffix(JOINER) {
            Some(stripped) => format!("{{{stripped}}}?"),
            None => annotation(last),
        };
    }
    let prior = render_annotated(prior);
    if last.is_enclitic() {
        return prior + &annotation(last);
    }
    if last.form().is_empty() {
        return format!("{}N{{∅}}", drop_last(&prior, 1));
    }
    format!("{}{}", drop_last(&prior, 1), annotation(last))
}

/// Annotation of a single morpheme.
pub fn annotation(morpheme: &Morpheme) -> String {
    match morpheme {
        Morpheme::Word(w) => format!("{{{}}}", w.form()),
        Morpheme::Stem(s) => format!("{{{}}}{}", s.form(), pos_tag(s.right().pos)),
        Morpheme::NonStem(m) => {
            let left = pos_tag(m.left().pos);
            let trunc = if m.left().truncative { "-" } else { "" };
            match m.kind() {
                NonStemKind::Affix(right) => {
                    format!("{left}{{{trunc}{}}}{}", m.form(), pos_tag(right.pos))
                }
                NonStemKind::NounEnding | NonStemKind::VerbEnding => {
                    format!("{left}{{{trunc}{}}}", m.form())
                }
            }
        }
        Morpheme::Enclitic(e) => {
            let trunc = if e.left().truncative { "-" } else { "" };
            let right = e
                .right()
                .and_then(|r| r.pos)
                .map(|pos| pos_tag(Some(pos)).to_string())
                .unwrap_or_default();
            format!("*{{{trunc}{}}}{right}", e.form())
        }
    }
}

/// Structured description of a single morpheme.
pub fn component(morpheme: &Morpheme) -> Component {
    match morpheme {
        Morpheme::Word(w) => Component {
            form: w.form().to_string(),
            role: MorphemeRole::Word,
            pos: None,
            truncative: false,
        },
        Morpheme::Stem(s) => Component {
            form: s.form().to_string(),
            role: MorphemeRole::Stem,
            pos: s.right().pos,
            truncative: false,
        },
        Morpheme::NonStem(m) => Component {
            form: m.form().to_string(),
            role: if m.is_ending() {
                MorphemeRole::Ending
            } else {
                MorphemeRole::Affix
            },
            pos: m.left().pos,
            truncative: m.left().truncative,
        },
        Morpheme::Enclitic(e) => Component {
            form: e.form().to_string(),
            role: MorphemeRole::Enclitic,
            pos: e.right().and_then(|r| r.pos),
            truncative: e.left().truncative,
        },
    }
}

/// Format a sentence parse one token per line, alternatives joined by ` | `.
pub fn sentence_to_lines(parse: &SentenceParse, annotated: bool) -> String {
    parse
        .words
        .iter()
        .map(|wp| {
            let alternatives = wp
                .hypotheses
                .iter()
                .map(|h| if annotated { h.annotated.as_str() } else { h.plain.as_str() })
                .collect::<Vec<_>>();
            if let Some(err) = &wp.error {
                return format!("{}\t! {err}", wp.word);
            }
            if alternatives.is_empty() {
                return format!("{}\t?", wp.word);
            }
            format!("{}\t{}", wp.word, alternatives.join(" | "))
        })
        .collect::<Vec<_>>()
        .join("\n")
}
