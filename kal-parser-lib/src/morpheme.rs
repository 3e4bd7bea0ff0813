// Morpheme types.
//
// A morpheme is an abstract form plus the sandhi rules on its boundaries.
// Stems and words are the results of joins; affixes, endings and enclitics
// are the static pieces that get attached to them.

use std::sync::{Arc, OnceLock};

use crate::error::{Error, Result};
use crate::phonology::{drop_last, ends_with_consonant, nth_from_end, realize, skip, Realization, EPENTHESIS};
use crate::sandhi::{
    EncliticKind, EncliticRule, LeftKind, LeftRule, PartOfSpeech, RightRule, WordRule,
};

/// An abstract form with its memoized realizations.
#[derive(Debug, Clone)]
pub struct Form {
    text: String,
    protected_len: usize,
    form_is_sound: bool,
    greenlandic_i: bool,
    realized: OnceLock<Realization>,
}

impl Form {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            protected_len: 0,
            form_is_sound: false,
            greenlandic_i: false,
            realized: OnceLock::new(),
        }
    }

    pub fn protected(mut self, protected_len: usize) -> Self {
        self.protected_len = protected_len;
        self
    }

    /// Mark the text as already phonemic, skipping the sound rewrites.
    pub fn as_sound(mut self) -> Self {
        self.form_is_sound = true;
        self
    }

    pub fn with_greenlandic_i(mut self, greenlandic_i: bool) -> Self {
        self.greenlandic_i = greenlandic_i;
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn protected_len(&self) -> usize {
        self.protected_len
    }

    pub fn greenlandic_i(&self) -> bool {
        self.greenlandic_i
    }

    fn realization(&self) -> &Realization {
        self.realized
            .get_or_init(|| realize(&self.text, self.protected_len, self.form_is_sound))
    }

    pub fn sound_surface(&self) -> &str {
        &self.realization().sound
    }

    pub fn surface(&self) -> &str {
        &self.realization().surface
    }
}

// ---------------------------------------------------------------------------
// Stem
// ---------------------------------------------------------------------------

/// Consonant doubling used by geminating stems.
fn geminate(c: char) -> Option<char> {
    match c {
        'v' => Some('p'),
        'l' => Some('l'),
        'j' => Some('s'),
        'g' => Some('k'),
        'r' | 'q' => Some('q'),
        'm' => Some('m'),
        't' => Some('t'),
        _ => None,
    }
}

/// A lexical root, or the open result of joining affixes onto one.
#[derive(Debug, Clone)]
pub struct Stem {
    form: Form,
    right: RightRule,
}

impl Stem {
    /// A stem whose consonant-final flag is read off `form`.
    pub fn new(form: impl Into<String>, right: RightRule) -> Self {
        let form = Form::new(form);
        let right = right.shaped(form.text());
        Self { form, right }
    }

    /// A stem carrying `right` exactly as given.
    pub fn with_rule(form: Form, right: RightRule) -> Self {
        Self { form, right }
    }

    pub fn protected(mut self, protected_len: usize) -> Self {
        self.form = self.form.protected(protected_len);
        self
    }

    pub fn with_greenlandic_i(mut self, greenlandic_i: bool) -> Self {
        self.form = self.form.with_greenlandic_i(greenlandic_i);
        self
    }

    /// Same stem over another form.
    pub(crate) fn with_form(&self, text: String) -> Stem {
        let form = Form::new(text)
            .protected(self.form.protected_len)
            .with_greenlandic_i(self.form.greenlandic_i);
        Stem::with_rule(form, self.right.clone())
    }

    pub fn form(&self) -> &str {
        self.form.text()
    }

    pub fn right(&self) -> &RightRule {
        &self.right
    }

    pub fn protected_len(&self) -> usize {
        self.form.protected_len()
    }

    pub fn greenlandic_i(&self) -> bool {
        self.form.greenlandic_i()
    }

    pub fn surface(&self) -> &str {
        self.form.surface()
    }

    pub fn sound_surface(&self) -> &str {
        self.form.sound_surface()
    }

    /// The form without its last phoneme, whatever it is.
    pub fn dropped(&self) -> &str {
        drop_last(self.form(), 1)
    }

    /// The consonant before the final vowel doubled, final phoneme dropped:
    /// `ujarak` → `ujaqqa`.
    pub fn geminated(&self) -> Result<String> {
        let form = self.form();
        let doubled = nth_from_end(form, 3).and_then(geminate);
        let vowel = nth_from_end(form, 2);
        match (doubled, vowel) {
            (Some(c), Some(v)) => Ok(format!("{}{c}{c}{v}", drop_last(form, 3))),
            _ => Err(Error::DerivedForm {
                form: form.to_string(),
                operation: "geminated",
            }),
        }
    }

    /// Final `q` → `r`, final `k` → `ŋ`.
    pub fn weakened(&self) -> Result<String> {
        let form = self.form();
        match form.chars().last() {
            Some('q') => Ok(format!("{}r", self.dropped())),
            Some('k') => Ok(format!("{}ŋ", self.dropped())),
            _ => Err(Error::DerivedForm {
                form: form.to_string(),
                operation: "weakened",
            }),
        }
    }
}

// ---------------------------------------------------------------------------
// Word
// ---------------------------------------------------------------------------

/// A fully inflected unit that can take enclitics.
#[derive(Debug, Clone)]
pub struct Word {
    form: Form,
    right: WordRule,
}

impl Word {
    pub fn new(form: Form) -> Self {
        let right = WordRule {
            cons_end: ends_with_consonant(form.text()),
        };
        Self { form, right }
    }

    pub fn form(&self) -> &str {
        self.form.text()
    }

    pub fn right(&self) -> &WordRule {
        &self.right
    }

    pub fn protected_len(&self) -> usize {
        self.form.protected_len()
    }

    pub fn greenlandic_i(&self) -> bool {
        self.form.greenlandic_i()
    }

    pub fn surface(&self) -> &str {
        self.form.surface()
    }

    pub fn sound_surface(&self) -> &str {
        self.form.sound_surface()
    }
}

// ---------------------------------------------------------------------------
// Affixes and endings
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NonStemKind {
    /// A derivational affix; the right rule passes on to the stems it builds.
    Affix(RightRule),
    NounEnding,
    VerbEnding,
}

/// An affix or an ending.
#[derive(Debug, Clone)]
pub struct NonStem {
    form: Form,
    left: LeftRule,
    kind: NonStemKind,
}

impl NonStem {
    pub fn affix(form: &str, left: LeftRule, right: RightRule) -> Self {
        Self {
            form: Form::new(form),
            left: left.shaped(form),
            kind: NonStemKind::Affix(right.shaped(form)),
        }
    }

    pub fn noun_ending(form: &str, left: LeftRule) -> Self {
        let mut left = left.shaped(form).pos(Some(PartOfSpeech::Noun));
        left.weakening = form == "p" || form == "t" || (!left.cons_start && !form.is_empty());
        Self {
            form: Form::new(form),
            left,
            kind: NonStemKind::NounEnding,
        }
    }

    pub fn verb_ending(form: &str, left: LeftRule) -> Self {
        Self {
            form: Form::new(form),
            left: left.shaped(form).pos(Some(PartOfSpeech::Verb)),
            kind: NonStemKind::VerbEnding,
        }
    }

    pub fn form(&self) -> &str {
        self.form.text()
    }

    pub fn left(&self) -> &LeftRule {
        &self.left
    }

    pub fn kind(&self) -> &NonStemKind {
        &self.kind
    }

    /// Right rule of an affix; endings have none.
    pub fn right(&self) -> Option<&RightRule> {
        match &self.kind {
            NonStemKind::Affix(rule) => Some(rule),
            NonStemKind::NounEnding | NonStemKind::VerbEnding => None,
        }
    }

    pub fn is_ending(&self) -> bool {
        !matches!(self.kind, NonStemKind::Affix(_))
    }

    pub fn is_noun_ending(&self) -> bool {
        self.kind == NonStemKind::NounEnding
    }

    pub fn is_verb_ending(&self) -> bool {
        self.kind == NonStemKind::VerbEnding
    }

    pub fn has_epenthesis(&self) -> bool {
        self.form().contains(EPENTHESIS)
    }

    /// The form after the epenthesis marker (the whole form without one).
    pub fn chunk(&self) -> &str {
        after_epenthesis(self.form())
    }

    /// The form with the epenthesis marker removed.
    pub fn unmarked(&self) -> String {
        self.form().replace(EPENTHESIS, "")
    }

    pub(crate) fn has_left_kind(&self, kind: LeftKind) -> bool {
        self.left.kind == kind
    }
}

fn after_epenthesis(form: &str) -> &str {
    match form.find(EPENTHESIS) {
        Some(i) => skip(&form[i..], 1),
        None => form,
    }
}

// ---------------------------------------------------------------------------
// Enclitics
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct Enclitic {
    form: Form,
    left: EncliticRule,
    /// Present on derivational enclitics, which reopen the stem chain.
    right: Option<RightRule>,
}

impl Enclitic {
    pub fn plain(form: &str, kind: EncliticKind) -> Self {
        Self {
            form: Form::new(form),
            left: EncliticRule::new(kind, false).shaped(form),
            right: None,
        }
    }

    pub fn derivational(form: &str, truncative: bool, right: RightRule) -> Self {
        Self {
            form: Form::new(form),
            left: EncliticRule::new(EncliticKind::Plain, truncative).shaped(form),
            right: Some(right.shaped(form)),
        }
    }

    pub fn form(&self) -> &str {
        self.form.text()
    }

    pub fn left(&self) -> &EncliticRule {
        &self.left
    }

    pub fn right(&self) -> Option<&RightRule> {
        self.right.as_ref()
    }

    pub fn is_derivational(&self) -> bool {
        self.right.is_some()
    }

    pub fn chunk(&self) -> &str {
        after_epenthesis(self.form())
    }
}

// ---------------------------------------------------------------------------
// Sequence elements
// ---------------------------------------------------------------------------

/// One element of a morpheme sequence.
#[derive(Debug, Clone)]
pub enum Morpheme {
    Stem(Arc<Stem>),
    Word(Arc<Word>),
    NonStem(Arc<NonStem>),
    Enclitic(Arc<Enclitic>),
}

impl Morpheme {
    pub fn form(&self) -> &str {
        match self {
            Morpheme::Stem(m) => m.form(),
            Morpheme::Word(m) => m.form(),
            Morpheme::NonStem(m) => m.form(),
            Morpheme::Enclitic(m) => m.form(),
        }
    }

    pub fn is_enclitic(&self) -> bool {
        matches!(self, Morpheme::Enclitic(_))
    }

    /// Part of speech a following morpheme attaches to.
    pub fn right_pos(&self) -> Option<PartOfSpeech> {
        match self {
            Morpheme::Stem(m) => m.right().pos,
            Morpheme::NonStem(m) => m.right().and_then(|r| r.pos),
            Morpheme::Enclitic(m) => m.right().and_then(|r| r.pos),
            Morpheme::Word(_) => None,
        }
    }

    pub fn is_verb_ending(&self) -> bool {
        matches!(self, Morpheme::NonStem(m) if m.is_verb_ending())
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Morpheme::Stem(_) => "stem",
            Morpheme::Word(_) => "word",
            Morpheme::NonStem(m) if m.is_ending() => "ending",
            Morpheme::NonStem(_) => "affix",
            Morpheme::Enclitic(_) => "enclitic",
        }
    }
}

/// The concrete outcome of a join.
#[derive(Debug, Clone)]
pub enum Joined {
    Stem(Stem),
    Word(Word),
}

impl Joined {
    pub fn form(&self) -> &str {
        match self {
            Joined::Stem(s) => s.form(),
            Joined::Word(w) => w.form(),
        }
    }

    pub fn surface(&self) -> &str {
        match self {
            Joined::Stem(s) => s.surface(),
            Joined::Word(w) => w.surface(),
        }
    }

    pub(crate) fn kind_name(&self) -> &'static str {
        match self {
            Joined::Stem(_) => "stem",
            Joined::Word(_) => "word",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandhi::RightKind;

    #[test]
    fn test_surface_is_memoized() {
        let form = Form::new("iglut");
        let first = form.surface().as_ptr();
        assert_eq!(form.surface(), "illut");
        assert_eq!(form.surface().as_ptr(), first);
    }

    #[test]
    fn test_geminated() {
        let stem = Stem::new("ujarak", RightRule::new(RightKind::Gem, None));
        assert_eq!(stem.geminated().unwrap(), "ujaqqa");
        let stem = Stem::new("imaq", RightRule::new(RightKind::Gem, None));
        assert_eq!(stem.geminated().unwrap(), "imma");
    }

    #[test]
    fn test_geminated_precondition() {
        let stem = Stem::new("iglu", RightRule::new(RightKind::Default, None));
        assert!(matches!(stem.geminated(), Err(Error::DerivedForm { .. })));
    }

    #[test]
    fn test_weakened() {
        let stem = Stem::new("kiglək", RightRule::new(RightKind::Weakenable, None));
        assert_eq!(stem.weakened().unwrap(), "kigləŋ");
        let stem = Stem::new("iglu", RightRule::new(RightKind::Default, None));
        assert!(stem.weakened().is_err());
    }

    #[test]
    fn test_cons_end_read_off_form() {
        let stem = Stem::new("qaammat", RightRule::new(RightKind::Default, None));
        assert!(stem.right().cons_end);
        let word = Word::new(Form::new("iglu"));
        assert!(!word.right().cons_end);
    }

    #[test]
    fn test_noun_ending_weakening() {
        let plural = NonStem::noun_ending("t", LeftRule::new(LeftKind::Plural));
        assert!(plural.left().weakening);
        let vowel = NonStem::noun_ending("a", LeftRule::new(LeftKind::Default));
        assert!(vowel.left().weakening);
        let mik = NonStem::noun_ending("mik", LeftRule::new(LeftKind::Default));
        assert!(!mik.left().weakening);
        let empty = NonStem::noun_ending("", LeftRule::new(LeftKind::Default));
        assert!(!empty.left().weakening);
    }

    #[test]
    fn test_double_consonant_flag() {
        let ssa = NonStem::affix(
            "ssa",
            LeftRule::new(LeftKind::Default).truncative(true),
            RightRule::new(RightKind::Ssa, Some(PartOfSpeech::Verb)),
        );
        assert!(ssa.left().double_cons);
        let epenthetic = NonStem::verb_ending("m^mat", LeftRule::new(LeftKind::Default));
        assert!(!epenthetic.left().double_cons);
        assert_eq!(epenthetic.chunk(), "mat");
        assert_eq!(epenthetic.unmarked(), "mmat");
    }
}
