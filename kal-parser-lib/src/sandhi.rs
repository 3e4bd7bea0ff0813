// Sandhi rules: how two adjacent morphemes reshape each other.
//
// Every boundary is handled from both sides. The morpheme on the left asks
// its right rule how it surfaces before its neighbour; the morpheme on the
// right asks its left rule how it surfaces after the stem. Each side answers
// with one fragment or two (a free alternation). Rule kinds form a closed
// set; a kind whose special condition does not hold falls back to the
// default behaviour of its polarity.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::morpheme::{Enclitic, NonStem, Stem, Word};
use crate::phonology::{
    char_len, drop_last, ends_with_consonant, nth_from_end, skip, starts_with_consonant,
    starts_with_double_consonant, EPENTHESIS,
};

/// Part-of-speech tag a rule carries on its side of a boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PartOfSpeech {
    Noun,
    Verb,
}

/// One-letter tag used in annotated renderings (`?` when untagged).
pub fn pos_tag(pos: Option<PartOfSpeech>) -> char {
    match pos {
        Some(PartOfSpeech::Noun) => 'N',
        Some(PartOfSpeech::Verb) => 'V',
        None => '?',
    }
}

// ---------------------------------------------------------------------------
// Fragments and the alternation arity contract
// ---------------------------------------------------------------------------

/// Candidate realizations of one side of a boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Fragments {
    One(String),
    /// A free alternation between two realizations.
    Two(String, String),
}

impl Fragments {
    fn one(s: impl Into<String>) -> Self {
        Fragments::One(s.into())
    }

    fn two(a: impl Into<String>, b: impl Into<String>) -> Self {
        Fragments::Two(a.into(), b.into())
    }

    pub fn len(&self) -> usize {
        match self {
            Fragments::One(_) => 1,
            Fragments::Two(..) => 2,
        }
    }

    pub fn first(&self) -> &str {
        match self {
            Fragments::One(a) | Fragments::Two(a, _) => a,
        }
    }

    pub fn is_single(&self, s: &str) -> bool {
        matches!(self, Fragments::One(a) if a == s)
    }

    pub fn into_vec(self) -> Vec<String> {
        match self {
            Fragments::One(a) => vec![a],
            Fragments::Two(a, b) => vec![a, b],
        }
    }

    /// Combine the left side's fragments with the right side's.
    ///
    /// A single fragment is paired with every fragment of the other side. Two
    /// alternations on both sides are correlated and are paired by position,
    /// never crossed.
    pub fn combine(left: Fragments, right: Fragments) -> Vec<String> {
        match (left, right) {
            (Fragments::Two(l1, l2), Fragments::Two(r1, r2)) => {
                vec![l1 + &r1, l2 + &r2]
            }
            (left, right) => {
                let rights = right.into_vec();
                left.into_vec()
                    .into_iter()
                    .flat_map(|l| rights.iter().map(move |r| format!("{l}{r}")))
                    .collect()
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Rule kinds
// ---------------------------------------------------------------------------

/// Left-boundary behaviour of affixes and endings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeftKind {
    Default,
    /// Plural absolutive/ergative `-t`.
    Plural,
    /// Singular ergative `-p`.
    SgErg,
    /// Passive participle `-ðaq`.
    PassPart,
    /// The `-ði`/`-ci`/`-i` morpheme.
    Htr,
    /// Participial `ðu…` endings.
    ActPart,
    /// Imperative `-guk`.
    Guk,
    /// Imperative `-guk` with its `g` elided after vowels.
    GukElided,
    /// `-təl…` stems surface as `-s…` before these.
    Replace,
    /// `l^l…`, `va…`, `v^vu…`, `vi…` verb endings after `-gə` stems.
    VGeDrop,
    /// `vu…` endings after `-ssa`.
    SsaDrop,
    /// `-g^innaq`.
    Ginnaq,
    /// `-(gi)jaqtuq`.
    GiJaqtuq,
    Juaq,
    /// 3PL.POSS.PL.ABS `-i(t)`.
    ThirdPlPossPl,
    /// Truncates the final `t` of t-deleting stems.
    TTrunc,
}

/// Right-boundary behaviour of stems and of affixes once they become stems.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RightKind {
    Default,
    KStem,
    Marluk,
    WeakQStem,
    /// Strong q-stems and the rare strong k-stems.
    Weakenable,
    Gem,
    Usiq,
    Type1Metathesis,
    Type2Metathesis,
    AqDrop,
    /// Stems in `-tə`.
    Te,
    SchwaElide,
    /// `-gə` (have as), `-qə` (very) and stems derived from them.
    Ge,
    /// Marks a preceding `-ssa`.
    Ssa,
    /// Habitual `-ðaq`.
    HabDup,
    /// Stems in `-it`/`-ət` before participial endings.
    TcTrigger,
    TDeleting,
    /// Numerals and abbreviations joined with a hyphen.
    Hyphen,
}

impl RightKind {
    pub fn is_k_stem(self) -> bool {
        matches!(self, RightKind::KStem | RightKind::Marluk)
    }

    pub fn is_tc_trigger(self) -> bool {
        matches!(self, RightKind::TcTrigger | RightKind::TDeleting)
    }

    pub fn is_metathesis(self) -> bool {
        matches!(self, RightKind::Type1Metathesis | RightKind::Type2Metathesis)
    }
}

/// Left rule of an affix or ending, with the shape flags of its owner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LeftRule {
    pub kind: LeftKind,
    pub pos: Option<PartOfSpeech>,
    pub truncative: bool,
    pub weakening: bool,
    pub cons_start: bool,
    pub double_cons: bool,
}

impl LeftRule {
    pub fn new(kind: LeftKind) -> Self {
        Self {
            kind,
            pos: None,
            truncative: false,
            weakening: false,
            cons_start: false,
            double_cons: false,
        }
    }

    pub fn pos(mut self, pos: Option<PartOfSpeech>) -> Self {
        self.pos = pos;
        self
    }

    pub fn truncative(mut self, truncative: bool) -> Self {
        self.truncative = truncative;
        self
    }

    /// Fill in the shape flags from the owner's form.
    pub(crate) fn shaped(mut self, form: &str) -> Self {
        self.cons_start = starts_with_consonant(form);
        self.double_cons = starts_with_double_consonant(form) && !form.contains(EPENTHESIS);
        self
    }
}

/// Right rule of a stem (or of an affix, inherited by the stems it builds).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RightRule {
    pub kind: RightKind,
    pub pos: Option<PartOfSpeech>,
    pub cons_end: bool,
}

impl RightRule {
    pub fn new(kind: RightKind, pos: Option<PartOfSpeech>) -> Self {
        Self {
            kind,
            pos,
            cons_end: false,
        }
    }

    pub fn cons_end(mut self, cons_end: bool) -> Self {
        self.cons_end = cons_end;
        self
    }

    pub(crate) fn shaped(self, form: &str) -> Self {
        let cons_end = self.cons_end || ends_with_consonant(form);
        self.cons_end(cons_end)
    }
}

/// Left-boundary behaviour of enclitics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EncliticKind {
    Plain,
    /// `=guuq` nasalizes after consonants.
    Guuq,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncliticRule {
    pub kind: EncliticKind,
    pub truncative: bool,
    pub cons_start: bool,
}

impl EncliticRule {
    pub fn new(kind: EncliticKind, truncative: bool) -> Self {
        Self {
            kind,
            truncative,
            cons_start: false,
        }
    }

    pub(crate) fn shaped(mut self, form: &str) -> Self {
        self.cons_start = starts_with_consonant(form);
        self
    }
}

/// Right rule of a word, governing enclitic attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordRule {
    pub cons_end: bool,
}

// ---------------------------------------------------------------------------
// Right joins (stem side)
// ---------------------------------------------------------------------------

/// How `stem` surfaces before `next`.
pub fn right_join(stem: &Stem, next: &NonStem) -> Result<Fragments> {
    let form = stem.form();
    let left = next.left();
    match stem.right().kind {
        RightKind::KStem | RightKind::Marluk => {
            if stem.right().kind == RightKind::Marluk
                && next.is_noun_ending()
                && next.form().starts_with('n')
            {
                return Ok(Fragments::two(form, stem.dropped()));
            }
            if matches!(left.kind, LeftKind::Plural | LeftKind::SgErg) {
                // Nuuk: Nuup.
                if form == "nuuk" && left.kind == LeftKind::SgErg {
                    return Ok(Fragments::one("nu"));
                }
                if form.ends_with("iik") {
                    return Ok(Fragments::one(drop_last(form, 2)));
                }
                return Ok(Fragments::one(stem.dropped()));
            }
            if next.form().starts_with('g') && !left.truncative {
                return Ok(Fragments::one(stem.dropped()));
            }
        }
        RightKind::WeakQStem => {
            if weak_noun_trigger(next) {
                return Ok(Fragments::one(stem.dropped()));
            }
        }
        RightKind::Gem => {
            if weak_noun_trigger(next) {
                return Ok(Fragments::one(stem.geminated()?));
            }
        }
        RightKind::Usiq => {
            if next.is_noun_ending() && left.cons_start && next.form() != "ga" {
                return Ok(Fragments::one(format!("{}tti", drop_last(form, 3))));
            }
        }
        RightKind::Weakenable => {
            if left.weakening {
                return Ok(Fragments::one(stem.weakened()?));
            }
        }
        RightKind::Type1Metathesis => {
            let vowel_noun_ending =
                next.is_noun_ending() && !left.cons_start && !next.form().is_empty();
            if vowel_noun_ending || left.kind == LeftKind::Plural {
                return Ok(Fragments::one(format!("{}qq", drop_last(form, 3))));
            }
        }
        RightKind::Type2Metathesis => {
            let marker = matches!(left.kind, LeftKind::SgErg | LeftKind::Plural);
            let vowel_initial = !left.cons_start && !next.form().is_empty();
            if next.is_noun_ending() && (marker || vowel_initial) {
                let cluster = nth_from_end(form, 3).ok_or_else(|| Error::DerivedForm {
                    form: form.to_string(),
                    operation: "metathesized",
                })?;
                let base = drop_last(form, 3);
                return Ok(Fragments::two(format!("{base}q{cluster}"), format!("{base}ɴɴ")));
            }
        }
        RightKind::AqDrop => {
            let vowel_initial = !left.cons_start && !next.form().is_empty();
            if vowel_initial || matches!(left.kind, LeftKind::Plural | LeftKind::SgErg) {
                return Ok(Fragments::one(drop_last(form, 2)));
            }
        }
        RightKind::Te => {
            if left.kind == LeftKind::Replace {
                return Ok(Fragments::two(drop_last(form, 2), form));
            }
            if matches!(left.kind, LeftKind::PassPart | LeftKind::Htr) {
                return Ok(Fragments::one(format!("{}c", drop_last(form, 2))));
            }
            if matches!(left.kind, LeftKind::Guk | LeftKind::GukElided) {
                return Ok(Fragments::one(drop_last(form, 2)));
            }
            let plain_verbal = left.pos == Some(PartOfSpeech::Verb)
                && !left.truncative
                && !left.double_cons
                && left.kind != LeftKind::PassPart;
            if next.form().is_empty() || plain_verbal || mi_mu_noun_ending(next) {
                if next.has_epenthesis() {
                    return Ok(Fragments::one(drop_last(form, 2)));
                }
                return Ok(Fragments::one(stem.dropped()));
            }
        }
        RightKind::SchwaElide => {
            if mi_mu_noun_ending(next) {
                return Ok(Fragments::one(stem.dropped()));
            }
        }
        RightKind::Ge => {
            if left.kind == LeftKind::VGeDrop {
                // Contemporative: compulsory.
                if next.form().starts_with("l^l") {
                    return Ok(Fragments::one(format!("{}a", stem.dropped())));
                }
                // Avoids a triple vowel: optional.
                if starts_va_vowel(next.form()) {
                    return Ok(Fragments::two(stem.dropped(), form));
                }
            }
        }
        RightKind::HabDup => {
            // The habitual's own ða reappears before the participle.
            if left.kind == LeftKind::PassPart {
                if left.truncative || left.double_cons {
                    return Ok(Fragments::one(format!("{form}ða")));
                }
                return Ok(Fragments::one(format!("{form}ðaq")));
            }
        }
        RightKind::TDeleting if left.kind == LeftKind::TTrunc => {
            return Ok(Fragments::one(drop_last(form, 1)));
        }
        RightKind::TcTrigger | RightKind::TDeleting => {
            if left.kind == LeftKind::ActPart && nth_from_end(form, 2) == Some('i') {
                // The i before the final consonant may surface as ə.
                let schwa_form = format!("{}ə{}", drop_last(form, 2), skip(form, char_len(form) - 1));
                let schwa_stem = stem.with_form(schwa_form);
                let plain = default_right(stem, next)?;
                let schwa = default_right(&schwa_stem, next)?;
                return Ok(Fragments::two(plain.first(), schwa.first()));
            }
        }
        RightKind::Hyphen => {
            if next.form().is_empty() {
                return Ok(Fragments::one(form));
            }
            return Ok(Fragments::two(format!("{form}~"), format!("{form}~i")));
        }
        RightKind::Default | RightKind::Ssa => {}
    }
    default_right(stem, next)
}

/// Default right-boundary behaviour.
fn default_right(stem: &Stem, next: &NonStem) -> Result<Fragments> {
    let form = stem.form();
    let left = next.left();
    if stem.greenlandic_i() {
        if next.form().is_empty() {
            return Ok(Fragments::two(form, format!("{form}i")));
        }
        return Ok(Fragments::one(format!("{form}i")));
    }
    if next.form().is_empty() && form.ends_with('ə') {
        return Ok(Fragments::one(format!("{}i", stem.dropped())));
    }
    if form.ends_with('q') {
        // q + truncative g collapses to r.
        if next.form().starts_with('g') && !next.has_epenthesis() && left.truncative {
            return Ok(Fragments::one(form));
        }
        if left.kind == LeftKind::Htr {
            if form.ends_with("əq") {
                return Ok(Fragments::one(stem.weakened()?));
            }
            return Ok(Fragments::one(stem.dropped()));
        }
    }
    if stem.right().cons_end && (left.truncative || left.double_cons) {
        return Ok(Fragments::one(stem.dropped()));
    }
    Ok(Fragments::one(form))
}

/// Consonant-initial, non-epenthetic noun endings other than `-ga`.
fn weak_noun_trigger(next: &NonStem) -> bool {
    next.is_noun_ending() && next.left().cons_start && !next.has_epenthesis() && next.form() != "ga"
}

fn mi_mu_noun_ending(next: &NonStem) -> bool {
    next.is_noun_ending() && (next.form().starts_with("mi") || next.form().starts_with("mu"))
}

/// `va` followed by one of `a i ə u`.
fn starts_va_vowel(form: &str) -> bool {
    form.strip_prefix("va")
        .and_then(|rest| rest.chars().next())
        .map_or(false, |c| "aiəu".contains(c))
}

// ---------------------------------------------------------------------------
// Left joins (affix/ending side)
// ---------------------------------------------------------------------------

/// How `next` surfaces after `stem`.
pub fn left_join(next: &NonStem, stem: &Stem) -> Result<Fragments> {
    let form = next.form();
    let right = stem.right();
    match next.left().kind {
        LeftKind::Plural => {
            if right.kind.is_k_stem()
                || matches!(
                    right.kind,
                    RightKind::AqDrop | RightKind::Weakenable | RightKind::Type1Metathesis
                )
            {
                return Ok(Fragments::one("it"));
            }
        }
        LeftKind::SgErg => {
            if right.kind.is_k_stem()
                || matches!(
                    right.kind,
                    RightKind::AqDrop
                        | RightKind::Weakenable
                        | RightKind::Type1Metathesis
                        | RightKind::Type2Metathesis
                )
            {
                return Ok(Fragments::one("up"));
            }
        }
        LeftKind::PassPart => {
            if !right.cons_end || right.kind == RightKind::Te {
                return Ok(Fragments::one(format!("c{}", skip(form, 1))));
            }
            if stem.form().ends_with('q') {
                return Ok(Fragments::one(format!("g{}", skip(form, 1))));
            }
            return Ok(Fragments::one(format!("t{}", skip(form, 1))));
        }
        LeftKind::Htr => {
            if stem.form().ends_with(['k', 't']) || right.kind == RightKind::Te {
                return Ok(Fragments::one("ci"));
            }
            if stem.form().ends_with('q') {
                return Ok(Fragments::one("i"));
            }
        }
        LeftKind::ActPart => {
            if right.kind.is_tc_trigger() {
                return Ok(Fragments::two(format!("c{}", skip(form, 1)), form));
            }
        }
        LeftKind::Guk => {
            if !right.cons_end {
                return Ok(Fragments::two(form, format!("j{}", skip(form, 1))));
            }
        }
        LeftKind::GukElided => {
            if !right.cons_end {
                return Ok(Fragments::one(skip(form, 1)));
            }
        }
        LeftKind::Replace => {
            if right.kind == RightKind::Te {
                return Ok(Fragments::two(format!("s{}", skip(form, 1)), form));
            }
        }
        LeftKind::VGeDrop => {
            if right.kind == RightKind::Ge {
                if ["va", "v^vu", "vi"].iter().any(|p| form.starts_with(p)) {
                    let plain = default_left(next, stem);
                    return Ok(Fragments::two(skip(next.chunk(), 1), plain.first()));
                }
                if form.starts_with("l^l") {
                    return Ok(Fragments::one(next.chunk()));
                }
            }
        }
        LeftKind::SsaDrop => {
            if right.kind == RightKind::Ssa {
                return Ok(Fragments::one(skip(form, 1)));
            }
            if right.kind == RightKind::Ge {
                let plain = default_left(next, stem);
                return Ok(Fragments::two(skip(next.chunk(), 1), plain.first()));
            }
        }
        LeftKind::Ginnaq => {
            let peek = right_join(stem, next)?;
            if ends_in_a_diphthong(peek.first()) {
                return Ok(Fragments::one(next.unmarked()));
            }
            return Ok(Fragments::one(next.chunk()));
        }
        LeftKind::GiJaqtuq => {
            if !right.cons_end {
                return Ok(Fragments::one(next.chunk()));
            }
            return Ok(Fragments::one(next.unmarked()));
        }
        LeftKind::Juaq => {
            if right.cons_end {
                return Ok(Fragments::one(format!("t{}", skip(form, 1))));
            }
        }
        LeftKind::ThirdPlPossPl => {
            let peek = right_join(stem, next)?;
            if peek.first().ends_with(['a', 'ə']) {
                return Ok(Fragments::one("at"));
            }
            return Ok(Fragments::one("i"));
        }
        LeftKind::Default | LeftKind::TTrunc => {}
    }
    Ok(default_left(next, stem))
}

/// Default left-boundary behaviour.
fn default_left(next: &NonStem, stem: &Stem) -> Fragments {
    let form = next.form();
    let stem_cons_end = stem.right().cons_end;
    if next.has_epenthesis() {
        if !stem_cons_end {
            return Fragments::one(next.unmarked());
        }
        return Fragments::one(next.chunk());
    }
    // ð only hardens to a protected t after consonants.
    let hardens = form.starts_with('t')
        || (form.starts_with('ð') && stem_cons_end && !next.left().truncative);
    if char_len(form) > 1 && hardens {
        return Fragments::two(form, format!("T{}", skip(form, 1)));
    }
    Fragments::one(form)
}

/// `a` or `ə` followed by one of `a i u ə` at the end.
fn ends_in_a_diphthong(s: &str) -> bool {
    let mut rev = s.chars().rev();
    match (rev.next(), rev.next()) {
        (Some(last), Some(before)) => "aiuə".contains(last) && "aə".contains(before),
        _ => false,
    }
}

// ---------------------------------------------------------------------------
// Word boundary (enclitic attachment)
// ---------------------------------------------------------------------------

/// How `word` surfaces before the enclitic `enc`.
pub fn word_right_join(word: &Word, enc: &Enclitic) -> Fragments {
    let form = if enc.is_derivational() {
        word.form()
    } else {
        word.sound_surface()
    };
    let cons_end = word.right().cons_end;
    let rule = enc.left();
    if rule.truncative && cons_end {
        return Fragments::one(drop_last(form, 1));
    }
    let stop = form.chars().last().and_then(nasal_of);
    if rule.cons_start || (!cons_end && !rule.cons_start) {
        if rule.kind != EncliticKind::Guuq {
            return Fragments::one(form);
        }
        if stop.is_some() {
            return Fragments::one(format!("{}ŋ", drop_last(form, 1)));
        }
        return Fragments::one(form);
    }
    if let Some(nasal) = stop {
        return Fragments::one(format!("{}{nasal}", drop_last(form, 1)));
    }
    // Presumably q-final.
    let base = drop_last(form, 1);
    Fragments::two(format!("{base}r"), format!("{base}ɴ"))
}

fn nasal_of(stop: char) -> Option<char> {
    match stop {
        'p' => Some('m'),
        't' => Some('n'),
        'k' => Some('ŋ'),
        _ => None,
    }
}

/// How the enclitic `enc` surfaces after `word`.
pub fn enclitic_left_join(enc: &Enclitic, word: &Word) -> Fragments {
    let cons_end = word.right().cons_end;
    if enc.left().kind == EncliticKind::Guuq && cons_end && !word.form().ends_with('q') {
        return Fragments::one(format!("ŋ{}", skip(enc.form(), 1)));
    }
    if enc.form().contains(EPENTHESIS) {
        if !cons_end {
            return Fragments::one(enc.form().replace(EPENTHESIS, ""));
        }
        return Fragments::one(enc.chunk());
    }
    Fragments::one(enc.form())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::morpheme::{NonStem, Stem};

    fn noun_stem(form: &str, kind: RightKind) -> Stem {
        Stem::new(form, RightRule::new(kind, Some(PartOfSpeech::Noun)))
    }

    fn noun_ending(form: &str, kind: LeftKind) -> NonStem {
        NonStem::noun_ending(form, LeftRule::new(kind))
    }

    fn verb_stem(form: &str, kind: RightKind) -> Stem {
        Stem::new(form, RightRule::new(kind, Some(PartOfSpeech::Verb)))
    }

    fn verb_affix(form: &str, kind: LeftKind, truncative: bool) -> NonStem {
        NonStem::affix(
            form,
            LeftRule::new(kind)
                .pos(Some(PartOfSpeech::Verb))
                .truncative(truncative),
            RightRule::new(RightKind::Default, Some(PartOfSpeech::Verb)),
        )
    }

    fn joined(stem: &Stem, next: &NonStem) -> Vec<String> {
        let left = right_join(stem, next).unwrap();
        let right = left_join(next, stem).unwrap();
        Fragments::combine(left, right)
    }

    #[test]
    fn test_combine_single_crosses() {
        let out = Fragments::combine(Fragments::one("a"), Fragments::two("x", "y"));
        assert_eq!(out, vec!["ax", "ay"]);
        let out = Fragments::combine(Fragments::two("a", "b"), Fragments::one("x"));
        assert_eq!(out, vec!["ax", "bx"]);
    }

    #[test]
    fn test_combine_two_zips() {
        let out = Fragments::combine(Fragments::two("a", "b"), Fragments::two("x", "y"));
        assert_eq!(out, vec!["ax", "by"]);
    }

    #[test]
    fn test_plural_after_k_stem() {
        let stem = noun_stem("nuuk", RightKind::KStem);
        let plural = noun_ending("t", LeftKind::Plural);
        assert_eq!(left_join(&plural, &stem).unwrap(), Fragments::one("it"));
        assert_eq!(right_join(&stem, &plural).unwrap(), Fragments::one("nuu"));
    }

    #[test]
    fn test_ergative_nuuk() {
        let stem = noun_stem("nuuk", RightKind::KStem);
        let erg = noun_ending("p", LeftKind::SgErg);
        assert_eq!(right_join(&stem, &erg).unwrap(), Fragments::one("nu"));
        assert_eq!(left_join(&erg, &stem).unwrap(), Fragments::one("up"));
    }

    #[test]
    fn test_plural_default_after_vowel_stem() {
        let stem = noun_stem("iglu", RightKind::Default);
        let plural = noun_ending("t", LeftKind::Plural);
        assert_eq!(left_join(&plural, &stem).unwrap(), Fragments::one("t"));
        assert_eq!(right_join(&stem, &plural).unwrap(), Fragments::one("iglu"));
    }

    #[test]
    fn test_t_initial_offers_protected_variant() {
        let stem = noun_stem("iglu", RightKind::Default);
        let ending = noun_ending("tut", LeftKind::Default);
        assert_eq!(left_join(&ending, &stem).unwrap(), Fragments::two("tut", "Tut"));
    }

    #[test]
    fn test_epenthetic_ending() {
        let vowel = noun_stem("iglu", RightKind::Default);
        let cons = Stem::new("qaammat", RightRule::new(RightKind::Default, None).cons_end(true));
        let ending = noun_ending("q^vut", LeftKind::Default);
        assert_eq!(left_join(&ending, &vowel).unwrap(), Fragments::one("qvut"));
        assert_eq!(left_join(&ending, &cons).unwrap(), Fragments::one("vut"));
    }

    #[test]
    fn test_type2_metathesis_alternation() {
        let stem = Stem::new(
            "iməq",
            RightRule::new(RightKind::Type2Metathesis, None).cons_end(true),
        );
        let plural = noun_ending("t", LeftKind::Plural);
        assert_eq!(right_join(&stem, &plural).unwrap(), Fragments::two("iqm", "iɴɴ"));
    }

    #[test]
    fn test_hyphen_rule() {
        let stem = Stem::new("2", RightRule::new(RightKind::Hyphen, Some(PartOfSpeech::Noun)));
        let ending = noun_ending("mi", LeftKind::Default);
        assert_eq!(right_join(&stem, &ending).unwrap(), Fragments::two("2~", "2~i"));
        let empty = noun_ending("", LeftKind::Default);
        assert_eq!(right_join(&stem, &empty).unwrap(), Fragments::one("2"));
    }

    #[test]
    fn test_diphthong_peek() {
        assert!(ends_in_a_diphthong("nuliaa"));
        assert!(ends_in_a_diphthong("apirə"));
        assert!(!ends_in_a_diphthong("iglu"));
        assert!(!ends_in_a_diphthong("a"));
    }

    #[test]
    fn test_te_replacive() {
        let stem = verb_stem("nipitə", RightKind::Te);
        let affix = verb_affix("liq", LeftKind::Replace, true);
        assert_eq!(right_join(&stem, &affix).unwrap(), Fragments::two("nipi", "nipitə"));
        assert_eq!(left_join(&affix, &stem).unwrap(), Fragments::two("siq", "liq"));
        assert_eq!(joined(&stem, &affix), vec!["nipisiq", "nipitəliq"]);
    }

    #[test]
    fn test_te_before_passive_participle() {
        let stem = verb_stem("nipitə", RightKind::Te);
        let passive = verb_affix("ðaq", LeftKind::PassPart, true);
        assert_eq!(right_join(&stem, &passive).unwrap(), Fragments::one("nipic"));
        assert_eq!(left_join(&passive, &stem).unwrap(), Fragments::one("caq"));
    }

    #[test]
    fn test_aq_drop() {
        let stem = noun_stem("nuliaq", RightKind::AqDrop);
        let plural = noun_ending("t", LeftKind::Plural);
        assert_eq!(right_join(&stem, &plural).unwrap(), Fragments::one("nuli"));
        assert_eq!(left_join(&plural, &stem).unwrap(), Fragments::one("it"));
        let mik = noun_ending("mik", LeftKind::Default);
        assert_eq!(right_join(&stem, &mik).unwrap(), Fragments::one("nuliaq"));
    }

    #[test]
    fn test_type1_metathesis() {
        let stem = noun_stem("tupəq", RightKind::Type1Metathesis);
        let plural = noun_ending("t", LeftKind::Plural);
        assert_eq!(joined(&stem, &plural), vec!["tuqqit"]);
        let vowel = noun_ending("a", LeftKind::Default);
        assert_eq!(joined(&stem, &vowel), vec!["tuqqa"]);
    }

    #[test]
    fn test_usiq() {
        let stem = noun_stem("atausiq", RightKind::Usiq);
        let mik = noun_ending("mik", LeftKind::Default);
        assert_eq!(right_join(&stem, &mik).unwrap(), Fragments::one("atautti"));
        let ga = noun_ending("ga", LeftKind::Default);
        assert_eq!(right_join(&stem, &ga).unwrap(), Fragments::one("atausiq"));
    }

    #[test]
    fn test_ge_contemporative_and_va() {
        let stem = verb_stem("nuannarə", RightKind::Ge);
        let contemporative = NonStem::verb_ending("l^luni", LeftRule::new(LeftKind::VGeDrop));
        assert_eq!(right_join(&stem, &contemporative).unwrap(), Fragments::one("nuannara"));
        assert_eq!(joined(&stem, &contemporative), vec!["nuannaraluni"]);

        let vaa = NonStem::verb_ending("vaa", LeftRule::new(LeftKind::VGeDrop));
        assert_eq!(right_join(&stem, &vaa).unwrap(), Fragments::two("nuannar", "nuannarə"));
        assert_eq!(joined(&stem, &vaa), vec!["nuannaraa", "nuannarəvaa"]);
    }

    #[test]
    fn test_habitual_duplicates_before_passive() {
        let stem = Stem::new("takuðaq", RightRule::new(RightKind::HabDup, Some(PartOfSpeech::Verb)));
        let truncating = verb_affix("ðaq", LeftKind::PassPart, true);
        assert_eq!(right_join(&stem, &truncating).unwrap(), Fragments::one("takuðaqða"));
        let plain = verb_affix("ðaq", LeftKind::PassPart, false);
        assert_eq!(right_join(&stem, &plain).unwrap(), Fragments::one("takuðaqðaq"));
        let other = verb_affix("niar", LeftKind::Default, false);
        assert_eq!(right_join(&stem, &other).unwrap(), Fragments::one("takuðaq"));
    }

    #[test]
    fn test_act_part_after_tc_trigger_zips() {
        let stem = Stem::new("ajorit", RightRule::new(RightKind::TcTrigger, Some(PartOfSpeech::Verb)));
        let ending = NonStem::verb_ending("ðuq", LeftRule::new(LeftKind::ActPart));
        assert_eq!(right_join(&stem, &ending).unwrap(), Fragments::two("ajorit", "ajorət"));
        assert_eq!(left_join(&ending, &stem).unwrap(), Fragments::two("cuq", "ðuq"));
        assert_eq!(joined(&stem, &ending), vec!["ajoritcuq", "ajorətðuq"]);
    }

    #[test]
    fn test_guk_alternants() {
        let vowel = verb_stem("taku", RightKind::Default);
        let guk = NonStem::verb_ending("guk", LeftRule::new(LeftKind::Guk));
        let elided = NonStem::verb_ending("guk", LeftRule::new(LeftKind::GukElided));
        assert_eq!(joined(&vowel, &guk), vec!["takuguk", "takujuk"]);
        assert_eq!(joined(&vowel, &elided), vec!["takuuk"]);

        let cons = verb_stem("ilinniar", RightKind::Default);
        assert_eq!(left_join(&guk, &cons).unwrap(), Fragments::one("guk"));
        assert_eq!(left_join(&elided, &cons).unwrap(), Fragments::one("guk"));

        let te = verb_stem("nipitə", RightKind::Te);
        assert_eq!(joined(&te, &guk), vec!["nipiguk", "nipijuk"]);
    }
}
