use std::collections::HashMap;
use std::path::Path;
use std::sync::Arc;

use lazy_static::lazy_static;
use regex::Regex;
use tracing::info;

use crate::error::{Error, Result};
use crate::morpheme::{Enclitic, Form, NonStem, Stem, Word};
use crate::phonology::{char_len, is_back_initial, is_front_initial, is_surface_vowel, prefix};
use crate::sandhi::{PartOfSpeech, RightKind, RightRule};
use crate::tables::{builtin_affixes, builtin_enclitics, AffixIndex, EndingTable, GuessTable};

const EMBEDDED_LEXICON: &str = include_str!("../data/morphemes.txt");

/// Abbreviations that attach endings through a hyphen.
pub const ABBREVIATIONS: &[&str] = &["kg", "nr", "kni", "kr", "km", "chr"];

/// Loanwords whose protected part cannot be guessed from their shape:
/// word → (protected prefix, consonant-final).
const LOANWORDS: &[(&str, &str, bool)] = &[
    ("filmiq", "film", false),
    ("filmi", "film", false),
    ("filmigaq", "film", false),
    ("piitaq", "piitaq", false),
    ("klassi", "klass", false),
    ("augusti", "august", false),
    ("augustusi", "augustus", false),
    ("rask", "rask", true),
    ("minutsi", "minutsi", false),
    ("svenskeq", "svenskeq", false),
    ("fanta", "fanta", false),
    ("kursusi", "kursus", false),
    ("alaska", "alaska", false),
    ("sagn", "sagn", true),
    ("lang", "lang", true),
    ("lasti", "last", false),
    ("kavaajaq", "kavaaja", false),
    ("svenskiq", "svensk", false),
];

const SCHWA_ELIDING: &[&str] = &["qulə", "timə"];
const AQ_DROPPING: &[&str] = &[
    "kaŋirlussuaq", "umiarcuaq", "nuliaq", "quiqcuaq", "ilinniarfissuaq", "siurarsuaq",
    "ivəgarsuaq", "qasigiaŋŋuaq", "qiqəqtarsuaq", "nuussuaq",
];
const GE_STEMS: &[&str] = &[
    "apirə", "pisiarə", "uqarfigə", "aglaffigə", "qutcavigə", "nuannarə", "telefonirfigə",
    "uqaluttuarə", "ilisarə",
];
const GEMINATING: &[&str] = &["ujarak", "pituqaq", "imaq", "nalunaaqutaq"];
const TYPE1_METATHESIS: &[&str] = &["atəq", "qitəq", "tupəq", "ulluqitəq"];
const TYPE2_METATHESIS: &[&str] = &["iməq", "sianəq", "siunəq", "aqqanəq"];

lazy_static! {
    /// Letters and clusters native stems never spell.
    static ref FOREIGN_SHAPE: Regex =
        Regex::new(r"[oeøåæbdhx]|[tscpvfkgqlmn]r|[tscpvfkgqlmnry]{3}").expect("static loanword pattern must compile");
    static ref GEMINATING_SHAPE: Regex =
        Regex::new("[aiu][vljgr][^ə]q$").expect("static gemination pattern must compile");
    static ref WEAK_Q_SHAPE: Regex = Regex::new("[^ə]q$").expect("static q-stem pattern must compile");
}

/// Initial-sound bucket of the lexicon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Bucket {
    /// `o`, `u`
    BackVowel,
    /// `a`, `i`, `e`, `ə`
    FrontVowel,
    Letter(char),
}

impl Bucket {
    pub fn of(initial: char) -> Self {
        let initial = initial.to_lowercase().next().unwrap_or(initial);
        if is_back_initial(initial) {
            Bucket::BackVowel
        } else if is_front_initial(initial) {
            Bucket::FrontVowel
        } else {
            Bucket::Letter(initial)
        }
    }

    pub fn of_word(word: &str) -> Option<Self> {
        word.chars().next().map(Bucket::of)
    }
}

/// Loanword protection: (protected length, consonant-final).
fn loanword(word: &str) -> Option<(usize, bool)> {
    if let Some((_, head, consonant_final)) = LOANWORDS.iter().find(|(w, _, _)| *w == word) {
        return Some((char_len(head), *consonant_final));
    }
    if !FOREIGN_SHAPE.is_match(word) || word.ends_with('q') {
        return None;
    }
    let len = char_len(word);
    let protected = if word.ends_with(['a', 'e', 'i', 'o', 'u']) {
        len - 1
    } else {
        len
    };
    Some((protected, protected == len))
}

/// Right rule of a lexicon stem, read off its shape.
pub fn classify(base: &str, is_loanword: bool) -> RightRule {
    use PartOfSpeech::{Noun, Verb};
    let rule = |kind, pos| RightRule::new(kind, pos);

    if is_loanword {
        if base.ends_with('q') {
            return rule(RightKind::WeakQStem, None);
        }
        return rule(RightKind::Default, None);
    }
    if SCHWA_ELIDING.contains(&base) {
        return rule(RightKind::SchwaElide, Some(Noun));
    }
    if AQ_DROPPING.contains(&base) {
        return rule(RightKind::AqDrop, Some(Noun));
    }
    if GE_STEMS.contains(&base) {
        return rule(RightKind::Ge, Some(Verb));
    }
    if base.ends_with("tə") {
        return rule(RightKind::Te, None);
    }
    // Listed before the regular k- and q-stems they would otherwise match.
    if GEMINATING.contains(&base) {
        return rule(RightKind::Gem, None);
    }
    if base.ends_with('k') || base.ends_with("lliq") || base == "naliŋinnaq" || base == "taaq" {
        if base == "kiglək" {
            return rule(RightKind::Weakenable, None);
        }
        if base.ends_with("marluk") {
            return rule(RightKind::Marluk, Some(Noun));
        }
        return rule(RightKind::KStem, None);
    }
    if GEMINATING_SHAPE.is_match(base) {
        return rule(RightKind::Gem, None);
    }
    if base.ends_with("usiq") || base == "tasiq" {
        return rule(RightKind::Usiq, None);
    }
    if base.ends_with("əq") {
        if TYPE1_METATHESIS.contains(&base) {
            return rule(RightKind::Type1Metathesis, None);
        }
        if TYPE2_METATHESIS.contains(&base) {
            return rule(RightKind::Type2Metathesis, None);
        }
        return rule(RightKind::Weakenable, None);
    }
    if base.ends_with("ət") || base.ends_with("it") {
        return rule(RightKind::TcTrigger, Some(Verb));
    }
    if WEAK_Q_SHAPE.is_match(base) && base != "tamaq" {
        return rule(RightKind::WeakQStem, None);
    }
    rule(RightKind::Default, None)
}

/// Length of the part of a stem's surface that no suffix can change.
///
/// This is the protected prefix when there is one, else everything up to
/// the consonant before the last vowel, minus the letters gemination or
/// metathesis may still rewrite.
pub fn stable_prefix_len(stem: &Stem) -> usize {
    if stem.protected_len() > 0 {
        return stem.protected_len();
    }
    let surface: Vec<char> = stem.surface().chars().collect();
    let mut seen_vowel = false;
    for idx in (0..surface.len()).rev() {
        let vowel = is_surface_vowel(surface[idx]);
        if vowel {
            seen_vowel = true;
        } else if seen_vowel {
            return match stem.right().kind {
                RightKind::Gem => idx.saturating_sub(1),
                kind if kind.is_metathesis() => idx.saturating_sub(3),
                _ => idx,
            };
        }
    }
    0
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Bases,
    Others,
}

/// Lexicon and morpheme tables, built once and read-only afterwards.
pub struct Dictionary {
    words: HashMap<Bucket, Vec<Arc<Word>>>,
    /// Stems without a stable prefix, by initial sound.
    stems: HashMap<Bucket, Vec<Arc<Stem>>>,
    /// Stems by the stable prefix of their surface.
    stem_prefixes: HashMap<String, Vec<Arc<Stem>>>,
    endings: EndingTable,
    affixes: Vec<Arc<NonStem>>,
    affix_index: AffixIndex,
    enclitics: Vec<Arc<Enclitic>>,
    guess: GuessTable,
}

impl Dictionary {
    /// Load the embedded lexicon together with the builtin tables.
    pub fn new() -> Self {
        Self::from_lexicon_str(EMBEDDED_LEXICON)
    }

    /// Load a lexicon file together with the builtin tables.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| Error::Lexicon {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::from_lexicon_str(&text))
    }

    pub fn from_lexicon_str(text: &str) -> Self {
        let affixes = builtin_affixes();
        let mut dict = Self {
            words: HashMap::new(),
            stems: HashMap::new(),
            stem_prefixes: HashMap::new(),
            endings: EndingTable::builtin(),
            affix_index: AffixIndex::build(&affixes),
            affixes,
            enclitics: builtin_enclitics(),
            guess: GuessTable::default(),
        };

        let mut section = Section::Preamble;
        for line in text.lines().map(str::trim) {
            if line.starts_with("Bases") {
                section = Section::Bases;
                continue;
            }
            if line.starts_with("Others") {
                section = Section::Others;
                continue;
            }
            let Some(token) = line.split_whitespace().next() else {
                continue;
            };
            match section {
                Section::Bases => dict.add_base(token),
                Section::Others => dict.add_word(token),
                Section::Preamble => {}
            }
        }

        info!(
            stems = dict.stem_count(),
            words = dict.word_count(),
            affixes = dict.affixes.len(),
            endings = dict.endings.len(),
            "lexicon loaded"
        );
        dict
    }

    /// Replace the affix-pruning guess table.
    pub fn with_guess_table(mut self, guess: GuessTable) -> Self {
        self.guess = guess;
        self
    }

    fn add_base(&mut self, token: &str) {
        let entry = token.split('[').next().unwrap_or(token);
        let mut chars = entry.chars();
        chars.next_back();
        let base = chars.as_str().to_lowercase();
        // A derivational enclitic, not a stem.
        if base.is_empty() || base == "kaq" || ABBREVIATIONS.contains(&base.as_str()) {
            return;
        }
        let protection = loanword(&base);
        let rule = classify(&base, protection.is_some());
        let (protected_len, greenlandic_i) = protection.unwrap_or((0, false));
        let stem = Stem::new(base, rule)
            .protected(protected_len)
            .with_greenlandic_i(greenlandic_i);

        let key_len = stable_prefix_len(&stem);
        let stem = Arc::new(stem);
        if key_len > 0 {
            let key = prefix(stem.surface(), key_len).to_string();
            self.stem_prefixes.entry(key).or_default().push(stem);
        } else if let Some(bucket) = Bucket::of_word(stem.form()) {
            self.stems.entry(bucket).or_default().push(stem);
        }
    }

    fn add_word(&mut self, token: &str) {
        let word = token.to_lowercase();
        let Some(bucket) = Bucket::of_word(&word) else {
            return;
        };
        let protected_len = loanword(&word).map_or(0, |(len, _)| len);
        let word = Word::new(Form::new(word).protected(protected_len));
        self.words.entry(bucket).or_default().push(Arc::new(word));
    }

    /// Dictionary words sharing the initial bucket of `word`.
    pub fn words_for(&self, word: &str) -> &[Arc<Word>] {
        Bucket::of_word(word)
            .and_then(|b| self.words.get(&b))
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Stems that may start `word`: its initial bucket plus every stem whose
    /// stable prefix begins the word.
    pub fn stem_candidates(&self, word: &str) -> Vec<Arc<Stem>> {
        let mut found: Vec<Arc<Stem>> = Bucket::of_word(word)
            .and_then(|b| self.stems.get(&b))
            .cloned()
            .unwrap_or_default();
        let lowered = word.to_lowercase();
        for (end, _) in lowered.char_indices().skip(1).chain([(lowered.len(), ' ')]) {
            if let Some(stems) = self.stem_prefixes.get(&lowered[..end]) {
                found.extend(stems.iter().cloned());
            }
        }
        found
    }

    pub fn endings(&self) -> &EndingTable {
        &self.endings
    }

    pub fn affixes(&self) -> &[Arc<NonStem>] {
        &self.affixes
    }

    pub fn affix_index(&self) -> &AffixIndex {
        &self.affix_index
    }

    pub fn enclitics(&self) -> &[Arc<Enclitic>] {
        &self.enclitics
    }

    pub fn guess_table(&self) -> &GuessTable {
        &self.guess
    }

    pub fn stem_count(&self) -> usize {
        self.stems.values().map(Vec::len).sum::<usize>()
            + self.stem_prefixes.values().map(Vec::len).sum::<usize>()
    }

    pub fn word_count(&self) -> usize {
        self.words.values().map(Vec::len).sum()
    }

    /// Look up a lexicon stem by its underlying form.
    pub fn lookup_stem(&self, form: &str) -> Option<&Arc<Stem>> {
        self.stems
            .values()
            .chain(self.stem_prefixes.values())
            .flatten()
            .find(|s| s.form() == form)
    }

    pub fn contains_word(&self, form: &str) -> bool {
        self.words_for(form).iter().any(|w| w.form() == form)
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
