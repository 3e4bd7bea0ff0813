// Closed morpheme inventories: endings, affixes, enclitics, and the
// initial-sound indexes the decoder uses to pick affix candidates.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use crate::morpheme::{Enclitic, NonStem};
use crate::phonology::{starts_with_double_consonant, EPENTHESIS};
use crate::sandhi::{
    EncliticKind, LeftKind, LeftRule, PartOfSpeech, RightKind, RightRule,
};

use PartOfSpeech::{Noun, Verb};

// ---------------------------------------------------------------------------
// Endings
// ---------------------------------------------------------------------------

/// Verb endings as `(form, truncative)`.
const VERB_ENDINGS: &[(&str, bool)] = &[
    ("vamgət", false), ("vagət", false), ("lakkit", true), ("lakka", true),
    ("laqvut", true), ("ligət", true), ("lijuk", true), ("gakku", false),
    ("gakkət", false), ("gavət", false), ("gaaŋat", false), ("git", false),
    ("kkit", false), ("gitci", false), ("gisi", false), ("gijuk", false),
    ("vigət", false), ("visi", false), ("visijuk", false), ("vijuk", false),
    ("vit", false), ("visigut", false), ("v^vat", false), ("va", false),
    ("la", true), ("m^mat", false), ("m^mata", false), ("m^maŋa", false),
    ("m^massuk", false), ("m^magit", false), ("m^magu", false), ("n^nata", false),
    ("nakku", false), ("navət", false), ("namijuk", false), ("gassi", false),
    ("gami", false), ("gamik", false), ("gamikku", false), ("gama", false),
    ("gamta", false), ("l^lusi", false), ("l^lugit", false), ("l^lutik", false),
    ("l^lutət", false), ("nagu", false), ("nasi", false), ("nani", false),
    ("natik", false), ("naŋa", false), ("l^lugu", false), ("l^luŋa", false),
    ("l^luni", false), ("l^luta", false), ("laq", true), ("lara", true),
    ("latət", true), ("laqsi", true), ("l^lat", false), ("lat", true),
    ("laŋa", true), ("lagut", true), ("vuq", false), ("vusi", false),
    ("v^vut", false), ("vutət", false), ("vuŋa", false), ("vaqma", false),
    ("vatət", false), ("vavut", false), ("vaqvut", false), ("vaatigut", false),
    ("vaa", false), ("vaasi", false), ("vamsi", false), ("vat", false),
    ("vai", false), ("vara", false), ("vaaŋa", false), ("vakka", false),
    ("vaat", false), ("vugut", false), ("vaattət", false), ("vaatət", false),
    ("vasi", false), ("viŋa", false), ("na", false), ("ta", false),
    ("guni", false), ("guniuk", false), ("gukku", false), ("gukkit", false),
    ("gussi", false), ("guit", false), ("ganni", false), ("gaanni", false),
    ("gaat", false), ("gamigit", false), ("li", false), ("guk", false),
    ("ðuŋa", false), ("ðuq", false), ("ðut", false), ("ðutət", false),
    ("ðugut", false), ("ðusi", false), ("gəa", false), ("gai", false),
    ("gaaŋata", false), ("gaaŋatta", false), ("gaaŋamik", false), ("gamiŋa", false),
    ("guma", false), ("gutta", false), ("gamijuk", false), ("gamtəgu", false),
    ("tigut", false), ("p^pat", false),
];

/// Noun endings as `(form, truncative)`.
const NOUN_ENDINGS: &[(&str, bool)] = &[
    ("t", false), ("p", false), ("ata", true), ("isa", true), ("ga", false),
    ("tta", false), ("tta", true), ("kka", true), ("a", true), ("i", true),
    ("ni", false), ("ni", true), ("q^vut", false), ("vut", true), ("q^si", false),
    ("si", true), ("at", true), ("q^tək", false), ("tək", true), ("ma", false),
    ("ma", true), ("mi", false), ("mi", true), ("vsi", false), ("vsi", true),
    ("ssinnit", false), ("ssinnit", true), ("mik", false), ("mik", true),
    ("nik", false), ("", false), ("mit", false), ("nit", false), ("miit", false),
    ("niit", false), ("mut", false), ("nut", false), ("mini", false),
    ("mini", true), ("minni", false), ("minni", true), ("minik", false),
    ("minik", true), ("minnik", false), ("minnik", true), ("minut", false),
    ("minut", true), ("minnut", false), ("minnut", true), ("mikkut", false),
    ("mikkut", true), ("ani", true), ("anik", true), ("annik", true),
    ("anni", true), ("anit", true), ("annit", true), ("anut", true),
    ("annut", true), ("inut", true), ("kkut", false), ("tut", false),
    ("nni", false), ("nni", true), ("ttənnut", false), ("ttənni", false),
    ("ttənnit", false), ("təgut", false), ("agut", true), ("atut", true),
    ("atigut", true), ("it", true), ("itni", true), ("tət", true),
];

fn verb_left_kind(form: &str) -> LeftKind {
    if form == "guk" {
        LeftKind::Guk
    } else if ["l^l", "va", "v^vu", "vi"].iter().any(|p| form.starts_with(p)) {
        LeftKind::VGeDrop
    } else if form.starts_with("vu") {
        LeftKind::SsaDrop
    } else if form.starts_with("ðu") {
        LeftKind::ActPart
    } else {
        LeftKind::Default
    }
}

fn noun_left_kind(form: &str) -> LeftKind {
    match form {
        "t" => LeftKind::Plural,
        "p" => LeftKind::SgErg,
        "it" => LeftKind::ThirdPlPossPl,
        _ => LeftKind::Default,
    }
}

/// Endings grouped by the part of speech they close.
#[derive(Debug, Clone)]
pub struct EndingTable {
    noun: Vec<Arc<NonStem>>,
    verb: Vec<Arc<NonStem>>,
    all: Vec<Arc<NonStem>>,
}

impl EndingTable {
    pub fn builtin() -> Self {
        let mut verb: Vec<_> = VERB_ENDINGS
            .iter()
            .map(|&(form, truncative)| {
                let left = LeftRule::new(verb_left_kind(form)).truncative(truncative);
                Arc::new(NonStem::verb_ending(form, left))
            })
            .collect();
        // -guk has a third, g-less alternant (takuuk).
        verb.push(Arc::new(NonStem::verb_ending("guk", LeftRule::new(LeftKind::GukElided))));
        let noun: Vec<_> = NOUN_ENDINGS
            .iter()
            .map(|&(form, truncative)| {
                let left = LeftRule::new(noun_left_kind(form)).truncative(truncative);
                Arc::new(NonStem::noun_ending(form, left))
            })
            .collect();
        let all = verb.iter().chain(noun.iter()).cloned().collect();
        Self { noun, verb, all }
    }

    /// Endings that can close a stem of part of speech `pos`; an untagged
    /// stem takes every ending.
    pub fn for_pos(&self, pos: Option<PartOfSpeech>) -> &[Arc<NonStem>] {
        match pos {
            Some(Noun) => &self.noun,
            Some(Verb) => &self.verb,
            None => &self.all,
        }
    }

    pub fn len(&self) -> usize {
        self.all.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all.is_empty()
    }
}

// ---------------------------------------------------------------------------
// Affixes
// ---------------------------------------------------------------------------

struct AffixEntry {
    form: &'static str,
    left: LeftKind,
    truncative: bool,
    from: Option<PartOfSpeech>,
    right: RightKind,
    to: Option<PartOfSpeech>,
}

const fn affix(
    form: &'static str,
    left: LeftKind,
    truncative: bool,
    from: Option<PartOfSpeech>,
    right: RightKind,
    to: Option<PartOfSpeech>,
) -> AffixEntry {
    AffixEntry {
        form,
        left,
        truncative,
        from,
        right,
        to,
    }
}

/// Derivational affixes: form, left rule, attaches to, right rule, yields.
const AFFIXES: &[AffixEntry] = &[
    // future
    affix("ssa", LeftKind::Default, true, Some(Verb), RightKind::Ssa, Some(Verb)),
    // negation
    affix("ŋŋit", LeftKind::Default, true, Some(Verb), RightKind::TcTrigger, Some(Verb)),
    // passive participle
    affix("ðaq", LeftKind::PassPart, true, Some(Verb), RightKind::Default, Some(Noun)),
    // habitual
    affix("ðaq", LeftKind::Default, false, Some(Verb), RightKind::Default, Some(Verb)),
    affix("ði", LeftKind::Htr, false, Some(Verb), RightKind::Default, Some(Verb)),
    // make, build
    affix("liuq", LeftKind::Replace, true, Some(Noun), RightKind::Default, Some(Verb)),
    // begin to
    affix("liq", LeftKind::Replace, true, Some(Verb), RightKind::Default, Some(Verb)),
    // have as
    affix("gə", LeftKind::Default, true, Some(Noun), RightKind::Ge, Some(Verb)),
    // very
    affix("qə", LeftKind::Default, true, Some(Verb), RightKind::Ge, Some(Verb)),
    // only
    affix("g^innaq", LeftKind::Ginnaq, false, Some(Noun), RightKind::Default, Some(Noun)),
    // rather
    affix("gi^jaqtuq", LeftKind::GiJaqtuq, false, Some(Verb), RightKind::Default, Some(Verb)),
    affix("juaq", LeftKind::Juaq, false, Some(Noun), RightKind::AqDrop, Some(Noun)),
    // diminutive
    affix("ŋŋuaq", LeftKind::TTrunc, true, Some(Noun), RightKind::AqDrop, Some(Noun)),
    // augmentative
    affix("ssuaq", LeftKind::Default, true, Some(Noun), RightKind::AqDrop, Some(Noun)),
    // agent participle
    affix("tuq", LeftKind::Default, false, Some(Verb), RightKind::Default, Some(Noun)),
    // epenthetic t
    affix("t^", LeftKind::Default, false, Some(Noun), RightKind::Default, Some(Noun)),
    // have, there is
    affix("qaq", LeftKind::Default, true, Some(Noun), RightKind::Default, Some(Verb)),
    // be
    affix("ŋŋu", LeftKind::Default, true, Some(Noun), RightKind::Default, Some(Verb)),
    // having, provided with
    affix("lik", LeftKind::Default, true, Some(Noun), RightKind::KStem, Some(Noun)),
    // look for
    affix("siuq", LeftKind::Default, true, Some(Noun), RightKind::Default, Some(Verb)),
    // go and
    affix("niaq", LeftKind::Default, true, Some(Verb), RightKind::Default, Some(Verb)),
    // can
    affix("sinnaa", LeftKind::Default, true, Some(Verb), RightKind::Default, Some(Verb)),
    // well
    affix("lluaq", LeftKind::Default, true, Some(Verb), RightKind::Default, Some(Verb)),
    // cause to
    affix("tit", LeftKind::Default, false, Some(Verb), RightKind::TcTrigger, Some(Verb)),
];

pub fn builtin_affixes() -> Vec<Arc<NonStem>> {
    AFFIXES
        .iter()
        .map(|entry| {
            let left = LeftRule::new(entry.left)
                .pos(entry.from)
                .truncative(entry.truncative);
            let right = RightRule::new(entry.right, entry.to);
            Arc::new(NonStem::affix(entry.form, left, right))
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Enclitics
// ---------------------------------------------------------------------------

pub fn builtin_enclitics() -> Vec<Arc<Enclitic>> {
    let plain = [
        ("lu", EncliticKind::Plain),
        ("li", EncliticKind::Plain),
        ("mi", EncliticKind::Plain),
        ("guuq", EncliticKind::Guuq),
        ("luunniit", EncliticKind::Plain),
        ("t^tauq", EncliticKind::Plain),
        ("kiaq", EncliticKind::Plain),
        ("una", EncliticKind::Plain),
        ("uku", EncliticKind::Plain),
    ];
    let mut enclitics: Vec<_> = plain
        .into_iter()
        .map(|(form, kind)| Arc::new(Enclitic::plain(form, kind)))
        .collect();
    enclitics.push(Arc::new(Enclitic::derivational(
        "ət",
        false,
        RightRule::new(RightKind::TDeleting, Some(Verb)),
    )));
    enclitics.push(Arc::new(Enclitic::derivational(
        "kaq",
        true,
        RightRule::new(RightKind::Default, Some(Verb)),
    )));
    enclitics.push(Arc::new(Enclitic::derivational(
        "Vq",
        true,
        RightRule::new(RightKind::Default, Some(Verb)),
    )));
    enclitics
}

// ---------------------------------------------------------------------------
// Affix candidate selection
// ---------------------------------------------------------------------------

/// Maps spelled letters to the underlying initials an affix may start with.
///
/// This is a heuristic and is known to be incomplete: an affix whose spelled
/// start is not covered by any entry is never tried.
#[derive(Debug, Clone)]
pub struct GuessTable {
    entries: Vec<(String, String)>,
}

impl GuessTable {
    pub fn new(entries: Vec<(String, String)>) -> Self {
        Self { entries }
    }

    /// Underlying initials suggested by the spelled `window`, in table order
    /// without repeats.
    pub fn initials(&self, window: &str) -> Vec<char> {
        let mut seen = BTreeSet::new();
        self.entries
            .iter()
            .filter(|(key, _)| window.contains(key.as_str()))
            .flat_map(|(_, initials)| initials.chars())
            .filter(|c| seen.insert(*c))
            .collect()
    }
}

impl Default for GuessTable {
    fn default() -> Self {
        let entries = [
            ("p", "vp"),
            ("v", "v"),
            ("l", "l"),
            ("f", "f"),
            ("m", "m"),
            ("j", "jgy"),
            ("t", "tðj"),
            ("s", "tðcs"),
            ("k", "gky"),
            ("g", "gky"),
            ("n", "n"),
            ("ng", "ŋ"),
            ("a", "aiəuvV"),
            ("i", "iəjVy"),
            ("e", "iəeV"),
            ("u", "ugV"),
            ("o", "uoV"),
            ("q", "qr"),
            ("r", "qrgy"),
        ];
        Self::new(
            entries
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }
}

/// Affixes indexed by the underlying initials they can surface with.
#[derive(Debug, Clone, Default)]
pub struct AffixIndex {
    by_initial: HashMap<char, Vec<(Option<PartOfSpeech>, usize)>>,
    /// Affixes with an empty epenthetic tail, tried regardless of initial.
    always: Vec<(Option<PartOfSpeech>, usize)>,
}

impl AffixIndex {
    pub fn build(affixes: &[Arc<NonStem>]) -> Self {
        let mut index = AffixIndex::default();
        for (i, affix) in affixes.iter().enumerate() {
            let form = affix.form();
            let entry = (affix.left().pos, i);
            if form.contains(EPENTHESIS) {
                let mut parts = form.split(EPENTHESIS).map(|p| p.chars().next());
                match (parts.next().flatten(), parts.next().flatten()) {
                    (Some(a), Some(b)) => {
                        index.add(a, entry);
                        index.add(b, entry);
                    }
                    _ => index.always.push(entry),
                }
                continue;
            }
            let initial = if starts_with_double_consonant(form) {
                form.chars().nth(1)
            } else {
                form.chars().next()
            };
            if let Some(c) = initial {
                index.add(c, entry);
            }
            // -təl… stems surface with s before these, which the guess
            // table cannot see.
            match affix.left().kind {
                LeftKind::Replace => {
                    if form == "liq" {
                        index.add('e', entry);
                    }
                    index.add('i', entry);
                }
                LeftKind::Htr => index.add('i', entry),
                LeftKind::PassPart => index.add('g', entry),
                _ => {}
            }
        }
        index
    }

    fn add(&mut self, initial: char, entry: (Option<PartOfSpeech>, usize)) {
        self.by_initial.entry(initial).or_default().push(entry);
    }

    /// Indices of affixes that attach to `pos` and may start with one of
    /// `initials`, ascending and without repeats.
    pub fn candidates(&self, pos: Option<PartOfSpeech>, initials: &[char]) -> Vec<usize> {
        let attaches = |key: Option<PartOfSpeech>| pos.is_none() || key.is_none() || key == pos;
        let mut found = BTreeSet::new();
        for c in initials {
            if let Some(entries) = self.by_initial.get(c) {
                found.extend(entries.iter().filter(|(key, _)| attaches(*key)).map(|(_, i)| *i));
            }
        }
        found.extend(
            self.always
                .iter()
                .filter(|(key, _)| attaches(*key))
                .map(|(_, i)| *i),
        );
        found.into_iter().collect()
    }
}
