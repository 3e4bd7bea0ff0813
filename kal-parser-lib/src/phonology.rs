// Sound and spelling pipeline.
//
// An abstract morpheme form is turned into a phonemic "sound" form by an
// ordered list of rewrites, then adjusted and finally spelled. Rule order is
// significant: every rule sees the output of the previous one.

use lazy_static::lazy_static;
use regex::Regex;

// ---------------------------------------------------------------------------
// Phoneme inventory
// ---------------------------------------------------------------------------

/// Consonant symbols of the underlying notation.
pub const CONSONANTS: &str = "tscðpvfkgqrlmnŋjɴ";
/// Vowel symbols, including the length placeholder `V`.
pub const VOWELS: &str = "aiuəV";
pub const UVULARS: &str = "qrɴ";

/// Marker splitting an epenthetic leading segment from the body of a form.
pub const EPENTHESIS: char = '^';
/// Joiner standing in for a hyphen inside a token.
pub const JOINER: char = '~';

pub fn is_consonant(c: char) -> bool {
    CONSONANTS.contains(c)
}

pub fn is_vowel_symbol(c: char) -> bool {
    VOWELS.contains(c)
}

/// Vowel test used on realized surfaces (includes the lowered `e`/`o`).
pub fn is_surface_vowel(c: char) -> bool {
    "aiuəoe".contains(c)
}

/// Initial-letter classes of the lexicon buckets.
pub fn is_back_initial(c: char) -> bool {
    "ou".contains(c)
}

pub fn is_front_initial(c: char) -> bool {
    "aiəe".contains(c)
}

pub fn starts_with_consonant(s: &str) -> bool {
    s.chars().next().map_or(false, is_consonant)
}

pub fn ends_with_consonant(s: &str) -> bool {
    s.chars().last().map_or(false, is_consonant)
}

pub fn starts_with_double_consonant(s: &str) -> bool {
    let mut chars = s.chars();
    matches!((chars.next(), chars.next()), (Some(a), Some(b)) if is_consonant(a) && is_consonant(b))
}

// ---------------------------------------------------------------------------
// Character-indexed string helpers
// ---------------------------------------------------------------------------

pub fn char_len(s: &str) -> usize {
    s.chars().count()
}

/// The first `n` characters of `s` (all of `s` when it is shorter).
pub fn prefix(s: &str, n: usize) -> &str {
    match s.char_indices().nth(n) {
        Some((i, _)) => &s[..i],
        None => s,
    }
}

/// Everything after the first `n` characters.
pub fn skip(s: &str, n: usize) -> &str {
    &s[prefix(s, n).len()..]
}

/// `s` without its last `n` characters.
pub fn drop_last(s: &str, n: usize) -> &str {
    prefix(s, char_len(s).saturating_sub(n))
}

/// The `k`-th character counted from the end, `k = 1` being the last one.
pub fn nth_from_end(s: &str, k: usize) -> Option<char> {
    if k == 0 {
        return None;
    }
    s.chars().rev().nth(k - 1)
}

/// Character range `[from, to)` of `s`, clamped to its length.
pub fn window(s: &str, from: usize, to: usize) -> &str {
    if to <= from {
        return "";
    }
    prefix(skip(s, from), to - from)
}

// ---------------------------------------------------------------------------
// Rewrite rules
// ---------------------------------------------------------------------------

enum Rewrite {
    Pattern(Regex, &'static str),
    Literal(&'static str, &'static str),
    Custom(fn(&str) -> String),
}

impl Rewrite {
    fn pattern(pattern: &str, replacement: &'static str) -> Self {
        let re = Regex::new(pattern).expect("static rewrite pattern must compile");
        Rewrite::Pattern(re, replacement)
    }

    fn apply(&self, s: &str) -> String {
        match self {
            Rewrite::Pattern(re, replacement) => re.replace_all(s, *replacement).into_owned(),
            Rewrite::Literal(from, to) => s.replace(from, to),
            Rewrite::Custom(f) => f(s),
        }
    }
}

/// Bracketed character class of all consonants except `excluded`.
fn consonants_except(excluded: &str) -> String {
    let kept: String = CONSONANTS.chars().filter(|c| !excluded.contains(*c)).collect();
    format!("[{kept}]")
}

fn consonants() -> String {
    format!("[{CONSONANTS}]")
}

fn vowels() -> String {
    format!("[{VOWELS}]")
}

lazy_static! {
    static ref SOUND_RULES: Vec<Rewrite> = vec![
        Rewrite::pattern(&format!("({})ð", consonants()), "${1}t"),
        Rewrite::pattern(&format!("({})ð", vowels()), "${1}c"),
        Rewrite::pattern(&format!("i({}?)t({})", consonants(), vowels()), "i${1}s${2}"),
        // Release the t protected from the previous rule.
        Rewrite::Literal("T", "t"),
        Rewrite::pattern(&format!("({})y", consonants()), "${1}g"),
        Rewrite::pattern(&format!("({})y", vowels()), "${1}j"),
        Rewrite::pattern(&format!("ə({})", consonants()), "i${1}"),
        Rewrite::pattern("ə([aiuəj])", "a${1}"),
        Rewrite::Literal("aai", "aavi"),
        Rewrite::Literal("aau", "aaju"),
    ];

    static ref ADJUST_RULES: Vec<Rewrite> = vec![
        Rewrite::Custom(lengthen_a),
        Rewrite::Literal("qg", "r"),
        Rewrite::pattern(&format!("{}([qtslmnŋf])", consonants_except("qr")), "${1}${1}"),
        Rewrite::pattern(&format!("{}c", consonants_except("tqr")), "cc"),
        Rewrite::pattern("[qr]([tcslmn])", "r${1}"),
        Rewrite::pattern(&format!("{}[vp]", consonants_except("qr")), "pp"),
        Rewrite::pattern("[qr][vp]", "rp"),
        Rewrite::pattern(&format!("{}[gk]", consonants_except("gqr")), "kk"),
        Rewrite::pattern("[qr][gk]", "rk"),
        Rewrite::pattern(&format!("i([{UVULARS}])"), "e${1}"),
        Rewrite::Literal("ie", "ee"),
        Rewrite::pattern(&format!("u([{UVULARS}])"), "o${1}"),
        Rewrite::Literal("uo", "oo"),
        Rewrite::pattern("[qr]f", "rf"),
        Rewrite::pattern(&format!("{}r", consonants_except("r")), "qq"),
        Rewrite::Literal("ij", "i"),
        Rewrite::pattern("uv([aie])", "u${1}"),
        Rewrite::Literal("uuu", "uuju"),
        Rewrite::Literal("iii", "iivi"),
        Rewrite::Literal("aaa", "aava"),
    ];

    static ref SPELLING_RULES: Vec<Rewrite> = vec![
        Rewrite::Literal("ŋŋ", "nng"),
        Rewrite::Literal("ŋ", "ng"),
        Rewrite::Literal("tti", "tsi"),
        Rewrite::Literal("tte", "tse"),
        Rewrite::Literal("c", "s"),
        Rewrite::Literal("ɴɴ", "rng"),
        Rewrite::Literal("ɴ", "rng"),
    ];

    static ref PLACEHOLDER: Regex =
        Regex::new(&format!("({})V", vowels())).expect("static placeholder pattern must compile");
}

/// `a` followed by a vowel becomes `aa`, except for a word-final `ai`.
fn lengthen_a(s: &str) -> String {
    let chars: Vec<char> = s.chars().collect();
    let mut out = String::with_capacity(s.len());
    let mut i = 0;
    while i < chars.len() {
        let lengthens = chars[i] == 'a'
            && i + 1 < chars.len()
            && is_vowel_symbol(chars[i + 1])
            && !(chars[i + 1] == 'i' && i + 2 == chars.len());
        if lengthens {
            out.push_str("aa");
            i += 2;
        } else {
            out.push(chars[i]);
            i += 1;
        }
    }
    out
}

fn run(rules: &[Rewrite], s: &str) -> String {
    rules.iter().fold(s.to_string(), |acc, rule| rule.apply(&acc))
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// The two realizations of a form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Realization {
    /// Phonemic form, before spelling conventions apply.
    pub sound: String,
    /// Final orthographic spelling.
    pub surface: String,
}

/// Realize `form`, leaving its first `protected_len` characters untouched.
pub fn realize(form: &str, protected_len: usize, form_is_sound: bool) -> Realization {
    let protected = prefix(form, protected_len);
    let rest = skip(form, protected_len);
    if rest.is_empty() {
        return Realization {
            sound: protected.to_string(),
            surface: protected.to_string(),
        };
    }
    let sound = if form_is_sound {
        rest.to_string()
    } else {
        run(&SOUND_RULES, rest)
    };
    let adjusted = run(&ADJUST_RULES, &sound);
    let spelled = run(&SPELLING_RULES, &adjusted);
    Realization {
        sound: format!("{protected}{adjusted}"),
        surface: format!("{protected}{spelled}"),
    }
}

/// Post-join normalization: a vowel followed by the placeholder `V` is
/// doubled.
pub fn double_placeholder(s: &str) -> String {
    if !s.contains('V') {
        return s.to_string();
    }
    PLACEHOLDER.replace_all(s, "${1}${1}").into_owned()
}
