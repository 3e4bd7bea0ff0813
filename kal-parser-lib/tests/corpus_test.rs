// Corpus tests: decode known wordforms, check the expected analysis is among
// the hypotheses, and check every decoded sequence re-joins to its input.

use kal_parser_lib::morphology::{decode, hypothesis};
use kal_parser_lib::{parse_sentence, Dictionary};

fn dict() -> Dictionary {
    Dictionary::new()
}

/// Wordforms with one analysis each that must be found.
const GOLD: &[(&str, &str, &str)] = &[
    ("qaammat", "qaammat", "{qaammat}N{∅}"),
    ("illut", "iglu-t", "{iglu}N{t}"),
    ("nuuit", "nuuk-t", "{nuuk}N{t}"),
    ("nuup", "nuuk-p", "{nuuk}N{p}"),
    ("takusaq", "taku-ðaq", "{taku}V{-ðaq}N{∅}"),
    ("takussaaq", "taku-ssa-vuq", "{taku}V{-ssa}V{vuq}"),
    ("takuvoq", "taku-vuq", "{taku}V{vuq}"),
    ("aap", "aap", "{aap}"),
    ("aallu", "aap=lu", "{aap}*{lu}"),
];

/// Wordforms that only need to survive the round trip, parsed or not.
const ROUND_TRIP: &[&str] = &[
    "qaammat", "illut", "nuuit", "nuup", "takusaq", "takussaaq", "takuvoq",
    "aap", "aallu", "iglu", "nanuq", "nanut", "qimmiq", "qimmit", "umiaq",
    "umiat", "takuaa", "takunngilaq", "ujarak", "ujaqqat", "tupeq",
    "kaffi", "bussi", "filmi", "kg", "naamik", "qujanaq", "taava",
];

fn gold_report() -> (usize, Vec<String>) {
    let d = dict();
    let mut pass = 0;
    let mut failures = Vec::new();

    for &(word, plain, annotated) in GOLD {
        let decoded = decode(word, &d).unwrap();
        let found = decoded
            .sequences
            .iter()
            .map(hypothesis)
            .any(|h| h.plain == plain && h.annotated == annotated);
        if found {
            pass += 1;
        } else {
            let got: Vec<_> = decoded.sequences.iter().map(|s| s.seq.annotated()).collect();
            failures.push(format!("  {word}\n    expected: {annotated}\n    got:      {got:?}"));
        }
    }
    (pass, failures)
}

#[test]
fn corpus_gold() {
    let (pass, failures) = gold_report();
    let total = GOLD.len();
    eprintln!("\nCorpus gold: {pass}/{total}.");
    if !failures.is_empty() {
        eprintln!("Failures:");
        for f in &failures {
            eprintln!("{f}");
        }
    }
    assert_eq!(pass, total, "gold analyses missing");
}

#[test]
fn corpus_round_trip() {
    let d = dict();
    let mut checked = 0;

    for &word in ROUND_TRIP {
        let decoded = decode(word, &d).unwrap();
        for seq in &decoded.sequences {
            assert_eq!(seq.surface(), word, "{} does not spell {word}", seq.seq.plain());
            let rejoined = seq.seq.join().unwrap();
            assert!(
                rejoined.iter().any(|j| j.surface() == word),
                "{} re-joins to {:?}, not {word}",
                seq.seq.plain(),
                rejoined.iter().map(|j| j.surface()).collect::<Vec<_>>()
            );
            checked += 1;
        }
    }

    eprintln!("\nRound trip: {checked} sequences over {} words.", ROUND_TRIP.len());
    assert!(checked >= GOLD.len());
}

#[test]
fn corpus_sentence_coverage() {
    let d = dict();
    let sentence = ROUND_TRIP.join(" ");
    let parse = parse_sentence(&sentence, &d);
    assert_eq!(parse.words.len(), ROUND_TRIP.len());

    let parsed = parse.words.iter().filter(|w| !w.hypotheses.is_empty()).count();
    let pct = parsed as f64 / parse.words.len() as f64 * 100.0;
    eprintln!("\nSentence coverage: {parsed}/{} ({pct:.1}%).", parse.words.len());
    assert!(parse.words.iter().all(|w| w.error.is_none()));
    assert!(parsed >= GOLD.len());
}
