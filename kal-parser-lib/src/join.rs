// Join engine: one morpheme plus its right neighbour.

use crate::error::Result;
use crate::morpheme::{Enclitic, Form, Joined, NonStem, Stem, Word};
use crate::phonology::double_placeholder;
use crate::sandhi::{
    enclitic_left_join, left_join, right_join, word_right_join, Fragments, LeftKind, PartOfSpeech,
    RightKind, RightRule,
};

impl Stem {
    /// Every concrete result of attaching `next` to this stem.
    ///
    /// An ending closes the stem into a word; an affix yields a new stem that
    /// takes over the affix's right rule.
    pub fn join(&self, next: &NonStem) -> Result<Vec<Joined>> {
        let left = right_join(self, next)?;
        let right = left_join(next, self)?;
        let passive_gaq = next.has_left_kind(LeftKind::PassPart) && right.is_single("gaq");
        let forms = Fragments::combine(left, right);

        let joined = forms
            .into_iter()
            .map(|text| {
                let text = double_placeholder(&text);
                let form = Form::new(text).protected(self.protected_len());
                if next.is_ending() {
                    let greenlandic_i = self.greenlandic_i() && next.form().is_empty();
                    return Joined::Word(Word::new(form.with_greenlandic_i(greenlandic_i)));
                }
                Joined::Stem(Stem::with_rule(form, self.derived_rule(next, passive_gaq)))
            })
            .collect();
        Ok(joined)
    }

    /// Right rule of the stem built by attaching the affix `next`.
    fn derived_rule(&self, next: &NonStem, passive_gaq: bool) -> RightRule {
        if passive_gaq {
            return RightRule::new(RightKind::Gem, Some(PartOfSpeech::Noun)).cons_end(true);
        }
        let habitual = next.form() == "ðaq"
            && !next.has_left_kind(LeftKind::PassPart)
            && (!self.right().cons_end || self.right().kind == RightKind::HabDup);
        if habitual {
            return RightRule::new(RightKind::HabDup, Some(PartOfSpeech::Verb)).cons_end(true);
        }
        next.right()
            .cloned()
            .unwrap_or_else(|| RightRule::new(RightKind::Default, None))
    }
}

impl Word {
    /// Every concrete result of attaching the enclitic `enc`.
    ///
    /// A plain enclitic yields a word over the already realized sound form; a
    /// derivational one reopens a stem.
    pub fn join(&self, enc: &Enclitic) -> Vec<Joined> {
        if self.greenlandic_i() && !self.form().ends_with('i') {
            return Vec::new();
        }
        let left = word_right_join(self, enc);
        let right = enclitic_left_join(enc, self);
        let has_placeholder = right.first().contains('V');
        let forms = Fragments::combine(left, right);

        forms
            .into_iter()
            .map(|text| {
                let text = if has_placeholder {
                    double_placeholder(&text)
                } else {
                    text
                };
                match enc.right() {
                    Some(rule) => Joined::Stem(Stem::with_rule(
                        Form::new(text).protected(self.protected_len()),
                        rule.clone(),
                    )),
                    None => Joined::Word(Word::new(
                        Form::new(text).as_sound().protected(self.protected_len()),
                    )),
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sandhi::{EncliticKind, LeftRule};

    fn forms(joined: &[Joined]) -> Vec<&str> {
        joined.iter().map(Joined::form).collect()
    }

    #[test]
    fn test_iglu_plural() {
        let stem = Stem::new("iglu", RightRule::new(RightKind::Default, Some(PartOfSpeech::Noun)));
        let plural = NonStem::noun_ending("t", LeftRule::new(LeftKind::Plural));
        let joined = stem.join(&plural).unwrap();
        assert_eq!(forms(&joined), vec!["iglut"]);
        assert_eq!(joined[0].surface(), "illut");
        assert!(matches!(joined[0], Joined::Word(_)));
    }

    #[test]
    fn test_q_stem_absorbs_truncative_g() {
        let stem = Stem::new("umiaq", RightRule::new(RightKind::Default, Some(PartOfSpeech::Noun)));
        let affix = NonStem::affix(
            "gə",
            LeftRule::new(LeftKind::Default)
                .pos(Some(PartOfSpeech::Noun))
                .truncative(true),
            RightRule::new(RightKind::Ge, Some(PartOfSpeech::Verb)),
        );
        let joined = stem.join(&affix).unwrap();
        assert_eq!(forms(&joined), vec!["umiaqgə"]);
        assert_eq!(joined[0].surface(), "umiarə");
        match &joined[0] {
            Joined::Stem(s) => assert_eq!(s.right().kind, RightKind::Ge),
            Joined::Word(_) => panic!("affix must yield a stem"),
        }
    }

    #[test]
    fn test_protected_len_propagates() {
        let stem = Stem::new("film", RightRule::new(RightKind::Default, None))
            .protected(4)
            .with_greenlandic_i(true);
        let ending = NonStem::noun_ending("mik", LeftRule::new(LeftKind::Default));
        let joined = stem.join(&ending).unwrap();
        assert_eq!(forms(&joined), vec!["filmimik"]);
        match &joined[0] {
            Joined::Word(w) => {
                assert_eq!(w.protected_len(), 4);
                assert!(!w.greenlandic_i());
            }
            Joined::Stem(_) => panic!("ending must yield a word"),
        }
    }

    #[test]
    fn test_greenlandic_i_empty_ending() {
        let stem = Stem::new("film", RightRule::new(RightKind::Default, None))
            .protected(4)
            .with_greenlandic_i(true);
        let empty = NonStem::noun_ending("", LeftRule::new(LeftKind::Default));
        let joined = stem.join(&empty).unwrap();
        assert_eq!(forms(&joined), vec!["film", "filmi"]);
        let word = match &joined[0] {
            Joined::Word(w) => w.clone(),
            Joined::Stem(_) => panic!("ending must yield a word"),
        };
        assert!(word.greenlandic_i());
        assert!(word.join(&Enclitic::plain("lu", EncliticKind::Plain)).is_empty());
    }

    #[test]
    fn test_passive_participle_gaq_geminates() {
        let stem = Stem::new("aliikkusiq", RightRule::new(RightKind::Default, Some(PartOfSpeech::Verb)));
        let passive = NonStem::affix(
            "ðaq",
            LeftRule::new(LeftKind::PassPart)
                .pos(Some(PartOfSpeech::Verb))
                .truncative(true),
            RightRule::new(RightKind::Default, Some(PartOfSpeech::Noun)),
        );
        let joined = stem.join(&passive).unwrap();
        assert_eq!(forms(&joined), vec!["aliikkusigaq"]);
        match &joined[0] {
            Joined::Stem(s) => assert_eq!(s.right().kind, RightKind::Gem),
            Joined::Word(_) => panic!("affix must yield a stem"),
        }
    }

    #[test]
    fn test_habitual_then_passive_duplicates() {
        let stem = Stem::new("taku", RightRule::new(RightKind::Default, Some(PartOfSpeech::Verb)));
        let habitual = NonStem::affix(
            "ðaq",
            LeftRule::new(LeftKind::Default).pos(Some(PartOfSpeech::Verb)),
            RightRule::new(RightKind::Default, Some(PartOfSpeech::Verb)),
        );
        let joined = stem.join(&habitual).unwrap();
        assert_eq!(forms(&joined), vec!["takuðaq"]);
        let habit = match &joined[0] {
            Joined::Stem(s) => s.clone(),
            Joined::Word(_) => panic!("affix must yield a stem"),
        };
        assert_eq!(habit.right().kind, RightKind::HabDup);

        let passive = NonStem::affix(
            "ðaq",
            LeftRule::new(LeftKind::PassPart)
                .pos(Some(PartOfSpeech::Verb))
                .truncative(true),
            RightRule::new(RightKind::Default, Some(PartOfSpeech::Noun)),
        );
        let joined = habit.join(&passive).unwrap();
        assert_eq!(forms(&joined), vec!["takuðaqðagaq"]);
    }

    #[test]
    fn test_guuq_after_consonant() {
        let word = Word::new(Form::new("qaammat"));
        let guuq = Enclitic::plain("guuq", EncliticKind::Guuq);
        let joined = word.join(&guuq);
        assert_eq!(forms(&joined), vec!["qaammaŋŋuuq"]);
        assert_eq!(joined[0].surface(), "qaammanngooq");
    }

    #[test]
    fn test_derivational_enclitic_reopens_stem() {
        let word = Word::new(Form::new("iglu"));
        let enc = Enclitic::derivational(
            "ət",
            false,
            RightRule::new(RightKind::TDeleting, Some(PartOfSpeech::Verb)),
        );
        let joined = word.join(&enc);
        assert_eq!(forms(&joined), vec!["igluət"]);
        match &joined[0] {
            Joined::Stem(s) => assert_eq!(s.right().kind, RightKind::TDeleting),
            Joined::Word(_) => panic!("derivational enclitic must yield a stem"),
        }
    }
}
