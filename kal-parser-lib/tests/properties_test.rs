// Property tests for the join pipeline and the decoder.

use kal_parser_lib::morphology::decode;
use kal_parser_lib::phonology::{char_len, prefix, realize};
use kal_parser_lib::sandhi::Fragments;
use kal_parser_lib::Dictionary;
use lazy_static::lazy_static;
use proptest::prelude::*;

lazy_static! {
    static ref DICT: Dictionary = Dictionary::new();
}

fn fragments() -> impl Strategy<Value = Fragments> {
    prop_oneof![
        "[a-z]{0,4}".prop_map(Fragments::One),
        ("[a-z]{0,4}", "[a-z]{0,4}").prop_map(|(a, b)| Fragments::Two(a, b)),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    #[test]
    fn test_combine_arity(left in fragments(), right in fragments()) {
        let (l, r) = (left.len(), right.len());
        let out = Fragments::combine(left, right);
        prop_assert!(!out.is_empty());
        prop_assert!(out.len() <= l.max(r));
        if l == 2 && r == 2 {
            prop_assert_eq!(out.len(), 2);
        }
    }

    #[test]
    fn test_realized_surface_is_stable(form in "[aiu]?([ptkqsmnlgr][aiu]){1,4}[ptkq]?") {
        let once = realize(&form, 0, false);
        let twice = realize(&once.sound, 0, true);
        prop_assert_eq!(&twice.sound, &once.sound);
        prop_assert_eq!(&twice.surface, &once.surface);
    }

    #[test]
    fn test_protected_prefix_survives(form in "[aiuəptkqvsgrmnŋljð]{0,10}", cut in 0usize..12) {
        let protected_len = cut.min(char_len(&form));
        let realized = realize(&form, protected_len, false);
        prop_assert_eq!(prefix(&realized.surface, protected_len), prefix(&form, protected_len));
        prop_assert_eq!(prefix(&realized.sound, protected_len), prefix(&form, protected_len));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn test_decode_never_fails_on_letters(word in "[aiueoptkqvsgrmnlj]{1,7}") {
        let decoded = decode(&word, &DICT);
        prop_assert!(decoded.is_ok(), "{}: {:?}", word, decoded.as_ref().err());
        for seq in decoded.unwrap().sequences {
            prop_assert_eq!(seq.surface(), word.as_str());
        }
    }
}
