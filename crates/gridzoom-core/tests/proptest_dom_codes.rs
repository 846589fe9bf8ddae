//! Property tests for DOM key-code normalization.

use gridzoom_core::event::KeyCode;
use proptest::prelude::*;

proptest! {
    #[test]
    fn arbitrary_codes_never_panic(code in ".{0,16}") {
        let _ = KeyCode::from_dom_code(&code);
    }

    #[test]
    fn letter_codes_map_to_lowercase_chars(c in proptest::char::range('A', 'Z')) {
        let code = format!("Key{c}");
        prop_assert_eq!(KeyCode::from_dom_code(&code), KeyCode::Char(c.to_ascii_lowercase()));
    }

    #[test]
    fn digit_codes_map_to_digits(d in 0u8..10) {
        let code = format!("Digit{d}");
        let expected = char::from(b'0' + d);
        prop_assert_eq!(KeyCode::from_dom_code(&code), KeyCode::Char(expected));
    }
}
