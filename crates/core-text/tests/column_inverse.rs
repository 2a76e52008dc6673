//! Property tests: column <-> char index conversions are inverses on glyph
//! boundaries for lines mixing ASCII, tabs and wide glyphs.

use core_text::{char_index_to_column, column_to_char_index};
use proptest::prelude::*;

fn line_strategy() -> impl Strategy<Value = String> {
    let glyph = prop_oneof![Just('a'), Just('Z'), Just(' '), Just('\t'), Just('界')];
    proptest::collection::vec(glyph, 0..40).prop_map(|chars| chars.into_iter().collect())
}

proptest! {
    #[test]
    fn index_column_index_round_trip(line in line_strategy(), tab_size in 1usize..9, pick in 0usize..64) {
        let len = line.chars().count();
        let idx = pick.min(len);
        let col = char_index_to_column(&line, idx, tab_size);
        prop_assert_eq!(column_to_char_index(&line, col, tab_size), idx);
    }

    #[test]
    fn columns_are_monotonic(line in line_strategy(), tab_size in 1usize..9) {
        let len = line.chars().count();
        let mut last = 0;
        for idx in 0..=len {
            let col = char_index_to_column(&line, idx, tab_size);
            prop_assert!(col >= last);
            last = col;
        }
    }
}
