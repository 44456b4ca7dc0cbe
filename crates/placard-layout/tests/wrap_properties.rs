//! Property tests for the wrapping invariants: word sequence is preserved
//! exactly, and the character budget is only ever exceeded by a single
//! unbreakable word.

use proptest::prelude::*;

use placard_layout::{wrap, wrap_block};

proptest! {
    #[test]
    fn wrapping_preserves_word_sequence(
        words in prop::collection::vec("[a-zA-Z0-9]{1,14}", 0..60),
        max_chars in 1usize..48,
    ) {
        let paragraph = words.join(" ");
        let lines = wrap(&paragraph, max_chars);

        let rejoined: Vec<String> = lines
            .iter()
            .flat_map(|line| line.split(' '))
            .map(str::to_string)
            .collect();
        prop_assert_eq!(rejoined, words);
    }

    #[test]
    fn budget_exceeded_only_by_unbreakable_words(
        words in prop::collection::vec("[a-z]{1,20}", 1..40),
        max_chars in 4usize..30,
    ) {
        let paragraph = words.join(" ");
        for line in wrap(&paragraph, max_chars) {
            let within_budget = line.chars().count() <= max_chars;
            let single_word = !line.contains(' ');
            prop_assert!(within_budget || single_word, "line {:?} breaks the budget", line);
        }
    }

    #[test]
    fn block_lines_never_start_or_end_with_whitespace(
        text in "[a-z \\n]{0,200}",
        max_chars in 1usize..40,
    ) {
        for line in wrap_block(&text, max_chars) {
            prop_assert_eq!(line.trim(), line.as_str());
        }
    }
}
