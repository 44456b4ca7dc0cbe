use proptest::prelude::*;

use super::GlyphSegmenter;
use placard_core::RunKind;

proptest! {
    /// Run texts concatenate back to the exact input for arbitrary strings.
    #[test]
    fn segmentation_is_lossless(line in "\\PC*") {
        let segmenter = GlyphSegmenter::new();
        let joined: String = segmenter
            .segment(&line)
            .into_iter()
            .map(|run| run.text)
            .collect();
        prop_assert_eq!(joined, line);
    }

    /// ASCII text never produces an emoji run (keycap bases need VS16 or a
    /// combining keycap to promote).
    #[test]
    fn ascii_stays_text(line in "[ -~]*") {
        let segmenter = GlyphSegmenter::new();
        for run in segmenter.segment(&line) {
            prop_assert_eq!(run.kind, RunKind::Text);
        }
    }

    /// Adjacent runs always alternate kind; merging leaves no same-kind
    /// neighbors behind.
    #[test]
    fn neighboring_runs_differ_in_kind(line in "\\PC*") {
        let segmenter = GlyphSegmenter::new();
        let runs = segmenter.segment(&line);
        for pair in runs.windows(2) {
            prop_assert_ne!(pair[0].kind, pair[1].kind);
        }
    }
}
