//! Unicode-aware segmentation of a line into text and emoji runs.
//!
//! Lines are walked by extended grapheme cluster, never by code unit, so
//! compound emoji (flag pairs, skin-tone modifiers, ZWJ sequences, keycaps)
//! stay indivisible. Each cluster is classified by an emoji-presentation
//! predicate backed by ICU property sets, and adjacent clusters of the same
//! kind merge into a single [`Run`].

use icu_properties::{
    props::{Emoji, EmojiModifier, EmojiPresentation, ExtendedPictographic, RegionalIndicator},
    CodePointSetData, CodePointSetDataBorrowed,
};
use icu_segmenter::GraphemeClusterSegmenter;

use placard_core::{Run, RunKind};

const ZERO_WIDTH_JOINER: char = '\u{200D}';
const VARIATION_SELECTOR_16: char = '\u{FE0F}';
const COMBINING_KEYCAP: char = '\u{20E3}';

/// Grapheme-cluster walker with an emoji-presentation predicate.
pub struct GlyphSegmenter {
    emoji: CodePointSetDataBorrowed<'static>,
    emoji_presentation: CodePointSetDataBorrowed<'static>,
    extended_pictographic: CodePointSetDataBorrowed<'static>,
    emoji_modifier: CodePointSetDataBorrowed<'static>,
    regional_indicator: CodePointSetDataBorrowed<'static>,
}

impl GlyphSegmenter {
    /// Create a new segmenter with ICU data baked in.
    pub fn new() -> Self {
        Self {
            emoji: CodePointSetData::new::<Emoji>(),
            emoji_presentation: CodePointSetData::new::<EmojiPresentation>(),
            extended_pictographic: CodePointSetData::new::<ExtendedPictographic>(),
            emoji_modifier: CodePointSetData::new::<EmojiModifier>(),
            regional_indicator: CodePointSetData::new::<RegionalIndicator>(),
        }
    }

    /// Extended grapheme clusters of `text`, in order
    pub fn graphemes<'t>(&self, text: &'t str) -> Vec<&'t str> {
        if text.is_empty() {
            return Vec::new();
        }

        let boundaries: Vec<usize> = GraphemeClusterSegmenter::new().segment_str(text).collect();
        boundaries
            .windows(2)
            .map(|pair| &text[pair[0]..pair[1]])
            .collect()
    }

    /// Whether one grapheme cluster renders with emoji presentation.
    ///
    /// Covers default-emoji code points, regional-indicator flag pairs,
    /// skin-tone modified bases, ZWJ sequences, keycaps, and text-default
    /// symbols promoted by VS16. A bare text-presentation pictograph such
    /// as U+00A9 stays text.
    pub fn is_emoji_cluster(&self, cluster: &str) -> bool {
        let mut chars = cluster.chars();
        let first = match chars.next() {
            Some(ch) => ch,
            None => return false,
        };

        if self.regional_indicator.contains(first) {
            return true;
        }
        if self.emoji_presentation.contains(first) {
            return true;
        }

        let has_vs16 = cluster.chars().any(|ch| ch == VARIATION_SELECTOR_16);
        let has_keycap = cluster.chars().any(|ch| ch == COMBINING_KEYCAP);
        if (has_vs16 || has_keycap) && self.emoji.contains(first) {
            return true;
        }

        if self.extended_pictographic.contains(first) {
            let has_zwj = cluster.chars().any(|ch| ch == ZERO_WIDTH_JOINER);
            let has_modifier = cluster.chars().any(|ch| self.emoji_modifier.contains(ch));
            return has_zwj || has_modifier;
        }

        false
    }

    /// Partition a line into ordered text/emoji runs.
    ///
    /// Adjacent clusters of the same kind merge into one run; an empty line
    /// yields zero runs.
    pub fn segment(&self, line: &str) -> Vec<Run> {
        let mut runs: Vec<Run> = Vec::new();

        for cluster in self.graphemes(line) {
            let kind = if self.is_emoji_cluster(cluster) {
                RunKind::Emoji
            } else {
                RunKind::Text
            };

            match runs.last_mut() {
                Some(run) if run.kind == kind => run.text.push_str(cluster),
                _ => runs.push(Run {
                    kind,
                    text: cluster.to_string(),
                }),
            }
        }

        runs
    }
}

impl Default for GlyphSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests;

#[cfg(test)]
mod proptests;
