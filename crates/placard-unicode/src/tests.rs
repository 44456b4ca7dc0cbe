use super::*;

fn segment(line: &str) -> Vec<Run> {
    GlyphSegmenter::new().segment(line)
}

#[test]
fn plain_latin_is_one_text_run() {
    let runs = segment("Hello World");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].kind, RunKind::Text);
    assert_eq!(runs[0].text, "Hello World");
}

#[test]
fn empty_line_yields_no_runs() {
    assert!(segment("").is_empty());
}

#[test]
fn text_and_emoji_alternate() {
    let runs = segment("Hi \u{1F600} there");
    assert_eq!(runs.len(), 3);
    assert_eq!(runs[0], Run::text("Hi "));
    assert_eq!(runs[1], Run::emoji("\u{1F600}"));
    assert_eq!(runs[2], Run::text(" there"));
}

#[test]
fn flag_sequence_is_one_emoji_run() {
    // U+1F1FA U+1F1F8, the US flag
    let runs = segment("\u{1F1FA}\u{1F1F8}");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].kind, RunKind::Emoji);
}

#[test]
fn skin_tone_modifier_stays_in_one_run() {
    // Thumbs up + medium skin tone
    let runs = segment("\u{1F44D}\u{1F3FD}");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].kind, RunKind::Emoji);

    let segmenter = GlyphSegmenter::new();
    assert_eq!(segmenter.graphemes(&runs[0].text).len(), 1);
}

#[test]
fn zwj_family_is_one_cluster() {
    // Family: man, woman, girl, boy joined by ZWJ
    let family = "\u{1F468}\u{200D}\u{1F469}\u{200D}\u{1F467}\u{200D}\u{1F466}";
    let runs = segment(family);
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].kind, RunKind::Emoji);

    let segmenter = GlyphSegmenter::new();
    assert_eq!(segmenter.graphemes(&runs[0].text).len(), 1);
}

#[test]
fn adjacent_emoji_merge_into_one_run() {
    let runs = segment("\u{1F600}\u{1F601}");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].kind, RunKind::Emoji);

    let segmenter = GlyphSegmenter::new();
    assert_eq!(segmenter.graphemes(&runs[0].text).len(), 2);
}

#[test]
fn keycap_sequence_is_emoji() {
    // 1 + VS16 + combining keycap
    let runs = segment("1\u{FE0F}\u{20E3}");
    assert_eq!(runs.len(), 1);
    assert_eq!(runs[0].kind, RunKind::Emoji);
}

#[test]
fn text_default_pictograph_needs_vs16() {
    let segmenter = GlyphSegmenter::new();
    // Bare copyright sign keeps text presentation
    assert!(!segmenter.is_emoji_cluster("\u{00A9}"));
    // VS16 promotes it to emoji presentation
    assert!(segmenter.is_emoji_cluster("\u{00A9}\u{FE0F}"));
}

#[test]
fn runs_concatenate_back_to_the_line() {
    let line = "Launch day \u{1F680}\u{1F389} is here";
    let joined: String = segment(line).into_iter().map(|run| run.text).collect();
    assert_eq!(joined, line);
}
