//! Property tests for the coordinate and normalization laws.

use eol_core::{
    ChunkState, CrlfMarks, EolKind, EolMode, EolPolicy, LineIndex, Range, apply_eol_policy,
    count_lines, join_lines, measure_eol, merge_ranges, normalize_bytes_to_lf,
    normalize_chunk_to_lf, normalize_eol, split_lines,
};
use proptest::prelude::*;
use proptest::sample::Index;

fn arb_text() -> impl Strategy<Value = String> {
    prop::collection::vec(
        prop_oneof![
            Just("a"),
            Just("bc"),
            Just("é"),
            Just("🦀"),
            Just("\n"),
            Just("\r"),
            Just("\r\n"),
        ],
        0..48,
    )
    .prop_map(|pieces| pieces.concat())
}

fn arb_range() -> impl Strategy<Value = Range> {
    (0usize..6, 0usize..12, 0usize..6, 0usize..12)
        .prop_map(|(sl, sc, el, ec)| Range::from_coords(sl, sc, el, ec))
}

/// Sorted, deduplicated cut points inside `0..=len`.
fn cut_points(len: usize, cuts: &[Index], valid: impl Fn(usize) -> bool) -> Vec<usize> {
    let mut points: Vec<usize> = cuts
        .iter()
        .map(|cut| cut.index(len + 1))
        .filter(|&p| valid(p))
        .collect();
    points.sort_unstable();
    points.dedup();
    points
}

/// For every LF-space offset, the offset of the same character in the original text.
/// A collapsed pair's `'\n'` corresponds to the pair's `'\r'`.
fn original_offsets(text: &str) -> Vec<usize> {
    let bytes = text.as_bytes();
    let mut out = Vec::with_capacity(bytes.len() + 1);
    let mut i = 0;
    while i < bytes.len() {
        out.push(i);
        if bytes[i] == b'\r' && bytes.get(i + 1) == Some(&b'\n') {
            i += 2;
        } else {
            i += 1;
        }
    }
    out.push(bytes.len());
    out
}

proptest! {
    #[test]
    fn prop_offset_position_roundtrip(text in arb_text()) {
        let index = LineIndex::new(&text);
        for offset in 0..=text.len() {
            let position = index.position_at(offset);
            prop_assert_eq!(index.offset_at(position), offset);
        }
    }

    #[test]
    fn prop_line_starts_strictly_increasing(text in arb_text()) {
        let index = LineIndex::new(&text);
        prop_assert_eq!(index.line_starts()[0], 0);
        prop_assert!(index.line_starts().windows(2).all(|w| w[0] < w[1]));
        prop_assert_eq!(index.line_count(), count_lines(&text));
    }

    #[test]
    fn prop_normalize_is_idempotent(text in arb_text()) {
        for kind in [EolKind::Lf, EolKind::Crlf] {
            let once = normalize_eol(&text, kind).into_owned();
            let twice = normalize_eol(&once, kind).into_owned();
            prop_assert_eq!(once, twice);
        }
    }

    #[test]
    fn prop_stats_count_each_terminator_once(text in arb_text()) {
        let stats = measure_eol(&text);
        prop_assert_eq!(stats.lf + stats.crlf + stats.cr, count_lines(&text) - 1);
    }

    #[test]
    fn prop_split_join_matches_normalize(text in arb_text()) {
        prop_assume!(!text.is_empty());
        let lines = split_lines(&text);
        for kind in [EolKind::Lf, EolKind::Crlf] {
            prop_assert_eq!(join_lines(&lines, kind), normalize_eol(&text, kind).into_owned());
        }
    }

    #[test]
    fn prop_ensure_policy_is_idempotent(
        text in arb_text(),
        mode in prop_oneof![Just(EolMode::Lf), Just(EolMode::Crlf), Just(EolMode::Preserve)],
    ) {
        let policy = EolPolicy::new(mode).with_ensure_final_newline(true);
        let once = apply_eol_policy(&text, &policy);
        prop_assert_eq!(apply_eol_policy(&once, &policy), once.clone());
    }

    #[test]
    fn prop_streaming_matches_whole_buffer(
        text in arb_text(),
        cuts in prop::collection::vec(any::<Index>(), 0..8),
    ) {
        let expected = normalize_eol(&text, EolKind::Lf).into_owned();

        let points = cut_points(text.len(), &cuts, |p| text.is_char_boundary(p));
        let mut state = ChunkState::new();
        let mut out = String::new();
        let mut last = 0;
        for point in points.into_iter().chain([text.len()]) {
            let (piece, next) = normalize_chunk_to_lf(&text[last..point], state);
            out.push_str(&piece);
            state = next;
            last = point;
        }
        out.push_str(state.flush());
        prop_assert_eq!(out, expected);
    }

    #[test]
    fn prop_byte_streaming_matches_whole_buffer(
        text in arb_text(),
        cuts in prop::collection::vec(any::<Index>(), 0..8),
    ) {
        let expected = normalize_eol(&text, EolKind::Lf).into_owned();

        let bytes = text.as_bytes();
        let points = cut_points(bytes.len(), &cuts, |_| true);
        let mut state = ChunkState::new();
        let mut out = Vec::new();
        let mut last = 0;
        for point in points.into_iter().chain([bytes.len()]) {
            let (piece, next) = normalize_bytes_to_lf(&bytes[last..point], state);
            out.extend(piece);
            state = next;
            last = point;
        }
        out.extend(state.flush().as_bytes());
        prop_assert_eq!(String::from_utf8(out).unwrap(), expected);
    }

    #[test]
    fn prop_crlf_remap_matches_original(text in arb_text()) {
        let lf = normalize_eol(&text, EolKind::Lf);
        let marks = CrlfMarks::from_text(&text);
        let expected = original_offsets(&text);
        prop_assert_eq!(expected.len(), lf.len() + 1);

        for (lf_offset, &original) in expected.iter().enumerate() {
            prop_assert_eq!(marks.remap_offset(lf_offset), original);
            prop_assert_eq!(marks.original_to_lf_offset(original), lf_offset);
        }
    }

    #[test]
    fn prop_merge_is_idempotent_and_order_independent(
        ranges in prop::collection::vec(arb_range(), 0..12),
    ) {
        let merged = merge_ranges(ranges.iter().copied());
        prop_assert_eq!(merge_ranges(merged.iter().copied()), merged.clone());
        prop_assert_eq!(merge_ranges(ranges.iter().rev().copied()), merged.clone());
        prop_assert!(merged.windows(2).all(|w| w[0].end < w[1].start));
        prop_assert!(merged.iter().all(|r| r.start <= r.end));
    }
}
