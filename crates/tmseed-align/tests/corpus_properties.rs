#![allow(clippy::expect_used, clippy::unwrap_used)]
//! Property tests for corpus deduplication and ordering

use proptest::prelude::*;
use std::collections::HashSet;
use tmseed_align::{AlignConfig, Aligner, TargetScript, normalize_key};
use tmseed_formats::strings::StringTable;

/// Source and target rows of one table pair
type TablePair = (Vec<(u32, String)>, Vec<(u32, String)>);

fn source_text() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Za-z ]{0,12}",
        Just("Iron Sword".to_string()),
        Just("iron sword".to_string()),
        Just(" IRON SWORD\r\n".to_string()),
    ]
}

fn target_text() -> impl Strategy<Value = String> {
    prop_oneof!["[가-힣 ]{1,8}", "[a-z]{1,8}", Just(String::new())]
}

fn tables() -> impl Strategy<Value = Vec<TablePair>> {
    prop::collection::vec(
        prop::collection::vec((0u32..32, source_text(), target_text()), 0..24).prop_map(|rows| {
            let source = rows.iter().map(|(id, s, _)| (*id, s.clone())).collect();
            let target = rows.into_iter().map(|(id, _, t)| (id, t)).collect();
            (source, target)
        }),
        1..4,
    )
}

fn run(inputs: &[TablePair], config: &AlignConfig) -> Vec<(String, String)> {
    let mut aligner = Aligner::new(config.clone());
    for (source, target) in inputs {
        let source: StringTable = source.iter().cloned().collect();
        let target: StringTable = target.iter().cloned().collect();
        aligner.align_tables(&source, &target);
    }
    let (corpus, _) = aligner.finish();
    corpus
        .into_pairs()
        .into_iter()
        .map(|p| (p.source, p.target))
        .collect()
}

proptest! {
    #[test]
    fn rows_are_unique_and_sorted(inputs in tables()) {
        let rows = run(&inputs, &AlignConfig::default());

        let keys: Vec<String> = rows.iter().map(|(s, _)| normalize_key(s)).collect();
        let unique: HashSet<&String> = keys.iter().collect();
        prop_assert_eq!(unique.len(), keys.len());
        prop_assert!(keys.windows(2).all(|w| w[0] <= w[1]));
        prop_assert!(keys.iter().all(|k| !k.is_empty()));
    }

    #[test]
    fn kept_rows_pass_content_checks(inputs in tables()) {
        for (source, target) in run(&inputs, &AlignConfig::default()) {
            prop_assert_ne!(&source, &target);
            prop_assert!(TargetScript::Hangul.matches(&target));
        }
    }

    #[test]
    fn first_seen_pair_is_kept(inputs in tables()) {
        let config = AlignConfig::default();
        let rows = run(&inputs, &config);

        // Replay the traversal to find the first accepted pair per key
        let mut expected = std::collections::BTreeMap::new();
        for (source, target) in &inputs {
            let source: StringTable = source.iter().cloned().collect();
            let target: StringTable = target.iter().cloned().collect();
            for (id, s) in source.iter() {
                let Some(t) = target.get(id) else { continue };
                if tmseed_align::check_pair(s, t, &config).is_err() {
                    continue;
                }
                let key = normalize_key(s);
                if !key.is_empty() {
                    expected.entry(key).or_insert_with(|| (s.to_string(), t.to_string()));
                }
            }
        }

        let expected: Vec<(String, String)> = expected.into_values().collect();
        prop_assert_eq!(rows, expected);
    }

    #[test]
    fn runs_are_deterministic(inputs in tables()) {
        let config = AlignConfig::default();
        prop_assert_eq!(run(&inputs, &config), run(&inputs, &config));
    }
}
