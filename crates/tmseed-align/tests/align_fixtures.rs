#![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]
//! Integration tests: end-to-end alignment over synthesized inputs
//!
//! Covers both strategies (two directories, archive against directory) and
//! the TSV written from the resulting corpus.

use pretty_assertions::assert_eq;
use std::fs;
use std::path::Path;
use tmseed_align::{AlignConfig, AlignError, Aligner, StringSource, TmCorpus, write_tsv_file};
use tmseed_test_utils::{BsaFixture, FixtureFile, StringsFixture, write_file, write_tree};

fn rows(corpus: &TmCorpus) -> Vec<(&str, &str)> {
    corpus
        .pairs()
        .map(|p| (p.source.as_str(), p.target.as_str()))
        .collect()
}

fn english_strings() -> StringsFixture {
    StringsFixture::new()
        .entry(1, "Hello")
        .entry(2, "Iron Sword")
        .entry(3, "Gold")
        .entry(4, "Untranslated")
        .entry(5, "Line one\nLine two")
}

fn korean_strings() -> StringsFixture {
    StringsFixture::new()
        .entry(1, "안녕")
        .entry(2, "철검")
        .entry(3, "골드")
        .entry(4, "Untranslated")
        .entry(5, "첫 줄\n둘째 줄")
}

fn descriptions(text: &str) -> StringsFixture {
    StringsFixture::new().entry(100, text)
}

#[test]
fn directories_align_by_file_name() {
    let source = write_tree(&[
        ("Skyrim_en.STRINGS", english_strings().build_strings()),
        ("Skyrim_ko.strings", korean_strings().build_strings()),
        ("Dawnguard_en.strings", english_strings().build_strings()),
    ])
    .unwrap();
    let target = write_tree(&[(
        "kr/skyrim_en.strings",
        korean_strings().build_strings(),
    )])
    .unwrap();

    let mut aligner = Aligner::new(AlignConfig::default());
    aligner
        .align_directories(source.path(), target.path())
        .unwrap();
    let (corpus, stats) = aligner.finish();

    assert_eq!(
        rows(&corpus),
        vec![("Gold", "골드"), ("Hello", "안녕"), ("Iron Sword", "철검")]
    );
    // Skyrim_ko lacks the locale marker and is never considered
    assert_eq!(stats.matched_files, 1);
    assert_eq!(stats.unmatched_files, 1);
    assert_eq!(stats.pairs, 3);
}

#[test]
fn directories_without_locale_filter() {
    let source = write_tree(&[("a/ui.strings", english_strings().build_strings())]).unwrap();
    let target = write_tree(&[("b/UI.strings", korean_strings().build_strings())]).unwrap();

    let config = AlignConfig::default().with_source_locale(None);
    let mut aligner = Aligner::new(config);
    aligner
        .align_directories(source.path(), target.path())
        .unwrap();

    assert_eq!(aligner.stats().matched_files, 1);
    assert_eq!(aligner.corpus().len(), 3);
}

#[test]
fn keep_long_admits_multiline_text() {
    let source = write_tree(&[("Skyrim_en.strings", english_strings().build_strings())]).unwrap();
    let target = write_tree(&[("Skyrim_en.strings", korean_strings().build_strings())]).unwrap();

    let mut aligner = Aligner::new(AlignConfig::default().with_keep_long(true));
    aligner
        .align_directories(source.path(), target.path())
        .unwrap();
    let (corpus, _) = aligner.finish();

    assert_eq!(corpus.len(), 4);
    assert!(corpus.contains_key("line one\nline two"));
}

#[test]
fn empty_table_counts_as_matched() {
    let source = write_tree(&[("Skyrim_en.strings", vec![0u8; 4])]).unwrap();
    let target = write_tree(&[("Skyrim_en.strings", korean_strings().build_strings())]).unwrap();

    let mut aligner = Aligner::new(AlignConfig::default());
    aligner
        .align_directories(source.path(), target.path())
        .unwrap();
    let (corpus, stats) = aligner.finish();

    assert_eq!(stats.matched_files, 1);
    assert!(corpus.is_empty());
}

#[test]
fn archive_aligns_against_directory() {
    let archive_bytes = BsaFixture::new(105)
        .folder(
            "strings",
            vec![
                FixtureFile::new("skyrim_english.strings", english_strings().build_strings()),
                FixtureFile::new(
                    "skyrim_english.dlstrings",
                    descriptions("A sword made of iron.").build_sized(),
                ),
                FixtureFile::new("update_english.strings", vec![1, 2, 3]).compressed(),
            ],
        )
        .build();
    let dir = tempfile::tempdir().unwrap();
    let archive_path = write_file(dir.path(), "Skyrim - Interface.bsa", &archive_bytes).unwrap();

    let target = write_tree(&[
        ("Skyrim_English.STRINGS", korean_strings().build_strings()),
        (
            "Skyrim_English.DLSTRINGS",
            descriptions("철로 만든 검.").build_sized(),
        ),
        ("Update_English.strings", korean_strings().build_strings()),
        ("Dragonborn_English.strings", korean_strings().build_strings()),
    ])
    .unwrap();

    let source = StringSource::archive(&archive_path).unwrap();
    let target_source = StringSource::directory(target.path()).unwrap();

    let mut aligner = Aligner::new(AlignConfig::default());
    aligner.align(&source, &target_source).unwrap();
    let (corpus, stats) = aligner.finish();

    assert_eq!(
        rows(&corpus),
        vec![("Gold", "골드"), ("Hello", "안녕"), ("Iron Sword", "철검")]
    );
    assert_eq!(stats.matched_files, 1);
    assert_eq!(stats.unmatched_files, 1);
    assert_eq!(stats.skipped_files, 1);

    // Long-form tables are aligned once long text is allowed
    let mut aligner = Aligner::new(AlignConfig::default().with_keep_long(true));
    aligner.align(&source, &target_source).unwrap();
    let (corpus, stats) = aligner.finish();

    assert_eq!(stats.matched_files, 2);
    assert!(corpus.contains_key("a sword made of iron."));
}

#[test]
fn unreadable_archive_entry_is_skipped() {
    let mut archive_bytes = BsaFixture::new(105)
        .folder(
            "strings",
            vec![
                FixtureFile::new("skyrim_english.strings", english_strings().build_strings()),
                FixtureFile::new("update_english.strings", english_strings().build_strings()),
            ],
        )
        .build();
    // The last payload runs past the end of the file
    archive_bytes.truncate(archive_bytes.len() - 4);
    let dir = tempfile::tempdir().unwrap();
    let archive_path = write_file(dir.path(), "Skyrim - Interface.bsa", &archive_bytes).unwrap();

    let target = write_tree(&[
        ("Skyrim_English.strings", korean_strings().build_strings()),
        ("Update_English.strings", korean_strings().build_strings()),
    ])
    .unwrap();

    let source = StringSource::archive(&archive_path).unwrap();
    let target_source = StringSource::directory(target.path()).unwrap();

    let mut aligner = Aligner::new(AlignConfig::default());
    aligner.align(&source, &target_source).unwrap();
    let (corpus, stats) = aligner.finish();

    assert_eq!(
        rows(&corpus),
        vec![("Gold", "골드"), ("Hello", "안녕"), ("Iron Sword", "철검")]
    );
    assert_eq!(stats.matched_files, 1);
    assert_eq!(stats.unmatched_files, 0);
    assert_eq!(stats.skipped_files, 1);
}

#[test]
fn archive_index_mismatch_is_fatal() {
    let archive_bytes = BsaFixture::new(104)
        .folder(
            "strings",
            vec![
                FixtureFile::new("a.strings", vec![0; 8]),
                FixtureFile::new("b.strings", vec![0; 8]),
                FixtureFile::new("c.strings", vec![0; 8]),
                FixtureFile::new("d.strings", vec![0; 8]),
                FixtureFile::new("e.strings", vec![0; 8]),
            ],
        )
        .truncate_names(4)
        .build();
    let dir = tempfile::tempdir().unwrap();
    let archive_path = write_file(dir.path(), "broken.bsa", &archive_bytes).unwrap();

    let err = StringSource::archive(&archive_path).unwrap_err();
    match err {
        AlignError::Archive(inner) => assert!(inner.is_format_error()),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn repeated_runs_are_identical() {
    let source = write_tree(&[
        ("a/Skyrim_en.strings", english_strings().build_strings()),
        ("b/Dawnguard_en.strings", english_strings().build_strings()),
    ])
    .unwrap();
    let target = write_tree(&[
        ("Skyrim_en.strings", korean_strings().build_strings()),
        ("Dawnguard_en.strings", korean_strings().build_strings()),
    ])
    .unwrap();

    let run = |out: &Path| {
        let mut aligner = Aligner::new(AlignConfig::default());
        aligner
            .align_directories(source.path(), target.path())
            .unwrap();
        let (corpus, stats) = aligner.finish();
        write_tsv_file(out, corpus.pairs()).unwrap();
        stats
    };

    let out = tempfile::tempdir().unwrap();
    let first = run(&out.path().join("first.tsv"));
    let second = run(&out.path().join("second.tsv"));

    assert_eq!(first, second);
    assert_eq!(
        fs::read(out.path().join("first.tsv")).unwrap(),
        fs::read(out.path().join("second.tsv")).unwrap()
    );
    assert_eq!(
        fs::read_to_string(out.path().join("first.tsv")).unwrap(),
        "Source\tTarget\nGold\t골드\nHello\t안녕\nIron Sword\t철검\n"
    );
}
