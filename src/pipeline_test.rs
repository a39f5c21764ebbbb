//! End-to-end scenarios over the full shred -> clique -> coalesce -> SCF-B
//! pipeline, using temp directories and the library API directly (the
//! CLI binaries are thin wrappers over exactly these calls).
use crate::cancel::CancelToken;
use crate::clique::build_cliques;
use crate::coalesce::coalesce;
use crate::filters::filter_by_significance;
use crate::model::{Header, Report};
use crate::normalize::NormalizationSet;
use crate::reporter::Reporter;
use crate::shif_a::{self, BodyFraming, ShifADocument};
use crate::shred::shred_files;
use crate::walk::TreeWalker;

fn shred_tree(
    root: &std::path::Path,
    c_only: bool,
    shred_size: usize,
    normalization: &NormalizationSet,
) -> ShifADocument {
    let walker = TreeWalker::new(root, c_only, None).unwrap();
    let files = walker.files().unwrap();
    let mut reporter = Reporter::new();
    let cancel = CancelToken::new();
    let shredded = shred_files(&files, shred_size, normalization, &mut reporter, &cancel)
        .unwrap()
        .unwrap();
    ShifADocument {
        header: Header {
            hash_method: "md5".to_string(),
            shred_size,
            normalization: normalization.clone(),
        },
        generator_program: "shredtree".to_string(),
        comments: Vec::new(),
        files: shredded,
    }
}

fn compare(docs: &[ShifADocument], cross_tree_only: bool) -> Report {
    let mut reporter = Reporter::new();
    let ingest = build_cliques(docs, cross_tree_only, &mut reporter).unwrap();
    let cancel = CancelToken::new();
    let cliques = coalesce(ingest.cliques, &mut reporter, &cancel);
    let mut report = Report {
        header: ingest.header,
        merge_program: Some("shredcompare".to_string()),
        filter_program: None,
        filtering: None,
        matches: None,
        trees: ingest.trees,
        files: ingest.files,
        cliques,
    };
    report.preen();
    report
}

/// S1: two single-file trees with the same five lines produce one
/// clique with two full-file locations.
#[test]
fn s1_identical_single_file_trees_produce_one_clique() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("A")).unwrap();
    std::fs::create_dir(dir.path().join("B")).unwrap();
    let body = "l1\nl2\nl3\nl4\nl5\n";
    std::fs::write(dir.path().join("A").join("x.txt"), body).unwrap();
    std::fs::write(dir.path().join("B").join("x.txt"), body).unwrap();

    let none = NormalizationSet::none();
    let a = shred_tree(&dir.path().join("A"), false, 5, &none);
    let b = shred_tree(&dir.path().join("B"), false, 5, &none);

    let report = compare(&[a, b], false);
    assert_eq!(report.cliques.len(), 1);
    let clique = &report.cliques[0];
    assert_eq!(clique.locations.len(), 2);
    for loc in &clique.locations {
        assert_eq!((loc.start, loc.end), (1, 5));
    }
}

/// S2: a blank line inserted in one tree's copy still coalesces to the
/// same clique under `remove_whitespace`, spanning the extra line.
#[test]
fn s2_blank_line_is_absorbed_under_remove_whitespace() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("A")).unwrap();
    std::fs::create_dir(dir.path().join("B")).unwrap();
    std::fs::write(dir.path().join("A").join("x.txt"), "l1\nl2\nl3\nl4\nl5\n").unwrap();
    std::fs::write(dir.path().join("B").join("x.txt"), "l1\nl2\n\nl3\nl4\nl5\n").unwrap();

    let ws = NormalizationSet::with_remove_whitespace(true);
    let a = shred_tree(&dir.path().join("A"), false, 5, &ws);
    let b = shred_tree(&dir.path().join("B"), false, 5, &ws);

    let report = compare(&[a, b], false);
    assert_eq!(report.cliques.len(), 1);
    let clique = &report.cliques[0];
    let a_loc = clique
        .locations
        .iter()
        .find(|l| l.file_id == "A/x.txt")
        .unwrap();
    let b_loc = clique
        .locations
        .iter()
        .find(|l| l.file_id == "B/x.txt")
        .unwrap();
    assert_eq!((a_loc.start, a_loc.end), (1, 5));
    assert_eq!((b_loc.start, b_loc.end), (1, 6));
}

/// S3: one tree with two identical files yields one same-tree clique
/// without cross-tree-only, and none with it.
#[test]
fn s3_cross_tree_only_drops_same_tree_clique() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("A")).unwrap();
    let body = "l1\nl2\nl3\nl4\nl5\n";
    std::fs::write(dir.path().join("A").join("one.txt"), body).unwrap();
    std::fs::write(dir.path().join("A").join("two.txt"), body).unwrap();

    let none = NormalizationSet::none();
    let a = shred_tree(&dir.path().join("A"), false, 5, &none);

    let without_flag = compare(std::slice::from_ref(&a), false);
    assert_eq!(without_flag.cliques.len(), 1);
    assert_eq!(without_flag.cliques[0].locations.len(), 2);

    let with_flag = compare(&[a], true);
    assert_eq!(with_flag.cliques.len(), 0);
}

/// S4: padded trivial C boilerplate is dropped by `filter_by_significance`.
#[test]
fn s4_significance_filter_drops_trivial_c_boilerplate() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::create_dir(dir.path().join("A")).unwrap();
    std::fs::create_dir(dir.path().join("B")).unwrap();
    let body = "int main(void){return 0;}\nint main(void){return 0;}\nint main(void){return 0;}\nint main(void){return 0;}\nint main(void){return 0;}\n";
    std::fs::write(dir.path().join("A").join("x.c"), body).unwrap();
    std::fs::write(dir.path().join("B").join("x.c"), body).unwrap();

    let none = NormalizationSet::none();
    let a = shred_tree(&dir.path().join("A"), true, 5, &none);
    let b = shred_tree(&dir.path().join("B"), true, 5, &none);

    let mut report = compare(&[a, b], false);
    assert_eq!(report.cliques.len(), 1);
    filter_by_significance(&mut report, dir.path()).unwrap();
    assert_eq!(report.cliques.len(), 0);
}

/// S5: two cliques with overlapping ranges in the same two files
/// coalesce into one spanning clique.
#[test]
fn s5_coalescer_merges_overlapping_two_file_cliques() {
    use crate::model::{Clique, Location};

    let alpha = Clique::new(vec![
        Location {
            file_id: "A/x.txt".to_string(),
            start: 10,
            end: 14,
        },
        Location {
            file_id: "B/x.txt".to_string(),
            start: 100,
            end: 104,
        },
    ]);
    let beta = Clique::new(vec![
        Location {
            file_id: "A/x.txt".to_string(),
            start: 11,
            end: 15,
        },
        Location {
            file_id: "B/x.txt".to_string(),
            start: 101,
            end: 105,
        },
    ]);

    let mut reporter = Reporter::new();
    let merged = coalesce(vec![alpha, beta], &mut reporter, &CancelToken::new());
    assert_eq!(merged.len(), 1);
    let a = merged[0]
        .locations
        .iter()
        .find(|l| l.file_id == "A/x.txt")
        .unwrap();
    let b = merged[0]
        .locations
        .iter()
        .find(|l| l.file_id == "B/x.txt")
        .unwrap();
    assert_eq!((a.start, a.end), (10, 15));
    assert_eq!((b.start, b.end), (100, 105));
}

/// S6: a SHIF-A stream missing the magic line fails to read.
#[test]
fn s6_missing_magic_line_fails_to_read() {
    let input = b"Normalization: none\nShred-Size: 5\nHash-Method: md5\nGenerator-Program: x\n%%\n";
    let err = shif_a::read(&mut &input[..], BodyFraming::Binary).unwrap_err();
    assert!(matches!(err, crate::error::Error::MalformedInput(_)));
}
