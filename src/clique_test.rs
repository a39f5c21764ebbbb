use super::*;
use crate::model::{FileShreds, Shred};
use crate::normalize::NormalizationSet;

fn doc(tree: &str, files: Vec<(&str, Vec<Shred>)>) -> ShifADocument {
    ShifADocument {
        header: Header {
            hash_method: "md5".to_string(),
            shred_size: 5,
            normalization: NormalizationSet::none(),
        },
        generator_program: "test".to_string(),
        comments: vec![],
        files: files
            .into_iter()
            .map(|(id, shreds)| FileShreds {
                file_id: format!("{tree}/{id}"),
                shreds,
            })
            .collect(),
    }
}

fn shred(start: usize, end: usize, tag: u8) -> Shred {
    Shred {
        start,
        end,
        hash: [tag; 16],
    }
}

#[test]
fn incompatible_normalization_is_rejected() {
    let mut a = doc("A", vec![("x.txt", vec![shred(1, 5, 1)])]);
    let mut b = doc("B", vec![("x.txt", vec![shred(1, 5, 1)])]);
    a.header.normalization = NormalizationSet::none();
    b.header.normalization = NormalizationSet::with_remove_whitespace(true);

    let mut reporter = Reporter::new();
    let err = build_cliques(&[a, b], false, &mut reporter).unwrap_err();
    assert!(matches!(err, Error::Incompatible(_)));
}

#[test]
fn singleton_hash_classes_are_dropped() {
    let a = doc("A", vec![("x.txt", vec![shred(1, 5, 1)])]);
    let mut reporter = Reporter::new();
    let result = build_cliques(&[a], false, &mut reporter).unwrap();
    assert!(result.cliques.is_empty());
}

#[test]
fn shared_hash_across_trees_forms_a_clique() {
    let a = doc("A", vec![("x.txt", vec![shred(1, 5, 1)])]);
    let b = doc("B", vec![("x.txt", vec![shred(1, 5, 1)])]);
    let mut reporter = Reporter::new();
    let result = build_cliques(&[a, b], false, &mut reporter).unwrap();
    assert_eq!(result.cliques.len(), 1);
    assert_eq!(result.cliques[0].locations.len(), 2);
}

#[test]
fn cross_tree_only_drops_same_tree_clique() {
    let a = doc(
        "A",
        vec![
            ("x.txt", vec![shred(1, 5, 1)]),
            ("y.txt", vec![shred(1, 5, 1)]),
        ],
    );
    let mut reporter = Reporter::new();
    let result = build_cliques(&[a], true, &mut reporter).unwrap();
    assert!(result.cliques.is_empty());
}

#[test]
fn cross_tree_only_keeps_cross_tree_clique() {
    let a = doc("A", vec![("x.txt", vec![shred(1, 5, 1)])]);
    let b = doc("B", vec![("x.txt", vec![shred(1, 5, 1)])]);
    let mut reporter = Reporter::new();
    let result = build_cliques(&[a, b], true, &mut reporter).unwrap();
    assert_eq!(result.cliques.len(), 1);
}

#[test]
fn file_line_count_is_max_shred_end_observed() {
    let a = doc(
        "A",
        vec![(
            "x.txt",
            vec![shred(1, 5, 1), shred(2, 8, 2), shred(3, 6, 1)],
        )],
    );
    let mut reporter = Reporter::new();
    let result = build_cliques(&[a], false, &mut reporter).unwrap();
    assert_eq!(result.files.get("A/x.txt"), Some(&8));
}

#[test]
fn tree_properties_count_files_and_lines() {
    let a = doc(
        "A",
        vec![
            ("x.txt", vec![shred(1, 5, 1)]),
            ("y.txt", vec![shred(1, 10, 2)]),
        ],
    );
    let mut reporter = Reporter::new();
    let result = build_cliques(&[a], false, &mut reporter).unwrap();
    let (_, props) = result.trees.iter().find(|(n, _)| n == "A").unwrap();
    assert_eq!(props.files, 2);
    assert_eq!(props.lines, 15);
}
