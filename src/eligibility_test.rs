use super::*;
use std::io::Write;

#[test]
fn relevant_line_after_normalization() {
    let set = NormalizationSet::with_remove_whitespace(true);
    assert_eq!(
        normalize_and_filter("   \t  ", &set),
        None,
        "whitespace-only line should not be relevant"
    );
    assert_eq!(normalize_and_filter("  a  ", &set).as_deref(), Some("a"));
}

#[test]
fn c_only_extension_check() {
    assert!(has_c_only_extension(Path::new("foo.c")));
    assert!(has_c_only_extension(Path::new("foo.H")));
    assert!(has_c_only_extension(Path::new("readme.txt")));
    assert!(!has_c_only_extension(Path::new("foo.rs")));
}

#[test]
fn empty_file_is_ineligible() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("empty.txt");
    std::fs::File::create(&path).unwrap();
    assert!(!is_eligible_file(&path, false).unwrap());
}

#[test]
fn binary_file_is_ineligible() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("data.bin");
    let mut f = std::fs::File::create(&path).unwrap();
    f.write_all(b"hello\x00world").unwrap();
    assert!(!is_eligible_file(&path, false).unwrap());
}

#[test]
fn c_only_mode_rejects_non_matching_extension() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo.rs");
    std::fs::write(&path, "fn main() {}\n").unwrap();
    assert!(!is_eligible_file(&path, true).unwrap());
    assert!(is_eligible_file(&path, false).unwrap());
}

#[test]
fn normal_text_file_is_eligible() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("foo.txt");
    std::fs::write(&path, "hello\n").unwrap();
    assert!(is_eligible_file(&path, true).unwrap());
}
