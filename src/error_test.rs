use super::*;

#[test]
fn display_matches_mismatch() {
    let err = Error::MatchesMismatch {
        declared: 3,
        observed: 2,
    };
    assert_eq!(
        err.to_string(),
        "Matches header declares 3 but 2 clique block(s) were read"
    );
}

#[test]
fn display_missing_file() {
    let err = Error::MissingFile("A/x.txt".to_string());
    assert_eq!(err.to_string(), "missing file: A/x.txt");
}

#[test]
fn io_error_converts_and_sources() {
    let io_err = io::Error::new(io::ErrorKind::NotFound, "nope");
    let err: Error = io_err.into();
    assert!(err.to_string().contains("I/O error"));
    assert!(std::error::Error::source(&err).is_some());
}
