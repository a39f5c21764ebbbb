use super::*;

fn loc(file: &str, start: usize, end: usize) -> Location {
    Location {
        file_id: file.to_string(),
        start,
        end,
    }
}

fn sample_report() -> Report {
    let mut report = Report {
        header: Header {
            hash_method: "md5".to_string(),
            shred_size: 5,
            normalization: NormalizationSet::none(),
        },
        merge_program: Some("shredcompare".to_string()),
        filter_program: None,
        filtering: None,
        matches: None,
        trees: vec![
            (
                "A".to_string(),
                TreeProperties {
                    files: 1,
                    lines: 5,
                    matches: 0,
                    matchlines: 0,
                },
            ),
            (
                "B".to_string(),
                TreeProperties {
                    files: 1,
                    lines: 5,
                    matches: 0,
                    matchlines: 0,
                },
            ),
        ],
        files: [("A/x.txt".to_string(), 5), ("B/x.txt".to_string(), 5)]
            .into_iter()
            .collect(),
        cliques: vec![Clique::new(vec![
            loc("A/x.txt", 1, 5),
            loc("B/x.txt", 1, 5),
        ])],
    };
    report.preen();
    report
}

#[test]
fn round_trip_preserves_cliques_and_header() {
    let report = sample_report();
    let mut buf = Vec::new();
    write(&mut buf, &report).unwrap();

    let read_back = read(&mut &buf[..]).unwrap();
    assert_eq!(read_back.header.hash_method, report.header.hash_method);
    assert_eq!(read_back.header.shred_size, report.header.shred_size);
    assert_eq!(read_back.cliques.len(), report.cliques.len());
    assert_eq!(read_back.matches, Some(1));
    let (_, props_a) = read_back.trees.iter().find(|(n, _)| n == "A").unwrap();
    assert_eq!(props_a.matches, 1);
    assert_eq!(props_a.matchlines, 5);
}

#[test]
fn missing_magic_fails() {
    let input = b"Hash-Method: md5\n%%\n%%\n";
    let err = read(&mut &input[..]).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn matches_mismatch_is_detected() {
    let mut report = sample_report();
    report.matches = Some(99);
    let mut buf = Vec::new();
    // Write with the forged Matches value directly rather than through
    // preen, to exercise the reader's cross-check.
    writeln!(&mut buf, "#SCF-B 2.0").unwrap();
    writeln!(&mut buf, "Hash-Method: {}", report.header.hash_method).unwrap();
    writeln!(&mut buf, "Normalization: {}", report.header.normalization).unwrap();
    writeln!(&mut buf, "Shred-Size: {}", report.header.shred_size).unwrap();
    writeln!(&mut buf, "Matches: 99").unwrap();
    writeln!(&mut buf, "%%").unwrap();
    writeln!(&mut buf, "%%").unwrap();
    writeln!(&mut buf, "A/x.txt:1:5:5").unwrap();
    writeln!(&mut buf, "B/x.txt:1:5:5").unwrap();
    writeln!(&mut buf, "%%").unwrap();

    let err = read(&mut &buf[..]).unwrap_err();
    assert!(matches!(
        err,
        Error::MatchesMismatch {
            declared: 99,
            observed: 1
        }
    ));
}

#[test]
fn record_not_matching_grammar_fails() {
    let mut buf = Vec::new();
    writeln!(&mut buf, "#SCF-B 2.0").unwrap();
    writeln!(&mut buf, "Hash-Method: md5").unwrap();
    writeln!(&mut buf, "Normalization: none").unwrap();
    writeln!(&mut buf, "Shred-Size: 5").unwrap();
    writeln!(&mut buf, "Matches: 1").unwrap();
    writeln!(&mut buf, "%%").unwrap();
    writeln!(&mut buf, "%%").unwrap();
    writeln!(&mut buf, "not-a-valid-record").unwrap();
    writeln!(&mut buf, "%%").unwrap();

    let err = read(&mut &buf[..]).unwrap_err();
    assert!(matches!(err, Error::MalformedInput(_)));
}

#[test]
fn percent_escaping_round_trips() {
    let report = Report {
        header: Header {
            hash_method: "md5".to_string(),
            shred_size: 5,
            normalization: NormalizationSet::none(),
        },
        merge_program: None,
        filter_program: None,
        filtering: None,
        matches: None,
        trees: vec![],
        files: [("%weird/x.txt".to_string(), 5)].into_iter().collect(),
        cliques: vec![Clique::new(vec![loc("%weird/x.txt", 1, 5)])],
    };
    let mut buf = Vec::new();
    write(&mut buf, &report).unwrap();
    let text = String::from_utf8(buf.clone()).unwrap();
    assert!(text.contains("%%weird/x.txt"));

    let read_back = read(&mut &buf[..]).unwrap();
    assert_eq!(read_back.cliques[0].locations[0].file_id, "%weird/x.txt");
}
