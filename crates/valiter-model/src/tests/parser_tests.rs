use crate::{
    RecordError,
    parser::{Record, parse_record},
};

#[test]
fn reward_record_splits_on_first_equals() {
    let record = parse_record("S2 = 10").expect("reward record should parse");
    assert_eq!(
        record,
        Record::Reward {
            name: "S2",
            reward: 10.0
        }
    );
}

#[test]
fn edge_record_accepts_brackets_and_loose_whitespace() {
    let record = parse_record("S1 :[ A,B ,  C ]").expect("edge record should parse");
    assert_eq!(
        record,
        Record::Edges {
            name: "S1",
            targets: vec!["A", "B", "C"]
        }
    );
}

#[test]
fn edge_record_without_brackets_is_accepted() {
    let record = parse_record("S1 : A, B").expect("edge record should parse");
    assert_eq!(
        record,
        Record::Edges {
            name: "S1",
            targets: vec!["A", "B"]
        }
    );
}

#[test]
fn empty_edge_list_declares_no_targets() {
    let record = parse_record("S1 : []").expect("edge record should parse");
    assert_eq!(
        record,
        Record::Edges {
            name: "S1",
            targets: vec![]
        }
    );
}

#[test]
fn probability_tokens_are_whitespace_separated() {
    let record = parse_record("S1 %  0.2 0.3\t0.5").expect("probability record should parse");
    assert_eq!(
        record,
        Record::Probabilities {
            name: "S1",
            values: vec![0.2, 0.3, 0.5]
        }
    );
}

#[test]
fn line_without_delimiter_is_unrecognized() {
    assert_eq!(
        parse_record("S1 10"),
        Err(RecordError::UnrecognizedRecord)
    );
}

#[test]
fn mixed_delimiters_are_ambiguous() {
    assert_eq!(
        parse_record("S1 = 0.5 % 2"),
        Err(RecordError::AmbiguousRecord {
            first: '=',
            second: '%'
        })
    );
}

#[test]
fn missing_name_is_rejected() {
    assert_eq!(parse_record(" = 4"), Err(RecordError::EmptyStateName));
}

#[test]
fn bad_and_non_finite_numbers_are_rejected() {
    assert_eq!(
        parse_record("S1 = ten"),
        Err(RecordError::InvalidNumber {
            token: "ten".to_string()
        })
    );
    assert_eq!(
        parse_record("S1 % 0.5 NaN"),
        Err(RecordError::InvalidNumber {
            token: "NaN".to_string()
        })
    );
}
