mod common;

use common::{init_logger, person_map, persons, Account, Person};
use csv_record_codec::{
    deserialize, serialize, CodecError, CsvOptions, FieldMap, Locale, SemanticType,
};

const HEADER: &str = "FirstName,LastName,Age\r\n";

#[test]
fn absent_input_is_rejected() {
    init_logger();
    let result: Result<Vec<Person>, _> = deserialize(None, None, &CsvOptions::default());
    assert!(matches!(result, Err(CodecError::InvalidArgument(_))));
}

#[test]
fn short_row_fails_the_whole_call() {
    let text = format!("{HEADER}Alex,Friedman,27\r\nJack,Bauer\r\nCloe,O'Brien,35\r\n");
    let result: Result<Vec<Person>, _> = deserialize(Some(text.as_str()), None, &CsvOptions::default());

    assert_eq!(
        result.err(),
        Some(CodecError::RowShape {
            line: 3,
            expected: 3,
            actual: 2
        })
    );
}

#[test]
fn long_row_is_a_shape_error() {
    let text = format!("{HEADER}Alex,Friedman,27,extra\r\n");
    let result: Result<Vec<Person>, _> = deserialize(Some(text.as_str()), None, &CsvOptions::default());
    assert!(matches!(
        result,
        Err(CodecError::RowShape {
            expected: 3,
            actual: 4,
            ..
        })
    ));
}

#[test]
fn unterminated_quote_is_reported_in_any_column() {
    for row in [
        "\"Alex,Friedman,27\r\nJack,Bauer,45\r\n",
        "Alex,\"Friedman,27\r\nJack,Bauer,45\r\n",
        "Alex,Friedman,\"27\r\n",
    ] {
        let text = format!("{HEADER}{row}");
        let result: Result<Vec<Person>, _> =
            deserialize(Some(text.as_str()), None, &CsvOptions::default());

        match result {
            Err(CodecError::Quote { line, reason }) => {
                assert_eq!(line, 2);
                assert_eq!(reason, "unterminated quote");
            }
            other => panic!("expected a quote error, got {other:?}"),
        }
    }
}

#[test]
fn text_after_closing_quote_is_reported() {
    let text = format!("{HEADER}\"Alex\"ander,Friedman,27\r\n");
    let result: Result<Vec<Person>, _> = deserialize(Some(text.as_str()), None, &CsvOptions::default());
    assert!(matches!(result, Err(CodecError::Quote { line: 2, .. })));
}

#[test]
fn malformed_number_names_the_token() {
    let text = format!("{HEADER}Alex,Friedman,twenty\r\n");
    let result: Result<Vec<Person>, _> = deserialize(Some(text.as_str()), None, &CsvOptions::default());

    assert_eq!(
        result.err(),
        Some(CodecError::ScalarFormat {
            token: "twenty".to_string(),
            expected: SemanticType::Integer
        })
    );
}

#[test]
fn out_of_range_integer_is_rejected() {
    let text = format!("{HEADER}Alex,Friedman,99999999999\r\n");
    let result: Result<Vec<Person>, _> = deserialize(Some(text.as_str()), None, &CsvOptions::default());
    assert!(result.is_err());
}

#[test]
fn decimal_separator_must_match_locale() {
    let options = CsvOptions::new().locale(Locale::from_name("pl-PL").unwrap());
    let result: Result<Vec<f64>, _> = deserialize(Some("1.5\r\n"), None, &options);
    assert!(matches!(result, Err(CodecError::ScalarFormat { .. })));
}

#[test]
fn unknown_field_in_map() {
    let map = FieldMap::<Person>::new().map("MiddleName", "middle");

    assert_eq!(
        serialize(&persons(), Some(&map), &CsvOptions::default()).err(),
        Some(CodecError::UnknownField {
            field: "MiddleName".to_string()
        })
    );
    let result: Result<Vec<Person>, _> = deserialize(Some("middle\r\nX\r\n"), Some(&map), &CsvOptions::default());
    assert!(matches!(result, Err(CodecError::UnknownField { .. })));
}

#[test]
fn duplicate_column_in_map() {
    let map = FieldMap::<Person>::new()
        .map("FirstName", "name")
        .map("LastName", "name");

    assert_eq!(
        serialize(&persons(), Some(&map), &CsvOptions::default()).err(),
        Some(CodecError::DuplicateColumn {
            column: "name".to_string()
        })
    );
}

#[test]
fn empty_map_is_rejected() {
    let map = FieldMap::<Person>::new();
    assert!(matches!(
        serialize(&persons(), Some(&map), &CsvOptions::default()),
        Err(CodecError::InvalidArgument(_))
    ));
}

#[test]
fn mapped_column_missing_from_header() {
    let text = "forename,lastname,age\r\nAlex,Friedman,27\r\n";
    let result: Result<Vec<Person>, _> = deserialize(Some(text), Some(&person_map()), &CsvOptions::default());

    assert_eq!(
        result.err(),
        Some(CodecError::MissingColumn {
            column: "surname".to_string()
        })
    );
}

#[test]
fn nested_records_cannot_be_deserialized() {
    let result: Result<Vec<Account>, _> =
        deserialize(Some("Owner,Balance\r\nJohn Doe,1.5\r\n"), None, &CsvOptions::default());

    assert_eq!(
        result.err(),
        Some(CodecError::UnsupportedNesting {
            field: "Owner".to_string()
        })
    );
}

#[test]
fn conflicting_options_are_rejected() {
    let same = CsvOptions::new().separator(';').quote(';');
    assert!(matches!(
        serialize(&persons(), None, &same),
        Err(CodecError::InvalidArgument(_))
    ));

    let line_break = CsvOptions::new().separator('\n');
    let result: Result<Vec<Person>, _> = deserialize(Some(HEADER), None, &line_break);
    assert!(matches!(result, Err(CodecError::InvalidArgument(_))));
}

#[test]
fn unknown_locale_is_rejected() {
    assert!(matches!(
        Locale::from_name("tlh-QO"),
        Err(CodecError::InvalidArgument(_))
    ));
}

#[test]
fn errors_read_well() {
    let error = CodecError::RowShape {
        line: 4,
        expected: 3,
        actual: 2,
    };
    assert_eq!(error.to_string(), "line 4: expected 3 columns, found 2");
}
