//! Integration tests for the text notation

use pew_arrangements::{
    check, generate_all_valid_vectors, parse, parse_matrix, parse_vector, Matrix, Occupancy,
    OccupancyVector,
};

#[test]
fn test_vector_display_round_trip() {
    for vector in generate_all_valid_vectors() {
        let text = vector.to_string();
        assert_eq!(parse_vector(&text).expect("Should parse"), vector);
        assert_eq!(parse(&text).expect("Should parse"), Occupancy::Vector(vector));
    }
}

#[test]
fn test_matrix_display_round_trip() {
    for vector in generate_all_valid_vectors() {
        for matrix in vector.realizations() {
            let text = matrix.to_string();
            assert_eq!(parse_matrix(&text).expect("Should parse"), matrix);
        }
    }
}

#[test]
fn test_matrix_json_form_parses() {
    let json = serde_json::to_string(&Matrix::default()).unwrap();
    assert_eq!(parse_matrix(&json).expect("Should parse"), Matrix::default());
}

#[test]
fn test_multiline_input_with_comments() {
    let input = r#"
        [
            0 0 0   // inner
          / 2 0 0   // middle
          / 0 2 2   // outer
        ]
    "#;
    let matrix = parse_matrix(input).expect("Should parse");
    assert_eq!(matrix, Matrix::new([[0, 0, 0], [2, 0, 0], [0, 2, 2]]));
}

#[test]
fn test_check_reports_rule_violations() {
    assert!(check("[0 0 0 / 0 0 0 / 2 2 2]").is_ok());
    assert!(check("(2, 2, 2, 2, 2, 2)").is_ok());

    let err = check("[2 0 0 / 2 0 0 / 0 0 0]").unwrap_err();
    assert!(err.to_string().contains("need 1 more pair"));
}

#[test]
fn test_error_report_points_at_problem() {
    let source = "(2, 2, 2; 2, 2, 2)";
    let errors = parse_vector(source).unwrap_err();
    assert!(!errors.is_empty());
    assert_eq!(errors[0].span(), &(8..9));
    let report = errors[0].format(source, "vector");
    assert!(report.contains("Unexpected ';'"));
}

#[test]
fn test_vector_from_matrix_occupancy() {
    let occupancy = parse("[2 0 0 / 0 2 0 / 0 0 2]").expect("Should parse");
    assert_eq!(
        occupancy.to_vector(),
        OccupancyVector::new([2, 2, 2, 2, 2, 2])
    );
}
