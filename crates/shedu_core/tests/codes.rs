use pretty_assertions::assert_eq;
use shedu_core::{plan_batch, split_codes, AccessCode, PlannedCode};

fn valid(code: &str) -> PlannedCode {
    PlannedCode::Valid(AccessCode::parse(code).unwrap())
}

#[test]
fn plan_is_sorted_and_deduplicated() {
    let plan = plan_batch(&["22222222", "11111111", "22222222", " 11111111 "]);
    assert_eq!(plan.entries(), &[valid("11111111"), valid("22222222")]);
}

#[test]
fn invalid_tokens_keep_their_sorted_slot() {
    let plan = plan_batch(&["33333333", "abc", "1234", "11111111"]);
    assert_eq!(
        plan.entries(),
        &[
            valid("11111111"),
            PlannedCode::Invalid("1234".to_string()),
            valid("33333333"),
            PlannedCode::Invalid("abc".to_string()),
        ]
    );
}

#[test]
fn plan_is_independent_of_input_order() {
    let a = plan_batch(&["87654321", "12345678", "x"]);
    let b = plan_batch(&["x", "12345678", "87654321", "12345678"]);
    assert_eq!(a, b);
}

#[test]
fn split_accepts_commas_spaces_and_newlines() {
    let tokens = split_codes("11111111, 22222222\n33333333\t,,44444444\r\n");
    assert_eq!(
        tokens,
        vec!["11111111", "22222222", "33333333", "44444444"]
    );
    assert!(split_codes(" ,\n ").is_empty());
}

#[test]
fn code_error_names_the_token() {
    let err = AccessCode::parse("12a").unwrap_err();
    assert_eq!(err.to_string(), "'12a' is not a valid 8-digit number");
}
