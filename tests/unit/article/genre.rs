use super::*;

#[test]
fn real_estate_keywords_win() {
    let c = KeywordGenreClassifier::default();
    assert_eq!(
        c.classify("Dubai property prices: 不動産 housing construction boom"),
        "不動産"
    );
}

#[test]
fn no_hits_returns_default_label() {
    let c = KeywordGenreClassifier::default();
    assert_eq!(c.classify("nothing relevant here"), "ビジネス");
    assert_eq!(c.classify(""), "ビジネス");
}

#[test]
fn ties_keep_the_earlier_row() {
    let c = KeywordGenreClassifier::new(
        vec![
            ("first".to_string(), vec!["alpha".to_string()]),
            ("second".to_string(), vec!["beta".to_string()]),
        ],
        "none",
    );
    assert_eq!(c.classify("alpha beta"), "first");
    assert_eq!(c.classify("BETA"), "second");
}
