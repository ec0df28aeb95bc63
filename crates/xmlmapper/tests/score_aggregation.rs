use xmlmapper::parse::parse_document;
use xmlmapper::score::sum_scores;
use xmlmapper::{ScoreTotal, ScoreWarning};

fn scores_doc(values: &[&str]) -> String {
    let mut s = String::from("<Response><ResultBlock>");
    for v in values {
        s.push_str(&format!("<Score>{}</Score>", v));
    }
    s.push_str("</ResultBlock></Response>");
    s
}

#[test]
fn no_scores_sum_to_zero() -> Result<(), Box<dyn std::error::Error>> {
    let doc = parse_document("<Response><ResultBlock/></Response>")?;
    let report = sum_scores(&doc);
    assert_eq!(report.total, ScoreTotal::Complete(0));
    assert!(report.warnings.is_empty());
    Ok(())
}

#[test]
fn invalid_scores_are_skipped() -> Result<(), Box<dyn std::error::Error>> {
    let xml = scores_doc(&["10", "20", "abc", "30"]);
    let doc = parse_document(&xml)?;
    let report = sum_scores(&doc);
    assert_eq!(report.total, ScoreTotal::Complete(60));
    assert_eq!(
        report.warnings,
        vec![ScoreWarning::InvalidScore { index: 2, text: "abc".into() }]
    );
    Ok(())
}

#[test]
fn whitespace_and_signs_are_accepted() -> Result<(), Box<dyn std::error::Error>> {
    let xml = scores_doc(&["  5 ", "\n+3\n", "-10", "", "1.5"]);
    let doc = parse_document(&xml)?;
    let report = sum_scores(&doc);
    assert_eq!(report.total, ScoreTotal::Complete(-2));
    assert_eq!(report.warnings.len(), 2);
    Ok(())
}

#[test]
fn overflow_stops_with_partial_sum() -> Result<(), Box<dyn std::error::Error>> {
    let xml = scores_doc(&["1", "2147483647", "5", "7"]);
    let doc = parse_document(&xml)?;
    let report = sum_scores(&doc);
    assert_eq!(report.total, ScoreTotal::Partial(1));
    assert_eq!(
        report.warnings,
        vec![ScoreWarning::Overflow { index: 1, partial: 1 }]
    );
    Ok(())
}

#[test]
fn negative_overflow_also_stops() -> Result<(), Box<dyn std::error::Error>> {
    let xml = scores_doc(&["-2147483648", "-1", "100"]);
    let doc = parse_document(&xml)?;
    assert_eq!(sum_scores(&doc).total, ScoreTotal::Partial(i32::MIN));
    Ok(())
}

#[test]
fn out_of_range_literal_is_invalid_not_overflow() -> Result<(), Box<dyn std::error::Error>> {
    let xml = scores_doc(&["2", "99999999999", "3"]);
    let doc = parse_document(&xml)?;
    let report = sum_scores(&doc);
    assert_eq!(report.total, ScoreTotal::Complete(5));
    assert!(matches!(report.warnings[0], ScoreWarning::InvalidScore { index: 1, .. }));
    Ok(())
}

#[test]
fn scores_are_found_anywhere_in_document_order() -> Result<(), Box<dyn std::error::Error>> {
    let xml = "<Score>1<Score>2</Score></Score>";
    let doc = parse_document(xml)?;
    // Outer text content is "12"; inner is "2".
    assert_eq!(sum_scores(&doc).total, ScoreTotal::Complete(14));

    let xml = "<r><a><Score>4</Score></a><b><c><Score>6</Score></c></b><score>100</score></r>";
    let doc = parse_document(xml)?;
    assert_eq!(sum_scores(&doc).total, ScoreTotal::Complete(10));
    Ok(())
}

#[test]
fn prefixed_score_is_not_counted() -> Result<(), Box<dyn std::error::Error>> {
    let xml = r#"<r xmlns:x="urn:x"><x:Score>9</x:Score><Score>1</Score></r>"#;
    let doc = parse_document(xml)?;
    assert_eq!(sum_scores(&doc).total, ScoreTotal::Complete(1));
    Ok(())
}
