#![no_main]
use arbitrary::Arbitrary;
use libfuzzer_sys::{arbitrary, fuzz_target};

#[derive(Arbitrary, Debug)]
enum FuzzScore {
    Number(i32),
    Text(String),
}

impl FuzzScore {
    fn as_text(&self) -> String {
        match self {
            FuzzScore::Number(n) => n.to_string(),
            FuzzScore::Text(s) => s.clone(),
        }
    }
}

fn reference_total(scores: &[FuzzScore]) -> i32 {
    let mut sum: i32 = 0;
    for s in scores {
        if let Ok(n) = xmlmapper::parse::trim_xml(&s.as_text()).parse::<i32>() {
            match sum.checked_add(n) {
                Some(next) => sum = next,
                None => break,
            }
        }
    }
    sum
}

fuzz_target!(|scores: Vec<FuzzScore>| {
    // Only plain text: nothing that needs escaping or that XML forbids.
    let plain = |s: &String| {
        !s.chars()
            .any(|c| matches!(c, '<' | '>' | '&' | '\r') || (c.is_control() && !matches!(c, '\t' | '\n')))
    };
    if scores.iter().any(|s| matches!(s, FuzzScore::Text(t) if !plain(t))) {
        return;
    }

    let mut xml = String::from("<Response><ResultBlock>");
    for s in &scores {
        xml.push_str(&format!("<Score>{}</Score>", s.as_text()));
    }
    xml.push_str("</ResultBlock></Response>");

    let v = match xmlmapper::convert_to_value(&xml, &xmlmapper::Options::default()) {
        Ok(v) => v,
        Err(_) => return,
    };
    let got = &v["Response"]["ResultBlock"]["MatchSummary"]["TotalMatchScore"];
    let want = reference_total(&scores).to_string();
    assert_eq!(got.as_str(), Some(want.as_str()), "xml: {}", xml);
});
