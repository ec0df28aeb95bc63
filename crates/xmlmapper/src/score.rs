//! Summation of `Score` elements, independent of the JSON translation.
use tracing::warn;

use crate::error::ScoreWarning;
use crate::parse::{Document, trim_xml};

pub const SCORE_TAG: &str = "Score";

/// Outcome of a score walk.
///
/// `Partial` means aggregation stopped early because the next addition
/// would have overflowed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreTotal {
    Complete(i32),
    Partial(i32),
}

impl ScoreTotal {
    pub fn value(self) -> i32 {
        match self {
            ScoreTotal::Complete(v) | ScoreTotal::Partial(v) => v,
        }
    }

    pub fn is_partial(self) -> bool {
        matches!(self, ScoreTotal::Partial(_))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreReport {
    pub total: ScoreTotal,
    pub warnings: Vec<ScoreWarning>,
}

/// Sum every `Score` element in document order.
///
/// Unparseable values are skipped. The walk stops at the first value whose
/// addition would overflow and reports the sum accumulated before it.
pub fn sum_scores(doc: &Document) -> ScoreReport {
    let mut sum: i32 = 0;
    let mut warnings = Vec::new();

    let scores = doc.root.descendants().filter(|e| e.name == SCORE_TAG);
    for (index, element) in scores.enumerate() {
        let text = element.text_content();
        let text = trim_xml(&text);
        let score = match text.parse::<i32>() {
            Ok(v) => v,
            Err(err) => {
                let warning = ScoreWarning::InvalidScore {
                    index,
                    text: text.to_string(),
                };
                warn!(error = %err, "{}", warning);
                warnings.push(warning);
                continue;
            }
        };
        match sum.checked_add(score) {
            Some(next) => sum = next,
            None => {
                let warning = ScoreWarning::Overflow { index, partial: sum };
                warn!("{}", warning);
                warnings.push(warning);
                return ScoreReport {
                    total: ScoreTotal::Partial(sum),
                    warnings,
                };
            }
        }
    }

    ScoreReport {
        total: ScoreTotal::Complete(sum),
        warnings,
    }
}
