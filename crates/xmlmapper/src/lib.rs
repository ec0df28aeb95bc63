#![doc = include_str!("../README.md")]

pub mod error;
pub mod options;
pub mod parse;
pub mod translate;
pub mod score;
pub mod merge;
pub mod write;

pub use crate::error::{Error, Result, ScoreWarning};
pub use crate::options::{Options, OverflowPolicy};
pub use crate::score::{ScoreReport, ScoreTotal};

use std::io::Read;

use serde_json::Value;
use tracing::{debug, error};

/// Output returned whenever a conversion fails.
pub const FALLBACK: &str = "{}";

/// Convert XML text to indented JSON with the default [`Options`].
///
/// Never fails: any error is logged and `{}` is returned instead.
pub fn convert(xml: &str) -> String {
    convert_with_options(xml, &Options::default())
}

pub fn convert_with_options(xml: &str, options: &Options) -> String {
    match try_convert(xml, options) {
        Ok(json) => json,
        Err(err) => {
            error!(error = %err, "failed to convert XML to JSON");
            FALLBACK.to_string()
        }
    }
}

/// Like [`convert_with_options`] but surfaces the error instead of `{}`.
pub fn try_convert(xml: &str, options: &Options) -> Result<String> {
    let value = convert_to_value(xml, options)?;
    crate::write::to_string_indented(&value, options.indent)
}

/// Translate, aggregate and merge, stopping short of serialization.
pub fn convert_to_value(xml: &str, options: &Options) -> Result<Value> {
    let doc = crate::parse::parse_document(xml)?;
    let report = crate::score::sum_scores(&doc);
    if let (OverflowPolicy::Fail, ScoreTotal::Partial(partial)) = (options.overflow, report.total) {
        return Err(Error::ScoreOverflow { partial });
    }
    debug!(
        total = report.total.value(),
        partial = report.total.is_partial(),
        warnings = report.warnings.len(),
        "scores aggregated"
    );

    let mut value = crate::translate::document_to_value(&doc)?;
    crate::merge::inject_summary(&mut value, report.total.value())?;
    Ok(value)
}

pub fn try_convert_from_reader<R: Read>(mut reader: R, options: &Options) -> Result<String> {
    let mut s = String::new();
    reader.read_to_string(&mut s)?;
    try_convert(&s, options)
}
