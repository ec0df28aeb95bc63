use serde_json::{Map, Value};

use crate::{Error, Result};

pub const SUMMARY_PATH: [&str; 2] = ["Response", "ResultBlock"];
pub const SUMMARY_KEY: &str = "MatchSummary";
pub const TOTAL_KEY: &str = "TotalMatchScore";

/// Set `Response.ResultBlock.MatchSummary` to `{"TotalMatchScore": "<total>"}`.
///
/// Every segment of the path must already exist as an object. An existing
/// `MatchSummary` is overwritten in place.
pub fn inject_summary(value: &mut Value, total: i32) -> Result<()> {
    let mut target = value;
    for segment in SUMMARY_PATH {
        target = match target {
            Value::Object(map) => map.get_mut(segment),
            _ => None,
        }
        .ok_or_else(|| Error::PathNotFound {
            path: SUMMARY_PATH.join("."),
        })?;
    }
    let Value::Object(block) = target else {
        return Err(Error::PathNotFound {
            path: SUMMARY_PATH.join("."),
        });
    };

    let mut summary = Map::new();
    summary.insert(TOTAL_KEY.to_string(), Value::String(total.to_string()));
    block.insert(SUMMARY_KEY.to_string(), Value::Object(summary));
    Ok(())
}
