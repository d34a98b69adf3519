use log::{debug, trace};

use crate::error::{ExtractError, ExtractErrorKind};
use crate::parser;
use crate::scanner::{candidates, Span};
use crate::value::{Map, Value};

/// Extracts the best mapping found in `text`.
///
/// Well-formed JSON objects take a fast path through the strict decoder
/// and never pay for a scan. Anything else is scanned for balanced `{…}`
/// candidates, which are evaluated longest-first until one yields a
/// mapping. The empty mapping is a valid result.
pub fn extract_mapping(text: &str) -> Result<Map, ExtractError> {
    if let Ok(serde_json::Value::Object(object)) = serde_json::from_str(text) {
        debug!("strict json fast path matched");

        return Ok(object
            .into_iter()
            .map(|(k, v)| (k, Value::from(v)))
            .collect());
    }

    let mut spans: Vec<Span> = candidates(text).collect();

    // Longest first: the outermost object is more likely the intended one
    // than any of its children or a coincidental fragment. Ties go to the
    // earliest start offset.
    spans.sort_by(|a, b| {
        b.text
            .len()
            .cmp(&a.text.len())
            .then(a.start.cmp(&b.start))
    });

    debug!(
        "{} candidate span(s) in {} bytes of input",
        spans.len(),
        text.len()
    );

    for span in &spans {
        match parser::parse(span.text) {
            Ok(Value::Object(map)) => return Ok(map),
            Ok(_) => trace!("candidate at {} is not a mapping", span.start),
            Err(err) => trace!("candidate at {} rejected: {}", span.start, err),
        }
    }

    Err(ExtractError::new(
        text,
        ExtractErrorKind::NoCandidate {
            attempted: spans.len(),
        },
    ))
}
