use super::error::ScriptError;
use super::model::{UtteranceRecord, Voice};

/// Character separating one speaker cue from the next.
const SPEAKER_DELIMITER: char = '@';

/// Parse a raw script into an ordered list of utterances.
///
/// The script is split on `@`; each non-empty segment starts with a voice
/// tag followed by the utterance text. One unrecognized tag invalidates
/// the whole document, so validation finishes before any synthesis task
/// is submitted. Empty segments are discarded and consume no index.
pub fn parse(raw: &str) -> Result<Vec<UtteranceRecord>, ScriptError> {
    let mut records = Vec::new();

    for segment in raw.split(SPEAKER_DELIMITER) {
        let segment = segment.trim();
        if segment.is_empty() {
            continue;
        }

        let mut parts = segment.splitn(2, char::is_whitespace);
        let tag = parts.next().unwrap_or_default();
        let voice = normalize_tag(tag)
            .parse::<Voice>()
            .map_err(|_| ScriptError::UnknownVoice {
                tag: tag.to_string(),
                index: records.len(),
            })?;
        let text = parts.next().unwrap_or_default().trim().to_string();

        records.push(UtteranceRecord {
            index: records.len(),
            voice,
            text,
        });
    }

    if records.is_empty() {
        return Err(ScriptError::Empty);
    }

    Ok(records)
}

/// Voice tags are case-sensitive proper nouns on the provider side, so
/// `salli` and `SALLI` both normalize to `Salli`.
fn normalize_tag(tag: &str) -> String {
    let mut chars = tag.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + &chars.as_str().to_lowercase(),
        None => String::new(),
    }
}
