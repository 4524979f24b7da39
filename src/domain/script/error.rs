#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScriptError {
    #[error("unrecognized voice tag '{tag}' in utterance {index}")]
    UnknownVoice { tag: String, index: usize },
    #[error("script contains no utterances")]
    Empty,
}
