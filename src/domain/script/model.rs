use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// Voices a script may reference by tag.
///
/// This is the fixed set accepted by the parser; every variant names a
/// neural-capable Polly voice. Scripts using any other tag are rejected
/// before a single synthesis task is submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Voice {
    Joanna,
    Matthew,
    Ivy,
    Kendra,
    Kimberly,
    Salli,
    Joey,
    Justin,
    Kevin,
}

impl Voice {
    pub fn as_str(&self) -> &'static str {
        match self {
            Voice::Joanna => "Joanna",
            Voice::Matthew => "Matthew",
            Voice::Ivy => "Ivy",
            Voice::Kendra => "Kendra",
            Voice::Kimberly => "Kimberly",
            Voice::Salli => "Salli",
            Voice::Joey => "Joey",
            Voice::Justin => "Justin",
            Voice::Kevin => "Kevin",
        }
    }
}

impl FromStr for Voice {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Joanna" => Ok(Voice::Joanna),
            "Matthew" => Ok(Voice::Matthew),
            "Ivy" => Ok(Voice::Ivy),
            "Kendra" => Ok(Voice::Kendra),
            "Kimberly" => Ok(Voice::Kimberly),
            "Salli" => Ok(Voice::Salli),
            "Joey" => Ok(Voice::Joey),
            "Justin" => Ok(Voice::Justin),
            "Kevin" => Ok(Voice::Kevin),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for Voice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One speaker-tagged utterance from the script, in parse order.
///
/// `index` is the ordering key carried through the whole pipeline; it is
/// assigned at parse time and never changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceRecord {
    pub index: usize,
    pub voice: Voice,
    pub text: String,
}
