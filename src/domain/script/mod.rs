pub mod error;
pub mod model;
pub mod parser;

pub use error::ScriptError;
pub use model::{UtteranceRecord, Voice};
pub use parser::parse;
