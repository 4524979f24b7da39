pub mod pipeline;
pub mod script;
