pub(crate) mod orchestrator;
pub(crate) mod parse;
pub(crate) mod prompts;
