pub mod completions;
pub mod replay;
