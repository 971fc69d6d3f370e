pub mod args;
pub mod import;
