pub mod ast;
pub mod build;
pub mod check;
pub mod defaults;
pub mod source;
