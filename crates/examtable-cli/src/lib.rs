//! CLI crate for examtable: argument surface, terminal rendering, and the
//! printpdf renderer behind the core's export port.

pub mod cli_args;
pub mod pdf;
pub mod view;
