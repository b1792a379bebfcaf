pub mod ast;
pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod lexer;
pub mod logging;
pub mod parser;
pub mod repl;
pub mod shell;
