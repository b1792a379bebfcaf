mod executor;
pub mod builtin;
pub mod recursive_executor;

#[cfg(test)]
pub(crate) mod tests;

pub use executor::{Executor, ExecError, ExecOutcome, ExecStatus};
pub use recursive_executor::RecursiveExecutor;
