mod pipeline;
mod recursive_executor;
mod redirect;

pub use pipeline::PipelineHandler;
pub use recursive_executor::RecursiveExecutor;
pub use redirect::RedirectHandler;
