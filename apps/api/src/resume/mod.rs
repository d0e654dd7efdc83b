pub mod handlers;
pub mod pipeline;
pub mod recommendations;
pub mod service;

pub use pipeline::ResumePipeline;
pub use service::ResumeService;
