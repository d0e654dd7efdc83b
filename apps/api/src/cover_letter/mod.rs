pub mod handlers;
pub mod pipeline;
pub mod service;

pub use pipeline::CoverLetterPipeline;
pub use service::CoverLetterService;
