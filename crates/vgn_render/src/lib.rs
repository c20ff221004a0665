pub mod gpu_context;
pub mod present_pipeline;
pub mod vertex;

pub use gpu_context::GpuContext;
pub use present_pipeline::PresentPipeline;
pub use vertex::PresentVertex;
