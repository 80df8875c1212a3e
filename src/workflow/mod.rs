pub mod annotate_flow;
pub mod record_ctx;

pub use annotate_flow::AnnotateFlow;
pub use record_ctx::RecordCtx;
