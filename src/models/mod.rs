pub mod call_record;
pub mod loaders;
pub mod outcome;

pub use call_record::CallRecord;
pub use loaders::{load_call_records, save_call_records};
pub use outcome::{AnnotationOutcome, FailureKind, RunSummary};
