pub mod json_loader;

pub use json_loader::{load_call_records, parse_call_records, save_call_records};
