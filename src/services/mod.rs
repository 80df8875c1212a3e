pub mod response_parser;

pub use response_parser::{strip_code_fence, ResponseParser, DEFAULT_EXCERPT_CHARS};
