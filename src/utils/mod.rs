pub mod logging;
pub mod time_parser;

pub use logging::init_tracing;
pub use time_parser::parse_time;
