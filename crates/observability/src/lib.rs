//! Process-wide tracing setup.

pub mod logging;

pub use logging::LogFormat;

/// Initialize process-wide logging.
///
/// The output format comes from `STOCKROOM_LOG_FORMAT`. Safe to call
/// multiple times; subsequent calls are no-ops.
pub fn init() {
    logging::init(LogFormat::from_env());
}

/// Initialize logging with an explicit format.
pub fn init_with(format: LogFormat) {
    logging::init(format);
}
