//! Observability hooks for the codec.
//!
//! The `log_metric!` macro emits one structured key-value line per event
//! through the `log` facade at debug level. The `#[cfg(debug_assertions)]`
//! attribute compiles every call out of release builds.
//!
//! `enable_verbose_logging` installs an `env_logger` backend for binaries and
//! tests that do not configure logging themselves.

use std::fs::OpenOptions;
use std::path::Path;
use std::sync::Once;

use log::LevelFilter;

use crate::error::FpdcError;

/// Logs a structured key-value metric string, only in debug builds.
///
/// # Example
/// ```
/// use fpdc::log_metric;
/// let chunks = 4;
/// log_metric!("event"="compress", "chunks"=&chunks);
/// ```
#[macro_export]
macro_rules! log_metric {
    ($($key:literal = $value:expr),+ $(,)?) => {
        #[cfg(debug_assertions)]
        {
            // Collect each pair as a JSON string fragment
            let mut parts = Vec::new();
            $(
                parts.push(format!("\"{}\": \"{}\"", $key, $value));
            )+
            $crate::observability::emit_metric(&parts.join(", "));
        }
    };
}

#[doc(hidden)]
pub fn emit_metric(body: &str) {
    log::debug!("FPDC_METRIC: {{ {} }}", body);
}

static INIT_LOGGER: Once = Once::new();

/// Installs an `env_logger` backend at `Info` level, printing `[LEVEL] message`.
///
/// Output goes to stderr, or is appended to `log_file` when given. Only the
/// first call has any effect; later calls return `Ok(())` without touching the
/// installed logger.
pub fn enable_verbose_logging(log_file: Option<&Path>) -> Result<(), FpdcError> {
    let file = match log_file {
        Some(path) => Some(OpenOptions::new().append(true).create(true).open(path)?),
        None => None,
    };

    INIT_LOGGER.call_once(move || {
        let mut builder = env_logger::Builder::new();

        builder.is_test(false);
        builder.filter_level(LevelFilter::Info);

        // Custom formatter: just print the level and message
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "[{}] {}", record.level(), record.args())?;
            buf.flush()?;
            Ok(())
        });

        if let Some(file) = file {
            builder.target(env_logger::Target::Pipe(Box::new(file)));
        }

        let _ = builder.try_init();
    });
    Ok(())
}
