use std::path::Path;

use once_cell::sync::OnceCell;
use tracing_subscriber::{
    fmt, fmt::time::UtcTime, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::error::{EngineError, EngineResult};

static LOGGER_INIT: OnceCell<()> = OnceCell::new();
static LOGGER_GUARD: OnceCell<tracing_appender::non_blocking::WorkerGuard> = OnceCell::new();

const DEFAULT_LOG_DIRECTIVES: &str =
    "info,engine::scheduler=debug,engine::conflict=debug,engine::availability=debug";

/// Initialize tracing output for embedding applications and tests.
///
/// Stdout logging is always installed; passing a directory adds a daily
/// rolling file layer under it. Safe to call more than once — only the first
/// call takes effect.
pub fn init_logging(log_dir: Option<&Path>) -> EngineResult<()> {
    LOGGER_INIT
        .get_or_try_init(|| {
            let env_filter = EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(DEFAULT_LOG_DIRECTIVES))
                .map_err(|err| EngineError::Other(format!("invalid log directives: {err}")))?;

            let stdout_layer = fmt::layer()
                .with_target(false)
                .with_timer(UtcTime::rfc_3339());

            match log_dir {
                Some(dir) => {
                    std::fs::create_dir_all(dir).map_err(|err| {
                        EngineError::Other(format!("cannot create log directory: {err}"))
                    })?;
                    let file_appender = tracing_appender::rolling::daily(dir, "chronoplan.log");
                    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
                    LOGGER_GUARD
                        .set(guard)
                        .map_err(|_| EngineError::Other("logger already initialized".into()))?;

                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(stdout_layer)
                        .with(
                            fmt::layer()
                                .with_writer(non_blocking)
                                .with_ansi(false)
                                .with_target(true)
                                .with_timer(UtcTime::rfc_3339()),
                        )
                        .init();
                }
                None => {
                    tracing_subscriber::registry()
                        .with(env_filter)
                        .with(stdout_layer)
                        .init();
                }
            }

            Ok(())
        })
        .map(|_| ())
}
