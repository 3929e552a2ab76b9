mod autosave;
mod export;
mod form;
mod models;
mod search;
mod validate;

pub use autosave::{AutoSave, AutoSaveConfig, SaveError, StartOutcome, DEFAULT_INTERVAL_MS};
pub use export::{table_to_csv, write_csv};
pub use form::{Form, FormRegistry, FormSnapshot};
pub use models::AutoSaveStatus;
pub use search::visible_indices;
pub use validate::{validate_form, ValidationReport};


/// Инициализация логирования: по умолчанию info (если RUST_LOG не задан),
/// чтобы [AUTOSAVE]/[EXPORT] были видны. Повторный вызов — no-op.
pub fn init_logging() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .try_init();
}
