use crate::form::{Form, FormRegistry, FormSnapshot};
use crate::models::AutoSaveStatus;
use std::fmt;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{debug, info, warn};

/// Интервал автосохранения по умолчанию (30 секунд)
pub const DEFAULT_INTERVAL_MS: u64 = 30_000;

/// Ошибка автосохранения (для разбора и логирования).
/// Единственный вид — транспортный сбой: сервер недоступен, сеть упала.
/// Ответ сервера (статус, тело) ошибкой не считается и не разбирается.
#[derive(Debug)]
pub enum SaveError {
    Transport(String),
}

impl fmt::Display for SaveError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SaveError::Transport(s) => write!(f, "Transport: {}", s),
        }
    }
}

/// Конфигурация автосохранения (endpoint, интервал, таймауты)
#[derive(Clone)]
pub struct AutoSaveConfig {
    pub endpoint: String,
    pub interval_ms: u64,
    pub http_timeout_secs: u64,
}

impl AutoSaveConfig {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            interval_ms: DEFAULT_INTERVAL_MS,
            http_timeout_secs: 30,
        }
    }

    pub fn with_interval_ms(mut self, interval_ms: u64) -> Self {
        self.interval_ms = interval_ms;
        self
    }
}

/// Результат start(). Отсутствие формы и повторный запуск — не ошибки
/// (best effort), но вызывающий может их различить при желании.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartOutcome {
    Started,
    /// Форма не найдена в реестре — тихий no-op
    FormNotFound,
    /// Таймер уже активен — повторный start не создаёт второй таймер
    AlreadyActive,
}

/// Периодический отправитель формы.
/// Один экземпляр владеет одним таймером; clone разделяет этот таймер,
/// независимые формы обслуживаются независимыми экземплярами.
#[derive(Clone)]
pub struct AutoSave {
    registry: FormRegistry,
    timer: Arc<Mutex<Option<JoinHandle<()>>>>,
    last_saved_at: Arc<Mutex<Option<i64>>>,
}

impl AutoSave {
    pub fn new(registry: FormRegistry) -> Self {
        Self {
            registry,
            timer: Arc::new(Mutex::new(None)),
            last_saved_at: Arc::new(Mutex::new(None)),
        }
    }

    /// Запустить периодическое сохранение формы form_id на config.endpoint.
    /// Идемпотентно: при уже активном таймере — no-op (AlreadyActive),
    /// второй конкурирующий таймер не создаётся.
    pub fn start(&self, form_id: &str, config: AutoSaveConfig) -> Result<StartOutcome, String> {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;

        if let Some(handle) = timer.as_ref() {
            if !handle.is_finished() {
                debug!("[AUTOSAVE] start ignored: timer already active");
                return Ok(StartOutcome::AlreadyActive);
            }
        }

        let form = match self.registry.get(form_id)? {
            Some(form) => form,
            None => {
                debug!(
                    "[AUTOSAVE] form '{}' not registered, autosave not started",
                    form_id
                );
                return Ok(StartOutcome::FormNotFound);
            }
        };

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.http_timeout_secs))
            .build()
            .unwrap_or_else(|_| reqwest::Client::new());

        let endpoint = config.endpoint.clone();
        let interval_ms = config.interval_ms;
        let last_saved_at = self.last_saved_at.clone();

        let handle = tokio::spawn(async move {
            let mut interval = tokio::time::interval(Duration::from_millis(interval_ms));
            interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // Первый тик tokio::time::interval срабатывает сразу — пропускаем:
            // сохранение начинается только после полного интервала
            interval.tick().await;
            loop {
                interval.tick().await;
                tick(&client, &form, &endpoint, &last_saved_at);
            }
        });

        *timer = Some(handle);
        info!(
            "[AUTOSAVE] started: form '{}' -> {} every {}ms",
            form_id, config.endpoint, interval_ms
        );
        Ok(StartOutcome::Started)
    }

    /// Остановить таймер. Безопасно без активного таймера (no-op).
    /// Уже запущенная тиком отправка не отменяется и не ожидается —
    /// она завершится сама, результат только логируется.
    pub fn stop(&self) -> Result<(), String> {
        let mut timer = self
            .timer
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;
        match timer.take() {
            Some(handle) => {
                handle.abort();
                info!("[AUTOSAVE] stopped");
            }
            None => {
                debug!("[AUTOSAVE] stop ignored: no active timer");
            }
        }
        Ok(())
    }

    pub fn is_active(&self) -> bool {
        self.timer
            .lock()
            .map(|timer| timer.as_ref().map(|h| !h.is_finished()).unwrap_or(false))
            .unwrap_or(false)
    }

    /// Статус для UI: активен ли таймер и когда последний раз сохранились
    pub fn status(&self) -> AutoSaveStatus {
        AutoSaveStatus {
            is_active: self.is_active(),
            last_saved_at: self.last_saved_at.lock().map(|ts| *ts).unwrap_or(None),
        }
    }
}

/// Один тик таймера: снять снимок; если есть непустые поля — отправить
/// снимок отдельной задачей, НЕ дожидаясь её завершения (медленный endpoint
/// не сдвигает расписание тиков; перекрытие запросов допустимо).
/// Никогда не поднимает ошибку наверх.
fn tick(
    client: &reqwest::Client,
    form: &Form,
    endpoint: &str,
    last_saved_at: &Arc<Mutex<Option<i64>>>,
) {
    let snapshot = match form.snapshot() {
        Ok(snapshot) => snapshot,
        Err(e) => {
            warn!("[AUTOSAVE] failed to read form snapshot: {}", e);
            return;
        }
    };

    if !snapshot.has_content() {
        debug!("[AUTOSAVE] snapshot blank, skipping tick");
        return;
    }

    let client = client.clone();
    let endpoint = endpoint.to_string();
    let last_saved_at = last_saved_at.clone();
    tokio::spawn(async move {
        match submit_snapshot(&client, &endpoint, &snapshot).await {
            Ok(()) => {
                debug!("[AUTOSAVE] snapshot saved to {}", endpoint);
                if let Ok(mut ts) = last_saved_at.lock() {
                    *ts = Some(chrono::Utc::now().timestamp());
                }
            }
            Err(e) => {
                // Best effort: сбой доставки не повторяем и не эскалируем
                warn!("[AUTOSAVE] save failed: {}", e);
            }
        }
    });
}

/// Отправить снимок на endpoint (POST, JSON-тело: имя поля -> значение).
/// Ответ сервера не инспектируется — важен только транспортный сбой.
async fn submit_snapshot(
    client: &reqwest::Client,
    endpoint: &str,
    snapshot: &FormSnapshot,
) -> Result<(), SaveError> {
    client
        .post(endpoint)
        .header("Content-Type", "application/json")
        .json(snapshot)
        .send()
        .await
        .map_err(|e| SaveError::Transport(e.to_string()))?;
    Ok(())
}
