use serde::Serialize;

/// Статус автосохранения для отображения в UI
#[derive(Debug, Clone, Serialize)]
pub struct AutoSaveStatus {
    pub is_active: bool,
    /// Unix timestamp последнего успешного сохранения
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_saved_at: Option<i64>,
}
