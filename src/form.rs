use serde::ser::{Serialize, SerializeMap, Serializer};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

/// Снимок формы: упорядоченный набор (имя поля, значение) на момент тика.
/// Не хранится между тиками — пересобирается заново при каждом чтении.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormSnapshot {
    fields: Vec<(String, String)>,
}

impl FormSnapshot {
    pub fn new(fields: Vec<(String, String)>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    /// Есть ли хоть одно непустое (после trim) значение.
    /// Пустой снимок никогда не должен приводить к сетевому запросу.
    pub fn has_content(&self) -> bool {
        self.fields.iter().any(|(_, value)| !value.trim().is_empty())
    }

    /// Значение поля по имени (для валидации и тестов)
    pub fn value(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.as_str())
    }
}

// Сериализация в JSON-объект с сохранением порядка полей формы
// (тело запроса: имя поля -> значение, ничего больше)
impl Serialize for FormSnapshot {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(self.fields.len()))?;
        for (name, value) in &self.fields {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}

/// Форма с именованными строковыми полями.
/// Значения меняются приложением независимо от таймера автосохранения,
/// поэтому всё состояние за Arc<Mutex<...>> (clone разделяет одну форму).
#[derive(Clone, Default)]
pub struct Form {
    fields: Arc<Mutex<Vec<(String, String)>>>,
    required: Arc<Mutex<Vec<String>>>,
}

impl Form {
    pub fn new() -> Self {
        Self::default()
    }

    /// Установить значение поля. Новое поле добавляется в конец,
    /// существующее обновляется на месте (порядок полей стабилен).
    pub fn set_field(&self, name: &str, value: &str) -> Result<(), String> {
        let mut fields = self
            .fields
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;
        if let Some(entry) = fields.iter_mut().find(|(field, _)| field == name) {
            entry.1 = value.to_string();
        } else {
            fields.push((name.to_string(), value.to_string()));
        }
        Ok(())
    }

    pub fn field(&self, name: &str) -> Result<Option<String>, String> {
        let fields = self
            .fields
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;
        Ok(fields
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value.clone()))
    }

    /// Пометить поле обязательным (учитывается в validate::validate_form)
    pub fn set_required(&self, name: &str) -> Result<(), String> {
        let mut required = self
            .required
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;
        if !required.iter().any(|field| field == name) {
            required.push(name.to_string());
        }
        Ok(())
    }

    pub(crate) fn required_fields(&self) -> Result<Vec<String>, String> {
        let required = self
            .required
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;
        Ok(required.clone())
    }

    /// Снять снимок текущих значений
    pub fn snapshot(&self) -> Result<FormSnapshot, String> {
        let fields = self
            .fields
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;
        Ok(FormSnapshot {
            fields: fields.clone(),
        })
    }
}

/// Реестр форм по идентификатору (аналог поиска формы по селектору).
/// AutoSave ищет форму здесь при start; отсутствие формы — не ошибка.
#[derive(Clone, Default)]
pub struct FormRegistry {
    forms: Arc<Mutex<HashMap<String, Form>>>,
}

impl FormRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&self, id: &str, form: Form) -> Result<(), String> {
        let mut forms = self
            .forms
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;
        forms.insert(id.to_string(), form);
        Ok(())
    }

    pub fn unregister(&self, id: &str) -> Result<Option<Form>, String> {
        let mut forms = self
            .forms
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;
        Ok(forms.remove(id))
    }

    pub fn get(&self, id: &str) -> Result<Option<Form>, String> {
        let forms = self
            .forms
            .lock()
            .map_err(|e| format!("Mutex poisoned: {}", e))?;
        Ok(forms.get(id).cloned())
    }
}
