use crate::form::Form;
use serde::Serialize;

/// Отчёт валидации обязательных полей формы
#[derive(Debug, Clone, Serialize)]
pub struct ValidationReport {
    pub valid: Vec<String>,
    pub invalid: Vec<String>,
}

impl ValidationReport {
    pub fn is_valid(&self) -> bool {
        self.invalid.is_empty()
    }
}

/// Проверить обязательные поля: пустое (после trim) или отсутствующее
/// значение — invalid. Необязательные поля в отчёт не попадают.
pub fn validate_form(form: &Form) -> Result<ValidationReport, String> {
    let snapshot = form.snapshot()?;
    let required = form.required_fields()?;

    let mut report = ValidationReport {
        valid: Vec::new(),
        invalid: Vec::new(),
    };
    for name in required {
        let value = snapshot.value(&name).unwrap_or("");
        if value.trim().is_empty() {
            report.invalid.push(name);
        } else {
            report.valid.push(name);
        }
    }
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_all_required_filled() {
        let form = Form::new();
        form.set_field("name", "Widget").unwrap();
        form.set_field("price", "10").unwrap();
        form.set_required("name").unwrap();
        form.set_required("price").unwrap();

        let report = validate_form(&form).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.valid, vec!["name", "price"]);
    }

    #[test]
    fn test_validate_blank_required_is_invalid() {
        let form = Form::new();
        form.set_field("name", "   ").unwrap();
        form.set_required("name").unwrap();

        let report = validate_form(&form).unwrap();
        assert!(!report.is_valid());
        assert_eq!(report.invalid, vec!["name"]);
    }

    #[test]
    fn test_validate_missing_required_is_invalid() {
        let form = Form::new();
        form.set_required("price").unwrap();

        let report = validate_form(&form).unwrap();
        assert_eq!(report.invalid, vec!["price"]);
    }

    #[test]
    fn test_validate_optional_fields_not_reported() {
        let form = Form::new();
        form.set_field("name", "Widget").unwrap();
        form.set_field("comment", "").unwrap();
        form.set_required("name").unwrap();

        let report = validate_form(&form).unwrap();
        assert!(report.is_valid());
        assert_eq!(report.valid, vec!["name"]);
        assert!(report.invalid.is_empty());
    }
}
