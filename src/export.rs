use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use tracing::debug;

// Excel ожидает BOM в начале UTF-8 CSV, иначе ломает не-ASCII текст
const UTF8_BOM: &str = "\u{feff}";

/// Собрать CSV из строк таблицы: каждая ячейка в кавычках,
/// внутренние кавычки удваиваются, строки через '\n'.
pub fn table_to_csv(rows: &[Vec<String>]) -> String {
    rows.iter()
        .map(|row| {
            row.iter()
                .map(|cell| format!("\"{}\"", cell.replace('"', "\"\"")))
                .collect::<Vec<_>>()
                .join(",")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Записать таблицу в CSV-файл с UTF-8 BOM
pub fn write_csv(rows: &[Vec<String>], path: &Path) -> io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(UTF8_BOM.as_bytes())?;
    file.write_all(table_to_csv(rows).as_bytes())?;
    debug!("[EXPORT] wrote {} rows to {}", rows.len(), path.display());
    Ok(())
}
