/// Индексы строк, содержащих искомую подстроку (без учёта регистра).
/// Пустой запрос совпадает со всеми строками — фильтр «выключен».
pub fn visible_indices(rows: &[String], term: &str) -> Vec<usize> {
    let term = term.to_lowercase();
    rows.iter()
        .enumerate()
        .filter(|(_, text)| text.to_lowercase().contains(&term))
        .map(|(index, _)| index)
        .collect()
}
