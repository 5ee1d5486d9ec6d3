/// Trim, uppercase, and drop periods and invisible marks from a diagnosis code.
pub(crate) fn normalize_code(value: &str) -> String {
    value
        .trim()
        .chars()
        .filter(|ch| !matches!(ch, '.' | '\u{feff}' | '\u{200b}'))
        .collect::<String>()
        .to_ascii_uppercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_periods_whitespace_and_case() {
        assert_eq!(normalize_code(" e11.69 "), "E1169");
        assert_eq!(normalize_code("\u{feff}I50.30"), "I5030");
        assert_eq!(normalize_code("R05"), "R05");
    }
}
