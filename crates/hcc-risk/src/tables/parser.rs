use super::{CoefficientTable, DiagnosisMap, TableError};
use crate::categories::ConditionCategory;
use std::io::{BufRead, BufReader, Read};

/// Reads whitespace-separated `CODE CATEGORY` lines. Repeated codes
/// accumulate every category listed for them.
pub(crate) fn parse_mapping<R: Read>(reader: R) -> Result<DiagnosisMap, TableError> {
    let mut mapping = DiagnosisMap::new();

    for (index, line) in BufReader::new(reader).lines().enumerate() {
        let line = line?;
        let content = line.trim_start_matches('\u{feff}').trim();
        if content.is_empty() {
            continue;
        }

        let mut fields = content.split_whitespace();
        let code = fields.next();
        let category = fields.next().and_then(|raw| raw.parse::<u16>().ok());
        match (code, category, fields.next()) {
            (Some(code), Some(category), None) => {
                mapping.insert(code, ConditionCategory(category));
            }
            _ => {
                return Err(TableError::MalformedMapping {
                    line: index + 1,
                    content: content.to_string(),
                })
            }
        }
    }

    Ok(mapping)
}

/// Reads a header row of variable names followed by exactly one row of weights.
pub(crate) fn parse_coefficients<R: Read>(reader: R) -> Result<CoefficientTable, TableError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();

    let mut records = csv_reader.records();
    let values = match records.next() {
        Some(record) => record?,
        None => {
            return Err(TableError::MalformedCoefficients(
                "header row has no row of weights".to_string(),
            ))
        }
    };
    if records.next().is_some() {
        return Err(TableError::MalformedCoefficients(
            "expected a single row of weights".to_string(),
        ));
    }

    let mut table = CoefficientTable::new();
    for (name, raw) in headers.iter().zip(values.iter()) {
        let name = name.trim_start_matches('\u{feff}');
        let weight = raw.parse::<f64>().map_err(|_| {
            TableError::MalformedCoefficients(format!("weight {raw:?} for `{name}` is not a number"))
        })?;
        table.insert(name, weight);
    }

    Ok(table)
}
