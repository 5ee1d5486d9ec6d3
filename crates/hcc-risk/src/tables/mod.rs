//! Reference tables supplied per model version: the diagnosis-to-category
//! mapping, the coefficient weights, and the category labels.

mod parser;

use crate::categories::{ConditionCategory, DiagnosisCode};
use crate::hierarchy::HierarchyError;
use std::collections::{BTreeMap, BTreeSet, HashMap};
use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

pub const MAPPING_FILE: &str = "diagnosis_mapping.txt";
pub const COEFFICIENTS_FILE: &str = "coefficients.csv";

#[derive(Debug, thiserror::Error)]
pub enum TableError {
    #[error("failed to open {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read table data: {0}")]
    Read(#[from] std::io::Error),
    #[error("invalid coefficient csv: {0}")]
    Csv(#[from] csv::Error),
    #[error("mapping line {line}: expected `CODE CATEGORY`, got {content:?}")]
    MalformedMapping { line: usize, content: String },
    #[error("coefficient table: {0}")]
    MalformedCoefficients(String),
    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

fn open(path: &Path) -> Result<File, TableError> {
    File::open(path).map_err(|source| TableError::Io {
        path: path.to_path_buf(),
        source,
    })
}

/// Normalized diagnosis code to the categories it maps to.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DiagnosisMap {
    entries: HashMap<DiagnosisCode, BTreeSet<ConditionCategory>>,
}

impl DiagnosisMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        parser::parse_mapping(reader)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        Self::from_reader(open(path.as_ref())?)
    }

    pub fn insert(&mut self, code: &str, category: ConditionCategory) {
        self.entries
            .entry(DiagnosisCode::normalize(code))
            .or_default()
            .insert(category);
    }

    pub fn categories_for(&self, code: &DiagnosisCode) -> Option<&BTreeSet<ConditionCategory>> {
        self.entries.get(code)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Inverse view: every code that maps into each category.
    pub fn codes_by_category(&self) -> BTreeMap<ConditionCategory, BTreeSet<DiagnosisCode>> {
        let mut inverted: BTreeMap<ConditionCategory, BTreeSet<DiagnosisCode>> = BTreeMap::new();
        for (code, categories) in &self.entries {
            for category in categories {
                inverted.entry(*category).or_default().insert(code.clone());
            }
        }
        inverted
    }
}

impl<S: AsRef<str>> FromIterator<(S, ConditionCategory)> for DiagnosisMap {
    fn from_iter<I: IntoIterator<Item = (S, ConditionCategory)>>(iter: I) -> Self {
        let mut mapping = Self::new();
        for (code, category) in iter {
            mapping.insert(code.as_ref(), category);
        }
        mapping
    }
}

/// Coefficient weights keyed by lowercase variable name (`cna_hcc85`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CoefficientTable {
    weights: HashMap<String, f64>,
}

impl CoefficientTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, TableError> {
        parser::parse_coefficients(reader)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, TableError> {
        Self::from_reader(open(path.as_ref())?)
    }

    pub fn insert(&mut self, variable: &str, weight: f64) {
        self.weights.insert(variable.to_ascii_lowercase(), weight);
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.weights.get(variable).copied()
    }

    pub fn len(&self) -> usize {
        self.weights.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weights.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<(S, f64)> for CoefficientTable {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut table = Self::new();
        for (variable, weight) in iter {
            table.insert(variable.as_ref(), weight);
        }
        table
    }
}

/// Human-readable category names.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryLabels {
    labels: BTreeMap<ConditionCategory, String>,
}

impl CategoryLabels {
    pub fn from_static(entries: &[(u16, &str)]) -> Self {
        entries
            .iter()
            .map(|&(number, label)| (ConditionCategory(number), label.to_string()))
            .collect()
    }

    pub fn get(&self, category: ConditionCategory) -> Option<&str> {
        self.labels.get(&category).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.labels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (ConditionCategory, &str)> + '_ {
        self.labels
            .iter()
            .map(|(category, label)| (*category, label.as_str()))
    }
}

impl FromIterator<(ConditionCategory, String)> for CategoryLabels {
    fn from_iter<I: IntoIterator<Item = (ConditionCategory, String)>>(iter: I) -> Self {
        Self {
            labels: iter.into_iter().collect(),
        }
    }
}

/// Externally supplied tables for one model version.
#[derive(Debug, Clone, Default)]
pub struct ReferenceTables {
    pub mapping: DiagnosisMap,
    pub coefficients: CoefficientTable,
}

impl ReferenceTables {
    pub fn new(mapping: DiagnosisMap, coefficients: CoefficientTable) -> Self {
        Self {
            mapping,
            coefficients,
        }
    }

    /// Loads `diagnosis_mapping.txt` and `coefficients.csv` from `dir`.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, TableError> {
        let dir = dir.as_ref();
        let mapping = DiagnosisMap::from_path(dir.join(MAPPING_FILE))?;
        let coefficients = CoefficientTable::from_path(dir.join(COEFFICIENTS_FILE))?;
        Ok(Self::new(mapping, coefficients))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn codes_by_category_inverts_mapping() {
        let mapping: DiagnosisMap = [
            ("I5030", ConditionCategory(85)),
            ("I509", ConditionCategory(85)),
            ("E1169", ConditionCategory(18)),
        ]
        .into_iter()
        .collect();

        let inverted = mapping.codes_by_category();
        let chf: Vec<&str> = inverted[&ConditionCategory(85)]
            .iter()
            .map(DiagnosisCode::as_str)
            .collect();
        assert_eq!(chf, vec!["I5030", "I509"]);
        assert_eq!(inverted.len(), 2);
    }

    #[test]
    fn mapping_insert_normalizes_codes() {
        let mut mapping = DiagnosisMap::new();
        mapping.insert("e11.69", ConditionCategory(18));
        assert!(mapping
            .categories_for(&DiagnosisCode::normalize("E1169"))
            .is_some());
    }

    #[test]
    fn load_dir_reports_missing_files() {
        let error = ReferenceTables::load_dir("does/not/exist").expect_err("missing dir");
        match error {
            TableError::Io { path, .. } => assert!(path.ends_with(MAPPING_FILE)),
            other => panic!("expected open error, got {other:?}"),
        }
    }
}
