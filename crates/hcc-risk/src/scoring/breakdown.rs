use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub variable: String,
    pub weight: f64,
}

/// Ordered coefficient contributions for one scoring call.
///
/// Variables are unique; inserting an existing name replaces its weight in
/// place. Names the model could not resolve under a lenient policy are kept
/// in `unresolved` instead of silently disappearing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    components: Vec<ScoreComponent>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    unresolved: Vec<String>,
}

impl ScoreBreakdown {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, variable: impl Into<String>, weight: f64) {
        let variable = variable.into();
        match self
            .components
            .iter_mut()
            .find(|component| component.variable == variable)
        {
            Some(existing) => existing.weight = weight,
            None => self.components.push(ScoreComponent { variable, weight }),
        }
    }

    pub fn mark_unresolved(&mut self, variable: impl Into<String>) {
        self.unresolved.push(variable.into());
    }

    pub fn components(&self) -> &[ScoreComponent] {
        &self.components
    }

    pub fn unresolved(&self) -> &[String] {
        &self.unresolved
    }

    pub fn get(&self, variable: &str) -> Option<f64> {
        self.components
            .iter()
            .find(|component| component.variable == variable)
            .map(|component| component.weight)
    }

    /// Unrounded sum of every weight.
    pub fn total(&self) -> f64 {
        self.components.iter().map(|component| component.weight).sum()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ScoreComponent> + '_ {
        self.components.iter()
    }

    pub fn to_map(&self) -> BTreeMap<String, f64> {
        self.components
            .iter()
            .map(|component| (component.variable.clone(), component.weight))
            .collect()
    }
}

impl<S: Into<String>> FromIterator<(S, f64)> for ScoreBreakdown {
    fn from_iter<I: IntoIterator<Item = (S, f64)>>(iter: I) -> Self {
        let mut breakdown = Self::new();
        for (variable, weight) in iter {
            breakdown.insert(variable, weight);
        }
        breakdown
    }
}

impl<'a> IntoIterator for &'a ScoreBreakdown {
    type Item = &'a ScoreComponent;
    type IntoIter = std::slice::Iter<'a, ScoreComponent>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_keeps_order_and_replaces_duplicates() {
        let mut breakdown = ScoreBreakdown::new();
        breakdown.insert("cna_m70_74", 0.379);
        breakdown.insert("cna_hcc18", 0.318);
        breakdown.insert("cna_m70_74", 0.4);

        let names: Vec<_> = breakdown.iter().map(|c| c.variable.as_str()).collect();
        assert_eq!(names, vec!["cna_m70_74", "cna_hcc18"]);
        assert_eq!(breakdown.get("cna_m70_74"), Some(0.4));
    }

    #[test]
    fn unresolved_names_are_omitted_from_json_when_empty() {
        let breakdown: ScoreBreakdown = [("cna_hcc18", 0.318)].into_iter().collect();
        let json = serde_json::to_value(&breakdown).expect("serializes");
        assert!(json.get("unresolved").is_none());
        assert_eq!(json["components"][0]["variable"], "cna_hcc18");
    }
}
