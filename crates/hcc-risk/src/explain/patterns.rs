//! Variable-name recognizers used by the explainer.
//!
//! Names containing whitespace never match; every pattern anchors its
//! free-form prefix on non-space characters.

use crate::patient::Sex;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct DemographicMatch<'a> {
    pub(crate) sex: Sex,
    pub(crate) age_lo: &'a str,
    pub(crate) age_hi: Option<&'a str>,
}

impl DemographicMatch<'_> {
    pub(crate) fn describe(&self) -> String {
        let sex = self.sex.label();
        match self.age_hi {
            Some("gt") => format!("{sex} with age greater than {}", self.age_lo),
            Some(age_hi) => format!("{sex} with age in range {} to {age_hi}", self.age_lo),
            None => format!("{sex} with age equal to {}", self.age_lo),
        }
    }
}

/// `{prefix}{m|f}{1-2 digits}[_{1-2 digits|gt}]` at the end of `name`. The
/// prefix may be empty. The rightmost sex marker that yields a full match wins.
pub(crate) fn match_demographic(name: &str) -> Option<DemographicMatch<'_>> {
    if name.chars().any(char::is_whitespace) {
        return None;
    }

    name.char_indices().rev().find_map(|(index, marker)| {
        let sex = match marker {
            'm' => Sex::Male,
            'f' => Sex::Female,
            _ => return None,
        };
        let (age_lo, age_hi) = match_age_suffix(&name[index + marker.len_utf8()..])?;
        Some(DemographicMatch {
            sex,
            age_lo,
            age_hi,
        })
    })
}

fn match_age_suffix(rest: &str) -> Option<(&str, Option<&str>)> {
    let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
    if !(1..=2).contains(&digits) {
        return None;
    }
    let (age_lo, tail) = rest.split_at(digits);
    if tail.is_empty() {
        return Some((age_lo, None));
    }

    let age_hi = tail.strip_prefix('_')?;
    let valid_hi = age_hi == "gt"
        || ((1..=2).contains(&age_hi.len()) && age_hi.bytes().all(|b| b.is_ascii_digit()));
    valid_hi.then_some((age_lo, Some(age_hi)))
}

/// Shortest known interaction name that ends `name`.
pub(crate) fn match_interaction<'k, I>(name: &str, known: I) -> Option<&'k str>
where
    I: IntoIterator<Item = &'k str>,
{
    if name.chars().any(char::is_whitespace) {
        return None;
    }
    known
        .into_iter()
        .filter(|candidate| !candidate.is_empty() && name.ends_with(candidate))
        .min_by_key(|candidate| candidate.len())
}

/// `{variant}_hcc{digits}` exactly; returns the digit run.
pub(crate) fn match_category<'n>(name: &'n str, variant_prefixes: &[&str]) -> Option<&'n str> {
    variant_prefixes.iter().find_map(|prefix| {
        let digits = name.strip_prefix(prefix)?.strip_prefix("_hcc")?;
        (!digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit())).then_some(digits)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn demographic_ranges_and_open_ended_buckets() {
        let matched = match_demographic("cna_m70_74").expect("range bucket");
        assert_eq!(matched.describe(), "Male with age in range 70 to 74");

        let matched = match_demographic("cfa_f95_gt").expect("open bucket");
        assert_eq!(matched.describe(), "Female with age greater than 95");

        let matched = match_demographic("ne_nmcaid_norigdis_f67").expect("single age");
        assert_eq!(matched.describe(), "Female with age equal to 67");
    }

    #[test]
    fn demographic_rejects_non_matching_names() {
        assert!(match_demographic("cna_hcc85").is_none());
        assert!(match_demographic("cna_hcc85_gdiabetesmellit").is_none());
        assert!(match_demographic("cna_m700").is_none());
        assert!(match_demographic("cna m70_74").is_none());
    }

    #[test]
    fn demographic_prefix_may_be_empty() {
        let matched = match_demographic("m70_74").expect("bare bucket");
        assert_eq!(matched.describe(), "Male with age in range 70 to 74");

        let matched = match_demographic("f95_gt").expect("bare open bucket");
        assert_eq!(matched.describe(), "Female with age greater than 95");
    }

    #[test]
    fn interaction_prefers_shortest_suffix() {
        let known = ["hcc85_grenal", "grenal", "hcc85_hcc96"];
        assert_eq!(match_interaction("cna_hcc85_grenal", known), Some("grenal"));
        assert_eq!(match_interaction("cna_hcc85_hcc96", known), Some("hcc85_hcc96"));
        assert_eq!(match_interaction("cna_hcc85", known), None);
    }

    #[test]
    fn category_requires_known_prefix_and_digits() {
        let prefixes = ["cna", "ins", "snpne", "ne"];
        assert_eq!(match_category("cna_hcc85", &prefixes), Some("85"));
        assert_eq!(match_category("snpne_hcc1", &prefixes), Some("1"));
        assert_eq!(match_category("xyz_hcc85", &prefixes), None);
        assert_eq!(match_category("cna_hcc85_gdiabetesmellit", &prefixes), None);
        assert_eq!(match_category("cna_hcc", &prefixes), None);
    }
}
