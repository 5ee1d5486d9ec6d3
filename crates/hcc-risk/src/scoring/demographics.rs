use crate::patient::Sex;

/// Age/sex bucket suffix such as `m70_74`, `f0_34`, or `m95_gt`.
///
/// New-enrollee models split ages 65 through 69 into single years, so those
/// buckets carry the literal age (`f67`).
pub fn age_sex_bucket(age: u32, sex: Sex, new_enrollee: bool) -> String {
    let prefix = sex.bucket_prefix();
    let range = match age {
        0..=34 => "0_34".to_string(),
        35..=44 => "35_44".to_string(),
        45..=54 => "45_54".to_string(),
        65..=69 if new_enrollee => age.to_string(),
        55..=94 => {
            let low = age - age % 5;
            format!("{low}_{}", low + 4)
        }
        _ => "95_gt".to_string(),
    };
    format!("{prefix}{range}")
}

/// Medicaid and original-disability segment of a new-enrollee variable.
pub(crate) fn new_enrollee_segment(medicaid: bool, originally_disabled: bool) -> &'static str {
    match (medicaid, originally_disabled) {
        (false, false) => "nmcaid_norigdis",
        (false, true) => "nmcaid_origdis",
        (true, false) => "mcaid_norigdis",
        (true, true) => "mcaid_origdis",
    }
}
