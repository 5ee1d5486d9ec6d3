//! Category groups shared by the interaction tables.

use crate::categories::ConditionCategory;

const fn hcc(number: u16) -> ConditionCategory {
    ConditionCategory(number)
}

pub(crate) const SEPSIS: ConditionCategory = hcc(2);
pub(crate) const OPPORTUNISTIC_INFECTIONS: ConditionCategory = hcc(6);
pub(crate) const BONE_JOINT_INFECTIONS: ConditionCategory = hcc(39);
pub(crate) const IMMUNITY_DISORDERS: ConditionCategory = hcc(47);
pub(crate) const SCHIZOPHRENIA: ConditionCategory = hcc(57);
pub(crate) const MULTIPLE_SCLEROSIS: ConditionCategory = hcc(77);
pub(crate) const SEIZURES: ConditionCategory = hcc(79);
pub(crate) const CHF: ConditionCategory = hcc(85);
pub(crate) const ARRHYTHMIAS: ConditionCategory = hcc(96);
pub(crate) const ASPIRATION_PNEUMONIA: ConditionCategory = hcc(114);
pub(crate) const CHRONIC_SKIN_ULCER: ConditionCategory = hcc(161);
pub(crate) const ARTIFICIAL_OPENINGS: ConditionCategory = hcc(188);

pub(crate) const CANCER: &[ConditionCategory] = &[hcc(8), hcc(9), hcc(10), hcc(11), hcc(12)];
pub(crate) const DIABETES: &[ConditionCategory] = &[hcc(17), hcc(18), hcc(19)];
pub(crate) const CARD_RESP_FAIL: &[ConditionCategory] = &[hcc(82), hcc(83), hcc(84)];
pub(crate) const COPD_CF: &[ConditionCategory] = &[hcc(110), hcc(111), hcc(112)];
pub(crate) const PRESSURE_ULCER: &[ConditionCategory] = &[hcc(157), hcc(158)];

pub(crate) const RENAL_V22: &[ConditionCategory] = &[hcc(134), hcc(135), hcc(136), hcc(137)];
pub(crate) const RENAL_V23: &[ConditionCategory] =
    &[hcc(134), hcc(135), hcc(136), hcc(137), hcc(138)];
pub(crate) const SUBSTANCE_V22: &[ConditionCategory] = &[hcc(54), hcc(55)];
pub(crate) const SUBSTANCE_V23: &[ConditionCategory] = &[hcc(54), hcc(55), hcc(56)];
pub(crate) const PSYCHIATRIC_V22: &[ConditionCategory] = &[hcc(57), hcc(58)];
pub(crate) const PSYCHIATRIC_V23: &[ConditionCategory] = &[hcc(57), hcc(58), hcc(59), hcc(60)];
