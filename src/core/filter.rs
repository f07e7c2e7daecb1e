use crate::domain::model::{Doctor, FilterState, SortKey};

/// 依目前的 FilterState 計算可見且排序後的醫師清單。
/// 純函式:不碰網址列、不碰任何全域狀態。
pub fn apply(doctors: &[Doctor], filters: &FilterState) -> Vec<Doctor> {
    let mut result: Vec<Doctor> = doctors.to_vec();

    if !filters.search_term.is_empty() {
        let term = filters.search_term.to_lowercase();
        result.retain(|doctor| {
            doctor.name.to_lowercase().contains(&term)
                || doctor
                    .specialties
                    .iter()
                    .any(|spec| spec.to_lowercase().contains(&term))
        });
    }

    if let Some(mode) = filters.consultation_type {
        result.retain(|doctor| doctor.consultation_modes.contains(&mode));
    }

    if !filters.specialties.is_empty() {
        // OR 語意:任一選取科別符合就保留
        result.retain(|doctor| {
            doctor
                .specialties
                .iter()
                .any(|spec| filters.specialties.iter().any(|selected| selected == spec))
        });
    }

    // Vec::sort_by 是穩定排序,同值保持輸入順序
    match filters.sort_by {
        Some(SortKey::Fees) => result.sort_by_key(|doctor| doctor.fee_amount),
        Some(SortKey::Experience) => {
            result.sort_by(|a, b| b.experience_years.cmp(&a.experience_years))
        }
        None => {}
    }

    result
}
