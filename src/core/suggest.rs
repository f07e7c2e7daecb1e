use crate::domain::model::Doctor;

/// 自動完成最多顯示的候選數
pub const MAX_SUGGESTIONS: usize = 3;

/// 依部分輸入產生候選字:先比對醫師姓名,再比對科別,
/// 去重後截斷為三筆。空白輸入不給任何候選。
pub fn suggest(doctors: &[Doctor], partial: &str) -> Vec<String> {
    let term = partial.trim().to_lowercase();
    if term.is_empty() {
        return Vec::new();
    }

    let mut suggestions: Vec<String> = Vec::new();

    for doctor in doctors {
        if doctor.name.to_lowercase().contains(&term) && !suggestions.contains(&doctor.name) {
            suggestions.push(doctor.name.clone());
        }
    }

    for doctor in doctors {
        for spec in &doctor.specialties {
            if spec.to_lowercase().contains(&term) && !suggestions.contains(spec) {
                suggestions.push(spec.clone());
            }
        }
    }

    suggestions.truncate(MAX_SUGGESTIONS);
    suggestions
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(name: &str, specialties: &[&str]) -> Doctor {
        Doctor {
            id: name.to_string(),
            name: name.to_string(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            experience_years: 0,
            fee_amount: 0,
            consultation_modes: vec![],
            image_url: String::new(),
        }
    }

    #[test]
    fn test_case_insensitive_name_match() {
        let doctors = vec![doctor("Ann Lee", &[]), doctor("Bob", &[])];

        assert_eq!(suggest(&doctors, "an"), vec!["Ann Lee"]);
    }

    #[test]
    fn test_names_come_before_specialties() {
        let doctors = vec![
            doctor("Carol", &["Cardiologist"]),
            doctor("Oscar", &["Oncologist"]),
        ];

        assert_eq!(suggest(&doctors, "car"), vec!["Carol", "Cardiologist"]);
    }

    #[test]
    fn test_capped_at_three() {
        let doctors = vec![
            doctor("Ana", &[]),
            doctor("Anb", &[]),
            doctor("Anc", &[]),
            doctor("And", &[]),
        ];

        assert_eq!(suggest(&doctors, "an").len(), MAX_SUGGESTIONS);
    }

    #[test]
    fn test_deduplicates_across_names_and_specialties() {
        // 姓名與科別同字面值只算一次,重複科別也只算一次
        let doctors = vec![
            doctor("Dentist", &["Dentist"]),
            doctor("Someone", &["Dentist"]),
        ];

        assert_eq!(suggest(&doctors, "dent"), vec!["Dentist"]);
    }

    #[test]
    fn test_blank_partial_yields_nothing() {
        let doctors = vec![doctor("Ann Lee", &[])];

        assert!(suggest(&doctors, "").is_empty());
        assert!(suggest(&doctors, "   ").is_empty());
    }
}
