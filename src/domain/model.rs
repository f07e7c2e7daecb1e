use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// 正規化後的醫師資料,每次抓取重建一次,之後不再變動
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    pub specialties: Vec<String>,
    pub experience_years: u32,
    pub fee_amount: u32,
    pub consultation_modes: Vec<ConsultationMode>,
    pub image_url: String,
}

/// 看診方式 (視訊或門診)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConsultationMode {
    VideoConsult,
    InClinic,
}

impl ConsultationMode {
    /// 查詢字串與顯示共用的字面值
    pub fn as_str(&self) -> &'static str {
        match self {
            ConsultationMode::VideoConsult => "Video Consult",
            ConsultationMode::InClinic => "In Clinic",
        }
    }

    /// 無法辨識的值回傳 None (視為未設定)
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "Video Consult" => Some(ConsultationMode::VideoConsult),
            "In Clinic" => Some(ConsultationMode::InClinic),
            _ => None,
        }
    }
}

impl std::fmt::Display for ConsultationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 排序選項:費用升冪或年資降冪
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortKey {
    Fees,
    Experience,
}

impl SortKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            SortKey::Fees => "fees",
            SortKey::Experience => "experience",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "fees" => Some(SortKey::Fees),
            "experience" => Some(SortKey::Experience),
            _ => None,
        }
    }
}

/// 完整的搜尋/篩選/排序狀態,可與查詢字串互轉
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterState {
    pub search_term: String,
    pub consultation_type: Option<ConsultationMode>,
    /// 插入順序的集合,toggle 時新增或移除
    pub specialties: Vec<String>,
    pub sort_by: Option<SortKey>,
}

impl FilterState {
    /// 四個欄位都在「無限制」預設值
    pub fn is_default(&self) -> bool {
        self.search_term.is_empty()
            && self.consultation_type.is_none()
            && self.specialties.is_empty()
            && self.sort_by.is_none()
    }

    pub fn toggle_specialty(&mut self, name: &str) {
        if let Some(index) = self.specialties.iter().position(|s| s == name) {
            self.specialties.remove(index);
        } else {
            self.specialties.push(name.to_string());
        }
    }
}

/// 一次抓取的結果快照
#[derive(Debug, Clone)]
pub struct Directory {
    pub doctors: Vec<Doctor>,
    /// 排序去重後的科別清單,供篩選選項使用
    pub specialties: Vec<String>,
    pub fetched_at: DateTime<Utc>,
}

impl Directory {
    pub fn new(doctors: Vec<Doctor>, fetched_at: DateTime<Utc>) -> Self {
        let specialties: BTreeSet<String> = doctors
            .iter()
            .flat_map(|d| d.specialties.iter().cloned())
            .collect();

        Self {
            doctors,
            specialties: specialties.into_iter().collect(),
            fetched_at,
        }
    }
}

/// 頁面生命週期: Idle -> Loading -> {Ready, Failed},不會重新回到 Loading
#[derive(Debug, Clone)]
pub enum DirectoryState {
    Idle,
    Loading,
    Ready(Directory),
    Failed(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doctor(id: &str, name: &str, specialties: &[&str]) -> Doctor {
        Doctor {
            id: id.to_string(),
            name: name.to_string(),
            specialties: specialties.iter().map(|s| s.to_string()).collect(),
            experience_years: 1,
            fee_amount: 100,
            consultation_modes: vec![],
            image_url: String::new(),
        }
    }

    #[test]
    fn test_toggle_specialty_inserts_then_removes() {
        let mut filters = FilterState::default();

        filters.toggle_specialty("Dentist");
        filters.toggle_specialty("Cardiologist");
        assert_eq!(filters.specialties, vec!["Dentist", "Cardiologist"]);

        filters.toggle_specialty("Dentist");
        assert_eq!(filters.specialties, vec!["Cardiologist"]);
    }

    #[test]
    fn test_directory_derives_sorted_unique_specialties() {
        let doctors = vec![
            doctor("1", "A", &["Dentist", "Cardiologist"]),
            doctor("2", "B", &["Cardiologist"]),
        ];

        let directory = Directory::new(doctors, Utc::now());
        assert_eq!(directory.specialties, vec!["Cardiologist", "Dentist"]);
    }

    #[test]
    fn test_mode_and_sort_round_trip_their_wire_values() {
        assert_eq!(
            ConsultationMode::parse("Video Consult"),
            Some(ConsultationMode::VideoConsult)
        );
        assert_eq!(
            ConsultationMode::parse(ConsultationMode::InClinic.as_str()),
            Some(ConsultationMode::InClinic)
        );
        assert_eq!(ConsultationMode::parse("House Call"), None);

        assert_eq!(SortKey::parse("fees"), Some(SortKey::Fees));
        assert_eq!(SortKey::parse("experience"), Some(SortKey::Experience));
        assert_eq!(SortKey::parse("name"), None);
    }
}
