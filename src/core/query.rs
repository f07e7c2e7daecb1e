use crate::domain::model::{ConsultationMode, FilterState, SortKey};
use url::form_urlencoded;

/// 查詢字串 -> FilterState。四個鍵各自獨立,缺鍵就是該欄位的預設值;
/// 無法辨識的鍵與值直接丟棄。
pub fn parse(query: &str) -> FilterState {
    let mut filters = FilterState::default();

    let query = query.strip_prefix('?').unwrap_or(query);
    for (key, value) in form_urlencoded::parse(query.as_bytes()) {
        match key.as_ref() {
            "search" => filters.search_term = value.into_owned(),
            "type" => filters.consultation_type = ConsultationMode::parse(&value),
            "specialties" => {
                // 空值不能變成單一空字串項目
                filters.specialties = value
                    .split(',')
                    .filter(|s| !s.is_empty())
                    .map(str::to_string)
                    .collect();
            }
            "sort" => filters.sort_by = SortKey::parse(&value),
            _ => {}
        }
    }

    filters
}

/// FilterState -> 查詢字串。等於預設值的欄位整個鍵省略,
/// 多選科別以逗號接合並保持目前順序。
pub fn serialize(filters: &FilterState) -> String {
    let mut query = form_urlencoded::Serializer::new(String::new());

    if !filters.search_term.is_empty() {
        query.append_pair("search", &filters.search_term);
    }
    if let Some(mode) = filters.consultation_type {
        query.append_pair("type", mode.as_str());
    }
    if !filters.specialties.is_empty() {
        query.append_pair("specialties", &filters.specialties.join(","));
    }
    if let Some(sort) = filters.sort_by {
        query.append_pair("sort", sort.as_str());
    }

    query.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_empty_query_is_default_state() {
        let filters = parse("");

        assert!(filters.is_default());
        assert!(filters.specialties.is_empty());
    }

    #[test]
    fn test_parse_reads_all_four_keys() {
        let filters = parse("search=cardio&type=Video+Consult&specialties=Dentist,Cardiologist&sort=fees");

        assert_eq!(filters.search_term, "cardio");
        assert_eq!(filters.consultation_type, Some(ConsultationMode::VideoConsult));
        assert_eq!(filters.specialties, vec!["Dentist", "Cardiologist"]);
        assert_eq!(filters.sort_by, Some(SortKey::Fees));
    }

    #[test]
    fn test_parse_tolerates_leading_question_mark() {
        let filters = parse("?sort=experience");

        assert_eq!(filters.sort_by, Some(SortKey::Experience));
    }

    #[test]
    fn test_empty_specialties_value_yields_empty_set() {
        let filters = parse("specialties=");

        assert!(filters.specialties.is_empty());
    }

    #[test]
    fn test_unknown_keys_and_values_are_dropped() {
        let filters = parse("page=3&type=House+Call&sort=name&search=ann");

        assert_eq!(filters.search_term, "ann");
        assert_eq!(filters.consultation_type, None);
        assert_eq!(filters.sort_by, None);
    }

    #[test]
    fn test_serialize_omits_defaulted_keys() {
        assert_eq!(serialize(&FilterState::default()), "");

        let filters = FilterState {
            search_term: String::new(),
            consultation_type: Some(ConsultationMode::InClinic),
            specialties: vec![],
            sort_by: None,
        };

        assert_eq!(serialize(&filters), "type=In+Clinic");
    }

    #[test]
    fn test_round_trip_law_on_own_output() {
        let filters = FilterState {
            search_term: "jon snow".to_string(),
            consultation_type: Some(ConsultationMode::VideoConsult),
            specialties: vec!["General Physician".to_string(), "Dentist".to_string()],
            sort_by: Some(SortKey::Experience),
        };

        let encoded = serialize(&filters);
        let decoded = parse(&encoded);

        assert_eq!(decoded, filters);
        // encode(decode(s)) 在自家輸出上是恆等
        assert_eq!(serialize(&decoded), encoded);
    }

    #[test]
    fn test_specialties_preserve_set_order() {
        let filters = FilterState {
            specialties: vec!["Orthopaedic".to_string(), "Dentist".to_string()],
            ..FilterState::default()
        };

        let encoded = serialize(&filters);

        assert_eq!(encoded, "specialties=Orthopaedic%2CDentist");
        assert_eq!(parse(&encoded).specialties, vec!["Orthopaedic", "Dentist"]);
    }
}
