use crate::domain::model::{ConsultationMode, Doctor};
use regex::Regex;
use serde_json::Value;

/// 把上游的原始 JSON 紀錄轉成穩定的 `Doctor` 形狀。
///
/// 上游欄位名稱與型別都不可靠:數值藏在自由文字裡 ("13 Years of
/// experience"、"₹ 500"),布林欄位未必是真正的布林。單筆紀錄壞掉
/// 只會退回預設值,不會被丟棄,也不會讓整批轉換失敗。
pub fn normalize(raw: &[Value]) -> Vec<Doctor> {
    // 常數樣式,編譯必定成功
    let digits = Regex::new(r"\d+").unwrap();

    raw.iter()
        .map(|record| {
            let mut consultation_modes = Vec::new();
            if is_truthy(record.get("video_consult")) {
                consultation_modes.push(ConsultationMode::VideoConsult);
            }
            if is_truthy(record.get("in_clinic")) {
                consultation_modes.push(ConsultationMode::InClinic);
            }

            Doctor {
                id: id_field(record),
                name: string_field(record, "name"),
                specialties: specialty_names(record),
                experience_years: embedded_number(&digits, record.get("experience")),
                fee_amount: embedded_number(&digits, record.get("fees")),
                consultation_modes,
                image_url: string_field(record, "photo"),
            }
        })
        .collect()
}

/// 上游 id 缺漏或為空時,合成一個隨機佔位 id
/// (不保證跨次執行穩定,因為沒有任何持久化)
fn id_field(record: &Value) -> String {
    match record.get("id") {
        Some(Value::String(s)) if !s.is_empty() => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        _ => format!("doc-{:08x}", rand::random::<u32>()),
    }
}

fn string_field(record: &Value, key: &str) -> String {
    record
        .get(key)
        .and_then(Value::as_str)
        .unwrap_or("")
        .to_string()
}

/// 上游是 `specialities: [{name: ...}]`,缺 name 的項目退回空字串
fn specialty_names(record: &Value) -> Vec<String> {
    record
        .get("specialities")
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .map(|item| {
                    item.get("name")
                        .and_then(Value::as_str)
                        .unwrap_or("")
                        .to_string()
                })
                .collect()
        })
        .unwrap_or_default()
}

/// 取出自由文字中的第一段連續數字,沒有就是 0
fn embedded_number(digits: &Regex, value: Option<&Value>) -> u32 {
    value
        .and_then(Value::as_str)
        .and_then(|text| digits.find(text))
        .and_then(|m| m.as_str().parse().ok())
        .unwrap_or(0)
}

/// 上游旗標是 "boolean-ish":接受布林、非空字串與非零數字
fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        Some(Value::Bool(b)) => *b,
        Some(Value::String(s)) => !s.is_empty() && s != "false",
        Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
        _ => false,
    }
}
