use crate::domain::model::{Directory, Doctor};
use crate::utils::error::{DirectoryError, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;

/// 可見清單的輸出格式
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Result<Self> {
        match value {
            "table" => Ok(OutputFormat::Table),
            "csv" => Ok(OutputFormat::Csv),
            "json" => Ok(OutputFormat::Json),
            other => Err(DirectoryError::InvalidConfigValueError {
                field: "format".to_string(),
                value: other.to_string(),
                reason: "Valid formats: table, csv, json".to_string(),
            }),
        }
    }
}

/// JSON 匯出的外層文件,附抓取時間與筆數
#[derive(Debug, Serialize)]
struct ExportDocument<'a> {
    fetched_at: DateTime<Utc>,
    count: usize,
    doctors: &'a [Doctor],
}

/// 終端機清單:一行筆數,之後每位醫師一行
pub fn render_table(doctors: &[Doctor]) -> String {
    let noun = if doctors.len() == 1 { "doctor" } else { "doctors" };
    let mut lines = vec![format!("{} {} found", doctors.len(), noun)];

    for doctor in doctors {
        let specialties = if doctor.specialties.is_empty() {
            "-".to_string()
        } else {
            doctor.specialties.join(", ")
        };
        let modes = if doctor.consultation_modes.is_empty() {
            "-".to_string()
        } else {
            doctor
                .consultation_modes
                .iter()
                .map(|m| m.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };

        lines.push(format!(
            "Dr. {} | {} | {} years | ₹{} | {}",
            doctor.name, specialties, doctor.experience_years, doctor.fee_amount, modes
        ));
    }

    lines.join("\n")
}

pub fn to_csv(doctors: &[Doctor]) -> Result<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record([
        "id",
        "name",
        "specialties",
        "experience_years",
        "fee_amount",
        "consultation_modes",
        "image_url",
    ])?;

    for doctor in doctors {
        let specialties = doctor.specialties.join(",");
        let modes = doctor
            .consultation_modes
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(",");
        let experience = doctor.experience_years.to_string();
        let fee = doctor.fee_amount.to_string();

        writer.write_record([
            doctor.id.as_str(),
            doctor.name.as_str(),
            specialties.as_str(),
            experience.as_str(),
            fee.as_str(),
            modes.as_str(),
            doctor.image_url.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| DirectoryError::ProcessingError {
            message: format!("CSV buffer error: {}", e),
        })?;

    String::from_utf8(bytes).map_err(|e| DirectoryError::ProcessingError {
        message: format!("CSV output is not UTF-8: {}", e),
    })
}

pub fn to_json(doctors: &[Doctor], fetched_at: DateTime<Utc>) -> Result<String> {
    let document = ExportDocument {
        fetched_at,
        count: doctors.len(),
        doctors,
    };
    Ok(serde_json::to_string_pretty(&document)?)
}

/// 依格式輸出可見清單;table 給終端機,csv/json 可寫檔
pub fn render(format: OutputFormat, doctors: &[Doctor], directory: &Directory) -> Result<String> {
    match format {
        OutputFormat::Table => Ok(render_table(doctors)),
        OutputFormat::Csv => to_csv(doctors),
        OutputFormat::Json => to_json(doctors, directory.fetched_at),
    }
}
