use crate::core::adapter;
use crate::domain::model::Doctor;
use crate::domain::ports::DoctorSource;
use crate::utils::error::{DirectoryError, Result};
use async_trait::async_trait;
use reqwest::Client;
use std::collections::HashMap;
use std::time::Duration;

/// 透過 HTTP GET 抓取上游名錄的來源實作
pub struct HttpDoctorSource {
    endpoint: String,
    client: Client,
    timeout: Option<Duration>,
    headers: HashMap<String, String>,
}

impl HttpDoctorSource {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            client: Client::new(),
            timeout: None,
            headers: HashMap::new(),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_headers(mut self, headers: HashMap<String, String>) -> Self {
        self.headers = headers;
        self
    }
}

#[async_trait]
impl DoctorSource for HttpDoctorSource {
    async fn fetch(&self) -> Result<Vec<Doctor>> {
        // 構建請求
        let mut request = self.client.get(&self.endpoint);

        for (key, value) in &self.headers {
            request = request.header(key, value);
        }

        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }

        tracing::debug!("Making API request to: {}", self.endpoint);
        let response = request.send().await?;
        tracing::debug!("API response status: {}", response.status());

        // 非 2xx 視為抓取失敗,不顯示部分結果
        if !response.status().is_success() {
            return Err(DirectoryError::HttpStatusError {
                status: response.status().as_u16(),
            });
        }

        let json_data: serde_json::Value = response.json().await?;

        // 上游固定回傳陣列;單一物件也包成一筆處理
        let raw = match json_data {
            serde_json::Value::Array(items) => items,
            other => vec![other],
        };

        Ok(adapter::normalize(&raw))
    }
}
