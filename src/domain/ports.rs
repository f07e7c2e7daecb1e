use crate::domain::model::Doctor;
use crate::utils::error::Result;
use async_trait::async_trait;
use std::time::Duration;

/// 遠端醫師名錄來源,每次掛載只會呼叫一次
#[async_trait]
pub trait DoctorSource: Send + Sync {
    async fn fetch(&self) -> Result<Vec<Doctor>>;
}

/// 網址列協作者:啟動時讀一次,之後每次狀態變更以 replace 覆寫
/// (replace 不會堆積歷史紀錄)
pub trait UrlSync: Send + Sync {
    fn read(&self) -> String;
    fn replace(&mut self, query: &str);
}

pub trait ConfigProvider: Send + Sync {
    fn api_endpoint(&self) -> &str;
    fn request_timeout(&self) -> Option<Duration>;
}

/// 匯出結果的寫入端 (本機檔案或測試用記憶體)
pub trait ExportSink: Send + Sync {
    fn write_file(
        &self,
        path: &str,
        data: &[u8],
    ) -> impl std::future::Future<Output = Result<()>> + Send;
}
