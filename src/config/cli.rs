use crate::domain::ports::ExportSink;
use crate::utils::error::Result;
use std::fs;
use std::path::Path;

/// 把匯出結果寫到本機檔案系統
#[derive(Debug, Clone)]
pub struct LocalExportSink {
    base_path: String,
}

impl LocalExportSink {
    pub fn new(base_path: String) -> Self {
        Self { base_path }
    }
}

impl ExportSink for LocalExportSink {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = Path::new(&self.base_path).join(path);

        if let Some(parent) = full_path.parent() {
            fs::create_dir_all(parent)?;
        }

        fs::write(full_path, data)?;
        Ok(())
    }
}
