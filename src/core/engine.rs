use crate::core::{filter, query, suggest};
use crate::domain::model::{
    ConsultationMode, Directory, DirectoryState, Doctor, FilterState, SortKey,
};
use crate::domain::ports::{DoctorSource, UrlSync};
use chrono::Utc;

/// 抓取失敗時顯示給使用者的訊息 (細節只進日誌)
pub const FETCH_ERROR_MESSAGE: &str = "Failed to load doctors. Please try again later.";

/// 頁面控制器:持有 FilterState 作為唯一事實來源,
/// 串起抓取 -> 正規化 -> 篩選 -> 網址同步。
///
/// 掛載只抓一次;之後的互動只改 FilterState 並重算可見清單,
/// 不會回到 Loading。丟棄 `mount` 的 future 即取消抓取,
/// 不會有遲到的結果寫回已拆除的狀態。
pub struct DirectoryEngine<S: DoctorSource, U: UrlSync> {
    source: S,
    url: U,
    state: DirectoryState,
    filters: FilterState,
}

impl<S: DoctorSource, U: UrlSync> DirectoryEngine<S, U> {
    pub fn new(source: S, url: U) -> Self {
        Self {
            source,
            url,
            state: DirectoryState::Idle,
            filters: FilterState::default(),
        }
    }

    /// 掛載:以網址列內容做 FilterState 種子,抓取並正規化名錄一次
    pub async fn mount(&mut self) {
        if !matches!(self.state, DirectoryState::Idle) {
            tracing::warn!("mount called on a non-idle engine, ignoring");
            return;
        }

        self.filters = query::parse(&self.url.read());
        self.state = DirectoryState::Loading;
        tracing::info!("🔍 Loading doctor directory...");

        match self.source.fetch().await {
            Ok(doctors) => {
                let directory = Directory::new(doctors, Utc::now());
                tracing::info!(
                    "✅ Loaded {} doctors ({} specialties)",
                    directory.doctors.len(),
                    directory.specialties.len()
                );
                self.state = DirectoryState::Ready(directory);
            }
            Err(e) => {
                tracing::error!("❌ Directory fetch failed: {}", e);
                self.state = DirectoryState::Failed(FETCH_ERROR_MESSAGE.to_string());
            }
        }
    }

    pub fn state(&self) -> &DirectoryState {
        &self.state
    }

    /// 觀察網址列協作者 (測試與 UI 殼層用)
    pub fn url_bar(&self) -> &U {
        &self.url
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    /// 目前查詢字串 (與網址列同步的內容)
    pub fn current_query(&self) -> String {
        query::serialize(&self.filters)
    }

    /// 依目前 FilterState 重算的可見清單;非 Ready 狀態一律為空
    pub fn visible(&self) -> Vec<Doctor> {
        match &self.state {
            DirectoryState::Ready(directory) => filter::apply(&directory.doctors, &self.filters),
            _ => Vec::new(),
        }
    }

    /// 篩選選項用的科別清單 (排序去重,只來自目前名錄)
    pub fn specialties(&self) -> &[String] {
        match &self.state {
            DirectoryState::Ready(directory) => &directory.specialties,
            _ => &[],
        }
    }

    pub fn suggestions(&self, partial: &str) -> Vec<String> {
        match &self.state {
            DirectoryState::Ready(directory) => suggest::suggest(&directory.doctors, partial),
            _ => Vec::new(),
        }
    }

    // 以下為離散的狀態轉換訊息;每次變更都整筆覆寫網址列

    pub fn set_search_term(&mut self, term: &str) {
        self.filters.search_term = term.to_string();
        self.sync_url();
    }

    pub fn set_consultation_type(&mut self, mode: Option<ConsultationMode>) {
        self.filters.consultation_type = mode;
        self.sync_url();
    }

    pub fn toggle_specialty(&mut self, name: &str) {
        self.filters.toggle_specialty(name);
        self.sync_url();
    }

    pub fn set_sort_by(&mut self, sort: Option<SortKey>) {
        self.filters.sort_by = sort;
        self.sync_url();
    }

    fn sync_url(&mut self) {
        let encoded = query::serialize(&self.filters);
        tracing::debug!("Replacing URL query: \"{}\"", encoded);
        self.url.replace(&encoded);
    }
}

/// 程序內的網址列替身:讀取種子查詢字串,記錄每次 replace。
/// CLI 與測試共用,取代瀏覽器的 history.replaceState。
#[derive(Debug, Clone, Default)]
pub struct MemoryUrlBar {
    query: String,
    replace_count: usize,
}

impl MemoryUrlBar {
    pub fn new(initial_query: impl Into<String>) -> Self {
        Self {
            query: initial_query.into(),
            replace_count: 0,
        }
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn replace_count(&self) -> usize {
        self.replace_count
    }
}

impl UrlSync for MemoryUrlBar {
    fn read(&self) -> String {
        self.query.clone()
    }

    fn replace(&mut self, query: &str) {
        self.query = query.to_string();
        self.replace_count += 1;
    }
}
