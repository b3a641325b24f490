use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdvisorError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("カタログが不正: {0}")]
    InvalidCatalog(String),

    #[error("活動データが不正: {0}")]
    InvalidDetails(String),

    #[error("活動データが空です: {0}")]
    NoActivities(String),

    #[error("Excel読み込みエラー: {0}")]
    ExcelRead(String),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Core(#[from] toolstack_common::Error),
}

impl From<calamine::Error> for AdvisorError {
    fn from(e: calamine::Error) -> Self {
        AdvisorError::ExcelRead(e.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AdvisorError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        AdvisorError::ExcelGeneration(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, AdvisorError>;
