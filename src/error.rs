use thiserror::Error;

#[derive(Error, Debug)]
pub enum PicoError {
    #[error("설정 오류: {0}")]
    Config(String),

    #[error("{0}이(가) 설정되지 않았습니다. `pico config --{1} VALUE` 로 설정하세요")]
    MissingSetting(&'static str, &'static str),

    #[error("파일을 찾을 수 없습니다: {0}")]
    FileNotFound(String),

    #[error("지원하지 않는 파일 형식: {0}")]
    UnsupportedFormat(String),

    #[error("시트 읽기 오류: {0}")]
    SheetRead(String),

    #[error("데이터 가져오기 실패: {0}")]
    Fetch(String),

    #[error("API 호출 오류: {0}")]
    ApiCall(String),

    #[error("API 응답 해석 실패: {0}")]
    ApiParse(String),

    #[error("JSON 해석 오류: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IO 오류: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel 생성 오류: {0}")]
    ExcelGeneration(String),

    #[error("메뉴판이 비어 있습니다")]
    EmptyMenu,

    #[error(transparent)]
    Common(#[from] pico_commerce_common::Error),
}

impl From<reqwest::Error> for PicoError {
    fn from(e: reqwest::Error) -> Self {
        PicoError::ApiCall(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, PicoError>;
