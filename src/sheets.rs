//! Google 스프레드시트 CSV 내보내기 읽기
//!
//! 메뉴판・주문 이력 시트를 `export?format=csv&gid=<gid>` 로 받아온다.
//! 시트는 "링크가 있는 모든 사용자" 보기 권한이어야 한다.

use crate::error::{PicoError, Result};
use crate::table::parse_csv_str;
use pico_commerce_common::kpi::{rows_from_table, KpiRow};
use pico_commerce_common::Menu;
use reqwest::Client;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://docs.google.com";
const TIMEOUT_SECONDS: u64 = 30;

pub struct SheetsClient {
    client: Client,
    base_url: String,
}

impl SheetsClient {
    pub fn new() -> Result<Self> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// 테스트용 (wiremock 서버 주소)
    pub fn with_base_url(base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn export_url(&self, spreadsheet_id: &str, gid: &str) -> String {
        format!(
            "{}/spreadsheets/d/{}/export?format=csv&gid={}",
            self.base_url, spreadsheet_id, gid
        )
    }

    /// 시트 하나를 CSV로 받아 행 목록으로 (헤더 포함)
    pub async fn fetch_rows(&self, spreadsheet_id: &str, gid: &str) -> Result<Vec<Vec<String>>> {
        let url = self.export_url(spreadsheet_id, gid);
        tracing::debug!("시트 요청: {}", url);

        let response = self.client.get(&url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PicoError::Fetch(format!("gid={} HTTP {}", gid, status)));
        }

        let body = response.text().await?;
        parse_csv_str(&body)
    }

    /// 메뉴판 시트 → Menu
    ///
    /// 옵션이 하나도 없으면 `EmptyMenu`.
    pub async fn fetch_menu(&self, spreadsheet_id: &str, gid: &str) -> Result<Menu> {
        let rows = self.fetch_rows(spreadsheet_id, gid).await?;
        let menu = Menu::from_rows(&rows);
        if menu.is_empty() {
            return Err(PicoError::EmptyMenu);
        }
        tracing::info!("메뉴판 {}개 옵션 로드", menu.len());
        Ok(menu)
    }

    /// 주문 이력 시트 → KPI 행
    pub async fn fetch_order_history(&self, spreadsheet_id: &str, gid: &str) -> Result<Vec<KpiRow>> {
        let rows = self.fetch_rows(spreadsheet_id, gid).await?;
        let kpi_rows = rows_from_table(&rows);
        tracing::info!("주문 이력 {}행 로드", kpi_rows.len());
        Ok(kpi_rows)
    }
}
