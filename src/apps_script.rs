//! 개별주문 저장소 (Google Apps Script 웹 앱)
//!
//! - POST `{orders, sheet_gid}` → 시트에 개별주문 추가
//! - GET `?name=&phone=` → 저장된 개별주문 조회 (파라미터가 없으면 전체)

use crate::error::{PicoError, Result};
use pico_commerce_common::{IndividualOrder, SavedOrder};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const TIMEOUT_SECONDS: u64 = 30;

#[derive(Serialize)]
struct SaveRequest<'a> {
    orders: &'a [IndividualOrder],
    sheet_gid: &'a str,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SaveResponse {
    success: bool,
    count: Option<usize>,
    error: Option<String>,
}

/// 조회 결과
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SavedOrders {
    pub success: bool,
    pub orders: Vec<SavedOrder>,
    pub count: Option<usize>,
    /// 이름/전화번호 검색으로 조회했는지
    #[serde(rename = "searchMode")]
    pub search_mode: bool,
    pub error: Option<String>,
}

pub struct AppsScriptClient {
    client: Client,
    url: String,
}

impl AppsScriptClient {
    pub fn new(url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .build()?;
        Ok(Self {
            client,
            url: url.to_string(),
        })
    }

    /// 개별주문 저장
    ///
    /// 웹 앱이 JSON이 아닌 응답을 돌려주면 요청 건수를 저장 건수로 본다.
    pub async fn save_orders(&self, orders: &[IndividualOrder], sheet_gid: &str) -> Result<usize> {
        if orders.is_empty() {
            return Ok(0);
        }

        let response = self
            .client
            .post(&self.url)
            .json(&SaveRequest { orders, sheet_gid })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(PicoError::ApiCall(format!("저장 실패: HTTP {}", status)));
        }

        let body = response.text().await?;
        match serde_json::from_str::<SaveResponse>(&body) {
            Ok(parsed) if !parsed.success => Err(PicoError::ApiCall(
                parsed.error.unwrap_or_else(|| "저장 실패".to_string()),
            )),
            Ok(parsed) => Ok(parsed.count.unwrap_or(orders.len())),
            Err(e) => {
                tracing::debug!("저장 응답이 JSON이 아님: {}", e);
                Ok(orders.len())
            }
        }
    }

    /// 저장된 개별주문 조회
    ///
    /// # Arguments
    /// * `name` - 수취인명 검색어
    /// * `phone` - 전화번호 검색어
    pub async fn fetch_saved_orders(&self, name: Option<&str>, phone: Option<&str>) -> Result<SavedOrders> {
        let mut params: Vec<(&str, &str)> = Vec::new();
        if let Some(name) = name.filter(|s| !s.is_empty()) {
            params.push(("name", name));
        }
        if let Some(phone) = phone.filter(|s| !s.is_empty()) {
            params.push(("phone", phone));
        }

        let response = self.client.get(&self.url).query(&params).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(PicoError::ApiCall("서버 응답 오류".to_string()));
        }

        let body = response.text().await?;
        let saved: SavedOrders =
            serde_json::from_str(&body).map_err(|e| PicoError::ApiParse(e.to_string()))?;

        if !saved.success {
            return Err(PicoError::ApiCall(
                saved.error.unwrap_or_else(|| "조회 실패".to_string()),
            ));
        }

        tracing::debug!(count = saved.orders.len(), search = saved.search_mode, "개별주문 조회");
        Ok(saved)
    }
}
