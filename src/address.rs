//! 카카오 로컬 API 주소 검색
//!
//! 주소 검색과 키워드 검색 결과를 합쳐 중복 없이 돌려준다.

use crate::error::Result;
use reqwest::Client;
use serde::Deserialize;
use std::collections::HashSet;
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://dapi.kakao.com";
const RESULT_SIZE: &str = "5";
const TIMEOUT_SECONDS: u64 = 10;

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct SearchResponse<T> {
    documents: Vec<T>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct RoadAddress {
    address_name: String,
    building_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LotAddress {
    address_name: String,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct AddressDocument {
    address_name: String,
    road_address: Option<RoadAddress>,
    address: Option<LotAddress>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct KeywordDocument {
    place_name: String,
    address_name: String,
    road_address_name: String,
}

impl AddressDocument {
    /// 도로명 주소 (건물명) > 지번 주소 > 문서 주소
    fn display(&self) -> String {
        match (&self.road_address, &self.address) {
            (Some(road), _) if road.building_name.is_empty() => road.address_name.clone(),
            (Some(road), _) => format!("{} ({})", road.address_name, road.building_name),
            (None, Some(lot)) => lot.address_name.clone(),
            (None, None) => self.address_name.clone(),
        }
    }
}

impl KeywordDocument {
    fn display(&self) -> String {
        let addr = if self.road_address_name.is_empty() {
            &self.address_name
        } else {
            &self.road_address_name
        };
        if addr.is_empty() {
            String::new()
        } else if self.place_name.is_empty() {
            addr.clone()
        } else {
            format!("{} ({})", addr, self.place_name)
        }
    }
}

pub struct KakaoClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl KakaoClient {
    pub fn new(api_key: &str) -> Result<Self> {
        Self::with_base_url(api_key, DEFAULT_BASE_URL)
    }

    pub fn with_base_url(api_key: &str, base_url: &str) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(TIMEOUT_SECONDS))
            .build()?;
        Ok(Self {
            client,
            api_key: api_key.to_string(),
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    async fn get_documents<T>(&self, path: &str, query: &str) -> Result<Vec<T>>
    where
        T: serde::de::DeserializeOwned + Default,
    {
        let url = format!("{}{}", self.base_url, path);
        let response = self
            .client
            .get(&url)
            .header("Authorization", format!("KakaoAK {}", self.api_key))
            .query(&[("query", query), ("size", RESULT_SIZE)])
            .send()
            .await?;

        // 실패 응답은 결과 없음으로 처리
        if !response.status().is_success() {
            tracing::warn!("카카오 검색 실패 ({}): HTTP {}", path, response.status());
            return Ok(Vec::new());
        }

        let parsed: SearchResponse<T> = response.json().await?;
        Ok(parsed.documents)
    }

    /// 주소 검색
    pub async fn search_address(&self, query: &str) -> Result<Vec<String>> {
        let documents: Vec<AddressDocument> =
            self.get_documents("/v2/local/search/address.json", query).await?;
        Ok(documents
            .iter()
            .map(AddressDocument::display)
            .filter(|s| !s.is_empty())
            .collect())
    }

    /// 키워드(장소명) 검색
    pub async fn search_keyword(&self, query: &str) -> Result<Vec<String>> {
        let documents: Vec<KeywordDocument> =
            self.get_documents("/v2/local/search/keyword.json", query).await?;
        Ok(documents
            .iter()
            .map(KeywordDocument::display)
            .filter(|s| !s.is_empty())
            .collect())
    }

    /// 주소 + 키워드 검색 (주소 결과 먼저, 중복 제거)
    pub async fn search(&self, query: &str) -> Result<Vec<String>> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        let addresses = self.search_address(query).await?;
        let keywords = self.search_keyword(query).await?;
        Ok(merge_unique(addresses, keywords))
    }
}

fn merge_unique(first: Vec<String>, second: Vec<String>) -> Vec<String> {
    let mut seen = HashSet::new();
    first
        .into_iter()
        .chain(second)
        .filter(|s| seen.insert(s.clone()))
        .collect()
}
