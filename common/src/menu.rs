//! 메뉴판 모듈
//!
//! 옵션명 → 브랜드(공급사) 매핑과 공급가・택배비를 관리한다.
//! Google Sheets 메뉴판 시트(또는 같은 형식의 CSV/Excel)에서 읽는다.
//!
//! 시트 컬럼: `No, 상품명, 옵션, 브랜드, 공급가, 택배비`

use crate::cell::{clean_cell, parse_amount, parse_leading_int};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 메뉴판 한 행
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MenuEntry {
    pub no: u32,
    pub product_name: String,
    pub option: String,
    pub brand: String,
    pub supply_price: i64,
    pub shipping_fee: i64,
}

impl MenuEntry {
    pub fn new(option: impl Into<String>, brand: impl Into<String>) -> Self {
        Self {
            option: option.into(),
            brand: brand.into(),
            ..Default::default()
        }
    }

    pub fn with_prices(mut self, supply_price: i64, shipping_fee: i64) -> Self {
        self.supply_price = supply_price;
        self.shipping_fee = shipping_fee;
        self
    }
}

/// 메뉴판 전체 (삽입 순서 유지)
#[derive(Debug, Clone, Default)]
pub struct Menu {
    entries: Vec<MenuEntry>,
    /// 옵션명 → entries 인덱스
    index: HashMap<String, usize>,
}

impl Menu {
    pub fn new() -> Self {
        Self::default()
    }

    /// 옵션을 추가한다. 같은 옵션이 이미 있으면 나중 값으로 덮어쓰고 위치는 유지
    pub fn insert(&mut self, entry: MenuEntry) {
        match self.index.get(&entry.option) {
            Some(&pos) => self.entries[pos] = entry,
            None => {
                self.index.insert(entry.option.clone(), self.entries.len());
                self.entries.push(entry);
            }
        }
    }

    /// 시트 행에서 메뉴판을 만든다 (첫 행은 헤더)
    ///
    /// - 4열 미만인 행은 무시
    /// - 옵션 또는 브랜드가 비어 있거나 "nan"인 행은 무시
    /// - 공급가・택배비 열이 없으면 0
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        let mut menu = Self::new();

        for (i, row) in rows.iter().enumerate().skip(1) {
            if row.len() < 4 {
                continue;
            }

            let option = clean_cell(row, 2);
            let brand = clean_cell(row, 3);
            if option.is_empty() || brand.is_empty() {
                continue;
            }

            let no = parse_leading_int(clean_cell(row, 0))
                .and_then(|n| u32::try_from(n).ok())
                .filter(|n| *n > 0)
                .unwrap_or(i as u32);

            menu.insert(MenuEntry {
                no,
                product_name: clean_cell(row, 1).to_string(),
                option: option.to_string(),
                brand: brand.to_string(),
                supply_price: parse_amount(clean_cell(row, 4)),
                shipping_fee: parse_amount(clean_cell(row, 5)),
            });
        }

        tracing::debug!(entries = menu.len(), "메뉴판 로드");
        menu
    }

    /// 옵션명 완전일치 조회
    pub fn get(&self, option: &str) -> Option<&MenuEntry> {
        self.index.get(option).map(|&pos| &self.entries[pos])
    }

    /// 삽입 순서대로 전체 항목
    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 브랜드별 옵션 수 (많은 순, 같으면 이름순)
    pub fn brand_counts(&self) -> Vec<(String, usize)> {
        let mut counts: HashMap<&str, usize> = HashMap::new();
        for entry in &self.entries {
            *counts.entry(entry.brand.as_str()).or_insert(0) += 1;
        }

        let mut v: Vec<(String, usize)> = counts
            .into_iter()
            .map(|(brand, count)| (brand.to_string(), count))
            .collect();
        v.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
        v
    }

    /// 상품명 목록 (처음 등장한 순서, 중복 제거)
    pub fn product_names(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.entries
            .iter()
            .map(|e| e.product_name.as_str())
            .filter(|name| !name.is_empty() && seen.insert(*name))
            .collect()
    }

    /// 상품명에 속한 옵션 목록
    pub fn options_for(&self, product_name: &str) -> Vec<&MenuEntry> {
        self.entries
            .iter()
            .filter(|e| e.product_name == product_name && !e.option.is_empty())
            .collect()
    }

    /// 상품명 + 옵션으로 항목 조회 (개별주문 가격 채우기용)
    pub fn find_item(&self, product_name: &str, option: &str) -> Option<&MenuEntry> {
        self.entries
            .iter()
            .find(|e| e.product_name == product_name && e.option == option)
    }
}

impl FromIterator<MenuEntry> for Menu {
    fn from_iter<I: IntoIterator<Item = MenuEntry>>(iter: I) -> Self {
        let mut menu = Menu::new();
        for entry in iter {
            menu.insert(entry);
        }
        menu
    }
}
