//! 발주서 브랜드별 분리
//!
//! 업로드된 원본 발주서의 각 행을 `ColumnLayout`으로 주문 레코드에 매핑하고,
//! 메뉴판으로 브랜드를 판정하여 브랜드별로 묶는다.

use crate::cell::{cell, parse_amount, parse_leading_int};
use crate::classifier;
use crate::menu::Menu;
use crate::types::{BrandBucket, ClassifiedOrder, OrderRecord, UNCLASSIFIED};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 화면 표시용 옵션 최대 글자 수
pub const DISPLAY_OPTION_MAX_CHARS: usize = 40;

/// 원본 발주서의 컬럼 위치 (0부터)
///
/// 기본값은 사방넷 일반발주서 양식 기준
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnLayout {
    /// 비어 있으면 행을 건너뛰는 열
    pub row_key: usize,
    pub order_number: usize,
    pub recipient_name: usize,
    pub recipient_phone: usize,
    /// 연락처가 비었을 때 순서대로 확인하는 대체 열
    pub phone_fallbacks: Vec<usize>,
    pub address: usize,
    pub product_name: usize,
    pub option_primary: usize,
    pub option_secondary: usize,
    pub quantity: usize,
    pub unit_price: usize,
    pub invoice: usize,
    pub shipping_fee: usize,
    /// 내보내기에 사용하는 열 범위 [start, end)
    pub export_start: usize,
    pub export_end: usize,
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self {
            row_key: 0,
            order_number: 2,
            recipient_name: 5,
            recipient_phone: 6,
            phone_fallbacks: vec![21, 25],
            address: 8,
            product_name: 10,
            option_primary: 11,
            option_secondary: 12,
            quantity: 13,
            unit_price: 14,
            invoice: 18,
            shipping_fee: 19,
            export_start: 1,
            export_end: 21,
        }
    }
}

/// 브랜드별 분리 결과
#[derive(Debug, Clone, Default)]
pub struct SplitResult {
    buckets: HashMap<String, Vec<ClassifiedOrder>>,
}

impl SplitResult {
    pub fn get(&self, brand: &str) -> Option<&[ClassifiedOrder]> {
        self.buckets.get(brand).map(|v| v.as_slice())
    }

    pub fn brand_count(&self) -> usize {
        self.buckets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }

    /// 주문 건수 많은 순 (같으면 브랜드명 순). 표시 전용
    pub fn sorted_buckets(&self) -> Vec<BrandBucket<'_>> {
        let mut buckets: Vec<BrandBucket<'_>> = self
            .buckets
            .iter()
            .map(|(brand, orders)| BrandBucket { brand, orders })
            .collect();
        buckets.sort_by(|a, b| {
            b.order_count()
                .cmp(&a.order_count())
                .then_with(|| a.brand.cmp(b.brand))
        });
        buckets
    }

    pub fn total_orders(&self) -> usize {
        self.buckets.values().map(|v| v.len()).sum()
    }

    pub fn total_quantity(&self) -> u64 {
        self.buckets
            .values()
            .flatten()
            .map(|o| u64::from(o.order.quantity))
            .sum()
    }

    pub fn unclassified(&self) -> &[ClassifiedOrder] {
        self.get(UNCLASSIFIED).unwrap_or(&[])
    }
}

/// 수량 파싱: 선행 정수, 없거나 1 미만이면 1
pub fn parse_quantity(value: &str) -> u32 {
    parse_leading_int(value)
        .filter(|n| *n >= 1)
        .and_then(|n| u32::try_from(n).ok())
        .unwrap_or(1)
}

/// 표시용 옵션 (글자 단위로 자름)
pub fn truncate_display(option: &str) -> String {
    option.chars().take(DISPLAY_OPTION_MAX_CHARS).collect()
}

/// 행 하나를 주문 레코드로 매핑 (연락처 보정 포함)
pub fn map_row(row: &[String], layout: &ColumnLayout) -> OrderRecord {
    let start = layout.export_start.min(row.len());
    let end = layout.export_end.min(row.len()).max(start);
    let mut raw_columns: Vec<String> = row[start..end].to_vec();

    let mut phone = cell(row, layout.recipient_phone).to_string();
    if phone.is_empty() {
        if let Some(fallback) = layout
            .phone_fallbacks
            .iter()
            .map(|&idx| cell(row, idx))
            .find(|v| !v.is_empty())
        {
            phone = fallback.to_string();

            // 내보내기 데이터에도 반영
            if let Some(offset) = layout.recipient_phone.checked_sub(layout.export_start) {
                if layout.recipient_phone < layout.export_end {
                    if raw_columns.len() <= offset {
                        raw_columns.resize(offset + 1, String::new());
                    }
                    raw_columns[offset] = phone.clone();
                }
            }
        }
    }

    OrderRecord {
        order_number: cell(row, layout.order_number).to_string(),
        product_name: cell(row, layout.product_name).to_string(),
        option_primary: row.get(layout.option_primary).cloned().unwrap_or_default(),
        option_secondary: row.get(layout.option_secondary).cloned().unwrap_or_default(),
        quantity: parse_quantity(cell(row, layout.quantity)),
        address: cell(row, layout.address).to_string(),
        recipient_name: cell(row, layout.recipient_name).to_string(),
        recipient_phone: phone,
        raw_columns,
    }
}

/// 원본 발주서를 브랜드별로 분리한다
///
/// # Arguments
/// * `rows` - 시트 전체 행 (첫 행은 헤더)
/// * `menu` - 메뉴판
/// * `layout` - 컬럼 위치
///
/// # Returns
/// 브랜드 → 주문 목록. 메뉴판에 없는 주문은 "미분류"
pub fn split_orders(rows: &[Vec<String>], menu: &Menu, layout: &ColumnLayout) -> SplitResult {
    let mut buckets: HashMap<String, Vec<ClassifiedOrder>> = HashMap::new();

    for row in rows.iter().skip(1) {
        if cell(row, layout.row_key).is_empty() {
            continue;
        }

        let order = map_row(row, layout);
        let matched = classifier::resolve(&order.option_primary, &order.option_secondary, menu);

        // 메뉴판 가격 우선, 미분류는 발주서의 단가・택배비
        let (brand, unit_supply_price, unit_shipping_fee) = match matched {
            Some(entry) => (entry.brand.clone(), entry.supply_price, entry.shipping_fee),
            None => (
                UNCLASSIFIED.to_string(),
                parse_amount(cell(row, layout.unit_price)),
                parse_amount(cell(row, layout.shipping_fee)),
            ),
        };

        let classified = ClassifiedOrder {
            display_option: truncate_display(&order.option_secondary),
            order,
            brand,
            unit_supply_price,
            unit_shipping_fee,
            shipping_fee_applied: unit_shipping_fee,
        };

        buckets
            .entry(classified.brand.clone())
            .or_default()
            .push(classified);
    }

    let result = SplitResult { buckets };
    tracing::info!(
        orders = result.total_orders(),
        brands = result.brand_count(),
        unclassified = result.unclassified().len(),
        "발주서 분리 완료"
    );
    result
}
