//! 주문 데이터 타입 정의
//!
//! CLI와 코어 로직에서 공유하는 타입:
//! - OrderRecord: 업로드된 발주서 한 행을 컬럼 매핑한 결과
//! - ClassifiedOrder: 브랜드 판정과 택배비 적용이 끝난 주문
//! - BrandBucket: 브랜드별 묶음 (표시용)
//! - IndividualOrder / SavedOrder: 개별주문 입력과 Apps Script 저장 형식

use serde::{Deserialize, Serialize};

/// 미분류 브랜드 (메뉴판에서 일치하는 옵션이 없을 때)
pub const UNCLASSIFIED: &str = "미분류";

/// 발주서 한 행을 이름 있는 필드로 옮긴 주문
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    #[serde(default)]
    pub order_number: String,     // 주문번호

    #[serde(default)]
    pub product_name: String,     // 상품명

    #[serde(default)]
    pub option_primary: String,   // 옵션1 (수집)

    #[serde(default)]
    pub option_secondary: String, // 옵션2 (확정)

    pub quantity: u32,

    #[serde(default)]
    pub address: String,

    #[serde(default)]
    pub recipient_name: String,

    #[serde(default)]
    pub recipient_phone: String,

    /// 내보내기에 그대로 쓰이는 원본 셀 값 (연락처 보정 반영)
    #[serde(default)]
    pub raw_columns: Vec<String>,
}

/// 브랜드 판정이 끝난 주문
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassifiedOrder {
    pub order: OrderRecord,
    pub brand: String,
    /// 화면 표시용 옵션 (최대 40자)
    pub display_option: String,
    pub unit_supply_price: i64,
    pub unit_shipping_fee: i64,
    /// 묶음배송 처리 후 실제 청구되는 택배비
    pub shipping_fee_applied: i64,
}

impl ClassifiedOrder {
    /// 합계 = 공급가 × 수량 + 적용 택배비
    pub fn total_amount(&self) -> i64 {
        self.unit_supply_price * i64::from(self.order.quantity) + self.shipping_fee_applied
    }

    pub fn is_unclassified(&self) -> bool {
        self.brand == UNCLASSIFIED
    }
}

/// 브랜드별 주문 묶음 (표시 전용)
#[derive(Debug, Clone, PartialEq)]
pub struct BrandBucket<'a> {
    pub brand: &'a str,
    pub orders: &'a [ClassifiedOrder],
}

impl BrandBucket<'_> {
    pub fn order_count(&self) -> usize {
        self.orders.len()
    }

    pub fn total_quantity(&self) -> u64 {
        self.orders.iter().map(|o| u64::from(o.order.quantity)).sum()
    }
}

/// 개별주문 입력
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct IndividualOrder {
    pub recipient_name: String,
    pub recipient_phone: String,
    pub address: String,
    #[serde(default)]
    pub product_name: String,
    #[serde(default)]
    pub option: String,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
    #[serde(default)]
    pub supply_price: i64,
    #[serde(default)]
    pub shipping_fee: i64,
}

fn default_quantity() -> u32 {
    1
}

impl IndividualOrder {
    /// 수취인명・전화번호・주소는 필수
    pub fn validate(&self) -> crate::Result<()> {
        let missing: Vec<&str> = [
            ("수취인명", &self.recipient_name),
            ("전화번호", &self.recipient_phone),
            ("주소", &self.address),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(label, _)| *label)
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(crate::Error::Validation(format!(
                "{}은(는) 필수입니다",
                missing.join(", ")
            )))
        }
    }
}

/// Apps Script에 저장된 개별주문
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SavedOrder {
    pub saved_time: String,
    pub recipient_name: String,
    pub recipient_phone: String,
    pub address: String,
    pub product_name: String,
    pub option: String,
    pub quantity: u32,
    pub supply_price: i64,
    pub shipping_fee: i64,
    pub total: i64,
}
