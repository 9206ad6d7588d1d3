//! 묶음배송 택배비 처리
//!
//! 같은 주소・같은 브랜드로 가는 주문은 한 상자로 배송되므로
//! 택배비를 그룹당 한 번만 청구한다.
//! 그룹 키는 `(주소, 브랜드)` 문자열 완전일치 (정규화하지 않음).

use crate::types::ClassifiedOrder;
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// 그룹에서 청구할 택배비 결정 방식
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ShippingPolicy {
    /// 그룹의 첫 주문이 자기 택배비를 부담 (개별주문 추가 흐름)
    #[default]
    FirstInGroup,
    /// 그룹의 첫 주문이 그룹 내 최대 택배비를 부담 (기존 발주서 합본 흐름)
    MaxInGroup,
}

impl std::str::FromStr for ShippingPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "first" | "first-in-group" => Ok(ShippingPolicy::FirstInGroup),
            "max" | "max-in-group" => Ok(ShippingPolicy::MaxInGroup),
            _ => Err(format!("Unknown shipping policy: {}. Use first or max", s)),
        }
    }
}

impl std::fmt::Display for ShippingPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShippingPolicy::FirstInGroup => write!(f, "first"),
            ShippingPolicy::MaxInGroup => write!(f, "max"),
        }
    }
}

fn group_key(order: &ClassifiedOrder) -> (&str, &str) {
    (order.order.address.as_str(), order.brand.as_str())
}

/// 묶음배송 택배비를 적용한다
///
/// 입력 순서대로 처리하며, 그룹에서 처음 만난 주문만 택배비를 부담하고
/// 나머지는 0으로 설정한다.
pub fn apply_grouped_shipping(
    orders: &[ClassifiedOrder],
    policy: ShippingPolicy,
) -> Vec<ClassifiedOrder> {
    let group_max: HashMap<(&str, &str), i64> = match policy {
        ShippingPolicy::FirstInGroup => HashMap::new(),
        ShippingPolicy::MaxInGroup => {
            let mut max: HashMap<(&str, &str), i64> = HashMap::new();
            for order in orders {
                let fee = max.entry(group_key(order)).or_insert(order.unit_shipping_fee);
                *fee = (*fee).max(order.unit_shipping_fee);
            }
            max
        }
    };

    let mut billed: HashSet<(&str, &str)> = HashSet::new();
    let result: Vec<ClassifiedOrder> = orders
        .iter()
        .map(|order| {
            let key = group_key(order);
            let fee = if billed.insert(key) {
                group_max.get(&key).copied().unwrap_or(order.unit_shipping_fee)
            } else {
                0
            };
            ClassifiedOrder {
                shipping_fee_applied: fee,
                ..order.clone()
            }
        })
        .collect();

    tracing::debug!(
        orders = orders.len(),
        groups = billed.len(),
        %policy,
        "묶음배송 적용"
    );
    result
}

/// 전체 합계 (공급가 × 수량 + 적용 택배비)
pub fn grand_total(orders: &[ClassifiedOrder]) -> i64 {
    orders.iter().map(|o| o.total_amount()).sum()
}

/// 적용된 택배비 합계
pub fn total_shipping(orders: &[ClassifiedOrder]) -> i64 {
    orders.iter().map(|o| o.shipping_fee_applied).sum()
}
