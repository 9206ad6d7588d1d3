//! 개별주문 발주서 생성
//!
//! 직접 입력한 개별주문을 메뉴판으로 브랜드 판정하고 묶음배송 택배비를 적용한 뒤,
//! 일반발주서와 같은 26열 양식의 행으로 만든다.

use crate::classifier;
use crate::menu::Menu;
use crate::shipping::{apply_grouped_shipping, ShippingPolicy};
use crate::splitter::truncate_display;
use crate::types::{ClassifiedOrder, IndividualOrder, OrderRecord, UNCLASSIFIED};
use crate::Result;

/// 개별주문 발주서 헤더
pub const INDIVIDUAL_HEADER: [&str; 26] = [
    "No.",
    "수집일자(YYYYMMDD)",
    "주문번호(사방넷)",
    "주문번호(쇼핑몰)",
    "상품코드(쇼핑몰)",
    "수취인명",
    "수취인전화번호1",
    "수취인우편번호(1)",
    "수취인주소(1)",
    "배송메세지",
    "상품명(수집)",
    "옵션(수집)",
    "옵션(확정)",
    "수량",
    "단가",
    "추가비용",
    "특이사항",
    "택배사",
    "송장번호",
    "택배비",
    "주문자명",
    "주문자전화번호1",
    "TEMP5",
    "비고",
    "쇼핑몰명(1)",
    "수취인전화번호2",
];

/// 쇼핑몰명 열에 들어가는 값
pub const INDIVIDUAL_MALL_NAME: &str = "개별주문";

/// 개별주문을 검증하고 브랜드 판정 + 묶음배송을 적용한다
///
/// 가격은 입력값을 쓰되, 0이면 메뉴판(상품명 + 옵션, 없으면 옵션 판정 결과)에서 채운다.
pub fn classify_individual_orders(
    orders: &[IndividualOrder],
    menu: &Menu,
    policy: ShippingPolicy,
) -> Result<Vec<ClassifiedOrder>> {
    let mut classified = Vec::with_capacity(orders.len());

    for (i, order) in orders.iter().enumerate() {
        order.validate().map_err(|crate::Error::Validation(msg)| {
            crate::Error::Validation(format!("{}번째 주문: {}", i + 1, msg))
        })?;

        // 발주서 행과 같은 입력(옵션1 = 옵션2 = 옵션)으로 판정
        let matched = classifier::resolve(&order.option, &order.option, menu);
        let brand = matched
            .map(|entry| entry.brand.clone())
            .unwrap_or_else(|| UNCLASSIFIED.to_string());
        let item = menu.find_item(&order.product_name, &order.option).or(matched);
        let supply_price = match (order.supply_price, item) {
            (0, Some(item)) => item.supply_price,
            (price, _) => price,
        };
        let shipping_fee = match (order.shipping_fee, item) {
            (0, Some(item)) => item.shipping_fee,
            (fee, _) => fee,
        };

        classified.push(ClassifiedOrder {
            order: OrderRecord {
                product_name: order.product_name.clone(),
                option_primary: order.option.clone(),
                option_secondary: order.option.clone(),
                quantity: order.quantity.max(1),
                address: order.address.trim().to_string(),
                recipient_name: order.recipient_name.trim().to_string(),
                recipient_phone: order.recipient_phone.trim().to_string(),
                ..Default::default()
            },
            brand,
            display_option: truncate_display(&order.option),
            unit_supply_price: supply_price,
            unit_shipping_fee: shipping_fee,
            shipping_fee_applied: shipping_fee,
        });
    }

    Ok(apply_grouped_shipping(&classified, policy))
}

/// 개별주문 발주서 행 생성 (헤더 제외)
///
/// # Arguments
/// * `orders` - 묶음배송 적용이 끝난 주문
/// * `date` - 수집일자 (YYYYMMDD)
pub fn build_order_sheet(orders: &[ClassifiedOrder], date: &str) -> Vec<Vec<String>> {
    orders
        .iter()
        .enumerate()
        .map(|(i, o)| {
            let seq = i + 1;
            let r = &o.order;
            vec![
                seq.to_string(),
                date.to_string(),
                format!("IND{}{:04}", date, seq),
                format!("개별{:04}", seq),
                String::new(),
                r.recipient_name.clone(),
                r.recipient_phone.clone(),
                String::new(),
                r.address.clone(),
                String::new(),
                r.product_name.clone(),
                r.option_primary.clone(),
                r.option_secondary.clone(),
                r.quantity.to_string(),
                o.unit_supply_price.to_string(),
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                o.shipping_fee_applied.to_string(),
                r.recipient_name.clone(),
                r.recipient_phone.clone(),
                String::new(),
                String::new(),
                INDIVIDUAL_MALL_NAME.to_string(),
                String::new(),
            ]
        })
        .collect()
}

/// 헤더를 포함한 개별주문 발주서
pub fn order_sheet_with_header(orders: &[ClassifiedOrder], date: &str) -> Vec<Vec<String>> {
    let mut rows = vec![INDIVIDUAL_HEADER.iter().map(|s| s.to_string()).collect()];
    rows.extend(build_order_sheet(orders, date));
    rows
}

/// 기존 발주서 + 개별주문 합본 (기존 헤더 사용)
pub fn merge_with_existing(existing: &[Vec<String>], individual_rows: &[Vec<String>]) -> Vec<Vec<String>> {
    let mut merged: Vec<Vec<String>> = Vec::with_capacity(existing.len() + individual_rows.len());
    match existing.split_first() {
        Some((header, data)) => {
            merged.push(header.clone());
            merged.extend(data.iter().cloned());
        }
        None => merged.push(INDIVIDUAL_HEADER.iter().map(|s| s.to_string()).collect()),
    }
    merged.extend(individual_rows.iter().cloned());
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menu::MenuEntry;
    use crate::shipping::grand_total;
    use crate::splitter::{split_orders, ColumnLayout};

    fn individual(name: &str, address: &str, option: &str, qty: u32, supply: i64, ship: i64) -> IndividualOrder {
        IndividualOrder {
            recipient_name: name.to_string(),
            recipient_phone: "010-1234-5678".to_string(),
            address: address.to_string(),
            product_name: "우산".to_string(),
            option: option.to_string(),
            quantity: qty,
            supply_price: supply,
            shipping_fee: ship,
        }
    }

    fn menu() -> Menu {
        let mut m = Menu::new();
        m.insert(MenuEntry {
            product_name: "우산".to_string(),
            ..MenuEntry::new("빨간우산", "우산브랜드").with_prices(1000, 500)
        });
        m
    }

    #[test]
    fn test_classify_end_to_end_total() {
        let orders = vec![
            individual("김철수", "서울시 A", "빨간우산", 2, 1000, 500),
            individual("김철수", "서울시 A", "빨간우산", 1, 1000, 500),
        ];
        let classified = classify_individual_orders(&orders, &menu(), ShippingPolicy::FirstInGroup).unwrap();

        assert!(classified.iter().all(|o| o.brand == "우산브랜드"));
        assert_eq!(classified[0].total_amount(), 2500);
        assert_eq!(classified[1].total_amount(), 1000);
        assert_eq!(grand_total(&classified), 3500);
    }

    #[test]
    fn test_classify_fills_prices_from_menu() {
        let orders = vec![individual("김철수", "서울시 A", "빨간우산", 1, 0, 0)];
        let classified = classify_individual_orders(&orders, &menu(), ShippingPolicy::FirstInGroup).unwrap();
        assert_eq!(classified[0].unit_supply_price, 1000);
        assert_eq!(classified[0].shipping_fee_applied, 500);
    }

    #[test]
    fn test_classify_rejects_missing_address() {
        let orders = vec![
            individual("김철수", "서울시 A", "빨간우산", 1, 1000, 500),
            individual("이영희", "", "빨간우산", 1, 1000, 500),
        ];
        let err = classify_individual_orders(&orders, &menu(), ShippingPolicy::FirstInGroup).unwrap_err();
        let message = format!("{}", err);
        assert!(message.contains("2번째 주문"));
        assert!(message.contains("주소"));
    }

    #[test]
    fn test_build_order_sheet() {
        let orders = vec![
            individual("김철수", "서울시 A", "빨간우산", 2, 1000, 500),
            individual("김철수", "서울시 A", "빨간우산", 1, 1000, 500),
        ];
        let classified = classify_individual_orders(&orders, &menu(), ShippingPolicy::FirstInGroup).unwrap();
        let rows = build_order_sheet(&classified, "20260115");

        assert_eq!(rows.len(), 2);
        assert!(rows.iter().all(|r| r.len() == INDIVIDUAL_HEADER.len()));
        assert_eq!(rows[0][2], "IND202601150001");
        assert_eq!(rows[1][3], "개별0002");
        assert_eq!(rows[0][13], "2");
        assert_eq!(rows[0][19], "500");
        assert_eq!(rows[1][19], "0");
        assert_eq!(rows[0][24], INDIVIDUAL_MALL_NAME);
    }

    #[test]
    fn test_brand_survives_resplit_of_generated_sheet() {
        let mut m = Menu::new();
        m.insert(MenuEntry::new("프리미엄 장우산", "우산브랜드"));
        m.insert(MenuEntry::new("빨간우산", "우산브랜드"));

        let mut long_name = individual("김철수", "서울시 A", "커스텀 각인", 1, 1000, 500);
        long_name.product_name = "프리미엄 장우산 세트".to_string();
        let orders = vec![long_name, individual("이영희", "부산시 B", "빨간우산", 1, 1000, 500)];

        let classified = classify_individual_orders(&orders, &m, ShippingPolicy::FirstInGroup).unwrap();
        // 상품명이 아닌 옵션으로 판정
        assert_eq!(classified[0].brand, UNCLASSIFIED);
        assert_eq!(classified[1].brand, "우산브랜드");

        let sheet = order_sheet_with_header(&classified, "20260115");
        let split = split_orders(&sheet, &m, &ColumnLayout::default());
        for order in &classified {
            let resplit = split
                .sorted_buckets()
                .into_iter()
                .find(|b| b.orders.iter().any(|o| o.order.recipient_name == order.order.recipient_name))
                .map(|b| b.brand.to_string());
            assert_eq!(resplit.as_deref(), Some(order.brand.as_str()));
        }
    }

    #[test]
    fn test_merge_with_existing() {
        let existing = vec![
            vec!["헤더A".to_string(), "헤더B".to_string()],
            vec!["1".to_string(), "기존".to_string()],
        ];
        let individual_rows = vec![vec!["1".to_string(), "개별".to_string()]];
        let merged = merge_with_existing(&existing, &individual_rows);
        assert_eq!(merged.len(), 3);
        assert_eq!(merged[0][0], "헤더A");
        assert_eq!(merged[2][1], "개별");

        let merged = merge_with_existing(&[], &individual_rows);
        assert_eq!(merged[0][0], "No.");
        assert_eq!(merged.len(), 2);
    }
}
