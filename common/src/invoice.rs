//! 송장번호 입력
//!
//! 택배사 회신 파일(브랜드별 발주서에 송장번호가 채워진 것)에서
//! 주문번호 → 송장번호를 모아 원본 발주서에 다시 써넣는다.

use crate::cell::clean_cell;
use crate::splitter::ColumnLayout;
use std::collections::HashMap;

/// 출력 파일명 접미사
pub const INVOICE_DONE_SUFFIX: &str = "송장입력완료";

/// 송장 반영 결과
#[derive(Debug, Clone, Default)]
pub struct InvoiceMerge {
    /// 송장이 반영된 전체 행 (헤더 포함)
    pub rows: Vec<Vec<String>>,
    /// 회신 파일에서 수집한 송장 수
    pub collected: usize,
    /// 실제로 송장이 써진 행 수
    pub updated: usize,
}

/// 회신 파일 행에서 주문번호 → 송장번호를 수집한다 (첫 행은 헤더)
///
/// 같은 주문번호가 여러 번 나오면 나중 값이 남는다.
pub fn collect_invoices(
    invoice_map: &mut HashMap<String, String>,
    rows: &[Vec<String>],
    layout: &ColumnLayout,
) {
    for row in rows.iter().skip(1) {
        let order_number = clean_cell(row, layout.order_number);
        let invoice = clean_cell(row, layout.invoice);
        if !order_number.is_empty() && !invoice.is_empty() {
            invoice_map.insert(order_number.to_string(), invoice.to_string());
        }
    }
}

/// 원본 발주서에 송장번호를 반영한다
pub fn apply_invoices(
    source: &[Vec<String>],
    invoice_map: &HashMap<String, String>,
    layout: &ColumnLayout,
) -> InvoiceMerge {
    let mut updated = 0;

    let rows = source
        .iter()
        .enumerate()
        .map(|(idx, row)| {
            let mut new_row = row.clone();
            if idx == 0 {
                return new_row;
            }

            let order_number = clean_cell(row, layout.order_number);
            if let Some(invoice) = invoice_map.get(order_number) {
                if new_row.len() <= layout.invoice {
                    new_row.resize(layout.invoice + 1, String::new());
                }
                new_row[layout.invoice] = invoice.clone();
                updated += 1;
            }
            new_row
        })
        .collect();

    tracing::info!(collected = invoice_map.len(), updated, "송장 반영");

    InvoiceMerge {
        rows,
        collected: invoice_map.len(),
        updated,
    }
}

/// 송장 입력 완료 파일명 (이미 접미사가 있으면 그대로)
pub fn invoice_output_stem(source_stem: &str) -> String {
    if source_stem.contains(INVOICE_DONE_SUFFIX) {
        source_stem.to_string()
    } else {
        format!("{}_{}", source_stem, INVOICE_DONE_SUFFIX)
    }
}

/// 송장 셀이 채워져 있는지 (하이라이트 판정용)
pub fn has_invoice(row: &[String], layout: &ColumnLayout) -> bool {
    !clean_cell(row, layout.invoice).is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(order_number: &str, invoice: &str) -> Vec<String> {
        let mut r = vec![String::new(); 21];
        r[0] = "1".to_string();
        r[2] = order_number.to_string();
        r[18] = invoice.to_string();
        r
    }

    #[test]
    fn test_collect_invoices_skips_blank_and_nan() {
        let layout = ColumnLayout::default();
        let mut map = HashMap::new();
        collect_invoices(
            &mut map,
            &[
                row("주문번호", "운송장"),
                row("A-1", "123456789"),
                row("A-2", "nan"),
                row("nan", "999"),
                row("", "888"),
                row(" A-3 ", " 555 "),
            ],
            &layout,
        );

        assert_eq!(map.len(), 2);
        assert_eq!(map["A-1"], "123456789");
        assert_eq!(map["A-3"], "555");
    }

    #[test]
    fn test_collect_invoices_later_file_overwrites() {
        let layout = ColumnLayout::default();
        let mut map = HashMap::new();
        collect_invoices(&mut map, &[row("h", "h"), row("A-1", "111")], &layout);
        collect_invoices(&mut map, &[row("h", "h"), row("A-1", "222")], &layout);
        assert_eq!(map["A-1"], "222");
    }

    #[test]
    fn test_apply_invoices() {
        let layout = ColumnLayout::default();
        let mut map = HashMap::new();
        map.insert("A-1".to_string(), "111".to_string());
        map.insert("Z-9".to_string(), "999".to_string());

        let short_row: Vec<String> = vec!["3".to_string(), String::new(), "A-1".to_string()];
        let source = vec![
            row("주문번호", "운송장"),
            row("A-1", ""),
            row("A-2", ""),
            short_row,
        ];

        let merged = apply_invoices(&source, &map, &layout);
        assert_eq!(merged.collected, 2);
        assert_eq!(merged.updated, 2);
        assert_eq!(merged.rows[0][18], "운송장");
        assert_eq!(merged.rows[1][18], "111");
        assert_eq!(merged.rows[2][18], "");
        assert_eq!(merged.rows[3].len(), 19);
        assert_eq!(merged.rows[3][18], "111");
        assert!(has_invoice(&merged.rows[1], &layout));
        assert!(!has_invoice(&merged.rows[2], &layout));
    }

    #[test]
    fn test_invoice_output_stem() {
        assert_eq!(invoice_output_stem("20260115_발주서"), "20260115_발주서_송장입력완료");
        assert_eq!(
            invoice_output_stem("20260115_발주서_송장입력완료"),
            "20260115_발주서_송장입력완료"
        );
    }
}
