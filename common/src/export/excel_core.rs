//! Excel 생성 (공통 라이브러리)
//!
//! layout.rs 정의를 사용하여 브랜드별 발주서・송장 입력 결과・개별주문 시트를
//! xlsx 버퍼로 만든다.

use crate::layout::{
    brand_sheet_col_width, BORDER_COLOR, BRAND_SHEET_HEADER, DUPLICATE_FILL, HEADER_FILL,
    HEADER_FONT, INVOICE_OK_FILL, ORDER_SHEET_NAME,
};
use crate::types::ClassifiedOrder;
use rust_xlsxwriter::*;
use std::collections::{HashMap, HashSet};

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::RGB(HEADER_FONT))
        .set_background_color(Color::RGB(HEADER_FILL))
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(BORDER_COLOR))
}

fn cell_format() -> Format {
    Format::new()
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(BORDER_COLOR))
}

/// 2번 이상 나오는 수취인명
fn duplicate_names(orders: &[ClassifiedOrder]) -> HashSet<&str> {
    let mut counts: HashMap<&str, usize> = HashMap::new();
    for order in orders {
        *counts.entry(order.order.recipient_name.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect()
}

/// 브랜드별 발주서를 버퍼에 생성
///
/// 행 = [순번, 원본 1~20열]. 헤더는 데이터 폭에 맞춰 자른다.
/// 같은 수취인이 여러 번 나오는 행은 노란색으로 표시.
pub fn generate_brand_order_buffer(orders: &[ClassifiedOrder]) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(ORDER_SHEET_NAME)
        .map_err(|e| format!("시트 이름 설정 오류: {}", e))?;

    let header_width = orders
        .first()
        .map(|o| o.order.raw_columns.len() + 1)
        .unwrap_or(BRAND_SHEET_HEADER.len())
        .min(BRAND_SHEET_HEADER.len());

    let header_format = header_format();
    for (col, label) in BRAND_SHEET_HEADER.iter().take(header_width).enumerate() {
        worksheet
            .write_string_with_format(0, col as u16, *label, &header_format)
            .map_err(|e| format!("헤더 쓰기 오류: {}", e))?;
    }

    let duplicates = duplicate_names(orders);
    let plain = cell_format();
    let highlighted = cell_format()
        .set_background_color(Color::RGB(DUPLICATE_FILL))
        .set_pattern(FormatPattern::Solid);

    for (i, order) in orders.iter().enumerate() {
        let row = (i + 1) as u32;
        let format = if duplicates.contains(order.order.recipient_name.as_str()) {
            &highlighted
        } else {
            &plain
        };

        worksheet
            .write_number_with_format(row, 0, (i + 1) as f64, format)
            .map_err(|e| format!("순번 쓰기 오류: {}", e))?;
        for (j, value) in order.order.raw_columns.iter().enumerate() {
            worksheet
                .write_string_with_format(row, (j + 1) as u16, value, format)
                .map_err(|e| format!("셀 쓰기 오류: {}", e))?;
        }
    }

    for col in 0..header_width {
        worksheet
            .set_column_width(col as u16, brand_sheet_col_width(col))
            .map_err(|e| format!("열 너비 설정 오류: {}", e))?;
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel 저장 오류: {}", e))
}

/// 송장 입력 결과를 버퍼에 생성
///
/// 첫 행은 헤더 스타일, 송장번호가 들어간 셀은 초록색.
pub fn generate_invoice_buffer(rows: &[Vec<String>], invoice_col: usize) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(ORDER_SHEET_NAME)
        .map_err(|e| format!("시트 이름 설정 오류: {}", e))?;

    let header_format = Format::new()
        .set_bold()
        .set_font_color(Color::RGB(HEADER_FONT))
        .set_background_color(Color::RGB(HEADER_FILL));
    let invoice_ok = Format::new()
        .set_background_color(Color::RGB(INVOICE_OK_FILL))
        .set_pattern(FormatPattern::Solid);

    for (i, values) in rows.iter().enumerate() {
        let row = i as u32;
        for (col, value) in values.iter().enumerate() {
            let result = if i == 0 {
                worksheet.write_string_with_format(row, col as u16, value, &header_format)
            } else if col == invoice_col && !crate::cell::clean(value).is_empty() {
                worksheet.write_string_with_format(row, col as u16, value, &invoice_ok)
            } else {
                worksheet.write_string(row, col as u16, value)
            };
            result.map_err(|e| format!("셀 쓰기 오류: {}", e))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel 저장 오류: {}", e))
}

/// 서식 없는 시트 (개별주문・합본)
pub fn generate_plain_buffer(rows: &[Vec<String>], sheet_name: &str) -> Result<Vec<u8>, String> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet
        .set_name(sheet_name)
        .map_err(|e| format!("시트 이름 설정 오류: {}", e))?;

    for (i, values) in rows.iter().enumerate() {
        for (col, value) in values.iter().enumerate() {
            worksheet
                .write_string(i as u32, col as u16, value)
                .map_err(|e| format!("셀 쓰기 오류: {}", e))?;
        }
    }

    workbook
        .save_to_buffer()
        .map_err(|e| format!("Excel 저장 오류: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::OrderRecord;

    fn order(name: &str) -> ClassifiedOrder {
        ClassifiedOrder {
            order: OrderRecord {
                recipient_name: name.to_string(),
                raw_columns: vec!["20260115".to_string(), "A-1".to_string(), name.to_string()],
                quantity: 1,
                ..Default::default()
            },
            brand: "우산브랜드".to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_duplicate_names() {
        let orders = vec![order("김철수"), order("이영희"), order("김철수")];
        let dup = duplicate_names(&orders);
        assert!(dup.contains("김철수"));
        assert!(!dup.contains("이영희"));
    }

    #[test]
    fn test_generate_brand_order_buffer() {
        let orders = vec![order("김철수"), order("김철수")];
        let buffer = generate_brand_order_buffer(&orders).unwrap();
        // xlsx는 zip 형식
        assert_eq!(&buffer[0..2], b"PK");
    }

    #[test]
    fn test_generate_brand_order_buffer_empty() {
        assert!(generate_brand_order_buffer(&[]).is_ok());
    }

    #[test]
    fn test_generate_invoice_buffer() {
        let rows = vec![
            vec!["주문번호".to_string(), "운송장".to_string()],
            vec!["A-1".to_string(), "123".to_string()],
            vec!["A-2".to_string(), "nan".to_string()],
        ];
        let buffer = generate_invoice_buffer(&rows, 1).unwrap();
        assert_eq!(&buffer[0..2], b"PK");
    }

    #[test]
    fn test_generate_plain_buffer() {
        let rows = vec![vec!["No.".to_string()], vec!["1".to_string()]];
        assert!(generate_plain_buffer(&rows, "개별주문").is_ok());
    }
}
