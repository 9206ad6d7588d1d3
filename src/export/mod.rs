//! 파일 출력
//!
//! 공통 라이브러리의 Excel 버퍼를 파일로 저장하고 출력 파일명을 정한다.

use crate::error::{PicoError, Result};
use pico_commerce_common::export::excel_core;
use pico_commerce_common::layout::{INDIVIDUAL_SHEET_NAME, ORDER_SHEET_NAME};
use pico_commerce_common::{ClassifiedOrder, SplitResult};
use regex::Regex;
use std::path::{Path, PathBuf};

/// 파일명의 첫 8자리 숫자 (YYYYMMDD), 없으면 오늘
pub fn order_date_from_filename(filename: &str, today: &str) -> String {
    lazy_static::lazy_static! {
        static ref DATE_RE: Regex = Regex::new(r"(\d{8})").unwrap();
    }
    DATE_RE
        .captures(filename)
        .and_then(|c| c.get(1))
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| today.to_string())
}

/// 파일명에 쓸 수 없는 문자를 치환
fn sanitize_file_component(name: &str) -> String {
    name.chars()
        .map(|c| match c {
            '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            other => other,
        })
        .collect()
}

/// `<date>_주문서확인처리_<brand>.xlsx`
pub fn brand_file_name(date: &str, brand: &str) -> String {
    format!("{}_주문서확인처리_{}.xlsx", date, sanitize_file_component(brand))
}

fn write_buffer(path: &Path, buffer: std::result::Result<Vec<u8>, String>) -> Result<()> {
    let buffer = buffer.map_err(PicoError::ExcelGeneration)?;
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, buffer)?;
    tracing::debug!("저장: {}", path.display());
    Ok(())
}

/// 브랜드별 발주서 파일을 모두 저장
///
/// # Arguments
/// * `split` - 분할 결과
/// * `output_dir` - 출력 폴더
/// * `date` - 파일명 날짜 (YYYYMMDD)
/// * `include_unclassified` - 미분류도 파일로 낼지
pub fn export_brand_files(
    split: &SplitResult,
    output_dir: &Path,
    date: &str,
    include_unclassified: bool,
) -> Result<Vec<PathBuf>> {
    let mut written = Vec::new();

    for bucket in split.sorted_buckets() {
        if !include_unclassified && bucket.orders.iter().all(ClassifiedOrder::is_unclassified) {
            continue;
        }
        let path = output_dir.join(brand_file_name(date, bucket.brand));
        write_buffer(&path, excel_core::generate_brand_order_buffer(bucket.orders))?;
        println!("✔ {} ({}건): {}", bucket.brand, bucket.order_count(), path.display());
        written.push(path);
    }

    Ok(written)
}

/// 송장이 반영된 발주서 저장
pub fn export_invoice_file(rows: &[Vec<String>], invoice_col: usize, path: &Path) -> Result<()> {
    write_buffer(path, excel_core::generate_invoice_buffer(rows, invoice_col))
}

/// 개별주문 / 합본 발주서 저장
pub fn export_order_sheet(rows: &[Vec<String>], path: &Path, merged: bool) -> Result<()> {
    let sheet_name = if merged { ORDER_SHEET_NAME } else { INDIVIDUAL_SHEET_NAME };
    write_buffer(path, excel_core::generate_plain_buffer(rows, sheet_name))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_date_from_filename() {
        assert_eq!(order_date_from_filename("20260115_일반발주서.xlsx", "20260201"), "20260115");
        assert_eq!(order_date_from_filename("발주서_20251231.csv", "20260201"), "20251231");
        assert_eq!(order_date_from_filename("발주서.xlsx", "20260201"), "20260201");
        assert_eq!(order_date_from_filename("2026_01.xlsx", "20260201"), "20260201");
    }

    #[test]
    fn test_brand_file_name() {
        assert_eq!(
            brand_file_name("20260115", "A/B상사"),
            "20260115_주문서확인처리_A_B상사.xlsx"
        );
    }
}
