//! 스프레드시트 파일 읽기
//!
//! `.xlsx` / `.xls` (첫 번째 시트)와 `.csv`를 문자열 행 목록으로 읽는다.
//! 헤더 행도 그대로 포함된다.

use crate::error::{PicoError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 셀 값을 문자열로 (소수부가 없는 숫자는 정수로)
fn data_to_string(cell: &Data) -> String {
    match cell {
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Empty => String::new(),
        other => other.to_string(),
    }
}

/// 파일 확장자에 따라 행 목록을 읽는다
pub fn read_table(path: &Path) -> Result<Vec<Vec<String>>> {
    if !path.exists() {
        return Err(PicoError::FileNotFound(path.display().to_string()));
    }

    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase();

    let rows = match ext.as_str() {
        "xlsx" | "xls" | "xlsm" => read_workbook(path)?,
        "csv" => {
            let content = std::fs::read_to_string(path)?;
            parse_csv_str(&content)?
        }
        _ => return Err(PicoError::UnsupportedFormat(ext)),
    };

    tracing::debug!("{}: {}행 읽음", path.display(), rows.len());
    Ok(rows)
}

fn read_workbook(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook =
        open_workbook_auto(path).map_err(|e| PicoError::SheetRead(e.to_string()))?;

    let sheet_name = workbook
        .sheet_names()
        .first()
        .cloned()
        .ok_or_else(|| PicoError::SheetRead("시트가 없습니다".to_string()))?;

    let range = workbook
        .worksheet_range(&sheet_name)
        .map_err(|e| PicoError::SheetRead(e.to_string()))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(data_to_string).collect())
        .collect())
}

/// CSV 문자열을 행 목록으로 (헤더 포함, 열 수가 달라도 허용)
pub fn parse_csv_str(content: &str) -> Result<Vec<Vec<String>>> {
    let content = content.trim_start_matches('\u{feff}');
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_bytes());

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| PicoError::SheetRead(e.to_string()))?;
        rows.push(record.iter().map(|s| s.to_string()).collect());
    }
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_csv_str_quoted() {
        let rows = parse_csv_str("No.,옵션,브랜드\n1,\"빨간 우산, 대\",우산브랜드\n2,짧은행\n").unwrap();
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[1][1], "빨간 우산, 대");
        assert_eq!(rows[2].len(), 2);
    }

    #[test]
    fn test_parse_csv_str_bom() {
        let rows = parse_csv_str("\u{feff}a,b\n").unwrap();
        assert_eq!(rows[0][0], "a");
    }

    #[test]
    fn test_data_to_string() {
        assert_eq!(data_to_string(&Data::Float(3.0)), "3");
        assert_eq!(data_to_string(&Data::Float(2.5)), "2.5");
        assert_eq!(data_to_string(&Data::Empty), "");
        assert_eq!(data_to_string(&Data::String("우산".to_string())), "우산");
    }

    #[test]
    fn test_read_table_csv_file() {
        let mut temp_file = NamedTempFile::with_suffix(".csv").unwrap();
        writeln!(temp_file, "No.,상품명").unwrap();
        writeln!(temp_file, "1,우산").unwrap();
        let rows = read_table(temp_file.path()).unwrap();
        assert_eq!(rows, vec![vec!["No.", "상품명"], vec!["1", "우산"]]);
    }

    #[test]
    fn test_read_table_unsupported() {
        let temp_file = NamedTempFile::with_suffix(".txt").unwrap();
        assert!(matches!(
            read_table(temp_file.path()),
            Err(PicoError::UnsupportedFormat(_))
        ));
    }

    #[test]
    fn test_read_table_missing() {
        assert!(matches!(
            read_table(Path::new("/nonexistent/orders.xlsx")),
            Err(PicoError::FileNotFound(_))
        ));
    }
}
