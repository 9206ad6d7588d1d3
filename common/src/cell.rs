//! 스프레드시트 셀 텍스트 헬퍼

/// 행에서 셀 값을 가져온다 (범위 밖이면 빈 문자열, 앞뒤 공백 제거)
pub fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(|s| s.trim()).unwrap_or("")
}

/// 빈 숫자 셀이 "nan"으로 직렬화된 경우도 빈 값으로 취급
pub fn clean(value: &str) -> &str {
    let value = value.trim();
    if value == "nan" {
        ""
    } else {
        value
    }
}

/// `cell` + `clean`
pub fn clean_cell(row: &[String], index: usize) -> &str {
    clean(cell(row, index))
}

/// "₩3,000" 같은 금액 문자열을 정수로 (실패 시 0)
pub fn parse_amount(value: &str) -> i64 {
    let digits: String = value
        .chars()
        .filter(|c| !matches!(c, '₩' | ','))
        .collect();
    digits
        .trim()
        .parse::<f64>()
        .map(|v| v.round() as i64)
        .unwrap_or(0)
}

/// 선행 정수만 읽는다 ("2개" → 2, "2.0" → 2). 실패하면 None
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let value = value.trim();
    let mut end = 0;
    for (i, c) in value.char_indices() {
        if c.is_ascii_digit() || (i == 0 && (c == '-' || c == '+')) {
            end = i + c.len_utf8();
        } else {
            break;
        }
    }
    value[..end].parse::<i64>().ok()
}
