//! 브랜드 판정
//!
//! 주문 옵션 문자열을 메뉴판과 대조하여 브랜드를 결정한다.
//!
//! ## 판정 순서
//! 1. 옵션2(확정) 완전일치
//! 2. 옵션1(수집) 완전일치
//! 3. 정규화 후 완전일치 (선두 `[...]` 태그 제거, 공백 정리)
//! 4. 키가 5자를 넘으면 양방향 부분일치 (메뉴판 순서상 첫 일치)
//! 5. 그 외는 미분류

use crate::menu::{Menu, MenuEntry};
use crate::types::UNCLASSIFIED;
use regex::Regex;

/// 부분일치를 허용하는 최소 키 길이 (이 값 이하는 부분일치 제외)
pub const SUBSTRING_MIN_KEY_LEN: usize = 5;

/// 옵션 문자열 정규화
///
/// 앞뒤 공백 제거 → 선두 `[...]` 태그 1개 제거 → 연속 공백을 1칸으로
pub fn normalize_text(text: &str) -> String {
    lazy_static::lazy_static! {
        // 선두 대괄호 태그 (최단 일치, 뒤따르는 공백 포함)
        static ref LEADING_TAG_RE: Regex = Regex::new(r"^\[.*?\]\s*").unwrap();
        static ref WHITESPACE_RE: Regex = Regex::new(r"\s+").unwrap();
    }

    let trimmed = text.trim();
    let stripped = LEADING_TAG_RE.replace(trimmed, "");
    WHITESPACE_RE.replace_all(&stripped, " ").trim().to_string()
}

/// 옵션과 일치하는 메뉴판 항목을 찾는다
pub fn resolve<'m>(
    option_primary: &str,
    option_secondary: &str,
    menu: &'m Menu,
) -> Option<&'m MenuEntry> {
    if let Some(entry) = menu.get(option_secondary) {
        return Some(entry);
    }
    if let Some(entry) = menu.get(option_primary) {
        return Some(entry);
    }

    let n1 = normalize_text(option_primary);
    let n2 = normalize_text(option_secondary);

    for entry in menu.entries() {
        let nk = normalize_text(&entry.option);
        if nk.is_empty() {
            continue;
        }

        if n1 == nk || n2 == nk {
            return Some(entry);
        }

        if nk.chars().count() > SUBSTRING_MIN_KEY_LEN
            && (contains_either_way(&nk, &n1) || contains_either_way(&nk, &n2))
        {
            tracing::debug!(key = %entry.option, brand = %entry.brand, "부분일치");
            return Some(entry);
        }
    }

    None
}

/// 양방향 부분일치. 빈 옵션은 모든 키에 포함되는 것으로 보지 않고 일부러 제외한다
fn contains_either_way(key: &str, option: &str) -> bool {
    !option.is_empty() && (key.contains(option) || option.contains(key))
}

/// 브랜드 이름을 돌려준다. 일치하는 항목이 없으면 "미분류"
pub fn resolve_brand(option_primary: &str, option_secondary: &str, menu: &Menu) -> String {
    resolve(option_primary, option_secondary, menu)
        .map(|entry| entry.brand.clone())
        .unwrap_or_else(|| UNCLASSIFIED.to_string())
}
