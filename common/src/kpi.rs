//! 주문 KPI 집계
//!
//! 주문 이력 시트(헤더가 있는 행 목록)에서 일별・월별・판매몰별・브랜드별
//! 주문 건수와 판매 수량을 집계한다.

use crate::cell::{cell, parse_leading_int};
use regex::Regex;
use serde::Serialize;
use std::collections::HashMap;

/// 판매몰이 비어 있을 때의 이름
pub const UNKNOWN_MALL: &str = "미분류";

/// 일별 통계에 보여줄 최근 일수
pub const DAILY_WINDOW: usize = 30;

const DATE_HEADERS: &[&str] = &["발주일", "주문일", "수집일자(YYYYMMDD)", "날짜"];
const QTY_HEADERS: &[&str] = &["수량", "판매수량"];
const MALL_HEADERS: &[&str] = &["판매몰", "쇼핑몰명(1)", "쇼핑몰"];
const BRAND_HEADERS: &[&str] = &["브랜드"];

/// 주문 이력 한 행
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct KpiRow {
    pub order_date: String,
    pub sales_count: u64,
    pub sales_mall: String,
    pub brand: String,
}

/// 건수 + 수량
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PeriodStats {
    pub order_count: usize,
    pub sales_count: u64,
}

impl PeriodStats {
    fn add(&mut self, row: &KpiRow) {
        self.order_count += 1;
        self.sales_count += row.sales_count;
    }

    fn of<'a>(rows: impl Iterator<Item = &'a KpiRow>) -> Self {
        let mut stats = Self::default();
        for row in rows {
            stats.add(row);
        }
        stats
    }
}

/// 조회 필터
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KpiFilter {
    pub year: Option<i32>,
    /// (시작일, 종료일) YYYY-MM-DD, 양끝 포함
    pub date_range: Option<(String, String)>,
    /// YYYY-MM
    pub month: Option<String>,
}

impl KpiFilter {
    fn has_period(&self) -> bool {
        self.date_range.is_some() || self.month.is_some()
    }
}

/// 집계 결과
#[derive(Debug, Clone, Default, Serialize)]
pub struct KpiReport {
    pub period: PeriodStats,
    /// 기간 필터가 없을 때만 계산
    pub today: Option<PeriodStats>,
    pub this_month: Option<PeriodStats>,
    /// 최근 30일 (오래된 날짜부터)
    pub daily: Vec<(String, PeriodStats)>,
    pub monthly: Vec<(String, PeriodStats)>,
    /// 판매 수량 많은 순
    pub malls: Vec<(String, PeriodStats)>,
    /// 주문 건수 많은 순
    pub brands: Vec<(String, PeriodStats)>,
}

/// 날짜 문자열을 YYYY-MM-DD로 정규화 (알 수 없는 형식은 빈 문자열)
///
/// 지원: `20260115`, `2026-01-15`, `2026.1.5`, `2026/01/15 13:20`
pub fn normalize_date_string(value: &str) -> String {
    lazy_static::lazy_static! {
        static ref COMPACT_RE: Regex = Regex::new(r"^(\d{4})(\d{2})(\d{2})$").unwrap();
        static ref SEPARATED_RE: Regex = Regex::new(r"^(\d{4})\s*[-./]\s*(\d{1,2})\s*[-./]\s*(\d{1,2})\.?(?:\s.*)?$").unwrap();
    }

    let value = value.trim();
    let caps = COMPACT_RE
        .captures(value)
        .or_else(|| SEPARATED_RE.captures(value));

    match caps {
        Some(c) => {
            let month: u32 = c[2].parse().unwrap_or(0);
            let day: u32 = c[3].parse().unwrap_or(0);
            if (1..=12).contains(&month) && (1..=31).contains(&day) {
                format!("{}-{:02}-{:02}", &c[1], month, day)
            } else {
                String::new()
            }
        }
        None => String::new(),
    }
}

fn find_column(headers: &[String], candidates: &[&str]) -> Option<usize> {
    candidates
        .iter()
        .find_map(|name| headers.iter().position(|h| h.trim() == *name))
}

/// 헤더 이름으로 주문 이력 행을 읽는다 (첫 행은 헤더)
pub fn rows_from_table(rows: &[Vec<String>]) -> Vec<KpiRow> {
    let Some((headers, data)) = rows.split_first() else {
        return Vec::new();
    };

    let date_col = find_column(headers, DATE_HEADERS);
    let qty_col = find_column(headers, QTY_HEADERS);
    let mall_col = find_column(headers, MALL_HEADERS);
    let brand_col = find_column(headers, BRAND_HEADERS);

    let text = |row: &[String], col: Option<usize>| -> String {
        col.map(|c| cell(row, c).to_string()).unwrap_or_default()
    };

    data.iter()
        .filter(|row| row.iter().any(|v| !v.trim().is_empty()))
        .map(|row| KpiRow {
            order_date: text(row, date_col),
            sales_count: qty_col
                .and_then(|c| parse_leading_int(cell(row, c)))
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or(0),
            sales_mall: text(row, mall_col),
            brand: text(row, brand_col),
        })
        .collect()
}

/// 주문 이력에 나타난 연도 (최근 연도부터)
pub fn available_years(rows: &[KpiRow]) -> Vec<i32> {
    let mut years: Vec<i32> = rows
        .iter()
        .filter_map(|r| normalize_date_string(&r.order_date).get(0..4)?.parse().ok())
        .collect();
    years.sort_unstable_by(|a, b| b.cmp(a));
    years.dedup();
    years
}

/// 필터 적용
pub fn filter_rows<'a>(rows: &'a [KpiRow], filter: &KpiFilter) -> Vec<&'a KpiRow> {
    rows.iter()
        .filter(|row| {
            let date = normalize_date_string(&row.order_date);
            if let Some(year) = filter.year {
                if !date.starts_with(&year.to_string()) {
                    return false;
                }
            }
            if let Some((start, end)) = &filter.date_range {
                if date.is_empty() || date.as_str() < start.as_str() || date.as_str() > end.as_str() {
                    return false;
                }
            }
            if let Some(month) = &filter.month {
                if !date.starts_with(month.as_str()) {
                    return false;
                }
            }
            true
        })
        .collect()
}

fn group_by<F>(rows: &[&KpiRow], key: F) -> HashMap<String, PeriodStats>
where
    F: Fn(&KpiRow) -> Option<String>,
{
    let mut map: HashMap<String, PeriodStats> = HashMap::new();
    for row in rows {
        if let Some(k) = key(row) {
            map.entry(k).or_default().add(row);
        }
    }
    map
}

/// KPI 집계
///
/// # Arguments
/// * `rows` - 주문 이력
/// * `filter` - 연도・기간・월 필터
/// * `today` - 기준일 (YYYY-MM-DD)
pub fn build_report(rows: &[KpiRow], filter: &KpiFilter, today: &str) -> KpiReport {
    let filtered = filter_rows(rows, filter);

    let (today_stats, month_stats) = if filter.has_period() {
        (None, None)
    } else {
        let current_month = today.get(0..7).unwrap_or(today);
        let today_stats = PeriodStats::of(
            filtered
                .iter()
                .copied()
                .filter(|r| normalize_date_string(&r.order_date) == today),
        );
        let month_stats = PeriodStats::of(
            filtered
                .iter()
                .copied()
                .filter(|r| normalize_date_string(&r.order_date).starts_with(current_month)),
        );
        (Some(today_stats), Some(month_stats))
    };

    let by_date = |r: &KpiRow| Some(normalize_date_string(&r.order_date)).filter(|d| !d.is_empty());

    let mut daily: Vec<(String, PeriodStats)> = group_by(&filtered, by_date).into_iter().collect();
    daily.sort_by(|a, b| b.0.cmp(&a.0));
    daily.truncate(DAILY_WINDOW);
    daily.reverse();

    let mut monthly: Vec<(String, PeriodStats)> = group_by(&filtered, |r| {
        by_date(r).map(|d| d[0..7].to_string())
    })
    .into_iter()
    .collect();
    monthly.sort_by(|a, b| a.0.cmp(&b.0));

    let mut malls: Vec<(String, PeriodStats)> = group_by(&filtered, |r| {
        Some(if r.sales_mall.is_empty() {
            UNKNOWN_MALL.to_string()
        } else {
            r.sales_mall.clone()
        })
    })
    .into_iter()
    .collect();
    malls.sort_by(|a, b| b.1.sales_count.cmp(&a.1.sales_count).then_with(|| a.0.cmp(&b.0)));

    let mut brands: Vec<(String, PeriodStats)> = group_by(&filtered, |r| {
        Some(r.brand.clone()).filter(|b| !b.is_empty())
    })
    .into_iter()
    .collect();
    brands.sort_by(|a, b| b.1.order_count.cmp(&a.1.order_count).then_with(|| a.0.cmp(&b.0)));

    KpiReport {
        period: PeriodStats::of(filtered.iter().copied()),
        today: today_stats,
        this_month: month_stats,
        daily,
        monthly,
        malls,
        brands,
    }
}
