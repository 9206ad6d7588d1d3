//! 발주서 시트 레이아웃 정의
//!
//! 브랜드별 발주서・송장 입력 결과 파일의 헤더, 열 너비, 색상.

/// 브랜드별 발주서 헤더 (첫 열은 순번)
pub const BRAND_SHEET_HEADER: [&str; 21] = [
    "순번", "발주일", "주문번호", "주문번호(쇼핑)", "상품코드", "이름",
    "수취인전화번호1", "우편번호", "주소", "배송메세지", "상품명",
    "옵션1", "옵션2", "수량", "단가", "추가비용", "특이사항",
    "택배사", "운송장", "택배비", "보내는사람",
];

/// 시트 이름
pub const ORDER_SHEET_NAME: &str = "발주서";
pub const INDIVIDUAL_SHEET_NAME: &str = "개별주문";

/// 헤더 배경 (진한 남색)
pub const HEADER_FILL: u32 = 0x1E3C72;
/// 헤더 글자색
pub const HEADER_FONT: u32 = 0xFFFFFF;
/// 테두리색
pub const BORDER_COLOR: u32 = 0x000000;
/// 같은 수취인이 여러 번 나오는 행
pub const DUPLICATE_FILL: u32 = 0xFFEB9C;
/// 송장번호가 입력된 셀
pub const INVOICE_OK_FILL: u32 = 0xC6EFCE;

const ADDRESS_COL_WIDTH: f64 = 40.0;
const PRODUCT_COL_WIDTH: f64 = 25.0;
const DEFAULT_COL_WIDTH: f64 = 12.0;

/// 브랜드별 발주서의 열 너비
pub fn brand_sheet_col_width(col: usize) -> f64 {
    match col {
        8 => ADDRESS_COL_WIDTH,
        10..=12 => PRODUCT_COL_WIDTH,
        _ => DEFAULT_COL_WIDTH,
    }
}
