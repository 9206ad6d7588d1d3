use clap::{Parser, Subcommand};
use pico_commerce_common::ShippingPolicy;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pico")]
#[command(about = "피코 커머스 발주서 분리・송장 입력・개별주문 도구", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 상세 로그 출력
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 메뉴판 파일 (xlsx/csv, 생략 시 구글 시트)
    #[arg(long, global = true)]
    pub menu_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 메뉴판(옵션 → 브랜드) 표시
    Menu {
        /// 브랜드별 옵션 수만 표시
        #[arg(long)]
        brands: bool,

        /// 상품명으로 옵션 조회
        #[arg(short, long)]
        product: Option<String>,
    },

    /// 주문 파일을 브랜드별 발주서로 분리
    Split {
        /// 주문 파일 (xlsx/xls/csv)
        #[arg(required = true)]
        input: PathBuf,

        /// 출력 폴더
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// 파일명 날짜 (YYYYMMDD, 생략 시 입력 파일명 또는 오늘)
        #[arg(short, long)]
        date: Option<String>,

        /// 미분류 주문도 파일로 출력
        #[arg(long)]
        include_unclassified: bool,

        /// 파일을 쓰지 않고 요약만 표시
        #[arg(long)]
        dry_run: bool,

        /// 묶음배송 택배비 방식 (first/max)
        #[arg(long)]
        policy: Option<ShippingPolicy>,
    },

    /// 택배사 회신 파일의 송장번호를 원본 발주서에 입력
    Invoice {
        /// 원본 발주서
        #[arg(required = true)]
        source: PathBuf,

        /// 송장번호가 입력된 회신 파일 (여러 개 가능)
        #[arg(required = true)]
        replies: Vec<PathBuf>,

        /// 출력 폴더 (생략 시 원본과 같은 폴더)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// 개별주문 발주서 생성
    Individual {
        /// 개별주문 JSON 파일 (배열)
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// 수취인명 (한 건만 입력할 때)
        #[arg(long)]
        name: Option<String>,

        /// 전화번호
        #[arg(long)]
        phone: Option<String>,

        /// 주소
        #[arg(long)]
        address: Option<String>,

        /// 상품명
        #[arg(long, default_value = "")]
        product: String,

        /// 옵션
        #[arg(long, default_value = "")]
        option: String,

        /// 수량
        #[arg(long, default_value = "1")]
        quantity: u32,

        /// 기존 발주서와 합본
        #[arg(short, long)]
        merge_with: Option<PathBuf>,

        /// 출력 폴더
        #[arg(short, long, default_value = ".")]
        output: PathBuf,

        /// 수집일자 (YYYYMMDD, 생략 시 오늘)
        #[arg(short, long)]
        date: Option<String>,

        /// 묶음배송 택배비 방식 (first/max)
        #[arg(long)]
        policy: Option<ShippingPolicy>,

        /// Apps Script로 저장
        #[arg(long)]
        save: bool,
    },

    /// 저장된 개별주문 조회
    Saved {
        /// 수취인명 검색
        #[arg(long)]
        name: Option<String>,

        /// 전화번호 검색
        #[arg(long)]
        phone: Option<String>,
    },

    /// 카카오 주소 검색
    Address {
        /// 검색어 (도로명, 지번, 건물명)
        #[arg(required = true)]
        query: String,
    },

    /// 주문 KPI 통계
    Kpi {
        /// 주문 이력 파일 (생략 시 구글 시트)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// 연도
        #[arg(short, long)]
        year: Option<i32>,

        /// 시작일 (YYYY-MM-DD)
        #[arg(long, requires = "to")]
        from: Option<String>,

        /// 종료일 (YYYY-MM-DD)
        #[arg(long, requires = "from")]
        to: Option<String>,

        /// 월 (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,

        /// JSON으로 출력
        #[arg(long)]
        json: bool,
    },

    /// 설정 표시/편집
    Config {
        /// 스프레드시트 ID 설정
        #[arg(long)]
        set_spreadsheet_id: Option<String>,

        /// Apps Script URL 설정
        #[arg(long)]
        set_apps_script_url: Option<String>,

        /// 카카오 REST API 키 설정
        #[arg(long)]
        set_kakao_api_key: Option<String>,

        /// 기본 묶음배송 택배비 방식 설정 (first/max)
        #[arg(long)]
        set_policy: Option<ShippingPolicy>,

        /// 설정 표시
        #[arg(long)]
        show: bool,
    },
}
