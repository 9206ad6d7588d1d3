//! Pico Commerce Common Library
//!
//! CLI에서 사용하는 발주 처리 코어: 메뉴판, 브랜드 판정, 브랜드별 분할,
//! 묶음배송 택배비, 송장 입력, 개별주문, KPI 집계.

pub mod types;
pub mod cell;
pub mod error;
pub mod menu;
pub mod classifier;
pub mod splitter;
pub mod shipping;
pub mod invoice;
pub mod individual;
pub mod kpi;
pub mod layout;
pub mod export;

pub use types::{BrandBucket, ClassifiedOrder, IndividualOrder, OrderRecord, SavedOrder, UNCLASSIFIED};
pub use error::{Error, Result};
pub use menu::{Menu, MenuEntry};
pub use classifier::{normalize_text, resolve_brand};
pub use splitter::{split_orders, ColumnLayout, SplitResult};
pub use shipping::{apply_grouped_shipping, grand_total, ShippingPolicy};
pub use invoice::{apply_invoices, collect_invoices, InvoiceMerge};
pub use individual::{classify_individual_orders, INDIVIDUAL_HEADER};
pub use kpi::{build_report, KpiFilter, KpiReport, KpiRow};
