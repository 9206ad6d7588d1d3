use anyhow::Context;
use clap::Parser;
use pico_commerce::{address, apps_script, cli, config, error, export, logging, sheets, table};
use pico_commerce_common::{
    apply_grouped_shipping, apply_invoices, build_report, collect_invoices, grand_total,
    individual, kpi, IndividualOrder, KpiFilter, KpiReport, Menu,
};
use cli::{Cli, Commands};
use config::Config;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

fn today_compact() -> String {
    chrono::Local::now().format("%Y%m%d").to_string()
}

fn today_iso() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}

/// 메뉴판: 파일이 주어지면 파일에서, 아니면 구글 시트에서
async fn load_menu(config: &Config, menu_file: Option<&Path>) -> anyhow::Result<Menu> {
    let menu = match menu_file {
        Some(path) => {
            let rows = table::read_table(path)
                .with_context(|| format!("메뉴판 파일 읽기 실패: {}", path.display()))?;
            let menu = Menu::from_rows(&rows);
            if menu.is_empty() {
                return Err(error::PicoError::EmptyMenu.into());
            }
            menu
        }
        None => {
            let spreadsheet_id = config.get_spreadsheet_id()?;
            sheets::SheetsClient::new()?
                .fetch_menu(&spreadsheet_id, &config.menu_sheet_gid)
                .await
                .context("메뉴판 불러오기 실패")?
        }
    };
    Ok(menu)
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default()
}

fn print_report(report: &KpiReport) {
    println!("기간 합계: {}건 / {}개", report.period.order_count, report.period.sales_count);
    if let Some(today) = report.today {
        println!("오늘: {}건 / {}개", today.order_count, today.sales_count);
    }
    if let Some(month) = report.this_month {
        println!("이번 달: {}건 / {}개", month.order_count, month.sales_count);
    }

    println!("\n[일별 (최근 {}일)]", kpi::DAILY_WINDOW);
    for (date, stats) in &report.daily {
        println!("  {}  {:>5}건 {:>6}개", date, stats.order_count, stats.sales_count);
    }
    println!("\n[월별]");
    for (month, stats) in &report.monthly {
        println!("  {}  {:>5}건 {:>6}개", month, stats.order_count, stats.sales_count);
    }
    println!("\n[판매몰별]");
    for (mall, stats) in &report.malls {
        println!("  {}  {}건 {}개", mall, stats.order_count, stats.sales_count);
    }
    println!("\n[브랜드별]");
    for (brand, stats) in &report.brands {
        println!("  {}  {}건 {}개", brand, stats.order_count, stats.sales_count);
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);
    let config = Config::load()?;
    let menu_file = cli.menu_file.as_deref();

    match cli.command {
        Commands::Menu { brands, product } => {
            let menu = load_menu(&config, menu_file).await?;
            println!("📋 메뉴판: {}개 옵션\n", menu.len());

            if brands {
                for (brand, count) in menu.brand_counts() {
                    println!("  {} ({}개)", brand, count);
                }
            } else if let Some(product) = product {
                for entry in menu.options_for(&product) {
                    println!(
                        "  {} → {} (공급가 {}, 택배비 {})",
                        entry.option, entry.brand, entry.supply_price, entry.shipping_fee
                    );
                }
            } else {
                for entry in menu.entries() {
                    println!("  {:>4}  {}  →  {}", entry.no, entry.option, entry.brand);
                }
            }
        }

        Commands::Split { input, output, date, include_unclassified, dry_run, policy } => {
            println!("📦 pico - 발주서 분리\n");

            println!("[1/3] 메뉴판 불러오는 중...");
            let menu = load_menu(&config, menu_file).await?;
            println!("✔ {}개 옵션\n", menu.len());

            println!("[2/3] 주문 파일 읽는 중...");
            let rows = table::read_table(&input)
                .with_context(|| format!("주문 파일 읽기 실패: {}", input.display()))?;
            let split = pico_commerce_common::split_orders(&rows, &menu, &config.layout);
            println!(
                "✔ {}건 / {}개 → {}개 브랜드\n",
                split.total_orders(),
                split.total_quantity(),
                split.brand_count()
            );

            let policy = policy.unwrap_or(config.shipping_policy);
            for bucket in split.sorted_buckets() {
                let grouped = apply_grouped_shipping(bucket.orders, policy);
                println!(
                    "  {:<20} {:>4}건 {:>5}개  합계 {}원",
                    bucket.brand,
                    bucket.order_count(),
                    bucket.total_quantity(),
                    grand_total(&grouped)
                );
            }
            if !split.unclassified().is_empty() {
                println!("\n⚠ 미분류 {}건:", split.unclassified().len());
                for order in split.unclassified() {
                    println!("  {} / {}", order.order.order_number, order.display_option);
                }
            }

            if dry_run {
                return Ok(());
            }

            println!("\n[3/3] 발주서 저장 중...");
            let date = date.unwrap_or_else(|| export::order_date_from_filename(&file_name(&input), &today_compact()));
            let written = export::export_brand_files(&split, &output, &date, include_unclassified)?;
            println!("\n✅ {}개 파일 저장 완료", written.len());
        }

        Commands::Invoice { source, replies, output } => {
            println!("🚚 pico - 송장번호 입력\n");

            let mut invoice_map: HashMap<String, String> = HashMap::new();
            for reply in &replies {
                let rows = table::read_table(reply)
                    .with_context(|| format!("회신 파일 읽기 실패: {}", reply.display()))?;
                collect_invoices(&mut invoice_map, &rows, &config.layout);
                println!("- {}: 누적 {}건", file_name(reply), invoice_map.len());
            }

            let source_rows = table::read_table(&source)
                .with_context(|| format!("원본 발주서 읽기 실패: {}", source.display()))?;
            let merged = apply_invoices(&source_rows, &invoice_map, &config.layout);
            println!("✔ 송장 {}건 수집, {}행 입력\n", merged.collected, merged.updated);

            let stem = source
                .file_stem()
                .map(|s| s.to_string_lossy().to_string())
                .unwrap_or_default();
            let output_dir = output
                .or_else(|| source.parent().map(Path::to_path_buf))
                .unwrap_or_else(|| PathBuf::from("."));
            let path = output_dir.join(format!(
                "{}.xlsx",
                pico_commerce_common::invoice::invoice_output_stem(&stem)
            ));
            export::export_invoice_file(&merged.rows, config.layout.invoice, &path)?;
            println!("✅ 저장: {}", path.display());
        }

        Commands::Individual {
            input, name, phone, address, product, option, quantity,
            merge_with, output, date, policy, save,
        } => {
            println!("📝 pico - 개별주문\n");

            let orders: Vec<IndividualOrder> = match input {
                Some(path) => {
                    let content = std::fs::read_to_string(&path)
                        .with_context(|| format!("개별주문 파일 읽기 실패: {}", path.display()))?;
                    serde_json::from_str(&content).context("개별주문 JSON 형식 오류")?
                }
                None => vec![IndividualOrder {
                    recipient_name: name.unwrap_or_default(),
                    recipient_phone: phone.unwrap_or_default(),
                    address: address.unwrap_or_default(),
                    product_name: product,
                    option,
                    quantity,
                    ..Default::default()
                }],
            };

            let menu = load_menu(&config, menu_file).await?;
            let policy = policy.unwrap_or(config.shipping_policy);
            let classified = individual::classify_individual_orders(&orders, &menu, policy)?;

            for order in &classified {
                println!(
                    "  {} / {} / {} x{} → {} (택배비 {}, 합계 {}원)",
                    order.order.recipient_name,
                    order.order.product_name,
                    order.display_option,
                    order.order.quantity,
                    order.brand,
                    order.shipping_fee_applied,
                    order.total_amount()
                );
            }
            println!("✔ {}건, 총 {}원\n", classified.len(), grand_total(&classified));

            let date = date.unwrap_or_else(today_compact);
            let (rows, path, merged) = match merge_with {
                Some(existing_path) => {
                    let existing = table::read_table(&existing_path)
                        .with_context(|| format!("기존 발주서 읽기 실패: {}", existing_path.display()))?;
                    let rows = individual::merge_with_existing(
                        &existing,
                        &individual::build_order_sheet(&classified, &date),
                    );
                    (rows, output.join(format!("{}_일반발주서123_합본.xlsx", date)), true)
                }
                None => (
                    individual::order_sheet_with_header(&classified, &date),
                    output.join(format!("{}_개별주문.xlsx", date)),
                    false,
                ),
            };
            export::export_order_sheet(&rows, &path, merged)?;
            println!("✅ 저장: {}", path.display());

            if save {
                let url = config.get_apps_script_url()?;
                let client = apps_script::AppsScriptClient::new(&url)?;
                let count = client
                    .save_orders(&orders, &config.individual_order_gid)
                    .await
                    .context("개별주문 저장 실패")?;
                println!("✔ {}건 시트에 저장", count);
            }
        }

        Commands::Saved { name, phone } => {
            let url = config.get_apps_script_url()?;
            let client = apps_script::AppsScriptClient::new(&url)?;
            let saved = client
                .fetch_saved_orders(name.as_deref(), phone.as_deref())
                .await
                .context("개별주문 불러오기 실패")?;

            let label = if saved.search_mode { "검색 결과" } else { "저장된 개별주문" };
            println!("{}: {}건\n", label, saved.count.unwrap_or(saved.orders.len()));
            for order in &saved.orders {
                println!(
                    "  [{}] {} {} | {} | {} {} x{} | {}원",
                    order.saved_time,
                    order.recipient_name,
                    order.recipient_phone,
                    order.address,
                    order.product_name,
                    order.option,
                    order.quantity,
                    order.total
                );
            }
        }

        Commands::Address { query } => {
            let key = config.get_kakao_api_key()?;
            let results = address::KakaoClient::new(&key)?.search(&query).await?;
            if results.is_empty() {
                println!("검색 결과가 없습니다");
            }
            for (i, addr) in results.iter().enumerate() {
                println!("{:>2}. {}", i + 1, addr);
            }
        }

        Commands::Kpi { file, year, from, to, month, json } => {
            let rows = match file {
                Some(path) => kpi::rows_from_table(&table::read_table(&path)?),
                None => {
                    let spreadsheet_id = config.get_spreadsheet_id()?;
                    sheets::SheetsClient::new()?
                        .fetch_order_history(&spreadsheet_id, &config.order_history_gid)
                        .await
                        .context("주문 이력 불러오기 실패")?
                }
            };

            let filter = KpiFilter {
                year,
                date_range: from.zip(to),
                month,
            };
            let report = build_report(&rows, &filter, &today_iso());

            if json {
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                println!("📊 주문 KPI (연도: {:?})\n", kpi::available_years(&rows));
                print_report(&report);
            }
        }

        Commands::Config { set_spreadsheet_id, set_apps_script_url, set_kakao_api_key, set_policy, show } => {
            let mut config = config;
            let changed = set_spreadsheet_id.is_some()
                || set_apps_script_url.is_some()
                || set_kakao_api_key.is_some()
                || set_policy.is_some();

            if let Some(id) = set_spreadsheet_id {
                config.spreadsheet_id = Some(id);
            }
            if let Some(url) = set_apps_script_url {
                config.apps_script_url = Some(url);
            }
            if let Some(key) = set_kakao_api_key {
                config.kakao_api_key = Some(key);
            }
            if let Some(policy) = set_policy {
                config.shipping_policy = policy;
            }
            if changed {
                config.save()?;
                println!("✔ 설정을 저장했습니다");
            }

            if show || !changed {
                let set = |v: &Option<String>| if v.is_some() { "설정됨" } else { "미설정" };
                println!("설정 ({}):", Config::config_path()?.display());
                println!("  스프레드시트 ID: {}", config.spreadsheet_id.as_deref().unwrap_or("미설정"));
                println!("  메뉴판 gid: {}", config.menu_sheet_gid);
                println!("  주문 이력 gid: {}", config.order_history_gid);
                println!("  개별주문 gid: {}", config.individual_order_gid);
                println!("  Apps Script URL: {}", set(&config.apps_script_url));
                println!("  카카오 API 키: {}", set(&config.kakao_api_key));
                println!("  묶음배송 방식: {}", config.shipping_policy);
            }
        }
    }

    Ok(())
}
