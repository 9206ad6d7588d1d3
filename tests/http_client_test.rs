//! 외부 서비스 클라이언트 테스트 (wiremock)

use pico_commerce::address::KakaoClient;
use pico_commerce::apps_script::AppsScriptClient;
use pico_commerce::error::PicoError;
use pico_commerce::sheets::SheetsClient;
use pico_commerce_common::IndividualOrder;
use wiremock::matchers::{body_partial_json, header, method, path, query_param, query_param_is_missing};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MENU_CSV: &str = "No.,상품명,옵션,브랜드,공급가,택배비\n\
1,우산,빨간우산,우산브랜드,\"₩1,000\",500\n\
2,장화,파란 장화 세트,장화상사,20000,3000\n\
3,빈행,,,,\n";

fn order(name: &str) -> IndividualOrder {
    IndividualOrder {
        recipient_name: name.to_string(),
        recipient_phone: "010-1234-5678".to_string(),
        address: "서울시 A".to_string(),
        product_name: "우산".to_string(),
        option: "빨간우산".to_string(),
        quantity: 1,
        supply_price: 1000,
        shipping_fee: 500,
    }
}

#[tokio::test]
async fn sheets_fetch_menu_parses_csv() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/spreadsheets/d/SHEET/export"))
        .and(query_param("format", "csv"))
        .and(query_param("gid", "202191104"))
        .respond_with(ResponseTemplate::new(200).set_body_string(MENU_CSV))
        .mount(&server)
        .await;

    let client = SheetsClient::with_base_url(&server.uri()).unwrap();
    let menu = client.fetch_menu("SHEET", "202191104").await.expect("menu");

    assert_eq!(menu.len(), 2);
    let entry = menu.get("빨간우산").expect("entry");
    assert_eq!(entry.brand, "우산브랜드");
    assert_eq!(entry.supply_price, 1000);
    assert_eq!(entry.shipping_fee, 500);
}

#[tokio::test]
async fn sheets_empty_menu_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("No.,상품명,옵션,브랜드\n"))
        .mount(&server)
        .await;

    let client = SheetsClient::with_base_url(&server.uri()).unwrap();
    let result = client.fetch_menu("SHEET", "1").await;
    assert!(matches!(result, Err(PicoError::EmptyMenu)));
}

#[tokio::test]
async fn sheets_http_error_is_fetch_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let client = SheetsClient::with_base_url(&server.uri()).unwrap();
    let result = client.fetch_rows("SHEET", "1").await;
    assert!(matches!(result, Err(PicoError::Fetch(_))));
}

#[tokio::test]
async fn sheets_fetch_order_history() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("gid", "1771639339"))
        .respond_with(ResponseTemplate::new(200).set_body_string(
            "발주일,판매몰,브랜드,수량\n20260115,스마트스토어,우산브랜드,2\n2026-01-16,,장화상사,1\n",
        ))
        .mount(&server)
        .await;

    let client = SheetsClient::with_base_url(&server.uri()).unwrap();
    let rows = client.fetch_order_history("SHEET", "1771639339").await.unwrap();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].sales_count, 2);
    assert_eq!(rows[1].brand, "장화상사");
}

#[tokio::test]
async fn apps_script_save_posts_orders_and_gid() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/exec"))
        .and(body_partial_json(serde_json::json!({
            "sheet_gid": "987",
            "orders": [{"recipient_name": "김철수", "option": "빨간우산", "quantity": 1}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "count": 1
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = AppsScriptClient::new(&format!("{}/exec", server.uri())).unwrap();
    let count = client.save_orders(&[order("김철수")], "987").await.unwrap();
    assert_eq!(count, 1);
}

#[tokio::test]
async fn apps_script_save_non_json_response_counts_request() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>ok</html>"))
        .mount(&server)
        .await;

    let client = AppsScriptClient::new(&server.uri()).unwrap();
    let count = client
        .save_orders(&[order("김철수"), order("이영희")], "987")
        .await
        .unwrap();
    assert_eq!(count, 2);
}

#[tokio::test]
async fn apps_script_save_failure_is_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": false, "error": "시트 없음"
        })))
        .mount(&server)
        .await;

    let client = AppsScriptClient::new(&server.uri()).unwrap();
    let result = client.save_orders(&[order("김철수")], "987").await;
    assert!(matches!(result, Err(PicoError::ApiCall(msg)) if msg == "시트 없음"));
}

#[tokio::test]
async fn apps_script_fetch_all_saved_orders() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param_is_missing("name"))
        .and(query_param_is_missing("phone"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true,
            "count": 1,
            "searchMode": false,
            "orders": [{
                "saved_time": "2026-01-15 10:00",
                "recipient_name": "김철수",
                "recipient_phone": "010-1234-5678",
                "address": "서울시 A",
                "product_name": "우산",
                "option": "빨간우산",
                "quantity": 2,
                "supply_price": 1000,
                "shipping_fee": 500,
                "total": 2500
            }]
        })))
        .mount(&server)
        .await;

    let client = AppsScriptClient::new(&server.uri()).unwrap();
    let saved = client.fetch_saved_orders(None, None).await.unwrap();
    assert!(!saved.search_mode);
    assert_eq!(saved.orders.len(), 1);
    assert_eq!(saved.orders[0].total, 2500);
    assert_eq!(saved.orders[0].quantity, 2);
}

#[tokio::test]
async fn apps_script_search_by_name_and_phone() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(query_param("name", "김철수"))
        .and(query_param("phone", "5678"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "success": true, "count": 0, "searchMode": true, "orders": []
        })))
        .mount(&server)
        .await;

    let client = AppsScriptClient::new(&server.uri()).unwrap();
    let saved = client
        .fetch_saved_orders(Some("김철수"), Some("5678"))
        .await
        .unwrap();
    assert!(saved.search_mode);
    assert!(saved.orders.is_empty());
}

#[tokio::test]
async fn apps_script_fetch_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let client = AppsScriptClient::new(&server.uri()).unwrap();
    let result = client.fetch_saved_orders(None, None).await;
    assert!(matches!(result, Err(PicoError::ApiCall(_))));
}

#[tokio::test]
async fn kakao_search_merges_address_and_keyword_results() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/address.json"))
        .and(header("Authorization", "KakaoAK test-key"))
        .and(query_param("query", "판교역로 166"))
        .and(query_param("size", "5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documents": [{
                "address_name": "경기 성남시 분당구 백현동 532",
                "road_address": {
                    "address_name": "경기 성남시 분당구 판교역로 166",
                    "building_name": "카카오판교아지트"
                },
                "address": {"address_name": "경기 성남시 분당구 백현동 532"}
            }]
        })))
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/v2/local/search/keyword.json"))
        .and(header("Authorization", "KakaoAK test-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "documents": [
                {
                    "place_name": "카카오판교아지트",
                    "address_name": "경기 성남시 분당구 백현동 532",
                    "road_address_name": "경기 성남시 분당구 판교역로 166"
                },
                {
                    "place_name": "판교역 신분당선",
                    "address_name": "경기 성남시 분당구 백현동 537",
                    "road_address_name": ""
                }
            ]
        })))
        .mount(&server)
        .await;

    let client = KakaoClient::with_base_url("test-key", &server.uri()).unwrap();
    let results = client.search("  판교역로 166 ").await.unwrap();

    assert_eq!(
        results,
        vec![
            "경기 성남시 분당구 판교역로 166 (카카오판교아지트)",
            "경기 성남시 분당구 백현동 537 (판교역 신분당선)",
        ]
    );
}

#[tokio::test]
async fn kakao_unauthorized_returns_empty() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let client = KakaoClient::with_base_url("bad-key", &server.uri()).unwrap();
    let results = client.search("세종대로 110").await.unwrap();
    assert!(results.is_empty());
}

#[tokio::test]
async fn kakao_blank_query_skips_request() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = KakaoClient::with_base_url("test-key", &server.uri()).unwrap();
    assert!(client.search("   ").await.unwrap().is_empty());
}
