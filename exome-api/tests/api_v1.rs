mod common;

use actix_web::http::StatusCode;
use actix_web::{test, web, App};
use serde_json::Value;
use exome_api::app::routes;

#[actix_web::test]
async fn test_read_gene_returns_most_exons_and_variants() {
    let fixture = common::fixture();
    let app = test::init_service(App::new()
        .app_data(web::Data::new(fixture.data))
        .configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/v1/genes/PCSK9").to_request();
    let json: Value = test::call_and_read_body_json(&app, req).await;

    assert_eq!(json["gene"]["name2"], "PCSK9");
    assert_eq!(json["gene"]["exoncount"], 14);
    assert_eq!(json["gene"]["name"], "NM_PCSK9_LONG");

    let variants = json["variants"].as_array().unwrap();
    assert_eq!(variants.len(), 2);
    assert!(variants.iter().all(|v| v["name"] == "PCSK9"));
    let mut positions: Vec<_> = variants.iter().map(|v| v["position"].as_i64().unwrap()).collect();
    positions.sort();
    assert_eq!(positions, vec![1010, 1120]);
}

#[actix_web::test]
async fn test_read_gene_without_variants() {
    let fixture = common::fixture();
    let app = test::init_service(App::new()
        .app_data(web::Data::new(fixture.data))
        .configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/v1/genes/LDLR").to_request();
    let json: Value = test::call_and_read_body_json(&app, req).await;
    assert_eq!(json["gene"]["name"], "NM_000527");
    assert_eq!(json["variants"], Value::Array(Vec::new()));
}

#[actix_web::test]
async fn test_read_unknown_gene_is_not_found() {
    let fixture = common::fixture();
    let app = test::init_service(App::new()
        .app_data(web::Data::new(fixture.data))
        .configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/v1/genes/NONEXISTENTGENE").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let json: Value = test::read_body_json(resp).await;
    assert_eq!(json["error"], "gene not found: NONEXISTENTGENE");
}

#[actix_web::test]
async fn test_list_sample_genes() {
    let fixture = common::fixture();
    let app = test::init_service(App::new()
        .app_data(web::Data::new(fixture.data))
        .configure(routes)).await;

    let req = test::TestRequest::get().uri("/api/v1/genes").to_request();
    let json: Value = test::call_and_read_body_json(&app, req).await;

    let symbols: Vec<_> = json["genes"].as_array().unwrap().iter()
        .map(|gene| gene["name2"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(symbols, vec!["PCSK9", "LDLR"]);
}
