mod common;

use axum::http::StatusCode;
use common::{body_json, get};
use sqlx::SqlitePool;

#[sqlx::test(migrations = "../db/migrations")]
async fn prices_lists_builtin_table_in_order(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/prices").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    let tokens = json["data"].as_array().unwrap();
    assert_eq!(tokens.len(), 32);
    assert_eq!(tokens[0]["currency"], "BLUR");
    assert_eq!(tokens[3]["currency"], "USD");
    assert_eq!(tokens[3]["price"], 1.0);
}

#[sqlx::test(migrations = "../db/migrations")]
async fn convert_uses_price_ratio(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/convert?from=ETH&to=USD&amount=2").await;

    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["from"], "ETH");
    assert_eq!(json["to"], "USD");
    assert_eq!(json["amount"], 2.0);
    assert_eq!(json["formatted"], "3291.8675");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn convert_same_token_has_unit_rate(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/convert?from=GMX&to=GMX&amount=1.5").await).await;

    assert_eq!(json["rate"], 1.0);
    assert_eq!(json["formatted"], "1.5000");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn convert_formats_halfway_values_upwards(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let json = body_json(get(app, "/api/convert?from=USD&to=USD&amount=1.03125").await).await;

    assert_eq!(json["output"], 1.03125);
    assert_eq!(json["formatted"], "1.0313");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn convert_rejects_bad_amounts(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    for amount in ["abc", "0", "-3", ""] {
        let uri = format!("/api/convert?from=ETH&to=USD&amount={amount}");
        let response = get(app.clone(), &uri).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "amount={amount}");
        let json = body_json(response).await;
        assert_eq!(json["error"], "Enter a valid amount.");
    }
}

#[sqlx::test(migrations = "../db/migrations")]
async fn convert_unknown_token_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/convert?from=ETH&to=DOGE&amount=1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["error"], "Price data not available for selected tokens.");
}

#[sqlx::test(migrations = "../db/migrations")]
async fn convert_without_tokens_returns_400(pool: SqlitePool) {
    let app = common::build_test_app(pool);

    let response = get(app, "/api/convert?amount=1").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
