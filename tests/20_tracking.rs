mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

use common::{assert_error, tracking_payload};

#[tokio::test]
async fn tracking_point_round_trips() -> Result<()> {
    let server = common::spawn_server().await?;
    let zone = server.create_zone("Bridge").await?;
    let zone_id = zone["id"].as_str().unwrap();

    let point = server.track("phone1", zone_id, "enter", 100000).await?;

    assert!(point["id"].is_string());
    assert_eq!(point["tracking_id"], "phone1");
    assert_eq!(point["zone_id"], zone_id);
    assert_eq!(point["zone_name"], "Bridge");
    assert_eq!(point["data_type"], "enter");
    assert_eq!(point["tracking_timestamp"], 100000);
    assert_eq!(point["tracking_time"], "1970-01-02 03:46:40");
    assert_eq!(point["lat"].as_f64(), Some(50.4501));
    assert_eq!(point["lon"].as_f64(), Some(30.5234));
    assert!(point["created_at"].is_string());

    Ok(())
}

#[tokio::test]
async fn tracking_timestamp_is_coerced_from_string() -> Result<()> {
    let server = common::spawn_server().await?;

    let mut payload = tracking_payload("phone1", "z1", "track", 0);
    payload["tracking_timestamp"] = json!("100000");
    let (status, body) = server.post_json("/v1/tracking", &payload).await?;

    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["tracking_timestamp"], 100000);
    assert_eq!(body["data"]["zone_name"], json!(null));

    Ok(())
}

#[tokio::test]
async fn tracking_rejects_invalid_fields() -> Result<()> {
    let server = common::spawn_server().await?;

    let cases = [
        ("tracking_timestamp", json!("abc"), "tracking_timestamp should be integer"),
        ("lat", json!("0.0"), "lat should be either int or float"),
        ("lon", json!(null), "lon should be either int or float"),
        ("data_type", json!("wrong"), "possible data_type values are: enter, leave, track"),
        ("data_type", json!("renter"), "possible data_type values are: enter, leave, track"),
        ("tracking_id", json!(""), "tracking_id should be non-empty string"),
    ];

    for (field, value, message) in cases {
        let mut payload = tracking_payload("phone1", "z1", "enter", 1);
        payload[field] = value;
        let (status, body) = server.post_json("/v1/tracking", &payload).await?;
        assert_error(status, &body, StatusCode::BAD_REQUEST, message);
    }

    Ok(())
}

#[tokio::test]
async fn missing_keys_are_listed_sorted() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = server
        .post_json("/v1/tracking", &json!({"tracking_timestamp": 1, "lon": 1}))
        .await?;
    assert_error(
        status,
        &body,
        StatusCode::BAD_REQUEST,
        "Missing keys: 'data_type', 'lat', 'tracking_id', 'zone_id'",
    );

    // Presence is checked before values
    let (status, body) = server
        .post_json("/v1/tracking", &json!({"tracking_id": "", "lat": "x"}))
        .await?;
    assert_error(
        status,
        &body,
        StatusCode::BAD_REQUEST,
        "Missing keys: 'data_type', 'lon', 'tracking_timestamp', 'zone_id'",
    );

    Ok(())
}

#[tokio::test]
async fn malformed_bodies_are_rejected() -> Result<()> {
    let server = common::spawn_server().await?;
    let url = server.url("/v1/tracking");

    let res = server
        .client
        .post(&url)
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await?;
    let status = res.status();
    assert_error(status, &res.json().await?, StatusCode::BAD_REQUEST, "please provide valid json payload");

    let res = server.client.post(&url).body("tracking_id=phone1").send().await?;
    let status = res.status();
    assert_error(
        status,
        &res.json().await?,
        StatusCode::BAD_REQUEST,
        "content-type header should be application/json",
    );

    let (status, body) = server.post_json("/v1/tracking", &json!([1, 2])).await?;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "payload should be a json object");

    Ok(())
}

#[tokio::test]
async fn bulk_tracking_keeps_input_order() -> Result<()> {
    let server = common::spawn_server().await?;

    let payload = json!({
        "data": [
            tracking_payload("phone1", "z1", "enter", 30),
            tracking_payload("phone2", "z1", "leave", 10),
        ]
    });
    let (status, body) = server.post_json("/v1/bulk_tracking", &payload).await?;
    assert_eq!(status, StatusCode::OK, "{}", body);

    let data = body["data"].as_array().unwrap();
    assert_eq!(data.len(), 2);
    assert_eq!(data[0]["tracking_id"], "phone1");
    assert_eq!(data[1]["tracking_id"], "phone2");

    Ok(())
}

#[tokio::test]
async fn bulk_tracking_is_all_or_nothing_on_validation() -> Result<()> {
    let server = common::spawn_server().await?;

    let (status, body) = server.post_json("/v1/bulk_tracking", &json!({"data": [1, 2]})).await?;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "data should be a list of objects");

    let mut bad = tracking_payload("phone1", "z1", "enter", 2);
    bad["lat"] = json!("north");
    let payload = json!({"data": [tracking_payload("phone1", "z1", "enter", 1), bad]});
    let (status, body) = server.post_json("/v1/bulk_tracking", &payload).await?;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "lat should be either int or float");

    let (status, body) = server.post_json("/v1/bulk_tracking", &json!({"data": "x"})).await?;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "data should be a list");

    let (status, body) = server.post_json("/v1/bulk_tracking", &json!({})).await?;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Missing keys: 'data'");

    // Nothing from the rejected batches was stored
    let (_, body) = server.get_json("/v1/tracking-data/ALL").await?;
    assert_eq!(body["data"], json!([]));

    Ok(())
}
