use feedback_e2e_tests::{fake_store::FakeStore, prepare_env};
use feedback_form::{FeedbackForm, FormStatus, HttpTransport, SubmitOutcome};
use feedback_store::RestStore;
use feedback_types::{config::StoreConfig, Rating, Submission};
use serde_json::json;
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_submit_round_trip() {
    let (args, store) = prepare_env().await.unwrap();
    let api_url = args.base_url.join("api/feedback").unwrap();

    let client = reqwest::Client::new();
    let payload = json!({"name": "Ana", "rating": 4, "message": "Great!"});
    let response = client.post(api_url).json(&payload).send().await.unwrap();
    info!("Response: {:#?}", response);
    assert_eq!(response.status().as_u16(), 200);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"success": true}));

    let rows = store.rows();
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].0, "feedback");
    assert_eq!(rows[0].1, payload);
}

#[tokio::test]
#[traced_test]
async fn test_submit_plain_body() {
    let (args, store) = prepare_env().await.unwrap();
    let api_url = args.base_url.join("api/feedback").unwrap();

    let payload = json!({"rating": 3, "message": "No header"});
    let response = reqwest::Client::new()
        .post(api_url)
        .body(payload.to_string())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 200);
    assert_eq!(store.rows().len(), 1);
    assert_eq!(store.rows()[0].1["message"], "No header");
}

#[tokio::test]
#[traced_test]
async fn test_store_error_is_reported() {
    let (args, store) = prepare_env().await.unwrap();
    store.fail_with("duplicate key");
    let api_url = args.base_url.join("api/feedback").unwrap();

    let client = reqwest::Client::new();
    let payload = json!({"name": "", "rating": 5, "message": "Again"});
    let response = client.post(api_url).json(&payload).send().await.unwrap();
    info!("Response: {:#?}", response);
    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "duplicate key"}));
    assert_eq!(store.requests(), 1);
    assert!(store.rows().is_empty());
}

#[tokio::test]
#[traced_test]
async fn test_invalid_and_malformed_requests() {
    let (args, store) = prepare_env().await.unwrap();
    let api_url = args.base_url.join("api/feedback").unwrap();
    let client = reqwest::Client::new();

    let response = client
        .post(api_url.clone())
        .json(&json!({"name": "Ana", "rating": 0, "message": ""}))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 422);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid submission");

    let response = client
        .post(api_url)
        .header("content-type", "application/json")
        .body("not json")
        .send()
        .await
        .unwrap();
    assert_eq!(response.status().as_u16(), 500);
    let body: serde_json::Value = response.json().await.unwrap();
    assert_eq!(body, json!({"error": "Internal Server Error"}));

    assert_eq!(store.requests(), 0);
}

#[tokio::test]
#[traced_test]
async fn test_form_against_server() {
    let (args, store) = prepare_env().await.unwrap();
    let transport = HttpTransport::new(reqwest::Client::new(), &args.base_url).unwrap();

    let mut form = FeedbackForm::new();
    form.update_name("Ana");
    form.update_rating(Rating::ALL[3]);
    form.update_message("Great!");
    assert_eq!(form.submit(&transport).await, SubmitOutcome::Submitted);
    assert_eq!(form.status(), FormStatus::Success);
    assert_eq!(form.draft().message, "");
    assert_eq!(store.rows().len(), 1);

    form.send_another();
    form.update_message("Once more");
    store.fail_with("duplicate key");
    assert_eq!(form.submit(&transport).await, SubmitOutcome::Failed);
    assert_eq!(form.status(), FormStatus::Error);
    assert_eq!(form.draft().message, "Once more");
    assert!(logs_contain("rejected by server"));
    assert_eq!(store.rows().len(), 1);
}

#[tokio::test]
#[traced_test]
async fn test_form_server_unreachable() {
    let args = feedback_e2e_tests::test_config(None).unwrap();
    // nothing listens on this port
    let transport = HttpTransport::new(reqwest::Client::new(), &args.base_url).unwrap();

    let mut form = FeedbackForm::new();
    form.update_message("Hello?");
    assert_eq!(form.submit(&transport).await, SubmitOutcome::Failed);
    assert_eq!(form.status(), FormStatus::Error);
    assert_eq!(form.draft().message, "Hello?");
    assert!(logs_contain("could not be delivered"));
}

#[tokio::test]
#[traced_test]
async fn test_direct_store_client() {
    let (store, store_url) = FakeStore::start().await.unwrap();
    let config = StoreConfig::new(store_url, feedback_e2e_tests::fake_store::TEST_KEY);
    let client = RestStore::connect(&config).unwrap();

    let rows = [Submission::new("Bob", Rating::ALL[1], "Could be better")];
    client.insert_rows("feedback", &rows).await.unwrap();
    let stored = store.rows();
    assert_eq!(stored.len(), 1);
    assert_eq!(
        stored[0].1,
        json!({"name": "Bob", "rating": 2, "message": "Could be better"})
    );

    let wrong_key = StoreConfig::new(config.store_url.clone().unwrap(), "wrong");
    let err = RestStore::connect(&wrong_key)
        .unwrap()
        .insert_rows("feedback", &rows)
        .await
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid API key");
}
