use feedback_e2e_tests::prepare_env;
use tracing::info;
use tracing_test::traced_test;

#[tokio::test]
#[traced_test]
async fn test_health() {
    let (args, _store) = prepare_env().await.unwrap();

    let client = reqwest::Client::new();

    let url = args.base_url.join("health").unwrap();
    let response = client.get(url).send().await.unwrap();
    info! {"Response: {:#?}", response};
    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
#[traced_test]
async fn test_server_refuses_to_start_without_store() {
    let args = feedback_e2e_tests::test_config(None).unwrap();
    if args.store.credentials().is_ok() {
        // store settings leaked from environment
        return;
    }
    let res = feedback_server::run::run(args).await;
    assert!(res.is_err());
}
