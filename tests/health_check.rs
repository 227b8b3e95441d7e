use crate::common::spawn_app;

mod common;

#[tokio::test]
async fn health_check_works() {
    let app = spawn_app().await;

    let response = app
        .api_client
        .get(&format!("{}/health", &app.address))
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());
    assert_eq!(response.text().await.unwrap(), "OK");
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let app = spawn_app().await;

    for path in ["/generate-quiz", "/get-page-words"] {
        let response = app
            .api_client
            .request(reqwest::Method::OPTIONS, &format!("{}{}", &app.address, path))
            .send()
            .await
            .expect("Failed to execute request.");

        assert_eq!(200, response.status().as_u16());
        let headers = response.headers();
        assert_eq!(headers["access-control-allow-origin"], "*");
        assert_eq!(headers["access-control-allow-methods"], "POST");
        assert!(headers["access-control-allow-headers"]
            .to_str()
            .unwrap()
            .contains("content-type"));
        assert_eq!(response.text().await.unwrap(), "ok");
    }
}
