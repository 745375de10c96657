use adstudio::{
    AdRequest, AdStyle, AdType, Backend, ErrorKind, HttpGateway, ImageRequest, ImageSize,
    ImageStyle, NewCompany, StudioConfig, StudioError,
};
use serde_json::json;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn gateway(server: &MockServer) -> HttpGateway {
    HttpGateway::new(StudioConfig::new().with_base_url(server.uri())).unwrap()
}

fn image_json(id: &str, prompt: &str) -> serde_json::Value {
    json!({
        "id": id,
        "prompt": prompt,
        "style": "realistic",
        "size": "512x512",
        "image_data": "iVBORw==",
        "created_at": "2024-05-01T12:00:00Z"
    })
}

#[tokio::test]
async fn test_create_company_posts_draft() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/companies"))
        .and(body_json(json!({
            "name": "Acme",
            "industry": "Retail",
            "product_service": "Shoes",
            "target_audience": "Teens"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "1",
            "name": "Acme",
            "industry": "Retail",
            "product_service": "Shoes",
            "target_audience": "Teens"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let company = gateway(&server)
        .create_company(NewCompany {
            name: "Acme".into(),
            industry: "Retail".into(),
            product_service: "Shoes".into(),
            target_audience: "Teens".into(),
            ..Default::default()
        })
        .await
        .unwrap();

    assert_eq!(company.id, "1");
    assert_eq!(company.website, None);
}

#[tokio::test]
async fn test_list_ads_is_scoped_to_company() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/ads/42"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{
            "id": "a1",
            "company_id": "42",
            "ad_type": "square",
            "style": "classic",
            "image_data": "AAAA",
            "created_at": "2024-05-01T12:00:00Z"
        }])))
        .expect(1)
        .mount(&server)
        .await;

    let ads = gateway(&server).list_ads("42").await.unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0].ad_type, AdType::Square);
    assert_eq!(ads[0].style, AdStyle::Classic);
}

#[tokio::test]
async fn test_generate_ad_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate-ad"))
        .and(body_json(json!({
            "company_id": "42",
            "ad_type": "story",
            "style": "bold",
            "custom_prompt": "summer sale"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "a2",
            "company_id": "42",
            "ad_type": "story",
            "style": "bold",
            "image_data": "AAAA",
            "created_at": "2024-05-01T12:00:00Z"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let ad = gateway(&server)
        .generate_ad(AdRequest {
            company_id: "42".into(),
            ad_type: AdType::Story,
            style: AdStyle::Bold,
            custom_prompt: "summer sale".into(),
        })
        .await
        .unwrap();
    assert_eq!(ad.id, "a2");
}

#[tokio::test]
async fn test_image_history_and_generation() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/images"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [image_json("b", "second"), image_json("a", "first")],
            "total": 7
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/generate-image"))
        .and(body_json(json!({
            "prompt": "A lighthouse",
            "style": "professional",
            "size": "512x768"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_json("c", "A lighthouse")))
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let history = gateway.list_images(None).await.unwrap();
    assert_eq!(history.total, 7);
    assert_eq!(history.images[0].id, "b");

    let image = gateway
        .generate_image(ImageRequest {
            prompt: "A lighthouse".into(),
            style: ImageStyle::Professional,
            size: ImageSize::Portrait,
        })
        .await
        .unwrap();
    assert_eq!(image.id, "c");
}

#[tokio::test]
async fn test_non_success_status_is_http_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/images/nope"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(json!({"detail": "Image not found"})),
        )
        .mount(&server)
        .await;

    let err = gateway(&server).get_image("nope").await.unwrap_err();
    match &err {
        StudioError::Http { status, body } => {
            assert_eq!(*status, 404);
            assert!(body.contains("Image not found"));
        }
        other => panic!("unexpected error: {:?}", other),
    }
    assert_eq!(err.kind(), ErrorKind::Http);
}

#[tokio::test]
async fn test_malformed_body_is_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/companies"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let err = gateway(&server).list_companies().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Decode);
}

#[tokio::test]
async fn test_clear_accepts_empty_body() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/api/images"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("DELETE"))
        .and(path("/api/images/a1"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"message": "Image deleted successfully"})),
        )
        .expect(1)
        .mount(&server)
        .await;

    let gateway = gateway(&server);
    let receipt = gateway.clear_images().await.unwrap();
    assert!(receipt.message.is_none());

    let receipt = gateway.delete_image("a1").await.unwrap();
    assert_eq!(receipt.message.as_deref(), Some("Image deleted successfully"));
}

#[tokio::test]
async fn test_unreachable_backend_is_network_error() {
    // Nothing listens on port 9 on a test machine.
    let config = StudioConfig::new().with_base_url("http://127.0.0.1:9");
    let gateway = HttpGateway::new(config).unwrap();
    let err = gateway.health().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Network);
}

#[tokio::test]
async fn test_health() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/health"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "status": "healthy",
            "ai_service": "mock_mode",
            "model": "stabilityai/stable-diffusion-3.5-large"
        })))
        .mount(&server)
        .await;

    let health = gateway(&server).health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.ai_service.as_deref(), Some("mock_mode"));
}

#[tokio::test]
async fn test_history_limit_is_a_query_parameter() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/images"))
        .and(query_param("limit", "10"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "images": [image_json("a", "first")],
            "total": 40
        })))
        .expect(1)
        .mount(&server)
        .await;

    let history = gateway(&server).list_images(Some(10)).await.unwrap();
    assert_eq!(history.images.len(), 1);
    assert_eq!(history.total, 40);
}

#[tokio::test]
async fn test_ids_are_escaped_in_paths() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/images/a%2Fb%20c"))
        .respond_with(ResponseTemplate::new(200).set_body_json(image_json("a/b c", "odd")))
        .expect(1)
        .mount(&server)
        .await;

    let image = gateway(&server).get_image("a/b c").await.unwrap();
    assert_eq!(image.id, "a/b c");
}

#[tokio::test]
async fn test_error_status_survives_truncated_body() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = [0u8; 1024];
        let _ = socket.read(&mut request).await;
        socket
            .write_all(b"HTTP/1.1 502 Bad Gateway\r\nContent-Length: 100\r\n\r\nshort")
            .await
            .unwrap();
        // Closing early leaves the declared body incomplete.
    });

    let config = StudioConfig::new().with_base_url(format!("http://{}", addr));
    let err = HttpGateway::new(config).unwrap().health().await.unwrap_err();
    match err {
        StudioError::Http { status, .. } => assert_eq!(status, 502),
        other => panic!("unexpected error: {:?}", other),
    }
}
