use chrono::{Duration as ChronoDuration, Utc};
use dashboard_auth::{Hs256SessionVerifier, SessionClaims};
use dashboard_core::UserId;
use dashboard_infra::AppConfig;
use reqwest::{StatusCode, header};

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn(session_secret: &str) -> Self {
        dashboard_observability::tracing::init_for_tests();

        // Same router as prod with no DATABASE_URL, bound to an ephemeral port.
        let secret = session_secret.to_string();
        let config = AppConfig::from_lookup(move |key| match key {
            "SESSION_SECRET" => Some(secret.clone()),
            _ => None,
        })
        .expect("config");
        let app = dashboard_api::app::build_app(&config)
            .await
            .expect("failed to build app");

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_token(session_secret: &str) -> String {
    let now = Utc::now();
    let claims = SessionClaims {
        sub: UserId::generate(),
        email: Some("user@nextmail.com".to_string()),
        issued_at: now,
        expires_at: now + ChronoDuration::minutes(10),
    };

    Hs256SessionVerifier::new(session_secret.as_bytes())
        .sign(&claims)
        .expect("failed to sign token")
}

fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .unwrap()
}

fn location(res: &reqwest::Response) -> String {
    res.headers()[header::LOCATION].to_str().unwrap().to_string()
}

async fn listing(client: &reqwest::Client, base_url: &str, token: &str) -> Vec<serde_json::Value> {
    let res = client
        .get(format!("{}/dashboard/invoices", base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    body["invoices"].as_array().unwrap().clone()
}

#[tokio::test]
async fn health_needs_no_session() {
    let srv = TestServer::spawn("test-secret").await;

    let res = client()
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn dashboard_pages_redirect_anonymous_visitors_to_login() {
    let srv = TestServer::spawn("test-secret").await;

    let res = client()
        .get(format!("{}/dashboard/invoices", srv.base_url))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/login?callbackUrl=%2Fdashboard%2Finvoices");
}

#[tokio::test]
async fn token_signed_with_another_secret_is_anonymous() {
    let srv = TestServer::spawn("test-secret").await;
    let token = mint_token("some-other-secret");

    let res = client()
        .get(format!("{}/dashboard", srv.base_url))
        .bearer_auth(token)
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert!(location(&res).starts_with("/login"));
}

#[tokio::test]
async fn session_cookie_signs_the_user_in() {
    let srv = TestServer::spawn("test-secret").await;
    let token = mint_token("test-secret");

    let res = client()
        .get(format!("{}/", srv.base_url))
        .header(header::COOKIE, format!("session={token}"))
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/dashboard");
}

#[tokio::test]
async fn invoice_lifecycle_create_update_delete() {
    let srv = TestServer::spawn("test-secret").await;
    let token = mint_token("test-secret");
    let client = client();

    let res = client
        .post(format!("{}/dashboard/invoices", srv.base_url))
        .bearer_auth(&token)
        .form(&[("customerId", "c1"), ("amount", "45.50"), ("status", "pending")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&res), "/dashboard/invoices");

    let invoices = listing(&client, &srv.base_url, &token).await;
    assert_eq!(invoices.len(), 1);
    assert_eq!(invoices[0]["amount"], 4550);
    assert_eq!(invoices[0]["formatted_amount"], "$45.50");
    let id = invoices[0]["id"].as_str().unwrap().to_string();
    let date = invoices[0]["date"].as_str().unwrap().to_string();

    let res = client
        .post(format!("{}/dashboard/invoices/{}", srv.base_url, id))
        .bearer_auth(&token)
        .form(&[("customer_id", "c2"), ("amount", "100"), ("status", "paid")])
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::SEE_OTHER);

    let res = client
        .get(format!("{}/dashboard/invoices/{}", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let invoice: serde_json::Value = res.json().await.unwrap();
    assert_eq!(invoice["customer_id"], "c2");
    assert_eq!(invoice["amount"], 10000);
    assert_eq!(invoice["status"], "paid");
    assert_eq!(invoice["date"], date.as_str());

    let res = client
        .post(format!("{}/dashboard/invoices/{}/delete", srv.base_url, id))
        .bearer_auth(&token)
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Deleted Invoice.");

    assert!(listing(&client, &srv.base_url, &token).await.is_empty());
}

#[tokio::test]
async fn rejected_form_keeps_the_store_untouched() {
    let srv = TestServer::spawn("test-secret").await;
    let token = mint_token("test-secret");
    let client = client();

    let res = client
        .post(format!("{}/dashboard/invoices", srv.base_url))
        .bearer_auth(&token)
        .form(&[("customer_id", "c1"), ("amount", "-3"), ("status", "pending")])
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["message"], "Missing Fields. Failed to Create Invoice.");
    assert_eq!(
        body["errors"]["amount"][0],
        "Please enter an amount greater than $0."
    );
    assert!(body["errors"].get("customer_id").is_none());

    assert!(listing(&client, &srv.base_url, &token).await.is_empty());
}
