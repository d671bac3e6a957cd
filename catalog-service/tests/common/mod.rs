use std::sync::Arc;

use auth::Authenticator;
use auth::JwtHandler;
use catalog_service::domain::product::ports::ProductServicePort;
use catalog_service::domain::product::service::ProductService;
use catalog_service::domain::user::bootstrap::ensure_seed_user;
use catalog_service::domain::user::models::SeedUser;
use catalog_service::domain::user::models::Username;
use catalog_service::domain::user::ports::AuthServicePort;
use catalog_service::domain::user::service::AuthService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::outbound::repositories::InMemoryProductRepository;
use catalog_service::outbound::repositories::InMemoryUserRepository;
use serde_json::Value;

pub const JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-at-least-32-bytes";
pub const ADMIN_USERNAME: &str = "admin";
pub const ADMIN_PASSWORD: &str = "password";
pub const TOKEN_TTL_SECONDS: i64 = 3600;

/// Test application that spawns a real server on in-memory stores
pub struct TestApp {
    pub address: String,
    pub api_client: reqwest::Client,
    pub jwt_handler: JwtHandler,
    pub users: InMemoryUserRepository,
}

impl TestApp {
    /// Spawn the application in a background task and return TestApp
    pub async fn spawn() -> Self {
        // Use random port (0 = OS assigns)
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind random port");
        let port = listener.local_addr().unwrap().port();
        let address = format!("http://127.0.0.1:{}", port);

        let authenticator = Arc::new(Authenticator::new(JWT_SECRET));
        let users = InMemoryUserRepository::new();
        let products = InMemoryProductRepository::new();

        let seed = SeedUser {
            username: Username::new(ADMIN_USERNAME.to_string()).unwrap(),
            password: ADMIN_PASSWORD.to_string(),
        };
        ensure_seed_user(&users, authenticator.password_hasher(), &seed)
            .await
            .expect("Failed to seed admin account");

        let product_service: Arc<dyn ProductServicePort> =
            Arc::new(ProductService::new(Arc::new(products)));
        let auth_service: Arc<dyn AuthServicePort> = Arc::new(AuthService::new(
            Arc::new(users.clone()),
            Arc::clone(&authenticator),
            chrono::Duration::seconds(TOKEN_TTL_SECONDS),
        ));

        let router = create_router(product_service, auth_service, authenticator);

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, router).await.expect("Server error");
        });

        Self {
            address,
            api_client: reqwest::Client::new(),
            jwt_handler: JwtHandler::new(JWT_SECRET),
            users,
        }
    }

    /// Log in with the given credentials and return the bearer token
    pub async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .post("/auth/login")
            .json(&serde_json::json!({ "username": username, "password": password }))
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::OK);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"]["token"]
            .as_str()
            .expect("Missing token in login response")
            .to_string()
    }

    /// Bearer token for the seeded admin account
    pub async fn admin_token(&self) -> String {
        self.login(ADMIN_USERNAME, ADMIN_PASSWORD).await
    }

    /// Create a product and return the `data` part of the response
    pub async fn create_product(&self, token: &str, product: Value) -> Value {
        let response = self
            .post_authenticated("/produtos", token)
            .json(&product)
            .send()
            .await
            .expect("Failed to execute request");

        assert_eq!(response.status(), reqwest::StatusCode::CREATED);

        let body: Value = response.json().await.expect("Failed to parse response");
        body["data"].clone()
    }

    /// Helper to make GET request
    pub fn get(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.get(&format!("{}{}", self.address, path))
    }

    /// Helper to make POST request
    pub fn post(&self, path: &str) -> reqwest::RequestBuilder {
        self.api_client.post(&format!("{}{}", self.address, path))
    }

    /// Helper to make GET request with Bearer token
    pub fn get_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.get(path).bearer_auth(token)
    }

    /// Helper to make POST request with Bearer token
    pub fn post_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.post(path).bearer_auth(token)
    }

    /// Helper to make PUT request with Bearer token
    pub fn put_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .put(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }

    /// Helper to make DELETE request with Bearer token
    pub fn delete_authenticated(&self, path: &str, token: &str) -> reqwest::RequestBuilder {
        self.api_client
            .delete(&format!("{}{}", self.address, path))
            .bearer_auth(token)
    }
}
