#![allow(dead_code)]

use std::sync::atomic::AtomicI32;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::sync::Mutex;

use async_trait::async_trait;
use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::StatusCode;
use axum::Router;
use chrono::Utc;
use http_body_util::BodyExt;
use serde_json::Value;
use tower::util::ServiceExt; // for `oneshot`

use catalog_service::book::errors::BookError;
use catalog_service::book::models::Book;
use catalog_service::book::models::Favorite;
use catalog_service::book::models::FavoriteWithBook;
use catalog_service::book::models::ListBooksQuery;
use catalog_service::book::models::SortOrder;
use catalog_service::book::ports::BookRepository;
use catalog_service::book::ports::ContentGenerator;
use catalog_service::book::ports::FavoriteRepository;
use catalog_service::book::service::BookService;
use catalog_service::inbound::http::router::create_router;
use catalog_service::inbound::http::router::AppState;
use catalog_service::payment::errors::PaymentError;
use catalog_service::payment::models::CheckoutRequest;
use catalog_service::payment::models::CheckoutSession;
use catalog_service::payment::models::NewTransaction;
use catalog_service::payment::models::PaymentNotification;
use catalog_service::payment::models::Transaction;
use catalog_service::payment::ports::PaymentGateway;
use catalog_service::payment::ports::TransactionRepository;
use catalog_service::payment::service::PaymentService;
use catalog_service::user::errors::UserError;
use catalog_service::user::models::GoogleIdentity;
use catalog_service::user::models::NewUser;
use catalog_service::user::models::User;
use catalog_service::user::ports::IdentityVerifier;
use catalog_service::user::ports::UserRepository;
use catalog_service::user::service::UserService;

pub const TEST_JWT_SECRET: &[u8] = b"test-secret-key-for-jwt-signing-32b!";

/// ID token the stub verifier accepts.
pub const GOOD_GOOGLE_TOKEN: &str = "valid-google-token";

// ---------------------------------------------------------------------------
// In-memory port implementations
// ---------------------------------------------------------------------------

pub struct InMemoryUsers {
    users: Mutex<Vec<User>>,
    next_id: AtomicI32,
}

impl InMemoryUsers {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn set_token_balance(&self, id: i32, balance: i32) {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.token_balance = balance;
        }
    }

    pub fn token_balance(&self, id: i32) -> Option<i32> {
        let users = self.users.lock().unwrap();
        users.iter().find(|u| u.id == id).map(|u| u.token_balance)
    }

    pub fn count(&self) -> usize {
        self.users.lock().unwrap().len()
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn create(&self, new_user: NewUser) -> Result<User, UserError> {
        let mut users = self.users.lock().unwrap();

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(UserError::EmailTaken);
        }

        let now = Utc::now();
        let user = User {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            token_balance: 10,
            created_at: now,
            updated_at: now,
        };
        users.push(user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, UserError> {
        let users = self.users.lock().unwrap();
        Ok(users.iter().find(|u| u.email == email).cloned())
    }

    async fn update_username(&self, id: i32, username: &str) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        let user = users
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or(UserError::NotFound)?;
        user.username = username.to_string();
        Ok(())
    }

    async fn credit_tokens(&self, id: i32, amount: i32) -> Result<(), UserError> {
        let mut users = self.users.lock().unwrap();
        if let Some(user) = users.iter_mut().find(|u| u.id == id) {
            user.token_balance += amount;
        }
        Ok(())
    }
}

pub struct InMemoryBooks {
    books: Vec<Book>,
}

impl InMemoryBooks {
    pub fn new(books: Vec<Book>) -> Self {
        Self { books }
    }
}

#[async_trait]
impl BookRepository for InMemoryBooks {
    async fn list(&self, query: &ListBooksQuery) -> Result<(i64, Vec<Book>), BookError> {
        let mut rows: Vec<Book> = self
            .books
            .iter()
            .filter(|b| match &query.search {
                Some(search) => b.title.to_lowercase().contains(&search.to_lowercase()),
                None => true,
            })
            .filter(|b| {
                query.categories.is_empty()
                    || b.category
                        .as_ref()
                        .map(|c| query.categories.contains(c))
                        .unwrap_or(false)
            })
            .cloned()
            .collect();

        match query.order {
            SortOrder::Asc => rows.sort_by_key(|b| b.price),
            SortOrder::Desc => rows.sort_by_key(|b| std::cmp::Reverse(b.price)),
        }

        let total = rows.len() as i64;
        let page = rows
            .into_iter()
            .skip(query.offset() as usize)
            .take(query.limit as usize)
            .collect();

        Ok((total, page))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Book>, BookError> {
        Ok(self.books.iter().find(|b| b.id == id).cloned())
    }

    async fn list_all(&self) -> Result<Vec<Book>, BookError> {
        Ok(self.books.clone())
    }

    async fn distinct_categories(&self) -> Result<Vec<Option<String>>, BookError> {
        let mut seen = Vec::new();
        for book in &self.books {
            if !seen.contains(&book.category) {
                seen.push(book.category.clone());
            }
        }
        Ok(seen)
    }
}

pub struct InMemoryFavorites {
    rows: Mutex<Vec<Favorite>>,
    next_id: AtomicI32,
    books: Vec<Book>,
}

impl InMemoryFavorites {
    pub fn new(books: Vec<Book>) -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
            books,
        }
    }
}

#[async_trait]
impl FavoriteRepository for InMemoryFavorites {
    async fn create(&self, user_id: i32, book_id: i32) -> Result<Favorite, BookError> {
        let mut rows = self.rows.lock().unwrap();
        let favorite = Favorite {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            user_id,
            book_id,
            created_at: Utc::now(),
        };
        rows.push(favorite.clone());
        Ok(favorite)
    }

    async fn find_by_user_and_book(
        &self,
        user_id: i32,
        book_id: i32,
    ) -> Result<Option<Favorite>, BookError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .find(|f| f.user_id == user_id && f.book_id == book_id)
            .cloned())
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Favorite>, BookError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows.iter().find(|f| f.id == id).cloned())
    }

    async fn delete(&self, id: i32) -> Result<(), BookError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|f| f.id != id);
        if rows.len() == before {
            return Err(BookError::FavoriteNotFound);
        }
        Ok(())
    }

    async fn list_with_books(&self, user_id: i32) -> Result<Vec<FavoriteWithBook>, BookError> {
        let rows = self.rows.lock().unwrap();
        Ok(rows
            .iter()
            .filter(|f| f.user_id == user_id)
            .filter_map(|f| {
                self.books
                    .iter()
                    .find(|b| b.id == f.book_id)
                    .map(|b| FavoriteWithBook {
                        favorite: f.clone(),
                        book: b.clone(),
                    })
            })
            .collect())
    }
}

pub struct InMemoryTransactions {
    rows: Mutex<Vec<Transaction>>,
    next_id: AtomicI32,
}

impl InMemoryTransactions {
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI32::new(1),
        }
    }

    pub fn all(&self) -> Vec<Transaction> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl TransactionRepository for InMemoryTransactions {
    async fn create(&self, transaction: NewTransaction) -> Result<Transaction, PaymentError> {
        let mut rows = self.rows.lock().unwrap();
        let now = Utc::now();
        let stored = Transaction {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            order_token: transaction.order_token,
            payment_status: transaction.payment_status,
            user_id: transaction.user_id,
            created_at: now,
            updated_at: now,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn update_status(&self, order_token: &str, status: &str) -> Result<(), PaymentError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(row) = rows.iter_mut().find(|t| t.order_token == order_token) {
            row.payment_status = status.to_string();
            row.updated_at = Utc::now();
        }
        Ok(())
    }
}

/// Gateway stub: checkout always succeeds; the status lookup answers with a
/// configurable transaction status and custom field.
pub struct StubGateway {
    pub status: Mutex<String>,
    pub custom_field1: Mutex<Option<String>>,
}

impl StubGateway {
    pub fn new() -> Self {
        Self {
            status: Mutex::new("settlement".to_string()),
            custom_field1: Mutex::new(None),
        }
    }

    pub fn set_status(&self, status: &str) {
        *self.status.lock().unwrap() = status.to_string();
    }

    pub fn set_custom_field1(&self, value: Option<&str>) {
        *self.custom_field1.lock().unwrap() = value.map(str::to_string);
    }
}

#[async_trait]
impl PaymentGateway for StubGateway {
    async fn create_transaction(
        &self,
        checkout: &CheckoutRequest,
    ) -> Result<CheckoutSession, PaymentError> {
        Ok(CheckoutSession {
            redirect_url: format!(
                "https://app.sandbox.midtrans.com/snap/v2/vtweb/{}",
                checkout.order_id
            ),
        })
    }

    async fn notification_status(
        &self,
        order_id: &str,
    ) -> Result<PaymentNotification, PaymentError> {
        Ok(PaymentNotification {
            order_id: order_id.to_string(),
            transaction_status: self.status.lock().unwrap().clone(),
            custom_field1: self.custom_field1.lock().unwrap().clone(),
        })
    }
}

/// Generator stub answering with a fixed text output.
pub struct StubGenerator {
    pub output: Mutex<String>,
}

impl StubGenerator {
    pub fn new() -> Self {
        Self {
            output: Mutex::new("[1, 2]".to_string()),
        }
    }

    pub fn set_output(&self, output: &str) {
        *self.output.lock().unwrap() = output.to_string();
    }
}

#[async_trait]
impl ContentGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, BookError> {
        Ok(self.output.lock().unwrap().clone())
    }
}

/// Identity verifier stub accepting a single well-known token.
pub struct StubVerifier;

#[async_trait]
impl IdentityVerifier for StubVerifier {
    async fn verify(&self, id_token: &str) -> Result<GoogleIdentity, UserError> {
        if id_token != GOOD_GOOGLE_TOKEN {
            return Err(UserError::IdentityVerification(
                "token rejected".to_string(),
            ));
        }
        Ok(GoogleIdentity {
            subject: "google-sub-123".to_string(),
            email: "google-user@example.com".to_string(),
            name: Some("Google User".to_string()),
        })
    }
}

// ---------------------------------------------------------------------------
// Test application
// ---------------------------------------------------------------------------

pub fn seed_books() -> Vec<Book> {
    let entry = |id: i32, title: &str, category: Option<&str>, price: i32| Book {
        id,
        title: title.to_string(),
        image_url: None,
        category: category.map(str::to_string),
        author: "Author".to_string(),
        summary: format!("Summary of {}", title),
        price,
        publish_date: Some("2020".to_string()),
        created_at: Utc::now(),
        updated_at: Utc::now(),
    };

    vec![
        entry(1, "The Silent Sea", Some("Fiction"), 50_000),
        entry(2, "A Brief History of Time", Some("Science"), 80_000),
        entry(3, "The Art of War", Some("History"), 30_000),
        entry(4, "Deep Learning", Some("Science"), 120_000),
        entry(5, "Loose Pages", None, 10_000),
    ]
}

/// Full application wired with in-memory adapters, driven in-process.
pub struct TestApp {
    pub router: Router,
    pub authenticator: Arc<Authenticator>,
    pub users: Arc<InMemoryUsers>,
    pub transactions: Arc<InMemoryTransactions>,
    pub gateway: Arc<StubGateway>,
    pub generator: Arc<StubGenerator>,
}

impl TestApp {
    pub fn spawn() -> Self {
        let books = seed_books();

        let users = Arc::new(InMemoryUsers::new());
        let transactions = Arc::new(InMemoryTransactions::new());
        let gateway = Arc::new(StubGateway::new());
        let generator = Arc::new(StubGenerator::new());
        let authenticator = Arc::new(Authenticator::new(TEST_JWT_SECRET));

        let state = AppState {
            user_service: Arc::new(UserService::new(users.clone(), Arc::new(StubVerifier))),
            book_service: Arc::new(BookService::new(
                Arc::new(InMemoryBooks::new(books.clone())),
                Arc::new(InMemoryFavorites::new(books)),
                generator.clone(),
            )),
            payment_service: Arc::new(PaymentService::new(
                transactions.clone(),
                users.clone(),
                gateway.clone(),
            )),
            authenticator: authenticator.clone(),
        };

        Self {
            router: create_router(state),
            authenticator,
            users,
            transactions,
            gateway,
            generator,
        }
    }

    /// Issue a token directly (e.g. for a subject that does not exist).
    pub fn token_for(&self, user_id: i32, email: &str) -> String {
        self.authenticator
            .generate_token(&auth::Claims::new(user_id, email))
            .expect("Failed to issue token")
    }

    pub async fn request(
        &self,
        method: &str,
        path: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let request = match body {
            Some(json) => builder
                .header("content-type", "application/json")
                .body(Body::from(json.to_string())),
            None => builder.body(Body::empty()),
        }
        .expect("Failed to build request");

        let response = self
            .router
            .clone()
            .oneshot(request)
            .await
            .expect("Request failed");

        let status = response.status();
        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("Failed to read body")
            .to_bytes();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        (status, json)
    }

    pub async fn get(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("GET", path, token, None).await
    }

    pub async fn post(
        &self,
        path: &str,
        token: Option<&str>,
        body: Value,
    ) -> (StatusCode, Value) {
        self.request("POST", path, token, Some(body)).await
    }

    pub async fn put(&self, path: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.request("PUT", path, token, Some(body)).await
    }

    pub async fn delete(&self, path: &str, token: Option<&str>) -> (StatusCode, Value) {
        self.request("DELETE", path, token, None).await
    }

    /// Register an account and log in, returning the access token.
    pub async fn register_and_login(&self, username: &str, email: &str, password: &str) -> String {
        let (status, _) = self
            .post(
                "/register",
                None,
                serde_json::json!({
                    "username": username,
                    "email": email,
                    "password": password,
                }),
            )
            .await;
        assert_eq!(status, StatusCode::CREATED, "registration failed");

        let (status, body) = self
            .post(
                "/login",
                None,
                serde_json::json!({ "email": email, "password": password }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "login failed");

        body["access_token"]
            .as_str()
            .expect("login response carried no access_token")
            .to_string()
    }
}
