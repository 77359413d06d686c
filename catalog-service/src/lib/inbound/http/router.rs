use std::sync::Arc;
use std::time::Duration;

use auth::Authenticator;
use axum::body::Body;
use axum::http::Request;
use axum::http::Response;
use axum::middleware;
use axum::routing::get;
use axum::routing::post;
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::Span;

use super::handlers::add_favorite::add_favorite;
use super::handlers::book_detail::book_detail;
use super::handlers::buy_token::buy_token;
use super::handlers::categories::categories;
use super::handlers::get_profile::get_profile;
use super::handlers::google_signin::google_signin;
use super::handlers::list_books::list_books;
use super::handlers::list_favorites::list_favorites;
use super::handlers::login::login;
use super::handlers::payment_notification::payment_notification;
use super::handlers::recommend::recommend;
use super::handlers::register::register;
use super::handlers::remove_favorite::remove_favorite;
use super::handlers::update_profile::update_profile;
use super::middleware::authenticate;
use super::middleware::require_authentication;
use crate::book::service::BookService;
use crate::payment::service::PaymentService;
use crate::user::service::UserService;

#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub book_service: Arc<BookService>,
    pub payment_service: Arc<PaymentService>,
    pub authenticator: Arc<Authenticator>,
}

pub fn create_router(state: AppState) -> Router {
    // Routes reachable without a credential. The payment webhook is public
    // because the gateway calls it.
    let public_routes = Router::new()
        .route("/register", post(register))
        .route("/login", post(login))
        .route("/google-signin", post(google_signin))
        .route("/midtrans-notification", post(payment_notification));

    let protected_routes = Router::new()
        .route("/", get(list_books))
        .route("/profile", get(get_profile).put(update_profile))
        .route("/book/favorites", get(list_favorites))
        .route("/book/recommend", get(recommend))
        .route("/book/:id", get(book_detail))
        .route("/category", get(categories))
        .route("/categories", get(categories))
        .route("/favorites/:id", post(add_favorite).delete(remove_favorite))
        .route("/buy-token", post(buy_token))
        // authenticate runs first, then the identity check
        .route_layer(middleware::from_fn(require_authentication))
        .route_layer(middleware::from_fn_with_state(state.clone(), authenticate));

    let trace_layer = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            tracing::info_span!(
                "http_request",
                method = %request.method(),
                uri = %request.uri(),
                version = ?request.version(),
            )
        })
        .on_request(|request: &Request<Body>, _span: &Span| {
            tracing::info!(
                method = %request.method(),
                uri = %request.uri(),
                "Request started"
            );
        })
        .on_response(
            |response: &Response<Body>, latency: Duration, _span: &Span| {
                tracing::info!(
                    status = response.status().as_u16(),
                    latency_ms = latency.as_millis(),
                    "Request completed"
                );
            },
        );

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(trace_layer)
        .layer(CorsLayer::permissive())
        .with_state(state)
}
