//! Application router configuration with protected and unprotected route definitions.

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware,
    response::Redirect,
    routing::{get, post, put},
};
use tower_http::services::ServeDir;

use crate::{
    AppState,
    auth::{
        auth_guard, auth_guard_hx, get_log_in_page, get_log_out, get_sign_up_page, post_log_in,
        post_sign_up,
    },
    endpoints,
    favorite::{
        close_folder_picker, get_favorite_folder_page, get_favorite_widget, get_favorites_page,
        select_folder, submit_folder, toggle_favorite,
    },
    internal_server_error::get_internal_server_error_page,
    item::{
        create_item, get_edit_item_page, get_item_image, get_item_page, get_items_page,
        get_sell_page, get_user_items_page, purchase_item, update_item,
    },
    not_found::get_404_not_found,
};

/// The largest listing form, image included, that the server will accept.
pub(crate) const MAX_LISTING_FORM_BYTES: usize = 10 * 1024 * 1024;

/// Return a router with all the app's routes.
pub fn build_router(state: AppState) -> Router {
    let unprotected_routes = Router::new()
        .route(endpoints::LOG_IN_VIEW, get(get_log_in_page))
        .route(endpoints::LOG_IN_API, post(post_log_in))
        .route(endpoints::LOG_OUT, get(get_log_out))
        .route(endpoints::SIGN_UP_VIEW, get(get_sign_up_page))
        .route(endpoints::USERS, post(post_sign_up))
        .route(
            endpoints::INTERNAL_ERROR_VIEW,
            get(get_internal_server_error_page),
        );

    let protected_routes = Router::new()
        .route(endpoints::ROOT, get(get_index_page))
        .route(endpoints::ITEMS_VIEW, get(get_items_page))
        .route(endpoints::ITEM_VIEW, get(get_item_page))
        .route(endpoints::EDIT_ITEM_VIEW, get(get_edit_item_page))
        .route(endpoints::ITEM_IMAGE, get(get_item_image))
        .route(endpoints::SELL_VIEW, get(get_sell_page))
        .route(endpoints::USER_ITEMS_VIEW, get(get_user_items_page))
        .route(endpoints::FAVORITES_VIEW, get(get_favorites_page))
        .route(
            endpoints::FAVORITE_FOLDER_VIEW,
            get(get_favorite_folder_page),
        )
        .layer(middleware::from_fn_with_state(state.clone(), auth_guard));

    // These routes are requested by HTMX and need the HX-REDIRECT header for auth redirects to work.
    let protected_routes = protected_routes.merge(
        Router::new()
            .route(endpoints::ITEMS_API, post(create_item))
            .route(endpoints::ITEM_API, put(update_item))
            .layer(DefaultBodyLimit::max(MAX_LISTING_FORM_BYTES))
            .route(endpoints::PURCHASE_ITEM, post(purchase_item))
            .route(endpoints::FAVORITE_WIDGET, get(get_favorite_widget))
            .route(endpoints::FAVORITE_TOGGLE, post(toggle_favorite))
            .route(endpoints::FAVORITE_SELECT, post(select_folder))
            .route(endpoints::FAVORITE_SUBMIT, post(submit_folder))
            .route(endpoints::FAVORITE_CLOSE, post(close_folder_picker))
            .layer(middleware::from_fn_with_state(state.clone(), auth_guard_hx)),
    );

    protected_routes
        .merge(unprotected_routes)
        .nest_service(endpoints::STATIC, ServeDir::new("static/"))
        .fallback(get_404_not_found)
        .with_state(state)
}

/// The root path '/' redirects to the home page.
async fn get_index_page() -> Redirect {
    Redirect::to(endpoints::ITEMS_VIEW)
}

#[cfg(test)]
mod router_tests {
    use axum::{
        Json, Router,
        http::StatusCode,
        response::IntoResponse,
        routing::{get, post},
    };
    use axum_test::{TestResponse, TestServer};
    use serde_json::json;
    use time::Duration;

    use crate::{
        AppState, DEFAULT_COOKIE_DURATION,
        auth::COOKIE_SESSION,
        endpoints,
        routing::{build_router, get_index_page},
        test_utils::FakeApi,
    };

    fn get_test_server(api: &FakeApi) -> TestServer {
        let state = AppState::with_api("foobar", api.client().clone(), DEFAULT_COOKIE_DURATION);
        let app = build_router(state);

        TestServer::try_new(app).expect("Could not create test server.")
    }

    async fn log_in(server: &TestServer) -> TestResponse {
        let response = server
            .post(endpoints::LOG_IN_API)
            .form(&[("user_id", "7"), ("password", "hunter2")])
            .await;

        response.assert_status(StatusCode::SEE_OTHER);
        response
    }

    fn fake_marketplace() -> Router {
        Router::new()
            .route(
                "/login",
                post(|| async {
                    Json(json!({"id": 7, "name": "alice", "token": "token"}))
                }),
            )
            .route(
                "/items",
                get(|| async {
                    Json(json!([
                        {"id": 1, "name": "Jacket", "price": 1200, "category_name": "fashion"}
                    ]))
                }),
            )
            .route(
                "/favorite/check/{item_id}",
                get(|| async { StatusCode::UNAUTHORIZED }),
            )
    }

    #[tokio::test]
    async fn root_redirects_to_home_page() {
        let response = get_index_page().await.into_response();
        assert_eq!(response.status(), StatusCode::SEE_OTHER);

        let location = response.headers().get("location").unwrap();
        assert_eq!(location, endpoints::ITEMS_VIEW);
    }

    #[tokio::test]
    async fn pages_need_a_session() {
        let api = FakeApi::start(fake_marketplace()).await;
        let server = get_test_server(&api);

        let response = server.get(endpoints::ITEMS_VIEW).await;

        response.assert_status(StatusCode::SEE_OTHER);
        assert!(
            response
                .header("location")
                .to_str()
                .unwrap()
                .starts_with(endpoints::LOG_IN_VIEW)
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn htmx_endpoints_need_a_session() {
        let api = FakeApi::start(fake_marketplace()).await;
        let server = get_test_server(&api);

        let response = server.get("/api/favorites/1").await;

        response.assert_status_ok();
        assert!(
            response
                .header("hx-redirect")
                .to_str()
                .unwrap()
                .starts_with(endpoints::LOG_IN_VIEW)
        );
        assert!(api.calls().is_empty());
    }

    #[tokio::test]
    async fn logged_in_user_sees_home_page() {
        let api = FakeApi::start(fake_marketplace()).await;
        let server = get_test_server(&api);
        let cookies = log_in(&server).await.cookies();

        let response = server.get(endpoints::ITEMS_VIEW).add_cookies(cookies).await;

        response.assert_status_ok();
        assert!(response.text().contains("Jacket"));
    }

    #[tokio::test]
    async fn rejected_token_logs_the_user_out() {
        let api = FakeApi::start(fake_marketplace()).await;
        let server = get_test_server(&api);
        let cookies = log_in(&server).await.cookies();

        let response = server.get("/api/favorites/1").add_cookies(cookies).await;

        response.assert_status(StatusCode::UNAUTHORIZED);
        assert_eq!(response.header("hx-redirect"), endpoints::LOG_IN_VIEW);
        assert_eq!(
            response.cookie(COOKIE_SESSION).max_age(),
            Some(Duration::ZERO)
        );
    }

    #[tokio::test]
    async fn unknown_route_renders_not_found() {
        let api = FakeApi::start(fake_marketplace()).await;
        let server = get_test_server(&api);

        let response = server.get("/does/not/exist").await;

        response.assert_status_not_found();
    }
}
