pub mod auth;
pub mod config;
pub mod error;
pub mod handlers;
pub mod models;
pub mod repo;
pub mod services;
pub mod state;

use axum::{
    http::{header, HeaderValue, Method},
    routing::{delete, get, post, put},
    Router,
};
use tower::ServiceBuilder;
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use config::Config;
use state::AppState;

pub fn create_router(state: AppState) -> Router {
    create_router_with(&Config::default(), state)
}

pub fn create_router_with(config: &Config, state: AppState) -> Router {
    let api_routes = Router::new()
        // Auth routes
        .route("/auth/register", post(handlers::auth::register))
        .route("/auth/login", post(handlers::auth::login))
        .route("/auth/logout", post(handlers::auth::logout))
        .route("/auth/me", get(handlers::auth::me))
        // Board routes
        .route("/boards", post(handlers::boards::create_board))
        .route("/boards", get(handlers::boards::list_boards))
        .route("/boards/{board_id}", get(handlers::boards::get_board))
        .route("/boards/{board_id}", put(handlers::boards::update_board))
        .route("/boards/{board_id}", delete(handlers::boards::delete_board))
        .route("/boards/{board_id}/users", post(handlers::boards::add_user))
        .route(
            "/boards/{board_id}/roles",
            post(handlers::boards::assign_role),
        )
        .route(
            "/boards/{board_id}/cards/{card_id}/users",
            post(handlers::cards::add_user_to_card),
        )
        // Sprint routes
        .route(
            "/boards/{board_id}/sprints",
            post(handlers::sprints::create_sprint).get(handlers::sprints::list_sprints),
        )
        .route(
            "/sprints/{sprint_id}",
            put(handlers::sprints::update_sprint).delete(handlers::sprints::delete_sprint),
        )
        // List routes
        .route(
            "/sprints/{sprint_id}/lists",
            post(handlers::lists::create_list).get(handlers::lists::list_lists),
        )
        .route(
            "/lists/{list_id}",
            put(handlers::lists::update_list).delete(handlers::lists::delete_list),
        )
        // Card routes
        .route(
            "/lists/{list_id}/cards",
            post(handlers::cards::create_card).get(handlers::cards::list_cards),
        )
        .route("/cards", get(handlers::cards::my_cards))
        .route("/cards/order", put(handlers::cards::update_order))
        .route("/cards/{card_id}", get(handlers::cards::get_card))
        .route("/cards/{card_id}", put(handlers::cards::update_card))
        .route("/cards/{card_id}", delete(handlers::cards::delete_card))
        .route("/cards/{card_id}/copy", post(handlers::cards::copy_card))
        // Subtask routes
        .route(
            "/cards/{card_id}/subtasks",
            post(handlers::subtasks::create_subtask).get(handlers::subtasks::list_subtasks),
        )
        .route(
            "/subtasks/{subtask_id}",
            put(handlers::subtasks::update_subtask).delete(handlers::subtasks::delete_subtask),
        )
        .route(
            "/subtasks/{subtask_id}/users",
            post(handlers::subtasks::add_user),
        )
        // Comment routes
        .route(
            "/cards/{card_id}/comments",
            post(handlers::comments::comment_on_card),
        )
        .route(
            "/subtasks/{subtask_id}/comments",
            post(handlers::comments::comment_on_subtask),
        )
        .route(
            "/comments/{comment_id}",
            delete(handlers::comments::delete_comment),
        )
        // Chat routes
        .route(
            "/boards/{board_id}/chat",
            post(handlers::chat::send_message).get(handlers::chat::list_messages),
        );

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(
            config
                .cors_origins
                .iter()
                .filter_map(|origin| origin.parse::<HeaderValue>().ok()),
        ))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true);

    Router::new()
        .nest("/api", api_routes)
        .nest_service("/static/uploads", ServeDir::new(&config.uploads_dir))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}

pub mod test_utils {
    use crate::auth::hash_password;
    use crate::state::AppState;
    use sqlx::sqlite::SqlitePoolOptions;
    use sqlx::SqlitePool;
    use uuid::Uuid;

    pub async fn create_test_pool() -> SqlitePool {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await
            .expect("Failed to create test pool");

        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    pub async fn create_test_state() -> AppState {
        let pool = create_test_pool().await;
        AppState::new(pool)
    }

    pub async fn create_test_user(state: &AppState, email: &str, name: &str) -> Uuid {
        let id = Uuid::new_v4();
        let password_hash = hash_password("testpassword123").unwrap();
        state
            .users
            .create(id, email, &password_hash, name)
            .await
            .unwrap();
        id
    }

    pub async fn create_test_session(state: &AppState, user_id: Uuid) -> String {
        let token = format!("test_token_{}", Uuid::new_v4());
        state.sessions.create(user_id, &token).await.unwrap();
        token
    }
}
