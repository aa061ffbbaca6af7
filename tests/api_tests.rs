use axum_test::TestServer;
use cookie::Cookie;
use serde_json::{json, Value};
use sprintboard::{create_router, state::AppState, test_utils};

async fn setup_server() -> TestServer {
    let state = test_utils::create_test_state().await;
    let app = create_router(state);
    TestServer::new(app).unwrap()
}

#[allow(dead_code)]
async fn setup_server_with_state() -> (TestServer, AppState) {
    let state = test_utils::create_test_state().await;
    let app = create_router(state.clone());
    (TestServer::new(app).unwrap(), state)
}

async fn register_and_login_as(server: &TestServer, email: &str) -> String {
    server
        .post("/api/auth/register")
        .json(&json!({
            "email": email,
            "password": "testpassword123",
            "name": "Test User"
        }))
        .await;

    let login_response = server
        .post("/api/auth/login")
        .json(&json!({
            "email": email,
            "password": "testpassword123"
        }))
        .await;

    login_response.cookie("session").value().to_string()
}

async fn register_and_login(server: &TestServer) -> String {
    let email = format!("test_{}@example.com", uuid::Uuid::new_v4());
    register_and_login_as(server, &email).await
}

fn session_cookie(token: &str) -> Cookie<'static> {
    Cookie::new("session", token.to_string())
}

fn id_of(value: &Value) -> String {
    value["id"].as_str().unwrap().to_string()
}

async fn create_board(server: &TestServer, session: &str) -> String {
    let response = server
        .post("/api/boards")
        .add_cookie(session_cookie(session))
        .json(&json!({"name": "Test Board"}))
        .await;
    response.json::<Value>()["board"]["id"]
        .as_str()
        .unwrap()
        .to_string()
}

/// Board with one sprint and one list; returns (board_id, list_id).
async fn create_board_and_list(server: &TestServer, session: &str) -> (String, String) {
    let board_id = create_board(server, session).await;

    let sprint = server
        .post(&format!("/api/boards/{}/sprints", board_id))
        .add_cookie(session_cookie(session))
        .json(&json!({"name": "Sprint 1"}))
        .await;
    let sprint_id = id_of(&sprint.json());

    let list = server
        .post(&format!("/api/sprints/{}/lists", sprint_id))
        .add_cookie(session_cookie(session))
        .json(&json!({"name": "Todo"}))
        .await;

    (board_id, id_of(&list.json()))
}

async fn create_card(server: &TestServer, session: &str, list_id: &str, name: &str) -> String {
    let response = server
        .post(&format!("/api/lists/{}/cards", list_id))
        .add_cookie(session_cookie(session))
        .json(&json!({"name": name}))
        .await;
    response.assert_status_ok();
    id_of(&response.json())
}

// ============================================================================
// Auth Tests
// ============================================================================

mod auth_tests {
    use super::*;

    #[tokio::test]
    async fn test_register_success() {
        let server = setup_server().await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "email": "newuser@example.com",
                "password": "securepassword123",
                "name": "New User"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert!(body["user"]["id"].is_string());
        assert_eq!(body["user"]["email"], "newuser@example.com");
        assert!(body["user"].get("password_hash").is_none());
    }

    #[tokio::test]
    async fn test_register_short_password() {
        let server = setup_server().await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "email": "user@example.com",
                "password": "short",
                "name": "User"
            }))
            .await;

        response.assert_status_unprocessable_entity();
    }

    #[tokio::test]
    async fn test_register_duplicate_email() {
        let server = setup_server().await;
        register_and_login_as(&server, "duplicate@example.com").await;

        let response = server
            .post("/api/auth/register")
            .json(&json!({
                "email": "duplicate@example.com",
                "password": "password456",
                "name": "Second User"
            }))
            .await;

        response.assert_status_bad_request();
        assert_eq!(response.json::<Value>()["success"], false);
    }

    #[tokio::test]
    async fn test_login_invalid_password() {
        let server = setup_server().await;
        register_and_login_as(&server, "loginbad@example.com").await;

        let response = server
            .post("/api/auth/login")
            .json(&json!({
                "email": "loginbad@example.com",
                "password": "wrongpassword"
            }))
            .await;

        response.assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_me_and_logout() {
        let server = setup_server().await;
        let session = register_and_login_as(&server, "me@example.com").await;

        let me = server
            .get("/api/auth/me")
            .add_cookie(session_cookie(&session))
            .await;
        me.assert_status_ok();
        assert_eq!(me.json::<Value>()["email"], "me@example.com");

        server
            .post("/api/auth/logout")
            .add_cookie(session_cookie(&session))
            .await
            .assert_status_ok();

        server
            .get("/api/auth/me")
            .add_cookie(session_cookie(&session))
            .await
            .assert_status_unauthorized();
    }

    #[tokio::test]
    async fn test_missing_session_is_unauthorized() {
        let server = setup_server().await;
        server.get("/api/boards").await.assert_status_unauthorized();
    }
}

// ============================================================================
// Board Tests
// ============================================================================

mod board_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_board() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        let response = server
            .post("/api/boards")
            .add_cookie(session_cookie(&session))
            .json(&json!({
                "name": "Test Board",
                "description": "A test board"
            }))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["board"]["name"], "Test Board");
        assert_eq!(body["chat"]["name"], "board");
        assert_eq!(body["roles"].as_array().unwrap().len(), 3);
    }

    #[tokio::test]
    async fn test_create_board_empty_name() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        let response = server
            .post("/api/boards")
            .add_cookie(session_cookie(&session))
            .json(&json!({"name": ""}))
            .await;

        response.assert_status_unprocessable_entity();
    }

    #[tokio::test]
    async fn test_list_boards() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        create_board(&server, &session).await;
        create_board(&server, &session).await;

        let response = server
            .get("/api/boards")
            .add_cookie(session_cookie(&session))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body.as_array().unwrap().len(), 2);
        assert_eq!(body[0]["chat"]["name"], "board");
    }

    #[tokio::test]
    async fn test_get_board_aggregate() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let (board_id, list_id) = create_board_and_list(&server, &session).await;
        create_card(&server, &session, &list_id, "First").await;

        let response = server
            .get(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&session))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["id"], board_id);
        assert_eq!(body["sprints"][0]["lists"][0]["cards"][0]["name"], "First");
        assert_eq!(body["users"].as_array().unwrap().len(), 1);
        assert!(body["chat"]["messages"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_get_board_not_member() {
        let server = setup_server().await;
        let owner = register_and_login(&server).await;
        let stranger = register_and_login(&server).await;
        let board_id = create_board(&server, &owner).await;

        server
            .get(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&stranger))
            .await
            .assert_status_forbidden();

        server
            .get(&format!("/api/boards/{}", uuid::Uuid::new_v4()))
            .add_cookie(session_cookie(&owner))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_update_board() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session).await;

        let response = server
            .put(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({"name": "Updated Board"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Board updated successfully");
        assert_eq!(body["data"]["name"], "Updated Board");
    }

    #[tokio::test]
    async fn test_update_board_by_member_is_forbidden() {
        let server = setup_server().await;
        let owner = register_and_login(&server).await;
        let member = register_and_login_as(&server, "member@example.com").await;
        let board_id = create_board(&server, &owner).await;

        server
            .post(&format!("/api/boards/{}/users", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"email": "member@example.com"}))
            .await
            .assert_status_ok();

        let response = server
            .put(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&member))
            .json(&json!({"name": "Mine now"}))
            .await;

        response.assert_status_forbidden();
        let body: Value = response.json();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Only creator can update board");

        server
            .delete(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&member))
            .await
            .assert_status_forbidden();
    }

    #[tokio::test]
    async fn test_delete_board() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session).await;

        let response = server
            .delete(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&session))
            .await;
        response.assert_status_ok();
        assert_eq!(
            response.json::<Value>()["message"],
            "Board deleted successfully"
        );

        server
            .get(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_add_user_twice_conflicts() {
        let server = setup_server().await;
        let owner = register_and_login(&server).await;
        register_and_login_as(&server, "dev@example.com").await;
        let board_id = create_board(&server, &owner).await;

        let response = server
            .post(&format!("/api/boards/{}/users", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"email": "dev@example.com"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["user"]["email"], "dev@example.com");

        server
            .post(&format!("/api/boards/{}/users", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"email": "dev@example.com"}))
            .await
            .assert_status(axum::http::StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_assign_role() {
        let server = setup_server().await;
        let owner = register_and_login(&server).await;
        register_and_login_as(&server, "sm@example.com").await;
        let board_id = create_board(&server, &owner).await;

        server
            .post(&format!("/api/boards/{}/users", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"email": "sm@example.com"}))
            .await
            .assert_status_ok();

        let response = server
            .post(&format!("/api/boards/{}/roles", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"role": "scrum_master", "email": "sm@example.com"}))
            .await;

        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["name"], "scrum_master");
        assert_eq!(body["users"][0]["email"], "sm@example.com");
    }
}

// ============================================================================
// Sprint and List Tests
// ============================================================================

mod sprint_list_tests {
    use super::*;

    #[tokio::test]
    async fn test_lists_are_numbered_in_creation_order() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session).await;

        let sprint = server
            .post(&format!("/api/boards/{}/sprints", board_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({"name": "Sprint 1"}))
            .await;
        sprint.assert_status_ok();
        let sprint_id = id_of(&sprint.json());

        for name in ["Todo", "Doing", "Done"] {
            server
                .post(&format!("/api/sprints/{}/lists", sprint_id))
                .add_cookie(session_cookie(&session))
                .json(&json!({"name": name}))
                .await
                .assert_status_ok();
        }

        let response = server
            .get(&format!("/api/sprints/{}/lists", sprint_id))
            .add_cookie(session_cookie(&session))
            .await;
        response.assert_status_ok();

        let lists: Vec<Value> = response.json();
        let orders: Vec<i64> = lists.iter().map(|l| l["order"].as_i64().unwrap()).collect();
        assert_eq!(orders, vec![1, 2, 3]);
        assert_eq!(lists[2]["name"], "Done");
    }

    #[tokio::test]
    async fn test_sprint_update_and_delete() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session).await;

        let sprint = server
            .post(&format!("/api/boards/{}/sprints", board_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({"name": "Sprint 1"}))
            .await;
        let sprint_id = id_of(&sprint.json());

        let response = server
            .put(&format!("/api/sprints/{}", sprint_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({"name": "Sprint One"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["name"], "Sprint One");

        server
            .delete(&format!("/api/sprints/{}", sprint_id))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);

        let sprints: Vec<Value> = server
            .get(&format!("/api/boards/{}/sprints", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert!(sprints.is_empty());
    }

    #[tokio::test]
    async fn test_stranger_cannot_add_sprint() {
        let server = setup_server().await;
        let owner = register_and_login(&server).await;
        let stranger = register_and_login(&server).await;
        let board_id = create_board(&server, &owner).await;

        server
            .post(&format!("/api/boards/{}/sprints", board_id))
            .add_cookie(session_cookie(&stranger))
            .json(&json!({"name": "Sneaky"}))
            .await
            .assert_status_forbidden();
    }
}

// ============================================================================
// Card Tests
// ============================================================================

mod card_tests {
    use super::*;

    #[tokio::test]
    async fn test_create_and_list_cards() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let (_, list_id) = create_board_and_list(&server, &session).await;

        let response = server
            .post(&format!("/api/lists/{}/cards", list_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({
                "name": "Write docs",
                "description": "Everything",
                "due_date": "2030-01-15"
            }))
            .await;
        response.assert_status_ok();
        let body: Value = response.json();
        assert_eq!(body["order"], 1);
        assert_eq!(body["due_date"], "2030-01-15");
        assert!(body["users"].as_array().unwrap().is_empty());

        create_card(&server, &session, &list_id, "Second").await;

        let cards: Vec<Value> = server
            .get(&format!("/api/lists/{}/cards", list_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert_eq!(cards.len(), 2);
        assert_eq!(cards[1]["name"], "Second");
        assert_eq!(cards[1]["order"], 2);
    }

    #[tokio::test]
    async fn test_create_card_unknown_list() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;

        server
            .post(&format!("/api/lists/{}/cards", uuid::Uuid::new_v4()))
            .add_cookie(session_cookie(&session))
            .json(&json!({"name": "Lost"}))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_get_and_update_card() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let (_, list_id) = create_board_and_list(&server, &session).await;
        let card_id = create_card(&server, &session, &list_id, "Draft").await;

        let response = server
            .put(&format!("/api/cards/{}", card_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({"description": "Now with details"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["name"], "Draft");

        let response = server
            .get(&format!("/api/cards/{}", card_id))
            .add_cookie(session_cookie(&session))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["description"], "Now with details");

        server
            .get(&format!("/api/cards/{}", uuid::Uuid::new_v4()))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_copy_card() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let (_, list_id) = create_board_and_list(&server, &session).await;
        create_card(&server, &session, &list_id, "A").await;
        let b = create_card(&server, &session, &list_id, "B").await;
        create_card(&server, &session, &list_id, "C").await;

        let response = server
            .post(&format!("/api/cards/{}/copy", b))
            .add_cookie(session_cookie(&session))
            .json(&json!({"list_id": list_id}))
            .await;
        response.assert_status_ok();
        let copy: Value = response.json();
        assert_eq!(copy["name"], "B - copy");
        assert_eq!(copy["order"], 3);

        let cards: Vec<Value> = server
            .get(&format!("/api/lists/{}/cards", list_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        let names: Vec<&str> = cards.iter().map(|c| c["name"].as_str().unwrap()).collect();
        assert_eq!(names, vec!["A", "B", "B - copy", "C"]);
        assert_eq!(cards[3]["order"], 4);
    }

    #[tokio::test]
    async fn test_update_order() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let (_, list_id) = create_board_and_list(&server, &session).await;
        let a = create_card(&server, &session, &list_id, "A").await;
        let b = create_card(&server, &session, &list_id, "B").await;

        let response = server
            .put("/api/cards/order")
            .add_cookie(session_cookie(&session))
            .json(&json!([
                {"id": a, "order": 2, "list_id": list_id},
                {"id": b, "order": 1, "list_id": list_id}
            ]))
            .await;
        response.assert_status_ok();

        let cards: Vec<Value> = server
            .get(&format!("/api/lists/{}/cards", list_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert_eq!(cards[0]["id"], b);
        assert_eq!(cards[1]["id"], a);
    }

    #[tokio::test]
    async fn test_delete_card_rules() {
        let server = setup_server().await;
        let owner = register_and_login(&server).await;
        let member = register_and_login_as(&server, "member@example.com").await;
        let (board_id, list_id) = create_board_and_list(&server, &owner).await;
        let card_id = create_card(&server, &owner, &list_id, "Keep me").await;

        server
            .post(&format!("/api/boards/{}/users", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"email": "member@example.com"}))
            .await
            .assert_status_ok();

        server
            .delete(&format!("/api/cards/{}", card_id))
            .add_cookie(session_cookie(&member))
            .await
            .assert_status_forbidden();

        let response = server
            .delete(&format!("/api/cards/{}", card_id))
            .add_cookie(session_cookie(&owner))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["id"], card_id);

        server
            .delete(&format!("/api/cards/{}", card_id))
            .add_cookie(session_cookie(&owner))
            .await
            .assert_status_not_found();
    }

    #[tokio::test]
    async fn test_add_user_to_card() {
        let server = setup_server().await;
        let owner = register_and_login(&server).await;
        let dev = register_and_login_as(&server, "dev@example.com").await;
        let (board_id, list_id) = create_board_and_list(&server, &owner).await;
        let card_id = create_card(&server, &owner, &list_id, "Pair on this").await;

        let response = server
            .post(&format!("/api/boards/{}/cards/{}/users", board_id, card_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"email": "dev@example.com"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["users"][0]["email"], "dev@example.com");

        // Assignment also grants board membership.
        server
            .get(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&dev))
            .await
            .assert_status_ok();

        let response = server
            .post(&format!("/api/boards/{}/cards/{}/users", board_id, card_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"email": "dev@example.com"}))
            .await;
        response.assert_status(axum::http::StatusCode::CONFLICT);
        assert_eq!(
            response.json::<Value>()["message"],
            "User already has this card"
        );
    }

    #[tokio::test]
    async fn test_my_cards() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let other = register_and_login(&server).await;
        let (_, list_id) = create_board_and_list(&server, &session).await;
        create_card(&server, &session, &list_id, "Mine").await;

        let mine: Vec<Value> = server
            .get("/api/cards")
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert_eq!(mine.len(), 1);

        let theirs: Vec<Value> = server
            .get("/api/cards")
            .add_cookie(session_cookie(&other))
            .await
            .json();
        assert!(theirs.is_empty());
    }
}

// ============================================================================
// Subtask, Comment and Chat Tests
// ============================================================================

mod collaboration_tests {
    use super::*;

    #[tokio::test]
    async fn test_subtask_lifecycle() {
        let server = setup_server().await;
        let session = register_and_login_as(&server, "owner@example.com").await;
        let (_, list_id) = create_board_and_list(&server, &session).await;
        let card_id = create_card(&server, &session, &list_id, "Parent").await;

        let response = server
            .post(&format!("/api/cards/{}/subtasks", card_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({"name": "Step one"}))
            .await;
        response.assert_status_ok();
        let subtask: Value = response.json();
        assert_eq!(subtask["is_completed"], false);
        let subtask_id = id_of(&subtask);

        let response = server
            .put(&format!("/api/subtasks/{}", subtask_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({"is_completed": true}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>()["is_completed"], true);

        let response = server
            .post(&format!("/api/subtasks/{}/users", subtask_id))
            .add_cookie(session_cookie(&session))
            .json(&json!({"email": "owner@example.com"}))
            .await;
        response.assert_status_ok();
        assert_eq!(response.json::<Value>().as_array().unwrap().len(), 1);

        server
            .delete(&format!("/api/subtasks/{}", subtask_id))
            .add_cookie(session_cookie(&session))
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);

        let subtasks: Vec<Value> = server
            .get(&format!("/api/cards/{}/subtasks", card_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert!(subtasks.is_empty());
    }

    #[tokio::test]
    async fn test_comment_delete_is_author_only() {
        let server = setup_server().await;
        let owner = register_and_login(&server).await;
        let member = register_and_login_as(&server, "member@example.com").await;
        let (board_id, list_id) = create_board_and_list(&server, &owner).await;
        let card_id = create_card(&server, &owner, &list_id, "Discuss").await;

        server
            .post(&format!("/api/boards/{}/users", board_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"email": "member@example.com"}))
            .await
            .assert_status_ok();

        let response = server
            .post(&format!("/api/cards/{}/comments", card_id))
            .add_cookie(session_cookie(&member))
            .json(&json!({"body": "Looks good"}))
            .await;
        response.assert_status_ok();
        let comment: Value = response.json();
        assert_eq!(comment["user"]["email"], "member@example.com");
        let comment_id = id_of(&comment);

        server
            .delete(&format!("/api/comments/{}", comment_id))
            .add_cookie(session_cookie(&owner))
            .await
            .assert_status_forbidden();

        server
            .delete(&format!("/api/comments/{}", comment_id))
            .add_cookie(session_cookie(&member))
            .await
            .assert_status(axum::http::StatusCode::NO_CONTENT);
    }

    #[tokio::test]
    async fn test_board_chat() {
        let server = setup_server().await;
        let session = register_and_login(&server).await;
        let board_id = create_board(&server, &session).await;

        for body in ["hello", "world"] {
            server
                .post(&format!("/api/boards/{}/chat", board_id))
                .add_cookie(session_cookie(&session))
                .json(&json!({"body": body}))
                .await
                .assert_status_ok();
        }

        let messages: Vec<Value> = server
            .get(&format!("/api/boards/{}/chat", board_id))
            .add_cookie(session_cookie(&session))
            .await
            .json();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0]["body"], "hello");
        assert_eq!(messages[1]["body"], "world");
    }
}

// ============================================================================
// End-to-end Tests
// ============================================================================

mod e2e_tests {
    use super::*;

    #[tokio::test]
    async fn test_full_sprint_workflow() {
        let (server, state) = setup_server_with_state().await;
        let owner = register_and_login_as(&server, "lead@example.com").await;
        register_and_login_as(&server, "dev@example.com").await;

        let (board_id, todo_id) = create_board_and_list(&server, &owner).await;
        let sprint_id = state
            .lists
            .get_by_id(todo_id.parse().unwrap())
            .await
            .unwrap()
            .sprint_id;

        let done = server
            .post(&format!("/api/sprints/{}/lists", sprint_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"name": "Done"}))
            .await;
        let done_id = id_of(&done.json());

        let card_id = create_card(&server, &owner, &todo_id, "Ship it").await;

        server
            .post(&format!("/api/boards/{}/cards/{}/users", board_id, card_id))
            .add_cookie(session_cookie(&owner))
            .json(&json!({"email": "dev@example.com"}))
            .await
            .assert_status_ok();

        server
            .put("/api/cards/order")
            .add_cookie(session_cookie(&owner))
            .json(&json!([{"id": card_id, "order": 1, "list_id": done_id}]))
            .await
            .assert_status_ok();

        let board: Value = server
            .get(&format!("/api/boards/{}", board_id))
            .add_cookie(session_cookie(&owner))
            .await
            .json();

        let lists = board["sprints"][0]["lists"].as_array().unwrap();
        assert_eq!(lists.len(), 2);
        assert!(lists[0]["cards"].as_array().unwrap().is_empty());
        assert_eq!(lists[1]["cards"][0]["id"], card_id);
        assert_eq!(lists[1]["cards"][0]["users"][0]["email"], "dev@example.com");
        assert_eq!(lists[1]["cards"][0]["creator"]["email"], "lead@example.com");
        assert_eq!(board["users"].as_array().unwrap().len(), 2);
    }
}
