mod common;

use axum::http::StatusCode;
use common::{option_ids, spawn_app, spawn_app_with, test_config};
use serde_json::json;

#[tokio::test]
async fn test_corn_pie_and_chicken_rice_menu() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let corn_pie = app.create_option(&staff, "Corn pie").await;
    let chicken_rice = app.create_option(&staff, "Chicken Rice").await;

    let (status, created) = app
        .post(
            "/api/menus",
            Some(&staff),
            json!({ "date": "2020-11-16", "options": [corn_pie, chicken_rice] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "Today's menu");
    assert_eq!(created["date"], "2020-11-16");

    let id = created["id"].as_i64().unwrap();
    let (status, detail) = app.get(&format!("/api/menus/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);

    let mut descriptions: Vec<&str> = detail["options"]
        .as_array()
        .unwrap()
        .iter()
        .map(|o| o["description"].as_str().unwrap())
        .collect();
    descriptions.sort_unstable();
    assert_eq!(descriptions, vec!["Chicken Rice", "Corn pie"]);
}

#[tokio::test]
async fn test_list_and_detail_shapes_agree() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let a = app.create_option(&staff, "Beans").await;
    let b = app.create_option(&staff, "Rice").await;
    let id = app.create_menu(&staff, "2020-11-16", &[b, a]).await;

    let (_, list) = app.get("/api/menus", None).await;
    let listed = &list[0];
    assert!(listed["options"][0].is_number());

    let (_, detail) = app.get(&format!("/api/menus/{id}"), None).await;
    assert!(detail["options"][0].is_object());

    assert_eq!(option_ids(listed), option_ids(&detail));
    assert_eq!(option_ids(&detail), {
        let mut ids = vec![a, b];
        ids.sort_unstable();
        ids
    });
}

#[tokio::test]
async fn test_menus_listed_newest_date_first() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    for date in ["2020-11-17", "2020-11-19", "2020-11-16", "2020-11-18"] {
        app.create_menu(&staff, date, &[]).await;
    }

    let (status, list) = app.get("/api/menus", None).await;
    assert_eq!(status, StatusCode::OK);

    let dates: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["date"].as_str().unwrap())
        .collect();
    assert_eq!(
        dates,
        vec!["2020-11-19", "2020-11-18", "2020-11-17", "2020-11-16"]
    );
}

#[tokio::test]
async fn test_filter_menus_by_option() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let soup = app.create_option(&staff, "Soup").await;
    let salad = app.create_option(&staff, "Salad").await;
    let pasta = app.create_option(&staff, "Pasta").await;

    let m1 = app.create_menu(&staff, "2020-11-16", &[soup, salad]).await;
    let m2 = app.create_menu(&staff, "2020-11-17", &[salad]).await;
    app.create_menu(&staff, "2020-11-18", &[pasta]).await;

    let (status, list) = app
        .get(&format!("/api/menus?options={soup},{salad}"), None)
        .await;
    assert_eq!(status, StatusCode::OK);

    let ids: Vec<i64> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["id"].as_i64().unwrap())
        .collect();
    assert_eq!(ids, vec![m2, m1]);
}

#[tokio::test]
async fn test_malformed_option_filter_rejected() {
    let app = spawn_app().await;

    for query in ["options=abc", "options=1,,2", "options=1,x"] {
        let (status, body) = app.get(&format!("/api/menus?{query}"), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{query}");
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn test_patch_replaces_option_set() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let a = app.create_option(&staff, "A").await;
    let b = app.create_option(&staff, "B").await;
    let c = app.create_option(&staff, "C").await;
    let id = app.create_menu(&staff, "2020-11-16", &[a, b]).await;

    let (status, patched) = app
        .request(
            "PATCH",
            &format!("/api/menus/{id}"),
            Some(&staff),
            Some(json!({ "options": [c] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(option_ids(&patched), vec![c]);
    assert_eq!(patched["date"], "2020-11-16");

    let (_, detail) = app.get(&format!("/api/menus/{id}"), None).await;
    assert_eq!(option_ids(&detail), vec![c]);
}

#[tokio::test]
async fn test_patch_without_options_keeps_them() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let a = app.create_option(&staff, "A").await;
    let id = app.create_menu(&staff, "2020-11-16", &[a]).await;

    let (status, patched) = app
        .request(
            "PATCH",
            &format!("/api/menus/{id}"),
            Some(&staff),
            Some(json!({ "name": "Friday special" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(patched["name"], "Friday special");
    assert_eq!(option_ids(&patched), vec![a]);
}

#[tokio::test]
async fn test_put_with_empty_options_clears_them() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let a = app.create_option(&staff, "A").await;
    let id = app.create_menu(&staff, "2020-11-16", &[a]).await;

    let (status, replaced) = app
        .request(
            "PUT",
            &format!("/api/menus/{id}"),
            Some(&staff),
            Some(json!({ "date": "2020-11-16", "options": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(replaced["options"], json!([]));
    assert_eq!(replaced["name"], "Today's menu");

    let (_, detail) = app.get(&format!("/api/menus/{id}"), None).await;
    assert_eq!(detail["options"], json!([]));

    // The option itself survives
    let (status, _) = app.get(&format!("/api/options/{a}"), Some(&staff)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_put_requires_date_and_options() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;
    let id = app.create_menu(&staff, "2020-11-16", &[]).await;

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/menus/{id}"),
            Some(&staff),
            Some(json!({ "options": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/menus/{id}"),
            Some(&staff),
            Some(json!({ "date": "2020-11-16" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_create_requires_date() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let (status, body) = app
        .post("/api/menus", Some(&staff), json!({ "options": [] }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("date"));

    let (status, _) = app
        .post("/api/menus", Some(&staff), json!({ "date": "not-a-date" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_option_ids_create_nothing() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;
    let a = app.create_option(&staff, "A").await;

    let (status, body) = app
        .post(
            "/api/menus",
            Some(&staff),
            json!({ "date": "2020-11-16", "options": [a, 4242] }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("4242"));

    let (_, list) = app.get("/api/menus", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_duplicate_option_ids_collapse() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;
    let a = app.create_option(&staff, "A").await;

    let (status, created) = app
        .post(
            "/api/menus",
            Some(&staff),
            json!({ "date": "2020-11-16", "options": [a, a, a] }),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["options"], json!([a]));
}

#[tokio::test]
async fn test_menu_writes_require_staff() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;
    let user = app.user_token("eater@example.com", false).await;
    let id = app.create_menu(&staff, "2020-11-16", &[]).await;

    let (status, _) = app
        .post("/api/menus", None, json!({ "date": "2020-11-17" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = app
        .post("/api/menus", Some(&user), json!({ "date": "2020-11-17" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request(
            "PATCH",
            &format!("/api/menus/{id}"),
            Some(&user),
            Some(json!({ "name": "Mine now" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .request("DELETE", &format!("/api/menus/{id}"), Some(&user), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, menu) = app.get(&format!("/api/menus/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["name"], "Today's menu");
}

#[tokio::test]
async fn test_one_menu_per_day() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    app.create_menu(&staff, "2020-11-16", &[]).await;
    let other = app.create_menu(&staff, "2020-11-17", &[]).await;

    let (status, _) = app
        .post("/api/menus", Some(&staff), json!({ "date": "2020-11-16" }))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .request(
            "PATCH",
            &format!("/api/menus/{other}"),
            Some(&staff),
            Some(json!({ "date": "2020-11-16" })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // Re-sending a menu's own date is not a conflict
    let (status, _) = app
        .request(
            "PUT",
            &format!("/api/menus/{other}"),
            Some(&staff),
            Some(json!({ "date": "2020-11-17", "options": [] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn test_several_menus_per_day_when_policy_allows() {
    let mut config = test_config();
    config.menu_policy.one_menu_per_day = false;
    let app = spawn_app_with(config).await;
    let staff = app.staff_token().await;

    app.create_menu(&staff, "2020-11-16", &[]).await;
    app.create_menu(&staff, "2020-11-16", &[]).await;

    let (_, list) = app.get("/api/menus", None).await;
    assert_eq!(list.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_option_limit_enforced() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let mut ids = Vec::new();
    for description in ["A", "B", "C", "D", "E"] {
        ids.push(app.create_option(&staff, description).await);
    }

    let (status, _) = app
        .post(
            "/api/menus",
            Some(&staff),
            json!({ "date": "2020-11-16", "options": ids }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let id = app.create_menu(&staff, "2020-11-16", &ids[..4]).await;

    let (status, _) = app
        .request(
            "PATCH",
            &format!("/api/menus/{id}"),
            Some(&staff),
            Some(json!({ "options": ids })),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, detail) = app.get(&format!("/api/menus/{id}"), None).await;
    assert_eq!(detail["options"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_delete_keeps_options_and_removes_orders() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let a = app.create_option(&staff, "A").await;
    let id = app.create_menu(&staff, "2020-11-16", &[a]).await;

    let (status, _) = app
        .post("/api/orders", Some(&staff), json!({ "menu": id }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = app
        .request("DELETE", &format!("/api/menus/{id}"), Some(&staff), None)
        .await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.is_null());

    let (status, _) = app.get(&format!("/api/menus/{id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app.get(&format!("/api/options/{a}"), Some(&staff)).await;
    assert_eq!(status, StatusCode::OK);

    let (_, assigned) = app.get("/api/options?assigned_only=1", Some(&staff)).await;
    assert_eq!(assigned, json!([]));

    let (_, orders) = app.get("/api/orders", Some(&staff)).await;
    assert_eq!(orders, json!([]));

    let (status, _) = app
        .request("DELETE", &format!("/api/menus/{id}"), Some(&staff), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_today_menu() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let (status, _) = app.get("/api/menus/today", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let today = chrono::Local::now().date_naive().to_string();
    let a = app.create_option(&staff, "Corn pie").await;
    let id = app.create_menu(&staff, &today, &[a]).await;

    let (status, menu) = app.get("/api/menus/today", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(menu["id"].as_i64(), Some(id));
    assert_eq!(menu["options"][0]["description"], "Corn pie");
}

#[tokio::test]
async fn test_non_numeric_menu_id_is_json_bad_request() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let (status, body) = app.get("/api/menus/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");

    for method in ["PATCH", "PUT"] {
        let (status, body) = app
            .request(
                method,
                "/api/menus/abc",
                Some(&staff),
                Some(json!({ "date": "2020-11-16", "options": [] })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{method}");
        assert!(body["error"].is_string(), "{method}: {body}");
    }

    let (status, body) = app
        .request("DELETE", "/api/menus/abc", Some(&staff), None)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_repeated_query_param_is_json_bad_request() {
    let app = spawn_app().await;

    let (status, body) = app.get("/api/menus?options=1&options=2", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string(), "{body}");
}

#[tokio::test]
async fn test_update_missing_menu_is_not_found() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;
    let a = app.create_option(&staff, "A").await;

    let (status, _) = app
        .request(
            "PATCH",
            "/api/menus/999",
            Some(&staff),
            Some(json!({ "name": "Ghost" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            "PUT",
            "/api/menus/999",
            Some(&staff),
            Some(json!({ "date": "2020-11-16", "options": [a] })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request("DELETE", "/api/menus/999", Some(&staff), None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_missing_menu_wins_over_invalid_payload() {
    let app = spawn_app().await;
    let staff = app.staff_token().await;

    let mut options = Vec::new();
    for description in ["A", "B", "C", "D", "E"] {
        options.push(app.create_option(&staff, description).await);
    }

    let (status, _) = app
        .request(
            "PATCH",
            "/api/menus/999",
            Some(&staff),
            Some(json!({ "options": options })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = app
        .request(
            "PATCH",
            "/api/menus/999",
            Some(&staff),
            Some(json!({ "name": "" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
