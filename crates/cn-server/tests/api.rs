//! HTTP contract tests: routing, JSON shapes, and error statuses, driven
//! through the router with `oneshot` against an in-memory database.

use axum::Router;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use pretty_assertions::assert_eq;
use rstest::rstest;
use serde_json::{Value, json};
use tower::ServiceExt;

use cn_db::service::PracticeService;
use cn_server::{AppState, router};

async fn app() -> Router {
    let service = PracticeService::new_local(":memory:").await.unwrap();
    router(AppState::new(service))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(body.map_or_else(Body::empty, |body| Body::from(body.to_string())))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or_else(
            |_| json!({ "raw": String::from_utf8_lossy(&bytes).to_string() }),
        )
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    send(app, Method::POST, uri, Some(body)).await
}

async fn create_client(app: &Router, first: &str, last: &str) -> i64 {
    let (status, body) = post(
        app,
        "/api/clients/",
        json!({ "first_name": first, "last_name": last }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["id"].as_i64().unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let (status, body) = get(&app, "/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));
}

#[tokio::test]
async fn client_lifecycle_over_http() {
    let app = app().await;
    let (status, created) = post(
        &app,
        "/api/clients/",
        json!({
            "first_name": "Ada",
            "last_name": "Byron",
            "email": "ada@example.org",
            "city": "London",
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{created}");
    assert_eq!(created["full_name"], "Ada Byron");
    assert_eq!(created["status"], "active");
    assert_eq!(created["updated_at"], Value::Null);
    let id = created["id"].as_i64().unwrap();

    let (status, fetched) = get(&app, &format!("/api/clients/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/clients/{id}"),
        Some(json!({ "city": "Leeds", "email": null })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{updated}");
    assert_eq!(updated["city"], "Leeds");
    assert_eq!(updated["email"], Value::Null);
    assert_eq!(updated["first_name"], "Ada");
    assert!(updated["updated_at"].is_string());

    let (status, deleted) = send(&app, Method::DELETE, &format!("/api/clients/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["id"], id);

    let (status, body) = get(&app, &format!("/api/clients/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["detail"], format!("Client {id} not found"));
}

#[tokio::test]
async fn archive_moves_client_between_filters() {
    let app = app().await;
    let id = create_client(&app, "Ada", "Byron").await;

    let (status, body) = post(
        &app,
        &format!("/api/clients/{id}/archive"),
        json!({ "archive": true }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "archived");

    let (_, active) = get(&app, "/api/clients/").await;
    assert_eq!(active, json!([]));
    let (_, archived) = get(&app, "/api/clients/?filter=archived").await;
    assert_eq!(archived.as_array().unwrap().len(), 1);

    post(
        &app,
        &format!("/api/clients/{id}/archive"),
        json!({ "archive": false }),
    )
    .await;
    let (_, active) = get(&app, "/api/clients?filter=active").await;
    assert_eq!(active.as_array().unwrap().len(), 1);
    let (_, all) = get(&app, "/api/clients/?filter=all").await;
    assert_eq!(all.as_array().unwrap().len(), 1);
}

#[rstest]
#[case::missing_last_name(json!({ "first_name": "Ada" }))]
#[case::bad_email(json!({ "first_name": "Ada", "last_name": "Byron", "email": "nope" }))]
#[case::blank_first_name(json!({ "first_name": "  ", "last_name": "Byron" }))]
#[tokio::test]
async fn invalid_client_payloads_are_422(#[case] body: Value) {
    let app = app().await;
    let (status, body) = post(&app, "/api/clients/", body).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string(), "{body}");
}

#[rstest]
#[case::non_numeric_id("/api/clients/abc")]
#[case::unknown_filter("/api/clients/?filter=deleted")]
#[case::report_without_dates("/api/reports/totals")]
#[case::malformed_date("/api/sessions/?start_date=March")]
#[tokio::test]
async fn malformed_paths_and_queries_are_422(#[case] uri: &str) {
    let app = app().await;
    let (status, body) = get(&app, uri).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["detail"].is_string(), "{body}");
}

#[tokio::test]
async fn duplicate_client_code_is_409() {
    let app = app().await;
    let body = json!({ "first_name": "Ada", "last_name": "Byron", "client_code": "CL-1" });
    let (status, _) = post(&app, "/api/clients/", body.clone()).await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = post(&app, "/api/clients/", body).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["detail"], "client_code already exists");
}

#[tokio::test]
async fn blank_client_codes_do_not_conflict() {
    let app = app().await;
    let body = json!({ "first_name": "Ada", "last_name": "Byron", "client_code": "", "email": "" });
    for _ in 0..2 {
        let (status, created) = post(&app, "/api/clients/", body.clone()).await;
        assert_eq!(status, StatusCode::OK, "{created}");
        assert_eq!(created["client_code"], Value::Null);
        assert_eq!(created["email"], Value::Null);
    }

    let (_, all) = get(&app, "/api/clients/?filter=all").await;
    assert_eq!(all.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn session_notes_crud_and_listing() {
    let app = app().await;
    let ada = create_client(&app, "Ada", "Byron").await;
    let grace = create_client(&app, "Grace", "Hopper").await;

    for (client_id, date) in [(ada, "2024-03-04"), (ada, "2024-03-11"), (grace, "2024-03-05")] {
        let (status, body) = post(
            &app,
            "/api/sessions/",
            json!({ "client_id": client_id, "session_date": date, "duration_minutes": 50 }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["session_type"], "In-Person");
    }

    let (_, all) = get(&app, "/api/sessions").await;
    let dates: Vec<&str> = all
        .as_array()
        .unwrap()
        .iter()
        .map(|note| note["session_date"].as_str().unwrap())
        .collect();
    assert_eq!(dates, vec!["2024-03-11", "2024-03-05", "2024-03-04"]);

    let (_, filtered) = get(
        &app,
        &format!("/api/sessions/?client_id={ada}&end_date=2024-03-06&order=asc"),
    )
    .await;
    assert_eq!(filtered.as_array().unwrap().len(), 1);
    assert_eq!(filtered[0]["session_date"], "2024-03-04");

    let (_, for_grace) = get(&app, &format!("/api/sessions/client/{grace}")).await;
    assert_eq!(for_grace.as_array().unwrap().len(), 1);
    let note_id = for_grace[0]["id"].as_i64().unwrap();

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/sessions/{note_id}"),
        Some(json!({ "is_paid": true })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["is_paid"], true);
    assert_eq!(updated["duration_minutes"], 50);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/sessions/{note_id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Session note deleted" }));

    let (status, _) = send(&app, Method::DELETE, &format!("/api/sessions/{note_id}"), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[rstest]
#[case::sessions("/api/sessions/?client_id=&start_date=&end_date=&order=")]
#[case::assessments("/api/assessments/?client_id=")]
#[case::supervisions("/api/supervisions?client_id=&order=")]
#[case::cpd("/api/cpd/?start_date=&end_date=")]
#[tokio::test]
async fn empty_query_values_are_ignored(#[case] uri: &str) {
    let app = app().await;
    let (status, body) = get(&app, uri).await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn note_for_unknown_client_is_422() {
    let app = app().await;
    let (status, body) = post(
        &app,
        "/api/assessments/",
        json!({ "client_id": 404, "assessment_date": "2024-03-01" }),
    )
    .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["detail"], "client_id: client 404 does not exist");
}

#[tokio::test]
async fn deleting_client_cascades_over_http() {
    let app = app().await;
    let id = create_client(&app, "Ada", "Byron").await;
    let (_, session) = post(
        &app,
        "/api/sessions/",
        json!({ "client_id": id, "session_date": "2024-03-04", "duration_minutes": 50 }),
    )
    .await;
    let (_, assessment) = post(
        &app,
        "/api/assessments/",
        json!({ "client_id": id, "assessment_date": "2024-03-01" }),
    )
    .await;
    let (_, supervision) = post(
        &app,
        "/api/supervisions/",
        json!({ "client_id": id, "supervision_date": "2024-03-08", "duration_minutes": 60 }),
    )
    .await;

    let (_, view) = get(&app, &format!("/api/clients/{id}/notes")).await;
    assert_eq!(view["session_notes"].as_array().unwrap().len(), 1);
    assert_eq!(view["assessment_notes"].as_array().unwrap().len(), 1);

    send(&app, Method::DELETE, &format!("/api/clients/{id}"), None).await;

    let (status, _) = get(&app, &format!("/api/sessions/{}", session["id"])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, _) = get(&app, &format!("/api/assessments/{}", assessment["id"])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let (status, kept) = get(&app, &format!("/api/supervisions/{}", supervision["id"])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(kept["client_id"], Value::Null);
}

#[tokio::test]
async fn cpd_notes_list_oldest_first() {
    let app = app().await;
    for (date, hours) in [("2024-05-20", 3.5), ("2024-02-01", 1.0)] {
        let (status, body) = post(
            &app,
            "/api/cpd",
            json!({ "cpd_date": date, "duration_hours": hours, "title": "Trauma workshop" }),
        )
        .await;
        assert_eq!(status, StatusCode::OK, "{body}");
    }

    let (_, notes) = get(&app, "/api/cpd/").await;
    assert_eq!(notes[0]["cpd_date"], "2024-02-01");
    assert_eq!(notes[1]["duration_hours"], 3.5);

    let id = notes[0]["id"].as_i64().unwrap();
    let (_, body) = send(&app, Method::DELETE, &format!("/api/cpd/{id}"), None).await;
    assert_eq!(body["message"], "CPD note deleted");
}

#[tokio::test]
async fn reports_over_quiet_range_are_empty() {
    let app = app().await;
    let range = "start_date=2024-01-01&end_date=2024-03-31";

    let (status, rows) = get(&app, &format!("/api/reports/client-time?{range}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows, json!([]));

    let (status, report) = get(&app, &format!("/api/reports/supervision-time?{range}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(report["total_minutes"], 0);
    assert_eq!(report["total_days"], 0);
    assert_eq!(report["months"].as_array().unwrap().len(), 3);
    assert_eq!(report["notes"], json!([]));

    let (status, totals) = get(&app, &format!("/api/reports/totals?{range}&status=active")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(totals["status"], "active");
    assert_eq!(totals["session_total"]["count"], 0);
    assert_eq!(totals["cpd_total"]["count"], 0);
}

#[tokio::test]
async fn client_time_report_sums_sessions_and_assessments() {
    let app = app().await;
    let id = create_client(&app, "Ada", "Byron").await;
    post(
        &app,
        "/api/sessions/",
        json!({ "client_id": id, "session_date": "2024-03-04", "duration_minutes": 50, "is_paid": true }),
    )
    .await;
    post(
        &app,
        "/api/assessments/",
        json!({ "client_id": id, "assessment_date": "2024-03-01", "duration_minutes": 70 }),
    )
    .await;

    let (status, rows) = get(
        &app,
        "/api/reports/client-time?start_date=2024-03-01&end_date=2024-03-31",
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(rows[0]["client_name"], "Ada Byron");
    assert_eq!(rows[0]["total_minutes"], 120);
    assert_eq!(rows[0]["total_hours"], 2.0);
    assert_eq!(rows[0]["paid_minutes"], 50);
    assert_eq!(rows[0]["unpaid_sessions"], 1);
}
