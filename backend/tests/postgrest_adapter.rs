//! Exercises the PostgREST repository against a local server that speaks the
//! same wire protocol: `/rest/v1/{table}` with `eq.` filters and
//! `return=representation` writes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicI64, Ordering};

use actix_web::{App, HttpRequest, HttpResponse, HttpServer, http::Method, web};
use chrono::{Duration, NaiveDate, TimeZone, Utc};
use eduista::domain::ports::{TutorRepository, TutorRepositoryError, TutorsQuery};
use eduista::domain::{
    ErrorCode, NewTutor, TUTOR_NOT_FOUND_MESSAGE, TutorChanges, TutorId, TutorService,
    validate_new_tutor,
};
use eduista::outbound::postgrest::{PostgrestSettings, PostgrestTutorRepository};
use mockable::DefaultClock;
use rstest::rstest;
use serde_json::{Map, Value, json};
use url::Url;

const API_KEY: &str = "anon-test-key";

#[derive(Debug, Clone)]
struct SeenRequest {
    method: Method,
    apikey: Option<String>,
    authorization: Option<String>,
    prefer: Option<String>,
    query: String,
}

#[derive(Default)]
struct FakePostgrest {
    rows: Mutex<Vec<Map<String, Value>>>,
    seen: Mutex<Vec<SeenRequest>>,
    clock: AtomicI64,
}

impl FakePostgrest {
    fn next_timestamp(&self) -> String {
        let tick = self.clock.fetch_add(1, Ordering::SeqCst);
        let base = Utc
            .with_ymd_and_hms(2025, 3, 14, 9, 0, 0)
            .single()
            .expect("valid timestamp");
        (base + Duration::seconds(tick)).to_rfc3339()
    }

    fn last_seen(&self) -> SeenRequest {
        self.seen
            .lock()
            .expect("seen lock")
            .last()
            .cloned()
            .expect("a request was recorded")
    }
}

fn header(req: &HttpRequest, name: &str) -> Option<String> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
}

/// Mirrors the shape check a `uuid` primary key applies to `eq.` filters.
fn is_uuid_shaped(value: &str) -> bool {
    value.len() == 36
        && value.char_indices().all(|(index, ch)| match index {
            8 | 13 | 18 | 23 => ch == '-',
            _ => ch.is_ascii_hexdigit(),
        })
}

fn matches_id(row: &Map<String, Value>, id: Option<&str>) -> bool {
    id.is_none_or(|wanted| row.get("id").and_then(Value::as_str) == Some(wanted))
}

async fn table(
    req: HttpRequest,
    path: web::Path<String>,
    query: web::Query<HashMap<String, String>>,
    body: web::Bytes,
    store: web::Data<FakePostgrest>,
) -> HttpResponse {
    store.seen.lock().expect("seen lock").push(SeenRequest {
        method: req.method().clone(),
        apikey: header(&req, "apikey"),
        authorization: header(&req, "authorization"),
        prefer: header(&req, "prefer"),
        query: req.query_string().to_owned(),
    });

    let id = query
        .get("id")
        .and_then(|filter| filter.strip_prefix("eq."))
        .map(str::to_owned);
    let id = id.as_deref();

    match path.as_str() {
        "tutors" => {}
        "uuid_tutors" => {
            if let Some(raw) = id.filter(|raw| !is_uuid_shaped(raw)) {
                return HttpResponse::BadRequest().json(json!({
                    "code": "22P02",
                    "message": format!("invalid input syntax for type uuid: \"{raw}\"")
                }));
            }
        }
        "flaky" => return HttpResponse::ServiceUnavailable().body("upstream connect error"),
        other => {
            return HttpResponse::NotFound().json(json!({
                "code": "PGRST205",
                "message": format!("Could not find the table 'public.{other}' in the schema cache")
            }));
        }
    }
    let mut rows = store.rows.lock().expect("rows lock");

    match *req.method() {
        Method::GET => {
            let selected: Vec<_> = rows.iter().rev().filter(|row| matches_id(row, id)).cloned().collect();
            HttpResponse::Ok().json(selected)
        }
        Method::POST => {
            let Ok(Value::Object(mut row)) = serde_json::from_slice::<Value>(&body) else {
                return HttpResponse::BadRequest().json(json!({ "code": "PGRST102", "message": "bad body" }));
            };
            let now = store.next_timestamp();
            row.insert("id".into(), json!(format!("row-{}", rows.len() + 1)));
            row.insert("rating".into(), Value::Null);
            row.insert("created_at".into(), json!(now));
            row.insert("updated_at".into(), json!(now));
            rows.push(row.clone());
            HttpResponse::Created().json(vec![row])
        }
        Method::PATCH => {
            let Ok(Value::Object(changes)) = serde_json::from_slice::<Value>(&body) else {
                return HttpResponse::BadRequest().json(json!({ "code": "PGRST102", "message": "bad body" }));
            };
            let now = store.next_timestamp();
            let mut updated = Vec::new();
            for row in rows.iter_mut().filter(|row| matches_id(row, id)) {
                row.extend(changes.clone());
                row.insert("updated_at".into(), json!(now));
                updated.push(row.clone());
            }
            HttpResponse::Ok().json(updated)
        }
        Method::DELETE => {
            let (removed, kept): (Vec<_>, Vec<_>) = rows.drain(..).partition(|row| matches_id(row, id));
            *rows = kept;
            HttpResponse::Ok().json(removed)
        }
        _ => HttpResponse::MethodNotAllowed().finish(),
    }
}

fn spawn_fake(store: web::Data<FakePostgrest>) -> Url {
    let server = HttpServer::new(move || {
        App::new()
            .app_data(store.clone())
            .route("/rest/v1/{table}", web::to(table))
    })
    .workers(1)
    .bind(("127.0.0.1", 0))
    .expect("bind fake PostgREST");
    let addr = server.addrs()[0];
    actix_rt::spawn(server.run());
    Url::parse(&format!("http://{addr}")).expect("fake base URL")
}

fn repository(base_url: Url, table: &str) -> PostgrestTutorRepository {
    PostgrestTutorRepository::new(PostgrestSettings {
        base_url,
        api_key: API_KEY.to_owned(),
        table: table.to_owned(),
        timeout: Some(std::time::Duration::from_secs(5)),
    })
    .expect("repository builds")
}

fn new_tutor(name: &str) -> NewTutor {
    validate_new_tutor(
        &json!({
            "name": name, "email": "tutor@example.com", "subject": "Physics",
            "subjects": ["Physics"], "hourlyRate": 30, "experience": 4,
            "location": "Bristol", "languages": ["English"],
            "bio": "Mechanics, optics and a little relativity."
        }),
        NaiveDate::from_ymd_opt(2025, 3, 14).expect("valid date"),
    )
    .expect("valid payload")
}

#[rstest]
#[actix_web::test]
async fn crud_round_trip_uses_postgrest_conventions() {
    let store = web::Data::new(FakePostgrest::default());
    let repository = repository(spawn_fake(store.clone()), "tutors");

    let first = repository.create(new_tutor("Lise")).await.expect("create");
    let seen = store.last_seen();
    assert_eq!(seen.method, Method::POST);
    assert_eq!(seen.apikey.as_deref(), Some(API_KEY));
    assert_eq!(
        seen.authorization.as_deref(),
        Some(format!("Bearer {API_KEY}").as_str())
    );
    assert_eq!(seen.prefer.as_deref(), Some("return=representation"));
    assert_eq!(first.join_date, NaiveDate::from_ymd_opt(2025, 3, 14).expect("date"));

    let second = repository.create(new_tutor("Marie")).await.expect("create");
    let listed = repository.list().await.expect("list");
    assert_eq!(
        listed.iter().map(|tutor| tutor.name.as_str()).collect::<Vec<_>>(),
        ["Marie", "Lise"]
    );
    assert!(store.last_seen().query.contains("order=created_at.desc"));

    let found = repository.find(&first.id).await.expect("find");
    assert_eq!(found, first);
    assert!(store.last_seen().query.contains(&format!("id=eq.{}", first.id)));

    let updated = repository
        .update(
            &second.id,
            TutorChanges {
                is_active: Some(false),
                ..TutorChanges::default()
            },
        )
        .await
        .expect("update");
    assert!(!updated.is_active);
    assert_eq!(updated.name, "Marie");
    assert!(updated.updated_at > second.updated_at);
    assert_eq!(store.last_seen().method, Method::PATCH);

    repository.delete(&first.id).await.expect("delete");
    assert_eq!(store.last_seen().method, Method::DELETE);
    let error = repository.find(&first.id).await.expect_err("deleted");
    assert!(matches!(error, TutorRepositoryError::NotFound { .. }));
}

#[rstest]
#[actix_web::test]
async fn empty_update_reads_instead_of_patching() {
    let store = web::Data::new(FakePostgrest::default());
    let repository = repository(spawn_fake(store.clone()), "tutors");
    let created = repository.create(new_tutor("Emmy")).await.expect("create");

    let unchanged = repository
        .update(&created.id, TutorChanges::default())
        .await
        .expect("no-op update");

    assert_eq!(unchanged, created);
    assert_eq!(store.last_seen().method, Method::GET);
}

#[rstest]
#[actix_web::test]
async fn unknown_ids_are_not_found_for_every_keyed_operation() {
    let store = web::Data::new(FakePostgrest::default());
    let repository = repository(spawn_fake(store), "tutors");
    let id = TutorId::new("row-404").expect("valid id");
    let changes = TutorChanges {
        bio: Some("Nothing to see here".to_owned()),
        ..TutorChanges::default()
    };

    assert_eq!(
        repository.find(&id).await.expect_err("find"),
        TutorRepositoryError::not_found("row-404")
    );
    assert_eq!(
        repository.update(&id, changes).await.expect_err("update"),
        TutorRepositoryError::not_found("row-404")
    );
    assert_eq!(
        repository.delete(&id).await.expect_err("delete"),
        TutorRepositoryError::not_found("row-404")
    );
}

#[rstest]
#[case("abc")]
#[case("12345")]
#[actix_web::test]
async fn ids_rejected_by_a_uuid_column_are_not_found(#[case] raw: &str) {
    let store = web::Data::new(FakePostgrest::default());
    let repository = Arc::new(repository(spawn_fake(store), "uuid_tutors"));
    let id = TutorId::new(raw).expect("valid id");
    let changes = TutorChanges {
        is_active: Some(false),
        ..TutorChanges::default()
    };

    assert_eq!(
        repository.find(&id).await.expect_err("find"),
        TutorRepositoryError::not_found(raw)
    );
    assert_eq!(
        repository.update(&id, changes).await.expect_err("update"),
        TutorRepositoryError::not_found(raw)
    );
    assert_eq!(
        repository.delete(&id).await.expect_err("delete"),
        TutorRepositoryError::not_found(raw)
    );

    let service = TutorService::new(repository, Arc::new(DefaultClock));
    let error = service.get_tutor(&id).await.expect_err("get");
    assert_eq!(error.code(), ErrorCode::NotFound);
    assert_eq!(error.message(), TUTOR_NOT_FOUND_MESSAGE);
}

#[rstest]
#[actix_web::test]
async fn well_formed_unknown_uuids_are_not_found() {
    let store = web::Data::new(FakePostgrest::default());
    let repository = repository(spawn_fake(store), "uuid_tutors");
    let raw = "3f2b8c1e-9a4d-4e6f-8b7a-0c1d2e3f4a5b";
    let id = TutorId::new(raw).expect("valid id");

    assert_eq!(
        repository.find(&id).await.expect_err("find"),
        TutorRepositoryError::not_found(raw)
    );
}

#[rstest]
#[actix_web::test]
async fn schema_cache_miss_is_schema_missing() {
    let store = web::Data::new(FakePostgrest::default());
    let repository = repository(spawn_fake(store), "unprovisioned");

    let error = repository.list().await.expect_err("missing table");

    assert_eq!(error, TutorRepositoryError::schema_missing("unprovisioned"));
}

#[rstest]
#[actix_web::test]
async fn unavailable_upstream_is_a_connection_error() {
    let store = web::Data::new(FakePostgrest::default());
    let repository = repository(spawn_fake(store), "flaky");

    let error = repository.list().await.expect_err("upstream down");

    assert_eq!(
        error,
        TutorRepositoryError::connection("status 503: upstream connect error")
    );
}

#[rstest]
#[actix_web::test]
async fn refused_connections_are_connection_errors() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("reserve port");
    let addr = listener.local_addr().expect("local addr");
    drop(listener);
    let base_url = Url::parse(&format!("http://{addr}")).expect("base URL");

    let error = repository(base_url, "tutors")
        .list()
        .await
        .expect_err("nothing listening");

    assert!(matches!(error, TutorRepositoryError::Connection { .. }));
}
