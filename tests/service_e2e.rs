//! End-to-end checks against a live triangle service.
//!
//! These tests need `TRIANGLE_API_URL` and `TRIANGLE_API_TOKEN` and mutate the
//! service's state, so they are ignored by default:
//!
//! ```text
//! cargo test --test service_e2e -- --ignored --test-threads=1
//! ```

use approx::assert_relative_eq;
use reqwest::Method;
use serde_json::json;
use triangle_probe::client::session::random_unknown_id;
use triangle_probe::{
    AdjustmentKind, ApiConfig, CreateTriangle, MetricResult, ProbeError, ProbeSession,
    SERVICE_CAPACITY, SideGenerator, SideTriple, Strategy, SweepPlan, TriangleClient,
    generate_sweep,
};

fn session() -> ProbeSession {
    let _ = env_logger::builder().is_test(true).try_init();
    let config = ApiConfig::from_env().expect("TRIANGLE_API_URL and TRIANGLE_API_TOKEN");
    let session = ProbeSession::new(TriangleClient::new(config).expect("client"));
    session.purge().expect("service should start empty");
    session
}

fn sweep(strategy: Strategy, adjust: Option<AdjustmentKind>) -> Vec<SideTriple> {
    let mut generator = SideGenerator::new();
    generate_sweep(&mut generator, strategy, &SweepPlan::default(), adjust)
        .expect("sweep")
        .into_iter()
        .map(|sample| sample.sides)
        .collect()
}

fn assert_rejected(session: &ProbeSession, sides: &SideTriple) {
    let response = session
        .client()
        .create(&CreateTriangle::new(sides, ";"))
        .expect("request");
    assert_eq!(response.status, 422, "{sides} was accepted");
    let error = response.service_error().expect("error body");
    assert_eq!(error.error, "Unprocessable Entity");
    assert_eq!(error.message, "Cannot process input");
}

#[test]
#[ignore = "requires a live triangle service"]
fn add_triangle_accepts_valid_equilateral_and_isosceles_sides() {
    let session = session();
    for strategy in [Strategy::Valid, Strategy::Equilateral, Strategy::Isosceles] {
        for sides in sweep(strategy, None) {
            let id = session.create_triangle(&sides).expect("create");
            assert_eq!(session.fetch_sides(&id).expect("fetch"), sides);
            session.delete_triangle(&id).expect("delete");
        }
    }
}

#[test]
#[ignore = "requires a live triangle service"]
fn add_triangle_rejects_impossible_sides() {
    let session = session();
    for strategy in [Strategy::SumEqual, Strategy::Invalid] {
        for sides in sweep(strategy, None) {
            assert_rejected(&session, &sides);
        }
    }
    for adjust in [AdjustmentKind::Zero, AdjustmentKind::Negate] {
        for sides in sweep(Strategy::Valid, Some(adjust)) {
            assert_rejected(&session, &sides);
        }
    }
}

#[test]
#[ignore = "requires a live triangle service"]
fn add_triangle_payload_variants() {
    let session = session();
    let client = session.client();
    let sides = SideTriple::new(3.0, 4.0, 5.0);

    let response = client
        .create(&CreateTriangle::without_separator(&sides))
        .expect("request");
    assert_eq!(response.status, 200);

    for separator in ["x", "-", " ", ","] {
        let response = client
            .create(&CreateTriangle::new(&sides, separator))
            .expect("request");
        assert_eq!(response.status, 200, "separator {separator:?}");
    }
    session.purge().expect("purge");

    for body in [
        json!({"separator": ";", "input": "3;4"}),
        json!({"separator": ";", "input": "3;4;5;6"}),
        json!({"separator": ",", "input": "3;4;5"}),
    ] {
        let response = client.create_raw(Some(&body.to_string())).expect("request");
        assert_eq!(response.status, 422, "{body}");
    }
    for body in [Some("{\"input\": 3;4;5}"), Some(""), None] {
        let response = client.create_raw(body).expect("request");
        assert_eq!(response.status, 400, "{body:?}");
    }
}

#[test]
#[ignore = "requires a live triangle service"]
fn add_triangle_above_capacity() {
    let session = session();
    for _ in 0..SERVICE_CAPACITY {
        session
            .create_triangle(&SideTriple::new(3.0, 4.0, 5.0))
            .expect("create");
    }
    let response = session
        .client()
        .create(&CreateTriangle::new(&SideTriple::new(3.0, 4.0, 5.0), ";"))
        .expect("request");
    assert_eq!(response.status, 422);
    assert!(matches!(
        session.create_triangle(&SideTriple::new(3.0, 4.0, 5.0)),
        Err(ProbeError::CapacityExceeded { .. })
    ));
    assert_eq!(session.purge().expect("purge"), SERVICE_CAPACITY);
}

#[test]
#[ignore = "requires a live triangle service"]
fn perimeter_and_area_match_local_computation() {
    let session = session();
    for sides in sweep(Strategy::Valid, None).into_iter().take(SERVICE_CAPACITY) {
        let id = session.create_triangle(&sides).expect("create");
        let perimeter: MetricResult = session
            .client()
            .perimeter(&id)
            .expect("request")
            .expect_status(200)
            .and_then(|response| response.json())
            .expect("perimeter");
        assert_relative_eq!(perimeter.result, sides.perimeter(), max_relative = 1e-9);

        let area: MetricResult = session
            .client()
            .area(&id)
            .expect("request")
            .expect_status(200)
            .and_then(|response| response.json())
            .expect("area");
        assert_relative_eq!(
            area.result,
            sides.area().expect("valid sides"),
            max_relative = 1e-9
        );
    }
}

#[test]
#[ignore = "requires a live triangle service"]
fn unknown_ids_are_not_found() {
    let session = session();
    let client = session.client();
    for id in [random_unknown_id(), "0".to_string(), "*".to_string()] {
        assert_eq!(client.get(&id).expect("get").status, 404, "{id}");
        assert_eq!(client.delete(&id).expect("delete").status, 404, "{id}");
        assert_eq!(client.perimeter(&id).expect("perimeter").status, 404);
        assert_eq!(client.area(&id).expect("area").status, 404);
    }
}

#[test]
#[ignore = "requires a live triangle service"]
fn wrong_methods_are_not_allowed() {
    let session = session();
    let id = session
        .create_triangle(&SideTriple::new(3.0, 4.0, 5.0))
        .expect("create");
    let client = session.client();

    assert_eq!(client.request(Method::PUT, &[]).expect("put").status, 405);
    assert_eq!(client.request(Method::POST, &["all"]).expect("post").status, 405);
    assert_eq!(client.request(Method::POST, &[id.as_str()]).expect("post").status, 405);
    assert_eq!(
        client.request(Method::POST, &[id.as_str(), "perimeter"]).expect("post").status,
        405
    );
    assert_eq!(
        client.request(Method::POST, &[id.as_str(), "area"]).expect("post").status,
        405
    );
}

#[test]
#[ignore = "requires a live triangle service"]
fn invalid_token_is_unauthorized() {
    let session = session();
    let id = session
        .create_triangle(&SideTriple::new(3.0, 4.0, 5.0))
        .expect("create");
    let client = session.client().with_token("invalid_personal_token_value");

    assert_eq!(client.all().expect("all").status, 401);
    assert_eq!(client.get(&id).expect("get").status, 401);
    assert_eq!(client.perimeter(&id).expect("perimeter").status, 401);
    assert_eq!(client.area(&id).expect("area").status, 401);
    assert_eq!(client.delete(&id).expect("delete").status, 401);
    assert_eq!(
        client
            .create(&CreateTriangle::new(&SideTriple::new(3.0, 4.0, 5.0), ";"))
            .expect("create")
            .status,
        401
    );
}
