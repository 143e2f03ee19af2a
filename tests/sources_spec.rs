use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};

use astrapatch::board::Region;
use astrapatch::config::DashboardConfig;
use astrapatch::dashboard::Dashboard;
use astrapatch::live::IssTracker;
use astrapatch::loader::{LoaderPhase, ProgressiveLoader};
use astrapatch::sources;
use astrapatch::sources::panels::render_moon;
use astrapatch_core::moon_phase;
use chrono::Local;

/// Serve `router` on an ephemeral port and return its base URL.
async fn spawn_upstream(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind fake upstream");
    let addr = listener.local_addr().expect("Failed to read local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    format!("http://{}", addr)
}

fn dashboard_for(base: &str) -> Dashboard {
    let config = DashboardConfig {
        launch_api_url: format!("{}/ll", base),
        iss_api_url: format!("{}/iss", base),
        nasa_api_url: format!("{}/nasa", base),
        request_timeout_secs: 5,
        reveal_delay_ms: 0,
        ..Default::default()
    };
    Dashboard::new(config).expect("Failed to build dashboard")
}

fn json_route(body: Value) -> axum::routing::MethodRouter {
    get(move || {
        let body = body.clone();
        async move { Json(body) }
    })
}

fn failing_route() -> axum::routing::MethodRouter {
    get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "upstream exploded") })
}

fn iss_body() -> Value {
    json!({
        "latitude": 37.7749,
        "longitude": -122.4194,
        "altitude": 408.05,
        "velocity": 27600.5,
        "visibility": "daylight"
    })
}

fn launch(name: &str, status_id: Option<i64>) -> Value {
    let mut launch = json!({
        "name": name,
        "launch_service_provider": {"name": "SpaceX"},
        "net": "2099-01-01T00:00:00Z"
    });
    if let Some(id) = status_id {
        launch["status"] = json!({"id": id, "abbrev": "Go"});
    }
    launch
}

fn full_upstream() -> Router {
    Router::new()
        .route(
            "/ll/launch/upcoming/",
            json_route(json!({"count": 2, "results": [launch("Falcon 9 | Demo", Some(1))]})),
        )
        .route(
            "/ll/astronaut/",
            json_route(json!({"results": [{"name": "Tracy Dyson", "agency": {"name": "NASA"}}]})),
        )
        .route("/ll/spacewalk/upcoming/", json_route(json!({"results": []})))
        .route("/iss/satellites/25544", json_route(iss_body()))
        .route("/nasa/DONKI/FLR", json_route(json!([{"classType": "C1.0"}])))
        .route("/nasa/DONKI/CME", json_route(json!([])))
        .route("/nasa/DONKI/GST", json_route(Value::Null))
        .route(
            "/nasa/neo/rest/v1/feed",
            json_route(json!({"element_count": 0, "near_earth_objects": {}})),
        )
        .route(
            "/nasa/planetary/apod",
            json_route(json!({"title": "Pillars", "media_type": "image", "url": "https://apod/x.jpg"})),
        )
}

mod launches {
    use super::*;

    #[tokio::test]
    async fn excludes_unconfirmed_and_statusless_launches() {
        let base = spawn_upstream(Router::new().route(
            "/ll/launch/upcoming/",
            json_route(json!({
                "count": 42,
                "results": [
                    launch("Unconfirmed", Some(8)),
                    launch("Confirmed", Some(1)),
                    launch("No Status", None),
                ]
            })),
        ))
        .await;
        let dashboard = dashboard_for(&base);

        let shown = sources::launches::load(&dashboard).await;

        let board = dashboard.board();
        assert_eq!(shown, 1);
        assert_eq!(board.text(Region::LaunchCount).unwrap(), "42");
        let cards = board.lines(Region::Launches).unwrap();
        assert_eq!(cards.len(), 1);
        assert!(cards[0].contains("Confirmed (SpaceX)"));
        assert_eq!(dashboard.countdowns().len(), 1);
        assert!(board.text(Region::Countdowns).unwrap().starts_with("Confirmed: "));
        assert_eq!(dashboard.active_timers(), vec!["countdowns"]);
        dashboard.shutdown();
    }

    fn provider_upstream() -> Router {
        let mut rocket_lab = launch("Electron | Demo", Some(1));
        rocket_lab["launch_service_provider"] = json!({"name": "Rocket Lab"});
        Router::new().route(
            "/ll/launch/upcoming/",
            json_route(json!({
                "count": 2,
                "results": [launch("Falcon 9 | Demo", Some(1)), rocket_lab]
            })),
        )
    }

    #[tokio::test]
    async fn filters_cards_by_provider() {
        let base = spawn_upstream(provider_upstream()).await;
        let config = DashboardConfig {
            launch_api_url: format!("{}/ll", base),
            ..Default::default()
        }
        .with_launch_provider(Some("Rocket"));
        let dashboard = Dashboard::new(config).expect("Failed to build dashboard");

        assert_eq!(sources::launches::load(&dashboard).await, 1);

        let board = dashboard.board();
        assert_eq!(board.text(Region::LaunchCount).unwrap(), "2");
        let cards = board.lines(Region::Launches).unwrap();
        assert_eq!(cards.len(), 1);
        assert!(cards[0].starts_with("[GO|Go] Electron | Demo (Rocket Lab)"), "{}", cards[0]);
        assert_eq!(dashboard.countdowns().len(), 1);
        dashboard.shutdown();
    }

    #[tokio::test]
    async fn reports_when_no_launch_matches_provider() {
        let base = spawn_upstream(provider_upstream()).await;
        let config = DashboardConfig {
            launch_api_url: format!("{}/ll", base),
            ..Default::default()
        }
        .with_launch_provider(Some("Blue Origin"));
        let dashboard = Dashboard::new(config).expect("Failed to build dashboard");

        assert_eq!(sources::launches::load(&dashboard).await, 0);
        assert_eq!(
            dashboard.board().text(Region::Launches).unwrap(),
            "No upcoming launches for \"blue origin\"."
        );
        dashboard.shutdown();
    }

    #[tokio::test]
    async fn writes_fallback_on_server_error() {
        let base =
            spawn_upstream(Router::new().route("/ll/launch/upcoming/", failing_route())).await;
        let dashboard = dashboard_for(&base);

        assert_eq!(sources::launches::load(&dashboard).await, 0);
        assert_eq!(
            dashboard.board().text(Region::Launches).unwrap(),
            sources::launches::FALLBACK
        );
        assert!(dashboard.active_timers().is_empty());
    }

    #[tokio::test]
    async fn writes_fallback_on_malformed_json() {
        let base = spawn_upstream(
            Router::new().route("/ll/launch/upcoming/", get(|| async { "{\"results\": [" })),
        )
        .await;
        let dashboard = dashboard_for(&base);

        sources::launches::load(&dashboard).await;
        assert_eq!(
            dashboard.board().text(Region::Launches).unwrap(),
            sources::launches::FALLBACK
        );
    }
}

mod solar {
    use super::*;

    #[tokio::test]
    async fn sums_feeds_that_succeed() {
        let base = spawn_upstream(
            Router::new()
                .route(
                    "/nasa/DONKI/FLR",
                    json_route(json!([{"classType": "X1.0"}, {"classType": "M2.3"}, {}])),
                )
                .route("/nasa/DONKI/CME", failing_route())
                .route(
                    "/nasa/DONKI/GST",
                    json_route(json!([{"allKpIndex": [{"kpIndex": 7}]}, {}])),
                ),
        )
        .await;
        let dashboard = dashboard_for(&base);

        let counts = sources::solar::load(&dashboard).await;

        assert_eq!((counts.flares, counts.cmes, counts.storms), (3, 0, 2));
        let board = dashboard.board();
        assert_eq!(board.text(Region::ActiveEvents).unwrap(), "5");
        assert_eq!(
            board.text(Region::CmeEvents).unwrap(),
            sources::solar::CMES_FALLBACK
        );
        let flares = board.lines(Region::SolarFlares).unwrap();
        assert_eq!(flares[0], "3 Recent Flares");
        assert!(flares[3].starts_with("Class ? Flare"));
        assert_eq!(board.lines(Region::GeoStorms).unwrap()[0], "2 Storm Events");
    }

    #[tokio::test]
    async fn treats_null_as_no_events() {
        let base = spawn_upstream(
            Router::new()
                .route("/nasa/DONKI/FLR", json_route(Value::Null))
                .route("/nasa/DONKI/CME", json_route(Value::Null))
                .route("/nasa/DONKI/GST", json_route(Value::Null)),
        )
        .await;
        let dashboard = dashboard_for(&base);

        let counts = sources::solar::load(&dashboard).await;

        assert_eq!(counts.total(), 0);
        let board = dashboard.board();
        assert_eq!(board.text(Region::ActiveEvents).unwrap(), "0");
        assert_eq!(
            board.text(Region::CmeEvents).unwrap(),
            "No recent CME activity detected."
        );
    }
}

mod asteroids {
    use super::*;

    fn neo(name: &str, date: &str) -> Value {
        json!({
            "name": name,
            "is_potentially_hazardous_asteroid": false,
            "close_approach_data": [{
                "close_approach_date": date,
                "miss_distance": {"kilometers": "1000000"},
                "relative_velocity": {"kilometers_per_hour": "50000"}
            }]
        })
    }

    #[tokio::test]
    async fn lists_earliest_approaches_first() {
        let base = spawn_upstream(Router::new().route(
            "/nasa/neo/rest/v1/feed",
            json_route(json!({
                "element_count": 3,
                "near_earth_objects": {
                    "2024-06-03": [neo("late", "2024-06-03"), neo("early", "2024-06-01")],
                    "2024-06-02": [neo("middle", "2024-06-02")]
                }
            })),
        ))
        .await;
        let dashboard = dashboard_for(&base);

        assert_eq!(sources::asteroids::load(&dashboard).await, 3);

        let lines = dashboard.board().lines(Region::Asteroids).unwrap();
        assert_eq!(lines[0], "3 Asteroids Approaching");
        assert!(lines[1].starts_with("early |"));
        assert!(lines[2].starts_with("middle |"));
        assert!(lines[3].starts_with("late |"));
    }

    #[tokio::test]
    async fn reports_missing_feed_as_no_asteroids() {
        let base = spawn_upstream(
            Router::new().route("/nasa/neo/rest/v1/feed", json_route(json!({}))),
        )
        .await;
        let dashboard = dashboard_for(&base);

        sources::asteroids::load(&dashboard).await;
        assert_eq!(
            dashboard.board().text(Region::Asteroids).unwrap(),
            sources::asteroids::EMPTY
        );
    }
}

mod iss {
    use super::*;

    fn flaky_iss(hits: Arc<AtomicUsize>) -> Router {
        Router::new().route(
            "/iss/satellites/25544",
            get(move || {
                let hits = hits.clone();
                async move {
                    let response: Response = if hits.fetch_add(1, Ordering::SeqCst) == 0 {
                        Json(iss_body()).into_response()
                    } else {
                        StatusCode::SERVICE_UNAVAILABLE.into_response()
                    };
                    response
                }
            }),
        )
    }

    #[tokio::test]
    async fn keeps_last_position_when_a_poll_fails() {
        let hits = Arc::new(AtomicUsize::new(0));
        let base = spawn_upstream(flaky_iss(hits.clone())).await;
        let dashboard = dashboard_for(&base);
        let tracker = IssTracker::default();

        let first = sources::iss::refresh(dashboard.client(), dashboard.board(), &tracker).await;
        let second = sources::iss::refresh(dashboard.client(), dashboard.board(), &tracker).await;

        assert!(first.is_some());
        assert!(second.is_none());
        assert_eq!(hits.load(Ordering::SeqCst), 2);
        assert_eq!(tracker.current(), first);
        let board = dashboard.board();
        assert_eq!(
            board.lines(Region::IssPosition).unwrap()[0],
            "Latitude: 37.7749°"
        );
        assert_eq!(
            board.text(Region::IssLocation).unwrap(),
            "Currently over coordinates 37.77°, -122.42°"
        );
    }

    #[tokio::test]
    async fn shows_fallback_when_never_loaded() {
        let base =
            spawn_upstream(Router::new().route("/iss/satellites/25544", failing_route())).await;
        let dashboard = dashboard_for(&base);

        let state = sources::iss::load(&dashboard).await;

        assert!(state.is_none());
        assert_eq!(
            dashboard.board().text(Region::IssPosition).unwrap(),
            sources::iss::FALLBACK
        );
        assert_eq!(dashboard.active_timers(), vec!["iss"]);
        dashboard.shutdown();
        assert!(dashboard.active_timers().is_empty());
    }

    #[tokio::test]
    async fn satellite_roster_keeps_placeholders_on_failure() {
        let base =
            spawn_upstream(Router::new().route("/iss/satellites/25544", failing_route())).await;
        let dashboard = dashboard_for(&base);

        sources::satellites::load(&dashboard).await;

        let roster = dashboard.board().lines(Region::Satellites).unwrap();
        assert_eq!(roster.len(), 4);
        assert_eq!(roster[0], sources::satellites::FALLBACK);
    }
}

mod apod {
    use super::*;

    #[tokio::test]
    async fn renders_picture() {
        let base = spawn_upstream(full_upstream()).await;
        let dashboard = dashboard_for(&base);

        let apod = sources::apod::load(&dashboard).await;

        assert_eq!(apod.map(|a| a.title), Some("Pillars".to_string()));
        let lines = dashboard.board().lines(Region::Apod).unwrap();
        assert_eq!(lines[0], "Pillars");
        assert_eq!(lines[1], "Image: https://apod/x.jpg");
    }

    #[tokio::test]
    async fn shows_placeholder_when_unavailable() {
        let base =
            spawn_upstream(Router::new().route("/nasa/planetary/apod", failing_route())).await;
        let dashboard = dashboard_for(&base);

        assert!(sources::apod::load(&dashboard).await.is_none());
        assert_eq!(
            dashboard.board().lines(Region::Apod).unwrap()[0],
            sources::apod::UNAVAILABLE
        );
    }
}

mod full_load {
    use super::*;

    #[tokio::test]
    async fn populates_every_region() {
        let base = spawn_upstream(full_upstream()).await;
        let dashboard = dashboard_for(&base);
        let mut loader = ProgressiveLoader::new(dashboard.load_tasks());

        let report = loader.run().await;

        assert_eq!(report.outcomes.len(), 11);
        assert!(report.all_succeeded());
        assert_eq!(loader.status().phase, LoaderPhase::Ready);
        assert_eq!(loader.status().progress.percent(), 100);
        for region in Region::ALL {
            assert!(dashboard.board().contains(region), "missing {:?}", region);
        }
        assert!(dashboard
            .board()
            .text(Region::Crew)
            .unwrap()
            .starts_with("Tracy Dyson (NASA) | Portrait: "));
        let local_moon = render_moon(&moon_phase(Local::now().date_naive()));
        assert_eq!(dashboard.board().lines(Region::MoonPhase).unwrap(), local_moon);
        assert_eq!(
            dashboard.board().text(Region::Spacewalks).unwrap(),
            sources::spacewalks::EMPTY
        );
        dashboard.shutdown();
    }

    #[tokio::test]
    async fn completes_with_every_upstream_down() {
        let base = spawn_upstream(Router::new()).await;
        let dashboard = dashboard_for(&base);
        let mut loader = ProgressiveLoader::new(dashboard.load_tasks());

        loader.run().await;

        assert_eq!(loader.status().progress.percent(), 100);
        let board = dashboard.board();
        assert_eq!(board.text(Region::Crew).unwrap(), sources::crew::FALLBACK);
        assert_eq!(
            board.text(Region::Spacewalks).unwrap(),
            sources::spacewalks::FALLBACK
        );
        assert_eq!(board.text(Region::ActiveEvents).unwrap(), "0");
        assert_eq!(
            board.text(Region::Asteroids).unwrap(),
            sources::asteroids::FALLBACK
        );
        assert!(board.contains(Region::MoonPhase));
        dashboard.shutdown();
    }
}
