use std::collections::HashMap;
use std::time::Duration;

use astrapatch::board::Region;
use astrapatch::config::*;
use astrapatch::dashboard::Dashboard;
use astrapatch::sources;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::json;
use speculate2::speculate;

fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = vars
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

speculate! {
    before {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let path = dir.path().join("astrapatch").join("config.json");
    }

    describe "defaults" {
        it "points at the public APIs with the demo key" {
            let config = DashboardConfig::default();
            assert_eq!(config.launch_api_url, DEFAULT_LAUNCH_API_URL);
            assert_eq!(config.iss_api_url, DEFAULT_ISS_API_URL);
            assert_eq!(config.nasa_api_url, DEFAULT_NASA_API_URL);
            assert_eq!(config.nasa_api_key, "DEMO_KEY");
        }

        it "uses the dashboard timings" {
            let config = DashboardConfig::default();
            assert_eq!(config.countdown_interval(), Duration::from_secs(1));
            assert_eq!(config.iss_poll_interval(), Duration::from_secs(5));
            assert_eq!(config.reveal_delay(), Duration::from_millis(500));
            assert_eq!(config.request_timeout(), Duration::from_secs(10));
            assert_eq!(config.task_timeout(), None);
            assert_eq!(config.launch_display_limit, 12);
        }
    }

    describe "files" {
        it "round-trips through save and from_file" {
            let config = DashboardConfig {
                nasa_api_key: "my-key".to_string(),
                task_timeout_secs: Some(30),
                ..Default::default()
            };
            config.save(&path).expect("Failed to save config");

            let loaded = DashboardConfig::from_file(&path).expect("Failed to read config");
            assert_eq!(loaded, config);
            assert_eq!(loaded.task_timeout(), Some(Duration::from_secs(30)));
        }

        it "fills missing fields with defaults" {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, r#"{"reveal_delay_ms": 0}"#).unwrap();

            let loaded = DashboardConfig::from_file(&path).unwrap();
            assert_eq!(loaded.reveal_delay(), Duration::ZERO);
            assert_eq!(loaded.nasa_api_key, DEFAULT_NASA_API_KEY);
        }

        it "rejects malformed files" {
            std::fs::create_dir_all(path.parent().unwrap()).unwrap();
            std::fs::write(&path, "{ nope").unwrap();

            assert!(DashboardConfig::from_file(&path).is_err());
        }

        it "uses defaults when the file is missing" {
            let loaded = DashboardConfig::load(Some(path.as_path())).with_overrides(|_| None);
            assert_eq!(loaded.launch_display_limit, 12);
            assert_eq!(loaded.countdown_interval_ms, 1_000);
        }
    }

    describe "environment overrides" {
        it "replaces urls and key" {
            let config = DashboardConfig::default().with_overrides(lookup(&[
                ("ASTRAPATCH_LAUNCH_API_URL", "http://launch.test"),
                ("ASTRAPATCH_ISS_API_URL", "http://iss.test"),
                ("ASTRAPATCH_NASA_API_URL", "http://nasa.test"),
                ("ASTRAPATCH_NASA_API_KEY", "secret"),
                ("ASTRAPATCH_REQUEST_TIMEOUT_SECS", "3"),
            ]));
            assert_eq!(config.launch_api_url, "http://launch.test");
            assert_eq!(config.iss_api_url, "http://iss.test");
            assert_eq!(config.nasa_api_url, "http://nasa.test");
            assert_eq!(config.nasa_api_key, "secret");
            assert_eq!(config.request_timeout(), Duration::from_secs(3));
        }

        it "ignores blank values and unparseable timeouts" {
            let config = DashboardConfig::default().with_overrides(lookup(&[
                ("ASTRAPATCH_NASA_API_KEY", "   "),
                ("ASTRAPATCH_REQUEST_TIMEOUT_SECS", "soon"),
            ]));
            assert_eq!(config, DashboardConfig::default());
        }

        it "ignores a zero request timeout" {
            let config = DashboardConfig::default().with_overrides(lookup(&[
                ("ASTRAPATCH_REQUEST_TIMEOUT_SECS", "0"),
            ]));
            assert_eq!(config.request_timeout(), Duration::from_secs(10));
        }

        it "routes requests to the overridden base url" {
            let crew = tokio_test::block_on(async {
                let router = Router::new().route(
                    "/astronaut/",
                    get(|| async {
                        Json(json!({"results": [{"name": "Tracy Dyson", "agency": {"name": "NASA"}}]}))
                    }),
                );
                let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
                    .await
                    .expect("Failed to bind fake upstream");
                let addr = listener.local_addr().expect("Failed to read local addr");
                tokio::spawn(async move {
                    axum::serve(listener, router).await.ok();
                });

                let base = format!("http://{}", addr);
                let config = DashboardConfig::default()
                    .with_overrides(lookup(&[("ASTRAPATCH_LAUNCH_API_URL", base.as_str())]));
                let dashboard = Dashboard::new(config).expect("Failed to build dashboard");
                sources::crew::load(&dashboard).await;
                dashboard.board().text(Region::Crew)
            });
            assert_eq!(
                crew.as_deref(),
                Some("Tracy Dyson (NASA) | Portrait: https://via.placeholder.com/150")
            );
        }
    }

    describe "launch provider" {
        it "defaults to every provider" {
            assert_eq!(DashboardConfig::default().launch_provider, ALL_PROVIDERS);
        }

        it "stores a trimmed lowercase filter" {
            let config = DashboardConfig::default().with_launch_provider(Some(" SpaceX "));
            assert_eq!(config.launch_provider, "spacex");
        }

        it "keeps the current filter for blank or missing input" {
            let config = DashboardConfig::default()
                .with_launch_provider(Some("Rocket Lab"))
                .with_launch_provider(Some("  "))
                .with_launch_provider(None);
            assert_eq!(config.launch_provider, "rocket lab");
        }
    }
}
