use crate::bridge::model::LaneReport;
use crate::workflow::optimizer::Optimizer;
use lanecore::snapshot::TrafficSnapshot;
use log::{info, warn};
use serde_json::json;
use std::path::PathBuf;
use std::sync::{Arc, PoisonError, RwLock};
use warp::{http::StatusCode, Filter, Rejection, Reply};

/// Holds the served snapshot and the HTTP routes around it.
#[derive(Clone)]
pub struct TrafficBridge {
    state: Arc<RwLock<TrafficSnapshot>>,
    optimizer: Arc<Optimizer>,
    static_dir: Option<PathBuf>,
}

impl TrafficBridge {
    pub fn new(optimizer: Optimizer, static_dir: Option<PathBuf>) -> Self {
        let state = Arc::new(RwLock::new(optimizer.initial_snapshot()));
        Self {
            state,
            optimizer: Arc::new(optimizer),
            static_dir,
        }
    }

    pub fn snapshot(&self) -> TrafficSnapshot {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Recomputes and publishes the snapshot for one lane report.
    pub fn ingest(&self, report: &LaneReport) -> anyhow::Result<TrafficSnapshot> {
        let snapshot = self.optimizer.execute(report)?;
        *self.state.write().unwrap_or_else(PoisonError::into_inner) = snapshot.clone();
        info!(
            "lane {} selected: {} vehicles total, {}% capacity",
            snapshot.optimal_lane, snapshot.total_vehicles, snapshot.lane_capacity
        );
        Ok(snapshot)
    }

    /// `GET /data`, `POST /api/update` and, when configured, the dashboard
    /// page itself. Any origin may call the API.
    pub fn routes(
        &self,
    ) -> impl Filter<Extract = (impl Reply,), Error = Rejection> + Clone + Send + Sync + 'static {
        let bridge = self.clone();
        let bridge_filter = warp::any().map(move || bridge.clone());

        let data_route = warp::path("data")
            .and(warp::path::end())
            .and(warp::get())
            .and(bridge_filter.clone())
            .map(|bridge: TrafficBridge| {
                Box::new(warp::reply::json(&bridge.snapshot())) as Box<dyn Reply>
            });

        let update_route = warp::path!("api" / "update")
            .and(warp::post())
            .and(warp::body::json())
            .and(bridge_filter)
            .map(|report: LaneReport, bridge: TrafficBridge| {
                let reply = match bridge.ingest(&report) {
                    Ok(_) => warp::reply::with_status(
                        warp::reply::json(&json!({"status": "ok"})),
                        StatusCode::OK,
                    ),
                    Err(err) => {
                        warn!("rejected lane report: {:#}", err);
                        warp::reply::with_status(
                            warp::reply::json(&json!({
                                "status": "error",
                                "message": err.to_string()
                            })),
                            StatusCode::BAD_REQUEST,
                        )
                    }
                };
                Box::new(reply) as Box<dyn Reply>
            });

        let api = data_route.or(update_route).unify().boxed();

        let routes = match self.static_dir.clone() {
            Some(dir) => api
                .or(warp::fs::dir(dir)
                    .map(|file: warp::fs::File| Box::new(file) as Box<dyn Reply>))
                .unify()
                .boxed(),
            None => api,
        };

        let cors = warp::cors()
            .allow_any_origin()
            .allow_methods(vec!["GET", "POST"])
            .allow_header("content-type");

        routes.with(cors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::workflow::config::ServiceConfig;
    use lanecore::snapshot::{decode_snapshot, LaneId};
    use std::io::Write;

    fn bridge() -> TrafficBridge {
        TrafficBridge::new(Optimizer::new(ServiceConfig::default()), None)
    }

    #[tokio::test]
    async fn data_serves_initial_state() {
        let routes = bridge().routes();
        let response = warp::test::request()
            .method("GET")
            .path("/data")
            .reply(&routes)
            .await;

        assert_eq!(response.status(), StatusCode::OK);
        let snapshot = decode_snapshot(response.body()).unwrap();
        assert_eq!(snapshot.optimal_lane, LaneId::from(2));
        assert_eq!(snapshot.optimization_note, "Waiting for data...");
        assert_eq!(snapshot.traffic_status, "Unknown");
        assert_eq!(snapshot.emergency_lane, LaneId::from(3));
    }

    #[tokio::test]
    async fn update_then_data_reflects_report() {
        let bridge = bridge();
        let routes = bridge.routes();
        let response = warp::test::request()
            .method("POST")
            .path("/api/update")
            .json(&json!({"lanes": {"A": 20, "B": 45, "C": 80}, "emergency_lane": "C"}))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(&response.body()[..], br#"{"status":"ok"}"#);

        let response = warp::test::request()
            .method("GET")
            .path("/data")
            .reply(&routes)
            .await;
        let snapshot = decode_snapshot(response.body()).unwrap();
        assert_eq!(snapshot.optimal_lane, LaneId::from(4));
        assert_eq!(snapshot.total_vehicles.to_string(), "145");
        assert_eq!(snapshot.active_vehicles.to_string(), "20");
        assert_eq!(snapshot.lane_capacity.to_string(), "13");
        assert_eq!(snapshot.emergency_lane, LaneId::from(1));
        assert_eq!(bridge.snapshot(), snapshot);
    }

    #[tokio::test]
    async fn empty_report_is_a_bad_request() {
        let bridge = bridge();
        let routes = bridge.routes();
        let response = warp::test::request()
            .method("POST")
            .path("/api/update")
            .json(&json!({"lanes": {}}))
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(bridge.snapshot().optimization_note, "Waiting for data...");
    }

    #[tokio::test]
    async fn cross_origin_reads_are_allowed() {
        let routes = bridge().routes();
        let response = warp::test::request()
            .method("GET")
            .path("/data")
            .header("origin", "http://localhost:8080")
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response
            .headers()
            .contains_key("access-control-allow-origin"));
    }

    #[tokio::test]
    async fn serves_static_page_when_configured() {
        let dir = tempfile::tempdir().unwrap();
        let mut page = std::fs::File::create(dir.path().join("index.html")).unwrap();
        page.write_all(b"<span id=\"current-time\"></span>").unwrap();

        let bridge = TrafficBridge::new(
            Optimizer::new(ServiceConfig::default()),
            Some(dir.path().to_path_buf()),
        );
        let routes = bridge.routes();
        let response = warp::test::request()
            .method("GET")
            .path("/index.html")
            .reply(&routes)
            .await;
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.body().starts_with(b"<span"));
    }
}
