//! Integration tests for ndn-sensor-client.
//!
//! These drive the public API end to end over a scripted in-memory face
//! standing in for the real forwarder connection.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use ndn_sensor_client::{
    Data, Endpoint, Face, FaceError, FaceEvent, FaceProvider, FaceSession, Interest, MethodBridge,
    MethodCall, MethodOutcome, Name, NdnClientError, RequestEngine, ScalarHandler,
};
use ndn_sensor_client::wire;
use serde_json::{json, Value};

/// One scripted reaction to a `process_events` call.
enum Step {
    Deliver(Vec<FaceEvent>),
    Fail(FaceError),
}

/// A face that replays a fixed script, then goes quiet.
#[derive(Default)]
struct ReplayFace {
    steps: VecDeque<Step>,
}

impl ReplayFace {
    fn new(steps: Vec<Step>) -> Self {
        Self {
            steps: steps.into(),
        }
    }

    fn answering(data: Data) -> Self {
        Self::new(vec![Step::Deliver(vec![FaceEvent::Data(data)])])
    }
}

impl Face for ReplayFace {
    fn express_interest(&mut self, _interest: &Interest) -> Result<(), FaceError> {
        Ok(())
    }

    fn process_events(&mut self) -> Result<Vec<FaceEvent>, FaceError> {
        match self.steps.pop_front() {
            Some(Step::Deliver(events)) => Ok(events),
            Some(Step::Fail(err)) => Err(err),
            None => Ok(Vec::new()),
        }
    }
}

/// Hands out scripted faces in order and records every creation.
struct ReplayProvider {
    faces: VecDeque<ReplayFace>,
    created: Arc<AtomicUsize>,
    endpoints: Arc<Mutex<Vec<Option<Endpoint>>>>,
}

impl ReplayProvider {
    fn new(faces: Vec<ReplayFace>) -> Self {
        Self {
            faces: faces.into(),
            created: Arc::new(AtomicUsize::new(0)),
            endpoints: Arc::new(Mutex::new(Vec::new())),
        }
    }
}

impl FaceProvider for ReplayProvider {
    fn create(&mut self, endpoint: Option<&Endpoint>) -> Result<Box<dyn Face>, FaceError> {
        self.created.fetch_add(1, Ordering::SeqCst);
        self.endpoints
            .lock()
            .unwrap()
            .push(endpoint.cloned());
        Ok(Box::new(self.faces.pop_front().unwrap_or_default()))
    }
}

fn broken() -> FaceError {
    FaceError::Broken(std::io::Error::new(
        std::io::ErrorKind::ConnectionReset,
        "connection reset",
    ))
}

fn bridge_over(provider: ReplayProvider) -> MethodBridge {
    MethodBridge::new(RequestEngine::new(FaceSession::new(Box::new(provider))))
}

#[tokio::test]
async fn test_scalar_flow_through_bridge() {
    let face = ReplayFace::answering(Data::new(
        Name::parse("/esp/sensor/3/data"),
        wire::encode_f64(22.75).to_vec(),
    ));
    let mut bridge = bridge_over(ReplayProvider::new(vec![face]));

    let call = MethodCall::new("getScalar").with_arg("path", "/esp/sensor/3");
    let outcome = bridge.handle(&call).await;

    assert_eq!(outcome, MethodOutcome::Success(json!(22.75)));
}

#[tokio::test]
async fn test_discovery_flow_with_paths() {
    let face = ReplayFace::answering(Data::new(
        Name::parse("/esp/discovery/12/data"),
        b"sensor/1\0sensor/2\0\0sensor/3\0".to_vec(),
    ));
    let mut bridge = bridge_over(ReplayProvider::new(vec![face]));

    let call = MethodCall::new("discover").with_arg("visitedIds", json!([7]));
    let outcome = bridge.handle(&call).await;

    assert_eq!(
        outcome,
        MethodOutcome::Success(json!({
            "responseId": 12,
            "paths": ["sensor/1", "sensor/2", "sensor/3"],
            "isForwarder": false,
        }))
    );
}

#[tokio::test]
async fn test_discovery_flow_forwarder_sentinel() {
    let face = ReplayFace::answering(Data::new(Name::parse("/esp/discovery/9/1"), Vec::new()));
    let mut bridge = bridge_over(ReplayProvider::new(vec![face]));

    let call = MethodCall::new("discover").with_arg("visitedIds", json!([]));
    let outcome = bridge.handle(&call).await;

    assert_eq!(
        outcome,
        MethodOutcome::Success(json!({
            "responseId": 9,
            "paths": [],
            "isForwarder": true,
        }))
    );
}

#[tokio::test]
async fn test_link_quality_flow_with_trailing_bytes() {
    let mut content = Vec::new();
    content.extend_from_slice(&wire::encode_i64(101));
    content.extend_from_slice(&wire::encode_f32(0.75));
    content.extend_from_slice(&wire::encode_i64(102));
    content.extend_from_slice(&wire::encode_f32(0.5));
    content.extend_from_slice(&[0xDE, 0xAD, 0xBE]); // partial trailing record

    let face = ReplayFace::answering(Data::new(
        Name::parse("/esp/device/esp-1/linkquality"),
        content,
    ));
    let mut bridge = bridge_over(ReplayProvider::new(vec![face]));

    let call = MethodCall::new("getLinkQuality").with_arg("deviceId", "esp-1");
    let outcome = bridge.handle(&call).await;

    match outcome {
        MethodOutcome::Success(Value::Object(table)) => {
            assert_eq!(table.len(), 2);
            assert_eq!(table["101"].as_f64(), Some(0.75));
            assert_eq!(table["102"].as_f64(), Some(0.5));
        }
        other => panic!("unexpected outcome: {other:?}"),
    }
}

#[tokio::test(start_paused = true)]
async fn test_timeout_resolves_within_latency_bound() {
    let lifetime = Duration::from_millis(200);
    let mut engine = RequestEngine::new(FaceSession::new(Box::new(ReplayProvider::new(vec![
        ReplayFace::default(),
    ]))));

    let start = tokio::time::Instant::now();
    let err = engine
        .execute(Name::parse("/esp/sensor/1"), ScalarHandler::new(), lifetime, true)
        .await
        .unwrap_err();
    let elapsed = start.elapsed();

    assert!(matches!(err, NdnClientError::Timeout));
    assert!(elapsed >= lifetime, "resolved early after {elapsed:?}");
    assert!(
        elapsed <= lifetime + ndn_sensor_client::engine::POLL_INTERVAL,
        "resolved late after {elapsed:?}"
    );
}

#[tokio::test]
async fn test_broken_stream_recovers_on_next_call() {
    let dead = ReplayFace::new(vec![Step::Fail(broken())]);
    let healthy = ReplayFace::answering(Data::new(
        Name::parse("/esp/sensor/5/data"),
        wire::encode_f64(1.125).to_vec(),
    ));
    let provider = ReplayProvider::new(vec![dead, healthy]);
    let created = provider.created.clone();
    let mut bridge = bridge_over(provider);

    let call = MethodCall::new("getScalar").with_arg("path", "/esp/sensor/5");

    let first = bridge.handle(&call).await;
    assert!(matches!(
        first,
        MethodOutcome::Error {
            code: "NDN_CONNECTION_ERROR",
            ..
        }
    ));

    // The dead handle was replaced, so the immediate retry succeeds.
    let second = bridge.handle(&call).await;
    assert_eq!(second, MethodOutcome::Success(json!(1.125)));
    assert_eq!(created.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_set_endpoint_applies_to_next_exchange() {
    let face = ReplayFace::answering(Data::new(
        Name::parse("/esp/sensor/2/data"),
        wire::encode_f64(3.5).to_vec(),
    ));
    let provider = ReplayProvider::new(vec![face]);
    let endpoints = provider.endpoints.clone();
    let mut bridge = bridge_over(provider);

    let set = MethodCall::new("setEndpoint")
        .with_arg("host", "192.168.4.1")
        .with_arg("port", 6363);
    assert_eq!(bridge.handle(&set).await, MethodOutcome::Success(Value::Null));

    let get = MethodCall::new("getScalar").with_arg("path", "/esp/sensor/2");
    assert_eq!(bridge.handle(&get).await, MethodOutcome::Success(json!(3.5)));

    let log = endpoints.lock().unwrap();
    assert_eq!(&*log, &[Some(Endpoint::new("192.168.4.1", 6363))]);
}

#[tokio::test]
async fn test_set_endpoint_twice_is_idempotent() {
    let face = ReplayFace::answering(Data::new(
        Name::parse("/esp/sensor/2/data"),
        wire::encode_f64(0.25).to_vec(),
    ));
    let provider = ReplayProvider::new(vec![face]);
    let endpoints = provider.endpoints.clone();
    let mut bridge = bridge_over(provider);

    let set = MethodCall::new("setEndpoint")
        .with_arg("host", "nfd.local")
        .with_arg("port", 6363);
    bridge.handle(&set).await;
    bridge.handle(&set).await;

    let get = MethodCall::new("getScalar").with_arg("path", "/esp/sensor/2");
    assert_eq!(bridge.handle(&get).await, MethodOutcome::Success(json!(0.25)));

    // One face was opened, against the configured endpoint.
    let log = endpoints.lock().unwrap();
    assert_eq!(&*log, &[Some(Endpoint::new("nfd.local", 6363))]);
}

#[tokio::test]
async fn test_decode_failure_surfaces_as_unknown() {
    let face = ReplayFace::answering(Data::new(
        Name::parse("/esp/sensor/1/data"),
        vec![0u8; 5], // too short for a scalar
    ));
    let mut bridge = bridge_over(ReplayProvider::new(vec![face]));

    let call = MethodCall::new("getScalar").with_arg("path", "/esp/sensor/1");
    let outcome = bridge.handle(&call).await;

    assert!(matches!(
        outcome,
        MethodOutcome::Error {
            code: "NDN_UNKNOWN",
            ..
        }
    ));
}
