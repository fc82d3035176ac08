//! Integration test: full submit-and-poll cycle over HTTP.
//!
//! The local server queues a job and walks it through queued/running/done
//! (or error); the flow runs with a short poll interval.

mod common;

use common::api_server::{ApiServer, Reply};
use genq_core::api::ApiClient;
use genq_core::config::GenqConfig;
use genq_core::flow::{FlowProgress, Outcome, SubmissionFlow};
use genq_core::identity::Identity;
use genq_core::job::{JobId, JobStatus};
use genq_core::media::{MediaInput, MediaKind, MediaOutput, SubmitRequest};
use genq_core::poller::PollOptions;
use genq_core::session::{init_session, Notice};
use genq_core::Error;
use serde_json::json;
use std::time::Duration;

fn fast_poll() -> PollOptions {
    PollOptions {
        interval: Duration::from_millis(20),
        max_wait: Duration::from_secs(10),
        tick_retry: None,
    }
}

fn flow_for(server: &ApiServer) -> SubmissionFlow<ApiClient> {
    let cfg = GenqConfig {
        base_url: server.url().to_string(),
        ..GenqConfig::default()
    };
    SubmissionFlow::new(ApiClient::from_config(&cfg).unwrap(), fast_poll())
}

#[tokio::test]
async fn image_submission_polls_until_done() {
    let server = ApiServer::start();
    server
        .route(
            "POST",
            "/api/image/submit",
            vec![Reply::json(200, json!({"job_id": 11, "status": "queued"}))],
        )
        .route(
            "GET",
            "/api/job/11",
            vec![
                Reply::json(200, json!({"id": 11, "status": "queued"})),
                Reply::json(200, json!({"id": 11, "status": "running", "type": "image"})),
                Reply::json(
                    200,
                    json!({"id": 11, "status": "done", "result": {"url": "https://cdn.test/11.png"}}),
                ),
            ],
        );
    let flow = flow_for(&server);
    let req = SubmitRequest::new(
        Identity::from_raw(5),
        "flux",
        MediaInput::Image {
            prompt: "lighthouse at dusk".to_string(),
        },
    );
    let mut statuses = Vec::new();

    let out = flow
        .submit(&req, None, |p| {
            if let FlowProgress::Polled(j) = p {
                statuses.push(j.status.clone());
            }
        })
        .await
        .unwrap();

    assert_eq!(
        out,
        Outcome::Completed {
            job_id: Some(JobId::from(11_i64)),
            output: MediaOutput::Image {
                url: "https://cdn.test/11.png".to_string()
            },
        }
    );
    assert_eq!(statuses, vec![JobStatus::Queued, JobStatus::Running]);
    assert_eq!(server.count("GET", "/api/job/11"), 3);
    assert!(!flow.control().is_busy(MediaKind::Image));
}

#[tokio::test]
async fn failed_job_reports_server_error() {
    let server = ApiServer::start();
    server
        .route(
            "POST",
            "/api/video/submit",
            vec![Reply::json(200, json!({"job_id": "v-3"}))],
        )
        .route(
            "GET",
            "/api/job/v-3",
            vec![Reply::json(
                200,
                json!({"id": "v-3", "status": "error", "error": "provider timeout"}),
            )],
        );
    let flow = flow_for(&server);
    let req = SubmitRequest::new(
        Identity::from_raw(5),
        "kling",
        MediaInput::Video {
            prompt: "surf".to_string(),
        },
    );

    let err = flow.submit(&req, None, |_| {}).await.unwrap_err();
    match err {
        Error::JobFailed { job_id, message } => {
            assert_eq!(job_id, JobId::from("v-3"));
            assert_eq!(message, "provider timeout");
        }
        other => panic!("expected JobFailed, got {:?}", other),
    }
}

#[tokio::test]
async fn session_init_registers_then_loads_models() {
    let server = ApiServer::start();
    server
        .route("GET", "/api/me?tg_id=77", vec![Reply::json(200, json!({"tg_id": 77}))])
        .route(
            "GET",
            "/api/models",
            vec![Reply::json(200, json!({"chat": [{"id": "a", "title": "A"}]}))],
        );
    let flow = flow_for(&server);

    let session = init_session(flow.api(), Identity::from_raw(77)).await.unwrap();
    assert_eq!(session.notice, Notice::Connected(77));
    assert_eq!(session.catalog.chat[0].id, "a");

    let order: Vec<String> = server.requests().into_iter().map(|r| r.target).collect();
    assert_eq!(order, vec!["/api/me?tg_id=77", "/api/models"]);
}
