//! High-level send orchestration
//!
//! Ties submission and polling together into the single operation the host
//! invokes: take the bridge node's payload, submit it (with the default
//! two-step graph unless the caller supplies one), poll for the result, and
//! hand the payload back, or write it straight onto the node.

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::error::{ClientError, Result};
use crate::poll::PollConfig;
use crate::ComfyClient;
use imagebridge_core::domain::node::BridgeNode;
use imagebridge_core::domain::send::{PollOutcome, SendStatus};
use imagebridge_core::domain::workflow::WorkflowGraph;

impl ComfyClient {
    /// Send a bridge node's image through the server and return the result
    ///
    /// Equivalent to [`send_image_with_cancel`](Self::send_image_with_cancel)
    /// with a token that never fires.
    ///
    /// # Arguments
    /// * `node` - The bridge node carrying the payload to send
    /// * `workflow` - Optional job-graph override; the default two-step graph
    ///   referencing the payload is used when absent
    /// * `poll` - Polling parameters for the result wait
    pub async fn send_image(
        &self,
        node: &BridgeNode,
        workflow: Option<WorkflowGraph>,
        poll: &PollConfig,
    ) -> Result<String> {
        self.send_image_with_cancel(node, workflow, poll, CancellationToken::new())
            .await
    }

    /// Send a bridge node's image, with caller-controlled cancellation
    ///
    /// Fails fast with [`ClientError::EmptyPayload`] before any network I/O
    /// when the node carries nothing to send. Every terminal state of the
    /// send maps to a distinct error variant; the payload itself is the
    /// success value.
    pub async fn send_image_with_cancel(
        &self,
        node: &BridgeNode,
        workflow: Option<WorkflowGraph>,
        poll: &PollConfig,
        cancel: CancellationToken,
    ) -> Result<String> {
        if !node.has_payload() {
            debug!(status = %SendStatus::SubmitFailed, "bridge node has no payload");
            return Err(ClientError::EmptyPayload);
        }

        let workflow = workflow
            .unwrap_or_else(|| WorkflowGraph::default_image_graph(&node.image_to_send));

        let prompt_id = match self.queue_prompt(&workflow).await {
            Ok(id) => id,
            Err(e) => {
                warn!(status = %SendStatus::SubmitFailed, error = %e, "submission failed");
                return Err(e);
            }
        };

        info!(status = %SendStatus::Submitted, %prompt_id, "workflow queued");

        debug!(status = %SendStatus::Polling, %prompt_id, ticks = poll.ticks, "waiting for result");
        let outcome = self.poll_result_with_cancel(&prompt_id, poll, cancel).await;

        let status = SendStatus::from(&outcome);
        info!(%status, %prompt_id, "send finished");

        match outcome {
            PollOutcome::Found(payload) => Ok(payload),
            PollOutcome::NoImage => Err(ClientError::NoImage),
            PollOutcome::TimedOut => Err(ClientError::Timeout(poll.ticks)),
            PollOutcome::Cancelled => Err(ClientError::Cancelled),
        }
    }

    /// Send a bridge node's image and write the result back onto the node
    ///
    /// On success the node's `image_received` field holds the processed
    /// payload; on any failure the node is left untouched.
    pub async fn process_node(
        &self,
        node: &mut BridgeNode,
        workflow: Option<WorkflowGraph>,
        poll: &PollConfig,
    ) -> Result<()> {
        let payload = self.send_image(node, workflow, poll).await?;
        node.set_received(payload);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::extract::{Path, State};
    use axum::routing::{get, post};
    use axum::{Json, Router};
    use std::net::SocketAddr;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::time::Duration;

    /// Full server stub: `/prompt` and `/history/{id}`, with hit counters on
    /// both routes so tests can assert exactly what went over the wire.
    #[derive(Clone)]
    struct ServerStub {
        prompt_hits: Arc<AtomicUsize>,
        history_hits: Arc<AtomicUsize>,
        prompt_body: serde_json::Value,
        history_body: serde_json::Value,
    }

    async fn prompt_handler(
        State(stub): State<ServerStub>,
        Json(_body): Json<serde_json::Value>,
    ) -> Json<serde_json::Value> {
        stub.prompt_hits.fetch_add(1, Ordering::SeqCst);
        Json(stub.prompt_body.clone())
    }

    async fn history_handler(
        State(stub): State<ServerStub>,
        Path(_id): Path<String>,
    ) -> Json<serde_json::Value> {
        stub.history_hits.fetch_add(1, Ordering::SeqCst);
        Json(stub.history_body.clone())
    }

    async fn spawn_server(stub: ServerStub) -> SocketAddr {
        let app = Router::new()
            .route("/prompt", post(prompt_handler))
            .route("/history/{id}", get(history_handler))
            .with_state(stub);
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        addr
    }

    fn stub(prompt_body: serde_json::Value, history_body: serde_json::Value) -> ServerStub {
        ServerStub {
            prompt_hits: Arc::new(AtomicUsize::new(0)),
            history_hits: Arc::new(AtomicUsize::new(0)),
            prompt_body,
            history_body,
        }
    }

    fn fast_poll() -> PollConfig {
        PollConfig::new(Duration::from_millis(10), 5)
    }

    #[tokio::test]
    async fn test_empty_payload_never_touches_the_network() {
        let stub = stub(
            serde_json::json!({ "prompt_id": "p-1" }),
            serde_json::json!({}),
        );
        let prompt_hits = Arc::clone(&stub.prompt_hits);
        let history_hits = Arc::clone(&stub.history_hits);
        let addr = spawn_server(stub).await;

        let client = ComfyClient::new(format!("http://{}", addr));
        let result = client
            .send_image(&BridgeNode::new(), None, &fast_poll())
            .await;

        assert!(matches!(result, Err(ClientError::EmptyPayload)));
        assert_eq!(prompt_hits.load(Ordering::SeqCst), 0);
        assert_eq!(history_hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_prompt_id_aborts_before_polling() {
        let stub = stub(
            serde_json::json!({ "number": 7, "node_errors": {} }),
            serde_json::json!({}),
        );
        let history_hits = Arc::clone(&stub.history_hits);
        let addr = spawn_server(stub).await;

        let client = ComfyClient::new(format!("http://{}", addr));
        let result = client
            .send_image(&BridgeNode::with_payload("aGVsbG8="), None, &fast_poll())
            .await;

        assert!(matches!(result, Err(ClientError::MissingPromptId)));
        assert_eq!(history_hits.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_round_trip_writes_result_onto_node() {
        let stub = stub(
            serde_json::json!({ "prompt_id": "p-1" }),
            serde_json::json!({
                "p-1": { "outputs": { "2": { "images": [ { "image_base64": "cmVzdWx0" } ] } } }
            }),
        );
        let addr = spawn_server(stub).await;

        let client = ComfyClient::new(format!("http://{}", addr));
        let mut node = BridgeNode::with_payload("aGVsbG8=");
        client
            .process_node(&mut node, None, &fast_poll())
            .await
            .unwrap();

        assert_eq!(node.image_received, "cmVzdWx0");
    }

    #[tokio::test]
    async fn test_resolved_job_without_image_maps_to_no_image() {
        let stub = stub(
            serde_json::json!({ "prompt_id": "p-1" }),
            serde_json::json!({
                "p-1": { "outputs": { "2": { "images": [ { "filename": "out.png" } ] } } }
            }),
        );
        let addr = spawn_server(stub).await;

        let client = ComfyClient::new(format!("http://{}", addr));
        let mut node = BridgeNode::with_payload("aGVsbG8=");
        let result = client.process_node(&mut node, None, &fast_poll()).await;

        assert!(matches!(result, Err(ClientError::NoImage)));
        // Failure leaves the node untouched.
        assert!(node.image_received.is_empty());
    }

    #[tokio::test]
    async fn test_unresolved_job_times_out() {
        let stub = stub(
            serde_json::json!({ "prompt_id": "p-1" }),
            serde_json::json!({}),
        );
        let history_hits = Arc::clone(&stub.history_hits);
        let addr = spawn_server(stub).await;

        let client = ComfyClient::new(format!("http://{}", addr));
        let poll = PollConfig::new(Duration::from_millis(10), 3);
        let result = client
            .send_image(&BridgeNode::with_payload("aGVsbG8="), None, &poll)
            .await;

        assert!(matches!(result, Err(ClientError::Timeout(3))));
        assert_eq!(history_hits.load(Ordering::SeqCst), 3);
    }

    #[tokio::test]
    async fn test_workflow_override_is_passed_through() {
        let stub = stub(
            serde_json::json!({ "prompt_id": "p-1" }),
            serde_json::json!({
                "p-1": { "outputs": { "9": { "images": [ { "image_base64": "cmVzdWx0" } ] } } }
            }),
        );
        let addr = spawn_server(stub).await;

        let client = ComfyClient::new(format!("http://{}", addr));
        let override_graph: WorkflowGraph = serde_json::from_value(serde_json::json!({
            "9": { "inputs": { "image": "aGVsbG8=" }, "class_type": "LoadImageBase64" }
        }))
        .unwrap();

        let payload = client
            .send_image(
                &BridgeNode::with_payload("aGVsbG8="),
                Some(override_graph),
                &fast_poll(),
            )
            .await
            .unwrap();

        assert_eq!(payload, "cmVzdWx0");
    }
}
