//! HTTP API tests

use std::sync::Arc;

use axum::http::StatusCode;
use axum_test::TestServer;
use rust_decimal::Decimal;
use serde_json::json;

use core_kernel::{AdapterHealth, Currency, HealthCheckResult, HealthCheckable, Money};
use domain_claims::{EstimatorError, RefundDecision};
use interface_api::config::ApiConfig;
use interface_api::dto::claims::ClaimRecordResponse;
use interface_api::error::ErrorResponse;
use interface_api::handlers::health::{HealthResponse, ReadinessResponse};
use interface_api::{create_router, AppState};
use test_utils::{
    ClaimFixtures, DecisionFixtures, FakeDefectAnalyzer, FakeRefundEstimator, FakeSentimentAnalyzer,
    PipelineHarness, PROCESSING_FAILURE_REASON, STALE_REASON,
};

const ADJUDICATE: &str = "/api/v1/claims/adjudicate";

fn server(harness: &PipelineHarness) -> TestServer {
    let state = AppState::new(Arc::new(harness.pipeline.clone()), ApiConfig::default())
        .with_health_checks(vec![
            harness.sentiment.clone() as Arc<dyn HealthCheckable>,
            harness.defect.clone(),
            harness.estimator.clone(),
        ]);
    TestServer::new(create_router(state)).unwrap()
}

struct Unconfigured;

#[async_trait::async_trait]
impl HealthCheckable for Unconfigured {
    async fn health_check(&self) -> HealthCheckResult {
        HealthCheckResult::new(
            "refund-estimator",
            AdapterHealth::Unhealthy,
            Some("no API key configured".into()),
        )
    }
}

mod adjudicate_tests {
    use super::*;

    #[tokio::test]
    async fn test_eligible_claim_returns_decision() {
        let harness = PipelineHarness::happy_path();
        let server = server(&harness);

        let response = server.post(ADJUDICATE).json(&ClaimFixtures::submission_json()).await;

        response.assert_status_ok();
        let record: ClaimRecordResponse = response.json();
        assert!(record.claim_id.starts_with("CLM-"));
        assert_eq!(record.refund_status, "Partially Approved");
        assert_eq!(record.refund_amount, Decimal::new(2500, 2));
        assert_eq!(record.currency, "USD");
        assert_eq!(record.product_images.len(), 3);
        assert!(record.finalized_at.is_some());
        assert_eq!(harness.estimator.call_count(), 1);
    }

    #[tokio::test]
    async fn test_stale_claim_rejected() {
        let harness = PipelineHarness::happy_path();
        let server = server(&harness);
        let mut body = ClaimFixtures::submission_json();
        body["claim_date"] = json!("2022-05-01");

        let response = server.post(ADJUDICATE).json(&body).await;

        response.assert_status_ok();
        let record: ClaimRecordResponse = response.json();
        assert_eq!(record.refund_status, "Rejected");
        assert!(record.refund_amount.is_zero());
        assert_eq!(record.refund_reason.as_deref(), Some(STALE_REASON));
        assert_eq!(harness.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_estimator_failure_still_200() {
        let harness = PipelineHarness::new(
            FakeSentimentAnalyzer::default(),
            FakeDefectAnalyzer::default(),
            FakeRefundEstimator::failing(EstimatorError::Unavailable("timeout".into())),
        );
        let server = server(&harness);

        let response = server.post(ADJUDICATE).json(&ClaimFixtures::submission_json()).await;

        response.assert_status_ok();
        let record: ClaimRecordResponse = response.json();
        assert_eq!(record.refund_status, "Not Successfully Processed");
        assert_eq!(record.refund_reason.as_deref(), Some(PROCESSING_FAILURE_REASON));
        assert!(record.refund_notes.is_none());
    }

    #[tokio::test]
    async fn test_malformed_date_is_422() {
        let harness = PipelineHarness::happy_path();
        let server = server(&harness);
        let mut body = ClaimFixtures::submission_json();
        body["order_date"] = json!("01/01/2022");

        let response = server.post(ADJUDICATE).json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "validation_error");
        assert_eq!(error.details, Some(vec!["order_date".to_string()]));
        assert_eq!(harness.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_missing_field_is_422() {
        let harness = PipelineHarness::happy_path();
        let server = server(&harness);
        let mut body = ClaimFixtures::submission_json();
        body.as_object_mut().unwrap().remove("product_review");

        let response = server.post(ADJUDICATE).json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = response.json();
        assert_eq!(error.details, Some(vec!["product_review".to_string()]));
    }

    #[tokio::test]
    async fn test_non_numeric_cost_is_422() {
        let harness = PipelineHarness::happy_path();
        let server = server(&harness);
        let mut body = ClaimFixtures::submission_json();
        body["product_cost"] = json!("fifty");

        let response = server.post(ADJUDICATE).json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "validation_error");
        assert_eq!(error.details, Some(vec!["product_cost".to_string()]));
        assert_eq!(harness.total_calls(), 0);
    }

    #[tokio::test]
    async fn test_null_images_accepted() {
        let harness = PipelineHarness::happy_path();
        let server = server(&harness);
        let mut body = ClaimFixtures::submission_json();
        body["product_images"] = serde_json::Value::Null;

        let response = server.post(ADJUDICATE).json(&body).await;

        response.assert_status_ok();
        let record: ClaimRecordResponse = response.json();
        assert!(record.product_images.is_empty());
        assert!(harness.defect.received_requests()[0].0.is_empty());
    }

    #[tokio::test]
    async fn test_null_images_with_bad_cost_is_422() {
        let harness = PipelineHarness::happy_path();
        let server = server(&harness);
        let mut body = ClaimFixtures::submission_json();
        body["product_images"] = serde_json::Value::Null;
        body["product_cost"] = json!("fifty");

        let response = server.post(ADJUDICATE).json(&body).await;

        response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "validation_error");
    }

    #[tokio::test]
    async fn test_sub_cent_refund_amount_not_rounded() {
        let decision = RefundDecision {
            refund_amount: Money::new(Decimal::new(25005, 3), Currency::USD),
            ..DecisionFixtures::partial_refund()
        };
        let harness = PipelineHarness::new(
            FakeSentimentAnalyzer::default(),
            FakeDefectAnalyzer::default(),
            FakeRefundEstimator::returning(decision),
        );
        let server = server(&harness);

        let record: ClaimRecordResponse =
            server.post(ADJUDICATE).json(&ClaimFixtures::submission_json()).await.json();
        assert_eq!(record.refund_amount, Decimal::new(25005, 3));
    }

    #[tokio::test]
    async fn test_caller_claim_id_ignored() {
        let harness = PipelineHarness::happy_path();
        let server = server(&harness);
        let mut body = ClaimFixtures::submission_json();
        body["claim_id"] = json!("CLM-caller-chosen");

        let record: ClaimRecordResponse = server.post(ADJUDICATE).json(&body).await.json();
        assert_ne!(record.claim_id, "CLM-caller-chosen");
    }

    #[tokio::test]
    async fn test_images_optional() {
        let harness = PipelineHarness::happy_path();
        let server = server(&harness);
        let mut body = ClaimFixtures::submission_json();
        body.as_object_mut().unwrap().remove("product_images");

        let response = server.post(ADJUDICATE).json(&body).await;

        response.assert_status_ok();
        let requests = harness.defect.received_requests();
        assert!(requests[0].0.is_empty());
    }
}

mod health_tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let server = server(&PipelineHarness::happy_path());
        let response = server.get("/health").await;
        response.assert_status_ok();
        let body: HealthResponse = response.json();
        assert_eq!(body.status, "healthy");
    }

    #[tokio::test]
    async fn test_ready_when_adapters_healthy() {
        let server = server(&PipelineHarness::happy_path());
        let response = server.get("/health/ready").await;

        response.assert_status_ok();
        let body: ReadinessResponse = response.json();
        assert_eq!(body.status, "ready");
        assert_eq!(body.adapters.len(), 3);
    }

    #[tokio::test]
    async fn test_not_ready_without_credentials() {
        let harness = PipelineHarness::happy_path();
        let state = AppState::new(Arc::new(harness.pipeline.clone()), ApiConfig::default())
            .with_health_checks(vec![Arc::new(Unconfigured) as Arc<dyn HealthCheckable>]);
        let server = TestServer::new(create_router(state)).unwrap();

        let response = server.get("/health/ready").await;

        response.assert_status(StatusCode::SERVICE_UNAVAILABLE);
        let body: ReadinessResponse = response.json();
        assert_eq!(body.status, "not_ready");
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let server = server(&PipelineHarness::happy_path());
        let response = server.get("/api/v1/claims").await;
        response.assert_status(StatusCode::NOT_FOUND);
        let error: ErrorResponse = response.json();
        assert_eq!(error.error, "not_found");
    }
}
