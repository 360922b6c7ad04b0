//! Unit tests for lifecycle transitions

use chrono::Duration;
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::entities::{AccountRole, ApprovalState, CodePurpose, VerificationState};
use crate::domain::value_objects::NotificationKind;
use crate::errors::{DomainError, LifecycleError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository};
use crate::services::notification::RecordingDispatcher;
use crate::services::{LifecycleService, LifecycleServiceConfig};

use super::mocks::{
    harness, harness_with, seed_client, t0, test_config, FailingCodeGenerator,
    SequenceCodeGenerator, CLIENT_EMAIL, CLIENT_PASSWORD,
};

fn lifecycle_error(result: Result<impl std::fmt::Debug, DomainError>) -> LifecycleError {
    match result {
        Err(DomainError::Lifecycle(e)) => e,
        other => panic!("Expected lifecycle error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_confirm_without_pending_code() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;

    let result = h.service.confirm_verification(account.id, "123456").await;
    assert_eq!(lifecycle_error(result), LifecycleError::NoPendingCode);
}

#[tokio::test]
async fn test_confirm_with_expired_code_keeps_it() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();

    h.clock.advance(Duration::seconds(601));
    let result = h.service.confirm_verification(account.id, "123456").await;
    assert_eq!(lifecycle_error(result), LifecycleError::CodeExpired);

    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.pending_code_for(CodePurpose::Verification).is_some());
    assert_eq!(stored.verification, VerificationState::Unverified);
}

#[tokio::test]
async fn test_confirm_with_wrong_code() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();
    let before = repo.find_by_id(account.id).await.unwrap().unwrap();

    let result = h.service.confirm_verification(account.id, "654321").await;
    assert_eq!(lifecycle_error(result), LifecycleError::CodeMismatch);

    let after = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(before, after);
}

#[tokio::test]
async fn test_confirm_with_valid_code() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();

    let verified = h
        .service
        .confirm_verification(account.id, "123456")
        .await
        .unwrap();
    assert!(verified.is_verified());
    assert!(verified.pending_code.is_none());

    assert_eq!(
        h.dispatcher.kinds(),
        vec![NotificationKind::VerificationCode, NotificationKind::Welcome]
    );
}

#[tokio::test]
async fn test_request_sends_plaintext_and_stores_hash() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;

    let issued = h.service.request_verification(account.id).await.unwrap();
    assert_eq!(issued.purpose, CodePurpose::Verification);
    assert_eq!(issued.issued_at, t0());
    assert_eq!(issued.expires_at, t0() + Duration::seconds(600));

    assert_eq!(h.dispatcher.last_code_for(CLIENT_EMAIL).as_deref(), Some("123456"));

    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    let pending = stored.pending_code.unwrap();
    assert_ne!(pending.code_hash, "123456");
    assert!(!pending.code_hash.contains("123456"));
    assert!(pending.expires_at > pending.issued_at);
}

#[tokio::test]
async fn test_reissue_overwrites_previous_code() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let h = harness_with(
        repo.clone(),
        Arc::new(SequenceCodeGenerator::new(&["111111", "222222"])),
    );
    let account = seed_client(repo.as_ref()).await;

    h.service.request_verification(account.id).await.unwrap();
    h.clock.advance(Duration::seconds(30));
    let second = h.service.request_verification(account.id).await.unwrap();

    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored.pending_code.as_ref().unwrap().issued_at, second.issued_at);

    let result = h.service.confirm_verification(account.id, "111111").await;
    assert_eq!(lifecycle_error(result), LifecycleError::CodeMismatch);

    h.service
        .confirm_verification(account.id, "222222")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_scenario_confirm_just_before_expiry() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();

    h.clock.set(t0() + Duration::seconds(599));
    let verified = h
        .service
        .confirm_verification(account.id, "123456")
        .await
        .unwrap();
    assert_eq!(verified.verification, VerificationState::Verified);
}

#[tokio::test]
async fn test_scenario_confirm_after_expiry() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();

    h.clock.set(t0() + Duration::seconds(601));
    let result = h.service.confirm_verification(account.id, "123456").await;
    assert_eq!(lifecycle_error(result), LifecycleError::CodeExpired);
}

#[tokio::test]
async fn test_confirm_exactly_at_deadline_is_expired() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();

    h.clock.set(t0() + Duration::seconds(600));
    let result = h.service.confirm_verification(account.id, "123456").await;
    assert_eq!(lifecycle_error(result), LifecycleError::CodeExpired);
}

#[tokio::test]
async fn test_reissue_after_expiry_allows_late_confirmation() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();

    h.clock.advance(Duration::hours(1));
    h.service.request_verification(account.id).await.unwrap();
    h.service
        .confirm_verification(account.id, "123456")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_verified_account_blocks_reentry() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();
    h.service
        .confirm_verification(account.id, "123456")
        .await
        .unwrap();

    let again = h.service.confirm_verification(account.id, "123456").await;
    assert_eq!(lifecycle_error(again), LifecycleError::AlreadyVerified);

    let reissue = h.service.request_verification(account.id).await;
    assert_eq!(lifecycle_error(reissue), LifecycleError::AlreadyVerified);
}

#[tokio::test]
async fn test_reset_flow_replaces_credential() {
    let (h, repo) = harness("987654");
    let account = seed_client(repo.as_ref()).await;

    let issued = h.service.request_reset(account.id).await.unwrap();
    assert_eq!(issued.purpose, CodePurpose::Reset);
    assert_eq!(issued.expires_at, t0() + Duration::seconds(1800));

    let wrong = h
        .service
        .confirm_reset(account.id, "000000", "new-password-1")
        .await;
    assert_eq!(lifecycle_error(wrong), LifecycleError::CodeMismatch);

    h.service
        .confirm_reset(account.id, "987654", "new-password-1")
        .await
        .unwrap();

    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.pending_code.is_none());
    assert_ne!(stored.credential_hash, account.credential_hash);
    assert_eq!(
        h.dispatcher.kinds(),
        vec![NotificationKind::ResetCode, NotificationKind::ResetSuccess]
    );

    let replay = h
        .service
        .confirm_reset(account.id, "987654", "another-password")
        .await;
    assert_eq!(lifecycle_error(replay), LifecycleError::NoPendingCode);
}

#[tokio::test]
async fn test_reset_uses_its_own_ttl() {
    let (h, repo) = harness("987654");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_reset(account.id).await.unwrap();

    h.clock.advance(Duration::seconds(1200));
    h.service
        .confirm_reset(account.id, "987654", "new-password-1")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_reset_code_expires() {
    let (h, repo) = harness("987654");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_reset(account.id).await.unwrap();

    h.clock.advance(Duration::seconds(1800));
    let result = h
        .service
        .confirm_reset(account.id, "987654", "new-password-1")
        .await;
    assert_eq!(lifecycle_error(result), LifecycleError::CodeExpired);
}

#[tokio::test]
async fn test_reset_works_on_verified_account() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();
    h.service
        .confirm_verification(account.id, "123456")
        .await
        .unwrap();

    h.service.request_reset(account.id).await.unwrap();
    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.is_verified());
    assert!(stored.pending_code_for(CodePurpose::Reset).is_some());
}

#[tokio::test]
async fn test_reset_code_cannot_confirm_verification() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();
    h.service.request_reset(account.id).await.unwrap();

    let result = h.service.confirm_verification(account.id, "123456").await;
    assert_eq!(lifecycle_error(result), LifecycleError::NoPendingCode);
}

#[tokio::test]
async fn test_short_new_credential_rejected_without_consuming_code() {
    let (h, repo) = harness("987654");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_reset(account.id).await.unwrap();

    let result = h.service.confirm_reset(account.id, "987654", "short").await;
    assert!(matches!(result, Err(DomainError::Validation { .. })));

    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.pending_code_for(CodePurpose::Reset).is_some());
}

#[tokio::test]
async fn test_approve_then_approve_and_reject_fail() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;

    let approved = h.service.approve(account.id).await.unwrap();
    assert_eq!(approved.approval, ApprovalState::Approved);

    let again = h.service.approve(account.id).await;
    assert_eq!(lifecycle_error(again), LifecycleError::AlreadyApproved);

    let reject = h.service.reject(account.id).await;
    assert_eq!(lifecycle_error(reject), LifecycleError::AlreadyApproved);

    assert!(repo.find_by_id(account.id).await.unwrap().is_some());
    assert_eq!(h.dispatcher.kinds(), vec![NotificationKind::Approved]);
}

#[tokio::test]
async fn test_reject_deletes_and_notifies_snapshot() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;

    let contact = h.service.reject(account.id).await.unwrap();
    assert_eq!(contact.email, CLIENT_EMAIL);
    assert!(repo.find_by_id(account.id).await.unwrap().is_none());

    let sent = h.dispatcher.sent();
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].kind, NotificationKind::Rejected);
    assert_eq!(sent[0].recipient, contact);

    let approve = h.service.approve(account.id).await;
    assert!(matches!(approve, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_randomness_failure_leaves_account_untouched() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    let h = harness_with(repo.clone(), Arc::new(FailingCodeGenerator));
    let account = seed_client(repo.as_ref()).await;

    let result = h.service.request_verification(account.id).await;
    assert_eq!(lifecycle_error(result), LifecycleError::RandomnessUnavailable);

    let stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    assert_eq!(stored, account);
    assert!(h.dispatcher.sent().is_empty());
}

#[tokio::test]
async fn test_corrupted_hash_is_reported() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();

    let mut stored = repo.find_by_id(account.id).await.unwrap().unwrap();
    if let Some(pending) = stored.pending_code.as_mut() {
        pending.code_hash = "not-a-hash".to_string();
    }
    repo.update(stored).await.unwrap();

    let result = h.service.confirm_verification(account.id, "123456").await;
    assert_eq!(lifecycle_error(result), LifecycleError::InvalidHashFormat);
}

#[test]
fn test_code_length_outside_bounds_rejected() {
    for code_length in [0, 3, 13] {
        let config = LifecycleServiceConfig {
            code_length,
            ..test_config()
        };
        let result = LifecycleService::new(
            Arc::new(InMemoryAccountRepository::new()),
            Arc::new(RecordingDispatcher::new()),
            config,
        );
        assert!(
            matches!(result, Err(DomainError::Validation { .. })),
            "code_length {code_length} accepted"
        );
    }
}

#[test]
fn test_oversized_ttl_rejected_at_construction() {
    let config = LifecycleServiceConfig {
        verification_ttl_seconds: 9_000_000_000_000_000,
        ..test_config()
    };
    let result = LifecycleService::new(
        Arc::new(InMemoryAccountRepository::new()),
        Arc::new(RecordingDispatcher::new()),
        config,
    );
    assert!(matches!(result, Err(DomainError::Validation { .. })));
}

#[tokio::test]
async fn test_unknown_account() {
    let (h, _) = harness("123456");
    let id = Uuid::new_v4();

    assert!(matches!(
        h.service.request_verification(id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        h.service.account_id_by_email("ghost@nowhere.io").await,
        Err(DomainError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_login_after_reset_uses_new_credential() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();
    h.service
        .confirm_verification(account.id, "123456")
        .await
        .unwrap();
    h.service.request_reset(account.id).await.unwrap();
    h.service
        .confirm_reset(account.id, "123456", "brand-new-pass")
        .await
        .unwrap();

    assert!(h
        .service
        .authenticate(CLIENT_EMAIL, CLIENT_PASSWORD, AccountRole::Client)
        .await
        .is_err());
    h.service
        .authenticate(CLIENT_EMAIL, "brand-new-pass", AccountRole::Client)
        .await
        .unwrap();
}
