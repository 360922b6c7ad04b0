//! Racing transitions on a single account

use std::sync::Arc;

use crate::domain::value_objects::NotificationKind;
use crate::errors::{DomainError, LifecycleError};
use crate::repositories::{AccountRepository, InMemoryAccountRepository};

use super::mocks::{harness, harness_with, seed_client, RacingAccountRepository, SequenceCodeGenerator};

#[tokio::test]
async fn test_racing_confirmations_have_one_winner() {
    let inner = InMemoryAccountRepository::new();
    let account = seed_client(&inner).await;

    // Issue the code through an unsynchronised service first
    let setup = harness_with(
        Arc::new(inner.clone()),
        Arc::new(SequenceCodeGenerator::fixed("123456")),
    );
    setup.service.request_verification(account.id).await.unwrap();

    let racing = harness_with(
        Arc::new(RacingAccountRepository::new(inner.clone(), 2)),
        Arc::new(SequenceCodeGenerator::fixed("123456")),
    );
    let (first, second) = tokio::join!(
        racing.service.confirm_verification(account.id, "123456"),
        racing.service.confirm_verification(account.id, "123456"),
    );

    let outcomes = [first, second];
    let winners = outcomes.iter().filter(|r| r.is_ok()).count();
    assert_eq!(winners, 1);
    assert!(outcomes
        .iter()
        .any(|r| matches!(r, Err(DomainError::ConcurrentModification))));

    let welcomes = racing
        .dispatcher
        .kinds()
        .into_iter()
        .filter(|k| *k == NotificationKind::Welcome)
        .count();
    assert_eq!(welcomes, 1);

    let stored = inner.find_by_id(account.id).await.unwrap().unwrap();
    assert!(stored.is_verified());
}

#[tokio::test]
async fn test_racing_resets_replace_credential_once() {
    let inner = InMemoryAccountRepository::new();
    let account = seed_client(&inner).await;

    let setup = harness_with(
        Arc::new(inner.clone()),
        Arc::new(SequenceCodeGenerator::fixed("555555")),
    );
    setup.service.request_reset(account.id).await.unwrap();

    let racing = harness_with(
        Arc::new(RacingAccountRepository::new(inner.clone(), 2)),
        Arc::new(SequenceCodeGenerator::fixed("555555")),
    );
    let (first, second) = tokio::join!(
        racing
            .service
            .confirm_reset(account.id, "555555", "first-new-pass"),
        racing
            .service
            .confirm_reset(account.id, "555555", "second-new-pass"),
    );

    assert_eq!([&first, &second].iter().filter(|r| r.is_ok()).count(), 1);
    assert_eq!(racing.dispatcher.kinds(), vec![NotificationKind::ResetSuccess]);
}

#[tokio::test]
async fn test_racing_approve_and_reject() {
    let inner = InMemoryAccountRepository::new();
    let account = seed_client(&inner).await;

    let racing = harness_with(
        Arc::new(RacingAccountRepository::new(inner.clone(), 2)),
        Arc::new(SequenceCodeGenerator::fixed("123456")),
    );
    let (approved, rejected) = tokio::join!(
        racing.service.approve(account.id),
        racing.service.reject(account.id),
    );

    assert!(approved.is_ok() ^ rejected.is_ok());
    assert_eq!(racing.dispatcher.sent().len(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_many_concurrent_confirmations_never_double_succeed() {
    let (h, repo) = harness("123456");
    let account = seed_client(repo.as_ref()).await;
    h.service.request_verification(account.id).await.unwrap();

    let mut handles = Vec::new();
    for _ in 0..8 {
        let service = h.service.clone();
        handles.push(tokio::spawn(async move {
            service.confirm_verification(account.id, "123456").await
        }));
    }

    let mut successes = 0;
    for handle in handles {
        match handle.await.unwrap() {
            Ok(_) => successes += 1,
            Err(DomainError::ConcurrentModification)
            | Err(DomainError::Lifecycle(LifecycleError::AlreadyVerified)) => {}
            Err(other) => panic!("Unexpected error: {other:?}"),
        }
    }
    assert_eq!(successes, 1);
}
