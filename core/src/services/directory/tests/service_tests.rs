//! Unit tests for the client directory

use chrono::{Duration, TimeZone, Utc};
use std::sync::Arc;
use uuid::Uuid;

use eb_shared::Pagination;

use crate::domain::entities::{Account, AdminProfile, ClientProfile};
use crate::errors::DomainError;
use crate::repositories::{AccountRepository, ClientQuery, InMemoryAccountRepository};
use crate::services::directory::ClientDirectory;

async fn seed(repo: &InMemoryAccountRepository, count: u32) {
    let start = Utc.with_ymd_and_hms(2024, 2, 1, 8, 0, 0).unwrap();
    for n in 0..count {
        let created = start + Duration::hours(n as i64);
        let mut account = Account::new_client(
            &format!("buyer{n}@firm.ng"),
            format!("Buyer {n}"),
            "hash".to_string(),
            ClientProfile {
                company_name: format!("Firm {n}"),
                company_address: "Abuja".to_string(),
                phone_number: format!("+2349000000{n:03}"),
                alternate_phone_number: format!("+2349100000{n:03}"),
                rc_number: format!("RC{n:05}"),
                postal_code: "900001".to_string(),
                cac_document: "doc.pdf".to_string(),
            },
            created,
        );
        account.mark_verified(created);
        repo.create(account).await.unwrap();
    }
}

#[tokio::test]
async fn test_default_page() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    seed(&repo, 15).await;
    let directory = ClientDirectory::new(repo);

    let page = directory.list_clients(ClientQuery::default()).await.unwrap();
    assert_eq!(page.items.len(), 10);
    assert_eq!(page.meta.per_page, 10);
    assert_eq!(page.meta.current_page, 1);
    assert_eq!(page.meta.last_page, 2);
    assert_eq!(page.meta.total, 15);
}

#[tokio::test]
async fn test_page_past_the_end() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    seed(&repo, 15).await;
    let directory = ClientDirectory::new(repo);

    let query = ClientQuery {
        pagination: Pagination::new(3, 10),
        ..Default::default()
    };
    match directory.list_clients(query).await {
        Err(DomainError::Validation { message }) => assert_eq!(message, "This page does not exist"),
        other => panic!("Expected validation error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_empty_directory_first_page() {
    let directory = ClientDirectory::new(Arc::new(InMemoryAccountRepository::new()));
    let page = directory.list_clients(ClientQuery::default()).await.unwrap();
    assert!(page.is_empty());
    assert_eq!(page.meta.last_page, 0);
}

#[tokio::test]
async fn test_inverted_date_range() {
    let directory = ClientDirectory::new(Arc::new(InMemoryAccountRepository::new()));
    let now = Utc::now();
    let query = ClientQuery {
        created_from: Some(now),
        created_to: Some(now - Duration::days(1)),
        ..Default::default()
    };
    assert!(matches!(
        directory.list_clients(query).await,
        Err(DomainError::Validation { .. })
    ));
}

#[tokio::test]
async fn test_get_client() {
    let repo = Arc::new(InMemoryAccountRepository::new());
    seed(&repo, 1).await;
    let admin = repo
        .create(Account::new_admin(
            "root@e-biding.ng",
            "hash".to_string(),
            AdminProfile {
                user_name: "root".to_string(),
                first_name: "R".to_string(),
                last_name: "Oot".to_string(),
            },
            Utc::now(),
        ))
        .await
        .unwrap();
    let directory = ClientDirectory::new(repo.clone());

    let client = repo.find_by_email("buyer0@firm.ng").await.unwrap().unwrap();
    assert_eq!(directory.get_client(client.id).await.unwrap().id, client.id);

    assert!(matches!(
        directory.get_client(admin.id).await,
        Err(DomainError::NotFound { .. })
    ));
    assert!(matches!(
        directory.get_client(Uuid::new_v4()).await,
        Err(DomainError::NotFound { .. })
    ));
}
