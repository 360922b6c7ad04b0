//! MySQL implementation of the AccountRepository trait.
//!
//! One row per account. Client and admin profile fields live in nullable
//! columns; the pending code is flattened into four `pending_*` columns.
//! Saves are conditional on the `version` column.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::mysql::MySqlRow;
use sqlx::{MySql, MySqlPool, QueryBuilder};
use uuid::Uuid;

use eb_core::domain::entities::{
    Account, AccountProfile, AccountRole, AdminProfile, ApprovalState, ClientProfile,
    CodePurpose, PendingCode, VerificationState,
};
use eb_core::errors::DomainError;
use eb_core::repositories::{AccountRepository, ClientQuery};
use eb_shared::utils::validation::normalize_email;
use eb_shared::PaginatedResponse;

use super::{column, internal, like_pattern, violated_unique_key};

const ACCOUNT_COLUMNS: &str = r#"
    id, role, email, display_name, credential_hash, verification, approval,
    company_name, company_address, phone_number, alternate_phone_number,
    rc_number, postal_code, cac_document,
    user_name, first_name, last_name,
    pending_purpose, pending_code_hash, pending_issued_at, pending_expires_at,
    version, created_at, updated_at
"#;

/// MySQL implementation of AccountRepository
#[derive(Clone)]
pub struct MySqlAccountRepository {
    /// Database connection pool
    pool: MySqlPool,
}

/// Nullable profile columns of one row
#[derive(Default)]
struct ProfileColumns {
    company_name: Option<String>,
    company_address: Option<String>,
    phone_number: Option<String>,
    alternate_phone_number: Option<String>,
    rc_number: Option<String>,
    postal_code: Option<String>,
    cac_document: Option<String>,
    user_name: Option<String>,
    first_name: Option<String>,
    last_name: Option<String>,
}

impl From<&AccountProfile> for ProfileColumns {
    fn from(profile: &AccountProfile) -> Self {
        match profile {
            AccountProfile::Client(client) => Self {
                company_name: Some(client.company_name.clone()),
                company_address: Some(client.company_address.clone()),
                phone_number: Some(client.phone_number.clone()),
                alternate_phone_number: Some(client.alternate_phone_number.clone()),
                rc_number: Some(client.rc_number.clone()),
                postal_code: Some(client.postal_code.clone()),
                cac_document: Some(client.cac_document.clone()),
                ..Self::default()
            },
            AccountProfile::Admin(admin) => Self {
                user_name: Some(admin.user_name.clone()),
                first_name: Some(admin.first_name.clone()),
                last_name: Some(admin.last_name.clone()),
                ..Self::default()
            },
        }
    }
}

fn verification_str(state: VerificationState) -> &'static str {
    match state {
        VerificationState::Unverified => "unverified",
        VerificationState::Verified => "verified",
    }
}

fn approval_str(state: ApprovalState) -> &'static str {
    match state {
        ApprovalState::Pending => "pending",
        ApprovalState::Approved => "approved",
    }
}

fn parse_verification(value: &str) -> Result<VerificationState, DomainError> {
    match value {
        "unverified" => Ok(VerificationState::Unverified),
        "verified" => Ok(VerificationState::Verified),
        other => Err(internal("Invalid verification state", other)),
    }
}

fn parse_approval(value: &str) -> Result<ApprovalState, DomainError> {
    match value {
        "pending" => Ok(ApprovalState::Pending),
        "approved" => Ok(ApprovalState::Approved),
        other => Err(internal("Invalid approval state", other)),
    }
}

/// A NULL in a column the row's role requires
fn required(value: Option<String>, name: &str) -> Result<String, DomainError> {
    value.ok_or_else(|| internal("Missing profile column", name))
}

/// Map a failed INSERT/UPDATE, turning unique-index collisions into
/// `DuplicateField`
fn write_error(context: &str, error: sqlx::Error) -> DomainError {
    match violated_unique_key(&error) {
        Some(key) => DomainError::DuplicateField {
            field: key.trim_start_matches("uq_accounts_").to_string(),
        },
        None => internal(context, error),
    }
}

impl MySqlAccountRepository {
    /// Create a new MySQL account repository
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }

    /// Convert database row to Account entity
    fn row_to_account(row: &MySqlRow) -> Result<Account, DomainError> {
        let id: String = column(row, "id")?;
        let role: String = column(row, "role")?;
        let role: AccountRole = role
            .parse()
            .map_err(|e: String| internal("Invalid account role", e))?;

        let profile = match role {
            AccountRole::Client => AccountProfile::Client(ClientProfile {
                company_name: required(column(row, "company_name")?, "company_name")?,
                company_address: required(column(row, "company_address")?, "company_address")?,
                phone_number: required(column(row, "phone_number")?, "phone_number")?,
                alternate_phone_number: required(
                    column(row, "alternate_phone_number")?,
                    "alternate_phone_number",
                )?,
                rc_number: required(column(row, "rc_number")?, "rc_number")?,
                postal_code: required(column(row, "postal_code")?, "postal_code")?,
                cac_document: required(column(row, "cac_document")?, "cac_document")?,
            }),
            AccountRole::Admin => AccountProfile::Admin(AdminProfile {
                user_name: required(column(row, "user_name")?, "user_name")?,
                first_name: required(column(row, "first_name")?, "first_name")?,
                last_name: required(column(row, "last_name")?, "last_name")?,
            }),
        };

        let pending_purpose: Option<String> = column(row, "pending_purpose")?;
        let pending_code = match pending_purpose {
            Some(purpose) => Some(PendingCode::new(
                purpose
                    .parse::<CodePurpose>()
                    .map_err(|e| internal("Invalid code purpose", e))?,
                required(column(row, "pending_code_hash")?, "pending_code_hash")?,
                column::<Option<DateTime<Utc>>>(row, "pending_issued_at")?
                    .ok_or_else(|| internal("Missing profile column", "pending_issued_at"))?,
                column::<Option<DateTime<Utc>>>(row, "pending_expires_at")?
                    .ok_or_else(|| internal("Missing profile column", "pending_expires_at"))?,
            )),
            None => None,
        };

        let verification: String = column(row, "verification")?;
        let approval: String = column(row, "approval")?;

        Ok(Account {
            id: Uuid::parse_str(&id).map_err(|e| internal("Invalid account UUID", e))?,
            email: column(row, "email")?,
            display_name: column(row, "display_name")?,
            profile,
            credential_hash: column(row, "credential_hash")?,
            verification: parse_verification(&verification)?,
            approval: parse_approval(&approval)?,
            pending_code,
            version: column(row, "version")?,
            created_at: column(row, "created_at")?,
            updated_at: column(row, "updated_at")?,
        })
    }

    async fn fetch_one_where(
        &self,
        condition: &str,
        binds: &[&str],
    ) -> Result<Option<Account>, DomainError> {
        let query = format!(
            "SELECT {} FROM accounts WHERE {} LIMIT 1",
            ACCOUNT_COLUMNS, condition
        );
        let mut statement = sqlx::query(&query);
        for value in binds {
            statement = statement.bind(*value);
        }

        let result = statement
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| internal("Failed to find account", e))?;

        match result {
            Some(row) => Ok(Some(Self::row_to_account(&row)?)),
            None => Ok(None),
        }
    }

    async fn exists(&self, id: Uuid) -> Result<bool, DomainError> {
        let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM accounts WHERE id = ?")
            .bind(id.to_string())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to check account existence", e))?;
        Ok(exists > 0)
    }

    /// Why a conditional write touched no row
    async fn explain_miss(&self, id: Uuid) -> DomainError {
        match self.exists(id).await {
            Ok(true) => DomainError::ConcurrentModification,
            Ok(false) => DomainError::not_found("Account"),
            Err(error) => error,
        }
    }
}

fn push_client_filters(builder: &mut QueryBuilder<'_, MySql>, query: &ClientQuery) {
    builder.push(" WHERE role = 'client' AND verification = 'verified'");

    if let Some(from) = query.created_from {
        builder.push(" AND created_at >= ").push_bind(from);
    }
    if let Some(to) = query.created_to {
        builder.push(" AND created_at <= ").push_bind(to);
    }
    if let Some(needle) = query.search.as_deref().filter(|s| !s.trim().is_empty()) {
        let pattern = like_pattern(needle);
        builder.push(" AND (");
        let mut separated = builder.separated(" OR ");
        for name in [
            "company_name",
            "company_address",
            "phone_number",
            "alternate_phone_number",
            "rc_number",
            "display_name",
            "email",
        ] {
            separated
                .push(format!("{} LIKE ", name))
                .push_bind_unseparated(pattern.clone());
        }
        builder.push(")");
    }
}

#[async_trait]
impl AccountRepository for MySqlAccountRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("id = ?", &[&id.to_string()]).await
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<Account>, DomainError> {
        self.fetch_one_where("email = ?", &[&normalize_email(email)])
            .await
    }

    async fn find_by_login(&self, login: &str) -> Result<Option<Account>, DomainError> {
        let login = login.trim().to_lowercase();
        self.fetch_one_where(
            "email = ? OR (role = 'admin' AND user_name = ?)",
            &[&login, &login],
        )
        .await
    }

    async fn create(&self, account: Account) -> Result<Account, DomainError> {
        let query = format!(
            "INSERT INTO accounts ({}) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)",
            ACCOUNT_COLUMNS
        );
        let profile = ProfileColumns::from(&account.profile);
        let pending = account.pending_code.as_ref();

        sqlx::query(&query)
            .bind(account.id.to_string())
            .bind(account.role().as_str())
            .bind(&account.email)
            .bind(&account.display_name)
            .bind(&account.credential_hash)
            .bind(verification_str(account.verification))
            .bind(approval_str(account.approval))
            .bind(profile.company_name)
            .bind(profile.company_address)
            .bind(profile.phone_number)
            .bind(profile.alternate_phone_number)
            .bind(profile.rc_number)
            .bind(profile.postal_code)
            .bind(profile.cac_document)
            .bind(profile.user_name)
            .bind(profile.first_name)
            .bind(profile.last_name)
            .bind(pending.map(|p| p.purpose.as_str()))
            .bind(pending.map(|p| p.code_hash.clone()))
            .bind(pending.map(|p| p.issued_at))
            .bind(pending.map(|p| p.expires_at))
            .bind(account.version)
            .bind(account.created_at)
            .bind(account.updated_at)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to save account", e))?;

        Ok(account)
    }

    async fn update(&self, account: Account) -> Result<Account, DomainError> {
        let query = r#"
            UPDATE accounts SET
                email = ?, display_name = ?, credential_hash = ?,
                verification = ?, approval = ?,
                company_name = ?, company_address = ?, phone_number = ?,
                alternate_phone_number = ?, rc_number = ?, postal_code = ?,
                cac_document = ?, user_name = ?, first_name = ?, last_name = ?,
                pending_purpose = ?, pending_code_hash = ?,
                pending_issued_at = ?, pending_expires_at = ?,
                updated_at = ?, version = version + 1
            WHERE id = ? AND version = ?
        "#;
        let profile = ProfileColumns::from(&account.profile);
        let pending = account.pending_code.as_ref();

        let result = sqlx::query(query)
            .bind(&account.email)
            .bind(&account.display_name)
            .bind(&account.credential_hash)
            .bind(verification_str(account.verification))
            .bind(approval_str(account.approval))
            .bind(profile.company_name)
            .bind(profile.company_address)
            .bind(profile.phone_number)
            .bind(profile.alternate_phone_number)
            .bind(profile.rc_number)
            .bind(profile.postal_code)
            .bind(profile.cac_document)
            .bind(profile.user_name)
            .bind(profile.first_name)
            .bind(profile.last_name)
            .bind(pending.map(|p| p.purpose.as_str()))
            .bind(pending.map(|p| p.code_hash.clone()))
            .bind(pending.map(|p| p.issued_at))
            .bind(pending.map(|p| p.expires_at))
            .bind(account.updated_at)
            .bind(account.id.to_string())
            .bind(account.version)
            .execute(&self.pool)
            .await
            .map_err(|e| write_error("Failed to update account", e))?;

        if result.rows_affected() == 0 {
            return Err(self.explain_miss(account.id).await);
        }

        let mut saved = account;
        saved.version += 1;
        Ok(saved)
    }

    async fn delete(&self, id: Uuid, expected_version: u64) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM accounts WHERE id = ? AND version = ?")
            .bind(id.to_string())
            .bind(expected_version)
            .execute(&self.pool)
            .await
            .map_err(|e| internal("Failed to delete account", e))?;

        if result.rows_affected() == 0 {
            return Err(self.explain_miss(id).await);
        }
        Ok(())
    }

    async fn list_verified_clients(
        &self,
        query: &ClientQuery,
    ) -> Result<PaginatedResponse<Account>, DomainError> {
        let mut count = QueryBuilder::<MySql>::new("SELECT COUNT(*) FROM accounts");
        push_client_filters(&mut count, query);
        let total: i64 = count
            .build_query_scalar()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| internal("Failed to count clients", e))?;

        let mut select =
            QueryBuilder::<MySql>::new(format!("SELECT {} FROM accounts", ACCOUNT_COLUMNS));
        push_client_filters(&mut select, query);
        select
            .push(" ORDER BY created_at DESC LIMIT ")
            .push_bind(u64::from(query.pagination.limit))
            .push(" OFFSET ")
            .push_bind(query.pagination.offset());

        let rows = select
            .build()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| internal("Failed to list clients", e))?;

        let mut accounts = Vec::with_capacity(rows.len());
        for row in rows {
            accounts.push(Self::row_to_account(&row)?);
        }

        Ok(PaginatedResponse::new(
            accounts,
            query.pagination,
            u64::try_from(total).unwrap_or(0),
        ))
    }
}
