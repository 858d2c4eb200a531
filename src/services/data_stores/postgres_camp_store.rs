use std::collections::BTreeSet;

use color_eyre::eyre::eyre;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    Camp, CampCode, CampFilter, CampId, CampName, CampStore, Email,
    StoreError, ValidationError,
};

pub struct PostgresCampStore {
    pool: PgPool,
}

impl PostgresCampStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct CampRow {
    id: Uuid,
    name: String,
    description: Option<String>,
    owner_email: String,
    shared_with: Vec<String>,
    code: String,
}

impl TryFrom<CampRow> for Camp {
    type Error = StoreError;

    fn try_from(row: CampRow) -> Result<Self, Self::Error> {
        let invalid = |e: ValidationError| StoreError::UnexpectedError(eyre!(e));
        Ok(Camp {
            id: CampId::new(row.id),
            name: CampName::parse(&row.name).map_err(invalid)?,
            description: row.description,
            owner_email: Email::parse(&row.owner_email).map_err(invalid)?,
            shared_with: row
                .shared_with
                .iter()
                .map(|email| Email::parse(email))
                .collect::<Result<BTreeSet<_>, _>>()
                .map_err(invalid)?,
            code: CampCode::parse(&row.code).map_err(invalid)?,
        })
    }
}

const SELECT_CAMPS: &str = r#"
    SELECT id, name, description, owner_email, shared_with, code
    FROM camps
"#;

#[async_trait::async_trait]
impl CampStore for PostgresCampStore {
    #[tracing::instrument(name = "Getting camp from PostgreSQL", skip_all)]
    async fn get_camp(&self, id: &CampId) -> Result<Camp, StoreError> {
        sqlx::query_as::<_, CampRow>(&format!("{SELECT_CAMPS} WHERE id = $1"))
            .bind(id.as_ref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| match e {
                sqlx::Error::RowNotFound => StoreError::NotFound,
                e => StoreError::UnexpectedError(eyre!(e)),
            })?
            .try_into()
    }

    #[tracing::instrument(name = "Listing camps from PostgreSQL", skip_all)]
    async fn list_camps(
        &self,
        filter: &CampFilter,
    ) -> Result<Vec<Camp>, StoreError> {
        let rows = match filter {
            CampFilter::All => {
                sqlx::query_as::<_, CampRow>(&format!(
                    "{SELECT_CAMPS} ORDER BY seq"
                ))
                .fetch_all(&self.pool)
                .await
            }
            CampFilter::AccessibleBy(email) => {
                sqlx::query_as::<_, CampRow>(&format!(
                    "{SELECT_CAMPS} WHERE owner_email = $1 OR $1 = ANY(shared_with) ORDER BY seq"
                ))
                .bind(email.as_ref())
                .fetch_all(&self.pool)
                .await
            }
            CampFilter::Code(code) => {
                sqlx::query_as::<_, CampRow>(&format!(
                    "{SELECT_CAMPS} WHERE code = $1 ORDER BY seq"
                ))
                .bind(code.as_ref())
                .fetch_all(&self.pool)
                .await
            }
        }
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?;

        rows.into_iter().map(Camp::try_from).collect()
    }

    #[tracing::instrument(name = "Writing camp to PostgreSQL", skip_all)]
    async fn put_camp(&mut self, camp: Camp) -> Result<(), StoreError> {
        let shared_with: Vec<String> = camp
            .shared_with
            .iter()
            .map(|email| email.as_ref().to_owned())
            .collect();

        sqlx::query(
            r#"
            INSERT INTO camps (id, name, description, owner_email, shared_with, code)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                description = EXCLUDED.description,
                owner_email = EXCLUDED.owner_email,
                shared_with = EXCLUDED.shared_with,
                code = EXCLUDED.code
            "#,
        )
        .bind(camp.id.as_ref())
        .bind(camp.name.as_ref())
        .bind(camp.description.as_deref())
        .bind(camp.owner_email.as_ref())
        .bind(shared_with)
        .bind(camp.code.as_ref())
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }

    #[tracing::instrument(name = "Deleting camp from PostgreSQL", skip_all)]
    async fn delete_camp(&mut self, id: &CampId) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM camps WHERE id = $1")
            .bind(id.as_ref())
            .execute(&self.pool)
            .await
            .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?;

        if result.rows_affected() == 0 {
            return Err(StoreError::NotFound);
        }
        Ok(())
    }
}
