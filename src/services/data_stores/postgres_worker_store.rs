use chrono::NaiveDate;
use color_eyre::eyre::eyre;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    CampId, Position, ProjectTag, RegistrationNumber, RoomId, StoreError,
    ValidationError, Worker, WorkerId, WorkerName, WorkerStore,
};

pub struct PostgresWorkerStore {
    pool: PgPool,
}

impl PostgresWorkerStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct WorkerRow {
    id: Uuid,
    camp_id: Uuid,
    name: String,
    registration_number: String,
    project: String,
    entry_date: NaiveDate,
    room_id: Option<Uuid>,
}

impl TryFrom<WorkerRow> for Worker {
    type Error = StoreError;

    fn try_from(row: WorkerRow) -> Result<Self, Self::Error> {
        let invalid =
            |e: ValidationError| StoreError::UnexpectedError(eyre!(e));
        Ok(Worker {
            id: WorkerId::new(row.id),
            camp_id: CampId::new(row.camp_id),
            name: WorkerName::parse(&row.name).map_err(invalid)?,
            registration_number: RegistrationNumber::parse(
                &row.registration_number,
            )
            .map_err(invalid)?,
            project: ProjectTag::parse(&row.project).map_err(invalid)?,
            entry_date: row.entry_date,
            room_id: row.room_id.map(RoomId::new),
        })
    }
}

#[async_trait::async_trait]
impl WorkerStore for PostgresWorkerStore {
    #[tracing::instrument(name = "Getting worker from PostgreSQL", skip_all)]
    async fn get_worker(&self, id: &WorkerId) -> Result<Worker, StoreError> {
        sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT id, camp_id, name, registration_number, project, entry_date, room_id
            FROM workers
            WHERE id = $1
            "#,
        )
        .bind(id.as_ref())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::RowNotFound => StoreError::NotFound,
            e => StoreError::UnexpectedError(eyre!(e)),
        })?
        .try_into()
    }

    #[tracing::instrument(name = "Listing workers from PostgreSQL", skip_all)]
    async fn list_workers(
        &self,
        camp_id: &CampId,
    ) -> Result<Vec<Worker>, StoreError> {
        sqlx::query_as::<_, WorkerRow>(
            r#"
            SELECT id, camp_id, name, registration_number, project, entry_date, room_id
            FROM workers
            WHERE camp_id = $1
            ORDER BY seq
            "#,
        )
        .bind(camp_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?
        .into_iter()
        .map(Worker::try_from)
        .collect()
    }

    #[tracing::instrument(name = "Writing worker to PostgreSQL", skip_all)]
    async fn put_worker(&mut self, worker: Worker) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO workers (id, camp_id, name, registration_number, project, entry_date, room_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                name = EXCLUDED.name,
                registration_number = EXCLUDED.registration_number,
                project = EXCLUDED.project,
                entry_date = EXCLUDED.entry_date,
                room_id = EXCLUDED.room_id
            "#,
        )
        .bind(worker.id.as_ref())
        .bind(worker.camp_id.as_ref())
        .bind(worker.name.as_ref())
        .bind(worker.registration_number.as_ref())
        .bind(worker.project.as_ref())
        .bind(worker.entry_date)
        .bind(worker.room_id.map(|id| *id.as_ref()))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }

    #[tracing::instrument(name = "Deleting worker from PostgreSQL", skip_all)]
    async fn delete_worker(
        &mut self,
        id: &WorkerId,
    ) -> Result<Position, StoreError> {
        sqlx::query_scalar::<_, i64>(
            "DELETE FROM workers WHERE id = $1 RETURNING seq",
        )
        .bind(id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?
        .map(Position::new)
        .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(name = "Restoring worker in PostgreSQL", skip_all)]
    async fn restore_worker(
        &mut self,
        worker: Worker,
        position: Position,
    ) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO workers (seq, id, camp_id, name, registration_number, project, entry_date, room_id)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (id) DO UPDATE SET
                seq = EXCLUDED.seq,
                name = EXCLUDED.name,
                registration_number = EXCLUDED.registration_number,
                project = EXCLUDED.project,
                entry_date = EXCLUDED.entry_date,
                room_id = EXCLUDED.room_id
            "#,
        )
        .bind(position.value_of())
        .bind(worker.id.as_ref())
        .bind(worker.camp_id.as_ref())
        .bind(worker.name.as_ref())
        .bind(worker.registration_number.as_ref())
        .bind(worker.project.as_ref())
        .bind(worker.entry_date)
        .bind(worker.room_id.map(|id| *id.as_ref()))
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }
}
