use color_eyre::eyre::eyre;
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::{
    CampId, Capacity, Position, ProjectTag, Room, RoomId, RoomNumber,
    RoomStore, StoreError, ValidationError, WorkerId,
};

pub struct PostgresRoomStore {
    pool: PgPool,
}

impl PostgresRoomStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct RoomRow {
    id: Uuid,
    camp_id: Uuid,
    number: String,
    capacity: i32,
    project: String,
    workers: Vec<Uuid>,
}

impl TryFrom<RoomRow> for Room {
    type Error = StoreError;

    fn try_from(row: RoomRow) -> Result<Self, Self::Error> {
        let invalid =
            |e: ValidationError| StoreError::UnexpectedError(eyre!(e));
        Ok(Room {
            id: RoomId::new(row.id),
            camp_id: CampId::new(row.camp_id),
            number: RoomNumber::parse(&row.number).map_err(invalid)?,
            capacity: Capacity::parse(i64::from(row.capacity))
                .map_err(invalid)?,
            project: ProjectTag::parse(&row.project).map_err(invalid)?,
            workers: row.workers.into_iter().map(WorkerId::new).collect(),
        })
    }
}

#[async_trait::async_trait]
impl RoomStore for PostgresRoomStore {
    #[tracing::instrument(name = "Getting room from PostgreSQL", skip_all)]
    async fn get_room(&self, id: &RoomId) -> Result<Room, StoreError> {
        sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, camp_id, number, capacity, project, workers
            FROM rooms
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

    #[tracing::instrument(name = "Listing rooms from PostgreSQL", skip_all)]
    async fn list_rooms(
        &self,
        camp_id: &CampId,
    ) -> Result<Vec<Room>, StoreError> {
        sqlx::query_as::<_, RoomRow>(
            r#"
            SELECT id, camp_id, number, capacity, project, workers
            FROM rooms
            WHERE camp_id = $1
            ORDER BY seq
            "#,
        )
        .bind(camp_id.as_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?
        .into_iter()
        .map(Room::try_from)
        .collect()
    }

    #[tracing::instrument(name = "Writing room to PostgreSQL", skip_all)]
    async fn put_room(&mut self, room: Room) -> Result<(), StoreError> {
        let workers: Vec<Uuid> =
            room.workers.iter().map(|id| *id.as_ref()).collect();

        sqlx::query(
            r#"
            INSERT INTO rooms (id, camp_id, number, capacity, project, workers)
            VALUES ($1, $2, $3, $4, $5, $6)
            ON CONFLICT (id) DO UPDATE SET
                number = EXCLUDED.number,
                capacity = EXCLUDED.capacity,
                project = EXCLUDED.project,
                workers = EXCLUDED.workers
            "#,
        )
        .bind(room.id.as_ref())
        .bind(room.camp_id.as_ref())
        .bind(room.number.as_ref())
        .bind(room.capacity.value_of() as i32)
        .bind(room.project.as_ref())
        .bind(workers)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }

    #[tracing::instrument(name = "Deleting room from PostgreSQL", skip_all)]
    async fn delete_room(
        &mut self,
        id: &RoomId,
    ) -> Result<Position, StoreError> {
        sqlx::query_scalar::<_, i64>(
            "DELETE FROM rooms WHERE id = $1 RETURNING seq",
        )
        .bind(id.as_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?
        .map(Position::new)
        .ok_or(StoreError::NotFound)
    }

    #[tracing::instrument(name = "Restoring room in PostgreSQL", skip_all)]
    async fn restore_room(
        &mut self,
        room: Room,
        position: Position,
    ) -> Result<(), StoreError> {
        let workers: Vec<Uuid> =
            room.workers.iter().map(|id| *id.as_ref()).collect();

        sqlx::query(
            r#"
            INSERT INTO rooms (seq, id, camp_id, number, capacity, project, workers)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ON CONFLICT (id) DO UPDATE SET
                seq = EXCLUDED.seq,
                number = EXCLUDED.number,
                capacity = EXCLUDED.capacity,
                project = EXCLUDED.project,
                workers = EXCLUDED.workers
            "#,
        )
        .bind(position.value_of())
        .bind(room.id.as_ref())
        .bind(room.camp_id.as_ref())
        .bind(room.number.as_ref())
        .bind(room.capacity.value_of() as i32)
        .bind(room.project.as_ref())
        .bind(workers)
        .execute(&self.pool)
        .await
        .map_err(|e| StoreError::UnexpectedError(eyre!(e)))?;
        Ok(())
    }
}
