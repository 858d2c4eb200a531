use std::collections::HashMap;

use crate::domain::{
    CampId, Position, StoreError, Worker, WorkerId, WorkerStore,
};

#[derive(Default)]
pub struct HashmapWorkerStore {
    workers: HashMap<WorkerId, (u64, Worker)>,
    next_sequence: u64,
}

#[async_trait::async_trait]
impl WorkerStore for HashmapWorkerStore {
    async fn get_worker(&self, id: &WorkerId) -> Result<Worker, StoreError> {
        match self.workers.get(id) {
            Some((_, worker)) => Ok(worker.clone()),
            None => Err(StoreError::NotFound),
        }
    }

    async fn list_workers(
        &self,
        camp_id: &CampId,
    ) -> Result<Vec<Worker>, StoreError> {
        let mut workers: Vec<&(u64, Worker)> = self
            .workers
            .values()
            .filter(|(_, worker)| &worker.camp_id == camp_id)
            .collect();
        workers.sort_by_key(|(sequence, _)| *sequence);
        Ok(workers
            .into_iter()
            .map(|(_, worker)| worker.clone())
            .collect())
    }

    async fn put_worker(&mut self, worker: Worker) -> Result<(), StoreError> {
        let sequence = match self.workers.get(&worker.id) {
            Some((sequence, _)) => *sequence,
            None => {
                self.next_sequence += 1;
                self.next_sequence
            }
        };
        self.workers.insert(worker.id, (sequence, worker));
        Ok(())
    }

    async fn delete_worker(
        &mut self,
        id: &WorkerId,
    ) -> Result<Position, StoreError> {
        match self.workers.remove(id) {
            Some((sequence, _)) => Ok(Position::new(sequence as i64)),
            None => Err(StoreError::NotFound),
        }
    }

    async fn restore_worker(
        &mut self,
        worker: Worker,
        position: Position,
    ) -> Result<(), StoreError> {
        self.workers
            .insert(worker.id, (position.value_of() as u64, worker));
        Ok(())
    }
}
