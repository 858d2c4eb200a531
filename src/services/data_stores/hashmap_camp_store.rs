use std::collections::HashMap;

use crate::domain::{Camp, CampFilter, CampId, CampStore, StoreError};

#[derive(Default)]
pub struct HashmapCampStore {
    camps: HashMap<CampId, (u64, Camp)>,
    next_sequence: u64,
}

#[async_trait::async_trait]
impl CampStore for HashmapCampStore {
    async fn get_camp(&self, id: &CampId) -> Result<Camp, StoreError> {
        match self.camps.get(id) {
            Some((_, camp)) => Ok(camp.clone()),
            None => Err(StoreError::NotFound),
        }
    }

    async fn list_camps(
        &self,
        filter: &CampFilter,
    ) -> Result<Vec<Camp>, StoreError> {
        let mut camps: Vec<&(u64, Camp)> = self
            .camps
            .values()
            .filter(|(_, camp)| filter.matches(camp))
            .collect();
        camps.sort_by_key(|(sequence, _)| *sequence);
        Ok(camps.into_iter().map(|(_, camp)| camp.clone()).collect())
    }

    async fn put_camp(&mut self, camp: Camp) -> Result<(), StoreError> {
        let sequence = match self.camps.get(&camp.id) {
            Some((sequence, _)) => *sequence,
            None => {
                self.next_sequence += 1;
                self.next_sequence
            }
        };
        self.camps.insert(camp.id, (sequence, camp));
        Ok(())
    }

    async fn delete_camp(&mut self, id: &CampId) -> Result<(), StoreError> {
        match self.camps.remove(id) {
            Some(_) => Ok(()),
            None => Err(StoreError::NotFound),
        }
    }
}
