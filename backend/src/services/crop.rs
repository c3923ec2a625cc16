//! Crop management service

use chrono::{Datelike, Local};
use shared::timeline::{crop_detail, CropDetail};
use shared::{validate_input, Crop, CropPatch, NewCrop};

use crate::error::AppResult;
use crate::services::farm::FarmService;
use crate::services::records::{to_object, Records};
use crate::storage::{mapping, RecordStore};

#[derive(Clone)]
pub struct CropService {
    store: RecordStore,
}

impl CropService {
    pub fn new(store: RecordStore) -> Self {
        Self { store }
    }

    fn records(&self) -> Records<'_> {
        Records::new(&self.store, &mapping::CROP)
    }

    pub async fn get_all(&self) -> AppResult<Vec<Crop>> {
        self.records().list().await
    }

    pub async fn get_by_id(&self, raw_id: &str) -> AppResult<Crop> {
        self.records().get(raw_id).await
    }

    pub async fn create(&self, input: NewCrop) -> AppResult<Crop> {
        validate_input(&input)?;
        self.records().create(&to_object(&input)?).await
    }

    pub async fn update(&self, raw_id: &str, patch: CropPatch) -> AppResult<Crop> {
        validate_input(&patch)?;
        self.records().update(raw_id, &to_object(&patch)?).await
    }

    pub async fn delete(&self, raw_id: &str) -> AppResult<bool> {
        self.records().delete(raw_id).await
    }

    /// The crop with its growth timeline, progress and yield history.
    /// The farm list is fetched alongside for the farm name.
    pub async fn get_detail(&self, raw_id: &str) -> AppResult<CropDetail> {
        let farms = FarmService::new(self.store.clone());
        let (crop, farms) = tokio::try_join!(self.get_by_id(raw_id), farms.get_all())?;
        Ok(crop_detail(crop, &farms, Local::now().year()))
    }
}
