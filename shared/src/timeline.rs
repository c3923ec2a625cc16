//! Crop growth timeline and yield history

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::calendar::add_days;
use crate::models::{Crop, CropStatus, Farm, StageStatus, YieldRecord, YIELD_UNIT};

/// Growth stages, in order
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum GrowthStage {
    #[serde(rename = "Planted")]
    Planted,
    #[serde(rename = "Germination")]
    Germination,
    #[serde(rename = "Vegetative Growth")]
    Vegetative,
    #[serde(rename = "Flowering")]
    Flowering,
    #[serde(rename = "Harvest Ready")]
    HarvestReady,
}

impl GrowthStage {
    pub const ALL: [GrowthStage; 5] = [
        GrowthStage::Planted,
        GrowthStage::Germination,
        GrowthStage::Vegetative,
        GrowthStage::Flowering,
        GrowthStage::HarvestReady,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            GrowthStage::Planted => "Planted",
            GrowthStage::Germination => "Germination",
            GrowthStage::Vegetative => "Vegetative Growth",
            GrowthStage::Flowering => "Flowering",
            GrowthStage::HarvestReady => "Harvest Ready",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            GrowthStage::Planted => "Seeds planted in field",
            GrowthStage::Germination => "Seeds sprouting from soil",
            GrowthStage::Vegetative => "Leaf and stem development",
            GrowthStage::Flowering => "Reproductive phase begins",
            GrowthStage::HarvestReady => "Crop ready for harvesting",
        }
    }

    /// Days after planting when the stage is assumed to begin, absent a
    /// recorded date
    fn default_offset_days(&self) -> Option<i64> {
        match self {
            GrowthStage::Germination => Some(7),
            GrowthStage::Vegetative => Some(21),
            GrowthStage::Flowering => Some(60),
            GrowthStage::Planted | GrowthStage::HarvestReady => None,
        }
    }

    fn date_for(&self, crop: &Crop) -> NaiveDate {
        let recorded = match self {
            GrowthStage::Planted => Some(crop.planting_date),
            GrowthStage::Germination => crop.germination_date,
            GrowthStage::Vegetative => crop.vegetative_date,
            GrowthStage::Flowering => crop.flowering_date,
            GrowthStage::HarvestReady => Some(crop.expected_harvest),
        };
        recorded.unwrap_or_else(|| {
            add_days(crop.planting_date, self.default_offset_days().unwrap_or(0))
        })
    }

    fn status_for(&self, crop: &Crop) -> StageStatus {
        let stored = crop.timeline.as_ref();
        let growing = crop.status == CropStatus::Growing;
        let ready = crop.status == CropStatus::Ready;

        match self {
            GrowthStage::Planted => StageStatus::Completed,
            GrowthStage::Germination => stored
                .and_then(|t| t.germination)
                .unwrap_or(StageStatus::Completed),
            GrowthStage::Vegetative => stored.and_then(|t| t.vegetative).unwrap_or(if growing {
                StageStatus::Current
            } else {
                StageStatus::Completed
            }),
            GrowthStage::Flowering => stored.and_then(|t| t.flowering).unwrap_or(if ready {
                StageStatus::Completed
            } else {
                StageStatus::Pending
            }),
            GrowthStage::HarvestReady => {
                if ready {
                    StageStatus::Completed
                } else {
                    StageStatus::Pending
                }
            }
        }
    }
}

impl std::fmt::Display for GrowthStage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// One row of a crop's growth timeline
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StageEntry {
    pub stage: GrowthStage,
    pub date: NaiveDate,
    pub status: StageStatus,
    pub description: String,
}

/// Synthesize the five-stage timeline for a crop
pub fn growth_timeline(crop: &Crop) -> Vec<StageEntry> {
    GrowthStage::ALL
        .iter()
        .map(|stage| StageEntry {
            stage: *stage,
            date: stage.date_for(crop),
            status: stage.status_for(crop),
            description: stage.description().to_string(),
        })
        .collect()
}

/// Share of completed stages, as a whole percentage
pub fn progress_percent(timeline: &[StageEntry]) -> u32 {
    if timeline.is_empty() {
        return 0;
    }
    let completed = timeline
        .iter()
        .filter(|e| e.status == StageStatus::Completed)
        .count() as f64;
    (completed / timeline.len() as f64 * 100.0).round() as u32
}

/// Reference yields for the three past seasons followed by this season's projection
fn yield_profile(crop_type: &str) -> [u32; 4] {
    match crop_type {
        "Corn" => [85, 92, 88, 95],
        "Soybeans" => [45, 52, 49, 55],
        "Wheat" => [65, 68, 62, 70],
        "Tomatoes" => [120, 115, 128, 135],
        "Potatoes" => [95, 102, 98, 108],
        _ => [75, 80, 85, 90],
    }
}

/// Yield history for a crop type over `current_year - 3 ..= current_year`.
/// The last entry is a projection.
pub fn yield_history(crop_type: &str, current_year: i32) -> Vec<YieldRecord> {
    let profile = yield_profile(crop_type);
    let first_year = current_year - (profile.len() as i32 - 1);
    profile
        .iter()
        .enumerate()
        .map(|(i, value)| YieldRecord {
            year: first_year + i as i32,
            amount: Decimal::from(*value),
            unit: YIELD_UNIT.to_string(),
            projected: i == profile.len() - 1,
        })
        .collect()
}

/// Everything the crop detail view shows
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CropDetail {
    #[serde(flatten)]
    pub crop: Crop,
    pub farm_name: String,
    /// Named apart from the crop's stored `timeline` overrides
    pub growth_timeline: Vec<StageEntry>,
    pub progress: u32,
    pub yield_history: Vec<YieldRecord>,
}

/// Recorded yields with the latest entry marked as the projection
fn supplied_history(mut records: Vec<YieldRecord>) -> Vec<YieldRecord> {
    let last = records.len().saturating_sub(1);
    for (i, record) in records.iter_mut().enumerate() {
        record.projected = i == last;
    }
    records
}

/// Detail view for a crop. Recorded yields are used when the crop has
/// them, otherwise the history is synthesized from the crop type.
pub fn crop_detail(mut crop: Crop, farms: &[Farm], current_year: i32) -> CropDetail {
    let stages = growth_timeline(&crop);
    let progress = progress_percent(&stages);
    let yield_history = match crop.yield_history.take() {
        Some(records) => supplied_history(records),
        None => yield_history(&crop.crop_type, current_year),
    };
    let farm_name = crate::dashboard::farm_name(farms, crop.farm_id).to_string();
    CropDetail {
        crop,
        farm_name,
        growth_timeline: stages,
        progress,
        yield_history,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoredTimeline;
    use crate::types::UNKNOWN_FARM;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn crop(status: CropStatus) -> Crop {
        Crop {
            id: 3,
            farm_id: 1,
            crop_type: "Corn".to_string(),
            field: "North Field".to_string(),
            planting_date: date(2024, 4, 1),
            expected_harvest: date(2024, 9, 15),
            status,
            season: None,
            crop_variety: None,
            germination_date: None,
            vegetative_date: None,
            flowering_date: None,
            timeline: None,
            yield_history: None,
        }
    }

    fn statuses(timeline: &[StageEntry]) -> Vec<StageStatus> {
        timeline.iter().map(|e| e.status).collect()
    }

    #[test]
    fn test_default_stage_dates() {
        let timeline = growth_timeline(&crop(CropStatus::Growing));
        let dates: Vec<_> = timeline.iter().map(|e| e.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2024, 4, 1),
                date(2024, 4, 8),
                date(2024, 4, 22),
                date(2024, 5, 31),
                date(2024, 9, 15),
            ]
        );
    }

    #[test]
    fn test_recorded_dates_win() {
        let mut c = crop(CropStatus::Growing);
        c.germination_date = Some(date(2024, 4, 10));
        let timeline = growth_timeline(&c);
        assert_eq!(timeline[1].date, date(2024, 4, 10));
    }

    #[test]
    fn test_growing_crop_is_forty_percent() {
        let timeline = growth_timeline(&crop(CropStatus::Growing));
        use StageStatus::*;
        assert_eq!(
            statuses(&timeline),
            vec![Completed, Completed, Current, Pending, Pending]
        );
        assert_eq!(progress_percent(&timeline), 40);
    }

    #[test]
    fn test_ready_crop_is_complete() {
        let timeline = growth_timeline(&crop(CropStatus::Ready));
        assert_eq!(progress_percent(&timeline), 100);
    }

    #[test]
    fn test_harvested_crop_keeps_heuristic() {
        let timeline = growth_timeline(&crop(CropStatus::Harvested));
        assert_eq!(progress_percent(&timeline), 60);
    }

    #[test]
    fn test_stored_timeline_overrides() {
        let mut c = crop(CropStatus::Planted);
        c.timeline = Some(StoredTimeline {
            germination: Some(StageStatus::Current),
            vegetative: Some(StageStatus::Pending),
            flowering: None,
        });
        let timeline = growth_timeline(&c);
        use StageStatus::*;
        assert_eq!(
            statuses(&timeline),
            vec![Completed, Current, Pending, Pending, Pending]
        );
        assert_eq!(progress_percent(&timeline), 20);
    }

    #[test]
    fn test_yield_history_for_known_crop() {
        let history = yield_history("Wheat", 2024);
        let years: Vec<_> = history.iter().map(|r| r.year).collect();
        assert_eq!(years, vec![2021, 2022, 2023, 2024]);
        assert_eq!(history[2].amount, Decimal::from(62));
        assert!(history[3].projected);
        assert!(!history[0].projected);
        assert_eq!(history[0].unit, "tons/hectare");
    }

    #[test]
    fn test_yield_history_fallback() {
        let history = yield_history("Lettuce", 2024);
        let amounts: Vec<_> = history.iter().map(|r| r.amount).collect();
        assert_eq!(amounts, vec![75.into(), 80.into(), 85.into(), 90.into()]);
    }

    #[test]
    fn test_detail_with_missing_farm() {
        let detail = crop_detail(crop(CropStatus::Growing), &[], 2024);
        assert_eq!(detail.farm_name, UNKNOWN_FARM);
        assert_eq!(detail.progress, 40);
        let json = serde_json::to_value(&detail).unwrap();
        assert_eq!(json["cropType"], "Corn");
        assert_eq!(json["growthTimeline"][4]["stage"], "Harvest Ready");
        assert_eq!(json["yieldHistory"][0]["yield"], 85.0);
        assert_eq!(json["growthTimeline"][2]["stage"], "Vegetative Growth");
        assert_eq!(detail.growth_timeline[2].stage.label(), "Vegetative Growth");
    }

    #[test]
    fn test_detail_prefers_recorded_yields() {
        let mut planted = crop(CropStatus::Growing);
        planted.yield_history = Some(vec![
            YieldRecord {
                year: 2022,
                amount: Decimal::from(70),
                unit: YIELD_UNIT.to_string(),
                projected: true,
            },
            YieldRecord {
                year: 2023,
                amount: Decimal::from(78),
                unit: YIELD_UNIT.to_string(),
                projected: false,
            },
        ]);

        let detail = crop_detail(planted, &[], 2024);
        let years: Vec<_> = detail.yield_history.iter().map(|y| y.year).collect();
        assert_eq!(years, vec![2022, 2023]);
        let projected: Vec<_> = detail.yield_history.iter().map(|y| y.projected).collect();
        assert_eq!(projected, vec![false, true]);

        // Only one yieldHistory key once the crop is flattened into the detail
        let json = serde_json::to_string(&detail).unwrap();
        assert_eq!(json.matches("\"yieldHistory\"").count(), 1);
    }
}
