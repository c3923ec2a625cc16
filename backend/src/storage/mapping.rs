//! Field mapping between the UI shape and the storage shape
//!
//! Each entity has one static table pairing its camelCase UI field with the
//! storage column. Conversion is explicit in both directions; nothing is
//! inferred from naming conventions at runtime.

use std::collections::HashSet;

use serde_json::{Map, Value};

use super::Record;

/// Identity column, identical in both shapes
pub const ID: &str = "Id";

/// Display column the platform shows for every record
pub const NAME: &str = "Name";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Plain,
    /// Reference to another table; may come back as `{Id, Name}`
    Lookup,
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub ui: &'static str,
    pub storage: &'static str,
    pub kind: FieldKind,
}

const fn plain(ui: &'static str, storage: &'static str) -> Field {
    Field {
        ui,
        storage,
        kind: FieldKind::Plain,
    }
}

const fn lookup(ui: &'static str, storage: &'static str) -> Field {
    Field {
        ui,
        storage,
        kind: FieldKind::Lookup,
    }
}

/// How the `Name` display column is filled on writes
#[derive(Debug, Clone, Copy)]
pub enum NameRule {
    /// `Name` is itself a mapped field
    Mapped,
    /// Copy of one UI field
    CopyOf(&'static str),
    /// Two UI fields joined with a separator
    Join(&'static str, &'static str, &'static str),
}

#[derive(Debug)]
pub struct FieldMap {
    pub entity: &'static str,
    pub table: &'static str,
    pub name_rule: NameRule,
    pub fields: &'static [Field],
}

pub static FARM: FieldMap = FieldMap {
    entity: "Farm",
    table: "farm_c",
    name_rule: NameRule::Mapped,
    fields: &[
        plain("Id", ID),
        plain("name", NAME),
        plain("size", "size_c"),
        plain("sizeUnit", "size_unit_c"),
        plain("location", "location_c"),
        plain("soilType", "soil_type_c"),
        plain("farmType", "farm_type_c"),
        plain("notes", "notes_c"),
        plain("contactNumber", "contact_number_c"),
        plain("gpsCoordinates", "gps_coordinates_c"),
        plain("waterResource", "water_resource_c"),
        plain("machineryAvailable", "machinery_available_c"),
        plain("createdAt", "created_at_c"),
    ],
};

pub static CROP: FieldMap = FieldMap {
    entity: "Crop",
    table: "crop_c",
    name_rule: NameRule::CopyOf("cropType"),
    fields: &[
        plain("Id", ID),
        lookup("farmId", "farm_id_c"),
        plain("cropType", "crop_type_c"),
        plain("field", "field_c"),
        plain("plantingDate", "planting_date_c"),
        plain("expectedHarvest", "expected_harvest_c"),
        plain("status", "status_c"),
        plain("season", "season_c"),
        plain("cropVariety", "crop_variety_c"),
        plain("germinationDate", "germination_date_c"),
        plain("vegetativeDate", "vegetative_date_c"),
        plain("floweringDate", "flowering_date_c"),
        plain("timeline", "timeline_c"),
        plain("yieldHistory", "yield_history_c"),
    ],
};

pub static TASK: FieldMap = FieldMap {
    entity: "Task",
    table: "task_c",
    name_rule: NameRule::CopyOf("title"),
    fields: &[
        plain("Id", ID),
        lookup("farmId", "farm_id_c"),
        lookup("cropId", "crop_id_c"),
        plain("title", "title_c"),
        plain("type", "type_c"),
        plain("dueDate", "due_date_c"),
        plain("priority", "priority_c"),
        plain("completed", "completed_c"),
    ],
};

pub static TRANSACTION: FieldMap = FieldMap {
    entity: "Transaction",
    table: "transaction_c",
    name_rule: NameRule::Join("category", "type", " - "),
    fields: &[
        plain("Id", ID),
        lookup("farmId", "farm_id_c"),
        plain("type", "type_c"),
        plain("category", "category_c"),
        plain("amount", "amount_c"),
        plain("date", "date_c"),
        plain("description", "description_c"),
    ],
};

pub fn all() -> [&'static FieldMap; 4] {
    [&FARM, &CROP, &TASK, &TRANSACTION]
}

/// Check every table; run once at startup
pub fn validate_all() -> Result<(), String> {
    all().iter().try_for_each(|map| map.validate())
}

fn text(value: Option<&Value>) -> Option<String> {
    match value? {
        Value::String(s) => Some(s.clone()),
        Value::Null => None,
        other => Some(other.to_string()),
    }
}

/// Collapse `{Id, Name}` lookup objects to the bare id
fn flatten_lookup(value: &Value) -> Value {
    match value {
        Value::Object(obj) => obj.get(ID).cloned().unwrap_or(Value::Null),
        other => other.clone(),
    }
}

impl FieldMap {
    /// Storage columns to request, `Name` included
    pub fn columns(&self) -> Vec<&'static str> {
        let mut columns: Vec<&'static str> = self.fields.iter().map(|f| f.storage).collect();
        if !columns.contains(&NAME) {
            columns.push(NAME);
        }
        columns
    }

    /// No duplicate names on either side, and `Id` maps to `Id`
    pub fn validate(&self) -> Result<(), String> {
        let mut ui_names = HashSet::new();
        let mut storage_names = HashSet::new();
        for field in self.fields {
            if !ui_names.insert(field.ui) {
                return Err(format!("{}: duplicate UI field {}", self.table, field.ui));
            }
            if !storage_names.insert(field.storage) {
                return Err(format!(
                    "{}: duplicate storage field {}",
                    self.table, field.storage
                ));
            }
        }

        let id_mapped = self.fields.iter().any(|f| f.ui == ID && f.storage == ID);
        if !id_mapped {
            return Err(format!("{}: Id is not mapped", self.table));
        }

        if !matches!(self.name_rule, NameRule::Mapped) && storage_names.contains(NAME) {
            return Err(format!(
                "{}: Name is both mapped and derived",
                self.table
            ));
        }

        Ok(())
    }

    /// UI object to storage record. Only keys present in `ui` are written,
    /// and `Id` never is; the store owns identity.
    pub fn to_storage(&self, ui: &Map<String, Value>) -> Record {
        let mut record = Record::new();
        for field in self.fields.iter().filter(|f| f.ui != ID) {
            if let Some(value) = ui.get(field.ui) {
                record.insert(field.storage.to_string(), value.clone());
            }
        }

        let name = match self.name_rule {
            NameRule::Mapped => None,
            NameRule::CopyOf(source) => text(ui.get(source)),
            NameRule::Join(first, second, separator) => {
                match (text(ui.get(first)), text(ui.get(second))) {
                    (Some(a), Some(b)) => Some(format!("{}{}{}", a, separator, b)),
                    _ => None,
                }
            }
        };
        if let Some(name) = name {
            record.insert(NAME.to_string(), Value::String(name));
        }

        record
    }

    /// Storage record to UI object; unmapped columns are dropped and nulls
    /// are treated as absent
    pub fn to_ui(&self, record: &Record) -> Map<String, Value> {
        let mut ui = Map::new();
        for field in self.fields {
            let Some(value) = record.get(field.storage) else {
                continue;
            };
            let value = match field.kind {
                FieldKind::Plain => value.clone(),
                FieldKind::Lookup => flatten_lookup(value),
            };
            if !value.is_null() {
                ui.insert(field.ui.to_string(), value);
            }
        }
        ui
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_tables_are_consistent() {
        assert!(validate_all().is_ok());
    }

    #[test]
    fn test_duplicate_storage_name_rejected() {
        static BROKEN: FieldMap = FieldMap {
            entity: "Broken",
            table: "broken_c",
            name_rule: NameRule::Mapped,
            fields: &[
                Field { ui: "Id", storage: "Id", kind: FieldKind::Plain },
                Field { ui: "a", storage: "x_c", kind: FieldKind::Plain },
                Field { ui: "b", storage: "x_c", kind: FieldKind::Plain },
            ],
        };
        assert!(BROKEN.validate().is_err());
    }

    #[test]
    fn test_farm_name_maps_to_name_column() {
        let record = FARM.to_storage(&object(json!({
            "name": "Green Acres",
            "sizeUnit": "hectares",
            "size": 12.5
        })));
        assert_eq!(record["Name"], "Green Acres");
        assert_eq!(record["size_unit_c"], "hectares");
        assert_eq!(record["size_c"], 12.5);
    }

    #[test]
    fn test_only_supplied_fields_written() {
        let record = TASK.to_storage(&object(json!({ "completed": true })));
        assert_eq!(record.len(), 1);
        assert_eq!(record["completed_c"], true);
    }

    #[test]
    fn test_id_is_never_written() {
        let record = CROP.to_storage(&object(json!({ "Id": 4, "field": "East" })));
        assert!(!record.contains_key("Id"));
    }

    #[test]
    fn test_label_columns() {
        let crop = CROP.to_storage(&object(json!({ "cropType": "Corn" })));
        assert_eq!(crop["Name"], "Corn");

        let tx = TRANSACTION.to_storage(&object(json!({
            "category": "Seeds",
            "type": "expense"
        })));
        assert_eq!(tx["Name"], "Seeds - expense");

        let partial = TRANSACTION.to_storage(&object(json!({ "category": "Seeds" })));
        assert!(!partial.contains_key("Name"));
    }

    #[test]
    fn test_lookup_object_flattened() {
        let record = object(json!({
            "Id": 7,
            "Name": "Weed rows",
            "title_c": "Weed rows",
            "farm_id_c": { "Id": 2, "Name": "Green Acres" },
            "crop_id_c": 5,
            "notes_c": "unmapped"
        }));
        let ui = TASK.to_ui(&record);
        assert_eq!(ui["Id"], 7);
        assert_eq!(ui["farmId"], 2);
        assert_eq!(ui["cropId"], 5);
        assert_eq!(ui["title"], "Weed rows");
        assert!(!ui.contains_key("notes"));
        assert!(!ui.contains_key("Name"));
    }

    #[test]
    fn test_null_columns_are_absent() {
        let ui = TRANSACTION.to_ui(&object(json!({ "Id": 1, "description_c": null })));
        assert!(!ui.contains_key("description"));
    }

    #[test]
    fn test_columns_include_name() {
        assert!(TASK.columns().contains(&"Name"));
        assert_eq!(FARM.columns().iter().filter(|c| **c == "Name").count(), 1);
    }
}
