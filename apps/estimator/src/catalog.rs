//! # Rate Catalog
//!
//! Priced reference data the technician picks from: equipment, replacement
//! parts, labor rates and travel bands.
//!
//! The built-in catalog mirrors the default price sheet. A TOML file with
//! the same shape replaces it wholesale:
//!
//! ```toml
//! [[equipment]]
//! id = "gas-range"
//! name = "가스레인지"
//! model = "5구 테이블형"
//!
//! [[parts]]
//! id = "ic-5000"
//! name = "점화 코일"
//! partNumber = "IC-5000"
//! price = 35000
//! equipmentId = "gas-range"
//!
//! [[labor]]
//! id = "replace-simple"
//! name = "부품교체(단순)"
//! rate = 30000
//!
//! [[travel]]
//! id = "within-10km"
//! distance = "10km 이내"
//! rate = 20000
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use tracing::info;

use fieldfix_core::validation::{validate_amount, validate_required};
use fieldfix_core::{LaborSelection, Money, TravelRate, ValidationError};

use crate::config::{ConfigError, ConfigResult};

/// A serviced equipment type.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogEquipment {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub model: Option<String>,
}

impl CatalogEquipment {
    fn new(id: &str, name: &str, model: &str) -> Self {
        CatalogEquipment {
            id: id.to_string(),
            name: name.to_string(),
            model: Some(model.to_string()),
        }
    }
}

/// A replacement part with its list price.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogPart {
    pub id: String,
    pub name: String,
    pub part_number: String,
    pub price: Money,
    pub equipment_id: String,
}

impl CatalogPart {
    fn new(equipment_id: &str, name: &str, part_number: &str, price: i64) -> Self {
        CatalogPart {
            id: part_number.to_lowercase(),
            name: name.to_string(),
            part_number: part_number.to_string(),
            price: Money::from_won(price),
            equipment_id: equipment_id.to_string(),
        }
    }
}

/// All priced reference data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RateCatalog {
    #[serde(default)]
    pub equipment: Vec<CatalogEquipment>,
    #[serde(default)]
    pub parts: Vec<CatalogPart>,
    #[serde(default)]
    pub labor: Vec<LaborSelection>,
    #[serde(default)]
    pub travel: Vec<TravelRate>,
}

impl RateCatalog {
    /// Loads a catalog from a TOML file and checks it.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let contents = std::fs::read_to_string(path)?;
        let catalog: RateCatalog = toml::from_str(&contents)?;
        catalog
            .validate()
            .map_err(|e| ConfigError::Invalid(format!("catalog {}: {}", path.display(), e)))?;

        info!(
            ?path,
            parts = catalog.parts.len(),
            labor = catalog.labor.len(),
            travel = catalog.travel.len(),
            "Rate catalog loaded"
        );
        Ok(catalog)
    }

    /// Loads the catalog at `path`, or the built-in one when `path` is `None`.
    pub fn load_or_builtin(path: Option<&Path>) -> ConfigResult<Self> {
        match path {
            Some(path) => Self::load(path),
            None => Ok(Self::default()),
        }
    }

    /// Checks that ids are unique per table and prices are not negative.
    pub fn validate(&self) -> Result<(), ValidationError> {
        unique_ids("equipment", self.equipment.iter().map(|e| e.id.as_str()))?;
        unique_ids("part", self.parts.iter().map(|p| p.id.as_str()))?;
        unique_ids("labor", self.labor.iter().map(|l| l.id.as_str()))?;
        unique_ids("travel", self.travel.iter().map(|t| t.id.as_str()))?;

        for part in &self.parts {
            validate_required("part name", &part.name)?;
            validate_amount("part price", part.price)?;
        }
        for labor in &self.labor {
            validate_amount("labor rate", labor.rate)?;
        }
        for travel in &self.travel {
            validate_amount("travel rate", travel.rate)?;
        }
        Ok(())
    }

    pub fn equipment(&self, id: &str) -> Option<&CatalogEquipment> {
        self.equipment.iter().find(|e| e.id == id)
    }

    pub fn part(&self, id: &str) -> Option<&CatalogPart> {
        self.parts.iter().find(|p| p.id == id)
    }

    /// Parts that fit the given equipment, in catalog order.
    pub fn parts_for<'a>(&'a self, equipment_id: &'a str) -> impl Iterator<Item = &'a CatalogPart> {
        self.parts.iter().filter(move |p| p.equipment_id == equipment_id)
    }

    pub fn labor(&self, id: &str) -> Option<&LaborSelection> {
        self.labor.iter().find(|l| l.id == id)
    }

    pub fn travel(&self, id: &str) -> Option<&TravelRate> {
        self.travel.iter().find(|t| t.id == id)
    }
}

fn unique_ids<'a>(
    table: &str,
    ids: impl Iterator<Item = &'a str>,
) -> Result<(), ValidationError> {
    let mut seen = HashSet::new();
    for id in ids {
        validate_required(&format!("{} id", table), id)?;
        if !seen.insert(id) {
            return Err(ValidationError::InvalidFormat {
                field: format!("{} id", table),
                reason: format!("duplicate id '{}'", id),
            });
        }
    }
    Ok(())
}

impl Default for RateCatalog {
    fn default() -> Self {
        let won = Money::from_won;

        RateCatalog {
            equipment: vec![
                CatalogEquipment::new("gas-range", "가스레인지", "5구 테이블형"),
                CatalogEquipment::new("fryer", "튀김기", "1조 2구 전기식"),
                CatalogEquipment::new("refrigerator", "업소용 냉장고", "45박스 4도어"),
            ],
            parts: vec![
                CatalogPart::new("gas-range", "점화 코일", "IC-5000", 35_000),
                CatalogPart::new("gas-range", "가스 밸브", "GV-200", 85_000),
                CatalogPart::new("gas-range", "버너 캡", "BC-50", 15_000),
                CatalogPart::new("gas-range", "안전장치 센서", "SS-300", 65_000),
                CatalogPart::new("fryer", "히터", "HT-3000", 120_000),
                CatalogPart::new("fryer", "온도 조절기", "TC-400", 95_000),
                CatalogPart::new("fryer", "온도 센서", "TS-200", 42_000),
                CatalogPart::new("fryer", "배수 밸브", "DV-100", 38_000),
                CatalogPart::new("refrigerator", "컴프레서", "CP-1200", 580_000),
                CatalogPart::new("refrigerator", "증발기", "EV-400", 280_000),
                CatalogPart::new("refrigerator", "응축기", "CD-300", 220_000),
                CatalogPart::new("refrigerator", "도어 가스켓", "DG-180", 45_000),
                CatalogPart::new("refrigerator", "온도 조절기", "TC-350", 95_000),
            ],
            labor: vec![
                LaborSelection::new("replace-simple", "부품교체(단순)", won(30_000)),
                LaborSelection::new("replace-complex", "부품교체(복잡)", won(50_000)),
                LaborSelection::new("repair", "수리작업", won(40_000)),
                LaborSelection::new("inspection", "정밀점검", won(25_000)),
                LaborSelection::new("cleaning", "세척/청소", won(20_000)),
            ],
            travel: vec![
                TravelRate::new("within-10km", "10km 이내", won(20_000)),
                TravelRate::new("within-20km", "20km 이내", won(30_000)),
                TravelRate::new("within-30km", "30km 이내", won(40_000)),
                TravelRate::new("within-50km", "50km 이내", won(60_000)),
                TravelRate::new("over-50km", "50km 초과", won(80_000)),
            ],
        }
    }
}
