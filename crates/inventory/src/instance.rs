use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use yanstore_core::{CategoryId, InstanceId, ProductId};

/// Where a physical unit is currently stocked.
///
/// The backend stores a free-form string; the two known warehouses get their
/// own variants and anything else is carried through verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Location {
    Colombia,
    Usa,
    Other(String),
}

impl Location {
    pub fn as_str(&self) -> &str {
        match self {
            Location::Colombia => "Colombia",
            Location::Usa => "USA",
            Location::Other(s) => s,
        }
    }
}

impl From<String> for Location {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Colombia" => Location::Colombia,
            "USA" => Location::Usa,
            _ => Location::Other(value),
        }
    }
}

impl From<&str> for Location {
    fn from(value: &str) -> Self {
        Location::from(value.to_string())
    }
}

impl From<Location> for String {
    fn from(value: Location) -> Self {
        match value {
            Location::Other(s) => s,
            known => known.as_str().to_string(),
        }
    }
}

impl core::fmt::Display for Location {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.pad(self.as_str())
    }
}

/// Lifecycle of an instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InstanceStatus {
    Available,
    Sold,
    #[serde(other)]
    Unknown,
}

impl InstanceStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            InstanceStatus::Available => "available",
            InstanceStatus::Sold => "sold",
            InstanceStatus::Unknown => "unknown",
        }
    }
}

/// Catalog data embedded in each instance by the `/instances/` endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductSnapshot {
    pub name: String,
    pub sku: String,
    pub condition: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub description: Option<String>,
}

/// One physical unit of a product (read-only; edits happen server-side).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventoryInstance {
    pub instance_id: InstanceId,
    pub product_id: ProductId,
    pub base_cost: Decimal,
    pub location: Location,
    pub status: InstanceStatus,
    pub product: ProductSnapshot,
}

impl InventoryInstance {
    pub fn id(&self) -> InstanceId {
        self.instance_id
    }

    pub fn is_available(&self) -> bool {
        self.status == InstanceStatus::Available
    }
}
