//! Typed sort keys and the row comparator.

use core::cmp::Ordering;

use rust_decimal::Decimal;

use crate::instance::InventoryInstance;

/// Columns a list view can be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SortKey {
    InstanceId,
    Name,
    Sku,
    Condition,
    Category,
    Description,
    BaseCost,
    Location,
    Status,
}

/// Header label (lowercased) -> key.
const LABELS: &[(&str, SortKey)] = &[
    ("id", SortKey::InstanceId),
    ("instance_id", SortKey::InstanceId),
    ("name", SortKey::Name),
    ("sku", SortKey::Sku),
    ("condition", SortKey::Condition),
    ("category", SortKey::Category),
    ("category_id", SortKey::Category),
    ("description", SortKey::Description),
    ("cost", SortKey::BaseCost),
    ("base_cost", SortKey::BaseCost),
    ("location", SortKey::Location),
    ("status", SortKey::Status),
];

impl SortKey {
    /// Resolve a column header such as `"SKU"` or `"Name"`.
    pub fn from_label(label: &str) -> Option<Self> {
        let wanted = label.trim().to_lowercase();
        LABELS
            .iter()
            .find(|(l, _)| *l == wanted)
            .map(|(_, key)| *key)
    }

    fn value<'a>(&self, instance: &'a InventoryInstance) -> SortValue<'a> {
        match self {
            SortKey::InstanceId => SortValue::Int(instance.instance_id.get()),
            SortKey::Name => SortValue::Text(&instance.product.name),
            SortKey::Sku => SortValue::Text(&instance.product.sku),
            SortKey::Condition => SortValue::Text(&instance.product.condition),
            SortKey::Category => SortValue::Int(instance.product.category_id.get()),
            SortKey::Description => match &instance.product.description {
                Some(d) => SortValue::Text(d),
                None => SortValue::Missing,
            },
            SortKey::BaseCost => SortValue::Decimal(instance.base_cost),
            SortKey::Location => SortValue::Text(instance.location.as_str()),
            SortKey::Status => SortValue::Text(instance.status.as_str()),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Current sort of a list view. `key == None` keeps fetch order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SortState {
    pub key: Option<SortKey>,
    pub direction: SortDirection,
}

impl SortState {
    /// Header click: same column flips, a new column starts descending.
    pub fn toggle(&mut self, key: SortKey) {
        if self.key == Some(key) {
            self.direction = self.direction.flipped();
        } else {
            self.key = Some(key);
            self.direction = SortDirection::Desc;
        }
    }

    pub fn compare(&self, a: &InventoryInstance, b: &InventoryInstance) -> Ordering {
        let Some(key) = self.key else {
            return Ordering::Equal;
        };
        let ord = key.value(a).cmp_asc(&key.value(b));
        match self.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        }
    }

    /// Stable sort of `indices` (into `instances`) under this state.
    pub fn sort_indices(&self, instances: &[InventoryInstance], indices: &mut [usize]) {
        if self.key.is_none() {
            return;
        }
        indices.sort_by(|&a, &b| self.compare(&instances[a], &instances[b]));
    }
}

#[derive(Debug, Clone, Copy)]
enum SortValue<'a> {
    Text(&'a str),
    Int(i64),
    Decimal(Decimal),
    Missing,
}

impl SortValue<'_> {
    // Missing is greater than everything, so it lands last ascending and first
    // descending.
    fn cmp_asc(&self, other: &Self) -> Ordering {
        match (self, other) {
            (SortValue::Missing, SortValue::Missing) => Ordering::Equal,
            (SortValue::Missing, _) => Ordering::Greater,
            (_, SortValue::Missing) => Ordering::Less,
            (SortValue::Text(a), SortValue::Text(b)) => collate(a, b),
            (SortValue::Int(a), SortValue::Int(b)) => a.cmp(b),
            (SortValue::Decimal(a), SortValue::Decimal(b)) => a.cmp(b),
            _ => Ordering::Equal,
        }
    }
}

/// Locale-style text ordering: base letters first, then case-insensitive,
/// then exact code points.
pub fn collate(a: &str, b: &str) -> Ordering {
    let primary = a.chars().map(fold_base).cmp(b.chars().map(fold_base));
    primary
        .then_with(|| a.to_lowercase().cmp(&b.to_lowercase()))
        .then_with(|| b.cmp(a))
}

fn fold_base(c: char) -> char {
    let lower = c.to_lowercase().next().unwrap_or(c);
    match lower {
        'á' | 'à' | 'â' | 'ä' | 'ã' | 'å' => 'a',
        'é' | 'è' | 'ê' | 'ë' => 'e',
        'í' | 'ì' | 'î' | 'ï' => 'i',
        'ó' | 'ò' | 'ô' | 'ö' | 'õ' => 'o',
        'ú' | 'ù' | 'û' | 'ü' => 'u',
        'ñ' => 'n',
        'ç' => 'c',
        other => other,
    }
}
