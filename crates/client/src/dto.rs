//! Request/response shapes of the REST backend (other than instances).

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

use yanstore_core::{CategoryId, DomainError, InstanceId, ProductId};
use yanstore_inventory::Location;

/// Row of `GET /categories/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub category_id: CategoryId,
    pub category_name: String,
    #[serde(default)]
    pub parent_category_id: Option<CategoryId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PaymentMethod {
    Credit,
    Cash,
    #[serde(rename = "USD")]
    Usd,
    Trade,
}

impl PaymentMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentMethod::Credit => "Credit",
            PaymentMethod::Cash => "Cash",
            PaymentMethod::Usd => "USD",
            PaymentMethod::Trade => "Trade",
        }
    }
}

impl core::str::FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Credit" => Ok(PaymentMethod::Credit),
            "Cash" => Ok(PaymentMethod::Cash),
            "USD" => Ok(PaymentMethod::Usd),
            "Trade" => Ok(PaymentMethod::Trade),
            other => Err(DomainError::validation(format!(
                "payment method must be one of Credit, Cash, USD, Trade (got {other:?})"
            ))),
        }
    }
}

/// Body of `POST /sales/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SaleRequest {
    pub product_id: ProductId,
    pub sale_price: Decimal,
    pub sale_date: DateTime<Utc>,
    pub payment_method: PaymentMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl SaleRequest {
    pub fn validate(&self) -> Result<(), DomainError> {
        if self.sale_price.is_sign_negative() {
            return Err(DomainError::validation("sale price cannot be negative"));
        }
        Ok(())
    }
}

/// Body of `PATCH /instances/bulk-location`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BulkLocationUpdate {
    pub instance_ids: Vec<InstanceId>,
    pub location: Location,
}

/// Body of `POST /categories/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCategory {
    pub category_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent_category_id: Option<CategoryId>,
}

impl NewCategory {
    pub fn validate(&self) -> Result<(), DomainError> {
        let len = self.category_name.trim().chars().count();
        if len == 0 || self.category_name.chars().count() > 50 {
            return Err(DomainError::validation("category name must be 1 to 50 characters"));
        }
        Ok(())
    }
}

/// Card condition, spelled the way the backend stores it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Condition {
    Mint,
    #[serde(rename = "Near Mint")]
    NearMint,
    // Backend spelling.
    #[serde(rename = "Excelent")]
    Excellent,
    Good,
    #[serde(rename = "Lightly Played")]
    LightlyPlayed,
    Played,
    Poor,
}

impl Condition {
    pub fn as_str(&self) -> &'static str {
        match self {
            Condition::Mint => "Mint",
            Condition::NearMint => "Near Mint",
            Condition::Excellent => "Excelent",
            Condition::Good => "Good",
            Condition::LightlyPlayed => "Lightly Played",
            Condition::Played => "Played",
            Condition::Poor => "Poor",
        }
    }
}

/// Row of `GET /products/` and `GET /products/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub product_id: ProductId,
    pub name: String,
    pub sku: String,
    pub category_id: CategoryId,
    #[serde(default)]
    pub description: Option<String>,
    pub condition: String,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub rarity: Option<String>,
    #[serde(default)]
    pub set_name: Option<String>,
    #[serde(default)]
    pub set_code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default = "active_by_default")]
    pub is_active: bool,
    #[serde(default, deserialize_with = "lenient_utc_opt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient_utc_opt")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub category: Option<Category>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub available_quantity: Option<i64>,
}

fn active_by_default() -> bool {
    true
}

/// Image attached to a new product.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductImage {
    pub file_name: String,
    pub bytes: Vec<u8>,
}

/// Fields of the `POST /products/` form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProduct {
    pub name: String,
    pub sku: String,
    pub description: Option<String>,
    pub condition: Condition,
    pub purchase_date: NaiveDate,
    pub obtained_method: String,
    pub category_id: CategoryId,
    pub image: Option<ProductImage>,
}

impl NewProduct {
    pub fn validate(&self) -> Result<(), DomainError> {
        let name_len = self.name.trim().chars().count();
        if name_len == 0 || self.name.chars().count() > 200 {
            return Err(DomainError::validation("product name must be 1 to 200 characters"));
        }
        let sku_len = self.sku.trim().chars().count();
        if !(3..=50).contains(&sku_len) {
            return Err(DomainError::validation("SKU must be 3 to 50 characters"));
        }
        let method_len = self.obtained_method.trim().chars().count();
        if method_len == 0 || method_len > 50 {
            return Err(DomainError::validation("obtained method must be 1 to 50 characters"));
        }
        Ok(())
    }

    /// Text fields of the form, in submission order. The image is not included.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("name", self.name.clone()),
            ("sku", self.sku.clone()),
            ("condition", self.condition.as_str().to_string()),
            ("purchase_date", self.purchase_date.to_string()),
            ("obtained_method", self.obtained_method.clone()),
            ("category_id", self.category_id.to_string()),
        ];
        if let Some(description) = &self.description {
            fields.push(("description", description.clone()));
        }
        fields
    }
}

/// Body of `PATCH /products/{id}`; only the fields that are set are sent.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub condition: Option<Condition>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<CategoryId>,
}

impl ProductUpdate {
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

/// Body of `POST /price-points/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewPricePoint {
    pub product_id: ProductId,
    pub base_cost: Decimal,
    pub selling_price: Decimal,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_price: Option<Decimal>,
    /// ISO 4217 code, e.g. `USD`.
    pub currency: String,
    #[serde(deserialize_with = "lenient_utc")]
    pub effective_from: DateTime<Utc>,
}

impl NewPricePoint {
    pub fn validate(&self) -> Result<(), DomainError> {
        let negative = [Some(self.base_cost), Some(self.selling_price), self.market_price]
            .into_iter()
            .flatten()
            .any(|amount| amount.is_sign_negative() && !amount.is_zero());
        if negative {
            return Err(DomainError::validation("prices cannot be negative"));
        }
        let code = self.currency.as_bytes();
        if code.len() != 3 || !code.iter().all(u8::is_ascii_uppercase) {
            return Err(DomainError::validation(format!(
                "currency must be a three-letter uppercase code (got {:?})",
                self.currency
            )));
        }
        Ok(())
    }
}

/// Response of `POST /price-points/`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricePoint {
    pub price_point_id: i64,
    #[serde(flatten)]
    pub point: NewPricePoint,
    #[serde(default, deserialize_with = "lenient_utc_opt")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Row of `GET /profit-and-loss/`. Amounts the backend leaves out stay `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitAndLossRow {
    #[serde(default)]
    pub pnl_id: Option<i64>,
    #[serde(default)]
    pub month: Option<NaiveDate>,
    #[serde(default)]
    pub gross_sales: Option<Decimal>,
    #[serde(default)]
    pub sales_discounts: Option<Decimal>,
    #[serde(default)]
    pub shipping_income: Option<Decimal>,
    #[serde(default)]
    pub shipping_expense: Option<Decimal>,
    #[serde(default)]
    pub gross_profit: Option<Decimal>,
    #[serde(default)]
    pub beginning_inventory_value: Option<Decimal>,
    #[serde(default)]
    pub purchases_colombia: Option<Decimal>,
    #[serde(default)]
    pub purchases_usa: Option<Decimal>,
    #[serde(default)]
    pub ending_inventory_value: Option<Decimal>,
    #[serde(default)]
    pub cost_of_sales: Option<Decimal>,
    #[serde(default)]
    pub payroll_payments: Option<Decimal>,
    #[serde(default)]
    pub net_income_without_operations: Option<Decimal>,
    #[serde(default)]
    pub costs_and_expenses: Option<Decimal>,
    #[serde(default)]
    pub income: Option<Decimal>,
    #[serde(default)]
    pub operating_income: Option<Decimal>,
    #[serde(default)]
    pub tax_collection: Option<Decimal>,
    #[serde(default)]
    pub reserve_collection: Option<Decimal>,
    #[serde(default)]
    pub net_income: Option<Decimal>,
}

/// Column headers of a profit-and-loss table, matching `ProfitAndLossRow::cells`.
pub const PROFIT_AND_LOSS_HEADERS: [&str; 19] = [
    "Month",
    "Gross Sales",
    "Sales Discounts",
    "Shipping Income",
    "Shipping Expense",
    "Gross Profit",
    "Beginning Inventory Value",
    "Purchases Colombia",
    "Purchases USA",
    "Ending Inventory Value",
    "Cost of Sales",
    "Payroll Payments",
    "Net Income Without Operations",
    "Costs And Expenses",
    "Income",
    "Operating Income",
    "Tax Collection",
    "Reserve Collection",
    "Net Income",
];

impl ProfitAndLossRow {
    /// Display cells: month as `YYYY-MM`, amounts with two decimals, `N/A` when absent.
    pub fn cells(&self) -> Vec<String> {
        let month = self
            .month
            .map(|m| m.format("%Y-%m").to_string())
            .unwrap_or_else(|| "N/A".to_string());
        let amounts = [
            self.gross_sales,
            self.sales_discounts,
            self.shipping_income,
            self.shipping_expense,
            self.gross_profit,
            self.beginning_inventory_value,
            self.purchases_colombia,
            self.purchases_usa,
            self.ending_inventory_value,
            self.cost_of_sales,
            self.payroll_payments,
            self.net_income_without_operations,
            self.costs_and_expenses,
            self.income,
            self.operating_income,
            self.tax_collection,
            self.reserve_collection,
            self.net_income,
        ];
        std::iter::once(month)
            .chain(amounts.into_iter().map(|amount| match amount {
                Some(a) => format!("{:.2}", a),
                None => "N/A".to_string(),
            }))
            .collect()
    }
}

/// Backend timestamps come either as RFC 3339 or as naive UTC
/// (`2024-05-01T12:00:00.123456`).
fn parse_timestamp(raw: &str) -> Result<DateTime<Utc>, DomainError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }
    NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f")
        .map(|naive| naive.and_utc())
        .map_err(|_| DomainError::validation(format!("invalid timestamp {raw:?}")))
}

fn lenient_utc<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
    let raw = String::deserialize(deserializer)?;
    parse_timestamp(&raw).map_err(serde::de::Error::custom)
}

fn lenient_utc_opt<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<DateTime<Utc>>, D::Error> {
    match Option::<String>::deserialize(deserializer)? {
        Some(raw) => parse_timestamp(&raw).map(Some).map_err(serde::de::Error::custom),
        None => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn payment_method_uses_backend_spelling() {
        assert_eq!(serde_json::to_string(&PaymentMethod::Usd).unwrap(), "\"USD\"");
        assert_eq!("Trade".parse::<PaymentMethod>().unwrap(), PaymentMethod::Trade);
        assert!("Bitcoin".parse::<PaymentMethod>().is_err());
    }

    #[test]
    fn sale_request_rejects_negative_price() {
        let sale = SaleRequest {
            product_id: ProductId::new(1),
            sale_price: Decimal::new(-100, 2),
            sale_date: Utc::now(),
            payment_method: PaymentMethod::Cash,
            notes: None,
        };
        assert!(matches!(sale.validate(), Err(DomainError::Validation(_))));
    }

    #[test]
    fn category_parent_is_optional() {
        let category: Category =
            serde_json::from_str(r#"{"category_id": 2, "category_name": "Playmats"}"#).unwrap();
        assert_eq!(category.parent_category_id, None);
    }

    #[test]
    fn product_accepts_naive_timestamps_and_missing_extras() {
        let product: Product = serde_json::from_str(
            r#"{
                "product_id": 7,
                "name": "Black Lotus",
                "sku": "LEA-001",
                "category_id": 1,
                "condition": "Near Mint",
                "is_active": true,
                "created_at": "2024-05-01T12:00:00.250000",
                "updated_at": "2024-05-02T08:30:00Z",
                "category": {"category_id": 1, "category_name": "Singles"},
                "current_price": 12.5
            }"#,
        )
        .unwrap();
        assert_eq!(product.product_id, ProductId::new(7));
        assert_eq!(product.rarity, None);
        assert_eq!(
            product.created_at.map(|t| t.to_rfc3339()),
            Some("2024-05-01T12:00:00.250+00:00".to_string())
        );
        assert_eq!(product.category.map(|c| c.category_name), Some("Singles".to_string()));
        assert_eq!(product.available_quantity, None);
    }

    #[test]
    fn garbage_timestamp_is_a_decode_error() {
        let err = serde_json::from_str::<Product>(
            r#"{"product_id": 1, "name": "x", "sku": "abc", "category_id": 1,
                "condition": "Mint", "created_at": "yesterday"}"#,
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid timestamp"));
    }

    fn new_product() -> NewProduct {
        NewProduct {
            name: "Deckbox".to_string(),
            sku: "DBX-1".to_string(),
            description: None,
            condition: Condition::Excellent,
            purchase_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
            obtained_method: "Purchase".to_string(),
            category_id: CategoryId::new(4),
            image: None,
        }
    }

    #[test]
    fn new_product_form_uses_backend_spelling() {
        let product = new_product();
        assert!(product.validate().is_ok());
        let fields = product.form_fields();
        assert!(fields.contains(&("condition", "Excelent".to_string())));
        assert!(fields.contains(&("purchase_date", "2024-03-09".to_string())));
        assert!(fields.contains(&("category_id", "4".to_string())));
        assert!(!fields.iter().any(|(k, _)| *k == "description"));
    }

    #[test]
    fn new_product_rejects_short_sku_and_blank_fields() {
        let mut product = new_product();
        product.sku = "AB".to_string();
        assert!(matches!(product.validate(), Err(DomainError::Validation(_))));

        let mut product = new_product();
        product.name = "   ".to_string();
        assert!(product.validate().is_err());

        let mut product = new_product();
        product.obtained_method = String::new();
        assert!(product.validate().is_err());
    }

    #[test]
    fn product_update_sends_only_set_fields() {
        let update = ProductUpdate {
            is_active: Some(false),
            condition: Some(Condition::LightlyPlayed),
            ..ProductUpdate::default()
        };
        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            serde_json::json!({"condition": "Lightly Played", "is_active": false})
        );
        assert!(ProductUpdate::default().is_empty());
        assert!(!update.is_empty());
    }

    fn price_point() -> NewPricePoint {
        NewPricePoint {
            product_id: ProductId::new(3),
            base_cost: Decimal::new(1000, 2),
            selling_price: Decimal::new(1500, 2),
            market_price: None,
            currency: "USD".to_string(),
            effective_from: DateTime::parse_from_rfc3339("2024-05-01T00:00:00Z")
                .unwrap()
                .with_timezone(&Utc),
        }
    }

    #[test]
    fn price_point_validation() {
        assert!(price_point().validate().is_ok());

        let mut lower = price_point();
        lower.currency = "usd".to_string();
        assert!(lower.validate().is_err());

        let mut long = price_point();
        long.currency = "USDT".to_string();
        assert!(long.validate().is_err());

        let mut negative = price_point();
        negative.market_price = Some(Decimal::new(-5, 0));
        assert!(negative.validate().is_err());
    }

    #[test]
    fn price_point_response_flattens_request_fields() {
        let point: PricePoint = serde_json::from_str(
            r#"{"price_point_id": 9, "product_id": 3, "base_cost": "10.00",
                "selling_price": "15.00", "market_price": null, "currency": "USD",
                "effective_from": "2024-05-01T00:00:00", "created_at": "2024-05-01T00:00:01"}"#,
        )
        .unwrap();
        assert_eq!(point.price_point_id, 9);
        assert_eq!(point.point, price_point());
    }

    #[test]
    fn new_category_name_bounds() {
        let ok = NewCategory {
            category_name: "Sealed".to_string(),
            parent_category_id: None,
        };
        assert!(ok.validate().is_ok());
        assert_eq!(serde_json::to_string(&ok).unwrap(), r#"{"category_name":"Sealed"}"#);

        let blank = NewCategory {
            category_name: String::new(),
            parent_category_id: None,
        };
        assert!(blank.validate().is_err());

        let long = NewCategory {
            category_name: "x".repeat(51),
            parent_category_id: Some(CategoryId::new(1)),
        };
        assert!(long.validate().is_err());
    }

    #[test]
    fn profit_and_loss_cells() {
        let row: ProfitAndLossRow = serde_json::from_str(
            r#"{"pnl_id": 1, "month": "2024-04-01", "gross_sales": "1250.5",
                "net_income": 310, "income": null}"#,
        )
        .unwrap();
        let cells = row.cells();
        assert_eq!(cells.len(), PROFIT_AND_LOSS_HEADERS.len());
        assert_eq!(cells[0], "2024-04");
        assert_eq!(cells[1], "1250.50");
        assert_eq!(cells[2], "N/A");
        assert_eq!(cells[18], "310.00");
    }
}
