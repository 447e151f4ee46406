//! Domain records flowing through the materialization pipeline.
//!
//! These are decoupled from the storage entities in [`crate::models`]; the
//! repositories convert between the two.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

/// Destination whose approval lists drive country targeting.
pub const SHOPPING_DESTINATION: &str = "Shopping";

/// Catalog channel kept by the inventory view.
pub const ONLINE_CHANNEL: &str = "online";

/// Separator used by merchant-center category paths and the rendered full category.
pub const CATEGORY_SEPARATOR: &str = " > ";

/// Number of category levels carried by catalog and ranking rows.
pub const CATEGORY_LEVELS: usize = 5;

/// A monetary amount with its (optional) ISO currency.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Price {
    pub value: f64,
    pub currency: Option<String>,
}

impl Price {
    /// Builds a price from nullable columns; a missing value means no price.
    pub fn from_parts(value: Option<f64>, currency: Option<String>) -> Option<Self> {
        value.map(|value| Self { value, currency })
    }
}

/// Approval state of a product for one sales destination.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DestinationStatus {
    pub destination: String,
    #[serde(default)]
    pub approved_countries: Vec<String>,
    #[serde(default)]
    pub pending_countries: Vec<String>,
    #[serde(default)]
    pub disapproved_countries: Vec<String>,
}

/// One catalog product as of one snapshot date.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductSnapshot {
    pub merchant_id: i64,
    pub product_id: String,
    pub snapshot_date: NaiveDate,
    pub offer_id: String,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub gtin: Option<String>,
    pub channel: String,
    pub content_language: String,
    pub availability: Option<String>,
    pub price: Option<Price>,
    pub sale_price: Option<Price>,
    pub category_path: Option<String>,
    pub image_link: Option<String>,
    pub custom_attributes: JsonValue,
    pub destinations: Vec<DestinationStatus>,
}

impl ProductSnapshot {
    /// Sale price when present, list price otherwise.
    pub fn current_price(&self) -> Option<&Price> {
        self.sale_price.as_ref().or(self.price.as_ref())
    }

    /// The Shopping destination entry, if the product has one.
    pub fn shopping_destination(&self) -> Option<&DestinationStatus> {
        self.destinations
            .iter()
            .find(|status| status.destination == SHOPPING_DESTINATION)
    }

    /// Category path split into its fixed number of levels.
    pub fn category_levels(&self) -> [Option<String>; CATEGORY_LEVELS] {
        split_category_path(self.category_path.as_deref())
    }
}

/// A product's targeting of one country.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TargetedCountryStatus {
    pub targeted_country: String,
    pub is_disapproved: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceCompetitivenessRecord {
    pub merchant_id: i64,
    pub product_id: String,
    pub country_code: String,
    pub snapshot_date: NaiveDate,
    pub price: Option<Price>,
    pub benchmark_price: Option<Price>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PriceInsightRecord {
    pub merchant_id: i64,
    pub product_id: String,
    pub snapshot_date: NaiveDate,
    pub price: Option<Price>,
    pub suggested_price: Option<Price>,
    pub predicted_impressions_change_fraction: Option<f64>,
    pub predicted_clicks_change_fraction: Option<f64>,
    pub predicted_conversions_change_fraction: Option<f64>,
}

/// Raw ads performance row with unresolved criterion identifiers.
#[derive(Debug, Clone, PartialEq)]
pub struct RawPerformanceRecord {
    pub merchant_id: i64,
    pub channel: String,
    pub offer_id: String,
    pub country_criterion: String,
    pub language_criterion: String,
    pub segment_date: NaiveDate,
    pub metrics: MetricTotals,
}

/// Additive performance metrics.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MetricTotals {
    pub impressions: i64,
    pub clicks: i64,
    pub cost_micros: i64,
    pub conversions: f64,
    pub conversions_value: f64,
}

impl MetricTotals {
    pub fn add(&mut self, other: &MetricTotals) {
        self.impressions += other.impressions;
        self.clicks += other.clicks;
        self.cost_micros += other.cost_micros;
        self.conversions += other.conversions;
        self.conversions_value += other.conversions_value;
    }
}

/// Partition key of the rolling performance windows.
///
/// `channel` and `offer_id` are stored lowercased so case variants of the same
/// offer collapse into one series.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PerformanceKey {
    pub merchant_id: i64,
    pub channel: String,
    pub offer_id: String,
    pub language_code: String,
    pub country_code: String,
}

/// Trailing window sums for one key as of one date.
#[derive(Debug, Clone, PartialEq)]
pub struct PerformanceAggregate {
    pub key: PerformanceKey,
    pub date: NaiveDate,
    pub last_7_days: MetricTotals,
    pub last_30_days: MetricTotals,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestSellerRankRecord {
    pub rank_date: NaiveDate,
    pub country_code: String,
    pub category_id: i64,
    pub entity_id: String,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub category_levels: [Option<String>; CATEGORY_LEVELS],
    pub variant_gtins: Vec<String>,
    pub product_inventory_status: Option<String>,
    pub brand_inventory_status: Option<String>,
    pub rank: i64,
    pub previous_rank: Option<i64>,
    pub relative_demand: Option<String>,
    pub previous_relative_demand: Option<String>,
    pub relative_demand_change: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct EntityProductMapping {
    pub entity_id: String,
    pub product_id: String,
    pub mapping_date: NaiveDate,
}

/// Splits `"A > B > C"` into five optional levels; blank segments become `None`.
pub fn split_category_path(path: Option<&str>) -> [Option<String>; CATEGORY_LEVELS] {
    let mut levels: [Option<String>; CATEGORY_LEVELS] = Default::default();
    if let Some(path) = path {
        for (slot, segment) in levels.iter_mut().zip(path.split('>')) {
            let segment = segment.trim();
            if !segment.is_empty() {
                *slot = Some(segment.to_string());
            }
        }
    }
    levels
}

/// Joins the non-empty levels with `" > "`.
pub fn full_category(levels: &[Option<String>]) -> String {
    levels
        .iter()
        .filter_map(|level| level.as_deref().map(str::trim))
        .filter(|level| !level.is_empty())
        .collect::<Vec<_>>()
        .join(CATEGORY_SEPARATOR)
}

/// Last non-empty level, if any.
pub fn final_category(levels: &[Option<String>]) -> Option<String> {
    levels
        .iter()
        .rev()
        .filter_map(|level| level.as_deref().map(str::trim))
        .find(|level| !level.is_empty())
        .map(str::to_string)
}

/// Division that yields `None` instead of failing on an absent or zero denominator.
pub fn safe_divide(numerator: Option<f64>, denominator: Option<f64>) -> Option<f64> {
    match (numerator, denominator) {
        (Some(n), Some(d)) if d != 0.0 => Some(n / d),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn levels(values: [&str; 5]) -> [Option<String>; 5] {
        values.map(|v| Some(v.to_string()))
    }

    #[test]
    fn full_category_skips_empty_levels() {
        assert_eq!(full_category(&levels(["A", "B", "", "", ""])), "A > B");
        assert_eq!(full_category(&levels(["A", "", "C", "", ""])), "A > C");
        assert_eq!(full_category(&[None, None, None, None, None]), "");
    }

    #[test]
    fn final_category_is_last_non_empty_segment() {
        let parsed = split_category_path(Some("Apparel > Shoes > Sneakers"));
        assert_eq!(parsed[2].as_deref(), Some("Sneakers"));
        assert_eq!(parsed[3], None);
        assert_eq!(final_category(&parsed).as_deref(), Some("Sneakers"));
        assert_eq!(final_category(&split_category_path(None)), None);
    }

    #[test]
    fn category_path_deeper_than_five_levels_is_truncated() {
        let parsed = split_category_path(Some("a > b > c > d > e > f"));
        assert_eq!(parsed[4].as_deref(), Some("e"));
    }

    #[test]
    fn safe_divide_returns_none_for_zero_or_missing_denominator() {
        assert_eq!(safe_divide(Some(1.0), Some(0.0)), None);
        assert_eq!(safe_divide(Some(1.0), None), None);
        assert_eq!(safe_divide(None, Some(2.0)), None);
        assert_eq!(safe_divide(Some(3.0), Some(2.0)), Some(1.5));
    }

    #[test]
    fn current_price_prefers_sale_price() {
        let mut product = ProductSnapshot {
            merchant_id: 1,
            product_id: "online:en:US:sku".into(),
            snapshot_date: NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
            offer_id: "sku".into(),
            title: None,
            brand: None,
            gtin: None,
            channel: "online".into(),
            content_language: "en".into(),
            availability: None,
            price: Price::from_parts(Some(10.0), Some("USD".into())),
            sale_price: None,
            category_path: None,
            image_link: None,
            custom_attributes: JsonValue::Null,
            destinations: Vec::new(),
        };
        assert_eq!(product.current_price().map(|p| p.value), Some(10.0));

        product.sale_price = Price::from_parts(Some(8.5), Some("USD".into()));
        assert_eq!(product.current_price().map(|p| p.value), Some(8.5));
    }
}
