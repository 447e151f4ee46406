//! Assembly of the Best-Sellers weekly product view.
//!
//! Ranking rows are left-joined through the entity mapping to the enriched
//! catalog rows, so an entity without a mapping or without a matching product
//! still yields one row with empty product fields.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use chrono::NaiveDate;

use super::enrich::EnrichedProduct;
use super::inventory::WindowMetrics;
use super::types::{BestSellerRankRecord, CATEGORY_LEVELS, EntityProductMapping, Price, full_category};

/// Catalog side of a best-seller row; absent when nothing matched.
#[derive(Debug, Clone, PartialEq)]
pub struct MatchedProduct {
    pub merchant_id: i64,
    pub offer_id: String,
    pub title: Option<String>,
    pub availability: Option<String>,
    pub is_disapproved: bool,
    pub current_price: Option<Price>,
    pub benchmark_price: Option<Price>,
    pub last_7_days: WindowMetrics,
    pub last_30_days: WindowMetrics,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BestSellerViewRow {
    pub rank_date: NaiveDate,
    pub country_code: String,
    pub category_id: i64,
    pub entity_id: String,
    pub title: Option<String>,
    pub brand: Option<String>,
    pub category_levels: [Option<String>; CATEGORY_LEVELS],
    pub full_category: String,
    pub variant_gtins: Vec<String>,
    pub product_inventory_status: Option<String>,
    pub brand_inventory_status: Option<String>,
    pub rank: i64,
    pub previous_rank: Option<i64>,
    pub relative_demand: Option<String>,
    pub previous_relative_demand: Option<String>,
    pub relative_demand_change: Option<String>,
    /// Mapped product id, present whenever the entity has a mapping for the rank date.
    pub product_id: Option<String>,
    pub product: Option<MatchedProduct>,
}

type NaturalKey = (NaiveDate, String, i64, i64, String, Option<String>);

impl BestSellerViewRow {
    fn natural_key(&self) -> NaturalKey {
        (
            self.rank_date,
            self.country_code.clone(),
            self.category_id,
            self.rank,
            self.entity_id.clone(),
            self.product_id.clone(),
        )
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BestSellerStats {
    pub ranks_in: usize,
    pub unmapped_entities: usize,
    pub unmatched_products: usize,
    pub duplicates_removed: usize,
    pub rows_out: usize,
}

fn matched_product(row: &EnrichedProduct<'_>) -> MatchedProduct {
    let product = row.product;
    MatchedProduct {
        merchant_id: product.merchant_id,
        offer_id: product.offer_id.clone(),
        title: product.title.clone(),
        availability: product.availability.clone(),
        is_disapproved: row.status.is_disapproved,
        current_price: row.current_price.cloned(),
        benchmark_price: row
            .competitiveness
            .and_then(|record| record.benchmark_price.clone()),
        last_7_days: WindowMetrics::from_totals(row.performance.map(|p| &p.last_7_days)),
        last_30_days: WindowMetrics::from_totals(row.performance.map(|p| &p.last_30_days)),
    }
}

/// Builds the view from ranks, mappings and the enriched catalog.
///
/// Exact duplicate rows are collapsed. Rows are returned sorted by
/// `(rank_date, country_code, category_id, rank, entity_id, product_id)`.
pub fn materialize_best_sellers(
    ranks: &[BestSellerRankRecord],
    mappings: &[EntityProductMapping],
    enriched: &[EnrichedProduct<'_>],
) -> (Vec<BestSellerViewRow>, BestSellerStats) {
    let mut stats = BestSellerStats {
        ranks_in: ranks.len(),
        ..BestSellerStats::default()
    };

    let mut products_by_entity: HashMap<(&str, NaiveDate), Vec<&str>> = HashMap::new();
    for mapping in mappings.iter().collect::<BTreeSet<_>>() {
        products_by_entity
            .entry((mapping.entity_id.as_str(), mapping.mapping_date))
            .or_default()
            .push(mapping.product_id.as_str());
    }

    // At most one enriched row per (product, country, date); the lowest merchant id wins.
    let mut catalog: HashMap<(&str, &str, NaiveDate), &EnrichedProduct<'_>> = HashMap::new();
    for row in enriched {
        let key = (
            row.product.product_id.as_str(),
            row.status.targeted_country.as_str(),
            row.product.snapshot_date,
        );
        catalog
            .entry(key)
            .and_modify(|current| {
                if row.product.merchant_id < current.product.merchant_id {
                    *current = row;
                }
            })
            .or_insert(row);
    }

    let mut groups: BTreeMap<NaturalKey, Vec<BestSellerViewRow>> = BTreeMap::new();

    for rank in ranks {
        let mapped = products_by_entity
            .get(&(rank.entity_id.as_str(), rank.rank_date))
            .map(Vec::as_slice)
            .unwrap_or_default();

        if mapped.is_empty() {
            stats.unmapped_entities += 1;
            insert_distinct(&mut groups, &mut stats, rank_row(rank, None, None));
            continue;
        }

        for product_id in mapped {
            let product = catalog
                .get(&(*product_id, rank.country_code.as_str(), rank.rank_date))
                .map(|row| matched_product(row));
            if product.is_none() {
                stats.unmatched_products += 1;
            }
            insert_distinct(
                &mut groups,
                &mut stats,
                rank_row(rank, Some(product_id.to_string()), product),
            );
        }
    }

    let rows: Vec<BestSellerViewRow> = groups.into_values().flatten().collect();
    stats.rows_out = rows.len();
    (rows, stats)
}

fn insert_distinct(
    groups: &mut BTreeMap<NaturalKey, Vec<BestSellerViewRow>>,
    stats: &mut BestSellerStats,
    row: BestSellerViewRow,
) {
    let group = groups.entry(row.natural_key()).or_default();
    if group.contains(&row) {
        stats.duplicates_removed += 1;
    } else {
        group.push(row);
    }
}

fn rank_row(
    rank: &BestSellerRankRecord,
    product_id: Option<String>,
    product: Option<MatchedProduct>,
) -> BestSellerViewRow {
    BestSellerViewRow {
        rank_date: rank.rank_date,
        country_code: rank.country_code.clone(),
        category_id: rank.category_id,
        entity_id: rank.entity_id.clone(),
        title: rank.title.clone(),
        brand: rank.brand.clone(),
        category_levels: rank.category_levels.clone(),
        full_category: full_category(&rank.category_levels),
        variant_gtins: rank.variant_gtins.clone(),
        product_inventory_status: rank.product_inventory_status.clone(),
        brand_inventory_status: rank.brand_inventory_status.clone(),
        rank: rank.rank,
        previous_rank: rank.previous_rank,
        relative_demand: rank.relative_demand.clone(),
        previous_relative_demand: rank.previous_relative_demand.clone(),
        relative_demand_change: rank.relative_demand_change.clone(),
        product_id,
        product,
    }
}
