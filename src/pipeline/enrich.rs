//! Left-outer enrichment of per-country product rows.
//!
//! Each targeted `(product, country, date)` row picks up at most one price
//! competitiveness record, one price insight and one performance aggregate.
//! A missing counterpart leaves the corresponding field `None`.

use std::collections::HashMap;

use chrono::{Duration, NaiveDate};

use super::status::resolve_product_status;
use super::types::{
    PerformanceAggregate, Price, PriceCompetitivenessRecord, PriceInsightRecord, ProductSnapshot,
    TargetedCountryStatus,
};

/// Offset between a product snapshot and the performance aggregate it reads:
/// the snapshot dated `d` joins the aggregate dated `d - AGGREGATION_LAG_DAYS`.
pub const AGGREGATION_LAG_DAYS: i64 = 1;

/// Date of the performance aggregate joined to a snapshot taken on `snapshot_date`.
pub fn lagged_aggregate_date(snapshot_date: NaiveDate) -> NaiveDate {
    snapshot_date - Duration::days(AGGREGATION_LAG_DAYS)
}

type CompetitivenessKey<'a> = (i64, &'a str, &'a str, NaiveDate);
type InsightKey<'a> = (i64, &'a str, NaiveDate);
type AggregateKey<'a> = (i64, &'a str, &'a str, &'a str, &'a str, NaiveDate);

/// A product row for one targeted country with its optional enrichments.
#[derive(Debug, Clone, PartialEq)]
pub struct EnrichedProduct<'a> {
    pub product: &'a ProductSnapshot,
    pub status: TargetedCountryStatus,
    pub current_price: Option<&'a Price>,
    pub competitiveness: Option<&'a PriceCompetitivenessRecord>,
    pub insight: Option<&'a PriceInsightRecord>,
    pub performance: Option<&'a PerformanceAggregate>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EnrichmentStats {
    pub products_in: usize,
    pub products_without_targets: usize,
    pub rows_out: usize,
    pub with_competitiveness: usize,
    pub with_insight: usize,
    pub with_performance: usize,
}

/// Keyed lookups over the enrichment sources.
pub struct CatalogEnricher<'a> {
    competitiveness: HashMap<CompetitivenessKey<'a>, &'a PriceCompetitivenessRecord>,
    insights: HashMap<InsightKey<'a>, &'a PriceInsightRecord>,
    performance: HashMap<AggregateKey<'a>, &'a PerformanceAggregate>,
}

impl<'a> CatalogEnricher<'a> {
    /// Indexes the sources. When a source holds several rows for one key the
    /// first one wins, keeping the join at most one-to-one.
    pub fn new(
        competitiveness: &'a [PriceCompetitivenessRecord],
        insights: &'a [PriceInsightRecord],
        performance: &'a [PerformanceAggregate],
    ) -> Self {
        let mut competitiveness_index = HashMap::with_capacity(competitiveness.len());
        for record in competitiveness {
            competitiveness_index
                .entry((
                    record.merchant_id,
                    record.product_id.as_str(),
                    record.country_code.as_str(),
                    record.snapshot_date,
                ))
                .or_insert(record);
        }

        let mut insight_index = HashMap::with_capacity(insights.len());
        for record in insights {
            insight_index
                .entry((record.merchant_id, record.product_id.as_str(), record.snapshot_date))
                .or_insert(record);
        }

        let mut performance_index = HashMap::with_capacity(performance.len());
        for aggregate in performance {
            let key = &aggregate.key;
            performance_index
                .entry((
                    key.merchant_id,
                    key.channel.as_str(),
                    key.offer_id.as_str(),
                    key.language_code.as_str(),
                    key.country_code.as_str(),
                    aggregate.date,
                ))
                .or_insert(aggregate);
        }

        Self {
            competitiveness: competitiveness_index,
            insights: insight_index,
            performance: performance_index,
        }
    }

    pub fn competitiveness_for(
        &self,
        product: &ProductSnapshot,
        country: &str,
    ) -> Option<&'a PriceCompetitivenessRecord> {
        self.competitiveness
            .get(&(
                product.merchant_id,
                product.product_id.as_str(),
                country,
                product.snapshot_date,
            ))
            .copied()
    }

    pub fn insight_for(&self, product: &ProductSnapshot) -> Option<&'a PriceInsightRecord> {
        self.insights
            .get(&(
                product.merchant_id,
                product.product_id.as_str(),
                product.snapshot_date,
            ))
            .copied()
    }

    /// Aggregate for the product's offer in `country`, dated one lag before the snapshot.
    /// Offer id and channel match case-insensitively.
    pub fn performance_for(
        &self,
        product: &ProductSnapshot,
        country: &str,
    ) -> Option<&'a PerformanceAggregate> {
        let channel = product.channel.to_lowercase();
        let offer_id = product.offer_id.to_lowercase();
        self.performance
            .get(&(
                product.merchant_id,
                channel.as_str(),
                offer_id.as_str(),
                product.content_language.as_str(),
                country,
                lagged_aggregate_date(product.snapshot_date),
            ))
            .copied()
    }

    /// Fans every product out to its targeted countries and attaches the enrichments.
    pub fn enrich(
        &self,
        products: &'a [ProductSnapshot],
    ) -> (Vec<EnrichedProduct<'a>>, EnrichmentStats) {
        let mut stats = EnrichmentStats {
            products_in: products.len(),
            ..EnrichmentStats::default()
        };
        let mut rows = Vec::with_capacity(products.len());

        for product in products {
            let statuses = resolve_product_status(product);
            if statuses.is_empty() {
                stats.products_without_targets += 1;
                continue;
            }

            for status in statuses {
                let country = status.targeted_country.as_str();
                let competitiveness = self.competitiveness_for(product, country);
                let insight = self.insight_for(product);
                let performance = self.performance_for(product, country);

                stats.with_competitiveness += usize::from(competitiveness.is_some());
                stats.with_insight += usize::from(insight.is_some());
                stats.with_performance += usize::from(performance.is_some());

                rows.push(EnrichedProduct {
                    product,
                    current_price: product.current_price(),
                    competitiveness,
                    insight,
                    performance,
                    status,
                });
            }
        }

        stats.rows_out = rows.len();
        (rows, stats)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pipeline::types::{DestinationStatus, MetricTotals, PerformanceKey};
    use serde_json::json;

    fn date(day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 4, day).unwrap()
    }

    fn product(day: u32) -> ProductSnapshot {
        ProductSnapshot {
            merchant_id: 9,
            product_id: "online:en:US:Widget-1".into(),
            snapshot_date: date(day),
            offer_id: "Widget-1".into(),
            title: Some("Widget".into()),
            brand: None,
            gtin: None,
            channel: "online".into(),
            content_language: "en".into(),
            availability: None,
            price: Price::from_parts(Some(10.0), Some("USD".into())),
            sale_price: None,
            category_path: None,
            image_link: None,
            custom_attributes: json!({}),
            destinations: vec![DestinationStatus {
                destination: "Shopping".into(),
                approved_countries: vec!["US".into()],
                pending_countries: vec![],
                disapproved_countries: vec!["DE".into()],
            }],
        }
    }

    fn aggregate(day: u32, country: &str, impressions: i64) -> PerformanceAggregate {
        let totals = MetricTotals {
            impressions,
            ..MetricTotals::default()
        };
        PerformanceAggregate {
            key: PerformanceKey {
                merchant_id: 9,
                channel: "online".into(),
                offer_id: "widget-1".into(),
                language_code: "en".into(),
                country_code: country.into(),
            },
            date: date(day),
            last_7_days: totals,
            last_30_days: totals,
        }
    }

    #[test]
    fn lag_constant_is_one_day() {
        assert_eq!(lagged_aggregate_date(date(10)), date(9));
    }

    #[test]
    fn performance_joins_previous_day_case_insensitively() {
        let products = [product(10)];
        let performance = [
            aggregate(10, "US", 999),
            aggregate(9, "US", 5),
            aggregate(9, "DE", 6),
        ];
        let enricher = CatalogEnricher::new(&[], &[], &performance);
        let (rows, stats) = enricher.enrich(&products);

        assert_eq!(stats.rows_out, 2);
        assert_eq!(stats.with_performance, 2);
        let us = rows
            .iter()
            .find(|r| r.status.targeted_country == "US")
            .unwrap();
        assert_eq!(us.performance.map(|p| p.last_7_days.impressions), Some(5));
        let de = rows
            .iter()
            .find(|r| r.status.targeted_country == "DE")
            .unwrap();
        assert!(de.status.is_disapproved);
        assert_eq!(de.performance.map(|p| p.last_7_days.impressions), Some(6));
    }

    #[test]
    fn missing_counterparts_stay_none() {
        let products = [product(10)];
        let enricher = CatalogEnricher::new(&[], &[], &[]);
        let (rows, stats) = enricher.enrich(&products);

        assert_eq!(rows.len(), 2);
        assert_eq!(stats.with_competitiveness, 0);
        for row in &rows {
            assert!(row.competitiveness.is_none());
            assert!(row.insight.is_none());
            assert!(row.performance.is_none());
            assert_eq!(row.current_price.map(|p| p.value), Some(10.0));
        }
    }

    #[test]
    fn competitiveness_matches_exact_country_and_insight_ignores_country() {
        let products = [product(10)];
        let competitiveness = [PriceCompetitivenessRecord {
            merchant_id: 9,
            product_id: "online:en:US:Widget-1".into(),
            country_code: "US".into(),
            snapshot_date: date(10),
            price: Price::from_parts(Some(10.0), Some("USD".into())),
            benchmark_price: Price::from_parts(Some(9.0), Some("USD".into())),
        }];
        let insights = [PriceInsightRecord {
            merchant_id: 9,
            product_id: "online:en:US:Widget-1".into(),
            snapshot_date: date(10),
            price: None,
            suggested_price: Price::from_parts(Some(9.5), Some("USD".into())),
            predicted_impressions_change_fraction: Some(0.1),
            predicted_clicks_change_fraction: Some(0.05),
            predicted_conversions_change_fraction: None,
        }];
        let enricher = CatalogEnricher::new(&competitiveness, &insights, &[]);
        let (rows, _) = enricher.enrich(&products);

        for row in &rows {
            assert!(row.insight.is_some());
            let has_benchmark = row.competitiveness.is_some();
            assert_eq!(has_benchmark, row.status.targeted_country == "US");
        }
    }

    #[test]
    fn products_without_targets_are_counted() {
        let mut untargeted = product(10);
        untargeted.destinations.clear();
        let products = [untargeted];
        let (rows, stats) = CatalogEnricher::new(&[], &[], &[]).enrich(&products);
        assert!(rows.is_empty());
        assert_eq!(stats.products_without_targets, 1);
    }
}
