//! View materialization orchestrator.
//!
//! Loads the upstream partitions for the configured namespace, runs the
//! pipeline stages and replaces each output relation wholesale.

use std::fmt;
use std::sync::Arc;
use std::time::Instant;

use metrics::{counter, histogram};
use sea_orm::DatabaseConnection;
use tracing::{debug, error, info, instrument};

use crate::config::SourceNamespace;
use crate::error::PipelineError;
use crate::pipeline::best_sellers::materialize_best_sellers;
use crate::pipeline::enrich::{CatalogEnricher, EnrichedProduct, EnrichmentStats};
use crate::pipeline::inventory::materialize_inventory;
use crate::pipeline::performance::aggregate;
use crate::pipeline::types::{
    PerformanceAggregate, PriceCompetitivenessRecord, PriceInsightRecord, ProductSnapshot,
};
use crate::repositories::{ReferenceRepository, RunScope, SourceRepository, ViewRepository};
use crate::telemetry::{RunContext, current_run_id, with_run_context};

/// The two materialized relations, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ViewKind {
    Inventory,
    BestSellers,
}

impl ViewKind {
    pub const ALL: [ViewKind; 2] = [ViewKind::Inventory, ViewKind::BestSellers];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Inventory => "inventory",
            Self::BestSellers => "best_sellers_weekly_product",
        }
    }
}

impl fmt::Display for ViewKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MaterializationReport {
    pub view: ViewKind,
    pub rows_written: usize,
}

/// A view failure tagged with the view it aborted.
#[derive(Debug, thiserror::Error)]
#[error("materializing {view} failed: {source}")]
pub struct ViewFailure {
    pub view: ViewKind,
    #[source]
    pub source: PipelineError,
}

/// Upstream catalog inputs shared by both views.
struct CatalogSources {
    products: Vec<ProductSnapshot>,
    competitiveness: Vec<PriceCompetitivenessRecord>,
    insights: Vec<PriceInsightRecord>,
    performance: Vec<PerformanceAggregate>,
}

impl CatalogSources {
    fn enrich(&self) -> (Vec<EnrichedProduct<'_>>, EnrichmentStats) {
        CatalogEnricher::new(&self.competitiveness, &self.insights, &self.performance)
            .enrich(&self.products)
    }
}

#[derive(Clone)]
pub struct Materializer {
    db: Arc<DatabaseConnection>,
    namespace: SourceNamespace,
    scope: RunScope,
}

impl Materializer {
    pub fn new(db: Arc<DatabaseConnection>, namespace: SourceNamespace, scope: RunScope) -> Self {
        Self {
            db,
            namespace,
            scope,
        }
    }

    /// Materializes `views` in order under a fresh run context.
    ///
    /// The first failing view aborts the run; views already written keep their
    /// new content and the failing view keeps its previous content.
    pub async fn run(&self, views: &[ViewKind]) -> Result<Vec<MaterializationReport>, ViewFailure> {
        let context = RunContext::generate();
        let run_id = context.run_id.clone();
        with_run_context(context, async {
            info!(
                run_id = %run_id,
                project_id = %self.namespace.project_id,
                dataset = %self.namespace.dataset,
                merchant_id = self.namespace.merchant_id,
                external_customer_id = self.namespace.external_customer_id,
                scope = ?self.scope,
                "Starting materialization run"
            );

            let mut reports = Vec::with_capacity(views.len());
            for view in views {
                let result = match view {
                    ViewKind::Inventory => self.run_inventory().await,
                    ViewKind::BestSellers => self.run_best_sellers().await,
                };
                match result {
                    Ok(report) => reports.push(report),
                    Err(source) => {
                        error!(
                            view = %view,
                            code = source.code(),
                            error = %source,
                            "View materialization failed"
                        );
                        return Err(ViewFailure {
                            view: *view,
                            source,
                        });
                    }
                }
            }
            Ok(reports)
        })
        .await
    }

    #[instrument(skip(self), fields(view = "inventory", run_id = %current_run_id().unwrap_or_default()))]
    pub async fn run_inventory(&self) -> Result<MaterializationReport, PipelineError> {
        let timer = Instant::now();
        let sources = self.load_catalog_sources().await?;
        let (enriched, enrichment) = sources.enrich();
        log_enrichment(&enrichment);

        let rows = materialize_inventory(&enriched);
        let written = ViewRepository::new(self.db.clone())
            .replace_inventory(&rows)
            .await?;

        Ok(self.finish(ViewKind::Inventory, written, timer))
    }

    #[instrument(skip(self), fields(view = "best_sellers_weekly_product", run_id = %current_run_id().unwrap_or_default()))]
    pub async fn run_best_sellers(&self) -> Result<MaterializationReport, PipelineError> {
        let timer = Instant::now();
        let sources = self.load_catalog_sources().await?;
        let source_repo = self.source_repository();
        let ranks = source_repo.load_best_sellers().await?;
        let mappings = source_repo.load_entity_mappings().await?;

        let (enriched, enrichment) = sources.enrich();
        log_enrichment(&enrichment);
        let (rows, stats) = materialize_best_sellers(&ranks, &mappings, &enriched);
        info!(
            ranks = stats.ranks_in,
            unmapped_entities = stats.unmapped_entities,
            unmatched_products = stats.unmatched_products,
            duplicates_removed = stats.duplicates_removed,
            "Assembled best-seller rows"
        );

        let written = ViewRepository::new(self.db.clone())
            .replace_best_sellers(&rows)
            .await?;

        Ok(self.finish(ViewKind::BestSellers, written, timer))
    }

    fn source_repository(&self) -> SourceRepository {
        SourceRepository::new(self.db.clone(), self.namespace.clone(), self.scope)
    }

    async fn load_catalog_sources(&self) -> Result<CatalogSources, PipelineError> {
        let source_repo = self.source_repository();
        let reference_repo = ReferenceRepository::new(self.db.clone());

        let geo = reference_repo.geo_lookup().await?;
        let languages = reference_repo.language_lookup().await?;
        debug!(
            geo_parents = geo.len(),
            languages = languages.len(),
            "Loaded reference lookups"
        );

        let raw_performance = source_repo.load_performance_records().await?;
        let (performance, aggregation) = aggregate(&raw_performance, &geo, &languages);
        if aggregation.unresolved() > 0 {
            counter!("performance_records_unresolved_total")
                .increment(aggregation.unresolved() as u64);
        }
        info!(
            records = aggregation.records_in,
            unresolved_country = aggregation.unresolved_country,
            unresolved_language = aggregation.unresolved_language,
            aggregates = performance.len(),
            "Aggregated performance windows"
        );

        let products = source_repo.load_products().await?;
        let competitiveness = source_repo.load_price_competitiveness().await?;
        let insights = source_repo.load_price_insights().await?;

        Ok(CatalogSources {
            products,
            competitiveness,
            insights,
            performance,
        })
    }

    fn finish(&self, view: ViewKind, rows_written: usize, timer: Instant) -> MaterializationReport {
        let elapsed = timer.elapsed();
        let labels = vec![("view", view.as_str())];
        counter!("view_rows_written_total", &labels).increment(rows_written as u64);
        histogram!("view_materialization_duration_ms", &labels)
            .record(elapsed.as_secs_f64() * 1000.0);

        info!(
            view = %view,
            rows_written,
            elapsed_ms = elapsed.as_millis() as u64,
            "View replaced"
        );

        MaterializationReport { view, rows_written }
    }
}

fn log_enrichment(stats: &EnrichmentStats) {
    info!(
        products = stats.products_in,
        without_shopping_targets = stats.products_without_targets,
        rows = stats.rows_out,
        with_benchmark = stats.with_competitiveness,
        with_insight = stats.with_insight,
        with_performance = stats.with_performance,
        "Enriched catalog"
    );
}
