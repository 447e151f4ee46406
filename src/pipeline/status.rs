//! Fan-out of a product's Shopping destination into per-country statuses.

use std::collections::BTreeSet;

use super::types::{DestinationStatus, ProductSnapshot, TargetedCountryStatus};

/// Targeted countries of one destination entry, sorted by country code.
///
/// The targeted set is the deduplicated union of approved, pending and
/// disapproved countries; a country is disapproved iff it is listed as such.
pub fn targeted_countries(destination: &DestinationStatus) -> Vec<TargetedCountryStatus> {
    let disapproved: BTreeSet<&str> = destination
        .disapproved_countries
        .iter()
        .map(|country| country.trim())
        .filter(|country| !country.is_empty())
        .collect();

    destination
        .approved_countries
        .iter()
        .chain(&destination.pending_countries)
        .chain(&destination.disapproved_countries)
        .map(|country| country.trim())
        .filter(|country| !country.is_empty())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .map(|country| TargetedCountryStatus {
            targeted_country: country.to_string(),
            is_disapproved: disapproved.contains(country),
        })
        .collect()
}

/// Per-country statuses for a product; empty when it has no Shopping destination.
pub fn resolve_product_status(product: &ProductSnapshot) -> Vec<TargetedCountryStatus> {
    product
        .shopping_destination()
        .map(targeted_countries)
        .unwrap_or_default()
}
