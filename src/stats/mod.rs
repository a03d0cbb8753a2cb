use std::collections::HashMap;

use itertools::Itertools;

use crate::model::Paint;

/// Mean price over the snapshot; `None` for an empty one. Callers turn the
/// `None` into a no-data notice instead of dividing by zero.
pub fn average(records: &[Paint]) -> Option<f64> {
    if records.is_empty() {
        return None;
    }
    let total: f64 = records.iter().map(|p| p.price).sum();
    Some(total / records.len() as f64)
}

/// Brand with the most records. Count ties break to the lexicographically
/// smallest brand so repeated runs agree.
pub fn most_common_brand(records: &[Paint]) -> Option<&str> {
    records
        .iter()
        .map(|p| p.brand.as_str())
        .counts()
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then_with(|| b.0.cmp(a.0)))
        .map(|(brand, _)| brand)
}

/// Record with the greatest price; price ties break to the lowest id.
pub fn max_price(records: &[Paint]) -> Option<&Paint> {
    records.iter().max_by(|a, b| {
        a.price
            .partial_cmp(&b.price)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| b.id.cmp(&a.id))
    })
}

/// Per-brand mean price, one entry per distinct brand present. Key order is
/// unspecified; presentation imposes its own.
pub fn average_by_brand(records: &[Paint]) -> HashMap<String, f64> {
    records
        .iter()
        .map(|p| (p.brand.clone(), p.price))
        .into_group_map()
        .into_iter()
        .map(|(brand, prices)| {
            let mean = prices.iter().sum::<f64>() / prices.len() as f64;
            (brand, mean)
        })
        .collect()
}

/// Case-insensitive substring match on brand. An empty or whitespace needle
/// keeps the whole snapshot, in order.
pub fn filter_by_brand<'a>(records: &'a [Paint], needle: &str) -> Vec<&'a Paint> {
    let needle = needle.trim().to_lowercase();
    if needle.is_empty() {
        return records.iter().collect();
    }
    records
        .iter()
        .filter(|p| p.brand.to_lowercase().contains(&needle))
        .collect()
}

/// Everything the statistics panel shows, computed from one snapshot.
#[derive(Clone, Debug)]
pub struct CatalogSummary {
    pub total: usize,
    pub average_price: f64,
    pub most_common_brand: String,
    pub priciest: Paint,
    pub by_brand: Vec<(String, f64)>,
}

/// `None` for an empty snapshot; every field is defined otherwise.
pub fn summarize(records: &[Paint]) -> Option<CatalogSummary> {
    let average_price = average(records)?;
    let most_common = most_common_brand(records)?.to_string();
    let priciest = max_price(records)?.clone();
    let mut by_brand: Vec<(String, f64)> = average_by_brand(records).into_iter().collect();
    by_brand.sort_by(|a, b| a.0.cmp(&b.0));
    Some(CatalogSummary {
        total: records.len(),
        average_price,
        most_common_brand: most_common,
        priciest,
        by_brand,
    })
}
