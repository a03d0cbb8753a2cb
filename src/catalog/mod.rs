use log::debug;

use crate::api::{ApiClient, ApiError};
use crate::model::{Paint, RawPaint};

/// Accepted price range for cleaned records. Records outside it are upstream
/// noise, not writable business data: the write path does not enforce these
/// bounds, only the read-side cleaner does.
pub const PRICE_MIN: f64 = 50.0;
pub const PRICE_MAX: f64 = 500.0;

/// Data-quality gate over raw upstream records.
///
/// Keeps a record iff `precio` parses to a finite number inside
/// [`PRICE_MIN`, `PRICE_MAX`] and `marca` is non-empty after trimming.
/// Failures are dropped without user-visible output. The result is ordered
/// newest id first; the sort is stable for duplicate ids.
pub fn clean(raw: Vec<RawPaint>) -> Vec<Paint> {
    let total = raw.len();
    let mut out: Vec<Paint> = raw
        .into_iter()
        .filter_map(|r| {
            let price = r.parsed_price()?;
            if !(PRICE_MIN..=PRICE_MAX).contains(&price) {
                return None;
            }
            let brand = r
                .marca
                .as_deref()
                .map(str::trim)
                .filter(|b| !b.is_empty())?
                .to_string();
            Some(Paint {
                id: r.id,
                brand,
                price,
                color: r.color.unwrap_or_default(),
                quantity: r.cantidad.unwrap_or(0).max(0) as u32,
            })
        })
        .collect();
    if out.len() < total {
        debug!("dropped {} malformed record(s) while cleaning", total - out.len());
    }
    out.sort_by(|a, b| b.id.cmp(&a.id));
    out
}

/// The single client-held snapshot of cleaned records.
///
/// The snapshot is replaced wholesale and never mutated in place; filtered
/// display views are built from borrows and never written back.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    records: Vec<Paint>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn replace(&mut self, records: Vec<Paint>) {
        self.records = records;
    }

    pub fn snapshot(&self) -> &[Paint] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn find(&self, id: u64) -> Option<&Paint> {
        self.records.iter().find(|p| p.id == id)
    }
}

/// Fetch, clean, and swap in a fresh snapshot, returning the cleaned record
/// count. On any error the previous snapshot is left untouched.
pub async fn refresh(client: &ApiClient, catalog: &mut Catalog) -> Result<usize, ApiError> {
    let raw = client.fetch_all().await?;
    let cleaned = clean(raw);
    let count = cleaned.len();
    catalog.replace(cleaned);
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::{clean, Catalog};
    use crate::model::RawPaint;

    fn raws(value: serde_json::Value) -> Vec<RawPaint> {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn clean_drops_out_of_range_and_malformed_records() {
        let cleaned = clean(raws(serde_json::json!([
            { "id": 1, "marca": "Rex", "precio": 120, "color": "#fff", "cantidad": 3 },
            { "id": 2, "marca": "Rex", "precio": 10, "color": "#fff", "cantidad": 1 },
            { "id": 3, "marca": "Rex", "precio": 900, "color": "#fff", "cantidad": 1 },
            { "id": 4, "marca": "Rex", "precio": null, "color": "#fff", "cantidad": 1 },
            { "id": 5, "marca": "Rex", "precio": "abc", "color": "#fff", "cantidad": 1 },
            { "id": 6, "marca": "", "precio": 120, "color": "#fff", "cantidad": 1 },
            { "id": 7, "precio": 120, "color": "#fff", "cantidad": 1 },
            { "id": 8, "marca": "Sherwin", "precio": "250.5", "cantidad": 2 }
        ])));
        let ids: Vec<u64> = cleaned.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![8, 1]);
        assert_eq!(cleaned[0].price, 250.5);
        assert_eq!(cleaned[0].color, "");
    }

    #[test]
    fn clean_orders_newest_id_first() {
        let cleaned = clean(raws(serde_json::json!([
            { "id": 2, "marca": "A", "precio": 100 },
            { "id": 9, "marca": "B", "precio": 100 },
            { "id": 5, "marca": "C", "precio": 100 }
        ])));
        let ids: Vec<u64> = cleaned.iter().map(|p| p.id).collect();
        assert_eq!(ids, vec![9, 5, 2]);
    }

    #[test]
    fn clean_clamps_negative_quantities_to_zero() {
        let cleaned = clean(raws(serde_json::json!([
            { "id": 1, "marca": "A", "precio": 100, "cantidad": -4 }
        ])));
        assert_eq!(cleaned[0].quantity, 0);
    }

    #[test]
    fn catalog_replace_swaps_the_whole_snapshot() {
        let mut catalog = Catalog::new();
        assert!(catalog.is_empty());
        catalog.replace(clean(raws(serde_json::json!([
            { "id": 1, "marca": "A", "precio": 100 },
            { "id": 2, "marca": "B", "precio": 200 }
        ]))));
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.find(2).map(|p| p.brand.as_str()), Some("B"));

        catalog.replace(Vec::new());
        assert!(catalog.is_empty());
        assert!(catalog.find(2).is_none());
    }
}
