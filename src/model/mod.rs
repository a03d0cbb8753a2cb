use serde::{Deserialize, Serialize};

/// One paint product as held in the catalog snapshot.
///
/// The serde renames map the internal field names onto the names fixed by the
/// remote resource (`marca`, `precio`, `cantidad`); the wire contract never
/// changes, only the Rust-side spelling does.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Paint {
    pub id: u64,
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "precio")]
    pub price: f64,
    pub color: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}

/// Lenient deserialization target for untrusted upstream payloads. Every
/// field beyond `id` may be missing, and `precio` arrives as a JSON number or
/// a numeric string depending on how the record was written.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct RawPaint {
    #[serde(default)]
    pub id: u64,
    #[serde(default)]
    pub marca: Option<String>,
    #[serde(default)]
    pub precio: Option<serde_json::Value>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub cantidad: Option<i64>,
}

impl RawPaint {
    /// Numeric price, if `precio` is present and parses to a finite f64.
    pub fn parsed_price(&self) -> Option<f64> {
        let value = self.precio.as_ref()?;
        let price = match value {
            serde_json::Value::Number(n) => n.as_f64()?,
            serde_json::Value::String(s) => s.trim().parse::<f64>().ok()?,
            _ => return None,
        };
        price.is_finite().then_some(price)
    }
}

/// The four mutable fields sent on create and update; the remote assigns
/// `id` and echoes it back.
#[derive(Clone, Debug, Serialize)]
pub struct PaintInput {
    #[serde(rename = "marca")]
    pub brand: String,
    #[serde(rename = "precio")]
    pub price: f64,
    pub color: String,
    #[serde(rename = "cantidad")]
    pub quantity: u32,
}
