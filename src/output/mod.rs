use colored::{ColoredString, Colorize};

use crate::model::Paint;
use crate::stats::CatalogSummary;
use crate::theme::Theme;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OutputFormat {
    Table,
    Csv,
    Json,
}

impl OutputFormat {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "table" | "text" | "txt" => Some(Self::Table),
            "csv" => Some(Self::Csv),
            "json" => Some(Self::Json),
            _ => None,
        }
    }
}

pub fn infer_format_from_path(path: &str) -> Option<OutputFormat> {
    let lower = path.trim().to_lowercase();
    if lower.ends_with(".csv") {
        return Some(OutputFormat::Csv);
    }
    if lower.ends_with(".json") {
        return Some(OutputFormat::Json);
    }
    if lower.ends_with(".txt") {
        return Some(OutputFormat::Table);
    }
    None
}

fn heading(text: &str, theme: Theme) -> ColoredString {
    match theme {
        Theme::Dark => text.bold().cyan(),
        Theme::Light => text.bold().blue(),
    }
}

/// List view with the wire-contract columns; prices shown to two decimals.
pub fn render_table(records: &[Paint], theme: Theme) -> String {
    let mut out = String::new();
    let header = format!(
        "{:>6}  {:<20}  {:>10}  {:<9}  {:>8}",
        "ID", "Marca", "Precio", "Color", "Cantidad"
    );
    out.push_str(&heading(&header, theme).to_string());
    out.push('\n');
    if records.is_empty() {
        out.push_str("no paints to show\n");
        return out;
    }
    for p in records {
        out.push_str(&format!(
            "{:>6}  {:<20}  {:>10.2}  {:<9}  {:>8}\n",
            p.id, p.brand, p.price, p.color, p.quantity
        ));
    }
    out
}

/// Header row then one raw comma-joined line per record. Field values are not
/// escaped: a brand containing a comma corrupts its row, a known limitation
/// of the export format.
pub fn render_csv(records: &[Paint]) -> String {
    let mut out = String::from("ID,Marca,Precio,Color,Cantidad\n");
    for p in records {
        out.push_str(&format!(
            "{},{},{},{},{}\n",
            p.id, p.brand, p.price, p.color, p.quantity
        ));
    }
    out
}

/// Pretty-printed wire-shaped array.
pub fn render_json(records: &[Paint]) -> String {
    serde_json::to_string_pretty(records).unwrap_or_else(|_| "[]".to_string())
}

/// Statistics panel: totals, top brand, priciest record, per-brand averages.
pub fn render_summary(summary: &CatalogSummary, theme: Theme) -> String {
    let mut out = String::new();
    out.push_str(&format!(":: {:<14}: {}\n", "Total", summary.total));
    out.push_str(&format!(
        ":: {:<14}: ${:.2}\n",
        "Average price", summary.average_price
    ));
    out.push_str(&format!(
        ":: {:<14}: {}\n",
        "Top brand", summary.most_common_brand
    ));
    out.push_str(&format!(
        ":: {:<14}: ${:.2} ({}, id {})\n",
        "Priciest", summary.priciest.price, summary.priciest.brand, summary.priciest.id
    ));
    out.push('\n');
    out.push_str(&heading("Average price by brand", theme).to_string());
    out.push('\n');
    for (brand, mean) in &summary.by_brand {
        out.push_str(&format!("  {:<20}  ${:.2}\n", brand, mean));
    }
    out
}
