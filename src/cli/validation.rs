use regex::Regex;

use crate::cli::args::{CliArgs, Command};
use crate::theme::Theme;

fn validate_color(color: &str) -> Result<(), String> {
    let re =
        Regex::new(r"^#[0-9a-fA-F]{6}$").map_err(|e| format!("invalid color pattern: {e}"))?;
    if !re.is_match(color.trim()) {
        return Err(format!("invalid color '{color}', expected #rrggbb"));
    }
    Ok(())
}

// Form-level checks only. The read-side cleaner owns the catalog's price
// bounds; the write path does not enforce them.
fn validate_paint_fields(brand: &str, price: f64, color: &str) -> Result<(), String> {
    if brand.trim().is_empty() {
        return Err("brand must not be empty".to_string());
    }
    if !price.is_finite() || price < 0.0 {
        return Err(format!(
            "invalid price '{price}', expected a non-negative number"
        ));
    }
    validate_color(color)
}

pub fn validate(args: &CliArgs) -> Result<(), String> {
    if let Some(raw) = args.output_format.as_deref() {
        crate::output::OutputFormat::parse(raw).ok_or_else(|| {
            format!("invalid --output-format '{raw}', expected table, csv or json")
        })?;
    }
    if let Some(timeout) = args.timeout {
        if timeout == 0 {
            return Err("invalid timeout, expected positive integer".to_string());
        }
    }
    match &args.command {
        Command::Add {
            brand,
            price,
            color,
            ..
        } => validate_paint_fields(brand, *price, color),
        Command::Update {
            id,
            brand,
            price,
            color,
            ..
        } => {
            if *id == 0 {
                return Err("invalid id, expected positive integer".to_string());
            }
            validate_paint_fields(brand, *price, color)
        }
        Command::Remove { id, .. } if *id == 0 => {
            Err("invalid id, expected positive integer".to_string())
        }
        Command::Theme { value: Some(v) } if v != "toggle" && Theme::parse(v).is_none() => {
            Err(format!("invalid theme '{v}', expected light, dark or toggle"))
        }
        _ => Ok(()),
    }
}
