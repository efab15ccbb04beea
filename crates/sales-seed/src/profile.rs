use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{SeedError, SeedResult};

pub const DEFAULT_PAYMENT_TYPES: [&str; 4] = ["Cash", "Card", "UPI", "Wallet"];
pub const DEFAULT_STATUSES: [&str; 3] = ["Completed", "Returned", "Cancelled"];
pub const DEFAULT_WINDOW_DAYS: u32 = 60;
pub const MAX_WINDOW_DAYS: u32 = 36_500;

/// Inclusive integer range for id and quantity columns.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct IntRange {
    pub min: i32,
    pub max: i32,
}

impl IntRange {
    pub const fn new(min: i32, max: i32) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: i32) -> bool {
        (self.min..=self.max).contains(&value)
    }
}

/// Inclusive range for money and percentage columns.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub min: f64,
    pub max: f64,
}

impl PriceRange {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct WordRange {
    pub min: usize,
    pub max: usize,
}

/// Generation parameters for a batch of sales rows.
///
/// Every field may be omitted from a profile file; omitted fields keep the
/// defaults below.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SalesProfile {
    pub customer_id: IntRange,
    pub product_id: IntRange,
    pub store_id: IntRange,
    pub quantity: IntRange,
    pub unit_price: PriceRange,
    /// Percentage taken off the gross amount.
    pub discount_pct: PriceRange,
    pub window_days: u32,
    pub payment_types: Vec<String>,
    pub statuses: Vec<String>,
    pub remark_words: WordRange,
}

impl Default for SalesProfile {
    fn default() -> Self {
        Self {
            customer_id: IntRange::new(1, 50),
            product_id: IntRange::new(1, 100),
            store_id: IntRange::new(1, 10),
            quantity: IntRange::new(1, 10),
            unit_price: PriceRange::new(100.0, 1000.0),
            discount_pct: PriceRange::new(0.0, 20.0),
            window_days: DEFAULT_WINDOW_DAYS,
            payment_types: DEFAULT_PAYMENT_TYPES.iter().map(|s| s.to_string()).collect(),
            statuses: DEFAULT_STATUSES.iter().map(|s| s.to_string()).collect(),
            remark_words: WordRange { min: 3, max: 8 },
        }
    }
}

impl SalesProfile {
    pub fn validate(&self) -> SeedResult<()> {
        validate_id_range("customer_id", self.customer_id)?;
        validate_id_range("product_id", self.product_id)?;
        validate_id_range("store_id", self.store_id)?;
        validate_id_range("quantity", self.quantity)?;

        validate_price_range("unit_price", self.unit_price)?;
        validate_price_range("discount_pct", self.discount_pct)?;
        if self.discount_pct.max > 100.0 {
            return Err(invalid(format!(
                "discount_pct.max must be at most 100, got {}",
                self.discount_pct.max
            )));
        }

        if self.window_days == 0 || self.window_days > MAX_WINDOW_DAYS {
            return Err(invalid(format!(
                "window_days must be between 1 and {MAX_WINDOW_DAYS}, got {}",
                self.window_days
            )));
        }

        validate_choices("payment_types", &self.payment_types)?;
        validate_choices("statuses", &self.statuses)?;

        if self.remark_words.min == 0 || self.remark_words.min > self.remark_words.max {
            return Err(invalid(format!(
                "remark_words must satisfy 1 <= min <= max, got {}..={}",
                self.remark_words.min, self.remark_words.max
            )));
        }
        Ok(())
    }
}

fn validate_id_range(field: &str, range: IntRange) -> SeedResult<()> {
    if range.min < 1 {
        return Err(invalid(format!(
            "{field}.min must be at least 1, got {}",
            range.min
        )));
    }
    if range.min > range.max {
        return Err(invalid(format!(
            "{field}.min ({}) must not exceed {field}.max ({})",
            range.min, range.max
        )));
    }
    Ok(())
}

fn validate_price_range(field: &str, range: PriceRange) -> SeedResult<()> {
    if !range.min.is_finite() || !range.max.is_finite() {
        return Err(invalid(format!("{field} bounds must be finite")));
    }
    if range.min < 0.0 {
        return Err(invalid(format!(
            "{field}.min must not be negative, got {}",
            range.min
        )));
    }
    if range.min > range.max {
        return Err(invalid(format!(
            "{field}.min ({}) must not exceed {field}.max ({})",
            range.min, range.max
        )));
    }
    if !is_whole_cents(range.min) || !is_whole_cents(range.max) {
        return Err(invalid(format!("{field} bounds must have at most two decimals")));
    }
    Ok(())
}

/// True when `value` carries no digits past the second decimal.
pub fn is_whole_cents(value: f64) -> bool {
    let scaled = value * 100.0;
    (scaled - scaled.round()).abs() < 1e-6
}

fn validate_choices(field: &str, choices: &[String]) -> SeedResult<()> {
    if choices.is_empty() {
        return Err(invalid(format!("{field} must not be empty")));
    }
    if choices.iter().any(|c| c.trim().is_empty()) {
        return Err(invalid(format!("{field} must not contain blank entries")));
    }
    Ok(())
}

fn invalid(message: String) -> SeedError {
    SeedError::InvalidArgument(message)
}

pub fn load_profile(path: impl AsRef<Path>) -> SeedResult<SalesProfile> {
    let path = path.as_ref();
    let bytes = std::fs::read(path)?;
    let profile = serde_yaml::from_slice::<SalesProfile>(&bytes).map_err(|error| {
        SeedError::InvalidArgument(format!("invalid profile '{}': {error}", path.display()))
    })?;
    profile.validate()?;
    Ok(profile)
}
