use chrono::{DateTime, Duration, SubsecRound, Utc};

use crate::data::datasets::SaleRow;
use crate::data::generator::total_amount;
use crate::error::{SeedError, SeedResult};
use crate::profile::{is_whole_cents, IntRange, SalesProfile};

const MONEY_EPSILON: f64 = 0.005;

#[derive(Clone, Debug, PartialEq)]
pub struct RowViolation {
    pub row: usize,
    pub message: String,
}

pub fn check_rows(
    rows: &[SaleRow],
    profile: &SalesProfile,
    anchor: DateTime<Utc>,
) -> Vec<RowViolation> {
    let anchor = anchor.trunc_subsecs(6);
    let window_start = anchor - Duration::days(i64::from(profile.window_days));
    let mut violations = Vec::new();

    for (idx, row) in rows.iter().enumerate() {
        let mut fail = |message: String| {
            violations.push(RowViolation { row: idx, message });
        };

        check_int(&mut fail, "customer_id", row.customer_id, profile.customer_id);
        check_int(&mut fail, "product_id", row.product_id, profile.product_id);
        check_int(&mut fail, "store_id", row.store_id, profile.store_id);
        check_int(&mut fail, "quantity", row.quantity, profile.quantity);

        if !profile.unit_price.contains(row.unit_price) {
            fail(format!(
                "unit_price {} outside {}..={}",
                row.unit_price, profile.unit_price.min, profile.unit_price.max
            ));
        }
        if !profile.discount_pct.contains(row.discount) {
            fail(format!(
                "discount {} outside {}..={}",
                row.discount, profile.discount_pct.min, profile.discount_pct.max
            ));
        }
        for (field, value) in [
            ("unit_price", row.unit_price),
            ("discount", row.discount),
            ("total_amount", row.total_amount),
        ] {
            if !is_whole_cents(value) {
                fail(format!("{field} {value} has more than two decimals"));
            }
        }

        let expected_total = total_amount(row.unit_price, row.quantity, row.discount);
        if (row.total_amount - expected_total).abs() > MONEY_EPSILON {
            fail(format!(
                "total_amount {} does not match recomputed {expected_total}",
                row.total_amount
            ));
        }

        if !profile.payment_types.contains(&row.payment_type) {
            fail(format!("unknown payment_type '{}'", row.payment_type));
        }
        if !profile.statuses.contains(&row.status) {
            fail(format!("unknown status '{}'", row.status));
        }
        if row.remarks.trim().is_empty() {
            fail("remarks must not be empty".to_string());
        }

        if row.sale_date < window_start || row.sale_date > anchor {
            fail(format!(
                "sale_date {} outside window {window_start}..={anchor}",
                row.sale_date
            ));
        }
    }

    violations
}

pub fn ensure_rows_valid(
    rows: &[SaleRow],
    profile: &SalesProfile,
    anchor: DateTime<Utc>,
) -> SeedResult<()> {
    let violations = check_rows(rows, profile, anchor);
    let Some(first) = violations.first() else {
        return Ok(());
    };
    Err(SeedError::RowCheck(format!(
        "{} violation(s); first at row {}: {}",
        violations.len(),
        first.row,
        first.message
    )))
}

fn check_int(fail: &mut impl FnMut(String), field: &str, value: i32, range: IntRange) {
    if !range.contains(value) {
        fail(format!(
            "{field} {value} outside {}..={}",
            range.min, range.max
        ));
    }
}
