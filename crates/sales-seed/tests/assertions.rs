use chrono::{DateTime, Duration, Utc};

use sales_seed::assertions::{check_rows, ensure_rows_valid};
use sales_seed::data::generator::generate_sale_rows;
use sales_seed::profile::SalesProfile;

fn anchor() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-06-15T00:00:00Z")
        .expect("anchor")
        .with_timezone(&Utc)
}

#[test]
fn flags_out_of_range_fields() {
    let profile = SalesProfile::default();
    let mut rows = generate_sale_rows(&profile, 42, 3, anchor()).expect("rows");
    rows[1].customer_id = 51;
    rows[2].payment_type = "Cheque".to_string();

    let violations = check_rows(&rows, &profile, anchor());
    assert_eq!(violations.len(), 2, "violations: {violations:?}");
    assert_eq!(violations[0].row, 1);
    assert!(violations[0].message.contains("customer_id"));
    assert_eq!(violations[1].row, 2);
    assert!(violations[1].message.contains("payment_type"));
}

#[test]
fn flags_total_that_does_not_match_price_quantity_and_discount() {
    let profile = SalesProfile::default();
    let mut rows = generate_sale_rows(&profile, 42, 1, anchor()).expect("rows");
    rows[0].total_amount += 1.0;

    let violations = check_rows(&rows, &profile, anchor());
    assert!(
        violations.iter().any(|v| v.message.contains("total_amount")),
        "violations: {violations:?}"
    );
}

#[test]
fn flags_sale_dates_outside_the_window() {
    let profile = SalesProfile::default();
    let mut rows = generate_sale_rows(&profile, 42, 2, anchor()).expect("rows");
    rows[0].sale_date = anchor() + Duration::seconds(1);
    rows[1].sale_date = anchor() - Duration::days(61);

    let violations = check_rows(&rows, &profile, anchor());
    assert_eq!(violations.len(), 2, "violations: {violations:?}");
    assert!(violations.iter().all(|v| v.message.contains("sale_date")));
}

#[test]
fn flags_money_with_sub_cent_precision() {
    let profile = SalesProfile::default();
    let mut rows = generate_sale_rows(&profile, 42, 1, anchor()).expect("rows");
    rows[0].unit_price = 150.125;

    let violations = check_rows(&rows, &profile, anchor());
    assert!(
        violations
            .iter()
            .any(|v| v.message.contains("more than two decimals")),
        "violations: {violations:?}"
    );
}

#[test]
fn ensure_rows_valid_reports_first_violation() {
    let profile = SalesProfile::default();
    let mut rows = generate_sale_rows(&profile, 42, 4, anchor()).expect("rows");
    ensure_rows_valid(&rows, &profile, anchor()).expect("generated rows are valid");

    rows[3].status = String::new();
    let err = ensure_rows_valid(&rows, &profile, anchor()).expect_err("tampered row");
    let message = err.to_string();
    assert!(message.contains("row 3"), "unexpected error: {message}");
    assert!(message.contains("status"), "unexpected error: {message}");
}
