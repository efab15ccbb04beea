use chrono::{DateTime, Duration, SubsecRound, Utc};
use fake::faker::lorem::en::Sentence;
use fake::Fake;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use super::datasets::SaleRow;
use crate::cli::validate_row_count;
use crate::error::SeedResult;
use crate::profile::{IntRange, PriceRange, SalesProfile};

const MILLIS_PER_DAY: i64 = 86_400_000;

pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Net amount after applying a percentage discount, rounded to cents.
pub fn total_amount(unit_price: f64, quantity: i32, discount_pct: f64) -> f64 {
    let gross = unit_price * f64::from(quantity);
    round_cents(gross - gross * (discount_pct / 100.0))
}

pub fn generate_sale_rows(
    profile: &SalesProfile,
    seed: u64,
    rows: usize,
    anchor: DateTime<Utc>,
) -> SeedResult<Vec<SaleRow>> {
    validate_row_count(rows)?;
    profile.validate()?;

    // Postgres timestamps hold microseconds.
    let anchor = anchor.trunc_subsecs(6);
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(rows);
    let window_ms = i64::from(profile.window_days) * MILLIS_PER_DAY;
    let words = profile.remark_words.min..profile.remark_words.max + 1;

    for _ in 0..rows {
        let customer_id = pick_int(&mut rng, profile.customer_id);
        let product_id = pick_int(&mut rng, profile.product_id);
        let store_id = pick_int(&mut rng, profile.store_id);
        let quantity = pick_int(&mut rng, profile.quantity);
        let unit_price = pick_cents(&mut rng, profile.unit_price);
        let discount = pick_cents(&mut rng, profile.discount_pct);

        let payment_type = pick_choice(&mut rng, &profile.payment_types);
        let status = pick_choice(&mut rng, &profile.statuses);
        let remarks = capitalize_first(Sentence(words.clone()).fake_with_rng(&mut rng));

        let offset_ms = rng.gen_range(0..=window_ms);
        let sale_date = anchor - Duration::milliseconds(offset_ms);

        out.push(SaleRow {
            sale_date,
            customer_id,
            product_id,
            store_id,
            quantity,
            unit_price,
            discount,
            total_amount: total_amount(unit_price, quantity, discount),
            payment_type,
            status,
            remarks,
        });
    }

    Ok(out)
}

fn pick_int(rng: &mut ChaCha8Rng, range: IntRange) -> i32 {
    rng.gen_range(range.min..=range.max)
}

// Bounds are whole cents, so rounding cannot leave the range.
fn pick_cents(rng: &mut ChaCha8Rng, range: PriceRange) -> f64 {
    round_cents(rng.gen_range(range.min..=range.max))
}

fn capitalize_first(sentence: String) -> String {
    let mut chars = sentence.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => sentence,
    }
}

fn pick_choice(rng: &mut ChaCha8Rng, choices: &[String]) -> String {
    choices[rng.gen_range(0..choices.len())].clone()
}
