use clap::{CommandFactory, Parser};

use sales_seed::cli::{
    parse_anchor, validate_row_count, validate_table_name, Args, Command, LogFormat, MAX_ROWS,
};

#[test]
fn accepts_plain_and_schema_qualified_tables() {
    for table in ["sales", "public.sales", "_staging.sales_2026", "Sales"] {
        validate_table_name(table).expect("table should be valid");
    }
}

#[test]
fn rejects_tables_that_would_need_quoting_or_inject_sql() {
    for table in [
        "",
        "1sales",
        "sales;drop table x",
        "a.b.c",
        "sales ",
        "\"sales\"",
        ".sales",
        "public.",
    ] {
        let err = validate_table_name(table).expect_err("table should be rejected");
        assert!(
            err.to_string().contains("table name"),
            "unexpected error for '{table}': {err}"
        );
    }
}

#[test]
fn rejects_overlong_identifiers() {
    let table = "s".repeat(64);
    let err = validate_table_name(&table).expect_err("64-byte identifier");
    assert!(err.to_string().contains("longer than 63"), "unexpected error: {err}");
    validate_table_name(&"s".repeat(63)).expect("63-byte identifier is allowed");
}

#[test]
fn zero_rows_is_rejected() {
    let err = validate_row_count(0).expect_err("zero rows");
    assert!(err.to_string().contains("rows"), "unexpected error: {err}");
    validate_row_count(1).expect("one row");
}

#[test]
fn anchor_accepts_rfc3339_with_offset() {
    let anchor = parse_anchor("2026-03-01T14:00:00+02:00").expect("anchor");
    assert_eq!(anchor.to_rfc3339(), "2026-03-01T12:00:00+00:00");
    assert!(parse_anchor("yesterday").is_err());
}

#[test]
fn seed_defaults_match_the_manual_script() {
    let args = Args::try_parse_from(["sales-seed", "seed"]).expect("parse");
    assert_eq!(args.log_format, LogFormat::Text);
    let Command::Seed {
        batch,
        table,
        report,
    } = args.command
    else {
        panic!("expected seed command");
    };
    assert_eq!(batch.rows, 10);
    assert_eq!(table, "sales");
    assert!(report.is_none());
}

#[test]
fn preview_parses_seed_and_anchor() {
    let args = Args::try_parse_from([
        "sales-seed",
        "preview",
        "--rows",
        "3",
        "--seed",
        "99",
        "--anchor",
        "2026-01-01T00:00:00Z",
    ])
    .expect("parse");
    let Command::Preview { batch } = args.command else {
        panic!("expected preview command");
    };
    let (_, spec) = batch.resolve().expect("resolve");
    assert_eq!(spec.rows, 3);
    assert_eq!(spec.seed, 99);
    assert_eq!(spec.anchor.to_rfc3339(), "2026-01-01T00:00:00+00:00");
}

#[test]
fn preview_rejects_malformed_anchor() {
    let err = Args::try_parse_from(["sales-seed", "preview", "--anchor", "not-a-time"])
        .expect_err("bad anchor");
    assert!(err.to_string().contains("anchor"), "unexpected error: {err}");
}

#[test]
fn row_count_has_an_upper_bound() {
    validate_row_count(MAX_ROWS).expect("largest batch");
    for rows in [MAX_ROWS + 1, usize::MAX] {
        let err = validate_row_count(rows).expect_err("oversized batch");
        assert!(
            err.to_string().contains("1000000"),
            "unexpected error for {rows}: {err}"
        );
    }
}

#[test]
fn oversized_rows_flag_fails_resolution() {
    let args = Args::try_parse_from(["sales-seed", "preview", "--rows", "18446744073709551615"])
        .expect("parse");
    let Command::Preview { batch } = args.command else {
        panic!("expected preview command");
    };
    let err = batch.resolve().expect_err("oversized batch");
    assert!(err.to_string().contains("rows"), "unexpected error: {err}");
}

#[test]
fn every_subcommand_has_help_text() {
    let command = Args::command();
    for sub in command.get_subcommands().filter(|sub| sub.get_name() != "help") {
        assert!(
            sub.get_about().is_some(),
            "subcommand '{}' has no description",
            sub.get_name()
        );
    }
}
