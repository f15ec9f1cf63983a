//! End-to-end tests against a live PostgreSQL server, driven by the
//! schema and seed scripts under `sql/`.
//!
//! Ignored by default; run with a disposable database:
//!
//! ```sh
//! MARQUEE_TEST_DBNAME=marquee_test cargo test -- --ignored
//! ```
//!
//! Connection settings come from `MARQUEE_TEST_HOST`, `MARQUEE_TEST_PORT`,
//! `MARQUEE_TEST_DBNAME`, `MARQUEE_TEST_USER` and `PGPASSWORD`, with the
//! usual local defaults. The schema is dropped and recreated on every run.

use chrono::{NaiveDate, NaiveTime};
use marquee::core::db::{ConnectionParams, DataAccess, PgStore, SqlValue};
use marquee::core::MarqueeError;
use marquee::domain::{NewMovie, NewShow};
use marquee::handlers::{run, Command, Outcome};
use postgres::NoTls;

fn env_or(name: &str, default: &str) -> String {
    std::env::var(name).unwrap_or_else(|_| default.to_string())
}

fn test_params() -> ConnectionParams {
    ConnectionParams {
        host: env_or("MARQUEE_TEST_HOST", "localhost"),
        port: env_or("MARQUEE_TEST_PORT", "5432").parse().expect("port"),
        dbname: env_or("MARQUEE_TEST_DBNAME", "marquee_test"),
        user: env_or("MARQUEE_TEST_USER", "postgres"),
        password: env_or("PGPASSWORD", ""),
    }
}

/// Recreates and seeds the schema through a plain driver connection.
fn reset_fixture(params: &ConnectionParams) {
    let mut config = postgres::Config::new();
    config
        .host(&params.host)
        .port(params.port)
        .dbname(&params.dbname)
        .user(&params.user);
    if !params.password.is_empty() {
        config.password(&params.password);
    }
    let mut client = config.connect(NoTls).expect("fixture connection");
    client
        .batch_execute(include_str!("../sql/schema.sql"))
        .expect("schema");
    client
        .batch_execute(include_str!("../sql/seed.sql"))
        .expect("seed");
}

fn rows_of(outcome: Outcome) -> Vec<Vec<String>> {
    match outcome {
        Outcome::Rows(result) => result.rows,
        other => panic!("Expected rows, got {:?}", other),
    }
}

#[test]
#[ignore = "requires a running PostgreSQL server"]
fn fixture_suite() {
    let params = test_params();
    reset_fixture(&params);
    let mut store = PgStore::connect(&params).expect("store connection");

    love_titles_satisfy_the_filter(&mut store);
    failed_show_insert_rolls_back_the_movie(&mut store);
    remove_payment_cancels_and_deletes(&mut store);
    change_seats_updates_existing_and_rejects_unknown(&mut store);

    store.close();
}

fn love_titles_satisfy_the_filter(store: &mut PgStore) {
    let rows = rows_of(run(Command::ListLoveMoviesReleasedAfter2010, store).unwrap());
    let mut titles: Vec<&str> = rows.iter().map(|r| r[0].as_str()).collect();
    titles.sort_unstable();

    // "Love Actually" (2003) is seeded precisely so the release-date
    // filter has something to exclude.
    assert_eq!(titles, vec!["Crazy Love", "Eternal Love"]);
}

fn failed_show_insert_rolls_back_the_movie(store: &mut PgStore) {
    let movie = NewMovie {
        id: 50,
        title: "Orphan Candidate".to_string(),
        release_date: NaiveDate::from_ymd_opt(2015, 5, 1).unwrap(),
        country: "US".to_string(),
        description: "Must not survive the rollback".to_string(),
        duration_secs: 5400,
        language: "en".to_string(),
        genre: "Drama".to_string(),
    };
    let show = NewShow {
        id: 1, // duplicate key: show 1 is seeded
        movie_id: 50,
        date: NaiveDate::from_ymd_opt(2019, 2, 1).unwrap(),
        start_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
        end_time: NaiveTime::from_hms_opt(14, 0, 0).unwrap(),
    };

    let err = run(
        Command::AddMovieShowingToTheater {
            movie,
            show,
            theater_id: 1,
        },
        store,
    )
    .unwrap_err();
    assert!(matches!(err, MarqueeError::Statement(_)));

    // The movie insert succeeded inside the transaction but must not be
    // observable after the failed batch.
    let leftovers = store
        .query(
            "SELECT mvid FROM movies WHERE mvid = $1",
            &[SqlValue::Int(50)],
        )
        .unwrap();
    assert_eq!(leftovers.row_count, 0);
}

fn remove_payment_cancels_and_deletes(store: &mut PgStore) {
    run(Command::RemovePayment { booking_id: 42 }, store).unwrap();

    let status = store
        .query(
            "SELECT status FROM bookings WHERE bid = $1",
            &[SqlValue::Int(42)],
        )
        .unwrap();
    assert_eq!(status.rows, vec![vec!["Cancelled".to_string()]]);

    let payments = store
        .query(
            "SELECT pid FROM payments WHERE bid = $1",
            &[SqlValue::Int(42)],
        )
        .unwrap();
    assert_eq!(payments.row_count, 0);
}

fn change_seats_updates_existing_and_rejects_unknown(store: &mut PgStore) {
    let outcome = run(
        Command::ChangeSeatsForBooking {
            booking_id: 41,
            seats: "10,11".parse().unwrap(),
        },
        store,
    )
    .unwrap();
    assert_eq!(outcome, Outcome::Written(1));

    let seats = store
        .query(
            "SELECT seats FROM bookings WHERE bid = $1",
            &[SqlValue::Int(41)],
        )
        .unwrap();
    assert_eq!(seats.rows, vec![vec!["10,11".to_string()]]);

    let err = run(
        Command::ChangeSeatsForBooking {
            booking_id: 999,
            seats: "1".parse().unwrap(),
        },
        store,
    )
    .unwrap_err();
    assert!(matches!(err, MarqueeError::Validation(_)));
}
