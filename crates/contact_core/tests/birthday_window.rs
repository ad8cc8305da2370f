use chrono::NaiveDate;
use contact_core::db::open_db_in_memory;
use contact_core::{
    upcoming_birthdays, BirthdayWindow, ContactRepository, NewContact, SearchError,
    SqliteContactRepository, MAX_FORWARD_SHIFT_DAYS,
};
use rusqlite::Connection;

fn contact_born_on(tag: u32, month: u32, day: u32) -> NewContact {
    NewContact {
        first_name: format!("First{tag:02}"),
        last_name: format!("Last{tag:02}"),
        email: format!("person{tag:02}@example.com"),
        phone_number: format!("38050000{tag:04}"),
        birth_date: NaiveDate::from_ymd_opt(1988, month, day).unwrap(),
        crm_status: None,
    }
}

fn seed(conn: &Connection, dates: &[(u32, u32)]) {
    let repo = SqliteContactRepository::new(conn);
    for (index, (month, day)) in dates.iter().enumerate() {
        repo.create_contact(&contact_born_on(index as u32, *month, *day))
            .unwrap();
    }
}

#[test]
fn window_spanning_year_boundary_matches_both_segments() {
    let conn = open_db_in_memory().unwrap();
    seed(
        &conn,
        &[
            (12, 29),
            (12, 30),
            (12, 31),
            (1, 1),
            (1, 2),
            (1, 3),
            (1, 4),
            (1, 5),
        ],
    );

    let today = NaiveDate::from_ymd_opt(2024, 12, 30).unwrap();
    let window = BirthdayWindow::starting(today, 5).unwrap();
    let hits = upcoming_birthdays(&conn, &window).unwrap();

    let months_days: Vec<(u32, u32)> = hits
        .iter()
        .map(|c| {
            use chrono::Datelike;
            (c.birth_date.month(), c.birth_date.day())
        })
        .collect();
    assert_eq!(
        months_days,
        vec![(12, 30), (12, 31), (1, 1), (1, 2), (1, 3), (1, 4)]
    );
}

#[test]
fn zero_shift_matches_only_todays_month_day() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[(6, 14), (6, 15), (6, 16)]);

    let today = NaiveDate::from_ymd_opt(2024, 6, 15).unwrap();
    let window = BirthdayWindow::starting(today, 0).unwrap();
    let hits = upcoming_birthdays(&conn, &window).unwrap();

    assert_eq!(hits.len(), 1);
    use chrono::Datelike;
    assert_eq!((hits[0].birth_date.month(), hits[0].birth_date.day()), (6, 15));
}

#[test]
fn birth_year_is_ignored_by_the_window() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    let mut payload = contact_born_on(0, 7, 1);
    payload.birth_date = NaiveDate::from_ymd_opt(1953, 7, 1).unwrap();
    repo.create_contact(&payload).unwrap();

    let today = NaiveDate::from_ymd_opt(2024, 6, 25).unwrap();
    let window = BirthdayWindow::starting(today, 7).unwrap();
    let hits = upcoming_birthdays(&conn, &window).unwrap();

    assert_eq!(hits.len(), 1);
}

#[test]
fn zero_matches_is_an_empty_success() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[(1, 10)]);

    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let window = BirthdayWindow::starting(today, 10).unwrap();
    let hits = upcoming_birthdays(&conn, &window).unwrap();

    assert!(hits.is_empty());
}

#[test]
fn shift_of_365_is_rejected_and_364_is_processed() {
    let conn = open_db_in_memory().unwrap();
    seed(&conn, &[(3, 15), (9, 15)]);

    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    let err = BirthdayWindow::starting(today, 365).unwrap_err();
    assert!(matches!(err, SearchError::ShiftOutOfRange { requested: 365 }));

    let window = BirthdayWindow::starting(today, MAX_FORWARD_SHIFT_DAYS).unwrap();
    let hits = upcoming_birthdays(&conn, &window).unwrap();
    assert_eq!(hits.len(), 2);
}

#[test]
fn feb_29_contact_matches_boundary_spanning_window_in_non_leap_year() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    let mut payload = contact_born_on(0, 2, 29);
    // 1988 is a leap year, so the birth date itself is valid.
    payload.birth_date = NaiveDate::from_ymd_opt(1988, 2, 29).unwrap();
    repo.create_contact(&payload).unwrap();

    let today = NaiveDate::from_ymd_opt(2025, 2, 27).unwrap();

    let spanning = BirthdayWindow::starting(today, 3).unwrap();
    assert_eq!(upcoming_birthdays(&conn, &spanning).unwrap().len(), 1);

    let short = BirthdayWindow::starting(today, 1).unwrap();
    assert!(upcoming_birthdays(&conn, &short).unwrap().is_empty());
}
