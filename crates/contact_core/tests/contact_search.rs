use chrono::NaiveDate;
use contact_core::db::open_db_in_memory;
use contact_core::{
    search_contacts, search_contacts_by_field, ContactRepository, NewContact, SearchError,
    SearchField, SqliteContactRepository,
};
use rusqlite::Connection;

fn contact(first_name: &str, last_name: &str, email: &str, phone_number: &str) -> NewContact {
    NewContact {
        first_name: first_name.to_string(),
        last_name: last_name.to_string(),
        email: email.to_string(),
        phone_number: phone_number.to_string(),
        birth_date: NaiveDate::from_ymd_opt(1990, 4, 12).unwrap(),
        crm_status: None,
    }
}

fn seeded_connection() -> Connection {
    let conn = open_db_in_memory().unwrap();
    {
        let repo = SqliteContactRepository::new(&conn);
        repo.create_contact(&contact(
            "Anna",
            "Kovalenko",
            "anna.kovalenko@example.com",
            "380501111111",
        ))
        .unwrap();
        repo.create_contact(&contact(
            "Borys",
            "Savanna",
            "borys.m@example.com",
            "380502222222",
        ))
        .unwrap();
        repo.create_contact(&contact(
            "Clara",
            "Melnyk",
            "clara.anna@example.com",
            "380503333333",
        ))
        .unwrap();
    }
    conn
}

#[test]
fn free_text_matches_any_of_the_three_columns() {
    let conn = seeded_connection();

    // "anna" appears in a first name, a last name and an email.
    let hits = search_contacts(&conn, "anna").unwrap();
    assert_eq!(hits.len(), 3);

    let hits = search_contacts(&conn, "melnyk").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].first_name, "Clara");
}

#[test]
fn free_text_is_case_insensitive() {
    let conn = seeded_connection();

    let lower = search_contacts(&conn, "kovalenko").unwrap();
    let upper = search_contacts(&conn, "KOVALENKO").unwrap();
    assert_eq!(lower.len(), 1);
    assert_eq!(lower, upper);
}

#[test]
fn empty_query_matches_every_contact() {
    let conn = seeded_connection();

    let hits = search_contacts(&conn, "").unwrap();
    assert_eq!(hits.len(), 3);
}

#[test]
fn zero_matches_is_an_empty_success() {
    let conn = seeded_connection();

    let hits = search_contacts(&conn, "nobody-here").unwrap();
    assert!(hits.is_empty());
}

#[test]
fn like_metacharacters_match_literally() {
    let conn = open_db_in_memory().unwrap();
    let repo = SqliteContactRepository::new(&conn);
    repo.create_contact(&contact(
        "Percent",
        "Holder",
        "pct_100%@example.com",
        "380504444444",
    ))
    .unwrap();
    repo.create_contact(&contact(
        "Plain",
        "Holder",
        "pct100x@example.com",
        "380505555555",
    ))
    .unwrap();

    // A wildcard reading of `%` or `_` would match both rows.
    let percent = search_contacts(&conn, "100%").unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].first_name, "Percent");

    let underscore = search_contacts(&conn, "pct_").unwrap();
    assert_eq!(underscore.len(), 1);
    assert_eq!(underscore[0].first_name, "Percent");
}

#[test]
fn field_dispatch_searches_exactly_one_column() {
    let conn = seeded_connection();

    // "anna" in first_name only matches Anna, not the last-name/email rows.
    let by_first = search_contacts_by_field(&conn, SearchField::FirstName, "anna").unwrap();
    assert_eq!(by_first.len(), 1);
    assert_eq!(by_first[0].first_name, "Anna");

    let by_last = search_contacts_by_field(&conn, SearchField::LastName, "savanna").unwrap();
    assert_eq!(by_last.len(), 1);
    assert_eq!(by_last[0].first_name, "Borys");

    let by_email = search_contacts_by_field(&conn, SearchField::Email, "clara.anna").unwrap();
    assert_eq!(by_email.len(), 1);

    let by_phone = search_contacts_by_field(&conn, SearchField::PhoneNumber, "3333").unwrap();
    assert_eq!(by_phone.len(), 1);
    assert_eq!(by_phone[0].first_name, "Clara");
}

#[test]
fn field_dispatch_zero_matches_is_empty_success() {
    let conn = seeded_connection();

    let hits = search_contacts_by_field(&conn, SearchField::Email, "missing").unwrap();
    assert!(hits.is_empty());
}

#[test]
fn unrecognized_field_name_fails_with_validation_error() {
    let err = SearchField::from_name("birth_date").unwrap_err();
    assert!(matches!(err, SearchError::UnknownField { name } if name == "birth_date"));
}

#[test]
fn caller_supplied_field_name_drives_the_search() {
    let conn = seeded_connection();

    let field = SearchField::from_name("last_name").unwrap();
    let hits = search_contacts_by_field(&conn, field, "kovalenko").unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].last_name, "Kovalenko");
}
