#![allow(missing_docs)]

use axum_test::TestServer;
use rusqlite::Connection;

use crate::{
    build_router,
    stores::sqlite::{SQLAppState, create_app_state},
    transaction::TransactionFields,
};

pub(crate) fn get_test_state() -> SQLAppState {
    let connection =
        Connection::open_in_memory().expect("could not create in-memory SQLite database");

    create_app_state(connection).expect("could not initialize test DB")
}

pub(crate) fn get_test_server() -> (TestServer, SQLAppState) {
    let state = get_test_state();
    let server =
        TestServer::try_new(build_router(state.clone())).expect("Could not create test server.");

    (server, state)
}

pub(crate) fn salary_fields() -> TransactionFields {
    TransactionFields {
        kind: Some("income".to_owned()),
        category: Some("Salary".to_owned()),
        value: Some(1000.0),
        date: Some("2024-01-01".to_owned()),
        description: None,
    }
}

pub(crate) fn rent_fields() -> TransactionFields {
    TransactionFields {
        kind: Some("expense".to_owned()),
        category: Some("Rent".to_owned()),
        value: Some(400.0),
        date: Some("2024-01-02".to_owned()),
        description: None,
    }
}
