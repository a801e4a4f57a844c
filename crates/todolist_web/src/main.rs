//! Web entry point: configuration, logging bootstrap, and the tiny_http
//! accept loop.
//!
//! # Responsibility
//! - Select the storage backend once at startup.
//! - Translate between HTTP requests/responses and handler outcomes.
//!
//! # Invariants
//! - One request is handled at a time; a store over the backend is built
//!   at request start and released at request end.
//! - Store failures terminate the request with a generic 500 page.

mod config;
mod form;
mod handlers;
mod router;
mod session;
mod views;

use clap::Parser;
use config::{Backend, Cli};
use form::FormData;
use handlers::Outcome;
use log::{error, info};
use rusqlite::Connection;
use session::{Session, SessionRegistry, SESSION_COOKIE};
use std::io::{Cursor, Read};
use tiny_http::{Header, Request, Response, Server};
use todolist_core::db::open_db;
use todolist_core::{default_log_level, init_logging, SessionStore, SqliteStore};

fn main() {
    let cli = Cli::parse();

    let log_dir = cli
        .log_dir
        .clone()
        .unwrap_or_else(|| std::env::temp_dir().join("todolist-logs"));
    let level = cli
        .log_level
        .clone()
        .unwrap_or_else(|| default_log_level().to_string());
    if let Err(err) = init_logging(&level, &log_dir) {
        eprintln!("logging setup failed: {err}");
        std::process::exit(1);
    }

    let db = match cli.backend {
        Backend::Sqlite => match open_db(&cli.db_path) {
            Ok(conn) => Some(conn),
            Err(err) => {
                error!("event=startup_failed module=web error={err}");
                eprintln!(
                    "failed to open database `{}`: {err}",
                    cli.db_path.display()
                );
                std::process::exit(1);
            }
        },
        Backend::Session => None,
    };

    let addr = format!("0.0.0.0:{}", cli.port);
    let server = match Server::http(&addr) {
        Ok(server) => server,
        Err(err) => {
            error!("event=startup_failed module=web error={err}");
            eprintln!("failed to start server on {addr}: {err}");
            std::process::exit(1);
        }
    };

    info!(
        "event=server_start module=web status=ok addr={addr} backend={}",
        cli.backend.as_str()
    );
    println!("todolist listening on http://localhost:{}", cli.port);

    let mut sessions = SessionRegistry::new();
    for mut request in server.incoming_requests() {
        let response = handle_request(&mut request, db.as_ref(), &mut sessions);
        let _ = request.respond(response);
    }
}

fn handle_request(
    request: &mut Request,
    db: Option<&Connection>,
    sessions: &mut SessionRegistry,
) -> Response<Cursor<Vec<u8>>> {
    let route = router::route(request.method(), request.url());
    let format = router::response_format(request.headers());
    info!(
        "event=request module=web method={} url={}",
        request.method(),
        request.url()
    );

    let cookie_header = request
        .headers()
        .iter()
        .find(|header| header.field.equiv("Cookie"))
        .map(|header| header.value.as_str().to_string());
    let (session_id, created) = sessions.resolve(cookie_header.as_deref());

    let mut body = String::new();
    if request.as_reader().read_to_string(&mut body).is_err() {
        body.clear();
    }
    let form = FormData::parse(&body);

    let session = sessions.session_mut(session_id);
    let outcome = match db {
        Some(conn) => {
            let mut store = SqliteStore::new(conn);
            handlers::dispatch(route, format, &form, &mut store, &mut session.flash)
        }
        None => {
            let Session { lists, flash } = session;
            let mut store = SessionStore::new(lists);
            handlers::dispatch(route, format, &form, &mut store, flash)
        }
    };

    let response = match outcome {
        Ok(outcome) => render_outcome(outcome),
        Err(err) => {
            error!("event=request_failed module=web status=error error={err}");
            html_response(views::server_error_page(), 500)
        }
    };

    if created {
        let cookie = format!("{SESSION_COOKIE}={session_id}; Path=/; HttpOnly");
        response.with_header(header("Set-Cookie", &cookie))
    } else {
        response
    }
}

fn render_outcome(outcome: Outcome) -> Response<Cursor<Vec<u8>>> {
    match outcome {
        Outcome::Page(html) => html_response(html, 200),
        Outcome::NotFound => html_response(views::not_found_page(), 404),
        Outcome::Redirect(location) => Response::from_data(Vec::new())
            .with_status_code(302)
            .with_header(header("Location", &location)),
        Outcome::NoContent => Response::from_data(Vec::new()).with_status_code(204),
        Outcome::Text(text) => Response::from_data(text.into_bytes())
            .with_header(header("Content-Type", "text/plain; charset=utf-8")),
    }
}

fn html_response(html: String, status: u16) -> Response<Cursor<Vec<u8>>> {
    Response::from_data(html.into_bytes())
        .with_status_code(status)
        .with_header(header("Content-Type", "text/html; charset=utf-8"))
}

fn header(field: &str, value: &str) -> Header {
    // Both inputs are produced by this binary and are always valid header
    // bytes.
    Header::from_bytes(field, value).expect("static header should be valid")
}
