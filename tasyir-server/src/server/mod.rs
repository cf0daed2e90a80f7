mod accounting;
mod auth;
mod config;
mod error;
mod hr;
mod session;
mod stock;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};

use tasyir_core::Tasyir;

pub use config::*;

pub async fn run(config: ServerConfig, app: Tasyir) -> anyhow::Result<()> {
    let router = router(app);

    println!("Starting server on port {}", config.port);
    let listener =
        tokio::net::TcpListener::bind(&std::net::SocketAddr::from(([0, 0, 0, 0], config.port)))
            .await?;
    axum::serve(listener, router.into_make_service()).await?;
    Ok(())
}

fn router(app: Tasyir) -> Router {
    let accounting = Router::new()
        .route(
            "/journal-entries",
            get(accounting::list_journal_entries).post(accounting::create_journal_entry),
        )
        .route(
            "/journal-entries/:id",
            get(accounting::find_journal_entry).put(accounting::update_journal_entry),
        )
        .route(
            "/periods",
            get(accounting::list_periods).post(accounting::create_period),
        )
        .route("/periods/:id", get(accounting::find_period))
        .route("/periods/:id/close", post(accounting::close_period))
        .route(
            "/chart-of-accounts",
            get(accounting::list_accounts).post(accounting::create_account),
        )
        .route(
            "/chart-of-accounts/:id",
            get(accounting::find_account).put(accounting::update_account),
        )
        .route_layer(middleware::from_fn(auth::require_accounting));

    let hr = Router::new()
        .route(
            "/departments",
            get(hr::list_departments).post(hr::create_department),
        )
        .route(
            "/departments/:id",
            get(hr::find_department).put(hr::update_department),
        )
        .route(
            "/positions",
            get(hr::list_positions).post(hr::create_position),
        )
        .route(
            "/positions/:id",
            get(hr::find_position).put(hr::update_position),
        )
        .route(
            "/employees",
            get(hr::list_employees).post(hr::create_employee),
        )
        .route(
            "/employees/:id",
            get(hr::find_employee).put(hr::update_employee),
        )
        .route("/employees/:id/deactivate", post(hr::deactivate_employee))
        .route_layer(middleware::from_fn(auth::require_hr));

    let stock = Router::new()
        .route(
            "/categories",
            get(stock::list_categories).post(stock::create_category),
        )
        .route(
            "/categories/:id",
            get(stock::find_category).put(stock::update_category),
        )
        .route(
            "/suppliers",
            get(stock::list_suppliers).post(stock::create_supplier),
        )
        .route(
            "/suppliers/:id",
            get(stock::find_supplier).put(stock::update_supplier),
        )
        .route("/items", get(stock::list_items).post(stock::create_item))
        .route("/items/low-stock", get(stock::list_low_stock_items))
        .route("/items/:id", get(stock::find_item).put(stock::update_item))
        .route("/items/:id/adjust", post(stock::adjust_item_quantity))
        .route_layer(middleware::from_fn(auth::require_stock));

    let protected = Router::new()
        .nest("/accounting", accounting)
        .nest("/hr", hr)
        .nest("/stock", stock)
        .route("/auth/logout", post(session::logout))
        .route("/auth/me", get(session::me))
        .route(
            "/settings/inactivity-timeout",
            get(session::get_inactivity_timeout).put(session::set_inactivity_timeout),
        )
        .route_layer(middleware::from_fn_with_state(
            app.clone(),
            auth::authenticate,
        ));

    Router::new()
        .route("/auth/login", post(session::login))
        .merge(protected)
        .with_state(app)
}
