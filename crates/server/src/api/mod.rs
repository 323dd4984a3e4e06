pub mod customers;
pub mod form;
pub mod handlers;
pub mod instances;
pub mod middleware;
pub mod routes;
pub mod stream;

pub use routes::create_router;
