//! Database Infrastructure
//!
//! PostgreSQL access for the gateway: connection pool management, embedded
//! migrations, startup seeding, and one repository per aggregate. The
//! payment repository doubles as the engine's storage adapter.

pub mod bootstrap;
pub mod error;
pub mod pool;
pub mod repositories;

pub use bootstrap::{ping, run_migrations, seed_merchant};
pub use error::DatabaseError;
pub use pool::{create_pool, create_pool_from_url, DatabaseConfig, DatabasePool};
pub use repositories::{MerchantRepository, OrderRepository, PaymentRepository};
