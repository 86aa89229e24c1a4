pub mod client;
pub mod error;
pub mod store;
pub mod zone_client;

pub use error::{ApiError, PersistError};
pub use store::ZoneStore;
pub use zone_client::ZoneClient;
