//! Filtro de metadata para `rclone --metadata-mapper`.

mod filter;
pub mod ownership;
pub mod request;

pub use filter::{ERROR_KEY, FilterOutcome, GID_KEY, MetadataFilter, UID_KEY};
pub use ownership::PlatformBands;
pub use request::{MapperRequest, MapperResponse};
