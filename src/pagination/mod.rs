//! Pagination strategy configuration
//!
//! Every endpoint resolves to exactly one [`PaginationConfig`] variant,
//! decided once at config-load time: the endpoint's own `pagination` block if
//! present, else the vendor's default, else `None`. The loose on-the-wire
//! shapes (string literal, `cursor`/`offset` marker keys, implicit pagebean
//! object) are normalized into the tagged union by a custom `Deserialize`.

mod types;

pub use types::{CursorConfig, OffsetConfig, PageBeanConfig, PaginationConfig};
