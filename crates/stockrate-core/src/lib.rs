//! Domain types and the ingestion core for analyst rating records.
//!
//! Everything here is pure computation: no I/O, no shared state, no logging.

pub mod app_config;
pub mod builder;
pub mod bulk;
pub mod config;
pub mod error;
pub mod normalize;
pub mod rating;

pub use app_config::{AppConfig, Environment};
pub use builder::{build_rating, validate_required_fields};
pub use bulk::{build_ratings, coerce_item, coerce_value, RawItem};
pub use config::{load_app_config, load_app_config_from_env};
pub use error::{ConfigError, DecimalError, IngestError};
pub use normalize::{clean_decimal, parse_timestamp, parse_timestamp_with_format, TimestampFormat};
pub use rating::{Rating, RatingInput, REQUIRED_FIELDS};
