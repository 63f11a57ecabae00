pub mod api;
pub mod connect;
pub mod snapshot;
pub mod source;
pub mod types;

pub use api::{
    AnkiConnect,
    DEFAULT_ANKI_CONNECT_URL,
};
pub use connect::wait_awake;
pub use snapshot::CollectionSnapshot;
pub use source::{
    CardCollection,
    CardLookup,
    TagQuery,
};
