//! Typed data-access layer over the TeTRES admin API.
//!
//! - **[`DataClient<T>`]**: generic CRUD client for one entity kind. Every
//!   request that reaches the network ends in exactly one [`DataEvent`],
//!   delivered to the listeners registered on the client. List-class calls
//!   replace an ordered [`EntityCache`] and are guarded so only one is in
//!   flight per client.
//!
//! - **Concrete clients** ([`clients`]): special events, work zones, snow
//!   events, snow routes, snow management and action logs, each a
//!   `DataClient` wired to the server's default paths and list order.
//!   [`SystemConfigClient`] covers the singleton configuration record.
//!
//! - **[`Executor`]**: runs any operation either blocking behind a
//!   [`BusyIndicator`] or detached with a completion callback.
//!
//! - **Domain model** ([`model`]): the server's info records, keyed by
//!   [`EntityId`].

pub mod client;
pub mod clients;
pub mod config;
pub mod endpoint;
pub mod error;
pub mod event;
pub mod exec;
pub mod model;
pub mod store;
pub mod stream;

// ── Primary re-exports ──────────────────────────────────────────────
pub use client::{ClientSpec, DataClient, Outcome};
pub use clients::{
    ACTION_LOG, ActionLogClient, RELIABILITY_ROUTE, ReliabilityRouteClient, SNOW_EVENT,
    SNOW_MANAGEMENT, SNOW_ROUTE, SPECIAL_EVENT, SnowEventClient, SnowManagementClient,
    SnowRouteClient, SpecialEventClient, SystemConfigClient, WORK_ZONE, WORK_ZONE_GROUP,
    WorkZoneClient, WorkZoneGroupClient,
};
pub use config::ClientConfig;
pub use endpoint::{Endpoints, Operation};
pub use error::CoreError;
pub use event::{DataEvent, DataListener, GetKey, ListenerHandle};
pub use exec::{BusyIndicator, Executor, NoIndicator};
pub use store::{EntityCache, Snapshot, SortOrder};
pub use stream::EventStream;

pub use model::{
    ActionLog, Entity, EntityId, ReliabilityRoute, SnowEvent, SnowManagement, SnowRoute,
    SpecialEvent, SystemConfig, WorkZone, WorkZoneGroup,
};

// Transport types callers need to build a client.
pub use tetres_api::{HttpClient, HttpResult, Transport, TransportConfig};
