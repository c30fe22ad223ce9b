//! Client side of the admin back-office console: one generic list-workflow
//! controller per managed collection, plus the transport, session and
//! notification seams it is wired to.

pub mod config;
pub mod controller;
pub mod entities;
pub mod entity;
pub mod error;
pub mod export;
pub mod forms;
pub mod metrics;
pub mod notify;
pub mod session;
pub mod transport;

pub use controller::{
    ControllerOptions, ListController, ListControllerBuilder, ListEvent, ListSnapshot, LoadTarget,
    PageQuery, PageState,
};
pub use entities::{ContactMessages, InfluencerApplications, InfluencerPartners};
pub use entity::{EntityKind, FilterDimension, ListRecord, RecordStatus};
pub use error::{ConsoleError, ErrorCategory};
pub use notify::{BroadcastNotifier, LogNotifier, Notification, NotificationLevel, Notifier};
pub use session::{CredentialStore, FileCredentialStore, MemoryCredentialStore, Session};
pub use transport::{AdminApi, ApiRequest, HttpAdminApi, Method};
