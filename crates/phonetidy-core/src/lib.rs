pub mod normalize;
pub mod reconcile;
pub mod record;
pub mod store;

pub use normalize::normalize;
pub use reconcile::{reconcile, ReconcileAction, ReconcileSummary};
pub use record::{PhoneRecord, RecordId};
pub use store::PhoneStore;
