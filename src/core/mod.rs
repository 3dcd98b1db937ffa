pub mod clock;
pub mod engine;
pub mod reconcile;
pub mod session;
pub mod store;

pub use clock::{Clock, ManualClock, SystemClock};
pub use engine::{EngineOptions, ListenerId, SessionEngine};
pub use reconcile::OpenTaskPolicy;
pub use session::{SessionSnapshot, SessionStatus};
pub use store::TaskStore;
