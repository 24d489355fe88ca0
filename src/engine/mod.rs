pub mod allocate;
pub mod disruption;
pub mod error;
pub mod score;
pub mod types;
pub mod validate;

pub use allocate::{allocate, Allocation};
pub use disruption::{forecast_disruption, simulate_disruption};
pub use error::{AllocationError, ValidationError};
pub use score::{rank, score, ScoredSupplier};
pub use types::{SupplierRecord, Weights};
pub use validate::validate;
