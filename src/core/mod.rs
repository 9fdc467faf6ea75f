//! Domain types shared by the store, the pipeline and the views.

pub mod criteria;
pub mod crew;
pub mod movie;

pub use criteria::{FilterCriteria, YearRange};
pub use crew::{CrewMetric, CrewProfile, Role, TopMovie};
pub use movie::{decade_of, Movie};
