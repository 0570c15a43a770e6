//! Domain models for mission-log.
//!
//! Three entities: [`Scientist`] and [`Planet`] are the ends of the
//! relationship, [`Mission`] is the join entity linking one scientist to
//! one planet. Each entity has a full record type carrying store-managed
//! timestamps and a `*Summary` form used by the API, which never exposes
//! timestamps or raw mission rows.

mod mission;
mod planet;
mod scientist;

pub use mission::*;
pub use planet::*;
pub use scientist::*;
