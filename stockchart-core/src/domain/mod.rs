//! Domain types for stockchart

pub mod range;
pub mod record;
pub mod symbol;

pub use range::{parse_date, ClampedRange, DateRange, DATE_FORMAT};
pub use record::{FilteredSeries, ParsedSeries, PriceRecord};
pub use symbol::Symbol;
