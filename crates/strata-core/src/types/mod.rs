pub mod category;
pub mod event;
pub mod snapshot;

pub use category::{Category, CATEGORY_COUNT};
pub use event::{EventId, RawEvent, RawRecord, SearchEvent};
pub use snapshot::CountSnapshot;
