pub mod cursor;
pub mod error;
pub mod loader;
pub mod scale;
pub mod store;
pub mod synth;
pub mod trend;
pub mod types;
pub mod window;

pub use cursor::PlaybackCursor;
pub use error::{RecordError, Result};
pub use store::{RecordStore, StoreConfig};
pub use types::*;
