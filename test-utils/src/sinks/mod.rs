mod store_mock;

pub use store_mock::{StoreMock, StoreMode};
