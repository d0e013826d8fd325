mod clock_mock;
mod gauge_mock;

pub use clock_mock::ClockMock;
pub use gauge_mock::GaugeMock;
