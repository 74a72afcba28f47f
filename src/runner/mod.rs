pub mod controller;
pub mod observer;
pub mod reporter;
pub mod types;

pub use controller::RunController;
pub use observer::RunObserver;
pub use reporter::LiveReporter;
pub use types::{RunState, TestResult, TestStatus};
