pub mod category;
pub mod clock;
pub mod task;

pub use category::{Category, UnknownCategory};
pub use clock::MonotonicClock;
pub use task::{NewTask, Task};
