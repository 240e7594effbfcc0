mod task;
pub use task::{Task, TaskQueue};

mod source;
pub use source::TaskSource;

mod message;
pub use message::{Assignment, WorkerReply};

mod mapper;
pub use mapper::Mapper;

mod reducer;
pub use reducer::Reducer;

mod worker;
pub use worker::WorkerHandle;

mod coordinator;
pub use coordinator::Coordinator;

mod error;
pub use error::EngineError;
