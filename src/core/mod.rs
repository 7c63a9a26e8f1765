pub mod driver;
pub mod event;
pub mod observer;
pub mod state;

pub use driver::SchedCore;
pub use event::SchedCoreEvent;
pub use observer::Observer;
pub use state::{KernelCtx, ReadyQueue, Slice, Slot, Task, TaskId, TaskState, Ticks};
