//! Critical path method (CPM) scheduling.
//!
//! Activities are vertices with a fixed duration; an edge `u -> v` means `u`
//! must finish before `v` starts. The forward pass walks the graph in Kahn
//! order computing earliest start/end, the backward pass walks the same order
//! in reverse computing latest start/end. Activities with zero slack form
//! the critical path.

mod calculation;
mod graph;
mod types;

pub use calculation::{calculate_schedule, calculate_schedule_verbose, ScheduleResult};
pub use graph::ActivityGraph;
pub use types::{Activity, ActivityTiming, Time};
