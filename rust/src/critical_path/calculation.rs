//! Critical path calculation using forward and backward passes.

use rustc_hash::FxHashMap;

use crate::graph::{DirectedGraph, GraphError, GraphResult};
use crate::interner::VertexIdInt;
use crate::topological::predecessor_counter_traversal;
use crate::{log_debug, log_results, log_steps};

use super::types::{Activity, ActivityTiming, Time};

/// Handle-indexed schedule, ready to be written back into a graph.
#[derive(Clone, Debug)]
pub(crate) struct HandleSchedule {
    /// Topological order the passes ran in.
    pub(crate) order: Vec<VertexIdInt>,
    /// Timing per handle. Entries for dead handles stay at their default.
    pub(crate) timings: Vec<ActivityTiming>,
    pub(crate) total_project_time: Time,
}

/// Result of a critical path calculation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ScheduleResult {
    /// Activity ids in the topological order the passes used.
    pub order: Vec<String>,
    /// Timing information for each activity.
    pub timings: FxHashMap<String, ActivityTiming>,
    /// Makespan: the largest earliest end.
    pub total_project_time: Time,
    /// Zero-slack activities, in topological order.
    pub critical_activities: Vec<String>,
}

fn duration_of(graph: &DirectedGraph<Activity>, handle: VertexIdInt) -> Time {
    graph.payload_of(handle).map_or(0, Activity::duration)
}

/// Run both passes over the activity network.
///
/// Every run starts from zero, so the result depends only on the graph.
/// Returns `CycleDetected` if the predecessor-counter traversal cannot
/// release every activity.
pub(crate) fn calculate_handle_schedule(
    graph: &DirectedGraph<Activity>,
    verbosity: u8,
) -> GraphResult<HandleSchedule> {
    let mut timings = vec![ActivityTiming::default(); graph.handle_bound()];

    // Forward pass: earliest start = max of predecessor earliest ends.
    // A predecessor is relaxed into its successor as soon as it is released,
    // and its own earliest start is final by then.
    let traversal = predecessor_counter_traversal(graph, |u, v| {
        let finish = timings[u as usize].earliest_start + duration_of(graph, u);
        let next = &mut timings[v as usize];
        if finish > next.earliest_start {
            next.earliest_start = finish;
        }
    });

    if !traversal.complete {
        log_results!(
            verbosity,
            "Schedule rejected: cycle detected ({} of {} activities ordered)",
            traversal.order.len(),
            graph.vertex_count()
        );
        return Err(GraphError::CycleDetected);
    }
    let order = traversal.order;

    let mut total_project_time: Time = 0;
    for &h in &order {
        let timing = &mut timings[h as usize];
        timing.earliest_end = timing.earliest_start + duration_of(graph, h);
        total_project_time = total_project_time.max(timing.earliest_end);
    }

    // Backward pass: terminal activities must end by the project end, others
    // before their earliest-needed successor starts.
    for &h in order.iter().rev() {
        let latest_end = if graph.out_degree_of(h) == 0 {
            total_project_time
        } else {
            graph
                .successor_handles(h)
                .map(|s| timings[s as usize].latest_start)
                .min()
                .unwrap_or(total_project_time)
        };
        let timing = &mut timings[h as usize];
        timing.latest_end = latest_end;
        timing.latest_start = latest_end - duration_of(graph, h);

        log_steps!(
            verbosity,
            "  {}: ES={} EE={} LS={} LE={}",
            graph.name_of(h),
            timing.earliest_start,
            timing.earliest_end,
            timing.latest_start,
            timing.latest_end
        );
    }

    log_results!(
        verbosity,
        "Schedule computed: {} activities, total project time {}",
        order.len(),
        total_project_time
    );
    log_debug!(
        verbosity,
        "  order: {:?}",
        order.iter().map(|&h| graph.name_of(h)).collect::<Vec<_>>()
    );

    Ok(HandleSchedule {
        order,
        timings,
        total_project_time,
    })
}

/// Calculate the schedule of an activity network without touching it.
///
/// # Returns
/// * `Ok(ScheduleResult)` with per-activity timings and the critical activities
/// * `Err(GraphError::CycleDetected)` if the network is not a DAG
pub fn calculate_schedule(graph: &DirectedGraph<Activity>) -> GraphResult<ScheduleResult> {
    calculate_schedule_verbose(graph, 0)
}

pub fn calculate_schedule_verbose(
    graph: &DirectedGraph<Activity>,
    verbosity: u8,
) -> GraphResult<ScheduleResult> {
    let schedule = calculate_handle_schedule(graph, verbosity)?;

    let mut timings =
        FxHashMap::with_capacity_and_hasher(schedule.order.len(), Default::default());
    let mut critical_activities = Vec::new();
    for &h in &schedule.order {
        let timing = schedule.timings[h as usize];
        let id = graph.name_of(h).to_string();
        if timing.is_critical() {
            critical_activities.push(id.clone());
        }
        timings.insert(id, timing);
    }

    Ok(ScheduleResult {
        order: schedule
            .order
            .iter()
            .map(|&h| graph.name_of(h).to_string())
            .collect(),
        timings,
        total_project_time: schedule.total_project_time,
        critical_activities,
    })
}
