//! Activity network: a directed graph of activities plus its latest schedule.

use crate::config::AlgorithmConfig;
use crate::graph::{DirectedGraph, GraphResult, Weight, DEFAULT_WEIGHT};

use super::calculation::calculate_handle_schedule;
use super::types::{Activity, Time};

/// Directed graph whose vertices are activities, with critical path
/// scheduling.
///
/// Schedule values, the sorted order and the total project time are only
/// meaningful after [`compute_schedule`] has succeeded since the last
/// mutation. No mutation invalidates them; they stay as the last successful
/// run left them, except that removed activities are skipped.
///
/// [`compute_schedule`]: ActivityGraph::compute_schedule
#[derive(Debug, Clone, Default)]
pub struct ActivityGraph {
    graph: DirectedGraph<Activity>,
    sorted_order: Vec<String>,
    total_project_time: Time,
    config: AlgorithmConfig,
}

impl ActivityGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: AlgorithmConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn config(&self) -> &AlgorithmConfig {
        &self.config
    }

    /// Read access to the underlying graph.
    pub fn graph(&self) -> &DirectedGraph<Activity> {
        &self.graph
    }

    pub fn add_activity(&mut self, id: impl Into<String>, duration: u32) -> GraphResult<()> {
        self.graph.add_vertex_with(id, Activity::new(duration))
    }

    pub fn add_named_activity(
        &mut self,
        id: impl Into<String>,
        name: impl Into<String>,
        duration: u32,
    ) -> GraphResult<()> {
        self.graph.add_vertex_with(id, Activity::named(name, duration))
    }

    /// Add the activity unless it already exists. An existing activity keeps
    /// its duration. Returns whether it was added.
    pub fn ensure_activity(&mut self, id: &str, duration: u32) -> bool {
        !self.graph.contains_vertex(id) && self.add_activity(id, duration).is_ok()
    }

    pub fn remove_activity(&mut self, id: &str) -> GraphResult<Activity> {
        self.graph.remove_vertex(id)
    }

    pub fn set_duration(&mut self, id: &str, duration: u32) -> GraphResult<()> {
        self.graph.vertex_mut(id)?.set_duration(duration);
        Ok(())
    }

    /// `from` must finish before `to` can start.
    pub fn add_dependency(&mut self, from: &str, to: &str) -> GraphResult<()> {
        self.graph.add_edge(from, to)
    }

    /// Add an edge. Weights are carried but ignored by the schedule.
    pub fn add_edge(&mut self, from: &str, to: &str, weight: Weight) -> GraphResult<()> {
        self.graph.add_weighted_edge(from, to, weight)
    }

    pub fn remove_edge(&mut self, from: &str, to: &str) -> GraphResult<Weight> {
        self.graph.remove_edge(from, to)
    }

    pub fn contains_activity(&self, id: &str) -> bool {
        self.graph.contains_vertex(id)
    }

    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        self.graph.contains_edge(from, to)
    }

    pub fn activity(&self, id: &str) -> GraphResult<&Activity> {
        self.graph.vertex(id)
    }

    pub fn activity_count(&self) -> usize {
        self.graph.vertex_count()
    }

    pub fn clear(&mut self) {
        self.graph.clear();
        self.sorted_order.clear();
        self.total_project_time = 0;
    }

    /// Add zero-duration `start` and `end` activities, wiring `start` to every
    /// activity without predecessors and every activity without successors to
    /// `end`. Existing edges to or from them are left alone.
    pub fn add_bracketing_activities(&mut self, start: &str, end: &str) -> GraphResult<()> {
        let sources: Vec<String> = self
            .graph
            .vertices()
            .filter(|id| *id != start && *id != end)
            .filter(|id| self.graph.in_degree(id).is_ok_and(|d| d == 0))
            .map(str::to_string)
            .collect();
        let sinks: Vec<String> = self
            .graph
            .vertices()
            .filter(|id| *id != start && *id != end)
            .filter(|id| self.graph.out_degree(id).is_ok_and(|d| d == 0))
            .map(str::to_string)
            .collect();

        self.ensure_activity(start, 0);
        self.ensure_activity(end, 0);
        for id in &sources {
            self.graph.ensure_edge(start, id, DEFAULT_WEIGHT)?;
        }
        for id in &sinks {
            self.graph.ensure_edge(id, end, DEFAULT_WEIGHT)?;
        }
        Ok(())
    }

    /// Compute earliest and latest start/end times for every activity.
    ///
    /// Returns false if the graph has a cycle. In that case every stored
    /// value, including the sorted order, is left as it was.
    pub fn compute_schedule(&mut self) -> bool {
        let schedule = match calculate_handle_schedule(&self.graph, self.config.verbosity) {
            Ok(schedule) => schedule,
            Err(_) => return false,
        };

        for &h in &schedule.order {
            let timing = schedule.timings[h as usize];
            if let Some(activity) = self.graph.payload_of_mut(h) {
                activity.apply_timing(&timing);
            }
        }
        self.sorted_order = schedule
            .order
            .iter()
            .map(|&h| self.graph.name_of(h).to_string())
            .collect();
        self.total_project_time = schedule.total_project_time;
        true
    }

    /// Makespan of the last successful schedule.
    pub fn total_project_time(&self) -> Time {
        self.total_project_time
    }

    /// Activity ids in the topological order of the last successful schedule.
    pub fn sorted_order(&self) -> Vec<String> {
        self.live_order().map(str::to_string).collect()
    }

    /// Activities with zero slack, in topological order.
    pub fn critical_activities(&self) -> Vec<String> {
        self.sorted_order
            .iter()
            .filter(|id| self.graph.vertex(id).is_ok_and(Activity::is_critical))
            .cloned()
            .collect()
    }

    pub fn earliest_start(&self, id: &str) -> GraphResult<Time> {
        Ok(self.activity(id)?.earliest_start())
    }

    pub fn earliest_end(&self, id: &str) -> GraphResult<Time> {
        Ok(self.activity(id)?.earliest_end())
    }

    pub fn latest_start(&self, id: &str) -> GraphResult<Time> {
        Ok(self.activity(id)?.latest_start())
    }

    pub fn latest_end(&self, id: &str) -> GraphResult<Time> {
        Ok(self.activity(id)?.latest_end())
    }

    pub fn slack(&self, id: &str) -> GraphResult<Time> {
        Ok(self.activity(id)?.slack())
    }

    fn live_order(&self) -> impl Iterator<Item = &str> + '_ {
        self.sorted_order
            .iter()
            .map(String::as_str)
            .filter(|id| self.graph.contains_vertex(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::GraphError;

    /// X -> A(1) -> B(2) -> Y, X -> C(5) -> Y
    fn two_branches() -> ActivityGraph {
        let mut g = ActivityGraph::new();
        for (id, d) in [("X", 0), ("A", 1), ("B", 2), ("C", 5), ("Y", 0)] {
            g.add_activity(id, d).unwrap();
        }
        for (from, to) in [("X", "A"), ("A", "B"), ("B", "Y"), ("X", "C"), ("C", "Y")] {
            g.add_dependency(from, to).unwrap();
        }
        g
    }

    #[test]
    fn test_two_branch_schedule() {
        let mut g = two_branches();
        assert!(g.compute_schedule());

        assert_eq!(g.earliest_start("Y"), Ok(5));
        assert_eq!(g.total_project_time(), 5);
        assert_eq!(g.earliest_start("A"), Ok(0));
        assert_eq!(g.latest_start("A"), Ok(2));
        assert_eq!(g.latest_end("B"), Ok(5));
        assert_eq!(g.slack("B"), Ok(2));

        let critical = g.critical_activities();
        assert_eq!(critical.len(), 3);
        assert_eq!(critical.first().map(String::as_str), Some("X"));
        assert_eq!(critical.last().map(String::as_str), Some("Y"));
        assert!(critical.contains(&"C".to_string()));
    }

    #[test]
    fn test_every_activity_fits_its_window() {
        let mut g = two_branches();
        assert!(g.compute_schedule());
        for (_, a) in g.graph().iter() {
            assert!(a.earliest_start() <= a.latest_start());
            assert_eq!(a.earliest_end(), a.earliest_start() + a.duration());
            assert_eq!(a.latest_end(), a.latest_start() + a.duration());
            assert!(a.latest_end() <= g.total_project_time());
        }
        for e in g.graph().edges() {
            let (u, v) = (g.activity(e.from).unwrap(), g.activity(e.to).unwrap());
            assert!(v.earliest_start() >= u.earliest_end());
            assert!(u.latest_end() <= v.latest_start());
        }
    }

    #[test]
    fn test_sorted_order_is_topological() {
        let mut g = two_branches();
        assert!(g.compute_schedule());
        let order = g.sorted_order();
        assert!(crate::topological::is_topological_order(g.graph(), &order));
    }

    #[test]
    fn test_recompute_is_idempotent() {
        let mut g = two_branches();
        assert!(g.compute_schedule());
        let first: Vec<_> = g.graph().iter().map(|(id, a)| (id.to_string(), a.timing())).collect();
        let total = g.total_project_time();

        assert!(g.compute_schedule());
        for (id, timing) in first {
            assert_eq!(g.activity(&id).unwrap().timing(), timing);
        }
        assert_eq!(g.total_project_time(), total);
    }

    #[test]
    fn test_recompute_after_shortening() {
        let mut g = two_branches();
        assert!(g.compute_schedule());
        g.set_duration("C", 1).unwrap();
        assert!(g.compute_schedule());

        assert_eq!(g.total_project_time(), 3);
        assert_eq!(g.earliest_start("Y"), Ok(3));
        assert_eq!(g.slack("C"), Ok(2));
    }

    #[test]
    fn test_cycle_leaves_schedule_untouched() {
        let mut g = two_branches();
        assert!(g.compute_schedule());
        let order = g.sorted_order();
        let before = g.activity("B").unwrap().timing();

        g.add_activity("P", 1).unwrap();
        g.add_activity("Q", 1).unwrap();
        g.add_activity("R", 1).unwrap();
        g.add_dependency("P", "Q").unwrap();
        g.add_dependency("Q", "R").unwrap();
        g.add_dependency("R", "P").unwrap();

        assert!(!g.compute_schedule());
        assert_eq!(g.sorted_order(), order);
        assert_eq!(g.activity("B").unwrap().timing(), before);
        assert_eq!(g.total_project_time(), 5);
    }

    #[test]
    fn test_empty_graph_schedules() {
        let mut g = ActivityGraph::new();
        assert!(g.compute_schedule());
        assert_eq!(g.total_project_time(), 0);
        assert!(g.critical_activities().is_empty());
    }

    #[test]
    fn test_bracketing_activities() {
        let mut g = ActivityGraph::new();
        g.add_activity("a", 3).unwrap();
        g.add_activity("b", 4).unwrap();
        g.add_activity("c", 2).unwrap();
        g.add_dependency("a", "c").unwrap();

        g.add_bracketing_activities("start", "end").unwrap();
        assert!(g.contains_edge("start", "a"));
        assert!(g.contains_edge("start", "b"));
        assert!(!g.contains_edge("start", "c"));
        assert!(g.contains_edge("b", "end"));
        assert!(g.contains_edge("c", "end"));
        assert!(!g.contains_edge("a", "end"));

        assert!(g.compute_schedule());
        assert_eq!(g.total_project_time(), 5);
        assert_eq!(g.earliest_start("end"), Ok(5));
        assert_eq!(g.critical_activities(), vec!["start", "a", "c", "end"]);
    }

    #[test]
    fn test_unknown_activity() {
        let g = ActivityGraph::new();
        assert_eq!(
            g.earliest_start("ghost"),
            Err(GraphError::VertexNotFound("ghost".to_string()))
        );
    }

    #[test]
    fn test_remove_activity_drops_it_from_order() {
        let mut g = two_branches();
        assert!(g.compute_schedule());
        let removed = g.remove_activity("A").unwrap();
        assert_eq!(removed.duration(), 1);
        assert_eq!(g.sorted_order().len(), 4);
        assert!(!g.sorted_order().contains(&"A".to_string()));
        assert!(g.compute_schedule());
        assert!(!g.sorted_order().contains(&"A".to_string()));
    }

    #[test]
    fn test_mutations_keep_last_schedule_until_recompute() {
        let mut g = two_branches();
        assert!(g.compute_schedule());
        let order = g.sorted_order();
        let critical = g.critical_activities();

        g.set_duration("A", 10).unwrap();
        g.add_activity("Z", 1).unwrap();
        g.add_dependency("Y", "Z").unwrap();
        g.remove_edge("X", "C").unwrap();
        assert_eq!(g.sorted_order(), order);
        assert_eq!(g.critical_activities(), critical);
        assert_eq!(g.total_project_time(), 5);

        g.remove_activity("B").unwrap();
        assert_eq!(g.total_project_time(), 5);
        assert_eq!(g.critical_activities(), critical);

        // X -> A(10), C(5) -> Y -> Z(1)
        assert!(g.compute_schedule());
        assert_eq!(g.total_project_time(), 10);
        assert_eq!(g.critical_activities(), vec!["X", "A"]);
        assert_eq!(g.slack("C"), Ok(4));
    }

    #[test]
    fn test_recycled_handle_is_not_in_old_order() {
        let mut g = two_branches();
        assert!(g.compute_schedule());
        g.remove_activity("B").unwrap();
        g.add_activity("N", 2).unwrap();
        assert!(!g.sorted_order().contains(&"N".to_string()));
        assert!(!g.critical_activities().contains(&"N".to_string()));
    }

    #[test]
    fn test_ensure_activity_keeps_duration() {
        let mut g = ActivityGraph::new();
        assert!(g.ensure_activity("a", 4));
        assert!(!g.ensure_activity("a", 9));
        assert_eq!(g.activity("a").unwrap().duration(), 4);
    }

    #[test]
    fn test_named_activity() {
        let mut g = ActivityGraph::new();
        g.add_named_activity("a1", "Excavate", 3).unwrap();
        assert_eq!(g.activity("a1").unwrap().name(), "Excavate");
        assert_eq!(g.add_activity("a1", 1), Err(GraphError::DuplicateVertex("a1".to_string())));
    }
}
