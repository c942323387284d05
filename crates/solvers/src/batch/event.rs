/// Lockstep iteration event emitted by the batch solver.
///
/// Emitted once per iteration of a lane group, after every lane has been
/// updated. The scalar tail does not emit events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Event {
    /// Index of the lane group (0-based).
    pub group: usize,

    /// Index of the group's first element in the input slice.
    pub offset: usize,

    /// Iteration counter within the group (1-based).
    pub iter: usize,

    /// Lanes still iterating after this iteration.
    pub active: usize,
}
