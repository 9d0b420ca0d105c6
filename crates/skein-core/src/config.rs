//! Container configuration parameters.

/// Initial reservations for the list containers.
///
/// Reservations only affect how early the backing storage grows; they
/// never change observable contents.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ListConfig {
    /// Number of reference slots an index list reserves up front.
    ///
    /// Default: 8 (64 bytes of backing buffer).
    pub initial_slots: usize,

    /// Number of node slots a linked list reserves in its arena.
    ///
    /// Default: 0 (the arena grows on first insertion).
    pub initial_nodes: usize,
}

impl ListConfig {
    /// Default index list slot reservation.
    pub const DEFAULT_INITIAL_SLOTS: usize = 8;

    /// Default linked list node reservation.
    pub const DEFAULT_INITIAL_NODES: usize = 0;

    /// Create a config with default reservations.
    pub fn new() -> Self {
        Self {
            initial_slots: Self::DEFAULT_INITIAL_SLOTS,
            initial_nodes: Self::DEFAULT_INITIAL_NODES,
        }
    }
}

impl Default for ListConfig {
    fn default() -> Self {
        Self::new()
    }
}
