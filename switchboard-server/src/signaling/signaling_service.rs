use crate::coordinator::CoordinatorHandle;

/// Shared state of the HTTP layer: every socket talks to the same coordinator.
#[derive(Clone)]
pub struct SignalingService {
    coordinator: CoordinatorHandle,
    outbound_buffer: usize,
}

impl SignalingService {
    pub fn new(coordinator: CoordinatorHandle, outbound_buffer: usize) -> Self {
        Self {
            coordinator,
            outbound_buffer: outbound_buffer.max(1),
        }
    }

    pub fn coordinator(&self) -> &CoordinatorHandle {
        &self.coordinator
    }

    /// Capacity of each socket's outbound queue.
    pub fn outbound_buffer(&self) -> usize {
        self.outbound_buffer
    }
}
