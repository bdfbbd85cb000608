use std::net::SocketAddr;

/// Runtime settings of the relay.
#[derive(Debug, Clone)]
pub struct RelayConfig {
    pub bind_addr: SocketAddr,
    /// Capacity of the coordinator command queue.
    pub command_buffer: usize,
    /// Per-connection outbound queue; deliveries to a full queue are dropped.
    pub outbound_buffer: usize,
    /// Send `call-failed` back to a caller whose target is not connected.
    pub report_unknown_target: bool,
    /// CORS origins; empty means any.
    pub allowed_origins: Vec<String>,
}

impl Default for RelayConfig {
    fn default() -> Self {
        Self {
            bind_addr: SocketAddr::from(([0, 0, 0, 0], 5000)),
            command_buffer: 100,
            outbound_buffer: 64,
            report_unknown_target: true,
            allowed_origins: Vec::new(),
        }
    }
}
