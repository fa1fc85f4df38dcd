// crates/nodeparam-rs/tests/simulator/mod.rs
pub mod storage;

pub use storage::MemoryStorage;

use nodeparam_rs::{ParamError, ParamServer, ServiceId, ServiceNode, ServiceRequest, ServiceResponse};
use std::collections::VecDeque;

/// A request in flight from a remote client.
#[derive(Debug, Clone)]
pub struct Call {
    pub client_node_id: u8,
    pub request: ServiceRequest,
}

/// A virtual service layer: records registrations and queues incoming calls
/// until the harness pumps them through the server.
#[derive(Debug, Default)]
pub struct SimulatedServiceNode {
    pub registered: Vec<ServiceId>,
    /// If set, registering this service fails with the given status code.
    pub refuse: Option<(ServiceId, i32)>,
    inbox: VecDeque<Call>,
    /// Trace of all answered calls (for assertions).
    pub history: Vec<(Call, ServiceResponse)>,
    /// Calls that the server did not answer.
    pub dropped: Vec<Call>,
}

impl SimulatedServiceNode {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a request as if it had arrived from `client_node_id`.
    pub fn receive(&mut self, client_node_id: u8, request: ServiceRequest) {
        self.inbox.push_back(Call {
            client_node_id,
            request,
        });
    }

    /// Delivers every queued request to `server`, one at a time, in arrival order.
    pub fn pump(&mut self, server: &mut ParamServer<'_>) -> usize {
        let mut answered = 0;
        while let Some(call) = self.inbox.pop_front() {
            match server.handle(&call.request) {
                Some(response) => {
                    self.history.push((call, response));
                    answered += 1;
                }
                None => self.dropped.push(call),
            }
        }
        answered
    }

    /// Sends a single request and returns the response, if any.
    pub fn call(
        &mut self,
        server: &mut ParamServer<'_>,
        request: ServiceRequest,
    ) -> Option<ServiceResponse> {
        self.receive(0, request);
        if self.pump(server) == 0 {
            return None;
        }
        self.history.last().map(|(_, r)| r.clone())
    }
}

impl ServiceNode for SimulatedServiceNode {
    fn register_server(&mut self, service: ServiceId) -> Result<(), ParamError> {
        if let Some((refused, code)) = self.refuse
            && refused == service
        {
            return Err(ParamError::RegistrationFailed(code));
        }
        self.registered.push(service);
        Ok(())
    }
}
