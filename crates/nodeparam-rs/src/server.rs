// crates/nodeparam-rs/src/server.rs

use crate::hal::{ParamError, ServiceNode};
use crate::manager::ParamManager;
use crate::messages::{
    ExecuteOpcodeRequest, ExecuteOpcodeResponse, GetSetRequest, GetSetResponse, Opcode,
    ServiceId, ServiceRequest, ServiceResponse,
};
use core::fmt;
use log::{debug, error, info, trace, warn};

/// Serves the GetSet and ExecuteOpcode services on top of a `ParamManager`.
///
/// The server does not own the manager; it borrows it for `'a`, which must
/// cover the whole time the services stay registered. Handlers take `&mut self`,
/// so the service layer can only pump one request at a time.
#[derive(Default)]
pub struct ParamServer<'a> {
    manager: Option<&'a mut dyn ParamManager>,
    get_set_registered: bool,
    execute_opcode_registered: bool,
}

impl<'a> fmt::Debug for ParamServer<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ParamServer")
            .field(
                "manager",
                &if self.manager.is_some() {
                    "Some(<Param Manager>)"
                } else {
                    "None"
                },
            )
            .field("get_set_registered", &self.get_set_registered)
            .field("execute_opcode_registered", &self.execute_opcode_registered)
            .finish()
    }
}

impl<'a> ParamServer<'a> {
    /// Creates a server with no manager bound and nothing registered.
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `manager` and registers both services with `node`.
    ///
    /// Calling `start` again replaces the manager. Services that are already
    /// registered are not registered a second time. If the service layer refuses
    /// a registration the error is returned as-is; the manager stays bound and
    /// `register_services` can retry without rebinding it.
    pub fn start<N: ServiceNode + ?Sized>(
        &mut self,
        node: &mut N,
        manager: &'a mut dyn ParamManager,
    ) -> Result<(), ParamError> {
        if self.manager.replace(manager).is_some() {
            info!("Replacing the bound parameter manager.");
        }
        self.register_services(node)
    }

    /// Registers whichever of the two services is not registered yet.
    pub fn register_services<N: ServiceNode + ?Sized>(
        &mut self,
        node: &mut N,
    ) -> Result<(), ParamError> {
        if !self.get_set_registered {
            self.register(node, ServiceId::GetSet)?;
            self.get_set_registered = true;
        }
        if !self.execute_opcode_registered {
            self.register(node, ServiceId::ExecuteOpcode)?;
            self.execute_opcode_registered = true;
        }

        info!("Parameter server started.");
        Ok(())
    }

    fn register<N: ServiceNode + ?Sized>(
        &self,
        node: &mut N,
        service: ServiceId,
    ) -> Result<(), ParamError> {
        node.register_server(service).inspect_err(|e| {
            error!(
                "Failed to register {} (DTID {}): {}",
                service.full_name(),
                service.data_type_id(),
                e
            );
        })
    }

    /// The currently bound manager, if any.
    pub fn manager(&self) -> Option<&dyn ParamManager> {
        self.manager.as_deref()
    }

    /// True once a manager is bound and both services are registered.
    pub fn is_started(&self) -> bool {
        self.manager.is_some() && self.get_set_registered && self.execute_opcode_registered
    }

    /// Entry point for the service layer: routes a decoded request to its handler.
    ///
    /// Returns `None` for services that were never registered.
    pub fn handle(&mut self, request: &ServiceRequest) -> Option<ServiceResponse> {
        match request {
            ServiceRequest::GetSet(req) if self.get_set_registered => {
                Some(ServiceResponse::GetSet(self.handle_get_set(req)))
            }
            ServiceRequest::ExecuteOpcode(req) if self.execute_opcode_registered => Some(
                ServiceResponse::ExecuteOpcode(self.handle_execute_opcode(req)),
            ),
            _ => {
                warn!(
                    "Dropping {} request: service is not registered.",
                    request.service_id().full_name()
                );
                None
            }
        }
    }

    /// Handles a GetSet request.
    ///
    /// The name is resolved first (an explicit name wins over the index), then
    /// the optional write is applied, then the value is read back from the
    /// manager. The response always reports what the manager holds after the
    /// write, never the requested value.
    pub fn handle_get_set(&mut self, request: &GetSetRequest) -> GetSetResponse {
        let Some(manager) = self.manager.as_deref_mut() else {
            warn!("GetSet received but no parameter manager is bound.");
            return GetSetResponse::default();
        };

        let name = if !request.name.is_empty() {
            request.name.clone()
        } else {
            match manager.param_name_by_index(request.index) {
                Some(name) if !name.is_empty() => name,
                _ => {
                    debug!("GetSet: no parameter at index {}.", request.index);
                    return GetSetResponse::default();
                }
            }
        };

        if !request.value.is_empty() {
            trace!(
                "GetSet: assigning {} value to '{}'.",
                request.value.type_name(),
                name
            );
            manager.assign_param_value(&name, &request.value);
        }

        let value = manager.read_param_value(&name).unwrap_or_default();
        if value.is_empty() {
            // Unknown name: clear everything so the client sees "not found".
            warn!("GetSet: parameter '{}' not found.", name);
            return GetSetResponse::default();
        }

        let bounds = manager.read_param_default_max_min(&name);
        trace!("GetSet: '{}' = {:?}", name, value);
        GetSetResponse {
            value,
            default_value: bounds.default_value,
            max_value: bounds.max_value,
            min_value: bounds.min_value,
            name,
        }
    }

    /// Handles an ExecuteOpcode request. `ok` is true iff the manager reported success.
    pub fn handle_execute_opcode(&mut self, request: &ExecuteOpcodeRequest) -> ExecuteOpcodeResponse {
        let Some(manager) = self.manager.as_deref_mut() else {
            warn!("ExecuteOpcode received but no parameter manager is bound.");
            return ExecuteOpcodeResponse { ok: false };
        };

        debug!("ExecuteOpcode: {:?}", request.opcode);
        let result = match request.opcode {
            Opcode::Save => manager.save_all_params(),
            Opcode::Erase => manager.erase_all_params(),
        };

        match result {
            Ok(()) => {
                info!("ExecuteOpcode {:?} completed.", request.opcode);
                ExecuteOpcodeResponse { ok: true }
            }
            Err(e) => {
                warn!("ExecuteOpcode {:?} failed: {}", request.opcode, e);
                ExecuteOpcodeResponse { ok: false }
            }
        }
    }
}
