// crates/nodeparam-rs/tests/param_service_test.rs

// Rust looks for `tests/simulator/mod.rs` when we declare `mod simulator;` here.
#[allow(dead_code)]
mod simulator;

use simulator::{MemoryStorage, SimulatedServiceNode};

use nodeparam_rs::types::MAX_PARAM_INDEX;
use nodeparam_rs::{
    ExecuteOpcodeRequest, ExecuteOpcodeResponse, GetSetRequest, GetSetResponse, NumericValue,
    Opcode, ParamDescriptor, ParamError, ParamIndex, ParamManager, ParamName, ParamRegistry,
    ParamServer, RegistryConfig, ServiceId, ServiceRequest, ServiceResponse, Value,
};

fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn name(s: &str) -> ParamName {
    ParamName::new(s).unwrap()
}

fn index(i: u16) -> ParamIndex {
    ParamIndex::try_from(i).unwrap()
}

/// "a" = true (bool), "b" = 3.5 (real, limited to [0, 5]).
fn declare_demo_params(registry: &mut ParamRegistry<'_>) {
    registry
        .declare(ParamDescriptor::new(name("a"), Value::Boolean(true)))
        .unwrap();
    registry
        .declare(
            ParamDescriptor::new(name("b"), Value::Real(3.5))
                .with_range(NumericValue::Real(0.0), NumericValue::Real(5.0)),
        )
        .unwrap();
}

fn get_set(node: &mut SimulatedServiceNode, server: &mut ParamServer<'_>, req: GetSetRequest) -> GetSetResponse {
    match node.call(server, ServiceRequest::GetSet(req)) {
        Some(ServiceResponse::GetSet(resp)) => resp,
        other => panic!("expected a GetSet response, got {other:?}"),
    }
}

fn execute(node: &mut SimulatedServiceNode, server: &mut ParamServer<'_>, opcode: Opcode) -> bool {
    match node.call(server, ServiceRequest::ExecuteOpcode(ExecuteOpcodeRequest { opcode })) {
        Some(ServiceResponse::ExecuteOpcode(ExecuteOpcodeResponse { ok })) => ok,
        other => panic!("expected an ExecuteOpcode response, got {other:?}"),
    }
}

#[test]
fn test_enumerate_by_index() {
    init_logging();
    let mut registry = ParamRegistry::new(None);
    declare_demo_params(&mut registry);
    let mut node = SimulatedServiceNode::new();
    let mut server = ParamServer::new();
    server.start(&mut node, &mut registry).unwrap();

    let resp = get_set(&mut node, &mut server, GetSetRequest::by_index(index(0)));
    assert_eq!(resp.name, "a");
    assert_eq!(resp.value, Value::Boolean(true));
    assert_eq!(resp.default_value, Value::Boolean(true));
    assert!(resp.max_value.is_empty());
    assert!(resp.min_value.is_empty());

    for i in [2, 3, 100, MAX_PARAM_INDEX] {
        let resp = get_set(&mut node, &mut server, GetSetRequest::by_index(index(i)));
        assert_eq!(resp, GetSetResponse::default(), "index {i}");
    }
}

#[test]
fn test_client_enumerates_until_empty_name() {
    init_logging();
    let mut registry = ParamRegistry::new(None);
    declare_demo_params(&mut registry);
    registry
        .declare(ParamDescriptor::new(name("node.label"), Value::String("left-wing".into())))
        .unwrap();
    let mut node = SimulatedServiceNode::new();
    let mut server = ParamServer::new();
    server.start(&mut node, &mut registry).unwrap();

    let mut seen = Vec::new();
    let mut i = ParamIndex::FIRST;
    loop {
        let resp = get_set(&mut node, &mut server, GetSetRequest::by_index(i));
        if resp.name.is_empty() {
            break;
        }
        seen.push((resp.name, resp.value));
        i = i.next().unwrap();
    }

    assert_eq!(
        seen,
        vec![
            (name("a"), Value::Boolean(true)),
            (name("b"), Value::Real(3.5)),
            (name("node.label"), Value::String("left-wing".into())),
        ]
    );
}

#[test]
fn test_set_reports_clamped_value() {
    init_logging();
    let mut registry = ParamRegistry::new(None);
    declare_demo_params(&mut registry);
    {
        let mut node = SimulatedServiceNode::new();
        let mut server = ParamServer::new();
        server.start(&mut node, &mut registry).unwrap();

        let resp = get_set(
            &mut node,
            &mut server,
            GetSetRequest::set(name("b"), Value::Real(9.0)),
        );
        assert_eq!(resp.name, "b");
        assert_eq!(resp.value, Value::Real(5.0));
        assert_eq!(resp.default_value, Value::Real(3.5));
        assert_eq!(resp.max_value, NumericValue::Real(5.0));
        assert_eq!(resp.min_value, NumericValue::Real(0.0));

        // A type mismatch is ignored; the response shows the unchanged value.
        let resp = get_set(
            &mut node,
            &mut server,
            GetSetRequest::set(name("a"), Value::String("yes".into())),
        );
        assert_eq!(resp.value, Value::Boolean(true));
    }
    assert_eq!(registry.get(&name("b")), Some(&Value::Real(5.0)));
}

#[test]
fn test_name_wins_over_index() {
    init_logging();
    let mut registry = ParamRegistry::new(None);
    declare_demo_params(&mut registry);
    let mut node = SimulatedServiceNode::new();
    let mut server = ParamServer::new();
    server.start(&mut node, &mut registry).unwrap();

    let req = GetSetRequest {
        index: index(0),
        name: name("b"),
        value: Value::Empty,
    };
    let resp = get_set(&mut node, &mut server, req);
    assert_eq!(resp.name, "b");

    let resp = get_set(&mut node, &mut server, GetSetRequest::by_name(name("missing")));
    assert!(resp.is_not_found());
}

#[test]
fn test_failed_erase_keeps_node_operational() {
    init_logging();
    let mut storage = MemoryStorage::new();
    storage.faulty = true;
    let mut registry = ParamRegistry::new(Some(&mut storage));
    declare_demo_params(&mut registry);
    let mut node = SimulatedServiceNode::new();
    let mut server = ParamServer::new();
    server.start(&mut node, &mut registry).unwrap();

    assert!(!execute(&mut node, &mut server, Opcode::Erase));
    assert!(!execute(&mut node, &mut server, Opcode::Save));

    let resp = get_set(&mut node, &mut server, GetSetRequest::by_index(index(1)));
    assert_eq!(resp.name, "b");
    assert_eq!(resp.value, Value::Real(3.5));
}

#[test]
fn test_unstarted_server() {
    init_logging();
    let mut server = ParamServer::new();
    let mut node = SimulatedServiceNode::new();

    // Nothing is registered, so the service layer gets no answer at all.
    assert_eq!(node.call(&mut server, ServiceRequest::GetSet(GetSetRequest::default())), None);
    assert_eq!(node.dropped.len(), 1);

    // Invoked directly, the handlers answer empty.
    assert_eq!(
        server.handle_get_set(&GetSetRequest::by_index(index(0))),
        GetSetResponse::default()
    );
    let resp = server.handle_execute_opcode(&ExecuteOpcodeRequest { opcode: Opcode::Save });
    assert!(!resp.ok);
}

#[test]
fn test_registration_refused() {
    init_logging();
    let mut registry = ParamRegistry::new(None);
    declare_demo_params(&mut registry);
    let mut node = SimulatedServiceNode::new();
    node.refuse = Some((ServiceId::ExecuteOpcode, -7));
    let mut server = ParamServer::new();

    let err = server.start(&mut node, &mut registry).unwrap_err();
    assert_eq!(err, ParamError::RegistrationFailed(-7));
    assert_eq!(err.status(), -7);
    assert_eq!(node.registered, vec![ServiceId::GetSet]);
    assert!(!server.is_started());

    // GetSet was registered before the failure and keeps working.
    let resp = get_set(&mut node, &mut server, GetSetRequest::by_index(index(0)));
    assert_eq!(resp.name, "a");
    assert_eq!(
        node.call(
            &mut server,
            ServiceRequest::ExecuteOpcode(ExecuteOpcodeRequest { opcode: Opcode::Save })
        ),
        None
    );

    // Retrying only registers the missing service.
    node.refuse = None;
    server.register_services(&mut node).unwrap();
    assert_eq!(node.registered, vec![ServiceId::GetSet, ServiceId::ExecuteOpcode]);
    assert!(server.is_started());
}

#[test]
fn test_requests_are_served_in_arrival_order() {
    init_logging();
    let mut registry = ParamRegistry::new(None);
    declare_demo_params(&mut registry);
    let mut node = SimulatedServiceNode::new();
    let mut server = ParamServer::new();
    server.start(&mut node, &mut registry).unwrap();

    node.receive(10, ServiceRequest::GetSet(GetSetRequest::set(name("b"), Value::Real(1.0))));
    node.receive(11, ServiceRequest::GetSet(GetSetRequest::by_name(name("b"))));
    node.receive(12, ServiceRequest::GetSet(GetSetRequest::set(name("b"), Value::Integer(2))));
    assert_eq!(node.pump(&mut server), 3);

    let observed: Vec<(u8, Value)> = node
        .history
        .iter()
        .map(|(call, resp)| match resp {
            ServiceResponse::GetSet(r) => (call.client_node_id, r.value.clone()),
            other => panic!("unexpected response {other:?}"),
        })
        .collect();
    assert_eq!(
        observed,
        vec![
            (10, Value::Real(1.0)),
            (11, Value::Real(1.0)),
            (12, Value::Real(2.0)),
        ]
    );
}

#[test]
fn test_save_and_reboot_cycle() {
    init_logging();
    let mut storage = MemoryStorage::new();

    // First boot: change a value and save it.
    {
        let mut registry = ParamRegistry::new(Some(&mut storage));
        declare_demo_params(&mut registry);
        registry.init().unwrap();
        let mut node = SimulatedServiceNode::new();
        let mut server = ParamServer::new();
        server.start(&mut node, &mut registry).unwrap();

        get_set(&mut node, &mut server, GetSetRequest::set(name("b"), Value::Real(4.25)));
        get_set(&mut node, &mut server, GetSetRequest::set(name("a"), Value::Boolean(false)));
        assert!(execute(&mut node, &mut server, Opcode::Save));
    }
    assert_eq!(storage.save_count, 1);
    assert_eq!(storage.data.get(&name("b")), Some(&Value::Real(4.25)));

    // Second boot: the saved values are loaded.
    {
        let mut registry = ParamRegistry::new(Some(&mut storage));
        declare_demo_params(&mut registry);
        registry.init().unwrap();
        assert_eq!(registry.read_param_value(&name("a")), Some(Value::Boolean(false)));
        assert_eq!(registry.read_param_value(&name("b")), Some(Value::Real(4.25)));

        let mut node = SimulatedServiceNode::new();
        let mut server = ParamServer::new();
        server.start(&mut node, &mut registry).unwrap();
        assert!(execute(&mut node, &mut server, Opcode::Erase));

        // Erase only affects storage; the running value is untouched.
        let resp = get_set(&mut node, &mut server, GetSetRequest::by_name(name("b")));
        assert_eq!(resp.value, Value::Real(4.25));
    }
    assert_eq!(storage.clear_count, 1);
    assert!(storage.data.is_empty());

    // Third boot: defaults again.
    let mut registry = ParamRegistry::new(Some(&mut storage));
    declare_demo_params(&mut registry);
    registry.init().unwrap();
    assert_eq!(registry.read_param_value(&name("b")), Some(Value::Real(3.5)));
}

#[test]
fn test_erase_with_reset_on_erase() {
    init_logging();
    let mut storage = MemoryStorage::new();
    let config = RegistryConfig {
        reset_on_erase: true,
        ..Default::default()
    };
    let mut registry = ParamRegistry::with_config(Some(&mut storage), config);
    declare_demo_params(&mut registry);
    let mut node = SimulatedServiceNode::new();
    let mut server = ParamServer::new();
    server.start(&mut node, &mut registry).unwrap();

    get_set(&mut node, &mut server, GetSetRequest::set(name("b"), Value::Real(1.0)));
    assert!(execute(&mut node, &mut server, Opcode::Erase));
    let resp = get_set(&mut node, &mut server, GetSetRequest::by_name(name("b")));
    assert_eq!(resp.value, Value::Real(3.5));
}
