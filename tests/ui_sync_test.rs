#![cfg(feature = "ui")]

use std::collections::HashMap;

use bevy::prelude::*;
use npc_sim::simulation::{AgentId, AgentStore, MemoryStore, Session, SimConfig};
use npc_sim::ui::{sync_agents, AgentAssets, AgentLink, EntityMappings, SimSession};

fn sync_app(agents: usize) -> App {
    let config = SimConfig {
        initial_agents: agents,
        ..SimConfig::seeded(31)
    };
    let store: Box<dyn AgentStore + Send> = Box::new(MemoryStore::new());
    let session = Session::start(&config, store).expect("session");

    let mut app = App::new();
    app.add_plugins(MinimalPlugins)
        .init_resource::<EntityMappings>()
        .insert_resource(AgentAssets {
            mesh: Handle::default(),
            materials: HashMap::new(),
        })
        .insert_non_send_resource(SimSession(session))
        .add_systems(Update, sync_agents);
    app
}

fn linked_ids(app: &mut App) -> Vec<AgentId> {
    let mut ids: Vec<AgentId> = app
        .world_mut()
        .query::<&AgentLink>()
        .iter(app.world())
        .map(|link| link.0)
        .collect();
    ids.sort();
    ids
}

#[test]
fn test_removed_agent_is_despawned() {
    let mut app = sync_app(3);
    app.update();

    let mappings = app.world().resource::<EntityMappings>();
    assert_eq!(mappings.agents.len(), 3);
    let removed_entity = mappings.agents[&AgentId(3)];
    assert_eq!(linked_ids(&mut app), vec![AgentId(1), AgentId(2), AgentId(3)]);

    app.world_mut()
        .non_send_resource_mut::<SimSession>()
        .0
        .world_mut()
        .remove_last_agent();
    app.update();

    let mappings = app.world().resource::<EntityMappings>();
    assert_eq!(mappings.agents.len(), 2);
    assert!(!mappings.agents.contains_key(&AgentId(3)));
    assert!(app.world().get_entity(removed_entity).is_err());
    assert_eq!(linked_ids(&mut app), vec![AgentId(1), AgentId(2)]);
}

#[test]
fn test_added_agent_is_spawned_once() {
    let mut app = sync_app(1);
    app.update();

    app.world_mut()
        .non_send_resource_mut::<SimSession>()
        .0
        .world_mut()
        .spawn_agent(None);
    app.update();
    app.update();

    assert_eq!(linked_ids(&mut app), vec![AgentId(1), AgentId(2)]);
    assert_eq!(app.world().resource::<EntityMappings>().agents.len(), 2);
}
