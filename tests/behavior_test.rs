use std::f32::consts::{FRAC_PI_2, PI};

use npc_sim::simulation::{
    assign_affinities, select_target, Affinities, Agent, AgentId, AreaType, BehaviorPolicy,
    BehaviorState, BoundaryPolicies, BoundaryPolicy, Direction, Kinematics, MovementMode, Player,
    Position, SteeringIntegrator, ZoneMap, AGENT_SIZE, STATE_TIMER_MAX, STATE_TIMER_MIN,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

fn test_agent(state: BehaviorState, timer: u32) -> Agent {
    Agent::new(
        AgentId(1),
        "Test_1".to_string(),
        Kinematics::new(Position::new(100.0, 100.0), 0.0, 2.0, AGENT_SIZE),
        Affinities {
            home: AreaType::Residential,
            work: AreaType::Industrial,
        },
        state,
        timer,
    )
}

fn approx(a: f32, b: f32) -> bool {
    (a - b).abs() < 1e-4
}

#[test]
fn test_timer_counts_down_then_resamples() {
    let map = ZoneMap::default_layout(1000, 800).expect("layout");
    let policy = BehaviorPolicy::default();
    let mut rng = StdRng::seed_from_u64(3);
    let mut agent = test_agent(BehaviorState::Resting, 2);

    assert!(policy.decide(&mut agent, &map, &mut rng).is_none());
    assert_eq!(agent.state_timer, 1);
    assert!(policy.decide(&mut agent, &map, &mut rng).is_none());
    assert_eq!(agent.state_timer, 0);

    let transition = policy
        .decide(&mut agent, &map, &mut rng)
        .expect("timer at zero re-rolls the state");
    assert_eq!(transition.from, BehaviorState::Resting);
    assert_eq!(transition.to, agent.state);
    assert_eq!(transition.timer, agent.state_timer);
    assert!((STATE_TIMER_MIN..=STATE_TIMER_MAX).contains(&agent.state_timer));
}

#[test]
fn test_timer_stays_in_range_over_many_ticks() {
    let map = ZoneMap::default_layout(1000, 800).expect("layout");
    let policy = BehaviorPolicy::default();
    let mut rng = StdRng::seed_from_u64(42);
    let mut agent = test_agent(BehaviorState::Working, 5);

    let mut previous = agent.state_timer;
    let mut transitions = 0;
    for _ in 0..5000 {
        let transition = policy.decide(&mut agent, &map, &mut rng);
        match transition {
            Some(_) => {
                assert_eq!(previous, 0, "state changed before the timer ran out");
                transitions += 1;
            }
            None => assert_eq!(agent.state_timer + 1, previous),
        }
        assert!(agent.state_timer <= STATE_TIMER_MAX);
        previous = agent.state_timer;
    }
    assert!(transitions > 10);
}

#[test]
fn test_transition_clears_target() {
    let map = ZoneMap::default_layout(1000, 800).expect("layout");
    let policy = BehaviorPolicy::default();
    let stale = Position::new(-50.0, -50.0);

    // Enough seeds that every state comes up as the re-rolled one
    let mut seen = Vec::new();
    for seed in 0..64 {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut agent = test_agent(BehaviorState::Working, 0);
        agent.target = Some(stale);

        let transition = policy
            .decide(&mut agent, &map, &mut rng)
            .expect("timer at zero re-rolls the state");
        assert_ne!(agent.target, Some(stale));

        match agent.destination_type() {
            None => {
                assert_eq!(transition.to, BehaviorState::Wandering);
                assert!(agent.target.is_none());
            }
            Some(kind) => {
                let target = agent.target.expect("seeking state picks a fresh target");
                assert!(
                    map.zones_of_type(kind)
                        .iter()
                        .any(|zone| zone.rect.contains(&target)),
                    "{:?} target {:?} not in a {:?} zone",
                    agent.state,
                    target,
                    kind
                );
            }
        }
        if !seen.contains(&transition.to) {
            seen.push(transition.to);
        }
    }
    assert_eq!(seen.len(), BehaviorState::ALL.len());
}

#[test]
fn test_seeking_targets_match_state() {
    let map = ZoneMap::default_layout(1000, 800).expect("layout");
    let mut rng = StdRng::seed_from_u64(5);

    let cases = [
        (BehaviorState::Working, AreaType::Industrial),
        (BehaviorState::Resting, AreaType::Residential),
        (BehaviorState::Socializing, AreaType::Recreational),
    ];

    for (state, kind) in cases {
        let agent = test_agent(state, 100);
        let zone = map.zones_of_type(kind)[0];
        for _ in 0..100 {
            let target = select_target(&agent, &map, &mut rng).expect("target");
            assert!(
                zone.rect.contains(&target),
                "{:?} target {:?} outside {:?}",
                state,
                target,
                zone
            );
        }
    }
}

#[test]
fn test_wandering_never_has_a_target() {
    let map = ZoneMap::default_layout(1000, 800).expect("layout");
    let policy = BehaviorPolicy::default();
    let mut rng = StdRng::seed_from_u64(9);
    let mut agent = test_agent(BehaviorState::Wandering, 100_000);

    assert!(select_target(&agent, &map, &mut rng).is_none());
    for _ in 0..500 {
        policy.decide(&mut agent, &map, &mut rng);
        assert_eq!(agent.state, BehaviorState::Wandering);
        assert!(agent.target.is_none());
    }
}

#[test]
fn test_wandering_heading_drifts() {
    let map = ZoneMap::default_layout(1000, 800).expect("layout");
    let policy = BehaviorPolicy::default();
    let mut rng = StdRng::seed_from_u64(21);
    let mut agent = test_agent(BehaviorState::Wandering, 100_000);
    let initial = agent.kinematics.heading;

    let mut changed = false;
    for _ in 0..1000 {
        policy.decide(&mut agent, &map, &mut rng);
        changed |= agent.kinematics.heading != initial;
        assert!((0.0..std::f32::consts::TAU).contains(&agent.kinematics.heading));
    }
    assert!(changed, "2% per tick over 1000 ticks should re-roll the heading");
}

#[test]
fn test_affinity_distribution() {
    let mut rng = StdRng::seed_from_u64(1234);
    let samples = 10_000;
    let mut residential = 0;
    let mut commercial = 0;

    for _ in 0..samples {
        let affinities = assign_affinities(&mut rng);
        assert!(matches!(
            affinities.home,
            AreaType::Residential | AreaType::Rural
        ));
        assert_ne!(affinities.work, AreaType::Residential);
        if affinities.home == AreaType::Residential {
            residential += 1;
        }
        if affinities.work == AreaType::Commercial {
            commercial += 1;
        }
    }

    let residential = residential as f64 / samples as f64;
    let commercial = commercial as f64 / samples as f64;
    assert!((0.66..0.74).contains(&residential), "residential {}", residential);
    assert!((0.26..0.34).contains(&commercial), "commercial {}", commercial);
}

#[test]
fn test_steering_turns_toward_distant_target() {
    let steering = SteeringIntegrator::new(1000.0, 800.0, BoundaryPolicies::default());
    let mut kinematics = Kinematics::new(Position::new(100.0, 100.0), 0.0, 2.0, AGENT_SIZE);

    steering.step(
        &mut kinematics,
        Some(Position::new(100.0, 300.0)),
        MovementMode::Seeking,
    );

    assert!(approx(kinematics.heading, FRAC_PI_2));
    assert!(approx(kinematics.position.x, 100.0));
    assert!(approx(kinematics.position.y, 102.0));
}

#[test]
fn test_steering_keeps_heading_near_target() {
    let steering = SteeringIntegrator::new(1000.0, 800.0, BoundaryPolicies::default());
    let mut kinematics = Kinematics::new(Position::new(100.0, 100.0), 0.0, 2.0, AGENT_SIZE);

    // Within the stop threshold the heading is left alone
    steering.step(
        &mut kinematics,
        Some(Position::new(100.0, 105.0)),
        MovementMode::Seeking,
    );

    assert_eq!(kinematics.heading, 0.0);
    assert!(approx(kinematics.position.x, 102.0));
}

#[test]
fn test_clamp_boundary() {
    let steering = SteeringIntegrator::new(1000.0, 800.0, BoundaryPolicies::default());
    let mut kinematics = Kinematics::new(Position::new(999.0, 400.0), 0.0, 3.0, AGENT_SIZE);

    steering.step(&mut kinematics, None, MovementMode::Roaming);

    assert_eq!(kinematics.position.x, 1000.0);
    assert_eq!(kinematics.heading, 0.0);
}

#[test]
fn test_reflect_boundary() {
    let boundaries = BoundaryPolicies {
        seeking: BoundaryPolicy::Clamp,
        roaming: BoundaryPolicy::Reflect,
    };
    let steering = SteeringIntegrator::new(1000.0, 800.0, boundaries);

    let mut east = Kinematics::new(Position::new(999.0, 400.0), 0.0, 3.0, AGENT_SIZE);
    steering.step(&mut east, None, MovementMode::Roaming);
    assert_eq!(east.position.x, 1000.0);
    assert!(approx(east.heading, PI));

    let mut south = Kinematics::new(Position::new(500.0, 799.0), FRAC_PI_2, 3.0, AGENT_SIZE);
    steering.step(&mut south, None, MovementMode::Roaming);
    assert_eq!(south.position.y, 800.0);
    assert!(approx(south.heading, 3.0 * FRAC_PI_2));

    // Seeking agents still clamp under this configuration
    let mut seeking = Kinematics::new(Position::new(999.0, 400.0), 0.0, 3.0, AGENT_SIZE);
    steering.step(&mut seeking, None, MovementMode::Seeking);
    assert_eq!(seeking.position.x, 1000.0);
    assert_eq!(seeking.heading, 0.0);
}

#[test]
fn test_direction_from_axes() {
    assert_eq!(Direction::from_axes(false, false, false, false), None);
    assert_eq!(Direction::from_axes(true, true, false, false), None);
    assert_eq!(
        Direction::from_axes(false, false, true, false),
        Some(Direction::Up)
    );
    assert_eq!(
        Direction::from_axes(true, false, false, true),
        Some(Direction::DownLeft)
    );

    let (dx, dy) = Direction::UpRight.unit_vector();
    assert!(approx(dx * dx + dy * dy, 1.0));
    assert!(dx > 0.0 && dy < 0.0);
}

#[test]
fn test_player_moves_and_stays_in_world() {
    let mut player = Player::new(Position::new(2.0, 400.0));

    player.apply_movement(Direction::Right, 1000.0, 800.0);
    assert!(approx(player.position().x, 7.0));

    for _ in 0..10 {
        player.apply_movement(Direction::Left, 1000.0, 800.0);
    }
    assert_eq!(player.position().x, 0.0);

    for _ in 0..200 {
        player.apply_movement(Direction::Down, 1000.0, 800.0);
    }
    assert_eq!(player.position().y, 800.0);
}

#[test]
fn test_player_faces_pointer() {
    let mut player = Player::new(Position::new(500.0, 400.0));

    player.face(Position::new(500.0, 300.0));
    assert!(approx(player.kinematics.heading, 3.0 * FRAC_PI_2));

    // A pointer on the player leaves the heading unchanged
    player.face(Position::new(500.0, 400.0));
    assert!(approx(player.kinematics.heading, 3.0 * FRAC_PI_2));
}
