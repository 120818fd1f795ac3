#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    use crate::config::game::{BarrierSpawn, EnemySpawn, GameConfig, PlayerSpawn, WeaponContact};
    use crate::game::error::GameError;
    use crate::game::state::GameState;
    use crate::game::systems::{player_attack, AttackOutcome};
    use crate::game::types::*;

    const NORTH: Option<Command> = Some(Command::Move(Direction::North));
    const WEST: Option<Command> = Some(Command::Move(Direction::West));
    const EAST: Option<Command> = Some(Command::Move(Direction::East));
    const ATTACK: Option<Command> = Some(Command::Attack);

    fn config(rows: usize, cols: usize) -> GameConfig {
        let mut config = GameConfig::default();
        config.rows = rows;
        config.cols = cols;
        config.layout.player = PlayerSpawn { name: "Br80".to_string(), row: 0, col: 0 };
        config.layout.enemies.clear();
        config
    }

    fn enemy(row: usize, col: usize, period: u64) -> EnemySpawn {
        EnemySpawn { name: "X".to_string(), row, col, speed: 1.0, period: Some(period) }
    }

    fn barrier(row: usize, col: usize) -> BarrierSpawn {
        BarrierSpawn { name: "#".to_string(), row, col }
    }

    fn game(config: GameConfig, seed: u64) -> GameState {
        GameState::with_rng(config, StdRng::seed_from_u64(seed)).expect("valid config")
    }

    /// Step once and check the occupancy invariant.
    fn step(game: &mut GameState, input: Option<Command>) -> StepOutcome {
        let outcome = game.step(input).expect("step");
        game.check_occupancy().expect("occupancy");
        outcome
    }

    fn pos_of(game: &GameState, id: EntityId) -> Position {
        game.entity(id).expect("live entity").pos
    }

    #[test]
    fn test_occupancy_holds_over_a_long_random_game() {
        let mut config = config(8, 8);
        config.layout.player.row = 7;
        config.layout.player.col = 7;
        config.layout.enemies = vec![enemy(0, 0, 1), enemy(0, 7, 2), enemy(3, 3, 3), enemy(5, 1, 1)];
        config.layout.barriers = vec![barrier(2, 2), barrier(4, 4), barrier(6, 6)];
        config.attack_period = 2;
        config.weapon_lifetime = 4;

        for seed in 0..8 {
            let mut game = game(config.clone(), seed);
            let keys = [None, ATTACK, NORTH, None, WEST, ATTACK, EAST, None];
            for frame in 0..2000 {
                if let StepOutcome::GameOver { .. } = step(&mut game, keys[frame % keys.len()]) {
                    break;
                }
            }
        }
    }

    #[test]
    fn test_boundary_clamp_at_origin() {
        let mut config = config(10, 10);
        config.layout.enemies = vec![enemy(5, 5, 1_000)];
        let mut game = game(config, 0);
        let player = game.player_id();

        assert_eq!(step(&mut game, NORTH), StepOutcome::Continue);
        assert_eq!(step(&mut game, WEST), StepOutcome::Continue);

        assert_eq!(pos_of(&game, player), Position::new(0, 0));
        assert_eq!(game.grid().at(Position::new(0, 0)).unwrap(), Some(player));
        assert_eq!(game.enemies().len(), 1);
        assert!(game.is_running());
    }

    #[test]
    fn test_enemy_onto_player_kills_and_takes_cell() {
        // One row, two cells: the enemy can only step west.
        let mut config = config(1, 2);
        config.layout.enemies = vec![enemy(0, 1, 1)];
        let mut game = game(config, 3);
        let enemy = game.enemies()[0];

        let outcome = step(&mut game, None);

        assert_eq!(outcome, StepOutcome::GameOver { reason: TerminationReason::PlayerDied, frame: 1 });
        assert_eq!(game.grid().at(Position::new(0, 0)).unwrap(), Some(enemy));
        assert_eq!(pos_of(&game, enemy), Position::new(0, 0));
        assert!(!game.is_alive(game.player_id()));
    }

    #[test]
    fn test_player_into_weapon_dies_and_weapon_persists() {
        let mut game = game(config(3, 3), 0);

        step(&mut game, ATTACK);
        let weapon = game.weapons()[0];
        assert_eq!(pos_of(&game, weapon), Position::new(0, 1));

        let outcome = step(&mut game, EAST);

        assert_eq!(outcome, StepOutcome::GameOver { reason: TerminationReason::PlayerDied, frame: 2 });
        assert_eq!(game.grid().at(Position::new(0, 0)).unwrap(), None);
        assert_eq!(game.grid().at(Position::new(0, 1)).unwrap(), Some(weapon));
        assert_eq!(game.weapons(), &[weapon]);
    }

    #[test]
    fn test_player_into_weapon_with_consume_policy() {
        let mut config = config(3, 3);
        config.weapon_contact = WeaponContact::Consume;
        let mut game = game(config, 0);

        step(&mut game, ATTACK);
        let outcome = step(&mut game, EAST);

        assert!(matches!(outcome, StepOutcome::GameOver { reason: TerminationReason::PlayerDied, .. }));
        assert!(game.weapons().is_empty());
        assert_eq!(game.grid().occupied().count(), 0);
    }

    #[test]
    fn test_weapon_expiry_window() {
        let mut config = config(3, 3);
        config.weapon_lifetime = 5;
        let mut game = game(config, 0);

        // Created at frame 1, so present through frame 5 and gone at frame 6.
        step(&mut game, ATTACK);
        let weapon = game.weapons()[0];
        for frame in 1..=5 {
            assert_eq!(game.frame(), frame);
            assert_eq!(game.grid().at(Position::new(0, 1)).unwrap(), Some(weapon));
            step(&mut game, None);
        }
        assert_eq!(game.frame(), 6);
        assert!(game.weapons().is_empty());
        assert_eq!(game.grid().at(Position::new(0, 1)).unwrap(), None);
        assert!(matches!(game.entity(weapon), Err(GameError::DeadEntity(_))));
    }

    #[test]
    fn test_cooldown_gates_repeated_attacks() {
        let mut config = config(3, 3);
        config.attack_period = 3;
        config.weapon_lifetime = 1;
        let mut game = game(config, 0);

        let mut spawned = Vec::new();
        let mut seen = std::collections::HashSet::new();
        for _ in 0..20 {
            step(&mut game, ATTACK);
            for id in game.weapons() {
                if seen.insert(*id) {
                    spawned.push(game.frame());
                }
            }
        }

        // One weapon every attack_period + 1 frames.
        assert_eq!(spawned, vec![1, 5, 9, 13, 17]);
    }

    #[test]
    fn test_enemy_waits_for_its_period() {
        let mut config = config(10, 10);
        config.layout.enemies = vec![enemy(5, 0, 100)];
        let mut game = game(config, 42);
        let enemy = game.enemies()[0];
        let start = Position::new(5, 0);

        for _ in 0..99 {
            step(&mut game, None);
            assert_eq!(pos_of(&game, enemy), start);
        }

        step(&mut game, None);
        assert_eq!(game.frame(), 100);
        let moved = pos_of(&game, enemy);
        assert!(
            [Position::new(4, 0), Position::new(6, 0), Position::new(5, 1)].contains(&moved),
            "unexpected position {:?}",
            moved
        );
        assert_eq!(game.grid().at(start).unwrap(), None);
        assert_eq!(game.grid().at(moved).unwrap(), Some(enemy));

        // Next act is exactly one period later.
        for _ in 0..99 {
            step(&mut game, None);
            assert_eq!(pos_of(&game, enemy), moved);
        }
    }

    #[test]
    fn test_immediate_attack_then_cooldown() {
        let mut game = game(config(10, 10), 0);
        assert_eq!(game.player_state().unwrap().cooldown, 0);

        step(&mut game, ATTACK);
        assert_eq!(game.weapons().len(), 1);
        assert_eq!(pos_of(&game, game.weapons()[0]), Position::new(0, 1));
        assert!(game.player_state().unwrap().cooldown > 0);

        step(&mut game, ATTACK);
        assert_eq!(game.weapons().len(), 1);
    }

    #[test]
    fn test_attack_destroys_enemy_on_forward_cell() {
        let mut config = config(3, 3);
        config.layout.enemies = vec![enemy(0, 1, 1_000)];
        let mut game = game(config, 0);
        let enemy = game.enemies()[0];

        step(&mut game, ATTACK);

        assert!(game.enemies().is_empty());
        assert!(!game.is_alive(enemy));
        let weapon = game.weapons()[0];
        assert_eq!(game.grid().at(Position::new(0, 1)).unwrap(), Some(weapon));
    }

    #[test]
    fn test_attack_rejections_keep_cooldown() {
        let mut config = config(3, 3);
        config.layout.barriers = vec![barrier(1, 0)];
        let mut game = game(config, 0);

        // Facing north at the top edge.
        step(&mut game, NORTH);
        assert_eq!(player_attack(&mut game).unwrap(), AttackOutcome::NoRoom);

        // Facing south into a barrier.
        step(&mut game, Some(Command::Move(Direction::South)));
        assert_eq!(pos_of(&game, game.player_id()), Position::new(0, 0));
        assert_eq!(player_attack(&mut game).unwrap(), AttackOutcome::Blocked);

        assert!(game.weapons().is_empty());
        assert_eq!(game.player_state().unwrap().cooldown, 0);

        step(&mut game, EAST);
        assert!(matches!(player_attack(&mut game).unwrap(), AttackOutcome::Spawned(_)));
        assert_eq!(player_attack(&mut game).unwrap(), AttackOutcome::OnCooldown);
    }

    #[test]
    fn test_enemy_boxed_in_by_barriers_stays() {
        let mut config = config(2, 2);
        config.layout.player = PlayerSpawn { name: "Br80".to_string(), row: 1, col: 1 };
        config.layout.enemies = vec![enemy(0, 0, 1)];
        config.layout.barriers = vec![barrier(0, 1), barrier(1, 0)];
        let mut game = game(config, 9);
        let enemy = game.enemies()[0];

        for _ in 0..50 {
            step(&mut game, None);
        }
        assert_eq!(pos_of(&game, enemy), Position::new(0, 0));
        assert!(game.is_running());
    }

    /// Two enemies due on the same frame can only reach the middle cell.
    fn contested_middle(first: (usize, usize), second: (usize, usize)) -> GameConfig {
        let mut config = config(2, 3);
        config.layout.player = PlayerSpawn { name: "Br80".to_string(), row: 1, col: 1 };
        config.layout.enemies = vec![enemy(first.0, first.1, 1), enemy(second.0, second.1, 1)];
        config.layout.barriers = vec![barrier(1, 0), barrier(1, 2)];
        config
    }

    #[test]
    fn test_first_spawned_enemy_wins_contested_cell() {
        for seed in 0..4 {
            let mut game = game(contested_middle((0, 0), (0, 2)), seed);
            let (left, right) = (game.enemies()[0], game.enemies()[1]);

            step(&mut game, None);

            assert_eq!(pos_of(&game, left), Position::new(0, 1));
            assert_eq!(pos_of(&game, right), Position::new(0, 2));
            assert_eq!(game.grid().at(Position::new(0, 1)).unwrap(), Some(left));
            assert_eq!(game.grid().at(Position::new(0, 2)).unwrap(), Some(right));
        }

        // Swapping spawn order swaps the winner.
        let mut game = game(contested_middle((0, 2), (0, 0)), 0);
        let (right, left) = (game.enemies()[0], game.enemies()[1]);
        step(&mut game, None);
        assert_eq!(pos_of(&game, right), Position::new(0, 1));
        assert_eq!(pos_of(&game, left), Position::new(0, 0));
    }

    #[test]
    fn test_moves_are_not_gated_by_cooldown() {
        let mut game = game(config(3, 3), 0);
        step(&mut game, ATTACK);
        assert_eq!(game.weapons().len(), 1);

        step(&mut game, Some(Command::Move(Direction::South)));
        assert!(game.player_state().unwrap().cooldown > 0);
        assert_eq!(pos_of(&game, game.player_id()), Position::new(1, 0));

        step(&mut game, EAST);
        assert_eq!(pos_of(&game, game.player_id()), Position::new(1, 1));
    }

    #[test]
    fn test_snapshot_reports_cell_without_entity() {
        let mut game = game(config(3, 3), 0);
        game.grid.set(Position::new(2, 2), EntityId(999)).unwrap();
        assert!(matches!(game.snapshot(), Err(GameError::DeadEntity(EntityId(999)))));
    }

    #[test]
    fn test_enemy_walking_into_weapon_dies() {
        // Player, empty cell, enemy. The enemy can only step west.
        let mut config = config(1, 3);
        config.layout.enemies = vec![enemy(0, 2, 2)];
        let mut game = game(config, 0);

        step(&mut game, ATTACK);
        let weapon = game.weapons()[0];
        step(&mut game, None);

        assert!(game.enemies().is_empty());
        assert_eq!(game.grid().at(Position::new(0, 2)).unwrap(), None);
        assert_eq!(game.grid().at(Position::new(0, 1)).unwrap(), Some(weapon));
        assert!(game.is_running());
    }

    #[test]
    fn test_player_walking_into_barrier_or_neutral_is_blocked() {
        let mut config = config(3, 3);
        config.layout.barriers = vec![barrier(0, 1)];
        config.layout.neutrals = vec![BarrierSpawn { name: "o".to_string(), row: 1, col: 0 }];
        let mut game = game(config, 0);
        assert_eq!(game.snapshot().unwrap().cells[1][0], Some('o'));

        step(&mut game, EAST);
        step(&mut game, Some(Command::Move(Direction::South)));

        assert_eq!(pos_of(&game, game.player_id()), Position::new(0, 0));
        assert!(game.is_running());
    }

    #[test]
    fn test_quit_and_terminal_state_is_sticky() {
        let mut game = game(config(3, 3), 0);
        step(&mut game, None);

        let over = StepOutcome::GameOver { reason: TerminationReason::Quit, frame: 2 };
        assert_eq!(step(&mut game, Some(Command::Quit)), over);
        assert_eq!(game.run_state(), RunState::Terminated(TerminationReason::Quit));

        // Nothing moves once terminated.
        assert_eq!(step(&mut game, EAST), over);
        assert_eq!(pos_of(&game, game.player_id()), Position::new(0, 0));
    }

    #[test]
    fn test_spawning_on_occupied_cell_fails() {
        let mut game = game(config(3, 3), 0);
        assert!(matches!(
            game.spawn_enemy("Y", Position::new(0, 0), 10),
            Err(GameError::InvariantViolation(_))
        ));
        assert!(matches!(
            game.spawn_barrier("#", Position::new(3, 0)),
            Err(GameError::OutOfBounds { .. })
        ));
    }

    #[test]
    fn test_default_layout_snapshot() {
        let game = GameState::with_rng(GameConfig::default(), StdRng::seed_from_u64(0)).unwrap();
        let snapshot = game.snapshot().unwrap();

        assert_eq!((snapshot.rows, snapshot.cols), (10, 12));
        assert_eq!(snapshot.cells[0][0], Some('B'));
        assert_eq!(snapshot.cells[5][0], Some('X'));

        let json = serde_json::to_value(&snapshot).unwrap();
        assert_eq!(json["frame"], 0);
        assert_eq!(json["cells"][5][0], "X");
    }
}
