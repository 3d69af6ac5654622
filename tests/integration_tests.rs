//! Integration tests for the session state machine and the gravity loop

use cubetris::core::{GameConfig, GameState, SequenceSource};
use cubetris::types::{Axis, Command, Phase, PieceKind, Position};

fn scripted(kinds: &[PieceKind]) -> GameState<SequenceSource> {
    GameState::with_source(
        GameConfig::default(),
        SequenceSource::new(kinds.iter().map(|k| k.index())),
    )
    .unwrap()
}

#[test]
fn test_game_lifecycle() {
    let mut game = GameState::new(12345);
    assert_eq!(game.phase(), Phase::Waiting);

    game.start();
    assert_eq!(game.phase(), Phase::Playing);
    assert!(game.active().is_some());
    assert!(game.next().is_some());

    game.reset();
    assert_eq!(game.phase(), Phase::Waiting);
    assert!(game.active().is_none());
    assert!(game.next().is_none());
    assert_eq!(game.score(), 0);
}

#[test]
fn test_commands_are_noops_while_waiting() {
    let mut game = GameState::new(7);
    for command in [
        Command::MoveX(1),
        Command::MoveZ(-1),
        Command::Rotate(Axis::X, 1),
        Command::SoftDrop,
        Command::HardDrop,
    ] {
        assert!(!game.apply_command(command), "{:?}", command);
    }
    assert_eq!(game.phase(), Phase::Waiting);
    assert!(game.grid().is_empty());
}

#[test]
fn test_spawn_into_blocked_column_ends_game() {
    let mut game = scripted(&[PieceKind::V]);
    game.start();
    assert_eq!(game.active().unwrap().position, Position::new(2, 11, 2));

    // Stack the spawn column up to just below the spawn cells.
    for y in 0..10 {
        game.grid_mut().set(2, y, 2, true);
    }

    // The current V cannot fall, so it locks in place and the next V has nowhere to go.
    assert_eq!(game.hard_drop(), Some(0));
    assert_eq!(game.phase(), Phase::GameOver);
    assert!(game.active().is_none());
    assert!(game.grid().is_occupied(2, 11, 2));
    assert!(game.ghost_position().is_none());
}

#[test]
fn test_game_over_ignores_commands_until_reset() {
    let mut game = scripted(&[PieceKind::V]);
    game.start();
    for y in 0..10 {
        game.grid_mut().set(2, y, 2, true);
    }
    game.hard_drop();
    assert_eq!(game.phase(), Phase::GameOver);

    let snapshot = game.snapshot();
    assert!(!game.move_x(1));
    assert!(!game.rotate(Axis::Y, 1));
    assert!(!game.soft_drop());
    assert!(!game.tick(1_000_000));
    assert_eq!(game.snapshot(), snapshot);

    assert!(game.apply_command(Command::Reset));
    assert_eq!(game.phase(), Phase::Waiting);
    assert!(game.grid().is_empty());

    assert!(game.apply_command(Command::Start));
    assert_eq!(game.phase(), Phase::Playing);
}

#[test]
fn test_moves_in_both_horizontal_axes() {
    let mut game = scripted(&[PieceKind::V]);
    game.start();

    assert!(game.apply_command(Command::MoveX(-1)));
    assert!(game.apply_command(Command::MoveZ(1)));
    assert_eq!(game.active().unwrap().position, Position::new(1, 11, 3));

    assert!(game.move_z(1));
    assert!(!game.move_z(1));
    assert!(game.move_x(-1));
    assert!(!game.move_x(-1));
    assert_eq!(game.active().unwrap().position, Position::new(0, 11, 4));
}

#[test]
fn test_blocked_move_keeps_position() {
    let mut game = scripted(&[PieceKind::V]);
    game.start();
    game.grid_mut().set(3, 10, 2, true);
    assert!(!game.move_x(1));
    assert_eq!(game.active().unwrap().position, Position::new(2, 11, 2));

    // A wider shift request is still a single step and cannot skip the block.
    assert!(!game.apply_command(Command::MoveX(2)));
    assert_eq!(game.active().unwrap().position, Position::new(2, 11, 2));
}

#[test]
fn test_rotation_commands_change_shape_dimensions() {
    let mut game = scripted(&[PieceKind::T]);
    game.start();
    let shape = &game.active().unwrap().shape;
    assert_eq!((shape.height(), shape.depth(), shape.width()), (1, 2, 3));

    assert!(game.apply_command(Command::Rotate(Axis::Y, 1)));
    let shape = &game.active().unwrap().shape;
    assert_eq!((shape.height(), shape.depth(), shape.width()), (1, 3, 2));

    assert!(game.apply_command(Command::Rotate(Axis::Y, -1)));
    let shape = &game.active().unwrap().shape;
    assert_eq!((shape.height(), shape.depth(), shape.width()), (1, 2, 3));
}

#[test]
fn test_rotation_out_of_field_is_rejected() {
    let mut game = scripted(&[PieceKind::I]);
    game.start();
    // I lies along x at z = 2. A Y turn swings it to 4 deep at x = 0, which
    // would run past z = 4.
    let before = game.active().unwrap().clone();
    assert!(!game.rotate(Axis::Y, 1));
    assert_eq!(game.active().unwrap(), &before);
}

#[test]
fn test_ghost_tracks_landing_layer() {
    let mut game = scripted(&[PieceKind::O]);
    game.start();
    assert_eq!(game.ghost_position(), Some(Position::new(1, 1, 1)));

    game.grid_mut().set(2, 4, 2, true);
    assert_eq!(game.ghost_position(), Some(Position::new(1, 6, 1)));

    // The ghost is a preview only.
    assert_eq!(game.active().unwrap().position, Position::new(1, 11, 1));
}

#[test]
fn test_gravity_loop_drops_one_layer_per_interval() {
    let mut game = scripted(&[PieceKind::V]);
    game.start();
    assert_eq!(game.drop_interval_ms(), 800);

    // First reading becomes the baseline.
    assert!(!game.tick(10_000));

    let mut now = 10_000;
    for expected_y in (1..=10).rev() {
        now += 801;
        assert!(game.tick(now));
        assert_eq!(game.active().unwrap().position.y, expected_y);
    }

    // Resting on the floor: the next gravity step locks and respawns.
    now += 801;
    assert!(game.tick(now));
    assert_eq!(game.piece_id(), 2);
    assert!(game.grid().is_occupied(2, 0, 2));
    assert!(game.grid().is_occupied(2, 1, 2));
    assert_eq!(game.active().unwrap().position.y, 11);
}

#[test]
fn test_hard_drop_restarts_gravity_baseline() {
    let mut game = scripted(&[PieceKind::V]);
    game.start();
    assert!(!game.tick(0));

    game.hard_drop();
    // Long after the last drop, but the first reading only rebases.
    assert!(!game.tick(50_000));
    assert!(!game.tick(50_800));
    assert!(game.tick(50_801));
    assert_eq!(game.active().unwrap().position.y, 10);
}

#[test]
fn test_drop_interval_speeds_up_with_level() {
    let mut game = scripted(&[PieceKind::I]);
    game.start();
    assert_eq!(game.level(), 1);

    // Ten single-layer clears reach level 2.
    for _ in 0..10 {
        let grid = game.grid_mut();
        for z in 0..5 {
            for x in 0..5 {
                if !(z == 2 && x < 4) {
                    grid.set(x, 0, z, true);
                }
            }
        }
        game.hard_drop();
    }
    assert_eq!(game.lines(), 10);
    assert_eq!(game.level(), 2);
    assert_eq!(game.drop_interval_ms(), 750);

    // The last hard drop left a pending rebase.
    assert!(!game.tick(100_000));
    assert!(!game.tick(100_750));
    assert!(game.tick(100_751));
    assert_eq!(game.active().unwrap().position.y, 10);
}

#[test]
fn test_same_seed_same_pieces() {
    let mut a = GameState::new(4242);
    let mut b = GameState::new(4242);
    a.start();
    b.start();
    for _ in 0..20 {
        assert_eq!(a.active().map(|p| p.kind), b.active().map(|p| p.kind));
        assert_eq!(a.next().map(|p| p.kind), b.next().map(|p| p.kind));
        a.hard_drop();
        b.hard_drop();
    }
    assert_eq!(a.snapshot(), b.snapshot());
}

#[test]
fn test_custom_field_dimensions() {
    let config = GameConfig::default().with_dimensions(8, 16, 6);
    let mut game =
        GameState::with_source(config, SequenceSource::new([PieceKind::O.index()])).unwrap();
    game.start();
    // x = (8 - 2) / 2, z = (6 - 2) / 2
    assert_eq!(game.active().unwrap().position, Position::new(3, 15, 2));
    assert_eq!(game.snapshot().grid.len(), 8 * 16 * 6);
}

#[test]
fn test_invalid_config_is_rejected() {
    let config = GameConfig::default().with_dimensions(0, 12, 5);
    assert!(GameState::with_source(config, SequenceSource::default()).is_err());
}
