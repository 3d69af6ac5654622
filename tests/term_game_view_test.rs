use cubetris::core::{GameConfig, GameSnapshot, GameState, SequenceSource};
use cubetris::term::{AnchorY, FrameBuffer, GameView, Viewport};
use cubetris::types::{Phase, PieceKind};

fn row_text(fb: &FrameBuffer, y: u16) -> String {
    (0..fb.width())
        .map(|x| fb.get(x, y).map(|c| c.ch).unwrap_or(' '))
        .collect()
}

fn screen_contains(fb: &FrameBuffer, needle: &str) -> bool {
    (0..fb.height()).any(|y| row_text(fb, y).contains(needle))
}

fn glyph_at(fb: &FrameBuffer, pos: (u16, u16)) -> char {
    fb.get(pos.0, pos.1).map(|c| c.ch).unwrap_or(' ')
}

fn playing(kind: PieceKind) -> GameState<SequenceSource> {
    let mut game =
        GameState::with_source(GameConfig::default(), SequenceSource::new([kind.index()])).unwrap();
    game.start();
    game
}

const VIEWPORT: Viewport = Viewport {
    width: 100,
    height: 24,
};

#[test]
fn game_view_renders_slice_borders() {
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let snap = GameSnapshot::default();
    let fb = view.render(&snap, VIEWPORT);
    let layout = view.layout(&snap, VIEWPORT);

    for z in 0..5u16 {
        let x = layout.origin_x + z * (layout.panel_w + layout.gap);
        assert_eq!(glyph_at(&fb, (x, layout.origin_y)), '┌');
        assert_eq!(
            glyph_at(&fb, (x + layout.panel_w - 1, layout.origin_y + layout.panel_h - 1)),
            '┘'
        );
    }
    assert!(row_text(&fb, layout.origin_y - 1).contains("z4"));
}

#[test]
fn game_view_shows_start_prompt_while_waiting() {
    let view = GameView::default();
    let snap = GameSnapshot::default();
    assert_eq!(snap.phase, Phase::Waiting);
    let fb = view.render(&snap, VIEWPORT);
    assert!(screen_contains(&fb, "PRESS ENTER"));
    assert!(!screen_contains(&fb, "GAME OVER"));
}

#[test]
fn game_view_draws_active_piece_and_ghost() {
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let game = playing(PieceKind::V);
    let snap = game.snapshot();
    let fb = view.render(&snap, VIEWPORT);
    let layout = view.layout(&snap, VIEWPORT);

    // V spawns at x = 2, z = 2 covering y = 11 and 10; it lands on y = 1 and 0.
    for y in [11, 10] {
        assert_eq!(glyph_at(&fb, layout.cell_origin(2, y, 2).unwrap()), '█');
    }
    for y in [1, 0] {
        assert_eq!(glyph_at(&fb, layout.cell_origin(2, y, 2).unwrap()), '░');
    }
    assert_eq!(glyph_at(&fb, layout.cell_origin(0, 0, 0).unwrap()), '·');
    assert!(!screen_contains(&fb, "PRESS ENTER"));
}

#[test]
fn game_view_draws_locked_cells() {
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let mut game = playing(PieceKind::V);
    game.hard_drop();
    let snap = game.snapshot();
    let fb = view.render(&snap, VIEWPORT);
    let layout = view.layout(&snap, VIEWPORT);

    let (x, y) = layout.cell_origin(2, 0, 2).unwrap();
    let locked = fb.get(x, y).unwrap();
    assert_eq!(locked.ch, '█');
    assert!(!locked.style.bold);
}

#[test]
fn game_view_side_panel_shows_score_and_next() {
    let view = GameView::default();
    let game = playing(PieceKind::T);
    let fb = view.render(&game.snapshot(), VIEWPORT);
    assert!(screen_contains(&fb, "SCORE"));
    assert!(screen_contains(&fb, "LEVEL"));
    assert!(screen_contains(&fb, "LINES"));
    assert!(screen_contains(&fb, "REN"));
    assert!(screen_contains(&fb, "NEXT"));
}

#[test]
fn game_view_game_over_overlay_includes_score() {
    let view = GameView::default();
    let mut game = playing(PieceKind::V);
    for y in 0..10 {
        game.grid_mut().set(2, y, 2, true);
    }
    game.hard_drop();
    assert_eq!(game.phase(), Phase::GameOver);

    let fb = view.render(&game.snapshot(), VIEWPORT);
    assert!(screen_contains(&fb, "GAME OVER"));
    assert!(screen_contains(&fb, "SCORE 0"));
}

#[test]
fn game_view_render_into_reuses_buffer() {
    let view = GameView::default();
    let snap = GameSnapshot::default();
    let mut fb = FrameBuffer::new(10, 10);
    view.render_into(&snap, VIEWPORT, &mut fb);
    assert_eq!((fb.width(), fb.height()), (100, 24));
    assert_eq!(fb, view.render(&snap, VIEWPORT));
}

#[test]
fn game_view_survives_tiny_viewport() {
    let view = GameView::default();
    let game = playing(PieceKind::I);
    let fb = view.render(&game.snapshot(), Viewport::new(8, 4));
    assert_eq!((fb.width(), fb.height()), (8, 4));
}
