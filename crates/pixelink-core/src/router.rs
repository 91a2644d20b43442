//! Routes pointer, keyboard and resize events to canvas operations.

use crate::canvas::Canvas;
use crate::color::PALETTE;
use crate::input::{InputState, KeyEvent, Modifiers, MouseButton, PointerEvent};
use crate::layout::{Layout, Region, SidebarHit};
use crate::shortcuts::{ShortcutAction, ShortcutRegistry};
use kurbo::Point;

/// Result of routing one event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteOutcome {
    /// The event had no effect.
    Ignored,
    /// Canvas or brush state changed.
    Changed,
    /// The user asked to save the rendered window.
    SaveRequested,
    /// The user asked to reload the grid from the saved image.
    LoadRequested,
}

/// Translates raw input into `Canvas` operations.
#[derive(Debug, Clone)]
pub struct InputRouter {
    layout: Layout,
    input: InputState,
    /// Set between a left press on the canvas and its release.
    drawing: bool,
    /// Set once the current drag has pushed its undo point.
    stroke_started: bool,
}

impl InputRouter {
    pub fn new(layout: Layout) -> Self {
        Self {
            layout,
            input: InputState::new(),
            drawing: false,
            stroke_started: false,
        }
    }

    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// Current pointer position in window coordinates.
    pub fn pointer_position(&self) -> Point {
        self.input.pointer_position
    }

    /// Whether a stroke is in progress.
    pub fn is_drawing(&self) -> bool {
        self.drawing
    }

    pub fn set_modifiers(&mut self, modifiers: Modifiers) {
        self.input.set_modifiers(modifiers);
    }

    /// Handle a pointer event.
    pub fn handle_pointer(&mut self, canvas: &mut Canvas, event: PointerEvent) -> RouteOutcome {
        self.input.handle_pointer_event(&event);
        match event {
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            } => self.pointer_down(canvas, position),
            PointerEvent::Up {
                button: MouseButton::Left,
                ..
            } => {
                self.drawing = false;
                self.stroke_started = false;
                RouteOutcome::Ignored
            }
            PointerEvent::Move { position } if self.drawing => match self.layout.region_at(position) {
                Region::Canvas { col, row } if canvas.grid().contains(col, row) => {
                    self.ensure_stroke(canvas);
                    canvas.paint(col, row);
                    RouteOutcome::Changed
                }
                _ => RouteOutcome::Ignored,
            },
            _ => RouteOutcome::Ignored,
        }
    }

    fn pointer_down(&mut self, canvas: &mut Canvas, position: Point) -> RouteOutcome {
        match self.layout.region_at(position) {
            Region::Canvas { col, row } => {
                self.drawing = true;
                self.stroke_started = false;
                if !canvas.grid().contains(col, row) {
                    return RouteOutcome::Ignored;
                }
                self.ensure_stroke(canvas);
                canvas.paint(col, row);
                RouteOutcome::Changed
            }
            Region::Sidebar => match self.layout.sidebar_hit(position, PALETTE.len()) {
                Some(SidebarHit::BrushIncrease) => {
                    canvas.adjust_brush_size(1);
                    RouteOutcome::Changed
                }
                Some(SidebarHit::BrushDecrease) => {
                    canvas.adjust_brush_size(-1);
                    RouteOutcome::Changed
                }
                Some(SidebarHit::Swatch(index)) => {
                    if canvas.set_color(index) {
                        RouteOutcome::Changed
                    } else {
                        RouteOutcome::Ignored
                    }
                }
                None => RouteOutcome::Ignored,
            },
            Region::Outside => RouteOutcome::Ignored,
        }
    }

    /// Push the undo point for the current drag before its first paint.
    fn ensure_stroke(&mut self, canvas: &mut Canvas) {
        if !self.stroke_started {
            canvas.begin_stroke();
            self.stroke_started = true;
        }
    }

    /// Handle a keyboard event.
    pub fn handle_key(&mut self, canvas: &mut Canvas, event: KeyEvent) -> RouteOutcome {
        let KeyEvent::Pressed(key) = event else {
            return RouteOutcome::Ignored;
        };
        match ShortcutRegistry::resolve(&key, self.input.modifiers) {
            Some(ShortcutAction::Undo) => {
                if canvas.undo() {
                    RouteOutcome::Changed
                } else {
                    RouteOutcome::Ignored
                }
            }
            Some(ShortcutAction::Redo) => {
                if canvas.redo() {
                    RouteOutcome::Changed
                } else {
                    RouteOutcome::Ignored
                }
            }
            Some(ShortcutAction::Save) => RouteOutcome::SaveRequested,
            Some(ShortcutAction::Load) => RouteOutcome::LoadRequested,
            None => RouteOutcome::Ignored,
        }
    }

    /// Handle a window resize. Zero-sized windows are ignored.
    pub fn handle_resize(&mut self, canvas: &mut Canvas, width: u32, height: u32) -> RouteOutcome {
        if width == 0 || height == 0 {
            return RouteOutcome::Ignored;
        }
        self.layout = self.layout.resized(width, height);
        let (cols, rows) = self.layout.grid_dimensions();
        if canvas.dimensions() == (cols, rows) {
            return RouteOutcome::Ignored;
        }
        canvas.resize(cols, rows);
        RouteOutcome::Changed
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::PixelColor;

    fn setup() -> (InputRouter, Canvas) {
        let layout = Layout::new(1000, 600);
        let (cols, rows) = layout.grid_dimensions();
        (InputRouter::new(layout), Canvas::new(cols, rows))
    }

    fn click(router: &mut InputRouter, canvas: &mut Canvas, x: f64, y: f64) -> RouteOutcome {
        let position = Point::new(x, y);
        let outcome = router.handle_pointer(
            canvas,
            PointerEvent::Down {
                position,
                button: MouseButton::Left,
            },
        );
        router.handle_pointer(
            canvas,
            PointerEvent::Up {
                position,
                button: MouseButton::Left,
            },
        );
        outcome
    }

    fn press(router: &mut InputRouter, canvas: &mut Canvas, key: &str) -> RouteOutcome {
        router.set_modifiers(Modifiers::CTRL);
        let outcome = router.handle_key(canvas, KeyEvent::Pressed(key.to_string()));
        router.set_modifiers(Modifiers::default());
        outcome
    }

    #[test]
    fn test_swatch_then_paint_origin() {
        let (mut router, mut canvas) = setup();
        let swatch = router.layout().swatch_rect(2).center();

        assert_eq!(click(&mut router, &mut canvas, swatch.x, swatch.y), RouteOutcome::Changed);
        assert_eq!(canvas.current_color(), PALETTE[2]);

        click(&mut router, &mut canvas, 5.0, 5.0);
        assert_eq!(canvas.cell(0, 0), Some(PALETTE[2]));
        let others = canvas
            .grid()
            .cells()
            .filter(|&(col, row, _)| (col, row) != (0, 0))
            .all(|(_, _, color)| color == PixelColor::WHITE);
        assert!(others);
    }

    #[test]
    fn test_green_swatch() {
        let (mut router, mut canvas) = setup();
        let swatch = router.layout().swatch_rect(3).center();
        click(&mut router, &mut canvas, swatch.x, swatch.y);
        click(&mut router, &mut canvas, 0.0, 0.0);
        assert_eq!(canvas.cell(0, 0), Some(PixelColor::GREEN));
    }

    #[test]
    fn test_drag_is_one_undo_unit() {
        let (mut router, mut canvas) = setup();
        router.handle_pointer(
            &mut canvas,
            PointerEvent::Down {
                position: Point::new(10.0, 10.0),
                button: MouseButton::Left,
            },
        );
        for x in [30.0, 50.0, 70.0] {
            router.handle_pointer(&mut canvas, PointerEvent::Move { position: Point::new(x, 10.0) });
        }
        router.handle_pointer(
            &mut canvas,
            PointerEvent::Up {
                position: Point::new(70.0, 10.0),
                button: MouseButton::Left,
            },
        );
        assert_eq!(canvas.grid().count_not(PixelColor::WHITE), 4);

        assert_eq!(press(&mut router, &mut canvas, "z"), RouteOutcome::Changed);
        assert_eq!(canvas.grid().count_not(PixelColor::WHITE), 0);
        assert!(!canvas.can_undo());

        assert_eq!(press(&mut router, &mut canvas, "y"), RouteOutcome::Changed);
        assert_eq!(canvas.grid().count_not(PixelColor::WHITE), 4);
    }

    #[test]
    fn test_move_without_press_does_not_paint() {
        let (mut router, mut canvas) = setup();
        let outcome =
            router.handle_pointer(&mut canvas, PointerEvent::Move { position: Point::new(10.0, 10.0) });
        assert_eq!(outcome, RouteOutcome::Ignored);
        assert_eq!(canvas.grid().count_not(PixelColor::WHITE), 0);
    }

    #[test]
    fn test_drag_into_sidebar_stops_painting() {
        let (mut router, mut canvas) = setup();
        router.handle_pointer(
            &mut canvas,
            PointerEvent::Down {
                position: Point::new(790.0, 10.0),
                button: MouseButton::Left,
            },
        );
        let outcome =
            router.handle_pointer(&mut canvas, PointerEvent::Move { position: Point::new(850.0, 10.0) });
        assert_eq!(outcome, RouteOutcome::Ignored);
        assert_eq!(canvas.grid().count_not(PixelColor::WHITE), 1);
        assert!(router.is_drawing());
    }

    #[test]
    fn test_right_click_ignored() {
        let (mut router, mut canvas) = setup();
        let outcome = router.handle_pointer(
            &mut canvas,
            PointerEvent::Down {
                position: Point::new(10.0, 10.0),
                button: MouseButton::Right,
            },
        );
        assert_eq!(outcome, RouteOutcome::Ignored);
        assert!(!router.is_drawing());
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_brush_buttons() {
        let (mut router, mut canvas) = setup();
        let plus = router.layout().plus_button().center();
        let minus = router.layout().minus_button().center();

        for _ in 0..10 {
            click(&mut router, &mut canvas, plus.x, plus.y);
        }
        assert_eq!(canvas.brush_size().get(), 5);
        for _ in 0..10 {
            click(&mut router, &mut canvas, minus.x, minus.y);
        }
        assert_eq!(canvas.brush_size().get(), 1);
    }

    #[test]
    fn test_sidebar_gap_does_nothing() {
        let (mut router, mut canvas) = setup();
        let color = canvas.current_color();
        assert_eq!(click(&mut router, &mut canvas, 830.0, 105.0), RouteOutcome::Ignored);
        assert_eq!(click(&mut router, &mut canvas, 830.0, 55.0), RouteOutcome::Ignored);
        assert_eq!(canvas.current_color(), color);
        assert_eq!(canvas.brush_size().get(), 1);
    }

    #[test]
    fn test_click_below_last_row_starts_no_stroke() {
        let layout = Layout::new(1000, 610);
        let (cols, rows) = layout.grid_dimensions();
        let mut router = InputRouter::new(layout);
        let mut canvas = Canvas::new(cols, rows);

        let outcome = click(&mut router, &mut canvas, 10.0, 605.0);
        assert_eq!(outcome, RouteOutcome::Ignored);
        assert!(!canvas.can_undo());
    }

    #[test]
    fn test_drag_from_partial_row_is_own_undo_unit() {
        let layout = Layout::new(1000, 610);
        let (cols, rows) = layout.grid_dimensions();
        let mut router = InputRouter::new(layout);
        let mut canvas = Canvas::new(cols, rows);

        click(&mut router, &mut canvas, 10.0, 10.0);
        let after_first = canvas.grid().clone();

        router.handle_pointer(
            &mut canvas,
            PointerEvent::Down {
                position: Point::new(50.0, 605.0),
                button: MouseButton::Left,
            },
        );
        let outcome =
            router.handle_pointer(&mut canvas, PointerEvent::Move { position: Point::new(50.0, 585.0) });
        assert_eq!(outcome, RouteOutcome::Changed);
        router.handle_pointer(&mut canvas, PointerEvent::Move { position: Point::new(70.0, 585.0) });
        router.handle_pointer(
            &mut canvas,
            PointerEvent::Up {
                position: Point::new(70.0, 585.0),
                button: MouseButton::Left,
            },
        );
        assert_eq!(canvas.grid().count_not(PixelColor::WHITE), 3);

        assert_eq!(press(&mut router, &mut canvas, "z"), RouteOutcome::Changed);
        assert_eq!(canvas.grid(), &after_first);

        assert_eq!(press(&mut router, &mut canvas, "z"), RouteOutcome::Changed);
        assert_eq!(canvas.grid().count_not(PixelColor::WHITE), 0);
    }

    #[test]
    fn test_shortcuts() {
        let (mut router, mut canvas) = setup();
        assert_eq!(press(&mut router, &mut canvas, "s"), RouteOutcome::SaveRequested);
        assert_eq!(press(&mut router, &mut canvas, "l"), RouteOutcome::LoadRequested);
        assert_eq!(press(&mut router, &mut canvas, "z"), RouteOutcome::Ignored);

        let outcome = router.handle_key(&mut canvas, KeyEvent::Pressed("s".to_string()));
        assert_eq!(outcome, RouteOutcome::Ignored);
    }

    #[test]
    fn test_resize_event() {
        let (mut router, mut canvas) = setup();
        click(&mut router, &mut canvas, 5.0, 5.0);

        assert_eq!(router.handle_resize(&mut canvas, 1200, 800), RouteOutcome::Changed);
        assert_eq!(canvas.dimensions(), (50, 40));
        assert_eq!(canvas.cell(0, 0), Some(PixelColor::BLACK));

        assert_eq!(router.handle_resize(&mut canvas, 0, 800), RouteOutcome::Ignored);
        assert_eq!(canvas.dimensions(), (50, 40));
    }
}
