// Turns per-frame mouse samples into press / move / release events.
// The window only tells us "button is down" and "cursor is here" each frame;
// the star field wants edges.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PointerEvent {
    Press { x: f32, y: f32 },
    Move { x: f32, y: f32 },
    Release,
}

#[derive(Debug, Default)]
pub struct PointerTracker {
    down: bool,
    last: Option<(f32, f32)>,
}

impl PointerTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed one frame's sample. `pos` is `None` when the cursor is outside the window.
    pub fn update(&mut self, down: bool, pos: Option<(f32, f32)>) -> Option<PointerEvent> {
        match (self.down, down) {
            (false, true) => {
                // A press needs a location; wait until the cursor is inside.
                let (x, y) = pos?;
                self.down = true;
                self.last = Some((x, y));
                Some(PointerEvent::Press { x, y })
            }
            (true, true) => {
                let (x, y) = pos?;
                if self.last == Some((x, y)) {
                    return None;
                }
                self.last = Some((x, y));
                Some(PointerEvent::Move { x, y })
            }
            (true, false) => {
                self.down = false;
                self.last = None;
                Some(PointerEvent::Release)
            }
            (false, false) => None,
        }
    }
}
