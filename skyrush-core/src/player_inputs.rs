// InputSnapshot gets captured from the keyboard/touch layer once per frame
// and handed to the game systems; nothing below this type sees raw events.
// The *_pressed fields are edges (true for the one frame the key went
// down), the rest are held state.
#[derive(Copy, Clone, Default)]
pub struct InputSnapshot {
    pub thrusting: bool,
    pub unlimited_boost: bool,
    pub menu_toggle_pressed: bool,
    pub cancel_pressed: bool,
    pub menu_selection: Option<usize>,
}
