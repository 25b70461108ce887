/// Keys the viewer reacts to, captured once per frame.
#[derive(Clone, Copy, Debug, Default)]
pub(super) struct InputSnapshot {
    pub escape: bool,
    pub arrow_left: bool,
    pub arrow_right: bool,
    pub zoom_in: bool,
    pub zoom_out: bool,
}

impl InputSnapshot {
    pub(super) fn capture(ctx: &egui::Context) -> Self {
        ctx.input(|i| {
            let command = i.modifiers.command || i.modifiers.ctrl;
            Self {
                escape: i.key_pressed(egui::Key::Escape),
                arrow_left: i.key_pressed(egui::Key::ArrowLeft),
                arrow_right: i.key_pressed(egui::Key::ArrowRight),
                zoom_in: command
                    && (i.key_pressed(egui::Key::Plus) || i.key_pressed(egui::Key::Equals)),
                zoom_out: command && i.key_pressed(egui::Key::Minus),
            }
        })
    }
}
