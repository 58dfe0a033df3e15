use neurolabel_core::protocol::HistoryEntry;

/// Image currently shown on the canvas.
#[derive(Clone, Debug)]
pub struct CurrentImage {
    pub id: i64,
    pub filename: String,
}

/// Overall UI state.
#[derive(Default)]
pub struct UIState {
    pub current: Option<CurrentImage>,
    /// Send the "enhance" flag with the next detect request.
    pub enhance: bool,
    pub history: Vec<HistoryEntry>,

    /// Blocking error notification; `None` when dismissed.
    pub error: Option<String>,

    /// Log messages.
    pub log_messages: Vec<String>,

    pub show_about: bool,
}

impl UIState {
    pub fn add_log(&mut self, msg: String) {
        self.log_messages.push(msg);
    }

    pub fn current_id(&self) -> Option<i64> {
        self.current.as_ref().map(|c| c.id)
    }
}

/// Texture of the open image.
#[derive(Default)]
pub struct ViewportState {
    pub texture: Option<egui::TextureHandle>,
}
