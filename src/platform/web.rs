//! Browser presenter: canvas drawing plus DOM overlays and counters

use wasm_bindgen::JsCast;
use web_sys::{Document, HtmlElement};

use super::{Presenter, surface_element_ids};
use crate::renderer::CanvasRenderer;
use crate::sim::{FrameSnapshot, Surface};

pub const SOUND_ON_LABEL: &str = "🔊 Sound On";
pub const SOUND_OFF_LABEL: &str = "🔇 Sound Off";

pub struct DomPresenter {
    document: Document,
    renderer: CanvasRenderer,
}

impl DomPresenter {
    pub fn new(document: Document, renderer: CanvasRenderer) -> Self {
        Self { document, renderer }
    }

    fn element(&self, id: &str) -> Option<HtmlElement> {
        let el = self.document.get_element_by_id(id);
        if el.is_none() {
            log::warn!("Missing element #{}", id);
        }
        el?.dyn_into::<HtmlElement>().ok()
    }

    fn set_display(&self, surface: Surface, display: &str) {
        for id in surface_element_ids(surface) {
            if let Some(el) = self.element(id) {
                let _ = el.style().set_property("display", display);
            }
        }
    }

    fn set_text(&self, id: &str, text: &str) {
        if let Some(el) = self.element(id) {
            el.set_text_content(Some(text));
        }
    }
}

impl Presenter for DomPresenter {
    fn render(&mut self, frame: &FrameSnapshot) {
        self.renderer.draw(frame, js_sys::Date::now());
    }

    fn show_surface(&mut self, surface: Surface) {
        self.set_display(surface, "block");
        match surface {
            Surface::Pause => self.set_text("pauseButton", "RESUME"),
            Surface::Controls => self.set_text("pauseButton", "PAUSE"),
            _ => {}
        }
    }

    fn hide_surface(&mut self, surface: Surface) {
        self.set_display(surface, "none");
        if surface == Surface::Pause {
            self.set_text("pauseButton", "PAUSE");
        }
    }

    fn set_counters(&mut self, lives: u32, progress: usize, max_progress: usize) {
        self.set_text("livesCount", &lives.to_string());
        self.set_text("progressCount", &format!("{}/{}", progress, max_progress));
    }

    fn set_sound_label(&mut self, enabled: bool) {
        let label = if enabled { SOUND_ON_LABEL } else { SOUND_OFF_LABEL };
        self.set_text("enableAudio", label);
    }
}
