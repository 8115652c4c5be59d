use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

/// The gallery surface: rendered results, loader, load-more trigger, form.
pub trait GalleryView {
    fn clear_gallery(&mut self);
    fn append_markup(&mut self, markup: &str);
    fn set_loader_visible(&mut self, visible: bool);
    fn set_load_more_visible(&mut self, visible: bool);
    fn reset_form(&mut self);
    /// Smooth-scroll the viewport by a multiple of one rendered item's height.
    /// The view measures the actual pixels, since layout lives there.
    fn scroll_by_items(&mut self, item_heights: u32);
}

/// Fire-and-forget transient message display.
pub trait Notifier {
    fn notify(&mut self, severity: Severity, message: &str, timeout_ms: u32);
}

/// Viewer bound to the rendered image links. Must be told to re-scan after
/// each append.
pub trait Lightbox {
    fn refresh_lightbox(&mut self);
}

/// The single seam the controller drives its collaborators through.
pub trait GalleryUi: GalleryView + Notifier + Lightbox {}

impl<T: GalleryView + Notifier + Lightbox> GalleryUi for T {}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub severity: Severity,
    pub message: String,
    pub timeout_ms: u32,
}

/// Recorded UI effects of one controller operation. This is the response body
/// of the web endpoints; the browser shell replays it against the real DOM.
/// `None` for the visibility fields means "leave as is".
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct UiPlan {
    pub cleared: bool,
    pub fragments: Vec<String>,
    pub loader_visible: Option<bool>,
    pub load_more_visible: Option<bool>,
    pub form_reset: bool,
    pub scroll_items: Option<u32>,
    pub lightbox_refresh: bool,
    pub notices: Vec<Notice>,
}

impl GalleryView for UiPlan {
    fn clear_gallery(&mut self) {
        self.cleared = true;
        self.fragments.clear();
    }

    fn append_markup(&mut self, markup: &str) {
        self.fragments.push(markup.to_string());
    }

    fn set_loader_visible(&mut self, visible: bool) {
        self.loader_visible = Some(visible);
    }

    fn set_load_more_visible(&mut self, visible: bool) {
        self.load_more_visible = Some(visible);
    }

    fn reset_form(&mut self) {
        self.form_reset = true;
    }

    fn scroll_by_items(&mut self, item_heights: u32) {
        self.scroll_items = Some(item_heights);
    }
}

impl Notifier for UiPlan {
    fn notify(&mut self, severity: Severity, message: &str, timeout_ms: u32) {
        self.notices.push(Notice {
            severity,
            message: message.to_string(),
            timeout_ms,
        });
    }
}

impl Lightbox for UiPlan {
    fn refresh_lightbox(&mut self) {
        self.lightbox_refresh = true;
    }
}
