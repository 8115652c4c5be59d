use crate::error::AppError;
use crate::render;
use crate::search::ImageSearcher;
use crate::session::{self, SearchSession};
use crate::view::{GalleryUi, Severity};
use std::sync::Arc;

const NOTICE_TIMEOUT_MS: u32 = 2000;
const LOAD_MORE_SCROLL_ITEMS: u32 = 2;

const MSG_EMPTY_QUERY: &str =
    "Sorry, there are no images matching your search query. Please try again!";
const MSG_INVALID_PARAMS: &str = "Search params is not valid";
const MSG_RATE_LIMITED: &str = "Too many requests";
const MSG_NO_IMAGES: &str = "Sorry, there are no images for this query";
const MSG_END_OF_RESULTS: &str =
    "We are sorry, but you have reached the end of search results.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    /// No session.
    Idle,
    /// A fetch in flight.
    Loading,
    /// Session populated, not fetching.
    Ready,
}

/// What a controller operation amounted to. Every user-visible consequence has
/// already been delivered through the collaborators; this is for callers and
/// tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchOutcome {
    /// Results fetched and handed to the view.
    Rendered { appended: usize },
    /// Whitespace-only query, rejected before any fetch.
    EmptyQuery,
    /// The provider answered but reported zero matches.
    NoResults,
    /// The fetch failed; the error was converted to a notification.
    Failed,
    /// Pagination ran past the last page; the terminal notification fired.
    Exhausted,
    /// Nothing to do (no session, or results already exhausted).
    Ignored,
}

/// What the user is told when an operation comes up empty-handed.
fn error_message(err: &AppError) -> &'static str {
    match err {
        AppError::EmptyQuery => MSG_EMPTY_QUERY,
        AppError::RateLimited => MSG_RATE_LIMITED,
        _ => MSG_NO_IMAGES,
    }
}

/// Coordinates search submission, page advancement and end-of-results
/// detection. Owns the session; talks to the UI only through the
/// [`GalleryUi`] seam.
pub struct GalleryController {
    searcher: Arc<dyn ImageSearcher>,
    session: Option<SearchSession>,
    state: ControllerState,
}

impl GalleryController {
    pub fn new(searcher: Arc<dyn ImageSearcher>) -> Self {
        Self {
            searcher,
            session: None,
            state: ControllerState::Idle,
        }
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn session(&self) -> Option<&SearchSession> {
        self.session.as_ref()
    }

    /// Start a fresh search. Clears whatever is rendered, validates the query,
    /// fetches page 1 and sets up pagination.
    pub async fn submit_search(
        &mut self,
        raw_query: &str,
        ui: &mut dyn GalleryUi,
    ) -> SearchOutcome {
        ui.clear_gallery();
        ui.set_load_more_visible(false);

        let query = raw_query.trim();
        if query.is_empty() {
            let err = AppError::EmptyQuery;
            log::debug!("Rejecting search: {}", err);
            ui.notify(Severity::Warning, error_message(&err), NOTICE_TIMEOUT_MS);
            ui.clear_gallery();
            ui.reset_form();
            ui.set_load_more_visible(false);
            self.session = None;
            self.state = ControllerState::Idle;
            return SearchOutcome::EmptyQuery;
        }

        ui.clear_gallery();
        ui.set_loader_visible(true);
        self.state = ControllerState::Loading;
        log::info!("Searching for '{}'", query);

        let outcome = match self.searcher.search_images(query, 1).await {
            Err(err) => {
                log::warn!("Search for '{}' failed: {}", query, err);
                ui.notify(Severity::Error, error_message(&err), NOTICE_TIMEOUT_MS);
                self.session = None;
                self.state = ControllerState::Idle;
                SearchOutcome::Failed
            }
            Ok(page) if page.total == 0 => {
                log::info!("No matches for '{}'", query);
                ui.notify(Severity::Error, MSG_INVALID_PARAMS, NOTICE_TIMEOUT_MS);
                ui.set_load_more_visible(false);
                self.session = None;
                self.state = ControllerState::Idle;
                SearchOutcome::NoResults
            }
            Ok(page) => {
                ui.append_markup(&render::gallery_markup(&page.items));
                ui.refresh_lightbox();

                let mut new_session = SearchSession::new(query);
                new_session.total_pages =
                    session::total_pages(page.total_hits, self.searcher.per_page());
                if new_session.total_pages > 1 {
                    ui.set_load_more_visible(true);
                }
                log::debug!(
                    "Rendered page 1 of {} for '{}' ({} items)",
                    new_session.total_pages,
                    query,
                    page.items.len()
                );
                let appended = page.items.len();
                self.session = Some(new_session);
                self.state = ControllerState::Ready;
                SearchOutcome::Rendered { appended }
            }
        };

        ui.reset_form();
        ui.set_loader_visible(false);
        outcome
    }

    /// Fetch and append the next page. The page counter is advanced before the
    /// fetch and is not rolled back on failure.
    pub async fn load_more(&mut self, ui: &mut dyn GalleryUi) -> SearchOutcome {
        let (query, page) = match self.session.as_mut() {
            None => {
                log::debug!("Load more ignored: no active session");
                return SearchOutcome::Ignored;
            }
            Some(session) if session.exhausted() => {
                log::debug!("Load more ignored: results already exhausted");
                return SearchOutcome::Ignored;
            }
            Some(session) => (session.query.clone(), session.advance_page()),
        };

        self.state = ControllerState::Loading;
        log::info!("Loading page {} for '{}'", page, query);

        let outcome = match self.searcher.search_images(&query, page).await {
            Err(err) => {
                log::warn!("Loading page {} for '{}' failed: {}", page, query, err);
                ui.notify(Severity::Error, MSG_INVALID_PARAMS, NOTICE_TIMEOUT_MS);
                SearchOutcome::Failed
            }
            Ok(result) => {
                ui.append_markup(&render::gallery_markup(&result.items));
                ui.refresh_lightbox();
                ui.scroll_by_items(LOAD_MORE_SCROLL_ITEMS);

                let exhausted = self
                    .session
                    .as_ref()
                    .map_or(false, |session| session.exhausted());
                if exhausted {
                    log::info!("Reached the end of results for '{}'", query);
                    ui.set_load_more_visible(false);
                    ui.notify(Severity::Error, MSG_END_OF_RESULTS, NOTICE_TIMEOUT_MS);
                    SearchOutcome::Exhausted
                } else {
                    SearchOutcome::Rendered {
                        appended: result.items.len(),
                    }
                }
            }
        };

        self.state = ControllerState::Ready;
        outcome
    }
}
