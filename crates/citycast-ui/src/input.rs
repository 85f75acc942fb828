//! Search box: a draft value plus an explicit submit.

use citycast_weather::PlaceQuery;

pub struct SearchInput {
    draft: String,
    on_submit: Box<dyn FnMut(PlaceQuery) + Send>,
}

impl SearchInput {
    /// `on_submit` receives every accepted query.
    pub fn new(on_submit: impl FnMut(PlaceQuery) + Send + 'static) -> Self {
        Self {
            draft: String::new(),
            on_submit: Box::new(on_submit),
        }
    }

    /// Replace the draft with the latest edit. Nothing is emitted.
    pub fn set_draft(&mut self, text: &str) {
        self.draft.clear();
        self.draft.push_str(text);
    }

    /// Emit the trimmed draft. Returns false, emitting nothing, when the
    /// draft is blank. The draft is kept either way.
    pub fn submit(&mut self) -> bool {
        match PlaceQuery::parse(&self.draft) {
            Some(query) => {
                tracing::debug!("Submitting {:?}", query.as_str());
                (self.on_submit)(query);
                true
            }
            None => false,
        }
    }
}

impl std::fmt::Debug for SearchInput {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchInput")
            .field("draft", &self.draft)
            .finish_non_exhaustive()
    }
}
