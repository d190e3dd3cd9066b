use std::sync::Arc;

use futures::FutureExt;
use futures::StreamExt;
use futures::future::BoxFuture;
use futures::stream::FuturesUnordered;

use crate::backend::CatalogBackend;
use crate::effect::Action;
use crate::effect::Completion;
use crate::effect::Effect;
use crate::mode::SearchQuery;
use crate::notice::Notice;
use crate::session::Session;
use crate::session::Transition;

/// Runs a [`Session`] against a [`CatalogBackend`].
///
/// Effects are started as soon as a transition emits them and may finish in
/// any order; each completion is folded back into the session as it
/// arrives, and the session itself discards the ones that went stale.
pub struct Browser {
    session: Session,
    backend: Arc<dyn CatalogBackend>,
    in_flight: FuturesUnordered<BoxFuture<'static, Completion>>,
    notices: Vec<Notice>,
}

impl Browser {
    /// Starts `session`, issuing its initial catalog and bounds loads.
    pub fn start(session: Session, backend: Arc<dyn CatalogBackend>) -> Self {
        let mut browser = Self {
            session: Session::default(),
            backend,
            in_flight: FuturesUnordered::new(),
            notices: Vec::new(),
        };
        browser.absorb(session.start());
        browser
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn dispatch(&mut self, action: Action) {
        let session = std::mem::take(&mut self.session);
        self.absorb(session.apply(action));
    }

    /// Waits for the next in-flight effect and applies it. Returns `false`
    /// when nothing was pending.
    pub async fn step(&mut self) -> bool {
        let Some(completion) = self.in_flight.next().await else {
            return false;
        };
        let session = std::mem::take(&mut self.session);
        self.absorb(session.complete(completion));
        true
    }

    /// Drives effects until none remain, including follow-ups they trigger.
    pub async fn settle(&mut self) {
        while self.step().await {}
    }

    pub fn in_flight(&self) -> usize {
        self.in_flight.len()
    }

    pub fn take_notices(&mut self) -> Vec<Notice> {
        std::mem::take(&mut self.notices)
    }

    fn absorb(&mut self, transition: Transition) {
        let Transition {
            session,
            effects,
            notice,
        } = transition;
        self.session = session;
        self.notices.extend(notice);
        for effect in effects {
            self.in_flight.push(run_effect(Arc::clone(&self.backend), effect));
        }
    }
}

fn run_effect(backend: Arc<dyn CatalogBackend>, effect: Effect) -> BoxFuture<'static, Completion> {
    async move {
        match effect {
            Effect::LoadCatalog { request } => Completion::CatalogLoaded {
                request,
                result: backend.list_all().await,
            },
            Effect::FetchBounds { category } => Completion::BoundsLoaded {
                category,
                result: backend.bounds(category).await,
            },
            Effect::Search {
                request,
                query,
                page,
            } => {
                let result = match &query {
                    SearchQuery::Keyword(keyword) => {
                        backend.search_by_keyword(keyword, page).await
                    }
                    SearchQuery::Category(category) => {
                        backend.search_by_category(*category, page).await
                    }
                };
                Completion::SearchFinished {
                    request,
                    query,
                    result,
                }
            }
            Effect::Filter {
                request,
                category,
                ranges,
                page,
            } => {
                let result = backend.filter(category, &ranges, page).await;
                Completion::FilterFinished {
                    request,
                    category,
                    ranges,
                    result,
                }
            }
            Effect::Delete { target, id } => {
                let result = backend.delete_listing(target, &id).await;
                Completion::DeleteFinished { target, id, result }
            }
            Effect::Create { category, draft } => Completion::CreateFinished {
                category,
                result: backend.create_listing(category, &draft).await,
            },
        }
    }
    .boxed()
}
