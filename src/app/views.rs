//! Mounted views and the resources they own.
//!
//! A view is created when its route mounts and dropped when the route is
//! left; dropping a view drops its fetchers, which cancels their requests.

use std::sync::Arc;

use parking_lot::Mutex;
use tokio::sync::watch;
use tokio::task::AbortHandle;

use super::Services;
use crate::config::ApiConfig;
use crate::fetch::{FetchState, ResourceFetcher};
use crate::model::{Comment, Post};
use crate::nav::Route;
use crate::storage::PersistentValue;

/// Store key holding the number of quests last seen on the board.
pub const QUEST_COUNT_KEY: &str = "questCount";

pub enum View {
    Login,
    Dashboard(DashboardView),
    PostDetail(PostDetailView),
    About,
}

impl View {
    pub(super) fn mount(services: &Services, route: &Route) -> Self {
        tracing::debug!(route = %route, "Mounting view");
        match route {
            Route::Login => View::Login,
            Route::Dashboard => View::Dashboard(DashboardView::mount(services)),
            Route::PostDetail { post_id } => {
                View::PostDetail(PostDetailView::mount(services, post_id))
            }
            Route::About => View::About,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            View::Login => "login",
            View::Dashboard(_) => "dashboard",
            View::PostDetail(_) => "post_detail",
            View::About => "about",
        }
    }
}

type QuestCount = Arc<Mutex<PersistentValue<u64>>>;

/// Quest board: every post, plus the persisted quest count.
///
/// A recorder task watches the posts and writes the count through as soon
/// as they load; it lives exactly as long as the view.
pub struct DashboardView {
    posts: ResourceFetcher<Vec<Post>>,
    quest_count: QuestCount,
    recorder: AbortHandle,
}

impl DashboardView {
    fn mount(services: &Services) -> Self {
        let posts = ResourceFetcher::new(services.transport.clone());
        let quest_count = Arc::new(Mutex::new(PersistentValue::open(
            services.store.clone(),
            QUEST_COUNT_KEY,
            0,
        )));
        let recorder = tokio::spawn(record_quest_count(
            posts.subscribe(),
            Arc::clone(&quest_count),
        ))
        .abort_handle();

        posts.observe(Some(&services.api.url("posts")));
        Self {
            posts,
            quest_count,
            recorder,
        }
    }

    pub fn posts(&self) -> FetchState<Vec<Post>> {
        self.posts.state()
    }

    pub fn quest_count(&self) -> u64 {
        *self.quest_count.lock().get()
    }

    pub fn retry(&self) {
        self.posts.refetch();
    }

    /// Wait for the posts request to settle. The count is recorded here too,
    /// so it is in the store when this returns.
    pub async fn settle(&self) {
        let posts = self.posts.settled().await;
        store_quest_count(&self.quest_count, &posts);
    }
}

impl Drop for DashboardView {
    fn drop(&mut self) {
        self.recorder.abort();
    }
}

async fn record_quest_count(
    mut posts: watch::Receiver<FetchState<Vec<Post>>>,
    quest_count: QuestCount,
) {
    loop {
        let state = posts.borrow_and_update().clone();
        store_quest_count(&quest_count, &state);
        if posts.changed().await.is_err() {
            return;
        }
    }
}

fn store_quest_count(quest_count: &QuestCount, posts: &FetchState<Vec<Post>>) {
    let Some(posts) = posts.data() else {
        return;
    };
    let count = posts.len() as u64;
    let mut quest_count = quest_count.lock();
    if *quest_count.get() != count {
        quest_count.set(count);
    }
}

/// One post and its comments, fetched independently.
pub struct PostDetailView {
    post_id: String,
    post: ResourceFetcher<Post>,
    comments: ResourceFetcher<Vec<Comment>>,
}

impl PostDetailView {
    fn mount(services: &Services, post_id: &str) -> Self {
        let view = Self {
            post_id: post_id.to_string(),
            post: ResourceFetcher::new(services.transport.clone()),
            comments: ResourceFetcher::new(services.transport.clone()),
        };
        view.observe(&services.api);
        view
    }

    /// Switch the mounted view to another post. Requests for the
    /// previous post are superseded.
    pub(super) fn show(&mut self, api: &ApiConfig, post_id: &str) {
        if self.post_id != post_id {
            self.post_id = post_id.to_string();
            self.observe(api);
        }
    }

    fn observe(&self, api: &ApiConfig) {
        self.post
            .observe(Some(&api.url(&format!("posts/{}", self.post_id))));
        self.comments
            .observe(Some(&api.url(&format!("posts/{}/comments", self.post_id))));
    }

    pub fn post_id(&self) -> &str {
        &self.post_id
    }

    pub fn post(&self) -> FetchState<Post> {
        self.post.state()
    }

    pub fn comments(&self) -> FetchState<Vec<Comment>> {
        self.comments.state()
    }

    pub fn retry(&self) {
        self.post.refetch();
        self.comments.refetch();
    }

    pub async fn settle(&self) {
        tokio::join!(self.post.settled(), self.comments.settled());
    }
}
