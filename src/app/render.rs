//! Plain-text rendering of the mounted view.

use super::views::{DashboardView, PostDetailView, View};
use super::App;
use crate::fetch::FetchState;
use crate::nav::Route;

/// How many comments the detail page lists.
const MAX_COMMENTS: usize = 5;

pub fn render(app: &App) -> String {
    let mut lines = Vec::new();
    header(app, &mut lines);
    lines.push(String::new());

    match app.view() {
        View::Login => {
            lines.push("BlogDash - Chronicle Your Adventures".to_string());
            lines.push("Log in with a hero name to begin your quest.".to_string());
        }
        View::Dashboard(view) => dashboard(view, &mut lines),
        View::PostDetail(view) => post_detail(view, &mut lines),
        View::About => {
            lines.push("The Legend of BlogDash".to_string());
            lines.push("A quest board for the posts of the realm.".to_string());
        }
    }

    lines.join("\n")
}

fn header(app: &App, lines: &mut Vec<String>) {
    let ctx = app.context();
    lines.push(format!("[{}] theme: {}", app.route(), ctx.theme()));
    if let Some(hero) = ctx.session().identity() {
        lines.push(format!(
            "{} - level {} {} | {} xp | {} gold | {} quests",
            hero.name,
            hero.level,
            hero.class,
            hero.experience,
            hero.currency,
            app.quest_count()
        ));
    }
}

/// Shared pending/error handling. Returns the data when there is some.
fn settled<'a, T>(
    state: &'a FetchState<T>,
    loading: &str,
    failure: &str,
    lines: &mut Vec<String>,
) -> Option<&'a T> {
    match state {
        FetchState::Idle => None,
        FetchState::Pending { .. } => {
            lines.push(loading.to_string());
            None
        }
        FetchState::Error { error, .. } => {
            lines.push(failure.to_string());
            lines.push(format!("Error: {}", error));
            lines.push("Retry to summon the scrolls again.".to_string());
            None
        }
        FetchState::Success { data, .. } => Some(data),
    }
}

fn dashboard(view: &DashboardView, lines: &mut Vec<String>) {
    let state = view.posts();
    let Some(posts) = settled(
        &state,
        "Gathering quests from the realm...",
        "Quest Board Unavailable",
        lines,
    ) else {
        return;
    };

    lines.push(format!("Quest Board ({} quests)", posts.len()));
    for post in posts {
        lines.push(format!("  #{:<4} {}", post.id, post.title));
    }
}

fn post_detail(view: &PostDetailView, lines: &mut Vec<String>) {
    let state = view.post();
    let Some(post) = settled(
        &state,
        "Unrolling the ancient scroll...",
        "Quest Not Found",
        lines,
    ) else {
        return;
    };

    lines.push(format!("Quest #{}: {}", view.post_id(), post.title));
    lines.push(String::new());
    lines.push(post.body.clone());

    if let Some(comments) = view.comments().data() {
        if !comments.is_empty() {
            lines.push(String::new());
            lines.push(format!("Fellow Adventurers' Notes ({})", comments.len()));
            for comment in comments.iter().take(MAX_COMMENTS) {
                lines.push(format!("  {} <{}>: {}", comment.name, comment.email, comment.body));
            }
        }
    }

    if let Ok(id) = view.post_id().parse::<u64>() {
        let related: Vec<String> = (1..=3)
            .map(|offset| {
                Route::PostDetail {
                    post_id: ((id % 100 + offset) % 100).max(1).to_string(),
                }
                .path()
            })
            .collect();
        lines.push(String::new());
        lines.push(format!("Related quests: {}", related.join(", ")));
    }
}
