use super::add::parse_rating;
use super::context::AppContext;
use super::spinner::Spinner;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use serde_json::json;
use watchlog_core::{all_genres, filter, resolve_details, tracked_copy, TypeCounts, View, ViewFilter};
use watchlog_models::ContentType;

/// Mark a catalog title as watched (or plan it), keeping any rating it already has
pub async fn run_track(
    content_type: ContentType,
    id: &str,
    rating: Option<u8>,
    watchlist: bool,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::load()?;
    let rating = parse_rating(rating)?;
    let mut library = ctx.open_library();

    let tracked = tracked_copy(&library, id, content_type)
        .map_err(|e| eyre!("{}", e.user_message()))?
        .cloned();
    let mut content = match tracked {
        Some(existing) => existing,
        None => {
            let catalog = ctx.catalog()?;
            let spinner = Spinner::start("Loading details...", output.is_human());
            let resolved = resolve_details(&library, &catalog, id, content_type).await;
            spinner.finish();
            resolved.map_err(|e| eyre!("{}", e.user_message()))?
        }
    };
    if rating.is_some() {
        content.rating = rating;
    }

    let title = content.title.clone();
    if watchlist {
        library.add_to_watchlist(content)?;
        output.success(format!("Added '{}' to your watchlist", title));
    } else {
        library.add_to_watched(content)?;
        output.success(format!("Marked '{}' as watched", title));
    }
    Ok(())
}

pub fn run_remove(id: &str, watchlist: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let mut library = ctx.open_library();
    let title = library.get_content_by_id(id).map(|c| c.title.clone());

    let (removed, view) = if watchlist {
        (library.remove_from_watchlist(id), View::Watchlist)
    } else {
        (library.remove_from_watched(id), View::Watched)
    };

    if removed {
        output.success(format!(
            "Removed '{}' from your {} list",
            title.unwrap_or_else(|| id.to_string()),
            view
        ));
    } else {
        output.warn(format!("'{}' is not on your {} list", id, view));
    }
    Ok(())
}

pub fn run_rate(id: &str, rating: u8, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let mut library = ctx.open_library();

    if library.update_rating(id, rating)? {
        output.success(format!("Rated '{}' {}", id, rating));
    } else {
        output.warn(format!("'{}' is not in your library", id));
    }
    Ok(())
}

pub fn run_list(
    watchlist: bool,
    all: bool,
    content_type: Option<ContentType>,
    genre: Option<String>,
    output: &Output,
) -> Result<()> {
    let ctx = AppContext::load()?;
    let library = ctx.open_library();

    let view = if all {
        View::All
    } else if watchlist {
        View::Watchlist
    } else {
        View::Watched
    };

    // Tab counts ignore the type filter so they stay comparable
    let counts = TypeCounts::of(filter(
        library.contents(),
        &ViewFilter {
            view,
            content_type: None,
            genre: genre.clone(),
        },
    ));
    let items = filter(
        library.contents(),
        &ViewFilter {
            view,
            content_type,
            genre,
        },
    );

    if !output.is_human() {
        output.json(&json!({
            "view": view.to_string(),
            "counts": counts,
            "items": items,
        }));
        return Ok(());
    }

    output.info(format!(
        "{}  {}",
        format!("{} ({})", view_title(view), items.len()).bright_cyan().bold(),
        format!("all {} / movies {} / tv {}", counts.all, counts.movies, counts.tv).bright_black()
    ));
    if items.is_empty() {
        output.info(empty_hint(view));
    } else {
        output.contents(&items);
    }
    Ok(())
}

pub fn run_genres(watchlist: bool, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let library = ctx.open_library();
    let view = if watchlist { View::Watchlist } else { View::Watched };

    let genres = all_genres(library.contents().iter().filter(|c| view.includes(c)));

    if !output.is_human() {
        output.json(&json!({ "view": view.to_string(), "genres": genres }));
    } else if genres.is_empty() {
        output.info("No genres yet");
    } else {
        for genre in genres {
            output.info(genre);
        }
    }
    Ok(())
}

fn view_title(view: View) -> &'static str {
    match view {
        View::All => "Library",
        View::Watched => "Watched",
        View::Watchlist => "Watchlist",
    }
}

fn empty_hint(view: View) -> &'static str {
    match view {
        View::Watchlist => "Your watchlist is empty. Add something with 'watchlog add <title> --watchlist'",
        _ => "Nothing here yet. Add something with 'watchlog add <title>'",
    }
}
