use super::context::AppContext;
use super::spinner::Spinner;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use owo_colors::OwoColorize;
use watchlog_catalog::CatalogSource;
use watchlog_core::{resolve_details, tracked_copy};
use watchlog_models::{ContentType, SearchResult};

pub async fn run_search(query: &str, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start(format!("Searching for '{}'...", query), output.is_human());
    let tracked = catalog.search_tracked(query).await;
    spinner.finish();

    // A newer search superseded this one
    if !catalog.is_current(tracked.ticket) {
        return Ok(());
    }

    if tracked.results.is_empty() {
        output.warn(format!("No results for '{}'", query));
        return Ok(());
    }
    output.search_results(&tracked.results);
    Ok(())
}

pub async fn run_popular(content_type: Option<ContentType>, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start("Fetching popular titles...", output.is_human());
    let sections: Vec<(ContentType, Vec<SearchResult>)> = match content_type {
        Some(content_type) => vec![(content_type, catalog.popular(content_type).await)],
        None => {
            let (movies, shows) = futures::join!(
                catalog.popular(ContentType::Movie),
                catalog.popular(ContentType::Tv)
            );
            vec![(ContentType::Movie, movies), (ContentType::Tv, shows)]
        }
    };
    spinner.finish();

    if !output.is_human() {
        let value: serde_json::Map<String, serde_json::Value> = sections
            .into_iter()
            .map(|(content_type, results)| {
                (
                    content_type.as_str().to_string(),
                    serde_json::to_value(results).unwrap_or_default(),
                )
            })
            .collect();
        output.json(&serde_json::Value::Object(value));
        return Ok(());
    }

    for (content_type, results) in sections {
        output.info(format!("\n{}", format!("Popular {}", plural_label(content_type)).bright_cyan().bold()));
        if results.is_empty() {
            output.warn("Nothing available right now");
        } else {
            output.search_results(&results);
        }
    }
    Ok(())
}

pub async fn run_show(content_type: ContentType, id: &str, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let library = ctx.open_library();

    // Tracked titles don't need the catalog (or an API key)
    if let Some(content) = tracked_copy(&library, id, content_type).map_err(|e| eyre!("{}", e.user_message()))? {
        output.content_details(content);
        return Ok(());
    }

    let catalog = ctx.catalog()?;
    let spinner = Spinner::start("Loading details...", output.is_human());
    let resolved = resolve_details(&library, &catalog, id, content_type).await;
    spinner.finish();

    match resolved {
        Ok(content) => {
            output.content_details(&content);
            Ok(())
        }
        Err(e) => Err(eyre!("{}", e.user_message())),
    }
}

fn plural_label(content_type: ContentType) -> &'static str {
    match content_type {
        ContentType::Movie => "Movies",
        ContentType::Tv => "TV Shows",
    }
}
