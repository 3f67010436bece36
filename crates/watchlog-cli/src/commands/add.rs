use super::context::AppContext;
use super::prompts;
use super::spinner::Spinner;
use crate::output::Output;
use color_eyre::eyre::eyre;
use color_eyre::Result;
use tracing::info;
use watchlog_core::{content_from_selection, manual_content, select_candidates};
use watchlog_models::{Content, ContentType, Rating, SearchResult};

pub struct AddRequest {
    pub title: String,
    pub rating: Option<u8>,
    pub watchlist: bool,
    pub manual: bool,
    pub content_type: Option<ContentType>,
    pub pick: Option<usize>,
}

pub async fn run_add(request: AddRequest, output: &Output) -> Result<()> {
    let ctx = AppContext::load()?;
    let rating = parse_rating(request.rating)?;

    let content = if request.manual {
        manual_entry(&request.title, request.content_type, rating)?
    } else {
        match search_and_choose(&ctx, &request, rating, output).await? {
            Some(content) => content,
            None => return Ok(()),
        }
    };

    let title = content.title.clone();
    let mut library = ctx.open_library();
    if request.watchlist {
        library.add_to_watchlist(content)?;
        output.success(format!("Added '{}' to your watchlist", title));
    } else {
        library.add_to_watched(content)?;
        output.success(format!("Added '{}' to your watched list", title));
    }
    info!(title = %title, watchlist = request.watchlist, "Content added");
    Ok(())
}

pub fn parse_rating(rating: Option<u8>) -> Result<Option<Rating>> {
    rating
        .map(Rating::new)
        .transpose()
        .map_err(|e| eyre!("{}", e))
}

fn manual_entry(title: &str, content_type: Option<ContentType>, rating: Option<Rating>) -> Result<Content> {
    let content_type = content_type.unwrap_or(ContentType::Movie);
    Ok(manual_content(title, content_type, rating)?)
}

/// Search, narrow to trackable candidates and let the user choose one.
/// Returns `None` when the user cancels.
async fn search_and_choose(
    ctx: &AppContext,
    request: &AddRequest,
    rating: Option<Rating>,
    output: &Output,
) -> Result<Option<Content>> {
    let catalog = ctx.catalog()?;

    let spinner = Spinner::start(format!("Searching for '{}'...", request.title), output.is_human());
    let tracked = catalog.search_tracked(&request.title).await;
    spinner.finish();

    if !catalog.is_current(tracked.ticket) {
        return Ok(None);
    }

    let results: Vec<SearchResult> = tracked
        .results
        .into_iter()
        .filter(|r| match request.content_type {
            Some(wanted) => r.media_type.content_type() == Some(wanted),
            None => true,
        })
        .collect();
    let candidates = select_candidates(results, ctx.config.catalog.search_limit);

    if candidates.is_empty() {
        output.warn(format!("No matches found for '{}'", request.title));
        if prompts::is_interactive() && prompts::prompt_yes_no("Add it manually?", true)? {
            let title = prompts::prompt_string("Title", Some(&request.title))?;
            return manual_entry(&title, request.content_type, rating).map(Some);
        }
        return Err(eyre!(
            "Nothing to add. Use --manual to add '{}' without catalog metadata",
            request.title
        ));
    }

    let index = match request.pick {
        Some(n) if (1..=candidates.len()).contains(&n) => n - 1,
        Some(n) => {
            return Err(eyre!(
                "--pick {} is out of range, there are {} match(es)",
                n,
                candidates.len()
            ))
        }
        None if candidates.len() == 1 || !prompts::is_interactive() => {
            if candidates.len() > 1 {
                output.info("Multiple matches, taking the first (use --pick to choose)");
            }
            0
        }
        None => {
            let labels: Vec<String> = candidates.iter().map(candidate_label).collect();
            match prompts::prompt_select("Which one?", &labels)? {
                Some(index) => index,
                None => {
                    output.info("Cancelled");
                    return Ok(None);
                }
            }
        }
    };

    let selected = &candidates[index];
    let spinner = Spinner::start(format!("Fetching details for '{}'...", selected.title), output.is_human());
    let content = content_from_selection(&catalog, selected, rating).await;
    spinner.finish();

    Ok(Some(content?))
}

fn candidate_label(result: &SearchResult) -> String {
    format!("{} ({}) - {}", result.title, result.release_year, result.media_type)
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlog_models::{SearchMediaType, PLACEHOLDER_POSTER};

    #[test]
    fn test_parse_rating() {
        assert_eq!(parse_rating(None).unwrap(), None);
        assert_eq!(parse_rating(Some(3)).unwrap(), Rating::new(3).ok());
        assert!(parse_rating(Some(6)).is_err());
        assert!(parse_rating(Some(0)).is_err());
    }

    #[test]
    fn test_candidate_label() {
        let result = SearchResult {
            id: "27205".to_string(),
            title: "Inception".to_string(),
            poster_url: PLACEHOLDER_POSTER.to_string(),
            release_year: "2010".to_string(),
            media_type: SearchMediaType::Movie,
            overview: String::new(),
            genre_ids: Vec::new(),
        };
        assert_eq!(candidate_label(&result), "Inception (2010) - movie");
    }
}
