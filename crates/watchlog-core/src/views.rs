use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;
use watchlog_models::{Content, ContentType};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum View {
    All,
    #[default]
    Watched,
    Watchlist,
}

impl View {
    pub fn includes(self, content: &Content) -> bool {
        match self {
            View::All => true,
            View::Watched => content.watched,
            View::Watchlist => content.watchlist,
        }
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            View::All => "all",
            View::Watched => "watched",
            View::Watchlist => "watchlist",
        };
        f.write_str(s)
    }
}

impl FromStr for View {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "all" => Ok(View::All),
            "watched" => Ok(View::Watched),
            "watchlist" => Ok(View::Watchlist),
            _ => Err(format!("Invalid view: {}. Use 'all', 'watched' or 'watchlist'", s)),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ViewFilter {
    pub view: View,
    pub content_type: Option<ContentType>,
    pub genre: Option<String>,
}

impl ViewFilter {
    pub fn matches(&self, content: &Content) -> bool {
        self.view.includes(content)
            && self.content_type.map_or(true, |t| content.content_type == t)
            && self.genre.as_deref().map_or(true, |g| content.has_genre(g))
    }
}

/// Records matching `filter`, in library order
pub fn filter<'a>(items: &'a [Content], filter: &ViewFilter) -> Vec<&'a Content> {
    items.iter().filter(|c| filter.matches(c)).collect()
}

/// Every genre used by `items`, sorted and deduplicated
pub fn all_genres<'a>(items: impl IntoIterator<Item = &'a Content>) -> Vec<String> {
    items
        .into_iter()
        .flat_map(|c| c.genre.iter().cloned())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct TypeCounts {
    pub all: usize,
    pub movies: usize,
    pub tv: usize,
}

impl TypeCounts {
    pub fn of<'a>(items: impl IntoIterator<Item = &'a Content>) -> Self {
        items.into_iter().fold(Self::default(), |mut counts, c| {
            counts.all += 1;
            match c.content_type {
                ContentType::Movie => counts.movies += 1,
                ContentType::Tv => counts.tv += 1,
            }
            counts
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn items() -> Vec<Content> {
        let mut inception = Content::new("1", "Inception", ContentType::Movie)
            .with_genres(vec!["Science Fiction".to_string(), "Action".to_string()]);
        inception.watched = true;

        let mut got = Content::new("2", "Game of Thrones", ContentType::Tv)
            .with_genres(vec!["Drama".to_string(), "Action".to_string()]);
        got.watched = true;

        let mut dune = Content::new("3", "Dune", ContentType::Movie)
            .with_genres(vec!["Science Fiction".to_string()]);
        dune.watchlist = true;

        vec![inception, got, dune]
    }

    #[test]
    fn test_filter_by_view_type_and_genre() {
        let items = items();

        let watched = filter(&items, &ViewFilter::default());
        assert_eq!(watched.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["1", "2"]);

        let scifi_all = filter(
            &items,
            &ViewFilter {
                view: View::All,
                content_type: Some(ContentType::Movie),
                genre: Some("Science Fiction".to_string()),
            },
        );
        assert_eq!(scifi_all.iter().map(|c| c.id.as_str()).collect::<Vec<_>>(), vec!["1", "3"]);

        let watchlist_drama = filter(
            &items,
            &ViewFilter {
                view: View::Watchlist,
                content_type: None,
                genre: Some("Drama".to_string()),
            },
        );
        assert!(watchlist_drama.is_empty());
    }

    #[test]
    fn test_all_genres_sorted_unique() {
        let items = items();
        assert_eq!(
            all_genres(&items),
            vec!["Action".to_string(), "Drama".to_string(), "Science Fiction".to_string()]
        );
        assert!(all_genres(Vec::<Content>::new().iter()).is_empty());
    }

    #[test]
    fn test_type_counts() {
        let items = items();
        assert_eq!(TypeCounts::of(&items), TypeCounts { all: 3, movies: 2, tv: 1 });
    }
}
