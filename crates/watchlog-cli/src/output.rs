use clap::ValueEnum;
use comfy_table::{modifiers, presets, Attribute, Cell, Color, Table};
use owo_colors::OwoColorize;
use serde_json::json;
use watchlog_models::{Content, SearchResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Human,
    Json,
    #[value(name = "json-pretty")]
    JsonPretty,
}

pub struct Output {
    format: OutputFormat,
    quiet: bool,
}

impl Output {
    pub fn new(format: OutputFormat, quiet: bool) -> Self {
        Self { format, quiet }
    }

    pub fn is_human(&self) -> bool {
        self.format == OutputFormat::Human
    }

    pub fn success(&self, msg: impl AsRef<str>) {
        self.message("success", msg.as_ref(), |m| println!("{} {}", "✓".green(), m));
    }

    pub fn error(&self, msg: impl AsRef<str>) {
        // Errors are shown even in quiet mode
        match self.format {
            OutputFormat::Human => eprintln!("{} {}", "✗".red(), msg.as_ref()),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": "error", "message": msg.as_ref() }));
            }
        }
    }

    pub fn info(&self, msg: impl AsRef<str>) {
        self.message("info", msg.as_ref(), |m| println!("{}", m));
    }

    pub fn warn(&self, msg: impl AsRef<str>) {
        self.message("warning", msg.as_ref(), |m| println!("{} {}", "⚠".yellow(), m));
    }

    fn message(&self, kind: &str, msg: &str, human: impl FnOnce(&str)) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => human(msg),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&json!({ "type": kind, "message": msg }));
            }
        }
    }

    pub fn json(&self, data: &serde_json::Value) {
        if self.quiet && self.format != OutputFormat::Human {
            return;
        }
        self.print_json(data);
    }

    fn print_json(&self, data: &serde_json::Value) {
        match self.format {
            OutputFormat::Json => println!("{}", serde_json::to_string(data).unwrap_or_default()),
            OutputFormat::JsonPretty => println!("{}", serde_json::to_string_pretty(data).unwrap_or_default()),
            OutputFormat::Human => println!("{}", data),
        }
    }

    /// Library records as a table, or a JSON array
    pub fn contents(&self, items: &[&Content]) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", content_table(items)),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&serde_json::to_value(items).unwrap_or_default());
            }
        }
    }

    pub fn search_results(&self, results: &[SearchResult]) {
        if self.quiet {
            return;
        }
        match self.format {
            OutputFormat::Human => println!("{}", search_table(results)),
            OutputFormat::Json | OutputFormat::JsonPretty => {
                self.print_json(&serde_json::to_value(results).unwrap_or_default());
            }
        }
    }

    /// One record in full: header line, facts table and overview
    pub fn content_details(&self, content: &Content) {
        if self.quiet {
            return;
        }
        if !self.is_human() {
            self.print_json(&serde_json::to_value(content).unwrap_or_default());
            return;
        }

        println!(
            "\n{} {}",
            content.title.bright_cyan().bold(),
            format!("({})", content.release_year).bright_black()
        );

        let mut table = styled_table();
        table.add_row(vec![Cell::new("ID"), Cell::new(&content.id)]);
        table.add_row(vec![Cell::new("Type"), Cell::new(content.content_type.label())]);
        if let Some(seasons) = content.seasons {
            table.add_row(vec![Cell::new("Seasons"), Cell::new(seasons)]);
        }
        table.add_row(vec![Cell::new("Genres"), Cell::new(genre_list(content))]);
        table.add_row(vec![Cell::new("Status"), Cell::new(status_label(content))]);
        table.add_row(vec![
            Cell::new("Rating"),
            Cell::new(content.rating.map(|r| r.stars()).unwrap_or_else(|| "-".to_string())),
        ]);
        table.add_row(vec![Cell::new("Poster"), Cell::new(&content.poster_url)]);
        println!("{}", table);

        if !content.overview.is_empty() {
            println!("\n{}", content.overview);
        }
    }
}

fn styled_table() -> Table {
    let mut table = Table::new();
    table.load_preset(presets::UTF8_FULL);
    table.apply_modifier(modifiers::UTF8_ROUND_CORNERS);
    table
}

fn header(names: &[&str]) -> Vec<Cell> {
    names
        .iter()
        .map(|name| Cell::new(name).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect()
}

fn genre_list(content: &Content) -> String {
    if content.genre.is_empty() {
        "-".to_string()
    } else {
        content.genre.join(", ")
    }
}

fn status_label(content: &Content) -> &'static str {
    if content.watched {
        "Watched"
    } else if content.watchlist {
        "Watchlist"
    } else {
        "Not tracked"
    }
}

pub fn content_table(items: &[&Content]) -> Table {
    let mut table = styled_table();
    table.set_header(header(&["ID", "Title", "Year", "Type", "Genres", "Rating"]));
    for content in items {
        table.add_row(vec![
            Cell::new(&content.id),
            Cell::new(&content.title),
            Cell::new(&content.release_year),
            Cell::new(content.content_type.label()),
            Cell::new(genre_list(content)),
            Cell::new(content.rating.map(|r| r.stars()).unwrap_or_default()),
        ]);
    }
    table
}

pub fn search_table(results: &[SearchResult]) -> Table {
    let mut table = styled_table();
    table.set_header(header(&["#", "ID", "Title", "Year", "Type"]));
    for (index, result) in results.iter().enumerate() {
        table.add_row(vec![
            Cell::new(index + 1),
            Cell::new(&result.id),
            Cell::new(&result.title),
            Cell::new(&result.release_year),
            Cell::new(result.media_type),
        ]);
    }
    table
}

#[cfg(test)]
mod tests {
    use super::*;
    use watchlog_models::{ContentType, Rating};

    #[test]
    fn test_content_table_lists_every_record() {
        let mut inception = Content::new("27205", "Inception", ContentType::Movie)
            .with_rating(Some(Rating::new(4).unwrap()))
            .with_genres(vec!["Action".to_string(), "Science Fiction".to_string()]);
        inception.watched = true;
        let shogun = Content::new("126308", "Shōgun", ContentType::Tv);

        let rendered = content_table(&[&inception, &shogun]).to_string();
        assert!(rendered.contains("Inception"));
        assert!(rendered.contains("Action, Science Fiction"));
        assert!(rendered.contains("★★★★☆"));
        assert!(rendered.contains("TV Show"));
    }

    #[test]
    fn test_status_label() {
        let mut content = Content::new("1", "Dune", ContentType::Movie);
        assert_eq!(status_label(&content), "Not tracked");
        content.watchlist = true;
        assert_eq!(status_label(&content), "Watchlist");
    }
}
