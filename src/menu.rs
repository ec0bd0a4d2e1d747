//! Interactive menu
//!
//! A line-oriented loop over a [`Session`]. Input and output are generic so
//! the menu can be driven from tests.

use quote_ripple::config::Config;
use quote_ripple::crawler::Crawler;
use quote_ripple::output::{
    format_crawl_summary, format_report, format_sample, format_search_results,
};
use quote_ripple::Session;
use std::io::{self, BufRead, Write};
use std::ops::RangeInclusive;
use std::path::Path;

const RULE: &str = "============================================================";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Choice {
    Scrape,
    Analyze,
    Sample,
    Search,
    Save,
    Load,
    Exit,
}

impl Choice {
    fn from_number(n: usize) -> Option<Self> {
        match n {
            1 => Some(Self::Scrape),
            2 => Some(Self::Analyze),
            3 => Some(Self::Sample),
            4 => Some(Self::Search),
            5 => Some(Self::Save),
            6 => Some(Self::Load),
            7 => Some(Self::Exit),
            _ => None,
        }
    }
}

pub struct Menu<'a, R, W> {
    input: R,
    output: W,
    config: &'a Config,
    crawler: Crawler,
    session: Session,
}

impl<'a, R: BufRead, W: Write> Menu<'a, R, W> {
    pub fn new(input: R, output: W, config: &'a Config) -> Self {
        Self {
            input,
            output,
            config,
            crawler: Crawler::from_config(config),
            session: Session::new(),
        }
    }

    #[cfg(test)]
    fn session(&self) -> &Session {
        &self.session
    }

    /// Runs until the user exits or input ends
    pub async fn run(&mut self) -> io::Result<()> {
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "           QUOTE-RIPPLE")?;
        writeln!(self.output, "     Quotation harvester")?;
        writeln!(self.output, "{}", RULE)?;

        loop {
            self.show_menu()?;

            let Some(number) = self.read_number("Enter your choice (1-7): ", 1..=7, None)? else {
                break;
            };
            let Some(choice) = Choice::from_number(number) else {
                continue;
            };

            if choice == Choice::Exit {
                writeln!(self.output, "\nThank you for using Quote-Ripple!")?;
                break;
            }

            if !self.dispatch(choice).await? {
                break;
            }

            if self.prompt("\nPress Enter to continue...")?.is_none() {
                break;
            }
        }

        Ok(())
    }

    fn show_menu(&mut self) -> io::Result<()> {
        writeln!(self.output, "\n{}", RULE)?;
        writeln!(self.output, "MAIN MENU")?;
        writeln!(self.output, "{}", RULE)?;
        writeln!(self.output, "1. Scrape quotes from website")?;
        writeln!(self.output, "2. Analyze scraped data")?;
        writeln!(self.output, "3. Display sample quotes")?;
        writeln!(self.output, "4. Search quotes")?;
        writeln!(self.output, "5. Save data to files")?;
        writeln!(self.output, "6. Load data from file")?;
        writeln!(self.output, "7. Exit")?;
        writeln!(self.output)
    }

    /// Performs one action; `false` means input ended mid-action
    async fn dispatch(&mut self, choice: Choice) -> io::Result<bool> {
        match choice {
            Choice::Scrape => {
                let Some(max_pages) =
                    self.read_number("Enter maximum pages to scrape (1-20, default 5): ", 1..=20, Some(5))?
                else {
                    return Ok(false);
                };

                let summary = self
                    .session
                    .scrape(&self.crawler, &self.config.crawler.base_url, max_pages as u32)
                    .await;
                write!(self.output, "\n{}", format_crawl_summary(&summary))?;

                if self.session.is_empty() {
                    writeln!(
                        self.output,
                        "\nNo quotes were scraped. Please check your internet connection."
                    )?;
                } else {
                    writeln!(
                        self.output,
                        "\nSuccessfully scraped {} quotes!",
                        self.session.len()
                    )?;
                }
            }
            Choice::Analyze => {
                if self.require_data("No data to analyze. Please scrape quotes first or load from file.")? {
                    let report = self.session.analyze();
                    write!(self.output, "\n{}", format_report(report.as_ref()))?;
                }
            }
            Choice::Sample => {
                if self.require_data("No quotes available. Please scrape quotes first or load from file.")? {
                    let Some(count) =
                        self.read_number("\nHow many quotes to display (default 5): ", 1..=usize::MAX, Some(5))?
                    else {
                        return Ok(false);
                    };
                    write!(
                        self.output,
                        "\n{}",
                        format_sample(self.session.records(), count)
                    )?;
                }
            }
            Choice::Search => {
                if self.require_data("No quotes available. Please scrape quotes first or load from file.")? {
                    let Some(term) = self.prompt("\nEnter search term: ")? else {
                        return Ok(false);
                    };
                    if term.is_empty() {
                        writeln!(self.output, "Please enter a valid search term.")?;
                    } else {
                        let matches = self.session.search(&term);
                        write!(self.output, "\n{}", format_search_results(&term, &matches))?;
                    }
                }
            }
            Choice::Save => {
                if self.require_data("No data to save. Please scrape quotes first.")? {
                    let directory = Path::new(&self.config.output.directory);
                    match self.session.export(directory) {
                        Ok(files) => {
                            writeln!(self.output, "\nFiles saved:")?;
                            writeln!(self.output, "   - {}", files.csv.display())?;
                            writeln!(self.output, "   - {}", files.json.display())?;
                        }
                        Err(e) => {
                            tracing::error!("Export failed: {}", e);
                            writeln!(self.output, "\nError saving data: {}", e)?;
                        }
                    }
                }
            }
            Choice::Load => {
                let default = self.config.output.load_file.clone();
                let Some(answer) = self.prompt(&format!(
                    "\nEnter filename to load (default: {}): ",
                    default
                ))?
                else {
                    return Ok(false);
                };
                let filename = if answer.is_empty() { default } else { answer };

                let previous = self.session.len();
                match self.session.load(Path::new(&filename)) {
                    Ok(0) if previous > 0 => {
                        tracing::warn!("{} holds no quotes, {} were discarded", filename, previous);
                        writeln!(
                            self.output,
                            "Warning: {} contains no quotes. The {} quotes previously in memory were replaced.",
                            filename, previous
                        )?;
                    }
                    Ok(count) => writeln!(self.output, "Loaded {} quotes from {}", count, filename)?,
                    Err(e) => writeln!(self.output, "Error loading file: {}", e)?,
                }
            }
            Choice::Exit => {}
        }

        Ok(true)
    }

    fn require_data(&mut self, message: &str) -> io::Result<bool> {
        if self.session.is_empty() {
            writeln!(self.output, "\n{}", message)?;
            return Ok(false);
        }
        Ok(true)
    }

    /// Prints `message` and reads one trimmed line; `None` at end of input
    fn prompt(&mut self, message: &str) -> io::Result<Option<String>> {
        write!(self.output, "{}", message)?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Asks until a number within `range` is given
    ///
    /// An empty answer takes `default` when there is one.
    fn read_number(
        &mut self,
        message: &str,
        range: RangeInclusive<usize>,
        default: Option<usize>,
    ) -> io::Result<Option<usize>> {
        loop {
            let Some(answer) = self.prompt(message)? else {
                return Ok(None);
            };

            if answer.is_empty() {
                if let Some(value) = default {
                    return Ok(Some(value));
                }
            }

            match answer.parse::<usize>() {
                Ok(value) if range.contains(&value) => return Ok(Some(value)),
                Ok(_) => writeln!(
                    self.output,
                    "Please enter a number between {} and {}.",
                    range.start(),
                    range.end()
                )?,
                Err(_) => writeln!(self.output, "Please enter a valid number.")?,
            }
        }
    }
}
