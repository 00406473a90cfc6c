//! Interactive session driving the property store
//!
//! This is the presentation layer: it collects raw user input, converts it
//! through the form module, calls the store, and renders results. The store
//! is owned by the session for its whole lifetime and dropped with it;
//! nothing survives a restart.

use std::fmt::Write as _;
use std::io::Write as _;

use anyhow::Result;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;

use crate::error::{InputError, StoreError};
use crate::input::PropertyForm;
use crate::models::PropertyRecord;
use crate::store::PropertyStore;

const NO_PROPERTIES_HINT: &str =
    "No properties available! Please add some properties first using 'add'.";

const HELP: &str = "\
Commands:
  add key=value ...        add a property (quote multi-word values)
                           required: id name location price size rating
                           optional: bedrooms bathrooms description image
  get <id>                 show one property by id
  location <text>          search by location substring
  price <min> <max>        search by inclusive price range
  top <count>              highest-rated properties
  list                     everything added this session
  dump                     session records as JSON
  help                     this text
  quit                     end the session";

/// One parsed line of user input
#[derive(Debug)]
pub enum Command {
    Add(PropertyForm),
    Get(u32),
    Location(String),
    Price { min: i64, max: i64 },
    Top(usize),
    List,
    Dump,
    Help,
    Quit,
}

impl Command {
    /// Parse a raw input line into a command
    pub fn parse(line: &str) -> Result<Self, InputError> {
        let line = line.trim();
        let (word, rest) = match line.split_once(char::is_whitespace) {
            Some((word, rest)) => (word, rest.trim()),
            None => (line, ""),
        };

        match word {
            "add" => Ok(Self::Add(PropertyForm::parse(rest)?)),
            "get" => Ok(Self::Get(parse_number(one_arg("get <id>", rest)?, "id")?)),
            // An empty fragment is legal and matches every record
            "location" => Ok(Self::Location(rest.to_string())),
            "price" => {
                let args: Vec<&str> = rest.split_whitespace().collect();
                let [min, max] = args.as_slice() else {
                    return Err(InputError::Malformed("usage: price <min> <max>".into()));
                };
                Ok(Self::Price {
                    min: parse_number(min, "min")?,
                    max: parse_number(max, "max")?,
                })
            }
            "top" => {
                let count: i64 = parse_number(one_arg("top <count>", rest)?, "count")?;
                // Zero or negative counts are a request for nothing
                Ok(Self::Top(usize::try_from(count).unwrap_or(0)))
            }
            "list" => Ok(Self::List),
            "dump" => Ok(Self::Dump),
            "help" | "?" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(InputError::Malformed(format!(
                "unknown command '{other}' (try 'help')"
            ))),
        }
    }
}

fn one_arg<'a>(usage: &str, rest: &'a str) -> Result<&'a str, InputError> {
    let args: Vec<&str> = rest.split_whitespace().collect();
    match args.as_slice() {
        [arg] => Ok(arg),
        _ => Err(InputError::Malformed(format!("usage: {usage}"))),
    }
}

fn parse_number<T: std::str::FromStr>(raw: &str, field: &'static str) -> Result<T, InputError> {
    raw.parse().map_err(|_| InputError::NotANumber {
        field,
        value: raw.to_string(),
    })
}

/// Interactive session owning the store for its lifetime
pub struct Session {
    store: PropertyStore,
}

impl Session {
    pub fn new(store: PropertyStore) -> Self {
        Self { store }
    }

    /// Run the command loop until quit or end of input
    pub async fn run(mut self) -> Result<()> {
        println!("{HELP}\n");

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("desk> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            if line.trim().is_empty() {
                continue;
            }

            let command = match Command::parse(&line) {
                Ok(command) => command,
                Err(err) => {
                    println!("{err}");
                    continue;
                }
            };
            if !self.dispatch(command)? {
                break;
            }
        }

        info!("Session ended with {} properties", self.store.len());
        Ok(())
    }

    /// Execute one command; returns false when the session should end
    fn dispatch(&mut self, command: Command) -> Result<bool> {
        match command {
            Command::Add(form) => self.handle_add(form),
            Command::Get(id) => {
                if self.hint_if_empty() {
                    return Ok(true);
                }
                match self.store.find_by_id(id) {
                    Some(record) => println!("{}", render_detail(record)),
                    None => println!("Property not found! Please add properties first."),
                }
            }
            Command::Location(fragment) => {
                if self.hint_if_empty() {
                    return Ok(true);
                }
                self.show_results(&self.store.find_by_location(&fragment));
            }
            Command::Price { min, max } => {
                if self.hint_if_empty() {
                    return Ok(true);
                }
                self.show_results(&self.store.find_by_price_range(min, max));
            }
            Command::Top(count) => {
                if self.hint_if_empty() {
                    return Ok(true);
                }
                let ranked = self.store.top_rated(count);
                println!("Showing top {} rated properties", ranked.len());
                for (i, record) in ranked.iter().enumerate() {
                    println!("{}", render_card(i + 1, record));
                }
            }
            Command::List => {
                if self.hint_if_empty() {
                    return Ok(true);
                }
                println!(
                    "Total Properties Added This Session: {}",
                    self.store.len()
                );
                for (i, record) in self.store.records().iter().enumerate() {
                    println!("{}", render_card(i + 1, record));
                }
            }
            Command::Dump => {
                println!("{}", serde_json::to_string_pretty(self.store.records())?);
            }
            Command::Help => println!("{HELP}"),
            Command::Quit => return Ok(false),
        }
        Ok(true)
    }

    fn handle_add(&mut self, form: PropertyForm) {
        let record = match form.into_record() {
            Ok(record) => record,
            Err(err) => {
                println!("{err}");
                return;
            }
        };
        match self.store.add(record) {
            Ok(()) => println!("Property added successfully!"),
            Err(StoreError::DuplicateId(_)) => println!("Property ID already exists!"),
            Err(StoreError::InvalidInput(err)) => println!("{err}"),
        }
    }

    /// Mirror the page's "no properties yet" notice for query sections
    fn hint_if_empty(&self) -> bool {
        if self.store.is_empty() {
            println!("{NO_PROPERTIES_HINT}");
            return true;
        }
        false
    }

    fn show_results(&self, hits: &[&PropertyRecord]) {
        println!("Found {} properties", hits.len());
        for (i, record) in hits.iter().enumerate() {
            println!("{}", render_card(i + 1, record));
        }
    }
}

/// Currency display used on every card: `$4,500,000`
pub(crate) fn format_usd(amount: i64) -> String {
    if amount < 0 {
        return format!("-${}", group_thousands(amount.unsigned_abs()));
    }
    format!("${}", group_thousands(amount.unsigned_abs()))
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

/// Compact numbered card, one per search hit
fn render_card(position: usize, record: &PropertyRecord) -> String {
    let mut card = String::new();
    let _ = writeln!(
        card,
        "{}. {} ({})",
        position,
        record.name,
        format_usd(record.price)
    );
    let _ = writeln!(card, "   {}", record.location);
    let _ = write!(
        card,
        "   {} sqft, ⭐ {}",
        group_thousands(record.size.unsigned_abs().into()),
        record.rating
    );
    match (record.bedrooms, record.bathrooms) {
        (Some(beds), Some(baths)) => {
            let _ = write!(card, ", {beds} bed, {baths} bath");
        }
        (Some(beds), None) => {
            let _ = write!(card, ", {beds} bed");
        }
        (None, Some(baths)) => {
            let _ = write!(card, ", {baths} bath");
        }
        (None, None) => {}
    }
    let _ = write!(card, "\n   ID: {}", record.id);
    card
}

/// Full detail view for `get`
fn render_detail(record: &PropertyRecord) -> String {
    let mut view = String::new();
    let _ = writeln!(view, "{} ({})", record.name, format_usd(record.price));
    let _ = writeln!(view, "Location: {}", record.location);
    let _ = writeln!(
        view,
        "Size: {} sqft",
        group_thousands(record.size.unsigned_abs().into())
    );
    if let Some(beds) = record.bedrooms {
        let _ = writeln!(view, "Bedrooms: {beds}");
    }
    if let Some(baths) = record.bathrooms {
        let _ = writeln!(view, "Bathrooms: {baths}");
    }
    let _ = writeln!(view, "Rating: ⭐ {}", record.rating);
    if !record.description.is_empty() {
        let _ = writeln!(view, "Description: {}", record.description);
    }
    let _ = write!(view, "Image: {}", record.image);
    view
}
