//! Named output formatters for [`LunarDate`].
//!
//! A registry maps a name to a rendering function. Registration is
//! install-once: a second registration under a taken name is ignored.

use std::collections::HashMap;
use std::fmt;

use tracing::{debug, warn};

use crate::LunarDate;

/// A rendering function for a converted date.
pub type FormatFn = Box<dyn Fn(&LunarDate) -> String + Send + Sync>;

/// Name to formatter map.
#[derive(Default)]
pub struct FormatterRegistry {
    formatters: HashMap<String, FormatFn>,
}

impl FormatterRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// A registry holding the built-in formatters:
    ///
    /// - `default`: `2023正月初一`
    /// - `stem-branch`: `癸卯年 癸丑月 庚辰日`
    /// - `iso`: `2023-01-01`, with an `L` before the month inside a leap month
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.register("default", LunarDate::format);
        registry.register("stem-branch", |date: &LunarDate| {
            format!(
                "{}年 {}月 {}日",
                date.year_cycle(),
                date.month_cycle(),
                date.day_cycle()
            )
        });
        registry.register("iso", |date: &LunarDate| {
            let leap = if date.is_leap() { "L" } else { "" };
            format!("{:04}-{leap}{:02}-{:02}", date.year(), date.month(), date.day())
        });
        registry
    }

    /// Installs `formatter` under `name`.
    ///
    /// Returns `false`, leaving the existing entry in place, if the name is taken.
    pub fn register<F>(&mut self, name: &str, formatter: F) -> bool
    where
        F: Fn(&LunarDate) -> String + Send + Sync + 'static,
    {
        if self.formatters.contains_key(name) {
            warn!(name, "formatter already registered, ignoring");
            return false;
        }
        debug!(name, "registered formatter");
        self.formatters.insert(name.to_owned(), Box::new(formatter));
        true
    }

    /// Renders `date` with the formatter named `name`, if there is one.
    pub fn render(&self, name: &str, date: &LunarDate) -> Option<String> {
        self.formatters.get(name).map(|formatter| formatter(date))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.formatters.contains_key(name)
    }

    /// Registered names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.formatters.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for FormatterRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormatterRegistry")
            .field("formatters", &self.names())
            .finish()
    }
}
