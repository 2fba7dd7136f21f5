//! Search box for the pod list.
//!
//! Every change to the query is reported straight away; there is no submit
//! step and no debounce.

/// Placeholder shown while the query is empty.
pub const DEFAULT_PLACEHOLDER: &str = "Search learning pods...";

/// Free-text search input.
pub struct SearchBox<F> {
    query: String,
    placeholder: String,
    on_search: F,
}

impl<F> std::fmt::Debug for SearchBox<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchBox")
            .field("query", &self.query)
            .field("placeholder", &self.placeholder)
            .finish_non_exhaustive()
    }
}

impl<F: FnMut(&str)> SearchBox<F> {
    /// Create an empty search box reporting changes to `on_search`.
    pub fn new(placeholder: impl Into<String>, on_search: F) -> Self {
        Self {
            query: String::new(),
            placeholder: placeholder.into(),
            on_search,
        }
    }

    /// Current query.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// Placeholder text.
    pub fn placeholder(&self) -> &str {
        &self.placeholder
    }

    /// Append a character.
    pub fn insert(&mut self, ch: char) {
        self.query.push(ch);
        self.changed();
    }

    /// Delete the last character. Does nothing on an empty query.
    pub fn backspace(&mut self) {
        if self.query.pop().is_some() {
            self.changed();
        }
    }

    /// Empty the query.
    pub fn clear(&mut self) {
        if !self.query.is_empty() {
            self.query.clear();
            self.changed();
        }
    }

    /// Replace the whole query.
    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
        self.changed();
    }

    fn changed(&mut self) {
        (self.on_search)(&self.query);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn recording_box() -> (SearchBox<impl FnMut(&str)>, Rc<RefCell<Vec<String>>>) {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        let search = SearchBox::new(DEFAULT_PLACEHOLDER, move |q: &str| {
            sink.borrow_mut().push(q.to_string())
        });
        (search, seen)
    }

    #[test]
    fn test_every_keystroke_reported() {
        let (mut search, seen) = recording_box();
        search.insert('r');
        search.insert('u');
        search.insert('s');
        search.backspace();
        assert_eq!(*seen.borrow(), vec!["r", "ru", "rus", "ru"]);
        assert_eq!(search.query(), "ru");
    }

    #[test]
    fn test_backspace_on_empty_is_silent() {
        let (mut search, seen) = recording_box();
        search.backspace();
        search.clear();
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn test_set_query_and_clear() {
        let (mut search, seen) = recording_box();
        search.set_query("async rust");
        search.clear();
        assert_eq!(*seen.borrow(), vec!["async rust", ""]);
        assert_eq!(search.placeholder(), DEFAULT_PLACEHOLDER);
    }
}
