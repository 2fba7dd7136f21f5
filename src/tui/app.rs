//! Search page state, key handling and the terminal event loop.

use std::io::{self, Stdout};
use std::sync::mpsc::{self, Receiver, Sender};
use std::time::{Duration, Instant};

use chrono::{DateTime, Local};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{backend::CrosstermBackend, Terminal};
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::info;

use super::ui;
use crate::actions::{Action, ActionBar};
use crate::config::VidxConfig;
use crate::feedback::{
    Category, FeedbackDraft, FeedbackHost, FeedbackModal, Lifecycle, Scheduler, SubmitError,
    TimerFired, TokioScheduler,
};
use crate::search::SearchBox;

/// Events raised by page widgets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEvent {
    /// The search query changed.
    Search(String),
}

/// A submission received by the page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReceivedFeedback {
    /// When the page received it.
    pub received_at: DateTime<Local>,
    /// The submitted snapshot.
    pub draft: FeedbackDraft,
}

/// The page's side of the feedback modal contract.
#[derive(Debug, Default)]
pub struct PageHost {
    /// Submissions received so far.
    pub received: Vec<ReceivedFeedback>,
    /// Number of completed closes.
    pub closes: usize,
}

impl FeedbackHost for PageHost {
    fn on_submit(&mut self, submission: FeedbackDraft) -> Result<(), SubmitError> {
        info!(
            name = %submission.name,
            category = submission.category.map(Category::value).unwrap_or(""),
            rating = submission.rating.get(),
            "feedback received"
        );
        self.received.push(ReceivedFeedback {
            received_at: Local::now(),
            draft: submission,
        });
        Ok(())
    }

    fn on_close(&mut self) {
        self.closes += 1;
    }
}

/// Which part of the page has keyboard focus when the modal is closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageFocus {
    /// The search box.
    Search,
    /// The action bar.
    Actions,
}

/// Focusable parts of the feedback form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormFocus {
    /// Name input.
    Name,
    /// Email input.
    Email,
    /// Star row.
    Rating,
    /// Category list.
    Category,
    /// Feedback text area.
    Feedback,
    /// Send button.
    Send,
}

impl FormFocus {
    const ORDER: [FormFocus; 6] = [
        FormFocus::Name,
        FormFocus::Email,
        FormFocus::Rating,
        FormFocus::Category,
        FormFocus::Feedback,
        FormFocus::Send,
    ];

    fn next(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + 1) % Self::ORDER.len()]
    }

    fn prev(self) -> Self {
        let i = Self::ORDER.iter().position(|f| *f == self).unwrap_or(0);
        Self::ORDER[(i + Self::ORDER.len() - 1) % Self::ORDER.len()]
    }
}

/// Search box reporting into the page's event channel.
pub type PageSearchBox = SearchBox<Box<dyn FnMut(&str)>>;

/// Everything the page renders, separate from the terminal.
pub struct PageState<S> {
    /// Search input.
    pub search: PageSearchBox,
    /// Action buttons.
    pub actions: ActionBar,
    /// Feedback modal.
    pub modal: FeedbackModal<S, PageHost>,
    /// Keyboard focus outside the modal.
    pub focus: PageFocus,
    /// Keyboard focus inside the modal.
    pub form_focus: FormFocus,
    /// Highlighted entry in the category list.
    pub category_cursor: usize,
    /// Last query reported by the search box.
    pub last_query: String,
    /// One-line status shown in the footer.
    pub status: Option<String>,
    events: Receiver<PageEvent>,
}

impl<S> std::fmt::Debug for PageState<S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PageState")
            .field("search", &self.search)
            .field("focus", &self.focus)
            .field("form_focus", &self.form_focus)
            .field("last_query", &self.last_query)
            .finish_non_exhaustive()
    }
}

impl<S: Scheduler> PageState<S> {
    /// Build the page around a scheduler.
    pub fn new(config: &VidxConfig, scheduler: S) -> Self {
        let (tx, rx): (Sender<PageEvent>, Receiver<PageEvent>) = mpsc::channel();
        let on_search: Box<dyn FnMut(&str)> = Box::new(move |query: &str| {
            // Receiver lives as long as the page.
            let _ = tx.send(PageEvent::Search(query.to_string()));
        });

        Self {
            search: SearchBox::new(config.search.placeholder.clone(), on_search),
            actions: ActionBar::new(),
            modal: FeedbackModal::new(scheduler, PageHost::default(), config.feedback.timing()),
            focus: PageFocus::Search,
            form_focus: FormFocus::Name,
            category_cursor: 0,
            last_query: String::new(),
            status: None,
            events: rx,
        }
    }

    /// Apply queued widget events.
    pub fn drain_events(&mut self) {
        while let Ok(event) = self.events.try_recv() {
            match event {
                PageEvent::Search(query) => {
                    tracing::debug!(%query, "search query changed");
                    self.last_query = query;
                }
            }
        }
    }

    /// Feed an elapsed timer to the modal.
    pub fn handle_timer(&mut self, fired: TimerFired) {
        let before = self.modal.host().received.len();
        self.modal.handle_timer(fired);
        if self.modal.host().received.len() > before {
            self.status = Some("Thanks! Your feedback was sent.".to_string());
        }
    }

    /// Handle a key press. Returns `false` when the page should quit.
    pub fn handle_key(&mut self, key: KeyEvent) -> bool {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        if ctrl && matches!(key.code, KeyCode::Char('c') | KeyCode::Char('q')) {
            return false;
        }

        let keep_running = if self.modal.is_open() {
            self.handle_modal_key(key, ctrl);
            true
        } else {
            self.handle_page_key(key)
        };
        self.drain_events();
        keep_running
    }

    fn handle_page_key(&mut self, key: KeyEvent) -> bool {
        if key.code == KeyCode::Tab || key.code == KeyCode::BackTab {
            self.focus = match self.focus {
                PageFocus::Search => PageFocus::Actions,
                PageFocus::Actions => PageFocus::Search,
            };
            return true;
        }

        match self.focus {
            PageFocus::Search => match key.code {
                KeyCode::Char(c) => self.search.insert(c),
                KeyCode::Backspace => self.search.backspace(),
                KeyCode::Esc => self.search.clear(),
                _ => {}
            },
            PageFocus::Actions => match key.code {
                KeyCode::Left => self.actions.focus_prev(),
                KeyCode::Right => self.actions.focus_next(),
                KeyCode::Enter | KeyCode::Char(' ') => {
                    let action = self.actions.activate();
                    self.run_action(action);
                }
                KeyCode::Char('q') | KeyCode::Esc => return false,
                KeyCode::Char(c) => {
                    if let Some(action) = self.actions.shortcut(c) {
                        self.run_action(action);
                    }
                }
                _ => {}
            },
        }
        true
    }

    fn run_action(&mut self, action: Action) {
        match action {
            Action::CreatePod => {
                info!("create pod requested");
                self.status = Some("Pod creation is handled by the main app.".to_string());
            }
            Action::Feedback => {
                if self.modal.open() {
                    self.form_focus = FormFocus::Name;
                    self.category_cursor = 0;
                    self.status = None;
                }
            }
        }
    }

    fn handle_modal_key(&mut self, key: KeyEvent, ctrl: bool) {
        if key.code == KeyCode::Esc {
            self.modal.close();
            return;
        }
        if self.modal.lifecycle() != Lifecycle::Editing {
            return;
        }
        if ctrl && key.code == KeyCode::Char('s') {
            self.modal.submit();
            return;
        }

        match key.code {
            KeyCode::Tab => {
                self.modal.hover_rating(0);
                self.form_focus = self.form_focus.next();
                return;
            }
            KeyCode::BackTab => {
                self.modal.hover_rating(0);
                self.form_focus = self.form_focus.prev();
                return;
            }
            _ => {}
        }

        match self.form_focus {
            FormFocus::Name => self.edit_text(FormFocus::Name, key.code),
            FormFocus::Email => self.edit_text(FormFocus::Email, key.code),
            FormFocus::Feedback => self.edit_text(FormFocus::Feedback, key.code),
            FormFocus::Rating => self.handle_rating_key(key.code),
            FormFocus::Category => self.handle_category_key(key.code),
            FormFocus::Send => {
                if matches!(key.code, KeyCode::Enter | KeyCode::Char(' ')) {
                    self.modal.submit();
                }
            }
        }
    }

    fn edit_text(&mut self, field: FormFocus, code: KeyCode) {
        let draft = self.modal.form().draft();
        let mut value = match field {
            FormFocus::Name => draft.name.clone(),
            FormFocus::Email => draft.email.clone(),
            _ => draft.feedback_text.clone(),
        };

        match code {
            KeyCode::Char(c) => value.push(c),
            KeyCode::Backspace => {
                value.pop();
            }
            KeyCode::Enter if field == FormFocus::Feedback => value.push('\n'),
            KeyCode::Enter => {
                self.form_focus = field.next();
                return;
            }
            _ => return,
        }

        // Only reachable while editing, so the setters cannot refuse.
        let _ = match field {
            FormFocus::Name => self.modal.set_name(value),
            FormFocus::Email => self.modal.set_email(value),
            _ => self.modal.set_feedback_text(value),
        };
    }

    fn handle_rating_key(&mut self, code: KeyCode) {
        let form = self.modal.form();
        let shown = form.rating_control().effective(form.draft().rating);
        match code {
            KeyCode::Left => self.modal.hover_rating(shown.saturating_sub(1).max(1)),
            KeyCode::Right => self.modal.hover_rating((shown + 1).min(5)),
            KeyCode::Char(c @ '1'..='5') => {
                let _ = self.modal.click_rating(c as u8 - b'0');
            }
            KeyCode::Enter | KeyCode::Char(' ') if shown > 0 => {
                let _ = self.modal.click_rating(shown);
                self.modal.hover_rating(0);
            }
            _ => {}
        }
    }

    fn handle_category_key(&mut self, code: KeyCode) {
        let count = Category::ALL.len();
        match code {
            KeyCode::Up => self.category_cursor = (self.category_cursor + count - 1) % count,
            KeyCode::Down => self.category_cursor = (self.category_cursor + 1) % count,
            KeyCode::Enter | KeyCode::Char(' ') => {
                let _ = self.modal.set_category(Category::ALL[self.category_cursor]);
            }
            _ => {}
        }
    }
}

/// Terminal application hosting the search page.
pub struct PageApp {
    /// Terminal instance.
    terminal: Terminal<CrosstermBackend<Stdout>>,
    /// Timer deliveries from the scheduler.
    timers: UnboundedReceiver<TimerFired>,
    /// Page state.
    state: PageState<TokioScheduler>,
    /// Last tick time.
    last_tick: Instant,
}

impl PageApp {
    /// Set up the terminal and the page.
    pub fn new(config: &VidxConfig, runtime: tokio::runtime::Handle) -> io::Result<Self> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        let (scheduler, timers) = TokioScheduler::new(runtime);

        Ok(Self {
            terminal,
            timers,
            state: PageState::new(config, scheduler),
            last_tick: Instant::now(),
        })
    }

    /// Run the event loop until the user quits.
    pub fn run(&mut self) -> io::Result<()> {
        let tick_rate = Duration::from_millis(50);

        loop {
            let state = &self.state;
            self.terminal.draw(|f| ui::draw(f, state))?;

            let timeout = tick_rate.saturating_sub(self.last_tick.elapsed());
            if event::poll(timeout)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press && !self.state.handle_key(key) {
                        break;
                    }
                }
            }

            while let Ok(fired) = self.timers.try_recv() {
                self.state.handle_timer(fired);
            }

            if self.last_tick.elapsed() >= tick_rate {
                self.last_tick = Instant::now();
            }
        }

        Ok(())
    }

    /// Clean up and restore terminal.
    pub fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(self.terminal.backend_mut(), LeaveAlternateScreen)?;
        self.terminal.show_cursor()?;
        Ok(())
    }
}

impl Drop for PageApp {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}
