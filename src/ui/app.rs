use crate::animation::{Animator, HighlightSequence, TokenFrame};
use crate::orchestrator::{Effect, Orchestrator, SearchPhase, Status};
use crate::tokens::TokenRow;
use crate::ui::config::Config;
use crate::ui::theme::Theme;
use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use std::path::PathBuf;
use std::time::Instant;

/// Modal text prompts, the terminal stand-in for input dialogs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Prompt {
    ArrayData,
    RandomSize,
}

impl Prompt {
    pub fn title(self) -> &'static str {
        match self {
            Prompt::ArrayData => "Input Array Data",
            Prompt::RandomSize => "Generate Random Data",
        }
    }

    pub fn header(self) -> &'static str {
        match self {
            Prompt::ArrayData => "Enter array elements separated by commas",
            Prompt::RandomSize => "Enter the size of the array",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Prompt::ArrayData => "Array:",
            Prompt::RandomSize => "Size:",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    Normal,
    EditingTarget,
    Prompt(Prompt),
}

pub struct App {
    pub orchestrator: Orchestrator,
    pub animator: Animator,
    pub tokens: TokenRow,
    pub status: Option<Status>,
    pub target_input: String,
    pub prompt_input: String,
    pub mode: InputMode,
    pub theme: Theme,
    pub show_help: bool,
    pub should_quit: bool,
    /// Highlighted token and its frame as of the last tick
    pub highlight: Option<(usize, TokenFrame)>,
    config: Config,
    /// Where theme changes are saved; `None` keeps them in memory only
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(orchestrator: Orchestrator, theme: Theme) -> Self {
        Self {
            orchestrator,
            animator: Animator::default(),
            tokens: TokenRow::default(),
            status: None,
            target_input: String::new(),
            prompt_input: String::new(),
            mode: InputMode::Normal,
            theme,
            show_help: false,
            should_quit: false,
            highlight: None,
            config: Config::default(),
            config_path: None,
        }
    }

    /// Build an app from persisted settings.
    pub fn from_config(config: Config, config_path: Option<PathBuf>) -> Self {
        let theme = Theme::by_name(&config.theme)
            .unwrap_or_else(Theme::default_theme)
            .clone();
        let orchestrator = Orchestrator::new(config.max_random_size);
        let mut app = Self::new(orchestrator, theme);
        app.animator =
            Animator::new(HighlightSequence::standard().with_speed(config.animation_speed));
        app.config = config;
        app.config_path = config_path;
        app
    }

    /// Apply orchestrator effects to the presentation state.
    pub fn apply(&mut self, effects: Vec<Effect>, now: Instant) {
        for effect in effects {
            tracing::debug!(?effect, "apply");
            match effect {
                Effect::Status(status) => self.status = Some(status),
                Effect::ClearStatus => self.status = None,
                Effect::DatasetReplaced => {
                    self.tokens = TokenRow::build(self.orchestrator.dataset());
                    self.animator.invalidate(self.tokens.generation());
                    if !self.animator.is_active() {
                        self.highlight = None;
                    }
                }
                Effect::Highlight(index) => {
                    if self.tokens.get(index).is_some() {
                        self.animator.start(index, self.tokens.generation(), now);
                        self.highlight = self.animator.frame(now);
                    }
                }
            }
        }
    }

    /// Drain finished searches and advance the highlight.
    pub fn tick(&mut self, now: Instant) {
        let effects = self.orchestrator.poll_completed();
        self.apply(effects, now);
        self.highlight = self.animator.frame(now);
    }

    /// Whether the UI loop should redraw at animation frame rate.
    pub fn is_animating(&self) -> bool {
        self.animator.is_active()
            || self.orchestrator.phase() == SearchPhase::Searching
    }

    pub fn search(&mut self) {
        let effects = self.orchestrator.execute_search(&self.target_input);
        self.apply(effects, Instant::now());
    }

    pub fn open_prompt(&mut self, prompt: Prompt) {
        self.prompt_input.clear();
        self.mode = InputMode::Prompt(prompt);
    }

    /// Close the prompt without changing anything, like a dismissed dialog.
    pub fn cancel_prompt(&mut self) {
        self.prompt_input.clear();
        self.mode = InputMode::Normal;
    }

    pub fn submit_prompt(&mut self) {
        let InputMode::Prompt(prompt) = self.mode else {
            return;
        };
        let raw = std::mem::take(&mut self.prompt_input);
        self.mode = InputMode::Normal;

        let effects = match prompt {
            Prompt::ArrayData => self.orchestrator.submit_array(&raw),
            Prompt::RandomSize => self.orchestrator.generate_random(&raw),
        };
        self.apply(effects, Instant::now());
    }

    pub fn reset(&mut self) {
        let effects = self.orchestrator.reset();
        self.target_input.clear();
        self.animator.cancel();
        self.highlight = None;
        self.apply(effects, Instant::now());
    }

    pub fn toggle_help(&mut self) {
        self.show_help = !self.show_help;
    }

    /// Switch to the next built-in theme and persist the choice.
    pub fn cycle_theme(&mut self) {
        self.theme = self.theme.next().clone();
        self.config.theme = self.theme.name.to_string();

        if let Some(path) = &self.config_path {
            if let Err(e) = self.config.save_to(path) {
                tracing::warn!(error = %e, "failed to save theme");
            }
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.show_help {
            if matches!(key.code, KeyCode::Char('?') | KeyCode::Esc) {
                self.toggle_help();
            }
            return;
        }

        match self.mode {
            InputMode::Prompt(_) => match key.code {
                KeyCode::Esc => self.cancel_prompt(),
                KeyCode::Enter => self.submit_prompt(),
                KeyCode::Backspace => {
                    self.prompt_input.pop();
                }
                KeyCode::Char(c) => self.prompt_input.push(c),
                _ => {}
            },
            InputMode::EditingTarget => match key.code {
                KeyCode::Esc => self.mode = InputMode::Normal,
                KeyCode::Enter => {
                    self.mode = InputMode::Normal;
                    self.search();
                }
                KeyCode::Backspace => {
                    self.target_input.pop();
                }
                KeyCode::Char(c) => self.target_input.push(c),
                _ => {}
            },
            InputMode::Normal => match key.code {
                KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
                KeyCode::Char('?') => self.toggle_help(),
                KeyCode::Char('t') => self.mode = InputMode::EditingTarget,
                KeyCode::Char('s') | KeyCode::Enter => self.search(),
                KeyCode::Char('i') => self.open_prompt(Prompt::ArrayData),
                KeyCode::Char('g') => self.open_prompt(Prompt::RandomSize),
                KeyCode::Char('r') => self.reset(),
                KeyCode::Char('T') => self.cycle_theme(),
                _ => {}
            },
        }
    }
}
