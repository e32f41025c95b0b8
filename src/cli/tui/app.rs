//! TUI application state and logic

use std::sync::{mpsc, Arc};

use anyhow::Result;
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::rngs::StdRng;
use rand::SeedableRng;

use super::event::{Event, EventHandler};
use super::ui::Terminal;
use super::views;
use crate::decider::{Decider, RollEngine, RollId, RollSettings, TickNotifier, TriggerOutcome};
use crate::domain::{Category, FilterTag, Restaurant, RestaurantId};
use crate::storage::Project;

/// A name + category being typed in
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Draft {
    pub name: String,
    pub category: Category,
}

/// Input mode
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum InputMode {
    #[default]
    Normal,
    Add(Draft),
    Edit(RestaurantId, Draft),
    Confirm(ConfirmAction),
}

/// Confirmation actions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfirmAction {
    Remove(RestaurantId),
}

/// Application state
pub struct App {
    /// Current project
    project: Project,

    /// Restaurants, filters, and the roll in progress
    decider: Decider<StdRng>,

    /// Input mode
    input_mode: InputMode,

    /// Selected restaurant index
    selected: usize,

    /// Status message to display
    status_message: Option<String>,

    /// Whether to quit
    should_quit: bool,
}

impl App {
    /// Create the application for the current project, posting roll ticks
    /// onto the given event queue
    pub fn new(events: mpsc::Sender<Event>) -> Result<Self> {
        let project = Project::open_current()?;
        let notifier: TickNotifier = Arc::new(move |id| events.send(Event::Roll(id)).is_ok());
        let settings = project.config().roll_settings()?;
        Self::with_project(project, notifier, settings, StdRng::from_entropy())
    }

    /// Create the application from explicit parts
    pub fn with_project(
        project: Project,
        notifier: TickNotifier,
        settings: RollSettings,
        rng: StdRng,
    ) -> Result<Self> {
        let restaurants = project.restaurant_store().read_all()?;
        let filters = project.config().project.filters.active.clone();
        let engine = RollEngine::new(rng, settings, notifier);

        Ok(Self {
            project,
            decider: Decider::new(restaurants, filters, engine),
            input_mode: InputMode::Normal,
            selected: 0,
            status_message: None,
            should_quit: false,
        })
    }

    /// Run the main application loop
    pub fn run(&mut self, terminal: &mut Terminal, events: EventHandler) -> Result<()> {
        while !self.should_quit {
            terminal.draw(|frame| views::decider::draw(frame, self))?;

            match events.next()? {
                Event::Key(key) => self.handle_key(key)?,
                Event::Roll(id) => self.handle_roll_tick(id),
                Event::Resize | Event::Tick => {}
            }
        }

        // Leaving mid-roll must not leave the timer running
        self.decider.cancel();
        Ok(())
    }

    /// Advance the roll in progress
    pub fn handle_roll_tick(&mut self, id: RollId) {
        self.decider.on_tick(id);
    }

    /// Handle key events
    pub fn handle_key(&mut self, key: KeyEvent) -> Result<()> {
        // Check for quit first (Ctrl+C anywhere)
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return Ok(());
        }

        match self.input_mode {
            InputMode::Normal => self.handle_normal_key(key),
            InputMode::Add(_) | InputMode::Edit(_, _) => self.handle_draft_key(key),
            InputMode::Confirm(_) => self.handle_confirm_key(key),
        }
    }

    /// Handle keys in normal mode
    fn handle_normal_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('q') | KeyCode::Esc => {
                self.should_quit = true;
            }

            KeyCode::Char('j') | KeyCode::Down => self.move_selection_down(),
            KeyCode::Char('k') | KeyCode::Up => self.move_selection_up(),

            KeyCode::Char(' ') | KeyCode::Enter => self.roll(),

            KeyCode::Char('1') => self.toggle_filter(FilterTag::DineIn)?,
            KeyCode::Char('2') => self.toggle_filter(FilterTag::Takeout)?,
            KeyCode::Char('3') => self.toggle_filter(FilterTag::FastFood)?,

            KeyCode::Char('a') | KeyCode::Char('n') => {
                if self.blocked_while_rolling() {
                    return Ok(());
                }
                self.input_mode = InputMode::Add(Draft::default());
            }
            KeyCode::Char('e') => {
                if self.blocked_while_rolling() {
                    return Ok(());
                }
                if let Some(r) = self.selected_restaurant().cloned() {
                    let draft = Draft {
                        name: r.name,
                        category: r.category,
                    };
                    self.input_mode = InputMode::Edit(r.id, draft);
                }
            }
            KeyCode::Char('x') | KeyCode::Char('d') | KeyCode::Delete => {
                if self.blocked_while_rolling() {
                    return Ok(());
                }
                if let Some(id) = self.selected_restaurant().map(|r| r.id.clone()) {
                    self.input_mode = InputMode::Confirm(ConfirmAction::Remove(id));
                }
            }

            KeyCode::Char('r') => {
                if !self.blocked_while_rolling() {
                    self.refresh_data()?;
                }
            }

            KeyCode::Char('?') => {
                self.status_message = Some(
                    "space:roll 1/2/3:filters j/k:move a:add e:edit x:delete r:reload q:quit"
                        .to_string(),
                );
            }

            _ => {}
        }

        Ok(())
    }

    /// Handle keys while typing a new or edited restaurant
    fn handle_draft_key(&mut self, key: KeyEvent) -> Result<()> {
        let draft = match &mut self.input_mode {
            InputMode::Add(draft) | InputMode::Edit(_, draft) => draft,
            _ => return Ok(()),
        };

        match key.code {
            KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            KeyCode::Tab => {
                draft.category = draft.category.next();
            }
            KeyCode::Backspace => {
                draft.name.pop();
            }
            KeyCode::Char(c) => {
                draft.name.push(c);
            }
            KeyCode::Enter => {
                let mode = std::mem::take(&mut self.input_mode);
                match mode {
                    InputMode::Add(draft) => self.create_restaurant(draft)?,
                    InputMode::Edit(id, draft) => self.update_restaurant(&id, draft)?,
                    _ => {}
                }
            }
            _ => {}
        }

        Ok(())
    }

    /// Handle keys in confirm mode
    fn handle_confirm_key(&mut self, key: KeyEvent) -> Result<()> {
        match key.code {
            KeyCode::Char('y') | KeyCode::Enter => {
                if let InputMode::Confirm(ConfirmAction::Remove(id)) =
                    std::mem::take(&mut self.input_mode)
                {
                    self.remove_restaurant(&id)?;
                }
            }
            KeyCode::Char('n') | KeyCode::Esc => {
                self.input_mode = InputMode::Normal;
            }
            _ => {}
        }

        Ok(())
    }

    /// Sets a status message and returns true if a roll is in progress
    fn blocked_while_rolling(&mut self) -> bool {
        if self.decider.is_rolling() {
            self.status_message = Some("Hold on, still rolling...".to_string());
            true
        } else {
            false
        }
    }

    fn roll(&mut self) {
        match self.decider.trigger() {
            TriggerOutcome::Started(_) => self.status_message = None,
            TriggerOutcome::NoCandidates | TriggerOutcome::AlreadyRolling => {}
        }
    }

    fn toggle_filter(&mut self, tag: FilterTag) -> Result<()> {
        let active = self.decider.toggle_filter(tag);

        self.project.config_mut().project.filters.active = self.decider.filters().clone();
        self.project.config().save_project()?;

        self.status_message = Some(format!(
            "{} {} ({} in the pool)",
            tag,
            if active { "on" } else { "off" },
            self.decider.eligible_count()
        ));
        Ok(())
    }

    fn move_selection_down(&mut self) {
        let len = self.decider.restaurants().len();
        if len > 0 {
            self.selected = (self.selected + 1) % len;
        }
    }

    fn move_selection_up(&mut self) {
        let len = self.decider.restaurants().len();
        if len > 0 {
            self.selected = if self.selected == 0 {
                len - 1
            } else {
                self.selected - 1
            };
        }
    }

    fn create_restaurant(&mut self, draft: Draft) -> Result<()> {
        let user = self.project.config().project.effective_user();
        let restaurant = match Restaurant::new(&draft.name, draft.category) {
            Ok(r) => r.with_added_by(user),
            Err(e) => {
                self.status_message = Some(e.to_string());
                return Ok(());
            }
        };

        self.project.restaurant_store().append(&restaurant)?;
        self.status_message = Some(format!("Added: {}", restaurant.name));

        let mut restaurants = self.decider.restaurants().to_vec();
        restaurants.push(restaurant);
        self.selected = restaurants.len() - 1;
        self.decider.set_restaurants(restaurants);

        Ok(())
    }

    fn update_restaurant(&mut self, id: &RestaurantId, draft: Draft) -> Result<()> {
        let mut restaurants = self.decider.restaurants().to_vec();
        let Some(restaurant) = restaurants.iter_mut().find(|r| &r.id == id) else {
            self.status_message = Some(format!("Restaurant not found: {}", id));
            return Ok(());
        };

        if let Err(e) = restaurant.rename(&draft.name) {
            self.status_message = Some(e.to_string());
            return Ok(());
        }
        restaurant.set_category(draft.category);

        self.project.restaurant_store().update(restaurant)?;
        self.status_message = Some(format!("Updated: {}", restaurant.name));
        self.decider.set_restaurants(restaurants);

        Ok(())
    }

    fn remove_restaurant(&mut self, id: &RestaurantId) -> Result<()> {
        let removed = self.project.restaurant_store().remove(id)?;

        // Clear the result before the name disappears from the list
        self.decider.forget(id);

        let restaurants: Vec<_> = self
            .decider
            .restaurants()
            .iter()
            .filter(|r| &r.id != id)
            .cloned()
            .collect();
        self.decider.set_restaurants(restaurants);

        if self.selected >= self.decider.restaurants().len() {
            self.selected = self.decider.restaurants().len().saturating_sub(1);
        }

        self.status_message = Some(match removed {
            Some(r) => format!("Removed: {}", r.name),
            None => format!("Restaurant not found: {}", id),
        });

        Ok(())
    }

    /// Reload restaurants from disk
    fn refresh_data(&mut self) -> Result<()> {
        let restaurants = self.project.restaurant_store().read_all()?;
        self.decider.set_restaurants(restaurants);

        if self.selected >= self.decider.restaurants().len() {
            self.selected = 0;
        }
        self.status_message = Some("Reloaded".to_string());

        Ok(())
    }

    // Public accessors for views

    pub fn decider(&self) -> &Decider<StdRng> {
        &self.decider
    }

    pub fn selected(&self) -> usize {
        self.selected
    }

    pub fn selected_restaurant(&self) -> Option<&Restaurant> {
        self.decider.restaurants().get(self.selected)
    }

    pub fn input_mode(&self) -> &InputMode {
        &self.input_mode
    }

    pub fn status_message(&self) -> Option<&str> {
        self.status_message.as_deref()
    }
}
