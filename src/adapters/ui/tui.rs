//! Implements InputPort. Inquire-based menus standing in for the web pages.
//!
//! Every protected screen goes through `RouteGuard`; logged-out users are sent to the
//! login prompt and resume at the screen they asked for.

use crate::adapters::ui::spinner;
use crate::domain::validation::{
    LoginForm, MemoryForm, RegisterForm, ReminderForm, password_strength,
};
use crate::domain::{
    DomainError, MemoryQuery, MemoryType, Pagination, ReminderFrequency, ReminderQuery,
    ReminderStatus,
};
use crate::ports::InputPort;
use crate::routing::{GuardDecision, Route, RouteGuard};
use crate::store::{Action, AppState, Store};
use crate::usecases::{AuthService, DashboardService, MemoryService, ReminderService};
use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use inquire::ui::{Color, RenderConfig, Styled};
use inquire::{Confirm, CustomType, InquireError, Password, Select, Text};
use std::fmt;
use std::sync::Arc;
use tracing::debug;

/// Prompt theme used by every inquire prompt.
pub fn apply_theme() {
    let config = RenderConfig::default()
        .with_prompt_prefix(Styled::new("?").with_fg(Color::LightMagenta))
        .with_highlighted_option_prefix(Styled::new("❯").with_fg(Color::LightCyan))
        .with_answered_prompt_prefix(Styled::new("✔").with_fg(Color::LightGreen));
    inquire::set_global_render_config(config);
}

/// Esc / Ctrl-C map to `None` (go back); other prompt failures are errors.
fn answer<T>(result: Result<T, InquireError>) -> Result<Option<T>, DomainError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(InquireError::OperationCanceled | InquireError::OperationInterrupted) => Ok(None),
        Err(e) => Err(DomainError::Ui(e.to_string())),
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MenuItem {
    Open(Route),
    AddMemory,
    AddReminder,
    Logout,
    Quit,
}

impl fmt::Display for MenuItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MenuItem::Open(route) => f.write_str(route.title()),
            MenuItem::AddMemory => f.write_str("Add Memory"),
            MenuItem::AddReminder => f.write_str("Add Reminder"),
            MenuItem::Logout => f.write_str("Logout"),
            MenuItem::Quit => f.write_str("Quit"),
        }
    }
}

fn menu_for(state: &AppState) -> Vec<MenuItem> {
    let mut items = vec![
        MenuItem::Open(Route::Dashboard),
        MenuItem::Open(Route::Memories),
        MenuItem::AddMemory,
        MenuItem::Open(Route::Reminders),
        MenuItem::AddReminder,
        MenuItem::Open(Route::Profile),
    ];
    if state.is_authenticated {
        items.push(MenuItem::Logout);
    } else {
        items.insert(0, MenuItem::Open(Route::Register));
        items.insert(0, MenuItem::Open(Route::Login));
    }
    items.push(MenuItem::Quit);
    items
}

/// Route a menu item is gated by. Add screens live under their list's route.
fn route_of(item: MenuItem) -> Route {
    match item {
        MenuItem::Open(route) => route,
        MenuItem::AddMemory => Route::Memories,
        MenuItem::AddReminder => Route::Reminders,
        MenuItem::Logout | MenuItem::Quit => Route::Home,
    }
}

/// Where to land after a sign-in prompted by the guard. Add screens resume as
/// themselves when the guard sends the user back to the route that gates them.
fn resume_item(requested: MenuItem, from: Route) -> MenuItem {
    let route = RouteGuard::resume_after_login(Some(from));
    if route == route_of(requested) {
        requested
    } else {
        MenuItem::Open(route)
    }
}

/// TUI adapter. Holds the store and the use cases it drives.
pub struct TuiInputPort {
    store: Arc<Store>,
    auth: Arc<AuthService>,
    memories: Arc<MemoryService>,
    reminders: Arc<ReminderService>,
    dashboard: Arc<DashboardService>,
    page_size: u32,
    start: Option<Route>,
}

impl TuiInputPort {
    pub fn new(
        store: Arc<Store>,
        auth: Arc<AuthService>,
        memories: Arc<MemoryService>,
        reminders: Arc<ReminderService>,
        dashboard: Arc<DashboardService>,
        page_size: u32,
    ) -> Self {
        Self {
            store,
            auth,
            memories,
            reminders,
            dashboard,
            page_size,
            start: None,
        }
    }

    /// Open `path` (e.g. `/memories`) right after the session check.
    pub fn with_start_path(mut self, path: &str) -> Self {
        self.start = Some(Route::from_path(path));
        self
    }

    /// Print and clear the shared error/success banners.
    fn flush_banners(&self) {
        let (error, success) = self.store.select(|s| (s.error.clone(), s.success.clone()));
        if let Some(success) = success {
            println!("✔ {}", success);
            self.store.dispatch(Action::ClearSuccess);
        }
        if let Some(error) = error {
            println!("✖ {}", error);
            self.store.dispatch(Action::ClearError);
        }
    }

    /// Returns `false` when the user quits.
    async fn step(&self, pending: &mut Option<MenuItem>) -> Result<bool, DomainError> {
        self.flush_banners();
        let state = self.store.state();

        let item = if let Some(item) = pending.take() {
            item
        } else {
            let greeting = match &state.user {
                Some(user) => format!("MemoryOS · {}", user.display_name()),
                None => "MemoryOS".to_string(),
            };
            match answer(Select::new(&greeting, menu_for(&state)).prompt())? {
                Some(item) => item,
                None => return Ok(false),
            }
        };

        match item {
            MenuItem::Quit => return Ok(false),
            MenuItem::Logout => {
                if self.auth.logout().await.is_ok() {
                    println!("Signed out.");
                }
                return Ok(true);
            }
            _ => {}
        }

        let route = route_of(item);
        match RouteGuard::evaluate(&self.store.state(), route) {
            GuardDecision::Checking => println!("Checking authentication..."),
            GuardDecision::Unauthorized { from, .. } => {
                println!("Please sign in to open {}.", from.title());
                if self.login_view().await? {
                    *pending = Some(resume_item(item, from));
                }
            }
            GuardDecision::Authorized => match item {
                MenuItem::AddMemory => self.add_memory_view().await?,
                MenuItem::AddReminder => self.add_reminder_view().await?,
                MenuItem::Open(Route::Login) => {
                    if self.login_view().await? {
                        *pending = Some(MenuItem::Open(RouteGuard::resume_after_login(None)));
                    }
                }
                MenuItem::Open(Route::Register) => {
                    if self.register_view().await? {
                        *pending = Some(MenuItem::Open(Route::Dashboard));
                    }
                }
                MenuItem::Open(Route::Dashboard) => self.dashboard_view().await,
                MenuItem::Open(Route::Memories) => self.vault_view().await?,
                MenuItem::Open(Route::Reminders) => self.reminders_view().await?,
                MenuItem::Open(Route::Profile) | MenuItem::Open(Route::Subscription) => {
                    self.profile_view().await?
                }
                MenuItem::Open(other) => println!("{}", other.title()),
                MenuItem::Logout | MenuItem::Quit => {}
            },
        }
        Ok(true)
    }

    /// Returns whether a session was established.
    async fn login_view(&self) -> Result<bool, DomainError> {
        let Some(email) = answer(Text::new("Email address:").prompt())? else {
            return Ok(false);
        };
        let Some(password) = answer(
            Password::new("Password:")
                .without_confirmation()
                .prompt(),
        )?
        else {
            return Ok(false);
        };

        let form = LoginForm { email, password };
        match self.auth.login(&form).await {
            Ok(user) => {
                println!("Welcome back, {}!", user.display_name());
                Ok(true)
            }
            Err(DomainError::Validation { message, .. }) => {
                println!("✖ {}", message);
                Ok(false)
            }
            // Remote and transport failures are already in the store's error banner.
            Err(e) => {
                if e.status() == Some(404) {
                    println!("Choose Register from the menu to create an account.");
                }
                Ok(false)
            }
        }
    }

    async fn register_view(&self) -> Result<bool, DomainError> {
        let Some(name) = answer(Text::new("Full name:").prompt())? else {
            return Ok(false);
        };
        let Some(email) = answer(Text::new("Email address:").prompt())? else {
            return Ok(false);
        };
        let Some(password) = answer(
            Password::new("Password:")
                .with_help_message("At least 8 characters with uppercase, lowercase and a number")
                .without_confirmation()
                .prompt(),
        )?
        else {
            return Ok(false);
        };
        println!("Password strength: {}", password_strength(&password));
        let Some(confirm_password) = answer(
            Password::new("Confirm password:")
                .without_confirmation()
                .prompt(),
        )?
        else {
            return Ok(false);
        };

        let form = RegisterForm {
            name,
            email,
            password,
            confirm_password,
        };
        let errors = form.errors();
        if !errors.is_empty() {
            for err in errors {
                println!("✖ {}", err.user_message());
            }
            return Ok(false);
        }
        match self.auth.register(&form).await {
            Ok(user) => {
                println!("Welcome to MemoryOS, {}!", user.display_name());
                Ok(true)
            }
            Err(_) => Ok(false),
        }
    }

    async fn dashboard_view(&self) {
        let pb = spinner("Loading dashboard...");
        let result = self.dashboard.refresh(Utc::now()).await;
        pb.finish_and_clear();
        let Ok(data) = result else {
            return;
        };

        if let Some(stats) = &data.stats {
            println!(
                "Memories: {}  Reminders: {}  Completed today: {}",
                stats.total_memories, stats.total_reminders, stats.completed_today
            );
        }
        println!("Recent memories:");
        if data.recent_memories.is_empty() {
            println!("  (none yet)");
        }
        for m in &data.recent_memories {
            println!("  #{} [{}] {}", m.id, m.memory_type, m.title);
        }
        println!("Upcoming reminders:");
        if data.upcoming_reminders.is_empty() {
            println!("  (nothing scheduled)");
        }
        for r in &data.upcoming_reminders {
            println!(
                "  #{} {} · {}",
                r.id,
                r.title,
                r.trigger_date.format("%Y-%m-%d %H:%M")
            );
        }
    }

    async fn vault_view(&self) -> Result<(), DomainError> {
        let Some(search) = answer(
            Text::new("Search:")
                .with_help_message("Leave empty to show everything")
                .prompt(),
        )?
        else {
            return Ok(());
        };

        let mut type_options = vec!["Any type".to_string()];
        type_options.extend(MemoryType::ALL.iter().map(|t| t.to_string()));
        let Some(type_choice) = answer(Select::new("Type:", type_options).prompt())? else {
            return Ok(());
        };
        let memory_type = MemoryType::ALL
            .into_iter()
            .find(|t| t.to_string() == type_choice);

        let importance_options = vec!["Any", "5", "4", "3", "2", "1"];
        let Some(importance_choice) =
            answer(Select::new("Importance:", importance_options).prompt())?
        else {
            return Ok(());
        };

        let mut query = MemoryQuery {
            page: 1,
            per_page: self.page_size,
            search: Some(search).filter(|s| !s.trim().is_empty()),
            memory_type,
            importance: importance_choice.parse().ok(),
        };

        loop {
            let Ok(pagination) = self.memories.load(&query).await else {
                return Ok(());
            };
            self.print_memories(&pagination);

            let mut actions = Vec::new();
            if pagination.has_prev {
                actions.push("Previous page");
            }
            if pagination.has_next {
                actions.push("Next page");
            }
            actions.extend(["Open memory", "Delete memory", "Back"]);
            match answer(Select::new("Vault:", actions).prompt())? {
                Some("Previous page") => query.page = query.page.saturating_sub(1).max(1),
                Some("Next page") => query.page += 1,
                Some("Open memory") => {
                    if let Some(id) = answer(CustomType::<i64>::new("Memory id:").prompt())? {
                        if let Ok(m) = self.memories.open(id).await {
                            println!("{} [{}] importance {}", m.title, m.memory_type, m.importance_level);
                            println!("{}", m.content.as_deref().unwrap_or(""));
                            if !m.tags.is_empty() {
                                println!("tags: {}", m.tags.join(", "));
                            }
                        }
                    }
                }
                Some("Delete memory") => {
                    if let Some(id) = answer(CustomType::<i64>::new("Memory id:").prompt())? {
                        let sure = answer(
                            Confirm::new("Delete this memory?")
                                .with_default(false)
                                .prompt(),
                        )?;
                        if sure == Some(true) {
                            let _ = self.memories.delete(id).await;
                        }
                    }
                }
                _ => return Ok(()),
            }
            self.flush_banners();
        }
    }

    fn print_memories(&self, pagination: &Pagination) {
        let memories = self.store.select(|s| s.memories.clone());
        if memories.is_empty() {
            println!("No memories found.");
        }
        for m in &memories {
            println!(
                "  #{} {} [{}] {}",
                m.id,
                "★".repeat(m.importance_level.min(5) as usize),
                m.memory_type,
                m.title
            );
        }
        println!(
            "Page {} of {} · {} total",
            pagination.page,
            pagination.pages.max(1),
            pagination.total
        );
    }

    async fn add_memory_view(&self) -> Result<(), DomainError> {
        let Some(title) = answer(Text::new("Title:").prompt())? else {
            return Ok(());
        };
        let Some(content) = answer(Text::new("Content:").prompt())? else {
            return Ok(());
        };
        let Some(memory_type) = answer(Select::new("Type:", MemoryType::ALL.to_vec()).prompt())?
        else {
            return Ok(());
        };
        let Some(importance_level) = answer(
            Select::new("Importance:", vec![1u8, 2, 3, 4, 5])
                .with_starting_cursor(0)
                .prompt(),
        )?
        else {
            return Ok(());
        };
        let tags = answer(
            Text::new("Tags:")
                .with_help_message("Comma separated")
                .prompt(),
        )?
        .unwrap_or_default();

        let mut form = MemoryForm {
            title,
            content,
            memory_type,
            importance_level,
            tags: Vec::new(),
        };
        for tag in tags.split(',') {
            form.add_tag(tag);
        }

        match self.memories.create(form).await {
            Err(DomainError::Validation { message, .. }) => println!("✖ {}", message),
            Ok(m) => debug!(memory_id = m.id, "created from tui"),
            Err(_) => {}
        }
        Ok(())
    }

    async fn reminders_view(&self) -> Result<(), DomainError> {
        let Some(search) = answer(Text::new("Search:").prompt())? else {
            return Ok(());
        };
        let mut status_options = vec!["Any status".to_string()];
        status_options.extend(ReminderStatus::ALL.iter().map(|s| s.to_string()));
        let Some(status_choice) = answer(Select::new("Status:", status_options).prompt())? else {
            return Ok(());
        };
        let mut frequency_options = vec!["Any frequency".to_string()];
        frequency_options.extend(ReminderFrequency::ALL.iter().map(|f| f.to_string()));
        let Some(frequency_choice) =
            answer(Select::new("Frequency:", frequency_options).prompt())?
        else {
            return Ok(());
        };

        let query = ReminderQuery {
            search: Some(search).filter(|s| !s.trim().is_empty()),
            status: ReminderStatus::ALL
                .into_iter()
                .find(|s| s.to_string() == status_choice),
            frequency: ReminderFrequency::ALL
                .into_iter()
                .find(|f| f.to_string() == frequency_choice),
        };

        loop {
            let pb = spinner("Loading reminders...");
            let loaded = self.reminders.load(&query).await;
            pb.finish_and_clear();
            if loaded.is_err() {
                return Ok(());
            }

            let reminders = self.store.select(|s| s.reminders.clone());
            if reminders.is_empty() {
                println!("No reminders found.");
            }
            for r in &reminders {
                let mark = if r.is_completed() { "✔" } else { "•" };
                println!(
                    "  {} #{} {} · {} · {} ({})",
                    mark,
                    r.id,
                    r.title,
                    r.trigger_date.format("%Y-%m-%d %H:%M"),
                    r.frequency,
                    r.status
                );
            }

            let actions = vec!["Toggle complete", "Delete reminder", "Back"];
            match answer(Select::new("Reminders:", actions).prompt())? {
                Some("Toggle complete") => {
                    if let Some(id) = answer(CustomType::<i64>::new("Reminder id:").prompt())? {
                        let _ = self.reminders.toggle_complete(id).await;
                    }
                }
                Some("Delete reminder") => {
                    if let Some(id) = answer(CustomType::<i64>::new("Reminder id:").prompt())? {
                        let _ = self.reminders.delete(id).await;
                    }
                }
                _ => return Ok(()),
            }
            self.flush_banners();
        }
    }

    async fn add_reminder_view(&self) -> Result<(), DomainError> {
        let Some(title) = answer(Text::new("Title:").prompt())? else {
            return Ok(());
        };
        let Some(description) = answer(Text::new("Description:").prompt())? else {
            return Ok(());
        };
        let Some(when) = answer(
            Text::new("When (UTC):")
                .with_help_message("YYYY-MM-DD HH:MM")
                .prompt(),
        )?
        else {
            return Ok(());
        };
        let Some(frequency) =
            answer(Select::new("Frequency:", ReminderFrequency::ALL.to_vec()).prompt())?
        else {
            return Ok(());
        };

        let form = ReminderForm {
            title,
            description,
            trigger_date: NaiveDateTime::parse_from_str(when.trim(), "%Y-%m-%d %H:%M")
                .ok()
                .map(|naive| naive.and_utc()),
            frequency,
            memory_id: None,
        };
        if let Err(DomainError::Validation { message, .. }) =
            self.reminders.create(form, Utc::now()).await
        {
            println!("✖ {}", message);
        }
        Ok(())
    }

    async fn profile_view(&self) -> Result<(), DomainError> {
        let state = self.store.state();
        if let Some(user) = &state.user {
            println!("Name:  {}", user.name.as_deref().unwrap_or("-"));
            println!("Email: {}", user.email);
            if state.is_premium() {
                println!("Plan:  {} ★", state.subscription);
            } else {
                println!("Plan:  {} (upgrade for unlimited memories)", state.subscription);
            }
        }
        let refresh = answer(
            Confirm::new("Refresh session?")
                .with_default(false)
                .prompt(),
        )?;
        if refresh == Some(true) {
            // Failures land in the error banner.
            if self.auth.refresh_session().await.is_ok() {
                println!("Session refreshed.");
            }
        }
        Ok(())
    }
}

#[async_trait]
impl InputPort for TuiInputPort {
    async fn run(&self) -> Result<(), DomainError> {
        let pb = spinner("Checking authentication...");
        let authenticated = self.auth.check_session().await;
        pb.finish_and_clear();
        debug!(authenticated, "session check settled");

        let mut pending = self.start.map(MenuItem::Open);
        while self.step(&mut pending).await? {}
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserProfile;
    use crate::store::reduce;

    #[test]
    fn test_menu_depends_on_session() {
        let logged_out = AppState::default();
        let items = menu_for(&logged_out);
        assert_eq!(items[0], MenuItem::Open(Route::Login));
        assert!(!items.contains(&MenuItem::Logout));

        let user: UserProfile =
            serde_json::from_str(r#"{"id":1,"email":"a@b.com"}"#).unwrap();
        let logged_in = reduce(AppState::default(), Action::LoginSuccess(user));
        let items = menu_for(&logged_in);
        assert!(items.contains(&MenuItem::Logout));
        assert!(!items.contains(&MenuItem::Open(Route::Login)));
    }

    #[test]
    fn test_add_screens_are_gated_by_list_route() {
        assert_eq!(route_of(MenuItem::AddMemory), Route::Memories);
        assert!(route_of(MenuItem::AddReminder).is_protected());
        assert!(!route_of(MenuItem::Quit).is_protected());
    }

    #[test]
    fn test_sign_in_resumes_requested_screen() {
        assert_eq!(
            resume_item(MenuItem::AddMemory, route_of(MenuItem::AddMemory)),
            MenuItem::AddMemory
        );
        assert_eq!(
            resume_item(MenuItem::AddReminder, Route::Reminders),
            MenuItem::AddReminder
        );
        assert_eq!(
            resume_item(MenuItem::Open(Route::Profile), Route::Profile),
            MenuItem::Open(Route::Profile)
        );
        assert_eq!(
            resume_item(MenuItem::Open(Route::Login), Route::Login),
            MenuItem::Open(Route::Dashboard)
        );
    }
}
