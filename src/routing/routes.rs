//! Route table. Public routes render for anyone; protected ones go through the guard.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Home,
    Login,
    Register,
    Dashboard,
    Memories,
    Reminders,
    Profile,
    Subscription,
    NotFound,
}

impl Route {
    pub const ALL: [Route; 8] = [
        Route::Home,
        Route::Login,
        Route::Register,
        Route::Dashboard,
        Route::Memories,
        Route::Reminders,
        Route::Profile,
        Route::Subscription,
    ];

    pub fn path(&self) -> &'static str {
        match self {
            Route::Home => "/",
            Route::Login => "/login",
            Route::Register => "/register",
            Route::Dashboard => "/dashboard",
            Route::Memories => "/memories",
            Route::Reminders => "/reminders",
            Route::Profile => "/profile",
            Route::Subscription => "/subscription",
            Route::NotFound => "*",
        }
    }

    /// Exact path match; anything else is `NotFound`.
    pub fn from_path(path: &str) -> Route {
        let path = path.split(['?', '#']).next().unwrap_or(path);
        let path = if path.len() > 1 {
            path.trim_end_matches('/')
        } else {
            path
        };
        Route::ALL
            .into_iter()
            .find(|r| r.path() == path)
            .unwrap_or(Route::NotFound)
    }

    pub fn is_protected(&self) -> bool {
        matches!(
            self,
            Route::Dashboard
                | Route::Memories
                | Route::Reminders
                | Route::Profile
                | Route::Subscription
        )
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::Login => "Login",
            Route::Register => "Register",
            Route::Dashboard => "Dashboard",
            Route::Memories => "Memory Vault",
            Route::Reminders => "Reminders",
            Route::Profile => "Profile",
            Route::Subscription => "Subscription",
            Route::NotFound => "404 - Page Not Found",
        }
    }
}

impl std::fmt::Display for Route {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.path())
    }
}
