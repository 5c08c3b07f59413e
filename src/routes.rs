/// The two screens and the login gate in front of them

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Login,
    Extractor,
}

impl Route {
    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Extractor => "/",
        }
    }
}

/// Resolve the screen to show. The extractor is only reachable with the
/// session flag set; everything else lands on the login screen.
pub fn guard(requested: Route, logged_in: bool) -> Route {
    match requested {
        Route::Extractor if !logged_in => Route::Login,
        other => other,
    }
}
