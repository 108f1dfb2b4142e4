use crate::session::Session;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Route {
    Home,
    Login,
    Signup,
    Songs,
    Create,
    SongDetails,
    Settings,
    Payment,
}

impl Route {
    pub fn requires_auth(self) -> bool {
        matches!(self, Route::Songs | Route::SongDetails | Route::Settings | Route::Payment)
    }
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Access {
    Allow,
    RedirectTo(Route),
}

// Checked on every navigation, not just at startup: the session can change
// underneath us (forced sign-out on an expired token).
pub fn can_enter(route: Route, session: &Session) -> Access {
    if route.requires_auth() && !session.is_authenticated() {
        Access::RedirectTo(Route::Login)
    } else {
        Access::Allow
    }
}

// "/" sends signed-in users to their songs and everyone else to the
// anonymous create form
pub fn home_target(session: &Session) -> Route {
    if session.is_authenticated() {
        Route::Songs
    } else {
        Route::Create
    }
}
