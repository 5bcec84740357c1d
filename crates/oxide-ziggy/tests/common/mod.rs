#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};

use oxide_ziggy::{
    ModelRegistry, ParameterDescriptor, Route, RouteGroup, RouteModel, RouteTable,
    StaticUrlResolver, UrlRoutable, Ziggy, ZiggyConfig,
};

pub static USER_BOOTS: AtomicUsize = AtomicUsize::new(0);

/// Keeps the default route key.
pub struct User;

impl UrlRoutable for User {}

impl RouteModel for User {
    const NAME: &'static str = "User";

    fn make() -> Self {
        USER_BOOTS.fetch_add(1, Ordering::SeqCst);
        Self
    }
}

/// Routes by slug.
pub struct Post;

impl UrlRoutable for Post {
    fn route_key_name(&self) -> String {
        "slug".to_string()
    }
}

impl RouteModel for Post {
    const NAME: &'static str = "Post";
    const OVERRIDES_ROUTE_KEY: bool = true;

    fn make() -> Self {
        Self
    }
}

pub fn user_boots() -> usize {
    USER_BOOTS.load(Ordering::SeqCst)
}

pub fn models() -> ModelRegistry {
    ModelRegistry::new().register::<User>().register::<Post>()
}

/// `admin.users`, `admin.posts`, `public.home`.
pub fn admin_router() -> RouteTable {
    RouteTable::new()
        .group(
            RouteGroup::new("/admin")
                .name_prefix("admin.")
                .route(Route::get("/users").name("users"))
                .route(Route::get("/posts").name("posts")),
        )
        .route(Route::get("/").name("public.home"))
}

pub fn blog_router() -> RouteTable {
    RouteTable::new()
        .route(Route::get("/").name("home"))
        .route(Route::get("/_debugbar/open").name("debugbar.openhandler"))
        .route(Route::get("/closure").name("generated::Xk2fQ9"))
        .get("/up")
        .route(
            Route::get("/users/{user}")
                .name("users.show")
                .bind("user", "User"),
        )
        .route(
            Route::get("/users/{user}/posts/{post}")
                .name("users.posts.show")
                .bind("user", "User")
                .bind("post", "Post"),
        )
        .route(
            Route::get("/posts/{post:id}/comments/{comment}")
                .name("posts.comments.show")
                .bind("post", "Post")
                .parameter(ParameterDescriptor::plain("comment")),
        )
        .route(
            Route::get("/teams/{team}")
                .name("teams.show")
                .domain("{account}.example.com")
                .bind("team", "Team"),
        )
}

pub fn urls() -> StaticUrlResolver {
    StaticUrlResolver::new("https://example.com")
}

pub fn ziggy(router: &RouteTable, config: ZiggyConfig) -> Ziggy {
    Ziggy::new(router, &urls(), config)
        .unwrap_or_else(|e| panic!("Failed to read routes: {e}"))
        .with_models(models())
}

pub fn names(ziggy: &Ziggy) -> Vec<String> {
    ziggy
        .snapshot()
        .routes()
        .names()
        .map(str::to_string)
        .collect()
}
