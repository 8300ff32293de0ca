//! Router assembly and the state shared by every handler.

use axum::{
    middleware::from_fn_with_state,
    routing::get,
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::database::repository::Store;
use crate::handlers::{public, todos};
use crate::middleware::require_user;
use crate::services::TodoService;

/// Handles shared across requests. Cloning is cheap: every field is a handle
/// onto the same backend.
#[derive(Clone)]
pub struct AppState<S: Store> {
    pub store: S,
    pub todos: TodoService<S::Todos>,
    pub users: S::Users,
}

impl<S: Store> AppState<S> {
    pub fn new(store: S) -> Self {
        Self {
            todos: TodoService::new(store.todos()),
            users: store.users(),
            store,
        }
    }
}

pub fn app<S: Store>(state: AppState<S>, enable_cors: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(public::root))
        .route("/health", get(public::health::<S>))
        // Protected
        .merge(todo_routes(state.clone()))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    }
}

fn todo_routes<S: Store>(state: AppState<S>) -> Router<AppState<S>> {
    Router::new()
        .route(
            "/todos",
            get(todos::todo_list::<S>).post(todos::todo_post::<S>),
        )
        .route(
            "/todos/:id",
            get(todos::todo_get::<S>)
                .patch(todos::todo_patch::<S>)
                .delete(todos::todo_delete::<S>),
        )
        .route_layer(from_fn_with_state(state, require_user::<S>))
}
