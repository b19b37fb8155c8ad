use async_graphql::{EmptySubscription, MergedObject, Schema};

use crate::modules::bookmarks::use_cases::list_bookmarks::inbound::graphql::{
    ListBookmarksMutation, ListBookmarksQuery,
};
use crate::modules::bookmarks::use_cases::manage_bookmarks::inbound::graphql::{
    ManageBookmarksMutation, ManageBookmarksQuery,
};
use crate::modules::bookmarks::use_cases::transition_application::inbound::graphql::TransitionApplicationMutation;
pub use crate::shell::state::AppState;

#[derive(MergedObject, Default)]
pub struct QueryRoot(ListBookmarksQuery, ManageBookmarksQuery);

#[derive(MergedObject, Default)]
pub struct MutationRoot(
    ManageBookmarksMutation,
    TransitionApplicationMutation,
    ListBookmarksMutation,
);

pub type AppSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(state: AppState) -> AppSchema {
    Schema::build(
        QueryRoot::default(),
        MutationRoot::default(),
        EmptySubscription,
    )
    .data(state)
    .finish()
}
