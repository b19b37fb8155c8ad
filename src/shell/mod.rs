// Composition root for the bookmarks service.
//
// Responsibilities
// - Read config from the environment.
// - Pick the KeyValueStore implementation and build the shared BookmarkStore.
// - Expose the store over HTTP routes and a GraphQL schema.
//
// The binary entry point lives in main.rs next to this file.

pub mod config;
pub mod graphql;
pub mod http;
pub mod state;
