pub mod shared {
    pub mod core {
        pub mod clock;
    }
    pub mod infrastructure {
        pub mod key_value_store;
    }
}

pub mod modules {
    pub mod bookmarks {
        pub mod core {
            pub mod bookmarked_job;
            pub mod collections;
            pub mod errors;
            pub mod outcome;
            pub mod sorting;
            pub mod transitions;
            pub mod urgency;
        }
        pub mod store;
        pub mod use_cases {
            pub mod manage_bookmarks {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod transition_application {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
            pub mod list_bookmarks {
                pub mod handler;
                pub mod inbound {
                    pub mod graphql;
                    pub mod http;
                }
            }
        }
        pub mod adapters {
            pub mod inbound {
                pub mod http_responses;
            }
        }
    }
}

pub mod shell;
