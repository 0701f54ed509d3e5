mod forward;
mod headers;
mod server;

pub use forward::{RelayError, forward, relay_response};
pub use headers::translate_headers;
pub use server::{
    AppState, IMPRESSIONS_COUNT_PATH, IMPRESSIONS_PATH, RelayServer, SAMPLE_PATH, create_router,
};
