//! HTTP surface for dynamic DNS updates.
//!
//! # Endpoint
//!
//! A single route at the configured path (default `/ddns`). Any method
//! is accepted; only the query string is read:
//!
//! | Param    | Required | Semantics                              |
//! |----------|----------|----------------------------------------|
//! | `type`   | no       | `A` (default) or `AAAA`                |
//! | `domain` | yes      | fully qualified host name              |
//! | `token`  | yes      | security token                         |
//! | `ip`     | yes      | IP literal matching `type`             |
//!
//! # Responses
//!
//! - **200** `Done` — record found and updated.
//! - **400** — the query failed validation; the body names the problem.
//! - **401** `Authentication failed` — wrong security token.
//! - **404** — no matching record, or the lookup itself failed.
//! - **424** — the record was found but the edit failed.
//! - **429** — rate limited; `Retry-After` carries the suggested wait
//!   in whole seconds.

mod api_error;
mod routes;
pub mod server;

pub use routes::router;
pub use server::new;
