mod cache;
mod clock;
mod envelope;
mod policy;
mod source;

pub use cache::TokenCache;
pub use clock::{Clock, ManualClock, SystemClock};
pub use envelope::TokenSnapshot;
pub use policy::ExpiryPolicy;
pub use source::{TokenGrant, TokenSource};
