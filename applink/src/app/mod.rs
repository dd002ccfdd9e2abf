mod router;

pub use router::{AppLink, BeforeHook, Continuation};
