//! Use-case services.
//!
//! Each service validates its input, enforces ownership through the store's
//! scoped lookups, and maps persisted records to their public projections.
//! Services are cheap to clone; they share the store through an `Arc`.

mod address;
mod contact;
mod user;

pub use address::AddressService;
pub use contact::ContactService;
pub use user::UserService;
