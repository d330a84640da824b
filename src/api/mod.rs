pub(crate) mod errors;
pub(crate) mod extract;
pub(crate) mod handlers;
pub(crate) mod inventory;
pub(crate) mod router;
pub(crate) mod validation;
