pub(crate) mod inventory;
