pub mod connector;
pub mod auth {
    pub mod emulator;
    pub mod service_account;
}
pub mod credentials {
    pub mod file_source;
}
pub mod firestore {
    pub mod client;
    pub mod value;
}

#[cfg(test)]
pub(crate) mod test_support;
