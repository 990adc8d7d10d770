pub mod chat;
pub mod history;
pub mod key;
pub mod knowledge;
pub mod onboard;
pub mod runtime;
pub mod status;
